//! Build-descriptor Java version-token rewrite.
//!
//! Two dialects, dispatched by exact filename: Maven (`pom.xml`,
//! XML-attribute style) and Gradle (`build.gradle`,
//! `build.gradle.kts`, declarative-script style). Tokens whose current
//! value is at or above the target are never downgraded.

use std::time::Duration;

use regex::Regex;

use recast_core::errors::TransformError;
use recast_core::model::SourceFile;
use recast_core::recipe::{ExecutionContext, Recipe, Visitor};

/// Build-descriptor dialect, matched by exact filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildDialect {
    Maven,
    Gradle,
}

impl BuildDialect {
    /// Dialect for a path, `None` for anything that is not a
    /// recognised build descriptor.
    pub fn of_path(path: &str) -> Option<Self> {
        match file_name(path) {
            "pom.xml" => Some(Self::Maven),
            "build.gradle" | "build.gradle.kts" => Some(Self::Gradle),
            _ => None,
        }
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// One version-token pattern: a prefix capture, a numeric capture,
/// and an optional suffix capture.
#[derive(Clone)]
struct VersionPattern {
    re: Regex,
}

impl VersionPattern {
    fn new(pattern: &str) -> Result<Self, TransformError> {
        Ok(Self {
            re: Regex::new(pattern)?,
        })
    }

    /// Replace the numeric token with `target`, leaving any token that
    /// is already at or above `target` unchanged (never downgrades).
    fn apply(&self, content: &str, target: u32) -> String {
        self.re
            .replace_all(content, |caps: &regex::Captures| {
                let current: u32 = caps["num"].parse().unwrap_or(0);
                if current >= target {
                    return caps[0].to_string();
                }
                let suffix = caps.name("post").map(|m| m.as_str()).unwrap_or("");
                format!("{}{}{}", &caps["pre"], target, suffix)
            })
            .into_owned()
    }
}

fn maven_patterns() -> Result<Vec<VersionPattern>, TransformError> {
    Ok(vec![
        VersionPattern::new(
            r"(?P<pre><maven\.compiler\.source>)(?P<num>\d+)(?P<post></maven\.compiler\.source>)",
        )?,
        VersionPattern::new(
            r"(?P<pre><maven\.compiler\.target>)(?P<num>\d+)(?P<post></maven\.compiler\.target>)",
        )?,
        VersionPattern::new(r"(?P<pre><source>)(?P<num>\d+)(?P<post></source>)")?,
        VersionPattern::new(r"(?P<pre><target>)(?P<num>\d+)(?P<post></target>)")?,
        VersionPattern::new(r"(?P<pre><release>)(?P<num>\d+)(?P<post></release>)")?,
    ])
}

fn gradle_patterns() -> Result<Vec<VersionPattern>, TransformError> {
    Ok(vec![
        VersionPattern::new(r"(?P<pre>sourceCompatibility\s*=\s*JavaVersion\.VERSION_)(?P<num>\d+)")?,
        VersionPattern::new(r"(?P<pre>targetCompatibility\s*=\s*JavaVersion\.VERSION_)(?P<num>\d+)")?,
        VersionPattern::new(r"(?P<pre>sourceCompatibility\s*=\s*)(?P<num>\d+)")?,
        VersionPattern::new(r"(?P<pre>targetCompatibility\s*=\s*)(?P<num>\d+)")?,
        VersionPattern::new(
            r"(?P<pre>languageVersion\s*=\s*JavaLanguageVersion\.of\()(?P<num>\d+)(?P<post>\))",
        )?,
    ])
}

/// Rewrites version tokens in both build dialects. Non-build files
/// pass through unchanged.
///
/// Carries two dialect-specific child recipes for reporting
/// granularity; behaviourally they cover the same rewrites.
pub struct UpgradeJavaVersion {
    description: String,
    version: u32,
    maven: Vec<VersionPattern>,
    gradle: Vec<VersionPattern>,
    children: Vec<Box<dyn Recipe>>,
}

impl UpgradeJavaVersion {
    pub fn new(version: u32) -> Result<Self, TransformError> {
        Ok(Self {
            description: format!(
                "Upgrade build configuration to Java {version}: Maven compiler plugin settings \
                 in pom.xml, and source/target compatibility or toolchain language version in \
                 build.gradle(.kts). Will not downgrade a version that is already newer."
            ),
            version,
            maven: maven_patterns()?,
            gradle: gradle_patterns()?,
            children: vec![
                Box::new(UpdateMavenCompilerPlugin::new(version)?),
                Box::new(UpdateGradleCompatibility::new(version)?),
            ],
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }
}

impl Recipe for UpgradeJavaVersion {
    fn display_name(&self) -> &str {
        "Upgrade Java version"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn children(&self) -> &[Box<dyn Recipe>] {
        &self.children
    }

    fn visitor(&self) -> Box<dyn Visitor> {
        Box::new(VersionVisitor {
            version: self.version,
            maven: self.maven.clone(),
            gradle: self.gradle.clone(),
            only: None,
        })
    }
}

struct VersionVisitor {
    version: u32,
    maven: Vec<VersionPattern>,
    gradle: Vec<VersionPattern>,
    only: Option<BuildDialect>,
}

impl Visitor for VersionVisitor {
    fn visit(
        &self,
        file: SourceFile,
        _ctx: &mut ExecutionContext,
    ) -> Result<SourceFile, TransformError> {
        let Some(dialect) = BuildDialect::of_path(file.path()) else {
            return Ok(file);
        };
        if self.only.is_some_and(|only| only != dialect) {
            return Ok(file);
        }

        let patterns = match dialect {
            BuildDialect::Maven => &self.maven,
            BuildDialect::Gradle => &self.gradle,
        };

        let mut content = file.content().to_string();
        for pattern in patterns {
            content = pattern.apply(&content, self.version);
        }

        if content != file.content() {
            tracing::debug!(path = %file.path(), version = self.version, "version tokens rewritten");
            return Ok(file.with_content(content));
        }
        Ok(file)
    }
}

/// Maven-only slice of the version upgrade, for per-dialect reporting.
pub struct UpdateMavenCompilerPlugin {
    version: u32,
    maven: Vec<VersionPattern>,
}

impl UpdateMavenCompilerPlugin {
    pub fn new(version: u32) -> Result<Self, TransformError> {
        Ok(Self {
            version,
            maven: maven_patterns()?,
        })
    }
}

impl Recipe for UpdateMavenCompilerPlugin {
    fn display_name(&self) -> &str {
        "Update Maven compiler plugin"
    }

    fn description(&self) -> &str {
        "Update Maven compiler plugin settings to the target Java version."
    }

    fn visitor(&self) -> Box<dyn Visitor> {
        Box::new(VersionVisitor {
            version: self.version,
            maven: self.maven.clone(),
            gradle: Vec::new(),
            only: Some(BuildDialect::Maven),
        })
    }
}

/// Gradle-only slice of the version upgrade, for per-dialect reporting.
pub struct UpdateGradleCompatibility {
    version: u32,
    gradle: Vec<VersionPattern>,
}

impl UpdateGradleCompatibility {
    pub fn new(version: u32) -> Result<Self, TransformError> {
        Ok(Self {
            version,
            gradle: gradle_patterns()?,
        })
    }
}

impl Recipe for UpdateGradleCompatibility {
    fn display_name(&self) -> &str {
        "Update Gradle Java compatibility"
    }

    fn description(&self) -> &str {
        "Update Gradle source/target compatibility and toolchain settings to the target Java version."
    }

    fn visitor(&self) -> Box<dyn Visitor> {
        Box::new(VersionVisitor {
            version: self.version,
            maven: Vec::new(),
            gradle: self.gradle.clone(),
            only: Some(BuildDialect::Gradle),
        })
    }
}
