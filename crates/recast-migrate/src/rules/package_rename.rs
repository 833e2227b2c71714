//! Dotted-prefix namespace rename.

use std::time::Duration;

use regex::Regex;

use recast_core::errors::TransformError;
use recast_core::model::SourceFile;
use recast_core::recipe::{ExecutionContext, Precondition, Recipe, UsesType, Visitor};

/// One `old → new` package mapping with its compiled import pattern.
#[derive(Clone)]
struct RenameEntry {
    old: String,
    new: String,
    import_re: Regex,
}

/// Renames every reference to a set of package roots: `import old…;`
/// statements and `old.` qualifiers in code.
///
/// Only the pre-migration spelling ever matches, so the rule is
/// idempotent. The applicability precondition is containment of any
/// old root.
pub struct PackageRename {
    display_name: String,
    description: String,
    estimated_effort: Duration,
    entries: Vec<RenameEntry>,
    precondition: UsesType,
}

impl PackageRename {
    pub fn new(
        display_name: impl Into<String>,
        description: impl Into<String>,
        estimated_effort: Duration,
        mapping: &[(&str, &str)],
    ) -> Result<Self, TransformError> {
        let mut entries = Vec::with_capacity(mapping.len());
        for (old, new) in mapping {
            let import_re = Regex::new(&format!(r"import\s+{}(\.[^;]*)?;", regex::escape(old)))?;
            entries.push(RenameEntry {
                old: (*old).to_string(),
                new: (*new).to_string(),
                import_re,
            });
        }
        let precondition = UsesType::new(mapping.iter().map(|(old, _)| *old))?;
        Ok(Self {
            display_name: display_name.into(),
            description: description.into(),
            estimated_effort,
            entries,
            precondition,
        })
    }

    /// The Java EE → Jakarta EE package migration.
    pub fn jakarta() -> Result<Self, TransformError> {
        const MAPPING: &[(&str, &str)] = &[
            ("javax.persistence", "jakarta.persistence"),
            ("javax.servlet", "jakarta.servlet"),
            ("javax.ejb", "jakarta.ejb"),
            ("javax.jms", "jakarta.jms"),
            ("javax.mail", "jakarta.mail"),
            ("javax.xml.bind", "jakarta.xml.bind"),
            ("javax.xml.ws", "jakarta.xml.ws"),
            ("javax.annotation", "jakarta.annotation"),
            ("javax.enterprise", "jakarta.enterprise"),
            ("javax.inject", "jakarta.inject"),
            ("javax.interceptor", "jakarta.interceptor"),
            ("javax.validation", "jakarta.validation"),
            ("javax.ws.rs", "jakarta.ws.rs"),
            ("javax.json", "jakarta.json"),
            ("javax.websocket", "jakarta.websocket"),
        ];
        Self::new(
            "Migrate Java EE to Jakarta EE",
            "Migrates Java EE dependencies and imports to Jakarta EE equivalents.",
            Duration::from_secs(10 * 60),
            MAPPING,
        )
    }
}

impl Recipe for PackageRename {
    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn estimated_effort(&self) -> Duration {
        self.estimated_effort
    }

    fn precondition(&self) -> Option<Box<dyn Precondition>> {
        Some(Box::new(self.precondition.clone()))
    }

    fn visitor(&self) -> Box<dyn Visitor> {
        Box::new(PackageRenameVisitor {
            entries: self.entries.clone(),
        })
    }
}

struct PackageRenameVisitor {
    entries: Vec<RenameEntry>,
}

impl Visitor for PackageRenameVisitor {
    fn visit(
        &self,
        file: SourceFile,
        _ctx: &mut ExecutionContext,
    ) -> Result<SourceFile, TransformError> {
        let mut content = file.content().to_string();

        for entry in &self.entries {
            // Import statements first, then every qualified reference.
            content = entry
                .import_re
                .replace_all(&content, |caps: &regex::Captures| {
                    caps[0].replacen(&entry.old, &entry.new, 1)
                })
                .into_owned();
            content = content.replace(
                &format!("{}.", entry.old),
                &format!("{}.", entry.new),
            );
        }

        if content != file.content() {
            return Ok(file.with_content(content));
        }
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(rule: &PackageRename, content: &str) -> String {
        let mut ctx = ExecutionContext::new();
        rule.visitor()
            .visit(SourceFile::java("T.java", content), &mut ctx)
            .unwrap()
            .content()
            .to_string()
    }

    #[test]
    fn test_rewrites_imports_and_qualifiers() {
        let rule = PackageRename::jakarta().unwrap();
        let out = apply(
            &rule,
            "import javax.persistence.Entity;\nclass T { javax.persistence.Query q; }\n",
        );
        assert!(out.contains("import jakarta.persistence.Entity;"));
        assert!(out.contains("jakarta.persistence.Query q;"));
        assert!(!out.contains("javax.persistence"));
    }

    #[test]
    fn test_wildcard_import_rewritten() {
        let rule = PackageRename::jakarta().unwrap();
        let out = apply(&rule, "import javax.servlet.*;\n");
        assert_eq!(out, "import jakarta.servlet.*;\n");
    }

    #[test]
    fn test_unrelated_javax_packages_untouched() {
        let rule = PackageRename::jakarta().unwrap();
        let content = "import javax.swing.JFrame;\n";
        assert_eq!(apply(&rule, content), content);
    }

    #[test]
    fn test_idempotent() {
        let rule = PackageRename::jakarta().unwrap();
        let once = apply(&rule, "import javax.inject.Inject;\n");
        let twice = apply(&rule, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_precondition_gates_on_old_roots() {
        let rule = PackageRename::jakarta().unwrap();
        let pre = rule.precondition().unwrap();
        assert!(pre.check(&SourceFile::java("T.java", "javax.ejb.Stateless")));
        assert!(!pre.check(&SourceFile::java("T.java", "jakarta.ejb.Stateless")));
    }
}
