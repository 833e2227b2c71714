//! Immutable `SourceFile` value and the structural line scanner.

use std::sync::OnceLock;

use regex::Regex;

/// How a file's content is modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Java source: structural fields are derived from the content.
    Java,
    /// Anything else (build descriptors): content only, no scan.
    Plain,
}

/// One `import` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    /// Dotted identifier, possibly ending in `.*`.
    pub package_name: String,
    pub is_static: bool,
    /// True iff the import names all members of a scope (`.*`).
    pub is_wildcard: bool,
}

/// One top-level type declaration (class, interface, or enum).
///
/// Methods and fields are reserved for a deeper model; no current rule
/// populates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub simple_name: String,
    /// `package.SimpleName`, or `SimpleName` alone when no package
    /// declaration was seen before the type.
    pub fully_qualified_name: String,
}

/// Immutable value representing one file under transformation.
///
/// A new `SourceFile` is produced every time content changes (never
/// mutated in place), which keeps idempotency reasoning simple: no
/// partial rewrite is ever observable outside a single visit.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: String,
    content: String,
    kind: SourceKind,
    package: Option<String>,
    imports: Vec<ImportDeclaration>,
    types: Vec<TypeDeclaration>,
}

impl SourceFile {
    /// Build a Java source file, deriving the structural fields.
    ///
    /// The scan is lenient: malformed input degrades to a partial or
    /// empty model, it never fails.
    pub fn java(path: impl Into<String>, content: impl Into<String>) -> Self {
        let mut file = Self {
            path: path.into(),
            content: content.into(),
            kind: SourceKind::Java,
            package: None,
            imports: Vec::new(),
            types: Vec::new(),
        };
        file.scan();
        file
    }

    /// Build a plain file (build descriptor or other non-Java text)
    /// with an empty structural model.
    pub fn plain(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            kind: SourceKind::Plain,
            package: None,
            imports: Vec::new(),
            types: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Declared package, if a package statement was seen.
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Imports in declaration order.
    pub fn imports(&self) -> &[ImportDeclaration] {
        &self.imports
    }

    /// Top-level type declarations in order of appearance.
    pub fn types(&self) -> &[TypeDeclaration] {
        &self.types
    }

    /// Produce a new value with different content, re-deriving the
    /// structural fields for Java files.
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        match self.kind {
            SourceKind::Java => Self::java(self.path.clone(), content),
            SourceKind::Plain => Self::plain(self.path.clone(), content),
        }
    }

    /// Line-by-line structural scan. Not a lexer: blank lines and
    /// lines opening a comment are skipped wholesale, and the three
    /// matchers are anchored to the start of the line.
    fn scan(&mut self) {
        let Some(scanner) = scanner() else {
            return;
        };

        for line in self.content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with("/*") {
                continue;
            }

            if let Some(caps) = scanner.package_re.captures(line) {
                // "Declare once" is a convention, not enforced: a second
                // package statement silently overwrites the first.
                self.package = Some(caps[1].to_string());
                continue;
            }

            if let Some(caps) = scanner.import_re.captures(line) {
                let package_name = caps[2].to_string();
                self.imports.push(ImportDeclaration {
                    is_static: caps.get(1).is_some(),
                    is_wildcard: package_name.ends_with(".*"),
                    package_name,
                });
                continue;
            }

            if let Some(caps) = scanner.type_re.captures(line) {
                let simple_name = caps[1].to_string();
                // A type seen before its package declaration stays
                // unqualified; the scanner does not reject the ordering.
                let fully_qualified_name = match &self.package {
                    Some(pkg) => format!("{pkg}.{simple_name}"),
                    None => simple_name.clone(),
                };
                self.types.push(TypeDeclaration {
                    simple_name,
                    fully_qualified_name,
                });
            }
        }
    }
}

struct StructuralScanner {
    package_re: Regex,
    import_re: Regex,
    type_re: Regex,
}

impl StructuralScanner {
    fn build() -> Result<Self, regex::Error> {
        Ok(Self {
            package_re: Regex::new(r"^\s*package\s+([A-Za-z_][A-Za-z0-9_.]*)\s*;")?,
            import_re: Regex::new(r"^\s*import\s+(static\s+)?([A-Za-z_][A-Za-z0-9_.*]*)\s*;")?,
            type_re: Regex::new(
                r"^\s*(?:public\s+|private\s+|protected\s+)?(?:abstract\s+|final\s+)?(?:class|interface|enum)\s+([A-Za-z_][A-Za-z0-9_]*)",
            )?,
        })
    }
}

// Compiled once per process. If compilation ever fails the scan
// degrades to an empty model rather than failing the run, matching the
// scanner's lenient contract.
fn scanner() -> Option<&'static StructuralScanner> {
    static SCANNER: OnceLock<Option<StructuralScanner>> = OnceLock::new();
    SCANNER
        .get_or_init(|| match StructuralScanner::build() {
            Ok(s) => Some(s),
            Err(e) => {
                tracing::warn!("structural scanner unavailable: {e}");
                None
            }
        })
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"package com.example.app;

// entry point
import java.util.List;
import static java.util.Collections.emptyList;
import com.example.util.*;

public class Main {
}

interface Runner {
}
"#;

    #[test]
    fn test_scan_extracts_package() {
        let file = SourceFile::java("Main.java", SAMPLE);
        assert_eq!(file.package(), Some("com.example.app"));
    }

    #[test]
    fn test_scan_extracts_imports_in_order() {
        let file = SourceFile::java("Main.java", SAMPLE);
        let imports = file.imports();
        assert_eq!(imports.len(), 3);
        assert_eq!(imports[0].package_name, "java.util.List");
        assert!(!imports[0].is_static);
        assert!(!imports[0].is_wildcard);
        assert_eq!(imports[1].package_name, "java.util.Collections.emptyList");
        assert!(imports[1].is_static);
        assert_eq!(imports[2].package_name, "com.example.util.*");
        assert!(imports[2].is_wildcard);
    }

    #[test]
    fn test_scan_qualifies_types_with_package() {
        let file = SourceFile::java("Main.java", SAMPLE);
        let types = file.types();
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].simple_name, "Main");
        assert_eq!(types[0].fully_qualified_name, "com.example.app.Main");
        assert_eq!(types[1].fully_qualified_name, "com.example.app.Runner");
    }

    #[test]
    fn test_type_before_package_stays_unqualified() {
        let content = "class Early {}\npackage com.late;\n";
        let file = SourceFile::java("Early.java", content);
        assert_eq!(file.types()[0].fully_qualified_name, "Early");
        assert_eq!(file.package(), Some("com.late"));
    }

    #[test]
    fn test_second_package_overwrites_first() {
        let content = "package com.first;\npackage com.second;\n";
        let file = SourceFile::java("X.java", content);
        assert_eq!(file.package(), Some("com.second"));
    }

    #[test]
    fn test_comment_lines_are_skipped() {
        let content = "// import java.util.List;\n/* class Hidden */\nclass Real {}\n";
        let file = SourceFile::java("Real.java", content);
        assert!(file.imports().is_empty());
        assert_eq!(file.types().len(), 1);
        assert_eq!(file.types()[0].simple_name, "Real");
    }

    #[test]
    fn test_malformed_input_degrades_to_empty_model() {
        let file = SourceFile::java("garbage.java", ");;;{{{ not java at all");
        assert!(file.package().is_none());
        assert!(file.imports().is_empty());
        assert!(file.types().is_empty());
    }

    #[test]
    fn test_with_content_rederives_structure() {
        let file = SourceFile::java("A.java", "package a;\nclass A {}\n");
        let updated = file.with_content("package b;\nclass B {}\n");
        assert_eq!(updated.package(), Some("b"));
        assert_eq!(updated.types()[0].fully_qualified_name, "b.B");
        // original untouched
        assert_eq!(file.package(), Some("a"));
    }

    #[test]
    fn test_plain_files_are_never_scanned() {
        let file = SourceFile::plain("pom.xml", "package fake;\nclass NotJava {}\n");
        assert!(file.package().is_none());
        assert!(file.types().is_empty());
        let updated = file.with_content("class StillNotJava {}");
        assert!(updated.types().is_empty());
        assert_eq!(updated.kind(), SourceKind::Plain);
    }
}
