//! Replace the legacy `sun.misc` BASE64 codec with `java.util.Base64`.
//!
//! The legacy classes are not exported by the module system: using
//! them warns on Java 11 and fails on Java 17. Imports, constructor
//! calls, and the common encode/decode call shapes are rewritten; a
//! file that already carries its own incompatible `Base64` definition
//! is left alone for a human.

use std::time::Duration;

use regex::Regex;

use recast_core::errors::TransformError;
use recast_core::model::SourceFile;
use recast_core::recipe::{ExecutionContext, Precondition, Recipe, UsesType, Visitor};

/// A literal rewrite whose replacement is selected by the MIME flag.
#[derive(Clone)]
struct CoderRewrite {
    re: Regex,
    standard: &'static str,
    mime: &'static str,
}

impl CoderRewrite {
    fn new(
        pattern: &str,
        standard: &'static str,
        mime: &'static str,
    ) -> Result<Self, TransformError> {
        Ok(Self {
            re: Regex::new(pattern)?,
            standard,
            mime,
        })
    }

    fn replacement(&self, use_mime: bool) -> &'static str {
        if use_mime {
            self.mime
        } else {
            self.standard
        }
    }
}

/// Replaces the legacy BASE64 encoder/decoder with `java.util.Base64`.
pub struct UseJavaUtilBase64 {
    display_name: String,
    description: String,
    use_mime_coder: bool,
    precondition: UsesType,
    imports: Vec<(Regex, &'static str)>,
    constructors: Vec<CoderRewrite>,
    calls: Vec<CoderRewrite>,
    nested_args: Regex,
}

impl UseJavaUtilBase64 {
    /// `legacy_package` is the package the BASE64 classes live in
    /// (empty selects `sun.misc`); `use_mime_coder` selects the MIME
    /// encoder/decoder in every replacement.
    pub fn new(legacy_package: &str, use_mime_coder: bool) -> Result<Self, TransformError> {
        let legacy_package = if legacy_package.is_empty() {
            "sun.misc"
        } else {
            legacy_package
        };
        let escaped = regex::escape(legacy_package);

        let precondition = UsesType::new([
            format!("{legacy_package}.BASE64Encoder"),
            format!("{legacy_package}.BASE64Decoder"),
        ])?;

        let imports = vec![
            (
                Regex::new(&format!(r"import\s+{escaped}\.BASE64Encoder;"))?,
                "import java.util.Base64;",
            ),
            (
                Regex::new(&format!(r"import\s+{escaped}\.BASE64Decoder;"))?,
                "import java.util.Base64;",
            ),
        ];

        let constructors = vec![
            CoderRewrite::new(
                r"new\s+BASE64Encoder\s*\(\s*\)",
                "Base64.getEncoder()",
                "Base64.getMimeEncoder()",
            )?,
            CoderRewrite::new(
                r"new\s+BASE64Decoder\s*\(\s*\)",
                "Base64.getDecoder()",
                "Base64.getMimeDecoder()",
            )?,
        ];

        // One call per match window, no recursion: arguments containing
        // parentheses are caught by `nested_args` instead.
        let calls = vec![
            CoderRewrite::new(
                r"(?P<recv>\w+)\.encode\s*\(\s*(?P<args>[^)]+?)\s*\)",
                "Base64.getEncoder().encodeToString(${args})",
                "Base64.getMimeEncoder().encodeToString(${args})",
            )?,
            CoderRewrite::new(
                r"(?P<recv>\w+)\.encodeBuffer\s*\(\s*(?P<args>[^)]+?)\s*\)",
                "Base64.getEncoder().encodeToString(${args})",
                "Base64.getMimeEncoder().encodeToString(${args})",
            )?,
            CoderRewrite::new(
                r"(?P<recv>\w+)\.decodeBuffer\s*\(\s*(?P<args>[^)]+?)\s*\)",
                "Base64.getDecoder().decode(${args})",
                "Base64.getMimeDecoder().decode(${args})",
            )?,
        ];

        let nested_args =
            Regex::new(r"\w+\.(?:encode|encodeBuffer|decodeBuffer)\s*\([^)]*\(")?;

        Ok(Self {
            display_name: "Prefer java.util.Base64 over the legacy codec".to_string(),
            description: format!(
                "Replaces {legacy_package} BASE64Encoder/BASE64Decoder with java.util.Base64. \
                 The legacy classes are not exported by the Java module system: a warning on \
                 Java 11 and an error on Java 17."
            ),
            use_mime_coder,
            precondition,
            imports,
            constructors,
            calls,
            nested_args,
        })
    }
}

impl Recipe for UseJavaUtilBase64 {
    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn estimated_effort(&self) -> Duration {
        Duration::ZERO
    }

    fn precondition(&self) -> Option<Box<dyn Precondition>> {
        Some(Box::new(self.precondition.clone()))
    }

    fn visitor(&self) -> Box<dyn Visitor> {
        Box::new(Base64Visitor {
            name: self.display_name.clone(),
            use_mime_coder: self.use_mime_coder,
            applicable: self.precondition.clone(),
            imports: self.imports.clone(),
            constructors: self.constructors.clone(),
            calls: self.calls.clone(),
            nested_args: self.nested_args.clone(),
        })
    }
}

struct Base64Visitor {
    name: String,
    use_mime_coder: bool,
    applicable: UsesType,
    imports: Vec<(Regex, &'static str)>,
    constructors: Vec<CoderRewrite>,
    calls: Vec<CoderRewrite>,
    nested_args: Regex,
}

impl Base64Visitor {
    /// A file that declares its own `Base64` type, or imports one that
    /// is not `java.util.Base64`, already has an incompatible
    /// definition of the target symbol — possibly a manual workaround.
    /// Rewriting it would risk corruption.
    fn already_incompatible(&self, file: &SourceFile) -> bool {
        if file.types().iter().any(|t| t.simple_name == "Base64") {
            return true;
        }
        file.imports().iter().any(|imp| {
            imp.package_name.ends_with(".Base64") && imp.package_name != "java.util.Base64"
        })
    }
}

impl Visitor for Base64Visitor {
    fn visit(
        &self,
        file: SourceFile,
        ctx: &mut ExecutionContext,
    ) -> Result<SourceFile, TransformError> {
        // Defence in depth: a no-op on files the precondition would
        // have skipped, even when invoked directly.
        if !self.applicable.check(&file) {
            return Ok(file);
        }

        if self.already_incompatible(&file) {
            tracing::warn!(rule = %self.name, path = %file.path(), "incompatible Base64 definition present, leaving file unchanged");
            ctx.request_manual_review(
                file.path(),
                "file defines or imports its own Base64; replace the legacy codec by hand",
            );
            return Ok(file);
        }

        if self.nested_args.is_match(file.content()) {
            tracing::warn!(rule = %self.name, path = %file.path(), "nested call arguments, cannot rewrite safely");
            ctx.request_manual_review(
                file.path(),
                "encode/decode call with nested parentheses in arguments; rewrite by hand",
            );
            return Ok(file);
        }

        let mut content = file.content().to_string();

        for (re, replacement) in &self.imports {
            content = re.replace_all(&content, *replacement).into_owned();
        }
        for rewrite in &self.constructors {
            content = rewrite
                .re
                .replace_all(&content, rewrite.replacement(self.use_mime_coder))
                .into_owned();
        }
        for rewrite in &self.calls {
            content = rewrite
                .re
                .replace_all(&content, rewrite.replacement(self.use_mime_coder))
                .into_owned();
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

    const LEGACY: &str = r#"import sun.misc.BASE64Encoder;
import sun.misc.BASE64Decoder;

public class Example {
    public void run(byte[] data) {
        BASE64Encoder encoder = new BASE64Encoder();
        String encoded = encoder.encode(data);
        BASE64Decoder decoder = new BASE64Decoder();
        byte[] decoded = decoder.decodeBuffer(encoded);
    }
}
"#;

    fn apply(rule: &UseJavaUtilBase64, content: &str) -> (String, ExecutionContext) {
        let mut ctx = ExecutionContext::new();
        let out = rule
            .visitor()
            .visit(SourceFile::java("Example.java", content), &mut ctx)
            .unwrap();
        (out.content().to_string(), ctx)
    }

    #[test]
    fn test_standard_coder_rewrite() {
        let rule = UseJavaUtilBase64::new("sun.misc", false).unwrap();
        let (out, _) = apply(&rule, LEGACY);
        assert!(out.contains("import java.util.Base64;"));
        assert!(!out.contains("sun.misc"));
        assert!(!out.contains("new BASE64Encoder()"));
        assert!(!out.contains("new BASE64Decoder()"));
        assert!(out.contains("Base64.getEncoder().encodeToString(data)"));
        assert!(out.contains("Base64.getDecoder().decode(encoded)"));
    }

    #[test]
    fn test_mime_coder_rewrite() {
        let rule = UseJavaUtilBase64::new("sun.misc", true).unwrap();
        let (out, _) = apply(&rule, LEGACY);
        assert!(out.contains("Base64.getMimeEncoder()"));
        assert!(out.contains("Base64.getMimeEncoder().encodeToString(data)"));
        assert!(out.contains("Base64.getMimeDecoder().decode(encoded)"));
    }

    #[test]
    fn test_empty_package_defaults_to_sun_misc() {
        let rule = UseJavaUtilBase64::new("", false).unwrap();
        let (out, _) = apply(&rule, LEGACY);
        assert!(!out.contains("sun.misc"));
    }

    #[test]
    fn test_idempotent() {
        let rule = UseJavaUtilBase64::new("sun.misc", false).unwrap();
        let (once, _) = apply(&rule, LEGACY);
        let (twice, _) = apply(&rule, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_noop_without_legacy_references() {
        // Other receivers with an encode method are none of our
        // business when the legacy classes are absent.
        let rule = UseJavaUtilBase64::new("sun.misc", false).unwrap();
        let content = "String s = URLEncoder.encode(value);\n";
        let (out, _) = apply(&rule, content);
        assert_eq!(out, content);
    }

    #[test]
    fn test_own_base64_class_is_an_escape_hatch() {
        let rule = UseJavaUtilBase64::new("sun.misc", false).unwrap();
        let content = "import sun.misc.BASE64Encoder;\n\npublic class Base64 {\n}\n";
        let (out, ctx) = apply(&rule, content);
        assert_eq!(out, content);
        assert!(ctx.manual_review_requested("Example.java"));
    }

    #[test]
    fn test_incompatible_base64_import_is_an_escape_hatch() {
        let rule = UseJavaUtilBase64::new("sun.misc", false).unwrap();
        let content =
            "import org.apache.commons.codec.binary.Base64;\n// sun.misc.BASE64Encoder\nclass C {}\n";
        let (out, ctx) = apply(&rule, content);
        assert_eq!(out, content);
        assert!(ctx.manual_review_requested("Example.java"));
    }

    #[test]
    fn test_java_util_base64_import_is_compatible() {
        let rule = UseJavaUtilBase64::new("sun.misc", false).unwrap();
        let content = "import java.util.Base64;\nimport sun.misc.BASE64Encoder;\nclass C {}\n";
        let (out, ctx) = apply(&rule, content);
        assert!(!out.contains("sun.misc"));
        assert!(!ctx.manual_review_requested("Example.java"));
    }

    #[test]
    fn test_nested_call_args_request_manual_review() {
        let rule = UseJavaUtilBase64::new("sun.misc", false).unwrap();
        let content = "import sun.misc.BASE64Encoder;\nString s = encoder.encode(wrap(data));\n";
        let (out, ctx) = apply(&rule, content);
        assert_eq!(out, content);
        assert!(ctx.manual_review_requested("Example.java"));
    }
}
