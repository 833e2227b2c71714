//! Per-file migration engine — the boundary between the rewrite core
//! and the I/O layer.
//!
//! The caller hands in `(path, raw bytes)` pairs; the engine decodes,
//! models, runs the selected recipe's visitor chain, and reports
//! whether the content changed. Writing files, progress output, and
//! exit codes stay on the caller's side.

use recast_core::config::Base64Config;
use recast_core::errors::{RunError, ScanError, TransformError};
use recast_core::model::SourceFile;
use recast_core::recipe::{ExecutionContext, Recipe, Visitor};

use crate::versions::select_recipe;

/// Result of processing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: String,
    pub content: String,
    /// True iff `content` differs from the input; the caller decides
    /// whether to write based on this and its dry-run policy.
    pub changed: bool,
}

/// Applies one top-level recipe to files, one at a time.
///
/// Files are processed independently: one file's failure cannot
/// corrupt state for the next, so callers may abort or skip-and-
/// continue as policy dictates.
pub struct MigrationEngine {
    recipe: Box<dyn Recipe>,
    visitor: Box<dyn Visitor>,
}

impl MigrationEngine {
    /// Engine for a target Java version, using the strategy selector.
    pub fn new(target_version: u32, base64: &Base64Config) -> Result<Self, TransformError> {
        Ok(Self::from_recipe(select_recipe(target_version, base64)?))
    }

    /// Engine for an explicit recipe.
    pub fn from_recipe(recipe: Box<dyn Recipe>) -> Self {
        let visitor = recipe.visitor();
        Self { recipe, visitor }
    }

    /// The recipe this engine applies.
    pub fn recipe(&self) -> &dyn Recipe {
        self.recipe.as_ref()
    }

    /// Process a single file.
    pub fn run_file(
        &self,
        path: &str,
        bytes: &[u8],
        ctx: &mut ExecutionContext,
    ) -> Result<FileOutcome, RunError> {
        let content = std::str::from_utf8(bytes).map_err(|_| RunError::Parse {
            path: path.to_string(),
            source: ScanError::InvalidEncoding {
                path: path.to_string(),
            },
        })?;

        let file = if path.ends_with(".java") {
            SourceFile::java(path, content)
        } else {
            SourceFile::plain(path, content)
        };

        if let Some(precondition) = self.recipe.precondition() {
            if !precondition.check(&file) {
                return Ok(FileOutcome {
                    path: path.to_string(),
                    content: content.to_string(),
                    changed: false,
                });
            }
        }

        let out = self.visitor.visit(file, ctx).map_err(|e| {
            let rule = e
                .rule()
                .unwrap_or_else(|| self.recipe.display_name())
                .to_string();
            RunError::Transform {
                path: path.to_string(),
                rule,
                source: e,
            }
        })?;

        let changed = out.content() != content;
        if changed {
            tracing::info!(path, "modified");
        } else {
            tracing::debug!(path, "unchanged");
        }

        Ok(FileOutcome {
            path: path.to_string(),
            content: out.content().to_string(),
            changed,
        })
    }

    /// Process an ordered list of files, fail-fast on the first error.
    pub fn run<I>(&self, files: I, ctx: &mut ExecutionContext) -> Result<Vec<FileOutcome>, RunError>
    where
        I: IntoIterator<Item = (String, Vec<u8>)>,
    {
        let mut outcomes = Vec::new();
        for (path, bytes) in files {
            outcomes.push(self.run_file(&path, &bytes, ctx)?);
        }
        Ok(outcomes)
    }
}
