//! Recipe abstraction — descriptors, visitors, preconditions.
//!
//! A `Recipe` is a pure descriptor plus a factory for its `Visitor`.
//! Composite and leaf recipes satisfy the same trait; no inheritance
//! hierarchy is required.

pub mod composite;
pub mod context;
pub mod precondition;

pub use composite::{CompositeRecipe, CompositeVisitor};
pub use context::ExecutionContext;
pub use precondition::{AllOf, AnyOf, Precondition, UsesType};

use std::time::Duration;

use crate::errors::TransformError;
use crate::model::SourceFile;

/// A named, composable unit of migration logic.
///
/// Holds no per-file state: the same recipe value is reused across
/// every file of a run.
pub trait Recipe {
    /// Human-readable name used in reports and error messages.
    fn display_name(&self) -> &str;

    fn description(&self) -> &str;

    /// Estimated *manual follow-up* work a human still owes after the
    /// automated rewrite — not execution time.
    fn estimated_effort(&self) -> Duration {
        Duration::ZERO
    }

    /// Ordered child recipes; empty for leaf recipes.
    fn children(&self) -> &[Box<dyn Recipe>] {
        &[]
    }

    /// Cheap applicability gate. `None` means always applicable.
    fn precondition(&self) -> Option<Box<dyn Precondition>> {
        None
    }

    /// Build the executable transformation for this recipe.
    fn visitor(&self) -> Box<dyn Visitor>;
}

/// The executable transformation attached to a recipe.
///
/// Contract (see the composite visitor for how chains are run):
/// - idempotent: visiting already-migrated content is a no-op;
/// - deterministic: no reliance on file ordering, clocks, or external
///   state beyond the execution context's property bag;
/// - local: never inspects or mutates any file other than the one
///   passed in.
pub trait Visitor {
    fn visit(
        &self,
        file: SourceFile,
        ctx: &mut ExecutionContext,
    ) -> Result<SourceFile, TransformError>;
}
