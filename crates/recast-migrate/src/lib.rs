//! recast-migrate — concrete rewrite rules, the version-upgrade
//! strategy selector, and the per-file migration engine.
//!
//! Rules follow one shape: compiled patterns owned by the recipe,
//! cloned into a visitor that rewrites only the pre-migration spelling
//! of its targets, so repeated application is a no-op.

pub mod engine;
pub mod rules;
pub mod versions;

pub use engine::{FileOutcome, MigrationEngine};
pub use versions::select_recipe;
