//! recast-core — source model, recipe abstraction, and shared plumbing
//! for the recast Java migration engine.
//!
//! A migration run applies one top-level recipe to each file of a
//! project. Recipes are pure descriptors; their visitors are pure
//! functions over `(SourceFile, ExecutionContext)`. Nothing in this
//! crate touches the filesystem.

pub mod config;
pub mod errors;
pub mod model;
pub mod recipe;
pub mod traits;

pub use model::{ImportDeclaration, SourceFile, SourceKind, TypeDeclaration};
pub use recipe::{
    AllOf, AnyOf, CompositeRecipe, ExecutionContext, Precondition, Recipe, UsesType, Visitor,
};
pub use traits::{Cancellable, CancellationToken};
