//! Lightweight structural source model.
//!
//! A best-effort summary of a Java file (package, imports, top-level
//! type declarations) extracted by line scanning, short of a parse
//! tree. Consumed by preconditions and rules that need structural
//! facts without full parsing.

pub mod source_file;

pub use source_file::{ImportDeclaration, SourceFile, SourceKind, TypeDeclaration};
