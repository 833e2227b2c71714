//! Applicability preconditions.

use aho_corasick::AhoCorasick;

use crate::errors::TransformError;
use crate::model::SourceFile;

/// A pure, side-effect-free predicate over a source file, used to skip
/// irrelevant files cheaply before a visitor runs.
pub trait Precondition {
    fn check(&self, file: &SourceFile) -> bool;
}

/// True iff any of the configured fully-qualified names appears as a
/// literal substring of the content.
///
/// Deliberately crude: textual containment trades false positives
/// (mentions in comments) for zero false negatives. The paired visitor
/// must be idempotent so a false positive is harmless.
#[derive(Debug, Clone)]
pub struct UsesType {
    names: Vec<String>,
    automaton: AhoCorasick,
}

impl UsesType {
    pub fn new<I, S>(names: I) -> Result<Self, TransformError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let automaton = AhoCorasick::new(&names)
            .map_err(|e| TransformError::InvalidPattern(e.to_string()))?;
        Ok(Self { names, automaton })
    }

    /// The configured type names.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Precondition for UsesType {
    fn check(&self, file: &SourceFile) -> bool {
        self.automaton.is_match(file.content())
    }
}

/// AND-composition of preconditions. Empty is vacuously true.
pub struct AllOf(Vec<Box<dyn Precondition>>);

impl AllOf {
    pub fn new(preconditions: Vec<Box<dyn Precondition>>) -> Self {
        Self(preconditions)
    }
}

impl Precondition for AllOf {
    fn check(&self, file: &SourceFile) -> bool {
        self.0.iter().all(|p| p.check(file))
    }
}

/// OR-composition of preconditions. Empty is vacuously false.
pub struct AnyOf(Vec<Box<dyn Precondition>>);

impl AnyOf {
    pub fn new(preconditions: Vec<Box<dyn Precondition>>) -> Self {
        Self(preconditions)
    }
}

impl Precondition for AnyOf {
    fn check(&self, file: &SourceFile) -> bool {
        self.0.iter().any(|p| p.check(file))
    }
}
