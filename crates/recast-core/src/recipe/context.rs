//! Per-run execution context.

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::traits::{Cancellable, CancellationToken};

const MANUAL_REVIEW_PREFIX: &str = "manual-review:";

/// Mutable property bag plus cancellation carrier, shared by reference
/// across every visitor invocation within one run.
///
/// Used for cross-recipe signalling (e.g. "file X requires manual
/// review") — never for caching parsed output, since `SourceFile`
/// values are immutable and cheap to rebuild.
pub struct ExecutionContext {
    cancellation: CancellationToken,
    properties: FxHashMap<String, Value>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::with_cancellation(CancellationToken::new())
    }

    pub fn with_cancellation(cancellation: CancellationToken) -> Self {
        Self {
            cancellation,
            properties: FxHashMap::default(),
        }
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: Value) {
        self.properties.insert(key.into(), value);
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Record that a file needs human attention, with the reason.
    /// Later recipes (and the caller) can query this to avoid touching
    /// the file further.
    pub fn request_manual_review(&mut self, path: &str, reason: impl Into<String>) {
        self.properties.insert(
            format!("{MANUAL_REVIEW_PREFIX}{path}"),
            Value::String(reason.into()),
        );
    }

    pub fn manual_review_requested(&self, path: &str) -> bool {
        self.properties
            .contains_key(&format!("{MANUAL_REVIEW_PREFIX}{path}"))
    }

    /// All (path, reason) manual-review entries recorded so far.
    pub fn manual_reviews(&self) -> Vec<(&str, &str)> {
        let mut reviews: Vec<(&str, &str)> = self
            .properties
            .iter()
            .filter_map(|(k, v)| {
                let path = k.strip_prefix(MANUAL_REVIEW_PREFIX)?;
                Some((path, v.as_str().unwrap_or_default()))
            })
            .collect();
        reviews.sort_unstable();
        reviews
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}
