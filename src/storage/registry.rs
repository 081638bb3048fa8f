//! Ordered record of emitted artifact names.

use serde::{Deserialize, Serialize};

/// Append-only list of artifact names in emission order.
///
/// Owned by the caller and threaded through every save call; the
/// consolidator replays it in order. Names are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRegistry {
    names: Vec<String>,
}

impl ArtifactRegistry {
    pub fn new() -> Self {
        ArtifactRegistry::default()
    }

    /// Record that `name` was emitted.
    pub fn record(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

impl<S: Into<String>> FromIterator<S> for ArtifactRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ArtifactRegistry { names: iter.into_iter().map(Into::into).collect() }
    }
}
