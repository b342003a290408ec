use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag that partitions the question catalog into independent quiz topics.
///
/// Matching is strict: two categories are equal only when their strings are
/// byte-for-byte identical. No case folding or whitespace trimming is applied,
/// so `"React"` and `"react "` are different categories.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Creates a new `Category`
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the category name as given
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category({:?})", self.0)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_exact() {
        assert_eq!(Category::new("React"), Category::from("React"));
        assert_ne!(Category::new("React"), Category::new("react"));
        assert_ne!(Category::new("React"), Category::new("React "));
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Category::new("TypeScript")).unwrap();
        assert_eq!(json, "\"TypeScript\"");
    }
}
