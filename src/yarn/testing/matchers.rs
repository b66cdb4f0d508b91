//! Text matching utilities for package assertions

/// Text matching strategies for assertions
#[derive(Debug, Clone)]
pub enum TextMatch {
    /// Exact text match
    Exact(String),
    /// Text starts with prefix
    StartsWith(String),
    /// Text contains substring
    Contains(String),
}

impl TextMatch {
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            TextMatch::Exact(expected) => actual == expected,
            TextMatch::StartsWith(prefix) => actual.starts_with(prefix),
            TextMatch::Contains(substring) => actual.contains(substring),
        }
    }

    /// Assert that `actual` matches, naming `context` on failure.
    pub fn assert(&self, actual: &str, context: &str) {
        assert!(
            self.matches(actual),
            "{}: expected text matching {:?}, but got '{}'",
            context,
            self,
            actual
        );
    }
}
