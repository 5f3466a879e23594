//! Line-level diff model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a line relates the before text to the after text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Present in both texts.
    Context,
    /// Present only in the after text.
    Inserted,
    /// Present only in the before text.
    Deleted,
}

impl LineKind {
    /// Two-character marker used when rendering a line.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Context => "  ",
            Self::Inserted => "+ ",
            Self::Deleted => "- ",
        }
    }
}

/// One line of a line-level comparison.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiffLine {
    pub kind: LineKind,
    pub text: String,
}

impl DiffLine {
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn context(text: impl Into<String>) -> Self {
        Self::new(LineKind::Context, text)
    }

    pub fn inserted(text: impl Into<String>) -> Self {
        Self::new(LineKind::Inserted, text)
    }

    pub fn deleted(text: impl Into<String>) -> Self {
        Self::new(LineKind::Deleted, text)
    }

    /// Returns `true` for inserted and deleted lines.
    pub fn is_change(&self) -> bool {
        !matches!(self.kind, LineKind::Context)
    }
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_reference_prefixes() {
        assert_eq!(DiffLine::context("x=1").to_string(), "  x=1");
        assert_eq!(DiffLine::inserted("y=3").to_string(), "+ y=3");
        assert_eq!(DiffLine::deleted("y=2").to_string(), "- y=2");
    }

    #[test]
    fn only_inserted_and_deleted_are_changes() {
        assert!(!DiffLine::context("a").is_change());
        assert!(DiffLine::inserted("a").is_change());
        assert!(DiffLine::deleted("a").is_change());
    }

    #[test]
    fn serde_shape() {
        let json = serde_json::to_value(DiffLine::deleted("gone")).unwrap();
        assert_eq!(json["kind"], "deleted");
        assert_eq!(json["text"], "gone");
    }
}
