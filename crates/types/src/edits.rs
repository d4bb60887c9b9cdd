//! Edit types handed back to the host editor.

use std::path::PathBuf;

use crate::Range;

/// A text edit representing a change to apply to a host document.
///
/// The range is in host-document coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Range to replace
    pub range: Range,
    /// The text to replace the range with (empty string means deletion)
    pub new_text: String,
}

impl TextEdit {
    /// Create a new text edit that replaces a range with new text.
    #[must_use]
    pub fn new(range: Range, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }

    /// Returns `true` if this edit is a deletion (empty `new_text`).
    #[must_use]
    pub fn is_deletion(&self) -> bool {
        self.new_text.is_empty() && !self.range.is_empty()
    }
}

/// A brand-new file to be written by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFile {
    /// Target path, derived from the source file's path
    pub path: PathBuf,
    /// Full file contents
    pub contents: String,
}

impl NewFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}
