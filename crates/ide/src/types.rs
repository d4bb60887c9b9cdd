//! POD types for refactor features.
//!
//! Plain structs with public fields, in host-document coordinates, that the
//! command surface hands in and gets back.

use relay_types::{NewFile, OffsetRange, Range, TextEdit};

/// A request for the refactor actions available at a selection.
#[derive(Debug, Clone, Copy)]
pub struct ActionRequest<'a> {
    /// Host language id, e.g. `reason` or `typescriptreact`
    pub language_id: &'a str,
    /// Full host document text
    pub text: &'a str,
    /// Cursor or selection in host coordinates; may be backwards
    pub selection: Range,
    /// Module name of the host file, used in generated query names
    pub module_name: &'a str,
}

/// Kind of a code action, as the host editor groups them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeActionKind {
    RefactorRewrite,
    RefactorExtract,
}

impl CodeActionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RefactorRewrite => "refactor.rewrite",
            Self::RefactorExtract => "refactor.extract",
        }
    }
}

/// What applying an action does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionPayload {
    /// Replace the enclosing GraphQL region
    Edit(TextEdit),
    /// Needs user input first, see [`crate::extract_fragment`]
    Command(ExtractFragmentCommand),
}

/// A refactor offered at a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeAction {
    pub title: String,
    pub kind: CodeActionKind,
    pub payload: ActionPayload,
}

impl CodeAction {
    #[must_use]
    pub fn edit(title: impl Into<String>, edit: TextEdit) -> Self {
        Self {
            title: title.into(),
            kind: CodeActionKind::RefactorRewrite,
            payload: ActionPayload::Edit(edit),
        }
    }

    /// The replacement edit, if this action applies directly.
    #[must_use]
    pub const fn text_edit(&self) -> Option<&TextEdit> {
        match &self.payload {
            ActionPayload::Edit(edit) => Some(edit),
            ActionPayload::Command(_) => None,
        }
    }
}

/// First phase of extracting selections into a fragment component.
///
/// Offsets are byte spans in the GraphQL region the action was computed
/// for. The region is located again from the same request when the command
/// runs, so the host text must not change in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractFragmentCommand {
    /// Title of the follow-up command
    pub title: String,
    /// Object type the extracted selections are made on
    pub parent_type: String,
    /// Span of the node owning the selection set to extract from
    pub target: OffsetRange,
    /// Spans of the selections to extract, in document order
    pub selected: Vec<OffsetRange>,
}

/// The user's answers for the second phase of an extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractChoice {
    pub component_name: String,
    pub remove_selection: bool,
}

/// Result of extracting selections into a new fragment component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedComponent {
    pub fragment_name: String,
    /// Replacement for the region the selections were taken from
    pub edit: TextEdit,
    /// The new component file
    pub new_file: NewFile,
}
