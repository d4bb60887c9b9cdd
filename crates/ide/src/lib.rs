//! # relay-ide
//!
//! Editor-facing refactors for GraphQL embedded in Relay components.
//!
//! Everything here is synchronous and pure: callers hand in the host
//! document text, a selection and a schema, and get back edits in host
//! coordinates. Nothing is written to disk.
//!
//! ## Architecture
//!
//! ```text
//! CLI (reason-relay)
//!     ↓
//! relay-ide (this crate) ← code actions, extraction, scaffolding, formatting
//!     ↓
//! relay-extract ← GraphQL regions and coordinate mapping
//!     ↓
//! relay-types ← positions, ranges, edits
//! ```
//!
//! ## Main entry points
//!
//! - [`code_actions`] - refactors available at a selection
//! - [`extract_fragment`] - second phase of "extract to fragment component"
//! - [`scaffold`] - new Relay modules for a Reason component
//! - [`format_document`] - pretty-print every GraphQL region

mod code_actions;
mod context;
mod extract_fragment;
mod format;
mod helpers;
pub mod mutators;
mod names;
pub mod printer;
pub mod rewrite;
mod scaffold;
mod types;

pub use code_actions::code_actions;
pub use context::{CursorContext, CursorToken};
pub use extract_fragment::{
    extract_fragment, ExtractFragmentError, Result, EXTRACT_ACTION_TITLE, EXTRACT_COMMAND_TITLE,
};
pub use format::format_document;
pub use names::{capitalize, is_valid_component_name, module_name_from_path, uncapitalize};
pub use scaffold::{
    fragment_candidates, make_args, root_field_candidates, scaffold, ComponentKind, Prompter,
};
pub use types::{
    ActionPayload, ActionRequest, CodeAction, CodeActionKind, ExtractChoice,
    ExtractFragmentCommand, ExtractedComponent,
};

pub use relay_types::{NewFile, OffsetRange, Position, Range, TextEdit};
