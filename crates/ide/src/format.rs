//! Pretty-print every GraphQL region of a document.

use apollo_parser::{Lexer, TokenKind};
use relay_extract::{extract_sources, GraphQLSource};
use relay_types::TextEdit;

use crate::helpers::parse_document;
use crate::printer::replacement_edit;

/// Edits that pretty-print each GraphQL region in `text`.
///
/// Regions that are blank, do not parse, contain comments or are already
/// formatted produce no edit. Edits are in document order and never overlap.
#[must_use]
pub fn format_document(language_id: &str, text: &str) -> Vec<TextEdit> {
    let Some(sources) = extract_sources(language_id, text) else {
        tracing::debug!(language_id, "Language has no GraphQL to format");
        return Vec::new();
    };
    sources.iter().filter_map(format_source).collect()
}

fn format_source(source: &GraphQLSource) -> Option<TextEdit> {
    let content = source.content();
    if content.trim().is_empty() {
        if !source.is_full_document() {
            tracing::info!("Cannot format an empty code block.");
        }
        return None;
    }
    // The printer drops comments.
    if has_comments(content) {
        tracing::debug!(start = ?source.start(), "Skipping region with comments");
        return None;
    }

    let document = parse_document(content)?;
    let edit = replacement_edit(source, &document);
    (edit.new_text != content).then_some(edit)
}

fn has_comments(content: &str) -> bool {
    Lexer::new(content)
        .filter_map(Result::ok)
        .any(|token| token.kind() == TokenKind::Comment)
}
