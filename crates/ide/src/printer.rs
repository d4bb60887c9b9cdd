//! Whitespace-preserving printer.
//!
//! A rewritten document is serialized with apollo-compiler's printer and put
//! back into the whitespace envelope of the region it came from: the region's
//! indentation is applied to every line, its trailing whitespace is kept and
//! one leading newline is added.

use apollo_compiler::ast::Document;
use relay_extract::GraphQLSource;
use relay_types::TextEdit;

/// Strip the printer's own leading and trailing blank lines.
#[must_use]
pub fn prettify(printed: &str) -> String {
    printed.trim().to_string()
}

/// Serialize a document in the standard GraphQL layout.
#[must_use]
pub fn print_document(document: &Document) -> String {
    prettify(&document.to_string())
}

/// Indentation of the first line of `operation` that starts with a word character.
///
/// Only the last line of a multi-line leading whitespace run counts. If the
/// first significant character is not a word character the padding is zero.
#[must_use]
pub fn find_operation_padding(operation: &str) -> usize {
    let leading = &operation[..operation.len() - operation.trim_start().len()];
    let starts_with_word = operation[leading.len()..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
    if !starts_with_word {
        return 0;
    }
    leading.rsplit('\n').next().map_or(0, str::len)
}

/// Prefix every line of `operation` with `indentation` spaces.
#[must_use]
pub fn pad_operation(operation: &str, indentation: usize) -> String {
    let padding = " ".repeat(indentation);
    operation
        .split('\n')
        .map(|line| format!("{padding}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Put a printed operation into the whitespace envelope of `original`.
#[must_use]
pub fn restore_operation_padding(operation: &str, original: &str) -> String {
    let trailing = &original[original.trim_end().len()..];
    format!(
        "\n{}{trailing}",
        pad_operation(operation, find_operation_padding(original))
    )
}

/// Print `document` as a replacement for the region text `original`.
#[must_use]
pub fn render(document: &Document, original: &str) -> String {
    restore_operation_padding(&print_document(document), original)
}

/// The edit replacing `source` with `document`.
///
/// A whole `.graphql` file is replaced by the printed document and one
/// trailing newline; an embedded region gets its envelope restored.
#[must_use]
pub fn replacement_edit(source: &GraphQLSource, document: &Document) -> TextEdit {
    let new_text = if source.is_full_document() {
        format!("{}\n", print_document(document))
    } else {
        render(document, source.content())
    };
    TextEdit::new(source.host_range(), new_text)
}
