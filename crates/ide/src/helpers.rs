//! Shared helpers for refactor features.
//!
//! Span lookup on AST nodes and parsing of extracted regions.

use apollo_compiler::ast::{Document, Selection};
use apollo_compiler::{Name, Node};
use relay_types::OffsetRange;

/// Byte span of a node within the text it was parsed from.
pub(crate) fn node_span<T>(node: &Node<T>) -> Option<OffsetRange> {
    node.location()
        .map(|loc| OffsetRange::new(loc.offset(), loc.end_offset()))
}

pub(crate) fn name_span(name: &Name) -> Option<OffsetRange> {
    name.location()
        .map(|loc| OffsetRange::new(loc.offset(), loc.end_offset()))
}

pub(crate) fn selection_span(selection: &Selection) -> Option<OffsetRange> {
    match selection {
        Selection::Field(field) => node_span(field),
        Selection::FragmentSpread(spread) => node_span(spread),
        Selection::InlineFragment(inline) => node_span(inline),
    }
}

/// Shrink `span` so it starts and ends on significant text.
///
/// Parsed spans may carry trailing whitespace and commas, which would move
/// their end onto a later line.
pub(crate) fn trim_span(text: &str, span: OffsetRange) -> OffsetRange {
    let is_ignored = |c: char| c.is_whitespace() || c == ',';
    let Some(slice) = text.get(span.start..span.end) else {
        return span;
    };
    let start = span.start + (slice.len() - slice.trim_start_matches(is_ignored).len());
    let end = span.start + slice.trim_end_matches(is_ignored).len();
    OffsetRange::new(start, end.max(start))
}

/// `true` if `span` is known and equal to `target`.
pub(crate) fn same_span(span: Option<OffsetRange>, target: Option<OffsetRange>) -> bool {
    span.is_some() && span == target
}

/// Parse the content of one GraphQL region.
///
/// Returns `None` on syntax errors; callers skip the region.
pub(crate) fn parse_document(content: &str) -> Option<Document> {
    match Document::parse(content, "region.graphql") {
        Ok(document) => Some(document),
        Err(with_errors) => {
            tracing::debug!(
                error_count = with_errors.errors.len(),
                "Skipping region that does not parse"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apollo_compiler::ast::Definition;

    #[test]
    fn spans_index_into_the_parsed_text() {
        let text = "\n  fragment F on User { name }\n";
        let document = parse_document(text).unwrap();
        let Definition::FragmentDefinition(fragment) = &document.definitions[0] else {
            panic!("expected a fragment");
        };

        let span = node_span(fragment).unwrap();
        let span = trim_span(text, span);
        assert_eq!(&text[span.start..span.end], "fragment F on User { name }");

        let field = trim_span(text, selection_span(&fragment.selection_set[0]).unwrap());
        assert_eq!(&text[field.start..field.end], "name");
        assert_eq!(name_span(&fragment.name).map(|s| &text[s.start..s.end]), Some("F"));
    }

    #[test]
    fn trim_span_drops_ignored_tokens() {
        let text = "{ a,\n  b }";
        assert_eq!(trim_span(text, OffsetRange::new(2, 7)), OffsetRange::new(2, 3));
        assert_eq!(trim_span(text, OffsetRange::new(3, 5)), OffsetRange::new(5, 5));
    }

    #[test]
    fn parse_failure_is_none() {
        assert!(parse_document("query { user(").is_none());
    }

    #[test]
    fn unknown_spans_never_match() {
        assert!(!same_span(None, None));
        assert!(same_span(
            Some(OffsetRange::new(1, 4)),
            Some(OffsetRange::new(1, 4))
        ));
    }
}
