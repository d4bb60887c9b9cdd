use relay_types::{Language, OffsetRange, Position, Range};

use crate::scanner::{reason_block_spans, template_tag_spans};
use crate::{GraphQLSource, LineIndex};

/// Find every GraphQL region in a host document.
///
/// Returns `None` when the language never carries GraphQL, which callers must
/// keep distinct from "no regions found" (`Some(vec![])`).
#[must_use]
pub fn extract_sources(language_id: &str, text: &str) -> Option<Vec<GraphQLSource>> {
    let language = Language::from_language_id(language_id)?;

    let spans = match language {
        Language::GraphQL => {
            return Some(vec![GraphQLSource::FullDocument {
                content: text.to_string(),
            }]);
        }
        Language::Reason => reason_block_spans(text),
        Language::TypeScript | Language::JavaScript | Language::Vue => template_tag_spans(text),
    };

    let index = LineIndex::new(text);
    let sources: Vec<GraphQLSource> = spans
        .into_iter()
        .map(|span| tag_source(text, &index, span))
        .collect();

    tracing::debug!(language_id, regions = sources.len(), "Extracted GraphQL regions");
    Some(sources)
}

fn tag_source(text: &str, index: &LineIndex, span: OffsetRange) -> GraphQLSource {
    GraphQLSource::Tag {
        content: text[span.start..span.end].to_string(),
        range: Range::new(index.position(span.start), index.position(span.end)),
    }
}

/// Pick the GraphQL region containing `position` in a host document.
#[must_use]
pub fn select_operation_at(
    language_id: &str,
    text: &str,
    position: Position,
) -> Option<GraphQLSource> {
    select_source(extract_sources(language_id, text), position)
}

/// Pick the region containing `position` from an extraction result.
///
/// A full document always wins. Otherwise the last region whose line span
/// contains `position.line` is chosen, so the most recently scanned
/// enclosing region takes precedence.
#[must_use]
pub fn select_source(
    sources: Option<Vec<GraphQLSource>>,
    position: Position,
) -> Option<GraphQLSource> {
    let sources = sources?;

    if let Some(full) = sources.iter().find(|s| s.is_full_document()) {
        return Some(full.clone());
    }

    sources.into_iter().rev().find(|source| {
        let range = source.host_range();
        range.start.line <= position.line && position.line <= range.end.line
    })
}
