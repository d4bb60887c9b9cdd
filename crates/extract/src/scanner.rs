//! Two-phase scan for embedded GraphQL.
//!
//! Phase one detects an opening (a `graphql`-style template tag, or a
//! `{|` preceded by a `[%relay.*]` / `[%graphql` annotation). Phase two walks
//! forward with a balance counter to find the matching close. Every loop
//! iteration strictly advances, and an unterminated opening yields nothing.

use relay_types::OffsetRange;

/// Template tags recognized in script files, longest first.
const TEMPLATE_TAGS: &[&str] = &["graphql.experimental", "graphql", "gql"];

/// Reason extension points that may carry GraphQL.
const REASON_ANNOTATIONS: &[&str] = &["[%graphql", "[%relay."];

/// Content spans of every tagged GraphQL template literal in `text`.
pub(crate) fn template_tag_spans(text: &str) -> Vec<OffsetRange> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut cursor = 0;

    while let Some(tick) = find_byte(bytes, b'`', cursor) {
        if !is_tagged(text, tick) {
            cursor = tick + 1;
            continue;
        }

        let content_start = tick + 1;
        let Some(close) = template_end(bytes, content_start) else {
            tracing::debug!(offset = tick, "Unterminated GraphQL template literal");
            break;
        };

        if close > content_start {
            spans.push(OffsetRange::new(content_start, close));
        }
        cursor = close + 1;
    }

    spans
}

/// Content spans of every `{| ... |}` block that follows a GraphQL annotation.
///
/// The annotation must sit between the previous block (or the start of the
/// text) and the block's opening `{|`.
pub(crate) fn reason_block_spans(text: &str) -> Vec<OffsetRange> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    let mut annotated_from = 0;

    while let Some(open) = find_str(text, "{|", cursor) {
        let content_start = open + 2;
        let annotated = has_annotation(&text[annotated_from..open]);

        let Some(close) = find_str(text, "|}", content_start) else {
            tracing::debug!(offset = open, "Unterminated Reason GraphQL block");
            break;
        };

        if annotated && close > content_start {
            spans.push(OffsetRange::new(content_start, close));
        }
        cursor = close + 2;
        annotated_from = cursor;
    }

    spans
}

fn has_annotation(prefix: &str) -> bool {
    REASON_ANNOTATIONS.iter().any(|annotation| {
        prefix.match_indices(*annotation).any(|(at, _)| {
            // `[%relay.` must be followed by a word, `[%graphql` must end there
            let rest = &prefix[at + annotation.len()..];
            if annotation.ends_with('.') {
                rest.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_')
            } else {
                !rest.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_')
            }
        })
    })
}

/// Whether the backtick at `tick` opens a GraphQL-tagged template.
fn is_tagged(text: &str, tick: usize) -> bool {
    let before = &text[..tick];
    TEMPLATE_TAGS.iter().any(|tag| {
        before.strip_suffix(*tag).is_some_and(|head| {
            !head
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        })
    })
}

/// Index of the backtick closing a template literal whose body starts at `from`.
///
/// `${ ... }` substitutions are skipped as a unit, including any template
/// literals nested inside them.
fn template_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => return Some(i),
            b'$' if bytes.get(i + 1) == Some(&b'{') => i = substitution_end(bytes, i + 2)?,
            _ => i += 1,
        }
    }
    None
}

/// Index just past the `}` closing a substitution whose body starts at `from`.
fn substitution_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            b'`' => i = template_end(bytes, i + 1)?,
            quote @ (b'\'' | b'"') => i = string_end(bytes, i + 1, quote)?,
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index of the quote closing a string literal whose body starts at `from`.
fn string_end(bytes: &[u8], from: usize, quote: u8) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i),
            b'\n' => return None,
            _ => i += 1,
        }
    }
    None
}

fn find_byte(bytes: &[u8], needle: u8, from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|i| from + i)
}

fn find_str(text: &str, needle: &str, from: usize) -> Option<usize> {
    text.get(from..)?.find(needle).map(|i| from + i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents<'a>(text: &'a str, spans: &[OffsetRange]) -> Vec<&'a str> {
        spans.iter().map(|s| &text[s.start..s.end]).collect()
    }

    #[test]
    fn finds_each_graphql_tag() {
        let text = "const a = graphql`query A { id }`;\nconst b = gql`fragment B on User { id }`;";
        let spans = template_tag_spans(text);
        assert_eq!(
            contents(text, &spans),
            vec!["query A { id }", "fragment B on User { id }"]
        );
    }

    #[test]
    fn recognizes_experimental_tag() {
        let text = "graphql.experimental`query X { id }`";
        let spans = template_tag_spans(text);
        assert_eq!(contents(text, &spans), vec!["query X { id }"]);
    }

    #[test]
    fn ignores_untagged_and_lookalike_tags() {
        let text = "const s = `query Nope { id }`;\nconst t = mygql`query Nope2 { id }`;";
        assert!(template_tag_spans(text).is_empty());
    }

    #[test]
    fn skips_nested_template_substitutions() {
        let text = "graphql`query Q { ${cond ? `a` : `b`} id }` + gql`query R { id }`";
        let spans = template_tag_spans(text);
        assert_eq!(
            contents(text, &spans),
            vec!["query Q { ${cond ? `a` : `b`} id }", "query R { id }"]
        );
    }

    #[test]
    fn unterminated_tag_yields_nothing() {
        let text = "const a = graphql`query A { id }";
        assert!(template_tag_spans(text).is_empty());

        let text = "const a = graphql`query A { ${ }";
        assert!(template_tag_spans(text).is_empty());
    }

    #[test]
    fn empty_template_yields_nothing() {
        assert!(template_tag_spans("graphql``").is_empty());
    }

    #[test]
    fn finds_reason_blocks_after_annotations() {
        let text = "module Query = [%relay.query\n  {|\n    query Q { id }\n  |}\n];\n\
                    module F = [%graphql {| query G { id } |}];";
        let spans = reason_block_spans(text);
        assert_eq!(
            contents(text, &spans),
            vec!["\n    query Q { id }\n  ", " query G { id } "]
        );
    }

    #[test]
    fn ignores_reason_blocks_without_annotation() {
        let text = "let s = {| just a string |};\nmodule Q = [%relay.query {| query Q { id } |}];";
        let spans = reason_block_spans(text);
        assert_eq!(contents(text, &spans), vec![" query Q { id } "]);
    }

    #[test]
    fn reason_annotation_needs_word_after_relay() {
        assert!(reason_block_spans("[%relay. {| query Q { id } |}]").is_empty());
        assert!(reason_block_spans("[%graphqlx {| query Q { id } |}]").is_empty());
    }

    #[test]
    fn unterminated_reason_block_yields_nothing() {
        assert!(reason_block_spans("[%relay.query {| query Q { id }").is_empty());
    }
}
