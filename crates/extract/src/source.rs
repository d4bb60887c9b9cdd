use relay_types::{Position, Range};

use crate::LineIndex;

/// A region of GraphQL text found in a host document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphQLSource {
    /// The whole document is GraphQL.
    FullDocument { content: String },
    /// GraphQL embedded in a tagged template or a Reason extension point.
    /// `range` covers exactly `content` in host coordinates.
    Tag { content: String, range: Range },
}

impl GraphQLSource {
    /// The region's GraphQL text.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::FullDocument { content } | Self::Tag { content, .. } => content,
        }
    }

    /// Host position of the region's first byte.
    #[must_use]
    pub const fn start(&self) -> Position {
        match self {
            Self::FullDocument { .. } => Position::new(0, 0),
            Self::Tag { range, .. } => range.start,
        }
    }

    /// Host range the region occupies.
    ///
    /// For a full document this spans the whole text.
    #[must_use]
    pub fn host_range(&self) -> Range {
        match self {
            Self::FullDocument { content } => {
                Range::new(Position::new(0, 0), LineIndex::new(content).end_position())
            }
            Self::Tag { range, .. } => *range,
        }
    }

    #[must_use]
    pub const fn is_full_document(&self) -> bool {
        matches!(self, Self::FullDocument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_document_range_spans_text() {
        let source = GraphQLSource::FullDocument {
            content: "query {\n  id\n}\n".to_string(),
        };
        assert_eq!(source.start(), Position::new(0, 0));
        assert_eq!(
            source.host_range(),
            Range::new(Position::new(0, 0), Position::new(3, 0))
        );
        assert!(source.is_full_document());
    }

    #[test]
    fn test_tag_range_is_stored_range() {
        let range = Range::new(Position::new(2, 14), Position::new(5, 2));
        let source = GraphQLSource::Tag {
            content: "\n  query { id }\n".to_string(),
            range,
        };
        assert_eq!(source.start(), Position::new(2, 14));
        assert_eq!(source.host_range(), range);
        assert_eq!(source.content(), "\n  query { id }\n");
    }
}
