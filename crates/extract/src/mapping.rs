//! Conversions between host-document and region coordinates.
//!
//! Every value crossing the host/region boundary goes through this module.

use relay_types::{OffsetRange, Position, Range, RegionPosition};

use crate::{GraphQLSource, LineIndex};

/// Map a host position into the coordinate space of `source`.
///
/// The region's opening line becomes line 1. Columns on that line are made
/// relative to the region start; later lines keep their column.
#[must_use]
pub fn to_region_space(host: Position, source: &GraphQLSource) -> RegionPosition {
    let start = source.start();
    let line = host.line.saturating_sub(start.line) + 1;
    let character = if host.line == start.line {
        host.character.saturating_sub(start.character)
    } else {
        host.character
    };
    RegionPosition::new(line, character)
}

/// Inverse of [`to_region_space`].
#[must_use]
pub fn to_host_space(region: RegionPosition, source: &GraphQLSource) -> Position {
    let start = source.start();
    if region.line <= 1 {
        Position::new(start.line, start.character + region.character)
    } else {
        Position::new(start.line + region.line - 1, region.character)
    }
}

/// Map a host selection into region space, ordered so that `start <= end`
/// even when the selection was made backwards.
#[must_use]
pub fn normalize_selection(
    range: Range,
    source: &GraphQLSource,
) -> (RegionPosition, RegionPosition) {
    let start = to_region_space(range.start, source);
    let end = to_region_space(range.end, source);
    if end < start {
        (end, start)
    } else {
        (start, end)
    }
}

/// Converts between byte offsets in a region's content and [`RegionPosition`]s.
#[derive(Debug, Clone)]
pub struct RegionLocator {
    index: LineIndex,
}

impl RegionLocator {
    #[must_use]
    pub fn new(content: &str) -> Self {
        Self {
            index: LineIndex::new(content),
        }
    }

    /// Region position of a byte offset in the content.
    #[must_use]
    pub fn position(&self, offset: usize) -> RegionPosition {
        let (line, col) = self.index.line_col(offset);
        RegionPosition::new(line as u32 + 1, col as u32)
    }

    /// Byte offset of a region position, or `None` if the line is outside the region.
    #[must_use]
    pub fn offset(&self, position: RegionPosition) -> Option<usize> {
        let line = (position.line as usize).checked_sub(1)?;
        self.index.offset(line, position.character as usize)
    }

    /// Region positions of both ends of a byte span.
    #[must_use]
    pub fn span(&self, range: OffsetRange) -> (RegionPosition, RegionPosition) {
        (self.position(range.start), self.position(range.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(start: Position) -> GraphQLSource {
        GraphQLSource::Tag {
            content: "\n  query Q {\n    id\n  }\n".to_string(),
            range: Range::new(start, Position::new(start.line + 4, 0)),
        }
    }

    #[test]
    fn later_lines_keep_their_column() {
        let source = tag(Position::new(10, 18));
        assert_eq!(
            to_region_space(Position::new(12, 4), &source),
            RegionPosition::new(3, 4)
        );
    }

    #[test]
    fn first_line_is_relative_to_region_start() {
        let source = tag(Position::new(10, 18));
        assert_eq!(
            to_region_space(Position::new(10, 20), &source),
            RegionPosition::new(1, 2)
        );
    }

    #[test]
    fn host_and_region_space_round_trip() {
        let source = tag(Position::new(3, 7));
        for host in [Position::new(3, 7), Position::new(3, 9), Position::new(5, 0)] {
            assert_eq!(to_host_space(to_region_space(host, &source), &source), host);
        }
    }

    #[test]
    fn full_document_starts_at_line_one() {
        let source = GraphQLSource::FullDocument {
            content: "query { id }".to_string(),
        };
        assert_eq!(
            to_region_space(Position::new(0, 8), &source),
            RegionPosition::new(1, 8)
        );
    }

    #[test]
    fn backwards_selection_is_normalized() {
        let source = tag(Position::new(0, 0));
        let backwards = Range::new(Position::new(3, 2), Position::new(1, 4));
        let (start, end) = normalize_selection(backwards, &source);
        assert_eq!(start, RegionPosition::new(2, 4));
        assert_eq!(end, RegionPosition::new(4, 2));
    }

    #[test]
    fn locator_maps_offsets_to_region_positions() {
        let content = "\n  query Q {\n    id\n  }\n";
        let locator = RegionLocator::new(content);
        let id = content.find("id").unwrap();

        assert_eq!(locator.position(id), RegionPosition::new(3, 4));
        assert_eq!(locator.offset(RegionPosition::new(3, 4)), Some(id));
        assert_eq!(locator.offset(RegionPosition::new(0, 0)), None);
    }

    #[test]
    fn host_cursor_reaches_the_right_offset() {
        let text = "let q = graphql`\n  query Q {\n    id\n  }\n`;";
        let source = crate::select_operation_at("javascript", text, Position::new(2, 5)).unwrap();
        let locator = RegionLocator::new(source.content());
        let offset = locator
            .offset(to_region_space(Position::new(2, 5), &source))
            .unwrap();
        assert_eq!(&source.content()[offset..offset + 1], "d");
    }
}
