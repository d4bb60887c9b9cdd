//! Position and range types for source locations.
//!
//! Two coordinate spaces exist: the host document ([`Position`]) and the
//! embedded GraphQL region ([`RegionPosition`]). They are distinct types so a
//! value from one space cannot be passed where the other is expected; the
//! conversions live in `relay_extract::mapping`.

/// Byte offset range in a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OffsetRange {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl OffsetRange {
    /// Create a new offset range.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a zero-width range at a specific offset.
    #[must_use]
    pub const fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Returns the length of this range in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if this is a zero-width range.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if `offset` lies within the range, counting the end offset as inside.
    ///
    /// A cursor placed right after the last character of a name still
    /// belongs to that name.
    #[must_use]
    pub const fn touches(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    /// Check if `other` lies entirely within this range.
    #[must_use]
    pub const fn contains_range(&self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl std::fmt::Display for OffsetRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Position in a host document (editor coordinates, 0-indexed).
///
/// - `line` is 0-indexed (first line is 0)
/// - `character` is a 0-indexed byte column from line start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: u32,
    /// Byte column within the line (0-indexed)
    pub character: u32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Equal => self.character.cmp(&other.character),
            ord => ord,
        }
    }
}

/// Range in a host document (editor coordinates).
///
/// A range represents a span of text from `start` (inclusive) to `end` (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Range {
    /// Create a new range.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a zero-width range at a specific position.
    #[must_use]
    pub const fn at(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Returns `true` if this is a zero-width range.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start.line == self.end.line && self.start.character == self.end.character
    }

    /// Check if this range contains a position.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position >= self.start && position < self.end
    }

    /// Returns the same range with `start <= end`.
    #[must_use]
    pub fn ordered(self) -> Self {
        if self.end < self.start {
            Self::new(self.end, self.start)
        } else {
            self
        }
    }
}

/// Position relative to the start of an embedded GraphQL region.
///
/// - `line` is 1-indexed: the line the region opens on is line 1. The
///   printer always emits a leading newline before re-rendered content, so
///   region line `n` is line `n` of the rendered replacement as well.
/// - `character` is a byte column. On line 1 it is measured from the
///   region's first byte, on later lines from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionPosition {
    /// Line number within the region (1-indexed)
    pub line: u32,
    /// Byte column within the region line (0-indexed)
    pub character: u32,
}

impl RegionPosition {
    /// Create a new region position.
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl PartialOrd for RegionPosition {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RegionPosition {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line
            .cmp(&other.line)
            .then(self.character.cmp(&other.character))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_range_creation() {
        let range = OffsetRange::new(10, 20);
        assert_eq!(range.start, 10);
        assert_eq!(range.end, 20);
        assert_eq!(range.len(), 10);
        assert!(!range.is_empty());
    }

    #[test]
    fn test_offset_range_display() {
        let range = OffsetRange::new(10, 20);
        assert_eq!(format!("{range}"), "10..20");
    }

    #[test]
    fn test_offset_range_touches_end() {
        let range = OffsetRange::new(4, 9);
        assert!(range.touches(4));
        assert!(range.touches(9));
        assert!(!range.touches(10));
        assert!(!range.touches(3));
    }

    #[test]
    fn test_offset_range_contains_range() {
        let outer = OffsetRange::new(0, 20);
        assert!(outer.contains_range(OffsetRange::new(5, 20)));
        assert!(!outer.contains_range(OffsetRange::new(5, 21)));
    }

    #[test]
    fn test_position_ordering() {
        let p1 = Position::new(0, 5);
        let p2 = Position::new(0, 10);
        let p3 = Position::new(1, 0);

        assert!(p1 < p2);
        assert!(p2 < p3);
        assert!(p1 < p3);
        assert_eq!(p1.cmp(&p1), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_range_contains() {
        let range = Range::new(Position::new(1, 0), Position::new(3, 0));
        assert!(range.contains(Position::new(1, 5)));
        assert!(range.contains(Position::new(2, 0)));
        assert!(!range.contains(Position::new(0, 5)));
        assert!(!range.contains(Position::new(3, 0))); // end is exclusive
    }

    #[test]
    fn test_range_ordered_swaps_backwards_selection() {
        let backwards = Range::new(Position::new(4, 2), Position::new(1, 7));
        let ordered = backwards.ordered();
        assert_eq!(ordered.start, Position::new(1, 7));
        assert_eq!(ordered.end, Position::new(4, 2));

        let forwards = Range::new(Position::new(0, 0), Position::new(0, 1));
        assert_eq!(forwards.ordered(), forwards);
    }

    #[test]
    fn test_region_position_ordering() {
        assert!(RegionPosition::new(1, 9) < RegionPosition::new(2, 0));
        assert!(RegionPosition::new(2, 1) < RegionPosition::new(2, 3));
    }
}
