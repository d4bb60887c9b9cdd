//! Cursor position extraction for refactor tests.
//!
//! Mark the cursor with `*` in a host document, or mark several positions
//! with `$1`, `$2`, ... when a test needs a selection. Columns are byte
//! columns, matching what the extractor produces.

use relay_types::Position;

/// Extract cursor position from source marked with `*`.
///
/// # Example
///
/// ```
/// use relay_test_utils::extract_cursor;
///
/// let (source, pos) = extract_cursor("query { vie*wer }");
/// assert_eq!(source, "query { viewer }");
/// assert_eq!((pos.line, pos.character), (0, 11));
/// ```
///
/// # Panics
///
/// Panics if the input contains no `*` marker or multiple `*` markers.
pub fn extract_cursor(input: &str) -> (String, Position) {
    let marker_count = input.matches('*').count();

    assert!(
        marker_count != 0,
        "extract_cursor: input must contain exactly one '*' marker, found none"
    );
    assert!(
        marker_count <= 1,
        "extract_cursor: input must contain exactly one '*' marker, found {marker_count}"
    );

    let mut line = 0u32;
    let mut character = 0u32;
    let mut found = None;
    let mut result = String::with_capacity(input.len() - 1);

    for ch in input.chars() {
        if ch == '*' {
            found = Some(Position::new(line, character));
            continue;
        }
        result.push(ch);
        if ch == '\n' {
            line += 1;
            character = 0;
        } else {
            character += ch.len_utf8() as u32;
        }
    }

    (result, found.unwrap())
}

/// Extract multiple positions marked with `$1`, `$2`, etc.
///
/// Returns the clean source and the positions in marker order. GraphQL
/// variables never start with a digit, so `$first` is left alone.
///
/// ```
/// use relay_test_utils::extract_cursors;
///
/// let (source, positions) = extract_cursors("query($first: Int) { $1a $2}");
/// assert_eq!(source, "query($first: Int) { a }");
/// assert_eq!(positions.len(), 2);
/// ```
pub fn extract_cursors(input: &str) -> (String, Vec<Position>) {
    let mut positions: Vec<(u32, Position)> = Vec::new();
    let mut result = String::with_capacity(input.len());
    let mut line = 0u32;
    let mut character = 0u32;

    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '$' {
            if let Some(marker) = chars.peek().and_then(|c| c.to_digit(10)) {
                chars.next();
                positions.push((marker, Position::new(line, character)));
                continue;
            }
        }

        result.push(ch);
        if ch == '\n' {
            line += 1;
            character = 0;
        } else {
            character += ch.len_utf8() as u32;
        }
    }

    positions.sort_by_key(|(marker, _)| *marker);
    (result, positions.into_iter().map(|(_, pos)| pos).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_cursor_multiline() {
        let (source, pos) = extract_cursor("fragment F on User {\n  na*me\n}");
        assert_eq!(source, "fragment F on User {\n  name\n}");
        assert_eq!(pos, Position::new(1, 4));
    }

    #[test]
    fn test_extract_cursor_counts_bytes() {
        let (_, pos) = extract_cursor("let é = 1; *x");
        assert_eq!(pos, Position::new(0, 12));
    }

    #[test]
    #[should_panic(expected = "found none")]
    fn test_extract_cursor_no_marker() {
        extract_cursor("query { user }");
    }

    #[test]
    #[should_panic(expected = "found 2")]
    fn test_extract_cursor_multiple_markers() {
        extract_cursor("query { *user* }");
    }

    #[test]
    fn test_extract_cursors_out_of_order() {
        let (source, positions) = extract_cursors("$2second\n$1first");
        assert_eq!(source, "second\nfirst");
        assert_eq!(positions, vec![Position::new(1, 0), Position::new(0, 0)]);
    }

    #[test]
    fn test_extract_cursors_keeps_variables() {
        let (source, positions) = extract_cursors("user(id: $id) $1");
        assert_eq!(source, "user(id: $id) ");
        assert_eq!(positions, vec![Position::new(0, 14)]);
    }
}
