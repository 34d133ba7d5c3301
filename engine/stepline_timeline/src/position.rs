//! Offset-to-position mapping.
//!
//! The external parser reports character offsets; the renderer anchors
//! effects to line/column positions. Lines are 1-based, columns 0-based
//! (the `loc` convention of acorn-style parsers). Offsets past the end of
//! the source clamp to the position just after the last character.

use serde::Serialize;

use stepline_ast::Span;

/// A line/column position in the source text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// First position of any source.
    pub const START: Position = Position { line: 1, column: 0 };

    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

/// Map a span's character offsets to a pair of positions.
pub fn offsets_to_positions(span: Span, source: &str) -> (Position, Position) {
    (
        position_at(span.start, source),
        position_at(span.end, source),
    )
}

/// Map a single character offset to a position.
pub fn position_at(offset: u32, source: &str) -> Position {
    let mut line = 1u32;
    let mut column = 0u32;
    for (index, ch) in source.chars().enumerate() {
        if index as u32 >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    Position { line, column }
}
