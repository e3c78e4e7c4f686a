/// Position tracking for declaration and expression nodes
///
/// Stores the source location (file, line/column) of nodes so diagnostics
/// can point back at the module definition that produced them.
use std::fmt;
use std::sync::Arc;

/// A position in source code (1-indexed, as printed to users)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// The region of a source file a node was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// Path of the module file as given to the parser.
    pub file: Arc<str>,
    pub start: Position,
    pub end: Position,
}

impl SourceLocation {
    pub fn new(file: impl Into<Arc<str>>, start: Position, end: Position) -> Self {
        Self {
            file: file.into(),
            start,
            end,
        }
    }

    /// Create a location from line/column coordinates
    pub fn from_coords(
        file: impl Into<Arc<str>>,
        start_line: u32,
        start_col: u32,
        end_line: u32,
        end_col: u32,
    ) -> Self {
        Self::new(
            file,
            Position::new(start_line, start_col),
            Position::new(end_line, end_col),
        )
    }

    /// Check if a position falls within this location
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.start.line, self.start.column)
    }
}
