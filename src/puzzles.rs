use crate::board::{Board, BoardError};
use std::fmt;
use std::fs;
use std::io;

/// Error type for puzzle-file parsing operations.
#[derive(Debug)]
pub enum PuzzleError {
    /// IO error when reading from file
    Io(io::Error),
    /// Invalid puzzle line
    Invalid { line: usize, error: BoardError },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleError::Io(err) => write!(f, "IO error: {}", err),
            PuzzleError::Invalid { line, error } => {
                write!(f, "invalid puzzle on line {}: {}", line, error)
            }
        }
    }
}

impl From<io::Error> for PuzzleError {
    fn from(err: io::Error) -> Self {
        PuzzleError::Io(err)
    }
}

/// A collection of start configurations loaded from text.
#[derive(Debug)]
pub struct Puzzles {
    boards: Vec<Board>,
}

impl Puzzles {
    /// Parse puzzles from text: one configuration per non-empty line as
    /// 16 whitespace-separated integers (0 for the blank). Lines starting
    /// with `;` are comments.
    pub fn from_text(contents: &str) -> Result<Self, PuzzleError> {
        let mut boards = Vec::new();

        for (number, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }
            let board = Board::from_text(line).map_err(|error| PuzzleError::Invalid {
                line: number + 1,
                error,
            })?;
            boards.push(board);
        }

        Ok(Puzzles { boards })
    }

    /// Parse puzzles from a text file.
    pub fn from_file(path: &str) -> Result<Self, PuzzleError> {
        let contents = fs::read_to_string(path)?;
        Self::from_text(&contents)
    }

    /// Get the nth puzzle (0-indexed).
    pub fn get(&self, index: usize) -> Option<&Board> {
        self.boards.get(index)
    }

    /// Get the number of puzzles.
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_basic() {
        let contents = "\
; easy
1 2 3 4 5 6 7 8 9 10 11 12 13 14 0 15

; harder
5 1 2 3 9 6 7 4 13 10 11 8 14 15 0 12
";
        let puzzles = Puzzles::from_text(contents).unwrap();
        assert_eq!(puzzles.len(), 2);
        assert_eq!(puzzles.get(0).unwrap().blank_index(), 14);
        assert_eq!(puzzles.get(1).unwrap().cells()[0], 5);
        assert!(puzzles.get(2).is_none());
    }

    #[test]
    fn test_from_text_invalid_line() {
        let contents = "\
1 2 3 4 5 6 7 8 9 10 11 12 13 14 0 15
1 2 3
";
        let result = Puzzles::from_text(contents);
        assert!(matches!(
            result.unwrap_err(),
            PuzzleError::Invalid { line: 2, .. }
        ));
    }

    #[test]
    fn test_from_text_empty() {
        let puzzles = Puzzles::from_text("; only comments\n\n").unwrap();
        assert!(puzzles.is_empty());
    }

    #[test]
    fn test_from_file_no_file() {
        let result = Puzzles::from_file("nonexistent_puzzles.txt");
        assert!(matches!(result.unwrap_err(), PuzzleError::Io(_)));
    }
}
