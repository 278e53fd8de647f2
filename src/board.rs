use arrayvec::ArrayVec;
use std::fmt;

pub const SIZE: usize = 4;
pub const CELLS: usize = SIZE * SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
            Direction::Left => write!(f, "Left"),
            Direction::Right => write!(f, "Right"),
        }
    }
}

/// Error type for board construction and parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Input does not contain exactly 16 cells
    WrongLength(usize),
    /// Cell value outside 0..=15
    ValueOutOfRange(u8),
    /// Cell value appears more than once
    DuplicateValue(u8),
    /// Token could not be parsed as a cell value
    InvalidToken(String),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::WrongLength(n) => {
                write!(f, "expected {} cells, got {}", CELLS, n)
            }
            BoardError::ValueOutOfRange(v) => {
                write!(f, "cell value {} out of range (expected 0-{})", v, CELLS - 1)
            }
            BoardError::DuplicateValue(v) => write!(f, "duplicate cell value {}", v),
            BoardError::InvalidToken(t) => write!(f, "invalid cell token '{}'", t),
        }
    }
}

/// A 4x4 tile configuration: 16 cells in row-major order, values 1-15 for
/// the tiles and 0 for the blank. Always a permutation of 0..=15.
///
/// Boards are immutable values; `slide` and `neighbors` return new boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [u8; CELLS],
    blank: u8,
}

impl Board {
    /// The solved configuration: tiles 1-15 in order, blank in the last cell.
    pub const GOAL: Board = Board {
        cells: [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 0],
        blank: 15,
    };

    /// Build a board from 16 cell values in row-major order.
    /// Validates that the input is a permutation of 0..=15.
    pub fn from_cells(cells: &[u8]) -> Result<Self, BoardError> {
        if cells.len() != CELLS {
            return Err(BoardError::WrongLength(cells.len()));
        }

        let mut seen = 0u16;
        let mut blank = 0u8;
        let mut board_cells = [0u8; CELLS];

        for (i, &value) in cells.iter().enumerate() {
            if value as usize >= CELLS {
                return Err(BoardError::ValueOutOfRange(value));
            }
            if seen & (1u16 << value) != 0 {
                return Err(BoardError::DuplicateValue(value));
            }
            seen |= 1u16 << value;
            if value == 0 {
                blank = i as u8;
            }
            board_cells[i] = value;
        }

        Ok(Board {
            cells: board_cells,
            blank,
        })
    }

    /// Parse a board from text: 16 whitespace-separated integers in
    /// row-major order, with `0` standing for the blank.
    pub fn from_text(text: &str) -> Result<Self, BoardError> {
        let mut cells = Vec::with_capacity(CELLS);
        for token in text.split_whitespace() {
            let value: u8 = token
                .parse()
                .map_err(|_| BoardError::InvalidToken(token.to_string()))?;
            cells.push(value);
        }
        Self::from_cells(&cells)
    }

    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    /// Row-major index of the blank cell.
    pub fn blank_index(&self) -> usize {
        self.blank as usize
    }

    pub fn is_solved(&self) -> bool {
        self.cells == Self::GOAL.cells
    }

    /// Pack the 16 cells into a single u64 (4 bits per cell) for cheap
    /// hashing and equality in visited sets.
    pub fn key(&self) -> u64 {
        self.cells
            .iter()
            .fold(0u64, |acc, &v| (acc << 4) | v as u64)
    }

    /// Slide the blank one cell in the given direction, swapping it with
    /// the tile there. Returns None if that would leave the grid.
    pub fn slide(&self, dir: Direction) -> Option<Board> {
        let (dr, dc) = dir.delta();
        let row = (self.blank as usize / SIZE) as i8 + dr;
        let col = (self.blank as usize % SIZE) as i8 + dc;

        if row < 0 || col < 0 || row >= SIZE as i8 || col >= SIZE as i8 {
            return None;
        }

        let target = row as usize * SIZE + col as usize;
        let mut cells = self.cells;
        cells.swap(self.blank as usize, target);

        Some(Board {
            cells,
            blank: target as u8,
        })
    }

    /// All legal one-move successors: between 2 (blank in a corner) and 4
    /// (blank in the interior), each differing from `self` by exactly one
    /// swap of the blank with an orthogonally adjacent tile.
    pub fn neighbors(&self) -> ArrayVec<Board, 4> {
        let mut result = ArrayVec::new();
        for dir in ALL_DIRECTIONS {
            if let Some(next) = self.slide(dir) {
                result.push(next);
            }
        }
        result
    }

    /// Sum over all non-blank tiles of the row + column distance between
    /// the tile's current cell and its goal cell. Admissible: a single
    /// slide changes exactly one tile's distance, by exactly 1.
    pub fn manhattan(&self) -> u32 {
        let mut distance = 0usize;
        for (i, &value) in self.cells.iter().enumerate() {
            if value == 0 {
                continue;
            }
            let goal = value as usize - 1;
            distance += (i / SIZE).abs_diff(goal / SIZE);
            distance += (i % SIZE).abs_diff(goal % SIZE);
        }
        distance as u32
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            for col in 0..SIZE {
                if col > 0 {
                    write!(f, " ")?;
                }
                match self.cells[row * SIZE + col] {
                    0 => write!(f, " .")?,
                    v => write!(f, "{:2}", v)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
