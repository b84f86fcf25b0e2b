use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// Row delta of a simple move. Black starts at the bottom and moves up.
    #[must_use]
    pub const fn forward(self) -> isize {
        match self {
            Self::Black => -1,
            Self::White => 1,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Black => '@',
            Self::White => 'O',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => f.write_str("black"),
            Self::White => f.write_str("white"),
        }
    }
}

/// State of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Light square, never part of play.
    Unavailable,
    Empty,
    Piece(Color),
}

impl Cell {
    /// Decodes a layout literal: 0 unavailable, 1 empty, 2 black, 3 white.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Unavailable),
            1 => Some(Self::Empty),
            2 => Some(Self::Piece(Color::Black)),
            3 => Some(Self::Piece(Color::White)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Unavailable => 0,
            Self::Empty => 1,
            Self::Piece(Color::Black) => 2,
            Self::Piece(Color::White) => 3,
        }
    }

    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            Self::Piece(color) => Some(color),
            Self::Unavailable | Self::Empty => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Shifts the location, or `None` if either index would go negative.
    /// The upper bound is the board's business, see [`Board::contains`].
    #[must_use]
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }

    #[must_use]
    pub const fn midpoint(self, other: Self) -> Self {
        Self {
            row: (self.row + other.row) / 2,
            col: (self.col + other.col) / 2,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Built-in starting positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// 6x6 board, two rows of pieces per side.
    #[default]
    Reference,
    /// 8x8 Russian draughts opening, three rows per side.
    Standard,
}

const REFERENCE_LAYOUT: [[u8; 6]; 6] = [
    [0, 3, 0, 3, 0, 3],
    [3, 0, 3, 0, 3, 0],
    [0, 1, 0, 1, 0, 1],
    [1, 0, 1, 0, 1, 0],
    [0, 2, 0, 2, 0, 2],
    [2, 0, 2, 0, 2, 0],
];

const STANDARD_LAYOUT: [[u8; 8]; 8] = [
    [0, 3, 0, 3, 0, 3, 0, 3],
    [3, 0, 3, 0, 3, 0, 3, 0],
    [0, 3, 0, 3, 0, 3, 0, 3],
    [1, 0, 1, 0, 1, 0, 1, 0],
    [0, 1, 0, 1, 0, 1, 0, 1],
    [2, 0, 2, 0, 2, 0, 2, 0],
    [0, 2, 0, 2, 0, 2, 0, 2],
    [2, 0, 2, 0, 2, 0, 2, 0],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown cell code {code} at ({row}, {col})")]
    UnknownCode { row: usize, col: usize, code: u8 },
}

/// Fixed-size grid of cells. Dimensions never change after construction and
/// `Clone` is a deep copy, so search branches never alias each other.
///
/// Serialized as its layout literal; deserializing goes through
/// [`Board::from_layout`] and fails on the same errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::opening(Layout::default())
    }
}

impl Board {
    /// Builds a board from a literal grid of cell codes.
    pub fn from_layout<R: AsRef<[u8]>>(layout: &[R]) -> Result<Self, LayoutError> {
        let cols = layout.first().map_or(0, |row| row.as_ref().len());
        if cols == 0 {
            return Err(LayoutError::Empty);
        }

        let mut cells = Vec::with_capacity(layout.len() * cols);
        for (row, codes) in layout.iter().enumerate() {
            let codes = codes.as_ref();
            if codes.len() != cols {
                return Err(LayoutError::Ragged {
                    row,
                    expected: cols,
                    found: codes.len(),
                });
            }
            for (col, &code) in codes.iter().enumerate() {
                let cell =
                    Cell::from_code(code).ok_or(LayoutError::UnknownCode { row, col, code })?;
                cells.push(cell);
            }
        }

        Ok(Self {
            rows: layout.len(),
            cols,
            cells,
        })
    }

    #[must_use]
    pub fn opening(layout: Layout) -> Self {
        match layout {
            Layout::Reference => Self::from_literal(&REFERENCE_LAYOUT),
            Layout::Standard => Self::from_literal(&STANDARD_LAYOUT),
        }
    }

    /// A board with no pieces: dark squares (odd `row + col`) empty, the rest unavailable.
    #[must_use]
    pub fn empty(rows: usize, cols: usize) -> Self {
        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .map(|(row, col)| {
                if (row + col) % 2 == 1 {
                    Cell::Empty
                } else {
                    Cell::Unavailable
                }
            })
            .collect();
        Self { rows, cols, cells }
    }

    fn from_literal<const R: usize, const C: usize>(grid: &[[u8; C]; R]) -> Self {
        let cells = grid
            .iter()
            .flatten()
            .map(|&code| Cell::from_code(code).unwrap_or(Cell::Unavailable))
            .collect();
        Self {
            rows: R,
            cols: C,
            cells,
        }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub const fn contains(&self, loc: Location) -> bool {
        loc.row < self.rows && loc.col < self.cols
    }

    const fn index(&self, loc: Location) -> Option<usize> {
        if self.contains(loc) {
            Some(loc.row * self.cols + loc.col)
        } else {
            None
        }
    }

    /// Cell at `loc`, `None` when off the board.
    #[must_use]
    pub fn get(&self, loc: Location) -> Option<Cell> {
        self.index(loc).and_then(|i| self.cells.get(i)).copied()
    }

    #[must_use]
    pub fn color_at(&self, loc: Location) -> Option<Color> {
        self.get(loc).and_then(Cell::color)
    }

    #[must_use]
    pub fn is_empty_at(&self, loc: Location) -> bool {
        self.get(loc) == Some(Cell::Empty)
    }

    /// Writes a cell. Off-board writes are ignored.
    pub fn set(&mut self, loc: Location, cell: Cell) {
        if let Some(slot) = self.index(loc).and_then(|i| self.cells.get_mut(i)) {
            *slot = cell;
        }
    }

    /// Every location, row-major.
    pub fn locations(&self) -> impl Iterator<Item = Location> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Location::new(row, col)))
    }

    /// Locations holding a piece of `color`, row-major.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = Location> + '_ {
        self.locations().filter(move |&loc| self.color_at(loc) == Some(color))
    }

    #[must_use]
    pub fn count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.color() == Some(color))
            .count()
    }

    /// Layout literal for this board, the inverse of [`Board::from_layout`].
    #[must_use]
    pub fn to_layout(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols.max(1))
            .map(|row| row.iter().map(|cell| cell.code()).collect())
            .collect()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Board {
    type Error = LayoutError;

    fn try_from(layout: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::from_layout(&layout)
    }
}

impl From<Board> for Vec<Vec<u8>> {
    fn from(board: Board) -> Self {
        board.to_layout()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(self.cols * 3 + 4);
        writeln!(f, "{border}")?;
        for row in self.cells.chunks(self.cols.max(1)) {
            f.write_str("|")?;
            for cell in row {
                let symbol = cell.color().map_or('-', Color::symbol);
                write!(f, "  {symbol}")?;
            }
            writeln!(f, "  |")?;
        }
        write!(f, "{border}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_opening() {
        let board = Board::opening(Layout::Reference);
        assert_eq!(board.rows(), 6);
        assert_eq!(board.cols(), 6);
        assert_eq!(board.count(Color::Black), 6);
        assert_eq!(board.count(Color::White), 6);
        assert_eq!(board.color_at(Location::new(0, 1)), Some(Color::White));
        assert_eq!(board.color_at(Location::new(5, 0)), Some(Color::Black));
        assert_eq!(board.get(Location::new(0, 0)), Some(Cell::Unavailable));
        assert!(board.is_empty_at(Location::new(2, 1)));
    }

    #[test]
    fn test_standard_opening() {
        let board = Board::opening(Layout::Standard);
        assert_eq!(board.rows(), 8);
        assert_eq!(board.count(Color::Black), 12);
        assert_eq!(board.count(Color::White), 12);
        // Every piece sits on a dark square.
        for loc in board.locations() {
            if board.color_at(loc).is_some() {
                assert_eq!((loc.row + loc.col) % 2, 1, "piece on light square {loc}");
            }
        }
    }

    #[test]
    fn test_layout_round_trip() {
        let board = Board::opening(Layout::Reference);
        let again = Board::from_layout(board.to_layout().as_slice()).unwrap();
        assert_eq!(board, again);
    }

    #[test]
    fn test_layout_errors() {
        let empty: [[u8; 0]; 0] = [];
        assert_eq!(Board::from_layout(&empty), Err(LayoutError::Empty));

        let ragged: [&[u8]; 2] = [&[0, 1, 0], &[1, 0]];
        assert_eq!(
            Board::from_layout(&ragged),
            Err(LayoutError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );

        let unknown: [&[u8]; 2] = [&[0, 1], &[7, 0]];
        assert_eq!(
            Board::from_layout(&unknown),
            Err(LayoutError::UnknownCode {
                row: 1,
                col: 0,
                code: 7
            })
        );
    }

    #[test]
    fn test_serde_uses_layout() {
        let board = Board::opening(Layout::Reference);
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.starts_with("[[0,3,0,3,0,3],"));
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_deserialize_rejects_bad_grids() {
        assert!(serde_json::from_str::<Board>(r#"{"rows":8,"cols":8,"cells":["Empty"]}"#).is_err());
        assert!(serde_json::from_str::<Board>("[]").is_err());
        assert!(serde_json::from_str::<Board>("[[0,1],[1]]").is_err());
        assert!(serde_json::from_str::<Board>("[[0,1],[9,0]]").is_err());
    }

    #[test]
    fn test_clone_is_deep() {
        let board = Board::opening(Layout::Reference);
        let mut copy = board.clone();
        copy.set(Location::new(0, 1), Cell::Empty);
        assert_eq!(board.color_at(Location::new(0, 1)), Some(Color::White));
        assert!(copy.is_empty_at(Location::new(0, 1)));
    }

    #[test]
    fn test_out_of_bounds_fails_closed() {
        let mut board = Board::opening(Layout::Reference);
        let before = board.clone();
        assert_eq!(board.get(Location::new(6, 0)), None);
        assert_eq!(board.get(Location::new(0, 6)), None);
        board.set(Location::new(9, 9), Cell::Empty);
        assert_eq!(board, before);
        assert_eq!(Location::new(0, 3).offset(-1, 1), None);
        assert_eq!(
            Location::new(2, 3).offset(-2, 2),
            Some(Location::new(0, 5))
        );
    }

    #[test]
    fn test_display() {
        let board = Board::opening(Layout::Reference);
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[1], "|  -  O  -  O  -  O  |");
        assert_eq!(lines[6], "|  @  -  @  -  @  -  |");
    }
}
