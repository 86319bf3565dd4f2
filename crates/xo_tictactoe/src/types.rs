//! Core domain types for tic-tac-toe.

use crate::error::{IllegalMoveReason, PlayError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Side length of the board.
pub const SIZE: usize = 3;

/// Symbol placed by one of the two sides.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Symbol {
    /// Opens every round.
    #[serde(rename = "X")]
    #[strum(to_string = "X", serialize = "x", serialize = "first")]
    First,
    /// Answers the opening move.
    #[serde(rename = "O")]
    #[strum(to_string = "O", serialize = "o", serialize = "second")]
    Second,
}

impl Symbol {
    /// Returns the other symbol.
    pub fn opponent(self) -> Self {
        match self {
            Symbol::First => Symbol::Second,
            Symbol::Second => Symbol::First,
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here yet.
    Empty,
    /// Square holds a symbol.
    Occupied(Symbol),
}

impl Cell {
    /// Returns true for an unoccupied square.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the occupying symbol, if any.
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(symbol) => Some(symbol),
        }
    }
}

/// A (row, col) coordinate. Both components are expected in `0..3`;
/// out-of-range values are rejected when the move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Row index, top to bottom.
    pub row: usize,
    /// Column index, left to right.
    pub col: usize,
}

impl Move {
    /// Creates a move.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Builds a move from a row-major index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        (index < SIZE * SIZE).then(|| Self::new(index / SIZE, index % SIZE))
    }

    /// Row-major index (0-8), or `None` when out of range.
    pub fn index(self) -> Option<usize> {
        (self.row < SIZE && self.col < SIZE).then(|| self.row * SIZE + self.col)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// 3x3 tic-tac-toe board.
///
/// The board only knows about squares. Turn order is the caller's business:
/// a board built by hand may hold any mix of symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; SIZE * SIZE],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; SIZE * SIZE],
        }
    }

    /// Gets the cell at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cell(Move::new(row, col))
    }

    /// Gets the cell targeted by a move.
    pub fn cell(&self, mv: Move) -> Option<Cell> {
        mv.index().map(|i| self.cells[i])
    }

    /// Places `symbol` at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::IllegalMove`] if the coordinates are out of range
    /// or the cell is already occupied. The board is unchanged on error.
    pub fn set(&mut self, row: usize, col: usize, symbol: Symbol) -> Result<(), PlayError> {
        let index = Move::new(row, col).index().ok_or(PlayError::IllegalMove {
            row,
            col,
            reason: IllegalMoveReason::OutOfRange,
        })?;
        if !self.cells[index].is_empty() {
            return Err(PlayError::IllegalMove {
                row,
                col,
                reason: IllegalMoveReason::Occupied,
            });
        }
        self.cells[index] = Cell::Occupied(symbol);
        Ok(())
    }

    /// Returns a copy of the board with `symbol` placed at `mv`.
    ///
    /// The move must target an empty in-range cell; search code only feeds
    /// it moves taken from [`Board::empty_moves`].
    pub(crate) fn with_move(mut self, mv: Move, symbol: Symbol) -> Self {
        if let Some(index) = mv.index() {
            self.cells[index] = Cell::Occupied(symbol);
        }
        self
    }

    /// Returns true when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Returns true when every cell is empty.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell; SIZE * SIZE] {
        &self.cells
    }

    /// Empty cells as moves, row-major.
    pub fn empty_moves(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .filter_map(|(i, _)| Move::from_index(i))
            .collect()
    }

    /// Number of cells holding `symbol`.
    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(symbol))
            .count()
    }

    /// Resets every cell to empty.
    pub fn clear(&mut self) {
        self.cells = [Cell::Empty; SIZE * SIZE];
    }

    /// Formats the board as a human-readable grid. Empty squares show
    /// their 1-9 key.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                let pos = row * SIZE + col;
                let symbol = match self.cells[pos] {
                    Cell::Empty => (pos + 1).to_string(),
                    Cell::Occupied(s) => s.to_string(),
                };
                result.push(' ');
                result.push_str(&symbol);
                result.push(' ');
                if col < SIZE - 1 {
                    result.push('|');
                }
            }
            if row < SIZE - 1 {
                result.push_str("\n---+---+---\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Error parsing a board literal.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardParseError {
    /// A row did not have exactly three squares.
    #[display("Row {} has {} squares, expected 3", _0, _1)]
    RowLength(usize, usize),
    /// Wrong number of rows.
    #[display("Board has {} rows, expected 3", _0)]
    RowCount(usize),
    /// Unknown square character.
    #[display("Unknown square '{}'", _0)]
    Square(char),
}

impl std::error::Error for BoardParseError {}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses `"XOX/OXO/..."`. Rows are separated by `/` or newlines;
    /// `.`, `-` and `_` mark empty squares.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .split(['/', '\n'])
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .collect();
        if rows.len() != SIZE {
            return Err(BoardParseError::RowCount(rows.len()));
        }

        let mut board = Board::new();
        for (row, text) in rows.iter().enumerate() {
            let squares: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
            if squares.len() != SIZE {
                return Err(BoardParseError::RowLength(row, squares.len()));
            }
            for (col, ch) in squares.into_iter().enumerate() {
                board.cells[row * SIZE + col] = match ch {
                    'X' | 'x' => Cell::Occupied(Symbol::First),
                    'O' | 'o' => Cell::Occupied(Symbol::Second),
                    '.' | '-' | '_' => Cell::Empty,
                    other => return Err(BoardParseError::Square(other)),
                };
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_rejects_occupied_cell() {
        let mut board = Board::new();
        board.set(1, 1, Symbol::First).unwrap();
        let err = board.set(1, 1, Symbol::Second).unwrap_err();
        assert_eq!(
            err,
            PlayError::IllegalMove {
                row: 1,
                col: 1,
                reason: IllegalMoveReason::Occupied
            }
        );
        assert_eq!(board.get(1, 1), Some(Cell::Occupied(Symbol::First)));
    }

    #[test]
    fn test_set_rejects_out_of_range() {
        let mut board = Board::new();
        assert!(board.set(3, 0, Symbol::First).is_err());
        assert!(board.set(0, 3, Symbol::First).is_err());
        assert!(board.is_blank());
        assert_eq!(board.get(3, 0), None);
    }

    #[test]
    fn test_empty_moves_are_row_major() {
        let board: Board = "X.O/.X./O..".parse().unwrap();
        let moves = board.empty_moves();
        assert_eq!(
            moves,
            vec![
                Move::new(0, 1),
                Move::new(1, 0),
                Move::new(1, 2),
                Move::new(2, 1),
                Move::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_clear_resets_every_cell() {
        let mut board: Board = "XOX/OXO/OXO".parse().unwrap();
        assert!(board.is_full());
        board.clear();
        assert!(board.is_blank());
        assert_eq!(board.empty_moves().len(), 9);
    }

    #[test]
    fn test_with_move_leaves_original_untouched() {
        let board = Board::new();
        let next = board.with_move(Move::new(0, 2), Symbol::Second);
        assert!(board.is_blank());
        assert_eq!(next.get(0, 2), Some(Cell::Occupied(Symbol::Second)));
    }

    #[test]
    fn test_parse_rejects_bad_literals() {
        assert_eq!(
            "XO/OXO/OXO".parse::<Board>(),
            Err(BoardParseError::RowLength(0, 2))
        );
        assert_eq!("XOX/OXO".parse::<Board>(), Err(BoardParseError::RowCount(2)));
        assert_eq!(
            "XOX/OZO/OXO".parse::<Board>(),
            Err(BoardParseError::Square('Z'))
        );
    }

    #[test]
    fn test_display_numbers_empty_squares() {
        let board: Board = "X../.O./...".parse().unwrap();
        let text = board.display();
        assert!(text.starts_with(" X | 2 | 3 "));
        assert!(text.contains(" 4 | O | 6 "));
    }

    #[test]
    fn test_symbol_parses_from_letters() {
        assert_eq!("x".parse::<Symbol>().unwrap(), Symbol::First);
        assert_eq!("O".parse::<Symbol>().unwrap(), Symbol::Second);
        assert_eq!(Symbol::First.to_string(), "X");
        assert_eq!(Symbol::Second.opponent(), Symbol::First);
    }
}
