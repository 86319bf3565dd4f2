//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Cell, Move, Symbol};

/// The eight winning lines as row-major indices: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

fn line_owner(board: &Board, [a, b, c]: [usize; 3]) -> Option<Symbol> {
    let cells = board.cells();
    match cells[a] {
        Cell::Occupied(s) if cells[b] == cells[a] && cells[c] == cells[a] => Some(s),
        _ => None,
    }
}

/// Returns the owner of the first complete line, scanning rows, then
/// columns, then diagonals.
pub fn winner(board: &Board) -> Option<Symbol> {
    LINES.iter().find_map(|line| line_owner(board, *line))
}

/// Returns true if `symbol` owns any complete line.
///
/// Unlike [`winner`], this answers for one specific symbol, which is what
/// hypothetical placements during search need.
pub fn has_won(board: &Board, symbol: Symbol) -> bool {
    LINES
        .iter()
        .any(|line| line_owner(board, *line) == Some(symbol))
}

/// Returns the first complete line as moves.
pub fn winning_line(board: &Board) -> Option<[Move; 3]> {
    LINES
        .iter()
        .find(|line| line_owner(board, **line).is_some())
        .and_then(|[a, b, c]| {
            Some([
                Move::from_index(*a)?,
                Move::from_index(*b)?,
                Move::from_index(*c)?,
            ])
        })
}
