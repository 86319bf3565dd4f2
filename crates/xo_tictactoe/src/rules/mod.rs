//! Win and draw detection.

mod draw;
mod win;

pub use draw::{is_draw, is_full};
pub use win::{has_won, winner, winning_line, LINES};
