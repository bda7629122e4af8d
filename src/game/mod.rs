//! Core Connect Four game logic: the board value type with its pure
//! operations, and the two player identities.

mod board;
mod player;

pub(crate) use board::DIRECTIONS;
pub use board::{Board, Cell, MoveError, COLS, ROWS};
pub use player::Player;
