use crate::Position;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions {columns}x{rows} are outside the supported 5..=26 range")]
    InvalidDimension { columns: u32, rows: u32 },
    #[error("Bomb count {bombs} is invalid for a {columns}x{rows} board")]
    InvalidBombCount { columns: u32, rows: u32, bombs: u32 },
    #[error("Position {0} is out of bounds")]
    OutOfBounds(Position),
}
