//! Core types for the lane engine

mod board;
mod card;

pub use board::Board;
pub use card::{Card, CardId, Status, StoredCard};
