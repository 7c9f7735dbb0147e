//! Core types for chess.
//!
//! This crate provides the fundamental value types shared by the rules engine
//! and its hosts:
//! - [`Color`] for the two sides (White is side 1, Black is side 2)
//! - [`Piece`] and its signed board code (`+` White, `-` Black, `0` empty)
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for move representation
//! - FEN parsing into a placement grid

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::{Move, MoveFlag};
pub use piece::{Piece, EMPTY};
pub use square::{File, Rank, Square};
