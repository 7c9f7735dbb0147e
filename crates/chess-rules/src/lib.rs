//! Chess rules engine and match state machine.
//!
//! This crate provides:
//! - [`Board`] - 8x8 grid of signed piece codes plus castling, en-passant and clock state
//! - Pseudo-legal move classification ([`classify`]) and attack queries
//! - Check, checkmate and stalemate detection, and full legality
//! - [`Match`] - turns, participants, draw claims and terminal states
//!
//! # Architecture
//!
//! The board is a mailbox: each square holds a piece code, positive for White,
//! negative for Black and zero when empty. Legality never copies the board; a
//! candidate move is replayed as an occupancy override and the king's square
//! is probed for attacks under it.
//!
//! # Example
//!
//! ```
//! use chess_core::Square;
//! use chess_rules::{GameState, Match, MoveRequest};
//!
//! let mut game = Match::new();
//! game.join("alice").unwrap();
//! game.join("bob").unwrap();
//!
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! let outcome = game.submit_move(MoveRequest::new("alice", e2, e4)).unwrap();
//! assert!(outcome.accepted);
//! assert_eq!(game.state(), GameState::InProgress);
//! ```

pub mod analysis;
mod attacks;
mod board;
mod config;
mod error;
pub mod executor;
mod game;
mod history;
mod movelist;
pub mod perft;
mod validator;
mod zobrist;

pub use analysis::{
    checkers, exposes_own_king, has_legal_move, is_checkmate, is_checkmate_by, is_fully_legal,
    is_in_check, is_stalemate, legal_moves,
};
pub use attacks::{
    attackers, is_square_attacked, is_square_attacked_as_if, squares_between, Hypothetical,
};
pub use board::{Board, BoardSnapshot, CastleSide, CastlingRights};
pub use config::{ConfigError, MatchConfig, SelfCheckPolicy};
pub use error::{DrawRule, PromotionError, RulesError};
pub use executor::{apply_move, apply_to_board, encode_move, AppliedMove};
pub use game::{
    DrawRuleStatus, EndReason, GameEnded, GameState, Match, MoveOutcome, MoveRequest, PlayerId,
    FIFTY_MOVE_CLAIM_PLIES, REPETITION_CLAIM_COUNT,
};
pub use history::PositionHistory;
pub use movelist::MoveList;
pub use perft::{perft, perft_divide};
pub use validator::{classify, en_passant_victim, is_pseudo_legal, MoveKind};
pub use zobrist::position_hash;
