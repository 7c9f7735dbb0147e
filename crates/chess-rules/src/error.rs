//! Errors returned by match commands.
//!
//! Every error is reported before any state changes, so a rejected request
//! leaves the match exactly as it was and may be resubmitted in corrected form.

use crate::game::{GameState, PlayerId};
use chess_core::{Color, FenError, Piece, Square};
use thiserror::Error;

/// Why a promotion choice was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PromotionError {
    #[error("cannot promote to {0}")]
    InvalidPiece(Piece),
    #[error("move does not reach the last rank with a pawn")]
    NotAPromotion,
}

/// Draw rule named by a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawRule {
    ThreefoldRepetition,
    FiftyMoveRule,
}

impl std::fmt::Display for DrawRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawRule::ThreefoldRepetition => write!(f, "threefold repetition"),
            DrawRule::FiftyMoveRule => write!(f, "fifty-move rule"),
        }
    }
}

/// Errors for match commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("not your turn: {expected} to move")]
    InvalidTurn { expected: Color },

    #[error("no piece of the side to move on {0}")]
    InvalidOwnership(Square),

    #[error("{piece} cannot move from {from} to {to}")]
    IllegalGeometry { piece: Piece, from: Square, to: Square },

    #[error("moving from {from} to {to} leaves the king in check")]
    SelfCheck { from: Square, to: Square },

    #[error("illegal promotion choice: {0}")]
    IllegalPromotionChoice(#[from] PromotionError),

    #[error("cannot claim a draw by {rule}: {have} of {need}")]
    IllegalDrawClaim { rule: DrawRule, have: u32, need: u32 },

    #[error("{on_move} is on move and cannot claim a timeout")]
    TimeoutClaimByMover { on_move: Color },

    #[error("action not allowed while the game is {0}")]
    StateViolation(GameState),

    #[error("{0} is not playing in this match")]
    NotAParticipant(PlayerId),

    #[error("{0} has already joined")]
    AlreadyJoined(PlayerId),

    #[error("invalid starting position: {0}")]
    InvalidPosition(#[from] FenError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = RulesError::InvalidTurn {
            expected: Color::Black,
        };
        assert_eq!(err.to_string(), "not your turn: Black to move");

        let err = RulesError::IllegalDrawClaim {
            rule: DrawRule::FiftyMoveRule,
            have: 99,
            need: 100,
        };
        assert_eq!(err.to_string(), "cannot claim a draw by fifty-move rule: 99 of 100");

        let err: RulesError = PromotionError::InvalidPiece(Piece::King).into();
        assert_eq!(err.to_string(), "illegal promotion choice: cannot promote to King");

        let err = RulesError::StateViolation(GameState::Draw);
        assert_eq!(err.to_string(), "action not allowed while the game is draw");
    }
}
