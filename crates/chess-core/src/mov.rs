//! Move representation.

use crate::{Piece, Square};
use serde::Serialize;
use std::fmt;

/// What a move does beyond relocating a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveFlag {
    /// Plain move or capture.
    Normal,
    /// Pawn advance of two squares from its home row.
    DoublePush,
    /// Castling towards the h-file rook.
    CastleKingside,
    /// Castling towards the a-file rook.
    CastleQueenside,
    /// Pawn capture onto the en-passant target.
    EnPassant,
    PromoteKnight,
    PromoteBishop,
    PromoteRook,
    PromoteQueen,
}

impl MoveFlag {
    /// Returns the flag promoting to `piece`, if `piece` is a legal promotion choice.
    #[inline]
    pub const fn promote_to(piece: Piece) -> Option<MoveFlag> {
        match piece {
            Piece::Knight => Some(MoveFlag::PromoteKnight),
            Piece::Bishop => Some(MoveFlag::PromoteBishop),
            Piece::Rook => Some(MoveFlag::PromoteRook),
            Piece::Queen => Some(MoveFlag::PromoteQueen),
            Piece::Pawn | Piece::King => None,
        }
    }

    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        match self {
            MoveFlag::PromoteKnight => Some(Piece::Knight),
            MoveFlag::PromoteBishop => Some(Piece::Bishop),
            MoveFlag::PromoteRook => Some(Piece::Rook),
            MoveFlag::PromoteQueen => Some(Piece::Queen),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion_piece().is_some()
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

/// A move from one square to another, tagged with its special effect.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    from: Square,
    to: Square,
    flag: MoveFlag,
}

impl Move {
    /// Placeholder used to fill fixed-size move buffers.
    pub const NULL: Move = Move::normal(Square::A1, Square::A1);

    #[inline]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Self {
        Move { from, to, flag }
    }

    /// Creates a move with no special effect.
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveFlag::Normal)
    }

    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    #[inline]
    pub const fn flag(self) -> MoveFlag {
        self.flag
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        let promo = match self.flag {
            MoveFlag::PromoteKnight => "n",
            MoveFlag::PromoteBishop => "b",
            MoveFlag::PromoteRook => "r",
            MoveFlag::PromoteQueen => "q",
            _ => "",
        };
        format!("{}{}{}", self.from, self.to, promo)
    }

    /// Parses coordinate notation into its squares and optional promotion piece.
    ///
    /// Special effects (castling, en passant, double push) depend on the
    /// position, so they are left for the rules engine to classify.
    pub fn parse_uci(s: &str) -> Option<(Square, Square, Option<Piece>)> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s.chars().nth(4) {
            None => None,
            Some('n' | 'N') => Some(Piece::Knight),
            Some('b' | 'B') => Some(Piece::Bishop),
            Some('r' | 'R') => Some(Piece::Rook),
            Some('q' | 'Q') => Some(Piece::Queen),
            // Kept so the rules engine can reject the choice with a proper error.
            Some('k' | 'K') => Some(Piece::King),
            Some('p' | 'P') => Some(Piece::Pawn),
            Some(_) => return None,
        };
        Some((from, to, promotion))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn move_uci() {
        assert_eq!(Move::normal(sq("e2"), sq("e4")).to_uci(), "e2e4");
        let promo = Move::new(sq("e7"), sq("e8"), MoveFlag::PromoteKnight);
        assert_eq!(promo.to_uci(), "e7e8n");
        assert_eq!(format!("{:?}", promo), "Move(e7e8n)");
    }

    #[test]
    fn parse_uci() {
        assert_eq!(Move::parse_uci("e2e4"), Some((sq("e2"), sq("e4"), None)));
        assert_eq!(
            Move::parse_uci("a7a8N"),
            Some((sq("a7"), sq("a8"), Some(Piece::Knight)))
        );
        assert_eq!(
            Move::parse_uci("a7a8k"),
            Some((sq("a7"), sq("a8"), Some(Piece::King)))
        );
        assert!(Move::parse_uci("e7e8x").is_none());
        assert!(Move::parse_uci("e2").is_none());
        assert!(Move::parse_uci("e2e9").is_none());
        assert!(Move::parse_uci("e2e4qq").is_none());
    }

    #[test]
    fn promote_to_rejects_king_and_pawn() {
        assert_eq!(MoveFlag::promote_to(Piece::Queen), Some(MoveFlag::PromoteQueen));
        assert_eq!(MoveFlag::promote_to(Piece::King), None);
        assert_eq!(MoveFlag::promote_to(Piece::Pawn), None);
        assert_eq!(MoveFlag::PromoteRook.promotion_piece(), Some(Piece::Rook));
        assert!(!MoveFlag::EnPassant.is_promotion());
    }

    #[test]
    fn castling_flags() {
        assert!(MoveFlag::CastleKingside.is_castling());
        assert!(MoveFlag::CastleQueenside.is_castling());
        assert!(!MoveFlag::DoublePush.is_castling());
    }
}
