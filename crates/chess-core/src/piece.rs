//! Piece types and their signed board codes.
//!
//! A board cell holds a small signed integer: the magnitude `1..=6` selects
//! the piece type, the sign selects the side (positive for White, negative for
//! Black) and `0` marks an empty square.

use crate::Color;
use serde::{Deserialize, Serialize};

/// Code of an empty board cell.
pub const EMPTY: i8 = 0;

/// The six piece types, numbered by their code magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Piece {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl Piece {
    /// All piece types in code order.
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Pieces a pawn may promote to.
    pub const PROMOTIONS: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

    /// Zero-based index (0-5), for table lookups.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Signed board code of this piece for the given side.
    #[inline]
    pub const fn code(self, color: Color) -> i8 {
        self as i8 * color.sign()
    }

    /// Decodes a board cell. Returns `None` for empty or out-of-range codes.
    pub const fn from_code(code: i8) -> Option<(Piece, Color)> {
        let color = if code > 0 { Color::White } else { Color::Black };
        let piece = match code.unsigned_abs() {
            1 => Piece::Pawn,
            2 => Piece::Knight,
            3 => Piece::Bishop,
            4 => Piece::Rook,
            5 => Piece::Queen,
            6 => Piece::King,
            _ => return None,
        };
        Some((piece, color))
    }

    /// Returns the FEN character for this piece with the given side.
    pub const fn to_fen_char(self, color: Color) -> char {
        let c = match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN character into a piece and side.
    pub const fn from_fen_char(c: char) -> Option<(Piece, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        Some((piece, color))
    }

    /// Returns true for pieces that move along rays (bishop, rook, queen).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, Piece::Bishop | Piece::Rook | Piece::Queen)
    }

    /// Returns true if a pawn may promote to this piece.
    #[inline]
    pub const fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen
        )
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Piece::Pawn => "Pawn",
            Piece::Knight => "Knight",
            Piece::Bishop => "Bishop",
            Piece::Rook => "Rook",
            Piece::Queen => "Queen",
            Piece::King => "King",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn codes() {
        assert_eq!(Piece::Pawn.code(Color::White), 1);
        assert_eq!(Piece::King.code(Color::White), 6);
        assert_eq!(Piece::Queen.code(Color::Black), -5);
        assert_eq!(Piece::from_code(-6), Some((Piece::King, Color::Black)));
        assert_eq!(Piece::from_code(EMPTY), None);
        assert_eq!(Piece::from_code(7), None);
        assert_eq!(Piece::from_code(-7), None);
    }

    #[test]
    fn piece_fen_chars() {
        assert_eq!(Piece::Pawn.to_fen_char(Color::White), 'P');
        assert_eq!(Piece::Knight.to_fen_char(Color::Black), 'n');
        assert_eq!(Piece::from_fen_char('K'), Some((Piece::King, Color::White)));
        assert_eq!(Piece::from_fen_char('x'), None);
    }

    #[test]
    fn promotion_choices() {
        assert!(Piece::Queen.is_promotion_choice());
        assert!(Piece::Knight.is_promotion_choice());
        assert!(!Piece::King.is_promotion_choice());
        assert!(!Piece::Pawn.is_promotion_choice());
    }

    #[test]
    fn index_is_zero_based() {
        assert_eq!(Piece::Pawn.index(), 0);
        assert_eq!(Piece::King.index(), 5);
    }

    proptest! {
        #[test]
        fn code_decodes_back(piece_idx in 0usize..6, black in any::<bool>()) {
            let piece = Piece::ALL[piece_idx];
            let color = if black { Color::Black } else { Color::White };
            prop_assert_eq!(Piece::from_code(piece.code(color)), Some((piece, color)));
        }
    }
}
