//! FEN (Forsyth-Edwards Notation) parsing and serialization.
//!
//! Parsing produces a [`Fen`] whose placement is already decoded into the
//! signed-code grid used by the rules engine, so custom starting positions
//! can be loaded without a second pass over the text.

use crate::{Color, Piece, Square, EMPTY};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),

    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: Color, count: usize },

    #[error("pawn on back rank at {0}")]
    PawnOnBackRank(Square),

    #[error("{0} is in check but not on move")]
    OpponentInCheck(Color),
}

/// A parsed FEN record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Signed piece codes indexed `[row][col]`, row 0 = rank 1.
    pub placement: [[i8; 8]; 8],
    pub side_to_move: Color,
    /// Kingside castling availability, indexed by [`Color::index`].
    pub castle_kingside: [bool; 2],
    /// Queenside castling availability, indexed by [`Color::index`].
    pub castle_queenside: [bool; 2],
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses and validates a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let placement = Self::parse_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let mut castle_kingside = [false; 2];
        let mut castle_queenside = [false; 2];
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => castle_kingside[Color::White.index()] = true,
                    'Q' => castle_queenside[Color::White.index()] = true,
                    'k' => castle_kingside[Color::Black.index()] = true,
                    'q' => castle_queenside[Color::Black.index()] = true,
                    _ => {
                        return Err(FenError::InvalidCastlingRights(format!(
                            "invalid character '{}'",
                            c
                        )))
                    }
                }
            }
        }

        let en_passant = match parts[3] {
            "-" => None,
            s => {
                let sq = Square::from_algebraic(s)
                    .ok_or_else(|| FenError::InvalidEnPassantSquare(s.to_string()))?;
                if !Self::en_passant_consistent(&placement, side_to_move, sq) {
                    return Err(FenError::InvalidEnPassantSquare(s.to_string()));
                }
                Some(sq)
            }
        };

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;
        let fullmove_number = parts[5]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(Fen {
            placement,
            side_to_move,
            castle_kingside,
            castle_queenside,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// An en-passant target must sit behind an enemy pawn that just made a
    /// double advance: on the row the side to move captures onto, with that
    /// pawn directly beyond it and both squares it passed over empty.
    fn en_passant_consistent(
        placement: &[[i8; 8]; 8],
        side_to_move: Color,
        target: Square,
    ) -> bool {
        let (target_row, pawn_row, origin_row) = match side_to_move {
            Color::White => (5, 4, 6),
            Color::Black => (2, 3, 1),
        };
        let row = target.row() as usize;
        let col = target.col() as usize;
        row == target_row
            && placement[pawn_row][col] == Piece::Pawn.code(side_to_move.opposite())
            && placement[row][col] == EMPTY
            && placement[origin_row][col] == EMPTY
    }

    fn parse_placement(placement: &str) -> Result<[[i8; 8]; 8], FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut grid = [[EMPTY; 8]; 8];
        let mut kings = [0usize; 2];
        for (i, rank) in ranks.iter().enumerate() {
            // FEN lists rank 8 first.
            let row = 7 - i;
            let mut col = 0usize;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip as usize;
                } else if let Some((piece, color)) = Piece::from_fen_char(c) {
                    let square = if col < 8 {
                        Square::from_coords(row as u8, col as u8)
                    } else {
                        None
                    };
                    if let Some(sq) = square {
                        grid[row][col] = piece.code(color);
                        if piece == Piece::King {
                            kings[color.index()] += 1;
                        }
                        if piece == Piece::Pawn && (row == 0 || row == 7) {
                            return Err(FenError::PawnOnBackRank(sq));
                        }
                    }
                    col += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        row + 1
                    )));
                }
            }
            if col != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    row + 1,
                    col
                )));
            }
        }

        for color in Color::BOTH {
            if kings[color.index()] != 1 {
                return Err(FenError::KingCount {
                    color,
                    count: kings[color.index()],
                });
            }
        }

        Ok(grid)
    }
}

impl Default for Fen {
    fn default() -> Self {
        Fen {
            placement: Self::parse_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")
                .unwrap_or([[EMPTY; 8]; 8]),
            side_to_move: Color::White,
            castle_kingside: [true; 2],
            castle_queenside: [true; 2],
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..8).rev() {
            let mut empty_run = 0;
            for col in 0..8 {
                match Piece::from_code(self.placement[row][col]) {
                    Some((piece, color)) => {
                        if empty_run > 0 {
                            write!(f, "{}", empty_run)?;
                            empty_run = 0;
                        }
                        write!(f, "{}", piece.to_fen_char(color))?;
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                write!(f, "{}", empty_run)?;
            }
            if row > 0 {
                write!(f, "/")?;
            }
        }

        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        write!(f, " {} ", side)?;

        let mut castling = String::new();
        let (w, b) = (Color::White.index(), Color::Black.index());
        if self.castle_kingside[w] {
            castling.push('K');
        }
        if self.castle_queenside[w] {
            castling.push('Q');
        }
        if self.castle_kingside[b] {
            castling.push('k');
        }
        if self.castle_queenside[b] {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }
        write!(f, "{} ", castling)?;

        match self.en_passant {
            Some(sq) => write!(f, "{}", sq)?,
            None => write!(f, "-")?,
        }
        write!(f, " {} {}", self.halfmove_clock, self.fullmove_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let fen = Fen::parse(Fen::STARTPOS).unwrap();
        assert_eq!(fen.side_to_move, Color::White);
        assert_eq!(fen.castle_kingside, [true, true]);
        assert_eq!(fen.en_passant, None);
        assert_eq!(fen.placement[0][4], Piece::King.code(Color::White));
        assert_eq!(fen.placement[7][3], Piece::Queen.code(Color::Black));
        assert_eq!(fen.placement[1][0], Piece::Pawn.code(Color::White));
        assert_eq!(fen, Fen::default());
    }

    #[test]
    fn display_matches_input() {
        for text in [
            Fen::STARTPOS,
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 12 40",
            "8/8/8/8/8/8/8/4K2k b - - 0 1",
        ] {
            assert_eq!(Fen::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn invalid_part_count_and_color() {
        assert!(matches!(
            Fen::parse("invalid"),
            Err(FenError::InvalidPartCount(1))
        ));
        assert!(matches!(
            Fen::parse("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
    }

    #[test]
    fn invalid_piece_placement() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            Fen::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn king_count_is_checked() {
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::KingCount {
                color: Color::Black,
                count: 0
            })
        );
        assert_eq!(
            Fen::parse("k7/8/8/8/8/8/8/K3K3 w - - 0 1"),
            Err(FenError::KingCount {
                color: Color::White,
                count: 2
            })
        );
    }

    #[test]
    fn pawn_on_back_rank_rejected() {
        assert_eq!(
            Fen::parse("P3k3/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::PawnOnBackRank(Square::A8))
        );
        assert_eq!(
            Fen::parse("4k3/8/8/8/8/8/8/4K2p b - - 0 1"),
            Err(FenError::PawnOnBackRank(Square::H1))
        );
    }

    #[test]
    fn invalid_flags_and_clocks() {
        assert!(matches!(
            Fen::parse("4k3/8/8/8/8/8/8/4K3 w XYZ - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
        assert!(matches!(
            Fen::parse("4k3/8/8/8/8/8/8/4K3 w - e4 0 1"),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
        assert!(matches!(
            Fen::parse("4k3/8/8/8/8/8/8/4K3 w - x3 0 1"),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
        assert!(matches!(
            Fen::parse("4k3/8/8/8/8/8/8/4K3 w - - abc 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            Fen::parse("4k3/8/8/8/8/8/8/4K3 w - - 0 xyz"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
    }

    #[test]
    fn en_passant_target_must_follow_a_double_advance() {
        // Valid for White: black pawn on d5, d6 and d7 empty.
        let fen = Fen::parse("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(fen.en_passant, Square::from_algebraic("d6"));

        for text in [
            // Rank-3 target with White on move: the e2 pawn never advanced.
            "4k3/8/8/8/8/8/3Pp3/6K1 w - e3 0 1",
            // No enemy pawn beyond the target.
            "4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1",
            // Own pawn beyond the target.
            "4k3/8/8/3PP3/8/8/8/4K3 w - d6 0 1",
            // The pawn's origin square is occupied.
            "4k3/3n4/8/3pP3/8/8/8/4K3 w - d6 0 1",
            // The target square is occupied.
            "4k3/8/3n4/3pP3/8/8/8/4K3 w - d6 0 1",
            // Black to move needs a rank-3 target behind a white pawn.
            "4k3/8/8/8/4Pp2/8/8/4K3 b - e6 0 1",
        ] {
            assert!(
                matches!(Fen::parse(text), Err(FenError::InvalidEnPassantSquare(_))),
                "{}",
                text
            );
        }

        let fen = Fen::parse("4k3/8/8/8/4Pp2/8/8/4K3 b - e3 0 1").unwrap();
        assert_eq!(fen.en_passant, Square::from_algebraic("e3"));
    }

    #[test]
    fn error_display() {
        let err = FenError::KingCount {
            color: Color::White,
            count: 2,
        };
        assert_eq!(err.to_string(), "White must have exactly one king, found 2");
        assert!(FenError::InvalidPartCount(3).to_string().contains('3'));
    }
}
