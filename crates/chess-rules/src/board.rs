//! The 8x8 board and its auxiliary flags.

use crate::attacks::is_square_attacked;
use chess_core::{Color, Fen, FenError, Piece, Square, EMPTY};
use serde::Serialize;

/// One of the two castling directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CastleSide {
    /// Short castling, towards the h-file rook.
    Kingside,
    /// Long castling, towards the a-file rook.
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// Column the king lands on.
    #[inline]
    pub const fn king_target_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    /// Column the rook lands on (the square the king passes over).
    #[inline]
    pub const fn rook_target_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }

    /// Home square of this side's castling rook for `color`.
    pub const fn rook_home(self, color: Color) -> Square {
        match (color, self) {
            (Color::White, CastleSide::Kingside) => Square::H1,
            (Color::White, CastleSide::Queenside) => Square::A1,
            (Color::Black, CastleSide::Kingside) => Square::H8,
            (Color::Black, CastleSide::Queenside) => Square::A8,
        }
    }
}

/// Column of both kings' home squares.
pub const KING_HOME_COL: u8 = 4;

/// Castling bookkeeping as six one-way "has moved" flags.
///
/// Flags only ever go from `false` to `true`: a rook that leaves its corner and
/// comes back does not restore the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CastlingRights {
    king_moved: [bool; 2],
    kingside_rook_moved: [bool; 2],
    queenside_rook_moved: [bool; 2],
}

impl CastlingRights {
    /// Nothing has moved yet.
    pub const ALL: CastlingRights = CastlingRights {
        king_moved: [false; 2],
        kingside_rook_moved: [false; 2],
        queenside_rook_moved: [false; 2],
    };

    /// Every king has moved; no castling is possible.
    pub const NONE: CastlingRights = CastlingRights {
        king_moved: [true; 2],
        kingside_rook_moved: [true; 2],
        queenside_rook_moved: [true; 2],
    };

    #[inline]
    pub const fn king_moved(&self, color: Color) -> bool {
        self.king_moved[color.index()]
    }

    #[inline]
    pub const fn rook_moved(&self, color: Color, side: CastleSide) -> bool {
        match side {
            CastleSide::Kingside => self.kingside_rook_moved[color.index()],
            CastleSide::Queenside => self.queenside_rook_moved[color.index()],
        }
    }

    /// True while neither the king nor the `side` rook of `color` has moved.
    #[inline]
    pub const fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        !self.king_moved(color) && !self.rook_moved(color, side)
    }

    pub fn mark_king_moved(&mut self, color: Color) {
        self.king_moved[color.index()] = true;
    }

    pub fn mark_rook_moved(&mut self, color: Color, side: CastleSide) {
        match side {
            CastleSide::Kingside => self.kingside_rook_moved[color.index()] = true,
            CastleSide::Queenside => self.queenside_rook_moved[color.index()] = true,
        }
    }
}

/// Owned, serializable copy of the board for read-only consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    /// Signed piece codes indexed `[row][col]`, row 0 = rank 1.
    pub squares: [[i8; 8]; 8],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// Board state: piece grid plus the flags the rules depend on.
///
/// Only the move executor mutates a board once it is built; the king squares
/// are cached here so check detection never scans for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) squares: [[i8; 8]; 8],
    pub(crate) kings: [Square; 2],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Board {
    /// The standard starting position.
    pub fn startpos() -> Self {
        Self::build(&Fen::default())
    }

    /// Builds a board from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Self::from_fen_record(&Fen::parse(fen)?)
    }

    /// Builds a board from an already parsed FEN record.
    ///
    /// Castling availability that the placement contradicts (king or rook off
    /// its home square) is recorded as already moved. A position where the
    /// side not on move is in check is rejected.
    pub fn from_fen_record(fen: &Fen) -> Result<Self, FenError> {
        let board = Self::build(fen);
        let waiting = board.side_to_move.opposite();
        if is_square_attacked(&board, board.side_to_move, board.king_square(waiting)) {
            return Err(FenError::OpponentInCheck(waiting));
        }
        Ok(board)
    }

    fn build(fen: &Fen) -> Self {
        let mut kings = [Square::E1, Square::E8];
        for sq in Square::all() {
            if let Some((Piece::King, color)) =
                Piece::from_code(fen.placement[sq.row() as usize][sq.col() as usize])
            {
                kings[color.index()] = sq;
            }
        }

        let mut board = Board {
            squares: fen.placement,
            kings,
            side_to_move: fen.side_to_move,
            castling: CastlingRights::ALL,
            en_passant: fen.en_passant,
            halfmove_clock: fen.halfmove_clock,
            fullmove_number: fen.fullmove_number,
        };

        for color in Color::BOTH {
            let king_home = Square::from_coords(color.back_row(), KING_HOME_COL);
            let king_home = king_home == Some(board.kings[color.index()]);
            let allowed = [
                fen.castle_kingside[color.index()],
                fen.castle_queenside[color.index()],
            ];
            if !king_home || allowed == [false, false] {
                board.castling.mark_king_moved(color);
            }
            for (side, allowed) in CastleSide::BOTH.into_iter().zip(allowed) {
                let rook_home = board.code_at(side.rook_home(color)) == Piece::Rook.code(color);
                if !allowed || !rook_home {
                    board.castling.mark_rook_moved(color, side);
                }
            }
        }

        board
    }

    /// Serializes the board as FEN.
    pub fn to_fen(&self) -> String {
        let mut castle_kingside = [false; 2];
        let mut castle_queenside = [false; 2];
        for color in Color::BOTH {
            castle_kingside[color.index()] = self.castling.can_castle(color, CastleSide::Kingside);
            castle_queenside[color.index()] =
                self.castling.can_castle(color, CastleSide::Queenside);
        }
        Fen {
            placement: self.squares,
            side_to_move: self.side_to_move,
            castle_kingside,
            castle_queenside,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_string()
    }

    /// Signed code of the piece on `sq` (0 when empty).
    #[inline]
    pub fn code_at(&self, sq: Square) -> i8 {
        self.squares[sq.row() as usize][sq.col() as usize]
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        Piece::from_code(self.code_at(sq))
    }

    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|(_, color)| color)
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.code_at(sq) == EMPTY
    }

    /// Cached square of `color`'s king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// Square a pawn may capture onto en passant during this half-move only.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Iterates over `color`'s pieces and their squares.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some((piece, c)) if c == color => Some((sq, piece)),
            _ => None,
        })
    }

    /// Number of occupied squares.
    pub fn piece_count(&self) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|&&code| code != EMPTY)
            .count()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            squares: self.squares,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    #[inline]
    pub(crate) fn put(&mut self, sq: Square, code: i8) {
        self.squares[sq.row() as usize][sq.col() as usize] = code;
    }

    #[inline]
    pub(crate) fn remove(&mut self, sq: Square) -> i8 {
        let code = self.code_at(sq);
        self.put(sq, EMPTY);
        code
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}
