//! Zobrist hashing of positions for repetition counting.
//!
//! A position's key XORs random values for:
//! - each piece on each square (12 pieces × 64 squares)
//! - Black to move
//! - each castling right still available (4 values)
//! - the en-passant file, when a target is live (8 values)

use crate::board::{Board, CastleSide};
use chess_core::{Color, Piece, Square};

/// Zobrist hash keys, generated at compile time from a fixed seed.
pub struct ZobristKeys {
    /// Keys for pieces: [piece][color][square]
    pieces: [[[u64; 64]; 2]; 6],
    black_to_move: u64,
    /// Keys for castling rights: [color][side]
    castling: [[u64; 2]; 2],
    en_passant: [u64; 8],
}

impl ZobristKeys {
    const fn new() -> Self {
        // xorshift64
        const fn next_random(state: u64) -> u64 {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        }

        let mut state = 0x9E3779B97F4A7C15u64;
        let mut pieces = [[[0u64; 64]; 2]; 6];
        let mut castling = [[0u64; 2]; 2];
        let mut en_passant = [0u64; 8];

        let mut piece = 0;
        while piece < 6 {
            let mut color = 0;
            while color < 2 {
                let mut square = 0;
                while square < 64 {
                    state = next_random(state);
                    pieces[piece][color][square] = state;
                    square += 1;
                }
                color += 1;
            }
            piece += 1;
        }

        state = next_random(state);
        let black_to_move = state;

        let mut color = 0;
        while color < 2 {
            let mut side = 0;
            while side < 2 {
                state = next_random(state);
                castling[color][side] = state;
                side += 1;
            }
            color += 1;
        }

        let mut file = 0;
        while file < 8 {
            state = next_random(state);
            en_passant[file] = state;
            file += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }

    #[inline]
    const fn piece_key(&self, piece: Piece, color: Color, square: Square) -> u64 {
        self.pieces[piece.index()][color.index()][square.index() as usize]
    }

    #[inline]
    const fn castling_key(&self, color: Color, side: CastleSide) -> u64 {
        let side = match side {
            CastleSide::Kingside => 0,
            CastleSide::Queenside => 1,
        };
        self.castling[color.index()][side]
    }
}

static ZOBRIST: ZobristKeys = ZobristKeys::new();

/// Hashes the board, side to move, castling availability and en-passant file.
///
/// The en-passant file is included whenever a target is set, even if no pawn
/// can capture onto it. A position reached by a double advance therefore never
/// matches the same placement reached by single steps until the target clears
/// on the following half-move.
pub fn position_hash(board: &Board) -> u64 {
    let mut hash = 0u64;

    for sq in Square::all() {
        if let Some((piece, color)) = board.piece_at(sq) {
            hash ^= ZOBRIST.piece_key(piece, color, sq);
        }
    }

    if board.side_to_move() == Color::Black {
        hash ^= ZOBRIST.black_to_move;
    }

    let rights = board.castling();
    for color in Color::BOTH {
        for side in CastleSide::BOTH {
            if rights.can_castle(color, side) {
                hash ^= ZOBRIST.castling_key(color, side);
            }
        }
    }

    if let Some(ep) = board.en_passant() {
        hash ^= ZOBRIST.en_passant[ep.col() as usize];
    }

    hash
}
