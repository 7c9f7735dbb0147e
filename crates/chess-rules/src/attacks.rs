//! Attack queries: which squares a side attacks.
//!
//! Queries can run against the board as it stands or "as if" a move had been
//! made, via [`Hypothetical`]. The hypothetical form lets king-safety checks
//! see through the mover's vacated origin without copying the board.

use crate::board::Board;
use chess_core::{Color, Piece, Square};

/// Knight move offsets as (row, col) deltas.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// King step offsets, also the eight ray directions.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Occupancy overrides applied on top of a board.
///
/// Vacated squares read as empty. The filled square reads as occupied by the
/// mover; whatever piece the board has there is treated as captured and never
/// attacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hypothetical {
    vacated: [Option<Square>; 2],
    filled: Option<Square>,
}

impl Hypothetical {
    /// No overrides: the board as it stands.
    pub const NONE: Hypothetical = Hypothetical {
        vacated: [None, None],
        filled: None,
    };

    /// A piece leaves `from` and lands on `to`.
    pub fn moving(from: Square, to: Square) -> Self {
        Hypothetical {
            vacated: [Some(from), None],
            filled: Some(to),
        }
    }

    /// Only `sq` is emptied.
    pub fn vacating(sq: Square) -> Self {
        Hypothetical {
            vacated: [Some(sq), None],
            filled: None,
        }
    }

    /// Additionally empties `sq` (the pawn removed by an en-passant capture).
    pub fn also_vacating(mut self, sq: Option<Square>) -> Self {
        self.vacated[1] = sq;
        self
    }

    #[inline]
    fn is_vacated(&self, sq: Square) -> bool {
        self.vacated.contains(&Some(sq))
    }

    #[inline]
    fn is_occupied(&self, board: &Board, sq: Square) -> bool {
        if self.filled == Some(sq) {
            true
        } else if self.is_vacated(sq) {
            false
        } else {
            !board.is_empty(sq)
        }
    }

    /// The piece that could attack from `sq` under these overrides.
    #[inline]
    fn attacker_at(&self, board: &Board, sq: Square) -> Option<(Piece, Color)> {
        if self.filled == Some(sq) || self.is_vacated(sq) {
            None
        } else {
            board.piece_at(sq)
        }
    }
}

/// Returns true if any piece of `by` attacks `target`.
pub fn is_square_attacked(board: &Board, by: Color, target: Square) -> bool {
    is_square_attacked_as_if(board, by, target, &Hypothetical::NONE)
}

/// Like [`is_square_attacked`], with occupancy overridden by `hypo`.
pub fn is_square_attacked_as_if(
    board: &Board,
    by: Color,
    target: Square,
    hypo: &Hypothetical,
) -> bool {
    scan_attackers(board, by, target, hypo, |_| true)
}

/// Lists every square holding a piece of `by` that attacks `target`.
pub fn attackers(board: &Board, by: Color, target: Square) -> Vec<Square> {
    let mut found = Vec::new();
    scan_attackers(board, by, target, &Hypothetical::NONE, |sq| {
        found.push(sq);
        false
    });
    found
}

/// Walks outward from `target` looking for pieces of `by` whose pattern hits it.
///
/// Each attacker is passed to `visit`; the walk stops as soon as `visit`
/// returns true, and the result says whether it stopped early.
fn scan_attackers(
    board: &Board,
    by: Color,
    target: Square,
    hypo: &Hypothetical,
    mut visit: impl FnMut(Square) -> bool,
) -> bool {
    let is = |sq: Square, wanted: &[Piece]| {
        matches!(hypo.attacker_at(board, sq), Some((piece, color)) if color == by && wanted.contains(&piece))
    };

    macro_rules! hit {
        ($sq:expr) => {{
            if visit($sq) {
                return true;
            }
        }};
    }

    // A pawn of `by` attacks diagonally forward, so it sits one row behind.
    let behind = -by.pawn_direction();
    for d_col in [-1, 1] {
        if let Some(sq) = target.offset(behind, d_col) {
            if is(sq, &[Piece::Pawn]) {
                hit!(sq);
            }
        }
    }

    for (d_row, d_col) in KNIGHT_OFFSETS {
        if let Some(sq) = target.offset(d_row, d_col) {
            if is(sq, &[Piece::Knight]) {
                hit!(sq);
            }
        }
    }

    for (d_row, d_col) in KING_OFFSETS {
        if let Some(sq) = target.offset(d_row, d_col) {
            if is(sq, &[Piece::King]) {
                hit!(sq);
            }
        }
    }

    for (rays, sliders) in [
        (ORTHOGONAL, [Piece::Rook, Piece::Queen]),
        (DIAGONAL, [Piece::Bishop, Piece::Queen]),
    ] {
        for (d_row, d_col) in rays {
            let mut cursor = target.offset(d_row, d_col);
            while let Some(sq) = cursor {
                if hypo.is_occupied(board, sq) {
                    if is(sq, &sliders) {
                        hit!(sq);
                    }
                    break;
                }
                cursor = sq.offset(d_row, d_col);
            }
        }
    }

    false
}

/// Squares strictly between two squares on a shared rank, file or diagonal.
///
/// Empty when the squares are adjacent or not aligned.
pub fn squares_between(a: Square, b: Square) -> Vec<Square> {
    let d_row = b.row() as i8 - a.row() as i8;
    let d_col = b.col() as i8 - a.col() as i8;
    let aligned = d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs();
    if !aligned || (d_row == 0 && d_col == 0) {
        return Vec::new();
    }

    let step = (d_row.signum(), d_col.signum());
    let mut between = Vec::new();
    let mut cursor = a.offset(step.0, step.1);
    while let Some(sq) = cursor {
        if sq == b {
            break;
        }
        between.push(sq);
        cursor = sq.offset(step.0, step.1);
    }
    between
}
