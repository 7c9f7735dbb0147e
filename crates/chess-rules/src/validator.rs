//! Pseudo-legal move validation.
//!
//! A move is pseudo-legal when it fits the moving piece's movement pattern and
//! the occupancy of the board. Whether it leaves the mover's own king attacked
//! is a separate question answered by [`crate::analysis`].

use crate::attacks::{
    is_square_attacked, is_square_attacked_as_if, squares_between, Hypothetical, KNIGHT_OFFSETS,
};
use crate::board::{Board, CastleSide, KING_HOME_COL};
use chess_core::{Color, Piece, Square};
use serde::Serialize;

/// How a pseudo-legal move affects the board beyond relocating the piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// Plain move or capture.
    Normal,
    /// Pawn advance of two squares from its home row.
    DoublePush,
    /// Pawn capture onto the live en-passant target.
    EnPassant,
    /// King move of two files that also relocates a rook.
    Castle(CastleSide),
    /// Pawn move (advance or capture) onto the last row.
    Promotion,
}

/// Classifies the move `from` → `to` for whatever piece stands on `from`.
///
/// Returns `None` when the move is not pseudo-legal: empty origin, a null
/// move, a capture of the mover's own piece, or a pattern the piece cannot
/// make.
pub fn classify(board: &Board, from: Square, to: Square) -> Option<MoveKind> {
    let (piece, color) = board.piece_at(from)?;
    if from == to || board.color_at(to) == Some(color) {
        return None;
    }

    let d_row = to.row() as i8 - from.row() as i8;
    let d_col = to.col() as i8 - from.col() as i8;

    match piece {
        Piece::Pawn => classify_pawn(board, color, from, to, d_row, d_col),
        Piece::Knight => {
            KNIGHT_OFFSETS
                .contains(&(d_row, d_col))
                .then_some(MoveKind::Normal)
        }
        Piece::Bishop => {
            (d_row.abs() == d_col.abs() && is_path_clear(board, from, to))
                .then_some(MoveKind::Normal)
        }
        Piece::Rook => {
            ((d_row == 0 || d_col == 0) && is_path_clear(board, from, to))
                .then_some(MoveKind::Normal)
        }
        Piece::Queen => {
            let line = d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs();
            (line && is_path_clear(board, from, to)).then_some(MoveKind::Normal)
        }
        Piece::King => {
            if d_row.abs() <= 1 && d_col.abs() <= 1 {
                Some(MoveKind::Normal)
            } else if d_row == 0 && d_col.abs() == 2 {
                let side = if d_col > 0 {
                    CastleSide::Kingside
                } else {
                    CastleSide::Queenside
                };
                can_castle(board, color, from, side).then_some(MoveKind::Castle(side))
            } else {
                None
            }
        }
    }
}

/// Returns true if `from` → `to` is pseudo-legal.
#[inline]
pub fn is_pseudo_legal(board: &Board, from: Square, to: Square) -> bool {
    classify(board, from, to).is_some()
}

/// Square of the pawn removed by an en-passant capture `from` → `to`:
/// the origin's row on the destination's column.
#[inline]
pub fn en_passant_victim(from: Square, to: Square) -> Option<Square> {
    Square::from_coords(from.row(), to.col())
}

fn classify_pawn(
    board: &Board,
    color: Color,
    from: Square,
    to: Square,
    d_row: i8,
    d_col: i8,
) -> Option<MoveKind> {
    let forward = color.pawn_direction();
    let promotes = to.row() == color.promotion_row();
    let plain = if promotes {
        MoveKind::Promotion
    } else {
        MoveKind::Normal
    };

    match (d_row, d_col.abs()) {
        (r, 0) if r == forward => board.is_empty(to).then_some(plain),
        (r, 0) if r == 2 * forward => {
            let passed = from.offset(forward, 0)?;
            (from.row() == color.pawn_row() && board.is_empty(passed) && board.is_empty(to))
                .then_some(MoveKind::DoublePush)
        }
        (r, 1) if r == forward => {
            if board.color_at(to) == Some(color.opposite()) {
                Some(plain)
            } else if board.is_empty(to) && board.en_passant() == Some(to) {
                let victim = en_passant_victim(from, to)?;
                (board.piece_at(victim) == Some((Piece::Pawn, color.opposite())))
                    .then_some(MoveKind::EnPassant)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// True if every square strictly between two aligned squares is empty.
fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    squares_between(from, to)
        .into_iter()
        .all(|sq| board.is_empty(sq))
}

/// Castling: king and rook unmoved and in place, the gap between them empty,
/// and none of the king's start, transit and destination squares attacked.
fn can_castle(board: &Board, color: Color, from: Square, side: CastleSide) -> bool {
    let row = color.back_row();
    if from.row() != row || from.col() != KING_HOME_COL {
        return false;
    }
    if !board.castling().can_castle(color, side) {
        return false;
    }

    let rook_home = side.rook_home(color);
    if board.piece_at(rook_home) != Some((Piece::Rook, color)) {
        return false;
    }
    if !is_path_clear(board, from, rook_home) {
        return false;
    }

    let enemy = color.opposite();
    if is_square_attacked(board, enemy, from) {
        return false;
    }
    let hypo = Hypothetical::vacating(from);
    [side.rook_target_col(), side.king_target_col()]
        .into_iter()
        .filter_map(|col| Square::from_coords(row, col))
        .all(|sq| !is_square_attacked_as_if(board, enemy, sq, &hypo))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn kind(board: &Board, from: &str, to: &str) -> Option<MoveKind> {
        classify(board, sq(from), sq(to))
    }

    #[test]
    fn pawn_pushes() {
        let board = Board::startpos();
        assert_eq!(kind(&board, "e2", "e3"), Some(MoveKind::Normal));
        assert_eq!(kind(&board, "e2", "e4"), Some(MoveKind::DoublePush));
        assert_eq!(kind(&board, "e2", "e5"), None);
        assert_eq!(kind(&board, "e2", "d3"), None);
        assert_eq!(kind(&board, "e7", "e5"), Some(MoveKind::DoublePush));
        // Backwards.
        let board = Board::from_fen("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(kind(&board, "e4", "e3"), None);
    }

    #[test]
    fn double_push_only_from_home_row_and_through_empty_squares() {
        let board = Board::from_fen("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1").unwrap();
        assert_eq!(kind(&board, "e3", "e5"), None);

        let blocked = Board::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(kind(&blocked, "e2", "e4"), None);
        assert_eq!(kind(&blocked, "e2", "e3"), None);

        let far_blocked = Board::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(kind(&far_blocked, "e2", "e4"), None);
        assert_eq!(kind(&far_blocked, "e2", "e3"), Some(MoveKind::Normal));
    }

    #[test]
    fn pawn_captures() {
        let board = Board::from_fen("4k3/8/8/3p1P2/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(kind(&board, "e4", "d5"), Some(MoveKind::Normal));
        // Own piece on f5.
        assert_eq!(kind(&board, "e4", "f5"), None);
        // A pawn cannot capture straight ahead.
        let board = Board::from_fen("4k3/8/8/4p3/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(kind(&board, "e4", "e5"), None);
    }

    #[test]
    fn en_passant_requires_live_target() {
        let live = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(kind(&live, "e5", "d6"), Some(MoveKind::EnPassant));
        let stale = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(kind(&stale, "e5", "d6"), None);
        assert_eq!(en_passant_victim(sq("e5"), sq("d6")), Some(sq("d5")));
    }

    #[test]
    fn promotion_on_last_row() {
        let board = Board::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(kind(&board, "a7", "a8"), Some(MoveKind::Promotion));
        assert_eq!(kind(&board, "a7", "b8"), Some(MoveKind::Promotion));
    }

    #[test]
    fn knight_jumps() {
        let board = Board::startpos();
        assert_eq!(kind(&board, "g1", "f3"), Some(MoveKind::Normal));
        assert_eq!(kind(&board, "g1", "h3"), Some(MoveKind::Normal));
        assert_eq!(kind(&board, "g1", "e2"), None);
        assert_eq!(kind(&board, "g1", "g3"), None);
    }

    #[test]
    fn sliders_blocked_by_pieces() {
        let board = Board::startpos();
        assert_eq!(kind(&board, "f1", "c4"), None);
        assert_eq!(kind(&board, "a1", "a3"), None);
        assert_eq!(kind(&board, "d1", "d3"), None);

        let open = Board::from_fen("4k3/8/8/8/8/8/8/R2QKB2 w - - 0 1").unwrap();
        assert_eq!(kind(&open, "f1", "a6"), Some(MoveKind::Normal));
        assert_eq!(kind(&open, "a1", "a8"), Some(MoveKind::Normal));
        assert_eq!(kind(&open, "a1", "e1"), None);
        assert_eq!(kind(&open, "d1", "h5"), Some(MoveKind::Normal));
        assert_eq!(kind(&open, "d1", "e3"), None);
        assert_eq!(kind(&open, "a1", "b2"), None);
        assert_eq!(kind(&open, "f1", "f2"), None);
    }

    #[test]
    fn king_steps_and_null_moves() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(kind(&board, "e1", "d2"), Some(MoveKind::Normal));
        assert_eq!(kind(&board, "e1", "e3"), None);
        assert_eq!(kind(&board, "e1", "e1"), None);
        assert_eq!(kind(&board, "e4", "e5"), None);
    }

    #[test]
    fn castling_both_sides() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert_eq!(
            kind(&board, "e1", "g1"),
            Some(MoveKind::Castle(CastleSide::Kingside))
        );
        assert_eq!(
            kind(&board, "e1", "c1"),
            Some(MoveKind::Castle(CastleSide::Queenside))
        );
        assert_eq!(
            kind(&board, "e8", "c8"),
            Some(MoveKind::Castle(CastleSide::Queenside))
        );
    }

    #[test]
    fn castling_needs_rights_and_empty_gap() {
        let no_rights = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1").unwrap();
        assert_eq!(kind(&no_rights, "e1", "g1"), None);

        // b1 is occupied: queenside blocked even though the king never crosses it.
        let knight = Board::from_fen("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1").unwrap();
        assert_eq!(kind(&knight, "e1", "c1"), None);
        assert!(kind(&knight, "e1", "g1").is_some());
    }

    #[test]
    fn castling_blocked_by_attacks() {
        // King in check.
        let checked = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert!(kind(&checked, "e1", "g1").is_some());
        let checked = Board::from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert_eq!(kind(&checked, "e1", "g1"), None);
        assert_eq!(kind(&checked, "e1", "c1"), None);

        // Transit square f1 attacked.
        let transit = Board::from_fen("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert_eq!(kind(&transit, "e1", "g1"), None);
        assert!(kind(&transit, "e1", "c1").is_some());

        // Destination c1 attacked.
        let dest = Board::from_fen("2r3k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert_eq!(kind(&dest, "e1", "c1"), None);

        // Only b1 attacked: the king never touches it.
        let b_file = Board::from_fen("1r4k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert!(kind(&b_file, "e1", "c1").is_some());
    }
}
