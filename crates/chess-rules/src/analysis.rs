//! Check, checkmate and stalemate detection, and full move legality.
//!
//! Legality is decided without copying the board: a candidate move is
//! replayed as a [`Hypothetical`] occupancy change and the king's square is
//! probed for attacks under it.

use crate::attacks::{
    attackers, is_square_attacked, is_square_attacked_as_if, squares_between, Hypothetical,
    KING_OFFSETS,
};
use crate::board::Board;
use crate::executor::encode_move;
use crate::movelist::MoveList;
use crate::validator::{classify, en_passant_victim, MoveKind};
use chess_core::{Color, Move, MoveFlag, Piece, Square};

/// Returns true if `side`'s king is attacked.
pub fn is_in_check(board: &Board, side: Color) -> bool {
    is_square_attacked(board, side.opposite(), board.king_square(side))
}

/// Squares of the enemy pieces currently giving check to `side`.
pub fn checkers(board: &Board, side: Color) -> Vec<Square> {
    attackers(board, side.opposite(), board.king_square(side))
}

/// Returns true if the pseudo-legal move `from` → `to` would leave the mover's
/// own king attacked. An empty origin never exposes anything.
pub fn exposes_own_king(board: &Board, from: Square, to: Square) -> bool {
    let Some((piece, color)) = board.piece_at(from) else {
        return false;
    };
    let victim = match classify(board, from, to) {
        Some(MoveKind::EnPassant) => en_passant_victim(from, to),
        _ => None,
    };
    let king = if piece == Piece::King {
        to
    } else {
        board.king_square(color)
    };
    let hypo = Hypothetical::moving(from, to).also_vacating(victim);
    is_square_attacked_as_if(board, color.opposite(), king, &hypo)
}

/// Returns true if `from` → `to` is legal for the side to move.
pub fn is_fully_legal(board: &Board, from: Square, to: Square) -> bool {
    board.color_at(from) == Some(board.side_to_move())
        && classify(board, from, to).is_some()
        && !exposes_own_king(board, from, to)
}

/// Legal for whichever side owns the piece on `from`.
#[inline]
fn is_safe_move(board: &Board, from: Square, to: Square) -> bool {
    classify(board, from, to).is_some() && !exposes_own_king(board, from, to)
}

/// Returns true if `side` is in check and no move resolves it.
pub fn is_checkmate(board: &Board, side: Color) -> bool {
    checkers(board, side)
        .first()
        .is_some_and(|&checker| is_checkmate_by(board, side, checker))
}

/// Checkmate test against one known checking square.
///
/// False if the piece on `checker` does not actually give check.
pub fn is_checkmate_by(board: &Board, side: Color, checker: Square) -> bool {
    let checkers = checkers(board, side);
    if !checkers.contains(&checker) {
        return false;
    }
    if king_can_escape(board, side) {
        return false;
    }
    // Only a king move answers a double check.
    if checkers.len() > 1 {
        return true;
    }
    !can_capture(board, side, checker) && !can_interpose(board, side, checker)
}

/// Returns true if `side` is not in check but has no legal move.
pub fn is_stalemate(board: &Board, side: Color) -> bool {
    !is_in_check(board, side) && !has_legal_move(board, side)
}

/// Returns true if `side` has at least one legal move.
pub fn has_legal_move(board: &Board, side: Color) -> bool {
    board
        .pieces(side)
        .any(|(from, _)| Square::all().any(|to| is_safe_move(board, from, to)))
}

/// Every legal move for the side to move. Promotions appear once per choice.
pub fn legal_moves(board: &Board) -> MoveList {
    let mut moves = MoveList::new();
    for (from, _) in board.pieces(board.side_to_move()) {
        for to in Square::all() {
            let Some(kind) = classify(board, from, to) else {
                continue;
            };
            if exposes_own_king(board, from, to) {
                continue;
            }
            if kind == MoveKind::Promotion {
                for flag in [
                    MoveFlag::PromoteQueen,
                    MoveFlag::PromoteRook,
                    MoveFlag::PromoteBishop,
                    MoveFlag::PromoteKnight,
                ] {
                    moves.push(Move::new(from, to, flag));
                }
            } else if let Ok(m) = encode_move(from, to, kind, None) {
                moves.push(m);
            }
        }
    }
    moves
}

fn king_can_escape(board: &Board, side: Color) -> bool {
    let king = board.king_square(side);
    KING_OFFSETS
        .iter()
        .filter_map(|&(d_row, d_col)| king.offset(d_row, d_col))
        .any(|to| is_safe_move(board, king, to))
}

/// A non-king piece of `side` can legally take the checker, including by en passant.
fn can_capture(board: &Board, side: Color, checker: Square) -> bool {
    let en_passant = board
        .en_passant()
        .filter(|_| board.piece_at(checker) == Some((Piece::Pawn, side.opposite())));

    board
        .pieces(side)
        .filter(|&(_, piece)| piece != Piece::King)
        .any(|(from, piece)| {
            if is_safe_move(board, from, checker) {
                return true;
            }
            match en_passant {
                Some(target) if piece == Piece::Pawn => {
                    en_passant_victim(from, target) == Some(checker)
                        && classify(board, from, target) == Some(MoveKind::EnPassant)
                        && !exposes_own_king(board, from, target)
                }
                _ => false,
            }
        })
}

/// A non-king piece of `side` can legally step between the king and a sliding checker.
fn can_interpose(board: &Board, side: Color, checker: Square) -> bool {
    let slider = board
        .piece_at(checker)
        .is_some_and(|(piece, _)| piece.is_slider());
    if !slider {
        return false;
    }
    let gap = squares_between(board.king_square(side), checker);
    board
        .pieces(side)
        .filter(|&(_, piece)| piece != Piece::King)
        .any(|(from, _)| gap.iter().any(|&to| is_safe_move(board, from, to)))
}
