//! Applying validated moves to a board.

use crate::board::{Board, CastleSide};
use crate::error::{PromotionError, RulesError};
use crate::history::PositionHistory;
use crate::validator::{en_passant_victim, MoveKind};
use crate::zobrist::position_hash;
use chess_core::{Color, Move, MoveFlag, Piece, Square};
use serde::Serialize;

/// What happened when a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedMove {
    pub mov: Move,
    pub piece: Piece,
    pub color: Color,
    pub captured: Option<Piece>,
    /// Where the captured piece stood (differs from the destination for en passant).
    pub captured_on: Option<Square>,
    pub promotion: Option<Piece>,
}

impl AppliedMove {
    #[inline]
    pub fn is_castling(&self) -> bool {
        self.mov.flag().is_castling()
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.mov.flag() == MoveFlag::EnPassant
    }
}

/// Builds the move to execute from a classified move and the requested promotion.
///
/// A promotion without a choice becomes a queen. A choice of king or pawn, or
/// any choice on a move that does not promote, is refused.
pub fn encode_move(
    from: Square,
    to: Square,
    kind: MoveKind,
    promotion: Option<Piece>,
) -> Result<Move, PromotionError> {
    let flag = match (kind, promotion) {
        (MoveKind::Promotion, None) => MoveFlag::PromoteQueen,
        (MoveKind::Promotion, Some(piece)) => {
            MoveFlag::promote_to(piece).ok_or(PromotionError::InvalidPiece(piece))?
        }
        (_, Some(_)) => return Err(PromotionError::NotAPromotion),
        (MoveKind::Normal, None) => MoveFlag::Normal,
        (MoveKind::DoublePush, None) => MoveFlag::DoublePush,
        (MoveKind::EnPassant, None) => MoveFlag::EnPassant,
        (MoveKind::Castle(CastleSide::Kingside), None) => MoveFlag::CastleKingside,
        (MoveKind::Castle(CastleSide::Queenside), None) => MoveFlag::CastleQueenside,
    };
    Ok(Move::new(from, to, flag))
}

/// Applies `mov` to the board and records the resulting position in `history`.
///
/// The move must already be pseudo-legal and must not expose the mover's king.
pub fn apply_move(
    board: &mut Board,
    history: &mut PositionHistory,
    mov: Move,
) -> Result<AppliedMove, RulesError> {
    let applied = apply_to_board(board, mov)?;
    history.record(position_hash(board));
    Ok(applied)
}

/// Applies `mov` to the board without touching any position history.
pub fn apply_to_board(board: &mut Board, mov: Move) -> Result<AppliedMove, RulesError> {
    let (from, to, flag) = (mov.from(), mov.to(), mov.flag());
    let (piece, color) = board
        .piece_at(from)
        .ok_or(RulesError::InvalidOwnership(from))?;
    let enemy = color.opposite();

    let (captured, captured_on) = if flag == MoveFlag::EnPassant {
        let victim = en_passant_victim(from, to).ok_or(RulesError::IllegalGeometry {
            piece,
            from,
            to,
        })?;
        board.remove(victim);
        (Some(Piece::Pawn), Some(victim))
    } else {
        match board.piece_at(to) {
            Some((taken, _)) => (Some(taken), Some(to)),
            None => (None, None),
        }
    };

    board.remove(from);
    let promotion = flag.promotion_piece();
    board.put(to, promotion.unwrap_or(piece).code(color));

    let castled = match flag {
        MoveFlag::CastleKingside => Some(CastleSide::Kingside),
        MoveFlag::CastleQueenside => Some(CastleSide::Queenside),
        _ => None,
    };
    if let Some(side) = castled {
        let row = color.back_row();
        let rook_from = side.rook_home(color);
        if let Some(rook_to) = Square::from_coords(row, side.rook_target_col()) {
            let rook = board.remove(rook_from);
            board.put(rook_to, rook);
        }
    }

    if piece == Piece::King {
        board.kings[color.index()] = to;
        board.castling.mark_king_moved(color);
    }
    for side in CastleSide::BOTH {
        if piece == Piece::Rook && from == side.rook_home(color) {
            board.castling.mark_rook_moved(color, side);
        }
        if captured == Some(Piece::Rook) && captured_on == Some(side.rook_home(enemy)) {
            board.castling.mark_rook_moved(enemy, side);
        }
    }

    board.en_passant = if flag == MoveFlag::DoublePush {
        from.offset(color.pawn_direction(), 0)
    } else {
        None
    };

    if piece == Piece::Pawn || captured.is_some() {
        board.halfmove_clock = 0;
    } else {
        board.halfmove_clock += 1;
    }
    if color == Color::Black {
        board.fullmove_number += 1;
    }
    board.side_to_move = enemy;

    Ok(AppliedMove {
        mov,
        piece,
        color,
        captured,
        captured_on,
        promotion,
    })
}
