//! Perft: leaf-node counts used to cross-check validation and execution
//! against published reference values.

use crate::analysis::legal_moves;
use crate::board::Board;
use crate::executor::apply_to_board;

/// Counts the leaf nodes of the legal move tree to `depth`.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(board);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        let mut next = board.clone();
        if apply_to_board(&mut next, *m).is_ok() {
            nodes += perft(&next, depth - 1);
        }
    }
    nodes
}

/// Per-move node counts at `depth`, sorted by coordinate notation.
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(String, u64)> {
    let moves = legal_moves(board);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        let mut next = board.clone();
        if apply_to_board(&mut next, *m).is_err() {
            continue;
        }
        let nodes = if depth > 1 { perft(&next, depth - 1) } else { 1 };
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
