//! Match management: participants, turns and terminal states.
//!
//! The [`Match`] struct owns everything a single game needs:
//! - The board and its position history for repetition claims
//! - The two participants and which side each plays
//! - The terminal state and the single [`GameEnded`] event that produced it

use crate::analysis::{self, exposes_own_king, is_in_check};
use crate::board::{Board, BoardSnapshot};
use crate::config::{MatchConfig, SelfCheckPolicy};
use crate::error::{DrawRule, RulesError};
use crate::executor::{apply_move, encode_move};
use crate::history::PositionHistory;
use crate::movelist::MoveList;
use crate::validator::classify;
use crate::zobrist::position_hash;
use chess_core::{Color, Piece, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Repetitions needed to claim a draw.
pub const REPETITION_CLAIM_COUNT: u32 = 3;

/// Half-moves without a pawn move or capture needed to claim a draw.
pub const FIFTY_MOVE_CLAIM_PLIES: u32 = 100;

/// Opaque participant identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        PlayerId::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        PlayerId(id)
    }
}

/// Lifecycle of a match. The last three states are terminal and final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    NotStarted,
    InProgress,
    Draw,
    WhiteWins,
    BlackWins,
}

impl GameState {
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            GameState::Draw | GameState::WhiteWins | GameState::BlackWins
        )
    }

    /// The winning side, if the game was decided.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameState::WhiteWins => Some(Color::White),
            GameState::BlackWins => Some(Color::Black),
            _ => None,
        }
    }

    pub const fn won_by(color: Color) -> GameState {
        match color {
            Color::White => GameState::WhiteWins,
            Color::Black => GameState::BlackWins,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameState::NotStarted => "not started",
            GameState::InProgress => "in progress",
            GameState::Draw => "draw",
            GameState::WhiteWins => "won by White",
            GameState::BlackWins => "won by Black",
        };
        f.write_str(s)
    }
}

/// Why a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Checkmate,
    Stalemate,
    Resignation,
    ThreefoldRepetition,
    FiftyMoveRule,
    Timeout,
    SelfCheckForfeit,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EndReason::Checkmate => "checkmate",
            EndReason::Stalemate => "stalemate",
            EndReason::Resignation => "resignation",
            EndReason::ThreefoldRepetition => "threefold repetition",
            EndReason::FiftyMoveRule => "fifty-move rule",
            EndReason::Timeout => "timeout",
            EndReason::SelfCheckForfeit => "self-check forfeit",
        };
        f.write_str(s)
    }
}

/// Terminal event, produced exactly once per match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameEnded {
    pub state: GameState,
    pub winner: Option<PlayerId>,
    pub winning_side: Option<Color>,
    pub reason: EndReason,
    /// Accepted half-moves.
    pub move_count: u32,
}

/// A player's request to move a piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    #[serde(default)]
    pub promotion: Option<Piece>,
    pub player: PlayerId,
}

impl MoveRequest {
    pub fn new(player: impl Into<PlayerId>, from: Square, to: Square) -> Self {
        MoveRequest {
            from,
            to,
            promotion: None,
            player: player.into(),
        }
    }

    pub fn promoting_to(mut self, piece: Piece) -> Self {
        self.promotion = Some(piece);
        self
    }
}

/// Result of a processed move request.
///
/// `accepted` is false only when the self-check forfeit policy ended the
/// game instead of applying the move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub accepted: bool,
    pub moving_piece: Piece,
    pub captured_piece: Option<Piece>,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_castling: bool,
    pub is_en_passant: bool,
    pub promotion: Option<Piece>,
    pub state: GameState,
    pub ended: Option<GameEnded>,
}

/// Inputs to the draw rules for the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrawRuleStatus {
    pub half_move_clock: u32,
    pub max_repetition_count: u32,
    pub current_repetition_count: u32,
}

/// A single game between two participants.
#[derive(Debug, Clone)]
pub struct Match {
    board: Board,
    history: PositionHistory,
    state: GameState,
    players: [Option<PlayerId>; 2],
    policy: SelfCheckPolicy,
    move_count: u32,
    ended: Option<GameEnded>,
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

impl Match {
    /// Creates a match from the standard starting position, rejecting self-check moves.
    pub fn new() -> Self {
        Self::from_board(Board::startpos(), SelfCheckPolicy::default())
    }

    /// Creates a match from configuration.
    pub fn with_config(config: &MatchConfig) -> Result<Self, RulesError> {
        let board = match &config.start_fen {
            Some(fen) => Board::from_fen(fen)?,
            None => Board::startpos(),
        };
        Ok(Self::from_board(board, config.self_check_policy))
    }

    /// Creates a match from a FEN string with the default policy.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        Ok(Self::from_board(
            Board::from_fen(fen)?,
            SelfCheckPolicy::default(),
        ))
    }

    fn from_board(board: Board, policy: SelfCheckPolicy) -> Self {
        let mut history = PositionHistory::new();
        history.record(position_hash(&board));
        Match {
            board,
            history,
            state: GameState::NotStarted,
            players: [None, None],
            policy,
            move_count: 0,
            ended: None,
        }
    }

    /// Registers a participant. The first joiner plays White; the second
    /// starts the match.
    pub fn join(&mut self, player: impl Into<PlayerId>) -> Result<Color, RulesError> {
        let player = player.into();
        if self.state != GameState::NotStarted {
            return Err(RulesError::StateViolation(self.state));
        }
        if self.players.iter().flatten().any(|p| *p == player) {
            return Err(RulesError::AlreadyJoined(player));
        }

        let color = if self.players[Color::White.index()].is_none() {
            Color::White
        } else {
            Color::Black
        };
        tracing::debug!(%player, %color, "player joined");
        self.players[color.index()] = Some(player);

        if color == Color::Black {
            self.state = GameState::InProgress;
            tracing::info!(fen = %self.board.to_fen(), "match started");
            // A custom start may already be decided.
            let side = self.board.side_to_move();
            self.settle(side);
        }
        Ok(color)
    }

    /// Validates and applies a move.
    ///
    /// Checks run in order: match state, participant, turn, ownership,
    /// geometry, promotion choice, king safety. Nothing changes on error.
    pub fn submit_move(&mut self, request: MoveRequest) -> Result<MoveOutcome, RulesError> {
        let color = self.active_side(&request.player)?;
        let side_to_move = self.board.side_to_move();
        if color != side_to_move {
            return Err(RulesError::InvalidTurn {
                expected: side_to_move,
            });
        }

        let (from, to) = (request.from, request.to);
        let piece = match self.board.piece_at(from) {
            Some((piece, owner)) if owner == color => piece,
            _ => return Err(RulesError::InvalidOwnership(from)),
        };
        let kind = classify(&self.board, from, to)
            .ok_or(RulesError::IllegalGeometry { piece, from, to })?;
        let mov = encode_move(from, to, kind, request.promotion)?;

        if exposes_own_king(&self.board, from, to) {
            return match self.policy {
                SelfCheckPolicy::Reject => Err(RulesError::SelfCheck { from, to }),
                SelfCheckPolicy::Forfeit => {
                    tracing::warn!(
                        player = %request.player,
                        %from,
                        %to,
                        "self-check forfeits the game"
                    );
                    let ended = self.finish(
                        GameState::won_by(color.opposite()),
                        EndReason::SelfCheckForfeit,
                    );
                    Ok(MoveOutcome {
                        accepted: false,
                        moving_piece: piece,
                        captured_piece: None,
                        is_check: false,
                        is_checkmate: false,
                        is_castling: false,
                        is_en_passant: false,
                        promotion: None,
                        state: self.state,
                        ended: Some(ended),
                    })
                }
            };
        }

        let applied = apply_move(&mut self.board, &mut self.history, mov)?;
        self.move_count += 1;
        tracing::debug!(
            player = %request.player,
            mv = %mov,
            captured = ?applied.captured,
            halfmove_clock = self.board.halfmove_clock(),
            "move applied"
        );

        let opponent = color.opposite();
        let is_check = is_in_check(&self.board, opponent);
        let ended = self.settle(opponent);
        let is_checkmate = ended
            .as_ref()
            .is_some_and(|e| e.reason == EndReason::Checkmate);

        Ok(MoveOutcome {
            accepted: true,
            moving_piece: applied.piece,
            captured_piece: applied.captured,
            is_check,
            is_checkmate,
            is_castling: applied.is_castling(),
            is_en_passant: applied.is_en_passant(),
            promotion: applied.promotion,
            state: self.state,
            ended,
        })
    }

    /// The resigning player's opponent wins.
    pub fn resign(&mut self, player: &PlayerId) -> Result<GameEnded, RulesError> {
        let color = self.active_side(player)?;
        Ok(self.finish(GameState::won_by(color.opposite()), EndReason::Resignation))
    }

    /// Draw by threefold repetition of the current position.
    pub fn claim_draw_by_repetition(&mut self, player: &PlayerId) -> Result<GameEnded, RulesError> {
        self.active_side(player)?;
        let have = self.history.current_count();
        self.claim_draw(
            player,
            DrawRule::ThreefoldRepetition,
            have,
            REPETITION_CLAIM_COUNT,
        )
    }

    /// Draw by a hundred half-moves without a pawn move or capture.
    pub fn claim_draw_by_fifty_move_rule(
        &mut self,
        player: &PlayerId,
    ) -> Result<GameEnded, RulesError> {
        self.active_side(player)?;
        let have = self.board.halfmove_clock();
        self.claim_draw(player, DrawRule::FiftyMoveRule, have, FIFTY_MOVE_CLAIM_PLIES)
    }

    fn claim_draw(
        &mut self,
        player: &PlayerId,
        rule: DrawRule,
        have: u32,
        need: u32,
    ) -> Result<GameEnded, RulesError> {
        if have < need {
            tracing::warn!(%player, %rule, have, need, "draw claim rejected");
            return Err(RulesError::IllegalDrawClaim { rule, have, need });
        }
        let reason = match rule {
            DrawRule::ThreefoldRepetition => EndReason::ThreefoldRepetition,
            DrawRule::FiftyMoveRule => EndReason::FiftyMoveRule,
        };
        Ok(self.finish(GameState::Draw, reason))
    }

    /// The participant waiting for the opponent claims that the opponent's
    /// move deadline has passed. Deadlines are tracked by the host.
    pub fn claim_timeout(&mut self, player: &PlayerId) -> Result<GameEnded, RulesError> {
        let color = self.active_side(player)?;
        let on_move = self.board.side_to_move();
        if color == on_move {
            return Err(RulesError::TimeoutClaimByMover { on_move });
        }
        Ok(self.finish(GameState::won_by(color), EndReason::Timeout))
    }

    /// Ends the match against `player` for a reason decided by the host.
    pub fn forfeit(
        &mut self,
        player: &PlayerId,
        reason: EndReason,
    ) -> Result<GameEnded, RulesError> {
        let color = self.active_side(player)?;
        tracing::warn!(%player, %reason, "forfeit");
        Ok(self.finish(GameState::won_by(color.opposite()), reason))
    }

    /// The side `player` plays in a match that is in progress.
    fn active_side(&self, player: &PlayerId) -> Result<Color, RulesError> {
        if self.state != GameState::InProgress {
            return Err(RulesError::StateViolation(self.state));
        }
        self.side_of(player)
            .ok_or_else(|| RulesError::NotAParticipant(player.clone()))
    }

    /// Ends the match if `side`, now on move, is checkmated or stalemated.
    fn settle(&mut self, side: Color) -> Option<GameEnded> {
        if analysis::is_checkmate(&self.board, side) {
            Some(self.finish(GameState::won_by(side.opposite()), EndReason::Checkmate))
        } else if analysis::is_stalemate(&self.board, side) {
            Some(self.finish(GameState::Draw, EndReason::Stalemate))
        } else {
            None
        }
    }

    fn finish(&mut self, state: GameState, reason: EndReason) -> GameEnded {
        self.state = state;
        let winning_side = state.winner();
        let event = GameEnded {
            state,
            winner: winning_side.and_then(|color| self.player(color).cloned()),
            winning_side,
            reason,
            move_count: self.move_count,
        };
        tracing::info!(
            state = %state,
            %reason,
            move_count = self.move_count,
            "match ended"
        );
        self.ended = Some(event.clone());
        event
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Side to move.
    pub fn turn(&self) -> Color {
        self.board.side_to_move()
    }

    /// Participant on move, once both have joined.
    pub fn turn_holder(&self) -> Option<&PlayerId> {
        self.player(self.board.side_to_move())
    }

    pub fn player(&self, color: Color) -> Option<&PlayerId> {
        self.players[color.index()].as_ref()
    }

    pub fn side_of(&self, player: &PlayerId) -> Option<Color> {
        Color::BOTH
            .into_iter()
            .find(|&color| self.player(color) == Some(player))
    }

    pub fn policy(&self) -> SelfCheckPolicy {
        self.policy
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    /// Legal moves for the side to move; empty once the match is over.
    pub fn legal_moves(&self) -> MoveList {
        if self.state.is_terminal() {
            MoveList::new()
        } else {
            analysis::legal_moves(&self.board)
        }
    }

    /// Whether the side to move has any legal move.
    pub fn has_legal_move(&self) -> bool {
        analysis::has_legal_move(&self.board, self.board.side_to_move())
    }

    pub fn is_check(&self) -> bool {
        is_in_check(&self.board, self.board.side_to_move())
    }

    pub fn draw_rule_status(&self) -> DrawRuleStatus {
        DrawRuleStatus {
            half_move_clock: self.board.halfmove_clock(),
            max_repetition_count: self.history.max_count(),
            current_repetition_count: self.history.current_count(),
        }
    }

    /// Accepted half-moves so far.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// The terminal event, once the match has ended.
    pub fn ended(&self) -> Option<&GameEnded> {
        self.ended.as_ref()
    }

    pub fn to_fen(&self) -> String {
        self.board.to_fen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::FenError;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn started(fen: Option<&str>) -> Match {
        let mut game = match fen {
            Some(fen) => Match::from_fen(fen).unwrap(),
            None => Match::new(),
        };
        game.join("alice").unwrap();
        game.join("bob").unwrap();
        game
    }

    fn play(game: &mut Match, from: &str, to: &str) -> Result<MoveOutcome, RulesError> {
        let player = game.turn_holder().unwrap().clone();
        game.submit_move(MoveRequest::new(player, sq(from), sq(to)))
    }

    #[test]
    fn join_assigns_sides_and_starts() {
        let mut game = Match::new();
        assert_eq!(game.state(), GameState::NotStarted);
        assert_eq!(game.join("alice"), Ok(Color::White));
        assert_eq!(
            game.join("alice"),
            Err(RulesError::AlreadyJoined(PlayerId::new("alice")))
        );
        assert_eq!(game.state(), GameState::NotStarted);
        assert_eq!(game.join("bob"), Ok(Color::Black));
        assert_eq!(game.state(), GameState::InProgress);
        assert_eq!(game.turn_holder(), Some(&PlayerId::new("alice")));
        assert_eq!(
            game.join("carol"),
            Err(RulesError::StateViolation(GameState::InProgress))
        );
    }

    #[test]
    fn moves_before_start_are_rejected() {
        let mut game = Match::new();
        game.join("alice").unwrap();
        let err = game
            .submit_move(MoveRequest::new("alice", sq("e2"), sq("e4")))
            .unwrap_err();
        assert_eq!(err, RulesError::StateViolation(GameState::NotStarted));
    }

    #[test]
    fn rejection_order() {
        let mut game = started(None);
        let request = |player: &str, from: &str, to: &str| MoveRequest::new(player, sq(from), sq(to));

        assert_eq!(
            game.submit_move(request("mallory", "e2", "e4")),
            Err(RulesError::NotAParticipant(PlayerId::new("mallory")))
        );
        assert_eq!(
            game.submit_move(request("bob", "e7", "e5")),
            Err(RulesError::InvalidTurn {
                expected: Color::White
            })
        );
        assert_eq!(
            game.submit_move(request("alice", "e7", "e5")),
            Err(RulesError::InvalidOwnership(sq("e7")))
        );
        assert_eq!(
            game.submit_move(request("alice", "e4", "e5")),
            Err(RulesError::InvalidOwnership(sq("e4")))
        );
        assert_eq!(
            game.submit_move(request("alice", "e2", "e5")),
            Err(RulesError::IllegalGeometry {
                piece: Piece::Pawn,
                from: sq("e2"),
                to: sq("e5")
            })
        );
        assert_eq!(
            game.submit_move(request("alice", "e2", "e4").promoting_to(Piece::Queen)),
            Err(RulesError::IllegalPromotionChoice(
                crate::error::PromotionError::NotAPromotion
            ))
        );
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.to_fen(), Board::startpos().to_fen());
    }

    #[test]
    fn accepted_move_flips_turn() {
        let mut game = started(None);
        let outcome = play(&mut game, "e2", "e4").unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.moving_piece, Piece::Pawn);
        assert_eq!(outcome.state, GameState::InProgress);
        assert!(outcome.ended.is_none());
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.turn_holder(), Some(&PlayerId::new("bob")));
        assert_eq!(game.move_count(), 1);
        assert_eq!(game.board_snapshot().squares[3][4], 1);
    }

    #[test]
    fn self_check_rejected_by_default() {
        let mut game = started(Some("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1"));
        assert_eq!(
            play(&mut game, "e2", "d3"),
            Err(RulesError::SelfCheck {
                from: sq("e2"),
                to: sq("d3")
            })
        );
        assert_eq!(game.state(), GameState::InProgress);
        assert!(play(&mut game, "e1", "d1").is_ok());
    }

    #[test]
    fn self_check_forfeit_policy() {
        let config = MatchConfig {
            self_check_policy: SelfCheckPolicy::Forfeit,
            start_fen: Some("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1".to_string()),
        };
        let mut game = Match::with_config(&config).unwrap();
        game.join("alice").unwrap();
        game.join("bob").unwrap();

        let outcome = play(&mut game, "e2", "d3").unwrap();
        assert!(!outcome.accepted);
        assert_eq!(outcome.state, GameState::BlackWins);
        let ended = outcome.ended.unwrap();
        assert_eq!(ended.reason, EndReason::SelfCheckForfeit);
        assert_eq!(ended.winner, Some(PlayerId::new("bob")));
        assert_eq!(ended.move_count, 0);
        // The board is untouched.
        assert_eq!(game.board().piece_at(sq("e2")), Some((Piece::Bishop, Color::White)));
    }

    #[test]
    fn checkmate_ends_match() {
        let mut game = started(None);
        play(&mut game, "f2", "f3").unwrap();
        play(&mut game, "e7", "e5").unwrap();
        play(&mut game, "g2", "g4").unwrap();
        let outcome = play(&mut game, "d8", "h4").unwrap();
        assert!(outcome.is_check);
        assert!(outcome.is_checkmate);
        assert_eq!(outcome.state, GameState::BlackWins);
        let ended = outcome.ended.unwrap();
        assert_eq!(ended.reason, EndReason::Checkmate);
        assert_eq!(ended.winner, Some(PlayerId::new("bob")));
        assert_eq!(ended.move_count, 4);
        assert_eq!(game.ended(), Some(&ended));
        assert!(game.legal_moves().is_empty());

        assert_eq!(
            play(&mut game, "e1", "f2"),
            Err(RulesError::StateViolation(GameState::BlackWins))
        );
    }

    #[test]
    fn stalemate_is_a_draw() {
        let mut game = started(Some("7k/8/6K1/8/8/8/5Q2/8 w - - 0 1"));
        let outcome = play(&mut game, "f2", "f7").unwrap();
        assert!(!outcome.is_check);
        assert_eq!(outcome.state, GameState::Draw);
        assert_eq!(outcome.ended.unwrap().reason, EndReason::Stalemate);
    }

    #[test]
    fn resignation() {
        let mut game = started(None);
        let ended = game.resign(&PlayerId::new("alice")).unwrap();
        assert_eq!(ended.state, GameState::BlackWins);
        assert_eq!(ended.reason, EndReason::Resignation);
        assert_eq!(
            game.resign(&PlayerId::new("bob")),
            Err(RulesError::StateViolation(GameState::BlackWins))
        );
    }

    #[test]
    fn timeout_only_claimable_by_waiting_side() {
        let mut game = started(None);
        assert_eq!(
            game.claim_timeout(&PlayerId::new("alice")),
            Err(RulesError::TimeoutClaimByMover {
                on_move: Color::White
            })
        );
        let ended = game.claim_timeout(&PlayerId::new("bob")).unwrap();
        assert_eq!(ended.state, GameState::BlackWins);
        assert_eq!(ended.reason, EndReason::Timeout);
    }

    #[test]
    fn forfeit_hook() {
        let mut game = started(None);
        let ended = game
            .forfeit(&PlayerId::new("bob"), EndReason::SelfCheckForfeit)
            .unwrap();
        assert_eq!(ended.state, GameState::WhiteWins);
        assert_eq!(ended.winner, Some(PlayerId::new("alice")));
    }

    #[test]
    fn draw_claims_need_their_thresholds() {
        let mut game = started(None);
        assert_eq!(
            game.claim_draw_by_fifty_move_rule(&PlayerId::new("alice")),
            Err(RulesError::IllegalDrawClaim {
                rule: DrawRule::FiftyMoveRule,
                have: 0,
                need: 100
            })
        );
        assert_eq!(
            game.claim_draw_by_repetition(&PlayerId::new("bob")),
            Err(RulesError::IllegalDrawClaim {
                rule: DrawRule::ThreefoldRepetition,
                have: 1,
                need: 3
            })
        );
        assert_eq!(game.state(), GameState::InProgress);
    }

    #[test]
    fn draw_rule_status_tracks_repetitions() {
        let mut game = started(None);
        for (from, to) in [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")] {
            play(&mut game, from, to).unwrap();
        }
        assert_eq!(
            game.draw_rule_status(),
            DrawRuleStatus {
                half_move_clock: 4,
                max_repetition_count: 2,
                current_repetition_count: 2,
            }
        );
    }

    #[test]
    fn invalid_start_position() {
        let config = MatchConfig {
            start_fen: Some("8/8/8/8/8/8/8/8 w - - 0 1".to_string()),
            ..MatchConfig::default()
        };
        assert!(matches!(
            Match::with_config(&config),
            Err(RulesError::InvalidPosition(_))
        ));
    }

    #[test]
    fn start_with_waiting_king_attacked_is_rejected() {
        // The rook on e1 could take the black king outright.
        assert!(matches!(
            Match::from_fen("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1"),
            Err(RulesError::InvalidPosition(FenError::OpponentInCheck(
                Color::Black
            )))
        ));
        let config = MatchConfig {
            start_fen: Some("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1".to_string()),
            ..MatchConfig::default()
        };
        assert!(matches!(
            Match::with_config(&config),
            Err(RulesError::InvalidPosition(FenError::OpponentInCheck(_)))
        ));

        // The same placement with the checked side on move is playable.
        let mut game = started(Some("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1"));
        assert!(matches!(
            play(&mut game, "e8", "e7"),
            Err(RulesError::SelfCheck { .. })
        ));
        assert!(play(&mut game, "e8", "d7").unwrap().accepted);
    }

    #[test]
    fn outcome_serializes() {
        let mut game = started(None);
        let outcome = play(&mut game, "e2", "e4").unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["accepted"], true);
        assert_eq!(json["moving_piece"], "pawn");
        assert_eq!(json["state"], "in_progress");
        assert!(json["ended"].is_null());
    }
}
