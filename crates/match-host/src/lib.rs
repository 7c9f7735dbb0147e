//! Host-side access to a running match.
//!
//! [`SharedMatch`] serializes every command on one match behind a write lock,
//! so two moves submitted at once resolve to one accepted move and one
//! rejection. Terminal events are handed to an [`EndedSink`] only after the
//! lock has been released.

use chess_core::Color;
use chess_rules::{
    BoardSnapshot, DrawRuleStatus, EndReason, GameEnded, GameState, Match, MoveOutcome,
    MoveRequest, PlayerId, RulesError,
};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, RwLock};

/// Receives the terminal event of a match, e.g. settlement or rating services.
pub trait EndedSink: Send + Sync {
    fn deliver(&self, event: GameEnded);
}

impl EndedSink for mpsc::UnboundedSender<GameEnded> {
    fn deliver(&self, event: GameEnded) {
        if self.send(event).is_err() {
            tracing::warn!("ended event dropped: receiver closed");
        }
    }
}

impl EndedSink for broadcast::Sender<GameEnded> {
    fn deliver(&self, event: GameEnded) {
        // No subscribers is not an error for a broadcast.
        let _ = self.send(event);
    }
}

/// A match shared between tasks.
#[derive(Clone)]
pub struct SharedMatch {
    inner: Arc<RwLock<Match>>,
    sink: Option<Arc<dyn EndedSink>>,
}

impl SharedMatch {
    pub fn new(game: Match) -> Self {
        SharedMatch {
            inner: Arc::new(RwLock::new(game)),
            sink: None,
        }
    }

    pub fn with_sink(mut self, sink: impl EndedSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Runs a command under the write lock, then forwards any terminal event
    /// it produced.
    async fn command<T>(
        &self,
        f: impl FnOnce(&mut Match) -> Result<T, RulesError>,
    ) -> Result<T, RulesError> {
        let (result, ended) = {
            let mut game = self.inner.write().await;
            let was_terminal = game.state().is_terminal();
            let result = f(&mut game);
            let ended = if was_terminal {
                None
            } else {
                game.ended().cloned()
            };
            (result, ended)
        };

        if let (Some(event), Some(sink)) = (ended, &self.sink) {
            sink.deliver(event);
        }
        result
    }

    pub async fn join(&self, player: PlayerId) -> Result<Color, RulesError> {
        self.command(|game| game.join(player)).await
    }

    pub async fn submit_move(&self, request: MoveRequest) -> Result<MoveOutcome, RulesError> {
        self.command(|game| game.submit_move(request)).await
    }

    pub async fn resign(&self, player: &PlayerId) -> Result<GameEnded, RulesError> {
        self.command(|game| game.resign(player)).await
    }

    pub async fn claim_draw_by_repetition(
        &self,
        player: &PlayerId,
    ) -> Result<GameEnded, RulesError> {
        self.command(|game| game.claim_draw_by_repetition(player))
            .await
    }

    pub async fn claim_draw_by_fifty_move_rule(
        &self,
        player: &PlayerId,
    ) -> Result<GameEnded, RulesError> {
        self.command(|game| game.claim_draw_by_fifty_move_rule(player))
            .await
    }

    pub async fn claim_timeout(&self, player: &PlayerId) -> Result<GameEnded, RulesError> {
        self.command(|game| game.claim_timeout(player)).await
    }

    pub async fn forfeit(
        &self,
        player: &PlayerId,
        reason: EndReason,
    ) -> Result<GameEnded, RulesError> {
        self.command(|game| game.forfeit(player, reason)).await
    }

    pub async fn state(&self) -> GameState {
        self.inner.read().await.state()
    }

    pub async fn turn(&self) -> Color {
        self.inner.read().await.turn()
    }

    pub async fn turn_holder(&self) -> Option<PlayerId> {
        self.inner.read().await.turn_holder().cloned()
    }

    pub async fn board_snapshot(&self) -> BoardSnapshot {
        self.inner.read().await.board_snapshot()
    }

    pub async fn draw_rule_status(&self) -> DrawRuleStatus {
        self.inner.read().await.draw_rule_status()
    }

    pub async fn has_legal_move(&self) -> bool {
        self.inner.read().await.has_legal_move()
    }

    /// Legal moves for the side to move in coordinate notation.
    pub async fn legal_moves(&self) -> Vec<String> {
        self.inner.read().await.legal_moves().to_uci_sorted()
    }

    pub async fn move_count(&self) -> u32 {
        self.inner.read().await.move_count()
    }

    pub async fn to_fen(&self) -> String {
        self.inner.read().await.to_fen()
    }
}
