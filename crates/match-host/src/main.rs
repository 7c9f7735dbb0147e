//! Match Replay - plays a list of moves through the rules engine.
//!
//! Each move is printed as one JSON line with its outcome or rejection,
//! followed by a summary of the final position.

use anyhow::Context;
use chess_core::Move;
use chess_rules::{
    DrawRuleStatus, GameEnded, GameState, Match, MatchConfig, MoveRequest, PlayerId,
    SelfCheckPolicy,
};
use clap::Parser;
use match_host::SharedMatch;
use serde::Serialize;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Match Replay - Replays coordinate-notation moves and reports outcomes.
#[derive(Parser)]
#[command(name = "match-replay")]
#[command(about = "Replays moves through the rules engine and prints JSON outcomes")]
struct Args {
    /// Moves in coordinate notation (e.g. e2e4 e7e5 g1f3, e7e8n)
    moves: Vec<String>,

    /// Path to match configuration
    #[arg(long, default_value = "match.toml")]
    config: PathBuf,

    /// Starting position in FEN, overriding the configuration
    #[arg(long)]
    fen: Option<String>,

    /// Self-check handling: reject or forfeit
    #[arg(long)]
    policy: Option<SelfCheckPolicy>,

    /// Stop at the first rejected move
    #[arg(long)]
    strict: bool,
}

#[derive(Serialize)]
struct Rejection<'a> {
    #[serde(rename = "move")]
    uci: &'a str,
    error: String,
}

#[derive(Serialize)]
struct Summary {
    fen: String,
    state: GameState,
    move_count: u32,
    draw_rules: DrawRuleStatus,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut config = MatchConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(fen) = args.fen {
        config.start_fen = Some(fen);
    }
    if let Some(policy) = args.policy {
        config = config.with_policy(policy);
    }
    tracing::info!("Self-check policy: {:?}", config.self_check_policy);

    let (tx, mut rx) = mpsc::unbounded_channel::<GameEnded>();
    let shared = SharedMatch::new(Match::with_config(&config)?).with_sink(tx);
    shared.join(PlayerId::new("white")).await?;
    shared.join(PlayerId::new("black")).await?;

    for uci in &args.moves {
        if shared.state().await.is_terminal() {
            tracing::warn!("Match already over, ignoring {} and later moves", uci);
            break;
        }
        let Some((from, to, promotion)) = Move::parse_uci(uci) else {
            anyhow::bail!("not a coordinate move: {uci}");
        };
        let player = match shared.turn_holder().await {
            Some(player) => player,
            None => anyhow::bail!("no player on move"),
        };

        let request = MoveRequest {
            from,
            to,
            promotion,
            player,
        };
        match shared.submit_move(request).await {
            Ok(outcome) => println!("{}", serde_json::to_string(&outcome)?),
            Err(e) => {
                let rejection = Rejection {
                    uci,
                    error: e.to_string(),
                };
                println!("{}", serde_json::to_string(&rejection)?);
                if args.strict {
                    anyhow::bail!("move {uci} rejected: {e}");
                }
            }
        }
    }

    let summary = Summary {
        fen: shared.to_fen().await,
        state: shared.state().await,
        move_count: shared.move_count().await,
        draw_rules: shared.draw_rule_status().await,
    };
    println!("{}", serde_json::to_string(&summary)?);

    drop(shared);
    while let Some(event) = rx.recv().await {
        tracing::info!("Match ended: {} by {}", event.state, event.reason);
        println!("{}", serde_json::to_string(&event)?);
    }

    Ok(())
}
