//! Match simulator - plays complete games with random legal moves.
//!
//! Drives the registry exactly as a room layer would, which makes it a quick
//! smoke test for rule changes and a source of reproducible game logs.

use std::sync::Arc;

use bhabhi_engine::clock::ManualClock;
use bhabhi_engine::domain::game_transition::GameTransition;
use bhabhi_engine::domain::state::{GameState, GameStatus};
use bhabhi_engine::domain::rules::{MAX_PLAYERS, MIN_PLAYERS};
use bhabhi_engine::{telemetry, AppError, EngineConfig, GameObserver, GameRegistry, SeatedPlayer};
use clap::Parser;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::json;
use time::{Duration, OffsetDateTime};
use tracing::{info, warn};

/// Upper bound on intents per game before the simulator gives up on it.
const MAX_STEPS: usize = 20_000;

#[derive(Parser)]
#[command(name = "bhabhi-sim")]
#[command(about = "Play random Bhabhi matches against the engine")]
struct Args {
    /// Seats at the table (3-8)
    #[arg(short, long, default_value = "4", value_parser = clap::value_parser!(u8).range(MIN_PLAYERS as i64..=MAX_PLAYERS as i64))]
    players: u8,

    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Seed for deals and move choices; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Chance (0.0-1.0) that a turn is left to time out
    #[arg(long, default_value = "0.02")]
    skip_rate: f64,
}

/// Logs every transition the registry reports.
struct TransitionLog;

impl GameObserver for TransitionLog {
    fn game_changed(&self, state: &GameState, transitions: &[GameTransition], _now: OffsetDateTime) {
        for transition in transitions {
            match transition {
                GameTransition::TurnBecame { .. } => {}
                other => info!(room_code = %state.room_code, transition = ?other, "Transition"),
            }
        }
    }

    fn game_removed(&self, room_code: &str) {
        info!(room_code, "Game removed");
    }
}

fn main() -> Result<(), AppError> {
    telemetry::init_tracing();
    let args = Args::parse();

    let mut config = EngineConfig::from_env()?;
    let seed = args.seed.or(config.shuffle_seed).unwrap_or_else(rand::random);
    config.shuffle_seed = Some(seed);

    let clock = ManualClock::new(OffsetDateTime::now_utc());
    let registry = GameRegistry::new(config, Arc::new(clock.clone()));
    registry.add_observer(Arc::new(TransitionLog));
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let skip_rate = if args.skip_rate.is_nan() { 0.0 } else { args.skip_rate.clamp(0.0, 1.0) };

    info!(seed, players = args.players, games = args.games, "Starting simulation");

    for game_no in 0..args.games {
        let room_code = format!("SIM-{game_no}");
        let players = (0..args.players)
            .map(|i| SeatedPlayer::new(format!("bot-{i}"), format!("Bot {i}")))
            .collect();
        registry.start(&room_code, players)?;

        let mut steps = 0;
        loop {
            let turn = registry
                .inspect(&room_code, |state, _| {
                    state.current_turn.map(|seat| state.player_id(seat).to_string())
                })
                .flatten();
            let Some(player_id) = turn else { break };

            if steps >= MAX_STEPS {
                warn!(room_code = %room_code, steps, "Game did not finish, abandoning");
                break;
            }
            steps += 1;
            clock.advance(Duration::seconds(1));

            if rng.random_bool(skip_rate) {
                registry.skip_turn(&room_code, &player_id)?;
                continue;
            }
            let legal = registry.legal_moves(&room_code, &player_id)?;
            let card = legal
                .choose(&mut rng)
                .ok_or_else(|| AppError::internal(format!("{player_id} holds the turn with no legal card")))?;
            registry.play(&room_code, &player_id, &card.to_string())?;
        }

        let view = registry
            .get_state(&room_code, None)
            .ok_or_else(|| AppError::internal(format!("{room_code} vanished")))?;
        let bhabhi = view
            .players
            .iter()
            .find(|p| p.status == bhabhi_engine::domain::SeatStatus::Bhabhi)
            .map(|p| p.id.clone());
        let summary = json!({
            "room": room_code,
            "finished": view.status == GameStatus::Ended,
            "steps": steps,
            "tricks": view.trick_number,
            "finishOrder": view.finish_order,
            "bhabhi": bhabhi,
            "penalties": view
                .players
                .iter()
                .map(|p| (p.id.clone(), p.penalty_points))
                .collect::<std::collections::BTreeMap<_, _>>(),
        });
        println!("{summary}");
        registry.reset(&room_code);
    }

    Ok(())
}
