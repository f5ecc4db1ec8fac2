#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;

use bhabhi_engine::domain::state::GameState;
use bhabhi_engine::{EngineConfig, GameRegistry, ManualClock, SeatedPlayer};
use time::macros::datetime;
use time::OffsetDateTime;


// Logging is auto-installed for every test binary that pulls in this module
#[ctor::ctor]
fn init_logging() {
    engine_test_support::logging::init();
}

pub const START: OffsetDateTime = datetime!(2024-03-01 18:00 UTC);

pub fn seated(n: usize) -> Vec<SeatedPlayer> {
    (0..n)
        .map(|i| SeatedPlayer::new(format!("p{i}"), format!("Player {i}")))
        .collect()
}

/// Config with a fixed base seed so deals are reproducible.
pub fn seeded_config(seed: u64) -> EngineConfig {
    EngineConfig {
        shuffle_seed: Some(seed),
        ..EngineConfig::default()
    }
}

pub fn registry_with_clock(config: EngineConfig) -> (GameRegistry, ManualClock) {
    let clock = ManualClock::new(START);
    let registry = GameRegistry::new(config, Arc::new(clock.clone()));
    (registry, clock)
}

/// Clone of the room's full state.
pub fn snapshot(registry: &GameRegistry, room: &str) -> GameState {
    registry
        .inspect(room, |state, _| state.clone())
        .expect("room should exist")
}

pub fn turn_holder(registry: &GameRegistry, room: &str) -> Option<String> {
    registry
        .inspect(room, |state, _| {
            state.current_turn.map(|seat| state.player_id(seat).to_string())
        })
        .flatten()
}

/// Play the first legal card for whoever holds the turn. Returns false once
/// nobody does.
pub fn play_first_legal(registry: &GameRegistry, room: &str) -> bool {
    let Some(player) = turn_holder(registry, room) else {
        return false;
    };
    let legal = registry.legal_moves(room, &player).expect("seated player");
    let card = legal.first().expect("turn holder always has a legal card");
    registry
        .play(room, &player, &card.to_string())
        .expect("legal card accepted");
    true
}

/// Run the room to the end with first-legal play, bounded by `max_steps`.
pub fn play_out(registry: &GameRegistry, room: &str, max_steps: usize) -> usize {
    let mut steps = 0;
    while steps < max_steps && play_first_legal(registry, room) {
        steps += 1;
    }
    steps
}
