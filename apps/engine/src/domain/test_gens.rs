// Proptest generators for domain types.
// Matches are generated as a seat count, a shuffle seed and a script of
// player intents, so every generated state is reachable by construction.

use proptest::prelude::*;
use time::{Duration, OffsetDateTime};

use crate::domain::dealing::deal_game;
use crate::domain::rules::{DEFAULT_TURN_DURATION, MAX_PLAYERS, MIN_PLAYERS};
use crate::domain::state::{GameState, SeatedPlayer};
use crate::domain::test_state_helpers::T0;
use crate::domain::tricks::{legal_moves, play_card, PlayCardResult};
use crate::domain::turns::{leave_game, skip_turn};
use crate::domain::{Card, Rank, Suit};

/// Generate a random Suit
pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Clubs),
        Just(Suit::Diamonds),
        Just(Suit::Hearts),
        Just(Suit::Spades),
    ]
}

/// Generate a random Rank
pub fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

/// Generate a single Card from one of two decks
pub fn card() -> impl Strategy<Value = Card> {
    (suit(), rank(), 0u8..2).prop_map(|(suit, rank, copy)| Card { suit, rank, copy })
}

pub fn table_size() -> impl Strategy<Value = usize> {
    MIN_PLAYERS..=MAX_PLAYERS
}

/// What the table does next.
#[derive(Debug, Clone, Copy)]
pub enum Intent {
    /// Play the n-th legal card (modulo the number of legal cards).
    Play(usize),
    /// The turn holder times out.
    Skip,
    /// The n-th seat (modulo the table) walks away.
    Leave(usize),
}

pub fn intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        40 => any::<usize>().prop_map(Intent::Play),
        2 => Just(Intent::Skip),
        1 => any::<usize>().prop_map(Intent::Leave),
    ]
}

pub fn script(max_len: usize) -> impl Strategy<Value = Vec<Intent>> {
    prop::collection::vec(intent(), 0..max_len)
}

/// Dealt match plus a script to drive it.
pub fn match_plan(max_len: usize) -> impl Strategy<Value = (usize, u64, Vec<Intent>)> {
    (table_size(), any::<u64>(), script(max_len))
}

pub fn dealt(players: usize, seed: u64) -> GameState {
    let seated = (0..players)
        .map(|i| SeatedPlayer::new(format!("p{i}"), format!("Player {i}")))
        .collect();
    deal_game("PROP", seated, seed, DEFAULT_TURN_DURATION, T0).expect("valid table size")
}

/// Clock reading for the `step`-th intent.
pub fn tick(step: usize) -> OffsetDateTime {
    T0 + Duration::seconds(step as i64)
}

/// Outcome of applying one intent.
#[derive(Debug)]
pub enum Applied {
    Played(PlayCardResult),
    Skipped,
    Left,
    /// Nothing to do: the game is over or the intent did not apply.
    Idle,
}

pub fn apply(state: &mut GameState, intent: Intent, now: OffsetDateTime) -> Applied {
    let Some(seat) = state.current_turn else {
        return Applied::Idle;
    };
    match intent {
        Intent::Play(n) => {
            let legal = legal_moves(state, seat);
            if legal.is_empty() {
                return Applied::Idle;
            }
            let card = legal[n % legal.len()];
            let player = state.player_id(seat).to_string();
            let result = play_card(state, &player, &card.to_string(), now)
                .expect("legal move must be accepted");
            Applied::Played(result)
        }
        Intent::Skip => {
            let player = state.player_id(seat).to_string();
            if skip_turn(state, &player, now) {
                Applied::Skipped
            } else {
                Applied::Idle
            }
        }
        Intent::Leave(n) => {
            let leaver = n % state.seats.len();
            let player = state.player_id(leaver).to_string();
            match leave_game(state, &player, now) {
                Ok(true) => Applied::Left,
                _ => Applied::Idle,
            }
        }
    }
}
