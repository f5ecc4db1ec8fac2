//! Property tests for play validation (pure domain).
//!
//! Properties tested:
//! - MustFollowSuit fires exactly when the seat could have followed the lead
//! - legal_moves lists exactly the cards play_card accepts
//! - A rejected play leaves the game untouched
//! - Only the turn holder may play

use proptest::prelude::*;

use crate::domain::state::GameStatus;
use crate::domain::test_gens::{apply, dealt, match_plan, tick};
use crate::domain::tricks::{legal_moves, play_card};
use crate::domain::{hand_has_suit, test_prelude};
use crate::errors::domain::DomainError;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_suit_follow_law_and_legal_moves_agree(
        (players, seed, script) in match_plan(200),
    ) {
        let mut state = dealt(players, seed);
        for (step, intent) in script.into_iter().enumerate() {
            apply(&mut state, intent, tick(step));
        }
        let Some(seat) = state.current_turn else {
            return Ok(());
        };
        let player = state.player_id(seat).to_string();
        let hand = state.seats[seat].hand.clone();
        let legal = legal_moves(&state, seat);
        let lead = if state.trick.is_empty() { None } else { state.lead_suit };
        let now = tick(10_000);

        for card in hand {
            let mut attempt = state.clone();
            let outcome = play_card(&mut attempt, &player, &card.to_string(), now);

            let must_follow = matches!(lead, Some(l) if card.suit != l && hand_has_suit(&state.seats[seat].hand, l));
            if must_follow {
                prop_assert_eq!(outcome, Err(DomainError::MustFollowSuit));
                prop_assert_eq!(&attempt, &state, "rejected play mutated state");
                prop_assert!(!legal.contains(&card));
            } else {
                prop_assert!(outcome.is_ok(), "{} rejected: {:?}", card, outcome);
                prop_assert!(legal.contains(&card));
            }
        }
    }

    #[test]
    fn prop_only_turn_holder_may_play(
        (players, seed, script) in match_plan(100),
    ) {
        let mut state = dealt(players, seed);
        for (step, intent) in script.into_iter().enumerate() {
            apply(&mut state, intent, tick(step));
        }

        for seat in 0..state.seats.len() {
            if state.current_turn == Some(seat) {
                continue;
            }
            let Some(card) = state.seats[seat].hand.first().copied() else {
                continue;
            };
            let player = state.player_id(seat).to_string();
            let mut attempt = state.clone();
            let outcome = play_card(&mut attempt, &player, &card.to_string(), tick(10_000));
            let expected = if state.status == GameStatus::Ended {
                DomainError::GameNotActive
            } else {
                DomainError::NotYourTurn
            };
            prop_assert_eq!(outcome, Err(expected));
            prop_assert_eq!(&attempt, &state);
            prop_assert!(legal_moves(&state, seat).is_empty());
        }
    }
}
