//! Deck construction, seeded shuffling and the opening deal.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use time::{Duration, OffsetDateTime};

use crate::domain::rules::{deck_count_for, CARDS_PER_DECK, MAX_PLAYERS, MIN_PLAYERS};
use crate::domain::state::{
    Actor, GameState, GameStatus, PlayerSeat, RoomCode, SeatStatus, SeatedPlayer, TrickPlay,
};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::DomainError;

/// Generate `decks` full 52-card decks in standard order.
pub fn full_deck(decks: u8) -> Vec<Card> {
    let mut deck = Vec::with_capacity(CARDS_PER_DECK * decks as usize);
    for copy in 0..decks {
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                deck.push(Card { suit, rank, copy });
            }
        }
    }
    deck
}

/// Fisher-Yates shuffle driven by a seeded ChaCha stream.
pub fn shuffle_with_seed(deck: &mut [Card], seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for i in (1..deck.len()).rev() {
        let j = rng.random_range(0..=i);
        deck.swap(i, j);
    }
}

/// Validate the table size, then order players by their requested seat.
fn seat_players(players: Vec<SeatedPlayer>) -> Result<Vec<SeatedPlayer>, DomainError> {
    let count = players.len();
    if count < MIN_PLAYERS {
        return Err(DomainError::NotEnoughPlayers { count });
    }
    if count > MAX_PLAYERS {
        return Err(DomainError::TooManyPlayers { count });
    }

    let mut indexed: Vec<(usize, SeatedPlayer)> = players.into_iter().enumerate().collect();
    // Stable: ties and missing preferences keep list order.
    indexed.sort_by_key(|(idx, p)| p.seat_order.unwrap_or(*idx));
    Ok(indexed.into_iter().map(|(_, p)| p).collect())
}

/// Deal a fresh match.
///
/// The first ace of spades met in the shuffled deck is pulled out and placed
/// alone in the trick as the dealer's lead; the rest is dealt round-robin from
/// seat 0, so earlier seats absorb any remainder.
pub fn deal_game(
    room_code: impl Into<RoomCode>,
    players: Vec<SeatedPlayer>,
    seed: u64,
    turn_duration: Duration,
    now: OffsetDateTime,
) -> Result<GameState, DomainError> {
    let players = seat_players(players)?;
    let decks = deck_count_for(players.len());

    let mut deck = full_deck(decks);
    shuffle_with_seed(&mut deck, seed);
    let total_cards = deck.len();

    let mut trick = Vec::with_capacity(players.len() + 1);
    if let Some(pos) = deck.iter().position(Card::is_ace_of_spades) {
        trick.push(TrickPlay {
            card: deck.remove(pos),
            actor: Actor::Dealer,
        });
    }

    let mut seats: Vec<PlayerSeat> = players
        .into_iter()
        .enumerate()
        .map(|(seat_order, p)| PlayerSeat {
            player_id: p.player_id,
            display_name: p.display_name,
            avatar: p.avatar,
            seat_order,
            hand: Vec::with_capacity(total_cards / MIN_PLAYERS + 1),
            status: SeatStatus::Active,
            penalty_points: 0,
        })
        .collect();

    let table = seats.len();
    for (idx, card) in deck.into_iter().enumerate() {
        seats[idx % table].hand.push(card);
    }
    for seat in &mut seats {
        seat.hand.sort();
    }

    let mut state = GameState {
        room_code: room_code.into(),
        status: GameStatus::Playing,
        seats,
        trick,
        waste_pile: Vec::new(),
        lead_suit: Some(Suit::Spades),
        power_holder: None,
        current_turn: None,
        turn_deadline: None,
        turn_seq: 0,
        turn_duration,
        trick_number: 1,
        is_first_trick: true,
        thulla_triggered: false,
        finish_order: Vec::new(),
        total_cards,
        last_activity: now,
    };
    state.set_turn(0, now);
    Ok(state)
}
