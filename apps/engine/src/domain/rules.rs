use std::ops::RangeInclusive;

use time::Duration;

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 8;
pub const SEAT_RANGE: RangeInclusive<usize> = MIN_PLAYERS..=MAX_PLAYERS;

/// Tables this size or larger play with two decks.
pub const TWO_DECK_THRESHOLD: usize = 7;
pub const CARDS_PER_DECK: usize = 52;

pub const DEFAULT_TURN_DURATION: Duration = Duration::seconds(30);

pub fn deck_count_for(players: usize) -> u8 {
    if players >= TWO_DECK_THRESHOLD {
        2
    } else {
        1
    }
}
