//! Core card-related types: Card, Rank, Suit

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];
}

/// Card rank. On the wire a rank is its numeric value, 2..=14 with 14 = Ace.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn value(self) -> u8 {
        self as u8 + 2
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.value()
    }
}

impl TryFrom<u8> for Rank {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        value
            .checked_sub(2)
            .and_then(|idx| Rank::ALL.get(idx as usize).copied())
            .ok_or_else(|| format!("rank out of range: {value}"))
    }
}

/// One physical card. `copy` is the index of the deck it came from, which
/// keeps identities unique when two decks are in play.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub copy: u8,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank, copy: u8) -> Self {
        Self { suit, rank, copy }
    }

    pub const fn is_ace_of_spades(&self) -> bool {
        matches!((self.suit, self.rank), (Suit::Spades, Rank::Ace))
    }
}

// Note: Ord on Card is only for stable sorting: suit order C<D<H<S, then rank, then copy.
// Trick resolution compares ranks within the lead suit instead.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.suit, self.rank, self.copy).cmp(&(other.suit, other.rank, other.copy))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
