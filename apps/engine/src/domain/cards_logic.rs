//! Card game logic: checking suits in hands, picking the best card of a suit

use super::cards_types::{Card, Suit};

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// Index of the highest-ranked card of `suit` among `cards`, or `None` when no
/// card follows `suit`. Scans in order and only replaces the best on a strictly
/// higher rank, so with duplicate decks the earliest maximal card wins.
pub fn best_of_suit<'a, I>(cards: I, suit: Suit) -> Option<usize>
where
    I: IntoIterator<Item = &'a Card>,
{
    let mut best: Option<(usize, &Card)> = None;
    for (idx, card) in cards.into_iter().enumerate() {
        if card.suit != suit {
            continue;
        }
        match best {
            Some((_, current)) if card.rank <= current.rank => {}
            _ => best = Some((idx, card)),
        }
    }
    best.map(|(idx, _)| idx)
}
