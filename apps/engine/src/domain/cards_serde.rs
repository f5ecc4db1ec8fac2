//! Wire shape of a card: `{ "id": "AS-0", "suit": "spades", "rank": 14 }`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Card, Rank, Suit};

#[derive(Serialize, Deserialize)]
struct CardWire {
    id: String,
    suit: Suit,
    rank: Rank,
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        CardWire {
            id: self.to_string(),
            suit: self.suit,
            rank: self.rank,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = CardWire::deserialize(deserializer)?;
        let card: Card = wire.id.parse().map_err(serde::de::Error::custom)?;
        if card.suit != wire.suit || card.rank != wire.rank {
            return Err(serde::de::Error::custom(format!(
                "card id {} disagrees with suit/rank",
                wire.id
            )));
        }
        Ok(card)
    }
}
