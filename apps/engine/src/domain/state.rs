use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::domain::{Card, Suit};
use crate::errors::domain::DomainError;

pub type PlayerId = String;
pub type RoomCode = String;
/// Position in the fixed clockwise ring, 0-based. Equal to the index into
/// [`GameState::seats`].
pub type Seat = usize;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    /// Still holding (or about to receive) cards.
    Active,
    /// Emptied their hand and escaped.
    Finished,
    /// Left holding cards when nobody else could play. The loser.
    Bhabhi,
    /// Walked away; their hand went to the waste pile.
    Left,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Playing,
    /// Exactly two seats remain playable. Same rules, different label.
    Shootout,
    Ended,
}

impl GameStatus {
    pub const fn is_live(self) -> bool {
        matches!(self, GameStatus::Playing | GameStatus::Shootout)
    }
}

/// Who put a card into the trick. The opening ace of spades belongs to the
/// synthetic dealer, never to a seat.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Actor {
    Dealer,
    Seat(Seat),
}

impl Actor {
    pub const fn seat(self) -> Option<Seat> {
        match self {
            Actor::Dealer => None,
            Actor::Seat(seat) => Some(seat),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TrickPlay {
    pub card: Card,
    pub actor: Actor,
}

/// A player as handed over by the room layer when a match starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatedPlayer {
    pub player_id: PlayerId,
    pub display_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    /// Preferred position; players without one keep their list position.
    #[serde(default)]
    pub seat_order: Option<usize>,
}

impl SeatedPlayer {
    pub fn new(player_id: impl Into<PlayerId>, display_name: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            display_name: display_name.into(),
            avatar: None,
            seat_order: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSeat {
    pub player_id: PlayerId,
    pub display_name: String,
    pub avatar: Option<String>,
    pub seat_order: Seat,
    pub hand: Vec<Card>,
    pub status: SeatStatus,
    /// Thulla tricks this seat was made to pick up.
    pub penalty_points: u32,
}

impl PlayerSeat {
    /// Active and holding at least one card.
    pub fn is_playable(&self) -> bool {
        self.status == SeatStatus::Active && !self.hand.is_empty()
    }
}

/// Entire match container, sufficient for pure domain operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub room_code: RoomCode,
    pub status: GameStatus,
    /// Seats in clockwise order; `seats[i].seat_order == i`.
    pub seats: Vec<PlayerSeat>,
    /// Plays since the trick was last cleared.
    pub trick: Vec<TrickPlay>,
    /// Cards permanently out of play. Only the count is ever shown.
    pub waste_pile: Vec<Card>,
    /// Suit the current trick must follow; `None` until someone leads.
    pub lead_suit: Option<Suit>,
    /// Winner of the most recent trick.
    pub power_holder: Option<Seat>,
    /// Seat expected to act.
    /// - Some(seat) while the game is live
    /// - None once it has ended
    pub current_turn: Option<Seat>,
    pub turn_deadline: Option<OffsetDateTime>,
    /// Bumped every time a turn is handed out, even to the same seat again.
    pub turn_seq: u64,
    pub turn_duration: Duration,
    /// 1-based.
    pub trick_number: u32,
    pub is_first_trick: bool,
    pub thulla_triggered: bool,
    /// Seats in the order they left active play. The bhabhi, if any, is last.
    pub finish_order: Vec<Seat>,
    pub total_cards: usize,
    pub last_activity: OffsetDateTime,
}

impl GameState {
    pub fn seat_of(&self, player_id: &str) -> Option<Seat> {
        self.seats
            .iter()
            .position(|s| s.player_id == player_id)
    }

    pub fn require_seat(&self, player_id: &str) -> Result<Seat, DomainError> {
        self.seat_of(player_id)
            .ok_or_else(|| DomainError::player_not_in_game(player_id))
    }

    pub fn player_id(&self, seat: Seat) -> &str {
        &self.seats[seat].player_id
    }

    pub fn is_playable(&self, seat: Seat) -> bool {
        self.seats[seat].is_playable()
    }

    pub fn playable_seats(&self) -> Vec<Seat> {
        (0..self.seats.len())
            .filter(|&seat| self.is_playable(seat))
            .collect()
    }

    pub fn active_seats(&self) -> Vec<Seat> {
        (0..self.seats.len())
            .filter(|&seat| self.seats[seat].status == SeatStatus::Active)
            .collect()
    }

    /// Cards in hands, the trick and the waste pile. Equals `total_cards` in
    /// every observable state.
    pub fn cards_in_play(&self) -> usize {
        self.seats.iter().map(|s| s.hand.len()).sum::<usize>()
            + self.trick.len()
            + self.waste_pile.len()
    }

    /// Hand the turn to `seat` and arm a fresh deadline.
    pub fn set_turn(&mut self, seat: Seat, now: OffsetDateTime) {
        self.current_turn = Some(seat);
        self.turn_deadline = Some(now + self.turn_duration);
        self.turn_seq += 1;
    }

    pub fn clear_turn(&mut self) {
        self.current_turn = None;
        self.turn_deadline = None;
    }

    /// Whole seconds until the deadline, never negative; 0 when nobody holds the turn.
    pub fn turn_time_left(&self, now: OffsetDateTime) -> u32 {
        match (self.current_turn, self.turn_deadline) {
            (Some(_), Some(deadline)) => {
                let left = (deadline - now).as_seconds_f64().round();
                if left <= 0.0 {
                    0
                } else {
                    left as u32
                }
            }
            _ => 0,
        }
    }
}

/// Returns the seat `n` steps clockwise from `start` at a table of `seats`.
#[inline]
pub fn nth_from(start: Seat, n: usize, seats: usize) -> Seat {
    (start + n) % seats
}
