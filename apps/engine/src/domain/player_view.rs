//! Player view of game state - what information is visible to a viewer.
//!
//! Every seat's card count is public; the cards themselves are only ever
//! shown to the seat that holds them. The waste pile is shown as a count.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::state::{Actor, GameState, GameStatus, PlayerId, RoomCode, SeatStatus};
use crate::domain::Card;

/// Who a trick card is attributed to on the wire.
pub const DEALER: &str = "dealer";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrickEntryView {
    pub card: Card,
    /// A player id, or [`DEALER`] for the opening ace.
    pub played_by: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    pub id: PlayerId,
    pub name: String,
    pub avatar: Option<String>,
    pub seat_order: usize,
    pub card_count: usize,
    pub status: SeatStatus,
    pub penalty_points: u32,
    pub is_turn: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<Card>>,
}

/// Viewer-scoped snapshot of one room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub room_code: RoomCode,
    pub status: GameStatus,
    pub current_turn_player_id: Option<PlayerId>,
    pub power_holder: Option<PlayerId>,
    pub trick: Vec<TrickEntryView>,
    pub turn_time_left_seconds: u32,
    pub trick_number: u32,
    pub is_first_trick: bool,
    pub waste_pile_count: usize,
    pub finish_order: Vec<PlayerId>,
    pub players: Vec<SeatView>,
}

impl GameView {
    pub fn player(&self, player_id: &str) -> Option<&SeatView> {
        self.players.iter().find(|p| p.id == player_id)
    }
}

/// Project `state` for `viewer`. With no viewer (or a viewer who is not
/// seated) every hand is redacted.
pub fn project(state: &GameState, viewer: Option<&str>, now: OffsetDateTime) -> GameView {
    let owner = |seat: usize| state.player_id(seat).to_string();

    let trick = state
        .trick
        .iter()
        .map(|play| TrickEntryView {
            card: play.card,
            played_by: match play.actor {
                Actor::Dealer => DEALER.to_string(),
                Actor::Seat(seat) => owner(seat),
            },
        })
        .collect();

    let players = state
        .seats
        .iter()
        .enumerate()
        .map(|(seat, p)| SeatView {
            id: p.player_id.clone(),
            name: p.display_name.clone(),
            avatar: p.avatar.clone(),
            seat_order: p.seat_order,
            card_count: p.hand.len(),
            status: p.status,
            penalty_points: p.penalty_points,
            is_turn: state.current_turn == Some(seat),
            hand: (viewer == Some(p.player_id.as_str())).then(|| p.hand.clone()),
        })
        .collect();

    GameView {
        room_code: state.room_code.clone(),
        status: state.status,
        current_turn_player_id: state.current_turn.map(owner),
        power_holder: state.power_holder.map(owner),
        trick,
        turn_time_left_seconds: state.turn_time_left(now),
        trick_number: state.trick_number,
        is_first_trick: state.is_first_trick,
        waste_pile_count: state.waste_pile.len(),
        finish_order: state.finish_order.iter().map(|&s| owner(s)).collect(),
        players,
    }
}
