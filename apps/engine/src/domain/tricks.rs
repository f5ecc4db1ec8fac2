use time::OffsetDateTime;

use crate::domain::state::{Actor, GameState, Seat, SeatStatus, TrickPlay};
use crate::domain::turns::{advance_turn, finish_seat};
use crate::domain::{best_of_suit, hand_has_suit, Card, Suit};
use crate::errors::domain::DomainError;

/// How a trick was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrickResolution {
    /// The opening trick: every card went to the waste pile, nobody won.
    OpeningDiscarded,
    /// Everyone followed; the cards went to the waste pile.
    Won { winner: Seat },
    /// Someone broke suit; `winner` picked up all `picked_up` cards.
    Thulla { winner: Seat, picked_up: usize },
}

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    /// The acting seat.
    pub seat: Seat,
    pub card: Card,
    /// Set when this play closed the trick.
    pub resolution: Option<TrickResolution>,
    /// Trick number after this play (incremented if the trick closed).
    pub trick_number_after: u32,
}

/// Cards `seat` may play right now: the lead-suit cards when it can follow,
/// otherwise the whole hand. Empty when the seat cannot act.
pub fn legal_moves(state: &GameState, seat: Seat) -> Vec<Card> {
    if !state.status.is_live() || state.current_turn != Some(seat) {
        return Vec::new();
    }
    let player = &state.seats[seat];
    if player.status != SeatStatus::Active {
        return Vec::new();
    }

    let hand = &player.hand;
    if let Some(lead) = current_lead(state) {
        if hand_has_suit(hand, lead) {
            return hand.iter().copied().filter(|c| c.suit == lead).collect();
        }
    }
    hand.clone()
}

/// Lead suit the next card must follow, `None` when the next card leads.
fn current_lead(state: &GameState) -> Option<Suit> {
    if state.trick.is_empty() {
        None
    } else {
        state.lead_suit
    }
}

/// Plays needed before a trick without a thulla closes.
///
/// The opening trick needs one card from every seat still at the table (the
/// dealer's ace does not count). Later tricks need one per active seat, a
/// number that shrinks as players finish.
pub fn required_plays(state: &GameState) -> usize {
    if state.is_first_trick {
        state
            .seats
            .iter()
            .filter(|s| s.status != SeatStatus::Left)
            .count()
    } else {
        state.active_seats().len()
    }
}

fn counted_plays(state: &GameState) -> usize {
    if state.is_first_trick {
        state
            .trick
            .iter()
            .filter_map(|p| p.actor.seat())
            .filter(|&seat| state.seats[seat].status != SeatStatus::Left)
            .count()
    } else {
        state.trick.len()
    }
}

fn trick_complete(state: &GameState) -> bool {
    !state.thulla_triggered && counted_plays(state) >= required_plays(state)
}

/// Play a card into the current trick, enforcing status, turn, ownership and
/// suit-following. Every check runs before the state is touched.
pub fn play_card(
    state: &mut GameState,
    player_id: &str,
    card_id: &str,
    now: OffsetDateTime,
) -> Result<PlayCardResult, DomainError> {
    if !state.status.is_live() {
        return Err(DomainError::GameNotActive);
    }

    // Strangers never hold the turn, so they get the same answer as a waiting seat.
    let seat = match (state.seat_of(player_id), state.current_turn) {
        (Some(seat), Some(turn)) if seat == turn => seat,
        _ => return Err(DomainError::NotYourTurn),
    };
    if state.seats[seat].status != SeatStatus::Active {
        return Err(DomainError::PlayerNotActive);
    }

    // An id that does not parse cannot be in anyone's hand.
    let wanted: Card = card_id
        .parse()
        .map_err(|_| DomainError::card_not_in_hand(card_id))?;
    let pos = state.seats[seat]
        .hand
        .iter()
        .position(|&c| c == wanted)
        .ok_or_else(|| DomainError::card_not_in_hand(card_id))?;

    let lead_before = current_lead(state);
    if let Some(lead) = lead_before {
        if wanted.suit != lead && hand_has_suit(&state.seats[seat].hand, lead) {
            return Err(DomainError::MustFollowSuit);
        }
    }

    // Validation done; mutate.
    let card = state.seats[seat].hand.remove(pos);
    if lead_before.is_none() {
        state.lead_suit = Some(card.suit);
    }
    state.trick.push(TrickPlay {
        card,
        actor: Actor::Seat(seat),
    });
    state.last_activity = now;

    let is_thulla =
        matches!(lead_before, Some(lead) if card.suit != lead) && !state.is_first_trick;

    let resolution = if is_thulla {
        state.thulla_triggered = true;
        Some(resolve_thulla_trick(state, seat, now))
    } else if trick_complete(state) {
        Some(resolve_normal_trick(state, seat, now))
    } else {
        advance_turn(state, seat, now);
        None
    };

    if state.seats[seat].hand.is_empty() && state.seats[seat].status == SeatStatus::Active {
        finish_seat(state, seat);
    }

    Ok(PlayCardResult {
        seat,
        card,
        resolution,
        trick_number_after: state.trick_number,
    })
}

/// Close the trick early because `breaker` played off-suit.
///
/// The highest lead-suit card among seats still in play takes every card on
/// the table; with no lead-suit card the earliest such seat does. Seats that
/// already finished or left are out of play and never receive cards.
pub fn resolve_thulla_trick(
    state: &mut GameState,
    breaker: Seat,
    now: OffsetDateTime,
) -> TrickResolution {
    let contenders: Vec<(Seat, Card)> = state
        .trick
        .iter()
        .filter_map(|p| p.actor.seat().map(|seat| (seat, p.card)))
        .filter(|&(seat, _)| state.seats[seat].status == SeatStatus::Active)
        .collect();

    let winner = state
        .lead_suit
        .and_then(|lead| best_of_suit(contenders.iter().map(|(_, c)| c), lead))
        .map(|idx| contenders[idx].0)
        .or_else(|| contenders.first().map(|&(seat, _)| seat))
        .unwrap_or(breaker);

    let picked_up = state.trick.len();
    let hand = &mut state.seats[winner].hand;
    hand.extend(state.trick.drain(..).map(|p| p.card));
    hand.sort();
    state.seats[winner].penalty_points += 1;

    state.lead_suit = None;
    state.is_first_trick = false;
    state.thulla_triggered = false;
    state.trick_number += 1;
    state.power_holder = Some(winner);
    state.set_turn(winner, now);

    TrickResolution::Thulla { winner, picked_up }
}

/// Close a trick that every required seat followed.
///
/// The opening trick is discarded without a winner and play passes to the
/// seat after seat 0. Otherwise the highest lead-suit card wins (earliest play
/// on equal ranks), the cards go to waste, and the winner leads next unless
/// the win left them empty-handed.
pub fn resolve_normal_trick(
    state: &mut GameState,
    last: Seat,
    now: OffsetDateTime,
) -> TrickResolution {
    if state.is_first_trick {
        state
            .waste_pile
            .extend(state.trick.drain(..).map(|p| p.card));
        state.lead_suit = None;
        state.is_first_trick = false;
        state.trick_number += 1;
        advance_turn(state, 0, now);
        return TrickResolution::OpeningDiscarded;
    }

    let lead = state
        .lead_suit
        .or_else(|| state.trick.first().map(|p| p.card.suit));
    let winner = lead
        .and_then(|lead| best_of_suit(state.trick.iter().map(|p| &p.card), lead))
        .and_then(|idx| state.trick[idx].actor.seat())
        .or_else(|| state.trick.iter().find_map(|p| p.actor.seat()))
        .unwrap_or(last);

    state.waste_pile.extend(state.trick.drain(..).map(|p| p.card));
    state.lead_suit = None;
    state.trick_number += 1;
    state.power_holder = Some(winner);

    if state.seats[winner].hand.is_empty() {
        finish_seat(state, winner);
        if state.status.is_live() {
            advance_turn(state, winner, now);
        }
    } else {
        state.set_turn(winner, now);
    }

    TrickResolution::Won { winner }
}
