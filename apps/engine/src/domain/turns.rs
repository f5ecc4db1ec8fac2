//! Turn passing, escapes, departures and the end of a match.

use time::OffsetDateTime;

use crate::domain::state::{nth_from, GameState, GameStatus, Seat, SeatStatus};
use crate::errors::domain::DomainError;

/// Hand the turn to the next playable seat clockwise after `from`.
///
/// The scan may wrap all the way back to `from` itself. When nobody can play,
/// the match ends; a lone playable seat could only be found by the scan, so
/// in practice this path names no bhabhi.
pub fn advance_turn(state: &mut GameState, from: Seat, now: OffsetDateTime) {
    let table = state.seats.len();
    for step in 1..=table {
        let seat = nth_from(from, step, table);
        if state.is_playable(seat) {
            state.set_turn(seat, now);
            return;
        }
    }

    let bhabhi = match state.playable_seats().as_slice() {
        [only] => Some(*only),
        _ => None,
    };
    end_game(state, bhabhi);
}

/// Mark an active, empty-handed seat as finished and settle the table.
///
/// Two playable seats left means a shootout; one means that seat is the
/// bhabhi; none means the match ends without one.
pub fn finish_seat(state: &mut GameState, seat: Seat) {
    let player = &mut state.seats[seat];
    if player.status != SeatStatus::Active || !player.hand.is_empty() {
        return;
    }
    player.status = SeatStatus::Finished;
    record_finish(state, seat);

    if !state.status.is_live() {
        return;
    }
    match state.playable_seats().as_slice() {
        [] => end_game(state, None),
        [only] => end_game(state, Some(*only)),
        [_, _] => state.status = GameStatus::Shootout,
        _ => {}
    }
}

/// Append to the finish order, keeping an already-named bhabhi last.
fn record_finish(state: &mut GameState, seat: Seat) {
    if state.finish_order.contains(&seat) {
        return;
    }
    let bhabhi_last = state
        .finish_order
        .last()
        .is_some_and(|&last| state.seats[last].status == SeatStatus::Bhabhi);
    if bhabhi_last {
        let at = state.finish_order.len() - 1;
        state.finish_order.insert(at, seat);
    } else {
        state.finish_order.push(seat);
    }
}

/// End the match, naming `bhabhi` as the loser when there is one.
pub fn end_game(state: &mut GameState, bhabhi: Option<Seat>) {
    state.status = GameStatus::Ended;
    state.clear_turn();
    if let Some(seat) = bhabhi {
        state.seats[seat].status = SeatStatus::Bhabhi;
        if !state.finish_order.contains(&seat) {
            state.finish_order.push(seat);
        }
    }
}

/// Pass the current turn on without playing.
///
/// Returns `false` without touching anything unless the game is live and
/// `player_id` holds the turn.
pub fn skip_turn(state: &mut GameState, player_id: &str, now: OffsetDateTime) -> bool {
    if !state.status.is_live() {
        return false;
    }
    let Some(seat) = state.seat_of(player_id) else {
        return false;
    };
    if state.current_turn != Some(seat) {
        return false;
    }
    advance_turn(state, seat, now);
    state.last_activity = now;
    true
}

/// Skip on behalf of a turn timer that fired.
///
/// The timer is honoured only if its turn is still the current one
/// (`turn_seq` matches), the same player still holds it, and the deadline has
/// actually passed.
pub fn expire_turn(
    state: &mut GameState,
    player_id: &str,
    turn_seq: u64,
    now: OffsetDateTime,
) -> bool {
    if state.turn_seq != turn_seq {
        return false;
    }
    match state.turn_deadline {
        Some(deadline) if deadline <= now => skip_turn(state, player_id, now),
        _ => false,
    }
}

/// Remove a player from a live match.
///
/// Their hand goes to the waste pile and their seat is marked left; cards
/// they already put into the current trick stay there. Seats that finished
/// are already out of play and keep their status. Returns whether anything
/// changed.
pub fn leave_game(
    state: &mut GameState,
    player_id: &str,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    let seat = state.require_seat(player_id)?;
    if !state.status.is_live() || state.seats[seat].status != SeatStatus::Active {
        return Ok(false);
    }

    let hand = std::mem::take(&mut state.seats[seat].hand);
    state.waste_pile.extend(hand);
    state.seats[seat].status = SeatStatus::Left;
    state.last_activity = now;

    if state.current_turn == Some(seat) {
        advance_turn(state, seat, now);
    }

    if state.status.is_live() {
        let active = state.active_seats();
        match active.as_slice() {
            [] => end_game(state, None),
            [only] => end_game(state, Some(*only)),
            _ if state.playable_seats().len() == 2 => state.status = GameStatus::Shootout,
            _ => {}
        }
    }
    Ok(true)
}
