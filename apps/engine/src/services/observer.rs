use time::OffsetDateTime;

use crate::domain::game_transition::GameTransition;
use crate::domain::state::GameState;

/// Hook invoked by the registry after each committed change to a room.
///
/// Calls happen while the room lock is held, so a given observer sees a room's
/// changes in the order they were made. Implementations must not block and
/// must not call back into the registry for the same room.
pub trait GameObserver: Send + Sync {
    fn game_changed(&self, state: &GameState, transitions: &[GameTransition], now: OffsetDateTime);

    /// The room was reset or evicted.
    fn game_removed(&self, room_code: &str);
}
