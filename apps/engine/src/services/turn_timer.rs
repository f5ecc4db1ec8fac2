//! One cancellable countdown per room, re-armed whenever a turn is handed out.

use dashmap::DashMap;
use time::OffsetDateTime;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::game_transition::GameTransition;
use crate::domain::state::{GameState, PlayerId, RoomCode};
use crate::services::observer::GameObserver;

/// Emitted when a countdown runs out. The game service turns it into an
/// `expire_turn`, which decides whether it still applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnExpired {
    pub room_code: RoomCode,
    pub player_id: PlayerId,
    pub turn_seq: u64,
}

pub struct TurnTimer {
    runtime: Handle,
    timers: DashMap<RoomCode, CancellationToken>,
    expired_tx: UnboundedSender<TurnExpired>,
}

impl TurnTimer {
    pub fn new(runtime: Handle, expired_tx: UnboundedSender<TurnExpired>) -> Self {
        Self {
            runtime,
            timers: DashMap::new(),
            expired_tx,
        }
    }

    /// Start a countdown for `room_code`, cancelling the one already running.
    pub fn arm(&self, expired: TurnExpired, after: std::time::Duration) {
        let token = CancellationToken::new();
        if let Some(previous) = self.timers.insert(expired.room_code.clone(), token.clone()) {
            previous.cancel();
        }

        let tx = self.expired_tx.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(after) => {
                    debug!(
                        room_code = %expired.room_code,
                        player_id = %expired.player_id,
                        turn_seq = expired.turn_seq,
                        "Turn timer fired"
                    );
                    // Receiver gone means the service is shutting down.
                    let _ = tx.send(expired);
                    token.cancel();
                }
            }
        });
    }

    pub fn cancel(&self, room_code: &str) {
        if let Some((_, token)) = self.timers.remove(room_code) {
            token.cancel();
        }
    }

    /// Whether a countdown is still pending for the room.
    pub fn is_armed(&self, room_code: &str) -> bool {
        self.timers
            .get(room_code)
            .is_some_and(|token| !token.is_cancelled())
    }
}

impl GameObserver for TurnTimer {
    fn game_changed(&self, state: &GameState, transitions: &[GameTransition], now: OffsetDateTime) {
        let new_turn = transitions.iter().rev().find_map(|t| match t {
            GameTransition::TurnBecame { seat, turn_seq } => Some((*seat, *turn_seq)),
            _ => None,
        });

        match (new_turn, state.turn_deadline) {
            (Some((seat, turn_seq)), Some(deadline)) if state.status.is_live() => {
                // A deadline already behind us fires straight away.
                let after = std::time::Duration::try_from(deadline - now).unwrap_or_default();
                self.arm(
                    TurnExpired {
                        room_code: state.room_code.clone(),
                        player_id: state.player_id(seat).to_string(),
                        turn_seq,
                    },
                    after,
                );
            }
            _ if !state.status.is_live() => self.cancel(&state.room_code),
            _ => {}
        }
    }

    fn game_removed(&self, room_code: &str) {
        self.cancel(room_code);
    }
}
