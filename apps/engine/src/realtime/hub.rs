use dashmap::DashMap;
use time::OffsetDateTime;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;
use uuid::Uuid;

use crate::domain::game_transition::GameTransition;
use crate::domain::player_view::{project, GameView};
use crate::domain::state::{GameState, PlayerId, RoomCode};
use crate::services::observer::GameObserver;

struct ViewerSink {
    viewer: Option<PlayerId>,
    tx: UnboundedSender<GameView>,
}

/// A live feed of projections for one viewer of one room.
pub struct Subscription {
    pub room_code: RoomCode,
    pub token: Uuid,
    pub rx: UnboundedReceiver<GameView>,
}

/// Per-room subscriber registry. After every change each subscriber gets its
/// own projection, so a hand only ever travels to the seat holding it.
#[derive(Default)]
pub struct ViewerHub {
    rooms: DashMap<RoomCode, DashMap<Uuid, ViewerSink>>,
}

impl ViewerHub {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// `viewer` is the subscribing player's id, or `None` for a redacted feed.
    pub fn subscribe(&self, room_code: &str, viewer: Option<&str>) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let token = Uuid::new_v4();
        let entry = self
            .rooms
            .entry(room_code.to_string())
            .or_insert_with(DashMap::new);
        entry.insert(
            token,
            ViewerSink {
                viewer: viewer.map(str::to_string),
                tx,
            },
        );
        debug!(room_code, %token, viewer, "Viewer subscribed");
        Subscription {
            room_code: room_code.to_string(),
            token,
            rx,
        }
    }

    pub fn unsubscribe(&self, room_code: &str, token: Uuid) {
        if let Some(entry) = self.rooms.get(room_code) {
            entry.remove(&token);
        }
        self.rooms.remove_if(room_code, |_, sinks| sinks.is_empty());
    }

    /// Push `view` to one subscriber only.
    pub fn send_to(&self, room_code: &str, token: Uuid, view: GameView) {
        if let Some(entry) = self.rooms.get(room_code) {
            if let Some(sink) = entry.get(&token) {
                let _ = sink.tx.send(view);
            }
        }
    }

    pub fn subscriber_count(&self, room_code: &str) -> usize {
        self.rooms.get(room_code).map_or(0, |entry| entry.len())
    }

    pub fn broadcast(&self, state: &GameState, now: OffsetDateTime) {
        let mut closed = Vec::new();
        if let Some(entry) = self.rooms.get(&state.room_code) {
            for sink in entry.iter() {
                let view = project(state, sink.viewer.as_deref(), now);
                if sink.tx.send(view).is_err() {
                    closed.push(*sink.key());
                }
            }
        }
        for token in closed {
            debug!(room_code = %state.room_code, %token, "Dropping closed viewer");
            self.unsubscribe(&state.room_code, token);
        }
    }
}

impl GameObserver for ViewerHub {
    fn game_changed(&self, state: &GameState, _transitions: &[GameTransition], now: OffsetDateTime) {
        self.broadcast(state, now);
    }

    fn game_removed(&self, room_code: &str) {
        if let Some((_, sinks)) = self.rooms.remove(room_code) {
            debug!(room_code, viewers = sinks.len(), "Closing viewer feeds");
        }
    }
}
