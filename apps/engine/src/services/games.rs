//! In-memory registry of live games, one lock-guarded state per room.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::domain::game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
use crate::domain::player_view::{project, GameView};
use crate::domain::state::{GameState, RoomCode, SeatedPlayer};
use crate::domain::tricks::TrickResolution;
use crate::domain::{deal_game, derive_dealing_seed, tricks, turns, Card};
use crate::errors::domain::DomainError;
use crate::services::observer::GameObserver;

type SharedGame = Arc<Mutex<GameState>>;

/// Owns every room's `GameState` and is the only way to change one.
///
/// The room map shard is released before a room's lock is taken, so a slow
/// room never holds up lookups for the others.
pub struct GameRegistry {
    games: DashMap<RoomCode, SharedGame>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
    games_dealt: AtomicU64,
    observers: RwLock<Vec<Arc<dyn GameObserver>>>,
}

impl GameRegistry {
    pub fn new(config: EngineConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            games: DashMap::new(),
            clock,
            config,
            games_dealt: AtomicU64::new(0),
            observers: RwLock::new(Vec::new()),
        }
    }

    pub fn add_observer(&self, observer: Arc<dyn GameObserver>) {
        self.observers.write().push(observer);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn now(&self) -> OffsetDateTime {
        self.clock.now()
    }

    /// Deal a new match for `room_code`, replacing any game already there.
    pub fn start(
        &self,
        room_code: &str,
        players: Vec<SeatedPlayer>,
    ) -> Result<GameView, DomainError> {
        let now = self.clock.now();
        let seed = self.next_seed();
        let state = deal_game(room_code, players, seed, self.config.turn_duration, now)?;

        info!(
            room_code,
            players = state.seats.len(),
            total_cards = state.total_cards,
            "Dealt new game"
        );

        let shared = Arc::new(Mutex::new(state));
        let guard = shared.lock();
        if self
            .games
            .insert(room_code.to_string(), Arc::clone(&shared))
            .is_some()
        {
            debug!(room_code, "Replaced previous game");
        }
        let transitions = derive_game_transitions(None, &GameLifecycleView::of(&guard));
        self.notify(&guard, &transitions, now);
        Ok(project(&guard, None, now))
    }

    /// Viewer-scoped projection, or `None` when the room has no game.
    pub fn get_state(&self, room_code: &str, viewer: Option<&str>) -> Option<GameView> {
        self.inspect(room_code, |state, now| project(state, viewer, now))
    }

    /// Run `f` against a room's state under its lock.
    pub fn inspect<T>(
        &self,
        room_code: &str,
        f: impl FnOnce(&GameState, OffsetDateTime) -> T,
    ) -> Option<T> {
        let shared = self.shared(room_code)?;
        let state = shared.lock();
        Some(f(&state, self.clock.now()))
    }

    /// Play a card. The returned projection shows the acting player's hand.
    pub fn play(
        &self,
        room_code: &str,
        player_id: &str,
        card_id: &str,
    ) -> Result<GameView, DomainError> {
        let (result, view) = self.with_game(room_code, Some(player_id), |state, now| {
            tricks::play_card(state, player_id, card_id, now)
        })?;

        match result.resolution {
            Some(TrickResolution::Thulla { winner, picked_up }) => info!(
                room_code,
                player_id,
                card = %result.card,
                winner = %view.players[winner].id,
                picked_up,
                "Thulla"
            ),
            Some(resolution) => debug!(room_code, player_id, card = %result.card, ?resolution, "Trick closed"),
            None => debug!(room_code, player_id, card = %result.card, "Card played"),
        }
        Ok(view)
    }

    /// Pass the turn on. Anything other than the turn holder is a silent no-op.
    pub fn skip_turn(&self, room_code: &str, player_id: &str) -> Result<GameView, DomainError> {
        let (skipped, view) = self.with_game(room_code, None, |state, now| {
            Ok(turns::skip_turn(state, player_id, now))
        })?;
        if skipped {
            debug!(room_code, player_id, "Turn skipped");
        }
        Ok(view)
    }

    /// Timer path for a lapsed turn. `Ok(None)` when the signal was stale.
    pub fn expire_turn(
        &self,
        room_code: &str,
        player_id: &str,
        turn_seq: u64,
    ) -> Result<Option<GameView>, DomainError> {
        let (expired, view) = self.with_game(room_code, None, |state, now| {
            Ok(turns::expire_turn(state, player_id, turn_seq, now))
        })?;
        Ok(expired.then_some(view))
    }

    pub fn leave_game(&self, room_code: &str, player_id: &str) -> Result<GameView, DomainError> {
        let (left, view) = self.with_game(room_code, None, |state, now| {
            turns::leave_game(state, player_id, now)
        })?;
        if left {
            info!(room_code, player_id, "Player left game");
        }
        Ok(view)
    }

    pub fn legal_moves(&self, room_code: &str, player_id: &str) -> Result<Vec<Card>, DomainError> {
        self.inspect(room_code, |state, _| {
            state
                .require_seat(player_id)
                .map(|seat| tricks::legal_moves(state, seat))
        })
        .unwrap_or_else(|| Err(DomainError::game_not_found(room_code)))
    }

    /// Drop a room's game. Unknown rooms are ignored.
    pub fn reset(&self, room_code: &str) -> bool {
        let Some((_, shared)) = self.games.remove(room_code) else {
            return false;
        };
        let _state = shared.lock();
        self.notify_removed(room_code);
        info!(room_code, "Game reset");
        true
    }

    /// Drop every game untouched for longer than `max_idle`.
    pub fn evict_idle(&self, max_idle: Duration) -> Vec<RoomCode> {
        let now = self.clock.now();
        let candidates: Vec<(RoomCode, SharedGame)> = self
            .games
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect();

        let mut evicted = Vec::new();
        for (room_code, shared) in candidates {
            let state = shared.lock();
            if now - state.last_activity <= max_idle {
                continue;
            }
            if self
                .games
                .remove_if(&room_code, |_, current| Arc::ptr_eq(current, &shared))
                .is_some()
            {
                self.notify_removed(&room_code);
                info!(room_code = %room_code, idle_secs = (now - state.last_activity).whole_seconds(), "Evicted idle game");
                evicted.push(room_code);
            }
        }
        evicted
    }

    pub fn rooms(&self) -> Vec<RoomCode> {
        self.games.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    fn shared(&self, room_code: &str) -> Option<SharedGame> {
        self.games.get(room_code).map(|entry| Arc::clone(entry.value()))
    }

    /// Critical section for every mutation: lock the room, apply `op`, derive
    /// what changed, tell the observers, project the result for `viewer`.
    fn with_game<T>(
        &self,
        room_code: &str,
        viewer: Option<&str>,
        op: impl FnOnce(&mut GameState, OffsetDateTime) -> Result<T, DomainError>,
    ) -> Result<(T, GameView), DomainError> {
        let shared = self
            .shared(room_code)
            .ok_or_else(|| DomainError::game_not_found(room_code))?;
        let mut state = shared.lock();

        // Reset while we waited for the lock.
        let still_current = self
            .games
            .get(room_code)
            .is_some_and(|entry| Arc::ptr_eq(entry.value(), &shared));
        if !still_current {
            return Err(DomainError::game_not_found(room_code));
        }

        let now = self.clock.now();
        let before = GameLifecycleView::of(&state);
        let value = op(&mut state, now).inspect_err(|err| {
            debug!(room_code, code = %err.code(), "Rejected: {err}");
        })?;
        let after = GameLifecycleView::of(&state);

        let transitions = derive_game_transitions(Some(&before), &after);
        if !transitions.is_empty() {
            self.notify(&state, &transitions, now);
        }
        Ok((value, project(&state, viewer, now)))
    }

    fn notify(&self, state: &GameState, transitions: &[GameTransition], now: OffsetDateTime) {
        for transition in transitions {
            match transition {
                GameTransition::GameEnded { bhabhi } => info!(
                    room_code = %state.room_code,
                    bhabhi = bhabhi.map(|seat| state.player_id(seat)),
                    "Game ended"
                ),
                other => debug!(room_code = %state.room_code, transition = ?other, "Game transition"),
            }
        }
        for observer in self.observers.read().iter() {
            observer.game_changed(state, transitions, now);
        }
    }

    fn notify_removed(&self, room_code: &str) {
        for observer in self.observers.read().iter() {
            observer.game_removed(room_code);
        }
    }

    fn next_seed(&self) -> u64 {
        let game_no = self.games_dealt.fetch_add(1, Ordering::Relaxed);
        match self.config.shuffle_seed {
            Some(base) => derive_dealing_seed(base, game_no),
            None => rand::random(),
        }
    }
}
