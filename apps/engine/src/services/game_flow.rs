//! Game flow service - wires the registry to the viewer hub and the turn timer.
//!
//! Owns the two background loops: one turns lapsed countdowns into
//! `expire_turn` calls, the other sweeps idle rooms when an idle TTL is set.

use std::sync::Arc;

use time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::domain::player_view::project;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::realtime::hub::{Subscription, ViewerHub};
use crate::services::games::GameRegistry;
use crate::services::turn_timer::{TurnExpired, TurnTimer};

pub struct GameService {
    registry: Arc<GameRegistry>,
    hub: Arc<ViewerHub>,
    timer: Arc<TurnTimer>,
    shutdown: CancellationToken,
}

impl GameService {
    /// Build the service and spawn its background loops on the current tokio
    /// runtime.
    pub fn spawn(config: EngineConfig, clock: Arc<dyn Clock>) -> Result<Arc<Self>, AppError> {
        let runtime = Handle::try_current().map_err(|e| {
            AppError::internal(format!("game service needs a tokio runtime: {e}"))
        })?;

        let (expired_tx, expired_rx) = mpsc::unbounded_channel();
        let registry = Arc::new(GameRegistry::new(config.clone(), clock));
        let hub = Arc::new(ViewerHub::new());
        let timer = Arc::new(TurnTimer::new(runtime.clone(), expired_tx));
        registry.add_observer(timer.clone());
        registry.add_observer(hub.clone());

        let shutdown = CancellationToken::new();
        runtime.spawn(run_expiry_loop(
            Arc::clone(&registry),
            Arc::clone(&timer),
            expired_rx,
            shutdown.clone(),
        ));
        if let Some(ttl) = config.idle_ttl {
            runtime.spawn(run_idle_sweeper(
                Arc::clone(&registry),
                ttl,
                config.sweep_interval,
                shutdown.clone(),
            ));
        }

        info!(
            turn_secs = config.turn_duration.whole_seconds(),
            idle_ttl_secs = config.idle_ttl.map(|d| d.whole_seconds()),
            seeded = config.shuffle_seed.is_some(),
            "Game service started"
        );

        Ok(Arc::new(Self {
            registry,
            hub,
            timer,
            shutdown,
        }))
    }

    pub fn registry(&self) -> &Arc<GameRegistry> {
        &self.registry
    }

    pub fn hub(&self) -> &Arc<ViewerHub> {
        &self.hub
    }

    pub fn timer(&self) -> &Arc<TurnTimer> {
        &self.timer
    }

    /// Subscribe `viewer` to a room's feed. The current projection is queued
    /// first, under the room lock, so no change can slip in between.
    pub fn subscribe(
        &self,
        room_code: &str,
        viewer: Option<&str>,
    ) -> Result<Subscription, DomainError> {
        self.registry
            .inspect(room_code, |state, now| {
                let subscription = self.hub.subscribe(room_code, viewer);
                self.hub
                    .send_to(room_code, subscription.token, project(state, viewer, now));
                subscription
            })
            .ok_or_else(|| DomainError::game_not_found(room_code))
    }

    pub fn unsubscribe(&self, subscription: &Subscription) {
        self.hub
            .unsubscribe(&subscription.room_code, subscription.token);
    }

    /// Stop the background loops. Pending countdowns still fire but are no
    /// longer acted on.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

async fn run_expiry_loop(
    registry: Arc<GameRegistry>,
    timer: Arc<TurnTimer>,
    mut expired_rx: UnboundedReceiver<TurnExpired>,
    shutdown: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            next = expired_rx.recv() => {
                let Some(expired) = next else { break };
                match registry.expire_turn(&expired.room_code, &expired.player_id, expired.turn_seq) {
                    Ok(Some(_)) => info!(
                        room_code = %expired.room_code,
                        player_id = %expired.player_id,
                        turn_seq = expired.turn_seq,
                        "Turn timed out, skipped"
                    ),
                    Ok(None) => rearm_if_early(&registry, &timer, expired),
                    Err(err) => debug!(room_code = %expired.room_code, error = %err, "Turn timer for missing game"),
                }
            }
        }
    }
    debug!("Turn expiry loop stopped");
}

/// An ignored signal whose turn is still current fired before the engine
/// clock reached the deadline; count down the remainder again.
fn rearm_if_early(registry: &GameRegistry, timer: &TurnTimer, expired: TurnExpired) {
    let still_current = registry
        .inspect(&expired.room_code, |state, now| {
            let holder = state.current_turn.map(|seat| state.player_id(seat));
            match state.turn_deadline {
                Some(deadline)
                    if state.status.is_live()
                        && state.turn_seq == expired.turn_seq
                        && holder == Some(expired.player_id.as_str()) =>
                {
                    let remaining =
                        std::time::Duration::try_from(deadline - now).unwrap_or_default();
                    // Armed under the room lock so a concurrent turn change re-arms after us.
                    timer.arm(expired.clone(), remaining);
                    Some(remaining)
                }
                _ => None,
            }
        })
        .flatten();

    match still_current {
        Some(remaining) => debug!(
            room_code = %expired.room_code,
            turn_seq = expired.turn_seq,
            remaining_ms = remaining.as_millis() as u64,
            "Turn timer fired early, re-armed"
        ),
        None => debug!(
            room_code = %expired.room_code,
            turn_seq = expired.turn_seq,
            "Stale turn timer ignored"
        ),
    }
}

async fn run_idle_sweeper(
    registry: Arc<GameRegistry>,
    ttl: Duration,
    every: Duration,
    shutdown: CancellationToken,
) {
    let period = std::time::Duration::try_from(every)
        .unwrap_or(std::time::Duration::from_secs(60))
        .max(std::time::Duration::from_secs(1));
    let mut ticker = tokio::time::interval(period);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {
                let evicted = registry.evict_idle(ttl);
                if !evicted.is_empty() {
                    info!(count = evicted.len(), rooms = ?evicted, "Idle sweep evicted games");
                }
            }
        }
    }
    debug!("Idle sweeper stopped");
}
