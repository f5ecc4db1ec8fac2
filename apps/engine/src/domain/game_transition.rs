use crate::domain::state::{GameState, GameStatus, Seat, SeatStatus};

/// The slice of a `GameState` that lifecycle edges are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLifecycleView {
    pub status: GameStatus,
    pub turn: Option<Seat>,
    pub turn_seq: u64,
    pub trick_number: u32,
    pub seat_statuses: Vec<SeatStatus>,
}

impl GameLifecycleView {
    pub fn of(state: &GameState) -> Self {
        Self {
            status: state.status,
            turn: state.current_turn,
            turn_seq: state.turn_seq,
            trick_number: state.trick_number,
            seat_statuses: state.seats.iter().map(|s| s.status).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    /// Edge-triggered: a match was dealt.
    GameStarted,

    /// Edge-triggered: trick `trick_number` closed.
    TrickCompleted { trick_number: u32 },

    /// Edge-triggered: a seat emptied its hand.
    SeatFinished { seat: Seat },

    /// Explicit: a player walked away.
    SeatLeft { seat: Seat },

    /// Edge-triggered: Playing -> Shootout
    ShootoutStarted,

    /// Edge-triggered: live -> Ended
    GameEnded { bhabhi: Option<Seat> },

    /// Edge-triggered: a new turn was handed out, possibly to the same seat.
    TurnBecame { seat: Seat, turn_seq: u64 },
}

/// Derive domain transitions from before/after lifecycle state. `before` is
/// `None` for a freshly dealt match.
pub fn derive_game_transitions(
    before: Option<&GameLifecycleView>,
    after: &GameLifecycleView,
) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    let Some(before) = before else {
        transitions.push(GameTransition::GameStarted);
        if let Some(seat) = after.turn {
            transitions.push(GameTransition::TurnBecame {
                seat,
                turn_seq: after.turn_seq,
            });
        }
        return transitions;
    };

    // 1. Trick closed
    if after.trick_number > before.trick_number {
        transitions.push(GameTransition::TrickCompleted {
            trick_number: before.trick_number,
        });
    }

    // 2. Seats leaving active play
    for (seat, (was, now)) in before
        .seat_statuses
        .iter()
        .zip(&after.seat_statuses)
        .enumerate()
    {
        if was == now {
            continue;
        }
        match now {
            SeatStatus::Finished => transitions.push(GameTransition::SeatFinished { seat }),
            SeatStatus::Left => transitions.push(GameTransition::SeatLeft { seat }),
            SeatStatus::Active | SeatStatus::Bhabhi => {}
        }
    }

    // 3. Shootout
    if before.status != GameStatus::Shootout && after.status == GameStatus::Shootout {
        transitions.push(GameTransition::ShootoutStarted);
    }

    // 4. Game end
    if before.status.is_live() && after.status == GameStatus::Ended {
        let bhabhi = after
            .seat_statuses
            .iter()
            .position(|s| *s == SeatStatus::Bhabhi);
        transitions.push(GameTransition::GameEnded { bhabhi });
    }

    // 5. Turn handed out
    if let Some(seat) = after.turn {
        if after.turn_seq != before.turn_seq {
            transitions.push(GameTransition::TurnBecame {
                seat,
                turn_seq: after.turn_seq,
            });
        }
    }

    transitions
}
