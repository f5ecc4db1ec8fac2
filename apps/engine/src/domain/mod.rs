//! Domain layer: pure game logic types and helpers.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod game_transition;
pub mod player_view;
pub mod rules;
pub mod seed_derivation;
pub mod state;
pub mod tricks;
pub mod turns;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props_legality;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use cards_logic::{best_of_suit, hand_has_suit};
pub use cards_types::{Card, Rank, Suit};
pub use dealing::deal_game;
pub use game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
pub use player_view::{project, GameView, SeatView, TrickEntryView};
pub use seed_derivation::derive_dealing_seed;
pub use state::{GameState, GameStatus, PlayerId, RoomCode, Seat, SeatStatus, SeatedPlayer};
pub use tricks::{legal_moves, play_card, PlayCardResult, TrickResolution};
pub use turns::{expire_turn, leave_game, skip_turn};
