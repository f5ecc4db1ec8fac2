pub mod game_flow;
pub mod games;
pub mod observer;
pub mod turn_timer;

pub use game_flow::GameService;
pub use games::GameRegistry;
pub use observer::GameObserver;
pub use turn_timer::{TurnExpired, TurnTimer};
