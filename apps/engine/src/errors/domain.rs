//! Domain-level error type returned by every engine operation.
//!
//! This error type is transport-agnostic. Callers translate it into HTTP
//! statuses or event payloads using [`DomainError::code`].

use thiserror::Error;

use crate::domain::state::{PlayerId, RoomCode};
use crate::errors::ErrorCode;

/// Closed set of engine rejections. Validation runs before any mutation, so
/// an `Err` always means the game was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("no game for room {room_code}")]
    GameNotFound { room_code: RoomCode },
    #[error("game is not active")]
    GameNotActive,
    #[error("player {player_id} is not in this game")]
    PlayerNotInGame { player_id: PlayerId },
    #[error("not your turn")]
    NotYourTurn,
    #[error("player is not active")]
    PlayerNotActive,
    #[error("card {card_id} not in hand")]
    CardNotInHand { card_id: String },
    #[error("must follow suit")]
    MustFollowSuit,
    #[error("not enough players: {count}")]
    NotEnoughPlayers { count: usize },
    #[error("too many players: {count}")]
    TooManyPlayers { count: usize },
}

impl DomainError {
    pub fn game_not_found(room_code: impl Into<RoomCode>) -> Self {
        Self::GameNotFound {
            room_code: room_code.into(),
        }
    }

    pub fn player_not_in_game(player_id: impl Into<PlayerId>) -> Self {
        Self::PlayerNotInGame {
            player_id: player_id.into(),
        }
    }

    pub fn card_not_in_hand(card_id: impl Into<String>) -> Self {
        Self::CardNotInHand {
            card_id: card_id.into(),
        }
    }

    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::GameNotFound { .. } => ErrorCode::GameNotFound,
            Self::GameNotActive => ErrorCode::GameNotActive,
            Self::PlayerNotInGame { .. } => ErrorCode::PlayerNotInGame,
            Self::NotYourTurn => ErrorCode::NotYourTurn,
            Self::PlayerNotActive => ErrorCode::PlayerNotActive,
            Self::CardNotInHand { .. } => ErrorCode::CardNotInHand,
            Self::MustFollowSuit => ErrorCode::MustFollowSuit,
            Self::NotEnoughPlayers { .. } => ErrorCode::NotEnoughPlayers,
            Self::TooManyPlayers { .. } => ErrorCode::TooManyPlayers,
        }
    }
}
