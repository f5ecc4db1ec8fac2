//! Error codes for the Bhabhi engine.
//!
//! This module defines every error code the engine hands to its callers.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that the
//! transport layer puts on the wire.

use core::fmt;

/// Centralized error codes for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Room / seating
    /// No game is running for the room
    GameNotFound,
    /// The game has already ended
    GameNotActive,
    /// The player is not seated in this game
    PlayerNotInGame,
    /// Fewer than the minimum number of seated players
    NotEnoughPlayers,
    /// More than the maximum number of seated players
    TooManyPlayers,

    // Play validation
    /// Someone else holds the turn
    NotYourTurn,
    /// The seat has finished, left, or lost
    PlayerNotActive,
    /// Card not in hand
    CardNotInHand,
    /// Must follow suit
    MustFollowSuit,

    // System
    /// Configuration error
    ConfigError,
    /// Internal error
    Internal,
}

impl ErrorCode {
    /// Get the canonical string representation of this error code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::GameNotActive => "GAME_NOT_ACTIVE",
            Self::PlayerNotInGame => "PLAYER_NOT_IN_GAME",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::TooManyPlayers => "TOO_MANY_PLAYERS",
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::PlayerNotActive => "PLAYER_NOT_ACTIVE",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::MustFollowSuit => "MUST_FOLLOW_SUIT",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
