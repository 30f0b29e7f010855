//! Error types for setting up and playing games.

use thiserror::Error;
use variant_core::{Color, Move, PieceKind, PlacementError, Square};

/// A position that cannot start a game.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    /// King-safety rules need exactly one king per side.
    #[error("{color} has {count} kings, expected exactly one")]
    KingCount { color: Color, count: usize },

    #[error("pawn on the last rank at {0}")]
    PawnOnLastRank(Square),

    /// The side that just moved would still be in check.
    #[error("the side not to move is in check")]
    OpponentInCheck,

    #[error("invalid placement: {0}")]
    Placement(#[from] PlacementError),
}

/// Refusal of a move or takeback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move: {0}")]
    IllegalMove(Move),

    #[error("game has already ended")]
    GameOver,

    #[error("game is paused")]
    Paused,

    #[error("no move to take back")]
    NoMoveToTakeBack,

    /// The captured piece has already been dropped on the partner board.
    #[error("captured piece has already been dropped")]
    CaptureAlreadyDropped,

    #[error("no {0} available to drop")]
    NotInPool(PieceKind),
}

/// Errors that can occur when loading a game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The values parse but do not make sense together.
    #[error("Invalid config: {0}")]
    Invalid(String),
}
