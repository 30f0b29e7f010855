//! Position analysis and move application for chess variants.
//!
//! This crate provides:
//! - [`Board`] - piece slots, the en-passant pawn and castling geometry
//! - [`analyze`] and [`MoveInfo`] - every legal move of a position, with
//!   check, pin and mate details
//! - [`Game`] - move application, takeback and history for one game
//! - [`BughouseTable`] - two games whose captures feed each other
//! - [`GameConfig`] - TOML game settings
//!
//! Supported kinds are regular chess, Fischer random, suicide, grasshopper,
//! mini-Capablanca, free play, crazyhouse and bughouse. See [`GameKind`].
//!
//! # Architecture
//!
//! Analysis is a pure function of a board, the side to move and the kind.
//! A [`Game`] seals one analysis per position, with the fifty-move counter
//! and repetition fingerprint attached, and applies only moves that
//! analysis listed. Takeback restores the exact prior state from the undo
//! record kept with each ply.
//!
//! # Example
//!
//! ```
//! use variant_core::{PieceKind, Square};
//! use variant_engine::{Game, GameKind};
//!
//! let mut game = Game::new(GameKind::Regular);
//! assert_eq!(game.valid_moves().len(), 20);
//!
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! let mv = game.find_move(e2, e4, None).unwrap();
//! game.apply_move(mv).unwrap();
//! assert!(game.piece_at(e4).is_some_and(|p| p.is(PieceKind::Pawn)));
//!
//! game.takeback().unwrap();
//! assert!(game.piece_at(e4).is_none());
//! ```

pub mod analysis;
mod board;
pub mod bughouse;
pub mod config;
pub mod draw;
mod error;
pub mod game;
pub mod holdings;
pub mod movement;
pub mod perft;
pub mod pins;
pub mod rules;

pub use analysis::{analyze, CastlingSquares, MoveInfo};
pub use board::{Board, CastlingFiles};
pub use bughouse::{BoardId, BughouseTable};
pub use config::GameConfig;
pub use error::{ConfigError, MoveError, SetupError};
pub use game::{Game, Setup};
pub use holdings::Holdings;
pub use pins::Pin;
pub use rules::{DrawReason, DrawRules, GameKind, GameResult, RuleSet, WinReason};
