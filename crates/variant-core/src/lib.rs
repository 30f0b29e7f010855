//! Core types for variant chess.
//!
//! This crate provides the vocabulary shared by the engine:
//! - [`Color`], [`PieceKind`] and [`Piece`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`SquareSet`] for reachability sets
//! - [`Move`] and [`CastleSide`] for move representation
//! - [`Placement`] for board placement text

mod color;
mod mov;
mod piece;
mod placement;
mod square;
mod square_set;

pub use color::Color;
pub use mov::{CastleSide, Move};
pub use piece::{Piece, PieceKind};
pub use placement::{Placement, PlacementError};
pub use square::{File, Rank, Square};
pub use square_set::{SquareSet, SquareSetIter};
