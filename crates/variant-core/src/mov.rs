//! Move representation.

use crate::{Piece, PieceKind, Square};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Which rook a castling move uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// The rook on the left-rook file (O-O-O).
    QueenSide,
    /// The rook on the right-rook file (O-O).
    KingSide,
}

/// A move as generated by the analyzer or played into history.
///
/// A move whose `from` equals its `to` is a drop. Identity is the triple
/// (from, to, extra kind): two moves compare equal when they describe the
/// same request, whatever annotations the generator attached.
#[derive(Clone, Copy)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<Piece>,
    extra: Option<PieceKind>,
    en_passant: bool,
    castle: Option<CastleSide>,
}

impl Move {
    /// A plain board move of `piece`.
    #[inline]
    pub const fn new(piece: Piece, from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            piece,
            captured: None,
            extra: None,
            en_passant: false,
            castle: None,
        }
    }

    /// Drops `piece` on `to`. Use an `AnyDrop` piece for the generic drop.
    #[inline]
    pub const fn drop(piece: Piece, to: Square) -> Self {
        let extra = match piece.kind {
            PieceKind::AnyDrop => None,
            kind => Some(kind),
        };
        Move {
            from: to,
            to,
            piece,
            captured: None,
            extra,
            en_passant: false,
            castle: None,
        }
    }

    /// Same move, capturing `captured`.
    #[inline]
    pub const fn capturing(mut self, captured: Piece) -> Self {
        self.captured = Some(captured);
        self
    }

    /// Same move, promoting to `kind`.
    #[inline]
    pub const fn promoting(mut self, kind: PieceKind) -> Self {
        self.extra = Some(kind);
        self
    }

    /// Same move, flagged as an en-passant capture of `pawn`.
    #[inline]
    pub const fn en_passant(mut self, pawn: Piece) -> Self {
        self.captured = Some(pawn);
        self.en_passant = true;
        self
    }

    /// Same move, flagged as castling.
    #[inline]
    pub const fn castling(mut self, side: CastleSide) -> Self {
        self.castle = Some(side);
        self
    }

    #[inline]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// The moving piece, or the piece being dropped.
    #[inline]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    #[inline]
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }

    /// Promotion target or dropped kind.
    #[inline]
    pub const fn extra(&self) -> Option<PieceKind> {
        self.extra
    }

    #[inline]
    pub const fn is_drop(&self) -> bool {
        self.from.index() == self.to.index()
    }

    /// A drop of an unspecified pooled piece.
    #[inline]
    pub const fn is_any_drop(&self) -> bool {
        self.is_drop() && self.piece.is(PieceKind::AnyDrop)
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        self.en_passant
    }

    #[inline]
    pub const fn castle(&self) -> Option<CastleSide> {
        self.castle
    }

    /// Coordinate notation: `e2e4`, `e7e8q`, `N@f3`, `*@f3`.
    pub fn to_uci(&self) -> String {
        if self.is_drop() {
            let letter = match self.extra {
                Some(kind) => kind.letter().to_ascii_uppercase(),
                None => '*',
            };
            return format!("{}@{}", letter, self.to);
        }
        match self.extra {
            Some(kind) => format!("{}{}{}", self.from, self.to, kind.letter()),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.extra == other.extra
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.extra.hash(state);
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
