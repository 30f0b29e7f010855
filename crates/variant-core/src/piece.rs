//! Piece kinds and piece values.

use crate::Color;
use serde::{Deserialize, Serialize};

/// Every kind of piece the engine knows about.
///
/// `AnyDrop` never stands on the board. It is the placeholder carried by a
/// generated drop move meaning "any piece the mover holds".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
    Grasshopper = 6,
    Archbishop = 7,
    Chancellor = 8,
    AnyDrop = 9,
}

impl PieceKind {
    /// Returns the index of this kind (0-9).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lower-case letter used in placement text.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
            PieceKind::Grasshopper => 'g',
            PieceKind::Archbishop => 'a',
            PieceKind::Chancellor => 'c',
            PieceKind::AnyDrop => '*',
        }
    }

    /// Parses a letter of either case into a kind.
    pub fn from_letter(c: char) -> Option<Self> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            'g' => PieceKind::Grasshopper,
            'a' => PieceKind::Archbishop,
            'c' => PieceKind::Chancellor,
            _ => return None,
        };
        Some(kind)
    }


    /// Slides along ranks and files.
    #[inline]
    pub const fn slides_orthogonally(self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::Queen | PieceKind::Chancellor)
    }

    /// Slides along diagonals.
    #[inline]
    pub const fn slides_diagonally(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Queen | PieceKind::Archbishop)
    }

    /// Has a knight jump, alone or as a component.
    #[inline]
    pub const fn jumps_like_knight(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Archbishop | PieceKind::Chancellor
        )
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
            PieceKind::Grasshopper => "Grasshopper",
            PieceKind::Archbishop => "Archbishop",
            PieceKind::Chancellor => "Chancellor",
            PieceKind::AnyDrop => "Any",
        };
        write!(f, "{}", name)
    }
}

/// A piece as it stands on the board or waits in a capture pool.
///
/// Pieces are plain values: the board slot holding one is its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    /// Has left its starting square at least once.
    pub moved: bool,
    /// Reached its kind by pawn promotion.
    pub promoted: bool,
}

impl Piece {
    /// A fresh, unmoved piece.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece {
            kind,
            color,
            moved: false,
            promoted: false,
        }
    }

    /// Placement letter: upper case for White.
    pub const fn to_fen_char(self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a placement letter into an unmoved piece.
    pub fn from_fen_char(c: char) -> Option<Self> {
        let kind = PieceKind::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }

    /// The kind this piece becomes when dropped from a pool.
    ///
    /// Promoted pieces revert to pawns.
    #[inline]
    pub const fn drop_kind(self) -> PieceKind {
        if self.promoted {
            PieceKind::Pawn
        } else {
            self.kind
        }
    }

    #[inline]
    pub const fn is(self, kind: PieceKind) -> bool {
        self.kind as u8 == kind as u8
    }
}
