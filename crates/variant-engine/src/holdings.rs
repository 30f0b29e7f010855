//! Capture pools.
//!
//! Each board keeps the pieces captured on it, filed under the captured
//! piece's own color. Who may drop them depends on the game kind: in
//! crazyhouse the capturer drops them recolored, in bughouse the partner
//! board's player of that same color drops them.

use variant_core::{Color, Piece, PieceKind, Placement};

/// Unlimited supply for a bughouse board that has no partner.
pub const UNLIMITED_SUPPLY: [PieceKind; 5] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

/// Pieces captured on one board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Holdings {
    captured: [Vec<Piece>; 2],
}

impl Holdings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pieces of `color` captured on this board, oldest first.
    pub fn captured(&self, color: Color) -> &[Piece] {
        &self.captured[color.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.captured.iter().all(Vec::is_empty)
    }

    /// Files a captured piece under its own color. It stays marked promoted
    /// so that it drops back as a pawn.
    pub fn push(&mut self, piece: Piece) {
        self.captured[piece.color.index()].push(Piece {
            moved: false,
            ..piece
        });
    }

    /// Removes the most recent capture matching `piece` by kind, color and
    /// promotion. Returns false if there is none.
    pub fn remove_latest(&mut self, piece: Piece) -> bool {
        let pool = &mut self.captured[piece.color.index()];
        match pool
            .iter()
            .rposition(|p| p.kind == piece.kind && p.promoted == piece.promoted)
        {
            Some(index) => {
                pool.remove(index);
                true
            }
            None => false,
        }
    }

    /// True if a capture matching `piece` is still pooled.
    pub fn contains(&self, piece: Piece) -> bool {
        self.captured[piece.color.index()]
            .iter()
            .any(|p| p.kind == piece.kind && p.promoted == piece.promoted)
    }

    pub(crate) fn take_at(&mut self, color: Color, index: usize) -> Option<Piece> {
        let pool = &mut self.captured[color.index()];
        (index < pool.len()).then(|| pool.remove(index))
    }

    pub(crate) fn put_back(&mut self, color: Color, index: usize, piece: Piece) {
        let pool = &mut self.captured[color.index()];
        let index = index.min(pool.len());
        pool.insert(index, piece);
    }

    /// Bracketed text of both pools, white captures first.
    pub fn text(&self) -> String {
        let all: Vec<Piece> = self.captured.iter().flatten().copied().collect();
        Placement::holdings_text(&all)
    }
}

/// Index of the pooled piece to use for a drop of `kind`.
///
/// An unpromoted piece of exactly that kind wins; otherwise any piece that
/// drops as `kind` (a promoted piece, for pawns).
pub fn find_piece_to_drop(pool: &[Piece], kind: PieceKind) -> Option<usize> {
    pool.iter()
        .position(|p| p.kind == kind && p.drop_kind() == kind)
        .or_else(|| pool.iter().position(|p| p.drop_kind() == kind))
}

/// Distinct kinds that can be dropped from `pool`, in first-seen order.
pub fn droppable_kinds(pool: &[Piece]) -> Vec<PieceKind> {
    let mut kinds = Vec::new();
    for piece in pool {
        let kind = piece.drop_kind();
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    kinds
}
