//! The 8x8 board.

use variant_core::{
    Color, File, Piece, PieceKind, Placement, PlacementError, Rank, Square, SquareSet,
};

/// Files the castling pieces start on.
///
/// Fixed at e/a/h except under Fischer-random rules, where they are read
/// off the starting back rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingFiles {
    pub king: File,
    pub left_rook: File,
    pub right_rook: File,
}

impl Default for CastlingFiles {
    fn default() -> Self {
        CastlingFiles {
            king: File::E,
            left_rook: File::A,
            right_rook: File::H,
        }
    }
}

/// Board state: piece slots, the en-passant pawn, and castling geometry.
///
/// Kings are found by scanning, so there is no cached king square to go
/// stale across a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    en_passant: Option<Square>,
    castling: CastlingFiles,
}

impl Board {
    /// An empty board with standard castling geometry.
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
            en_passant: None,
            castling: CastlingFiles::default(),
        }
    }

    /// Builds a board from parsed placement text. Holdings are ignored.
    pub fn from_placement(placement: &Placement) -> Self {
        Board {
            squares: placement.squares,
            ..Board::empty()
        }
    }

    /// Parses placement text into a board.
    pub fn parse(text: &str) -> Result<Self, PlacementError> {
        Ok(Self::from_placement(&Placement::parse(text)?))
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize]
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.index() as usize].is_none()
    }

    /// Puts `piece` on `sq`, returning whatever stood there.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.squares[sq.index() as usize].replace(piece)
    }

    /// Empties `sq`, returning whatever stood there.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize].take()
    }

    /// Marks the piece on `sq` as having moved, which removes its castling
    /// eligibility.
    pub fn mark_moved(&mut self, sq: Square) {
        if let Some(piece) = self.squares[sq.index() as usize].as_mut() {
            piece.moved = true;
        }
    }

    /// All pieces with their squares, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Pieces of one color with their squares.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    pub fn occupied(&self) -> SquareSet {
        self.pieces().map(|(sq, _)| sq).collect()
    }

    pub fn occupied_by(&self, color: Color) -> SquareSet {
        self.pieces_of(color).map(|(sq, _)| sq).collect()
    }

    /// The first king of `color`, scanning from a1.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.is(PieceKind::King))
            .map(|(sq, _)| sq)
    }

    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.pieces_of(color).filter(|(_, p)| p.is(kind)).count()
    }

    /// The pawn that advanced two squares on the previous ply.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn set_en_passant(&mut self, pawn: Option<Square>) {
        self.en_passant = pawn;
    }

    #[inline]
    pub fn castling_files(&self) -> CastlingFiles {
        self.castling
    }

    #[inline]
    pub fn set_castling_files(&mut self, files: CastlingFiles) {
        self.castling = files;
    }

    /// Reads Fischer-random castling geometry off White's back rank: the
    /// king file and the outermost rook on either side of it.
    pub fn detect_castling_files(&self) -> CastlingFiles {
        let rank = Color::White.back_rank();
        let holds = |file: File, kind: PieceKind| {
            self.piece_at(Square::new(file, rank))
                .is_some_and(|p| p.color == Color::White && p.is(kind))
        };

        let Some(king) = File::ALL
            .into_iter()
            .find(|&f| holds(f, PieceKind::King))
        else {
            return CastlingFiles::default();
        };
        let left = File::ALL
            .into_iter()
            .find(|&f| f < king && holds(f, PieceKind::Rook));
        let right = File::ALL
            .into_iter()
            .rev()
            .find(|&f| f > king && holds(f, PieceKind::Rook));
        match (left, right) {
            (Some(left_rook), Some(right_rook)) => CastlingFiles {
                king,
                left_rook,
                right_rook,
            },
            _ => CastlingFiles::default(),
        }
    }

    /// Board part of the placement text.
    pub fn placement_text(&self, mark_promoted: bool) -> String {
        Placement::board_text(&self.squares, mark_promoted)
    }

    /// The first pawn found on rank 1 or 8, if any.
    pub fn pawn_on_last_rank(&self) -> Option<Square> {
        self.pieces()
            .find(|(sq, p)| p.is(PieceKind::Pawn) && matches!(sq.rank(), Rank::R1 | Rank::R8))
            .map(|(sq, _)| sq)
    }
}

impl Default for Board {
    /// The standard starting position.
    fn default() -> Self {
        Board::parse(Placement::STANDARD).unwrap_or_else(|_| Board::empty())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in Rank::ALL.iter().rev() {
            write!(f, "{} ", rank)?;
            for file in File::ALL {
                match self.piece_at(Square::new(file, *rank)) {
                    Some(piece) => write!(f, "{} ", piece.to_fen_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
