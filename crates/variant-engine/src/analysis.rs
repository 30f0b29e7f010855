//! Legality analysis.
//!
//! [`analyze`] runs once per ply and produces a [`MoveInfo`]: check state,
//! pins, reachability and the full list of legal moves. Pins are found in
//! their own pass before any move is generated, and the board is never
//! touched; every "what if" is played on a scratch copy.
//!
//! Most moves are decided without playing them out. Three cases are
//! simulated in full instead: en-passant captures (both pawns leave the
//! rank at once), any position where the opponent owns a grasshopper
//! (a moved or dropped piece can become a hurdle next to the king), and
//! checks delivered by a grasshopper.

use crate::board::{Board, CastlingFiles};
use crate::movement::{attackers, between, en_passant_target, is_attacked, reachable};
use crate::pins::{find_pins, Pin};
use crate::rules::{GameKind, RuleSet};
use variant_core::{CastleSide, Color, File, Move, Piece, PieceKind, Rank, Square, SquareSet};

/// The analysis of one position, sealed after the ply it describes.
#[derive(Debug, Clone)]
pub struct MoveInfo {
    side_to_move: Color,
    check: bool,
    double_check: bool,
    checkmate: bool,
    stalemate: bool,
    moves: Vec<Move>,
    checkers: Vec<Square>,
    pins: Vec<Pin>,
    reach: [SquareSet; 64],
    fifty_move_counter: u32,
    fingerprint: String,
    enough_material: [bool; 2],
}

impl MoveInfo {
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.check
    }

    #[inline]
    pub fn is_double_check(&self) -> bool {
        self.double_check
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.stalemate
    }

    /// Legal moves in generation order. Drops of an unspecified pooled piece
    /// appear once per square as `AnyDrop` moves.
    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Squares of the pieces giving check, non-grasshoppers first.
    #[inline]
    pub fn checkers(&self) -> &[Square] {
        &self.checkers
    }

    #[inline]
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// The pin on the piece standing on `sq`, if it is pinned.
    pub fn pin(&self, sq: Square) -> Option<&Pin> {
        self.pins.iter().find(|pin| pin.pinned == sq)
    }

    /// Pseudo-legal reach of the piece on `sq` in this position.
    #[inline]
    pub fn reachable_from(&self, sq: Square) -> SquareSet {
        self.reach[sq.index() as usize]
    }

    /// Half-moves since the last pawn move or capture.
    #[inline]
    pub fn fifty_move_counter(&self) -> u32 {
        self.fifty_move_counter
    }

    /// Text identifying the position for repetition counting.
    #[inline]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    #[inline]
    pub fn has_enough_material(&self, color: Color) -> bool {
        self.enough_material[color.index()]
    }

    /// The listed move matching `from`, `to` and promotion or drop kind.
    pub fn find(&self, from: Square, to: Square, extra: Option<PieceKind>) -> Option<Move> {
        self.moves
            .iter()
            .copied()
            .find(|m| m.from() == from && m.to() == to && m.extra() == extra)
    }

    pub fn contains(&self, mv: &Move) -> bool {
        self.moves.contains(mv)
    }

    pub(crate) fn seal(
        mut self,
        fifty_move_counter: u32,
        fingerprint: String,
        enough_material: [bool; 2],
    ) -> Self {
        self.fifty_move_counter = fifty_move_counter;
        self.fingerprint = fingerprint;
        self.enough_material = enough_material;
        self
    }
}

/// Start and end squares of king and rook for one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingSquares {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

impl CastlingSquares {
    /// The king ends on c or g and the rook next to it on d or f, whatever
    /// files they started on.
    pub fn new(files: CastlingFiles, color: Color, side: CastleSide) -> Self {
        let rank = color.back_rank();
        let (rook, king_to, rook_to) = match side {
            CastleSide::QueenSide => (files.left_rook, File::C, File::D),
            CastleSide::KingSide => (files.right_rook, File::G, File::F),
        };
        CastlingSquares {
            king_from: Square::new(files.king, rank),
            king_to: Square::new(king_to, rank),
            rook_from: Square::new(rook, rank),
            rook_to: Square::new(rook_to, rank),
        }
    }
}

/// The board after `mv`, exact in occupancy. Promotions are not applied.
pub(crate) fn scratch_after(board: &Board, mv: &Move) -> Board {
    let mut scratch = board.clone();
    if mv.is_drop() {
        scratch.set(mv.to(), mv.piece());
    } else if let Some(side) = mv.castle() {
        let squares = CastlingSquares::new(board.castling_files(), mv.piece().color, side);
        let king = scratch.take(squares.king_from);
        let rook = scratch.take(squares.rook_from);
        if let Some(king) = king {
            scratch.set(squares.king_to, king);
        }
        if let Some(rook) = rook {
            scratch.set(squares.rook_to, rook);
        }
    } else {
        if mv.is_en_passant() {
            if let Some(victim) = board.en_passant() {
                scratch.take(victim);
            }
        }
        if let Some(piece) = scratch.take(mv.from()) {
            scratch.set(mv.to(), piece);
        }
    }
    scratch
}

/// Analyzes the position with `side` to move.
///
/// `drop_kinds` lists the kinds `side` could drop right now; it is ignored
/// unless the rule-set allows drops.
pub fn analyze(board: &Board, side: Color, kind: GameKind, drop_kinds: &[PieceKind]) -> MoveInfo {
    let rules = kind.rule_set();
    let them = side.opposite();

    let mut reach = [SquareSet::EMPTY; 64];
    for (sq, _) in board.pieces() {
        reach[sq.index() as usize] = reachable(board, sq);
    }

    let king = if rules.king_safety() {
        board.king_square(side)
    } else {
        None
    };
    let (pins, checkers) = match king {
        Some(king) => {
            let mut checkers = attackers(board, king, them);
            checkers.sort_by_key(|&sq| {
                board
                    .piece_at(sq)
                    .is_some_and(|p| p.is(PieceKind::Grasshopper))
            });
            (find_pins(board, king, side), checkers)
        }
        None => (Vec::new(), Vec::new()),
    };

    let mut generator = Generator {
        board,
        side,
        kind,
        rules,
        king,
        pins: &pins,
        reach: &reach,
        drop_kinds: if rules.allows_drops() { drop_kinds } else { &[] },
        moves: Vec::new(),
    };

    let mut hopping_check = false;
    match king {
        Some(king) if !checkers.is_empty() => {
            hopping_check = generator.check_responses(king, &checkers);
        }
        _ => generator.all_moves(),
    }

    let opponent_hops = board
        .pieces_of(them)
        .any(|(_, p)| p.is(PieceKind::Grasshopper));
    let simulate_all = king.is_some() && (hopping_check || opponent_hops);
    let mut moves = std::mem::take(&mut generator.moves);
    moves.retain(|mv| !(simulate_all || mv.is_en_passant()) || generator.leaves_king_safe(mv));

    if rules.captures_forced() && moves.iter().any(Move::is_capture) {
        moves.retain(Move::is_capture);
    }

    let check = !checkers.is_empty();
    tracing::trace!(
        side = %side,
        moves = moves.len(),
        check,
        pins = pins.len(),
        "analyzed position"
    );

    MoveInfo {
        side_to_move: side,
        check,
        double_check: checkers.len() > 1,
        checkmate: check && moves.is_empty(),
        stalemate: !check && moves.is_empty(),
        moves,
        checkers,
        pins,
        reach,
        fifty_move_counter: 0,
        fingerprint: String::new(),
        enough_material: [true; 2],
    }
}

struct Generator<'a> {
    board: &'a Board,
    side: Color,
    kind: GameKind,
    rules: RuleSet,
    /// Only set when the rule-set protects the king.
    king: Option<Square>,
    pins: &'a [Pin],
    reach: &'a [SquareSet; 64],
    drop_kinds: &'a [PieceKind],
    moves: Vec<Move>,
}

impl Generator<'_> {
    fn pin_of(&self, sq: Square) -> Option<&Pin> {
        self.pins.iter().find(|pin| pin.pinned == sq)
    }

    #[inline]
    fn reach_of(&self, sq: Square) -> SquareSet {
        self.reach[sq.index() as usize]
    }

    fn can_drop_on(&self, sq: Square) -> bool {
        self.board.is_empty(sq)
            && self
                .drop_kinds
                .iter()
                .any(|&kind| kind != PieceKind::Pawn || !matches!(sq.rank(), Rank::R1 | Rank::R8))
    }

    fn push_drop(&mut self, to: Square) {
        if self.can_drop_on(to) {
            self.moves
                .push(Move::drop(Piece::new(PieceKind::AnyDrop, self.side), to));
        }
    }

    /// Records a board move, expanding promotions and tagging captures.
    fn push(&mut self, from: Square, to: Square) {
        let Some(piece) = self.board.piece_at(from) else {
            return;
        };
        let mut mv = Move::new(piece, from, to);
        match self.board.piece_at(to) {
            Some(target) => mv = mv.capturing(target),
            None if piece.is(PieceKind::Pawn) && from.file() != to.file() => {
                match self.board.en_passant().and_then(|sq| self.board.piece_at(sq)) {
                    Some(pawn) => mv = mv.en_passant(pawn),
                    None => return,
                }
            }
            None => {}
        }
        if piece.is(PieceKind::Pawn) && to.rank() == piece.color.promotion_rank() {
            for &kind in self.kind.promotion_kinds() {
                self.moves.push(mv.promoting(kind));
            }
        } else {
            self.moves.push(mv);
        }
    }

    /// Relocation test for a king step.
    fn king_step_safe(&self, from: Square, to: Square) -> bool {
        if self.king.is_none() {
            return true;
        }
        let mut scratch = self.board.clone();
        if let Some(king) = scratch.take(from) {
            scratch.set(to, king);
        }
        !is_attacked(&scratch, to, self.side.opposite())
    }

    /// Full simulation: play `mv` on a scratch board and test the king.
    fn leaves_king_safe(&self, mv: &Move) -> bool {
        let Some(king) = self.king else {
            return true;
        };
        let king = if !mv.is_drop() && mv.from() == king {
            match mv.castle() {
                Some(side) => {
                    CastlingSquares::new(self.board.castling_files(), self.side, side).king_to
                }
                None => mv.to(),
            }
        } else {
            king
        };
        let scratch = scratch_after(self.board, mv);
        !is_attacked(&scratch, king, self.side.opposite())
    }

    /// Moves when not in check, or when the king is unprotected.
    fn all_moves(&mut self) {
        let board = self.board;
        for (from, piece) in board.pieces_of(self.side) {
            let mut targets = self.reach_of(from);
            if self.king == Some(from) {
                for to in targets {
                    if self.king_step_safe(from, to) {
                        self.push(from, to);
                    }
                }
                self.castling(from, piece);
                continue;
            }
            if let (Some(pin), Some(king)) = (self.pin_of(from), self.king) {
                targets &= pin.allowed(king);
            }
            for to in targets {
                self.push(from, to);
            }
        }
        for to in Square::all() {
            self.push_drop(to);
        }
    }

    /// Moves that might answer a check. Returns true when a grasshopper is
    /// among the checkers, in which case the list is only a candidate set
    /// that still needs full simulation.
    fn check_responses(&mut self, king: Square, checkers: &[Square]) -> bool {
        let board = self.board;
        for to in self.reach_of(king) {
            if self.king_step_safe(king, to) {
                self.push(king, to);
            }
        }

        let hopping = checkers
            .iter()
            .any(|&sq| board.piece_at(sq).is_some_and(|p| p.is(PieceKind::Grasshopper)));
        if hopping {
            // Moving any piece may remove a hurdle or block the hop.
            for (from, _) in board.pieces_of(self.side) {
                if from == king {
                    continue;
                }
                for to in self.reach_of(from) {
                    self.push(from, to);
                }
            }
            for to in Square::all() {
                self.push_drop(to);
            }
            return true;
        }

        let [checker] = checkers else {
            return false;
        };
        let checker = *checker;
        let blocks = between(king, checker);
        for (from, piece) in board.pieces_of(self.side) {
            if from == king || self.pin_of(from).is_some() {
                continue;
            }
            let reach = self.reach_of(from);
            if reach.contains(checker) {
                self.push(from, checker);
            }
            if piece.is(PieceKind::Pawn) && board.en_passant() == Some(checker) {
                if let Some(target) = en_passant_target(board, from, self.side) {
                    self.push(from, target);
                }
            }
            for to in reach & blocks {
                self.push(from, to);
            }
        }
        for to in blocks {
            self.push_drop(to);
        }
        false
    }

    fn castling(&mut self, from: Square, king: Piece) {
        if !self.rules.allows_castling() || self.king.is_none() || king.moved {
            return;
        }
        let files = self.board.castling_files();
        if from != Square::new(files.king, self.side.back_rank()) {
            return;
        }
        for side in [CastleSide::QueenSide, CastleSide::KingSide] {
            let squares = CastlingSquares::new(files, self.side, side);
            if !self.castling_allowed(&squares) {
                continue;
            }
            let distance = (squares.king_to.file().index() as i8
                - squares.king_from.file().index() as i8)
                .abs();
            if distance >= 2 && squares.king_to != squares.rook_from {
                self.moves
                    .push(Move::new(king, squares.king_from, squares.king_to).castling(side));
            }
            if self.rules.fischer_castling() {
                self.moves
                    .push(Move::new(king, squares.king_from, squares.rook_from).castling(side));
            }
        }
    }

    fn castling_allowed(&self, squares: &CastlingSquares) -> bool {
        let board = self.board;
        let rook_ready = board
            .piece_at(squares.rook_from)
            .is_some_and(|p| p.is(PieceKind::Rook) && p.color == self.side && !p.moved);
        if !rook_ready || squares.rook_from == squares.king_from {
            return false;
        }

        let rank = squares.king_from.rank();
        let files = [
            squares.king_from,
            squares.king_to,
            squares.rook_from,
            squares.rook_to,
        ]
        .map(|sq| sq.file().index());
        let lo = files.iter().copied().min().unwrap_or(0);
        let hi = files.iter().copied().max().unwrap_or(7);
        let span_clear = (lo..=hi)
            .filter_map(File::from_index)
            .map(|file| Square::new(file, rank))
            .all(|sq| sq == squares.king_from || sq == squares.rook_from || board.is_empty(sq));
        if !span_clear {
            return false;
        }

        let mut scratch = board.clone();
        scratch.take(squares.king_from);
        scratch.take(squares.rook_from);
        let (a, b) = (squares.king_from.file().index(), squares.king_to.file().index());
        (a.min(b)..=a.max(b))
            .filter_map(File::from_index)
            .map(|file| Square::new(file, rank))
            .all(|sq| !is_attacked(&scratch, sq, self.side.opposite()))
    }
}
