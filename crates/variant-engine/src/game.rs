//! Game state with history.
//!
//! A [`Game`] owns the board, the capture pools and one sealed [`MoveInfo`]
//! per position reached. Applying a move records an undo entry next to the
//! move, so [`Game::takeback`] restores the previous position exactly and
//! reuses its cached analysis instead of analyzing again.

use crate::analysis::{analyze, CastlingSquares, MoveInfo};
use crate::board::CastlingFiles;
use crate::config::GameConfig;
use crate::draw::{draw_reason, enough_material, fingerprint, next_fifty_move_counter};
use crate::error::{MoveError, SetupError};
use crate::holdings::{droppable_kinds, find_piece_to_drop, Holdings, UNLIMITED_SUPPLY};
use crate::movement::is_attacked;
use crate::rules::layout::initial_placement;
use crate::rules::{DrawReason, DrawRules, GameKind, GameResult, RuleSet, WinReason};
use crate::Board;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use variant_core::{Color, Move, Piece, PieceKind, Placement, Rank, Square};

/// Where a dropped piece came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DropSource {
    /// This board's pool of captured pieces of that color.
    OwnPool(Color),
    /// The bughouse partner board's pool of that color.
    PartnerPool(Color),
    /// Bughouse without a partner board.
    Unlimited,
}

#[derive(Debug, Clone)]
enum Undo {
    Board {
        from: Square,
        to: Square,
        moved_before: Piece,
        captured_on: Option<(Square, Piece)>,
        /// Rook origin, destination and state before castling.
        rook: Option<(Square, Square, Piece)>,
    },
    Drop {
        source: DropSource,
        pooled: Piece,
        index: usize,
    },
}

/// One half-move as played.
#[derive(Debug, Clone)]
struct Ply {
    mv: Move,
    undo: Undo,
    en_passant_before: Option<Square>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Requests {
    draw: [bool; 2],
    pause: [bool; 2],
    takeback: [bool; 2],
}

/// A position to start a game from.
///
/// Built from placement text or a board, adjusted with the builder
/// methods, then checked by [`Game::from_setup`].
#[derive(Debug, Clone)]
pub struct Setup {
    kind: GameKind,
    board: Board,
    holdings: Holdings,
    side_to_move: Color,
    draw_rules: DrawRules,
    fifty_move_counter: u32,
    move_number: u32,
}

impl Setup {
    /// Parses placement text, with an optional bracketed holdings list.
    ///
    /// In crazyhouse a held piece is written in the color of the player
    /// who may drop it. In bughouse the list is this board's captures.
    pub fn new(kind: GameKind, placement: &str) -> Result<Self, SetupError> {
        let placement = Placement::parse(placement)?;
        let mut setup = Setup::from_board(kind, Board::from_placement(&placement));
        for piece in placement.holdings {
            if kind.is_crazyhouse() {
                setup.holdings.push(Piece {
                    color: piece.color.opposite(),
                    ..piece
                });
            } else {
                setup.holdings.push(piece);
            }
        }
        Ok(setup)
    }

    /// Wraps a board. Fischer-random castling geometry is read off White's
    /// back rank.
    pub fn from_board(kind: GameKind, mut board: Board) -> Self {
        if kind.rule_set().fischer_castling() {
            board.set_castling_files(board.detect_castling_files());
        }
        Setup {
            kind,
            board,
            holdings: Holdings::new(),
            side_to_move: Color::White,
            draw_rules: DrawRules::default(),
            fifty_move_counter: 0,
            move_number: 1,
        }
    }

    pub fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    pub fn draw_rules(mut self, rules: DrawRules) -> Self {
        self.draw_rules = rules;
        self
    }

    pub fn fifty_move_counter(mut self, counter: u32) -> Self {
        self.fifty_move_counter = counter;
        self
    }

    pub fn move_number(mut self, number: u32) -> Self {
        self.move_number = number.max(1);
        self
    }

    /// Marks the pawn on `pawn` as having just advanced two squares.
    pub fn en_passant(mut self, pawn: Option<Square>) -> Self {
        self.board.set_en_passant(pawn);
        self
    }

    pub fn castling_files(mut self, files: CastlingFiles) -> Self {
        self.board.set_castling_files(files);
        self
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    fn validate(&self) -> Result<(), SetupError> {
        let rules = self.kind.rule_set();
        if rules.king_safety() {
            for color in Color::ALL {
                let count = self.board.count(PieceKind::King, color);
                if count != 1 {
                    return Err(SetupError::KingCount { color, count });
                }
            }
        }
        if let Some(sq) = self.board.pawn_on_last_rank() {
            return Err(SetupError::PawnOnLastRank(sq));
        }
        if rules.king_safety() {
            let waiting = self.side_to_move.opposite();
            if let Some(king) = self.board.king_square(waiting) {
                if is_attacked(&self.board, king, self.side_to_move) {
                    return Err(SetupError::OpponentInCheck);
                }
            }
        }
        Ok(())
    }
}

/// A game of any supported kind.
#[derive(Debug, Clone)]
pub struct Game {
    kind: GameKind,
    board: Board,
    side_to_move: Color,
    starting_color: Color,
    holdings: Holdings,
    draw_rules: DrawRules,
    /// One sealed analysis per position reached; `infos[i]` follows `plies[..i]`.
    infos: Vec<MoveInfo>,
    plies: Vec<Ply>,
    first_move_number: u32,
    initial_fifty_move_counter: u32,
    result: Option<GameResult>,
    paused: bool,
    requests: Requests,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameKind::Regular)
    }
}

impl Game {
    /// A game of `kind` from its starting layout. Fischer random draws its
    /// back rank from the thread-local generator.
    pub fn new(kind: GameKind) -> Self {
        Self::with_rng(kind, &mut rand::thread_rng())
    }

    /// A game of `kind` whose Fischer-random layout, if any, comes from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(kind: GameKind, rng: &mut R) -> Self {
        let board = Board::parse(&initial_placement(kind, rng)).unwrap_or_default();
        Self::assemble(Setup::from_board(kind, board))
    }

    /// A game built from configuration values.
    pub fn with_config(config: &GameConfig) -> Self {
        let placement = match config.fischer_seed {
            Some(seed) => initial_placement(config.kind, &mut StdRng::seed_from_u64(seed)),
            None => initial_placement(config.kind, &mut rand::thread_rng()),
        };
        let board = Board::parse(&placement).unwrap_or_default();
        let setup = Setup::from_board(config.kind, board)
            .side_to_move(config.starting_color)
            .draw_rules(config.draw_rules);
        Self::assemble(setup)
    }

    /// A game from an arbitrary position, after checking it is playable.
    pub fn from_setup(setup: Setup) -> Result<Self, SetupError> {
        setup.validate()?;
        Ok(Self::assemble(setup))
    }

    fn assemble(setup: Setup) -> Self {
        let mut game = Game {
            kind: setup.kind,
            board: setup.board,
            side_to_move: setup.side_to_move,
            starting_color: setup.side_to_move,
            holdings: setup.holdings,
            draw_rules: setup.draw_rules,
            infos: Vec::new(),
            plies: Vec::new(),
            first_move_number: setup.move_number,
            initial_fifty_move_counter: setup.fifty_move_counter,
            result: None,
            paused: false,
            requests: Requests::default(),
        };
        let info = game.seal_position();
        game.infos.push(info);
        game.settle();
        game
    }

    #[inline]
    pub fn kind(&self) -> GameKind {
        self.kind
    }

    #[inline]
    pub fn rule_set(&self) -> RuleSet {
        self.kind.rule_set()
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn draw_rules(&self) -> DrawRules {
        self.draw_rules
    }

    /// Analysis of the current position.
    pub fn current_info(&self) -> &MoveInfo {
        // Never empty: the starting position is sealed on construction.
        &self.infos[self.infos.len() - 1]
    }

    /// Every sealed analysis, starting position first.
    #[inline]
    pub fn history(&self) -> &[MoveInfo] {
        &self.infos
    }

    #[inline]
    pub fn ply_count(&self) -> usize {
        self.plies.len()
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.plies.last().map(|ply| &ply.mv)
    }

    /// Full-move number of the side to move.
    pub fn move_number(&self) -> u32 {
        let offset = usize::from(self.starting_color == Color::Black);
        self.first_move_number + ((self.plies.len() + offset) / 2) as u32
    }

    /// Legal moves in the current position.
    #[inline]
    pub fn valid_moves(&self) -> &[Move] {
        self.current_info().moves()
    }

    #[inline]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn holdings(&self) -> &Holdings {
        &self.holdings
    }

    /// Pieces of `color` captured on this board.
    pub fn captured_pieces(&self, color: Color) -> &[Piece] {
        self.holdings.captured(color)
    }

    /// Pieces `color` could drop, in the color they would be dropped as.
    ///
    /// A bughouse game on its own reports the unlimited supply of P, N, B, R
    /// and Q. This board does not know its partner, so for a board at a
    /// table ask [`BughouseTable::droppable`](crate::BughouseTable::droppable),
    /// which reports the partner's captures.
    pub fn droppable_pieces(&self, color: Color) -> Vec<Piece> {
        match self.kind {
            GameKind::CrazyHouse => self
                .holdings
                .captured(color.opposite())
                .iter()
                .map(|p| Piece { color, ..*p })
                .collect(),
            GameKind::BugHouse => UNLIMITED_SUPPLY
                .iter()
                .map(|&kind| Piece::new(kind, color))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Distinct kinds `color` could drop right now.
    pub fn droppable_kinds(&self, color: Color) -> Vec<PieceKind> {
        droppable_kinds(&self.droppable_pieces(color))
    }

    /// Looks up a legal move. For drops pass `from == to` and the kind to
    /// drop; the result names that kind when the pool holds one.
    pub fn find_move(&self, from: Square, to: Square, extra: Option<PieceKind>) -> Option<Move> {
        self.find_move_with(from, to, extra, None)
    }

    pub(crate) fn find_move_with(
        &self,
        from: Square,
        to: Square,
        extra: Option<PieceKind>,
        partner: Option<&Holdings>,
    ) -> Option<Move> {
        if from == to {
            let kind = extra?;
            let mv = Move::drop(Piece::new(kind, self.side_to_move), to);
            return self.resolve(&mv, partner).ok();
        }
        self.current_info().find(from, to, extra)
    }

    /// Plays `mv`, which must match a listed move (or name a concrete drop
    /// where a generic drop is listed).
    pub fn apply_move(&mut self, mv: Move) -> Result<(), MoveError> {
        self.apply_move_with(mv, None)
    }

    pub(crate) fn apply_move_with(
        &mut self,
        mv: Move,
        partner: Option<&mut Holdings>,
    ) -> Result<(), MoveError> {
        if self.result.is_some() {
            tracing::warn!(mv = %mv, "move refused: game over");
            return Err(MoveError::GameOver);
        }
        if self.paused {
            tracing::warn!(mv = %mv, "move refused: game paused");
            return Err(MoveError::Paused);
        }
        let mv = match self.resolve(&mv, partner.as_deref()) {
            Ok(mv) => mv,
            Err(err) => {
                tracing::warn!(mv = %mv, %err, "move refused");
                return Err(err);
            }
        };

        let en_passant_before = self.board.en_passant();
        let undo = if mv.is_drop() {
            self.play_drop(&mv, partner)?
        } else {
            self.play_board_move(&mv)
        };
        self.plies.push(Ply {
            mv,
            undo,
            en_passant_before,
        });
        self.side_to_move = self.side_to_move.opposite();
        self.requests = Requests::default();

        let info = self.seal_position();
        self.infos.push(info);
        tracing::debug!(mv = %mv, ply = self.plies.len(), "applied move");
        self.settle();
        Ok(())
    }

    /// Checks `mv` against the current analysis and returns the listed
    /// move, or for drops a concrete drop of a pooled piece.
    fn resolve(&self, mv: &Move, partner: Option<&Holdings>) -> Result<Move, MoveError> {
        if !mv.is_drop() {
            return self
                .current_info()
                .find(mv.from(), mv.to(), mv.extra())
                .ok_or(MoveError::IllegalMove(*mv));
        }
        let to = mv.to();
        let kind = mv.extra().ok_or(MoveError::IllegalMove(*mv))?;
        let listed = self
            .valid_moves()
            .iter()
            .any(|m| m.is_any_drop() && m.to() == to);
        if !listed || (kind == PieceKind::Pawn && matches!(to.rank(), Rank::R1 | Rank::R8)) {
            return Err(MoveError::IllegalMove(*mv));
        }
        let (_, pool) = self.drop_pool(partner);
        let available = match pool {
            Some(pool) => find_piece_to_drop(pool, kind).is_some(),
            None => UNLIMITED_SUPPLY.contains(&kind),
        };
        if !available {
            return Err(MoveError::NotInPool(kind));
        }
        Ok(Move::drop(Piece::new(kind, self.side_to_move), to))
    }

    /// The pool the side to move drops from, `None` meaning unlimited.
    fn drop_pool<'a>(&'a self, partner: Option<&'a Holdings>) -> (DropSource, Option<&'a [Piece]>) {
        let us = self.side_to_move;
        match (self.kind, partner) {
            (GameKind::BugHouse, Some(partner)) => {
                (DropSource::PartnerPool(us), Some(partner.captured(us)))
            }
            (GameKind::BugHouse, None) => (DropSource::Unlimited, None),
            _ => (
                DropSource::OwnPool(us.opposite()),
                Some(self.holdings.captured(us.opposite())),
            ),
        }
    }

    fn play_drop(&mut self, mv: &Move, partner: Option<&mut Holdings>) -> Result<Undo, MoveError> {
        let us = self.side_to_move;
        let kind = mv.extra().ok_or(MoveError::IllegalMove(*mv))?;
        let (source, _) = self.drop_pool(partner.as_deref());
        let (pooled, index) = match source {
            DropSource::Unlimited => (Piece::new(kind, us), 0),
            DropSource::OwnPool(color) => take_from(&mut self.holdings, color, kind)?,
            DropSource::PartnerPool(color) => match partner {
                Some(pool) => take_from(pool, color, kind)?,
                None => return Err(MoveError::NotInPool(kind)),
            },
        };
        self.board.set(
            mv.to(),
            Piece {
                kind,
                color: us,
                moved: true,
                promoted: false,
            },
        );
        self.board.set_en_passant(None);
        Ok(Undo::Drop {
            source,
            pooled,
            index,
        })
    }

    fn play_board_move(&mut self, mv: &Move) -> Undo {
        let us = self.side_to_move;
        let (from, to) = (mv.from(), mv.to());

        if let Some(side) = mv.castle() {
            let squares = CastlingSquares::new(self.board.castling_files(), us, side);
            let king = self.board.take(squares.king_from).unwrap_or(mv.piece());
            let rook = self
                .board
                .take(squares.rook_from)
                .unwrap_or(Piece::new(PieceKind::Rook, us));
            self.board.set(squares.king_to, Piece { moved: true, ..king });
            self.board.set(squares.rook_to, Piece { moved: true, ..rook });
            self.board.set_en_passant(None);
            return Undo::Board {
                from: squares.king_from,
                to: squares.king_to,
                moved_before: king,
                captured_on: None,
                rook: Some((squares.rook_from, squares.rook_to, rook)),
            };
        }

        let piece = self.board.take(from).unwrap_or(mv.piece());
        let captured_on = if mv.is_en_passant() {
            self.board
                .en_passant()
                .and_then(|sq| self.board.take(sq).map(|p| (sq, p)))
        } else {
            self.board.take(to).map(|p| (to, p))
        };
        let landed = match mv.extra() {
            Some(kind) => Piece {
                kind,
                color: us,
                moved: true,
                promoted: true,
            },
            None => Piece {
                moved: true,
                ..piece
            },
        };
        self.board.set(to, landed);

        let double_step = piece.is(PieceKind::Pawn)
            && (to.rank().index() as i8 - from.rank().index() as i8).abs() == 2;
        self.board.set_en_passant(double_step.then_some(to));

        if let Some((_, captured)) = captured_on {
            self.holdings.push(captured);
        }
        Undo::Board {
            from,
            to,
            moved_before: piece,
            captured_on,
            rook: None,
        }
    }

    /// True if there is a ply to take back and the piece it captured, if
    /// any, has not been dropped elsewhere since. A result copied from the
    /// partner board blocks takebacks until the partner reopens.
    pub fn can_takeback(&self) -> bool {
        if self.mirrors_partner() {
            return false;
        }
        match self.plies.last() {
            Some(Ply {
                undo:
                    Undo::Board {
                        captured_on: Some((_, captured)),
                        ..
                    },
                ..
            }) => self.holdings.contains(*captured),
            Some(_) => true,
            None => false,
        }
    }

    /// Reverses the last ply.
    pub fn takeback(&mut self) -> Result<Move, MoveError> {
        self.takeback_with(None)
    }

    pub(crate) fn takeback_with(&mut self, partner: Option<&mut Holdings>) -> Result<Move, MoveError> {
        let Some(ply) = self.plies.last() else {
            tracing::warn!("takeback refused: no move played");
            return Err(MoveError::NoMoveToTakeBack);
        };
        if self.mirrors_partner() {
            tracing::warn!(mv = %ply.mv, "takeback refused: partner board decided the game");
            return Err(MoveError::GameOver);
        }
        if let Undo::Board {
            captured_on: Some((_, captured)),
            ..
        } = &ply.undo
        {
            if !self.holdings.contains(*captured) {
                tracing::warn!(mv = %ply.mv, "takeback refused: capture already dropped");
                return Err(MoveError::CaptureAlreadyDropped);
            }
        }

        let Some(ply) = self.plies.pop() else {
            return Err(MoveError::NoMoveToTakeBack);
        };
        match ply.undo {
            Undo::Board {
                from,
                to,
                moved_before,
                captured_on,
                rook,
            } => {
                self.board.take(to);
                if let Some((rook_from, rook_to, rook)) = rook {
                    self.board.take(rook_to);
                    self.board.set(rook_from, rook);
                }
                if let Some((sq, captured)) = captured_on {
                    self.holdings.remove_latest(captured);
                    self.board.set(sq, captured);
                }
                self.board.set(from, moved_before);
            }
            Undo::Drop {
                source,
                pooled,
                index,
            } => {
                self.board.take(ply.mv.to());
                match source {
                    DropSource::OwnPool(color) => self.holdings.put_back(color, index, pooled),
                    DropSource::PartnerPool(color) => {
                        debug_assert!(partner.is_some(), "partner drop taken back without partner");
                        if let Some(pool) = partner {
                            pool.put_back(color, index, pooled);
                        }
                    }
                    DropSource::Unlimited => {}
                }
            }
        }
        self.board.set_en_passant(ply.en_passant_before);
        self.side_to_move = self.side_to_move.opposite();
        self.infos.pop();
        self.result = None;
        self.requests = Requests::default();
        tracing::debug!(mv = %ply.mv, ply = self.plies.len(), "took back move");
        Ok(ply.mv)
    }

    /// Takes back moves until `ply` plies remain.
    pub fn takeback_to(&mut self, ply: usize) -> Result<(), MoveError> {
        while self.plies.len() > ply {
            self.takeback()?;
        }
        Ok(())
    }

    pub fn takeback_all(&mut self) -> Result<(), MoveError> {
        self.takeback_to(0)
    }

    pub fn resign(&mut self, color: Color) -> Result<(), MoveError> {
        self.ensure_running()?;
        self.finish(GameResult::Win {
            winner: color.opposite(),
            reason: WinReason::Resignation,
        });
        Ok(())
    }

    /// Ends the game without a result.
    pub fn abort(&mut self, color: Color) -> Result<(), MoveError> {
        self.ensure_running()?;
        tracing::debug!(by = %color, "game aborted");
        self.finish(GameResult::Aborted);
        Ok(())
    }

    /// Records a draw offer; the game is drawn once both sides offered.
    pub fn offer_draw(&mut self, color: Color) -> Result<(), MoveError> {
        self.ensure_running()?;
        self.requests.draw[color.index()] = true;
        if self.requests.draw.iter().all(|&offered| offered) {
            self.finish(GameResult::Draw(DrawReason::Agreement));
        }
        Ok(())
    }

    pub fn agree_draw(&mut self) -> Result<(), MoveError> {
        self.ensure_running()?;
        self.finish(GameResult::Draw(DrawReason::Agreement));
        Ok(())
    }

    #[inline]
    pub fn draw_offered(&self, color: Color) -> bool {
        self.requests.draw[color.index()]
    }

    pub fn request_pause(&mut self, color: Color) {
        self.requests.pause[color.index()] = true;
    }

    #[inline]
    pub fn pause_requested(&self, color: Color) -> bool {
        self.requests.pause[color.index()]
    }

    pub fn request_takeback(&mut self, color: Color) {
        self.requests.takeback[color.index()] = true;
    }

    #[inline]
    pub fn takeback_requested(&self, color: Color) -> bool {
        self.requests.takeback[color.index()]
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// `color` ran out of time. The opponent wins only if it could still mate.
    pub fn time_out(&mut self, color: Color) -> Result<(), MoveError> {
        self.ensure_running()?;
        let other = color.opposite();
        let result = if self.current_info().has_enough_material(other) {
            GameResult::Win {
                winner: other,
                reason: WinReason::Timeout,
            }
        } else {
            GameResult::Draw(DrawReason::TimeoutVsInsufficientMaterial)
        };
        self.finish(result);
        Ok(())
    }

    /// The partner board of a bughouse table ended with `result`.
    ///
    /// Partners sit on opposite colors, so the partner's winner maps to the
    /// other color here.
    pub fn other_game_ended(&mut self, result: GameResult) {
        if self.result.is_some() {
            return;
        }
        let mapped = match result {
            GameResult::Win { winner, .. } => GameResult::Win {
                winner: winner.opposite(),
                reason: WinReason::PartnerBoard,
            },
            GameResult::Draw(_) => GameResult::Draw(DrawReason::PartnerBoard),
            GameResult::Aborted => GameResult::Aborted,
        };
        self.finish(mapped);
    }

    /// True if the result was copied from the partner board.
    pub fn mirrors_partner(&self) -> bool {
        matches!(
            self.result,
            Some(GameResult::Win {
                reason: WinReason::PartnerBoard,
                ..
            }) | Some(GameResult::Draw(DrawReason::PartnerBoard))
        )
    }

    /// Clears a result that only mirrored the partner board.
    pub(crate) fn reopen_after_partner(&mut self) {
        if self.mirrors_partner() {
            self.result = None;
        }
    }

    pub(crate) fn holdings_mut(&mut self) -> &mut Holdings {
        &mut self.holdings
    }

    fn ensure_running(&self) -> Result<(), MoveError> {
        match self.result {
            Some(_) => Err(MoveError::GameOver),
            None => Ok(()),
        }
    }

    fn finish(&mut self, result: GameResult) {
        tracing::debug!(?result, ply = self.plies.len(), "game over");
        self.result = Some(result);
    }

    /// Analyzes the current position and seals the draw state onto it.
    fn seal_position(&self) -> MoveInfo {
        let side = self.side_to_move;
        let drop_kinds = match self.kind {
            GameKind::BugHouse => UNLIMITED_SUPPLY.to_vec(),
            _ => self.droppable_kinds(side),
        };
        let info = analyze(&self.board, side, self.kind, &drop_kinds);
        let fifty = match (self.plies.last(), self.infos.last()) {
            (Some(ply), Some(previous)) => {
                next_fifty_move_counter(previous.fifty_move_counter(), &ply.mv)
            }
            _ => self.initial_fifty_move_counter,
        };
        info.seal(
            fifty,
            fingerprint(&self.board, side, self.kind, &self.holdings),
            enough_material(&self.board, self.kind),
        )
    }

    /// Decides whether the position just sealed ends the game.
    fn settle(&mut self) {
        let info = self.current_info();
        let mover = self.side_to_move;
        let rules = self.rule_set();
        let result = if info.is_checkmate() {
            GameResult::Win {
                winner: mover.opposite(),
                reason: WinReason::Checkmate,
            }
        } else if self.board.pieces_of(mover).next().is_none() {
            GameResult::Win {
                winner: rules.bare_side_winner(mover),
                reason: WinReason::NoPieces,
            }
        } else if info.is_stalemate() {
            match rules.stalemate_winner(mover) {
                Some(winner) => GameResult::Win {
                    winner,
                    reason: WinReason::Stalemate,
                },
                None => GameResult::Draw(DrawReason::Stalemate),
            }
        } else {
            let earlier = &self.infos[..self.infos.len() - 1];
            match draw_reason(info, earlier, self.draw_rules) {
                Some(reason) => GameResult::Draw(reason),
                None => return,
            }
        };
        self.finish(result);
    }
}

fn take_from(pool: &mut Holdings, color: Color, kind: PieceKind) -> Result<(Piece, usize), MoveError> {
    let index = find_piece_to_drop(pool.captured(color), kind).ok_or(MoveError::NotInPool(kind))?;
    let pooled = pool
        .take_at(color, index)
        .ok_or(MoveError::NotInPool(kind))?;
    Ok((pooled, index))
}
