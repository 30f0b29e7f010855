//! Two linked bughouse boards.
//!
//! Pieces captured on one board are dropped on the other by the partner of
//! the capturing player, who plays the captured color there. The table owns
//! both games and lends each one its partner's pool for the duration of a
//! call, so neither game holds a reference to the other.

use crate::config::GameConfig;
use crate::error::MoveError;
use crate::game::Game;
use crate::holdings::{droppable_kinds, Holdings};
use crate::rules::{DrawRules, GameKind, GameResult};
use variant_core::{Color, Move, Piece, PieceKind, Square};

/// One of the two boards at a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardId {
    A,
    B,
}

impl BoardId {
    #[inline]
    pub const fn partner(self) -> BoardId {
        match self {
            BoardId::A => BoardId::B,
            BoardId::B => BoardId::A,
        }
    }

    #[inline]
    const fn index(self) -> usize {
        match self {
            BoardId::A => 0,
            BoardId::B => 1,
        }
    }
}

/// A bughouse table: two games whose capture pools feed each other.
#[derive(Debug, Clone)]
pub struct BughouseTable {
    boards: [Game; 2],
}

impl Default for BughouseTable {
    fn default() -> Self {
        Self::new()
    }
}

impl BughouseTable {
    pub fn new() -> Self {
        Self::with_draw_rules(DrawRules::default())
    }

    pub fn with_draw_rules(rules: DrawRules) -> Self {
        let config = GameConfig {
            kind: GameKind::BugHouse,
            draw_rules: rules,
            ..GameConfig::default()
        };
        BughouseTable {
            boards: [Game::with_config(&config), Game::with_config(&config)],
        }
    }

    #[inline]
    pub fn board(&self, id: BoardId) -> &Game {
        &self.boards[id.index()]
    }

    /// The game on `id` and the pool its drops come from.
    fn split(&mut self, id: BoardId) -> (&mut Game, &mut Holdings) {
        let [a, b] = &mut self.boards;
        match id {
            BoardId::A => (a, b.holdings_mut()),
            BoardId::B => (b, a.holdings_mut()),
        }
    }

    /// Pieces `color` may drop on board `id`: what the partner board
    /// captured of that color.
    pub fn droppable(&self, id: BoardId, color: Color) -> &[Piece] {
        self.board(id.partner()).captured_pieces(color)
    }

    pub fn droppable_kinds(&self, id: BoardId, color: Color) -> Vec<PieceKind> {
        droppable_kinds(self.droppable(id, color))
    }

    /// See [`Game::find_move`]; drops resolve against the partner's pool.
    pub fn find_move(
        &self,
        id: BoardId,
        from: Square,
        to: Square,
        extra: Option<PieceKind>,
    ) -> Option<Move> {
        let partner = self.board(id.partner()).holdings();
        self.board(id).find_move_with(from, to, extra, Some(partner))
    }

    pub fn apply_move(&mut self, id: BoardId, mv: Move) -> Result<(), MoveError> {
        let (game, partner) = self.split(id);
        game.apply_move_with(mv, Some(partner))?;
        self.propagate(id);
        Ok(())
    }

    /// True if the last move on `id` can be taken back: its capture, if
    /// any, has not been dropped on the partner board.
    pub fn can_takeback(&self, id: BoardId) -> bool {
        self.board(id).can_takeback()
    }

    /// Takes back the last move on `id`, returning a dropped piece to the
    /// partner's pool. Refused with [`MoveError::GameOver`] while the result
    /// on `id` only mirrors the partner board; take back there instead.
    pub fn takeback(&mut self, id: BoardId) -> Result<Move, MoveError> {
        let (game, partner) = self.split(id);
        let mv = game.takeback_with(Some(partner))?;
        self.boards[id.partner().index()].reopen_after_partner();
        Ok(mv)
    }

    pub fn resign(&mut self, id: BoardId, color: Color) -> Result<(), MoveError> {
        self.boards[id.index()].resign(color)?;
        self.propagate(id);
        Ok(())
    }

    pub fn time_out(&mut self, id: BoardId, color: Color) -> Result<(), MoveError> {
        self.boards[id.index()].time_out(color)?;
        self.propagate(id);
        Ok(())
    }

    pub fn abort(&mut self, id: BoardId, color: Color) -> Result<(), MoveError> {
        self.boards[id.index()].abort(color)?;
        self.propagate(id);
        Ok(())
    }

    /// The table result as seen from board A.
    pub fn result(&self) -> Option<GameResult> {
        self.boards[0].result()
    }

    fn propagate(&mut self, id: BoardId) {
        if let Some(result) = self.board(id).result() {
            self.boards[id.partner().index()].other_game_ended(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::WinReason;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn play(table: &mut BughouseTable, id: BoardId, moves: &[&str]) {
        for text in moves {
            let (from, to) = if text.as_bytes()[1] == b'@' {
                let to = sq(&text[2..4]);
                (to, to)
            } else {
                (sq(&text[0..2]), sq(&text[2..4]))
            };
            let extra = if from == to {
                PieceKind::from_letter(text.chars().next().unwrap())
            } else {
                None
            };
            let mv = table
                .find_move(id, from, to, extra)
                .unwrap_or_else(|| panic!("{text} is not legal on {id:?}"));
            table.apply_move(id, mv).unwrap();
        }
    }

    #[test]
    fn captures_feed_the_partner_board() {
        let mut table = BughouseTable::new();
        play(&mut table, BoardId::A, &["e2e4", "d7d5", "e4d5"]);
        assert_eq!(table.droppable(BoardId::B, Color::Black).len(), 1);
        assert!(table.droppable(BoardId::B, Color::White).is_empty());
        assert_eq!(
            table.droppable_kinds(BoardId::B, Color::Black),
            vec![PieceKind::Pawn]
        );
        assert_eq!(table.board(BoardId::B).droppable_kinds(Color::Black).len(), 5);

        play(&mut table, BoardId::B, &["g1f3"]);
        assert!(table
            .find_move(BoardId::B, sq("e5"), sq("e5"), Some(PieceKind::Knight))
            .is_none());
        play(&mut table, BoardId::B, &["P@e5"]);
        let dropped = table.board(BoardId::B).piece_at(sq("e5")).unwrap();
        assert_eq!(dropped.color, Color::Black);
        assert!(table.droppable(BoardId::B, Color::Black).is_empty());
    }

    #[test]
    fn takeback_of_a_dropped_capture_is_refused() {
        let mut table = BughouseTable::new();
        play(&mut table, BoardId::A, &["e2e4", "d7d5", "e4d5"]);
        play(&mut table, BoardId::B, &["g1f3", "P@e5"]);
        assert!(!table.can_takeback(BoardId::A));
        assert_eq!(
            table.takeback(BoardId::A),
            Err(MoveError::CaptureAlreadyDropped)
        );

        table.takeback(BoardId::B).unwrap();
        assert_eq!(table.droppable(BoardId::B, Color::Black).len(), 1);
        assert!(table.can_takeback(BoardId::A));
        table.takeback(BoardId::A).unwrap();
        assert!(table.droppable(BoardId::B, Color::Black).is_empty());
    }

    #[test]
    fn ending_one_board_ends_the_other() {
        let mut table = BughouseTable::new();
        table.resign(BoardId::B, Color::White).unwrap();
        assert_eq!(
            table.board(BoardId::A).result(),
            Some(GameResult::Win {
                winner: Color::White,
                reason: WinReason::PartnerBoard
            })
        );
        assert_eq!(table.result().and_then(GameResult::winner), Some(Color::White));
        assert!(matches!(
            table.apply_move(
                BoardId::A,
                Move::new(Piece::new(PieceKind::Pawn, Color::White), sq("e2"), sq("e4"))
            ),
            Err(MoveError::GameOver)
        ));
    }

    #[test]
    fn takeback_follows_the_board_that_decided() {
        let mut table = BughouseTable::new();
        play(&mut table, BoardId::A, &["e2e4", "e7e5"]);
        play(&mut table, BoardId::B, &["d2d4"]);
        table.resign(BoardId::B, Color::White).unwrap();
        assert!(table.board(BoardId::A).mirrors_partner());

        assert!(!table.can_takeback(BoardId::A));
        assert_eq!(table.takeback(BoardId::A), Err(MoveError::GameOver));
        assert_eq!(table.board(BoardId::A).ply_count(), 2);
        assert_eq!(
            table.result(),
            Some(GameResult::Win {
                winner: Color::White,
                reason: WinReason::PartnerBoard
            })
        );

        table.takeback(BoardId::B).unwrap();
        assert!(table.board(BoardId::B).result().is_none());
        assert!(table.result().is_none());
        table.takeback(BoardId::A).unwrap();
        assert_eq!(table.board(BoardId::A).ply_count(), 1);
    }
}
