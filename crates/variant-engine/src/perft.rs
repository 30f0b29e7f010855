//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a given depth,
//! which can be compared against known-correct values. The walk goes
//! through [`Game::apply_move`] and [`Game::takeback`], so it exercises the
//! undo path as well as generation.
//!
//! Generic drops are counted once per kind the side to move can drop, so
//! drop games count the moves a player can actually make.

use crate::error::MoveError;
use crate::game::Game;
use variant_core::{Move, Piece, PieceKind, Rank};

/// The legal moves with every generic drop replaced by one concrete drop
/// per droppable kind. Pawns are never dropped on the first or last rank.
pub fn playable_moves(game: &Game) -> Vec<Move> {
    let side = game.side_to_move();
    let kinds = game.droppable_kinds(side);
    let mut moves = Vec::with_capacity(game.valid_moves().len());
    for &mv in game.valid_moves() {
        if !mv.is_any_drop() {
            moves.push(mv);
            continue;
        }
        let last_rank = matches!(mv.to().rank(), Rank::R1 | Rank::R8);
        moves.extend(
            kinds
                .iter()
                .filter(|&&kind| !(last_rank && kind == PieceKind::Pawn))
                .map(|&kind| Move::drop(Piece::new(kind, side), mv.to())),
        );
    }
    moves
}

/// Counts the leaf nodes `depth` plies below the current position.
///
/// The game is returned to its starting state before this returns.
///
/// # Errors
///
/// Fails if a generated move is refused or cannot be taken back, which
/// means generation and application disagree.
pub fn perft(game: &mut Game, depth: u32) -> Result<u64, MoveError> {
    if depth == 0 {
        return Ok(1);
    }
    if game.is_over() {
        return Ok(0);
    }

    let moves = playable_moves(game);
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for mv in moves {
        game.apply_move(mv)?;
        nodes += perft(game, depth - 1)?;
        game.takeback()?;
    }
    Ok(nodes)
}

/// Perft with divide: the node count below each move at the root, sorted
/// by UCI text. Useful for finding which move has the wrong count.
pub fn perft_divide(game: &mut Game, depth: u32) -> Result<Vec<(String, u64)>, MoveError> {
    let moves = playable_moves(game);
    let mut results = Vec::with_capacity(moves.len());

    for mv in moves {
        game.apply_move(mv)?;
        let nodes = if depth > 1 { perft(game, depth - 1)? } else { 1 };
        game.takeback()?;
        results.push((mv.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Setup;
    use crate::rules::{DrawRules, GameKind};
    use variant_core::Color;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R";
    const ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8";

    fn game(placement: &str) -> Game {
        let setup = Setup::new(GameKind::Regular, placement)
            .unwrap()
            .side_to_move(Color::White)
            .draw_rules(DrawRules::NONE);
        Game::from_setup(setup).unwrap()
    }

    fn startpos() -> Game {
        game("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")
    }

    // Starting position perft values (well-known and verified)
    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&mut startpos(), 1).unwrap(), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&mut startpos(), 2).unwrap(), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&mut startpos(), 3).unwrap(), 8902);
    }

    // Kiwipete: castling, pins, en passant and promotions all at once
    #[test]
    fn perft_kiwipete_depth_1() {
        assert_eq!(perft(&mut game(KIWIPETE), 1).unwrap(), 48);
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        assert_eq!(perft(&mut game(KIWIPETE), 2).unwrap(), 2039);
    }

    // Rook endgame with the horizontally pinned en passant capture
    #[test]
    fn perft_endgame_depth_1() {
        assert_eq!(perft(&mut game(ENDGAME), 1).unwrap(), 14);
    }

    #[test]
    fn perft_endgame_depth_2() {
        assert_eq!(perft(&mut game(ENDGAME), 2).unwrap(), 191);
    }

    #[test]
    fn perft_endgame_depth_3() {
        assert_eq!(perft(&mut game(ENDGAME), 3).unwrap(), 2812);
    }

    #[test]
    fn perft_restores_the_game() {
        let mut game = game(KIWIPETE);
        let before = game.board().clone();
        perft(&mut game, 2).unwrap();
        assert_eq!(game.board(), &before);
        assert_eq!(game.ply_count(), 0);
    }

    #[test]
    fn perft_divide_sums_to_perft() {
        let mut game = startpos();
        let divide = perft_divide(&mut game, 2).unwrap();
        assert_eq!(divide.len(), 20);
        assert!(divide.iter().all(|(_, nodes)| *nodes == 20));
        assert_eq!(divide[0].0, "a2a3");
    }

    #[test]
    fn perft_bughouse_counts_every_drop_kind() {
        // 20 board moves and five kinds on each of the 32 empty squares.
        let mut game = Game::new(GameKind::BugHouse);
        assert_eq!(perft(&mut game, 1).unwrap(), 20 + 32 * 5);
        let nodes = perft(&mut game, 2).unwrap();
        let divide = perft_divide(&mut game, 2).unwrap();
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), nodes);
        assert!(divide.iter().any(|(uci, _)| uci == "Q@e3"));
        assert!(divide.iter().all(|(uci, _)| !uci.starts_with('*')));
        assert_eq!(game.ply_count(), 0);
    }

    #[test]
    fn perft_crazyhouse_drops_from_the_pool() {
        let mut game = Game::new(GameKind::CrazyHouse);
        for (from, to) in [("e2", "e4"), ("d7", "d5"), ("e4", "d5"), ("d8", "d5")] {
            let from = variant_core::Square::from_algebraic(from).unwrap();
            let to = variant_core::Square::from_algebraic(to).unwrap();
            let mv = game.find_move(from, to, None).unwrap();
            game.apply_move(mv).unwrap();
        }
        let divide = perft_divide(&mut game, 2).unwrap();
        let drops: Vec<_> = divide.iter().filter(|(uci, _)| uci.contains('@')).collect();
        // Every empty square but d8, where a pawn cannot go.
        assert_eq!(drops.len(), 33);
        assert!(drops.iter().all(|(uci, _)| uci.starts_with("P@")));
        assert_eq!(
            divide.iter().map(|(_, n)| n).sum::<u64>(),
            perft(&mut game, 2).unwrap()
        );
        assert_eq!(game.ply_count(), 4);
    }
}
