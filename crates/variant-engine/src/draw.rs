//! Automatic draw rules: insufficient material, the fifty-move counter and
//! repetition fingerprints.

use crate::analysis::MoveInfo;
use crate::holdings::Holdings;
use crate::rules::{DrawReason, DrawRules, GameKind};
use crate::Board;
use variant_core::{Color, Move, PieceKind};

/// Half-moves without a pawn move or capture that end the game.
pub const FIFTY_MOVE_LIMIT: u32 = 100;

/// Positions seen this often end the game.
pub const REPETITION_LIMIT: usize = 3;

/// True if `color` could still mate with what it has on the board.
///
/// Drop games always have material, since anything captured comes back.
pub fn has_enough_material(board: &Board, color: Color, kind: GameKind) -> bool {
    if kind.has_drops() {
        return true;
    }
    let mut minors = 0;
    for (_, piece) in board.pieces_of(color) {
        match piece.kind {
            PieceKind::Pawn
            | PieceKind::Rook
            | PieceKind::Queen
            | PieceKind::Archbishop
            | PieceKind::Chancellor => return true,
            PieceKind::Bishop | PieceKind::Grasshopper | PieceKind::Knight => minors += 1,
            PieceKind::King | PieceKind::AnyDrop => {}
        }
    }
    minors >= 2
}

/// [`has_enough_material`] for both colors, indexed by [`Color::index`].
pub fn enough_material(board: &Board, kind: GameKind) -> [bool; 2] {
    Color::ALL.map(|color| has_enough_material(board, color, kind))
}

/// Counter after `last` was played on a position whose counter was
/// `previous`. Resets on pawn moves (drops included) and captures.
pub fn next_fifty_move_counter(previous: u32, last: &Move) -> u32 {
    if last.piece().is(PieceKind::Pawn) || last.is_capture() {
        0
    } else {
        previous + 1
    }
}

/// Text that is equal for positions that repeat: placement and side to
/// move, plus promotion marks and capture pools in drop games.
pub fn fingerprint(board: &Board, side: Color, kind: GameKind, holdings: &Holdings) -> String {
    let side = match side {
        Color::White => 'w',
        Color::Black => 'b',
    };
    if kind.has_drops() {
        format!("{}{} {}", board.placement_text(true), holdings.text(), side)
    } else {
        format!("{} {}", board.placement_text(false), side)
    }
}

/// How many times `fingerprint` occurs in `history`.
pub fn occurrences(history: &[MoveInfo], fingerprint: &str) -> usize {
    history
        .iter()
        .filter(|info| info.fingerprint() == fingerprint)
        .count()
}

/// The first enabled draw rule `current` triggers, given the infos sealed
/// before it.
pub fn draw_reason(current: &MoveInfo, earlier: &[MoveInfo], rules: DrawRules) -> Option<DrawReason> {
    if rules.insufficient_material
        && !current.has_enough_material(Color::White)
        && !current.has_enough_material(Color::Black)
    {
        return Some(DrawReason::InsufficientMaterial);
    }
    if rules.fifty_moves && current.fifty_move_counter() >= FIFTY_MOVE_LIMIT {
        return Some(DrawReason::FiftyMoveRule);
    }
    if rules.repetition && occurrences(earlier, current.fingerprint()) + 1 >= REPETITION_LIMIT {
        return Some(DrawReason::ThreefoldRepetition);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use variant_core::{Piece, Square};

    fn board(text: &str) -> Board {
        Board::parse(text).unwrap()
    }

    fn sealed(text: &str, fifty: u32) -> MoveInfo {
        let board = board(text);
        analyze(&board, Color::White, GameKind::Regular, &[]).seal(
            fifty,
            fingerprint(&board, Color::White, GameKind::Regular, &Holdings::new()),
            enough_material(&board, GameKind::Regular),
        )
    }

    #[test]
    fn bare_kings_lack_material() {
        let kings = board("4k3/8/8/8/8/8/8/4K3");
        assert_eq!(enough_material(&kings, GameKind::Regular), [false, false]);
        assert_eq!(enough_material(&kings, GameKind::CrazyHouse), [true, true]);
    }

    #[test]
    fn one_minor_is_not_enough_two_are() {
        let bishop = board("4k3/8/8/8/8/8/8/3BK3");
        assert!(!has_enough_material(&bishop, Color::White, GameKind::Regular));
        let pair = board("4k3/8/8/8/8/8/8/2NBK3");
        assert!(has_enough_material(&pair, Color::White, GameKind::Regular));
        let hopper = board("4k3/8/8/8/8/8/8/2GBK3");
        assert!(has_enough_material(&hopper, Color::White, GameKind::Grasshopper));
    }

    #[test]
    fn heavy_pieces_are_enough() {
        for text in ["4k3/8/8/8/8/8/8/3AK3", "4k3/8/8/8/8/8/8/3CK3", "4k3/8/8/8/8/8/P7/4K3"] {
            assert!(has_enough_material(&board(text), Color::White, GameKind::MiniCapa));
        }
    }

    #[test]
    fn fifty_move_counter_resets() {
        let knight = Piece::new(PieceKind::Knight, Color::White);
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let g1 = Square::G1;
        let f3 = Square::from_algebraic("f3").unwrap();
        assert_eq!(next_fifty_move_counter(7, &Move::new(knight, g1, f3)), 8);
        assert_eq!(
            next_fifty_move_counter(7, &Move::new(knight, g1, f3).capturing(pawn)),
            0
        );
        assert_eq!(next_fifty_move_counter(7, &Move::drop(pawn, f3)), 0);
    }

    #[test]
    fn fingerprints_include_pools_in_drop_games() {
        let start = Board::default();
        let mut holdings = Holdings::new();
        holdings.push(Piece::new(PieceKind::Pawn, Color::Black));
        let plain = fingerprint(&start, Color::White, GameKind::Regular, &holdings);
        assert_eq!(plain, "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w");
        let crazy = fingerprint(&start, Color::White, GameKind::CrazyHouse, &holdings);
        assert_eq!(crazy, "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR[p] w");
    }

    #[test]
    fn draw_rules_can_be_disabled() {
        let info = sealed("4k3/8/8/8/8/8/8/4K3", 0);
        assert_eq!(
            draw_reason(&info, &[], DrawRules::default()),
            Some(DrawReason::InsufficientMaterial)
        );
        assert_eq!(draw_reason(&info, &[], DrawRules::NONE), None);
    }

    #[test]
    fn fifty_moves_and_repetition() {
        let text = "4k3/8/8/8/8/8/8/R3K3";
        let tired = sealed(text, FIFTY_MOVE_LIMIT);
        assert_eq!(
            draw_reason(&tired, &[], DrawRules::default()),
            Some(DrawReason::FiftyMoveRule)
        );

        let fresh = sealed(text, 0);
        let seen_once = [fresh.clone()];
        assert_eq!(draw_reason(&fresh, &seen_once, DrawRules::default()), None);
        let seen_twice = [fresh.clone(), fresh.clone()];
        assert_eq!(
            draw_reason(&fresh, &seen_twice, DrawRules::default()),
            Some(DrawReason::ThreefoldRepetition)
        );
    }
}
