//! Pin detection.
//!
//! Run as a separate pass before move generation: the result is a plain
//! list the generator looks pieces up in, so nothing is mutated while
//! legality is being decided.

use crate::movement::{between, line_step};
use crate::Board;
use variant_core::{Color, PieceKind, Square, SquareSet};

/// A piece that may not leave the line between its king and `pinner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub pinned: Square,
    pub pinner: Square,
}

impl Pin {
    /// Squares the pinned piece may still move to: the line up to and
    /// including the pinner.
    pub fn allowed(&self, king: Square) -> SquareSet {
        let mut line = between(king, self.pinner);
        line.insert(self.pinner);
        line
    }
}

/// All pins against the `color` king standing on `king`.
///
/// A slider pins when exactly one `color` piece stands between it and the
/// king. A grasshopper pins when the square next to the king on its line is
/// occupied (its hurdle) and exactly one `color` piece stands between the
/// grasshopper and that hurdle: moving that piece off the line clears the
/// hop onto the king.
pub fn find_pins(board: &Board, king: Square, color: Color) -> Vec<Pin> {
    let mut pins = Vec::new();
    for (from, piece) in board.pieces_of(color.opposite()) {
        let Some((df, dr)) = line_step(from, king) else {
            continue;
        };
        let orthogonal = df == 0 || dr == 0;
        let blockers = if piece.kind == PieceKind::Grasshopper {
            let Some(hurdle) = king.offset(-df, -dr) else {
                continue;
            };
            if hurdle == from || board.is_empty(hurdle) {
                continue;
            }
            between(from, hurdle)
        } else if (orthogonal && piece.kind.slides_orthogonally())
            || (!orthogonal && piece.kind.slides_diagonally())
        {
            between(from, king)
        } else {
            continue;
        };

        let mut occupied = blockers.into_iter().filter(|&sq| !board.is_empty(sq));
        if let (Some(only), None) = (occupied.next(), occupied.next()) {
            if board.piece_at(only).is_some_and(|p| p.color == color) {
                pins.push(Pin {
                    pinned: only,
                    pinner: from,
                });
            }
        }
    }
    pins
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn rook_pins_knight() {
        let board = Board::parse("4r1k1/8/8/8/8/8/4N3/4K3").unwrap();
        let pins = find_pins(&board, sq("e1"), Color::White);
        assert_eq!(
            pins,
            vec![Pin {
                pinned: sq("e2"),
                pinner: sq("e8")
            }]
        );
    }

    #[test]
    fn two_blockers_are_not_pinned() {
        let board = Board::parse("4r1k1/8/8/8/8/4B3/4N3/4K3").unwrap();
        assert!(find_pins(&board, sq("e1"), Color::White).is_empty());
    }

    #[test]
    fn enemy_blocker_is_not_pinned() {
        let board = Board::parse("4r1k1/8/8/8/8/8/4n3/4K3").unwrap();
        assert!(find_pins(&board, sq("e1"), Color::White).is_empty());
    }

    #[test]
    fn wrong_line_kind_does_not_pin() {
        // A rook on the diagonal and a bishop on the file pin nothing.
        let board = Board::parse("4b1k1/8/8/r7/8/2N5/4N3/4K3").unwrap();
        assert!(find_pins(&board, sq("e1"), Color::White).is_empty());
    }

    #[test]
    fn archbishop_pins_on_diagonal() {
        let board = Board::parse("6k1/8/8/a7/8/2N5/8/4K3").unwrap();
        let pins = find_pins(&board, sq("e1"), Color::White);
        assert_eq!(pins.len(), 1);
        assert_eq!(pins[0].pinner, sq("a5"));
        assert_eq!(
            pins[0].allowed(sq("e1")),
            [sq("d2"), sq("c3"), sq("b4"), sq("a5")].into_iter().collect()
        );
    }

    #[test]
    fn grasshopper_pins_behind_hurdle() {
        // Hurdle on e2, white knight on e5 between the grasshopper and it.
        let board = Board::parse("4g1k1/8/8/4N3/8/8/4P3/4K3").unwrap();
        let pins = find_pins(&board, sq("e1"), Color::White);
        assert_eq!(
            pins,
            vec![Pin {
                pinned: sq("e5"),
                pinner: sq("e8")
            }]
        );
    }

    #[test]
    fn grasshopper_without_hurdle_pins_nothing() {
        let board = Board::parse("4g1k1/8/8/4N3/8/8/8/4K3").unwrap();
        assert!(find_pins(&board, sq("e1"), Color::White).is_empty());
    }
}
