//! Per-kind movement: reachability sets, attack tests and line geometry.
//!
//! Everything here is pseudo-legal. Whose turn it is, pins, and whether the
//! mover's king ends up attacked are the analyzer's business.

use crate::Board;
use variant_core::{Color, Piece, PieceKind, Square, SquareSet};

/// Rook directions.
pub const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Bishop directions.
pub const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// All eight directions, as walked by kings and grasshoppers.
pub const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Knight jumps.
pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Every square the piece on `from` could move to right now, ignoring pins
/// and king safety. Empty if `from` is empty.
pub fn reachable(board: &Board, from: Square) -> SquareSet {
    match board.piece_at(from) {
        Some(piece) => reach_of(board, from, piece),
        None => SquareSet::EMPTY,
    }
}

/// Reachability of `piece` as if it stood on `from`.
pub fn reach_of(board: &Board, from: Square, piece: Piece) -> SquareSet {
    let mut reach = SquareSet::EMPTY;
    match piece.kind {
        PieceKind::Pawn => pawn_reach(board, from, piece.color, &mut reach),
        PieceKind::King => steps(board, from, piece.color, &ALL_DIRECTIONS, &mut reach),
        PieceKind::Grasshopper => hops(board, from, piece.color, &mut reach),
        PieceKind::AnyDrop => {}
        kind => {
            if kind.jumps_like_knight() {
                steps(board, from, piece.color, &KNIGHT_JUMPS, &mut reach);
            }
            if kind.slides_orthogonally() {
                slides(board, from, piece.color, &ORTHOGONAL, &mut reach);
            }
            if kind.slides_diagonally() {
                slides(board, from, piece.color, &DIAGONAL, &mut reach);
            }
        }
    }
    reach
}

fn lands_on(board: &Board, sq: Square, color: Color) -> bool {
    board.piece_at(sq).map_or(true, |p| p.color != color)
}

fn steps(board: &Board, from: Square, color: Color, offsets: &[(i8, i8)], reach: &mut SquareSet) {
    for &(df, dr) in offsets {
        if let Some(to) = from.offset(df, dr) {
            if lands_on(board, to, color) {
                reach.insert(to);
            }
        }
    }
}

fn slides(board: &Board, from: Square, color: Color, dirs: &[(i8, i8)], reach: &mut SquareSet) {
    for &(df, dr) in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(df, dr) {
            match board.piece_at(to) {
                None => reach.insert(to),
                Some(p) => {
                    if p.color != color {
                        reach.insert(to);
                    }
                    break;
                }
            }
            cur = to;
        }
    }
}

/// Hop over the first piece on each line to the square just beyond it.
fn hops(board: &Board, from: Square, color: Color, reach: &mut SquareSet) {
    for &(df, dr) in &ALL_DIRECTIONS {
        let mut cur = from;
        while let Some(next) = cur.offset(df, dr) {
            cur = next;
            if board.piece_at(cur).is_some() {
                if let Some(landing) = cur.offset(df, dr) {
                    if lands_on(board, landing, color) {
                        reach.insert(landing);
                    }
                }
                break;
            }
        }
    }
}

fn pawn_reach(board: &Board, from: Square, color: Color, reach: &mut SquareSet) {
    let dir = color.pawn_direction();
    if let Some(one) = from.offset(0, dir) {
        if board.is_empty(one) {
            reach.insert(one);
            if from.rank() == color.pawn_rank() {
                if let Some(two) = one.offset(0, dir) {
                    if board.is_empty(two) {
                        reach.insert(two);
                    }
                }
            }
        }
    }
    for df in [-1, 1] {
        if let Some(to) = from.offset(df, dir) {
            if board.piece_at(to).is_some_and(|p| p.color != color) {
                reach.insert(to);
            }
        }
    }
    if let Some(target) = en_passant_target(board, from, color) {
        reach.insert(target);
    }
}

/// The square a pawn of `color` on `from` lands on when capturing the
/// tracked en-passant pawn, if it can.
pub fn en_passant_target(board: &Board, from: Square, color: Color) -> Option<Square> {
    let victim_sq = board.en_passant()?;
    let victim = board.piece_at(victim_sq)?;
    if !victim.is(PieceKind::Pawn) || victim.color == color {
        return None;
    }
    if victim_sq.rank() != from.rank()
        || (victim_sq.file().index() as i8 - from.file().index() as i8).abs() != 1
    {
        return None;
    }
    let target = victim_sq.offset(0, color.pawn_direction())?;
    board.is_empty(target).then_some(target)
}

/// Unit step from `a` towards `b` when both share a rank, file or
/// diagonal.
pub fn line_step(a: Square, b: Square) -> Option<(i8, i8)> {
    let df = b.file().index() as i8 - a.file().index() as i8;
    let dr = b.rank().index() as i8 - a.rank().index() as i8;
    if (df, dr) == (0, 0) {
        return None;
    }
    if df == 0 || dr == 0 || df.abs() == dr.abs() {
        Some((df.signum(), dr.signum()))
    } else {
        None
    }
}

/// Squares strictly between `a` and `b`; empty unless they share a line.
pub fn between(a: Square, b: Square) -> SquareSet {
    let mut set = SquareSet::EMPTY;
    if let Some((df, dr)) = line_step(a, b) {
        let mut cur = a;
        while let Some(next) = cur.offset(df, dr) {
            if next == b {
                break;
            }
            set.insert(next);
            cur = next;
        }
    }
    set
}

fn path_clear(board: &Board, a: Square, b: Square) -> bool {
    between(a, b).into_iter().all(|sq| board.is_empty(sq))
}

/// True if `piece`, standing on `from`, attacks `target` whatever occupies
/// it. Pawns attack diagonally only.
pub fn attacks(board: &Board, from: Square, piece: Piece, target: Square) -> bool {
    let df = target.file().index() as i8 - from.file().index() as i8;
    let dr = target.rank().index() as i8 - from.rank().index() as i8;
    if (df, dr) == (0, 0) {
        return false;
    }
    let (adf, adr) = (df.abs(), dr.abs());
    match piece.kind {
        PieceKind::Pawn => dr == piece.color.pawn_direction() && adf == 1,
        PieceKind::King => adf <= 1 && adr <= 1,
        PieceKind::Grasshopper => grasshopper_attacks(board, from, target),
        PieceKind::AnyDrop => false,
        kind => {
            let knight = kind.jumps_like_knight() && ((adf, adr) == (1, 2) || (adf, adr) == (2, 1));
            let orthogonal = kind.slides_orthogonally() && (df == 0 || dr == 0);
            let diagonal = kind.slides_diagonally() && adf == adr;
            knight || ((orthogonal || diagonal) && path_clear(board, from, target))
        }
    }
}

fn grasshopper_attacks(board: &Board, from: Square, target: Square) -> bool {
    let Some((df, dr)) = line_step(from, target) else {
        return false;
    };
    let Some(hurdle) = target.offset(-df, -dr) else {
        return false;
    };
    hurdle != from && board.piece_at(hurdle).is_some() && path_clear(board, from, hurdle)
}

/// Squares of `by`'s pieces attacking `target`, a1 first.
pub fn attackers(board: &Board, target: Square, by: Color) -> Vec<Square> {
    board
        .pieces_of(by)
        .filter(|&(sq, piece)| attacks(board, sq, piece, target))
        .map(|(sq, _)| sq)
        .collect()
}

/// True if any piece of `by` attacks `target`.
pub fn is_attacked(board: &Board, target: Square, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(sq, piece)| attacks(board, sq, piece, target))
}
