//! Starting layouts for each game kind.

use super::GameKind;
use rand::Rng;
use variant_core::{Placement, PieceKind};

/// Grasshoppers stand in front of the pawns' usual squares.
pub const GRASSHOPPER: &str = "rnbqkbnr/gggggggg/pppppppp/8/8/PPPPPPPP/GGGGGGGG/RNBQKBNR";

/// Mini-Capablanca: archbishops replace the b-knights, chancellors the g-knights.
pub const MINI_CAPA: &str = "rabqkbcr/pppppppp/8/8/8/8/PPPPPPPP/RABQKBCR";

/// The starting placement text for `kind`.
///
/// Only Fischer random draws from `rng`.
pub fn initial_placement<R: Rng + ?Sized>(kind: GameKind, rng: &mut R) -> String {
    match kind {
        GameKind::Fischer => back_rank_placement(&fischer_back_rank(rng)),
        GameKind::Grasshopper => GRASSHOPPER.to_string(),
        GameKind::MiniCapa => MINI_CAPA.to_string(),
        _ => Placement::STANDARD.to_string(),
    }
}

/// A random Fischer-random back rank.
///
/// The king always stands between the two rooks and the bishops stand on
/// squares of opposite color.
pub fn fischer_back_rank<R: Rng + ?Sized>(rng: &mut R) -> [PieceKind; 8] {
    use PieceKind::*;

    let mut rank = vec![Rook, King, Rook];
    rank.insert(rng.gen_range(0..4), Queen);
    rank.insert(rng.gen_range(0..5), Knight);
    rank.insert(rng.gen_range(0..6), Knight);
    let first = rng.gen_range(0..7);
    rank.insert(first, Bishop);
    let slots = (first + 1) / 2;
    let l = if slots > 0 { rng.gen_range(0..slots) } else { 0 };
    rank.insert(2 * l + first % 2, Bishop);

    let mut out = [Pawn; 8];
    out.copy_from_slice(&rank);
    out
}

/// Placement text with `back` as both back ranks and pawns in front.
pub fn back_rank_placement(back: &[PieceKind; 8]) -> String {
    let white: String = back
        .iter()
        .map(|kind| kind.letter().to_ascii_uppercase())
        .collect();
    format!(
        "{}/pppppppp/8/8/8/8/PPPPPPPP/{}",
        white.to_ascii_lowercase(),
        white
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn file_of(rank: &[PieceKind; 8], kind: PieceKind) -> Vec<usize> {
        rank.iter()
            .enumerate()
            .filter(|(_, k)| **k == kind)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn fischer_back_ranks_are_well_formed() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let rank = fischer_back_rank(&mut rng);
            let rooks = file_of(&rank, PieceKind::Rook);
            let king = file_of(&rank, PieceKind::King);
            let bishops = file_of(&rank, PieceKind::Bishop);
            assert_eq!(rooks.len(), 2);
            assert_eq!(king.len(), 1);
            assert_eq!(file_of(&rank, PieceKind::Knight).len(), 2);
            assert_eq!(file_of(&rank, PieceKind::Queen).len(), 1);
            assert!(rooks[0] < king[0] && king[0] < rooks[1]);
            assert_eq!(bishops.len(), 2);
            assert_ne!(bishops[0] % 2, bishops[1] % 2);
        }
    }

    #[test]
    fn back_rank_text_mirrors_both_sides() {
        use PieceKind::*;
        let rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        assert_eq!(back_rank_placement(&rank), Placement::STANDARD);
    }

    #[test]
    fn fixed_layouts() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(initial_placement(GameKind::MiniCapa, &mut rng), MINI_CAPA);
        assert_eq!(
            initial_placement(GameKind::CrazyHouse, &mut rng),
            Placement::STANDARD
        );
        assert!(Placement::parse(GRASSHOPPER).is_ok());
    }
}
