//! Variant rule policy.
//!
//! A [`GameKind`] is what the players chose; the [`RuleSet`] derived from it
//! is the small set of predicates the analyzer and the move applier consult
//! (king safety, castling, drops, forced captures, how stalemate resolves).

pub mod layout;

use serde::{Deserialize, Serialize};
use variant_core::{Color, PieceKind};

/// The eight supported game kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    #[default]
    Regular,
    Fischer,
    Suicide,
    Grasshopper,
    #[serde(alias = "mini-capa")]
    MiniCapa,
    #[serde(alias = "free-play")]
    FreePlay,
    CrazyHouse,
    BugHouse,
}

impl GameKind {
    pub const ALL: [GameKind; 8] = [
        GameKind::Regular,
        GameKind::Fischer,
        GameKind::Suicide,
        GameKind::Grasshopper,
        GameKind::MiniCapa,
        GameKind::FreePlay,
        GameKind::CrazyHouse,
        GameKind::BugHouse,
    ];

    /// The rule-set this kind plays under.
    pub const fn rule_set(self) -> RuleSet {
        match self {
            GameKind::Fischer => RuleSet::Fischer,
            GameKind::Suicide => RuleSet::Suicide,
            GameKind::FreePlay => RuleSet::FreePlay,
            GameKind::CrazyHouse | GameKind::BugHouse => RuleSet::CrazyHouse,
            GameKind::Regular | GameKind::Grasshopper | GameKind::MiniCapa => RuleSet::Regular,
        }
    }

    /// Kinds a pawn may promote to, in generation order.
    pub const fn promotion_kinds(self) -> &'static [PieceKind] {
        use PieceKind::*;
        match self {
            GameKind::Suicide => &[King, Queen, Rook, Knight, Bishop],
            GameKind::Grasshopper => &[Grasshopper, Queen, Rook, Knight, Bishop],
            GameKind::MiniCapa => &[Archbishop, Chancellor, Queen, Rook, Knight, Bishop],
            _ => &[Queen, Rook, Knight, Bishop],
        }
    }

    #[inline]
    pub const fn is_crazyhouse(self) -> bool {
        matches!(self, GameKind::CrazyHouse)
    }

    /// Crazyhouse or bughouse: captured pieces come back as drops.
    #[inline]
    pub const fn has_drops(self) -> bool {
        matches!(self, GameKind::CrazyHouse | GameKind::BugHouse)
    }
}

/// Rules derived from a [`GameKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleSet {
    Regular,
    Fischer,
    Suicide,
    FreePlay,
    CrazyHouse,
}

impl RuleSet {
    /// Kings must not be left attacked; exactly one per side.
    #[inline]
    pub const fn king_safety(self) -> bool {
        !matches!(self, RuleSet::Suicide | RuleSet::FreePlay)
    }

    #[inline]
    pub const fn allows_castling(self) -> bool {
        self.king_safety()
    }

    /// Castling may also be written as the king taking its own rook.
    #[inline]
    pub const fn fischer_castling(self) -> bool {
        matches!(self, RuleSet::Fischer)
    }

    #[inline]
    pub const fn allows_drops(self) -> bool {
        matches!(self, RuleSet::CrazyHouse)
    }

    /// Any capture, when available, must be played.
    #[inline]
    pub const fn captures_forced(self) -> bool {
        matches!(self, RuleSet::Suicide)
    }

    /// Winner when `mover` has no legal move and is not in check.
    pub const fn stalemate_winner(self, mover: Color) -> Option<Color> {
        match self {
            RuleSet::Suicide => Some(mover),
            RuleSet::FreePlay => Some(mover.opposite()),
            _ => None,
        }
    }

    /// Winner when `mover` has no pieces left at all.
    pub const fn bare_side_winner(self, mover: Color) -> Color {
        match self {
            RuleSet::Suicide | RuleSet::FreePlay => mover,
            _ => mover.opposite(),
        }
    }
}

/// Which automatic draw rules are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawRules {
    pub repetition: bool,
    pub fifty_moves: bool,
    pub insufficient_material: bool,
}

impl Default for DrawRules {
    fn default() -> Self {
        DrawRules {
            repetition: true,
            fifty_moves: true,
            insufficient_material: true,
        }
    }
}

impl DrawRules {
    /// No automatic draws at all.
    pub const NONE: DrawRules = DrawRules {
        repetition: false,
        fifty_moves: false,
        insufficient_material: false,
    };
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// One side won.
    Win { winner: Color, reason: WinReason },
    /// Draw with a specific reason.
    Draw(DrawReason),
    /// Abandoned without a result.
    Aborted,
}

impl GameResult {
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameResult::Win { winner, .. } => Some(winner),
            _ => None,
        }
    }

    pub const fn is_draw(self) -> bool {
        matches!(self, GameResult::Draw(_))
    }
}

/// How a game was won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    Checkmate,
    /// Stalemate resolved as a win (suicide, free play).
    Stalemate,
    /// The side to move had no pieces left.
    NoPieces,
    Resignation,
    Timeout,
    /// The partner board of a bughouse table ended.
    PartnerBoard,
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// Stalemate - no legal moves but not in check.
    Stalemate,
    /// Neither side can mate.
    InsufficientMaterial,
    /// 100 half-moves without a pawn move or capture.
    FiftyMoveRule,
    /// The same position for the third time.
    ThreefoldRepetition,
    /// Draw by agreement.
    Agreement,
    /// Flag fell, but the opponent has no mating material.
    TimeoutVsInsufficientMaterial,
    /// The partner board of a bughouse table was drawn.
    PartnerBoard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_rule_sets() {
        assert_eq!(GameKind::Regular.rule_set(), RuleSet::Regular);
        assert_eq!(GameKind::Grasshopper.rule_set(), RuleSet::Regular);
        assert_eq!(GameKind::MiniCapa.rule_set(), RuleSet::Regular);
        assert_eq!(GameKind::Fischer.rule_set(), RuleSet::Fischer);
        assert_eq!(GameKind::BugHouse.rule_set(), RuleSet::CrazyHouse);
        assert_eq!(GameKind::CrazyHouse.rule_set(), RuleSet::CrazyHouse);
    }

    #[test]
    fn king_safety_only_outside_suicide_and_free_play() {
        assert!(RuleSet::Regular.king_safety());
        assert!(RuleSet::CrazyHouse.king_safety());
        assert!(!RuleSet::Suicide.king_safety());
        assert!(!RuleSet::FreePlay.allows_castling());
    }

    #[test]
    fn stalemate_outcomes() {
        assert_eq!(RuleSet::Regular.stalemate_winner(Color::White), None);
        assert_eq!(
            RuleSet::Suicide.stalemate_winner(Color::White),
            Some(Color::White)
        );
        assert_eq!(
            RuleSet::FreePlay.stalemate_winner(Color::White),
            Some(Color::Black)
        );
    }

    #[test]
    fn promotion_choices() {
        assert_eq!(GameKind::Regular.promotion_kinds().len(), 4);
        assert_eq!(GameKind::Suicide.promotion_kinds()[0], PieceKind::King);
        assert!(GameKind::MiniCapa
            .promotion_kinds()
            .contains(&PieceKind::Chancellor));
        assert!(!GameKind::Fischer
            .promotion_kinds()
            .contains(&PieceKind::Grasshopper));
    }
}
