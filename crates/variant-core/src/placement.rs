//! Board placement text.
//!
//! The placement field of FEN, extended with the variant letters
//! (`G`rasshopper, `A`rchbishop, `C`hancellor), a `~` suffix marking a
//! promoted piece, and an optional bracketed holdings list as used by
//! crazyhouse (`.../RNBQKB1R[Pn]`).

use crate::{Color, Piece, Square};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing placement text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("expected 8 ranks, got {0}")]
    RankCount(usize),

    #[error("rank {rank} has {squares} squares, expected 8")]
    RankLength { rank: u8, squares: u32 },

    #[error("invalid character '{found}' in rank {rank}")]
    InvalidCharacter { rank: u8, found: char },

    #[error("invalid holdings: {0}")]
    InvalidHoldings(String),
}

/// Parsed placement: one slot per square plus pooled pieces.
///
/// Pieces come out unmoved. Holdings keep their color as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub squares: [Option<Piece>; 64],
    pub holdings: Vec<Piece>,
}

impl Placement {
    /// The standard starting placement.
    pub const STANDARD: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    /// Parses placement text.
    pub fn parse(text: &str) -> Result<Self, PlacementError> {
        let (board, holdings) = match text.find('[') {
            Some(open) => {
                let rest = &text[open + 1..];
                let inner = rest
                    .strip_suffix(']')
                    .ok_or_else(|| PlacementError::InvalidHoldings(rest.to_string()))?;
                (&text[..open], Self::parse_holdings(inner)?)
            }
            None => (text, Vec::new()),
        };

        let ranks: Vec<&str> = board.split('/').collect();
        if ranks.len() != 8 {
            return Err(PlacementError::RankCount(ranks.len()));
        }

        let mut squares: [Option<Piece>; 64] = [None; 64];
        for (i, rank_text) in ranks.iter().enumerate() {
            let rank = 7 - i as i8;
            let mut file: u32 = 0;
            let mut last: Option<Square> = None;
            for c in rank_text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip;
                    last = None;
                    continue;
                }
                if c == '~' {
                    let sq = last.ok_or(PlacementError::InvalidCharacter {
                        rank: rank as u8 + 1,
                        found: c,
                    })?;
                    if let Some(marked) = squares[sq.index() as usize].as_mut() {
                        marked.promoted = true;
                    }
                    last = None;
                    continue;
                }
                let piece = Piece::from_fen_char(c).ok_or(PlacementError::InvalidCharacter {
                    rank: rank as u8 + 1,
                    found: c,
                })?;
                let sq = Square::from_coords(file as i8, rank).ok_or(
                    PlacementError::RankLength {
                        rank: rank as u8 + 1,
                        squares: file + 1,
                    },
                )?;
                squares[sq.index() as usize] = Some(piece);
                last = Some(sq);
                file += 1;
            }
            if file != 8 {
                return Err(PlacementError::RankLength {
                    rank: rank as u8 + 1,
                    squares: file,
                });
            }
        }

        Ok(Placement { squares, holdings })
    }

    fn parse_holdings(text: &str) -> Result<Vec<Piece>, PlacementError> {
        let mut pieces: Vec<Piece> = Vec::new();
        for c in text.chars() {
            if c == '~' {
                let last = pieces
                    .last_mut()
                    .ok_or_else(|| PlacementError::InvalidHoldings(text.to_string()))?;
                last.promoted = true;
                continue;
            }
            if c == '-' {
                continue;
            }
            let piece = Piece::from_fen_char(c)
                .ok_or_else(|| PlacementError::InvalidHoldings(text.to_string()))?;
            pieces.push(piece);
        }
        Ok(pieces)
    }

    /// Writes the board part, rank 8 first.
    pub fn board_text(squares: &[Option<Piece>; 64], mark_promoted: bool) -> String {
        let mut out = String::with_capacity(80);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match squares[rank * 8 + file] {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.to_fen_char());
                        if mark_promoted && piece.promoted {
                            out.push('~');
                        }
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }

    /// Writes a bracketed holdings list, white pieces first.
    pub fn holdings_text(pieces: &[Piece]) -> String {
        let mut out = String::from("[");
        for color in Color::ALL {
            for piece in pieces.iter().filter(|p| p.color == color) {
                out.push(piece.to_fen_char());
                if piece.promoted {
                    out.push('~');
                }
            }
        }
        out.push(']');
        out
    }

    /// Full text, with holdings only when there are any.
    pub fn to_text(&self) -> String {
        let mut out = Self::board_text(&self.squares, true);
        if !self.holdings.is_empty() {
            out.push_str(&Self::holdings_text(&self.holdings));
        }
        out
    }

    /// The piece on `sq`.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize]
    }
}

impl FromStr for Placement {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
