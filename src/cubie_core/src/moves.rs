//! The static description of every face turn, and the grammar for naming
//! moves.

use std::{fmt, str::FromStr};
use thiserror::Error;

/// One of the six faces of the cube. Each face is also a group generator via
/// its quarter turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    U,
    D,
    F,
    B,
    L,
    R,
}

/// How a single quarter turn of a face acts on the pieces. Both cycles list
/// slots in the order pieces travel: the piece in `cycle[i - 1]` moves to
/// `cycle[i]`, and the piece in the last slot wraps around to the first. The
/// deltas line up with the cycle: the piece that lands in `cycle[i]` is
/// reoriented by `delta[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceTurn {
    pub corner_cycle: [usize; 4],
    pub edge_cycle: [usize; 4],
    pub corner_twists: [u8; 4],
    pub edge_flips: [u8; 4],
}

const NO_TWIST: [u8; 4] = [0, 0, 0, 0];
const NO_FLIP: [u8; 4] = [0, 0, 0, 0];
const FLIP_ALL: [u8; 4] = [1, 1, 1, 1];

const FACE_TURNS: [FaceTurn; 6] = [
    // U
    FaceTurn {
        corner_cycle: [0, 1, 2, 3],
        edge_cycle: [0, 1, 2, 3],
        corner_twists: NO_TWIST,
        edge_flips: NO_FLIP,
    },
    // D
    FaceTurn {
        corner_cycle: [4, 7, 6, 5],
        edge_cycle: [8, 11, 10, 9],
        corner_twists: NO_TWIST,
        edge_flips: NO_FLIP,
    },
    // F
    FaceTurn {
        corner_cycle: [0, 3, 5, 4],
        edge_cycle: [0, 4, 8, 7],
        corner_twists: [1, 2, 1, 2],
        edge_flips: FLIP_ALL,
    },
    // B
    FaceTurn {
        corner_cycle: [1, 7, 6, 2],
        edge_cycle: [2, 6, 10, 5],
        corner_twists: [1, 2, 1, 2],
        edge_flips: FLIP_ALL,
    },
    // L
    FaceTurn {
        corner_cycle: [0, 4, 7, 1],
        edge_cycle: [3, 7, 11, 4],
        corner_twists: [2, 1, 2, 1],
        edge_flips: FLIP_ALL,
    },
    // R
    FaceTurn {
        corner_cycle: [2, 6, 5, 3],
        edge_cycle: [1, 5, 9, 6],
        corner_twists: [2, 1, 2, 1],
        edge_flips: FLIP_ALL,
    },
];

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [U, D, F, B, L, R];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    /// The cycles and orientation deltas of this face's quarter turn.
    #[must_use]
    pub const fn turn(self) -> &'static FaceTurn {
        &FACE_TURNS[self as usize]
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::F => 'F',
            Face::B => 'B',
            Face::L => 'L',
            Face::R => 'R',
        }
    }

    fn from_letter(letter: char) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.letter() == letter)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Face {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => {
                Face::from_letter(letter).ok_or_else(|| MoveParseError::UnknownFace(s.to_owned()))
            }
            (None, _) => Err(MoveParseError::Empty),
            _ => Err(MoveParseError::UnknownFace(s.to_owned())),
        }
    }
}

/// How far a face is turned. Every quarter turn has order four, so a half turn
/// is two quarter turns and an inverse turn is three.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Turn {
    Quarter,
    Half,
    Inverse,
}

impl Turn {
    pub const ALL: [Self; 3] = [Turn::Quarter, Turn::Half, Turn::Inverse];

    /// The number of quarter turns this turn amounts to.
    #[must_use]
    pub const fn repetitions(self) -> usize {
        match self {
            Turn::Quarter => 1,
            Turn::Half => 2,
            Turn::Inverse => 3,
        }
    }

    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Turn::Quarter => "",
            Turn::Half => "2",
            Turn::Inverse => "'",
        }
    }
}

/// A face together with how far it is turned, e.g. `R`, `U2` or `F'`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

impl Move {
    /// All eighteen moves: every face as a quarter, half and inverse turn.
    pub const ALL: [Move; 18] = {
        let mut moves = [Move::quarter(Face::U); 18];
        let mut i = 0;
        while i < moves.len() {
            moves[i] = Move {
                face: Face::ALL[i % 6],
                turn: Turn::ALL[i / 6],
            };
            i += 1;
        }
        moves
    };

    #[must_use]
    pub const fn new(face: Face, turn: Turn) -> Move {
        Move { face, turn }
    }

    /// The generator associated with `face`.
    #[must_use]
    pub const fn quarter(face: Face) -> Move {
        Move {
            face,
            turn: Turn::Quarter,
        }
    }

    /// The move that undoes this one.
    #[must_use]
    pub const fn inverse(self) -> Move {
        let turn = match self.turn {
            Turn::Quarter => Turn::Inverse,
            Turn::Half => Turn::Half,
            Turn::Inverse => Turn::Quarter,
        };
        Move {
            face: self.face,
            turn,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.turn.suffix())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("Empty move token")]
    Empty,
    #[error("Unknown face `{0}`, expected one of U, D, F, B, L or R")]
    UnknownFace(String),
    #[error("Invalid modifier in move `{0}`, expected nothing, `2` or `'`")]
    InvalidModifier(String),
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars.next().ok_or(MoveParseError::Empty)?;
        let face =
            Face::from_letter(letter).ok_or_else(|| MoveParseError::UnknownFace(s.to_owned()))?;

        let turn = match chars.as_str() {
            "" => Turn::Quarter,
            "2" => Turn::Half,
            "'" => Turn::Inverse,
            _ => return Err(MoveParseError::InvalidModifier(s.to_owned())),
        };

        Ok(Move { face, turn })
    }
}

/// Parse a whitespace separated move sequence such as `"R U R' U'"`. The
/// whole sequence is rejected if any token is invalid.
///
/// # Errors
///
/// Returns the error of the first token that isn't a valid move.
pub fn parse_moves(sequence: &str) -> Result<Vec<Move>, MoveParseError> {
    sequence.split_whitespace().map(str::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn parse_all_tokens() {
        for face in Face::ALL {
            assert_eq!(format!("{face}").parse(), Ok(Move::new(face, Turn::Quarter)));
            assert_eq!(format!("{face}2").parse(), Ok(Move::new(face, Turn::Half)));
            assert_eq!(format!("{face}'").parse(), Ok(Move::new(face, Turn::Inverse)));
        }
    }

    #[test]
    fn display_round_trips() {
        for move_ in Move::ALL {
            assert_eq!(move_.to_string().parse(), Ok(move_));
        }
    }

    #[test]
    fn all_moves_are_distinct() {
        assert_eq!(Move::ALL.iter().unique().count(), 18);
    }

    #[test]
    fn reject_bad_tokens() {
        assert_eq!("".parse::<Move>(), Err(MoveParseError::Empty));
        assert_eq!(
            "X".parse::<Move>(),
            Err(MoveParseError::UnknownFace("X".to_owned()))
        );
        assert_eq!(
            "u".parse::<Move>(),
            Err(MoveParseError::UnknownFace("u".to_owned()))
        );
        assert_eq!(
            "U3".parse::<Move>(),
            Err(MoveParseError::InvalidModifier("U3".to_owned()))
        );
        assert_eq!(
            "U2'".parse::<Move>(),
            Err(MoveParseError::InvalidModifier("U2'".to_owned()))
        );
    }

    #[test]
    fn parse_sequence() {
        assert_eq!(
            parse_moves("R U2  F'\n").unwrap(),
            vec![
                Move::new(Face::R, Turn::Quarter),
                Move::new(Face::U, Turn::Half),
                Move::new(Face::F, Turn::Inverse),
            ]
        );
        assert!(parse_moves("").unwrap().is_empty());
        assert_eq!(
            parse_moves("R Q U"),
            Err(MoveParseError::UnknownFace("Q".to_owned()))
        );
    }

    #[test]
    fn face_tables_are_consistent() {
        for face in Face::ALL {
            let turn = face.turn();
            assert_eq!(turn.corner_cycle.iter().unique().count(), 4);
            assert_eq!(turn.edge_cycle.iter().unique().count(), 4);
            assert!(turn.corner_cycle.iter().all(|&slot| slot < 8));
            assert!(turn.edge_cycle.iter().all(|&slot| slot < 12));
            assert_eq!(turn.corner_twists.iter().map(|&t| u32::from(t)).sum::<u32>() % 3, 0);
            assert_eq!(turn.edge_flips.iter().map(|&f| u32::from(f)).sum::<u32>() % 2, 0);
        }
    }

    #[test]
    fn face_from_str() {
        assert_eq!("L".parse::<Face>(), Ok(Face::L));
        assert_eq!("".parse::<Face>(), Err(MoveParseError::Empty));
        assert!("LR".parse::<Face>().is_err());
    }

    #[test]
    fn inverse_of_inverse() {
        for move_ in Move::ALL {
            assert_eq!(move_.inverse().inverse(), move_);
            assert_eq!(move_.inverse().face, move_.face);
        }
    }
}
