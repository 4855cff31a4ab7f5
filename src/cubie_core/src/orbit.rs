//! Subgroups generated by face turns, found by exhaustive closure.

use crate::{
    cube::{Cube, CubeSnapshot},
    moves::{Face, Move, MoveParseError},
    start, success, working,
};
use fxhash::FxHashSet;
use itertools::Itertools;
use log::{debug, info};
use std::{collections::VecDeque, fmt, str::FromStr, time::Instant};
use thiserror::Error;

/// How often closure search reports progress, in discovered states.
const PROGRESS_INTERVAL: usize = 1 << 20;

/// A non-empty set of faces whose quarter turns generate a subgroup. The
/// double and inverse turns are powers of the quarter turn and need not be
/// listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeneratorSet(u8);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorParseError {
    #[error("A generator set needs at least one face")]
    Empty,
    #[error(transparent)]
    InvalidFace(#[from] MoveParseError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrbitError {
    #[error("The subgroup generated by <{generators}> has more than {limit} elements")]
    TooManyStates {
        generators: GeneratorSet,
        limit: usize,
    },
}

impl GeneratorSet {
    /// All six faces.
    pub const ALL: GeneratorSet = GeneratorSet(0b11_1111);

    /// Create a generator set from some faces. Returns `None` if no faces are
    /// given.
    pub fn new(faces: impl IntoIterator<Item = Face>) -> Option<GeneratorSet> {
        let mask = faces
            .into_iter()
            .fold(0, |mask, face| mask | (1 << face as u8));
        (mask != 0).then_some(GeneratorSet(mask))
    }

    #[must_use]
    pub fn contains(self, face: Face) -> bool {
        self.0 & (1 << face as u8) != 0
    }

    /// The faces in the set, in `Face::ALL` order.
    pub fn faces(self) -> impl Iterator<Item = Face> {
        Face::ALL.into_iter().filter(move |&face| self.contains(face))
    }

    /// The quarter turn of every face in the set.
    pub fn generators(self) -> impl Iterator<Item = Move> {
        self.faces().map(Move::quarter)
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Every non-empty subset of the six faces: all singletons first, then all
    /// pairs, and so on, each size in lexicographic `Face::ALL` order.
    pub fn all_subsets() -> impl Iterator<Item = GeneratorSet> {
        (1..=Face::ALL.len()).flat_map(|size| {
            Face::ALL
                .into_iter()
                .combinations(size)
                .filter_map(GeneratorSet::new)
        })
    }
}

impl fmt::Display for GeneratorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.faces().join(", "))
    }
}

impl FromStr for GeneratorSet {
    type Err = GeneratorParseError;

    /// Parse faces written as letters, optionally separated by whitespace or
    /// commas: `"U D"`, `"UD"` and `"U,D"` are all the same set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let faces = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| c.to_string().parse::<Face>())
            .collect::<Result<Vec<_>, _>>()?;

        GeneratorSet::new(faces).ok_or(GeneratorParseError::Empty)
    }
}

/// Find every state reachable from solved using the generators, giving up as
/// soon as more than `limit` states have been found.
///
/// The frontier only ever holds snapshots; each expansion restores a fresh
/// cube from one.
///
/// # Errors
///
/// If the subgroup has more than `limit` elements.
pub fn subgroup_elements_bounded(
    generators: &GeneratorSet,
    limit: usize,
) -> Result<FxHashSet<CubeSnapshot>, OrbitError> {
    info!(start!("Enumerating the subgroup generated by <{}>"), generators);
    let start = Instant::now();

    let generator_moves = generators.generators().collect_vec();
    let solved = Cube::new().state();

    let mut visited = FxHashSet::default();
    visited.insert(solved);
    let mut frontier = VecDeque::from([solved]);

    while let Some(state) = frontier.pop_front() {
        for &generator in &generator_moves {
            let mut cube = Cube::from(state);
            cube.apply_move(generator);
            let next = cube.state();

            if !visited.insert(next) {
                continue;
            }

            if visited.len() > limit {
                debug!(
                    "Gave up on <{}> after {} states in {:.3?}",
                    generators,
                    visited.len(),
                    start.elapsed()
                );
                return Err(OrbitError::TooManyStates {
                    generators: *generators,
                    limit,
                });
            }

            if visited.len() % PROGRESS_INTERVAL == 0 {
                debug!(
                    working!("{} states found, {} in the frontier"),
                    visited.len(),
                    frontier.len()
                );
            }

            frontier.push_back(next);
        }
    }

    info!(
        success!("<{}> has order {} (found in {:.3?})"),
        generators,
        visited.len(),
        start.elapsed()
    );

    Ok(visited)
}

/// Every element of the subgroup generated by `generators`.
#[must_use]
pub fn subgroup_elements(generators: &GeneratorSet) -> FxHashSet<CubeSnapshot> {
    match subgroup_elements_bounded(generators, usize::MAX) {
        Ok(elements) => elements,
        Err(OrbitError::TooManyStates { .. }) => {
            unreachable!("a set cannot hold more than usize::MAX states")
        }
    }
}

/// The order of the subgroup generated by `generators`, computed by closure.
/// The search runs to completion no matter how large the subgroup is.
#[must_use]
pub fn enumerate_subgroup(generators: &GeneratorSet) -> usize {
    subgroup_elements(generators).len()
}

/// Like `enumerate_subgroup`, but gives up once more than `limit` states have
/// been found.
///
/// # Errors
///
/// If the subgroup has more than `limit` elements.
pub fn enumerate_subgroup_bounded(
    generators: &GeneratorSet,
    limit: usize,
) -> Result<usize, OrbitError> {
    subgroup_elements_bounded(generators, limit).map(|elements| elements.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_generator_sets() {
        let ud = GeneratorSet::new([Face::U, Face::D]).unwrap();
        assert_eq!("U D".parse(), Ok(ud));
        assert_eq!("DU".parse(), Ok(ud));
        assert_eq!("U,D,U".parse(), Ok(ud));
        assert_eq!("".parse::<GeneratorSet>(), Err(GeneratorParseError::Empty));
        assert!(matches!(
            "U X".parse::<GeneratorSet>(),
            Err(GeneratorParseError::InvalidFace(_))
        ));
        assert_eq!(ud.to_string(), "U, D");
        assert_eq!(ud.len(), 2);
    }

    #[test]
    fn empty_set_is_rejected() {
        assert_eq!(GeneratorSet::new(std::iter::empty()), None);
    }

    #[test]
    fn sixty_three_subsets() {
        let subsets = GeneratorSet::all_subsets().collect_vec();
        assert_eq!(subsets.len(), 63);
        assert_eq!(subsets.iter().unique().count(), 63);
        assert_eq!(subsets[0], GeneratorSet::new([Face::U]).unwrap());
        assert_eq!(subsets[6], GeneratorSet::new([Face::U, Face::D]).unwrap());
        assert_eq!(subsets[62], GeneratorSet::ALL);
        assert!(subsets.windows(2).all(|w| w[0].len() <= w[1].len()));
    }

    #[test]
    fn single_face_is_cyclic_of_order_four() {
        for face in Face::ALL {
            let generators = GeneratorSet::new([face]).unwrap();
            assert_eq!(enumerate_subgroup(&generators), 4);
        }
    }

    #[test]
    fn bound_is_respected() {
        let u = GeneratorSet::new([Face::U]).unwrap();
        assert_eq!(enumerate_subgroup_bounded(&u, 4), Ok(4));
        assert_eq!(
            enumerate_subgroup_bounded(&u, 3),
            Err(OrbitError::TooManyStates {
                generators: u,
                limit: 3
            })
        );
    }
}
