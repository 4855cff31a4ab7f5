use crate::{
    cycles::{self, Parity},
    moves::{Face, Move},
    piece::{OrbitDef, Piece, solved_orbit},
};
use itertools::Itertools;
use log::trace;
use serde::{Deserialize, Serialize};
use std::{fmt, num::NonZeroU8};
use thiserror::Error;

/// The full state of the puzzle: which piece sits in each of the 8 corner and
/// 12 edge slots, and how each is oriented.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cube {
    corners: [Piece; 8],
    edges: [Piece; 12],
}

/// An immutable capture of a `Cube`, corners then edges. This is the key of
/// the visited set during subgroup enumeration as well as the on-disk format
/// for saving and restoring states.
///
/// A snapshot always describes a structurally valid cube: both orbits are
/// bijections and every orientation is in range. Deserializing an invalid
/// snapshot fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SnapshotRepr", into = "SnapshotRepr")]
pub struct CubeSnapshot {
    corners: [Piece; 8],
    edges: [Piece; 12],
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Expected {expected} corners but got {actual}")]
    CornerCount { expected: usize, actual: usize },
    #[error("Expected {expected} edges but got {actual}")]
    EdgeCount { expected: usize, actual: usize },
    #[error("The corners are not a permutation of 0..8 with orientations below 3: {0:?}")]
    InvalidCorners(Vec<(u8, u8)>),
    #[error("The edges are not a permutation of 0..12 with orientations below 2: {0:?}")]
    InvalidEdges(Vec<(u8, u8)>),
}

/// Pieces as `(position, orientation)` pairs.
#[derive(Serialize, Deserialize)]
struct SnapshotRepr {
    corners: Vec<(u8, u8)>,
    edges: Vec<(u8, u8)>,
}

impl CubeSnapshot {
    /// Create a snapshot from `(position, orientation)` pairs.
    ///
    /// # Errors
    ///
    /// If either orbit has the wrong length, is not a permutation, or holds an
    /// out of range orientation.
    pub fn new(corners: &[(u8, u8)], edges: &[(u8, u8)]) -> Result<CubeSnapshot, SnapshotError> {
        let to_pieces = |pairs: &[(u8, u8)]| {
            pairs
                .iter()
                .map(|&(position, orientation)| Piece::new(position, orientation))
                .collect_vec()
        };

        let corner_pieces: [Piece; 8] =
            to_pieces(corners)
                .try_into()
                .map_err(|_| SnapshotError::CornerCount {
                    expected: 8,
                    actual: corners.len(),
                })?;
        let edge_pieces: [Piece; 12] =
            to_pieces(edges)
                .try_into()
                .map_err(|_| SnapshotError::EdgeCount {
                    expected: 12,
                    actual: edges.len(),
                })?;

        if !OrbitDef::CORNERS.admits(&corner_pieces) {
            return Err(SnapshotError::InvalidCorners(corners.to_vec()));
        }
        if !OrbitDef::EDGES.admits(&edge_pieces) {
            return Err(SnapshotError::InvalidEdges(edges.to_vec()));
        }

        Ok(CubeSnapshot {
            corners: corner_pieces,
            edges: edge_pieces,
        })
    }

    #[must_use]
    pub fn corners(&self) -> &[Piece; 8] {
        &self.corners
    }

    #[must_use]
    pub fn edges(&self) -> &[Piece; 12] {
        &self.edges
    }
}

impl TryFrom<SnapshotRepr> for CubeSnapshot {
    type Error = SnapshotError;

    fn try_from(value: SnapshotRepr) -> Result<Self, Self::Error> {
        CubeSnapshot::new(&value.corners, &value.edges)
    }
}

impl From<CubeSnapshot> for SnapshotRepr {
    fn from(value: CubeSnapshot) -> Self {
        let to_pairs = |pieces: &[Piece]| {
            pieces
                .iter()
                .map(|piece| (piece.position, piece.orientation))
                .collect_vec()
        };
        SnapshotRepr {
            corners: to_pairs(value.corners()),
            edges: to_pairs(value.edges()),
        }
    }
}

impl From<CubeSnapshot> for Cube {
    fn from(value: CubeSnapshot) -> Self {
        Cube {
            corners: *value.corners(),
            edges: *value.edges(),
        }
    }
}

impl Default for Cube {
    fn default() -> Self {
        Cube::new()
    }
}

/// Move the piece in `cycle[i - 1]` to `cycle[i]` (wrapping the last piece to
/// the front), then reorient the piece that lands in `cycle[i]` by
/// `deltas[i]`.
fn cycle_orbit(
    pieces: &mut [Piece],
    cycle: &[usize; 4],
    deltas: &[u8; 4],
    orientation_count: NonZeroU8,
) {
    let last = pieces[cycle[3]];
    for i in (1..cycle.len()).rev() {
        pieces[cycle[i]] = pieces[cycle[i - 1]];
    }
    pieces[cycle[0]] = last;

    for (&slot, &delta) in cycle.iter().zip(deltas) {
        pieces[slot].reorient(delta, orientation_count);
    }
}

impl Cube {
    /// Create a solved cube.
    #[must_use]
    pub const fn new() -> Cube {
        Cube {
            corners: solved_orbit(),
            edges: solved_orbit(),
        }
    }

    #[must_use]
    pub fn corners(&self) -> &[Piece; 8] {
        &self.corners
    }

    #[must_use]
    pub fn edges(&self) -> &[Piece; 12] {
        &self.edges
    }

    fn quarter_turn(&mut self, face: Face) {
        let turn = face.turn();
        cycle_orbit(
            &mut self.corners,
            &turn.corner_cycle,
            &turn.corner_twists,
            OrbitDef::CORNERS.orientation_count,
        );
        cycle_orbit(
            &mut self.edges,
            &turn.edge_cycle,
            &turn.edge_flips,
            OrbitDef::EDGES.orientation_count,
        );
    }

    /// Apply a single move in place.
    pub fn apply_move(&mut self, move_: Move) {
        for _ in 0..move_.turn.repetitions() {
            self.quarter_turn(move_.face);
        }
    }

    /// Apply a sequence of moves in order.
    pub fn apply_moves<'a>(&mut self, moves: impl IntoIterator<Item = &'a Move>) {
        for &move_ in moves {
            self.apply_move(move_);
        }
    }

    /// Apply `count` moves drawn uniformly from all eighteen moves, returning
    /// the moves that were applied.
    pub fn scramble(&mut self, rng: &mut fastrand::Rng, count: usize) -> Vec<Move> {
        let moves = (0..count)
            .map(|_| Move::ALL[rng.usize(..Move::ALL.len())])
            .collect_vec();
        trace!("Scrambling with {}", moves.iter().join(" "));
        self.apply_moves(&moves);
        moves
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == Cube::new()
    }

    /// Capture the current state.
    #[must_use]
    pub fn state(&self) -> CubeSnapshot {
        CubeSnapshot {
            corners: self.corners,
            edges: self.edges,
        }
    }

    /// Overwrite every piece with the contents of `snapshot`.
    pub fn set_state(&mut self, snapshot: &CubeSnapshot) {
        self.corners = snapshot.corners;
        self.edges = snapshot.edges;
    }

    /// The corner and edge permutations, where `perm[slot]` is the home slot of
    /// the piece occupying `slot`.
    #[must_use]
    pub fn permutation(&self) -> ([usize; 8], [usize; 12]) {
        (
            self.corners.map(|piece| piece.position as usize),
            self.edges.map(|piece| piece.position as usize),
        )
    }

    /// The permutation of all twenty pieces, with edges numbered after the
    /// corners.
    #[must_use]
    pub fn full_permutation(&self) -> [usize; 20] {
        let (corners, edges) = self.permutation();
        let mut full = [0; 20];
        full[..8].copy_from_slice(&corners);
        for (slot, position) in full[8..].iter_mut().zip(edges) {
            *slot = position + corners.len();
        }
        full
    }

    /// Total corner twist modulo 3.
    #[must_use]
    pub fn corner_orientation_sum(&self) -> u8 {
        orientation_sum(&self.corners, OrbitDef::CORNERS)
    }

    /// Total edge flip modulo 2.
    #[must_use]
    pub fn edge_orientation_sum(&self) -> u8 {
        orientation_sum(&self.edges, OrbitDef::EDGES)
    }

    /// Whether the state obeys the laws every state reachable by face turns
    /// obeys: no net twist, no net flip, and equal corner and edge parity.
    #[must_use]
    pub fn satisfies_cube_laws(&self) -> bool {
        let (corners, edges) = self.permutation();
        self.corner_orientation_sum() == 0
            && self.edge_orientation_sum() == 0
            && cycles::parity(&corners) == cycles::parity(&edges)
    }

    #[must_use]
    pub fn corner_parity(&self) -> Parity {
        cycles::parity(&self.permutation().0)
    }

    #[must_use]
    pub fn edge_parity(&self) -> Parity {
        cycles::parity(&self.permutation().1)
    }
}

fn orientation_sum(pieces: &[Piece], orbit_def: OrbitDef) -> u8 {
    let sum: u32 = pieces.iter().map(|piece| u32::from(piece.orientation)).sum();
    // The remainder is below the orientation count, which fits in a u8
    (sum % u32::from(orbit_def.orientation_count.get())) as u8
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |pieces: &[Piece]| {
            pieces
                .iter()
                .map(|piece| format!("{}:{}", piece.position, piece.orientation))
                .join(" ")
        };
        writeln!(f, "corners: {}", show(&self.corners))?;
        write!(f, "edges:   {}", show(&self.edges))
    }
}
