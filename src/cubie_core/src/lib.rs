#![warn(clippy::pedantic)]
#![allow(clippy::similar_names, clippy::too_many_lines)]

//! A permutation-and-orientation model of a cube-like puzzle with eight
//! three-way corners and twelve two-way edges, together with the group theory
//! built on top of it: cycle decompositions, element orders and subgroups
//! generated by face turns.

pub mod analysis;
pub mod cube;
pub mod cycles;
pub mod discrete_math;
pub mod moves;
pub mod orbit;
pub mod piece;

pub use cube::{Cube, CubeSnapshot, SnapshotError};
pub use moves::{Face, Move, MoveParseError, Turn, parse_moves};
pub use orbit::{GeneratorSet, OrbitError, enumerate_subgroup, enumerate_subgroup_bounded};
pub use piece::{OrbitDef, Piece};

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}
