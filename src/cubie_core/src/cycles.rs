//! Cycle decompositions of plain permutations, given as slices where
//! `perm[i]` is the image of `i`.

use crate::discrete_math::lcm;
use itertools::Itertools;
use std::fmt;

/// The lengths of the non-trivial cycles of a permutation, longest first.
/// The identity has the empty cycle type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CycleType(pub Vec<usize>);

impl CycleType {
    /// The order of any permutation with this cycle type.
    #[must_use]
    pub fn order(&self) -> u64 {
        self.0.iter().fold(1, |order, &len| lcm(order, len as u64))
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CycleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    Even,
    Odd,
}

/// Checks whether `perm` is a bijection on `0..perm.len()`.
#[must_use]
pub fn is_permutation(perm: &[usize]) -> bool {
    let mut seen = vec![false; perm.len()];
    perm.iter().all(|&image| {
        seen.get_mut(image)
            .is_some_and(|seen| !std::mem::replace(seen, true))
    })
}

/// Decompose `perm` into its disjoint cycles of length two or more. Each cycle
/// starts at its smallest index and follows `perm` from there; cycles are
/// listed in order of their starting index. Fixed points are left out.
///
/// # Panics
///
/// Panics if `perm` is not a permutation of `0..perm.len()`.
#[must_use]
pub fn decompose(perm: &[usize]) -> Vec<Vec<usize>> {
    assert!(is_permutation(perm), "not a permutation: {perm:?}");

    let mut visited = vec![false; perm.len()];
    let mut cycles = vec![];

    for start in 0..perm.len() {
        if visited[start] {
            continue;
        }

        let mut cycle = vec![];
        let mut current = start;
        while !visited[current] {
            visited[current] = true;
            cycle.push(current);
            current = perm[current];
        }

        if cycle.len() > 1 {
            cycles.push(cycle);
        }
    }

    cycles
}

/// The multiplicative order of `perm`: the LCM of its cycle lengths, or one
/// for the identity.
///
/// # Panics
///
/// Panics if `perm` is not a permutation of `0..perm.len()`.
#[must_use]
pub fn order(perm: &[usize]) -> u64 {
    cycle_type(perm).order()
}

/// # Panics
///
/// Panics if `perm` is not a permutation of `0..perm.len()`.
#[must_use]
pub fn cycle_type(perm: &[usize]) -> CycleType {
    CycleType(
        decompose(perm)
            .iter()
            .map(Vec::len)
            .sorted_unstable_by(|a, b| b.cmp(a))
            .collect(),
    )
}

/// A cycle of length `k` is a product of `k - 1` transpositions.
///
/// # Panics
///
/// Panics if `perm` is not a permutation of `0..perm.len()`.
#[must_use]
pub fn parity(perm: &[usize]) -> Parity {
    let transpositions: usize = decompose(perm).iter().map(|cycle| cycle.len() - 1).sum();
    if transpositions % 2 == 0 {
        Parity::Even
    } else {
        Parity::Odd
    }
}

/// The order of a permutation acting on corners and edges at once. The two
/// act on disjoint sets of pieces, so this is the LCM of the two orders.
///
/// # Panics
///
/// Panics if either argument is not a permutation.
#[must_use]
pub fn combined_order(corners: &[usize], edges: &[usize]) -> u64 {
    lcm(order(corners), order(edges))
}
