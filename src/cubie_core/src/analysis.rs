//! Aggregate statistics over many scrambles, and the subgroup survey over
//! every set of generators.

use crate::{
    cube::Cube,
    cycles::{self, CycleType},
    discrete_math::{Factorization, factor},
    orbit::{GeneratorSet, OrbitError, enumerate_subgroup_bounded},
    start, success,
};
use fxhash::FxHashMap;
use itertools::Itertools;
use log::{debug, info};
use std::{hash::Hash, time::Instant};

/// Counts how often each value was seen.
#[derive(Debug, Clone)]
pub struct Tally<K> {
    counts: FxHashMap<K, usize>,
    total: usize,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Tally {
            counts: FxHashMap::default(),
            total: 0,
        }
    }
}

impl<K: Hash + Eq + Ord + Clone> Tally<K> {
    pub fn add(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
        self.total += 1;
    }

    #[must_use]
    pub fn count(&self, key: &K) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// The number of values added.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// The number of distinct values seen.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// The `n` most frequent values with their counts. Ties are broken by the
    /// smaller value.
    #[must_use]
    pub fn most_common(&self, n: usize) -> Vec<(K, usize)> {
        self.counts
            .iter()
            .map(|(key, &count)| (key.clone(), count))
            .sorted_unstable_by(|(a_key, a_count), (b_key, b_count)| {
                b_count.cmp(a_count).then_with(|| a_key.cmp(b_key))
            })
            .take(n)
            .collect()
    }

    /// The share of all values that `count` represents.
    #[must_use]
    pub fn fraction(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64
        }
    }
}

impl<K: Hash + Eq + Ord + Clone> FromIterator<K> for Tally<K> {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        let mut tally = Tally::default();
        for key in iter {
            tally.add(key);
        }
        tally
    }
}

/// Distributions of group-theoretic properties of randomly scrambled cubes.
#[derive(Debug, Clone, Default)]
pub struct GroupStatistics {
    pub trials: usize,
    pub scramble_moves: usize,
    pub permutation_orders: Tally<u64>,
    pub corner_cycle_types: Tally<CycleType>,
    pub edge_cycle_types: Tally<CycleType>,
    pub corner_orientation_sums: Tally<u8>,
    pub edge_orientation_sums: Tally<u8>,
}

impl GroupStatistics {
    /// Scramble one cube `trials` times by `scramble_moves` moves each,
    /// recording the properties of the state after every scramble. Scrambles
    /// accumulate: each trial continues from where the previous one left off.
    pub fn collect(trials: usize, scramble_moves: usize, rng: &mut fastrand::Rng) -> Self {
        info!(
            start!("Collecting statistics over {} scrambles of {} moves"),
            trials, scramble_moves
        );
        let start = Instant::now();

        let mut stats = GroupStatistics {
            trials,
            scramble_moves,
            ..GroupStatistics::default()
        };

        let mut cube = Cube::new();
        for _ in 0..trials {
            cube.scramble(rng, scramble_moves);
            stats.record(&cube);
        }

        info!(success!("Collected statistics in {:.3?}"), start.elapsed());
        stats
    }

    /// Tally the properties of a single state.
    pub fn record(&mut self, cube: &Cube) {
        let (corners, edges) = cube.permutation();

        let order = cycles::combined_order(&corners, &edges);
        let corner_cycle_type = cycles::cycle_type(&corners);
        let edge_cycle_type = cycles::cycle_type(&edges);
        debug!("order {order}, corners {corner_cycle_type}, edges {edge_cycle_type}");

        self.permutation_orders.add(order);
        self.corner_cycle_types.add(corner_cycle_type);
        self.edge_cycle_types.add(edge_cycle_type);
        self.corner_orientation_sums
            .add(cube.corner_orientation_sum());
        self.edge_orientation_sums.add(cube.edge_orientation_sum());
    }
}

/// The result of enumerating one subgroup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubgroupOrder {
    Exact {
        order: usize,
        factorization: Factorization,
    },
    /// The subgroup had more elements than the enumeration was allowed to
    /// visit.
    Exceeds(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubgroupReport {
    pub generators: GeneratorSet,
    pub order: SubgroupOrder,
}

impl SubgroupReport {
    /// Enumerate the subgroup generated by `generators`, visiting at most
    /// `limit` states.
    #[must_use]
    pub fn new(generators: GeneratorSet, limit: usize) -> SubgroupReport {
        let order = match enumerate_subgroup_bounded(&generators, limit) {
            Ok(order) => SubgroupOrder::Exact {
                order,
                factorization: factor(order as u64),
            },
            Err(OrbitError::TooManyStates { limit, .. }) => SubgroupOrder::Exceeds(limit),
        };

        SubgroupReport { generators, order }
    }

    /// Sort key: exact orders ascending, then the ones that were too large.
    fn sort_key(&self) -> (bool, usize) {
        match self.order {
            SubgroupOrder::Exact { order, .. } => (false, order),
            SubgroupOrder::Exceeds(limit) => (true, limit),
        }
    }
}

/// Enumerate the subgroup of every given generator set and sort the reports by
/// ascending order. Subgroups with more than `limit` elements are reported as
/// such and sorted last.
pub fn survey_subgroups(
    generator_sets: impl IntoIterator<Item = GeneratorSet>,
    limit: usize,
) -> Vec<SubgroupReport> {
    generator_sets
        .into_iter()
        .map(|generators| SubgroupReport::new(generators, limit))
        .sorted_by_key(SubgroupReport::sort_key)
        .collect()
}

/// Survey all 63 non-empty generator sets.
#[must_use]
pub fn survey_all_subgroups(limit: usize) -> Vec<SubgroupReport> {
    survey_subgroups(GeneratorSet::all_subsets(), limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Face;

    #[test]
    fn tally_orders_by_count_then_key() {
        let tally = [3, 1, 2, 3, 2, 5].into_iter().collect::<Tally<u32>>();
        assert_eq!(tally.total(), 6);
        assert_eq!(tally.distinct(), 4);
        assert_eq!(tally.count(&3), 2);
        assert_eq!(tally.count(&7), 0);
        assert_eq!(tally.most_common(3), vec![(2, 2), (3, 2), (1, 1)]);
        assert!((tally.fraction(3) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_tally() {
        let tally = Tally::<u8>::default();
        assert!(tally.most_common(10).is_empty());
        assert!(tally.fraction(0).abs() < f64::EPSILON);
    }

    #[test]
    fn solved_cube_statistics() {
        let mut stats = GroupStatistics::default();
        stats.record(&Cube::new());
        assert_eq!(stats.permutation_orders.most_common(1), vec![(1, 1)]);
        assert_eq!(
            stats.corner_cycle_types.most_common(1),
            vec![(CycleType::default(), 1)]
        );
        assert_eq!(stats.corner_orientation_sums.count(&0), 1);
    }

    #[test]
    fn collected_statistics_obey_cube_laws() {
        let stats = GroupStatistics::collect(200, 20, &mut fastrand::Rng::with_seed(42));
        assert_eq!(stats.permutation_orders.total(), 200);
        assert_eq!(stats.corner_orientation_sums.count(&0), 200);
        assert_eq!(stats.edge_orientation_sums.count(&0), 200);
    }

    #[test]
    fn survey_sorts_by_order() {
        let sets = [
            GeneratorSet::new([Face::U, Face::D]).unwrap(),
            GeneratorSet::new([Face::F]).unwrap(),
            GeneratorSet::new([Face::U, Face::F]).unwrap(),
        ];
        let reports = survey_subgroups(sets, 20);

        assert_eq!(reports[0].generators, sets[1]);
        assert_eq!(
            reports[0].order,
            SubgroupOrder::Exact {
                order: 4,
                factorization: factor(4)
            }
        );
        assert_eq!(reports[1].generators, sets[0]);
        assert_eq!(
            reports[1].order,
            SubgroupOrder::Exact {
                order: 16,
                factorization: factor(16)
            }
        );
        assert_eq!(reports[2].order, SubgroupOrder::Exceeds(20));
    }
}
