use cubie_core::{
    Cube, Face, GeneratorSet, OrbitError,
    analysis::{SubgroupOrder, survey_all_subgroups},
    discrete_math::factor,
    enumerate_subgroup, enumerate_subgroup_bounded,
    orbit::subgroup_elements,
};
use log::info;

fn set(faces: &[Face]) -> GeneratorSet {
    GeneratorSet::new(faces.iter().copied()).unwrap()
}

#[test_log::test]
fn single_generators_are_cyclic() {
    assert_eq!(enumerate_subgroup(&set(&[Face::U])), 4);
    assert_eq!(enumerate_subgroup(&set(&[Face::R])), 4);
}

#[test_log::test]
fn opposite_faces_commute() {
    // Opposite faces touch disjoint pieces, so the subgroup is C4 × C4
    for pair in [[Face::U, Face::D], [Face::F, Face::B], [Face::L, Face::R]] {
        let order = enumerate_subgroup(&set(&pair));
        info!("<{}> has order {order}", set(&pair));
        assert_eq!(order, 16);
    }
}

#[test_log::test]
fn subgroup_elements_are_legal_states() {
    let elements = subgroup_elements(&set(&[Face::U, Face::D]));
    assert_eq!(elements.len(), 16);
    assert!(elements.contains(&Cube::new().state()));
    assert!(
        elements
            .iter()
            .all(|&snapshot| Cube::from(snapshot).satisfies_cube_laws())
    );
}

#[test_log::test]
fn subgroup_is_closed_under_its_generators() {
    let generators = set(&[Face::U, Face::D]);
    let elements = subgroup_elements(&generators);

    for &snapshot in &elements {
        for generator in generators.generators() {
            let mut cube = Cube::from(snapshot);
            cube.apply_move(generator);
            assert!(elements.contains(&cube.state()));
        }
    }
}

#[test_log::test]
fn adjacent_faces_are_bounded() {
    let generators = set(&[Face::U, Face::R]);
    assert_eq!(
        enumerate_subgroup_bounded(&generators, 1000),
        Err(OrbitError::TooManyStates {
            generators,
            limit: 1000
        })
    );
}

#[test_log::test]
fn survey_covers_every_subset() {
    let reports = survey_all_subgroups(64);
    assert_eq!(reports.len(), 63);

    let exact = reports
        .iter()
        .filter_map(|report| match &report.order {
            SubgroupOrder::Exact {
                order,
                factorization,
            } => Some((report.generators, *order, factorization)),
            SubgroupOrder::Exceeds(_) => None,
        })
        .collect::<Vec<_>>();

    // Only the six cyclic subgroups and the three pairs of opposite faces fit
    // under the bound
    assert_eq!(exact.len(), 9);
    assert!(exact[..6].iter().all(|&(_, order, _)| order == 4));
    assert!(exact[6..].iter().all(|&(_, order, _)| order == 16));
    assert!(exact.iter().all(|(_, order, factorization)| {
        factorization.product() == *order as u64 && **factorization == factor(*order as u64)
    }));
    assert!(
        reports[9..]
            .iter()
            .all(|report| report.order == SubgroupOrder::Exceeds(64))
    );
}
