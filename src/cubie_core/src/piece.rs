use std::num::NonZeroU8;

/// The shape of one orbit of pieces: how many there are and how many ways
/// each of them can be oriented.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct OrbitDef {
    pub piece_count: NonZeroU8,
    pub orientation_count: NonZeroU8,
}

impl OrbitDef {
    /// Eight corners, each twisted one of three ways.
    pub const CORNERS: OrbitDef = OrbitDef {
        piece_count: NonZeroU8::new(8).unwrap(),
        orientation_count: NonZeroU8::new(3).unwrap(),
    };

    /// Twelve edges, each flipped one of two ways.
    pub const EDGES: OrbitDef = OrbitDef {
        piece_count: NonZeroU8::new(12).unwrap(),
        orientation_count: NonZeroU8::new(2).unwrap(),
    };

    /// Whether `pieces` is a valid state of this orbit: the positions form a
    /// bijection on `0..piece_count` and every orientation is in range.
    #[must_use]
    pub fn admits(&self, pieces: &[Piece]) -> bool {
        let n = self.piece_count.get() as usize;
        if pieces.len() != n {
            return false;
        }

        let mut seen = [false; u8::MAX as usize + 1];
        pieces.iter().all(|piece| {
            (piece.position as usize) < n
                && piece.orientation < self.orientation_count.get()
                && !std::mem::replace(&mut seen[piece.position as usize], true)
        })
    }
}

/// A single corner or edge. `position` names the home slot of the piece that
/// currently sits in this slot, so a solved orbit has `position == index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Piece {
    pub position: u8,
    pub orientation: u8,
}

impl Piece {
    #[must_use]
    pub const fn new(position: u8, orientation: u8) -> Piece {
        Piece {
            position,
            orientation,
        }
    }

    /// Twist or flip the piece by `delta` in an orbit with `orientation_count`
    /// orientations.
    pub fn reorient(&mut self, delta: u8, orientation_count: NonZeroU8) {
        self.orientation = (self.orientation + delta) % orientation_count.get();
    }
}

/// The solved arrangement of an orbit with `N` pieces.
#[must_use]
pub const fn solved_orbit<const N: usize>() -> [Piece; N] {
    let mut pieces = [Piece::new(0, 0); N];
    let mut i = 0;
    while i < N {
        pieces[i].position = i as u8;
        i += 1;
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_orbits_are_admitted() {
        assert!(OrbitDef::CORNERS.admits(&solved_orbit::<8>()));
        assert!(OrbitDef::EDGES.admits(&solved_orbit::<12>()));
        assert!(!OrbitDef::CORNERS.admits(&solved_orbit::<12>()));
    }

    #[test]
    fn rejects_repeats_and_bad_orientations() {
        let mut corners = solved_orbit::<8>();
        corners[3].position = 2;
        assert!(!OrbitDef::CORNERS.admits(&corners));

        let mut edges = solved_orbit::<12>();
        edges[0].orientation = 2;
        assert!(!OrbitDef::EDGES.admits(&edges));

        let mut corners = solved_orbit::<8>();
        corners[7].position = 8;
        assert!(!OrbitDef::CORNERS.admits(&corners));
    }

    #[test]
    fn reorient_wraps() {
        let mut piece = Piece::new(0, 2);
        piece.reorient(2, OrbitDef::CORNERS.orientation_count);
        assert_eq!(piece.orientation, 1);
    }
}
