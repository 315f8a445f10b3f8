use crate::{
    four_momentum::{self, FourMomentum},
    mt2::{self, Mt2Input},
};

/// Backend for angular and rapidity computations
///
/// All methods have pure-arithmetic default implementations. An
/// alternative backend, e.g. one delegating to an external vector
/// library, only overrides what it provides; callers stay generic over
/// `G: Geometry`.
pub trait Geometry {
    /// Cosine of the polar angle, 1 for vanishing momentum
    fn cos_theta(&self, px: f64, py: f64, pz: f64) -> f64 {
        four_momentum::cos_theta(px, py, pz)
    }

    /// Pseudorapidity derived from [Geometry::cos_theta]
    fn pseudo_rapidity(&self, px: f64, py: f64, pz: f64) -> f64 {
        if px == 0. && py == 0. && pz == 0. {
            return 1.;
        }
        four_momentum::pseudo_rapidity_from_cos_theta(self.cos_theta(px, py, pz), pz)
    }

    /// Azimuthal separation in (-π, π]
    fn delta_phi(&self, p1: &FourMomentum, p2: &FourMomentum) -> f64 {
        four_momentum::delta_phi(p1, p2)
    }

    fn delta_r(&self, p1: &FourMomentum, p2: &FourMomentum) -> f64 {
        let deta = self.pseudo_rapidity(p1.px(), p1.py(), p1.pz())
            - self.pseudo_rapidity(p2.px(), p2.py(), p2.pz());
        deta.hypot(self.delta_phi(p1, p2))
    }

    /// Stransverse mass
    fn mt2(&self, input: &Mt2Input) -> f64 {
        mt2::mt2(input)
    }
}

/// The reference implementation
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Reference;

impl Geometry for Reference {}

#[cfg(test)]
mod tests {
    use super::*;

    // rotates every azimuth, which must not change any separation
    struct Rotated;

    impl Geometry for Rotated {
        fn delta_phi(&self, p1: &FourMomentum, p2: &FourMomentum) -> f64 {
            let rot = |p: &FourMomentum| {
                let (s, c) = 0.3_f64.sin_cos();
                FourMomentum::new(
                    p.energy(),
                    c * p.px() - s * p.py(),
                    s * p.px() + c * p.py(),
                    p.pz(),
                )
            };
            four_momentum::delta_phi(&rot(p1), &rot(p2))
        }
    }

    // flips the polar angle
    struct Mirrored;

    impl Geometry for Mirrored {
        fn cos_theta(&self, px: f64, py: f64, pz: f64) -> f64 {
            -four_momentum::cos_theta(px, py, pz)
        }
    }

    fn separations<G: Geometry>(g: &G, p1: &FourMomentum, p2: &FourMomentum) -> (f64, f64) {
        (g.delta_phi(p1, p2), g.delta_r(p1, p2))
    }

    #[test]
    fn swap_backend() {
        let p1 = FourMomentum::new(50., 10., 20., 30.);
        let p2 = FourMomentum::new(40., -15., 5., -12.);
        let (dphi_ref, dr_ref) = separations(&Reference, &p1, &p2);
        let (dphi_rot, dr_rot) = separations(&Rotated, &p1, &p2);
        assert!((dphi_ref - dphi_rot).abs() < 1e-12);
        assert!((dr_ref - dr_rot).abs() < 1e-12);
        assert_eq!(dr_ref, four_momentum::delta_r(&p1, &p2));
        assert_eq!(Reference.cos_theta(0., 0., 0.), 1.);
    }

    #[test]
    fn rapidity_follows_cos_theta() {
        let (px, py, pz) = (3., 4., 12.);
        let eta = Reference.pseudo_rapidity(px, py, pz);
        assert_eq!(eta, four_momentum::pseudo_rapidity(px, py, pz));
        assert!((Mirrored.pseudo_rapidity(px, py, pz) + eta).abs() < 1e-12);
        assert_eq!(Mirrored.pseudo_rapidity(0., 0., 0.), 1.);
    }
}
