use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

/// Pseudorapidity returned for momenta pointing exactly along the beam axis
pub const ETA_SATURATION: f64 = 10e10;

/// A relativistic four-momentum
///
/// The zero component is the energy. The remainder are the spatial
/// components. No relation between the components is enforced, so
/// off-shell and even tachyonic momenta are representable.
#[derive(
    Deserialize, Serialize, PartialEq, PartialOrd, Debug, Clone, Copy, Default,
)]
pub struct FourMomentum {
    e: f64,
    px: f64,
    py: f64,
    pz: f64,
}

impl FourMomentum {
    /// Construct a four-momentum from energy and momentum components
    pub const fn new(e: f64, px: f64, py: f64, pz: f64) -> Self {
        Self { e, px, py, pz }
    }

    /// The zero four-momentum
    pub const fn zero() -> Self {
        Self::new(0., 0., 0., 0.)
    }

    pub fn energy(&self) -> f64 {
        self.e
    }

    pub fn px(&self) -> f64 {
        self.px
    }

    pub fn py(&self) -> f64 {
        self.py
    }

    pub fn pz(&self) -> f64 {
        self.pz
    }

    /// The scalar transverse momentum
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// The azimuthal angle, zero for vanishing transverse momentum
    pub fn phi(&self) -> f64 {
        if self.px == 0. && self.py == 0. {
            0.
        } else {
            self.py.atan2(self.px)
        }
    }

    /// The pseudorapidity
    ///
    /// See [pseudo_rapidity] for the treatment of degenerate momenta.
    pub fn eta(&self) -> f64 {
        pseudo_rapidity(self.px, self.py, self.pz)
    }

    /// The spatial norm \sqrt{\sum p_i^2} with i = x,y,z
    pub fn spatial_norm(&self) -> f64 {
        (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt()
    }

    /// The invariant mass square E^2 - \sum p_i^2 with i = x,y,z
    pub fn mass2(&self) -> f64 {
        self.e * self.e - self.px * self.px - self.py * self.py - self.pz * self.pz
    }

    /// The signed invariant mass
    ///
    /// For negative mass square this is -\sqrt{-m^2}.
    pub fn mass(&self) -> f64 {
        let m2 = self.mass2();
        if m2 < 0. {
            -(-m2).sqrt()
        } else {
            m2.sqrt()
        }
    }

    pub fn show(&self) -> String {
        format!(
            "FourMomentum {{energy={:.6},px={:.6},py={:.6},pz={:.6}}}",
            self.e, self.px, self.py, self.pz
        )
    }
}

/// The cosine of the polar angle, 1 for vanishing momentum
pub fn cos_theta(px: f64, py: f64, pz: f64) -> f64 {
    let ptot = (px * px + py * py + pz * pz).sqrt();
    if ptot == 0. {
        1.
    } else {
        pz / ptot
    }
}

/// The pseudorapidity -ln tan(θ/2)
///
/// Momenta along the beam axis saturate to ±[ETA_SATURATION] with the
/// sign of `pz`. A vanishing momentum yields 1.
pub fn pseudo_rapidity(px: f64, py: f64, pz: f64) -> f64 {
    if px == 0. && py == 0. && pz == 0. {
        return 1.;
    }
    pseudo_rapidity_from_cos_theta(cos_theta(px, py, pz), pz)
}

/// The pseudorapidity for a given polar angle cosine
///
/// `pz` only decides the sign when saturating along the beam axis.
pub fn pseudo_rapidity_from_cos_theta(costh: f64, pz: f64) -> f64 {
    if costh * costh < 1. {
        -0.5 * ((1. - costh) / (1. + costh)).ln()
    } else if pz > 0. {
        ETA_SATURATION
    } else {
        -ETA_SATURATION
    }
}

/// Wrap an angle into (-π, π]
pub fn wrap_phi(mut x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    if x.abs() > 2. * TAU {
        x %= TAU;
    }
    while x > PI {
        x -= TAU;
    }
    while x <= -PI {
        x += TAU;
    }
    x
}

/// Azimuthal separation φ_1 - φ_2 in (-π, π]
pub fn delta_phi(p1: &FourMomentum, p2: &FourMomentum) -> f64 {
    wrap_phi(p1.phi() - p2.phi())
}

/// Angular separation \sqrt{Δη^2 + Δφ^2}
pub fn delta_r(p1: &FourMomentum, p2: &FourMomentum) -> f64 {
    let deta = p1.eta() - p2.eta();
    deta.hypot(delta_phi(p1, p2))
}

impl From<[f64; 4]> for FourMomentum {
    fn from(p: [f64; 4]) -> Self {
        Self::new(p[0], p[1], p[2], p[3])
    }
}

impl From<FourMomentum> for [f64; 4] {
    fn from(p: FourMomentum) -> Self {
        [p.e, p.px, p.py, p.pz]
    }
}

impl std::ops::Index<usize> for FourMomentum {
    type Output = f64;

    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.e,
            1 => &self.px,
            2 => &self.py,
            3 => &self.pz,
            _ => panic!("four-momentum index {i} out of range"),
        }
    }
}

impl std::ops::Neg for FourMomentum {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.e, -self.px, -self.py, -self.pz)
    }
}

impl std::ops::AddAssign for FourMomentum {
    fn add_assign(&mut self, rhs: FourMomentum) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign for FourMomentum {
    fn sub_assign(&mut self, rhs: FourMomentum) {
        *self = *self - rhs;
    }
}

impl std::ops::Add for FourMomentum {
    type Output = Self;

    fn add(self, rhs: FourMomentum) -> Self::Output {
        Self::new(
            self.e + rhs.e,
            self.px + rhs.px,
            self.py + rhs.py,
            self.pz + rhs.pz,
        )
    }
}

impl std::ops::Sub for FourMomentum {
    type Output = Self;

    fn sub(self, rhs: FourMomentum) -> Self::Output {
        Self::new(
            self.e - rhs.e,
            self.px - rhs.px,
            self.py - rhs.py,
            self.pz - rhs.pz,
        )
    }
}

impl std::iter::Sum for FourMomentum {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, p| acc + p)
    }
}

impl<'a> std::iter::Sum<&'a FourMomentum> for FourMomentum {
    fn sum<I: Iterator<Item = &'a FourMomentum>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * (1. + a.abs().max(b.abs()))
    }

    #[test]
    fn mass_square_identity() {
        let ps = [
            FourMomentum::new(10., 1., 2., 3.),
            FourMomentum::new(1., 3., -4., 0.5),
            FourMomentum::new(-2.5, 0.1, 0., -7.),
            FourMomentum::zero(),
        ];
        for p in ps {
            let (e, px, py, pz) = (p.energy(), p.px(), p.py(), p.pz());
            assert_eq!(p.mass2(), e * e - px * px - py * py - pz * pz);
        }
    }

    #[test]
    fn signed_mass() {
        let p = FourMomentum::new(5., 3., 0., 0.);
        assert_eq!(p.mass(), 4.);
        let p = FourMomentum::new(3., 5., 0., 0.);
        assert_eq!(p.mass(), -4.);
    }

    #[test]
    fn azimuth() {
        assert_eq!(FourMomentum::new(1., 0., 0., 1.).phi(), 0.);
        let p = FourMomentum::new(1., 0., 1., 0.);
        assert!(approx_eq(p.phi(), PI / 2.));
        assert_eq!(p.pt(), 1.);
    }

    #[test]
    fn eta_degenerate() {
        assert_eq!(pseudo_rapidity(0., 0., 5.), ETA_SATURATION);
        assert_eq!(pseudo_rapidity(0., 0., -5.), -ETA_SATURATION);
        assert_eq!(pseudo_rapidity(0., 0., 0.), 1.);
        assert_eq!(cos_theta(0., 0., 0.), 1.);
        assert_eq!(pseudo_rapidity(1., 0., 0.), 0.);
        let p = FourMomentum::new(10., 0., 0., 10.);
        assert!(p.eta().is_finite());
    }

    #[test]
    fn eta_matches_sinh() {
        let (pt, eta) = (25.0_f64, 1.3_f64);
        let pz = pt * eta.sinh();
        assert!(approx_eq(pseudo_rapidity(pt, 0., pz), eta));
        assert!(approx_eq(pseudo_rapidity(0., -pt, -pz), -eta));
    }

    #[test]
    fn delta_phi_range() {
        let angles: [f64; 8] = [-3.1, -2., -0.5, 0., 0.3, 1.7, 3.14159, 3.688];
        for a in angles {
            for b in angles {
                let pa = FourMomentum::new(1., a.cos(), a.sin(), 0.);
                let pb = FourMomentum::new(1., b.cos(), b.sin(), 0.);
                let dphi = delta_phi(&pa, &pb);
                assert!(dphi > -PI && dphi <= PI, "{dphi}");
            }
            let pa = FourMomentum::new(1., a.cos(), a.sin(), 0.);
            assert_eq!(delta_phi(&pa, &pa), 0.);
        }
        assert_eq!(wrap_phi(PI), PI);
        assert_eq!(wrap_phi(-PI), PI);
        assert!(approx_eq(wrap_phi(3. * PI / 2.), -PI / 2.));
        assert!(approx_eq(wrap_phi(100. * PI + 0.5), 0.5));
        assert!(wrap_phi(f64::NAN).is_nan());
    }

    #[test]
    fn delta_r_pythagoras() {
        let p1 = FourMomentum::new(10., 1., 0., 0.);
        let phi = 0.4_f64;
        let p2 = FourMomentum::new(10., phi.cos(), phi.sin(), 0.);
        assert!(approx_eq(delta_r(&p1, &p2), phi));
        assert_eq!(delta_r(&p1, &p1), 0.);
    }

    #[test]
    fn arithmetic() {
        let a = FourMomentum::new(4., 1., 2., 3.);
        let b = FourMomentum::new(1., -1., 0.5, 0.);
        assert_eq!(a + b, FourMomentum::new(5., 0., 2.5, 3.));
        assert_eq!(a - b, FourMomentum::new(3., 2., 1.5, 3.));
        assert_eq!(-a, FourMomentum::new(-4., -1., -2., -3.));
        let mut c = a;
        c += b;
        c -= b;
        assert_eq!(c, a);
        assert_eq!(a[0], 4.);
        assert_eq!(a[3], 3.);
    }

    #[test]
    fn sum_associative() {
        let a = FourMomentum::new(10.1, 1.3, 2.7, 3.9);
        let b = FourMomentum::new(7.7, -1.1, 0.5, 0.3);
        let c = FourMomentum::new(3.3, 0.2, -0.9, -2.2);
        let total: FourMomentum = [a, b, c].iter().sum();
        let split = [a].iter().sum::<FourMomentum>() + [b, c].iter().sum();
        for i in 0..4 {
            assert!(approx_eq(total[i], split[i]));
        }
        let empty: FourMomentum = std::iter::empty::<FourMomentum>().sum();
        assert_eq!(empty, FourMomentum::zero());
    }

    #[test]
    fn show() {
        let p = FourMomentum::new(1., 2., 3., 4.);
        assert_eq!(
            p.show(),
            "FourMomentum {energy=1.000000,px=2.000000,py=3.000000,pz=4.000000}"
        );
    }
}
