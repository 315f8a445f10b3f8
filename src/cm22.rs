use std::f64::consts::TAU;

use crate::four_momentum::FourMomentum;

/// \sqrt{|λ(x, y, z)|} with the Källén function
/// λ = x^2 + y^2 + z^2 - 2xy - 2yz - 2zx
pub fn kallen_sqrt(x: f64, y: f64, z: f64) -> f64 {
    let lambda = x * x + y * y + z * z - 2. * x * y - 2. * y * z - 2. * z * x;
    lambda.abs().sqrt()
}

/// 2 → 2 scattering kinematics in the centre-of-mass frame
///
/// The incoming momenta `p1`, `p2` lie along the ±z axis. The
/// outgoing momenta `k1`, `k2` are back to back with polar angle
/// cos θ = 2 r_1 - 1 and azimuth φ = 2π r_2 for r_1, r_2 ∈ [0, 1].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cm22 {
    m_in_sq: [f64; 2],
    m_out_sq: [f64; 2],
    s: f64,
    costh: f64,
    sinth: f64,
    phi: f64,
    p_in: f64,
    p_out: f64,
}

impl Cm22 {
    /// Masses are ordered as `[incoming 1, incoming 2, outgoing 1, outgoing 2]`
    pub fn new(m: [f64; 4], s: f64, r1: f64, r2: f64) -> Self {
        let m_in_sq = [m[0] * m[0], m[1] * m[1]];
        let m_out_sq = [m[2] * m[2], m[3] * m[3]];
        let costh = -1. + 2. * r1;
        let d = 2. * s.sqrt();
        Self {
            m_in_sq,
            m_out_sq,
            s,
            costh,
            sinth: (1. - costh * costh).sqrt(),
            phi: TAU * r2,
            p_in: kallen_sqrt(s, m_in_sq[0], m_in_sq[1]) / d,
            p_out: kallen_sqrt(s, m_out_sq[0], m_out_sq[1]) / d,
        }
    }

    pub fn cos_theta(&self) -> f64 {
        self.costh
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Mandelstam s
    pub fn s(&self) -> f64 {
        self.s
    }

    /// Mandelstam t = (p_1 - k_1)^2
    pub fn t(&self) -> f64 {
        (self.p1() - self.k1()).mass2()
    }

    /// Mandelstam u = (p_1 - k_2)^2
    pub fn u(&self) -> f64 {
        (self.p1() - self.k2()).mass2()
    }

    pub fn p1(&self) -> FourMomentum {
        let e = (self.s + self.m_in_sq[0] - self.m_in_sq[1]) / (2. * self.s.sqrt());
        FourMomentum::new(e, 0., 0., self.p_in)
    }

    pub fn p2(&self) -> FourMomentum {
        let e = (self.s - self.m_in_sq[0] + self.m_in_sq[1]) / (2. * self.s.sqrt());
        FourMomentum::new(e, 0., 0., -self.p_in)
    }

    pub fn k1(&self) -> FourMomentum {
        let e = (self.s + self.m_out_sq[0] - self.m_out_sq[1]) / (2. * self.s.sqrt());
        let (px, py, pz) = self.outgoing_direction();
        FourMomentum::new(e, px, py, pz)
    }

    pub fn k2(&self) -> FourMomentum {
        let e = (self.s - self.m_out_sq[0] + self.m_out_sq[1]) / (2. * self.s.sqrt());
        let (px, py, pz) = self.outgoing_direction();
        FourMomentum::new(e, -px, -py, -pz)
    }

    fn outgoing_direction(&self) -> (f64, f64, f64) {
        (
            self.p_out * self.sinth * self.phi.cos(),
            self.p_out * self.sinth * self.phi.sin(),
            self.p_out * self.costh,
        )
    }
}
