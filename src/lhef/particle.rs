use std::fmt;

use itertools::Itertools;
use particle_id::ParticleID;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{
    four_momentum::FourMomentum,
    lhef::pid::PidSet,
    traits::{Momentum, Show},
};

/// Status code of a particle record
#[derive(
    Deserialize, Serialize, Display, Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash,
)]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    /// Incoming (-1)
    Initial,
    /// Decayed intermediate resonance (2)
    Intermediate,
    /// Outgoing final state (1)
    Final,
    /// Any other code
    Other,
}

impl Status {
    pub const INITIAL: i32 = -1;
    pub const INTERMEDIATE: i32 = 2;
    pub const FINAL: i32 = 1;
}

impl From<i32> for Status {
    fn from(code: i32) -> Self {
        match code {
            Self::INITIAL => Self::Initial,
            Self::INTERMEDIATE => Self::Intermediate,
            Self::FINAL => Self::Final,
            _ => Self::Other,
        }
    }
}

/// A particle record of a Les Houches event
#[derive(Deserialize, Serialize, Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    /// PDG particle code (IDUP)
    pub id: ParticleID,
    /// Status code (ISTUP)
    pub status: i32,
    /// Lines of the first and last mother, 0 for none (MOTHUP)
    pub mothers: [i32; 2],
    /// Colour and anticolour flow tags (ICOLUP)
    pub colors: [i32; 2],
    /// px, py, pz, E, m in GeV (PUP)
    pub pup: [f64; 5],
    /// Invariant lifetime cτ in mm (VTIMUP)
    pub vtimup: f64,
    /// Cosine of the angle between spin and momentum (SPINUP)
    pub spinup: f64,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            id: ParticleID::new(0),
            status: 0,
            mothers: [0; 2],
            colors: [0; 2],
            pup: [0.; 5],
            vtimup: 0.,
            spinup: 0.,
        }
    }
}

impl Particle {
    pub fn px(&self) -> f64 {
        self.pup[0]
    }

    pub fn py(&self) -> f64 {
        self.pup[1]
    }

    pub fn pz(&self) -> f64 {
        self.pup[2]
    }

    pub fn energy(&self) -> f64 {
        self.pup[3]
    }

    /// The mass entry of the record
    pub fn mass(&self) -> f64 {
        self.pup[4]
    }

    pub fn pt(&self) -> f64 {
        self.px().hypot(self.py())
    }

    pub fn decay_length(&self) -> f64 {
        self.vtimup
    }

    pub fn state(&self) -> Status {
        self.status.into()
    }

    /// Whether the particle code belongs to `pid`
    pub fn is(&self, pid: &PidSet) -> bool {
        pid.contains(self.id)
    }
}

impl From<FourMomentum> for Particle {
    fn from(p: FourMomentum) -> Self {
        Self {
            pup: [p.px(), p.py(), p.pz(), p.energy(), p.mass()],
            ..Default::default()
        }
    }
}

impl Momentum for Particle {
    fn momentum(&self) -> FourMomentum {
        FourMomentum::new(self.energy(), self.px(), self.py(), self.pz())
    }

    fn pt(&self) -> f64 {
        Particle::pt(self)
    }
}

impl Show for Particle {
    fn show(&self) -> String {
        format!(
            "Particle {{idup={},istup={},mothup=({},{}),icolup=({},{}),pup=({}),vtimup={:.6},spinup={:.6}}}",
            self.id.id(),
            self.status,
            self.mothers[0],
            self.mothers[1],
            self.colors[0],
            self.colors[1],
            self.pup.iter().map(|p| format!("{p:.6}")).join(","),
            self.vtimup,
            self.spinup
        )
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>9}{:>5}{:>5}{:>5}{:>5}{:>5}",
            self.id.id(),
            self.status,
            self.mothers[0],
            self.mothers[1],
            self.colors[0],
            self.colors[1]
        )?;
        for p in self.pup {
            write!(f, "{:>19}", scientific(p))?;
        }
        write!(f, "{:>2.0}.{:>3.0}.", self.vtimup, self.spinup)
    }
}

/// Scientific notation with 11 decimals and a signed exponent of at
/// least two digits, e.g. `1.00000000000E+02`
pub(crate) fn scientific(x: f64) -> String {
    let repr = format!("{x:.11E}");
    let Some((mantissa, exp)) = repr.split_once('E') else {
        return repr;
    };
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exp),
    };
    format!("{mantissa}E{sign}{digits:0>2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lhef::pid::{MUON, PHOTON};

    #[test]
    fn sci() {
        assert_eq!(scientific(100.), "1.00000000000E+02");
        assert_eq!(scientific(-0.00125), "-1.25000000000E-03");
        assert_eq!(scientific(0.), "0.00000000000E+00");
        assert_eq!(scientific(6.5e123), "6.50000000000E+123");
    }

    #[test]
    fn render() {
        let p = Particle {
            id: ParticleID::new(-13),
            status: 1,
            mothers: [3, 3],
            colors: [0, 0],
            pup: [10., -20., 0., 50., 0.105],
            vtimup: 0.,
            spinup: 9.,
        };
        assert_eq!(
            p.to_string(),
            "      -13    1    3    3    0    0  1.00000000000E+01 -2.00000000000E+01  \
             0.00000000000E+00  5.00000000000E+01  1.05000000000E-01 0.  9."
        );
        assert_eq!(
            p.show(),
            "Particle {idup=-13,istup=1,mothup=(3,3),icolup=(0,0),\
             pup=(10.000000,-20.000000,0.000000,50.000000,0.105000),\
             vtimup=0.000000,spinup=9.000000}"
        );
        assert!(p.is(&MUON));
        assert!(!p.is(&PHOTON));
        assert_eq!(p.state(), Status::Final);
        assert_eq!(p.state().to_string(), "final");
    }

    #[test]
    fn from_momentum() {
        let p = Particle::from(FourMomentum::new(5., 3., 0., 0.));
        assert_eq!(p.mass(), 4.);
        assert_eq!(p.energy(), 5.);
        assert_eq!(p.id, ParticleID::new(0));
        assert_eq!(p.momentum(), FourMomentum::new(5., 3., 0., 0.));
        assert_eq!(Momentum::pt(&p), 3.);
    }
}
