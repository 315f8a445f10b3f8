use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{
    four_momentum::FourMomentum,
    traits::{Momentum, Show},
};

/// Missing transverse energy
///
/// Only the transverse momentum and its azimuth are known.
#[derive(Deserialize, Serialize, Copy, Clone, Debug, Default, PartialEq)]
pub struct Met {
    pt: f64,
    phi: f64,
    px: f64,
    py: f64,
}

impl Met {
    pub fn new(pt: f64, phi: f64) -> Self {
        Self {
            pt,
            phi,
            px: pt * phi.cos(),
            py: pt * phi.sin(),
        }
    }

    pub fn pt(&self) -> f64 {
        self.pt
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn px(&self) -> f64 {
        self.px
    }

    pub fn py(&self) -> f64 {
        self.py
    }
}

impl Show for Met {
    fn show(&self) -> String {
        format!("Met {{pt={:.6},phi={:.6}}}", self.pt, self.phi)
    }
}

/// Electric charge, as inferred from the sign of the track count
#[derive(
    Deserialize, Serialize, Display, Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd,
    Hash,
)]
#[strum(serialize_all = "lowercase")]
pub enum Charge {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Charge {
    /// Charge from the sign of a (signed) track count
    pub fn from_sign(ntrk: i32) -> Self {
        match ntrk.cmp(&0) {
            Ordering::Greater => Self::Positive,
            Ordering::Less => Self::Negative,
            Ordering::Equal => Self::Neutral,
        }
    }

    pub fn value(&self) -> i32 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
            Self::Neutral => 0,
        }
    }
}

/// Number of charged tracks in a hadronic tau decay
#[derive(
    Deserialize, Serialize, Display, Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd,
    Hash,
)]
pub enum TauProng {
    OneProng,
    ThreeProng,
    #[default]
    Unknown,
}

impl TauProng {
    pub fn from_ntrk(ntrk: i32) -> Self {
        match ntrk.unsigned_abs() {
            1 => Self::OneProng,
            2 | 3 => Self::ThreeProng,
            _ => Self::Unknown,
        }
    }

    pub fn value(&self) -> i32 {
        match self {
            Self::OneProng => 1,
            Self::ThreeProng => 3,
            Self::Unknown => 0,
        }
    }
}

/// b-tagging working point
#[derive(
    Deserialize, Serialize, Display, Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd,
    Hash,
)]
#[strum(serialize_all = "lowercase")]
pub enum BTag {
    None,
    Loose,
    Tight,
    #[default]
    Unknown,
}

impl BTag {
    /// Decode the numeric b-tag column
    pub fn from_flag(btag: f64) -> Self {
        if btag == 0. {
            Self::None
        } else if btag > 0. && btag < 1.5 {
            Self::Loose
        } else if (1.5..2.5).contains(&btag) {
            Self::Tight
        } else {
            Self::Unknown
        }
    }

    pub fn value(&self) -> i32 {
        match self {
            Self::Loose => 1,
            Self::Tight => 2,
            Self::None | Self::Unknown => 0,
        }
    }
}

/// The kind of a visible object together with its kind-specific attributes
#[derive(Deserialize, Serialize, Copy, Clone, Debug, PartialEq)]
pub enum Kind {
    Photon,
    Electron,
    Muon {
        /// Integer part of the had/em column: scalar pt sum of tracks in a cone
        ptiso: f64,
        /// Fractional part of the had/em column: calorimeter energy ratio
        etrat: f64,
    },
    Tau {
        prong: TauProng,
    },
    Jet {
        ntrk: i32,
    },
    Bjet {
        ntrk: i32,
        btag: BTag,
    },
}

/// A reconstructed visible object
///
/// The shared kinematics are fixed at construction from pt, eta, phi,
/// and mass. Energy is computed as \sqrt{pt^2 + pz^2 + m^2}, where a
/// non-positive mass counts as zero.
#[derive(Deserialize, Serialize, Copy, Clone, Debug, PartialEq)]
pub struct Visible {
    pt: f64,
    phi: f64,
    px: f64,
    py: f64,
    eta: f64,
    mass: f64,
    pz: f64,
    energy: f64,
    charge: Charge,
    kind: Kind,
}

impl Visible {
    pub fn new(kind: Kind, pt: f64, eta: f64, phi: f64, mass: f64, charge: Charge) -> Self {
        let pz = pt * eta.sinh();
        let energy = if mass > 0. {
            (pt * pt + pz * pz + mass * mass).sqrt()
        } else {
            (pt * pt + pz * pz).sqrt()
        };
        Self {
            pt,
            phi,
            px: pt * phi.cos(),
            py: pt * phi.sin(),
            eta,
            mass,
            pz,
            energy,
            charge,
            kind,
        }
    }

    pub fn photon(pt: f64, eta: f64, phi: f64, mass: f64) -> Self {
        Self::new(Kind::Photon, pt, eta, phi, mass, Charge::Neutral)
    }

    pub fn electron(pt: f64, eta: f64, phi: f64, mass: f64, ntrk: i32) -> Self {
        Self::new(Kind::Electron, pt, eta, phi, mass, Charge::from_sign(ntrk))
    }

    pub fn muon(pt: f64, eta: f64, phi: f64, mass: f64, ntrk: i32, hadem: f64) -> Self {
        let ptiso = hadem.trunc();
        let kind = Kind::Muon {
            ptiso,
            etrat: hadem - ptiso,
        };
        Self::new(kind, pt, eta, phi, mass, Charge::from_sign(ntrk))
    }

    pub fn tau(pt: f64, eta: f64, phi: f64, mass: f64, ntrk: i32) -> Self {
        let charge = if ntrk > 0 {
            Charge::Positive
        } else {
            Charge::Negative
        };
        let kind = Kind::Tau {
            prong: TauProng::from_ntrk(ntrk),
        };
        Self::new(kind, pt, eta, phi, mass, charge)
    }

    pub fn jet(pt: f64, eta: f64, phi: f64, mass: f64, ntrk: i32) -> Self {
        Self::new(Kind::Jet { ntrk }, pt, eta, phi, mass, Charge::Neutral)
    }

    pub fn bjet(pt: f64, eta: f64, phi: f64, mass: f64, ntrk: i32, btag: f64) -> Self {
        let kind = Kind::Bjet {
            ntrk,
            btag: BTag::from_flag(btag),
        };
        Self::new(kind, pt, eta, phi, mass, Charge::Neutral)
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn pt(&self) -> f64 {
        self.pt
    }

    pub fn phi(&self) -> f64 {
        self.phi
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

    pub fn eta(&self) -> f64 {
        self.eta
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn charge(&self) -> Charge {
        self.charge
    }

    pub fn ptiso(&self) -> Option<f64> {
        match self.kind {
            Kind::Muon { ptiso, .. } => Some(ptiso),
            _ => None,
        }
    }

    pub fn etrat(&self) -> Option<f64> {
        match self.kind {
            Kind::Muon { etrat, .. } => Some(etrat),
            _ => None,
        }
    }

    pub fn prong(&self) -> Option<TauProng> {
        match self.kind {
            Kind::Tau { prong } => Some(prong),
            _ => None,
        }
    }

    pub fn num_track(&self) -> Option<i32> {
        match self.kind {
            Kind::Jet { ntrk } | Kind::Bjet { ntrk, .. } => Some(ntrk),
            _ => None,
        }
    }

    pub fn btag(&self) -> Option<BTag> {
        match self.kind {
            Kind::Bjet { btag, .. } => Some(btag),
            _ => None,
        }
    }

    /// Compare by transverse momentum
    pub fn cmp_pt(&self, other: &Self) -> Ordering {
        self.pt.total_cmp(&other.pt)
    }

    fn show_pt_eta_phi(&self) -> String {
        format!("pt={:.6},eta={:.6},phi={:.6}", self.pt, self.eta, self.phi)
    }

    fn show_pt_eta_phi_m(&self) -> String {
        format!("{},mass={:.6}", self.show_pt_eta_phi(), self.mass)
    }
}

impl Momentum for Visible {
    fn momentum(&self) -> FourMomentum {
        FourMomentum::new(self.energy, self.px, self.py, self.pz)
    }

    fn pt(&self) -> f64 {
        self.pt
    }

    fn eta(&self) -> f64 {
        self.eta
    }

    fn phi(&self) -> f64 {
        self.phi
    }
}

impl Show for Visible {
    fn show(&self) -> String {
        let charge = self.charge.value();
        match self.kind {
            Kind::Photon => format!("Photon {{{}}}", self.show_pt_eta_phi()),
            Kind::Electron => {
                format!("Electron {{{},charge={charge}}}", self.show_pt_eta_phi())
            }
            Kind::Muon { ptiso, etrat } => format!(
                "Muon {{{},charge={charge},ptiso={ptiso:.6},etrat={etrat:.6}}}",
                self.show_pt_eta_phi_m()
            ),
            Kind::Tau { prong } => format!(
                "Tau {{{},charge={charge},prong={}}}",
                self.show_pt_eta_phi_m(),
                prong.value()
            ),
            Kind::Jet { ntrk } => format!("Jet {{{},ntrk={ntrk}}}", self.show_pt_eta_phi_m()),
            Kind::Bjet { ntrk, btag } => format!(
                "Bjet {{{},ntrk={ntrk},btag={}}}",
                self.show_pt_eta_phi_m(),
                btag.value()
            ),
        }
    }
}
