use particle_id::ParticleID;

/// A named set of PDG particle codes
///
/// Membership is exact, so particles and antiparticles only both match
/// if both codes are listed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PidSet {
    name: &'static str,
    ids: &'static [ParticleID],
}

impl PidSet {
    pub const fn new(name: &'static str, ids: &'static [ParticleID]) -> Self {
        Self { name, ids }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ids(&self) -> &'static [ParticleID] {
        self.ids
    }

    pub fn contains(&self, id: ParticleID) -> bool {
        self.ids.contains(&id)
    }
}

const fn pair(id: i32) -> [ParticleID; 2] {
    [ParticleID::new(id), ParticleID::new(-id)]
}

const ELECTRON_IDS: [ParticleID; 2] = pair(11);
const ELEC_NEUTRINO_IDS: [ParticleID; 2] = pair(12);
const MUON_IDS: [ParticleID; 2] = pair(13);
const MUON_NEUTRINO_IDS: [ParticleID; 2] = pair(14);
const TAU_IDS: [ParticleID; 2] = pair(15);
const TAU_NEUTRINO_IDS: [ParticleID; 2] = pair(16);
const LEPTON_ISO_IDS: [ParticleID; 4] =
    [ELECTRON_IDS[0], ELECTRON_IDS[1], MUON_IDS[0], MUON_IDS[1]];
const NEUTRINO_IDS: [ParticleID; 6] = [
    ELEC_NEUTRINO_IDS[0],
    ELEC_NEUTRINO_IDS[1],
    MUON_NEUTRINO_IDS[0],
    MUON_NEUTRINO_IDS[1],
    TAU_NEUTRINO_IDS[0],
    TAU_NEUTRINO_IDS[1],
];
const CHARM_IDS: [ParticleID; 2] = pair(4);
const BOTTOM_IDS: [ParticleID; 2] = pair(5);
const TOP_IDS: [ParticleID; 2] = pair(6);
const GLUON_IDS: [ParticleID; 1] = [ParticleID::new(21)];
const PHOTON_IDS: [ParticleID; 1] = [ParticleID::new(22)];
const ZBOSON_IDS: [ParticleID; 1] = [ParticleID::new(23)];
const WBOSON_IDS: [ParticleID; 1] = [ParticleID::new(24)];
const HIGGS_IDS: [ParticleID; 1] = [ParticleID::new(25)];

pub const ELECTRON: PidSet = PidSet::new("electron", &ELECTRON_IDS);
pub const ELEC_NEUTRINO: PidSet = PidSet::new("electron neutrino", &ELEC_NEUTRINO_IDS);
pub const MUON: PidSet = PidSet::new("muon", &MUON_IDS);
pub const MUON_NEUTRINO: PidSet = PidSet::new("muon neutrino", &MUON_NEUTRINO_IDS);
pub const TAU: PidSet = PidSet::new("tau", &TAU_IDS);
pub const TAU_NEUTRINO: PidSet = PidSet::new("tau neutrino", &TAU_NEUTRINO_IDS);
pub const LEPTON_ISO: PidSet = PidSet::new("isolated lepton", &LEPTON_ISO_IDS);
pub const NEUTRINO: PidSet = PidSet::new("neutrino", &NEUTRINO_IDS);

pub const CHARM: PidSet = PidSet::new("charm", &CHARM_IDS);
pub const BOTTOM: PidSet = PidSet::new("bottom", &BOTTOM_IDS);
pub const TOP: PidSet = PidSet::new("top", &TOP_IDS);

pub const GLUON: PidSet = PidSet::new("gluon", &GLUON_IDS);
pub const PHOTON: PidSet = PidSet::new("photon", &PHOTON_IDS);
pub const ZBOSON: PidSet = PidSet::new("Z boson", &ZBOSON_IDS);
pub const WBOSON: PidSet = PidSet::new("W boson", &WBOSON_IDS);
pub const HIGGS: PidSet = PidSet::new("Higgs boson", &HIGGS_IDS);
