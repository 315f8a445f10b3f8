use itertools::Itertools;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::{
    lhco::{
        object::{Object, RawEvent, TYP_ELECTRON, TYP_JET, TYP_MUON, TYP_PHOTON, TYP_TAU},
        particle::{Met, Visible},
    },
    traits::Show,
};

/// Typed view of an LHCO event
///
/// Each collection is ordered by descending transverse momentum.
/// Objects with equal transverse momentum keep their input order.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Event {
    photons: Vec<Visible>,
    electrons: Vec<Visible>,
    muons: Vec<Visible>,
    taus: Vec<Visible>,
    jets: Vec<Visible>,
    bjets: Vec<Visible>,
    met: Met,
}

impl Event {
    pub fn photons(&self) -> &[Visible] {
        &self.photons
    }

    pub fn electrons(&self) -> &[Visible] {
        &self.electrons
    }

    pub fn muons(&self) -> &[Visible] {
        &self.muons
    }

    pub fn taus(&self) -> &[Visible] {
        &self.taus
    }

    /// Jets without a b-tag
    pub fn jets(&self) -> &[Visible] {
        &self.jets
    }

    pub fn bjets(&self) -> &[Visible] {
        &self.bjets
    }

    pub fn met(&self) -> &Met {
        &self.met
    }
}

impl From<&RawEvent> for Event {
    fn from(raw: &RawEvent) -> Self {
        let mut builder = EventBuilder::new();
        for obj in raw.objects() {
            builder.add(obj);
        }
        builder.build()
    }
}

impl From<RawEvent> for Event {
    fn from(raw: RawEvent) -> Self {
        Self::from(&raw)
    }
}

impl Show for Event {
    /// Empty collections are left out
    fn show(&self) -> String {
        let collections = [
            ("photon", &self.photons),
            ("electron", &self.electrons),
            ("muon", &self.muons),
            ("tau", &self.taus),
            ("jet", &self.jets),
            ("bjet", &self.bjets),
        ];
        let mut entries = collections
            .into_iter()
            .filter(|(_, objects)| !objects.is_empty())
            .map(|(name, objects)| format!("{name}={}", objects.show()))
            .chain(std::iter::once(format!("met={}", self.met.show())));
        format!("Event {{{}}}", entries.join(","))
    }
}

/// Assembles an [Event] one [Object] at a time
#[derive(Clone, Debug, Default)]
pub struct EventBuilder {
    event: Event,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify an object by its `typ` and add it
    ///
    /// Jet lines with a b-tag flag above 0.5 become b-jets. Every `typ`
    /// outside 0 to 4 is taken as missing transverse energy, replacing
    /// any earlier one.
    pub fn add(&mut self, obj: &Object) -> &mut Self {
        let Object {
            typ,
            eta,
            phi,
            pt,
            jmass,
            ntrk,
            btag,
            hadem,
        } = *obj;
        let ev = &mut self.event;
        match typ {
            TYP_PHOTON => ev.photons.push(Visible::photon(pt, eta, phi, jmass)),
            TYP_ELECTRON => ev
                .electrons
                .push(Visible::electron(pt, eta, phi, jmass, ntrk)),
            TYP_MUON => ev
                .muons
                .push(Visible::muon(pt, eta, phi, jmass, ntrk, hadem)),
            TYP_TAU => ev.taus.push(Visible::tau(pt, eta, phi, jmass, ntrk)),
            TYP_JET => {
                let btag = f64::from(btag);
                if btag > 0.5 {
                    ev.bjets
                        .push(Visible::bjet(pt, eta, phi, jmass, ntrk, btag))
                } else {
                    ev.jets.push(Visible::jet(pt, eta, phi, jmass, ntrk))
                }
            }
            _ => ev.met = Met::new(pt, phi),
        }
        self
    }

    pub fn build(self) -> Event {
        let mut event = self.event;
        for objects in [
            &mut event.photons,
            &mut event.electrons,
            &mut event.muons,
            &mut event.taus,
            &mut event.jets,
            &mut event.bjets,
        ] {
            sort_by_pt(objects);
        }
        trace!(
            "Built event with jet pts [{}]",
            event.jets.iter().map(|j| j.pt()).join(", ")
        );
        event
    }
}

/// Stable sort by descending transverse momentum
pub(crate) fn sort_by_pt(objects: &mut [Visible]) {
    objects.sort_by(|a, b| b.cmp_pt(a));
}
