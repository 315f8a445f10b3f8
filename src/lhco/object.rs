use std::fmt::{self, Display};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::traits::Show;

/// `typ` of photon lines
pub const TYP_PHOTON: i32 = 0;
/// `typ` of electron lines
pub const TYP_ELECTRON: i32 = 1;
/// `typ` of muon lines
pub const TYP_MUON: i32 = 2;
/// `typ` of hadronically decaying tau lines
pub const TYP_TAU: i32 = 3;
/// `typ` of jet lines, including b-jets
pub const TYP_JET: i32 = 4;
/// `typ` of the missing transverse energy line closing an event
pub const TYP_MET: i32 = 6;

/// Event header: the line starting with index 0
#[derive(
    Deserialize, Serialize, Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash,
)]
pub struct Header {
    pub event_number: i32,
    pub trigger_word: i32,
}

impl Header {
    pub fn new(event_number: i32, trigger_word: i32) -> Self {
        Self {
            event_number,
            trigger_word,
        }
    }
}

impl Show for Header {
    fn show(&self) -> String {
        format!(
            "Header {{event_number={},trigger_word={}}}",
            self.event_number, self.trigger_word
        )
    }
}

impl Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>14}{:>7}", self.event_number, self.trigger_word)
    }
}

/// One line of an LHCO event, as read
#[derive(Deserialize, Serialize, Copy, Clone, Debug, Default, PartialEq)]
pub struct Object {
    pub typ: i32,
    pub eta: f64,
    pub phi: f64,
    pub pt: f64,
    pub jmass: f64,
    pub ntrk: i32,
    pub btag: i32,
    pub hadem: f64,
}

impl Object {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        typ: i32,
        eta: f64,
        phi: f64,
        pt: f64,
        jmass: f64,
        ntrk: i32,
        btag: i32,
        hadem: f64,
    ) -> Self {
        Self {
            typ,
            eta,
            phi,
            pt,
            jmass,
            ntrk,
            btag,
            hadem,
        }
    }
}

impl Show for Object {
    fn show(&self) -> String {
        format!(
            "Object {{typ={},eta={:.6},phi={:.6},pt={:.6},jmass={:.6},ntrk={},btag={},hadem={:.6}}}",
            self.typ, self.eta, self.phi, self.pt, self.jmass, self.ntrk, self.btag, self.hadem
        )
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>5}{:>9.3}{:>7.3}{:>8.2}{:>8.2}{:>6.1}{:>6.1}{:>9.2}",
            self.typ,
            self.eta,
            self.phi,
            self.pt,
            self.jmass,
            f64::from(self.ntrk),
            f64::from(self.btag),
            self.hadem
        )
    }
}

/// An event as a header plus the ordered sequence of its lines
///
/// The typed view is [Event](crate::lhco::Event).
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct RawEvent {
    header: Header,
    objects: Vec<Object>,
}

impl RawEvent {
    pub fn new(header: Header, objects: Vec<Object>) -> Self {
        Self { header, objects }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn into_objects(self) -> Vec<Object> {
        self.objects
    }
}

impl Show for RawEvent {
    fn show(&self) -> String {
        format!(
            "RawEvent {{{},[{}]}}",
            self.header.show(),
            self.objects.iter().map(Show::show).join(",")
        )
    }
}

impl Display for RawEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const DUMMY: f64 = 0.;
        write!(f, "{:>3}{}", 0, self.header)?;
        for (counter, obj) in self.objects.iter().enumerate() {
            write!(f, "\n{:>3}{obj}{DUMMY:>6.1}{DUMMY:>6.1}", counter + 1)?;
        }
        Ok(())
    }
}
