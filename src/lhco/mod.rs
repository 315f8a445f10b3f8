//! LHC Olympics (LHCO) detector-level event files
//!
//! Every event consists of a header line, one line per reconstructed
//! object, and a closing missing energy line:
//!
//! ```text
//!   #  typ      eta    phi      pt    jmas  ntrk  btag   had/em  dum1  dum2
//!   0             4   3587
//!   1    0    0.271  3.641   47.25    0.00   0.0   0.0     0.00   0.0   0.0
//!   2    4   -1.419  3.337  306.44   35.07  10.0   2.0     0.81   0.0   0.0
//!   3    6    0.000  3.688   20.20    0.00   0.0   0.0     0.00   0.0   0.0
//! ```
mod event;
mod object;
mod parser;
mod particle;
mod select;

pub use event::{Event, EventBuilder};
pub use object::{
    Header, Object, RawEvent, TYP_ELECTRON, TYP_JET, TYP_MET, TYP_MUON, TYP_PHOTON, TYP_TAU,
};
pub use parser::{parse_event, parse_raw_event, read_raw_event, Error, Reader};
pub use particle::{BTag, Charge, Kind, Met, TauProng, Visible};
pub use select::*;

/// The column title comment line of LHCO files
pub fn opening_line() -> &'static str {
    "  #  typ      eta    phi      pt    jmas  ntrk  btag   had/em  dum1  dum2"
}
