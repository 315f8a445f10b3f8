//! [Les Houches Event Files](https://arxiv.org/abs/hep-ph/0609017)
//!
//! Each event is an `<event>` block with a common information line
//! followed by one record per particle:
//!
//! ```text
//! <event>
//!   5      1 +1.0000000e+00 9.11880000e+01 7.81865400e-03 1.18000000e-01
//!        21   -1    0    0  501  502 0.0 0.0 +1.2e+02 1.2e+02 0.0 0.0 9.0
//!        ...
//! </event>
//! ```
mod event;
mod parser;
mod particle;
pub mod pid;
mod select;

pub use event::{Event, EventInfo};
pub use parser::{parse_event, parse_or_fail, parse_particles, Error, ParseFailure, Reader};
pub use particle::{Particle, Status};
pub use pid::PidSet;
pub use select::*;

pub fn opening_line() -> &'static str {
    r#"<LesHouchesEvents version="1.0">"#
}

pub fn closing_line() -> &'static str {
    "</LesHouchesEvents>"
}
