//! `colevent` reads collider events in the
//! [LHC Olympics](http://madgraph.phys.ucl.ac.be/Manual/lhco.html) (LHCO)
//! and [Les Houches Event File](https://arxiv.org/abs/hep-ph/0609017)
//! (LHEF) formats and provides kinematic observables for analysing
//! them.
//!
//! # How to use
//!
//! ```no_run
//! use std::{fs::File, io::BufReader};
//! use colevent::lhco;
//!
//! let mut input = BufReader::new(File::open("events.lhco")?);
//! while let Some(ev) = lhco::parse_event(&mut input) {
//!     println!("missing ET: {}", lhco::missing_et(&ev));
//!     println!("jets: {}", lhco::num_all_jet_cut(30., 2., &ev));
//! }
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! ## Most relevant modules
//!
//! - [lhco] for detector-level events with typed objects
//! - [lhef] for parton-level events and their decay chains
//! - [four_momentum] for the underlying kinematics
//! - [mt2] for the stransverse mass
//!

/// Two-body scattering kinematics
pub mod cm22;
/// Kinematic acceptance cuts
pub mod cuts;
/// Four-momentum class
pub mod four_momentum;
/// Exchangeable backend for angular observables
pub mod geometry;
pub mod lhco;
pub mod lhef;
pub mod mt2;
/// Common traits
pub mod traits;

mod parsing;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_REV: Option<&str> = option_env!("VERGEN_GIT_SHA");
pub const GIT_BRANCH: Option<&str> = option_env!("VERGEN_GIT_BRANCH");
