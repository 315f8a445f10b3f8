use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colevent::cuts::{Cuts, CutsError};

#[derive(Debug, Parser)]
#[clap(about, author, version)]
pub(crate) struct Opt {
    /// Verbosity level
    #[clap(
        short,
        long,
        default_value = "Info",
        help = "Verbosity level.
Possible values with increasing amount of output are
'off', 'error', 'warn', 'info', 'debug', 'trace'.\n"
    )]
    pub(crate) loglevel: String,

    #[clap(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Count objects in LHC Olympics events before and after cuts.
    Lhco {
        #[clap(flatten)]
        cuts: CutOpt,

        /// Input file in LHC Olympics format, optionally compressed.
        #[clap(name = "INFILE", value_parser)]
        infile: PathBuf,
    },
    /// Count initial, intermediate, and final states in Les Houches events.
    Lhef {
        /// Input Les Houches Event File, optionally compressed.
        #[clap(name = "INFILE", value_parser)]
        infile: PathBuf,
    },
    /// Write LHC Olympics events in canonical column format.
    RenderLhco {
        /// Input file in LHC Olympics format, optionally compressed.
        #[clap(name = "INFILE", value_parser)]
        infile: PathBuf,
    },
}

#[derive(Debug, Clone, Parser)]
pub(crate) struct CutOpt {
    /// YAML file with `pt` and `eta` entries.
    #[clap(long, value_parser, conflicts_with_all = ["pt", "eta"])]
    pub(crate) cuts: Option<PathBuf>,

    /// Minimum transverse momentum in GeV.
    #[clap(long)]
    pub(crate) pt: Option<f64>,

    /// Maximum absolute pseudorapidity.
    #[clap(long)]
    pub(crate) eta: Option<f64>,
}

impl CutOpt {
    pub(crate) fn cuts(&self) -> Result<Cuts, CutsError> {
        if let Some(file) = &self.cuts {
            return Cuts::from_yaml_file(file);
        }
        let default = Cuts::default();
        Ok(Cuts::new(
            self.pt.unwrap_or(default.pt),
            self.eta.unwrap_or(default.eta),
        ))
    }
}
