use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::traits::Momentum;

/// Kinematic acceptance cuts
///
/// An object passes if pt > `pt` and |eta| < `eta`. Both inequalities
/// are strict.
#[derive(Deserialize, Serialize, Copy, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Cuts {
    /// Minimum transverse momentum in GeV
    pub pt: f64,
    /// Maximum absolute pseudorapidity
    pub eta: f64,
}

impl Default for Cuts {
    fn default() -> Self {
        Self { pt: 30., eta: 2. }
    }
}

impl Cuts {
    pub fn new(pt: f64, eta: f64) -> Self {
        Self { pt, eta }
    }

    pub fn accepts<P: Momentum>(&self, p: &P) -> bool {
        p.pt() > self.pt && p.eta().abs() < self.eta
    }

    /// Read cuts from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, CutsError> {
        let file = File::open(path.as_ref())?;
        let cuts = serde_yaml::from_reader(BufReader::new(file))?;
        Ok(cuts)
    }
}

#[derive(Debug, Error)]
pub enum CutsError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse cuts: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::four_momentum::FourMomentum;

    #[test]
    fn strict_boundaries() {
        let cuts = Cuts::new(30., 2.);
        let at_pt = FourMomentum::new(30., 30., 0., 0.);
        let above_pt = FourMomentum::new(30.1, 30.1, 0., 0.);
        assert!(!cuts.accepts(&at_pt));
        assert!(cuts.accepts(&above_pt));
    }

    #[test]
    fn yaml() {
        let cuts: Cuts = serde_yaml::from_str("pt: 25.0\n").unwrap();
        assert_eq!(cuts, Cuts::new(25., 2.));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "pt: 40\neta: 2.5").unwrap();
        let cuts = Cuts::from_yaml_file(file.path()).unwrap();
        assert_eq!(cuts, Cuts::new(40., 2.5));
    }
}
