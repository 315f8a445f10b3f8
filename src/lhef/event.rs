use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::{
    lhef::particle::{scientific, Particle},
    traits::Show,
};

/// The common event information line
#[derive(Deserialize, Serialize, Copy, Clone, Debug, Default, PartialEq)]
pub struct EventInfo {
    /// Number of particle records
    pub nup: usize,
    /// Process id
    pub idprup: i32,
    /// Event weight
    pub xwgtup: f64,
    /// Scale in GeV
    pub scalup: f64,
    /// α_QED
    pub aqedup: f64,
    /// α_QCD
    pub aqcdup: f64,
}

impl Display for EventInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>3}{:>7} {} {} {} {}",
            self.nup,
            self.idprup,
            scientific(self.xwgtup),
            scientific(self.scalup),
            scientific(self.aqedup),
            scientific(self.aqcdup)
        )
    }
}

/// A Les Houches event
///
/// Particles are addressed by their line number within the event,
/// starting at 1. Mother indices refer to these line numbers.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Event {
    info: Option<EventInfo>,
    particles: Vec<Particle>,
}

impl Event {
    pub fn new(info: Option<EventInfo>, particles: Vec<Particle>) -> Self {
        Self { info, particles }
    }

    pub fn info(&self) -> Option<&EventInfo> {
        self.info.as_ref()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn into_particles(self) -> Vec<Particle> {
        self.particles
    }

    /// The particle at line `line`, counting from 1
    pub fn get(&self, line: usize) -> Option<&Particle> {
        line.checked_sub(1).and_then(|idx| self.particles.get(idx))
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    /// Pairs of line number and particle
    pub fn lines(&self) -> impl Iterator<Item = (usize, &Particle)> {
        self.particles.iter().enumerate().map(|(idx, p)| (idx + 1, p))
    }
}

impl<'a> IntoIterator for &'a Event {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Show for Event {
    fn show(&self) -> String {
        self.particles.show()
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.info.unwrap_or(EventInfo {
            nup: self.particles.len(),
            ..Default::default()
        });
        writeln!(f, "<event>")?;
        writeln!(f, "{info}")?;
        for p in &self.particles {
            writeln!(f, "{p}")?;
        }
        write!(f, "</event>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_id::ParticleID;

    #[test]
    fn lines() {
        let particles = (1..=3)
            .map(|id| Particle {
                id: ParticleID::new(id),
                ..Default::default()
            })
            .collect();
        let ev = Event::new(None, particles);
        assert!(ev.get(0).is_none());
        assert_eq!(ev.get(1).unwrap().id, ParticleID::new(1));
        assert_eq!(ev.get(3).unwrap().id, ParticleID::new(3));
        assert!(ev.get(4).is_none());
        let lines: Vec<_> = ev.lines().map(|(l, p)| (l, p.id.id())).collect();
        assert_eq!(lines, [(1, 1), (2, 2), (3, 3)]);
        assert_eq!((&ev).into_iter().count(), 3);
    }

    #[test]
    fn render() {
        let info = EventInfo {
            nup: 1,
            idprup: 1,
            xwgtup: 0.5,
            scalup: 91.188,
            aqedup: 0.0078125,
            aqcdup: 0.118,
        };
        assert_eq!(
            info.to_string(),
            "  1      1 5.00000000000E-01 9.11880000000E+01 7.81250000000E-03 1.18000000000E-01"
        );
        let ev = Event::new(None, vec![Particle::default()]);
        let rendered = ev.to_string();
        assert!(rendered.starts_with("<event>\n  1      0 0.00000000000E+00"));
        assert!(rendered.ends_with(" 0.  0.\n</event>"));
        assert_eq!(Event::default().show(), "[]");
    }
}
