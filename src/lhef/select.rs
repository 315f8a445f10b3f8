use std::collections::BTreeSet;

use log::trace;

use crate::{
    four_momentum::FourMomentum,
    geometry::{Geometry, Reference},
    lhef::{
        event::Event,
        particle::{Particle, Status},
        pid::PidSet,
    },
    mt2::{Mt2Input, Transverse},
    traits::Momentum,
};

/// All particles satisfying `pred`, in input order
pub fn select_by<'a, F>(
    mut pred: F,
    ps: impl IntoIterator<Item = &'a Particle>,
) -> Vec<&'a Particle>
where
    F: FnMut(&Particle) -> bool,
{
    ps.into_iter().filter(|p| pred(p)).collect()
}

/// Particles whose code is in `pid`
pub fn select_by_id<'a>(
    pid: &PidSet,
    ps: impl IntoIterator<Item = &'a Particle>,
) -> Vec<&'a Particle> {
    select_by(|p| p.is(pid), ps)
}

/// Particles whose code is not in `pid`
pub fn exclude_by_id<'a>(
    pid: &PidSet,
    ps: impl IntoIterator<Item = &'a Particle>,
) -> Vec<&'a Particle> {
    select_by(|p| !p.is(pid), ps)
}

pub fn initial_states<'a>(ps: impl IntoIterator<Item = &'a Particle>) -> Vec<&'a Particle> {
    select_by(|p| p.status == Status::INITIAL, ps)
}

pub fn intermediate_states<'a>(
    ps: impl IntoIterator<Item = &'a Particle>,
) -> Vec<&'a Particle> {
    select_by(|p| p.status == Status::INTERMEDIATE, ps)
}

pub fn final_states<'a>(ps: impl IntoIterator<Item = &'a Particle>) -> Vec<&'a Particle> {
    select_by(|p| p.status == Status::FINAL, ps)
}

/// Direct products of the two incoming particles on lines 1 and 2
///
/// Only the first mother is checked.
pub fn collision_products<'a>(
    ps: impl IntoIterator<Item = &'a Particle>,
) -> Vec<&'a Particle> {
    select_by(|p| matches!(p.mothers[0], 1 | 2), ps)
}

pub fn particles_of<'a>(pid: &PidSet, ev: &'a Event) -> Vec<&'a Particle> {
    select_by_id(pid, ev)
}

/// Line numbers of the particles whose code is in `pid`
pub fn particle_lines_of(pid: &PidSet, ev: &Event) -> Vec<usize> {
    ev.lines()
        .filter(|(_, p)| p.is(pid))
        .map(|(line, _)| line)
        .collect()
}

// line of the first mother if it exists in `ev`
fn first_mother_line(line: usize, ev: &Event) -> Option<usize> {
    let p = ev.get(line)?;
    let mother = usize::try_from(p.mothers[0]).ok()?;
    ev.get(mother).map(|_| mother)
}

/// The first mother of the particle on line `line`
pub fn mother(line: usize, ev: &Event) -> Option<&Particle> {
    first_mother_line(line, ev).and_then(|m| ev.get(m))
}

/// The root of the chain of first mothers of the particle on `line`
///
/// A particle without mother is its own ancestor. Following a mother
/// index that does not point to an earlier line is the last step taken.
pub fn ancestor(line: usize, ev: &Event) -> Option<&Particle> {
    ev.get(line)?;
    let mut current = line;
    while let Some(mother) = first_mother_line(current, ev) {
        trace!("Line {current} has first mother {mother}");
        let backward = mother < current;
        current = mother;
        if !backward {
            break;
        }
    }
    ev.get(current)
}

// lines of the particles with a mother on line `line`
fn daughter_lines(line: usize, ev: &Event) -> impl Iterator<Item = (usize, &Particle)> {
    ev.lines().filter(move |(_, p)| {
        p.mothers.iter().any(|&m| usize::try_from(m) == Ok(line))
    })
}

/// All particles with a mother on line `line`
pub fn daughters(line: usize, ev: &Event) -> Vec<&Particle> {
    daughter_lines(line, ev).map(|(_, p)| p).collect()
}

/// The final-state descendants of the particle on line `line`
///
/// Intermediate daughters are expanded recursively, as long as they
/// appear after their mother. Each descendant is listed once, in line
/// order.
pub fn final_daughters(line: usize, ev: &Event) -> Vec<&Particle> {
    let mut lines = BTreeSet::new();
    let mut expanded = BTreeSet::new();
    collect_final_daughters(line, ev, &mut lines, &mut expanded);
    lines.into_iter().filter_map(|l| ev.get(l)).collect()
}

fn collect_final_daughters(
    line: usize,
    ev: &Event,
    lines: &mut BTreeSet<usize>,
    expanded: &mut BTreeSet<usize>,
) {
    // shared descendants are reachable along several paths
    if !expanded.insert(line) {
        return;
    }
    for (daughter, p) in daughter_lines(line, ev) {
        match p.state() {
            Status::Final => {
                lines.insert(daughter);
            }
            Status::Intermediate if daughter > line => {
                collect_final_daughters(daughter, ev, lines, expanded)
            }
            _ => trace!("Not following line {daughter} from {line}"),
        }
    }
}

/// Sum of four-momenta
pub fn p_sum<'a>(ps: impl IntoIterator<Item = &'a Particle>) -> FourMomentum {
    ps.into_iter().map(Momentum::momentum).sum()
}

/// A particle carrying the summed four-momentum
pub fn sum<'a>(ps: impl IntoIterator<Item = &'a Particle>) -> Particle {
    p_sum(ps).into()
}

/// Invariant mass of the summed four-momenta
pub fn invariant_mass<'a>(ps: impl IntoIterator<Item = &'a Particle>) -> f64 {
    p_sum(ps).mass()
}

/// Invariant mass of the sum over groups, each group summed first
pub fn invariant_mass_of<'a, I>(groups: impl IntoIterator<Item = I>) -> f64
where
    I: IntoIterator<Item = &'a Particle>,
{
    groups
        .into_iter()
        .map(|group| sum(group).momentum())
        .sum::<FourMomentum>()
        .mass()
}

/// Transverse momentum of the summed four-momenta
pub fn transverse_momentum<'a>(ps: impl IntoIterator<Item = &'a Particle>) -> f64 {
    p_sum(ps).pt()
}

/// Centre-of-mass energy of the incoming particles
pub fn sqrt_s_of_inits<'a>(ps: impl IntoIterator<Item = &'a Particle>) -> f64 {
    invariant_mass(initial_states(ps))
}

/// Azimuthal separation in (-π, π]
pub fn delta_phi(p1: &Particle, p2: &Particle) -> f64 {
    Reference.delta_phi(&p1.momentum(), &p2.momentum())
}

/// Angular separation \sqrt{Δη^2 + Δφ^2}
pub fn delta_r(p1: &Particle, p2: &Particle) -> f64 {
    delta_r_with(&Reference, p1, p2)
}

pub fn delta_r_with<G: Geometry>(geometry: &G, p1: &Particle, p2: &Particle) -> f64 {
    geometry.delta_r(&p1.momentum(), &p2.momentum())
}

/// Stransverse mass of two visible particles
///
/// `kx` and `ky` are the missing transverse momentum components,
/// `m_inv1` and `m_inv2` the assumed invisible masses. Visible masses
/// are the invariant masses of the four-momenta.
pub fn mt2(p1: &Particle, p2: &Particle, kx: f64, ky: f64, m_inv1: f64, m_inv2: f64) -> f64 {
    mt2_with(&Reference, p1, p2, [kx, ky], [m_inv1, m_inv2])
}

pub fn mt2_with<G: Geometry>(
    geometry: &G,
    p1: &Particle,
    p2: &Particle,
    missing: [f64; 2],
    invisible_masses: [f64; 2],
) -> f64 {
    let transverse = |p: &Particle| {
        let p = p.momentum();
        Transverse::new(p.mass(), p.px(), p.py())
    };
    let input = Mt2Input {
        visible: [transverse(p1), transverse(p2)],
        missing,
        invisible_masses,
    };
    geometry.mt2(&input)
}
