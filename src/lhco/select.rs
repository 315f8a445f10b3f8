use crate::{
    cuts::Cuts,
    four_momentum::{wrap_phi, FourMomentum},
    geometry::Geometry,
    lhco::{event::Event, particle::Visible},
    traits::Momentum,
};

/// Number of objects with pt > `pt` and |eta| < `eta`
pub fn num_of_particles<P: Momentum>(pt: f64, eta: f64, ps: &[P]) -> usize {
    let cuts = Cuts::new(pt, eta);
    ps.iter().filter(|p| cuts.accepts(p)).count()
}

pub fn num_photon(ev: &Event) -> usize {
    ev.photons().len()
}

pub fn num_photon_cut(pt: f64, eta: f64, ev: &Event) -> usize {
    num_of_particles(pt, eta, ev.photons())
}

pub fn num_electron(ev: &Event) -> usize {
    ev.electrons().len()
}

pub fn num_electron_cut(pt: f64, eta: f64, ev: &Event) -> usize {
    num_of_particles(pt, eta, ev.electrons())
}

pub fn num_muon(ev: &Event) -> usize {
    ev.muons().len()
}

pub fn num_muon_cut(pt: f64, eta: f64, ev: &Event) -> usize {
    num_of_particles(pt, eta, ev.muons())
}

/// Number of electrons and muons
pub fn num_lepton_iso(ev: &Event) -> usize {
    num_electron(ev) + num_muon(ev)
}

pub fn num_tau(ev: &Event) -> usize {
    ev.taus().len()
}

pub fn num_tau_cut(pt: f64, eta: f64, ev: &Event) -> usize {
    num_of_particles(pt, eta, ev.taus())
}

/// Number of jets without b-tag
pub fn num_normal_jet(ev: &Event) -> usize {
    ev.jets().len()
}

pub fn num_normal_jet_cut(pt: f64, eta: f64, ev: &Event) -> usize {
    num_of_particles(pt, eta, ev.jets())
}

pub fn num_bjet(ev: &Event) -> usize {
    ev.bjets().len()
}

pub fn num_bjet_cut(pt: f64, eta: f64, ev: &Event) -> usize {
    num_of_particles(pt, eta, ev.bjets())
}

/// Number of jets with or without b-tag
pub fn num_all_jet(ev: &Event) -> usize {
    num_normal_jet(ev) + num_bjet(ev)
}

pub fn num_all_jet_cut(pt: f64, eta: f64, ev: &Event) -> usize {
    num_normal_jet_cut(pt, eta, ev) + num_bjet_cut(pt, eta, ev)
}

pub fn missing_et(ev: &Event) -> f64 {
    ev.met().pt()
}

/// Invariant mass of the summed four-momenta
pub fn invariant_mass<'a>(ps: impl IntoIterator<Item = &'a Visible>) -> f64 {
    ps.into_iter()
        .map(Momentum::momentum)
        .sum::<FourMomentum>()
        .mass()
}

/// All jets with or without b-tag, by descending pt
pub fn all_jets(ev: &Event) -> Vec<Visible> {
    let mut jets = [ev.jets(), ev.bjets()].concat();
    crate::lhco::event::sort_by_pt(&mut jets);
    jets
}

/// Azimuthal separation in (-π, π]
pub fn delta_phi(p1: &impl Momentum, p2: &impl Momentum) -> f64 {
    wrap_phi(p1.phi() - p2.phi())
}

/// Angular separation \sqrt{Δη^2 + Δφ^2}
pub fn delta_r(p1: &impl Momentum, p2: &impl Momentum) -> f64 {
    (p1.eta() - p2.eta()).hypot(delta_phi(p1, p2))
}

/// Azimuthal separation of the four-momenta, computed by `geometry`
pub fn delta_phi_with<G: Geometry>(geometry: &G, p1: &impl Momentum, p2: &impl Momentum) -> f64 {
    geometry.delta_phi(&p1.momentum(), &p2.momentum())
}

/// Angular separation of the four-momenta, computed by `geometry`
pub fn delta_r_with<G: Geometry>(geometry: &G, p1: &impl Momentum, p2: &impl Momentum) -> f64 {
    geometry.delta_r(&p1.momentum(), &p2.momentum())
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::geometry::Reference;
    use crate::lhco::{Header, Object, RawEvent, TYP_JET, TYP_MET, TYP_MUON};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn strict_cuts() {
        let ps = [Visible::jet(30., 0., 0., 0., 1), Visible::jet(30.1, 0., 0., 0., 1)];
        assert_eq!(num_of_particles(30., 2., &ps), 1);
        let ps = [Visible::jet(40., 2., 0., 0., 1), Visible::jet(40., -1.9, 0., 0., 1)];
        assert_eq!(num_of_particles(30., 2., &ps), 1);
    }

    #[test]
    fn counts() {
        let objects = vec![
            Object::new(TYP_MUON, 0.1, 0.2, 35., 0., 1, 0, 0.),
            Object::new(TYP_MUON, 2.6, 0.2, 35., 0., -1, 0, 0.),
            Object::new(TYP_JET, 0.1, 0.2, 55., 0., 4, 1, 0.),
            Object::new(TYP_JET, 0.1, 0.2, 25., 0., 4, 0, 0.),
            Object::new(TYP_JET, 0.5, 0.2, 45., 0., 4, 0, 0.),
            Object::new(TYP_MET, 0., 0.2, 12., 0., 0, 0, 0.),
        ];
        let ev = Event::from(RawEvent::new(Header::default(), objects));
        assert_eq!(num_muon(&ev), 2);
        assert_eq!(num_muon_cut(30., 2.5, &ev), 1);
        assert_eq!(num_lepton_iso(&ev), 2);
        assert_eq!(num_all_jet(&ev), 3);
        assert_eq!(num_all_jet_cut(30., 2.5, &ev), 2);
        assert_eq!(num_normal_jet_cut(30., 2.5, &ev), 1);
        assert_eq!(num_bjet_cut(30., 2.5, &ev), 1);
        assert_eq!(missing_et(&ev), 12.);
        let pts: Vec<_> = all_jets(&ev).iter().map(|j| j.pt()).collect();
        assert_eq!(pts, [55., 45., 25.]);
    }

    #[test]
    fn mass() {
        // back-to-back massless pair
        let a = Visible::photon(50., 0., 0., 0.);
        let b = Visible::photon(50., 0., PI, 0.);
        assert!(close(invariant_mass([&a, &b]), 100.));
        assert_eq!(invariant_mass([]), 0.);
    }

    #[test]
    fn angles() {
        let a = Visible::jet(50., 1., 3., 0., 1);
        let b = Visible::jet(50., -1., -3., 0., 1);
        assert!(close(delta_phi(&a, &b), 6. - 2. * PI));
        assert!(close(delta_r(&a, &b), 2_f64.hypot(6. - 2. * PI)));
        assert_eq!(delta_phi(&a, &a), 0.);

        assert!(close(delta_phi_with(&Reference, &a, &b), delta_phi(&a, &b)));
        assert!(close(delta_r_with(&Reference, &a, &b), delta_r(&a, &b)));
    }
}
