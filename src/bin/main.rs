mod opt;

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};
use audec::auto_decompress;
use clap::Parser;
use colevent::{
    cuts::Cuts,
    lhco, lhef,
    traits::Show,
    GIT_BRANCH, GIT_REV, VERSION,
};
use env_logger::Env;
use log::{debug, info};

use crate::opt::{Command, Opt};

fn main() -> Result<()> {
    let args = argfile::expand_args_from(
        std::env::args_os(),
        argfile::parse_fromfile,
        argfile::PREFIX,
    )
    .with_context(|| "Failed to read argument file")?;
    let opt = Opt::parse_from(args);

    let env = Env::default().filter_or("COLEVENT_LOG", &opt.loglevel);
    env_logger::init_from_env(env);

    if let (Some(rev), Some(branch)) = (GIT_REV, GIT_BRANCH) {
        info!("colevent {VERSION} rev {rev} ({branch})");
    } else {
        info!("colevent {VERSION}");
    }

    debug!("settings: {:#?}", opt);

    match opt.command {
        Command::Lhco { cuts, infile } => {
            let cuts = cuts.cuts().with_context(|| "Failed to read cuts")?;
            debug!("cuts: {cuts:?}");
            analyse_lhco(&infile, &cuts)?
        }
        Command::Lhef { infile } => analyse_lhef(&infile)?,
        Command::RenderLhco { infile } => render_lhco(&infile)?,
    }
    info!("done");
    Ok(())
}

fn open(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {path:?}"))?;
    info!("Reading events from {path:?}");
    Ok(auto_decompress(BufReader::new(file)))
}

fn analyse_lhco(path: &Path, cuts: &Cuts) -> Result<()> {
    let Cuts { pt, eta } = *cuts;
    let mut nevents = 0;
    for event in lhco::Reader::new(open(path)?) {
        let raw = event.with_context(|| format!("Failed to read event from {path:?}"))?;
        let ev = lhco::Event::from(raw);
        nevents += 1;
        println!("-- Event number: {nevents}\n{}", ev.show());
        println!("---- Missing ET = {}", lhco::missing_et(&ev));
        println!(
            "---- Before cut:\n------ # of photons: {}, electrons: {}, muons: {}, taus: {}, all jets: {}, bjets: {}",
            lhco::num_photon(&ev),
            lhco::num_electron(&ev),
            lhco::num_muon(&ev),
            lhco::num_tau(&ev),
            lhco::num_all_jet(&ev),
            lhco::num_bjet(&ev),
        );
        println!(
            "------ Invariant mass of muon and b-jet = {}",
            muon_bjet_mass(&ev)
        );
        println!(
            "---- After cut:\n------ # of photons: {}, electrons: {}, muons: {}, taus: {}, all jets: {}, bjets: {}",
            lhco::num_photon_cut(pt, eta, &ev),
            lhco::num_electron_cut(pt, eta, &ev),
            lhco::num_muon_cut(pt, eta, &ev),
            lhco::num_tau_cut(pt, eta, &ev),
            lhco::num_all_jet_cut(pt, eta, &ev),
            lhco::num_bjet_cut(pt, eta, &ev),
        );
    }
    println!("-- {nevents} events parsed.");
    Ok(())
}

fn muon_bjet_mass(ev: &lhco::Event) -> f64 {
    match (ev.muons(), ev.bjets()) {
        ([muon], [bjet]) => lhco::invariant_mass([muon, bjet]),
        _ => 0.,
    }
}

fn analyse_lhef(path: &Path) -> Result<()> {
    let mut nevents = 0;
    for event in lhef::Reader::new(open(path)?) {
        let ev = event.with_context(|| format!("Failed to read event from {path:?}"))?;
        nevents += 1;
        println!(
            "-- Event number: {nevents}: {} initial, {} intermediate, {} final states, sqrt(s) = {}",
            lhef::initial_states(&ev).len(),
            lhef::intermediate_states(&ev).len(),
            lhef::final_states(&ev).len(),
            lhef::sqrt_s_of_inits(&ev),
        );
    }
    println!("-- {nevents} events parsed.");
    Ok(())
}

fn render_lhco(path: &Path) -> Result<()> {
    println!("{}", lhco::opening_line());
    for event in lhco::Reader::new(open(path)?) {
        let raw = event.with_context(|| format!("Failed to read event from {path:?}"))?;
        println!("{raw}");
    }
    Ok(())
}
