use std::io::BufRead;

use log::{debug, trace, warn};
use nom::IResult;
use particle_id::ParticleID;
use thiserror::Error;

use crate::{
    lhef::{
        event::{Event, EventInfo},
        particle::Particle,
    },
    parsing::{double_entry, i32_entry, leading_i32, line_end},
};

const EVENT_START: &str = "<event";
const EVENT_END: &str = "</event>";

fn is_event_start(line: &str) -> bool {
    line.trim_start()
        .strip_prefix(EVENT_START)
        .is_some_and(|rest| rest.starts_with(['>', ' ', '\t']))
}

fn is_event_end(line: &str) -> bool {
    line.trim_start().starts_with(EVENT_END)
}

/// Les Houches Event parse error
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error")]
    IoError(#[from] std::io::Error),
    /// Malformed record
    #[error("Error parsing line {line:?}: {msg}")]
    ParseError { line: String, msg: String },
    /// Negative particle count
    #[error("Invalid number of particles {0}")]
    InvalidCount(i32),
    /// Stream ended inside an event
    #[error("Stream ended inside an event")]
    Truncated,
}

impl Error {
    fn parse(line: &str, err: nom::Err<nom::error::Error<&str>>) -> Self {
        Self::ParseError {
            line: line.to_owned(),
            msg: err.to_string(),
        }
    }
}

/// Failure to parse an event, together with what was read until then
#[derive(Debug, Error)]
#[error("Failed to parse Les Houches event: {error}")]
pub struct ParseFailure {
    pub partial: Event,
    #[source]
    pub error: Error,
}

/// Read the next `n` particle records
///
/// Blank lines are skipped. Reaching the end of the stream or a closing
/// `</event>` tag first is reported as [Error::Truncated].
pub fn parse_particles<B: BufRead>(
    reader: &mut B,
    n: usize,
) -> Result<Vec<Particle>, Error> {
    // n comes from the input, don't trust it for allocation
    let mut particles = Vec::new();
    read_particles(reader, n, &mut particles)?;
    Ok(particles)
}

fn read_particles<B: BufRead>(
    reader: &mut B,
    n: usize,
    particles: &mut Vec<Particle>,
) -> Result<(), Error> {
    let mut buf = String::new();
    while particles.len() < n {
        let line = next_line(reader, &mut buf)?.ok_or(Error::Truncated)?;
        if is_event_end(line) {
            debug!("Event closed after {} of {n} particles", particles.len());
            return Err(Error::Truncated);
        }
        trace!("Read particle record {line:?}");
        let (_, p) = particle(line).map_err(|err| Error::parse(line, err))?;
        particles.push(p);
    }
    Ok(())
}

/// Parse the next `<event>` block, reporting failures
///
/// Anything before the opening tag is skipped. Returns `Ok(None)` if
/// the stream ends before the next event starts. On failure the
/// particles read so far are returned alongside the error.
pub fn parse_or_fail<B: BufRead>(reader: &mut B) -> Result<Option<Event>, ParseFailure> {
    let fail = |error| ParseFailure {
        partial: Event::default(),
        error,
    };
    let mut buf = String::new();
    loop {
        match next_line(reader, &mut buf).map_err(fail)? {
            None => {
                debug!("Reached end of Les Houches event stream");
                return Ok(None);
            }
            Some(line) if is_event_start(line) => break,
            Some(line) => trace!("Skipping line {line:?}"),
        }
    }

    let line = next_line(reader, &mut buf)
        .map_err(fail)?
        .ok_or_else(|| fail(Error::Truncated))?;
    trace!("Read event info {line:?}");
    let (nup, info) = match event_info(line) {
        Ok((_, res)) => res,
        Err(err) => return Err(fail(Error::parse(line, err))),
    };
    let Ok(nup) = usize::try_from(nup) else {
        return Err(fail(Error::InvalidCount(nup)));
    };
    let info = EventInfo { nup, ..info };

    let mut particles = Vec::new();
    if let Err(error) = read_particles(reader, nup, &mut particles) {
        return Err(ParseFailure {
            partial: Event::new(Some(info), particles),
            error,
        });
    }
    let event = Event::new(Some(info), particles);

    // optional content (weights, comments) until the closing tag
    loop {
        match next_line(reader, &mut buf) {
            Ok(Some(line)) if is_event_end(line) => break,
            Ok(Some(line)) => trace!("Skipping line {line:?}"),
            Ok(None) => {
                return Err(ParseFailure {
                    partial: event,
                    error: Error::Truncated,
                })
            }
            Err(error) => {
                return Err(ParseFailure {
                    partial: event,
                    error,
                })
            }
        }
    }
    Ok(Some(event))
}

/// Parse the next `<event>` block
///
/// Returns an empty event both at the end of the stream and on failure.
pub fn parse_event<B: BufRead>(reader: &mut B) -> Event {
    match parse_or_fail(reader) {
        Ok(Some(event)) => event,
        Ok(None) => Event::default(),
        Err(err) => {
            warn!("{err}");
            Event::default()
        }
    }
}

// next non-blank line without trailing whitespace, `None` at end of stream
fn next_line<'a, B: BufRead>(
    reader: &mut B,
    buf: &'a mut String,
) -> Result<Option<&'a str>, Error> {
    loop {
        buf.clear();
        if reader.read_line(buf)? == 0 {
            return Ok(None);
        }
        if !buf.trim().is_empty() {
            break;
        }
    }
    Ok(Some(buf.trim_end()))
}

fn event_info(line: &str) -> IResult<&str, (i32, EventInfo)> {
    let (rest, nup) = leading_i32(line)?;
    let (rest, idprup) = i32_entry(rest)?;
    let (rest, xwgtup) = double_entry(rest)?;
    let (rest, scalup) = double_entry(rest)?;
    let (rest, aqedup) = double_entry(rest)?;
    let (rest, aqcdup) = double_entry(rest)?;
    let (rest, _) = line_end(rest)?;
    let info = EventInfo {
        nup: 0,
        idprup,
        xwgtup,
        scalup,
        aqedup,
        aqcdup,
    };
    Ok((rest, (nup, info)))
}

fn particle(line: &str) -> IResult<&str, Particle> {
    let (rest, id) = leading_i32(line)?;
    let (rest, status) = i32_entry(rest)?;
    let (rest, mother1) = i32_entry(rest)?;
    let (rest, mother2) = i32_entry(rest)?;
    let (rest, color1) = i32_entry(rest)?;
    let (rest, color2) = i32_entry(rest)?;
    let mut pup = [0.; 5];
    let mut rest = rest;
    for p in pup.iter_mut() {
        (rest, *p) = double_entry(rest)?;
    }
    let (rest, vtimup) = double_entry(rest)?;
    let (rest, spinup) = double_entry(rest)?;
    let (rest, _) = line_end(rest)?;
    let p = Particle {
        id: ParticleID::new(id),
        status,
        mothers: [mother1, mother2],
        colors: [color1, color2],
        pup,
        vtimup,
        spinup,
    };
    Ok((rest, p))
}

/// Iterator over the events of a Les Houches Event File
///
/// Iteration ends at the end of the stream or at the first failure,
/// which is returned as the last item.
#[derive(Debug)]
pub struct Reader<B> {
    source: B,
    done: bool,
}

impl<B: BufRead> Reader<B> {
    pub fn new(source: B) -> Self {
        Self {
            source,
            done: false,
        }
    }

    pub fn into_inner(self) -> B {
        self.source
    }
}

impl<B: BufRead> Iterator for Reader<B> {
    type Item = Result<Event, ParseFailure>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let res = parse_or_fail(&mut self.source).transpose();
        if !matches!(res, Some(Ok(_))) {
            self.done = true;
        }
        res
    }
}

impl<B: BufRead> std::iter::FusedIterator for Reader<B> {}
