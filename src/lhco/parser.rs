use std::io::BufRead;

use log::{debug, trace, warn};
use nom::{combinator::opt, IResult};
use thiserror::Error;

use crate::{
    lhco::{
        event::Event,
        object::{Header, Object, RawEvent, TYP_MET},
    },
    parsing::{double_entry, i32_entry, leading_i32},
};

const COMMENT_MARKER: char = '#';

/// LHCO parse error
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error")]
    IoError(#[from] std::io::Error),
    /// Malformed line
    #[error("Error parsing line {line:?}: {msg}")]
    ParseError { line: String, msg: String },
    /// Object type code beyond the missing energy code
    #[error("Undefined object type {typ} in line {line:?}")]
    UndefinedType { typ: i32, line: String },
    /// Stream ended before the missing energy line
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

/// Read the next event from `reader`
///
/// Comment and blank lines are skipped. A header line (index 0) starts
/// a new event, discarding anything read before. Reading stops after
/// the missing energy line.
///
/// Returns `Ok(None)` if the stream ends before any line of a new
/// event was read.
pub fn read_raw_event<B: BufRead>(
    reader: &mut B,
) -> Result<Option<RawEvent>, Error> {
    let mut header = None;
    let mut objects = Vec::new();
    let mut buf = String::new();
    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            if header.is_none() && objects.is_empty() {
                debug!("Reached end of LHCO stream");
                return Ok(None);
            }
            return Err(Error::Truncated);
        }
        let line = buf.trim_end();
        if line.contains(COMMENT_MARKER) || line.trim().is_empty() {
            debug!("Skipping line {line:?}");
            continue;
        }
        trace!("Read LHCO line {line:?}");
        let (rest, first) = leading_i32(line).map_err(|err| Error::parse(line, err))?;
        let (rest, second) = i32_entry(rest).map_err(|err| Error::parse(line, err))?;
        if first == 0 {
            let (_, trigger) =
                opt(i32_entry)(rest).map_err(|err| Error::parse(line, err))?;
            header = Some(Header::new(second, trigger.unwrap_or_default()));
            objects.clear();
        } else if second <= TYP_MET {
            let (_, obj) = object_entries(second, rest).map_err(|err| Error::parse(line, err))?;
            objects.push(obj);
            if second == TYP_MET {
                let header = header.unwrap_or_default();
                return Ok(Some(RawEvent::new(header, objects)));
            }
        } else {
            return Err(Error::UndefinedType {
                typ: second,
                line: line.to_owned(),
            });
        }
    }
}

/// Read the next event, `None` if the stream is exhausted or malformed
pub fn parse_raw_event<B: BufRead>(reader: &mut B) -> Option<RawEvent> {
    match read_raw_event(reader) {
        Ok(ev) => ev,
        Err(err) => {
            warn!("Failed to read LHCO event: {err}");
            None
        }
    }
}

/// Read the next event and classify its objects
pub fn parse_event<B: BufRead>(reader: &mut B) -> Option<Event> {
    parse_raw_event(reader).map(Event::from)
}

// everything after the type code: eta phi pt jmass ntrk btag hadem [dum1 dum2]
fn object_entries(typ: i32, line: &str) -> IResult<&str, Object> {
    let (rest, eta) = double_entry(line)?;
    let (rest, phi) = double_entry(rest)?;
    let (rest, pt) = double_entry(rest)?;
    let (rest, jmass) = double_entry(rest)?;
    let (rest, ntrk) = double_entry(rest)?;
    let (rest, btag) = double_entry(rest)?;
    let (rest, hadem) = double_entry(rest)?;
    let obj = Object::new(
        typ,
        eta,
        phi,
        pt,
        jmass,
        ntrk.trunc() as i32,
        btag.trunc() as i32,
        hadem,
    );
    Ok((rest, obj))
}

/// Iterator over the events of an LHCO stream
///
/// Iteration ends at the end of the stream or at the first error,
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
    type Item = Result<RawEvent, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let res = read_raw_event(&mut self.source).transpose();
        if !matches!(res, Some(Ok(_))) {
            self.done = true;
        }
        res
    }
}

impl<B: BufRead> std::iter::FusedIterator for Reader<B> {}

#[cfg(test)]
mod tests {
    use std::io::BufReader;

    use super::*;
    use crate::lhco::{num_bjet, num_normal_jet, num_photon, opening_line};

    fn log_init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    const EVENT: &str = "
  #  typ      eta    phi      pt    jmas  ntrk  btag   had/em  dum1  dum2
  0             4   3587
  1    0    0.271  3.641   47.25    0.00   0.0   0.0     0.00   0.0   0.0
  2    4   -0.136  0.290  440.15   79.66  19.0   0.0     1.23   0.0   0.0
  3    4   -1.419  3.337  306.44   35.07  10.0   2.0     0.81   0.0   0.0
  4    4    0.892  4.902   44.82    6.43   7.0   0.0     2.06   0.0   0.0
  5    6    0.000  3.688   20.20    0.00   0.0   0.0     0.00   0.0   0.0
";

    #[test]
    fn parse_sample() {
        log_init();
        let mut reader = EVENT.as_bytes();
        let raw = read_raw_event(&mut reader).unwrap().unwrap();
        assert_eq!(raw.header(), &Header::new(4, 3587));
        assert_eq!(raw.objects().len(), 5);
        assert_eq!(
            raw.objects()[2],
            Object::new(4, -1.419, 3.337, 306.44, 35.07, 10, 2, 0.81)
        );

        let ev = Event::from(&raw);
        assert_eq!(num_photon(&ev), 1);
        assert_eq!(num_normal_jet(&ev), 2);
        assert_eq!(num_bjet(&ev), 1);
        assert_eq!(ev.bjets()[0].btag(), Some(crate::lhco::BTag::Tight));
        assert!((ev.met().pt() - 20.20).abs() < 1e-12);

        assert!(read_raw_event(&mut reader).unwrap().is_none());
    }

    #[test]
    fn render_and_reparse() {
        log_init();
        let raw = parse_raw_event(&mut EVENT.as_bytes()).unwrap();
        let rendered = format!("{}\n{raw}\n", opening_line());
        let reparsed = parse_raw_event(&mut rendered.as_bytes()).unwrap();
        assert_eq!(raw, reparsed);
        assert_eq!(rendered.lines().nth(2), EVENT.lines().nth(3));
    }

    #[test]
    fn optional_columns() {
        log_init();
        let text = "0 7\n1 1 0.5 0.1 25.0 0.0 -1.0 0.0 0.0\n2 6 0.0 0.2 10.0 0.0 0.0 0.0 0.0\n";
        let raw = parse_raw_event(&mut text.as_bytes()).unwrap();
        assert_eq!(raw.header(), &Header::new(7, 0));
        assert_eq!(raw.objects()[0].ntrk, -1);
    }

    #[test]
    fn header_resets() {
        log_init();
        let text = "0 1 0\n1 4 0.5 0.1 25.0 0.0 3.0 0.0 0.0\n\
                    0 2 0\n1 0 0.5 0.1 25.0 0.0 0.0 0.0 0.0\n2 6 0.0 0.2 10.0 0.0 0.0 0.0 0.0\n";
        let raw = parse_raw_event(&mut text.as_bytes()).unwrap();
        assert_eq!(raw.header().event_number, 2);
        assert_eq!(raw.objects().len(), 2);
        assert_eq!(raw.objects()[0].typ, 0);
    }

    #[test]
    fn failures() {
        log_init();
        let undefined = "0 1 0\n1 7 0.5 0.1 25.0 0.0 3.0 0.0 0.0\n";
        assert!(matches!(
            read_raw_event(&mut undefined.as_bytes()),
            Err(Error::UndefinedType { typ: 7, .. })
        ));
        assert!(parse_event(&mut undefined.as_bytes()).is_none());

        let truncated = "0 1 0\n1 4 0.5 0.1 25.0 0.0 3.0 0.0 0.0\n";
        assert!(matches!(
            read_raw_event(&mut truncated.as_bytes()),
            Err(Error::Truncated)
        ));

        let malformed = "0 1 0\n1 4 0.5 x 25.0 0.0 3.0 0.0 0.0\n";
        assert!(matches!(
            read_raw_event(&mut malformed.as_bytes()),
            Err(Error::ParseError { .. })
        ));

        assert!(read_raw_event(&mut "# only a comment\n\n".as_bytes())
            .unwrap()
            .is_none());
    }

    #[test]
    fn reader() {
        log_init();
        let text = format!("{EVENT}{}", EVENT.replace("  0             4", "  0             5"));
        let events: Vec<_> = Reader::new(BufReader::new(text.as_bytes()))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].header().event_number, 5);

        let text = format!("{EVENT}0 1 0\n1 9 0 0 0 0 0 0 0\n{EVENT}");
        let mut reader = Reader::new(text.as_bytes());
        assert!(matches!(reader.next(), Some(Ok(_))));
        assert!(matches!(reader.next(), Some(Err(_))));
        assert!(reader.next().is_none());
    }
}
