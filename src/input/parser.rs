//! SGR mouse report parser for terminal input.
//!
//! Scans raw bytes for reports of the form `ESC [ < code ; col ; row M/m`
//! (xterm mode 1006) and yields [`RawEvent`]s. The terminal interleaves
//! these reports with ordinary keystrokes, so anything that is not a
//! recognized report is skipped one byte at a time and never treated as an
//! error.
//!
//! [`parse_events`] is stateless: it looks at one buffer only, and a report
//! cut off at the end of the buffer produces nothing. [`SgrDecoder`] adds an
//! optional carry-over for that tail when reads may split a report.

use std::iter::FusedIterator;

use crate::ansi::sequences::SGR_MOUSE_PREFIX;
use crate::terminal::{MouseEventKind, RawEvent};

/// Default upper bound for a reported column or row.
///
/// Real terminals stay far below this; larger values are treated as
/// garbage rather than events.
pub const MAX_COORDINATE: u32 = 10_000;

/// Largest button code any recognized report uses is 65; anything above
/// this bound is rejected while scanning digits.
const MAX_CODE: u32 = 255;

/// Longest trailing fragment [`SgrDecoder`] keeps between feeds.
///
/// `ESC [ < 65 ; 10000 ; 10000` is 19 bytes.
pub const MAX_CARRY: usize = 32;

const ESC: u8 = 0x1b;

/// Outcome of matching a report at the start of a slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Match {
    /// A complete report and the number of bytes it spans.
    Event(RawEvent, usize),
    /// The slice does not start with a recognized report.
    NoMatch,
    /// The slice is a proper prefix of a report that could still match.
    Incomplete,
}

/// Result of scanning one numeric field.
enum Field {
    Value(u32, usize),
    NoMatch,
    Incomplete,
}

/// Try to match a single report at the start of `input`.
#[must_use]
pub fn match_at(input: &[u8], max_coordinate: u32) -> Match {
    for (i, &expected) in SGR_MOUSE_PREFIX.iter().enumerate() {
        match input.get(i) {
            None => return Match::Incomplete,
            Some(&b) if b == expected => {}
            Some(_) => return Match::NoMatch,
        }
    }
    let pos = SGR_MOUSE_PREFIX.len();

    let (code, pos) = match number(input, pos, MAX_CODE) {
        Field::Value(n, next) => (n, next),
        Field::NoMatch => return Match::NoMatch,
        Field::Incomplete => return Match::Incomplete,
    };
    if MouseEventKind::from_sgr(code, false).is_none()
        && MouseEventKind::from_sgr(code, true).is_none()
    {
        return Match::NoMatch;
    }

    let pos = match separator(input, pos) {
        Field::Value(_, next) => next,
        Field::NoMatch => return Match::NoMatch,
        Field::Incomplete => return Match::Incomplete,
    };
    let (column, pos) = match number(input, pos, max_coordinate) {
        Field::Value(n, next) => (n, next),
        Field::NoMatch => return Match::NoMatch,
        Field::Incomplete => return Match::Incomplete,
    };
    let pos = match separator(input, pos) {
        Field::Value(_, next) => next,
        Field::NoMatch => return Match::NoMatch,
        Field::Incomplete => return Match::Incomplete,
    };
    let (row, pos) = match number(input, pos, max_coordinate) {
        Field::Value(n, next) => (n, next),
        Field::NoMatch => return Match::NoMatch,
        Field::Incomplete => return Match::Incomplete,
    };

    let release = match input.get(pos) {
        None => return Match::Incomplete,
        Some(b'M') => false,
        Some(b'm') => true,
        Some(_) => return Match::NoMatch,
    };

    match MouseEventKind::from_sgr(code, release) {
        Some(kind) => Match::Event(RawEvent::new(kind, column, row), pos + 1),
        None => Match::NoMatch,
    }
}

/// Scan a run of decimal digits starting at `pos`.
///
/// Overflow or a value above `max` rejects the candidate immediately, so a
/// runaway digit string costs at most a handful of bytes.
fn number(input: &[u8], pos: usize, max: u32) -> Field {
    let mut value: u32 = 0;
    let mut end = pos;
    while let Some(&b) = input.get(end) {
        if !b.is_ascii_digit() {
            break;
        }
        let Some(next) = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(b - b'0')))
            .filter(|&v| v <= max)
        else {
            return Field::NoMatch;
        };
        value = next;
        end += 1;
    }

    if end == input.len() {
        Field::Incomplete
    } else if end == pos {
        Field::NoMatch
    } else {
        Field::Value(value, end)
    }
}

fn separator(input: &[u8], pos: usize) -> Field {
    match input.get(pos) {
        None => Field::Incomplete,
        Some(b';') => Field::Value(0, pos + 1),
        Some(_) => Field::NoMatch,
    }
}

/// Parse every complete SGR mouse report in `buf`, in order.
///
/// Uses [`MAX_COORDINATE`] as the coordinate bound.
#[must_use]
pub fn parse_events(buf: &[u8]) -> SgrEvents<'_> {
    parse_events_bounded(buf, MAX_COORDINATE)
}

/// Parse with an explicit coordinate bound (for example the terminal size).
#[must_use]
pub fn parse_events_bounded(buf: &[u8], max_coordinate: u32) -> SgrEvents<'_> {
    SgrEvents {
        buf,
        pos: 0,
        max_coordinate,
        incomplete_at: None,
    }
}

/// Lazy iterator over the reports in a buffer. See [`parse_events`].
#[derive(Clone, Debug)]
pub struct SgrEvents<'a> {
    buf: &'a [u8],
    pos: usize,
    max_coordinate: u32,
    incomplete_at: Option<usize>,
}

impl<'a> SgrEvents<'a> {
    /// Trailing bytes that began a report but ended with the buffer.
    ///
    /// Only meaningful once the iterator is exhausted.
    #[must_use]
    pub fn incomplete_tail(&self) -> Option<&'a [u8]> {
        self.incomplete_at.map(|start| &self.buf[start..])
    }
}

impl Iterator for SgrEvents<'_> {
    type Item = RawEvent;

    fn next(&mut self) -> Option<RawEvent> {
        while self.pos < self.buf.len() {
            let Some(offset) = self.buf[self.pos..].iter().position(|&b| b == ESC) else {
                self.pos = self.buf.len();
                break;
            };
            let start = self.pos + offset;

            match match_at(&self.buf[start..], self.max_coordinate) {
                Match::Event(event, consumed) => {
                    self.pos = start + consumed;
                    return Some(event);
                }
                Match::NoMatch => self.pos = start + 1,
                Match::Incomplete => {
                    self.incomplete_at = Some(start);
                    self.pos = self.buf.len();
                }
            }
        }
        None
    }
}

impl FusedIterator for SgrEvents<'_> {}

/// Parser that carries a report split across reads into the next feed.
#[derive(Clone, Debug)]
pub struct SgrDecoder {
    pending: Vec<u8>,
    max_coordinate: u32,
}

impl Default for SgrDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SgrDecoder {
    /// Create a decoder with the default coordinate bound.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_coordinate(MAX_COORDINATE)
    }

    /// Create a decoder with an explicit coordinate bound.
    #[must_use]
    pub fn with_max_coordinate(max_coordinate: u32) -> Self {
        Self {
            pending: Vec::new(),
            max_coordinate,
        }
    }

    /// Decode `bytes`, preceded by whatever the last feed left over.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<RawEvent> {
        let mut joined = std::mem::take(&mut self.pending);
        joined.extend_from_slice(bytes);

        let mut events = parse_events_bounded(&joined, self.max_coordinate);
        let decoded: Vec<RawEvent> = events.by_ref().collect();
        if let Some(tail) = events.incomplete_tail() {
            if tail.len() <= MAX_CARRY {
                self.pending.extend_from_slice(tail);
            }
        }
        decoded
    }

    /// Bytes held back from the last feed.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Drop any held-back bytes.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
