//! Input side: reading terminal bytes and turning them into mouse events.
//!
//! [`reader`] drains the descriptor without blocking, [`parser`] finds SGR
//! mouse reports in the bytes, and [`drag`] turns drag reports into relative
//! motion.

pub mod drag;
pub mod parser;
pub mod reader;

pub use drag::{DragDelta, DragOptions, DragTracker};
pub use parser::{
    MAX_CARRY, MAX_COORDINATE, Match, SgrDecoder, SgrEvents, match_at, parse_events,
    parse_events_bounded,
};
pub use reader::{DEFAULT_POLL_LIMIT, poll, poll_stdin, poll_with_limit};

// Re-export mouse types from terminal module (they're re-exported there)
pub use crate::terminal::{MouseButton, MouseEventKind, RawEvent};
