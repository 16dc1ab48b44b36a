//! `sgrmouse` - SGR mouse reporting for raw terminals
//!
//! Decodes xterm SGR extended mouse reports (`ESC [ < b ; x ; y M/m`) out of
//! a noisy terminal input stream and manages the terminal modes needed to
//! receive them, with guaranteed restoration when the capture session ends.
//!
//! ```no_run
//! use sgrmouse::{CaptureOptions, DragTracker, MouseCapture, input};
//!
//! # fn main() -> sgrmouse::Result<()> {
//! let session = MouseCapture::enter_stdio(CaptureOptions::default())?;
//! let mut tracker = DragTracker::new();
//! let bytes = input::poll_stdin()?;
//! let events: Vec<_> = input::parse_events(&bytes).collect();
//! for delta in tracker.update(&events) {
//!     println!("{delta:?}");
//! }
//! session.exit()
//! # }
//! ```

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios/fcntl FFI)
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // read(2) counts are non-negative once checked
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow MouseEventKind etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests

#[cfg(not(unix))]
compile_error!("sgrmouse requires a Unix terminal (termios and fcntl)");

pub mod ansi;
pub mod error;
pub mod event;
pub mod input;
pub mod terminal;

pub use error::{Error, Result};
pub use event::{
    LogLevel, clear_event_callback, clear_log_callback, emit_event, emit_log, set_event_callback,
    set_log_callback,
};

// Re-export input types
pub use input::{DragDelta, DragOptions, DragTracker, SgrDecoder, parse_events};

// Re-export terminal types
pub use terminal::{
    CaptureOptions, LineDiscipline, MouseButton, MouseCapture, MouseEventKind, MouseModes,
    RawEvent, Termios, is_tty, terminal_size,
};
