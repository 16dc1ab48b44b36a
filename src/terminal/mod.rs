//! Terminal mouse capture.
//!
//! [`MouseCapture`] is a scoped session: entering it snapshots the line
//! discipline, turns off echo and canonical mode, and enables SGR any-event
//! mouse reporting. Leaving it, either through [`MouseCapture::exit`] or by
//! dropping it during a panic or early return, disables reporting and then
//! restores the snapshot, exactly once.
//!
//! Only one session may exist per process.

mod mouse;
mod raw;

pub use mouse::{MouseButton, MouseEventKind, RawEvent};
pub use raw::{LineDiscipline, Termios, is_tty, terminal_size};

use crate::ansi::{self, sequences};
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_event, emit_log};
use bitflags::bitflags;
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

bitflags! {
    /// Mouse reporting modes to enable for a session.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MouseModes: u8 {
        /// VT200 press/release tracking (mode 1000).
        const VT200 = 0b0000_0001;
        /// Any-event tracking, including motion without a button (mode 1003).
        const ANY_EVENT = 0b0000_0010;
        /// SGR extended coordinates (mode 1006).
        const SGR_EXT = 0b0000_0100;
    }
}

impl Default for MouseModes {
    fn default() -> Self {
        Self::ANY_EVENT | Self::SGR_EXT
    }
}

impl MouseModes {
    /// Enable sequences, in the order they are written.
    #[must_use]
    pub fn enable_sequences(self) -> Vec<&'static str> {
        let mut seqs = Vec::with_capacity(3);
        if self.contains(Self::VT200) {
            seqs.push(sequences::MOUSE_VT200_ON);
        }
        if self.contains(Self::ANY_EVENT) {
            seqs.push(sequences::MOUSE_ANY_EVENT_ON);
        }
        if self.contains(Self::SGR_EXT) {
            seqs.push(sequences::MOUSE_SGR_EXT_ON);
        }
        seqs
    }

    /// Disable sequences, in reverse order of enabling.
    ///
    /// Tracking is always switched off with mode 1000 as well, whatever was
    /// enabled.
    #[must_use]
    pub fn disable_sequences(self) -> Vec<&'static str> {
        let mut seqs = Vec::with_capacity(3);
        if self.contains(Self::SGR_EXT) {
            seqs.push(sequences::MOUSE_SGR_EXT_OFF);
        }
        if self.contains(Self::ANY_EVENT) {
            seqs.push(sequences::MOUSE_ANY_EVENT_OFF);
        }
        seqs.push(sequences::MOUSE_VT200_OFF);
        seqs
    }
}

/// Options for a capture session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Reporting modes to enable.
    pub modes: MouseModes,
    /// Send a full terminal reset (`ESC c`) when the session ends.
    pub full_reset: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            modes: MouseModes::default(),
            full_reset: true,
        }
    }
}

static SESSION_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Check whether a capture session is currently active in this process.
#[must_use]
pub fn is_active() -> bool {
    SESSION_ACTIVE.load(Ordering::SeqCst)
}

/// Claim on the process-wide session slot; freed on drop.
struct SessionSlot(());

impl SessionSlot {
    fn claim() -> Result<Self> {
        SESSION_ACTIVE
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| Self(()))
            .map_err(|_| Error::CaptureActive)
    }
}

impl Drop for SessionSlot {
    fn drop(&mut self) {
        SESSION_ACTIVE.store(false, Ordering::SeqCst);
    }
}

/// An active mouse capture session.
pub struct MouseCapture<W: Write, D: LineDiscipline> {
    writer: W,
    discipline: D,
    prior: D::Snapshot,
    options: CaptureOptions,
    released: bool,
    _slot: SessionSlot,
}

impl MouseCapture<io::Stdout, Termios> {
    /// Capture the mouse on the process's own terminal (stdin/stdout).
    pub fn enter_stdio(options: CaptureOptions) -> Result<Self> {
        Self::enter(io::stdout(), Termios::stdin(), options)
    }
}

impl<W: Write, D: LineDiscipline> MouseCapture<W, D> {
    /// Enter capture mode.
    ///
    /// Either both the line discipline change and the mouse enable
    /// sequences are applied, or neither is:
    /// - a failed snapshot or mode switch returns [`Error::Configuration`]
    ///   with nothing changed;
    /// - a failed write returns [`Error::Io`] after the line discipline has
    ///   been put back.
    ///
    /// Fails with [`Error::CaptureActive`] if another session exists.
    pub fn enter(mut writer: W, mut discipline: D, options: CaptureOptions) -> Result<Self> {
        let slot = SessionSlot::claim()?;

        let prior = discipline.snapshot().map_err(Error::Configuration)?;
        discipline
            .enter_capture(&prior)
            .map_err(Error::Configuration)?;

        if let Err(e) = ansi::write_sequences(&mut writer, &options.modes.enable_sequences()) {
            if let Err(restore) = discipline.restore(&prior) {
                emit_log(
                    LogLevel::Error,
                    &format!("failed to restore terminal after aborted mouse capture: {restore}"),
                );
            }
            return Err(Error::Io(e));
        }

        emit_event("mouse_capture", "entered");
        Ok(Self {
            writer,
            discipline,
            prior,
            options,
            released: false,
            _slot: slot,
        })
    }

    /// Run `f` inside a session and always release it afterwards.
    ///
    /// If `f` fails, its error is returned and any release failure is only
    /// logged. If `f` succeeds, a release failure is returned.
    pub fn scope<R, F>(writer: W, discipline: D, options: CaptureOptions, f: F) -> Result<R>
    where
        F: FnOnce(&mut Self) -> Result<R>,
    {
        let mut session = Self::enter(writer, discipline, options)?;
        match f(&mut session) {
            Ok(value) => session.exit().map(|()| value),
            Err(e) => {
                if let Err(release) = session.release() {
                    emit_log(
                        LogLevel::Error,
                        &format!("failed to release mouse capture: {release}"),
                    );
                }
                Err(e)
            }
        }
    }

    /// Session options.
    #[must_use]
    pub fn options(&self) -> &CaptureOptions {
        &self.options
    }

    /// Output stream used by the session, for callers that draw through it.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// End the session, reporting the first failure.
    ///
    /// Every release step is attempted even if an earlier one fails.
    pub fn exit(mut self) -> Result<()> {
        self.release()
    }

    /// Disable reporting, optionally reset, then restore the line discipline.
    ///
    /// Reporting goes off first so the flushing restore discards any report
    /// the terminal sent in between. Both steps run even if one fails; the
    /// first failure is returned. Runs at most once per session.
    fn release(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        let mut seqs = self.options.modes.disable_sequences();
        if self.options.full_reset {
            seqs.push(sequences::FULL_RESET);
        }
        let written = ansi::write_sequences(&mut self.writer, &seqs).map_err(Error::Io);

        let restored = self
            .discipline
            .restore(&self.prior)
            .map_err(Error::Configuration);

        emit_event("mouse_capture", "released");
        written.and(restored)
    }
}

impl<W: Write, D: LineDiscipline> Drop for MouseCapture<W, D> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            emit_log(
                LogLevel::Error,
                &format!("failed to release mouse capture: {e}"),
            );
        }
    }
}

impl<W: Write, D: LineDiscipline> fmt::Debug for MouseCapture<W, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MouseCapture")
            .field("options", &self.options)
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}
