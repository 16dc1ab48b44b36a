//! Terminal line discipline control.
//!
//! Mouse capture only needs the terminal to stop echoing and stop
//! buffering lines; everything else (signal keys, output processing) stays
//! as it was, so Ctrl+C still raises SIGINT while capture is active.
//!
//! # Safety
//! This module uses unsafe code for FFI calls to libc termios functions.
//! These are necessary for low-level terminal control and cannot be avoided.

#![allow(unsafe_code)]
#![allow(clippy::borrow_as_ptr)]

use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

/// Snapshot, switch, and restore a terminal's line discipline.
///
/// [`Termios`] is the real implementation. The trait exists so the capture
/// session can be driven against something other than a TTY.
pub trait LineDiscipline {
    /// Opaque copy of the settings in effect before capture.
    type Snapshot;

    /// Read the current settings.
    fn snapshot(&mut self) -> io::Result<Self::Snapshot>;

    /// Switch to capture mode: no echo, no canonical line buffering.
    fn enter_capture(&mut self, prior: &Self::Snapshot) -> io::Result<()>;

    /// Put `prior` back exactly.
    fn restore(&mut self, prior: &Self::Snapshot) -> io::Result<()>;
}

/// Line discipline of a terminal file descriptor, via termios.
#[derive(Debug, Clone, Copy)]
pub struct Termios {
    fd: RawFd,
}

impl Termios {
    /// Control the terminal behind `fd`.
    ///
    /// The descriptor is borrowed, not owned; it must stay open for as long
    /// as this value is used.
    pub fn new<F: AsRawFd + ?Sized>(fd: &F) -> Self {
        Self {
            fd: fd.as_raw_fd(),
        }
    }

    /// Control the terminal behind stdin.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(&io::stdin())
    }
}

impl LineDiscipline for Termios {
    type Snapshot = libc::termios;

    fn snapshot(&mut self) -> io::Result<libc::termios> {
        get_termios(self.fd)
    }

    fn enter_capture(&mut self, prior: &libc::termios) -> io::Result<()> {
        let mut capture = *prior;

        // Local modes: echo off, canonical off
        capture.c_lflag &= !(libc::ECHO | libc::ICANON);

        set_termios(self.fd, &capture)
    }

    fn restore(&mut self, prior: &libc::termios) -> io::Result<()> {
        set_termios(self.fd, prior)
    }
}

/// Check if the given file descriptor is a TTY.
#[must_use]
pub fn is_tty<F: AsRawFd + ?Sized>(fd: &F) -> bool {
    // SAFETY: isatty is safe to call with any fd
    unsafe { libc::isatty(fd.as_raw_fd()) == 1 }
}

/// Get the terminal size as `(columns, rows)`.
///
/// Returns an error if the terminal size cannot be determined or if the
/// returned dimensions are zero.
pub fn terminal_size() -> io::Result<(u16, u16)> {
    let mut size: libc::winsize = unsafe { std::mem::zeroed() };

    // SAFETY: ioctl with TIOCGWINSZ is safe when passed a valid winsize struct
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else if size.ws_col == 0 || size.ws_row == 0 {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "terminal reported zero dimensions",
        ))
    } else {
        Ok((size.ws_col, size.ws_row))
    }
}

/// Get termios attributes.
fn get_termios(fd: RawFd) -> io::Result<libc::termios> {
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };

    // SAFETY: tcgetattr is safe when passed a valid termios struct
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(termios)
    }
}

/// Set termios attributes.
///
/// TCSAFLUSH drops unread input, so mouse reports still queued when capture
/// ends never reach the shell.
fn set_termios(fd: RawFd, termios: &libc::termios) -> io::Result<()> {
    // SAFETY: tcsetattr is safe when passed a valid termios struct
    let result = unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}
