//! Non-blocking reads from a terminal input descriptor.
//!
//! Each poll switches the descriptor to `O_NONBLOCK`, drains what is
//! available, and puts the original file status flags back before
//! returning, so other readers of the same descriptor never observe
//! non-blocking mode.
//!
//! # Safety
//! This module uses unsafe code for FFI calls to libc `fcntl` and `read`.

#![allow(unsafe_code)]

use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

use crate::error::Result;
use crate::event::{LogLevel, emit_log};

/// Default cap on the bytes returned by a single poll (64 KiB).
pub const DEFAULT_POLL_LIMIT: usize = 64 * 1024;

const READ_CHUNK: usize = 4096;

/// Holds a descriptor in non-blocking mode until [`restore`] is called.
///
/// If the guard is dropped without `restore` (an error or unwind path), the
/// flags are put back from `Drop` and a failure is logged.
///
/// [`restore`]: NonBlockingGuard::restore
#[derive(Debug)]
struct NonBlockingGuard {
    fd: RawFd,
    original: libc::c_int,
    armed: bool,
}

impl NonBlockingGuard {
    fn new(fd: RawFd) -> io::Result<Self> {
        let original = get_flags(fd)?;
        if original & libc::O_NONBLOCK == 0 {
            set_flags(fd, original | libc::O_NONBLOCK)?;
        }
        Ok(Self {
            fd,
            original,
            armed: true,
        })
    }

    /// Put the original flags back, reporting failure to the caller.
    fn restore(mut self) -> io::Result<()> {
        self.armed = false;
        set_flags(self.fd, self.original)
    }
}

impl Drop for NonBlockingGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = set_flags(self.fd, self.original) {
            emit_log(
                LogLevel::Error,
                &format!("failed to restore flags on fd {}: {e}", self.fd),
            );
        }
    }
}

/// Read whatever bytes `source` has ready, without blocking.
///
/// Returns an empty vector when nothing is available. Reads at most
/// [`DEFAULT_POLL_LIMIT`] bytes.
pub fn poll<F: AsRawFd + ?Sized>(source: &F) -> Result<Vec<u8>> {
    poll_with_limit(source, DEFAULT_POLL_LIMIT)
}

/// Poll standard input.
pub fn poll_stdin() -> Result<Vec<u8>> {
    poll(&io::stdin())
}

/// Like [`poll`], with an explicit cap on the returned byte count.
pub fn poll_with_limit<F: AsRawFd + ?Sized>(source: &F, limit: usize) -> Result<Vec<u8>> {
    let fd = source.as_raw_fd();
    let guard = NonBlockingGuard::new(fd)?;

    let mut out = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];
    while out.len() < limit {
        let want = READ_CHUNK.min(limit - out.len());
        match read_fd(fd, &mut chunk[..want]) {
            Ok(0) => break,
            Ok(n) => out.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    guard.restore()?;
    Ok(out)
}

/// Check whether the descriptor is currently in non-blocking mode.
pub fn is_nonblocking<F: AsRawFd + ?Sized>(source: &F) -> io::Result<bool> {
    Ok(get_flags(source.as_raw_fd())? & libc::O_NONBLOCK != 0)
}

fn get_flags(fd: RawFd) -> io::Result<libc::c_int> {
    // SAFETY: F_GETFL takes no argument and only inspects the descriptor
    let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
    if flags == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(flags)
    }
}

fn set_flags(fd: RawFd, flags: libc::c_int) -> io::Result<()> {
    // SAFETY: F_SETFL with an int argument is safe on any descriptor
    let result = unsafe { libc::fcntl(fd, libc::F_SETFL, flags) };
    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

fn read_fd(fd: RawFd, buf: &mut [u8]) -> io::Result<usize> {
    // SAFETY: buf is a valid, writable region of buf.len() bytes
    let n = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) };
    if n < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(n as usize)
    }
}
