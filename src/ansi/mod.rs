//! ANSI escape sequence generation.

pub mod sequences;

pub use sequences::*;

use std::io::{self, Write};

/// Encode an SGR mouse report: `ESC [ < code ; column ; row M` (or `m` for
/// a release).
#[must_use]
pub fn sgr_mouse_report(code: u32, column: u32, row: u32, release: bool) -> Vec<u8> {
    let terminator = if release { 'm' } else { 'M' };
    format!("\x1b[<{code};{column};{row}{terminator}").into_bytes()
}

/// Write each sequence in order, then flush.
///
/// Stops at the first failing write.
pub fn write_sequences<W: Write + ?Sized>(writer: &mut W, seqs: &[&str]) -> io::Result<()> {
    for seq in seqs {
        writer.write_all(seq.as_bytes())?;
    }
    writer.flush()
}
