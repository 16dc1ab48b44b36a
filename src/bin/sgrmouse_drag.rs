//! `sgrmouse-drag` — drag-to-orbit demonstration
//!
//! Captures the mouse on the current terminal and turns button-1 drags into
//! azimuth/elevation steps, the way an orbit camera would consume them. The
//! running totals are printed on one status line instead of rendering.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin sgrmouse-drag
//! cargo run --bin sgrmouse-drag -- --fps 60 --no-reset
//! cargo run --bin sgrmouse-drag -- --help
//! ```
//!
//! Press q or Ctrl+C to quit. The terminal is restored either way.

use sgrmouse::input;
use sgrmouse::terminal::MouseModes;
use sgrmouse::{CaptureOptions, DragTracker, MouseCapture, RawEvent, SgrDecoder, is_tty};
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

// ============================================================================
// CLI Parsing
// ============================================================================

const HELP_TEXT: &str = "sgrmouse-drag - turn mouse drags into orbit deltas

USAGE:
    sgrmouse-drag [OPTIONS]

OPTIONS:
    -h, --help              Print this help message and exit
    --fps <N>               Poll cycles per second (default: 30)
    --max-frames <N>        Exit after N poll cycles
    --no-reset              Skip the full terminal reset on exit
    --vt200                 Also enable VT200 mouse tracking (mode 1000)
    --carry-over            Join reports split across reads

Press q or Ctrl+C to quit.
";

/// Application configuration parsed from command-line arguments.
#[derive(Clone, Debug)]
pub struct Config {
    pub fps: u32,
    pub max_frames: Option<u64>,
    pub full_reset: bool,
    pub vt200: bool,
    pub carry_over: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 30,
            max_frames: None,
            full_reset: true,
            vt200: false,
            carry_over: false,
        }
    }
}

/// Result of CLI parsing.
pub enum ParseResult {
    /// Successfully parsed configuration.
    Config(Config),
    /// User requested help.
    Help,
    /// Parse error with message.
    Error(String),
}

impl Config {
    /// Parse configuration from command-line arguments.
    pub fn from_args<I>(args: I) -> ParseResult
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        // Skip program name
        args.next();

        while let Some(arg) = args.next() {
            let arg_str = arg.to_string_lossy();

            match arg_str.as_ref() {
                "-h" | "--help" => return ParseResult::Help,

                "--fps" => {
                    let value = match args.next() {
                        Some(v) => v.to_string_lossy().to_string(),
                        None => return ParseResult::Error("--fps requires a value".to_string()),
                    };
                    match value.parse::<u32>() {
                        Ok(n) if n > 0 => config.fps = n,
                        _ => {
                            return ParseResult::Error(format!(
                                "Invalid --fps value: {value} (must be positive integer)"
                            ));
                        }
                    }
                }

                "--max-frames" => {
                    let value = match args.next() {
                        Some(v) => v.to_string_lossy().to_string(),
                        None => {
                            return ParseResult::Error("--max-frames requires a value".to_string());
                        }
                    };
                    match value.parse::<u64>() {
                        Ok(n) => config.max_frames = Some(n),
                        Err(_) => {
                            return ParseResult::Error(format!(
                                "Invalid --max-frames value: {value}"
                            ));
                        }
                    }
                }

                "--no-reset" => config.full_reset = false,
                "--vt200" => config.vt200 = true,
                "--carry-over" => config.carry_over = true,

                other => return ParseResult::Error(format!("Unknown option: {other}")),
            }
        }

        ParseResult::Config(config)
    }

    fn capture_options(&self) -> CaptureOptions {
        let mut modes = MouseModes::default();
        if self.vt200 {
            modes |= MouseModes::VT200;
        }
        CaptureOptions {
            modes,
            full_reset: self.full_reset,
        }
    }

    fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}

fn main() -> io::Result<()> {
    match Config::from_args(std::env::args_os()) {
        ParseResult::Config(config) => run(&config),
        ParseResult::Help => {
            print!("{HELP_TEXT}");
            Ok(())
        }
        ParseResult::Error(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Run with --help for usage information.");
            std::process::exit(1);
        }
    }
}

// ============================================================================
// Poll Loop
// ============================================================================

/// Accumulated orbit angles, in cell units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Orbit {
    azimuth: i64,
    elevation: i64,
}

fn run(config: &Config) -> io::Result<()> {
    if !is_tty(&io::stdin()) || !is_tty(&io::stdout()) {
        eprintln!("Error: sgrmouse-drag needs an interactive terminal");
        std::process::exit(1);
    }

    let interrupted = install_interrupt_flag()?;

    let mut session = MouseCapture::enter_stdio(config.capture_options())?;
    let mut decoder = SgrDecoder::new();
    let mut tracker = DragTracker::new();
    let mut orbit = Orbit::default();
    let mut frames: u64 = 0;

    write_status(session.writer_mut(), orbit, None)?;

    while !interrupted.load(Ordering::SeqCst) {
        if config.max_frames.is_some_and(|max| frames >= max) {
            break;
        }
        frames += 1;

        let bytes = input::poll_stdin()?;
        if bytes.contains(&b'q') {
            break;
        }

        let events = decode(config, &mut decoder, &bytes);

        for delta in tracker.update(&events) {
            orbit.azimuth += delta.dx;
            orbit.elevation += delta.dy;
        }
        if !events.is_empty() {
            write_status(session.writer_mut(), orbit, events.last())?;
        }

        std::thread::sleep(config.frame_interval());
    }

    session.exit()?;
    println!(
        "azimuth {} elevation {}",
        orbit.azimuth, orbit.elevation
    );
    Ok(())
}

/// Decode one frame of input. The window can grow while the demo runs, so
/// coordinates are only held to the parser's global bound.
fn decode(config: &Config, decoder: &mut SgrDecoder, bytes: &[u8]) -> Vec<RawEvent> {
    if config.carry_over {
        decoder.feed(bytes)
    } else {
        input::parse_events(bytes).collect()
    }
}

fn write_status<W: Write>(out: &mut W, orbit: Orbit, last: Option<&RawEvent>) -> io::Result<()> {
    write!(
        out,
        "\r\x1b[2Kazimuth {:>6}  elevation {:>6}",
        orbit.azimuth, orbit.elevation
    )?;
    if let Some(event) = last {
        write!(
            out,
            "  last {:?} at {},{}",
            event.kind, event.column, event.row
        )?;
    }
    out.flush()
}

// ============================================================================
// Interrupt Handling
// ============================================================================

/// Route SIGINT and SIGTERM to a flag so the loop exits normally and the
/// capture session is released before the process ends.
fn install_interrupt_flag() -> io::Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&flag))?;
    }
    Ok(flag)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sgrmouse::MouseEventKind;

    fn args(strs: &[&str]) -> Vec<OsString> {
        strs.iter().map(|s| OsString::from(*s)).collect()
    }

    fn parse_config(strs: &[&str]) -> Config {
        match Config::from_args(args(strs)) {
            ParseResult::Config(c) => c,
            _ => panic!("Expected Config"),
        }
    }

    #[test]
    fn test_default_config() {
        let config = parse_config(&["sgrmouse-drag"]);
        assert_eq!(config.fps, 30);
        assert!(config.full_reset);
        assert!(!config.vt200);
        assert!(!config.carry_over);
        assert_eq!(config.max_frames, None);
        assert_eq!(config.capture_options(), CaptureOptions::default());
    }

    #[test]
    fn test_help_flag() {
        let result = Config::from_args(args(&["sgrmouse-drag", "--help"]));
        assert!(matches!(result, ParseResult::Help));
    }

    #[test]
    fn test_fps_flag() {
        let config = parse_config(&["sgrmouse-drag", "--fps", "60"]);
        assert_eq!(config.fps, 60);
        assert_eq!(config.frame_interval(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn test_fps_zero_rejected() {
        let result = Config::from_args(args(&["sgrmouse-drag", "--fps", "0"]));
        assert!(matches!(result, ParseResult::Error(_)));
    }

    #[test]
    fn test_missing_value() {
        let result = Config::from_args(args(&["sgrmouse-drag", "--max-frames"]));
        assert!(matches!(result, ParseResult::Error(msg) if msg.contains("requires a value")));
    }

    #[test]
    fn test_mode_flags() {
        let config = parse_config(&["sgrmouse-drag", "--vt200", "--no-reset", "--carry-over"]);
        let options = config.capture_options();
        assert!(options.modes.contains(MouseModes::VT200 | MouseModes::SGR_EXT));
        assert!(!options.full_reset);
        assert!(config.carry_over);
    }

    #[test]
    fn test_unknown_option() {
        let result = Config::from_args(args(&["sgrmouse-drag", "--bogus"]));
        assert!(matches!(result, ParseResult::Error(msg) if msg.contains("--bogus")));
    }

    #[test]
    fn test_decode_accepts_reports_past_startup_size() {
        // A report far beyond any initial window must survive a resize.
        let report = RawEvent::drag(500, 300).to_sgr();
        for carry_over in [false, true] {
            let mut config = parse_config(&["sgrmouse-drag"]);
            config.carry_over = carry_over;
            let mut decoder = SgrDecoder::new();
            assert_eq!(
                decode(&config, &mut decoder, &report),
                vec![RawEvent::drag(500, 300)]
            );
        }
    }

    #[test]
    fn test_decode_carry_over_joins_split_report() {
        let config = parse_config(&["sgrmouse-drag", "--carry-over"]);
        let mut decoder = SgrDecoder::new();
        assert!(decode(&config, &mut decoder, b"\x1b[<32;4").is_empty());
        assert_eq!(
            decode(&config, &mut decoder, b"0;2M"),
            vec![RawEvent::drag(40, 2)]
        );
    }

    #[test]
    fn test_interrupt_flag_starts_clear() {
        let flag = install_interrupt_flag().unwrap();
        assert!(!flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_status_line() {
        let mut out = Vec::new();
        let orbit = Orbit {
            azimuth: -5,
            elevation: 4,
        };
        let last = RawEvent::new(MouseEventKind::Button1Drag, 15, 8);
        write_status(&mut out, orbit, Some(&last)).unwrap();

        let s = String::from_utf8(out).unwrap();
        assert!(s.starts_with("\r\x1b[2K"));
        assert!(s.contains("azimuth     -5"));
        assert!(s.contains("Button1Drag at 15,8"));
    }
}
