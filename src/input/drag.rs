//! Relative motion from successive drag reports.
//!
//! A drag produces a stream of absolute cell positions. [`DragTracker`]
//! turns consecutive samples of one button's drag into `(dx, dy)` deltas
//! and forgets its baseline whenever the stream is interrupted, so a new
//! drag never jumps from a stale position.

use crate::terminal::{MouseButton, MouseEventKind, RawEvent};

/// A relative motion step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DragDelta {
    /// Horizontal component, after gain.
    pub dx: i64,
    /// Vertical component, after gain.
    pub dy: i64,
}

impl DragDelta {
    #[must_use]
    pub fn new(dx: i64, dy: i64) -> Self {
        Self { dx, dy }
    }
}

impl From<DragDelta> for (i64, i64) {
    fn from(d: DragDelta) -> Self {
        (d.dx, d.dy)
    }
}

/// Tracker configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragOptions {
    /// Button whose drags are tracked.
    pub button: MouseButton,
    /// Multiplier for the column difference.
    ///
    /// Negative by default so dragging right turns a right-handed camera
    /// to the left.
    pub horizontal_gain: i64,
    /// Multiplier for the row difference.
    ///
    /// Terminal cells are roughly twice as tall as wide, so rows count
    /// double by default.
    pub vertical_gain: i64,
    /// Clear the baseline when an update carries no events.
    pub reset_on_idle: bool,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            button: MouseButton::Button1,
            horizontal_gain: -1,
            vertical_gain: 2,
            reset_on_idle: true,
        }
    }
}

/// Derives deltas between successive drag samples.
#[derive(Clone, Debug, Default)]
pub struct DragTracker {
    options: DragOptions,
    last: Option<(u32, u32)>,
}

impl DragTracker {
    /// Create a tracker with default options (button 1, gains -1 / 2).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker with explicit options.
    #[must_use]
    pub fn with_options(options: DragOptions) -> Self {
        Self {
            options,
            last: None,
        }
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &DragOptions {
        &self.options
    }

    /// Last drag position, if a drag is in progress.
    #[must_use]
    pub fn state(&self) -> Option<(u32, u32)> {
        self.last
    }

    /// Forget the current baseline.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Feed one poll cycle's events and return the deltas they produce.
    pub fn update(&mut self, events: &[RawEvent]) -> Vec<DragDelta> {
        if events.is_empty() && self.options.reset_on_idle {
            self.last = None;
        }
        events.iter().filter_map(|event| self.observe(event)).collect()
    }

    /// Feed a single event.
    pub fn observe(&mut self, event: &RawEvent) -> Option<DragDelta> {
        if event.kind != MouseEventKind::drag(self.options.button) {
            self.last = None;
            return None;
        }

        // Coordinate differences fit in i64; the gains are caller-chosen,
        // so the scaled values saturate instead of overflowing.
        let current = event.position();
        let delta = self.last.map(|(x0, y0)| {
            DragDelta::new(
                (i64::from(current.0) - i64::from(x0)).saturating_mul(self.options.horizontal_gain),
                (i64::from(current.1) - i64::from(y0)).saturating_mul(self.options.vertical_gain),
            )
        });
        self.last = Some(current);
        delta
    }
}
