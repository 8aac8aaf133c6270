/// Default upper bound for a single frame delta, in seconds.
/// A tab that was hidden for minutes resumes with one short step instead of a jump.
pub const DEFAULT_MAX_FRAME_DT: f32 = 0.1;

/// Variable-step frame clock.
/// Turns host frame callbacks into sane, non-negative deltas.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Largest delta ever handed to the game.
    max_dt: f32,
    /// Timestamp (seconds) of the previous `advance_to` call.
    last: Option<f64>,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt: max_dt.max(0.0),
            last: None,
        }
    }

    /// Clamp a host-measured delta into `[0, max_dt]`. NaN becomes zero.
    pub fn clamp(&self, frame_dt: f32) -> f32 {
        if frame_dt.is_nan() || frame_dt <= 0.0 {
            0.0
        } else {
            frame_dt.min(self.max_dt)
        }
    }

    /// Advance to an absolute timestamp in seconds.
    /// Returns the clamped delta since the previous timestamp, or 0 on the first call.
    pub fn advance_to(&mut self, now: f64) -> f32 {
        let raw = match self.last {
            Some(prev) => (now - prev) as f32,
            None => 0.0,
        };
        self.last = Some(now);
        self.clamp(raw)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_DT)
    }
}
