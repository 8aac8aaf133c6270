//! Simulation and session state. One instance per page session; nothing persists.

use orrery_engine::Rng;
use serde::Serialize;

use crate::bodies::{CelestialBodyConfig, BODIES, BODY_COUNT};
use crate::interaction::HoverState;

/// Initial speed multiplier of every body.
pub const DEFAULT_SPEED: f64 = 1.0;
/// Speed multiplier limits, inclusive.
pub const MIN_SPEED: f64 = 0.0;
pub const MAX_SPEED: f64 = 5.0;

/// Presentation theme. Has no effect on the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Canvas clear color (sRGB): black, or a pale blue for light mode.
    pub fn clear_color(self) -> [f32; 3] {
        match self {
            Theme::Dark => [0.0, 0.0, 0.0],
            Theme::Light => [239.0 / 255.0, 246.0 / 255.0, 1.0],
        }
    }
}

/// Per-body accumulators. Free running: never wrapped, only fed to periodic
/// functions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyState {
    /// Rotation of the body's pivot around the sun, radians.
    pub orbit_angle: f64,
    /// Rotation of the body about its own axis, radians.
    pub spin_angle: f64,
}

/// User-controlled parameters, read by the tick and the renderer every frame.
/// Mutated only through `control` and `interaction`.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub(crate) speed_multipliers: [f64; BODY_COUNT],
    pub(crate) paused: bool,
    pub(crate) theme: Theme,
    pub hover: HoverState,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            speed_multipliers: [DEFAULT_SPEED; BODY_COUNT],
            paused: false,
            theme: Theme::Dark,
            hover: HoverState::new(),
        }
    }

    /// Speed multiplier of body `index`. Panics on an index outside the catalog.
    pub fn speed(&self, index: usize) -> f64 {
        self.speed_multipliers[index]
    }

    pub fn speeds(&self) -> &[f64; BODY_COUNT] {
        &self.speed_multipliers
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            speeds: self.speed_multipliers,
            paused: self.paused,
            theme: self.theme,
            hovered: self.hover.hovered_name(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of the session for the UI panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub speeds: [f64; BODY_COUNT],
    pub paused: bool,
    pub theme: Theme,
    pub hovered: Option<&'static str>,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Everything the frame tick reads and writes.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarState {
    pub session: SessionState,
    /// Index-aligned with `bodies::BODIES`.
    pub bodies: [BodyState; BODY_COUNT],
    /// Only `spin_angle` is used; the sun sits at the origin.
    pub sun: BodyState,
}

impl SolarState {
    /// All angles start at zero.
    pub fn new() -> Self {
        Self {
            session: SessionState::new(),
            bodies: [BodyState::default(); BODY_COUNT],
            sun: BodyState::default(),
        }
    }

    /// Start from explicit orbit angles.
    pub fn with_orbit_angles(angles: [f64; BODY_COUNT]) -> Self {
        let mut state = Self::new();
        for (body, angle) in state.bodies.iter_mut().zip(angles) {
            body.orbit_angle = angle;
        }
        state
    }

    /// Give every body a pseudo-random starting orbit angle in [0, 2π),
    /// so the planets don't start lined up.
    pub fn scatter_orbits(&mut self, rng: &mut Rng) {
        for body in self.bodies.iter_mut() {
            body.orbit_angle = rng.next_angle();
        }
    }

    /// Orbit angles, index-aligned with the catalog.
    pub fn orbit_angles(&self) -> [f64; BODY_COUNT] {
        let mut out = [0.0; BODY_COUNT];
        for (o, b) in out.iter_mut().zip(&self.bodies) {
            *o = b.orbit_angle;
        }
        out
    }

    /// Config and state pairs, in catalog order.
    pub fn iter_bodies(&self) -> impl Iterator<Item = (usize, &'static CelestialBodyConfig, &BodyState)> {
        BODIES.iter().zip(self.bodies.iter()).enumerate().map(|(i, (c, s))| (i, c, s))
    }
}

impl Default for SolarState {
    fn default() -> Self {
        Self::new()
    }
}
