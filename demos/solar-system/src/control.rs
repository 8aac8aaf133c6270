//! Control surface: the only writers of speed, pause and theme.

use thiserror::Error;

use crate::bodies::{BODIES, BODY_COUNT};
use crate::state::{SessionState, Theme, DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    #[error("body index {index} out of range (catalog has {count} bodies)")]
    BodyIndexOutOfRange { index: usize, count: usize },
}

/// Clamp into [MIN_SPEED, MAX_SPEED]. NaN becomes MIN_SPEED.
pub fn clamp_speed(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_SPEED;
    }
    value.clamp(MIN_SPEED, MAX_SPEED)
}

/// Store a clamped speed multiplier for body `index`. Returns the stored value.
pub fn set_speed(session: &mut SessionState, index: usize, value: f64) -> Result<f64, ControlError> {
    let slot = session
        .speed_multipliers
        .get_mut(index)
        .ok_or(ControlError::BodyIndexOutOfRange { index, count: BODY_COUNT })?;
    let stored = clamp_speed(value);
    *slot = stored;
    log::debug!("speed[{}] ({}) = {}", index, BODIES[index].name, stored);
    Ok(stored)
}

/// Flip the pause flag. Returns the new value.
///
/// The caller owns the clock: on a `false` result (resumed) it must make the
/// next delta start at the resume instant.
pub fn toggle_pause(session: &mut SessionState) -> bool {
    session.paused = !session.paused;
    log::debug!("paused = {}", session.paused);
    session.paused
}

pub fn toggle_theme(session: &mut SessionState) -> Theme {
    session.theme = session.theme.toggled();
    log::debug!("theme = {:?}", session.theme);
    session.theme
}

/// Every multiplier back to the default.
pub fn reset_speeds(session: &mut SessionState) {
    session.speed_multipliers = [DEFAULT_SPEED; BODY_COUNT];
    log::debug!("speeds reset");
}
