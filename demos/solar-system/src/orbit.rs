//! Circular-orbit kinematics. Pure math, no engine state.
//!
//! Angles accumulate in f64 and are reduced modulo 2π only when converted
//! to f32 for rendering.

use glam::{Quat, Vec3};
use std::f64::consts::TAU;

use crate::bodies::{BODIES, SUN_SPIN_RATE};
use crate::state::SolarState;

/// Fixed visual scale between base speed and radians per second.
pub const ORBIT_SCALE: f64 = 0.1;
/// Self-rotation of every planet, radians per second.
pub const SPIN_RATE: f64 = 2.0;

/// Advance every angle by `dt` seconds.
///
/// While paused nothing moves, the sun included. Deltas that are not
/// finite and positive are ignored.
pub fn tick(state: &mut SolarState, dt: f64) {
    if state.session.is_paused() || !dt.is_finite() || dt <= 0.0 {
        return;
    }

    for (i, (body, config)) in state.bodies.iter_mut().zip(BODIES.iter()).enumerate() {
        body.orbit_angle += dt * config.base_speed * state.session.speed(i) * ORBIT_SCALE;
        body.spin_angle += dt * SPIN_RATE;
    }
    state.sun.spin_angle += dt * SUN_SPIN_RATE;
}

/// Reduce a free-running angle to [0, 2π) as f32.
pub fn render_angle(angle: f64) -> f32 {
    angle.rem_euclid(TAU) as f32
}

/// World position of a body: the point `(distance, 0, 0)` rotated about +Y
/// by the orbit angle.
pub fn orbit_position(distance: f32, orbit_angle: f64) -> Vec3 {
    Quat::from_rotation_y(render_angle(orbit_angle)) * Vec3::new(distance, 0.0, 0.0)
}
