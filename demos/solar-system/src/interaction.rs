//! Hover tracking, pointer picking and drag handling.
//!
//! Hover changes come either from the host (DOM hitboxes reporting enter and
//! leave per body) or from in-engine picking, one source per session. Both
//! paths go through `HoverState`, so the guarded-leave rule holds for either.

use glam::Vec2;
use orrery_engine::OrbitCamera;

use crate::bodies::{BODIES, BODY_COUNT, HOVER_SCALE, SUN_RADIUS};
use crate::orbit::orbit_position;
use crate::state::SolarState;

/// Single hover slot. Holds at most one valid catalog index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    hovered: Option<usize>,
}

impl HoverState {
    pub fn new() -> Self {
        Self { hovered: None }
    }

    /// Pointer entered body `index`. Replaces any previous hover.
    /// Returns whether the slot changed.
    pub fn enter(&mut self, index: usize) -> bool {
        if index >= BODY_COUNT {
            log::warn!("hover enter for unknown body {}", index);
            return false;
        }
        let changed = self.hovered != Some(index);
        self.hovered = Some(index);
        changed
    }

    /// Pointer left body `index`. Only clears the slot when `index` is the
    /// body currently hovered, so a late leave from the previous body after
    /// an enter on the next one is a no-op.
    pub fn leave(&mut self, index: usize) -> bool {
        if self.hovered == Some(index) {
            self.hovered = None;
            true
        } else {
            false
        }
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn hovered_name(&self) -> Option<&'static str> {
        self.hovered.map(|i| BODIES[i].name)
    }

    /// Whether body `index` is drawn with hover emphasis.
    pub fn is_hovered(&self, index: usize) -> bool {
        self.hovered == Some(index)
    }

    /// Turn a pick result into enter/leave calls. Returns whether the slot
    /// changed.
    pub fn apply_pick(&mut self, picked: Option<usize>) -> bool {
        match (picked, self.hovered) {
            (Some(index), _) => self.enter(index),
            (None, Some(current)) => self.leave(current),
            (None, None) => false,
        }
    }
}

/// Hit-test radius of body `index`: the rendered radius, enlarged while
/// hovered so the emphasis does not flicker at the silhouette.
fn hit_radius(state: &SolarState, index: usize) -> f32 {
    let base = BODIES[index].render_radius();
    if state.session.hover.is_hovered(index) {
        base * HOVER_SCALE
    } else {
        base
    }
}

/// Nearest body under a canvas pixel. The sun occludes planets behind it.
pub fn pick(camera: &OrbitCamera, screen: Vec2, state: &SolarState) -> Option<usize> {
    let ray = camera.screen_ray(screen);
    let sun_t = ray.intersect_sphere(glam::Vec3::ZERO, SUN_RADIUS);

    let mut best: Option<(usize, f32)> = None;
    for (i, config, body) in state.iter_bodies() {
        let center = orbit_position(config.distance, body.orbit_angle);
        if let Some(t) = ray.intersect_sphere(center, hit_radius(state, i)) {
            if best.map_or(true, |(_, best_t)| t < best_t) {
                best = Some((i, t));
            }
        }
    }

    match (best, sun_t) {
        (Some((_, t)), Some(sun)) if sun < t => None,
        (hit, _) => hit.map(|(i, _)| i),
    }
}

/// Screen position for the hovered body's label, if a body is hovered and
/// in front of the camera.
pub fn label_anchor(camera: &OrbitCamera, state: &SolarState) -> Option<(usize, Vec2)> {
    let index = state.session.hover.hovered()?;
    let config = &BODIES[index];
    let center = orbit_position(config.distance, state.bodies[index].orbit_angle);
    // Anchor just above the body's top edge.
    let top = center + glam::Vec3::Y * hit_radius(state, index);
    camera.project(top).map(|p| (index, p))
}

/// What a pointer move should do to the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragAction {
    Orbit(Vec2),
    Pan(Vec2),
}

/// Pointer button and modifier tracking for camera drags.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    down: bool,
    last: Vec2,
    pan_modifier: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_down(&mut self, pos: Vec2) {
        self.down = true;
        self.last = pos;
    }

    pub fn on_up(&mut self, pos: Vec2) {
        self.down = false;
        self.last = pos;
    }

    /// Returns the camera drag for this move, or None when the button is up
    /// and the move only matters for hover.
    pub fn on_move(&mut self, pos: Vec2) -> Option<DragAction> {
        let delta = pos - self.last;
        self.last = pos;
        if !self.down {
            return None;
        }
        Some(if self.pan_modifier {
            DragAction::Pan(delta)
        } else {
            DragAction::Orbit(delta)
        })
    }

    pub fn set_pan_modifier(&mut self, held: bool) {
        self.pan_modifier = held;
    }
}
