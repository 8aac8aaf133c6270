//! Solar system game: routes host input to the control surface and the
//! interaction layer, ticks the orbit model, and publishes render data.

use glam::{Vec2, Vec3};
use orrery_engine::api::game::GameConfig;
use orrery_engine::input::queue::{InputEvent, InputQueue};
use orrery_engine::{BodyInstance, EngineContext, Game, GameEvent, OrbitCamera, OrbitControls, RenderContext};
#[cfg(feature = "vectors")]
use orrery_engine::VectorColor;

use crate::bodies::{self, BODIES, BODY_COUNT, HOVER_EMISSIVE, HOVER_SCALE, SUN_COLOR, SUN_RADIUS};
use crate::control;
use crate::interaction::{self, DragAction, PointerTracker};
use crate::orbit::{self, orbit_position, render_angle};
use crate::state::{SolarState, Theme};

const CAMERA_EYE: Vec3 = Vec3::new(0.0, 10.0, 25.0);
const CAMERA_FOV_DEG: f32 = 60.0;

const CAMERA_CONTROLS: OrbitControls = OrbitControls {
    enable_pan: true,
    enable_zoom: true,
    enable_rotate: true,
    min_distance: 10.0,
    max_distance: 50.0,
    auto_rotate: true,
    auto_rotate_speed: 0.5,
};

/// Custom event kinds from the React UI.
pub(crate) mod events {
    /// a = body index, b = speed multiplier
    pub const SET_SPEED: u32 = 1;
    pub const TOGGLE_PAUSE: u32 = 2;
    pub const TOGGLE_THEME: u32 = 3;
    pub const RESET_SPEEDS: u32 = 4;
    pub const RESET_VIEW: u32 = 5;
    /// a = width, b = height (CSS pixels)
    pub const RESIZE: u32 = 99;
}

/// Game event kinds to React.
mod game_events {
    /// a = paused (0/1), b = dark theme (0/1), c = hovered index or -1
    pub const SESSION: f32 = 1.0;
    /// a = body index, b = speed multiplier. One per body.
    pub const SPEED: f32 = 2.0;
    /// a = hovered index, b/c = label anchor in canvas pixels
    pub const HOVER_ANCHOR: f32 = 3.0;
    /// a = dark theme (0/1). Only on change.
    pub const THEME_CHANGED: f32 = 4.0;
}

mod keys {
    pub const SHIFT: u32 = 16;
    pub const SPACE: u32 = 32;
}

/// Map a float slot from the UI to a body index. Rejects negatives,
/// fractions and non-finite values instead of letting `as` saturate them.
fn body_index(raw: f32) -> Option<usize> {
    if raw.is_finite() && raw >= 0.0 && raw.fract() == 0.0 {
        Some(raw as usize)
    } else {
        None
    }
}

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

pub struct SolarSystem {
    state: SolarState,
    pointer: PointerTracker,
    /// Theme last reported to the UI.
    reported_theme: Option<Theme>,
    /// Set on the frame that unpauses. That frame's delta spans the paused
    /// gap, so it is not integrated; the next one starts at the resume frame.
    resumed: bool,
    /// The host reports hover from its own hitboxes. Once it does, in-engine
    /// picking stays off so a pick miss cannot clear the host's hover.
    host_hover: bool,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self {
            state: SolarState::new(),
            pointer: PointerTracker::new(),
            reported_theme: None,
            resumed: false,
            host_hover: false,
        }
    }

    pub fn state(&self) -> &SolarState {
        &self.state
    }

    pub fn catalog_json(&self) -> Result<String, serde_json::Error> {
        bodies::catalog_json()
    }

    pub fn session_json(&self) -> Result<String, serde_json::Error> {
        self.state.session.snapshot().to_json()
    }

    fn reset_camera(camera: &mut OrbitCamera) {
        let viewport = camera.viewport();
        *camera = OrbitCamera::looking_at(CAMERA_EYE, Vec3::ZERO, CAMERA_FOV_DEG);
        camera.resize(viewport.x, viewport.y);
        camera.set_controls(CAMERA_CONTROLS);
    }

    fn toggle_pause(&mut self) {
        let paused = control::toggle_pause(&mut self.state.session);
        self.resumed = !paused;
    }

    /// Handle custom events from the React UI.
    fn handle_custom_event(&mut self, ctx: &mut EngineContext, kind: u32, a: f32, b: f32) {
        match kind {
            events::SET_SPEED => {
                let Some(index) = body_index(a) else {
                    log::warn!("set_speed: invalid body index {}", a);
                    return;
                };
                if let Err(err) = control::set_speed(&mut self.state.session, index, b as f64) {
                    log::warn!("set_speed: {}", err);
                }
            }
            events::TOGGLE_PAUSE => self.toggle_pause(),
            events::TOGGLE_THEME => {
                control::toggle_theme(&mut self.state.session);
            }
            events::RESET_SPEEDS => control::reset_speeds(&mut self.state.session),
            events::RESET_VIEW => Self::reset_camera(&mut ctx.camera),
            events::RESIZE => ctx.camera.resize(a, b),
            _ => log::warn!("unknown custom event kind {}", kind),
        }
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, event: &InputEvent) {
        match *event {
            InputEvent::Custom { kind, a, b, .. } => self.handle_custom_event(ctx, kind, a, b),
            InputEvent::PointerDown { x, y } => self.pointer.on_down(Vec2::new(x, y)),
            InputEvent::PointerUp { x, y } => self.pointer.on_up(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => match self.pointer.on_move(Vec2::new(x, y)) {
                Some(DragAction::Orbit(d)) => ctx.camera.orbit(d.x, d.y),
                Some(DragAction::Pan(d)) => ctx.camera.pan(d.x, d.y),
                None if !self.host_hover => {
                    let picked = interaction::pick(&ctx.camera, Vec2::new(x, y), &self.state);
                    self.state.session.hover.apply_pick(picked);
                }
                None => {}
            },
            InputEvent::HoverEnter { target } => {
                self.host_hover = true;
                self.state.session.hover.enter(target as usize);
            }
            InputEvent::HoverLeave { target } => {
                self.host_hover = true;
                self.state.session.hover.leave(target as usize);
            }
            InputEvent::Wheel { delta } => ctx.camera.zoom(delta),
            InputEvent::KeyDown { key_code } => match key_code {
                keys::SPACE => self.toggle_pause(),
                keys::SHIFT => self.pointer.set_pan_modifier(true),
                _ => {}
            },
            InputEvent::KeyUp { key_code } => {
                if key_code == keys::SHIFT {
                    self.pointer.set_pan_modifier(false);
                }
            }
        }
    }

    /// Emit game events to React.
    fn emit_events(&mut self, ctx: &mut EngineContext) {
        let session = &self.state.session;
        let hovered = session.hover.hovered().map_or(-1.0, |i| i as f32);
        ctx.emit_event(GameEvent::new(
            game_events::SESSION,
            flag(session.is_paused()),
            flag(session.theme().is_dark()),
            hovered,
        ));

        for (i, &speed) in session.speeds().iter().enumerate() {
            ctx.emit_event(GameEvent::new(game_events::SPEED, i as f32, speed as f32, 0.0));
        }

        if let Some((index, anchor)) = interaction::label_anchor(&ctx.camera, &self.state) {
            ctx.emit_event(GameEvent::new(game_events::HOVER_ANCHOR, index as f32, anchor.x, anchor.y));
        }

        let theme = session.theme();
        if self.reported_theme != Some(theme) {
            ctx.emit_event(GameEvent::new(game_events::THEME_CHANGED, flag(theme.is_dark()), 0.0, 0.0));
            self.reported_theme = Some(theme);
        }
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_instances: BODY_COUNT + 1,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        Self::reset_camera(&mut ctx.camera);
        self.state.scatter_orbits(&mut ctx.rng);
        ctx.clear_color = self.state.session.theme().clear_color();

        #[cfg(feature = "vectors")]
        {
            ctx.vectors.clear();
            let ring = VectorColor::WHITE.with_alpha(bodies::RING_ALPHA);
            for config in &BODIES {
                ctx.vectors.stroke_ring(Vec2::ZERO, config.distance, bodies::RING_WIDTH, ring);
            }
            log::debug!("orbit rings: {} vertices", ctx.vectors.vertex_count());
        }

        log::info!(
            "solar system ready: {} bodies, orbits scattered, theme {:?}",
            BODY_COUNT,
            self.state.session.theme()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            self.handle_input(ctx, event);
        }

        // The view keeps drifting only while the simulation runs.
        ctx.camera.controls.auto_rotate = !self.state.session.is_paused();

        let dt = if std::mem::take(&mut self.resumed) { 0.0 } else { ctx.dt() as f64 };
        orbit::tick(&mut self.state, dt);
        ctx.clear_color = self.state.session.theme().clear_color();

        self.emit_events(ctx);
    }

    fn render(&self, ctx: &mut RenderContext) {
        let hover = &self.state.session.hover;
        for (i, config, body) in self.state.iter_bodies() {
            let hovered = hover.is_hovered(i);
            let pos = orbit_position(config.distance, body.orbit_angle);
            let [r, g, b] = config.rgb();
            ctx.instances.push(BodyInstance {
                x: pos.x,
                y: pos.y,
                z: pos.z,
                radius: config.render_radius() * if hovered { HOVER_SCALE } else { 1.0 },
                spin: render_angle(body.spin_angle),
                r,
                g,
                b,
                emissive: if hovered { HOVER_EMISSIVE } else { 0.0 },
                highlight: flag(hovered),
                ..Default::default()
            });
        }

        // Sun last, so instance i is body i.
        let [r, g, b] = bodies::hex_to_rgb(SUN_COLOR).unwrap_or([1.0, 0.72, 0.07]);
        ctx.instances.push(BodyInstance {
            radius: SUN_RADIUS,
            spin: render_angle(self.state.sun.spin_angle),
            r,
            g,
            b,
            emissive: 1.0,
            ..Default::default()
        });
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{EARTH, JUPITER, MARS};
    use orrery_engine::InstanceBuffer;
    use orrery_web::GameRunner;

    fn started() -> (SolarSystem, EngineContext) {
        let mut game = SolarSystem::new();
        let mut ctx = EngineContext::new(5);
        ctx.camera.resize(1000.0, 800.0);
        game.init(&mut ctx);
        (game, ctx)
    }

    fn frame(game: &mut SolarSystem, ctx: &mut EngineContext, dt: f32, events: &[InputEvent]) {
        let mut input = InputQueue::new();
        for e in events {
            input.push(*e);
        }
        ctx.clear_frame_data();
        ctx.begin_frame(dt);
        game.update(ctx, &input);
    }

    fn custom(kind: u32, a: f32, b: f32) -> InputEvent {
        InputEvent::Custom { kind, a, b, c: 0.0 }
    }

    fn rendered(game: &SolarSystem, ctx: &EngineContext) -> InstanceBuffer {
        let mut instances = InstanceBuffer::with_capacity(game.config().max_instances);
        game.render(&mut RenderContext { instances: &mut instances, camera: &ctx.camera });
        instances
    }

    #[test]
    fn init_places_camera_and_keeps_viewport() {
        let (_, ctx) = started();
        assert!((ctx.camera.eye() - CAMERA_EYE).length() < 1e-3);
        assert_eq!(ctx.camera.viewport(), Vec2::new(1000.0, 800.0));
        assert_eq!(ctx.camera.controls, CAMERA_CONTROLS);
    }

    #[test]
    fn init_scatters_orbits_deterministically() {
        let (a, _) = started();
        let (b, _) = started();
        assert_eq!(a.state().orbit_angles(), b.state().orbit_angles());
    }

    #[cfg(feature = "vectors")]
    #[test]
    fn init_builds_orbit_rings() {
        let (_, ctx) = started();
        assert!(ctx.vectors.vertex_count() > 0);
    }

    #[test]
    fn speed_event_is_clamped_and_reported() {
        let (mut game, mut ctx) = started();
        frame(&mut game, &mut ctx, 0.016, &[custom(events::SET_SPEED, 2.0, 7.0)]);
        assert_eq!(game.state().session.speed(EARTH), 5.0);

        let earth_speed = ctx
            .events
            .iter()
            .find(|e| e.kind == game_events::SPEED && e.a == EARTH as f32)
            .unwrap();
        assert_eq!(earth_speed.b, 5.0);
    }

    #[test]
    fn bad_speed_events_are_dropped() {
        let (mut game, mut ctx) = started();
        let before = *game.state().session.speeds();
        frame(
            &mut game,
            &mut ctx,
            0.016,
            &[
                custom(events::SET_SPEED, 8.0, 2.0),
                custom(events::SET_SPEED, -1.0, 2.0),
                custom(events::SET_SPEED, 1.5, 2.0),
                custom(events::SET_SPEED, f32::NAN, 2.0),
            ],
        );
        assert_eq!(*game.state().session.speeds(), before);
    }

    #[test]
    fn body_index_validation() {
        assert_eq!(body_index(3.0), Some(3));
        assert_eq!(body_index(0.0), Some(0));
        assert_eq!(body_index(-0.5), None);
        assert_eq!(body_index(2.5), None);
        assert_eq!(body_index(f32::INFINITY), None);
    }

    #[test]
    fn pause_freezes_orbits_and_auto_rotate() {
        let (mut game, mut ctx) = started();
        frame(&mut game, &mut ctx, 0.016, &[InputEvent::KeyDown { key_code: keys::SPACE }]);
        assert!(game.state().session.is_paused());
        assert!(!ctx.camera.controls.auto_rotate);

        let frozen = game.state().orbit_angles();
        frame(&mut game, &mut ctx, 0.1, &[]);
        assert_eq!(game.state().orbit_angles(), frozen);
    }

    #[test]
    fn resume_frame_does_not_integrate_its_delta() {
        let (mut game, mut ctx) = started();
        frame(&mut game, &mut ctx, 0.016, &[custom(events::TOGGLE_PAUSE, 0.0, 0.0)]);
        let frozen = game.state().orbit_angles();

        frame(&mut game, &mut ctx, 0.1, &[custom(events::TOGGLE_PAUSE, 0.0, 0.0)]);
        assert!(!game.state().session.is_paused());
        assert!(ctx.camera.controls.auto_rotate);
        assert_eq!(game.state().orbit_angles(), frozen);

        frame(&mut game, &mut ctx, 0.05, &[]);
        let advanced = game.state().bodies[EARTH].orbit_angle - frozen[EARTH];
        assert!((advanced - 0.005).abs() < 1e-6);
    }

    #[test]
    fn timestamped_resume_measures_from_resume_frame() {
        let mut r = GameRunner::new(SolarSystem::new(), 5);
        r.init();
        r.frame(1000.0);
        let start = r.game().state().bodies[EARTH].orbit_angle;

        r.push_input(custom(events::TOGGLE_PAUSE, 0.0, 0.0));
        r.frame(1016.0);
        // Ten seconds paused, then resume.
        r.push_input(custom(events::TOGGLE_PAUSE, 0.0, 0.0));
        r.frame(11016.0);
        assert_eq!(r.game().state().bodies[EARTH].orbit_angle, start);

        r.frame(11066.0);
        let advanced = r.game().state().bodies[EARTH].orbit_angle - start;
        assert!((advanced - 0.005).abs() < 1e-6, "advanced {}", advanced);
    }

    #[test]
    fn earth_advances_a_tenth_per_second() {
        let (mut game, mut ctx) = started();
        let before = game.state().bodies[EARTH].orbit_angle;
        for _ in 0..10 {
            frame(&mut game, &mut ctx, 0.1, &[]);
        }
        let advanced = game.state().bodies[EARTH].orbit_angle - before;
        assert!((advanced - 0.1).abs() < 1e-6);
    }

    #[test]
    fn host_hover_uses_guarded_leave() {
        let (mut game, mut ctx) = started();
        frame(
            &mut game,
            &mut ctx,
            0.016,
            &[
                InputEvent::HoverEnter { target: MARS as u32 },
                InputEvent::HoverEnter { target: JUPITER as u32 },
                InputEvent::HoverLeave { target: MARS as u32 },
            ],
        );
        assert_eq!(game.state().session.hover.hovered_name(), Some("Jupiter"));

        let session = ctx.events.iter().find(|e| e.kind == game_events::SESSION).unwrap();
        assert_eq!(session.c, JUPITER as f32);
        assert!(ctx.events.iter().any(|e| e.kind == game_events::HOVER_ANCHOR && e.a == JUPITER as f32));
    }

    #[test]
    fn host_hover_turns_off_picking() {
        let (mut game, mut ctx) = started();
        frame(&mut game, &mut ctx, 0.016, &[InputEvent::HoverEnter { target: EARTH as u32 }]);
        // Top-left corner: no body there, so a pick would miss.
        frame(&mut game, &mut ctx, 0.016, &[InputEvent::PointerMove { x: 1.0, y: 1.0 }]);
        assert_eq!(game.state().session.hover.hovered(), Some(EARTH));
    }

    #[test]
    fn picking_drives_hover_without_host_events() {
        let (mut game, mut ctx) = started();
        game.state.session.hover.enter(EARTH);
        frame(&mut game, &mut ctx, 0.0, &[InputEvent::PointerMove { x: 1.0, y: 1.0 }]);
        assert_eq!(game.state().session.hover.hovered(), None);
    }

    #[test]
    fn hovered_body_is_emphasized() {
        let (mut game, mut ctx) = started();
        frame(&mut game, &mut ctx, 0.016, &[InputEvent::HoverEnter { target: EARTH as u32 }]);
        let instances = rendered(&game, &ctx);
        let earth = instances.as_slice()[EARTH];
        assert!((earth.radius - BODIES[EARTH].render_radius() * HOVER_SCALE).abs() < 1e-6);
        assert_eq!(earth.emissive, HOVER_EMISSIVE);
        assert_eq!(earth.highlight, 1.0);
        assert_eq!(instances.as_slice()[MARS].highlight, 0.0);
    }

    #[test]
    fn render_writes_planets_then_sun() {
        let (game, ctx) = started();
        let instances = rendered(&game, &ctx);
        assert_eq!(instances.instance_count() as usize, BODY_COUNT + 1);
        for (i, inst) in instances.as_slice()[..BODY_COUNT].iter().enumerate() {
            assert!((inst.position().length() - BODIES[i].distance).abs() < 1e-3);
        }
        let sun = instances.as_slice()[BODY_COUNT];
        assert_eq!(sun.position(), Vec3::ZERO);
        assert_eq!(sun.radius, SUN_RADIUS);
        assert_eq!(sun.emissive, 1.0);
    }

    #[test]
    fn theme_change_is_reported_once() {
        let (mut game, mut ctx) = started();
        frame(&mut game, &mut ctx, 0.016, &[]);
        assert!(ctx.events.iter().any(|e| e.kind == game_events::THEME_CHANGED && e.a == 1.0));
        frame(&mut game, &mut ctx, 0.016, &[]);
        assert!(!ctx.events.iter().any(|e| e.kind == game_events::THEME_CHANGED));

        frame(&mut game, &mut ctx, 0.016, &[custom(events::TOGGLE_THEME, 0.0, 0.0)]);
        assert!(ctx.events.iter().any(|e| e.kind == game_events::THEME_CHANGED && e.a == 0.0));
        assert_eq!(ctx.clear_color, Theme::Light.clear_color());
    }

    #[test]
    fn events_fit_the_default_budget() {
        let (mut game, mut ctx) = started();
        frame(&mut game, &mut ctx, 0.016, &[InputEvent::HoverEnter { target: 0 }]);
        assert!(ctx.events.len() <= GameConfig::default().max_events);
    }

    #[test]
    fn drag_orbits_and_shift_drag_pans() {
        let (mut game, mut ctx) = started();
        let azimuth = ctx.camera.azimuth;
        frame(
            &mut game,
            &mut ctx,
            0.0,
            &[
                InputEvent::PointerDown { x: 100.0, y: 100.0 },
                InputEvent::PointerMove { x: 180.0, y: 100.0 },
            ],
        );
        assert!(ctx.camera.azimuth < azimuth);

        frame(
            &mut game,
            &mut ctx,
            0.0,
            &[
                InputEvent::KeyDown { key_code: keys::SHIFT },
                InputEvent::PointerMove { x: 260.0, y: 100.0 },
                InputEvent::PointerUp { x: 260.0, y: 100.0 },
            ],
        );
        assert!(ctx.camera.target.length() > 0.1);
    }

    #[test]
    fn reset_view_restores_camera() {
        let (mut game, mut ctx) = started();
        frame(&mut game, &mut ctx, 0.0, &[InputEvent::Wheel { delta: 5.0 }, custom(events::RESIZE, 640.0, 480.0)]);
        frame(&mut game, &mut ctx, 0.0, &[custom(events::RESET_VIEW, 0.0, 0.0)]);
        assert!((ctx.camera.eye() - CAMERA_EYE).length() < 1e-3);
        assert_eq!(ctx.camera.viewport(), Vec2::new(640.0, 480.0));
    }

    #[test]
    fn session_json_names_hovered_body() {
        let (mut game, mut ctx) = started();
        frame(&mut game, &mut ctx, 0.016, &[InputEvent::HoverEnter { target: MARS as u32 }]);
        let json = game.session_json().unwrap();
        assert!(json.contains("\"hovered\":\"Mars\""));
    }
}
