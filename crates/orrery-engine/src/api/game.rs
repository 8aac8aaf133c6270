use crate::api::types::GameEvent;
use crate::core::rng::Rng;
use crate::core::time::DEFAULT_MAX_FRAME_DT;
use crate::input::queue::InputQueue;
use crate::renderer::camera::OrbitCamera;
use crate::renderer::instance::InstanceBuffer;
#[cfg(feature = "vectors")]
use crate::systems::vector::VectorState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Largest frame delta handed to `Game::update`, in seconds (default: 0.1).
    pub max_frame_dt: f32,
    /// Canvas width in CSS pixels until the host reports a resize.
    pub viewport_width: f32,
    /// Canvas height in CSS pixels until the host reports a resize.
    pub viewport_height: f32,
    /// Maximum number of body instances (default: 16).
    pub max_instances: usize,
    /// Maximum number of vector vertices (default: 16384).
    pub max_vector_vertices: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_frame_dt: DEFAULT_MAX_FRAME_DT,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            max_instances: 16,
            max_vector_vertices: 16384,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, position the camera, build static geometry.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The per-frame tick. `ctx.dt()` holds the clamped frame delta.
    /// Input events are visible in arrival order and drained afterwards.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Read-only render pass: write one instance per visible body.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub camera: OrbitCamera,
    pub events: Vec<GameEvent>,
    pub rng: Rng,
    /// Background color the host clears to (sRGB, 0..1).
    pub clear_color: [f32; 3],
    #[cfg(feature = "vectors")]
    pub vectors: VectorState,
    dt: f32,
    frame: u64,
}

impl EngineContext {
    pub fn new(seed: u64) -> Self {
        Self {
            camera: OrbitCamera::default(),
            events: Vec::new(),
            rng: Rng::new(seed),
            clear_color: [0.0, 0.0, 0.0],
            #[cfg(feature = "vectors")]
            vectors: VectorState::new(),
            dt: 0.0,
            frame: 0,
        }
    }

    /// Clamped delta of the frame being processed, in seconds.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Number of frames processed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Called by the runner before `Game::update`.
    pub fn begin_frame(&mut self, dt: f32) {
        self.dt = dt;
        self.frame += 1;
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Render context for the per-frame instance pass.
pub struct RenderContext<'a> {
    pub instances: &'a mut InstanceBuffer,
    pub camera: &'a OrbitCamera,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_frame_records_dt_and_counts() {
        let mut ctx = EngineContext::new(1);
        ctx.begin_frame(0.016);
        ctx.begin_frame(0.017);
        assert_eq!(ctx.frame(), 2);
        assert!((ctx.dt() - 0.017).abs() < 1e-7);
    }

    #[test]
    fn clear_frame_data_drops_events() {
        let mut ctx = EngineContext::new(1);
        ctx.emit_event(GameEvent::new(1.0, 0.0, 0.0, 0.0));
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }
}
