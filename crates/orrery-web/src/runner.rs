use orrery_engine::{
    EngineContext, FrameClock, Game, GameConfig, InputEvent, InputQueue, InstanceBuffer,
    ProtocolLayout, RenderContext,
};
use orrery_engine::CameraUniform;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    instances: InstanceBuffer,
    clock: FrameClock,
    config: GameConfig,
    layout: ProtocolLayout,
    camera_uniform: CameraUniform,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    /// `seed` drives every pseudo-random choice the game makes at init.
    pub fn new(game: G, seed: u64) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);
        let mut ctx = EngineContext::new(seed);
        ctx.camera.resize(config.viewport_width, config.viewport_height);
        let camera_uniform = ctx.camera.uniform();

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            instances: InstanceBuffer::with_capacity(config.max_instances),
            clock: FrameClock::new(config.max_frame_dt),
            layout,
            config,
            camera_uniform,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.build_frame_output();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame with a host-measured delta in seconds.
    pub fn tick(&mut self, dt: f32) {
        let dt = self.clock.clamp(dt);
        self.run_frame(dt);
    }

    /// Run one frame from an absolute timestamp in milliseconds
    /// (e.g. the `requestAnimationFrame` argument).
    pub fn frame(&mut self, timestamp_ms: f64) {
        let dt = self.clock.advance_to(timestamp_ms / 1000.0);
        self.run_frame(dt);
    }

    fn run_frame(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();
        self.ctx.begin_frame(dt);

        self.game.update(&mut self.ctx, &self.input);

        // Drain input after update
        self.input.drain();

        self.ctx.camera.update(dt);
        self.build_frame_output();

        if self.ctx.events.len() > self.layout.max_events {
            log::warn!(
                "{} events emitted, only {} fit in the shared buffer",
                self.ctx.events.len(),
                self.layout.max_events
            );
            self.ctx.events.truncate(self.layout.max_events);
        }
    }

    fn build_frame_output(&mut self) {
        self.instances.clear();
        {
            let mut render_ctx = RenderContext {
                instances: &mut self.instances,
                camera: &self.ctx.camera,
            };
            self.game.render(&mut render_ctx);
        }
        self.camera_uniform = self.ctx.camera.uniform();
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.instance_count()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera_uniform as *const CameraUniform as *const f32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.ctx.vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        (self.ctx.vectors.vertex_count().min(self.layout.max_vector_vertices)) as u32
    }

    pub fn clear_color(&self) -> [f32; 3] {
        self.ctx.clear_color
    }

    pub fn frame_counter(&self) -> u32 {
        self.ctx.frame() as u32
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_vector_vertices(&self) -> u32 {
        self.layout.max_vector_vertices as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
