pub mod api;
pub mod bridge;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig, RenderContext};
pub use api::types::GameEvent;
pub use bridge::protocol::ProtocolLayout;
pub use core::rng::Rng;
pub use core::time::FrameClock;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::{CameraUniform, OrbitCamera, OrbitControls, Ray};
pub use renderer::instance::{BodyInstance, InstanceBuffer};

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorColor, VectorState, VectorVertex};
