pub mod camera;
pub mod instance;

pub use camera::{CameraUniform, OrbitCamera, OrbitControls, Ray};
pub use instance::{BodyInstance, InstanceBuffer};
