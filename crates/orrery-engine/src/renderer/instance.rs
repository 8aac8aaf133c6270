use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Per-body render data written to SharedArrayBuffer for the TypeScript renderer.
/// Must match the TypeScript protocol: 12 floats = 48 bytes stride.
///
/// The host owns the actual scene-graph node; it copies these values onto it
/// each frame (position, radius, self-rotation about +Y, material).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// World-space center.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Rendered sphere radius, emphasis already applied.
    pub radius: f32,
    /// Self-rotation about +Y, radians.
    pub spin: f32,
    /// Base color (sRGB, 0..1).
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Emissive intensity (0 = none, 1 = unlit/self-luminous).
    pub emissive: f32,
    /// 1.0 while the body is highlighted, else 0.0.
    pub highlight: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Instance list rebuilt every frame by `Game::render`.
pub struct InstanceBuffer {
    instances: Vec<BodyInstance>,
    capacity: usize,
}

impl InstanceBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Append an instance. Instances past capacity are dropped with a warning,
    /// since the host only allocated that many slots.
    pub fn push(&mut self, instance: BodyInstance) {
        if self.instances.len() >= self.capacity {
            log::warn!("instance buffer full ({}), dropping instance", self.capacity);
            return;
        }
        self.instances.push(instance);
    }

    pub fn as_slice(&self) -> &[BodyInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for SharedArrayBuffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::with_capacity(16)
    }
}
