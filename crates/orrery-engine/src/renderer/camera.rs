use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};
use std::f32::consts::TAU;

/// Keeps the camera off the poles, where look-at with +Y up degenerates.
const MAX_ELEVATION: f32 = 1.55;
/// Multiplicative distance change per wheel unit.
const ZOOM_STEP: f32 = 0.95;
const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;

/// Which user manipulations are allowed, plus auto-rotation.
/// Mirrors the knobs of a browser orbit-controls widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControls {
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub enable_rotate: bool,
    /// Closest allowed distance to the target.
    pub min_distance: f32,
    /// Farthest allowed distance to the target.
    pub max_distance: f32,
    pub auto_rotate: bool,
    /// 1.0 = one full turn per minute.
    pub auto_rotate_speed: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enable_pan: true,
            enable_zoom: true,
            enable_rotate: true,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
        }
    }
}

/// A ray in world space. `dir` is normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Distance along the ray to the first hit with a sphere, if any.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.dir);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_d = disc.sqrt();
        let t0 = -b - sqrt_d;
        let t1 = -b + sqrt_d;
        if t0 >= 0.0 {
            Some(t0)
        } else if t1 >= 0.0 {
            // Origin inside the sphere.
            Some(t1)
        } else {
            None
        }
    }
}

/// GPU-side uniform data for the camera. 20 floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Eye position, w unused.
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 20;
}

/// Perspective camera orbiting a target point on a sphere.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Point the camera looks at.
    pub target: Vec3,
    /// Angle around +Y, measured from +Z toward +X (radians).
    pub azimuth: f32,
    /// Angle above the XZ plane (radians).
    pub elevation: f32,
    /// Distance from target.
    pub distance: f32,
    /// Vertical field of view (radians).
    pub fov_y: f32,
    pub controls: OrbitControls,
    viewport: Vec2,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            azimuth: 0.0,
            elevation: 0.3,
            distance: 10.0,
            fov_y: 60f32.to_radians(),
            controls: OrbitControls::default(),
            viewport: Vec2::new(1280.0, 720.0),
        }
    }
}

impl OrbitCamera {
    /// Place the camera at `eye`, looking at `target`.
    pub fn looking_at(eye: Vec3, target: Vec3, fov_y_degrees: f32) -> Self {
        let mut cam = Self {
            target,
            fov_y: fov_y_degrees.to_radians(),
            ..Default::default()
        };
        cam.set_eye(eye);
        cam
    }

    /// Move the eye to `eye` while keeping the target.
    pub fn set_eye(&mut self, eye: Vec3) {
        let offset = eye - self.target;
        self.distance = offset.length();
        if self.distance > 1e-6 {
            self.elevation = (offset.y / self.distance).clamp(-1.0, 1.0).asin();
            self.azimuth = offset.x.atan2(offset.z);
        }
        self.elevation = self.elevation.clamp(-MAX_ELEVATION, MAX_ELEVATION);
    }

    /// Clamp distance into the configured limits.
    pub fn set_controls(&mut self, controls: OrbitControls) {
        self.controls = controls;
        self.clamp_distance();
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Resize the viewport (e.g. on canvas resize). Ignores degenerate sizes.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
        }
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();
        self.target + self.distance * Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az)
    }

    /// Rotate by a pointer drag in pixels. A drag across the full canvas
    /// height is one full turn.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        if !self.controls.enable_rotate {
            return;
        }
        self.azimuth -= TAU * dx / self.viewport.y;
        self.elevation += TAU * dy / self.viewport.y;
        self.elevation = self.elevation.clamp(-MAX_ELEVATION, MAX_ELEVATION);
    }

    /// Zoom by wheel units (positive = closer).
    pub fn zoom(&mut self, delta: f32) {
        if !self.controls.enable_zoom {
            return;
        }
        self.distance *= ZOOM_STEP.powf(delta);
        self.clamp_distance();
    }

    /// Pan the target by a pointer drag in pixels, so the point under the
    /// cursor on the target plane follows the cursor.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        if !self.controls.enable_pan {
            return;
        }
        let world_per_px = 2.0 * self.distance * (self.fov_y / 2.0).tan() / self.viewport.y;
        let forward = (self.target - self.eye()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        self.target += (-dx * right + dy * up) * world_per_px;
    }

    /// Per-frame update: applies auto-rotation.
    pub fn update(&mut self, dt: f32) {
        if self.controls.auto_rotate {
            self.azimuth -= TAU / 60.0 * self.controls.auto_rotate_speed * dt;
        }
    }

    fn clamp_distance(&mut self) {
        let OrbitControls { min_distance, max_distance, .. } = self.controls;
        if min_distance <= max_distance {
            self.distance = self.distance.clamp(min_distance, max_distance);
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    /// WebGPU clip space (depth in [0, 1]).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect(), NEAR, FAR)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World point to canvas pixels (origin top-left). None when behind the camera.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }

    /// Ray from the eye through a canvas pixel.
    pub fn screen_ray(&self, screen: Vec2) -> Ray {
        let ndc_x = screen.x / self.viewport.x * 2.0 - 1.0;
        let ndc_y = 1.0 - screen.y / self.viewport.y * 2.0;
        let inv = self.view_projection().inverse();
        let near = inv.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        Ray {
            origin: near,
            dir: (far - near).normalize_or_zero(),
        }
    }

    pub fn uniform(&self) -> CameraUniform {
        let eye = self.eye();
        CameraUniform {
            view_proj: self.view_projection().to_cols_array_2d(),
            eye: [eye.x, eye.y, eye.z, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn looking_at_reproduces_eye() {
        let cam = OrbitCamera::looking_at(Vec3::new(0.0, 10.0, 25.0), Vec3::ZERO, 60.0);
        assert!(close(cam.eye(), Vec3::new(0.0, 10.0, 25.0)), "eye {:?}", cam.eye());
        assert!((cam.distance - 725f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn zoom_respects_limits() {
        let mut cam = OrbitCamera::looking_at(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, 60.0);
        cam.set_controls(OrbitControls { min_distance: 10.0, max_distance: 50.0, ..Default::default() });
        cam.zoom(1000.0);
        assert!((cam.distance - 10.0).abs() < 1e-5);
        cam.zoom(-1000.0);
        assert!((cam.distance - 50.0).abs() < 1e-5);
    }

    #[test]
    fn disabled_controls_ignore_input() {
        let mut cam = OrbitCamera::default();
        cam.controls = OrbitControls {
            enable_pan: false,
            enable_zoom: false,
            enable_rotate: false,
            ..Default::default()
        };
        let before = (cam.azimuth, cam.elevation, cam.distance, cam.target);
        cam.orbit(100.0, 50.0);
        cam.zoom(3.0);
        cam.pan(40.0, 40.0);
        assert_eq!(before, (cam.azimuth, cam.elevation, cam.distance, cam.target));
    }

    #[test]
    fn auto_rotate_speed_one_is_a_turn_per_minute() {
        let mut cam = OrbitCamera::default();
        cam.controls.auto_rotate = true;
        cam.controls.auto_rotate_speed = 1.0;
        let start = cam.azimuth;
        cam.update(60.0);
        assert!(((start - cam.azimuth) - TAU).abs() < 1e-4);
    }

    #[test]
    fn auto_rotate_off_keeps_azimuth() {
        let mut cam = OrbitCamera::default();
        let start = cam.azimuth;
        cam.update(5.0);
        assert_eq!(cam.azimuth, start);
    }

    #[test]
    fn elevation_is_clamped() {
        let mut cam = OrbitCamera::default();
        cam.orbit(0.0, 1.0e6);
        assert!(cam.elevation <= MAX_ELEVATION);
    }

    #[test]
    fn target_projects_to_viewport_center() {
        let mut cam = OrbitCamera::looking_at(Vec3::new(0.0, 10.0, 25.0), Vec3::ZERO, 60.0);
        cam.resize(800.0, 600.0);
        let p = cam.project(Vec3::ZERO).unwrap();
        assert!((p.x - 400.0).abs() < 1e-2 && (p.y - 300.0).abs() < 1e-2, "p = {:?}", p);
    }

    #[test]
    fn point_behind_camera_is_not_projected() {
        let cam = OrbitCamera::looking_at(Vec3::new(0.0, 0.0, 25.0), Vec3::ZERO, 60.0);
        assert!(cam.project(Vec3::new(0.0, 0.0, 60.0)).is_none());
    }

    #[test]
    fn center_ray_hits_sphere_at_target() {
        let mut cam = OrbitCamera::looking_at(Vec3::new(0.0, 10.0, 25.0), Vec3::ZERO, 60.0);
        cam.resize(800.0, 600.0);
        let ray = cam.screen_ray(Vec2::new(400.0, 300.0));
        let t = ray.intersect_sphere(Vec3::ZERO, 1.5).unwrap();
        let expected = cam.distance - 1.5;
        let hit = ray.origin + ray.dir * t;
        assert!(((hit - cam.eye()).length() - expected).abs() < 0.05);
    }

    #[test]
    fn ray_misses_sphere_off_axis() {
        let ray = Ray { origin: Vec3::new(0.0, 0.0, 10.0), dir: Vec3::NEG_Z };
        assert!(ray.intersect_sphere(Vec3::new(5.0, 0.0, 0.0), 1.0).is_none());
        assert!((ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap() - 9.0).abs() < 1e-5);
    }

    #[test]
    fn pan_moves_target_sideways() {
        let mut cam = OrbitCamera::looking_at(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, 60.0);
        cam.pan(100.0, 0.0);
        // Dragging right pulls the scene right, so the target moves left (-X).
        assert!(cam.target.x < 0.0);
        assert!(cam.target.y.abs() < 1e-4);
    }

    #[test]
    fn uniform_is_20_floats() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), CameraUniform::FLOATS * 4);
    }
}
