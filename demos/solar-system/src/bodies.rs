//! Planet catalog and visual constants.
//!
//! Sizes and distances are visual units, not physical ones. Speeds are
//! relative to Earth (1.0) and only feed the orbit animation.

use serde::Serialize;

/// Planet index constants.
pub const MERCURY: usize = 0;
pub const VENUS: usize = 1;
pub const EARTH: usize = 2;
pub const MARS: usize = 3;
pub const JUPITER: usize = 4;
pub const SATURN: usize = 5;
pub const URANUS: usize = 6;
pub const NEPTUNE: usize = 7;
pub const BODY_COUNT: usize = 8;

/// Static description of one orbiting body. Never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CelestialBodyConfig {
    /// Unique display name.
    pub name: &'static str,
    /// sRGB hex color, `#RRGGBB`.
    pub color: &'static str,
    /// Relative size (Earth = 1).
    pub size: f32,
    /// Orbit radius in world units.
    pub distance: f32,
    /// Base angular speed (Earth = 1).
    pub base_speed: f64,
    /// One-line description for the hover label.
    pub info: &'static str,
}

pub const BODIES: [CelestialBodyConfig; BODY_COUNT] = [
    CelestialBodyConfig { name: "Mercury", color: "#8C7853", size: 0.38, distance: 4.0,  base_speed: 4.15,  info: "Closest to Sun" },
    CelestialBodyConfig { name: "Venus",   color: "#FFC649", size: 0.95, distance: 5.5,  base_speed: 1.62,  info: "Hottest planet" },
    CelestialBodyConfig { name: "Earth",   color: "#6B93D6", size: 1.0,  distance: 7.0,  base_speed: 1.0,   info: "Our home planet" },
    CelestialBodyConfig { name: "Mars",    color: "#C1440E", size: 0.53, distance: 8.5,  base_speed: 0.53,  info: "The red planet" },
    CelestialBodyConfig { name: "Jupiter", color: "#D8CA9D", size: 2.5,  distance: 12.0, base_speed: 0.08,  info: "Largest planet" },
    CelestialBodyConfig { name: "Saturn",  color: "#FAD5A5", size: 2.1,  distance: 15.0, base_speed: 0.03,  info: "Has beautiful rings" },
    CelestialBodyConfig { name: "Uranus",  color: "#4FD0E7", size: 1.6,  distance: 18.0, base_speed: 0.01,  info: "Ice giant" },
    CelestialBodyConfig { name: "Neptune", color: "#4B70DD", size: 1.5,  distance: 21.0, base_speed: 0.006, info: "Windiest planet" },
];

/// Rendered sphere radius per unit of `size`.
pub const RADIUS_SCALE: f32 = 0.3;
/// Scale applied to the hovered body.
pub const HOVER_SCALE: f32 = 1.2;
/// Emissive tint of the hovered body.
pub const HOVER_EMISSIVE: f32 = 0.1;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 1.5;
pub const SUN_COLOR: &str = "#FDB813";
/// Self-rotation of the sun, radians per second.
pub const SUN_SPIN_RATE: f64 = 0.5;

// ── Orbit path rings ─────────────────────────────────────────────────

/// Ring spans `distance ± RING_WIDTH / 2`.
pub const RING_WIDTH: f32 = 0.04;
pub const RING_ALPHA: f32 = 0.1;

/// Parse `#RRGGBB` into sRGB floats in [0, 1].
pub fn hex_to_rgb(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some([
        ((value >> 16) & 0xFF) as f32 / 255.0,
        ((value >> 8) & 0xFF) as f32 / 255.0,
        (value & 0xFF) as f32 / 255.0,
    ])
}

impl CelestialBodyConfig {
    /// Sphere radius before hover emphasis.
    pub fn render_radius(&self) -> f32 {
        self.size * RADIUS_SCALE
    }

    pub fn rgb(&self) -> [f32; 3] {
        hex_to_rgb(self.color).unwrap_or([0.5, 0.5, 0.5])
    }
}

/// Index of the body with this name.
pub fn find_by_name(name: &str) -> Option<usize> {
    BODIES.iter().position(|b| b.name == name)
}

/// The catalog as JSON, for the UI to build its controls from the same list.
pub fn catalog_json() -> Result<String, serde_json::Error> {
    serde_json::to_string(&BODIES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        for (i, a) in BODIES.iter().enumerate() {
            for b in &BODIES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn index_constants_match_names() {
        assert_eq!(find_by_name("Mercury"), Some(MERCURY));
        assert_eq!(find_by_name("Venus"), Some(VENUS));
        assert_eq!(find_by_name("Earth"), Some(EARTH));
        assert_eq!(find_by_name("Mars"), Some(MARS));
        assert_eq!(find_by_name("Jupiter"), Some(JUPITER));
        assert_eq!(find_by_name("Saturn"), Some(SATURN));
        assert_eq!(find_by_name("Uranus"), Some(URANUS));
        assert_eq!(find_by_name("Neptune"), Some(NEPTUNE));
        assert_eq!(find_by_name("Pluto"), None);
    }

    #[test]
    fn every_color_parses() {
        for body in &BODIES {
            assert!(hex_to_rgb(body.color).is_some(), "bad color for {}", body.name);
        }
        assert!(hex_to_rgb(SUN_COLOR).is_some());
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(hex_to_rgb("#FF0000"), Some([1.0, 0.0, 0.0]));
        assert_eq!(hex_to_rgb("FF0000"), None);
        assert_eq!(hex_to_rgb("#FFF"), None);
        assert_eq!(hex_to_rgb("#GG0000"), None);
    }

    #[test]
    fn orbits_do_not_overlap_the_sun() {
        for body in &BODIES {
            assert!(body.distance - body.render_radius() * HOVER_SCALE > SUN_RADIUS);
        }
    }

    #[test]
    fn catalog_serializes_in_order() {
        let json = catalog_json().unwrap();
        let earth = json.find("\"Earth\"").unwrap();
        let mars = json.find("\"Mars\"").unwrap();
        assert!(earth < mars);
        assert!(json.contains("\"base_speed\":4.15"));
    }
}
