//! Scene look: ground, light, skin shading and camera defaults.

use glam::Vec3;

/// Converts a `0xRRGGBB` color into linear `[0, 1]` components.
#[must_use]
pub fn rgb(hex: u32) -> Vec3 {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    Vec3::new(channel(16), channel(8), channel(0))
}

/// Everything about the frog scene that is not the frog.
///
/// The defaults reproduce the stock viewer: a 100 × 100 green ground one
/// unit below the rest pose, a blue point light above the frog and a camera
/// looking at the origin from `(10, 10, 10)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    pub clear_color: wgpu::Color,

    // Ground
    /// Edge length of the square ground plane.
    pub ground_size: f32,
    /// World height of the ground plane.
    pub ground_height: f32,
    pub ground_color: Vec3,
    pub ground_emissive: Vec3,

    // Point light (lights the ground only)
    pub light_position: Vec3,
    pub light_color: Vec3,
    pub light_intensity: f32,

    // Skin shader
    /// Color of the view-dependent rim glow added to the skin texture.
    pub rim_color: Vec3,
    /// Exponent of the rim falloff.
    pub rim_power: f32,

    // Camera
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub rotate_speed: f32,
    pub damping_factor: f32,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            clear_color: wgpu::Color::BLACK,

            ground_size: 100.0,
            ground_height: -1.0,
            ground_color: rgb(0x00ff23),
            ground_emissive: rgb(0x122201),

            light_position: Vec3::new(0.0, 7.0, 0.0),
            light_color: rgb(0x0f0fff),
            light_intensity: 10.0,

            rim_color: Vec3::new(0.3, 0.9, 0.1),
            rim_power: 1.7,

            fov_degrees: 75.0,
            near: 1.0,
            far: 1000.0,
            camera_position: Vec3::new(10.0, 10.0, 10.0),
            camera_target: Vec3::ZERO,
            rotate_speed: 2.5,
            damping_factor: 0.1,
        }
    }
}
