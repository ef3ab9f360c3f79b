//! Orbit camera
//!
//! Left drag orbits around the target, right drag pans, the wheel zooms.
//! Drag input is collected by [`OrbitCamera::handle_input`] and eased in
//! by [`OrbitCamera::update`], so rotation keeps drifting briefly after the
//! button is released.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Vec2, Vec3};

use croak_app::{Input, MouseButton};

use crate::style::SceneStyle;

const POLE_EPS: f32 = 0.0001;

pub struct OrbitCamera {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub min_distance: f32,
    pub max_distance: f32,

    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    aspect: f32,

    center: Vec3,
    radius: f32,
    theta: f32,
    phi: f32,

    rotate_delta: Vec2,
}

impl OrbitCamera {
    /// Places the camera at `position`, looking at `target`.
    #[must_use]
    pub fn new(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let radius = offset.length();
        let (theta, phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, FRAC_PI_2)
        };

        Self {
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            pan_speed: 1.0,
            damping_factor: 0.05,
            enable_damping: true,
            min_distance: 1.0,
            max_distance: 1000.0,

            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            aspect: 1.0,

            center: target,
            radius: radius.max(POLE_EPS),
            theta,
            phi: phi.clamp(POLE_EPS, PI - POLE_EPS),

            rotate_delta: Vec2::ZERO,
        }
    }

    /// Camera configured from a [`SceneStyle`].
    #[must_use]
    pub fn from_style(style: &SceneStyle) -> Self {
        let mut camera = Self::new(style.camera_position, style.camera_target);
        camera.fov_degrees = style.fov_degrees;
        camera.near = style.near;
        camera.far = style.far;
        camera.rotate_speed = style.rotate_speed;
        camera.damping_factor = style.damping_factor;
        camera
    }

    /// Updates the aspect ratio. Zero-sized viewports are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Collects this frame's drag and wheel input.
    pub fn handle_input(&mut self, input: &Input) {
        let screen_height = input.screen_size().y.max(1.0);
        let cursor_delta = input.mouse_delta();

        if input.get_mouse_button(MouseButton::Left) {
            let rotate_per_pixel = 2.0 * PI / screen_height;
            self.rotate_delta -= cursor_delta * rotate_per_pixel * self.rotate_speed;
        }

        let scroll = input.scroll_delta().y;
        if scroll != 0.0 {
            let scale = (1.0 - self.zoom_speed).powf(scroll.abs());
            if scroll > 0.0 {
                self.radius *= scale;
            } else {
                self.radius /= scale;
            }
            self.radius = self.radius.clamp(self.min_distance, self.max_distance);
        }

        if input.get_mouse_button(MouseButton::Right) {
            let half_fov = self.fov_degrees.to_radians() / 2.0;
            let target_world_height = 2.0 * self.radius * half_fov.tan();
            let pixels_to_world = target_world_height / screen_height;

            let forward = -self.offset_direction();
            let right = forward.cross(Vec3::Y).normalize();
            let up = right.cross(forward).normalize();

            self.center += (right * -cursor_delta.x + up * cursor_delta.y)
                * pixels_to_world
                * self.pan_speed;
        }
    }

    /// Applies pending rotation for a frame of `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.enable_damping {
            let target_fps = 60.0;
            let retention = (1.0 - self.damping_factor).powf(dt * target_fps);
            let applied = self.rotate_delta * (1.0 - retention);

            self.theta += applied.x;
            self.phi += applied.y;
            self.rotate_delta *= retention;
        } else {
            self.theta += self.rotate_delta.x;
            self.phi += self.rotate_delta.y;
            self.rotate_delta = Vec2::ZERO;
        }

        self.phi = self.phi.clamp(POLE_EPS, PI - POLE_EPS);
    }

    fn offset_direction(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.center + self.offset_direction() * self.radius
    }

    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.center
    }

    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.center, Vec3::Y)
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}
