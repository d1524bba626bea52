//! Scene state driven by discrete user actions
//!
//! The scene owns the bodies, the camera and the light. Input handlers call the
//! mutators; the render loop calls [`Scene::advance`] once per frame, which
//! moves the clock, the bodies and then the camera, in that order.

use common::camera::{CameraDefaults, CameraMode, OrbitCamera, Projection};
use glam::{Mat4, Vec3};

use crate::body::{Celestial, Planet};
use crate::light::{self, Light, Material};
use crate::system::SolarSystem;
use crate::units::DistanceMode;

/// Tunables of the viewer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSettings {
    pub window_width: u32,
    pub window_height: u32,
    /// Free-mode resting position of the camera
    pub camera: CameraDefaults,
    /// Camera distance on focus, in diameters of the focused body
    pub focus_distance_factor: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub speed_step: f32,
    /// Simulated time units added by one time leap
    pub time_leap: f32,
    pub rotate_degrees_per_pixel: f32,
    /// Zoom per scroll line, as a fraction of the current distance
    pub zoom_step: f32,
    pub true_scale_intensity: f32,
    pub compressed_intensity: f32,
    pub initial_distance_mode: DistanceMode,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            window_width: 1600,
            window_height: 900,
            camera: CameraDefaults {
                distance: 150.0,
                vertical_angle: 20.0,
                horizontal_angle: 0.0,
            },
            focus_distance_factor: 4.0,
            min_speed: 1.0,
            max_speed: 25.0,
            speed_step: 2.0,
            time_leap: 100.0,
            rotate_degrees_per_pixel: 0.3,
            zoom_step: 0.1,
            true_scale_intensity: light::TRUE_SCALE_INTENSITY,
            compressed_intensity: light::COMPRESSED_INTENSITY,
            initial_distance_mode: DistanceMode::Compressed,
        }
    }
}

pub struct Scene {
    system: SolarSystem,
    camera: OrbitCamera,
    projection: Projection,
    light: Light,
    material: Material,
    distance_mode: DistanceMode,
    selected_index: usize,
    speed_multiplier: f32,
    pending_time_leap: f32,
    sim_time: f32,
    settings: SceneSettings,
}

impl Scene {
    pub fn new(system: SolarSystem, mut settings: SceneSettings, aspect_ratio: f32) -> Self {
        if settings.min_speed > settings.max_speed {
            log::warn!(
                "Speed bounds {} > {} are reversed, swapping",
                settings.min_speed,
                settings.max_speed
            );
            std::mem::swap(&mut settings.min_speed, &mut settings.max_speed);
        }
        let mut scene = Self {
            system,
            camera: OrbitCamera::new(settings.camera),
            projection: Projection::new(aspect_ratio),
            light: Light::default(),
            material: Material::default(),
            distance_mode: settings.initial_distance_mode,
            selected_index: 0,
            speed_multiplier: settings.min_speed,
            pending_time_leap: 0.0,
            sim_time: 0.0,
            settings,
        };
        scene.light.set_intensity(scene.intensity_for(scene.distance_mode));
        scene.system.set_projection(scene.projection.matrix());
        scene.advance(0.0);
        scene
    }

    fn intensity_for(&self, mode: DistanceMode) -> f32 {
        match mode {
            DistanceMode::TrueScale => self.settings.true_scale_intensity,
            DistanceMode::Compressed => self.settings.compressed_intensity,
        }
    }

    // ---- Input-facing mutators ----

    pub fn select_next(&mut self) {
        let count = self.system.len();
        if count == 0 {
            return;
        }
        self.focus((self.selected_index + 1) % count);
    }

    pub fn select_previous(&mut self) {
        let count = self.system.len();
        if count == 0 {
            return;
        }
        self.focus((self.selected_index + count - 1) % count);
    }

    fn focus(&mut self, index: usize) {
        self.selected_index = index;
        self.camera.set_focused(index);
        self.distance_mode = DistanceMode::TrueScale;
        self.light.set_intensity(self.settings.true_scale_intensity);

        if let Some(planet) = self.system.get(index) {
            let diameter = planet.descriptor().diameter_units();
            self.camera.set_distance(self.settings.focus_distance_factor * diameter);
            log::info!("Focused on {} (camera distance {:.2})", planet.name(), self.camera.distance());
        }
        self.refresh();
    }

    pub fn reset_to_free(&mut self) {
        self.camera.set_free();
        log::info!("Free camera");
        self.refresh();
    }

    pub fn switch_to_profile(&mut self) {
        if self.camera.mode() != CameraMode::Profile {
            log::info!("Profile view");
        }
        self.camera.set_profile();
        self.refresh();
    }

    pub fn increase_speed(&mut self, amount: f32) {
        self.set_speed(self.speed_multiplier + amount);
    }

    pub fn decrease_speed(&mut self, amount: f32) {
        self.set_speed(self.speed_multiplier - amount);
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed_multiplier = speed.max(self.settings.min_speed).min(self.settings.max_speed);
    }

    pub fn trigger_time_leap(&mut self, amount: f32) {
        self.pending_time_leap += amount;
        log::debug!("Time leap of {} queued", amount);
    }

    /// Returns the queued leap and clears it
    pub fn consume_time_leap(&mut self) -> f32 {
        std::mem::take(&mut self.pending_time_leap)
    }

    /// `dx` turns around the vertical axis, `dy` tilts (ignored in profile view)
    pub fn rotate_camera(&mut self, dx_degrees: f32, dy_degrees: f32) {
        self.camera.rotate_horizontal(dx_degrees);
        self.camera.rotate_vertical(dy_degrees);
    }

    pub fn zoom_camera(&mut self, delta: f32) {
        self.camera.zoom(delta);
    }

    /// Switch between true-scale and compressed orbits.
    ///
    /// Only allowed while no body is focused; returns whether the mode changed.
    pub fn toggle_distance_compression(&mut self) -> bool {
        if self.camera.is_focused() {
            log::debug!("Distance toggle ignored while focused");
            return false;
        }
        self.distance_mode = self.distance_mode.toggled();
        self.light.set_intensity(self.intensity_for(self.distance_mode));
        log::info!("Distances: {}", self.distance_mode.label());
        self.refresh();
        true
    }

    // ---- Frame step ----

    /// Move the simulation forward by `real_dt` seconds of wall time
    pub fn advance(&mut self, real_dt: f32) {
        let leap = self.consume_time_leap();
        self.sim_time += real_dt * self.speed_multiplier + leap;
        self.refresh();
    }

    /// Re-place the bodies at the current time, then aim the camera at the selection
    fn refresh(&mut self) {
        self.system
            .update(self.sim_time, self.distance_mode, self.camera.is_focused());

        let target = self
            .system
            .get(self.selected_index)
            .map(|p| p.world_position())
            .unwrap_or(Vec3::ZERO);
        self.camera.update_view_matrix(target);

        self.system.set_view(self.camera.view_matrix());
        self.system.set_projection(self.projection.matrix());
    }

    pub fn resize(&mut self, aspect_ratio: f32) {
        self.projection.update_aspect_ratio(aspect_ratio);
        self.system.set_projection(self.projection.matrix());
    }

    // ---- Read access ----

    pub fn system(&self) -> &SolarSystem {
        &self.system
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn projection(&self) -> Mat4 {
        self.projection.matrix()
    }

    pub fn light(&self) -> &Light {
        &self.light
    }

    /// Light position in the camera's view space
    pub fn light_view_position(&self) -> Vec3 {
        self.camera.view_matrix().transform_point3(self.light.position)
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn distance_mode(&self) -> DistanceMode {
        self.distance_mode
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&Planet> {
        self.system.get(self.selected_index)
    }

    pub fn selected_name(&self) -> &str {
        self.selected().map(|p| p.name()).unwrap_or("")
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn sim_time(&self) -> f32 {
        self.sim_time
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    /// Whether moons should be drawn this frame
    pub fn satellites_visible(&self) -> bool {
        self.camera.is_focused()
    }
}
