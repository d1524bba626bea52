//! Camera system: orbit camera state machine and perspective projection
//!
//! The camera works in one of three modes:
//! - `Free`: orbits the world origin with unconstrained angles
//! - `Focused`: orbits a tracked body and looks at it
//! - `Profile`: side view in the ecliptic plane, elevation locked
//!
//! Angles are stored in degrees.

use glam::{Mat4, Vec3};

/// Lower bound for the camera distance, kept after every mutation
pub const MIN_DISTANCE: f32 = 0.25;

/// Elevation applied when entering focused mode
pub const FOCUSED_VERTICAL_ANGLE: f32 = 15.0;
/// Azimuth applied when entering focused mode
pub const FOCUSED_HORIZONTAL_ANGLE: f32 = 0.0;

pub const PROFILE_VERTICAL_ANGLE: f32 = 0.0;
pub const PROFILE_HORIZONTAL_ANGLE: f32 = 90.0;

/// Viewing mode of the orbit camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Free,
    /// Tracks the body at the given index
    Focused(usize),
    Profile,
}

impl CameraMode {
    pub fn label(&self) -> &'static str {
        match self {
            CameraMode::Free => "Free",
            CameraMode::Focused(_) => "Focused",
            CameraMode::Profile => "Profile",
        }
    }
}

/// Scene-level resting position of the camera, used by free and profile modes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDefaults {
    pub distance: f32,
    pub vertical_angle: f32,
    pub horizontal_angle: f32,
}

/// Orbit camera with free / focused / profile modes
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    distance: f32,
    vertical_angle: f32,
    horizontal_angle: f32,
    mode: CameraMode,
    defaults: CameraDefaults,
    view: Mat4,
    eye: Vec3,
}

impl OrbitCamera {
    pub fn new(defaults: CameraDefaults) -> Self {
        let mut camera = Self {
            distance: defaults.distance.max(MIN_DISTANCE),
            vertical_angle: defaults.vertical_angle,
            horizontal_angle: defaults.horizontal_angle,
            mode: CameraMode::Free,
            defaults,
            view: Mat4::IDENTITY,
            eye: Vec3::ZERO,
        };
        camera.update_view_matrix(Vec3::ZERO);
        camera
    }

    /// Track a body. Always re-centers the angles, whatever the previous mode was.
    pub fn set_focused(&mut self, body: usize) {
        self.mode = CameraMode::Focused(body);
        self.vertical_angle = FOCUSED_VERTICAL_ANGLE;
        self.horizontal_angle = FOCUSED_HORIZONTAL_ANGLE;
    }

    /// Back to the free orbit around the origin at the resting position
    pub fn set_free(&mut self) {
        self.mode = CameraMode::Free;
        self.distance = self.defaults.distance.max(MIN_DISTANCE);
        self.vertical_angle = self.defaults.vertical_angle;
        self.horizontal_angle = self.defaults.horizontal_angle;
        self.update_view_matrix(Vec3::ZERO);
    }

    /// Side view of the ecliptic plane. Ignored when already in profile mode.
    pub fn set_profile(&mut self) {
        if self.mode == CameraMode::Profile {
            return;
        }
        self.mode = CameraMode::Profile;
        self.vertical_angle = PROFILE_VERTICAL_ANGLE;
        self.horizontal_angle = PROFILE_HORIZONTAL_ANGLE;
        self.distance = self.defaults.distance.max(MIN_DISTANCE);
        self.update_view_matrix(Vec3::ZERO);
    }

    /// Positive degrees rotate up. Locked in profile mode.
    pub fn rotate_vertical(&mut self, degrees: f32) {
        if self.mode == CameraMode::Profile {
            return;
        }
        self.vertical_angle += degrees;
    }

    /// Positive degrees rotate left
    pub fn rotate_horizontal(&mut self, degrees: f32) {
        self.horizontal_angle += degrees;
    }

    /// Move along the viewing axis; positive values move away
    pub fn zoom(&mut self, delta: f32) {
        self.set_distance(self.distance + delta);
    }

    pub fn set_distance(&mut self, distance: f32) {
        // NaN falls through `max` to the floor
        self.distance = distance.max(MIN_DISTANCE);
    }

    /// Rotation taking the camera's local frame to world space
    fn orbit_rotation(&self) -> Mat4 {
        Mat4::from_rotation_y(-self.horizontal_angle.to_radians())
            * Mat4::from_rotation_x(-self.vertical_angle.to_radians())
    }

    /// Recompute the view matrix. `target` is only read in focused mode.
    pub fn update_view_matrix(&mut self, target: Vec3) {
        match self.mode {
            CameraMode::Focused(_) => {
                let rotation = self.orbit_rotation();
                let offset = rotation.transform_vector3(Vec3::new(0.0, 0.0, self.distance));
                let eye = target + offset;

                // Looking straight up or down: world up is degenerate, use the orbit frame's
                let forward = (target - eye).normalize_or_zero();
                let up = if forward.dot(Vec3::Y).abs() > 0.999 {
                    rotation.transform_vector3(Vec3::Y)
                } else {
                    Vec3::Y
                };

                self.eye = eye;
                self.view = Mat4::look_at_rh(eye, target, up);
            }
            CameraMode::Free | CameraMode::Profile => {
                self.view = Mat4::from_translation(Vec3::new(0.0, 0.0, -self.distance))
                    * Mat4::from_rotation_x(self.vertical_angle.to_radians())
                    * Mat4::from_rotation_y(self.horizontal_angle.to_radians());
                self.eye = self
                    .orbit_rotation()
                    .transform_vector3(Vec3::new(0.0, 0.0, self.distance));
            }
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// World-space camera position from the last view update
    pub fn eye_position(&self) -> Vec3 {
        self.eye
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn vertical_angle(&self) -> f32 {
        self.vertical_angle
    }

    pub fn horizontal_angle(&self) -> f32 {
        self.horizontal_angle
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn is_focused(&self) -> bool {
        matches!(self.mode, CameraMode::Focused(_))
    }

    pub fn focused_body(&self) -> Option<usize> {
        match self.mode {
            CameraMode::Focused(body) => Some(body),
            _ => None,
        }
    }
}

/// Perspective projection, rebuilt on window resize
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub fov_y: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            fov_y: 45.0f32.to_radians(),
            aspect_ratio,
            near: 0.05,
            far: 5000.0,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.near, self.far)
    }

    pub fn update_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(CameraDefaults {
            distance: 150.0,
            vertical_angle: 20.0,
            horizontal_angle: 0.0,
        })
    }

    #[test]
    fn focusing_resets_angles() {
        let mut cam = camera();
        cam.rotate_vertical(180.0);
        cam.rotate_horizontal(-40.0);
        assert_eq!(cam.vertical_angle(), 200.0);
        assert_eq!(cam.horizontal_angle(), -40.0);

        cam.set_focused(3);
        assert_eq!(cam.vertical_angle(), 15.0);
        assert_eq!(cam.horizontal_angle(), 0.0);
        assert_eq!(cam.mode(), CameraMode::Focused(3));
        assert_eq!(cam.focused_body(), Some(3));
    }

    #[test]
    fn zoom_never_goes_below_floor() {
        let mut cam = camera();
        for _ in 0..10 {
            cam.zoom(-1000.0);
            assert!(cam.distance() >= MIN_DISTANCE);
        }
        assert_eq!(cam.distance(), MIN_DISTANCE);

        cam.zoom(2.0);
        assert_eq!(cam.distance(), MIN_DISTANCE + 2.0);

        cam.set_distance(f32::NAN);
        assert_eq!(cam.distance(), MIN_DISTANCE);
    }

    #[test]
    fn profile_is_idempotent() {
        let mut cam = camera();
        cam.rotate_horizontal(33.0);
        cam.set_profile();
        let (d, v, h, view) = (cam.distance(), cam.vertical_angle(), cam.horizontal_angle(), cam.view_matrix());

        cam.set_profile();
        assert_eq!(cam.distance(), d);
        assert_eq!(cam.vertical_angle(), v);
        assert_eq!(cam.horizontal_angle(), h);
        assert_eq!(cam.view_matrix(), view);
        assert_eq!((v, h), (0.0, 90.0));
    }

    #[test]
    fn profile_reentry_keeps_user_rotation() {
        let mut cam = camera();
        cam.set_profile();
        cam.rotate_horizontal(10.0);
        cam.zoom(5.0);
        cam.set_profile();
        assert_eq!(cam.horizontal_angle(), 100.0);
        assert_eq!(cam.distance(), 155.0);
    }

    #[test]
    fn vertical_rotation_locked_in_profile() {
        let mut cam = camera();
        cam.set_profile();
        cam.rotate_vertical(30.0);
        assert_eq!(cam.vertical_angle(), 0.0);
        cam.rotate_horizontal(30.0);
        assert_eq!(cam.horizontal_angle(), 120.0);
    }

    #[test]
    fn free_restores_defaults() {
        let mut cam = camera();
        cam.set_focused(2);
        cam.zoom(-40.0);
        cam.rotate_vertical(5.0);
        cam.set_free();
        assert_eq!(cam.mode(), CameraMode::Free);
        assert_eq!(cam.distance(), 150.0);
        assert_eq!(cam.vertical_angle(), 20.0);
        assert_eq!(cam.horizontal_angle(), 0.0);
    }

    #[test]
    fn profile_eye_lies_in_ecliptic_plane() {
        let mut cam = camera();
        cam.set_profile();
        let eye = cam.eye_position();
        assert!(eye.y.abs() < 1e-4);
        assert!((eye.length() - 150.0).abs() < 1e-3);
    }

    #[test]
    fn focused_view_centers_target() {
        let mut cam = camera();
        cam.set_focused(1);
        cam.set_distance(2.0);
        let target = Vec3::new(10.0, 0.0, -4.0);
        cam.update_view_matrix(target);

        let in_eye_space = cam.view_matrix().transform_point3(target);
        assert!(in_eye_space.abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), 1e-4));
        // Positive elevation places the camera above the target
        assert!(cam.eye_position().y > target.y);
        assert!((cam.eye_position().distance(target) - 2.0).abs() < 1e-4);
    }

    #[test]
    fn focused_on_origin_matches_free_view() {
        let mut free = camera();
        free.rotate_vertical(-5.0);
        free.rotate_horizontal(35.0);
        free.update_view_matrix(Vec3::ZERO);

        let mut focused = camera();
        focused.set_focused(0);
        focused.rotate_horizontal(35.0);
        focused.set_distance(free.distance());
        focused.update_view_matrix(Vec3::ZERO);

        assert!(focused.view_matrix().abs_diff_eq(free.view_matrix(), 1e-3));
        assert!(focused.eye_position().abs_diff_eq(free.eye_position(), 1e-3));
    }

    #[test]
    fn focused_straight_down_is_well_defined() {
        let mut cam = camera();
        cam.set_focused(0);
        cam.rotate_vertical(75.0);
        cam.update_view_matrix(Vec3::ZERO);
        assert!(!cam.view_matrix().is_nan());
    }

    #[test]
    fn free_view_ignores_target() {
        let mut cam = camera();
        cam.update_view_matrix(Vec3::ZERO);
        let view = cam.view_matrix();
        cam.update_view_matrix(Vec3::new(100.0, 5.0, 3.0));
        assert_eq!(cam.view_matrix(), view);
    }
}
