//! Planets, their moons and rings
//!
//! Each frame a body's model matrix is rebuilt from its descriptor and the
//! simulated time: revolve around the parent, move out to the orbital radius,
//! tilt, spin, then scale to size. Moons repeat the same steps inside their
//! parent's reference frame.

use glam::{Mat4, Vec3};

use crate::descriptor::BodyDescriptor;
use crate::texture::TextureHandle;
use crate::transform::TransformState;
use crate::units::DistanceMode;

/// How a drawable is shaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    /// Lit, one texture
    Textured,
    /// Lit, base texture plus a cloud layer
    TexturedLayered,
    /// Self-illuminated, ignores the light
    Emissive,
    /// Alpha-blended ring torus
    Ring,
}

impl ShaderKind {
    pub fn is_lit(&self) -> bool {
        !matches!(self, ShaderKind::Emissive)
    }

    /// Number of texture layers the shader samples
    pub fn texture_count(&self) -> u32 {
        match self {
            ShaderKind::TexturedLayered => 2,
            _ => 1,
        }
    }
}

/// Self-rotation angle in radians after `t` time units
pub fn spin_angle(descriptor: &BodyDescriptor, t: f32) -> f32 {
    let period = descriptor.rotation_period_units();
    if period == 0.0 {
        0.0
    } else {
        t / period
    }
}

/// Revolution angle around the parent in radians after `t` time units
pub fn orbit_angle(descriptor: &BodyDescriptor, t: f32) -> f32 {
    let period = descriptor.revolution_period_units();
    if period == 0.0 {
        0.0
    } else {
        t / period
    }
}

/// Revolution then translation out to the orbital radius, inside `parent`
fn orbit_frame(parent: Mat4, descriptor: &BodyDescriptor, t: f32, mode: DistanceMode) -> Mat4 {
    parent
        * Mat4::from_rotation_y(orbit_angle(descriptor, t))
        * Mat4::from_translation(Vec3::new(0.0, 0.0, descriptor.distance_units(mode)))
}

/// Full model matrix of a body orbiting inside `parent`
pub fn model_matrix(parent: Mat4, descriptor: &BodyDescriptor, t: f32, mode: DistanceMode) -> Mat4 {
    // Undo the revolution so spin is measured against the fixed stars
    let net_spin = spin_angle(descriptor, t) - orbit_angle(descriptor, t);
    orbit_frame(parent, descriptor, t, mode)
        * Mat4::from_rotation_z(descriptor.axial_tilt_deg().to_radians())
        * Mat4::from_rotation_y(net_spin)
        * Mat4::from_scale(Vec3::splat(descriptor.diameter_units()))
}

/// Lays the torus flat in the planet's equatorial plane and cancels the planet's scale
pub fn ring_matrix(model: Mat4, descriptor: &BodyDescriptor) -> Mat4 {
    let diameter = descriptor.diameter_units();
    let unscale = if diameter > 0.0 { 1.0 / diameter } else { 1.0 };
    model * Mat4::from_rotation_x(90f32.to_radians()) * Mat4::from_scale(Vec3::splat(unscale))
}

/// Read access shared by planets and moons
pub trait Celestial {
    fn name(&self) -> &str;
    fn descriptor(&self) -> &BodyDescriptor;
    fn transform(&self) -> &TransformState;
    fn textures(&self) -> &[TextureHandle];
    fn shader(&self) -> ShaderKind;

    /// Center of the body in world space
    fn world_position(&self) -> Vec3 {
        self.transform().model().w_axis.truncate()
    }
}

/// Ring drawn around a planet
#[derive(Debug, Clone)]
pub struct Ring {
    transform: TransformState,
    textures: Vec<TextureHandle>,
}

impl Ring {
    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn textures(&self) -> &[TextureHandle] {
        &self.textures
    }
}

/// Top-level body: the sun or a planet, optionally ringed, owning its moons
#[derive(Debug, Clone)]
pub struct Planet {
    name: String,
    descriptor: BodyDescriptor,
    transform: TransformState,
    textures: Vec<TextureHandle>,
    shader: ShaderKind,
    ring: Option<Ring>,
    satellites: Vec<Satellite>,
}

impl Planet {
    pub fn new(
        name: impl Into<String>,
        descriptor: BodyDescriptor,
        textures: Vec<TextureHandle>,
        shader: ShaderKind,
    ) -> Self {
        let ring = descriptor.has_ring().then(|| Ring {
            transform: TransformState::default(),
            textures: Vec::new(),
        });
        Self {
            name: name.into(),
            descriptor,
            transform: TransformState::default(),
            textures,
            shader,
            ring,
            satellites: Vec::new(),
        }
    }

    /// Attach ring textures; ignored when the descriptor has no ring
    pub fn with_ring_textures(mut self, textures: Vec<TextureHandle>) -> Self {
        if let Some(ring) = &mut self.ring {
            ring.textures = textures;
        }
        self
    }

    pub fn add_satellite(&mut self, satellite: Satellite) {
        self.satellites.push(satellite);
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    pub fn ring(&self) -> Option<&Ring> {
        self.ring.as_ref()
    }

    /// Frame the moons orbit in: the planet's revolution and orbital offset,
    /// without its tilt, spin or scale
    pub fn reference_frame(&self, t: f32, mode: DistanceMode) -> Mat4 {
        orbit_frame(Mat4::IDENTITY, &self.descriptor, t, mode)
    }

    pub fn spin_angle(&self, t: f32) -> f32 {
        spin_angle(&self.descriptor, t)
    }

    pub fn orbit_angle(&self, t: f32) -> f32 {
        orbit_angle(&self.descriptor, t)
    }

    /// Rebuild the model matrices of this body, its ring and, when asked, its moons
    pub fn update_transforms(&mut self, t: f32, mode: DistanceMode, update_satellites: bool) {
        let model = model_matrix(Mat4::IDENTITY, &self.descriptor, t, mode);
        self.transform.set_model(model);

        if update_satellites {
            let frame = self.reference_frame(t, mode);
            for satellite in &mut self.satellites {
                satellite.update_transforms(frame, t, mode);
            }
        }

        if let Some(ring) = &mut self.ring {
            ring.transform.set_model(ring_matrix(model, &self.descriptor));
        }
    }

    /// Push the camera's view to the planet, its ring and its moons
    pub fn set_view(&mut self, view: Mat4) {
        self.transform.set_view(view);
        if let Some(ring) = &mut self.ring {
            ring.transform.set_view(view);
        }
        for satellite in &mut self.satellites {
            satellite.transform.set_view(view);
        }
    }

    pub fn set_projection(&mut self, projection: Mat4) {
        self.transform.set_projection(projection);
        if let Some(ring) = &mut self.ring {
            ring.transform.set_projection(projection);
        }
        for satellite in &mut self.satellites {
            satellite.transform.set_projection(projection);
        }
    }
}

impl Celestial for Planet {
    fn name(&self) -> &str {
        &self.name
    }

    fn descriptor(&self) -> &BodyDescriptor {
        &self.descriptor
    }

    fn transform(&self) -> &TransformState {
        &self.transform
    }

    fn textures(&self) -> &[TextureHandle] {
        &self.textures
    }

    fn shader(&self) -> ShaderKind {
        self.shader
    }
}

/// A moon. Leaf of the hierarchy: it cannot own satellites of its own.
#[derive(Debug, Clone)]
pub struct Satellite {
    name: String,
    descriptor: BodyDescriptor,
    transform: TransformState,
    textures: Vec<TextureHandle>,
    shader: ShaderKind,
}

impl Satellite {
    pub fn new(
        name: impl Into<String>,
        descriptor: BodyDescriptor,
        textures: Vec<TextureHandle>,
        shader: ShaderKind,
    ) -> Self {
        Self {
            name: name.into(),
            descriptor,
            transform: TransformState::default(),
            textures,
            shader,
        }
    }

    pub fn update_transforms(&mut self, parent_frame: Mat4, t: f32, mode: DistanceMode) {
        self.transform
            .set_model(model_matrix(parent_frame, &self.descriptor, t, mode));
    }
}

impl Celestial for Satellite {
    fn name(&self) -> &str {
        &self.name
    }

    fn descriptor(&self) -> &BodyDescriptor {
        &self.descriptor
    }

    fn transform(&self) -> &TransformState {
        &self.transform
    }

    fn textures(&self) -> &[TextureHandle] {
        &self.textures
    }

    fn shader(&self) -> ShaderKind {
        self.shader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{BodyKind, RingGeometry};

    fn sun() -> Planet {
        let descriptor = BodyDescriptor::new(BodyKind::Star, 609.12, 1_392_684.0, 0.0, 0.0, 7.25, 0.0, None);
        Planet::new("Sun", descriptor, vec![TextureHandle(0)], ShaderKind::Emissive)
    }

    fn planet(tilt_deg: f32) -> Planet {
        // 1 size unit across, 30 units out at true scale
        let descriptor =
            BodyDescriptor::new(BodyKind::Planet, 24.0, 139_822.0, 150_000_000.0, 0.0, tilt_deg, 365.0, None);
        Planet::new("Planet", descriptor, vec![TextureHandle(1)], ShaderKind::Textured)
    }

    fn moon() -> Satellite {
        // 2 units from the parent
        let descriptor = BodyDescriptor::new(BodyKind::Satellite, 600.0, 3475.0, 1_000_000.0, 5.0, 0.0, 27.0, None);
        Satellite::new("Moon", descriptor, vec![TextureHandle(2)], ShaderKind::Textured)
    }

    #[test]
    fn sun_translation_invariant_in_time() {
        let mut sun = sun();
        for mode in [DistanceMode::TrueScale, DistanceMode::Compressed] {
            for t in [0.0, 1.0, 250.0, 1.0e5] {
                sun.update_transforms(t, mode, false);
                assert!(sun.world_position().abs_diff_eq(Vec3::ZERO, 1e-6));
            }
        }
    }

    #[test]
    fn angles_non_decreasing_for_positive_periods() {
        let planet = planet(0.0);
        let mut last = (planet.spin_angle(0.0), planet.orbit_angle(0.0));
        for step in 1..100 {
            let t = step as f32 * 3.7;
            let now = (planet.spin_angle(t), planet.orbit_angle(t));
            assert!(now.0 >= last.0 && now.1 >= last.1);
            last = now;
        }
    }

    #[test]
    fn zero_periods_do_not_divide() {
        let descriptor = BodyDescriptor::new(BodyKind::Satellite, 0.0, 270.0, 1_481_010.0, 0.0, 0.0, 0.0, None);
        assert_eq!(spin_angle(&descriptor, 42.0), 0.0);
        assert_eq!(orbit_angle(&descriptor, 42.0), 0.0);
        let model = model_matrix(Mat4::IDENTITY, &descriptor, 42.0, DistanceMode::TrueScale);
        assert!(!model.is_nan());
    }

    #[test]
    fn planet_sits_at_orbital_radius() {
        let mut planet = planet(23.4);
        planet.update_transforms(0.0, DistanceMode::TrueScale, false);
        assert!(planet.world_position().abs_diff_eq(Vec3::new(0.0, 0.0, 30.0), 1e-4));

        planet.update_transforms(500.0, DistanceMode::TrueScale, false);
        assert!((planet.world_position().length() - 30.0).abs() < 1e-3);
        assert!(planet.world_position().y.abs() < 1e-4);
    }

    #[test]
    fn satellite_offset_along_parent_forward_axis() {
        let mut planet = planet(0.0);
        planet.add_satellite(moon());
        planet.update_transforms(0.0, DistanceMode::TrueScale, true);

        let offset = planet.satellites()[0].world_position() - planet.world_position();
        assert!(offset.abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-4));
    }

    #[test]
    fn satellite_ignores_parent_tilt_and_follows_it() {
        let mut planet = planet(60.0);
        planet.add_satellite(moon());
        for t in [3.0, 77.0, 1234.0] {
            planet.update_transforms(t, DistanceMode::Compressed, true);
            let offset = planet.satellites()[0].world_position() - planet.world_position();
            assert!((offset.length() - 2.0).abs() < 1e-3);
            assert!(offset.y.abs() < 1e-4);
        }
    }

    #[test]
    fn satellites_frozen_unless_requested() {
        let mut planet = planet(0.0);
        planet.add_satellite(moon());
        planet.update_transforms(0.0, DistanceMode::TrueScale, true);
        let before = planet.satellites()[0].transform().model();

        planet.update_transforms(100.0, DistanceMode::TrueScale, false);
        assert_eq!(planet.satellites()[0].transform().model(), before);
    }

    #[test]
    fn tidally_locked_body_has_no_net_spin() {
        // Equal rotation and revolution periods
        let descriptor = BodyDescriptor::new(BodyKind::Satellite, 24.0, 139_822.0, 0.0, 0.0, 0.0, 1.0, None);
        let model = model_matrix(Mat4::IDENTITY, &descriptor, 2.5, DistanceMode::TrueScale);
        let expected = Mat4::from_rotation_y(orbit_angle(&descriptor, 2.5)) * Mat4::from_translation(Vec3::Z);
        assert!(model.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn ring_lies_in_equatorial_plane() {
        let descriptor = BodyDescriptor::new(
            BodyKind::Planet,
            10.7,
            120_536.0,
            1432.0e6,
            2.5,
            26.7,
            10_747.0,
            Some(RingGeometry {
                inner_distance_km: 74_500.0,
                thickness_km: 62_300.0,
            }),
        );
        let mut saturn = Planet::new("Saturn", descriptor, vec![], ShaderKind::Textured)
            .with_ring_textures(vec![TextureHandle(7)]);
        saturn.update_transforms(40.0, DistanceMode::Compressed, false);

        let ring = saturn.ring().expect("ringed descriptor");
        assert_eq!(ring.textures(), &[TextureHandle(7)]);

        let planet_model = saturn.transform().model();
        let ring_model = ring.transform().model();
        assert!(ring_model.w_axis.abs_diff_eq(planet_model.w_axis, 1e-4));
        // Unit scale: the torus is built in scene units
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            assert!((ring_model.transform_vector3(axis).length() - 1.0).abs() < 1e-4);
        }
        // Torus normal maps onto the planet's (tilted) pole axis
        let ring_normal = ring_model.transform_vector3(Vec3::Z).normalize();
        let pole = planet_model.transform_vector3(Vec3::Y).normalize();
        assert!(ring_normal.abs_diff_eq(-pole, 1e-4));
    }

    #[test]
    fn unringed_planet_ignores_ring_textures() {
        let planet = planet(0.0).with_ring_textures(vec![TextureHandle(3)]);
        assert!(planet.ring().is_none());
    }

    #[test]
    fn distance_mode_switch_without_rebuild() {
        let mut planet = planet(0.0);
        planet.update_transforms(10.0, DistanceMode::TrueScale, false);
        let true_scale = planet.world_position();

        planet.update_transforms(10.0, DistanceMode::Compressed, false);
        assert!(!planet.world_position().abs_diff_eq(true_scale, 1e-3));

        planet.update_transforms(10.0, DistanceMode::TrueScale, false);
        assert_eq!(planet.world_position(), true_scale);
    }

    #[test]
    fn view_and_projection_reach_every_drawable() {
        let mut planet = planet(0.0);
        planet.add_satellite(moon());
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -50.0));
        let projection = Mat4::perspective_rh(1.0, 1.0, 0.1, 100.0);
        planet.set_view(view);
        planet.set_projection(projection);

        let satellite = &planet.satellites()[0];
        assert_eq!(satellite.transform().view(), view);
        assert_eq!(satellite.transform().projection(), projection);
        assert_eq!(planet.transform().view(), view);
    }
}
