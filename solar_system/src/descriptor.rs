//! Immutable physical and orbital parameters of a celestial body

use crate::units::{self, CompressionRange, DistanceMode};

/// Role of a body in the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Central star, fixed at the origin
    Star,
    /// Orbits the star
    Planet,
    /// Orbits a planet
    Satellite,
}

/// Ring geometry in km, measured from the planet's center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub inner_distance_km: f32,
    pub thickness_km: f32,
}

impl RingGeometry {
    /// Inner edge radius in scene units
    pub fn inner_radius_units(&self) -> f32 {
        units::size_to_units(self.inner_distance_km)
    }

    /// Radial width in scene units
    pub fn thickness_units(&self) -> f32 {
        units::size_to_units(self.thickness_km)
    }

    /// Radius of the middle of the ring
    pub fn mid_radius_units(&self) -> f32 {
        self.inner_radius_units() + self.thickness_units() / 2.0
    }
}

/// Raw real-world numbers of a body plus the scene-unit values derived from them.
///
/// Derived fields are computed once in [`BodyDescriptor::new`]. The displayed
/// orbital distance is selected per call by a [`DistanceMode`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDescriptor {
    kind: BodyKind,
    rotation_period_hours: f32,
    diameter_km: f32,
    orbital_distance_km: f32,
    orbit_inclination_deg: f32,
    axial_tilt_deg: f32,
    revolution_period_days: f32,
    ring: Option<RingGeometry>,

    rotation_period_units: f32,
    diameter_units: f32,
    revolution_period_units: f32,
    compression: CompressionRange,
}

impl BodyDescriptor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: BodyKind,
        rotation_period_hours: f32,
        diameter_km: f32,
        orbital_distance_km: f32,
        orbit_inclination_deg: f32,
        axial_tilt_deg: f32,
        revolution_period_days: f32,
        ring: Option<RingGeometry>,
    ) -> Self {
        Self {
            kind,
            rotation_period_hours,
            diameter_km,
            orbital_distance_km,
            orbit_inclination_deg,
            axial_tilt_deg,
            revolution_period_days,
            ring,
            rotation_period_units: units::hours_to_units(rotation_period_hours),
            diameter_units: units::size_to_units(diameter_km),
            revolution_period_units: units::days_to_units(revolution_period_days),
            compression: CompressionRange::default(),
        }
    }

    /// Use a different compressed-view range than the default Mercury..Pluto one
    pub fn with_compression(mut self, compression: CompressionRange) -> Self {
        self.compression = compression;
        self
    }

    /// Orbital radius in scene units for the given display mode.
    ///
    /// The star sits at 0 in every mode. Satellites use their own scale and
    /// ignore the mode: they are placed relative to their parent.
    pub fn distance_units(&self, mode: DistanceMode) -> f32 {
        match self.kind {
            BodyKind::Star => 0.0,
            BodyKind::Satellite => units::satellite_distance_to_units(self.orbital_distance_km),
            BodyKind::Planet => match mode {
                DistanceMode::TrueScale => units::distance_to_units(self.orbital_distance_km),
                DistanceMode::Compressed => self.compression.remap(self.orbital_distance_km),
            },
        }
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn rotation_period_hours(&self) -> f32 {
        self.rotation_period_hours
    }

    pub fn diameter_km(&self) -> f32 {
        self.diameter_km
    }

    pub fn orbital_distance_km(&self) -> f32 {
        self.orbital_distance_km
    }

    pub fn orbit_inclination_deg(&self) -> f32 {
        self.orbit_inclination_deg
    }

    pub fn axial_tilt_deg(&self) -> f32 {
        self.axial_tilt_deg
    }

    pub fn revolution_period_days(&self) -> f32 {
        self.revolution_period_days
    }

    pub fn has_ring(&self) -> bool {
        self.ring.is_some()
    }

    pub fn ring(&self) -> Option<&RingGeometry> {
        self.ring.as_ref()
    }

    pub fn rotation_period_units(&self) -> f32 {
        self.rotation_period_units
    }

    pub fn diameter_units(&self) -> f32 {
        self.diameter_units
    }

    pub fn revolution_period_units(&self) -> f32 {
        self.revolution_period_units
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earth_like() -> BodyDescriptor {
        BodyDescriptor::new(BodyKind::Planet, 24.0, 139_822.0, 150_000_000.0, 0.0, 23.4, 365.0, None)
    }

    #[test]
    fn derived_fields() {
        let body = earth_like();
        assert_eq!(body.rotation_period_units(), 4.0);
        assert_eq!(body.diameter_units(), 1.0);
        assert_eq!(body.revolution_period_units(), 1460.0);
        assert_eq!(body.distance_units(DistanceMode::TrueScale), 30.0);
        assert!(!body.has_ring());
    }

    #[test]
    fn star_stays_at_origin_in_every_mode() {
        let sun = BodyDescriptor::new(BodyKind::Star, 609.12, 1_392_684.0, 0.0, 0.0, 7.25, 0.0, None);
        assert_eq!(sun.distance_units(DistanceMode::TrueScale), 0.0);
        assert_eq!(sun.distance_units(DistanceMode::Compressed), 0.0);
        assert_eq!(sun.revolution_period_units(), 0.0);
    }

    #[test]
    fn satellites_ignore_distance_mode() {
        let moon = BodyDescriptor::new(BodyKind::Satellite, 655.7, 3475.0, 384_400.0, 5.1, 6.7, 27.3, None);
        let true_scale = moon.distance_units(DistanceMode::TrueScale);
        assert_eq!(true_scale, moon.distance_units(DistanceMode::Compressed));
        assert!((true_scale - 1.3844).abs() < 1e-4);
    }

    #[test]
    fn compressed_distance_uses_custom_range() {
        let range = CompressionRange {
            real_near_km: 0.0,
            real_far_km: 300_000_000.0,
            visual_near: 10.0,
            visual_far: 20.0,
        };
        let body = earth_like().with_compression(range);
        assert!((body.distance_units(DistanceMode::Compressed) - 15.0).abs() < 1e-4);
        assert_eq!(body.distance_units(DistanceMode::TrueScale), 30.0);
    }

    #[test]
    fn ring_geometry_in_size_units() {
        let ring = RingGeometry {
            inner_distance_km: 69_911.0,
            thickness_km: 69_911.0,
        };
        assert!((ring.inner_radius_units() - 0.5).abs() < 1e-6);
        assert!((ring.mid_radius_units() - 0.75).abs() < 1e-6);
    }
}
