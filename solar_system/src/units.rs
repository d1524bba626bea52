//! Unit scales mapping real-world km, hours and days onto scene units

/// 1 size unit = 139 822 km (Jupiter's diameter)
pub const SIZE_UNIT_KM: f32 = 139_822.0;

/// 1 time unit = 6 hours
pub const ROTATION_UNIT_HOURS: f32 = 6.0;

/// 1 distance unit = 5 000 000 km for true-scale orbits
pub const DISTANCE_UNIT_KM: f32 = 5_000_000.0;

/// Added to every moon's orbital radius so it clears its parent's sphere and rings
pub const SATELLITE_OFFSET_KM: f32 = 1_000_000.0;

/// 1 distance unit = 1 000 000 km for moon orbits
pub const SATELLITE_DISTANCE_UNIT_KM: f32 = 1_000_000.0;

pub const HOURS_PER_DAY: f32 = 24.0;

/// Orbital distance of the innermost planet (Mercury)
pub const NEAREST_ORBIT_KM: f32 = 57.9e6;

/// Orbital distance of the outermost body (Pluto)
pub const FARTHEST_ORBIT_KM: f32 = 5906.4e6;

pub fn hours_to_units(hours: f32) -> f32 {
    hours / ROTATION_UNIT_HOURS
}

pub fn days_to_units(days: f32) -> f32 {
    days * (HOURS_PER_DAY / ROTATION_UNIT_HOURS)
}

pub fn size_to_units(km: f32) -> f32 {
    km / SIZE_UNIT_KM
}

pub fn distance_to_units(km: f32) -> f32 {
    km / DISTANCE_UNIT_KM
}

pub fn satellite_distance_to_units(km: f32) -> f32 {
    (km + SATELLITE_OFFSET_KM) / SATELLITE_DISTANCE_UNIT_KM
}

/// How planet orbital distances are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMode {
    /// Distances proportional to the real ones
    TrueScale,
    /// Distances linearly remapped into a short visual range so inner planets stay legible
    #[default]
    Compressed,
}

impl DistanceMode {
    pub fn toggled(self) -> Self {
        match self {
            DistanceMode::TrueScale => DistanceMode::Compressed,
            DistanceMode::Compressed => DistanceMode::TrueScale,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DistanceMode::TrueScale => "True scale",
            DistanceMode::Compressed => "Compressed",
        }
    }
}

/// Linear map from a real distance range (km) onto a visual range (scene units)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionRange {
    pub real_near_km: f32,
    pub real_far_km: f32,
    pub visual_near: f32,
    pub visual_far: f32,
}

impl Default for CompressionRange {
    fn default() -> Self {
        Self {
            real_near_km: NEAREST_ORBIT_KM,
            real_far_km: FARTHEST_ORBIT_KM,
            visual_near: 12.0,
            visual_far: 120.0,
        }
    }
}

impl CompressionRange {
    pub fn remap(&self, km: f32) -> f32 {
        let span = self.real_far_km - self.real_near_km;
        if span.abs() <= f32::EPSILON {
            return self.visual_near;
        }
        let fraction = (km - self.real_near_km) / span;
        self.visual_near + fraction * (self.visual_far - self.visual_near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_conversions() {
        assert_eq!(hours_to_units(24.0), 4.0);
        assert_eq!(days_to_units(1.0), 4.0);
        assert_eq!(size_to_units(SIZE_UNIT_KM), 1.0);
        assert_eq!(distance_to_units(10_000_000.0), 2.0);
        assert_eq!(satellite_distance_to_units(0.0), 1.0);
    }

    #[test]
    fn remap_hits_range_ends() {
        let range = CompressionRange::default();
        assert!((range.remap(NEAREST_ORBIT_KM) - 12.0).abs() < 1e-4);
        assert!((range.remap(FARTHEST_ORBIT_KM) - 120.0).abs() < 1e-3);

        let mid = (NEAREST_ORBIT_KM + FARTHEST_ORBIT_KM) / 2.0;
        assert!((range.remap(mid) - 66.0).abs() < 1e-2);
    }

    #[test]
    fn remap_degenerate_range() {
        let range = CompressionRange {
            real_near_km: 10.0,
            real_far_km: 10.0,
            visual_near: 3.0,
            visual_far: 9.0,
        };
        assert_eq!(range.remap(10.0), 3.0);
    }

    #[test]
    fn toggling_twice_is_identity() {
        for mode in [DistanceMode::TrueScale, DistanceMode::Compressed] {
            assert_eq!(mode.toggled().toggled(), mode);
            assert_ne!(mode.toggled(), mode);
        }
    }
}
