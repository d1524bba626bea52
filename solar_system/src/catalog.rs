//! Table of the sun, planets and moons
//!
//! Values from the NASA planetary and satellite fact sheets. Negative rotation
//! or revolution periods mean retrograde motion.

use crate::body::ShaderKind;
use crate::descriptor::{BodyDescriptor, BodyKind, RingGeometry};
use crate::units::CompressionRange;

/// One row of the catalog
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub kind: BodyKind,
    /// Name of the body this one orbits, `None` for the star and planets
    pub parent: Option<&'static str>,
    pub rotation_period_hours: f32,
    pub diameter_km: f32,
    pub orbital_distance_km: f32,
    pub orbit_inclination_deg: f32,
    pub axial_tilt_deg: f32,
    pub revolution_period_days: f32,
    pub ring: Option<RingGeometry>,
    /// Base colour for procedural textures and the HUD
    pub color: [f32; 3],
    pub shader: ShaderKind,
    pub textures: &'static [&'static str],
    pub ring_texture: Option<&'static str>,
}

impl CatalogEntry {
    pub fn descriptor(&self) -> BodyDescriptor {
        BodyDescriptor::new(
            self.kind,
            self.rotation_period_hours,
            self.diameter_km,
            self.orbital_distance_km,
            self.orbit_inclination_deg,
            self.axial_tilt_deg,
            self.revolution_period_days,
            self.ring,
        )
        .with_compression(compression_range())
    }
}

const fn planet(
    name: &'static str,
    rotation_period_hours: f32,
    diameter_km: f32,
    orbital_distance_km: f32,
    orbit_inclination_deg: f32,
    axial_tilt_deg: f32,
    revolution_period_days: f32,
    color: [f32; 3],
    textures: &'static [&'static str],
) -> CatalogEntry {
    CatalogEntry {
        name,
        kind: BodyKind::Planet,
        parent: None,
        rotation_period_hours,
        diameter_km,
        orbital_distance_km,
        orbit_inclination_deg,
        axial_tilt_deg,
        revolution_period_days,
        ring: None,
        color,
        shader: ShaderKind::Textured,
        textures,
        ring_texture: None,
    }
}

const fn moon(
    name: &'static str,
    parent: &'static str,
    rotation_period_hours: f32,
    diameter_km: f32,
    orbital_distance_km: f32,
    orbit_inclination_deg: f32,
    revolution_period_days: f32,
    color: [f32; 3],
    textures: &'static [&'static str],
) -> CatalogEntry {
    CatalogEntry {
        name,
        kind: BodyKind::Satellite,
        parent: Some(parent),
        rotation_period_hours,
        diameter_km,
        orbital_distance_km,
        orbit_inclination_deg,
        axial_tilt_deg: 0.0,
        revolution_period_days,
        ring: None,
        color,
        shader: ShaderKind::Textured,
        textures,
        ring_texture: None,
    }
}

pub static CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Sun",
        kind: BodyKind::Star,
        parent: None,
        rotation_period_hours: 609.12,
        diameter_km: 1_392_684.0,
        orbital_distance_km: 0.0,
        orbit_inclination_deg: 0.0,
        axial_tilt_deg: 7.25,
        revolution_period_days: 0.0,
        ring: None,
        color: [1.0, 0.82, 0.35],
        shader: ShaderKind::Emissive,
        textures: &["sun"],
        ring_texture: None,
    },
    planet("Mercury", 1407.6, 4879.0, 57.9e6, 7.0, 0.034, 88.0, [0.62, 0.60, 0.58], &["mercury"]),
    planet("Venus", -5832.5, 12_104.0, 108.2e6, 3.4, 177.4, 224.7, [0.90, 0.76, 0.52], &["venus"]),
    CatalogEntry {
        shader: ShaderKind::TexturedLayered,
        ..planet("Earth", 23.9, 12_756.0, 149.6e6, 0.0, 23.4, 365.2, [0.22, 0.42, 0.78], &["earth", "earth_clouds"])
    },
    planet("Mars", 24.6, 6792.0, 227.9e6, 1.8, 25.2, 687.0, [0.78, 0.40, 0.22], &["mars"]),
    planet("Jupiter", 9.9, 142_984.0, 778.5e6, 1.3, 3.1, 4331.0, [0.85, 0.74, 0.58], &["jupiter"]),
    CatalogEntry {
        ring: Some(RingGeometry {
            inner_distance_km: 74_500.0,
            thickness_km: 62_300.0,
        }),
        ring_texture: Some("saturn_ring"),
        ..planet("Saturn", 10.7, 120_536.0, 1432.0e6, 2.5, 26.7, 10_747.0, [0.90, 0.82, 0.60], &["saturn"])
    },
    CatalogEntry {
        ring: Some(RingGeometry {
            inner_distance_km: 41_800.0,
            thickness_km: 9400.0,
        }),
        ring_texture: Some("uranus_ring"),
        ..planet("Uranus", -17.2, 51_118.0, 2867.0e6, 0.8, 97.8, 30_589.0, [0.62, 0.84, 0.88], &["uranus"])
    },
    planet("Neptune", 16.1, 49_528.0, 4515.0e6, 1.8, 28.3, 59_800.0, [0.28, 0.42, 0.86], &["neptune"]),
    planet("Pluto", -153.3, 2376.0, 5906.4e6, 17.2, 122.5, 90_560.0, [0.80, 0.72, 0.62], &["pluto"]),
    // Earth
    moon("Moon", "Earth", 655.7, 3475.0, 384_400.0, 5.1, 27.3, [0.70, 0.70, 0.70], &["moon"]),
    // Mars
    moon("Phobos", "Mars", 7.65, 22.5, 9376.0, 1.08, 0.319, [0.52, 0.46, 0.40], &["phobos"]),
    moon("Deimos", "Mars", 30.3, 12.4, 23_463.0, 1.79, 1.263, [0.60, 0.55, 0.48], &["deimos"]),
    // Jupiter
    moon("Io", "Jupiter", 42.5, 3643.0, 421_700.0, 0.05, 1.769, [0.92, 0.84, 0.38], &["io"]),
    moon("Europa", "Jupiter", 85.2, 3122.0, 671_034.0, 0.47, 3.551, [0.86, 0.80, 0.70], &["europa"]),
    moon("Ganymede", "Jupiter", 171.7, 5268.0, 1_070_412.0, 0.2, 7.155, [0.62, 0.58, 0.54], &["ganymede"]),
    moon("Callisto", "Jupiter", 400.5, 4821.0, 1_882_709.0, 0.19, 16.689, [0.44, 0.40, 0.36], &["callisto"]),
    // Saturn
    moon("Mimas", "Saturn", 22.6, 396.0, 185_539.0, 1.57, 0.942, [0.74, 0.74, 0.72], &["mimas"]),
    moon("Enceladus", "Saturn", 32.9, 504.0, 237_948.0, 0.02, 1.370, [0.94, 0.95, 0.96], &["enceladus"]),
    moon("Tethys", "Saturn", 45.3, 1062.0, 294_619.0, 1.12, 1.888, [0.84, 0.84, 0.82], &["tethys"]),
    moon("Dione", "Saturn", 65.7, 1123.0, 377_396.0, 0.02, 2.737, [0.78, 0.78, 0.76], &["dione"]),
    moon("Rhea", "Saturn", 108.4, 1527.0, 527_108.0, 0.35, 4.518, [0.80, 0.78, 0.76], &["rhea"]),
    moon("Titan", "Saturn", 382.7, 5150.0, 1_221_870.0, 0.35, 15.945, [0.86, 0.64, 0.30], &["titan"]),
    // Chaotic rotation: no meaningful period
    moon("Hyperion", "Saturn", 0.0, 270.0, 1_481_010.0, 0.43, 21.277, [0.66, 0.60, 0.52], &["hyperion"]),
    moon("Iapetus", "Saturn", 1903.9, 1469.0, 3_560_820.0, 15.47, 79.32, [0.56, 0.50, 0.44], &["iapetus"]),
    // Uranus
    moon("Ariel", "Uranus", 60.5, 1158.0, 190_900.0, 0.26, 2.520, [0.72, 0.72, 0.74], &["ariel"]),
    moon("Umbriel", "Uranus", 99.5, 1169.0, 266_000.0, 0.13, 4.144, [0.46, 0.46, 0.48], &["umbriel"]),
    moon("Titania", "Uranus", 208.9, 1577.0, 435_910.0, 0.34, 8.706, [0.66, 0.62, 0.60], &["titania"]),
    moon("Oberon", "Uranus", 323.1, 1523.0, 583_520.0, 0.06, 13.463, [0.60, 0.54, 0.52], &["oberon"]),
    moon("Miranda", "Uranus", 33.9, 472.0, 129_390.0, 4.23, 1.413, [0.70, 0.70, 0.70], &["miranda"]),
    // Neptune
    moon("Triton", "Neptune", -141.0, 2707.0, 354_759.0, 156.9, -5.877, [0.82, 0.76, 0.74], &["triton"]),
    moon("Nereid", "Neptune", 11.5, 340.0, 5_513_818.0, 7.09, 360.1, [0.58, 0.58, 0.58], &["nereid"]),
    // Pluto
    moon("Charon", "Pluto", 153.3, 1212.0, 19_591.0, 0.0, 6.387, [0.56, 0.54, 0.52], &["charon"]),
];

/// Look up a body by name, ignoring ASCII case
pub fn entry(name: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.name.eq_ignore_ascii_case(name))
}

/// The star and the planets, in catalog order
pub fn primaries() -> impl Iterator<Item = &'static CatalogEntry> {
    CATALOG.iter().filter(|e| e.kind != BodyKind::Satellite)
}

/// Moons orbiting the named body, in catalog order
pub fn satellites_of<'a>(parent: &'a str) -> impl Iterator<Item = &'static CatalogEntry> + 'a {
    CATALOG
        .iter()
        .filter(move |e| e.kind == BodyKind::Satellite && e.parent == Some(parent))
}

/// Compressed-view range spanning the innermost to the outermost planet
pub fn compression_range() -> CompressionRange {
    let mut near = f32::MAX;
    let mut far = f32::MIN;
    for e in CATALOG.iter().filter(|e| e.kind == BodyKind::Planet) {
        near = near.min(e.orbital_distance_km);
        far = far.max(e.orbital_distance_km);
    }
    CompressionRange {
        real_near_km: near,
        real_far_km: far,
        ..CompressionRange::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::DistanceMode;

    #[test]
    fn primaries_start_with_the_sun() {
        let names: Vec<_> = primaries().map(|e| e.name).collect();
        assert_eq!(
            names,
            ["Sun", "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune", "Pluto"]
        );
    }

    #[test]
    fn every_moon_has_a_primary_parent() {
        let mut count = 0;
        for e in CATALOG.iter().filter(|e| e.kind == BodyKind::Satellite) {
            let parent = e.parent.and_then(entry).expect("moon without parent");
            assert_eq!(parent.kind, BodyKind::Planet, "{} orbits a non-planet", e.name);
            count += 1;
        }
        assert_eq!(count, 23);
        assert_eq!(satellites_of("Saturn").count(), 8);
        assert_eq!(satellites_of("Venus").count(), 0);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(entry("jUpItEr").map(|e| e.name), Some("Jupiter"));
        assert!(entry("Vulcan").is_none());
    }

    #[test]
    fn default_range_matches_catalog() {
        assert_eq!(compression_range(), CompressionRange::default());
    }

    #[test]
    fn moons_clear_their_parent() {
        for e in CATALOG.iter().filter(|e| e.kind == BodyKind::Satellite) {
            let parent = e.parent.and_then(entry).unwrap().descriptor();
            let moon = e.descriptor();
            let mut clearance = parent.diameter_units() / 2.0;
            if let Some(ring) = parent.ring() {
                clearance = clearance.max(ring.inner_radius_units() + ring.thickness_units());
            }
            assert!(
                moon.distance_units(DistanceMode::TrueScale) > clearance + moon.diameter_units() / 2.0,
                "{} intersects {}",
                e.name,
                e.parent.unwrap_or("?")
            );
        }
    }

    #[test]
    fn ringed_planets() {
        let ringed: Vec<_> = CATALOG.iter().filter(|e| e.ring.is_some()).map(|e| e.name).collect();
        assert_eq!(ringed, ["Saturn", "Uranus"]);
        for e in CATALOG.iter().filter(|e| e.ring.is_some()) {
            assert!(e.ring_texture.is_some());
        }
    }
}
