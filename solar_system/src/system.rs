//! The ordered set of top-level bodies

use glam::Mat4;

use crate::body::{Planet, Satellite};
use crate::catalog::{self, CatalogEntry};
use crate::texture::{TextureHandle, TextureSource};
use crate::units::DistanceMode;

/// Sun and planets in catalog order, index 0 being the sun
#[derive(Debug, Clone)]
pub struct SolarSystem {
    planets: Vec<Planet>,
}

fn load_all(entry: &CatalogEntry, textures: &mut impl TextureSource) -> Vec<TextureHandle> {
    entry.textures.iter().map(|key| textures.load(key)).collect()
}

impl SolarSystem {
    /// Build every body in the catalog, resolving texture keys through `textures`
    pub fn from_catalog(textures: &mut impl TextureSource) -> Self {
        let mut planets = Vec::new();
        for entry in catalog::primaries() {
            let mut planet = Planet::new(entry.name, entry.descriptor(), load_all(entry, textures), entry.shader);
            if let Some(key) = entry.ring_texture {
                planet = planet.with_ring_textures(vec![textures.load(key)]);
            }
            for moon in catalog::satellites_of(entry.name) {
                planet.add_satellite(Satellite::new(
                    moon.name,
                    moon.descriptor(),
                    load_all(moon, textures),
                    moon.shader,
                ));
            }
            planets.push(planet);
        }

        log::info!(
            "built solar system: {} bodies, {} moons",
            planets.len(),
            planets.iter().map(|p| p.satellites().len()).sum::<usize>()
        );
        Self { planets }
    }

    pub fn update(&mut self, t: f32, mode: DistanceMode, update_satellites: bool) {
        for planet in &mut self.planets {
            planet.update_transforms(t, mode, update_satellites);
        }
    }

    pub fn set_view(&mut self, view: Mat4) {
        for planet in &mut self.planets {
            planet.set_view(view);
        }
    }

    pub fn set_projection(&mut self, projection: Mat4) {
        for planet in &mut self.planets {
            planet.set_projection(projection);
        }
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn get(&self, index: usize) -> Option<&Planet> {
        self.planets.get(index)
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Celestial;
    use crate::texture::CountingTextures;

    #[test]
    fn catalog_system_layout() {
        let mut textures = CountingTextures::default();
        let system = SolarSystem::from_catalog(&mut textures);

        assert_eq!(system.len(), 10);
        assert_eq!(system.planets()[0].name(), "Sun");
        let saturn = &system.planets()[6];
        assert_eq!(saturn.name(), "Saturn");
        assert!(saturn.ring().is_some());
        assert_eq!(saturn.satellites().len(), 8);

        let earth = &system.planets()[3];
        assert_eq!(earth.textures().len(), 2);
        assert_eq!(earth.satellites()[0].name(), "Moon");
    }

    #[test]
    fn missing_textures_do_not_abort_construction() {
        let mut textures = CountingTextures {
            missing: vec!["saturn_ring".into(), "earth_clouds".into()],
            ..Default::default()
        };
        let system = SolarSystem::from_catalog(&mut textures);

        let ring = system.planets()[6].ring().expect("saturn has a ring");
        assert!(ring.textures()[0].is_missing());
        assert!(system.planets()[3].textures()[1].is_missing());
    }

    #[test]
    fn compression_toggle_round_trip() {
        let mut system = SolarSystem::from_catalog(&mut CountingTextures::default());
        let t = 321.0;
        system.update(t, DistanceMode::Compressed, true);
        let before: Vec<_> = system.planets().iter().map(|p| p.transform().model()).collect();

        let mode = DistanceMode::Compressed.toggled();
        system.update(t, mode, true);
        system.update(t, mode.toggled(), true);
        let after: Vec<_> = system.planets().iter().map(|p| p.transform().model()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn compressed_view_keeps_planet_order() {
        let mut system = SolarSystem::from_catalog(&mut CountingTextures::default());
        system.update(0.0, DistanceMode::Compressed, false);
        let radii: Vec<f32> = system.planets().iter().map(|p| p.world_position().length()).collect();
        assert_eq!(radii[0], 0.0);
        assert!(radii.windows(2).all(|w| w[0] < w[1]));
        assert!((radii[1] - 12.0).abs() < 1e-3);
        assert!((radii[9] - 120.0).abs() < 1e-2);
    }
}
