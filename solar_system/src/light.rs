//! Point light at the sun and the shared surface material

use glam::Vec3;

/// Light intensity while distances are shown at true scale
pub const TRUE_SCALE_INTENSITY: f32 = 30.0;

/// Light intensity in the compressed view, where planets sit much closer to the sun
pub const COMPRESSED_INTENSITY: f32 = 7.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// World-space position
    pub position: Vec3,
    pub intensity: f32,
    pub ambient: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            intensity: COMPRESSED_INTENSITY,
            ambient: 0.06,
        }
    }
}

impl Light {
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.max(0.0);
    }
}

/// Phong coefficients shared by every lit body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Vec3::ONE,
            specular: Vec3::new(1.0, 0.3, 0.8),
            shininess: 32.0,
        }
    }
}
