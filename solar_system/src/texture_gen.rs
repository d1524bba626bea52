//! Procedural body textures
//!
//! Every texture key resolves to a catalog body and a noise pattern seeded
//! from the key, so the same key always produces the same image.

use common::graphics::create_rgba_texture;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use solar_system::catalog;
use solar_system::descriptor::BodyKind;
use solar_system::{TextureHandle, TextureSource};

const BODY_WIDTH: u32 = 256;
const BODY_HEIGHT: u32 = 128;
const RING_WIDTH: u32 = 64;
const RING_HEIGHT: u32 = 128;

/// Bodies wider than this get gas-giant bands
const GAS_GIANT_DIAMETER_KM: f32 = 40_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pattern {
    /// Bright mottled surface of a star
    Glow([f32; 3]),
    /// Horizontal cloud bands
    Banded([f32; 3]),
    /// Rocky surface with darker blotches
    Speckled([f32; 3]),
    /// White clouds on a transparent background
    Clouds,
    /// Concentric bands with gaps, radial coordinate along the rows
    Ring([f32; 3]),
}

impl Pattern {
    pub fn for_key(key: &str) -> Option<Pattern> {
        if let Some(body) = key.strip_suffix("_clouds") {
            return catalog::entry(body).map(|_| Pattern::Clouds);
        }
        if let Some(body) = key.strip_suffix("_ring") {
            return catalog::entry(body).map(|e| Pattern::Ring(e.color));
        }
        let entry = catalog::entry(key)?;
        Some(match entry.kind {
            BodyKind::Star => Pattern::Glow(entry.color),
            _ if entry.diameter_km > GAS_GIANT_DIAMETER_KM => Pattern::Banded(entry.color),
            _ => Pattern::Speckled(entry.color),
        })
    }

    pub fn size(&self) -> (u32, u32) {
        match self {
            Pattern::Ring(_) => (RING_WIDTH, RING_HEIGHT),
            _ => (BODY_WIDTH, BODY_HEIGHT),
        }
    }
}

/// Bilinear value noise on a grid that wraps horizontally
struct ValueNoise {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl ValueNoise {
    fn new(rng: &mut StdRng, width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            values: (0..width * height).map(|_| rng.gen::<f32>()).collect(),
        }
    }

    fn at(&self, x: usize, y: usize) -> f32 {
        self.values[(y.min(self.height - 1)) * self.width + x % self.width]
    }

    /// `u` and `v` in [0, 1]
    fn sample(&self, u: f32, v: f32) -> f32 {
        let x = u * self.width as f32;
        let y = v * (self.height - 1) as f32;
        let (x0, y0) = (x.floor() as usize, y.floor() as usize);
        let (fx, fy) = (x.fract(), y.fract());
        let top = self.at(x0, y0) * (1.0 - fx) + self.at(x0 + 1, y0) * fx;
        let bottom = self.at(x0, y0 + 1) * (1.0 - fx) + self.at(x0 + 1, y0 + 1) * fx;
        top * (1.0 - fy) + bottom * fy
    }
}

fn seed_for(key: &str) -> u64 {
    // FNV-1a
    key.bytes()
        .fold(0xcbf2_9ce4_8422_2325, |hash, b| (hash ^ b as u64).wrapping_mul(0x0100_0000_01b3))
}

fn to_byte(x: f32) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// RGBA8 pixels of `pattern`, row-major from the top
pub fn generate(pattern: Pattern, seed: u64) -> Vec<u8> {
    let (width, height) = pattern.size();
    let mut rng = StdRng::seed_from_u64(seed);
    let coarse = ValueNoise::new(&mut rng, 16, 8);
    let fine = ValueNoise::new(&mut rng, 64, 32);
    let bands = ValueNoise::new(&mut rng, 1, 24);

    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        let v = y as f32 / (height - 1).max(1) as f32;
        for x in 0..width {
            let u = x as f32 / width as f32;
            let grain = rng.gen_range(-0.04..0.04);
            let texel = match pattern {
                Pattern::Glow(c) => {
                    let n = 0.85 + 0.15 * fine.sample(u, v) + grain;
                    [c[0] * n + 0.1, c[1] * n + 0.05, c[2] * n, 1.0]
                }
                Pattern::Banded(c) => {
                    let band = bands.sample(0.0, v + 0.02 * coarse.sample(u, v));
                    let n = 0.7 + 0.3 * band + grain;
                    [c[0] * n, c[1] * n, c[2] * n, 1.0]
                }
                Pattern::Speckled(c) => {
                    let blotch = coarse.sample(u, v) * 0.6 + fine.sample(u, v) * 0.4;
                    let n = 0.65 + 0.45 * blotch + grain;
                    [c[0] * n, c[1] * n, c[2] * n, 1.0]
                }
                Pattern::Clouds => {
                    let density = coarse.sample(u, v) * 0.5 + fine.sample(u, v) * 0.5;
                    let alpha = ((density - 0.45) * 3.0).clamp(0.0, 0.9);
                    [1.0, 1.0, 1.0, alpha]
                }
                Pattern::Ring(c) => {
                    let band = bands.sample(0.0, v);
                    // Clear gaps between the brighter bands
                    let alpha = if band < 0.2 { 0.0 } else { 0.35 + 0.6 * band };
                    let n = 0.8 + 0.2 * band + grain;
                    [c[0] * n, c[1] * n, c[2] * n, alpha]
                }
            };
            pixels.extend(texel.iter().map(|&t| to_byte(t)));
        }
    }
    pixels
}

/// Texture loader backed by the GPU; handles index into [`ProceduralTextures::into_views`]
pub struct ProceduralTextures<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    views: Vec<wgpu::TextureView>,
}

impl<'a> ProceduralTextures<'a> {
    pub fn new(device: &'a wgpu::Device, queue: &'a wgpu::Queue) -> Self {
        Self {
            device,
            queue,
            views: Vec::new(),
        }
    }

    pub fn into_views(self) -> Vec<wgpu::TextureView> {
        self.views
    }
}

impl TextureSource for ProceduralTextures<'_> {
    fn load(&mut self, key: &str) -> TextureHandle {
        let Some(pattern) = Pattern::for_key(key) else {
            log::warn!("No texture pattern for '{}', using fallback", key);
            return TextureHandle::MISSING;
        };

        let (width, height) = pattern.size();
        let pixels = generate(pattern, seed_for(key));
        let texture = create_rgba_texture(self.device, self.queue, key, width, height, &pixels);
        self.views.push(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        log::debug!("Generated texture '{}' ({}x{})", key, width, height);
        TextureHandle(self.views.len() as u32 - 1)
    }
}
