//! Sphere and torus vertex generation
//!
//! Both shapes are emitted as non-indexed triangle lists.

use std::f32::consts::PI;

/// Vertex with position, normal and texture coordinates
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShapeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl ShapeVertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<ShapeVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };
}

/// UV sphere centered on the origin.
///
/// `stacks` slices along the Y axis, `slices` around it.
pub fn build_sphere(radius: f32, slices: u32, stacks: u32) -> Vec<ShapeVertex> {
    let slices = slices.max(3);
    let stacks = stacks.max(2);

    let mut grid = Vec::with_capacity(((slices + 1) * (stacks + 1)) as usize);
    for j in 0..=stacks {
        let v = j as f32 / stacks as f32;
        let phi = PI * v;
        for i in 0..=slices {
            let u = i as f32 / slices as f32;
            let theta = 2.0 * PI * u;
            let normal = [phi.sin() * theta.sin(), phi.cos(), phi.sin() * theta.cos()];
            grid.push(ShapeVertex {
                position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                normal,
                tex_coords: [u, v],
            });
        }
    }

    let row = slices + 1;
    let mut vertices = Vec::with_capacity((slices * stacks * 6) as usize);
    for j in 0..stacks {
        for i in 0..slices {
            let a = grid[(j * row + i) as usize];
            let b = grid[(j * row + i + 1) as usize];
            let c = grid[((j + 1) * row + i) as usize];
            let d = grid[((j + 1) * row + i + 1) as usize];
            vertices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    vertices
}

/// Torus lying in the XY plane, flattened along Z like a planetary ring.
///
/// `major_radius` is the distance from the center to the middle of the tube,
/// `tube_radius` half the ring's radial width.
pub fn build_torus(major_radius: f32, tube_radius: f32, segments: u32, sides: u32) -> Vec<ShapeVertex> {
    const FLATTENING: f32 = 0.1;

    let segments = segments.max(3);
    let sides = sides.max(3);

    let point = |i: u32, j: u32| {
        let u = 2.0 * PI * i as f32 / segments as f32;
        let v = 2.0 * PI * j as f32 / sides as f32;
        let ring = major_radius + tube_radius * v.cos();
        let normal = glam::Vec3::new(v.cos() * u.cos(), v.cos() * u.sin(), v.sin()).normalize_or_zero();
        ShapeVertex {
            position: [ring * u.cos(), ring * u.sin(), tube_radius * FLATTENING * v.sin()],
            normal: normal.to_array(),
            // Radial texture coordinate: 0 at the inner edge, 1 at the outer edge
            tex_coords: [
                i as f32 / segments as f32,
                (ring - (major_radius - tube_radius)) / (2.0 * tube_radius).max(f32::EPSILON),
            ],
        }
    };

    let mut vertices = Vec::with_capacity((segments * sides * 6) as usize);
    for i in 0..segments {
        for j in 0..sides {
            let a = point(i, j);
            let b = point(i + 1, j);
            let c = point(i, j + 1);
            let d = point(i + 1, j + 1);
            vertices.extend_from_slice(&[a, b, c, c, b, d]);
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let sphere = build_sphere(0.5, 16, 8);
        assert_eq!(sphere.len(), 16 * 8 * 6);
        for vertex in &sphere {
            let p = glam::Vec3::from(vertex.position);
            assert!((p.length() - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn torus_stays_within_ring_bounds() {
        let torus = build_torus(1.0, 0.25, 32, 8);
        assert_eq!(torus.len(), 32 * 8 * 6);
        for vertex in &torus {
            let p = glam::Vec3::from(vertex.position);
            let radial = (p.x * p.x + p.y * p.y).sqrt();
            assert!(radial >= 0.75 - 1e-5 && radial <= 1.25 + 1e-5);
            assert!(p.z.abs() <= 0.025 + 1e-6);
            assert!((-1e-5..=1.0 + 1e-5).contains(&vertex.tex_coords[1]));
        }
    }
}
