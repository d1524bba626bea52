//! Solar System
//!
//! Core of the interactive solar system viewer:
//!
//! - **Units**: km/hour/day scales and the compressed-distance remap
//! - **Descriptors & catalog**: physical and orbital numbers of the sun, planets and moons
//! - **Bodies**: per-frame model matrices from orbit, spin, tilt and size, propagated to satellites
//! - **Scene**: camera, light, speed and selection driven by discrete user actions
//!
//! Window, GPU and texture plumbing live in the binary and the `common` crate.

pub mod units;
pub mod descriptor;
pub mod catalog;
pub mod transform;
pub mod texture;
pub mod light;
pub mod body;
pub mod system;
pub mod scene;

pub use body::{Celestial, Planet, Satellite, ShaderKind};
pub use descriptor::{BodyDescriptor, BodyKind, RingGeometry};
pub use scene::{Scene, SceneSettings};
pub use system::SolarSystem;
pub use texture::{TextureHandle, TextureSource};
pub use units::DistanceMode;
