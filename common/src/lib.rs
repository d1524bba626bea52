//! Common utilities for the solar system viewer
//!
//! This crate provides the graphics setup, the orbit camera state machine and the
//! sphere/torus mesh generation shared by the viewer binary.

pub mod graphics;
pub mod camera;
pub mod mesh;

pub use graphics::*;
pub use camera::*;
pub use mesh::*;
