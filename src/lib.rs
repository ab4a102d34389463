//! moving-sphere-box
//!
//! Interactive visualization of a rounded box, the set of points within a
//! sphere radius of an axis-aligned box. The corners are sphere octants
//! evaluated from a rational quartic Bezier triangle, the edges are quarter
//! cylinders and the faces are rectangles pushed out by the radius. Everything
//! is drawn semi-transparently with one instanced draw per feature group.
//!
//! High-level modules
//! - `geometry`: closed-form box, sphere, Bezier patch and feature placement (no GPU)
//! - `camera`: camera, projection, key-driven rig and trackball
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: meshes, instances and the depth texture
//! - `flow`: flow trait, application handler and frame loop
//! - `pipelines`: the constant-colour scene pipelines and the overlay pipeline
//! - `render`: render composition collected from flows
//! - `scene`: the rounded box flow
//! - `overlay` and `timer`: the frame rate counter
//! - `config` and `logging`: start-up configuration
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod geometry;
pub mod logging;
pub mod overlay;
pub mod pipelines;
pub mod render;
pub mod scene;
pub mod timer;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use winit::event::WindowEvent;
