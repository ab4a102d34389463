//! Render pipelines.
//!
//! - `constant_color` draws the instanced feature meshes, once with and once without back-face culling
//! - `overlay` draws screen-space quads on top of the scene

pub mod constant_color;
pub mod overlay;
