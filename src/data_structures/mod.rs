//! Engine data structures: meshes, instances and textures.
//!
//! - `model` holds the position-only vertex format and GPU meshes
//! - `texture` wraps the depth buffer
//! - `instance` holds per-instance transformation and colour data

pub mod instance;
pub mod model;
pub mod texture;
