//! Closed-form geometry of the rounded box.
//!
//! - `primitives` holds the aligned box and the sphere
//! - `bezier` evaluates the rational quartic triangle patch of a sphere octant
//! - `mesh` tessellates the feature meshes on the CPU
//! - `rounded_box` places the 26 vertex/edge/face features around the box
//!
//! Nothing in here touches the GPU, so all of it is covered by plain tests.

pub mod bezier;
pub mod mesh;
pub mod primitives;
pub mod rounded_box;
