//! Render composition.
//!
//! Flows describe what they want drawn as a [`Render`] tree. The frame loop
//! flattens the tree into one list of [`Instanced`] draws and submits them in
//! the order they were given.
//!
//! # Key types
//!
//! - [`Render<'a>`] is the enum describing render operations
//! - [`Instanced<'a>`] is one mesh drawn once per entry of an instance buffer

use crate::data_structures::model::Mesh;

/// A mesh plus the per-instance buffer it is drawn with.
pub struct Instanced<'a> {
    pub instance: &'a wgpu::Buffer,
    pub mesh: &'a Mesh,
    pub amount: usize,
}

/// Specifies how a flow's objects should be rendered.
///
/// # Variants
///
/// - `None` renders nothing
/// - `Transparent(Instanced)` renders a single alpha-blended instanced mesh
/// - `Transparents(Vec<Instanced>)` renders a batch of them in order
/// - `Composed(Vec<Render>)` recursively renders a composition of renders in order
pub enum Render<'a> {
    None,
    Transparent(Instanced<'a>),
    Transparents(Vec<Instanced<'a>>),
    Composed(Vec<Render<'a>>),
}

impl<'a> Render<'a> {
    /// Appends the draws of this tree to `trans`, depth first.
    pub fn set_pipelines(self, trans: &mut Vec<Instanced<'a>>) {
        match self {
            Render::Transparent(instanced) => trans.push(instanced),
            Render::Transparents(mut vec) => trans.append(&mut vec),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.set_pipelines(trans)),
            Render::None => (),
        }
    }

    /// Number of draw calls the tree expands to.
    pub fn draw_count(&self) -> usize {
        match self {
            Render::None => 0,
            Render::Transparent(_) => 1,
            Render::Transparents(vec) => vec.len(),
            Render::Composed(renders) => renders.iter().map(Render::draw_count).sum(),
        }
    }
}
