//! The rounded box scene.
//!
//! The box and its 26 features are drawn as four instanced visuals: the box
//! itself, 8 sphere octants, 12 quarter cylinders and 6 rectangles. All of
//! them hang off one root transform that the trackball rotates.

use cgmath::{One, Quaternion};
use wgpu::util::DeviceExt;
use winit::{
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::Key,
};

use crate::{
    config::SceneConfig,
    context::{Context, InitContext},
    data_structures::{
        instance::{Instance, InstanceRaw},
        model::Mesh,
    },
    flow::{FlowConstructor, FlowFuture, GraphicsFlow, Out},
    geometry::{
        mesh::{self, MeshData},
        primitives::{AlignedBox3, Sphere3},
        rounded_box::{Feature, RoundedBox},
    },
    render::{Instanced, Render},
};

/// One shared mesh drawn once per local transform.
#[derive(Debug)]
pub struct FeatureVisual {
    pub mesh: Mesh,
    pub locals: Vec<Instance>,
    pub instance_buffer: wgpu::Buffer,
}

impl FeatureVisual {
    pub fn new(device: &wgpu::Device, name: &str, data: &MeshData, locals: Vec<Instance>) -> Self {
        let raw: Vec<InstanceRaw> = locals.iter().map(Instance::to_raw).collect();
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Instance Buffer", name)),
            contents: bytemuck::cast_slice(&raw),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            mesh: Mesh::from_mesh_data(device, name, data),
            locals,
            instance_buffer,
        }
    }

    /// Uploads `root * local` for every instance.
    pub fn write_world(&self, queue: &wgpu::Queue, root: &Instance) {
        let raw: Vec<InstanceRaw> = self
            .locals
            .iter()
            .map(|local| (root * local).to_raw())
            .collect();
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&raw));
    }

    pub fn instanced(&self) -> Instanced<'_> {
        Instanced {
            instance: &self.instance_buffer,
            mesh: &self.mesh,
            amount: self.locals.len(),
        }
    }
}

fn locals(features: &[Feature]) -> Vec<Instance> {
    features.iter().map(Instance::from).collect()
}

#[derive(Debug)]
pub struct MovingSphereBox {
    pub rounded_box: RoundedBox,
    box_visual: FeatureVisual,
    vertex_visual: FeatureVisual,
    edge_visual: FeatureVisual,
    face_visual: FeatureVisual,
    applied_rotation: Quaternion<f32>,
}

impl MovingSphereBox {
    pub fn new(device: &wgpu::Device, scene: &SceneConfig) -> anyhow::Result<Self> {
        let aligned_box = AlignedBox3::from_extents(scene.box_extents);
        let sphere = Sphere3::new(cgmath::Vector3::new(0.0, 0.0, 0.0), scene.sphere_radius);
        let rounded_box = RoundedBox::new(aligned_box, sphere, scene.alpha);

        let extents = aligned_box.extents();
        let box_instance = Instance {
            position: aligned_box.center(),
            ..Default::default()
        }
        .with_color(rounded_box.box_color());
        let box_visual = FeatureVisual::new(
            device,
            "box",
            &mesh::box_mesh(extents.x, extents.y, extents.z),
            vec![box_instance],
        );

        let vertex_visual = FeatureVisual::new(
            device,
            "vertex",
            &mesh::sphere_octant(scene.density, sphere.radius)?,
            locals(&rounded_box.vertices),
        );
        let edge_visual = FeatureVisual::new(
            device,
            "edge",
            &mesh::quarter_cylinder(scene.density, sphere.radius)?,
            locals(&rounded_box.edges),
        );
        let face_visual = FeatureVisual::new(
            device,
            "face",
            &mesh::rectangle(scene.density, scene.density, 1.0, 1.0)?,
            locals(&rounded_box.faces),
        );

        log::info!(
            "rounded box built: extents {:?}, radius {}, density {}",
            scene.box_extents,
            scene.sphere_radius,
            scene.density
        );

        Ok(Self {
            rounded_box,
            box_visual,
            vertex_visual,
            edge_visual,
            face_visual,
            applied_rotation: Quaternion::one(),
        })
    }

    pub fn constructor(scene: SceneConfig) -> FlowConstructor {
        Box::new(move |init: InitContext| -> FlowFuture {
            Box::pin(async move {
                let flow = MovingSphereBox::new(&init.device, &scene)?;
                anyhow::Ok(Box::new(flow) as Box<dyn GraphicsFlow>)
            })
        })
    }

    /// Visuals in draw order.
    pub fn visuals(&self) -> [&FeatureVisual; 4] {
        [
            &self.box_visual,
            &self.vertex_visual,
            &self.edge_visual,
            &self.face_visual,
        ]
    }
}

/// `w` or `W` pressed. Auto-repeated presses toggle again.
pub fn is_cull_toggle_key(key: &Key, state: ElementState) -> bool {
    state == ElementState::Pressed
        && matches!(key, Key::Character(c) if c.eq_ignore_ascii_case("w"))
}

impl GraphicsFlow for MovingSphereBox {
    fn on_init(&mut self, _ctx: &mut Context) -> Out {
        Out::Empty
    }

    fn on_update(&mut self, ctx: &Context, _dt: instant::Duration) -> Out {
        let rotation = ctx.trackball.rotation();
        if rotation != self.applied_rotation {
            let root = Instance::from_rotation(rotation);
            self.visuals()
                .iter()
                .for_each(|visual| visual.write_world(&ctx.queue, &root));
            self.applied_rotation = rotation;
        }
        Out::Empty
    }

    fn on_window_events(&mut self, _ctx: &Context, event: &WindowEvent) -> Out {
        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent { logical_key, state, .. },
                ..
            } if is_cull_toggle_key(logical_key, *state) => {
                Out::Configure(Box::new(|ctx: &mut Context| ctx.toggle_cull_mode()))
            }
            _ => Out::Empty,
        }
    }

    fn on_render(&self) -> Render<'_> {
        // box first, features blended over it
        Render::Composed(vec![
            Render::Transparent(self.box_visual.instanced()),
            Render::Transparents(
                [&self.vertex_visual, &self.edge_visual, &self.face_visual]
                    .into_iter()
                    .map(FeatureVisual::instanced)
                    .collect(),
            ),
        ])
    }
}
