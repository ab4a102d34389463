#![cfg(feature = "integration-tests")]

use std::time::Duration;

use cgmath::{Deg, Point3, Vector3};
use moving_sphere_box::{
    camera::{Camera, CameraResources, CameraRig, Projection},
    config::SceneConfig,
    context::CullMode,
    data_structures::{model::DrawMesh, texture::Texture},
    flow::GraphicsFlow,
    overlay::layout_text,
    pipelines::{constant_color::ConstantColorPipelines, overlay::OverlayRenderer},
    render::{Instanced, Render},
    scene::MovingSphereBox,
};

use crate::common::test_utils::headless_device;

mod common;

const SIZE: u32 = 128;
const BYTES_PER_PIXEL: u32 = 4;

fn offscreen_config() -> wgpu::SurfaceConfiguration {
    wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: wgpu::TextureFormat::Rgba8Unorm,
        width: SIZE,
        height: SIZE,
        present_mode: wgpu::PresentMode::Fifo,
        desired_maximum_frame_latency: 2,
        alpha_mode: wgpu::CompositeAlphaMode::Auto,
        view_formats: vec![],
    }
}

fn demo_camera(device: &wgpu::Device, queue: &wgpu::Queue) -> CameraResources {
    let projection = Projection::new(SIZE, SIZE, Deg(60.0), 0.1, 100.0);
    let camera = Camera::new(
        Point3::new(24.0, 0.0, 0.0),
        Vector3::new(-1.0, 0.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
    );
    let mut camera = CameraResources::new(device, camera, CameraRig::new(6.0, 0.6), &projection);
    camera.write_uniform(queue, &projection);
    camera
}

fn mesh_names(tree: Render<'_>) -> Vec<String> {
    let mut flat: Vec<Instanced> = Vec::new();
    tree.set_pipelines(&mut flat);
    flat.iter().map(|instanced| instanced.mesh.name.clone()).collect()
}

#[test]
fn scene_builds_one_visual_per_feature_kind() {
    let Some((device, _queue)) = headless_device() else {
        return;
    };
    let scene = MovingSphereBox::new(&device, &SceneConfig::default()).unwrap();

    let amounts: Vec<usize> = scene.visuals().iter().map(|v| v.locals.len()).collect();
    assert_eq!(amounts, vec![1, 8, 12, 6]);
    assert_eq!(scene.on_render().draw_count(), 4);
    assert_eq!(mesh_names(scene.on_render()), vec!["box", "vertex", "edge", "face"]);
}

#[test]
fn render_tree_flattens_in_submission_order() {
    let Some((device, _queue)) = headless_device() else {
        return;
    };
    let scene = MovingSphereBox::new(&device, &SceneConfig { density: 4, ..Default::default() }).unwrap();
    let [a, b, c, d] = scene.visuals();

    let tree = Render::Composed(vec![
        Render::Transparent(a.instanced()),
        Render::Transparents(vec![b.instanced(), c.instanced()]),
        Render::None,
        Render::Composed(vec![Render::Transparent(d.instanced())]),
    ]);
    assert_eq!(tree.draw_count(), 4);
    assert_eq!(mesh_names(tree), vec!["box", "vertex", "edge", "face"]);

    let reversed = Render::Composed(vec![
        Render::Composed(vec![Render::Transparents(vec![d.instanced(), c.instanced()])]),
        Render::Transparent(b.instanced()),
        Render::Transparent(a.instanced()),
    ]);
    assert_eq!(mesh_names(reversed), vec!["face", "edge", "vertex", "box"]);
    assert!(mesh_names(Render::None).is_empty());
}

#[test]
fn cull_mode_selects_the_matching_pipeline() {
    let Some((device, queue)) = headless_device() else {
        return;
    };
    let camera = demo_camera(&device, &queue);
    let pipelines = ConstantColorPipelines::new(&device, &offscreen_config(), &camera.bind_group_layout);

    let initial = pipelines.for_cull_mode(CullMode::default());
    assert!(std::ptr::eq(initial, &pipelines.unculled));
    assert!(std::ptr::eq(pipelines.for_cull_mode(CullMode::default().toggled()), &pipelines.culled));
}

#[test]
fn scene_renders_into_an_offscreen_target() {
    let Some((device, queue)) = headless_device() else {
        return;
    };
    let config = offscreen_config();
    let scene = MovingSphereBox::new(&device, &SceneConfig { density: 8, ..Default::default() }).unwrap();
    let camera = demo_camera(&device, &queue);

    let pipelines = ConstantColorPipelines::new(&device, &config, &camera.bind_group_layout);
    let mut overlay = OverlayRenderer::new(&device, &config);
    overlay.prepare(
        &device,
        &queue,
        SIZE,
        SIZE,
        &layout_text("fps: 60.0", 8.0, 30.0, 2.0, [0.0, 0.0, 0.0, 1.0]),
    );

    let extent = wgpu::Extent3d {
        width: SIZE,
        height: SIZE,
        depth_or_array_layers: 1,
    };
    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("offscreen target"),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: config.format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());
    let depth = Texture::create_depth_texture(&device, [SIZE, SIZE], "offscreen depth");

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("offscreen encoder"),
    });
    {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("offscreen pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
            multiview_mask: None,
        });

        render_pass.set_pipeline(pipelines.for_cull_mode(CullMode::default()));
        for visual in scene.visuals() {
            render_pass.set_vertex_buffer(1, visual.instance_buffer.slice(..));
            render_pass.draw_mesh_instanced(&visual.mesh, 0..visual.locals.len() as u32, &camera.bind_group);
        }
        overlay.draw(&mut render_pass);
    }

    let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("offscreen readback"),
        size: (BYTES_PER_PIXEL * SIZE * SIZE) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture: &target,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &output_buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(BYTES_PER_PIXEL * SIZE),
                rows_per_image: Some(SIZE),
            },
        },
        extent,
    );
    queue.submit(std::iter::once(encoder.finish()));

    let (tx, rx) = tokio::sync::oneshot::channel();
    let buffer_slice = output_buffer.slice(..);
    buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    device
        .poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: Some(Duration::from_secs(3)),
        })
        .unwrap();
    rx.blocking_recv().unwrap().unwrap();

    let data = buffer_slice.get_mapped_range();
    let center = ((SIZE / 2 * SIZE + SIZE / 2) * BYTES_PER_PIXEL) as usize;
    let pixel = &data[center..center + 3];

    // white, then the grey box front face, then the purple +x face, each at alpha 0.5
    let expected = [159u8, 96, 159];
    for (channel, (&actual, expected)) in pixel.iter().zip(expected).enumerate() {
        assert!(
            actual.abs_diff(expected) <= 3,
            "channel {} of the centre pixel is {}, expected about {} (pixel {:?})",
            channel,
            actual,
            expected,
            pixel
        );
    }
}
