use cgmath::{InnerSpace, Vector3, Vector4};
use moving_sphere_box::{
    data_structures::instance::Instance,
    geometry::{
        primitives::{AlignedBox3, Sphere3},
        rounded_box::RoundedBox,
    },
};

pub const EPSILON: f32 = 1e-4;

pub fn assert_close(actual: f32, expected: f32, eps: f32) {
    assert!(
        (actual - expected).abs() <= eps,
        "expected {} but got {} (eps {})",
        expected,
        actual,
        eps
    );
}

pub fn assert_vec_close(actual: Vector3<f32>, expected: Vector3<f32>, eps: f32) {
    assert!(
        (actual - expected).magnitude() <= eps,
        "expected {:?} but got {:?} (eps {})",
        expected,
        actual,
        eps
    );
}

/// The box the demo shows: half sizes (3, 2, 1) rounded by a unit sphere.
pub fn demo_rounded_box() -> RoundedBox {
    RoundedBox::new(
        AlignedBox3::from_extents(Vector3::new(3.0, 2.0, 1.0)),
        Sphere3::default(),
        0.5,
    )
}

/// Applies the full instance transform to a mesh position.
pub fn transform(instance: &Instance, position: [f32; 3]) -> Vector3<f32> {
    let p = instance.to_matrix() * Vector4::new(position[0], position[1], position[2], 1.0);
    p.truncate()
}

#[cfg(feature = "integration-tests")]
pub fn headless_device() -> Option<(wgpu::Device, wgpu::Queue)> {
    let runtime = tokio::runtime::Runtime::new().ok()?;
    runtime.block_on(async {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                eprintln!("no GPU adapter available, skipping: {}", e);
                return None;
            }
        };
        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("test device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .ok()
    })
}
