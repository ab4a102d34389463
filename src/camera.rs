//! Camera, projection and the two input devices that move the view.
//!
//! - [`Camera`] is a position plus an orthonormal direction/up frame
//! - [`CameraRig`] translates and turns the camera from held keys
//! - [`Trackball`] turns the whole scene while the left mouse button is dragged

use cgmath::{InnerSpace, Matrix4, One, Point3, Quaternion, Rad, Rotation3, Vector3, Vector4};
use instant::Duration;
use wgpu::util::DeviceExt;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::from_cols(
    Vector4::new(1.0, 0.0, 0.0, 0.0),
    Vector4::new(0.0, 1.0, 0.0, 0.0),
    Vector4::new(0.0, 0.0, 0.5, 0.0),
    Vector4::new(0.0, 0.0, 0.5, 1.0),
);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub direction: Vector3<f32>,
    pub up: Vector3<f32>,
}

impl Camera {
    /// `up` is made orthogonal to `direction`; both are normalized.
    pub fn new<P: Into<Point3<f32>>, V: Into<Vector3<f32>>>(position: P, direction: V, up: V) -> Self {
        let direction = direction.into().normalize();
        let up = up.into();
        let right = direction.cross(up).normalize();
        Self {
            position: position.into(),
            direction,
            up: right.cross(direction),
        }
    }

    pub fn right(&self) -> Vector3<f32> {
        self.direction.cross(self.up)
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.direction, self.up)
    }

    fn orthonormalize(&mut self) {
        self.direction = self.direction.normalize();
        let right = self.direction.cross(self.up).normalize();
        self.up = right.cross(self.direction);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Matrix4::one().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Key driven camera motion.
///
/// | key               | motion                        |
/// |-------------------|-------------------------------|
/// | Up / Down         | forward / backward            |
/// | Home / End        | up / down                     |
/// | Insert / Delete   | left / right                  |
/// | Left / Right      | turn left / right about up    |
/// | PageUp / PageDown | look up / down about right    |
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub translation_speed: f32,
    pub rotation_speed: f32,
    amount_forward: f32,
    amount_backward: f32,
    amount_up: f32,
    amount_down: f32,
    amount_left: f32,
    amount_right: f32,
    amount_turn_left: f32,
    amount_turn_right: f32,
    amount_look_up: f32,
    amount_look_down: f32,
}

impl CameraRig {
    /// Speeds are in units and radians per second.
    pub fn new(translation_speed: f32, rotation_speed: f32) -> Self {
        Self {
            translation_speed,
            rotation_speed,
            amount_forward: 0.0,
            amount_backward: 0.0,
            amount_up: 0.0,
            amount_down: 0.0,
            amount_left: 0.0,
            amount_right: 0.0,
            amount_turn_left: 0.0,
            amount_turn_right: 0.0,
            amount_look_up: 0.0,
            amount_look_down: 0.0,
        }
    }

    /// Returns whether the key belongs to the rig.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let amount = if state == ElementState::Pressed { 1.0 } else { 0.0 };
        let slot = match key {
            KeyCode::ArrowUp => &mut self.amount_forward,
            KeyCode::ArrowDown => &mut self.amount_backward,
            KeyCode::Home => &mut self.amount_up,
            KeyCode::End => &mut self.amount_down,
            KeyCode::Insert => &mut self.amount_left,
            KeyCode::Delete => &mut self.amount_right,
            KeyCode::ArrowLeft => &mut self.amount_turn_left,
            KeyCode::ArrowRight => &mut self.amount_turn_right,
            KeyCode::PageUp => &mut self.amount_look_up,
            KeyCode::PageDown => &mut self.amount_look_down,
            _ => return false,
        };
        *slot = amount;
        true
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => self.process_keyboard(*key, *state),
            // keys held while the window loses focus would otherwise stick
            WindowEvent::Focused(false) => {
                *self = Self::new(self.translation_speed, self.rotation_speed);
                false
            }
            _ => false,
        }
    }

    /// Applies the held keys for a frame of length `dt`. Returns whether the camera changed.
    pub fn move_camera(&self, camera: &mut Camera, dt: Duration) -> bool {
        let dt = dt.as_secs_f32();
        let step = self.translation_speed * dt;
        let angle = self.rotation_speed * dt;
        let mut moved = false;

        let forward = self.amount_forward - self.amount_backward;
        let upward = self.amount_up - self.amount_down;
        let rightward = self.amount_right - self.amount_left;
        if forward != 0.0 || upward != 0.0 || rightward != 0.0 {
            let right = camera.right();
            camera.position += camera.direction * (forward * step)
                + camera.up * (upward * step)
                + right * (rightward * step);
            moved = true;
        }

        let yaw = self.amount_turn_left - self.amount_turn_right;
        if yaw != 0.0 {
            let rotation = Quaternion::from_axis_angle(camera.up, Rad(yaw * angle));
            camera.direction = rotation * camera.direction;
            moved = true;
        }

        let pitch = self.amount_look_up - self.amount_look_down;
        if pitch != 0.0 {
            let rotation = Quaternion::from_axis_angle(camera.right().normalize(), Rad(pitch * angle));
            camera.direction = rotation * camera.direction;
            camera.up = rotation * camera.up;
            moved = true;
        }

        if moved {
            camera.orthonormalize();
        }
        moved
    }
}

/// Virtual trackball rotating the scene about the camera's up and right axes.
#[derive(Debug, Clone)]
pub struct Trackball {
    /// Radians per window width (or height) dragged.
    pub speed: f32,
    rotation: Quaternion<f32>,
    drag: Option<(PhysicalPosition<f64>, Quaternion<f32>)>,
}

impl Trackball {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            rotation: Quaternion::one(),
            drag: None,
        }
    }

    pub fn rotation(&self) -> Quaternion<f32> {
        self.rotation
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn begin_drag(&mut self, position: PhysicalPosition<f64>) {
        self.drag = Some((position, self.rotation));
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Updates the rotation for the cursor at `position`. Returns whether it changed.
    pub fn drag_to(
        &mut self,
        position: PhysicalPosition<f64>,
        width: u32,
        height: u32,
        camera: &Camera,
    ) -> bool {
        let Some((press_position, press_rotation)) = self.drag else {
            return false;
        };
        let dx = (position.x - press_position.x) as f32 / width.max(1) as f32;
        let dy = (position.y - press_position.y) as f32 / height.max(1) as f32;

        let rotation = Quaternion::from_axis_angle(camera.up, Rad(dx * self.speed))
            * Quaternion::from_axis_angle(camera.right().normalize(), Rad(dy * self.speed))
            * press_rotation;
        let rotation = rotation.normalize();
        let changed = rotation != self.rotation;
        self.rotation = rotation;
        changed
    }
}

/// GPU side of the camera.
#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub rig: CameraRig,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    pub fn new(device: &wgpu::Device, camera: Camera, rig: CameraRig, projection: &Projection) -> Self {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera, projection);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("camera_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        Self {
            camera,
            rig,
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    /// Recomputes the projection-view matrix and uploads it.
    pub fn write_uniform(&mut self, queue: &wgpu::Queue, projection: &Projection) {
        self.uniform.update_view_proj(&self.camera, projection);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
