//! Start-up configuration.
//!
//! Defaults reproduce the demo as shipped: a 768x768 window looking at a
//! 6x4x2 box rounded by a unit sphere.

use cgmath::{Point3, Vector3};

use crate::logging::LoggingConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
    pub logging: LoggingConfig,
    pub clear_colour: wgpu::Color,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            scene: SceneConfig::default(),
            logging: LoggingConfig::default(),
            clear_colour: wgpu::Color::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "MovingSphereBoxWindow".to_string(),
            width: 768,
            height: 768,
            resizable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Units per second.
    pub translation_speed: f32,
    /// Radians per second.
    pub rotation_speed: f32,
    /// Radians per window width dragged with the trackball.
    pub trackball_speed: f32,
    pub position: Point3<f32>,
    pub direction: Vector3<f32>,
    pub up: Vector3<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fovy_degrees: 60.0,
            znear: 0.1,
            zfar: 100.0,
            translation_speed: 6.0,
            rotation_speed: 0.6,
            trackball_speed: std::f32::consts::PI,
            position: Point3::new(24.0, 0.0, 0.0),
            direction: Vector3::new(-1.0, 0.0, 0.0),
            up: Vector3::new(0.0, 0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Samples per side of the generated meshes.
    pub density: usize,
    pub alpha: f32,
    /// Half sizes of the inner box.
    pub box_extents: Vector3<f32>,
    pub sphere_radius: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            density: 32,
            alpha: 0.5,
            box_extents: Vector3::new(3.0, 2.0, 1.0),
            sphere_radius: 1.0,
        }
    }
}
