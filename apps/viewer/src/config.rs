use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use glam::Vec3;
use newengine_camera::FlyOptions;
use newengine_core::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    /// `env_logger` filter; `RUST_LOG` wins when set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default)]
    pub camera: CameraConfig,

    /// Preset plus table overrides. Angles and zoom bounds are radians.
    #[serde(default)]
    pub fly: FlyOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub target: Vec3,
    pub world_up: Vec3,
    pub fov_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 10.0),
            target: Vec3::ZERO,
            world_up: Vec3::Y,
            fov_degrees: 60.0,
        }
    }
}

fn default_title() -> String {
    "NewEngine Viewer".to_string()
}
fn default_width() -> u32 {
    1280
}
fn default_height() -> u32 {
    720
}
fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            log_filter: default_log_filter(),
            camera: CameraConfig::default(),
            fly: FlyOptions::default(),
        }
    }
}

impl ViewerConfig {
    /// Missing file yields defaults; unreadable or malformed files are errors.
    pub fn load_or_default(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(s) => toml::from_str(&s)
                .map_err(|e| EngineError::Config(format!("parse {}: {}", path.display(), e))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(EngineError::Config(format!("read {}: {}", path.display(), e))),
        }
    }
}
