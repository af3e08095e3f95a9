mod config;

use std::sync::Arc;

use newengine_camera::{FlyControl, Perspective, PerspectiveCamera};
use newengine_core::{EngineError, EngineResult, EventHub, WindowApi};
use newengine_modules_logging::init_logging;
use newengine_platform_winit::{run_winit_app, HostApp, WindowSettings};

use crate::config::ViewerConfig;

/// Fly camera over an empty scene. Input goes through the hub into the controller.
struct Viewer {
    hub: Arc<EventHub>,
    cfg: ViewerConfig,
    control: Option<FlyControl<PerspectiveCamera>>,
}

impl Viewer {
    #[inline]
    fn new(hub: Arc<EventHub>, cfg: ViewerConfig) -> Self {
        Self { hub, cfg, control: None }
    }
}

impl HostApp for Viewer {
    fn ready(&mut self, window: Arc<dyn WindowApi>) -> EngineResult<()> {
        let cam = &self.cfg.camera;
        let (w, h) = window.inner_size();
        let mut lens = Perspective::default();
        lens.set_fov_degrees(cam.fov_degrees);
        lens.set_viewport(w, h);

        let bindings = self.cfg.fly.clone().into_bindings();
        bindings
            .validate()
            .map_err(|e| EngineError::Config(format!("fly bindings: {e}")))?;

        let camera = PerspectiveCamera::new(cam.position, lens);
        let control = FlyControl::with_bindings(
            camera,
            cam.target,
            cam.world_up,
            self.hub.clone(),
            window,
            bindings,
        );
        log::info!(
            "viewer: fly camera at {:?} looking {:?} ({:?}, {:?} up)",
            control.position(),
            control.forward_vector(),
            self.cfg.fly.preset,
            control.up_mode(),
        );
        self.control = Some(control);
        Ok(())
    }

    fn update(&mut self) {
        let Some(control) = self.control.as_mut() else {
            return;
        };
        if control.pump() == 0 {
            return;
        }
        log::debug!(
            "viewer: pos {:?} fwd {:?} rot {:?} fov {:.1}",
            control.position(),
            control.forward_vector(),
            control.rotation(),
            control.camera().lens.fov_degrees(),
        );
    }

    fn resized(&mut self, width: u32, height: u32) {
        if let Some(control) = self.control.as_mut() {
            control.camera_mut().lens.set_viewport(width, height);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "viewer.toml".to_string());
    let cfg = ViewerConfig::load_or_default(&path)?;

    init_logging(&cfg.log_filter);
    log::info!("viewer: config {path}, preset {:?}", cfg.fly.preset);

    let settings = WindowSettings {
        title: cfg.title.clone(),
        width: cfg.width,
        height: cfg.height,
    };
    let hub = Arc::new(EventHub::new());
    run_winit_app(hub.clone(), Viewer::new(hub, cfg), settings)?;
    Ok(())
}
