use std::sync::Arc;

use newengine_core::{EngineError, EngineResult, EventHub, InputHostEvent, WindowApi};

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::events::translate_window_event;
use crate::window::WinitWindow;

/// Window creation parameters.
#[derive(Debug, Clone)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "NewEngine".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Application driven by [`run_winit_app`].
///
/// Input never reaches the app directly: it is published into the hub and the app
/// drains its own subscriptions in `update`.
pub trait HostApp {
    /// Called once the window exists.
    fn ready(&mut self, window: Arc<dyn WindowApi>) -> EngineResult<()>;

    /// Called after each batch of window events.
    fn update(&mut self);

    fn resized(&mut self, _width: u32, _height: u32) {}
}

struct App<A: HostApp> {
    hub: Arc<EventHub>,
    host: A,
    settings: WindowSettings,
    window: Option<Arc<WinitWindow>>,
    /// Virtual cursor position. While captured it integrates raw device motion.
    cursor: (f64, f64),
    error: Option<EngineError>,
}

impl<A: HostApp> App<A> {
    #[inline]
    fn new(hub: Arc<EventHub>, host: A, settings: WindowSettings) -> Self {
        Self {
            hub,
            host,
            settings,
            window: None,
            cursor: (0.0, 0.0),
            error: None,
        }
    }

    #[inline]
    fn captured(&self) -> bool {
        self.window.as_ref().is_some_and(|w| w.is_captured())
    }

    #[inline]
    fn publish_cursor(&self) {
        self.hub.publish(InputHostEvent::CursorMoved {
            x: self.cursor.0 as f32,
            y: self.cursor.1 as f32,
        });
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: EngineError) {
        log::error!("platform: {err}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> EngineResult<()> {
        let attrs = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height));
        let window = event_loop
            .create_window(attrs)
            .map_err(|e| EngineError::Window(format!("create window: {e}")))?;

        let window = Arc::new(WinitWindow::new(Arc::new(window)));
        self.window = Some(window.clone());
        self.host.ready(window)
    }
}

impl<A: HostApp> ApplicationHandler for App<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let esc_pressed = matches!(
            &event,
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    state: ElementState::Pressed,
                    physical_key: PhysicalKey::Code(KeyCode::Escape),
                    ..
                },
                ..
            }
        );
        if esc_pressed || matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        if let WindowEvent::Resized(size) = event {
            self.host.resized(size.width, size.height);
            return;
        }

        match translate_window_event(&event) {
            // A captured cursor is reported through device motion instead.
            Some(InputHostEvent::CursorMoved { .. }) if self.captured() => {}
            Some(InputHostEvent::CursorMoved { x, y }) => {
                self.cursor = (x as f64, y as f64);
                self.publish_cursor();
            }
            Some(ev) => {
                self.hub.publish(ev);
            }
            None => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if self.captured() {
                self.cursor.0 += dx;
                self.cursor.1 += dy;
                self.publish_cursor();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            self.host.update();
        }
    }
}

/// Runs the winit loop until the window closes or Escape is pressed.
///
/// The platform crate owns the loop and publishes input into `hub`.
pub fn run_winit_app<A: HostApp>(hub: Arc<EventHub>, host: A, settings: WindowSettings) -> EngineResult<()> {
    let event_loop = EventLoop::new().map_err(|e| EngineError::Other(e.to_string()))?;
    let mut app = App::new(hub, host, settings);

    event_loop
        .run_app(&mut app)
        .map_err(|e| EngineError::Other(e.to_string()))?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
