use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use newengine_core::{EngineError, EngineResult, WindowApi};
use winit::window::{CursorGrabMode, Window};

/// [`WindowApi`] over a winit window.
pub struct WinitWindow {
    window: Arc<Window>,
    captured: AtomicBool,
}

impl WinitWindow {
    #[inline]
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            captured: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    #[inline]
    pub fn is_captured(&self) -> bool {
        self.captured.load(Ordering::Relaxed)
    }
}

impl WindowApi for WinitWindow {
    /// Locks the cursor, falling back to confining it where locking is unsupported.
    fn set_cursor_captured(&self, captured: bool) -> EngineResult<()> {
        if captured {
            self.window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined))
                .map_err(|e| EngineError::Window(format!("cursor grab: {e}")))?;
        } else {
            self.window
                .set_cursor_grab(CursorGrabMode::None)
                .map_err(|e| EngineError::Window(format!("cursor release: {e}")))?;
        }

        self.window.set_cursor_visible(!captured);
        self.captured.store(captured, Ordering::Relaxed);
        Ok(())
    }

    #[inline]
    fn inner_size(&self) -> (u32, u32) {
        let s = self.window.inner_size();
        (s.width, s.height)
    }
}
