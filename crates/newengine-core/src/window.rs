use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::EngineResult;

/// Window operations consumers may rely on without knowing the backend.
///
/// Platform crates implement this over their native window type.
pub trait WindowApi: Send + Sync {
    /// Hides and locks the cursor so that its motion can drive look direction.
    fn set_cursor_captured(&self, captured: bool) -> EngineResult<()>;

    /// Inner size in physical pixels.
    fn inner_size(&self) -> (u32, u32);
}

/// Window without a backend. Records capture requests.
pub struct HeadlessWindow {
    captured: AtomicBool,
    size: (u32, u32),
}

impl HeadlessWindow {
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            captured: AtomicBool::new(false),
            size: (width, height),
        }
    }

    #[inline]
    pub fn is_captured(&self) -> bool {
        self.captured.load(Ordering::Relaxed)
    }
}

impl Default for HeadlessWindow {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl WindowApi for HeadlessWindow {
    fn set_cursor_captured(&self, captured: bool) -> EngineResult<()> {
        self.captured.store(captured, Ordering::Relaxed);
        Ok(())
    }

    fn inner_size(&self) -> (u32, u32) {
        self.size
    }
}
