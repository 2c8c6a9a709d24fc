// src/session/guard.rs

//! Scoped display-state acquisition around a launch attempt.

use tracing::debug;

use crate::backend::DisplayState;
use crate::errors::Result;

/// Applies the pre-launch display changes (resolution + HDR off) and
/// guarantees they are reverted on every exit path from the attempt.
///
/// `restore` is idempotent so the success path can restore mid-attempt (after
/// the game has switched in) while error paths are still covered by `Drop`.
/// The net effect is exactly one underlying restore per applied guard.
pub struct ResolutionGuard<'a> {
    display: &'a dyn DisplayState,
    restored: bool,
}

impl<'a> ResolutionGuard<'a> {
    /// Set the display to `width` x `height` and disable HDR.
    ///
    /// If HDR can't be disabled after the resolution change already landed,
    /// the resolution is restored before the error is returned, so a failed
    /// apply never leaks display state.
    pub fn apply(display: &'a dyn DisplayState, width: u32, height: u32) -> Result<Self> {
        display.set_resolution(width, height)?;

        if let Err(e) = display.disable_hdr() {
            display.restore_resolution();
            return Err(e);
        }

        debug!(width, height, "display state applied for launch");
        Ok(Self {
            display,
            restored: false,
        })
    }

    /// Restore the captured display state. Safe to call more than once; only
    /// the first call reaches the backend.
    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;

        self.display.restore_resolution();
        self.display.restore_hdr();
        debug!("display state restored");
    }
}

impl Drop for ResolutionGuard<'_> {
    fn drop(&mut self) {
        self.restore();
    }
}
