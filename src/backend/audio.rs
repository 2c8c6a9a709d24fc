// src/backend/audio.rs

//! Completion audio cue backends.

use tracing::{debug, info, warn};

use crate::backend::command::shell_command;
use crate::backend::AudioCue;

/// Plays the completion cue by running the configured `audio` hook to
/// conclusion (the hook is expected to block until playback finishes).
///
/// Audio is best-effort, not load-bearing: remote-desktop sessions can lack
/// an audio device entirely, so every failure here is logged and swallowed.
pub struct CommandAudioCue {
    line: String,
}

impl CommandAudioCue {
    pub fn new(line: String) -> Self {
        Self { line }
    }
}

impl AudioCue for CommandAudioCue {
    fn play_to_completion(&self) {
        info!("playing completion audio cue");

        match shell_command(&self.line).status() {
            Ok(status) if status.success() => {
                debug!("audio cue finished");
            }
            Ok(status) => {
                warn!(code = status.code(), "audio hook exited non-zero");
            }
            Err(e) => {
                warn!(error = %e, "audio hook failed to run");
            }
        }
    }
}

/// No-op cue used when no `audio` hook is configured.
pub struct NullAudioCue;

impl AudioCue for NullAudioCue {
    fn play_to_completion(&self) {
        debug!("no audio hook configured; skipping completion cue");
    }
}
