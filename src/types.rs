// src/types.rs

use std::str::FromStr;

use serde::Deserialize;

/// What to do after the automation pass has finished.
///
/// - `Loop`: reschedule and run again (via the loop scheduler).
/// - `Exit`: terminate the program after operator acknowledgment.
/// - The remaining variants perform a system power action and then exit
///   without waiting for acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AfterFinishAction {
    Exit,
    Loop,
    Shutdown,
    Hibernate,
    Sleep,
    Logoff,
}

impl Default for AfterFinishAction {
    fn default() -> Self {
        AfterFinishAction::Exit
    }
}

impl FromStr for AfterFinishAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exit" => Ok(AfterFinishAction::Exit),
            "loop" => Ok(AfterFinishAction::Loop),
            "shutdown" => Ok(AfterFinishAction::Shutdown),
            "hibernate" => Ok(AfterFinishAction::Hibernate),
            "sleep" => Ok(AfterFinishAction::Sleep),
            "logoff" => Ok(AfterFinishAction::Logoff),
            other => Err(format!(
                "invalid after_finish action: {other} (expected \"exit\", \"loop\", \
                 \"shutdown\", \"hibernate\", \"sleep\" or \"logoff\")"
            )),
        }
    }
}

impl AfterFinishAction {
    /// The system power action this setting maps to, if any.
    ///
    /// `Exit` and `Loop` do not touch system power state.
    pub fn power_action(self) -> Option<PowerAction> {
        match self {
            AfterFinishAction::Exit | AfterFinishAction::Loop => None,
            AfterFinishAction::Shutdown => Some(PowerAction::Shutdown),
            AfterFinishAction::Hibernate => Some(PowerAction::Hibernate),
            AfterFinishAction::Sleep => Some(PowerAction::Sleep),
            AfterFinishAction::Logoff => Some(PowerAction::Logoff),
        }
    }
}

/// A system power action performed through the process-lifecycle backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    Shutdown,
    Hibernate,
    Sleep,
    Logoff,
}
