//! Fake backends and a fake clock for driving the session core in tests.
//!
//! Every fake records its calls so tests can assert exact interaction counts
//! (launches, force-stops, restores, polls). Probe answers are scripted as
//! queues; when a queue runs dry the fake falls back to a per-fake default.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

use chrono::NaiveDateTime;

use stagehand::backend::{
    AudioCue, AutomationPass, ConfigStore, DisplayState, Notifier, ProcessLifecycle,
    ResourceTracker, UiProbe,
};
use stagehand::errors::Result;
use stagehand::session::Clock;
use stagehand::types::PowerAction;

/// Deterministic clock: `sleep` advances simulated time instantly and records
/// the requested duration.
pub struct FakeClock {
    now: Mutex<Duration>,
    base: NaiveDateTime,
    sleeps: Mutex<Vec<Duration>>,
}

impl FakeClock {
    pub fn new() -> Self {
        // Any fixed instant will do; tests that care pass their own.
        let base = NaiveDateTime::parse_from_str("2026-01-05 12:00:00", "%Y-%m-%d %H:%M:%S")
            .expect("valid test timestamp");
        Self::at(base)
    }

    pub fn at(base: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(Duration::ZERO),
            base,
            sleeps: Mutex::new(Vec::new()),
        }
    }

    /// All sleeps requested so far, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }

    /// Total simulated time elapsed.
    pub fn elapsed(&self) -> Duration {
        *self.now.lock().unwrap()
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn monotonic(&self) -> Duration {
        *self.now.lock().unwrap()
    }

    fn local_now(&self) -> NaiveDateTime {
        let elapsed = chrono::Duration::from_std(self.elapsed()).unwrap_or_default();
        self.base + elapsed
    }

    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        {
            let mut now = self.now.lock().unwrap();
            *now += duration;
        }
        self.sleeps.lock().unwrap().push(duration);
        Box::pin(std::future::ready(()))
    }
}

/// Scripted [`ProcessLifecycle`] fake.
#[derive(Default)]
pub struct FakeProcess {
    /// Scripted answers for `is_game_focused`; default `false` when empty.
    pub focus_script: Mutex<VecDeque<bool>>,
    /// Scripted answers for `launch`; default `true` when empty.
    pub launch_script: Mutex<VecDeque<bool>>,
    /// Path reported by `running_exe_path`.
    pub running_exe: Mutex<Option<PathBuf>>,

    pub focus_calls: Mutex<u32>,
    pub launch_calls: Mutex<u32>,
    pub force_stop_calls: Mutex<u32>,
    pub power_actions: Mutex<Vec<PowerAction>>,
}

impl FakeProcess {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_focus(&self, answers: impl IntoIterator<Item = bool>) {
        self.focus_script.lock().unwrap().extend(answers);
    }

    pub fn script_launch(&self, answers: impl IntoIterator<Item = bool>) {
        self.launch_script.lock().unwrap().extend(answers);
    }

    pub fn launch_calls(&self) -> u32 {
        *self.launch_calls.lock().unwrap()
    }

    pub fn force_stop_calls(&self) -> u32 {
        *self.force_stop_calls.lock().unwrap()
    }

    pub fn power_actions(&self) -> Vec<PowerAction> {
        self.power_actions.lock().unwrap().clone()
    }
}

impl ProcessLifecycle for FakeProcess {
    fn is_game_focused(&self) -> Result<bool> {
        *self.focus_calls.lock().unwrap() += 1;
        Ok(self.focus_script.lock().unwrap().pop_front().unwrap_or(false))
    }

    fn launch(&self) -> Result<bool> {
        *self.launch_calls.lock().unwrap() += 1;
        Ok(self.launch_script.lock().unwrap().pop_front().unwrap_or(true))
    }

    fn force_stop(&self) {
        *self.force_stop_calls.lock().unwrap() += 1;
    }

    fn running_exe_path(&self) -> Option<PathBuf> {
        self.running_exe.lock().unwrap().clone()
    }

    fn perform_power_action(&self, action: PowerAction) -> Result<()> {
        self.power_actions.lock().unwrap().push(action);
        Ok(())
    }
}

/// Recording [`DisplayState`] fake.
#[derive(Default)]
pub struct FakeDisplay {
    pub set_resolution_calls: Mutex<u32>,
    pub restore_resolution_calls: Mutex<u32>,
    pub disable_hdr_calls: Mutex<u32>,
    pub restore_hdr_calls: Mutex<u32>,
    /// Answer for `validate_resolution`; defaults to `true`.
    pub resolution_valid: Mutex<bool>,
}

impl FakeDisplay {
    pub fn new() -> Self {
        Self {
            resolution_valid: Mutex::new(true),
            ..Self::default()
        }
    }

    pub fn set_resolution_calls(&self) -> u32 {
        *self.set_resolution_calls.lock().unwrap()
    }

    pub fn restore_resolution_calls(&self) -> u32 {
        *self.restore_resolution_calls.lock().unwrap()
    }

    pub fn restore_hdr_calls(&self) -> u32 {
        *self.restore_hdr_calls.lock().unwrap()
    }
}

impl DisplayState for FakeDisplay {
    fn set_resolution(&self, _width: u32, _height: u32) -> Result<()> {
        *self.set_resolution_calls.lock().unwrap() += 1;
        Ok(())
    }

    fn restore_resolution(&self) {
        *self.restore_resolution_calls.lock().unwrap() += 1;
    }

    fn disable_hdr(&self) -> Result<()> {
        *self.disable_hdr_calls.lock().unwrap() += 1;
        Ok(())
    }

    fn restore_hdr(&self) {
        *self.restore_hdr_calls.lock().unwrap() += 1;
    }

    fn validate_resolution(&self, _width: u32, _height: u32) -> bool {
        *self.resolution_valid.lock().unwrap()
    }
}

/// Scripted [`UiProbe`] fake.
#[derive(Default)]
pub struct FakeUiProbe {
    /// Scripted answers for `click_enter`; default `true` when empty.
    pub enter_script: Mutex<VecDeque<bool>>,
    /// Scripted answers for `screen_detectable`; default `true` when empty.
    pub screen_script: Mutex<VecDeque<bool>>,

    pub enter_calls: Mutex<u32>,
    pub confirm_restart_calls: Mutex<u32>,
    pub network_retry_calls: Mutex<u32>,
    pub start_alt_calls: Mutex<u32>,
    pub screen_calls: Mutex<u32>,
    pub release_calls: Mutex<u32>,
}

impl FakeUiProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_enter(&self, answers: impl IntoIterator<Item = bool>) {
        self.enter_script.lock().unwrap().extend(answers);
    }

    pub fn script_screen(&self, answers: impl IntoIterator<Item = bool>) {
        self.screen_script.lock().unwrap().extend(answers);
    }

    pub fn release_calls(&self) -> u32 {
        *self.release_calls.lock().unwrap()
    }
}

impl UiProbe for FakeUiProbe {
    fn click_enter(&self) -> Result<bool> {
        *self.enter_calls.lock().unwrap() += 1;
        Ok(self.enter_script.lock().unwrap().pop_front().unwrap_or(true))
    }

    fn click_confirm_restart(&self) -> Result<bool> {
        *self.confirm_restart_calls.lock().unwrap() += 1;
        Ok(false)
    }

    fn click_network_retry(&self) -> Result<bool> {
        *self.network_retry_calls.lock().unwrap() += 1;
        Ok(false)
    }

    fn click_start_alt_client(&self) -> Result<bool> {
        *self.start_alt_calls.lock().unwrap() += 1;
        Ok(false)
    }

    fn screen_detectable(&self) -> Result<bool> {
        *self.screen_calls.lock().unwrap() += 1;
        Ok(self.screen_script.lock().unwrap().pop_front().unwrap_or(true))
    }

    fn release_resources(&self) {
        *self.release_calls.lock().unwrap() += 1;
    }
}

/// Fixed-value [`ResourceTracker`] fake.
pub struct FakePower {
    pub value: Mutex<u32>,
    pub reads: Mutex<u32>,
}

impl FakePower {
    pub fn new(value: u32) -> Self {
        Self {
            value: Mutex::new(value),
            reads: Mutex::new(0),
        }
    }

    pub fn reads(&self) -> u32 {
        *self.reads.lock().unwrap()
    }
}

impl ResourceTracker for FakePower {
    fn current_power(&self) -> Result<u32> {
        *self.reads.lock().unwrap() += 1;
        Ok(*self.value.lock().unwrap())
    }
}

/// Recording [`Notifier`] fake.
#[derive(Default)]
pub struct FakeNotifier {
    pub messages: Mutex<Vec<String>>,
}

impl FakeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for FakeNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Recording [`AudioCue`] fake.
#[derive(Default)]
pub struct FakeAudio {
    pub plays: Mutex<u32>,
}

impl FakeAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plays(&self) -> u32 {
        *self.plays.lock().unwrap()
    }
}

impl AudioCue for FakeAudio {
    fn play_to_completion(&self) {
        *self.plays.lock().unwrap() += 1;
    }
}

/// Recording [`AutomationPass`] fake.
#[derive(Default)]
pub struct FakeAutomation {
    pub runs: Mutex<u32>,
}

impl FakeAutomation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runs(&self) -> u32 {
        *self.runs.lock().unwrap()
    }
}

impl AutomationPass for FakeAutomation {
    fn run(&self) -> Result<()> {
        *self.runs.lock().unwrap() += 1;
        Ok(())
    }
}

/// Recording [`ConfigStore`] fake.
#[derive(Default)]
pub struct FakeConfigStore {
    pub saved_paths: Mutex<Vec<PathBuf>>,
}

impl FakeConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved_paths(&self) -> Vec<PathBuf> {
        self.saved_paths.lock().unwrap().clone()
    }
}

impl ConfigStore for FakeConfigStore {
    fn set_game_path(&self, path: &Path) -> Result<()> {
        self.saved_paths.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}
