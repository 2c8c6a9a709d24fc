// src/lib.rs

pub mod backend;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod sched;
pub mod session;
pub mod types;
pub mod update;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::backend::{
    Backends, CommandAudioCue, CommandAutomation, CommandNotifier, HookDisplay,
    HookResourceTracker, HookUiProbe, LogNotifier, NullAudioCue, ShellProcessControl,
};
use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::{ConfigFile, TomlConfigStore};
use crate::session::{SessionOrchestrator, StopAction, TokioClock};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the production hook-command backends
/// - the background update check
/// - the orchestrator loop (start -> automation -> stop -> maybe again)
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = args
        .config
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(config::default_config_path);
    let cfg = load_and_validate(&config_path)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let backends = build_backends(&cfg, &config_path);

    // Independent background worker; never blocks the orchestrator.
    let _update_handle = update::spawn_update_check(
        cfg.update.clone(),
        Arc::clone(&backends.notifier),
        env!("CARGO_PKG_VERSION"),
    );

    let clock = Arc::new(TokioClock::new());
    let mut orchestrator = SessionOrchestrator::new(cfg, backends, clock);

    loop {
        orchestrator.start().await?;

        match orchestrator.stop(!args.once).await? {
            StopAction::RunAgainNow | StopAction::RunAfterWait => continue,
            StopAction::Exit { pause_for_ack } => {
                info!("session finished");
                if pause_for_ack {
                    wait_for_acknowledgment();
                }
                return Ok(());
            }
        }
    }
}

/// Construct the production backends from the validated config.
fn build_backends(cfg: &ConfigFile, config_path: &Path) -> Backends {
    let notifier: Arc<dyn backend::Notifier> = match &cfg.hooks.notify {
        Some(line) => Arc::new(CommandNotifier::new(line.clone())),
        None => Arc::new(LogNotifier),
    };

    let audio: Arc<dyn backend::AudioCue> = match &cfg.hooks.audio {
        Some(line) => Arc::new(CommandAudioCue::new(line.clone())),
        None => Arc::new(NullAudioCue),
    };

    Backends {
        process: Arc::new(ShellProcessControl::new(
            cfg.game.clone(),
            cfg.hooks.clone(),
        )),
        display: Arc::new(HookDisplay::new(cfg.hooks.clone())),
        ui: Arc::new(HookUiProbe::new(cfg.hooks.clone())),
        power: Arc::new(HookResourceTracker::new(&cfg.hooks)),
        notifier,
        audio,
        automation: Arc::new(CommandAutomation::new(cfg.hooks.automation.clone())),
        config_store: Arc::new(TomlConfigStore::new(config_path.to_path_buf())),
    }
}

/// Block until the operator presses Enter. Used on plain exits so the console
/// window doesn't vanish with the final log lines.
fn wait_for_acknowledgment() {
    println!("Press Enter to close. . .");
    let mut line = String::new();
    let _ = std::io::stdin().read_line(&mut line);
}

/// Simple dry-run output: print the effective config without launching.
fn print_dry_run(cfg: &ConfigFile) {
    println!("stagehand dry-run");
    println!("  game.path = {}", cfg.game.path);
    println!("  game.process_name = {}", cfg.game.process_name);
    println!("  game.auto_set_resolution = {}", cfg.game.auto_set_resolution);
    println!("  game.auto_set_game_path = {}", cfg.game.auto_set_game_path);
    println!();
    println!("  run.after_finish = {:?}", cfg.run.after_finish);
    println!("  run.play_audio = {}", cfg.run.play_audio);
    println!("  run.power_limit = {}", cfg.run.power_limit);
    println!("  run.daily_reset_hour = {}", cfg.run.daily_reset_hour);
    println!();
    println!("  update.enabled = {}", cfg.update.enabled);

    let hooks = [
        ("focus_check", &cfg.hooks.focus_check),
        ("launch", &cfg.hooks.launch),
        ("force_stop", &cfg.hooks.force_stop),
        ("running_exe", &cfg.hooks.running_exe),
        ("click_enter", &cfg.hooks.click_enter),
        ("click_confirm_restart", &cfg.hooks.click_confirm_restart),
        ("click_network_retry", &cfg.hooks.click_network_retry),
        ("click_start_alt_client", &cfg.hooks.click_start_alt_client),
        ("screen_check", &cfg.hooks.screen_check),
        ("release_vision", &cfg.hooks.release_vision),
        ("current_power", &cfg.hooks.current_power),
        ("set_resolution", &cfg.hooks.set_resolution),
        ("restore_resolution", &cfg.hooks.restore_resolution),
        ("set_hdr", &cfg.hooks.set_hdr),
        ("restore_hdr", &cfg.hooks.restore_hdr),
        ("validate_resolution", &cfg.hooks.validate_resolution),
        ("notify", &cfg.hooks.notify),
        ("audio", &cfg.hooks.audio),
        ("automation", &cfg.hooks.automation),
    ];

    println!();
    println!("hooks:");
    for (name, line) in hooks {
        match line {
            Some(line) => println!("  {name}: {line}"),
            None => println!("  {name}: (default)"),
        }
    }
}
