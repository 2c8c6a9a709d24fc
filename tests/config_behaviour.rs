// tests/config_behaviour.rs

//! Config loading, validation, and the game-path writeback.

use std::error::Error;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use stagehand::backend::ConfigStore;
use stagehand::config::{load_and_validate, load_from_path, TomlConfigStore};
use stagehand::types::AfterFinishAction;

type TestResult = Result<(), Box<dyn Error>>;

const FULL_CONFIG: &str = r#"
[game]
path = "/games/client/game"
process_name = "game"
auto_set_resolution = true
auto_set_game_path = true

[run]
after_finish = "loop"
play_audio = true
power_limit = 180
daily_reset_hour = 5

[update]
enabled = true
releases_url = "https://api.example.com/releases"

[hooks]
launch = "launcher --start"
"#;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("Stagehand.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn full_config_loads_and_validates() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_config(&dir, FULL_CONFIG);

    let cfg = load_and_validate(&path)?;

    assert_eq!(cfg.game.path, "/games/client/game");
    assert_eq!(cfg.game.process_name, "game");
    assert!(cfg.game.auto_set_resolution);
    assert!(cfg.game.auto_set_game_path);
    assert_eq!(cfg.run.after_finish, AfterFinishAction::Loop);
    assert!(cfg.run.play_audio);
    assert_eq!(cfg.run.power_limit, 180);
    assert_eq!(cfg.run.daily_reset_hour, 5);
    assert!(cfg.update.enabled);
    assert_eq!(cfg.hooks.launch.as_deref(), Some("launcher --start"));
    Ok(())
}

#[test]
fn minimal_config_gets_documented_defaults() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_config(
        &dir,
        r#"
[game]
path = "/games/client/game"
process_name = "game"
"#,
    );

    let cfg = load_and_validate(&path)?;

    assert_eq!(cfg.run.after_finish, AfterFinishAction::Exit);
    assert!(!cfg.run.play_audio);
    assert_eq!(cfg.run.power_limit, 240);
    assert_eq!(cfg.run.daily_reset_hour, 4);
    assert!(!cfg.update.enabled);
    assert!(cfg.hooks.launch.is_none());
    Ok(())
}

#[test]
fn empty_game_path_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[game]
path = ""
process_name = "game"
"#,
    );

    let err = load_and_validate(&path).unwrap_err();
    assert!(err.to_string().contains("[game].path"), "got: {err}");
}

#[test]
fn empty_process_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[game]
path = "/games/client/game"
process_name = ""
"#,
    );

    let err = load_and_validate(&path).unwrap_err();
    assert!(err.to_string().contains("process_name"), "got: {err}");
}

#[test]
fn zero_power_limit_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[game]
path = "/games/client/game"
process_name = "game"

[run]
power_limit = 0
"#,
    );

    let err = load_and_validate(&path).unwrap_err();
    assert!(err.to_string().contains("power_limit"), "got: {err}");
}

#[test]
fn out_of_range_reset_hour_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[game]
path = "/games/client/game"
process_name = "game"

[run]
daily_reset_hour = 24
"#,
    );

    let err = load_and_validate(&path).unwrap_err();
    assert!(err.to_string().contains("daily_reset_hour"), "got: {err}");
}

#[test]
fn update_enabled_without_url_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[game]
path = "/games/client/game"
process_name = "game"

[update]
enabled = true
"#,
    );

    let err = load_and_validate(&path).unwrap_err();
    assert!(err.to_string().contains("releases_url"), "got: {err}");
}

#[test]
fn malformed_toml_reports_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[game\npath = ");

    assert!(load_from_path(&path).is_err());
}

#[test]
fn store_rewrites_game_path_and_preserves_other_fields() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_config(&dir, FULL_CONFIG);

    let store = TomlConfigStore::new(path.clone());
    store.set_game_path(Path::new("/games/elsewhere/game"))?;

    let cfg = load_and_validate(&path)?;
    assert_eq!(cfg.game.path, "/games/elsewhere/game");
    // Everything else survives the rewrite.
    assert_eq!(cfg.game.process_name, "game");
    assert_eq!(cfg.run.power_limit, 180);
    assert_eq!(cfg.hooks.launch.as_deref(), Some("launcher --start"));
    Ok(())
}

#[test]
fn after_finish_parses_case_insensitively() {
    assert_eq!(
        "Shutdown".parse::<AfterFinishAction>(),
        Ok(AfterFinishAction::Shutdown)
    );
    assert_eq!("loop".parse(), Ok(AfterFinishAction::Loop));
    assert!("reboot".parse::<AfterFinishAction>().is_err());
}
