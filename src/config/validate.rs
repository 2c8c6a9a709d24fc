// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, StagehandError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::StagehandError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(
            raw.game, raw.run, raw.update, raw.hooks,
        ))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_game_section(cfg)?;
    validate_run_section(cfg)?;
    validate_update_section(cfg)?;
    Ok(())
}

fn validate_game_section(cfg: &RawConfigFile) -> Result<()> {
    if cfg.game.path.trim().is_empty() {
        return Err(StagehandError::ConfigError(
            "[game].path must be set to the game executable".to_string(),
        ));
    }

    if cfg.game.process_name.trim().is_empty() {
        return Err(StagehandError::ConfigError(
            "[game].process_name must be set (used for force-stop and path reconciliation)"
                .to_string(),
        ));
    }

    Ok(())
}

fn validate_run_section(cfg: &RawConfigFile) -> Result<()> {
    if cfg.run.power_limit == 0 {
        return Err(StagehandError::ConfigError(
            "[run].power_limit must be >= 1 (got 0)".to_string(),
        ));
    }

    if cfg.run.daily_reset_hour > 23 {
        return Err(StagehandError::ConfigError(format!(
            "[run].daily_reset_hour must be 0-23 (got {})",
            cfg.run.daily_reset_hour
        )));
    }

    Ok(())
}

fn validate_update_section(cfg: &RawConfigFile) -> Result<()> {
    if cfg.update.enabled && cfg.update.releases_url.is_none() {
        return Err(StagehandError::ConfigError(
            "[update].releases_url must be set when [update].enabled = true".to_string(),
        ));
    }

    if cfg.update.timeout_secs == 0 {
        return Err(StagehandError::ConfigError(
            "[update].timeout_secs must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}
