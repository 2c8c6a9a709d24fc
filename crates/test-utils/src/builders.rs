#![allow(dead_code)]

use stagehand::config::{ConfigFile, GameSection, HooksSection, RawConfigFile, RunSection,
    UpdateSection};
use stagehand::types::AfterFinishAction;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    raw: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawConfigFile {
                game: GameSection {
                    path: "/games/client/game".to_string(),
                    process_name: "game".to_string(),
                    auto_set_resolution: false,
                    auto_set_game_path: false,
                },
                run: RunSection::default(),
                update: UpdateSection::default(),
                hooks: HooksSection::default(),
            },
        }
    }

    pub fn game_path(mut self, path: &str) -> Self {
        self.raw.game.path = path.to_string();
        self
    }

    pub fn auto_set_resolution(mut self, val: bool) -> Self {
        self.raw.game.auto_set_resolution = val;
        self
    }

    pub fn auto_set_game_path(mut self, val: bool) -> Self {
        self.raw.game.auto_set_game_path = val;
        self
    }

    pub fn after_finish(mut self, action: AfterFinishAction) -> Self {
        self.raw.run.after_finish = action;
        self
    }

    pub fn play_audio(mut self, val: bool) -> Self {
        self.raw.run.play_audio = val;
        self
    }

    pub fn power_limit(mut self, limit: u32) -> Self {
        self.raw.run.power_limit = limit;
        self
    }

    pub fn daily_reset_hour(mut self, hour: u32) -> Self {
        self.raw.run.daily_reset_hour = hour;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
