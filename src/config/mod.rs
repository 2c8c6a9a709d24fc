// src/config/mod.rs

pub mod loader;
pub mod model;
pub mod store;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{ConfigFile, GameSection, HooksSection, RawConfigFile, RunSection, UpdateSection};
pub use store::TomlConfigStore;
