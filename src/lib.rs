use anyhow::Result;

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod manager;
pub mod models;
pub mod navigation;
pub mod notify;
pub mod rollcall;
pub mod roster;
pub mod scanner;

use crate::app::App;
use crate::config::Settings;

/// Creates a session from `config.toml` (or the file at `config_path`) and the environment.
pub fn create_default_app(config_path: Option<&str>) -> Result<App> {
    let settings = Settings::load(config_path)?;
    tracing::debug!(?settings, "settings loaded");

    App::from_settings(settings)
}
