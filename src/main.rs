//! Shared Todo Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod store;

use app::{App, ConfigErrorView};
use leptos::prelude::*;
use todo_core::{AppConfig, ConfigError};

const APP_NAME: &str = "SharedTodo";

fn main() {
    console_error_panic_hook::set_once();

    let config = config::load_config();
    let level = config.as_ref().map(|c| c.log_level).unwrap_or_default();
    if let Err(err) = console_logger::init_logger(APP_NAME, level.as_level()) {
        web_sys::console::warn_1(&err.to_string().into());
    }

    match config.and_then(start_backend) {
        Ok(config) => mount_to_body(move || view! { <App config=config.clone() /> }),
        Err(error) => {
            tracing::error!(%error, "cannot start");
            mount_to_body(move || view! { <ConfigErrorView error=error.clone() /> });
        }
    }
}

fn start_backend(config: AppConfig) -> Result<AppConfig, ConfigError> {
    commands::init_firebase(&config.firebase)
        .map_err(|e| ConfigError::InvalidValue("firebase".to_string(), e.to_string()))?;
    Ok(config)
}
