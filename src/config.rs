//! Runtime Configuration
//!
//! Reads `window.TODO_APP_CONFIG` (set by `config.js`) into [`AppConfig`].

use todo_core::{AppConfig, ConfigError};
use wasm_bindgen::JsValue;

const CONFIG_GLOBAL: &str = "TODO_APP_CONFIG";

pub fn load_config() -> Result<AppConfig, ConfigError> {
    let window = web_sys::window().ok_or_else(|| ConfigError::Missing("no window".to_string()))?;
    let raw = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
        .map_err(|_| ConfigError::Missing(format!("window.{CONFIG_GLOBAL}")))?;
    if raw.is_undefined() || raw.is_null() {
        return Err(ConfigError::Missing(format!(
            "window.{CONFIG_GLOBAL} (copy config.example.js to config.js)"
        )));
    }

    let config: AppConfig =
        serde_wasm_bindgen::from_value(raw).map_err(|e| ConfigError::Malformed(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
