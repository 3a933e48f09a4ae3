//! Firebase Bindings
//!
//! Frontend bindings to the Firebase compat SDK loaded by `index.html`,
//! organized by domain.

mod auth;
mod todos;

use wasm_bindgen::prelude::*;

use todo_core::{FirebaseOptions, TodoError};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = firebase, js_name = initializeApp)]
    fn initialize_app(options: &JsValue) -> Result<JsValue, JsValue>;
}

// Re-export all public items
pub use auth::*;
pub use todos::*;

/// Initialize the default Firebase app. Must run before any binding is used.
pub fn init_firebase(options: &FirebaseOptions) -> Result<(), TodoError> {
    let js_options = to_js(options)?;
    initialize_app(&js_options).map_err(|e| TodoError::Store(js_message(&e)))?;
    tracing::info!(project = %options.project_id, "firebase initialized");
    Ok(())
}

/// Serialize for the SDK: `None` becomes `null`, never `undefined`
pub(crate) fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, TodoError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| TodoError::Decode(e.to_string()))
}

/// Best human-readable text of a thrown JS value
pub(crate) fn js_message(err: &JsValue) -> String {
    js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"))
}

pub(crate) fn string_prop(target: &JsValue, name: &str) -> Option<String> {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|v| v.as_string())
}
