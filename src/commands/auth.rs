//! Auth Commands
//!
//! Google sign-in through `firebase.auth()`.

use async_trait::async_trait;
use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use todo_core::{IdentityCallback, IdentityProvider, Subscription, TodoError, TodoResult, UserIdentity};

use super::{js_message, string_prop};

#[wasm_bindgen]
extern "C" {
    type Auth;

    #[wasm_bindgen(js_namespace = firebase, js_name = auth)]
    fn auth() -> Auth;

    #[wasm_bindgen(method, js_name = onAuthStateChanged)]
    fn on_auth_state_changed(this: &Auth, next: &Closure<dyn FnMut(JsValue)>) -> Function;

    #[wasm_bindgen(method, catch, js_name = signInWithPopup)]
    fn sign_in_with_popup(this: &Auth, provider: &GoogleAuthProvider) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = signOut)]
    fn sign_out(this: &Auth) -> Result<Promise, JsValue>;

    #[wasm_bindgen(js_namespace = ["firebase", "auth"])]
    type GoogleAuthProvider;

    #[wasm_bindgen(constructor, js_namespace = ["firebase", "auth"])]
    fn new() -> GoogleAuthProvider;
}

/// Identity provider backed by Firebase Auth
#[derive(Debug, Clone, Copy, Default)]
pub struct FirebaseAuth;

/// Read a Firebase `User`; `null`/`undefined` means signed out
fn identity_from_js(user: &JsValue) -> Option<UserIdentity> {
    if user.is_null() || user.is_undefined() {
        return None;
    }
    let uid = string_prop(user, "uid")?;
    Some(UserIdentity {
        uid,
        display_name: string_prop(user, "displayName"),
        email: string_prop(user, "email").unwrap_or_default(),
    })
}

fn auth_error(err: JsValue) -> TodoError {
    TodoError::Auth(js_message(&err))
}

#[async_trait(?Send)]
impl IdentityProvider for FirebaseAuth {
    fn subscribe(&self, on_change: IdentityCallback) -> Subscription {
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |user: JsValue| {
            on_change(identity_from_js(&user));
        });
        let unsubscribe = auth().on_auth_state_changed(&callback);

        Subscription::new("auth-state", move || {
            if let Err(err) = unsubscribe.call0(&JsValue::NULL) {
                tracing::warn!(error = %js_message(&err), "auth listener release failed");
            }
            drop(callback);
        })
    }

    async fn sign_in_interactive(&self) -> TodoResult<UserIdentity> {
        let promise = auth()
            .sign_in_with_popup(&GoogleAuthProvider::new())
            .map_err(auth_error)?;
        let credential = JsFuture::from(promise).await.map_err(auth_error)?;
        let user = js_sys::Reflect::get(&credential, &JsValue::from_str("user")).map_err(auth_error)?;
        identity_from_js(&user).ok_or_else(|| TodoError::Auth("sign-in returned no user".to_string()))
    }

    async fn sign_out(&self) -> TodoResult<()> {
        let promise = auth().sign_out().map_err(auth_error)?;
        JsFuture::from(promise).await.map_err(auth_error)?;
        Ok(())
    }
}
