//! Route Gate
//!
//! Decides what a path renders given whether a session exists.

/// Path of the authenticated todo view
pub const HOME_PATH: &str = "/";
/// Path of the sign-in view
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteView {
    Todos,
    SignIn,
    NotFound,
    Redirect(&'static str),
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => HOME_PATH,
        trimmed => trimmed,
    }
}

pub fn resolve_route(path: &str, signed_in: bool) -> RouteView {
    match (normalize(path), signed_in) {
        (HOME_PATH, true) => RouteView::Todos,
        (HOME_PATH, false) => RouteView::Redirect(LOGIN_PATH),
        (LOGIN_PATH, false) => RouteView::SignIn,
        (LOGIN_PATH, true) => RouteView::Redirect(HOME_PATH),
        _ => RouteView::NotFound,
    }
}
