//! Backend URL helpers.
//!
//! The backend listens on port 3000 and also serves the built frontend, so
//! when the page comes from that port requests stay same-origin. During
//! `trunk serve` the page comes from another port and requests go to 3000.

const BACKEND_PORT: &str = "3000";

/// API origin, e.g. "http://localhost:3000". Empty when same-origin or when
/// there is no window.
pub fn api_base() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };
    let location = window.location();
    if location.port().is_ok_and(|port| port == BACKEND_PORT) {
        return String::new();
    }
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
}

/// Full URL for an API path starting with "/api/"
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
