//! Console request log: one coloured line per request with timing and body size.

use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;

/// Groups digits in threes: 1234567 -> "1.234.567"
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Cyan for 200, brown for anything else
fn status_color(status: u16) -> &'static str {
    if status == 200 {
        "36"
    } else {
        "33"
    }
}

pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Тело читаем целиком, чтобы узнать реальный размер
    let (body, size) = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            let size = format_number(bytes.len());
            (Body::from(bytes), size)
        }
        Err(_) => (Body::default(), "error".to_string()),
    };

    println!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        status_color(parts.status.as_u16()),
        Local::now().format("%H:%M:%S"),
        start.elapsed().as_millis(),
        size,
        parts.status.as_u16(),
        method,
        uri.path()
    );

    Response::from_parts(parts, body)
}
