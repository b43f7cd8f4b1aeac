//! Request logging middleware

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::info;
use uuid::Uuid;

/// Log every request with a correlation id, method, path, status and latency
pub async fn log_requests(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Request handled"
    );

    response
}
