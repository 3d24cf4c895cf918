//! HTTP request metrics middleware

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

/// Path of the scrape endpoint; its own requests are not counted
const SCRAPE_PATH: &str = "/metrics";

/// Records `http_requests_total{method,path,status}` and
/// `http_request_duration_seconds{method,path}`.
///
/// `path` is the matched route template (`/api/v1/sessions/{id}`), so
/// session ids stay out of the label set. Requests that match no route are
/// counted under `unmatched`.
pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let path = match request.extensions().get::<MatchedPath>() {
        Some(matched) if matched.as_str() == SCRAPE_PATH => return next.run(request).await,
        Some(matched) => matched.as_str().to_string(),
        None => "unmatched".to_string(),
    };
    let method = request.method().to_string();

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();
    metrics::counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);
    metrics::histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(elapsed);

    response
}
