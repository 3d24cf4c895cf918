//! `GET /metrics` and metric descriptions

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// Register help texts for every series the service emits. Call once after
/// the recorder is installed.
pub fn describe_kiosk_metrics() {
    describe_counter!(
        "baggage_evaluations_total",
        "Bags evaluated at the kiosk, by compliant=true|false"
    );
    describe_counter!(
        "kiosk_sessions_started_total",
        "Kiosk sessions opened, by airline"
    );
    describe_counter!(
        "kiosk_payments_total",
        "Excess-fee charges attempted, by status=approved|rejected"
    );
    describe_counter!("http_requests_total", "HTTP requests by method, route and status");
    describe_histogram!(
        "http_request_duration_seconds",
        Unit::Seconds,
        "HTTP request latency by method and route"
    );
}

/// Prometheus text format, no auth
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        state.handle.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::ServiceExt;

    #[tokio::test]
    async fn renders_recorded_kiosk_counters() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        metrics::with_local_recorder(&recorder, || {
            describe_kiosk_metrics();
            metrics::counter!("baggage_evaluations_total", "compliant" => "false").increment(2);
        });

        let app = Router::new()
            .route("/metrics", get(prometheus_metrics))
            .with_state(MetricsState { handle });
        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("baggage_evaluations_total{compliant=\"false\"} 2"));
        assert!(text.contains("# HELP baggage_evaluations_total"));
    }
}
