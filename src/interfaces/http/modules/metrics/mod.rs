//! Prometheus scrape endpoint, HTTP request series and the kiosk's own
//! business counters

pub mod handlers;
pub mod middleware;

pub use handlers::{describe_kiosk_metrics, prometheus_metrics, MetricsState};
pub use middleware::http_metrics_middleware;
