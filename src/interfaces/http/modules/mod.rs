pub mod airlines;
pub mod auth;
pub mod evaluate;
pub mod health;
pub mod metrics;
pub mod payments;
pub mod request_id;
pub mod rules;
pub mod scans;
pub mod sessions;
