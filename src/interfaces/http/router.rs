//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{KioskService, PinAuthenticator, ProfileService};
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::dto::{
    FeesDto, LimitProfileDto, MeasurementDto, VerdictDto, ViolationDto,
};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{
    airlines, auth, evaluate, health, metrics, payments, request_id, rules, scans, sessions,
};

/// Everything the handlers need. Each handler keeps its own narrow
/// `State<T>` and axum derives it through `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub kiosk: Arc<KioskService>,
    pub profiles: Arc<ProfileService>,
    pub authenticator: Arc<PinAuthenticator>,
    pub started_at: Arc<Instant>,
    pub simulated_devices: bool,
}

impl FromRef<ApiState> for airlines::AirlineState {
    fn from_ref(s: &ApiState) -> Self {
        Self {
            profiles: Arc::clone(&s.profiles),
        }
    }
}

impl FromRef<ApiState> for rules::RulesState {
    fn from_ref(s: &ApiState) -> Self {
        Self {
            profiles: Arc::clone(&s.profiles),
        }
    }
}

impl FromRef<ApiState> for sessions::KioskState {
    fn from_ref(s: &ApiState) -> Self {
        Self {
            kiosk: Arc::clone(&s.kiosk),
        }
    }
}

impl FromRef<ApiState> for auth::AuthHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        Self {
            authenticator: Arc::clone(&s.authenticator),
        }
    }
}

impl FromRef<ApiState> for AuthState {
    fn from_ref(s: &ApiState) -> Self {
        Self {
            authenticator: Arc::clone(&s.authenticator),
        }
    }
}

impl FromRef<ApiState> for health::HealthState {
    fn from_ref(s: &ApiState) -> Self {
        Self {
            started_at: Arc::clone(&s.started_at),
            simulated_devices: s.simulated_devices,
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        evaluate::evaluate,
        airlines::list_airlines,
        airlines::get_airline,
        airlines::upsert_airline,
        rules::get_rules,
        rules::upsert_rules,
        sessions::start_session,
        sessions::get_session,
        sessions::complete_session,
        scans::create_scan,
        payments::create_payment,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            auth::LoginRequest,
            auth::LoginResponse,
            MeasurementDto,
            LimitProfileDto,
            ViolationDto,
            FeesDto,
            VerdictDto,
            evaluate::EvaluateRequest,
            airlines::AirlineDto,
            rules::RuleSetDto,
            rules::UpsertRulesRequest,
            sessions::StartSessionRequest,
            sessions::SessionDto,
            sessions::ScanDto,
            sessions::PaymentDto,
            sessions::SessionSummaryDto,
            scans::ScanRequest,
            payments::PaymentRequest,
            payments::PaymentResultDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Operator and admin PIN login"),
        (name = "Compliance", description = "Stateless bag evaluation against a limit profile"),
        (name = "Airlines", description = "Airline branding profiles"),
        (name = "Rules", description = "Per-airline, per-bag-class limit profiles"),
        (name = "Sessions", description = "Passenger kiosk sessions"),
        (name = "Scans", description = "Bag measurement and verdict"),
        (name = "Payments", description = "Excess baggage fee payment"),
    ),
    info(
        title = "Baggage Kiosk API",
        version = "1.0.0",
        description = "Carry-on baggage compliance checks, kiosk sessions and fee payment",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: ApiState, prometheus_handle: PrometheusHandle) -> Router {
    let require_auth = middleware::from_fn_with_state(AuthState::from_ref(&state), auth_middleware);

    // Reads are public; configuration writes sit behind the bearer token
    let api_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/evaluate", post(evaluate::evaluate))
        .route(
            "/airlines",
            get(airlines::list_airlines)
                .merge(post(airlines::upsert_airline).route_layer(require_auth.clone())),
        )
        .route("/airlines/{code}", get(airlines::get_airline))
        .route(
            "/rules",
            post(rules::upsert_rules).route_layer(require_auth),
        )
        .route("/rules/{airline_code}", get(rules::get_rules))
        .route("/sessions", post(sessions::start_session))
        .route("/sessions/{id}", get(sessions::get_session))
        .route("/sessions/{id}/complete", post(sessions::complete_session))
        .route("/scans", post(scans::create_scan))
        .route("/payments", post(payments::create_payment));

    let app_routes = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes)
        .with_state(state);

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics::MetricsState {
            handle: prometheus_handle,
        });

    let swagger_routes =
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(swagger_routes)
        .merge(metrics_routes)
        .merge(app_routes)
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
