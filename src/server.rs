//! Kiosk service runtime.
//!
//! [`ServerHandle`] owns the whole lifecycle: metrics recorder, in-memory
//! store seeded from config, device adapters, REST API and graceful
//! shutdown. The CLI binary is a thin wrapper around it.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::{error, info, warn};

use crate::application::{KioskService, PinAuthenticator, ProfileService};
use crate::config::AppConfig;
use crate::domain::{
    DomainResult, MeasurementSource, PaymentGateway, PaymentStatus, RepositoryProvider,
};
use crate::infrastructure::vision::Calibration;
use crate::infrastructure::{
    FixedPaymentGateway, InMemoryRepositoryProvider, ManualOnlyMeasurementSource,
    SimulatedMeasurementSource, SimulatedPaymentGateway,
};
use crate::interfaces::http::modules::metrics::describe_kiosk_metrics;
use crate::interfaces::http::{create_api_router, ApiState};
use crate::support::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the kiosk service.
#[derive(Default)]
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
}

// ── Metrics ────────────────────────────────────────────────────────

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder, or reuse it on restart within
/// the same process.
pub fn prometheus_handle() -> Result<PrometheusHandle, BuildError> {
    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_kiosk_metrics();
    info!("Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

// ── Wiring ─────────────────────────────────────────────────────────

/// Build repositories, seed them from `[defaults]`, pick device adapters
/// from `[devices]` and return the state the router runs on.
pub async fn build_state(config: &AppConfig) -> DomainResult<ApiState> {
    let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());

    let profiles = Arc::new(ProfileService::new(repos.clone()));
    profiles
        .seed(
            config.defaults.airline.to_airline(),
            config.defaults.rule_pairs(),
        )
        .await?;
    info!(
        airline = %config.defaults.airline.code,
        rule_sets = config.defaults.rules.len(),
        "Default airline seeded"
    );

    let (measurements, gateway): (Arc<dyn MeasurementSource>, Arc<dyn PaymentGateway>) =
        if config.devices.simulate {
            let mut calibration = Calibration::new(config.devices.px_per_cm)?;
            if let Some(h) = config.devices.homography {
                calibration = calibration.with_homography(h);
            }
            info!(
                px_per_cm = config.devices.px_per_cm,
                approval_rate = config.devices.payment_approval_rate,
                "Using simulated camera, scale and payment terminal"
            );
            (
                Arc::new(SimulatedMeasurementSource::new(calibration)),
                Arc::new(SimulatedPaymentGateway::new(
                    config.devices.payment_approval_rate,
                )?),
            )
        } else {
            warn!("No devices attached: scans need manual measurements, payments are operator-confirmed");
            (
                Arc::new(ManualOnlyMeasurementSource),
                Arc::new(FixedPaymentGateway(PaymentStatus::Approved)),
            )
        };

    let kiosk = Arc::new(KioskService::new(repos, measurements, gateway));

    let sec = &config.security;
    let authenticator = Arc::new(PinAuthenticator::new(
        &sec.operator_pin,
        &sec.admin_pin,
        sec.bcrypt_cost,
        sec.jwt(),
    )?);
    info!(
        "JWT configured with {}h token expiration",
        sec.jwt_expiration_hours
    );

    Ok(ApiState {
        kiosk,
        profiles,
        authenticator,
        started_at: Arc::new(Instant::now()),
        simulated_devices: config.devices.simulate,
    })
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running kiosk service.
///
/// ```rust,no_run
/// use baggage_kiosk::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Application state shared with the router.
    pub state: ApiState,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the API is actually bound to (port 0 resolves here).
    pub local_addr: SocketAddr,

    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let config = opts.config;
        config.validate()?;

        info!("Starting baggage kiosk service...");

        let prometheus = prometheus_handle()?;
        let state = build_state(&config).await?;
        let router = create_api_router(state.clone(), prometheus);

        let shutdown = ShutdownCoordinator::new(config.server.shutdown_timeout);
        let signal = shutdown.signal();

        let listener = tokio::net::TcpListener::bind(config.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_server = axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(async move {
                signal.wait().await;
                info!("REST API received shutdown signal");
            });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            state,
            config,
            local_addr,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for shutdown to be triggered and the server to drain, bounded
    /// by `server.shutdown_timeout`.
    pub async fn wait(self) {
        let Self {
            shutdown, api_task, ..
        } = self;

        let drained = shutdown
            .drain_with_timeout(async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
            })
            .await;
        if !drained {
            warn!("Open connections were dropped at shutdown");
        }

        info!("Baggage kiosk shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down baggage kiosk service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Logging ────────────────────────────────────────────────────────

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` wins over `logging.level`. Call once at process startup,
/// before [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BagClass;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config.server.shutdown_timeout = 5;
        config.security.bcrypt_cost = 4;
        config
    }

    #[tokio::test]
    async fn state_is_seeded_from_defaults() {
        let state = build_state(&test_config()).await.unwrap();
        let airlines = state.profiles.list_airlines().await.unwrap();
        assert_eq!(airlines.len(), 1);
        assert_eq!(airlines[0].code, "JSM");
        assert!(state.profiles.get_rules("JSM", BagClass::Handbag).await.is_ok());
        assert!(state.simulated_devices);
    }

    #[tokio::test]
    async fn invalid_calibration_fails_startup() {
        let mut config = test_config();
        config.devices.px_per_cm = 0.0;
        assert!(build_state(&config).await.is_err());
    }

    #[tokio::test]
    async fn server_answers_health_and_shuts_down() {
        let handle = ServerHandle::start(ServerOptions {
            config: test_config(),
        })
        .await
        .unwrap();
        assert!(handle.is_running());

        let mut stream = tokio::net::TcpStream::connect(handle.local_addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"), "{}", response);
        assert!(response.contains("\"status\":\"ok\""));

        tokio::time::timeout(std::time::Duration::from_secs(10), handle.shutdown())
            .await
            .unwrap();
    }
}
