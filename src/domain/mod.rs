//! Domain layer: value types, the compliance engine, aggregates and ports

pub mod airline;
pub mod compliance;
pub mod i18n;
pub mod payment;
pub mod ports;
pub mod repositories;
pub mod rules;
pub mod scan;
pub mod session;

// Re-export commonly used types
pub use airline::{Airline, AirlineRepository};
pub use compliance::{
    evaluate, FeeBreakdown, LimitProfile, Measurement, Verdict, Violation, ViolationCode,
};
pub use i18n::Language;
pub use payment::{Payment, PaymentMethod, PaymentRepository, PaymentStatus};
pub use ports::{
    AcquiredMeasurement, ChargeRequest, DetectedClass, Detection, MeasurementSource,
    PaymentGateway,
};
pub use repositories::{DomainResult, RepositoryProvider};
pub use rules::{BagClass, RuleSet, RuleSetRepository};
pub use scan::{ScanRecord, ScanRepository};
pub use session::{KioskSession, SessionRepository, SessionState};

// Re-export errors from support for convenience
pub use crate::support::errors::{DomainError, EngineError};
