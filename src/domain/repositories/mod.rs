//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` - unified access to all per-aggregate repositories
//! - `DomainResult` - standard result type for domain operations

use super::airline::AirlineRepository;
use super::payment::PaymentRepository;
use super::rules::RuleSetRepository;
use super::scan::ScanRepository;
use super::session::SessionRepository;
use crate::support::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let rules = repos.rules().find("JSM", BagClass::Cabin).await?;
///     let scan = repos.scans().find_latest_for_session(&session_id).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn airlines(&self) -> &dyn AirlineRepository;
    fn rules(&self) -> &dyn RuleSetRepository;
    fn sessions(&self) -> &dyn SessionRepository;
    fn scans(&self) -> &dyn ScanRepository;
    fn payments(&self) -> &dyn PaymentRepository;
}
