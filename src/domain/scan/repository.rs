//! Scan repository interface

use async_trait::async_trait;

use super::model::ScanRecord;
use crate::domain::DomainResult;

#[async_trait]
pub trait ScanRepository: Send + Sync {
    async fn save(&self, scan: ScanRecord) -> DomainResult<ScanRecord>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ScanRecord>>;
    /// Most recently saved scan of a session
    async fn find_latest_for_session(&self, session_id: &str) -> DomainResult<Option<ScanRecord>>;
    /// All scans of a session, oldest first
    async fn find_for_session(&self, session_id: &str) -> DomainResult<Vec<ScanRecord>>;
}
