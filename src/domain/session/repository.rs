//! Kiosk session repository interface

use async_trait::async_trait;

use super::model::KioskSession;
use crate::domain::DomainResult;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<KioskSession>>;
    async fn save(&self, session: KioskSession) -> DomainResult<KioskSession>;
    async fn update(&self, session: KioskSession) -> DomainResult<()>;
}
