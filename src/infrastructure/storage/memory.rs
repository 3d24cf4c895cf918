//! In-memory repository implementation
//!
//! Backs every repository with `DashMap`. Used by the service binary (the
//! kiosk keeps no state across restarts) and by tests.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{
    Airline, AirlineRepository, BagClass, DomainError, DomainResult, KioskSession, Payment,
    PaymentRepository, RepositoryProvider, RuleSet, RuleSetRepository, ScanRecord,
    ScanRepository, SessionRepository,
};

// ── Airlines ───────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryAirlineRepository {
    airlines: DashMap<String, Airline>,
}

#[async_trait]
impl AirlineRepository for InMemoryAirlineRepository {
    async fn find_by_code(&self, code: &str) -> DomainResult<Option<Airline>> {
        Ok(self.airlines.get(code).map(|a| a.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Airline>> {
        let mut all: Vec<Airline> = self.airlines.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(all)
    }

    async fn upsert(&self, airline: Airline) -> DomainResult<Airline> {
        self.airlines.insert(airline.code.clone(), airline.clone());
        Ok(airline)
    }
}

// ── Rule sets ──────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryRuleSetRepository {
    rules: DashMap<(String, BagClass), RuleSet>,
}

#[async_trait]
impl RuleSetRepository for InMemoryRuleSetRepository {
    async fn find(&self, airline_code: &str, bag_class: BagClass) -> DomainResult<Option<RuleSet>> {
        Ok(self
            .rules
            .get(&(airline_code.to_string(), bag_class))
            .map(|r| r.clone()))
    }

    async fn find_for_airline(&self, airline_code: &str) -> DomainResult<Vec<RuleSet>> {
        let mut found: Vec<RuleSet> = self
            .rules
            .iter()
            .filter(|e| e.key().0 == airline_code)
            .map(|e| e.value().clone())
            .collect();
        found.sort_by_key(|r| r.bag_class.as_str());
        Ok(found)
    }

    async fn upsert(&self, mut rules: RuleSet) -> DomainResult<RuleSet> {
        let key = (rules.airline_code.clone(), rules.bag_class);
        // Keep the id stable across updates of the same key
        if let Some(existing) = self.rules.get(&key) {
            rules.id = existing.id.clone();
        }
        self.rules.insert(key, rules.clone());
        Ok(rules)
    }
}

// ── Sessions ───────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: DashMap<String, KioskSession>,
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<KioskSession>> {
        Ok(self.sessions.get(id).map(|s| s.clone()))
    }

    async fn save(&self, session: KioskSession) -> DomainResult<KioskSession> {
        if self.sessions.contains_key(&session.id) {
            return Err(DomainError::Conflict(format!("session {}", session.id)));
        }
        self.sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn update(&self, session: KioskSession) -> DomainResult<()> {
        match self.sessions.get_mut(&session.id) {
            Some(mut existing) => {
                *existing = session;
                Ok(())
            }
            None => Err(DomainError::NotFound {
                entity: "Session",
                field: "id",
                value: session.id,
            }),
        }
    }
}

// ── Scans ──────────────────────────────────────────────────────

/// Scans grouped per session in insertion order
#[derive(Default)]
pub struct InMemoryScanRepository {
    by_session: DashMap<String, Vec<ScanRecord>>,
}

#[async_trait]
impl ScanRepository for InMemoryScanRepository {
    async fn save(&self, scan: ScanRecord) -> DomainResult<ScanRecord> {
        self.by_session
            .entry(scan.session_id.clone())
            .or_default()
            .push(scan.clone());
        Ok(scan)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ScanRecord>> {
        Ok(self
            .by_session
            .iter()
            .find_map(|e| e.value().iter().find(|s| s.id == id).cloned()))
    }

    async fn find_latest_for_session(&self, session_id: &str) -> DomainResult<Option<ScanRecord>> {
        Ok(self
            .by_session
            .get(session_id)
            .and_then(|scans| scans.last().cloned()))
    }

    async fn find_for_session(&self, session_id: &str) -> DomainResult<Vec<ScanRecord>> {
        Ok(self
            .by_session
            .get(session_id)
            .map(|scans| scans.clone())
            .unwrap_or_default())
    }
}

// ── Payments ───────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryPaymentRepository {
    by_session: DashMap<String, Vec<Payment>>,
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn save(&self, payment: Payment) -> DomainResult<Payment> {
        self.by_session
            .entry(payment.session_id.clone())
            .or_default()
            .push(payment.clone());
        Ok(payment)
    }

    async fn find_for_session(&self, session_id: &str) -> DomainResult<Vec<Payment>> {
        Ok(self
            .by_session
            .get(session_id)
            .map(|p| p.clone())
            .unwrap_or_default())
    }
}

// ── Provider ───────────────────────────────────────────────────

/// Unified in-memory repository provider.
///
/// ```ignore
/// let repos = InMemoryRepositoryProvider::new();
/// let airline = repos.airlines().find_by_code("JSM").await?;
/// ```
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    airlines: InMemoryAirlineRepository,
    rules: InMemoryRuleSetRepository,
    sessions: InMemorySessionRepository,
    scans: InMemoryScanRepository,
    payments: InMemoryPaymentRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn airlines(&self) -> &dyn AirlineRepository {
        &self.airlines
    }

    fn rules(&self) -> &dyn RuleSetRepository {
        &self.rules
    }

    fn sessions(&self) -> &dyn SessionRepository {
        &self.sessions
    }

    fn scans(&self) -> &dyn ScanRepository {
        &self.scans
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{evaluate, Language, LimitProfile, Measurement};

    #[tokio::test]
    async fn rule_upsert_keeps_id_per_key() {
        let repos = InMemoryRepositoryProvider::new();
        let first = repos
            .rules()
            .upsert(RuleSet::new("JSM", BagClass::Cabin, LimitProfile::default()))
            .await
            .unwrap();

        let mut profile = LimitProfile::default();
        profile.max_weight_kg = 12.0;
        let second = repos
            .rules()
            .upsert(RuleSet::new("JSM", BagClass::Cabin, profile))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        let stored = repos.rules().find("JSM", BagClass::Cabin).await.unwrap().unwrap();
        assert_eq!(stored.profile.max_weight_kg, 12.0);
        assert!(repos.rules().find("JSM", BagClass::Handbag).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn latest_scan_is_last_saved() {
        let repos = InMemoryRepositoryProvider::new();
        let profile = LimitProfile::default();
        for width in [30.0, 40.0] {
            let m = Measurement::new(width, 50.0, 20.0, 8.0);
            let verdict = evaluate(&m, &profile, true).unwrap();
            repos
                .scans()
                .save(ScanRecord::new("s1", BagClass::Cabin, None, m, verdict))
                .await
                .unwrap();
        }

        let latest = repos.scans().find_latest_for_session("s1").await.unwrap().unwrap();
        assert_eq!(latest.measurement.width_cm, 40.0);
        assert_eq!(repos.scans().find_for_session("s1").await.unwrap().len(), 2);
        assert!(repos.scans().find_latest_for_session("s2").await.unwrap().is_none());

        let found = repos.scans().find_by_id(&latest.id).await.unwrap();
        assert_eq!(found, Some(latest));
    }

    #[tokio::test]
    async fn updating_unknown_session_is_not_found() {
        let repos = InMemoryRepositoryProvider::new();
        let err = repos
            .sessions()
            .update(KioskSession::new("JSM", Language::Es))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Session", .. }));
    }

    #[tokio::test]
    async fn airlines_listed_by_code() {
        let repos = InMemoryRepositoryProvider::new();
        repos.airlines().upsert(Airline::new("SKU", "Sky")).await.unwrap();
        repos.airlines().upsert(Airline::new("JSM", "JetSMART")).await.unwrap();
        let codes: Vec<String> = repos
            .airlines()
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.code)
            .collect();
        assert_eq!(codes, vec!["JSM", "SKU"]);
    }
}
