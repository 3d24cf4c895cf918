//! Airline and rule-set configuration service
//!
//! Operator configuration screens and the startup seeding both go through
//! here; handlers never touch the repositories directly.

use std::sync::Arc;

use tracing::info;

use crate::domain::airline::model::normalize_code;
use crate::domain::{
    Airline, BagClass, DomainError, DomainResult, LimitProfile, RepositoryProvider, RuleSet,
};

pub struct ProfileService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ProfileService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Airlines ────────────────────────────────────────────────

    pub async fn list_airlines(&self) -> DomainResult<Vec<Airline>> {
        self.repos.airlines().find_all().await
    }

    pub async fn get_airline(&self, code: &str) -> DomainResult<Airline> {
        let code = normalize_code(code);
        self.repos
            .airlines()
            .find_by_code(&code)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Airline",
                field: "code",
                value: code,
            })
    }

    pub async fn upsert_airline(&self, airline: Airline) -> DomainResult<Airline> {
        airline.validate()?;
        let saved = self.repos.airlines().upsert(airline).await?;
        info!(airline = %saved.code, name = %saved.name, "Airline saved");
        Ok(saved)
    }

    // ── Rules ───────────────────────────────────────────────────

    pub async fn get_rules(&self, airline_code: &str, bag_class: BagClass) -> DomainResult<RuleSet> {
        let code = normalize_code(airline_code);
        self.repos
            .rules()
            .find(&code, bag_class)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "RuleSet",
                field: "airline_code",
                value: format!("{}/{}", code, bag_class),
            })
    }

    pub async fn list_rules(&self, airline_code: &str) -> DomainResult<Vec<RuleSet>> {
        self.repos
            .rules()
            .find_for_airline(&normalize_code(airline_code))
            .await
    }

    /// Replace the limits of one airline / bag class. The airline must exist.
    pub async fn upsert_rules(
        &self,
        airline_code: &str,
        bag_class: BagClass,
        profile: LimitProfile,
    ) -> DomainResult<RuleSet> {
        let airline = self.get_airline(airline_code).await?;
        let rules = RuleSet::new(airline.code, bag_class, profile);
        rules.validate()?;

        let saved = self.repos.rules().upsert(rules).await?;
        info!(
            airline = %saved.airline_code,
            bag_class = %saved.bag_class,
            max_weight_kg = saved.profile.max_weight_kg,
            max_linear_cm = saved.profile.max_linear_cm,
            "Rule set saved"
        );
        Ok(saved)
    }

    /// Load the configured default airline and its rule sets.
    pub async fn seed(
        &self,
        airline: Airline,
        rules: Vec<(BagClass, LimitProfile)>,
    ) -> DomainResult<()> {
        let airline = self.upsert_airline(airline).await?;
        for (bag_class, profile) in rules {
            self.upsert_rules(&airline.code, bag_class, profile).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn service() -> ProfileService {
        ProfileService::new(Arc::new(InMemoryRepositoryProvider::new()))
    }

    #[tokio::test]
    async fn seeding_creates_airline_and_rules() {
        let svc = service();
        svc.seed(
            Airline::new("jsm", "JetSMART"),
            vec![(BagClass::Cabin, LimitProfile::default())],
        )
        .await
        .unwrap();

        assert_eq!(svc.list_airlines().await.unwrap().len(), 1);
        let rules = svc.get_rules("JSM", BagClass::Cabin).await.unwrap();
        assert_eq!(rules.profile, LimitProfile::default());
        assert!(matches!(
            svc.get_rules("JSM", BagClass::Handbag).await,
            Err(DomainError::NotFound { entity: "RuleSet", .. })
        ));
    }

    #[tokio::test]
    async fn rules_require_existing_airline() {
        let err = service()
            .upsert_rules("XXX", BagClass::Cabin, LimitProfile::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Airline", .. }));
    }

    #[tokio::test]
    async fn invalid_profile_is_not_stored() {
        let svc = service();
        svc.upsert_airline(Airline::new("JSM", "JetSMART")).await.unwrap();

        let mut profile = LimitProfile::default();
        profile.max_width_cm = -5.0;
        let err = svc
            .upsert_rules("JSM", BagClass::Cabin, profile)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(svc.list_rules("JSM").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lookups_normalize_code() {
        let svc = service();
        svc.upsert_airline(Airline::new("SKU", "Sky")).await.unwrap();
        assert_eq!(svc.get_airline(" sku").await.unwrap().name, "Sky");
    }
}
