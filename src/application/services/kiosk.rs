//! Kiosk workflow: session → scan → (payment) → completion
//!
//! Every compliance decision goes through [`evaluate`]; this service only
//! sequences the steps, talks to the devices and keeps the records.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{info, warn};

use crate::domain::airline::model::normalize_code;
use crate::domain::{
    evaluate, AcquiredMeasurement, BagClass, ChargeRequest, DomainError, DomainResult,
    KioskSession, Language, Measurement, MeasurementSource, Payment, PaymentGateway,
    PaymentMethod, PaymentStatus, RepositoryProvider, ScanRecord, SessionState,
};

/// Largest accepted gap between a client-sent amount and the fee due
const AMOUNT_EPSILON: f64 = 0.005;

#[derive(Debug, Clone, Default)]
pub struct ScanRequest {
    pub session_id: String,
    pub bag_class: BagClass,
    /// Scale reading entered by the operator; replaces the device weight
    pub weight_kg: Option<f64>,
    /// Full manual reading; the measurement source is not consulted
    pub measurement: Option<Measurement>,
}

#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub session_id: String,
    pub method: PaymentMethod,
    /// Amount shown to the passenger, checked against the fee due
    pub amount: Option<f64>,
}

/// Session with everything recorded against it
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub session: KioskSession,
    pub latest_scan: Option<ScanRecord>,
    pub payments: Vec<Payment>,
}

pub struct KioskService {
    repos: Arc<dyn RepositoryProvider>,
    measurements: Arc<dyn MeasurementSource>,
    gateway: Arc<dyn PaymentGateway>,
    /// Serializes scan, pay and complete per session, so a state check and
    /// the transition it guards cannot interleave with another request.
    session_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl KioskService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        measurements: Arc<dyn MeasurementSource>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            repos,
            measurements,
            gateway,
            session_locks: DashMap::new(),
        }
    }

    async fn lock_session(&self, session_id: &str) -> OwnedMutexGuard<()> {
        let lock = Arc::clone(&self.session_locks.entry(session_id.to_string()).or_default());
        lock.lock_owned().await
    }

    /// Open a session for an airline that has at least one rule set.
    pub async fn start_session(
        &self,
        airline_code: &str,
        language: Language,
    ) -> DomainResult<KioskSession> {
        let code = normalize_code(airline_code);
        if self.repos.airlines().find_by_code(&code).await?.is_none() {
            return Err(DomainError::NotFound {
                entity: "Airline",
                field: "code",
                value: code,
            });
        }
        if self.repos.rules().find_for_airline(&code).await?.is_empty() {
            return Err(DomainError::NotFound {
                entity: "RuleSet",
                field: "airline_code",
                value: code,
            });
        }

        let session = self
            .repos
            .sessions()
            .save(KioskSession::new(code, language))
            .await?;

        metrics::counter!("kiosk_sessions_started_total", "airline" => session.airline_code.clone())
            .increment(1);
        info!(
            session_id = %session.id,
            airline = %session.airline_code,
            language = %session.language,
            "Session started"
        );
        Ok(session)
    }

    pub async fn get_session(&self, session_id: &str) -> DomainResult<KioskSession> {
        self.repos
            .sessions()
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Session",
                field: "id",
                value: session_id.to_string(),
            })
    }

    /// Measure a bag, evaluate it against the session airline's rules and
    /// record the result.
    pub async fn scan(&self, request: ScanRequest) -> DomainResult<(ScanRecord, KioskSession)> {
        let _guard = self.lock_session(&request.session_id).await;
        let mut session = self.get_session(&request.session_id).await?;
        // Both Scanned variants are reachable from the same states
        if !session
            .state
            .can_transition_to(SessionState::Scanned { compliant: true })
        {
            return Err(DomainError::InvalidState(format!(
                "session {} cannot be scanned while {}",
                session.id, session.state
            )));
        }

        let rules = self
            .repos
            .rules()
            .find(&session.airline_code, request.bag_class)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "RuleSet",
                field: "airline_code",
                value: format!("{}/{}", session.airline_code, request.bag_class),
            })?;

        let mut acquired = match request.measurement {
            Some(measurement) => AcquiredMeasurement {
                measurement,
                detected_class: None,
            },
            None => self.measurements.acquire().await?,
        };
        if let Some(weight_kg) = request.weight_kg {
            acquired.measurement.weight_kg = weight_kg;
        }

        let verdict = evaluate(&acquired.measurement, &rules.profile, true)?
            .localized(session.language);
        let compliant = verdict.compliant;

        session.advance(SessionState::Scanned { compliant })?;
        let record = self
            .repos
            .scans()
            .save(ScanRecord::new(
                session.id.clone(),
                request.bag_class,
                acquired.detected_class,
                acquired.measurement,
                verdict,
            ))
            .await?;
        self.repos.sessions().update(session.clone()).await?;

        metrics::counter!(
            "baggage_evaluations_total",
            "compliant" => if compliant { "true" } else { "false" }
        )
        .increment(1);
        info!(
            session_id = %record.session_id,
            scan_id = %record.id,
            bag_class = %record.bag_class,
            compliant,
            violations = record.verdict.violations.len(),
            total = record.amount_due().unwrap_or(0.0),
            "Bag scanned"
        );
        Ok((record, session))
    }

    /// Charge the fees of the session's latest scan.
    pub async fn pay(&self, request: PaymentRequest) -> DomainResult<(Payment, KioskSession)> {
        let _guard = self.lock_session(&request.session_id).await;
        let mut session = self.get_session(&request.session_id).await?;
        let scan = self
            .repos
            .scans()
            .find_latest_for_session(&session.id)
            .await?
            .ok_or_else(|| {
                DomainError::InvalidState(format!("session {} has no scan to pay", session.id))
            })?;

        let (due, currency) = match (&scan.verdict.fees, scan.verdict.compliant) {
            (Some(fees), false) => (fees.total, fees.currency.clone()),
            _ => {
                return Err(DomainError::InvalidState(format!(
                    "latest scan of session {} has nothing to pay",
                    session.id
                )))
            }
        };

        if let Some(amount) = request.amount {
            if (amount - due).abs() > AMOUNT_EPSILON {
                return Err(DomainError::Validation(format!(
                    "amount {:.2} does not match fee due {:.2} {}",
                    amount, due, currency
                )));
            }
        }

        if session.state != SessionState::AwaitingPayment {
            session.advance(SessionState::AwaitingPayment)?;
            self.repos.sessions().update(session.clone()).await?;
        }

        let charge = ChargeRequest {
            session_id: session.id.clone(),
            amount: due,
            currency: currency.clone(),
            method: request.method,
        };
        let status = self.gateway.charge(&charge).await?;

        let next = match status {
            PaymentStatus::Approved => SessionState::Paid,
            PaymentStatus::Rejected => SessionState::PaymentRejected,
        };
        session.advance(next)?;

        let payment = self
            .repos
            .payments()
            .save(Payment {
                id: uuid::Uuid::new_v4().to_string(),
                session_id: session.id.clone(),
                scan_id: scan.id,
                amount: due,
                currency,
                method: request.method,
                status,
                created_at: chrono::Utc::now(),
            })
            .await?;
        self.repos.sessions().update(session.clone()).await?;

        metrics::counter!("kiosk_payments_total", "status" => status.as_str()).increment(1);
        match status {
            PaymentStatus::Approved => info!(
                session_id = %session.id,
                payment_id = %payment.id,
                method = %payment.method,
                total = payment.amount,
                currency = %payment.currency,
                "Payment approved"
            ),
            PaymentStatus::Rejected => warn!(
                session_id = %session.id,
                payment_id = %payment.id,
                method = %payment.method,
                total = payment.amount,
                "Payment rejected"
            ),
        }
        Ok((payment, session))
    }

    pub async fn complete(&self, session_id: &str) -> DomainResult<KioskSession> {
        let _guard = self.lock_session(session_id).await;
        let mut session = self.get_session(session_id).await?;
        session.advance(SessionState::Completed)?;
        self.repos.sessions().update(session.clone()).await?;
        // Completed is terminal; late waiters still hold their own clone
        self.session_locks.remove(session_id);

        info!(session_id = %session.id, airline = %session.airline_code, "Session completed");
        Ok(session)
    }

    pub async fn summary(&self, session_id: &str) -> DomainResult<SessionSummary> {
        let session = self.get_session(session_id).await?;
        let latest_scan = self.repos.scans().find_latest_for_session(session_id).await?;
        let payments = self.repos.payments().find_for_session(session_id).await?;
        Ok(SessionSummary {
            session,
            latest_scan,
            payments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Airline, LimitProfile, ViolationCode};
    use crate::infrastructure::devices::{FixedMeasurementSource, FixedPaymentGateway};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    /// Terminal that takes a while to answer, so concurrent charges overlap
    struct SlowGateway;

    #[async_trait::async_trait]
    impl PaymentGateway for SlowGateway {
        async fn charge(&self, _request: &ChargeRequest) -> DomainResult<PaymentStatus> {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            Ok(PaymentStatus::Approved)
        }
    }

    async fn service_with(reading: Measurement, status: PaymentStatus) -> KioskService {
        service_with_gateway(reading, Arc::new(FixedPaymentGateway(status))).await
    }

    async fn service_with_gateway(
        reading: Measurement,
        gateway: Arc<dyn PaymentGateway>,
    ) -> KioskService {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        repos
            .airlines()
            .upsert(Airline::new("JSM", "JetSMART"))
            .await
            .unwrap();
        repos
            .rules()
            .upsert(crate::domain::RuleSet::new(
                "JSM",
                BagClass::Cabin,
                LimitProfile::default(),
            ))
            .await
            .unwrap();

        KioskService::new(
            repos,
            Arc::new(FixedMeasurementSource::new(reading)),
            gateway,
        )
    }

    fn scan_of(session: &KioskSession) -> ScanRequest {
        ScanRequest {
            session_id: session.id.clone(),
            ..ScanRequest::default()
        }
    }

    fn pay_for(session: &KioskSession, amount: Option<f64>) -> PaymentRequest {
        PaymentRequest {
            session_id: session.id.clone(),
            method: PaymentMethod::Card,
            amount,
        }
    }

    const COMPLIANT: Measurement = Measurement {
        width_cm: 30.0,
        length_cm: 50.0,
        height_cm: 20.0,
        weight_kg: 8.0,
    };
    const TOO_WIDE: Measurement = Measurement {
        width_cm: 40.0,
        length_cm: 50.0,
        height_cm: 20.0,
        weight_kg: 8.0,
    };

    #[tokio::test]
    async fn compliant_bag_completes_without_payment() {
        let svc = service_with(COMPLIANT, PaymentStatus::Approved).await;
        let session = svc.start_session("jsm", Language::Es).await.unwrap();

        let (scan, _) = svc.scan(scan_of(&session)).await.unwrap();
        assert!(scan.verdict.compliant);
        assert!(scan.verdict.fees.is_none());

        let err = svc.pay(pay_for(&session, None)).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));

        let done = svc.complete(&session.id).await.unwrap();
        assert_eq!(done.state, SessionState::Completed);
    }

    #[tokio::test]
    async fn oversize_bag_is_charged_flat_fee() {
        let svc = service_with(TOO_WIDE, PaymentStatus::Approved).await;
        let session = svc.start_session("JSM", Language::Es).await.unwrap();

        let (scan, _) = svc.scan(scan_of(&session)).await.unwrap();
        assert_eq!(scan.verdict.codes(), vec![ViolationCode::Width]);
        assert_eq!(scan.verdict.violations[0].message, "Excede ancho por 4.0 cm");
        assert_eq!(scan.amount_due(), Some(30.0));

        assert!(matches!(
            svc.complete(&session.id).await,
            Err(DomainError::InvalidState(_))
        ));

        let (payment, session) = svc.pay(pay_for(&session, Some(30.0))).await.unwrap();
        assert_eq!(payment.status, PaymentStatus::Approved);
        assert_eq!(payment.amount, 30.0);
        assert_eq!(payment.scan_id, scan.id);
        assert_eq!(session.state, SessionState::Paid);

        svc.complete(&session.id).await.unwrap();
        let summary = svc.summary(&session.id).await.unwrap();
        assert_eq!(summary.payments.len(), 1);
        assert_eq!(summary.latest_scan.map(|s| s.id), Some(scan.id));
    }

    #[tokio::test]
    async fn client_amount_must_match_fee_due() {
        let svc = service_with(TOO_WIDE, PaymentStatus::Approved).await;
        let session = svc.start_session("JSM", Language::En).await.unwrap();
        svc.scan(scan_of(&session)).await.unwrap();

        let err = svc.pay(pay_for(&session, Some(25.0))).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        // Rounding noise within half a cent is accepted
        assert!(svc.pay(pay_for(&session, Some(30.004))).await.is_ok());
    }

    #[tokio::test]
    async fn rejected_payment_can_be_retried_or_rescanned() {
        let svc = service_with(TOO_WIDE, PaymentStatus::Rejected).await;
        let session = svc.start_session("JSM", Language::Es).await.unwrap();
        svc.scan(scan_of(&session)).await.unwrap();

        let (payment, session) = svc.pay(pay_for(&session, None)).await.unwrap();
        assert_eq!(payment.status, PaymentStatus::Rejected);
        assert_eq!(session.state, SessionState::PaymentRejected);

        let (_, session) = svc.pay(pay_for(&session, None)).await.unwrap();
        assert_eq!(session.state, SessionState::PaymentRejected);

        let (rescan, session) = svc
            .scan(ScanRequest {
                measurement: Some(COMPLIANT),
                ..scan_of(&session)
            })
            .await
            .unwrap();
        assert!(rescan.verdict.compliant);
        assert_eq!(session.state, SessionState::Scanned { compliant: true });
        assert_eq!(svc.summary(&session.id).await.unwrap().payments.len(), 2);
        svc.complete(&session.id).await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_payments_charge_once() {
        let svc = service_with_gateway(TOO_WIDE, Arc::new(SlowGateway)).await;
        let session = svc.start_session("JSM", Language::Es).await.unwrap();
        svc.scan(scan_of(&session)).await.unwrap();

        let (first, second) = tokio::join!(
            svc.pay(pay_for(&session, None)),
            svc.pay(pay_for(&session, None))
        );
        assert_eq!(first.is_ok() as u8 + second.is_ok() as u8, 1);
        let err = first.err().or(second.err()).unwrap();
        assert!(matches!(err, DomainError::InvalidState(_)));

        let summary = svc.summary(&session.id).await.unwrap();
        assert_eq!(summary.payments.len(), 1);
        assert_eq!(summary.payments[0].status, PaymentStatus::Approved);
        assert_eq!(summary.session.state, SessionState::Paid);
    }

    #[tokio::test]
    async fn weight_override_replaces_device_weight() {
        let svc = service_with(COMPLIANT, PaymentStatus::Approved).await;
        let session = svc.start_session("JSM", Language::En).await.unwrap();

        let (scan, _) = svc
            .scan(ScanRequest {
                weight_kg: Some(13.0),
                ..scan_of(&session)
            })
            .await
            .unwrap();
        assert_eq!(scan.measurement.weight_kg, 13.0);
        assert_eq!(scan.verdict.codes(), vec![ViolationCode::Weight]);
        assert_eq!(scan.amount_due(), Some(45.0));
        assert_eq!(scan.verdict.violations[0].message, "Weight exceeds limit by 3.0 kg");
    }

    #[tokio::test]
    async fn invalid_manual_measurement_leaves_session_untouched() {
        let svc = service_with(COMPLIANT, PaymentStatus::Approved).await;
        let session = svc.start_session("JSM", Language::Es).await.unwrap();

        let err = svc
            .scan(ScanRequest {
                measurement: Some(Measurement::new(-1.0, 50.0, 20.0, 8.0)),
                ..scan_of(&session)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(
            svc.get_session(&session.id).await.unwrap().state,
            SessionState::Started
        );
    }

    #[tokio::test]
    async fn unknown_airline_or_missing_rules() {
        let svc = service_with(COMPLIANT, PaymentStatus::Approved).await;
        assert!(matches!(
            svc.start_session("XXX", Language::Es).await,
            Err(DomainError::NotFound { entity: "Airline", .. })
        ));

        let session = svc.start_session("JSM", Language::Es).await.unwrap();
        let err = svc
            .scan(ScanRequest {
                bag_class: BagClass::Handbag,
                ..scan_of(&session)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "RuleSet", .. }));
    }

    #[tokio::test]
    async fn completed_session_rejects_scans() {
        let svc = service_with(COMPLIANT, PaymentStatus::Approved).await;
        let session = svc.start_session("JSM", Language::Es).await.unwrap();
        svc.scan(scan_of(&session)).await.unwrap();
        svc.complete(&session.id).await.unwrap();

        assert!(matches!(
            svc.scan(scan_of(&session)).await,
            Err(DomainError::InvalidState(_))
        ));
    }
}
