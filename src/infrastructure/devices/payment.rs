//! Payment gateways: simulated terminal and a fixed-outcome double

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::domain::{ChargeRequest, DomainError, DomainResult, PaymentGateway, PaymentStatus};

/// Default share of simulated charges that get approved
pub const DEFAULT_APPROVAL_RATE: f64 = 0.85;

/// Approves each charge with probability `approval_rate`
pub struct SimulatedPaymentGateway {
    approval_rate: f64,
    rng: Mutex<StdRng>,
}

impl SimulatedPaymentGateway {
    pub fn new(approval_rate: f64) -> DomainResult<Self> {
        Self::build(approval_rate, StdRng::from_entropy())
    }

    pub fn with_seed(approval_rate: f64, seed: u64) -> DomainResult<Self> {
        Self::build(approval_rate, StdRng::seed_from_u64(seed))
    }

    fn build(approval_rate: f64, rng: StdRng) -> DomainResult<Self> {
        if !(0.0..=1.0).contains(&approval_rate) {
            return Err(DomainError::Validation(format!(
                "approval rate must be within 0..=1, got {}",
                approval_rate
            )));
        }
        Ok(Self {
            approval_rate,
            rng: Mutex::new(rng),
        })
    }

    pub fn approval_rate(&self) -> f64 {
        self.approval_rate
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn charge(&self, request: &ChargeRequest) -> DomainResult<PaymentStatus> {
        let approved = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            rng.gen_bool(self.approval_rate)
        };
        let status = if approved {
            PaymentStatus::Approved
        } else {
            PaymentStatus::Rejected
        };

        info!(
            session_id = %request.session_id,
            amount = request.amount,
            currency = %request.currency,
            method = %request.method,
            status = %status,
            "Simulated charge"
        );
        Ok(status)
    }
}

/// Answers every charge with the same status
#[derive(Debug, Clone, Copy)]
pub struct FixedPaymentGateway(pub PaymentStatus);

#[async_trait]
impl PaymentGateway for FixedPaymentGateway {
    async fn charge(&self, _request: &ChargeRequest) -> DomainResult<PaymentStatus> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PaymentMethod;

    fn request() -> ChargeRequest {
        ChargeRequest {
            session_id: "s1".into(),
            amount: 45.0,
            currency: "USD".into(),
            method: PaymentMethod::Card,
        }
    }

    #[test]
    fn rate_outside_unit_interval_is_rejected() {
        assert!(SimulatedPaymentGateway::new(1.5).is_err());
        assert!(SimulatedPaymentGateway::new(-0.1).is_err());
        assert!(SimulatedPaymentGateway::new(f64::NAN).is_err());
    }

    #[tokio::test]
    async fn extreme_rates_are_deterministic() {
        let always = SimulatedPaymentGateway::new(1.0).unwrap();
        let never = SimulatedPaymentGateway::new(0.0).unwrap();
        for _ in 0..20 {
            assert_eq!(always.charge(&request()).await.unwrap(), PaymentStatus::Approved);
            assert_eq!(never.charge(&request()).await.unwrap(), PaymentStatus::Rejected);
        }
    }

    #[tokio::test]
    async fn default_rate_approves_most_charges() {
        let gateway = SimulatedPaymentGateway::with_seed(DEFAULT_APPROVAL_RATE, 1).unwrap();
        let mut approved = 0;
        for _ in 0..1000 {
            if gateway.charge(&request()).await.unwrap() == PaymentStatus::Approved {
                approved += 1;
            }
        }
        assert!((750..=950).contains(&approved), "approved {}", approved);
    }

    #[tokio::test]
    async fn fixed_gateway_returns_its_status() {
        let gateway = FixedPaymentGateway(PaymentStatus::Rejected);
        assert_eq!(gateway.charge(&request()).await.unwrap(), PaymentStatus::Rejected);
    }
}
