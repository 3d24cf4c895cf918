use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::SessionSummary;
use crate::domain::{KioskSession, Payment, ScanRecord};
use crate::interfaces::http::dto::{MeasurementDto, VerdictDto};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StartSessionRequest {
    #[validate(length(min = 1, message = "airline_code is required"))]
    pub airline_code: String,
    /// `es` (default) or `en`
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionDto {
    pub id: String,
    pub airline_code: String,
    pub language: String,
    /// e.g. `started`, `scanned_non_compliant`, `paid`, `completed`
    pub state: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&KioskSession> for SessionDto {
    fn from(s: &KioskSession) -> Self {
        Self {
            id: s.id.clone(),
            airline_code: s.airline_code.clone(),
            language: s.language.as_str().to_string(),
            state: s.state.as_str().to_string(),
            created_at: s.created_at.to_rfc3339(),
            updated_at: s.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScanDto {
    pub id: String,
    pub session_id: String,
    pub bag_class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_class: Option<String>,
    pub measurement: MeasurementDto,
    pub verdict: VerdictDto,
    pub created_at: String,
}

impl ScanDto {
    pub fn from_domain(scan: &ScanRecord, session: &KioskSession) -> Self {
        Self {
            id: scan.id.clone(),
            session_id: scan.session_id.clone(),
            bag_class: scan.bag_class.as_str().to_string(),
            detected_class: scan.detected_class.map(|c| c.as_str().to_string()),
            measurement: MeasurementDto::from(&scan.measurement),
            verdict: VerdictDto::from_domain(&scan.verdict, session.language),
            created_at: scan.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentDto {
    pub id: String,
    pub session_id: String,
    pub scan_id: String,
    pub amount: f64,
    pub currency: String,
    pub method: String,
    /// `approved` or `rejected`
    pub status: String,
    pub created_at: String,
}

impl From<&Payment> for PaymentDto {
    fn from(p: &Payment) -> Self {
        Self {
            id: p.id.clone(),
            session_id: p.session_id.clone(),
            scan_id: p.scan_id.clone(),
            amount: p.amount,
            currency: p.currency.clone(),
            method: p.method.as_str().to_string(),
            status: p.status.as_str().to_string(),
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionSummaryDto {
    pub session: SessionDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_scan: Option<ScanDto>,
    pub payments: Vec<PaymentDto>,
}

impl From<&SessionSummary> for SessionSummaryDto {
    fn from(s: &SessionSummary) -> Self {
        Self {
            session: SessionDto::from(&s.session),
            latest_scan: s
                .latest_scan
                .as_ref()
                .map(|scan| ScanDto::from_domain(scan, &s.session)),
            payments: s.payments.iter().map(PaymentDto::from).collect(),
        }
    }
}
