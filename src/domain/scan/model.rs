//! Scan record entity

use chrono::{DateTime, Utc};

use crate::domain::compliance::{Measurement, Verdict};
use crate::domain::ports::DetectedClass;
use crate::domain::rules::BagClass;

#[derive(Debug, Clone, PartialEq)]
pub struct ScanRecord {
    pub id: String,
    pub session_id: String,
    pub bag_class: BagClass,
    /// Object class reported by the detector, if any
    pub detected_class: Option<DetectedClass>,
    pub measurement: Measurement,
    pub verdict: Verdict,
    pub created_at: DateTime<Utc>,
}

impl ScanRecord {
    pub fn new(
        session_id: impl Into<String>,
        bag_class: BagClass,
        detected_class: Option<DetectedClass>,
        measurement: Measurement,
        verdict: Verdict,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            bag_class,
            detected_class,
            measurement,
            verdict,
            created_at: Utc::now(),
        }
    }

    /// Amount owed for this scan; `None` when compliant.
    pub fn amount_due(&self) -> Option<f64> {
        self.verdict.fees.as_ref().map(|f| f.total)
    }
}
