//! Outbound ports: camera/detector/scale and payment terminal
//!
//! The engine never talks to devices. Services receive these traits as
//! `Arc<dyn …>` so simulated and real implementations are interchangeable.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::compliance::Measurement;
use crate::domain::payment::{PaymentMethod, PaymentStatus};
use crate::domain::DomainResult;

// ── Detection ──────────────────────────────────────────────────

/// Object class reported by the bag detector.
///
/// Declaration order is the selection priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectedClass {
    Suitcase,
    Backpack,
    Handbag,
    Other,
}

impl DetectedClass {
    pub const ALL: [DetectedClass; 4] = [
        DetectedClass::Suitcase,
        DetectedClass::Backpack,
        DetectedClass::Handbag,
        DetectedClass::Other,
    ];

    /// Map a detector label; the shipped model uses Spanish labels.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "maleta" | "suitcase" => Self::Suitcase,
            "mochila" | "backpack" => Self::Backpack,
            "bolso" | "handbag" => Self::Handbag,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Suitcase => "suitcase",
            Self::Backpack => "backpack",
            Self::Handbag => "handbag",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for DetectedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned box in image pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub class: DetectedClass,
    pub confidence: f64,
    pub bbox: BoundingBox,
}

// ── MeasurementSource ──────────────────────────────────────────

/// What the measuring station produced for one bag
#[derive(Debug, Clone, PartialEq)]
pub struct AcquiredMeasurement {
    pub measurement: Measurement,
    pub detected_class: Option<DetectedClass>,
}

/// Camera + detector + scale, seen as one capability.
#[async_trait]
pub trait MeasurementSource: Send + Sync {
    async fn acquire(&self) -> DomainResult<AcquiredMeasurement>;
}

// ── PaymentGateway ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ChargeRequest {
    pub session_id: String,
    pub amount: f64,
    pub currency: String,
    pub method: PaymentMethod,
}

/// Payment terminal. `Ok(Rejected)` is a declined charge; `Err` means the
/// terminal itself failed.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, request: &ChargeRequest) -> DomainResult<PaymentStatus>;
}
