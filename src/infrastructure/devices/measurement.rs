//! Measurement sources: simulated camera + detector + scale

use std::ops::Range;
use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::domain::ports::BoundingBox;
use crate::domain::{
    AcquiredMeasurement, DetectedClass, Detection, DomainError, DomainResult, Measurement,
    MeasurementSource,
};
use crate::infrastructure::vision::{pick_best, round_tenth, Calibration};

const WIDTH_CM: Range<f64> = 25.0..45.0;
const LENGTH_CM: Range<f64> = 45.0..70.0;
const HEIGHT_CM: Range<f64> = 18.0..35.0;
const WEIGHT_KG: Range<f64> = 6.0..16.0;
const CONFIDENCE: Range<f64> = 0.5..0.95;
const MAX_DETECTIONS: usize = 3;

/// Fakes a camera frame with a few detections, picks the bag, converts its
/// box through the calibration and reads height and weight from a fake
/// scale. Readings land in a range where roughly half the bags fail the
/// default cabin limits.
pub struct SimulatedMeasurementSource {
    calibration: Calibration,
    rng: Mutex<StdRng>,
}

impl SimulatedMeasurementSource {
    pub fn new(calibration: Calibration) -> Self {
        Self {
            calibration,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic readings for tests.
    pub fn with_seed(calibration: Calibration, seed: u64) -> Self {
        Self {
            calibration,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn detect(&self, rng: &mut StdRng) -> Vec<Detection> {
        let px = self.calibration.px_per_cm();
        let count = rng.gen_range(1..=MAX_DETECTIONS);
        (0..count)
            .map(|_| {
                let class = DetectedClass::ALL[rng.gen_range(0..DetectedClass::ALL.len())];
                let confidence = (rng.gen_range(CONFIDENCE) * 100.0).round() / 100.0;
                Detection {
                    class,
                    confidence,
                    bbox: BoundingBox {
                        x: rng.gen_range(0.0..200.0),
                        y: rng.gen_range(0.0..200.0),
                        w: rng.gen_range(WIDTH_CM) * px,
                        h: rng.gen_range(LENGTH_CM) * px,
                    },
                }
            })
            .collect()
    }
}

#[async_trait]
impl MeasurementSource for SimulatedMeasurementSource {
    async fn acquire(&self) -> DomainResult<AcquiredMeasurement> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        let detections = self.detect(&mut rng);
        let best = pick_best(&detections)
            .ok_or_else(|| DomainError::Device("no bag detected".into()))?;
        let (width_cm, length_cm) = self.calibration.bbox_px_to_cm(&best.bbox);

        let measurement = Measurement::new(
            width_cm,
            length_cm,
            round_tenth(rng.gen_range(HEIGHT_CM)),
            round_tenth(rng.gen_range(WEIGHT_KG)),
        );

        debug!(
            detections = detections.len(),
            class = %best.class,
            confidence = best.confidence,
            width_cm,
            length_cm,
            height_cm = measurement.height_cm,
            weight_kg = measurement.weight_kg,
            "Simulated measurement"
        );

        Ok(AcquiredMeasurement {
            measurement,
            detected_class: Some(best.class),
        })
    }
}

/// Returns the same reading on every call
#[derive(Debug, Clone)]
pub struct FixedMeasurementSource {
    reading: AcquiredMeasurement,
}

impl FixedMeasurementSource {
    pub fn new(measurement: Measurement) -> Self {
        Self {
            reading: AcquiredMeasurement {
                measurement,
                detected_class: None,
            },
        }
    }

    pub fn with_class(mut self, class: DetectedClass) -> Self {
        self.reading.detected_class = Some(class);
        self
    }
}

#[async_trait]
impl MeasurementSource for FixedMeasurementSource {
    async fn acquire(&self) -> DomainResult<AcquiredMeasurement> {
        Ok(self.reading.clone())
    }
}

/// No camera or scale attached: every scan must carry a manual reading
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualOnlyMeasurementSource;

#[async_trait]
impl MeasurementSource for ManualOnlyMeasurementSource {
    async fn acquire(&self) -> DomainResult<AcquiredMeasurement> {
        Err(DomainError::Device(
            "no measurement device attached; enter the measurement manually".into(),
        ))
    }
}
