//! Pixel → centimetre conversion for the overhead camera

use crate::domain::ports::BoundingBox;
use crate::domain::{DomainResult, EngineError};

/// Row-major 3×3 perspective transform (image plane → floor plane)
pub type Homography = [[f64; 3]; 3];

#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    px_per_cm: f64,
    homography: Option<Homography>,
}

impl Calibration {
    pub fn new(px_per_cm: f64) -> DomainResult<Self> {
        if !px_per_cm.is_finite() || px_per_cm <= 0.0 {
            return Err(EngineError::InvalidInput {
                field: "px_per_cm",
                reason: "must be greater than zero",
            }
            .into());
        }
        Ok(Self {
            px_per_cm,
            homography: None,
        })
    }

    pub fn with_homography(mut self, homography: Homography) -> Self {
        self.homography = Some(homography);
        self
    }

    pub fn px_per_cm(&self) -> f64 {
        self.px_per_cm
    }

    /// Convert a bounding box to `(width_cm, length_cm)`, rounded to 0.1 cm.
    pub fn bbox_px_to_cm(&self, bbox: &BoundingBox) -> (f64, f64) {
        let (w_px, h_px) = self
            .homography
            .and_then(|h| projected_extent(&h, bbox))
            .unwrap_or((bbox.w, bbox.h));

        (
            round_tenth(w_px / self.px_per_cm),
            round_tenth(h_px / self.px_per_cm),
        )
    }
}

/// Edge lengths of the box after projection; `None` if a corner maps to
/// infinity.
fn projected_extent(h: &Homography, bbox: &BoundingBox) -> Option<(f64, f64)> {
    let origin = project(h, bbox.x, bbox.y)?;
    let right = project(h, bbox.x + bbox.w, bbox.y)?;
    let down = project(h, bbox.x, bbox.y + bbox.h)?;
    Some((distance(origin, right), distance(origin, down)))
}

fn project(h: &Homography, x: f64, y: f64) -> Option<(f64, f64)> {
    let w = h[2][0] * x + h[2][1] * y + h[2][2];
    if w.abs() < 1e-12 {
        return None;
    }
    let px = (h[0][0] * x + h[0][1] * y + h[0][2]) / w;
    let py = (h[1][0] * x + h[1][1] * y + h[1][2]) / w;
    Some((px, py))
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
}

pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
