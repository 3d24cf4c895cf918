//! Camera-side processing: detection selection and pixel calibration

pub mod calibration;
pub mod detection;

pub use calibration::{round_tenth, Calibration, Homography};
pub use detection::pick_best;
