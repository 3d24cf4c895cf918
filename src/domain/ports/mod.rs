//! Ports: capability interfaces for devices outside the kiosk process

pub mod outbound;

pub use outbound::{
    AcquiredMeasurement, BoundingBox, ChargeRequest, DetectedClass, Detection, MeasurementSource,
    PaymentGateway,
};
