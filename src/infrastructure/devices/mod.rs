//! Device adapters behind the measurement and payment ports
//!
//! The simulated variants stand in for the camera rig and payment terminal
//! when `devices.simulate` is on. The fixed variants return one canned answer
//! and are meant for tests and demos. `ManualOnlyMeasurementSource` is used
//! when no rig is attached.

pub mod measurement;
pub mod payment;

pub use measurement::{
    FixedMeasurementSource, ManualOnlyMeasurementSource, SimulatedMeasurementSource,
};
pub use payment::{FixedPaymentGateway, SimulatedPaymentGateway};
