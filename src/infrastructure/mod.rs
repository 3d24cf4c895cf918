//! Infrastructure layer: storage, devices, vision and crypto adapters

pub mod crypto;
pub mod devices;
pub mod storage;
pub mod vision;

pub use devices::{
    FixedMeasurementSource, FixedPaymentGateway, ManualOnlyMeasurementSource,
    SimulatedMeasurementSource, SimulatedPaymentGateway,
};
pub use storage::InMemoryRepositoryProvider;
