//! Scan aggregate: one measured bag and the verdict it received

pub mod model;
pub mod repository;

pub use model::ScanRecord;
pub use repository::ScanRepository;
