//! Repository storage implementations

mod memory;

pub use memory::{
    InMemoryAirlineRepository, InMemoryPaymentRepository, InMemoryRepositoryProvider,
    InMemoryRuleSetRepository, InMemoryScanRepository, InMemorySessionRepository,
};
