//! Rule set aggregate
//!
//! One `LimitProfile` per airline and bag class.

pub mod model;
pub mod repository;

pub use model::{BagClass, RuleSet};
pub use repository::RuleSetRepository;
