//! Service layer
//!
//! Business logic for the agent. The processor is constructed with the
//! client capabilities it needs as trait objects, so tests can inject
//! recording doubles.

mod processor;

pub use processor::{JobProcessor, JobStats};

#[cfg(test)]
pub(crate) use processor::testing;
