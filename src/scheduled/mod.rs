//! Trigger-driven jobs that call an upstream source and persist the result:
//! the per-minute UUID batch and the forecast processor.

pub mod forecast;
pub mod uuid_generator;
