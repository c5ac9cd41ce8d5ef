//! Testing utilities: mock generation capabilities.
//!
//! These mocks stand in for the real provider in tests and benches; they are
//! shipped in the library so downstream crates can exercise the pipeline
//! without network access.

mod mocks;

pub use mocks::{EchoCapability, FailingCapability, ScriptedCapability, SlowCapability};
