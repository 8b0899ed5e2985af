//! Random scenario generation for benchmarks and CLI testing.

pub mod scenario;
