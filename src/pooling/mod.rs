//! Pooling simulation: flow graph construction and RTC eligibility metrics.

pub mod flow_graph;
pub mod simulator;
