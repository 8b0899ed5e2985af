//! What-if analysis: haircut, blended rates, and pre/post-pooling savings.

pub mod what_if;
