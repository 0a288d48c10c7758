//! # IronDIS Bench
//!
//! Benchmarking utilities for IronDIS record codecs.

pub mod encoding;
pub mod throughput;
