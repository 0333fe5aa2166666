//! End-to-end decoding tests for `kanim-rs`

mod binary;
mod scml;
