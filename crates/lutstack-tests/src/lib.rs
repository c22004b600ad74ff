//! Integration tests for lutstack crates.
//!
//! This crate contains end-to-end tests that verify the interaction
//! between table loading, sampling, layer compositing and the batch driver.
