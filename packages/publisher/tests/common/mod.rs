#![allow(dead_code)]

// Common test utilities

pub mod fixtures;

pub use fixtures::*;
