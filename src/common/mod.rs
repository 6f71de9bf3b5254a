//! Shared helpers used across indicator and strategy code.

pub mod math;
