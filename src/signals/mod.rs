//! Signal evaluation and rendering.

pub mod engine;
pub mod format;

pub use engine::{Evaluation, SignalEngine};
pub use format::{render_failure, render_signal, render_summary};
