//! Scan orchestration, single-flight runtime, scheduling and HTTP surface

pub mod http;
pub mod runtime;
pub mod scanner;
pub mod scheduler;

pub use http::{create_router, start_server, AppState};
pub use runtime::{CycleGuard, ScanRuntime};
pub use scanner::ScanOrchestrator;
pub use scheduler::ScanScheduler;
