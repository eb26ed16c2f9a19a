// src/progress.rs
/// Lightweight status reporting for the watch loop.
/// Frontends (CLI, tests) implement this to surface cycle outcomes.
pub trait Progress {
    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called at the end of every cycle with its outcome.
    fn cycle_done(&mut self, _outcome: &crate::runner::Outcome) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
