use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Externally toggled switch that gates every scheduled tick.
///
/// Clones share the same flag, so a controller on another thread can stop a
/// session between ticks. There is never an in-flight tick to cancel.
#[derive(Clone, Debug, Default)]
pub struct RunFlag(Arc<AtomicBool>);

impl RunFlag {
    /// Creates a flag in the provided state.
    #[must_use]
    pub fn new(running: bool) -> Self {
        Self(Arc::new(AtomicBool::new(running)))
    }

    /// Reports whether ticks may run.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Allows future ticks to run.
    pub fn start(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Stops future ticks from running.
    pub fn stop(&self) {
        self.0.store(false, Ordering::Release);
    }
}
