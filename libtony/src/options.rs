//! Parse configuration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Options for [`crate::parse_with_options`].
///
/// Deadline and cancel flag are polled between top-level items only, so a
/// stopped parse never leaves a half-built node behind.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub deadline: Option<Instant>,
    pub cancel: Option<Arc<AtomicBool>>,
    /// Used in error locations.
    pub filename: Option<String>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn filename(mut self, name: impl Into<String>) -> Self {
        self.filename = Some(name.into());
        self
    }

    /// Should the parse stop before the next top-level item?
    pub fn should_stop(&self) -> bool {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        self.deadline.map_or(false, |d| Instant::now() >= d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_never_stops() {
        assert!(!ParseOptions::new().should_stop());
    }

    #[test]
    fn test_cancel_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let opts = ParseOptions::new().cancel_flag(flag.clone());
        assert!(!opts.should_stop());
        flag.store(true, Ordering::Relaxed);
        assert!(opts.should_stop());
    }

    #[test]
    fn test_deadline() {
        let past = Instant::now();
        assert!(ParseOptions::new().deadline(past).should_stop());
        let future = Instant::now() + Duration::from_secs(3600);
        assert!(!ParseOptions::new().deadline(future).filename("x").should_stop());
    }
}
