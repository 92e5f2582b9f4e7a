//! Casual mode: while active, finished drills are not written back to the
//! record store.
//!
//! The flag may be flipped at any time from a signal listener. It is read
//! once per drill, at the moment the orchestrator decides whether to persist.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared casual-mode flag. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CasualMode {
    active: Arc<AtomicBool>,
}

impl CasualMode {
    pub fn new(active: bool) -> Self {
        Self {
            active: Arc::new(AtomicBool::new(active)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Flip the flag and return the new state.
    pub fn toggle(&self) -> bool {
        !self.active.fetch_xor(true, Ordering::SeqCst)
    }
}

/// Banner announcing the current state.
pub fn banner(active: bool) -> &'static str {
    if active {
        "Casual mode: ON "
    } else {
        "Casual mode: OFF"
    }
}
