//! Progress protocol and cancellation (§5, §6).
//!
//! The core performs no suspension of its own (§5: "During BFS there are no
//! I/O suspension points"); this module only defines the callback shape and
//! the cooperative cancellation check a driver observes at phase boundaries.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The scan phases a progress callback can be notified about, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Discovery,
    Parsing,
    ContextBuild,
    Reachability,
    Classification,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Discovery => "discovery",
            Phase::Parsing => "parsing",
            Phase::ContextBuild => "context-build",
            Phase::Reachability => "reachability",
            Phase::Classification => "classification",
        }
    }
}

/// `{ phase, percent, detail, current, total }` from §6.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub phase: Phase,
    pub percent: f32,
    pub detail: String,
    pub current: usize,
    pub total: usize,
}

impl ProgressEvent {
    pub fn new(phase: Phase, current: usize, total: usize, detail: impl Into<String>) -> Self {
        let percent = if total == 0 {
            100.0
        } else {
            (current as f32 / total as f32) * 100.0
        };
        ProgressEvent {
            phase,
            percent,
            detail: detail.into(),
            current,
            total,
        }
    }
}

/// A progress callback. Boxed so the engine can hold one without generic
/// parameters bleeding through its public API.
pub type ProgressCallback<'a> = Box<dyn FnMut(ProgressEvent) + 'a>;

/// A single cancellation token observed at phase boundaries (§5).
///
/// Cloning shares the same underlying flag; cancelling any clone cancels
/// every one, since a scan has exactly one token for its whole lifetime.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_is_visible_across_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn progress_percent_handles_zero_total() {
        let event = ProgressEvent::new(Phase::Discovery, 0, 0, "nothing to do");
        assert_eq!(event.percent, 100.0);
    }
}
