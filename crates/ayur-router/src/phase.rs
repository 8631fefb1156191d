//! Navigation phase machine.
//!
//! A navigation moves `Idle -> Pending -> Settling -> Grace -> Idle`
//! (pops enter at `Settling`). Each phase carries at most one deadline,
//! so starting a new navigation replaces whatever continuation the
//! previous one was waiting on.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum NavPhase {
    /// Nothing scheduled.
    Idle,
    /// A push is waiting for its commit delay.
    Pending {
        target: String,
        delay_ms: u64,
        commit_at_ms: u64,
    },
    /// Waiting for the new view to lay out before touching scroll.
    Settling { frames_left: u8 },
    /// Scroll applied; overlay clears at the deadline.
    Grace { clear_at_ms: u64 },
}

impl NavPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, NavPhase::Idle)
    }

    /// Time-based deadline of this phase, if it has one.
    pub fn deadline_ms(&self) -> Option<u64> {
        match self {
            NavPhase::Pending { commit_at_ms, .. } => Some(*commit_at_ms),
            NavPhase::Grace { clear_at_ms } => Some(*clear_at_ms),
            NavPhase::Idle | NavPhase::Settling { .. } => None,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            NavPhase::Idle => "idle",
            NavPhase::Pending { .. } => "pending",
            NavPhase::Settling { .. } => "settling",
            NavPhase::Grace { .. } => "grace",
        }
    }
}
