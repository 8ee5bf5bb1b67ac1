//! Pipeline module: the bounded-concurrency processing core
//!
//! This module contains the pieces each link flows through:
//! - health checking (one attempt, verdict-only)
//! - classification with transient retries and fatal-error escalation
//! - the escalation gate serializing operator interaction
//! - the coordinator driving the worker pool, counters, and flushes

mod classifier;
mod coordinator;
mod escalation;
mod health;

pub use classifier::{Classifier, ClassifyOutcome};
pub use coordinator::{pending_links, Coordinator, RunOutcome, SharedRun};
pub use escalation::EscalationGate;
pub use health::{HealthChecker, HealthVerdict};
