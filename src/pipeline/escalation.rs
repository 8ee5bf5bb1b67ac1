//! Escalation gate for fatal classification errors
//!
//! An authentication failure usually means every subsequent call will
//! fail the same way, so instead of retry-storming a broken credential
//! the pipeline pauses for an operator decision. A single mutex
//! serializes concurrent escalations: a worker waits for any in-flight
//! prompt to resolve before presenting its own.

use crate::prompt::{EscalationChoice, OperatorPrompt};
use console::style;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Serializes operator interaction on fatal errors
pub struct EscalationGate {
    lock: Mutex<()>,
    prompt: Arc<dyn OperatorPrompt>,
}

impl EscalationGate {
    pub fn new(prompt: Arc<dyn OperatorPrompt>) -> Self {
        Self {
            lock: Mutex::new(()),
            prompt,
        }
    }

    /// Presents a fatal error to the operator and returns the decision
    ///
    /// Holds the gate for the whole alert-and-prompt sequence, including
    /// the blocking wait on operator input. A prompt I/O failure degrades
    /// to [`EscalationChoice::Ignore`] so a broken terminal cannot wedge
    /// the pipeline.
    pub async fn escalate(&self, title: &str, error: &str) -> EscalationChoice {
        let _guard = self.lock.lock().await;

        eprintln!();
        eprintln!("{}", style("=========================================").red());
        eprintln!("{}", style("FATAL CLASSIFICATION ERROR (operator input needed)").red().bold());
        eprintln!("Bookmark: [{}]", title);
        eprintln!("Error: {}", error);
        eprintln!("{}", style("=========================================").red());
        // Terminal bell
        eprint!("\x07");

        let prompt = Arc::clone(&self.prompt);
        let (title, error) = (title.to_string(), error.to_string());
        let choice = tokio::task::spawn_blocking(move || prompt.escalation_choice(&title, &error))
            .await;

        match choice {
            Ok(Ok(decision)) => decision,
            Ok(Err(e)) => {
                tracing::warn!("Escalation prompt failed, continuing: {}", e);
                EscalationChoice::Ignore
            }
            Err(e) => {
                tracing::warn!("Escalation prompt task failed, continuing: {}", e);
                EscalationChoice::Ignore
            }
        }
    }
}
