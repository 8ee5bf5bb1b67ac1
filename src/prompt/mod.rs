//! Operator prompt seam
//!
//! All interactive questions go through the [`OperatorPrompt`] trait so
//! the pipeline can be driven by scripted answers in tests. The console
//! implementation uses dialoguer; prompts block, so async callers bridge
//! them with `tokio::task::spawn_blocking`.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Select};
use std::io;

/// Operator decision when a fatal classification error escalates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationChoice {
    /// Abandon this classification attempt and keep the pipeline running
    Ignore,

    /// Checkpoint everything accumulated so far and terminate
    Stop,
}

/// Interactive questions the pipeline may ask an operator
pub trait OperatorPrompt: Send + Sync {
    /// Asks whether to resume from an existing report with `entries` results
    fn confirm_resume(&self, entries: usize) -> io::Result<bool>;

    /// Asks whether to enable classification for this run
    fn confirm_classification(&self) -> io::Result<bool>;

    /// Asks how to handle a fatal classification error
    fn escalation_choice(&self, title: &str, error: &str) -> io::Result<EscalationChoice>;
}

/// Terminal prompt implementation backed by dialoguer
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePrompt;

impl OperatorPrompt for ConsolePrompt {
    fn confirm_resume(&self, entries: usize) -> io::Result<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Found a previous report with {} entries. Resume from it?",
                entries
            ))
            .default(true)
            .interact()
            .map_err(into_io)
    }

    fn confirm_classification(&self) -> io::Result<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Enable AI classification for live links?")
            .default(false)
            .interact()
            .map_err(into_io)
    }

    fn escalation_choice(&self, title: &str, error: &str) -> io::Result<EscalationChoice> {
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("[{}] failed: {} — how to proceed?", title, error))
            .items(&["Ignore and continue", "Stop and save progress"])
            .default(0)
            .interact()
            .map_err(into_io)?;

        Ok(match selection {
            1 => EscalationChoice::Stop,
            _ => EscalationChoice::Ignore,
        })
    }
}

fn into_io(e: dialoguer::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}
