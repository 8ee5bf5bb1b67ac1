//! Classification service client
//!
//! Sends one chat-completions request per attempt and maps failures into
//! the pipeline's error taxonomy: transient conditions (timeout,
//! connection error, 5xx) retry with a fixed delay up to the attempt
//! budget; authorization failures (401/403) escalate to the operator;
//! everything else degrades silently to "no classification".

use crate::config::ClassifierConfig;
use crate::pipeline::escalation::EscalationGate;
use crate::prompt::EscalationChoice;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Outcome of classifying one link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyOutcome {
    /// The service returned a category path
    Category(String),

    /// No category; the caller keeps the original path
    Unclassified,

    /// The operator chose to stop; the coordinator must flush and exit
    StopRequested,
}

/// Internal error taxonomy for a single attempt
#[derive(Debug, Error)]
enum AttemptError {
    #[error("transient: {0}")]
    Transient(String),

    #[error("authorization failure: HTTP {0}")]
    Auth(u16),

    #[error("{0}")]
    Other(String),
}

/// Chat-completions request payload
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

/// Minimal slice of the chat-completions response
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for the external classification endpoint
pub struct Classifier {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    fallback_category: String,
    system_prompt: String,
    max_retries: u32,
    retry_delay: Duration,
    gate: Arc<EscalationGate>,
}

impl Classifier {
    pub fn new(
        config: &ClassifierConfig,
        api_key: String,
        max_retries: u32,
        retry_delay: Duration,
        gate: Arc<EscalationGate>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        let system_prompt = format!(
            "You are a bookmark organization expert. Classify the bookmark from its \
             title, URL, and original folder path.\n\
             Prefer hierarchical paths delimited by \"/\", e.g. \"Tech/Frontend/Vue\".\n\
             Candidate categories: [{}]. You may invent a better-fitting hierarchy.\n\
             Return only the category path, nothing else.",
            config.categories.join(", ")
        );

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            fallback_category: config.fallback_category.clone(),
            system_prompt,
            max_retries,
            retry_delay,
            gate,
        })
    }

    /// Requests a category for a link, retrying transient failures
    ///
    /// Issues at most `max_retries + 1` attempts. Exhausted retries and
    /// unrecognized errors yield [`ClassifyOutcome::Unclassified`];
    /// authorization failures escalate and yield either `Unclassified`
    /// (operator ignored) or [`ClassifyOutcome::StopRequested`].
    pub async fn classify(&self, title: &str, url: &str, original_path: &str) -> ClassifyOutcome {
        let mut retries = 0;

        loop {
            match self.attempt(title, url, original_path).await {
                Ok(category) => return ClassifyOutcome::Category(category),

                Err(AttemptError::Transient(reason)) => {
                    retries += 1;
                    if retries > self.max_retries {
                        tracing::warn!(
                            "Classification gave up after {} attempts for {}: {}",
                            retries,
                            url,
                            reason
                        );
                        return ClassifyOutcome::Unclassified;
                    }
                    tracing::debug!(
                        "Transient classification failure for {} (retry {}/{}): {}",
                        url,
                        retries,
                        self.max_retries,
                        reason
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }

                Err(AttemptError::Auth(status)) => {
                    let error = format!("authorization failure: HTTP {}", status);
                    match self.gate.escalate(title, &error).await {
                        EscalationChoice::Ignore => return ClassifyOutcome::Unclassified,
                        EscalationChoice::Stop => return ClassifyOutcome::StopRequested,
                    }
                }

                Err(AttemptError::Other(reason)) => {
                    tracing::warn!("Classification failed for {}: {}", url, reason);
                    return ClassifyOutcome::Unclassified;
                }
            }
        }
    }

    /// One request to the endpoint
    async fn attempt(
        &self,
        title: &str,
        url: &str,
        original_path: &str,
    ) -> Result<String, AttemptError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: self.system_prompt.clone(),
                },
                Message {
                    role: "user",
                    content: format!(
                        "Title: {}\nURL: {}\nOriginal path: {}",
                        title, url, original_path
                    ),
                },
            ],
            temperature: 0.3,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    AttemptError::Transient(e.to_string())
                } else {
                    AttemptError::Other(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_server_error() {
            return Err(AttemptError::Transient(format!("HTTP {}", status.as_u16())));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AttemptError::Auth(status.as_u16()));
        }
        if !status.is_success() {
            return Err(AttemptError::Other(format!("HTTP {}", status.as_u16())));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AttemptError::Other(format!("bad response body: {}", e)))?;

        let category = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| self.fallback_category.clone());

        Ok(category)
    }
}
