//! Pipeline coordinator - bounded-concurrency link processing
//!
//! Drives every pending link through health check → optional
//! classification → record, with at most N links in flight at once.
//! The coordinator owns the shared result collection for the duration of
//! a run and is the only place that flushes it: on normal completion, on
//! ctrl-c, on operator stop, and optionally every `checkpoint-every`
//! completions.

use crate::pipeline::classifier::{Classifier, ClassifyOutcome};
use crate::pipeline::health::HealthChecker;
use crate::progress::ProgressStore;
use crate::state::{Link, ProcessedResult};
use console::style;
use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{Notify, Semaphore};
use tokio::task::JoinSet;

/// How a pipeline run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every pending link was processed and the checkpoint flushed
    Completed,

    /// Ctrl-c observed; accumulated results flushed, in-flight work abandoned
    Interrupted,

    /// An operator chose "stop and save" during an escalation
    Stopped,
}

struct RunState {
    results: Vec<ProcessedResult>,
    completed: usize,
}

/// Coordinator-owned shared state, mutated by worker tasks
///
/// The completion counter and the result collection change together under
/// one lock, so every completed link gets exactly one contiguous ordinal
/// and exactly one appended result.
pub struct SharedRun {
    inner: Mutex<RunState>,
}

impl SharedRun {
    /// Empty state for a fresh run
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// State resumed from a loaded report; the counter starts at the
    /// loaded count so numbering continues contiguously.
    pub fn seeded(existing: Vec<ProcessedResult>) -> Self {
        let completed = existing.len();
        Self {
            inner: Mutex::new(RunState {
                results: existing,
                completed,
            }),
        }
    }

    /// Atomically increments the completion counter and appends a result,
    /// returning the completion ordinal.
    pub fn record(&self, result: ProcessedResult) -> usize {
        let mut state = self.inner.lock().unwrap();
        state.completed += 1;
        state.results.push(result);
        state.completed
    }

    /// Number of completed links (including any resumed ones)
    pub fn completed(&self) -> usize {
        self.inner.lock().unwrap().completed
    }

    /// Copy of the accumulated results, in append order
    pub fn snapshot(&self) -> Vec<ProcessedResult> {
        self.inner.lock().unwrap().results.clone()
    }
}

impl Default for SharedRun {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot stop signal raised by a worker whose escalation resolved
/// "stop and save"
struct StopSignal {
    requested: AtomicBool,
    notify: Notify,
}

impl StopSignal {
    fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
            notify: Notify::new(),
        }
    }

    fn raise(&self) {
        self.requested.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    async fn notified(&self) {
        self.notify.notified().await;
    }

    fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

/// Filters out links whose URLs already appear in a loaded report
pub fn pending_links(all: Vec<Link>, completed: &[ProcessedResult]) -> Vec<Link> {
    let done: HashSet<&str> = completed.iter().map(|r| r.url.as_str()).collect();
    all.into_iter()
        .filter(|link| !done.contains(link.url.as_str()))
        .collect()
}

/// Main pipeline coordinator
pub struct Coordinator {
    concurrent_limit: usize,
    checkpoint_every: usize,
    health: Arc<HealthChecker>,
    classifier: Option<Arc<Classifier>>,
    store: Arc<ProgressStore>,
    shared: Arc<SharedRun>,
}

impl Coordinator {
    /// Creates a coordinator
    ///
    /// Classification runs only when a classifier is supplied; otherwise
    /// every live link keeps its original path.
    pub fn new(
        concurrent_limit: usize,
        checkpoint_every: usize,
        health: Arc<HealthChecker>,
        classifier: Option<Arc<Classifier>>,
        store: Arc<ProgressStore>,
        shared: Arc<SharedRun>,
    ) -> Self {
        Self {
            concurrent_limit,
            checkpoint_every,
            health,
            classifier,
            store,
            shared,
        }
    }

    pub fn shared(&self) -> Arc<SharedRun> {
        Arc::clone(&self.shared)
    }

    /// Runs the pipeline, treating ctrl-c as the interrupt signal
    pub async fn run(&self, links: Vec<Link>, total: usize) -> crate::Result<RunOutcome> {
        self.run_with_shutdown(links, total, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Cannot listen for interrupt signal: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Runs the pipeline with an injectable shutdown signal
    ///
    /// The select loop observes three events: a worker finishing, the
    /// shutdown future resolving (interrupt), and the stop notification
    /// from an escalation that resolved "stop and save". The coordinator
    /// itself performs every flush; workers never touch the store.
    pub async fn run_with_shutdown(
        &self,
        links: Vec<Link>,
        total: usize,
        shutdown: impl Future<Output = ()>,
    ) -> crate::Result<RunOutcome> {
        let limiter = Arc::new(Semaphore::new(self.concurrent_limit));
        let stop = Arc::new(StopSignal::new());
        let mut workers = JoinSet::new();

        tracing::info!(
            "Processing {} links ({} at a time, classification {})",
            links.len(),
            self.concurrent_limit,
            if self.classifier.is_some() { "on" } else { "off" }
        );

        for link in links {
            workers.spawn(process_link(
                link,
                total,
                Arc::clone(&limiter),
                Arc::clone(&self.health),
                self.classifier.clone(),
                Arc::clone(&self.shared),
                Arc::clone(&stop),
            ));
        }

        tokio::pin!(shutdown);
        let mut joined = 0usize;

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::warn!("Interrupt received, flushing progress");
                    workers.abort_all();
                    self.flush_best_effort();
                    return Ok(RunOutcome::Interrupted);
                }

                _ = stop.notified() => {
                    tracing::warn!("Operator requested stop, flushing progress");
                    workers.abort_all();
                    self.store.save(&self.shared.snapshot())?;
                    return Ok(RunOutcome::Stopped);
                }

                next = workers.join_next() => match next {
                    Some(_) => {
                        joined += 1;
                        if self.checkpoint_every > 0 && joined % self.checkpoint_every == 0 {
                            self.flush_best_effort();
                        }
                    }
                    None => break,
                }
            }
        }

        self.store.save(&self.shared.snapshot())?;

        // A stop raised by the last worker can lose the select race
        // against the drained JoinSet; the flag keeps the outcome honest.
        if stop.is_requested() {
            return Ok(RunOutcome::Stopped);
        }
        Ok(RunOutcome::Completed)
    }

    /// Flush that must not take the pipeline down with it
    fn flush_best_effort(&self) {
        if let Err(e) = self.store.save(&self.shared.snapshot()) {
            tracing::error!("Checkpoint flush failed: {}", e);
        }
    }
}

/// Processes a single link: health check, optional classification, record
///
/// The counter/append happens once, after processing finishes, so the
/// printed ordinal reflects completion order. A stop decision from an
/// escalation leaves the triggering link unrecorded and notifies the
/// coordinator instead.
async fn process_link(
    link: Link,
    total: usize,
    limiter: Arc<Semaphore>,
    health: Arc<HealthChecker>,
    classifier: Option<Arc<Classifier>>,
    shared: Arc<SharedRun>,
    stop: Arc<StopSignal>,
) {
    let Ok(_permit) = limiter.acquire_owned().await else {
        return;
    };

    let verdict = health.check(&link.url).await;
    let mut result = ProcessedResult::from_verdict(&link, verdict.status, verdict.msg.clone());

    if !verdict.status.is_alive() {
        let idx = shared.record(result);
        println!(
            "{}",
            style(format!(
                "[{}/{}] ✗ {}: {} ({})",
                idx,
                total,
                verdict.status,
                short_title(&link.title),
                verdict.msg
            ))
            .red()
        );
        return;
    }

    let Some(classifier) = classifier else {
        let idx = shared.record(result);
        println!(
            "[{}/{}] · kept as-is: {}",
            idx,
            total,
            short_title(&link.title)
        );
        return;
    };

    match classifier
        .classify(&link.title, &link.url, &link.original_path)
        .await
    {
        ClassifyOutcome::Category(category) => {
            result.final_category = category.clone();
            let idx = shared.record(result);
            println!(
                "{} -> {}",
                style(format!(
                    "[{}/{}] ✓ classified: {}",
                    idx,
                    total,
                    short_title(&link.title)
                ))
                .green(),
                category
            );
        }

        ClassifyOutcome::Unclassified => {
            let idx = shared.record(result);
            println!(
                "{}",
                style(format!(
                    "[{}/{}] ~ kept original path (classification unavailable): {}",
                    idx,
                    total,
                    short_title(&link.title)
                ))
                .yellow()
            );
        }

        ClassifyOutcome::StopRequested => {
            stop.raise();
        }
    }
}

fn short_title(title: &str) -> String {
    let mut short: String = title.chars().take(24).collect();
    if short.len() < title.len() {
        short.push_str("...");
    }
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{LinkStatus, ProcessedResult};

    fn done(url: &str) -> ProcessedResult {
        let link = Link::new("t", url, "p");
        ProcessedResult::from_verdict(&link, LinkStatus::Alive, "OK")
    }

    #[test]
    fn pending_links_excludes_completed_urls() {
        let all = vec![
            Link::new("a", "https://a.example.com", "p"),
            Link::new("b", "https://b.example.com", "p"),
            Link::new("c", "https://c.example.com", "p"),
        ];
        let completed = vec![done("https://b.example.com")];

        let pending = pending_links(all, &completed);
        let urls: Vec<_> = pending.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.example.com", "https://c.example.com"]);
    }

    #[test]
    fn seeded_counter_continues_contiguously() {
        let shared = SharedRun::seeded(vec![done("https://a.example.com"), done("https://b.example.com")]);
        assert_eq!(shared.completed(), 2);

        let idx = shared.record(done("https://c.example.com"));
        assert_eq!(idx, 3);
        assert_eq!(shared.snapshot().len(), 3);
    }

    #[test]
    fn record_appends_in_completion_order() {
        let shared = SharedRun::new();
        shared.record(done("https://first.example.com"));
        shared.record(done("https://second.example.com"));

        let snapshot = shared.snapshot();
        assert_eq!(snapshot[0].url, "https://first.example.com");
        assert_eq!(snapshot[1].url, "https://second.example.com");
    }

    #[test]
    fn short_title_truncates_long_titles() {
        let long = "x".repeat(60);
        let short = short_title(&long);
        assert!(short.ends_with("..."));
        assert!(short.chars().count() <= 27);
    }
}
