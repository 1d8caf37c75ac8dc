//! Concurrent fan-out of one count query per keyword.
//!
//! Every keyword gets its own tokio task. Tasks hand their total back through
//! their join handle and the dispatcher only reads them after the join
//! barrier, so the result map has a single writer.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::time::{timeout_at, Duration, Instant};
use tracing::{debug, error, warn};

use crate::error::SearchError;
use crate::query::{KeywordSet, QualifierSet};
use crate::source::CountSource;

/// Knobs for a [`Dispatcher`].
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Trace composed queries and raw totals.
    pub debug: bool,
    /// Maximum queries in flight. `None` runs every keyword at once.
    pub concurrency: Option<usize>,
    /// Budget for a single remote call, not counting time spent waiting for
    /// a concurrency slot.
    pub query_timeout: Option<Duration>,
    /// Budget for the whole run.
    pub deadline: Option<Duration>,
    /// Draw one spinner per keyword on stderr.
    pub show_progress: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            debug: false,
            concurrency: None,
            query_timeout: Some(Duration::from_secs(30)),
            deadline: Some(Duration::from_secs(120)),
            show_progress: false,
        }
    }
}

impl DispatchConfig {
    /// Reject a zero concurrency cap or zero-length time budgets.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.concurrency == Some(0) {
            return Err(SearchError::Config(
                "concurrency must be greater than 0".into(),
            ));
        }
        if self.query_timeout.is_some_and(|t| t.is_zero()) {
            return Err(SearchError::Config(
                "query timeout must be greater than 0".into(),
            ));
        }
        if self.deadline.is_some_and(|d| d.is_zero()) {
            return Err(SearchError::Config(
                "deadline must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Runs one count query per keyword and collects the totals.
pub struct Dispatcher {
    config: DispatchConfig,
    progress: MultiProgress,
}

impl Dispatcher {
    pub fn new(config: DispatchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let progress = if config.show_progress {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        };
        Ok(Self { config, progress })
    }

    /// Query every keyword concurrently and wait for all of them.
    ///
    /// The returned map has exactly one entry per keyword. A keyword whose
    /// query fails, panics or runs out of time is logged and recorded as 0;
    /// it never affects the other keywords.
    pub async fn run<S>(
        &self,
        keywords: &KeywordSet,
        qualifiers: &QualifierSet,
        source: Arc<S>,
    ) -> HashMap<String, u64>
    where
        S: CountSource + 'static,
    {
        let semaphore = self.config.concurrency.map(|n| Arc::new(Semaphore::new(n)));
        let deadline = self.config.deadline.map(|d| Instant::now() + d);
        let spinner_style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

        let mut pending = Vec::with_capacity(keywords.len());
        let mut handles = Vec::with_capacity(keywords.len());

        for keyword in keywords.iter() {
            let query = qualifiers.compose(keyword);
            if self.config.debug {
                debug!("query: {}", query);
            }

            let pb = self.progress.add(ProgressBar::new_spinner());
            pb.set_style(spinner_style.clone());
            pb.set_message(format!("Waiting to search for '{}'", keyword));
            pb.enable_steady_tick(std::time::Duration::from_millis(80));

            let source = Arc::clone(&source);
            let semaphore = semaphore.clone();
            let query_timeout = self.config.query_timeout;
            let task_keyword = keyword.to_string();
            let task_query = query.clone();

            let handle = tokio::spawn(async move {
                let result = count_one(
                    source.as_ref(),
                    &task_query,
                    semaphore,
                    query_timeout,
                    deadline,
                    &pb,
                )
                .await;

                match &result {
                    Ok(total) => pb.finish_with_message(format!("✓ '{}' ({})", task_keyword, total)),
                    Err(_) => pb.finish_with_message(format!("✗ Failed '{}'", task_keyword)),
                }
                result
            });

            pending.push((keyword.to_string(), query));
            handles.push(handle);
        }

        let outcomes = join_all(handles).await;

        let mut totals = HashMap::with_capacity(pending.len());
        for ((keyword, query), outcome) in pending.into_iter().zip(outcomes) {
            let total = match outcome {
                Ok(Ok(total)) => total,
                Ok(Err(e)) => {
                    warn!("Search failed for '{}' ({}): {}", keyword, query, e);
                    0
                }
                Err(e) => {
                    error!("Search task for '{}' did not finish: {}", keyword, e);
                    0
                }
            };
            if self.config.debug {
                debug!("keyword: {} ({})", keyword, total);
            }
            totals.insert(keyword, total);
        }
        totals
    }
}

/// Run a single query inside its concurrency slot and time budget.
async fn count_one<S>(
    source: &S,
    query: &str,
    semaphore: Option<Arc<Semaphore>>,
    query_timeout: Option<Duration>,
    deadline: Option<Instant>,
    pb: &ProgressBar,
) -> Result<u64, SearchError>
where
    S: CountSource + ?Sized,
{
    let _permit = match semaphore {
        Some(sem) => match before(deadline, sem.acquire_owned()).await {
            Some(Ok(permit)) => Some(permit),
            Some(Err(_)) => {
                return Err(SearchError::Internal("dispatcher semaphore closed".into()));
            }
            None => {
                return Err(SearchError::Timeout(format!(
                    "deadline passed before '{}' was sent",
                    query
                )));
            }
        },
        None => None,
    };

    pb.set_message(format!("Searching '{}'", query));

    let limit = earliest(query_timeout.map(|t| Instant::now() + t), deadline);
    match before(limit, source.total_count(query)).await {
        Some(result) => result,
        None => Err(SearchError::Timeout(format!(
            "'{}' did not complete in time",
            query
        ))),
    }
}

/// Await `fut`, or give up at `limit`. `None` means the limit passed.
async fn before<F: Future>(limit: Option<Instant>, fut: F) -> Option<F::Output> {
    match limit {
        Some(at) => timeout_at(at, fut).await.ok(),
        None => Some(fut.await),
    }
}

fn earliest(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
