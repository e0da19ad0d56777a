//! Concurrent analysis of many sites.

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{FuturesUnordered, StreamExt};
use log::warn;

use crate::analyzer::SiteAnalyzer;
use crate::app::{log_progress, log_site_result};
use crate::grouping::detect_platform;
use crate::initialization::init_semaphore;
use crate::models::{SiteAnalysisResult, SiteStatus, SiteTarget};

/// Analyzes every target with at most `max_concurrent` analyses in flight.
///
/// Returns exactly one result per target, in completion order.
pub async fn run_batch(
    targets: Vec<SiteTarget>,
    analyzer: Arc<SiteAnalyzer>,
    max_concurrent: usize,
) -> Vec<SiteAnalysisResult> {
    run_batch_with_observer(targets, analyzer, max_concurrent, |_, _, _| {}).await
}

/// Like [`run_batch`], calling `observer(result, completed, total)` as each site finishes.
///
/// Each site runs in its own task. A task that panics still produces an
/// `error` result for its target, so no target is ever dropped and one bad
/// site never affects its siblings.
pub async fn run_batch_with_observer<F>(
    targets: Vec<SiteTarget>,
    analyzer: Arc<SiteAnalyzer>,
    max_concurrent: usize,
    mut observer: F,
) -> Vec<SiteAnalysisResult>
where
    F: FnMut(&SiteAnalysisResult, usize, usize),
{
    let total = targets.len();
    let start_time = Instant::now();
    let semaphore = init_semaphore(max_concurrent);
    let mut tasks = FuturesUnordered::new();

    for target in targets {
        let semaphore = Arc::clone(&semaphore);
        let analyzer = Arc::clone(&analyzer);
        let task_target = target.clone();

        let handle = tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    return failed_result(&task_target, "admission semaphore closed".to_string())
                }
            };
            analyzer.analyze(&task_target).await
        });

        tasks.push(async move { (target, handle.await) });
    }

    let mut results = Vec::with_capacity(total);
    while let Some((target, joined)) = tasks.next().await {
        let result = match joined {
            Ok(result) => result,
            Err(join_error) => {
                warn!("Analysis task for {} failed: {join_error}", target.name);
                failed_result(&target, format!("analysis task failed: {join_error}"))
            }
        };

        let completed = results.len() + 1;
        log_site_result(&result, completed, total);
        log_progress(start_time, completed, total);
        observer(&result, completed, total);
        results.push(result);
    }

    results
}

fn failed_result(target: &SiteTarget, message: String) -> SiteAnalysisResult {
    let base_url = target.base_url().unwrap_or_else(|| target.domain.clone());
    SiteAnalysisResult::failed(
        target,
        detect_platform(&target.domain),
        &base_url,
        SiteStatus::Error,
        message,
    )
}
