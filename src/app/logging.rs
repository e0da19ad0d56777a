//! Progress logging utilities.

use std::time::Instant;

use log::info;

use crate::config::PROGRESS_LOG_EVERY;
use crate::models::SiteAnalysisResult;

/// Logs one completed site: `[n/total] name -> status`.
pub fn log_site_result(result: &SiteAnalysisResult, completed: usize, total: usize) {
    if result.error_message.is_empty() {
        info!(
            "[{completed}/{total}] {} -> {} ({} patterns, {} pages, {} ms)",
            result.name,
            result.status,
            result.patterns.len(),
            result.pages_visited,
            result.analysis_time_ms
        );
    } else {
        info!(
            "[{completed}/{total}] {} -> {}: {}",
            result.name, result.status, result.error_message
        );
    }
}

/// Logs overall throughput every `PROGRESS_LOG_EVERY` completions and at the end.
pub fn log_progress(start_time: Instant, completed: usize, total: usize) {
    if completed % PROGRESS_LOG_EVERY != 0 && completed != total {
        return;
    }
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Analyzed {} of {} sites in {:.2} seconds (~{:.2} sites/sec)",
        completed, total, elapsed_secs, rate
    );
}
