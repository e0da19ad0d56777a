//! Batch-level counts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{SiteAnalysisResult, SiteStatus};

/// Outcome counts over one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub success: usize,
    pub no_patterns_found: usize,
    pub errors: usize,
    pub timeouts: usize,
    /// `success / total`, 0.0 for an empty batch.
    pub success_rate: f64,
    /// Number of sites per detected platform.
    pub by_platform: BTreeMap<String, usize>,
}

/// Counts results by status and platform.
pub fn summarize(results: &[SiteAnalysisResult]) -> BatchSummary {
    let mut summary = BatchSummary {
        total: results.len(),
        ..Default::default()
    };

    for result in results {
        match result.status {
            SiteStatus::Success => summary.success += 1,
            SiteStatus::NoPatternsFound => summary.no_patterns_found += 1,
            SiteStatus::Error => summary.errors += 1,
            SiteStatus::Timeout => summary.timeouts += 1,
        }
        *summary
            .by_platform
            .entry(result.platform.clone())
            .or_default() += 1;
    }

    if summary.total > 0 {
        summary.success_rate = summary.success as f64 / summary.total as f64;
    }
    summary
}
