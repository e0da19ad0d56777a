//! Batch orchestration tests.
//!
//! Every target must produce exactly one result, whatever happens to it, and
//! the number of analyses in flight must never exceed the configured limit.

mod helpers;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use auction_structure::{
    run_batch, run_batch_with_observer, FetchStatus, SiteAnalyzer, SiteStatus, SiteTarget,
};

use helpers::{analyzer_for, fast_config, MemoryFetcher, PanickingFetcher};

fn targets(domains: &[&str]) -> Vec<SiteTarget> {
    domains.iter().map(|d| SiteTarget::new(*d, *d)).collect()
}

#[tokio::test]
async fn test_one_result_per_target_with_mixed_outcomes() {
    let fetcher = Arc::new(
        MemoryFetcher::new()
            .page("https://ok.lel.br", r#"<a href="/lote/1">1</a><a href="/lote/2">2</a>"#)
            .page("https://vazio.com.br", "<html><body>nada</body></html>")
            .failure("https://lento.com.br", FetchStatus::Timeout)
            .failure("https://bloqueado.com.br", FetchStatus::HttpError { code: 403 }),
    );
    let analyzer = Arc::new(analyzer_for(fetcher));
    let input = targets(&[
        "ok.lel.br",
        "vazio.com.br",
        "lento.com.br",
        "bloqueado.com.br",
        "inexistente.com.br",
        "url invalida",
    ]);

    let results = run_batch(input.clone(), analyzer, 3).await;

    assert_eq!(results.len(), input.len());
    let domains: HashSet<&str> = results.iter().map(|r| r.domain.as_str()).collect();
    assert_eq!(domains.len(), input.len());

    let status_of = |domain: &str| {
        results
            .iter()
            .find(|r| r.domain == domain)
            .map(|r| r.status)
            .expect("result present")
    };
    assert_eq!(status_of("ok.lel.br"), SiteStatus::Success);
    assert_eq!(status_of("vazio.com.br"), SiteStatus::NoPatternsFound);
    assert_eq!(status_of("lento.com.br"), SiteStatus::Timeout);
    assert_eq!(status_of("bloqueado.com.br"), SiteStatus::Error);
    assert_eq!(status_of("inexistente.com.br"), SiteStatus::Error);
    assert_eq!(status_of("url invalida"), SiteStatus::Error);
}

#[tokio::test]
async fn test_empty_batch() {
    let analyzer = Arc::new(analyzer_for(Arc::new(MemoryFetcher::new())));
    assert!(run_batch(Vec::new(), analyzer, 4).await.is_empty());
}

#[tokio::test]
async fn test_concurrency_is_bounded() {
    let fetcher = Arc::new(MemoryFetcher::new().with_delay(Duration::from_millis(50)));
    let analyzer = Arc::new(analyzer_for(Arc::clone(&fetcher)));
    let input: Vec<SiteTarget> = (0..8)
        .map(|i| SiteTarget::new(format!("site {i}"), format!("site{i}.com.br")))
        .collect();

    // Every home page 404s, so each site is exactly one fetch
    let results = run_batch(input, analyzer, 2).await;

    assert_eq!(results.len(), 8);
    assert!(fetcher.max_in_flight() <= 2);
    assert!(fetcher.max_in_flight() >= 1);
}

#[tokio::test]
async fn test_zero_concurrency_still_completes() {
    let analyzer = Arc::new(analyzer_for(Arc::new(MemoryFetcher::new())));
    let results = run_batch(targets(&["a.com.br", "b.com.br"]), analyzer, 0).await;
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_panicking_site_yields_error_result() {
    let fetcher = Arc::new(PanickingFetcher {
        trigger: "explode",
        inner: MemoryFetcher::new().page("https://calmo.lel.br", r#"<a href="/lote/1">1</a>"#),
    });
    let analyzer = Arc::new(SiteAnalyzer::new(fetcher, &fast_config()));

    let results = run_batch(targets(&["explode.com.br", "calmo.lel.br"]), analyzer, 2).await;

    assert_eq!(results.len(), 2);
    let failed = results
        .iter()
        .find(|r| r.domain == "explode.com.br")
        .expect("panicking site still reported");
    assert_eq!(failed.status, SiteStatus::Error);
    assert!(failed.error_message.starts_with("analysis task failed"));

    let calm = results
        .iter()
        .find(|r| r.domain == "calmo.lel.br")
        .expect("sibling site reported");
    assert_eq!(calm.status, SiteStatus::Success);
}

#[tokio::test]
async fn test_observer_sees_every_result() {
    let analyzer = Arc::new(analyzer_for(Arc::new(MemoryFetcher::new())));
    let input = targets(&["a.com.br", "b.com.br", "c.com.br"]);
    let mut seen = Vec::new();

    let results = run_batch_with_observer(input, analyzer, 2, |result, completed, total| {
        seen.push((result.domain.clone(), completed, total));
    })
    .await;

    assert_eq!(results.len(), 3);
    assert_eq!(seen.len(), 3);
    let counters: Vec<usize> = seen.iter().map(|(_, completed, _)| *completed).collect();
    assert_eq!(counters, vec![1, 2, 3]);
    assert!(seen.iter().all(|(_, _, total)| *total == 3));
}
