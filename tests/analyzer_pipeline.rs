//! Site analysis pipeline tests.
//!
//! These drive `SiteAnalyzer` end to end (fetch, extract, classify, visit,
//! pattern extraction, synthesis) over an in-memory fetcher, so every page a
//! site serves is spelled out in the test.

mod helpers;

use std::sync::Arc;
use std::time::{Duration, Instant};

use auction_structure::{Config, FetchStatus, SiteAnalyzer, SiteStatus, SiteTarget};

use helpers::{analyzer_for, fast_config, MemoryFetcher};

const HOME: &str = "https://exemplo.lel.br";

fn lots_page(paths: &[&str]) -> String {
    let anchors: String = paths
        .iter()
        .map(|p| format!("<li><a href=\"{p}\">Lote {p}</a></li>"))
        .collect();
    format!("<html><body><ul>{anchors}</ul></body></html>")
}

#[tokio::test]
async fn test_home_links_to_listing_with_three_lots() {
    let fetcher = Arc::new(
        MemoryFetcher::new()
            .page(HOME, r#"<html><body><a href="/leiloes">Leilões</a></body></html>"#)
            .page(
                "https://exemplo.lel.br/leiloes",
                &lots_page(&["/lote/1", "/lote/2", "/lote/3"]),
            ),
    );
    let analyzer = analyzer_for(Arc::clone(&fetcher));

    let result = analyzer
        .analyze(&SiteTarget::new("Exemplo", "exemplo.lel.br"))
        .await;

    assert_eq!(result.status, SiteStatus::Success);
    assert_eq!(result.platform, "lel.br");
    assert_eq!(result.include_paths, vec!["/lote/"]);
    assert_eq!(
        result.crawl_start_urls,
        vec![HOME, "https://exemplo.lel.br/leiloes"]
    );
    assert_eq!(result.listing_pages, vec!["https://exemplo.lel.br/leiloes"]);
    assert_eq!(result.patterns.len(), 1);
    assert_eq!(result.patterns[0].count, 3);
    assert!((result.patterns[0].confidence - 0.3).abs() < 1e-9);
    assert_eq!(result.lot_examples.len(), 3);
    assert_eq!(result.pages_visited, 2);
    assert_eq!(result.links_analyzed, 4);
    assert!(result.error_message.is_empty());

    // Home first, then the discovered listing, then the common listing paths
    let requests = fetcher.requests();
    assert_eq!(requests[0], HOME);
    assert_eq!(requests[1], "https://exemplo.lel.br/leiloes");
    assert_eq!(requests.iter().filter(|u| u.ends_with("/leiloes")).count(), 1);
    assert_eq!(result.pages_failed, requests.len() - 2);
}

#[tokio::test]
async fn test_home_403_is_fatal() {
    let fetcher = Arc::new(MemoryFetcher::new().failure(HOME, FetchStatus::HttpError { code: 403 }));
    let analyzer = analyzer_for(Arc::clone(&fetcher));

    let result = analyzer
        .analyze(&SiteTarget::new("Exemplo", "exemplo.lel.br"))
        .await;

    assert_eq!(result.status, SiteStatus::Error);
    assert_eq!(result.error_message, "HTTP 403");
    assert_eq!(result.pages_visited, 0);
    assert!(result.patterns.is_empty());
    assert!(result.include_paths.is_empty());
    assert!(result.crawl_start_urls.is_empty());
    assert_eq!(fetcher.requests(), vec![HOME]);
}

#[tokio::test]
async fn test_home_timeout_maps_to_timeout_status() {
    let fetcher = Arc::new(MemoryFetcher::new().failure(HOME, FetchStatus::Timeout));
    let result = analyzer_for(fetcher)
        .analyze(&SiteTarget::new("Exemplo", "exemplo.lel.br"))
        .await;

    assert_eq!(result.status, SiteStatus::Timeout);
    assert!(!result.error_message.is_empty());
}

#[tokio::test]
async fn test_home_connection_and_parse_errors_are_errors() {
    for status in [
        FetchStatus::ConnectionError("dns error".into()),
        FetchStatus::ParseError("empty response body".into()),
    ] {
        let fetcher = Arc::new(MemoryFetcher::new().failure(HOME, status));
        let result = analyzer_for(fetcher)
            .analyze(&SiteTarget::new("Exemplo", "exemplo.lel.br"))
            .await;
        assert_eq!(result.status, SiteStatus::Error);
    }
}

#[tokio::test]
async fn test_invalid_domain_is_not_fetched() {
    let fetcher = Arc::new(MemoryFetcher::new());
    let result = analyzer_for(Arc::clone(&fetcher))
        .analyze(&SiteTarget::new("Quebrado", "exa mple.com.br"))
        .await;

    assert_eq!(result.status, SiteStatus::Error);
    assert!(result.error_message.starts_with("invalid URL"));
    assert!(fetcher.requests().is_empty());
}

#[tokio::test]
async fn test_no_lots_yields_fallback_config() {
    let fetcher = Arc::new(MemoryFetcher::new().page(
        HOME,
        r#"<a href="/sobre">Sobre</a><a href="/contato">Contato</a>"#,
    ));
    let result = analyzer_for(fetcher)
        .analyze(&SiteTarget::new("Exemplo", "exemplo.lel.br"))
        .await;

    assert_eq!(result.status, SiteStatus::NoPatternsFound);
    assert_eq!(result.include_paths, vec!["/lote/", "/item/", "/detalhe/"]);
    assert_eq!(result.crawl_start_urls, vec![HOME]);
    assert!(result.error_message.is_empty());
}

#[tokio::test]
async fn test_lots_on_home_only() {
    let fetcher = Arc::new(MemoryFetcher::new().page(
        HOME,
        r#"
        <div class="card"><a href="/item/trator-275">Trator</a><span>R$ 80.000,00</span></div>
        <div class="card"><a href="/item/colheitadeira-9">Colheitadeira</a><span>R$ 120.000,00</span></div>
        "#,
    ));
    let result = analyzer_for(fetcher)
        .analyze(&SiteTarget::new("Exemplo", "exemplo.lel.br"))
        .await;

    assert_eq!(result.status, SiteStatus::Success);
    assert_eq!(result.include_paths, vec!["/item/"]);
    assert!(result.listing_pages.is_empty());
    assert_eq!(result.crawl_start_urls, vec![HOME]);
}

#[tokio::test]
async fn test_secondary_failures_are_skipped() {
    let fetcher = Arc::new(
        MemoryFetcher::new()
            .page(
                HOME,
                r#"<a href="/leiloes">Leilões</a><a href="/catalogo">Catálogo</a>"#,
            )
            .failure(
                "https://exemplo.lel.br/leiloes",
                FetchStatus::ConnectionError("reset".into()),
            )
            .page(
                "https://exemplo.lel.br/catalogo",
                &lots_page(&["/lote/10", "/lote/11"]),
            ),
    );
    let result = analyzer_for(fetcher)
        .analyze(&SiteTarget::new("Exemplo", "exemplo.lel.br"))
        .await;

    assert_eq!(result.status, SiteStatus::Success);
    assert_eq!(result.listing_pages, vec!["https://exemplo.lel.br/catalogo"]);
    assert!(result.pages_failed >= 1);
    assert!(result.error_message.is_empty());
}

#[tokio::test]
async fn test_redirected_home_uses_final_url() {
    let final_url = "https://www.leiloes.com.br/";
    let fetcher = Arc::new(MemoryFetcher::new().redirect(
        "https://leiloes.com.br",
        final_url,
        r#"<a href="lote/5">Lote 5</a><a href="lote/6">Lote 6</a>"#,
    ));
    let result = analyzer_for(fetcher)
        .analyze(&SiteTarget::new("Leilões", "leiloes.com.br"))
        .await;

    assert_eq!(result.base_url, "https://leiloes.com.br");
    assert_eq!(result.final_url, final_url);
    assert_eq!(result.crawl_start_urls[0], final_url);
    assert_eq!(result.lot_examples[0], "https://www.leiloes.com.br/lote/5");
}

#[tokio::test]
async fn test_page_budget_is_respected() {
    let fetcher = Arc::new(MemoryFetcher::new().page(HOME, "<html><body>vazio</body></html>"));
    let config = Config {
        max_pages: 3,
        ..fast_config()
    };
    let analyzer = SiteAnalyzer::new(fetcher.clone(), &config);

    analyzer
        .analyze(&SiteTarget::new("Exemplo", "exemplo.lel.br"))
        .await;

    assert_eq!(fetcher.requests().len(), 3);
}

#[tokio::test]
async fn test_request_interval_spaces_page_visits() {
    let fetcher = Arc::new(MemoryFetcher::new().page(HOME, "<html><body>vazio</body></html>"));
    let config = Config {
        max_pages: 3,
        request_interval_ms: 100,
        ..fast_config()
    };
    let analyzer = SiteAnalyzer::new(fetcher, &config);

    let start = Instant::now();
    analyzer
        .analyze(&SiteTarget::new("Exemplo", "exemplo.lel.br"))
        .await;

    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_analysis_time_is_recorded() {
    let fetcher = Arc::new(
        MemoryFetcher::new()
            .page(HOME, "<html></html>")
            .with_delay(Duration::from_millis(20)),
    );
    let config = Config {
        max_pages: 1,
        ..fast_config()
    };
    let result = SiteAnalyzer::new(fetcher, &config)
        .analyze(&SiteTarget::new("Exemplo", "exemplo.lel.br"))
        .await;

    assert!(result.analysis_time_ms >= 20);
}
