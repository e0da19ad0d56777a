//! URL pattern extraction.
//!
//! Lot URLs of one site usually share a fixed prefix followed by a variable
//! part (`/lote/12345`, `/item/trator-massey-275`). Each URL path is
//! normalized segment by segment, the fixed prefix before the first variable
//! segment becomes the template key, and URLs are grouped by that key.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{CONFIDENCE_SATURATION, MAX_PATTERNS, MAX_PATTERN_EXAMPLES};

const ID_PLACEHOLDER: &str = "{id}";
const HASH_PLACEHOLDER: &str = "{hash}";
const SLUG_PLACEHOLDER: &str = "{slug}";

static NUMERIC_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+$").expect("Failed to compile numeric segment regex - this is a bug")
});

static HASH_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)[0-9a-f]{8,}$").expect("Failed to compile hash segment regex - this is a bug")
});

static SLUG_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)[a-z0-9%._]+(-[a-z0-9%._]+)+$")
        .expect("Failed to compile slug segment regex - this is a bug")
});

/// One ranked URL template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternCandidate {
    /// Path prefix ending in `/`, e.g. `/lote/`.
    pub pattern: String,
    /// `min(count / 10, 1.0)`.
    pub confidence: f64,
    /// Number of distinct URLs grouped under this template.
    pub count: usize,
    /// Up to five URLs, first-seen order.
    pub examples: Vec<String>,
}

/// Replaces a variable path segment with its placeholder.
///
/// Checks run numeric, then hash, then slug, so `20240101` is an id and not a hash.
fn normalize_segment(segment: &str) -> Option<&'static str> {
    if NUMERIC_SEGMENT.is_match(segment) {
        Some(ID_PLACEHOLDER)
    } else if HASH_SEGMENT.is_match(segment) {
        Some(HASH_PLACEHOLDER)
    } else if SLUG_SEGMENT.is_match(segment) {
        Some(SLUG_PLACEHOLDER)
    } else {
        None
    }
}

/// Structural template of a path: `/lote/123/fotos` → `/lote/{id}/fotos`.
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| normalize_segment(s).unwrap_or(s))
        .collect();
    format!("/{}", segments.join("/"))
}

/// Template key of a lot URL: the fixed path prefix before the first variable segment.
///
/// When no segment looks variable the whole path is the prefix
/// (`/lote/casa` → `/lote/casa/`, `/detalhe?lote_id=5` → `/detalhe/`).
/// A root-only key yields `None`.
pub fn template_key(url: &Url) -> Option<String> {
    let segments: Vec<&str> = url.path().split('/').filter(|s| !s.is_empty()).collect();

    let fixed_len = segments
        .iter()
        .position(|s| normalize_segment(s).is_some())
        .unwrap_or(segments.len());

    if fixed_len == 0 {
        return None;
    }
    Some(format!("/{}/", segments[..fixed_len].join("/")))
}

/// Groups lot URLs by template and ranks the groups.
///
/// Duplicate URLs count once. Groups are ranked by size, largest first; ties
/// keep the order in which their first URL was seen. At most ten groups are
/// returned, and an empty input gives an empty list.
pub fn extract_patterns<S: AsRef<str>>(lot_urls: &[S]) -> Vec<PatternCandidate> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&str>)> = Vec::new();

    for raw in lot_urls.iter().map(AsRef::as_ref) {
        if !seen.insert(raw) {
            continue;
        }
        let Some(key) = Url::parse(raw).ok().as_ref().and_then(template_key) else {
            continue;
        };
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(raw);
    }

    let mut candidates: Vec<PatternCandidate> = groups
        .into_iter()
        .map(|(pattern, urls)| PatternCandidate {
            confidence: confidence(urls.len()),
            count: urls.len(),
            examples: urls
                .iter()
                .take(MAX_PATTERN_EXAMPLES)
                .map(|u| u.to_string())
                .collect(),
            pattern,
        })
        .collect();

    // sort_by is stable: equal counts keep discovery order
    candidates.sort_by(|a, b| b.count.cmp(&a.count));
    candidates.truncate(MAX_PATTERNS);
    candidates
}

fn confidence(count: usize) -> f64 {
    (count as f64 / CONFIDENCE_SATURATION as f64).min(1.0)
}
