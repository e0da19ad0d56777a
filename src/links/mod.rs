//! Link extraction.
//!
//! Turns one fetched page into the set of same-site links it points to, plus
//! the bits of surrounding markup the classifier looks at: the anchor text, a
//! short slice of nearby text (where prices usually sit) and whether the
//! anchor is the main link of a product/lot card.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use log::debug;
use scraper::{ElementRef, Html, Selector};
use url::{Host, Url};

use crate::config::{MAX_ANCHOR_CONTEXT_CHARS, MAX_URL_LENGTH};

const ANCHOR_SELECTOR_STR: &str = "a[href]";
const CARD_SELECTOR_STR: &str =
    "[class*='card'], [class*='lote'], [class*='product'], [class*='produto']";

/// href prefixes that never lead to a page.
const IGNORED_HREF_PREFIXES: &[&str] = &["#", "javascript:", "mailto:", "tel:", "whatsapp:", "data:"];

/// How many ancestors are inspected when collecting anchor context.
const CONTEXT_ANCESTOR_DEPTH: usize = 2;

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(ANCHOR_SELECTOR_STR).expect("Failed to parse anchor selector - this is a bug")
});

static CARD_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(CARD_SELECTOR_STR).expect("Failed to parse card selector - this is a bug")
});

/// Ordered, de-duplicated set of canonical absolute URLs.
///
/// Iteration follows first-insertion order, which is document order for a
/// set produced by [`extract_links`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    urls: Vec<String>,
    seen: HashSet<String>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `url`; returns false if it was already present.
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.urls.push(url);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.urls
    }
}

impl<S: Into<String>> FromIterator<S> for LinkSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = LinkSet::new();
        for url in iter {
            set.insert(url);
        }
        set
    }
}

/// Markup surrounding the anchor(s) that point at one URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorContext {
    /// Visible anchor text (falls back to the `title` attribute), whitespace collapsed.
    pub text: String,
    /// Text of the closest enclosing block that stays under the context bound.
    pub context: String,
    /// The anchor is the first link inside a card-like element.
    pub in_card: bool,
}

/// Links extracted from one page.
#[derive(Debug, Clone, Default)]
pub struct PageLinks {
    pub links: LinkSet,
    pub anchors: HashMap<String, AnchorContext>,
}

/// Extracts same-site links from `html`, resolving hrefs against `final_url`.
///
/// Returns an empty result when `final_url` is not an absolute http(s) URL.
pub fn extract_links(html: &str, final_url: &str) -> PageLinks {
    let mut page = PageLinks::default();

    let base = match Url::parse(final_url) {
        Ok(url) => url,
        Err(e) => {
            debug!("Cannot resolve links against {final_url}: {e}");
            return page;
        }
    };
    let Some(base_site) = site_key(&base) else {
        return page;
    };

    let document = Html::parse_document(html);

    let card_links: HashSet<String> = document
        .select(&CARD_SELECTOR)
        .filter_map(|card| card.select(&ANCHOR_SELECTOR).next())
        .filter_map(|anchor| resolve(&base, &base_site, anchor))
        .collect();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(url) = resolve(&base, &base_site, anchor) else {
            continue;
        };

        let text = anchor_text(anchor);
        let context = anchor_context(anchor, &text);
        let in_card = card_links.contains(&url);

        let entry = page.anchors.entry(url.clone()).or_default();
        if entry.text.is_empty() {
            entry.text = text;
        }
        if entry.context.is_empty() {
            entry.context = context;
        }
        entry.in_card |= in_card;

        page.links.insert(url);
    }

    page
}

/// Registrable domain of `url`, used to decide whether two URLs are the same site.
///
/// IP literals and hosts without a public suffix (e.g. `localhost`) fall back
/// to the bare host. A leading `www.` never makes a difference.
pub fn site_key(url: &Url) -> Option<String> {
    match url.host()? {
        Host::Domain(domain) => {
            let host = domain.trim_end_matches('.');
            let host = host.strip_prefix("www.").unwrap_or(host);
            Some(psl::domain_str(host).unwrap_or(host).to_string())
        }
        Host::Ipv4(ip) => Some(ip.to_string()),
        Host::Ipv6(ip) => Some(ip.to_string()),
    }
}

/// Whether `a` and `b` belong to the same registrable domain.
pub fn same_site(a: &Url, b: &Url) -> bool {
    match (site_key(a), site_key(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Canonical form: `scheme://host[:port]path[?query]`, fragment dropped.
///
/// Query parameter order is left alone.
pub fn canonicalize(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let mut canonical = format!("{}://{}", url.scheme(), host);
    if let Some(port) = url.port() {
        canonical.push(':');
        canonical.push_str(&port.to_string());
    }
    canonical.push_str(url.path());
    if let Some(query) = url.query().filter(|q| !q.is_empty()) {
        canonical.push('?');
        canonical.push_str(query);
    }
    Some(canonical)
}

/// Resolves an anchor's href to a canonical same-site URL.
fn resolve(base: &Url, base_site: &str, anchor: ElementRef<'_>) -> Option<String> {
    let href = anchor.value().attr("href")?.trim();
    if href.is_empty() || href.len() > MAX_URL_LENGTH {
        return None;
    }
    let lowered = href.to_ascii_lowercase();
    if IGNORED_HREF_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
    {
        return None;
    }

    let url = base.join(href).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    if site_key(&url).as_deref() != Some(base_site) {
        return None;
    }
    canonicalize(&url)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn anchor_text(anchor: ElementRef<'_>) -> String {
    let text = collapse_whitespace(&anchor.text().collect::<String>());
    if !text.is_empty() {
        return text;
    }
    anchor
        .value()
        .attr("title")
        .map(collapse_whitespace)
        .unwrap_or_default()
}

/// Text of the nearest enclosing block that says more than the anchor itself.
///
/// Stops below `<body>`, at the first block that also links somewhere else,
/// and as soon as the text exceeds the context bound. A price printed next to
/// one list item therefore never rubs off on its siblings.
fn anchor_context(anchor: ElementRef<'_>, anchor_text: &str) -> String {
    let href = anchor.value().attr("href").map(str::trim);
    let mut context = String::new();
    for ancestor in anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .take(CONTEXT_ANCESTOR_DEPTH)
    {
        if matches!(ancestor.value().name(), "body" | "html") {
            break;
        }
        if ancestor
            .select(&ANCHOR_SELECTOR)
            .any(|other| other.value().attr("href").map(str::trim) != href)
        {
            break;
        }
        let text = collapse_whitespace(&ancestor.text().collect::<String>());
        if text.chars().count() > MAX_ANCHOR_CONTEXT_CHARS {
            break;
        }
        let says_more = text.len() > anchor_text.len();
        context = text;
        if says_more {
            break;
        }
    }
    context
}
