//! Link classification.
//!
//! Splits a page's links into listing pages (worth visiting) and lot pages
//! (what the crawler will eventually be configured to collect). Pure function
//! of its inputs; the heuristics themselves are the tables in [`rules`].

mod rules;

use std::collections::HashMap;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::links::{AnchorContext, LinkSet};

pub use rules::ClassifierRules;

/// Navigation text is only treated as chrome when the anchor is this short.
/// Lot titles like "Casa sobre terreno de 300m²" must not be excluded.
const MAX_CHROME_WORDS: usize = 3;

/// Two disjoint sets of classified links, each in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedLinks {
    pub listing_candidates: LinkSet,
    pub lot_candidates: LinkSet,
}

/// Which heuristics fired for one URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Signals {
    lot_path: bool,
    lot_text: bool,
    price_context: bool,
    card: bool,
    listing_path: bool,
    listing_text: bool,
}

impl Signals {
    fn is_lot(&self) -> bool {
        self.lot_path || self.lot_text || self.price_context || self.card
    }

    fn is_listing(&self) -> bool {
        self.listing_path || self.listing_text
    }
}

/// Classifies `links` using anchor context from the same page.
///
/// A URL matching both lot and listing heuristics is a lot. The site root is
/// never a lot. URLs without anchor context are judged on their path alone.
pub fn classify(
    links: &LinkSet,
    anchors: &HashMap<String, AnchorContext>,
    rules: &ClassifierRules,
) -> ClassifiedLinks {
    let mut classified = ClassifiedLinks::default();
    let empty = AnchorContext::default();

    for link in links.iter() {
        let Ok(url) = Url::parse(link) else {
            continue;
        };
        let anchor = anchors.get(link).unwrap_or(&empty);
        let signals = signals_for(&url, anchor, rules);

        if signals.is_lot() && url.path() != "/" {
            classified.lot_candidates.insert(link);
        } else if signals.is_listing() {
            classified.listing_candidates.insert(link);
        }
    }

    classified
}

fn signals_for(url: &Url, anchor: &AnchorContext, rules: &ClassifierRules) -> Signals {
    // Url keeps the path percent-encoded; the tables are written with accents
    let path = percent_decode_str(url.path()).decode_utf8_lossy();
    let text = anchor.text.to_lowercase();
    let context = anchor.context.to_lowercase();
    let chrome = is_navigation_chrome(&text, rules);

    let lot_path = rules.lot_paths.iter().any(|re| re.is_match(&path))
        || url.query().is_some_and(|q| {
            let query = percent_decode_str(q).decode_utf8_lossy();
            rules.lot_queries.iter().any(|re| re.is_match(&query))
        });

    Signals {
        lot_path,
        lot_text: !chrome && rules.lot_keywords.iter().any(|kw| text.contains(kw.as_str())),
        price_context: !chrome && rules.price_context.iter().any(|re| re.is_match(&context)),
        card: !chrome && anchor.in_card,
        listing_path: rules.listing_paths.iter().any(|re| re.is_match(&path)),
        listing_text: rules
            .listing_keywords
            .iter()
            .any(|kw| text.contains(kw.as_str())),
    }
}

/// Short anchor text naming an account or navigation destination.
fn is_navigation_chrome(text: &str, rules: &ClassifierRules) -> bool {
    if text.split_whitespace().count() > MAX_CHROME_WORDS {
        return false;
    }
    rules
        .exclusion_keywords
        .iter()
        .any(|kw| text.contains(kw.as_str()))
}
