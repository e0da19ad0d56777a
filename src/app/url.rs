//! Site target normalization.

use log::warn;

use crate::config::MAX_URL_LENGTH;

/// Turns a site-list domain entry into the home URL to fetch.
///
/// Adds `https://` if no scheme is present, collapses a duplicated `www.www.`
/// prefix, then validates syntax, scheme and host. URLs longer than
/// `MAX_URL_LENGTH` are rejected. Logs a warning and returns `None` when the
/// entry is unusable.
///
/// The path is kept as given, so `exemplo.com.br` stays without a trailing slash.
pub fn normalize_target_url(domain: &str) -> Option<String> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        warn!("Skipping empty site entry");
        return None;
    }

    // Check length before normalization
    if trimmed.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}...",
            trimmed.len(),
            MAX_URL_LENGTH,
            trimmed.chars().take(50).collect::<String>()
        );
        return None;
    }

    let explicit_scheme = trimmed.find("://").filter(|&idx| {
        idx > 0
            && trimmed[..idx]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    });
    let (scheme, rest) = match explicit_scheme {
        Some(idx) => {
            let scheme = &trimmed[..idx];
            if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
                warn!("Skipping unsupported scheme for URL: {trimmed}");
                return None;
            }
            (&trimmed[..idx + 3], &trimmed[idx + 3..])
        }
        None => ("https://", trimmed),
    };

    let mut host_and_path = rest.to_string();
    while host_and_path.to_ascii_lowercase().starts_with("www.www.") {
        host_and_path.replace_range(..4, "");
    }

    let normalized = format!("{}{}", scheme.to_ascii_lowercase(), host_and_path);
    if normalized.len() > MAX_URL_LENGTH {
        warn!("Skipping normalized URL exceeding maximum length: {trimmed}");
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) if !matches!(parsed.scheme(), "http" | "https") => {
            warn!("Skipping unsupported scheme for URL: {trimmed}");
            None
        }
        Ok(parsed) if parsed.host_str().map_or(true, str::is_empty) => {
            warn!("Skipping URL without host: {trimmed}");
            None
        }
        Ok(_) => Some(normalized),
        Err(e) => {
            warn!("Skipping invalid URL {trimmed}: {e}");
            None
        }
    }
}
