//! Site list loading.
//!
//! The site list is a small CSV-like text file: one `name,domain` pair per
//! line, or just a domain. Blank lines and `#` comments are skipped, as is a
//! leading header row (`name,domain` / `nome,dominio`).

use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::error_handling::InputError;
use crate::models::SiteTarget;

const HEADER_NAME_FIELDS: &[&str] = &["name", "nome", "site"];
const HEADER_DOMAIN_FIELDS: &[&str] = &["domain", "dominio", "domínio", "url"];

/// Reads and parses the site list at `path`.
///
/// # Errors
///
/// Fails if the file cannot be read or contains no site entries.
pub fn load_sites(path: &Path) -> Result<Vec<SiteTarget>> {
    let content = std::fs::read_to_string(path)
        .map_err(InputError::from)
        .with_context(|| format!("Failed to open site list {}", path.display()))?;

    let sites = parse_sites(&content);
    if sites.is_empty() {
        return Err(InputError::Empty).with_context(|| path.display().to_string());
    }

    info!("Loaded {} sites from {}", sites.len(), path.display());
    Ok(sites)
}

/// Parses site-list text. Entries are returned unvalidated, in file order.
pub fn parse_sites(content: &str) -> Vec<SiteTarget> {
    let mut sites = Vec::new();
    let mut first_entry = true;

    for line in content.lines() {
        let trimmed = line.trim().trim_start_matches('\u{feff}');
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.splitn(2, ',').map(unquote).collect();
        if std::mem::take(&mut first_entry) && is_header(&fields) {
            debug!("Skipping header row: {trimmed}");
            continue;
        }

        let site = match fields.as_slice() {
            [name, domain] if !domain.is_empty() => SiteTarget::new(*name, *domain),
            [domain, ..] => SiteTarget::new(*domain, *domain),
            [] => continue,
        };
        let site = if site.name.is_empty() {
            SiteTarget::new(site.domain.clone(), site.domain)
        } else {
            site
        };
        sites.push(site);
    }

    sites
}

fn unquote(field: &str) -> &str {
    field.trim().trim_matches('"').trim()
}

fn is_header(fields: &[&str]) -> bool {
    match fields {
        [name, domain] => {
            HEADER_NAME_FIELDS.contains(&name.to_lowercase().as_str())
                && HEADER_DOMAIN_FIELDS.contains(&domain.to_lowercase().as_str())
        }
        _ => false,
    }
}
