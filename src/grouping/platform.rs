//! Platform detection from the domain.

/// Domain substring -> platform name. First match wins.
const PLATFORM_TABLE: &[(&str, &str)] = &[
    (".lel.br", "lel.br"),
    (".leilao.br", "leilao.br"),
    ("superbid", "superbid"),
    ("bomvalor", "bomvalor"),
    ("zuk", "zuk"),
    ("copart", "copart"),
];

/// Platform for sites that match no table entry.
pub const CUSTOM_PLATFORM: &str = "custom";

/// Detects the auction platform a domain runs on.
pub fn detect_platform(domain: &str) -> &'static str {
    let domain = domain.trim().to_lowercase();
    PLATFORM_TABLE
        .iter()
        .find(|(needle, _)| domain.contains(needle))
        .map(|(_, platform)| *platform)
        .unwrap_or(CUSTOM_PLATFORM)
}
