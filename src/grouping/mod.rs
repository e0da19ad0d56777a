//! Result grouping.
//!
//! After a batch completes, successful sites are bucketed by platform and
//! include-path signature: sites in one bucket can share one crawler
//! configuration. Every unsuccessful site lands in a single `error` bucket.

mod platform;
mod summary;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Serializer};

use crate::models::SiteAnalysisResult;

pub use platform::{detect_platform, CUSTOM_PLATFORM};
pub use summary::{summarize, BatchSummary};

/// Key of the bucket holding all non-successful results.
pub const ERROR_GROUP_KEY: &str = "error";

/// Sites sharing a platform and include-path signature.
#[derive(Debug, Clone, Serialize)]
pub struct SiteGroup<'a> {
    pub label: String,
    pub platform: String,
    /// Serialized as member domains.
    #[serde(serialize_with = "serialize_members")]
    pub members: Vec<&'a SiteAnalysisResult>,
    /// Union of the members' include paths, sorted.
    pub include_paths: Vec<String>,
}

#[allow(clippy::ptr_arg)] // serde passes the field by reference
fn serialize_members<S: Serializer>(
    members: &Vec<&SiteAnalysisResult>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(members.iter().map(|m| m.domain.as_str()))
}

/// Include-path signature: sorted, de-duplicated, comma-joined.
fn signature(include_paths: &[String]) -> String {
    let paths: BTreeSet<&str> = include_paths.iter().map(String::as_str).collect();
    paths.into_iter().collect::<Vec<_>>().join(",")
}

/// Partitions results into groups keyed by `platform::signature`.
pub fn group_results(results: &[SiteAnalysisResult]) -> BTreeMap<String, SiteGroup<'_>> {
    let mut groups: BTreeMap<String, SiteGroup<'_>> = BTreeMap::new();

    for result in results {
        let (key, platform) = if result.is_success() {
            (
                format!("{}::{}", result.platform, signature(&result.include_paths)),
                result.platform.as_str(),
            )
        } else {
            (ERROR_GROUP_KEY.to_string(), ERROR_GROUP_KEY)
        };

        let group = groups.entry(key.clone()).or_insert_with(|| SiteGroup {
            label: key,
            platform: platform.to_string(),
            members: Vec::new(),
            include_paths: Vec::new(),
        });
        group.members.push(result);
        for path in &result.include_paths {
            if !group.include_paths.contains(path) {
                group.include_paths.push(path.clone());
            }
        }
        group.include_paths.sort();
    }

    groups
}
