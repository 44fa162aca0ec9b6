//! Per-library verdicts derived from classified evidence and the relation graph.

use serde::Serialize;

use crate::config::ReportConfig;
use crate::license::relation::RelationGraph;
use crate::license::{NO_LICENSE, UNKNOWN_LICENSE};
use crate::models::{LibraryEvidence, LicenseBucket, Observation};

/// Which evidence the verdict was estimated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VerdictBasis {
    LicenseFiles,
    ReadmeFiles,
    /// Every detection across all buckets; no file went undetected.
    AllFiles,
    /// Some source file had no detection and there was no license or readme.
    Unknown,
}

impl std::fmt::Display for VerdictBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerdictBasis::LicenseFiles => write!(f, "license files"),
            VerdictBasis::ReadmeFiles => write!(f, "readme files"),
            VerdictBasis::AllFiles => write!(f, "all files"),
            VerdictBasis::Unknown => write!(f, "none"),
        }
    }
}

/// How a source-file license group relates to the library verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Presentation {
    /// Included in the verdict.
    Consistent,
    /// Not included in the verdict.
    Inconsistent,
    /// The files carry no detected license.
    Absent,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupAssessment {
    pub license: String,
    pub presentation: Presentation,
    pub observations: Vec<Observation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LibraryAssessment {
    pub name: String,
    pub verdict: String,
    pub basis: VerdictBasis,
    /// The bucket the verdict came from, shown next to it.
    pub evidence: LicenseBucket,
    pub groups: Vec<GroupAssessment>,
}

impl LibraryAssessment {
    pub fn is_unknown(&self) -> bool {
        self.verdict == UNKNOWN_LICENSE
    }

    pub fn count(&self, presentation: Presentation) -> usize {
        self.groups
            .iter()
            .filter(|g| g.presentation == presentation)
            .count()
    }

    /// Unknown verdict or at least one inconsistent group.
    pub fn needs_attention(&self) -> bool {
        self.is_unknown() || self.count(Presentation::Inconsistent) > 0
    }
}

/// Settle on a verdict for one library.
///
/// Top-level license files win over readmes; with neither, every detection
/// counts, unless some source file carries no license at all.
pub fn estimate_verdict(
    graph: &RelationGraph,
    evidence: &LibraryEvidence,
) -> (Option<String>, VerdictBasis) {
    if !evidence.license_files.is_empty() {
        (
            graph.estimate_most_strong_node(evidence.license_files.keys()),
            VerdictBasis::LicenseFiles,
        )
    } else if !evidence.readme_files.is_empty() {
        (
            graph.estimate_most_strong_node(evidence.readme_files.keys()),
            VerdictBasis::ReadmeFiles,
        )
    } else if !evidence.other_files.contains_key(NO_LICENSE) {
        let detected = detected_licenses(evidence);
        (
            graph.estimate_most_strong_node(detected.iter().map(String::as_str)),
            VerdictBasis::AllFiles,
        )
    } else {
        (None, VerdictBasis::Unknown)
    }
}

/// Every detected license across all buckets, first-seen order, without
/// the no-license sentinel.
fn detected_licenses(evidence: &LibraryEvidence) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for bucket in [
        &evidence.license_files,
        &evidence.readme_files,
        &evidence.other_files,
    ] {
        for key in bucket.keys() {
            if key != NO_LICENSE && !seen.iter().any(|s| s == key) {
                seen.push(key.to_string());
            }
        }
    }
    seen
}

pub fn assess_library(
    graph: &RelationGraph,
    config: &ReportConfig,
    name: &str,
    evidence: &LibraryEvidence,
) -> LibraryAssessment {
    let (estimate, basis) = estimate_verdict(graph, evidence);
    let verdict = estimate.unwrap_or_else(|| UNKNOWN_LICENSE.to_string());

    let shown_evidence = match basis {
        VerdictBasis::LicenseFiles => evidence.license_files.clone(),
        VerdictBasis::ReadmeFiles => evidence.readme_files.clone(),
        VerdictBasis::AllFiles | VerdictBasis::Unknown => LicenseBucket::new(),
    };

    let hide_no_license = config.hide_no_license
        && evidence.other_files.len() >= 2
        && verdict != UNKNOWN_LICENSE;

    let groups = evidence
        .other_files
        .iter()
        .filter(|(license, _)| !(hide_no_license && *license == NO_LICENSE))
        .map(|(license, observations)| {
            let presentation = if graph.is_included(license, &verdict) {
                Presentation::Consistent
            } else if license == NO_LICENSE {
                Presentation::Absent
            } else {
                Presentation::Inconsistent
            };
            GroupAssessment {
                license: license.to_string(),
                presentation,
                observations: observations.clone(),
            }
        })
        .collect();

    if basis != VerdictBasis::Unknown && !graph.contains(&verdict) {
        tracing::debug!(library = name, verdict = %verdict, "verdict is not in the relation graph");
    }
    tracing::debug!(library = name, verdict = %verdict, basis = %basis, "assessed library");

    LibraryAssessment {
        name: name.to_string(),
        verdict,
        basis,
        evidence: shown_evidence,
        groups,
    }
}
