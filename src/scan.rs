//! ScanCode Toolkit JSON report, reduced to the fields the classifier reads.

use std::path::Path;

use serde::Deserialize;

use crate::error::ScanError;

#[derive(Debug, Deserialize)]
pub struct ScanReport {
    pub files: Vec<ScannedFile>,
}

#[derive(Debug, Deserialize)]
pub struct ScannedFile {
    pub path: String,
    pub name: String,
    /// `"file"` or `"directory"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Absent on directories; required on files.
    pub license_detections: Option<Vec<LicenseDetection>>,
}

impl ScannedFile {
    pub fn is_directory(&self) -> bool {
        self.kind == "directory"
    }
}

#[derive(Debug, Deserialize)]
pub struct LicenseDetection {
    #[serde(default)]
    pub matches: Vec<LicenseMatch>,
}

#[derive(Debug, Deserialize)]
pub struct LicenseMatch {
    pub license_expression_spdx: String,
    pub score: f64,
}

/// Read and parse a ScanCode JSON report.
pub fn load_report(path: &Path) -> Result<ScanReport, ScanError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_report(&content).map_err(|source| ScanError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_report(content: &str) -> Result<ScanReport, serde_json::Error> {
    serde_json::from_str(content)
}
