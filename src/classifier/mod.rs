//! Groups scanned files per library and sorts their detections into
//! evidence buckets.

use std::path::{Component, Path};

use crate::config::ClassifierConfig;
use crate::error::ScanError;
use crate::license::NO_LICENSE;
use crate::models::{BucketKind, LicenseBucket, LicenseTree, Observation, OrderedMap};
use crate::scan::{ScanReport, ScannedFile};

pub mod patterns;

use patterns::{LibraryPlacement, Placement, RelevanceFilter};

/// Score recorded for files where the scanner found nothing.
const NO_LICENSE_SCORE: f64 = 100.0;

pub struct Classifier {
    filter: RelevanceFilter,
    library_depth: usize,
}

impl Classifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self, ScanError> {
        Ok(Self {
            filter: RelevanceFilter::new()?,
            library_depth: config.library_depth,
        })
    }

    /// Run the whole classification: group, then bucket.
    pub fn classify(&self, report: &ScanReport) -> Result<LicenseTree, ScanError> {
        let libraries = self.group_by_library(report)?;
        self.build_tree(&libraries)
    }

    /// The library a scanned path belongs to.
    ///
    /// A path must reach below the library directory; anything shallower
    /// is rejected.
    pub fn library_name(&self, path: &str) -> Result<String, ScanError> {
        let required = self.library_depth + 2;
        let parts: Vec<&str> = Path::new(path)
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => part.to_str(),
                _ => None,
            })
            .collect();

        if parts.len() < required {
            return Err(ScanError::LibraryPath {
                path: path.to_string(),
                required,
            });
        }
        Ok(parts[self.library_depth].to_string())
    }

    /// Relevant files of `report`, keyed by library in scan order.
    pub fn group_by_library<'r>(
        &self,
        report: &'r ScanReport,
    ) -> Result<OrderedMap<Vec<&'r ScannedFile>>, ScanError> {
        let mut libraries: OrderedMap<Vec<&ScannedFile>> = OrderedMap::new();

        for file in &report.files {
            if file.is_directory() || !self.filter.matches(&file.name) {
                continue;
            }
            let library = self.library_name(&file.path)?;
            libraries.entry_or_default(&library).push(file);
        }

        tracing::info!(libraries = libraries.len(), "grouped scanned files");
        Ok(libraries)
    }

    /// Sort every library's detections into license, readme and other buckets.
    pub fn build_tree(
        &self,
        libraries: &OrderedMap<Vec<&ScannedFile>>,
    ) -> Result<LicenseTree, ScanError> {
        let mut tree = LicenseTree::new();

        for (library, files) in libraries.iter() {
            let placement = LibraryPlacement::new(library)?;
            let evidence = tree.entry_or_default(library);

            for file in files {
                for (spdx, observations) in file_detections(file)?.iter() {
                    for obs in observations {
                        let kind = match placement.place(&obs.path) {
                            Placement::TopLevel(_) if spdx == NO_LICENSE => continue,
                            Placement::TopLevel(kind) => kind,
                            Placement::Source => BucketKind::Other,
                            Placement::Ignored => continue,
                        };
                        evidence
                            .bucket_mut(kind)
                            .entry_or_default(spdx)
                            .push(obs.clone());
                    }
                }
            }

            tracing::debug!(
                library,
                license_files = evidence.license_files.len(),
                readme_files = evidence.readme_files.len(),
                other_files = evidence.other_files.len(),
                "classified library"
            );
        }

        Ok(tree)
    }
}

/// Detected licenses of a single file, with duplicate observations collapsed.
///
/// Only the first detection's matches count. A file without detections
/// yields a single [`NO_LICENSE`] observation.
fn file_detections(file: &ScannedFile) -> Result<LicenseBucket, ScanError> {
    let detections = file
        .license_detections
        .as_ref()
        .ok_or_else(|| ScanError::MissingDetections {
            path: file.path.clone(),
        })?;

    let mut group = LicenseBucket::new();
    match detections.first() {
        None => group
            .entry_or_default(NO_LICENSE)
            .push(Observation::new(&file.path, NO_LICENSE_SCORE)),
        Some(detection) => {
            for m in &detection.matches {
                let obs = Observation::new(&file.path, m.score);
                let entry = group.entry_or_default(&m.license_expression_spdx);
                if !entry.contains(&obs) {
                    entry.push(obs);
                }
            }
        }
    }
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::parse_report;

    fn classifier() -> Classifier {
        Classifier::new(&ClassifierConfig::default()).unwrap()
    }

    const REPORT: &str = r#"{
        "files": [
            {"path": "src/zlib", "name": "zlib", "type": "directory"},
            {"path": "src/zlib/LICENSE", "name": "LICENSE", "type": "file",
             "license_detections": [{"matches": [
                {"license_expression_spdx": "Zlib", "score": 100.0},
                {"license_expression_spdx": "Zlib", "score": 100.0}
             ]}]},
            {"path": "src/zlib/README", "name": "README", "type": "file",
             "license_detections": []},
            {"path": "src/zlib/inflate.c", "name": "inflate.c", "type": "file",
             "license_detections": [
                {"matches": [{"license_expression_spdx": "Zlib", "score": 95.0}]},
                {"matches": [{"license_expression_spdx": "MIT", "score": 100.0}]}
             ]},
            {"path": "src/zlib/deflate.h", "name": "deflate.h", "type": "file",
             "license_detections": []},
            {"path": "src/zlib/Makefile", "name": "Makefile", "type": "file",
             "license_detections": []},
            {"path": "src/png/COPYRIGHT", "name": "COPYRIGHT", "type": "file",
             "license_detections": [{"matches": [
                {"license_expression_spdx": "Libpng", "score": 100.0},
                {"license_expression_spdx": "BSD-3-Clause", "score": 80.0}
             ]}]},
            {"path": "src/png/docs/license.txt", "name": "license.txt", "type": "file",
             "license_detections": [{"matches": [{"license_expression_spdx": "GPL-2.0-only", "score": 100.0}]}]}
        ]
    }"#;

    #[test]
    fn test_library_name_second_component() {
        let c = classifier();
        assert_eq!(c.library_name("src/zlib/inflate.c").unwrap(), "zlib");
        assert_eq!(c.library_name("./src/zlib/a/b.c").unwrap(), "zlib");
    }

    #[test]
    fn test_shallow_path_is_an_error() {
        let c = classifier();
        let err = c.library_name("src/LICENSE").unwrap_err();
        assert!(matches!(err, ScanError::LibraryPath { required: 3, .. }));
    }

    #[test]
    fn test_custom_depth() {
        let c = Classifier::new(&ClassifierConfig { library_depth: 2 }).unwrap();
        assert_eq!(c.library_name("repo/third_party/zlib/zlib.h").unwrap(), "zlib");
        assert!(c.library_name("repo/third_party/zlib").is_err());
    }

    #[test]
    fn test_groups_in_scan_order() {
        let report = parse_report(REPORT).unwrap();
        let libraries = classifier().group_by_library(&report).unwrap();
        assert_eq!(libraries.keys().collect::<Vec<_>>(), vec!["zlib", "png"]);
        // directory and Makefile are filtered out
        assert_eq!(libraries.get("zlib").map(Vec::len), Some(4));
    }

    #[test]
    fn test_buckets() {
        let report = parse_report(REPORT).unwrap();
        let tree = classifier().classify(&report).unwrap();

        let zlib = tree.get("zlib").unwrap();
        let license = zlib.license_files.get("Zlib").unwrap();
        assert_eq!(license.len(), 1, "duplicate matches collapse");
        assert!(zlib.readme_files.is_empty(), "readme without detection is dropped");
        assert_eq!(zlib.other_files.keys().collect::<Vec<_>>(), vec!["Zlib", "NoLicense"]);
        assert!(!zlib.other_files.contains_key("MIT"), "only the first detection counts");
        assert_eq!(zlib.other_files.get("Zlib").unwrap()[0].score, 95.0);

        let png = tree.get("png").unwrap();
        assert_eq!(
            png.license_files.keys().collect::<Vec<_>>(),
            vec!["Libpng", "BSD-3-Clause"]
        );
        assert!(png.other_files.is_empty(), "nested license.txt is ignored");
    }

    #[test]
    fn test_file_without_detections_field_fails() {
        let report = parse_report(
            r#"{"files": [{"path": "src/zlib/zlib.h", "name": "zlib.h", "type": "file"}]}"#,
        )
        .unwrap();
        let err = classifier().classify(&report).unwrap_err();
        assert!(matches!(err, ScanError::MissingDetections { .. }));
    }
}
