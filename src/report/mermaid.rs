use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::ReportConfig;
use crate::license::relation::node_id;
use crate::models::LicenseBucket;
use crate::verdict::{GroupAssessment, LibraryAssessment, Presentation};

const TITLE_BG: &str = "blueviolet";
const VERDICT_BG: &str = "limegreen";
const UNKNOWN_BG: &str = "gray";
const CELL_STYLE: &str =
    "color: blue; font-size: x-small; vertical-align: bottom; padding-left:2em; padding-right:0.5em;";

fn presentation_color(presentation: Presentation) -> &'static str {
    match presentation {
        Presentation::Consistent => "skyblue",
        Presentation::Inconsistent => "tomato",
        Presentation::Absent => "darkgray",
    }
}

/// Render the per-library audit diagram as a Mermaid flowchart.
pub fn render(assessments: &[LibraryAssessment], config: &ReportConfig) -> String {
    let mut out = String::new();
    out.push_str("---\n");
    out.push_str("config:\n");
    let _ = writeln!(out, "    maxTextSize: {}", config.max_text_size);
    out.push_str("---\n");
    out.push_str("graph LR\n");

    for lib in assessments {
        push_library_table(&mut out, lib);
        let parent = node_id(&lib.name);
        for group in &lib.groups {
            push_group_table(&mut out, &parent, group);
        }
    }
    out
}

fn push_library_table(out: &mut String, lib: &LibraryAssessment) {
    let id = node_id(&lib.name);
    let verdict_bg = if lib.is_unknown() { UNKNOWN_BG } else { VERDICT_BG };

    let _ = writeln!(out, "{id}[");
    out.push_str("\t<table style=\"background-color:white; color:#222222;\">\n");
    out.push_str("\t\t<thead>\n");
    let _ = writeln!(
        out,
        "\t\t\t<tr style=\"background-color: {TITLE_BG}; color:white\"><th colspan=\"4\">{}</th></tr>",
        lib.name
    );
    let _ = writeln!(
        out,
        "\t\t\t<tr style=\"background-color: {verdict_bg};\"><th colspan=\"4\">{}</th></tr>",
        lib.verdict
    );
    out.push_str("\t\t</thead>\n");
    out.push_str("\t\t<tbody>\n");
    push_evidence_rows(out, &lib.evidence);
    out.push_str("\t\t</tbody>\n");
    out.push_str("\t</table>\n");
    out.push_str("]\n");
    let _ = writeln!(out, "{id}@{{shape: text}}");
}

fn push_evidence_rows(out: &mut String, evidence: &LicenseBucket) {
    for (license, observations) in evidence.iter() {
        for obs in observations {
            let _ = writeln!(
                out,
                "\t\t\t<tr style=\"background-color: whitesmoke;\">\
                 <td nowrap style=\"text-align:center;\">{}</td>\
                 <td nowrap style=\"text-align:left;\">{license}</td>\
                 <td nowrap style=\"text-align:left; {CELL_STYLE}\">{}</td>\
                 <td nowrap style=\"text-align:right; {CELL_STYLE}\">{}%</td></tr>",
                obs.icon(),
                obs.path,
                obs.score
            );
        }
    }
}

fn push_group_table(out: &mut String, parent: &str, group: &GroupAssessment) {
    let id = node_id(&format!("{parent}_{}", group.license));

    let _ = writeln!(out, "{id}[");
    out.push_str("\t<table style=\"background-color:white; color:#222222;\">\n");
    let _ = writeln!(
        out,
        "\t\t<thead style=\"background-color: {};\"><tr><th colspan=\"3\">{}</th></tr></thead>",
        presentation_color(group.presentation),
        group.license
    );
    out.push_str("\t\t<tbody>\n");
    for obs in &group.observations {
        let _ = writeln!(
            out,
            "\t\t\t<tr style=\"background-color: whitesmoke;\">\
             <td style=\"text-align:center;\">{}</td>\
             <td style=\"text-align:left;\">{}</td>\
             <td style=\"text-align:right; {CELL_STYLE}\">{}%</td></tr>",
            obs.icon(),
            obs.path,
            obs.score
        );
    }
    out.push_str("\t\t</tbody>\n");
    out.push_str("\t</table>\n");
    out.push_str("]\n");
    let _ = writeln!(out, "{id}@{{shape: text}}");
    let _ = writeln!(out, "{parent} --> {id}");
}

/// Write a Mermaid document, creating parent directories as needed.
pub fn write(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write Mermaid file to {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = text.len(), "wrote mermaid file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;
    use crate::verdict::VerdictBasis;

    fn assessment() -> LibraryAssessment {
        let mut evidence = LicenseBucket::new();
        evidence
            .entry_or_default("MIT")
            .push(Observation::new("src/lib-x/LICENSE", 100.0));
        LibraryAssessment {
            name: "lib-x".to_string(),
            verdict: "MIT".to_string(),
            basis: VerdictBasis::LicenseFiles,
            evidence,
            groups: vec![
                GroupAssessment {
                    license: "BSD-2-Clause".to_string(),
                    presentation: Presentation::Consistent,
                    observations: vec![Observation::new("src/lib-x/a.c", 92.5)],
                },
                GroupAssessment {
                    license: "GPL-2.0-only".to_string(),
                    presentation: Presentation::Inconsistent,
                    observations: vec![Observation::new("src/lib-x/b.c", 100.0)],
                },
            ],
        }
    }

    #[test]
    fn test_front_matter() {
        let text = render(&[], &ReportConfig::default());
        assert_eq!(text, "---\nconfig:\n    maxTextSize: 90000\n---\ngraph LR\n");
    }

    #[test]
    fn test_library_and_groups() {
        let text = render(&[assessment()], &ReportConfig::default());
        assert!(text.contains("lib_x[\n"));
        assert!(text.contains("lib_x@{shape: text}"));
        assert!(text.contains("background-color: limegreen;"));
        assert!(text.contains(">src/lib-x/LICENSE</td>"));
        assert!(text.contains(">100%</td>"));
        assert!(text.contains("lib_x --> lib_x_BSD_2_Clause\n"));
        assert!(text.contains("lib_x --> lib_x_GPL_2_0_only\n"));
        assert!(text.contains("background-color: skyblue;"));
        assert!(text.contains("background-color: tomato;"));
        assert!(text.contains("⚠️"));
        assert!(text.contains(">92.5%</td>"));
    }

    #[test]
    fn test_unknown_verdict_is_gray() {
        let mut a = assessment();
        a.verdict = "Unknown".to_string();
        let text = render(&[a], &ReportConfig::default());
        assert!(text.contains("background-color: gray;"));
        assert!(!text.contains("limegreen"));
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output").join("license_list.mmd");
        write(&path, "graph LR\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "graph LR\n");
    }
}
