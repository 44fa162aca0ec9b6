//! `license-verdict` — turn ScanCode output into per-library license verdicts.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and install logging ([`logger`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Build the license relation graph from the curated table ([`license`]).
//! 4. Read the ScanCode report ([`scan`]) and classify it into a license
//!    tree ([`classifier`]), or read a previously exported tree.
//! 5. Assess every library against the graph ([`verdict`]).
//! 6. Render the requested report ([`report`]).
//! 7. Exit `0`, or `1` under `--strict` when a library needs attention.

mod classifier;
mod cli;
mod config;
mod error;
mod license;
mod logger;
mod models;
mod report;
mod scan;
mod verdict;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use classifier::Classifier;
use cli::{Cli, ReportFormat};
use config::load_config;
use license::relation::RelationGraph;
use license::table::RelationTable;
use models::LicenseTree;
use verdict::{assess_library, LibraryAssessment};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let base_dir = cli
        .input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let config = load_config(base_dir, cli.config.as_deref())?;

    let table = RelationTable::with_extra(&config.relations.extra);
    let graph = RelationGraph::from_table(&table);
    tracing::info!(
        pairs = table.len(),
        licenses = graph.node_count(),
        edges = graph.edge_count(),
        "built relation graph"
    );

    let tree = if cli.from_tree {
        read_tree(&cli.input)?
    } else {
        let report = scan::load_report(&cli.input)?;
        let tree = Classifier::new(&config.classifier)?.classify(&report)?;
        if !cli.quiet {
            eprintln!(
                "  {} {} files, {} libraries",
                "→".cyan(),
                report.files.len(),
                tree.len()
            );
        }
        tree
    };

    if let Some(path) = &cli.tree_out {
        write_tree(path, &tree)?;
    }

    if let Some(path) = &cli.relations {
        report::mermaid::write(path, &graph.to_mermaid())?;
        if !cli.quiet {
            eprintln!("  {} relation graph written to {}", "→".cyan(), path.display());
        }
    }

    let assessments = assess_all(&graph, &config.report, &tree, cli.quiet)?;

    // --mermaid implies mermaid format
    let report_format = match &cli.mermaid {
        Some(_) => ReportFormat::Mermaid,
        None => cli.report.clone(),
    };
    let mermaid_path = cli
        .mermaid
        .unwrap_or_else(|| PathBuf::from("output/license_list.mmd"));

    match report_format {
        ReportFormat::Terminal => {
            report::terminal::render(&assessments, &cli.input, cli.verbose > 0, cli.quiet);
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&assessments)?);
        }
        ReportFormat::Mermaid => {
            let text = report::mermaid::render(&assessments, &config.report);
            report::mermaid::write(&mermaid_path, &text)?;
            if !cli.quiet {
                println!("Mermaid report written to: {}", mermaid_path.display());
            }
        }
    }

    let flagged = assessments.iter().filter(|a| a.needs_attention()).count();
    if flagged > 0 {
        tracing::warn!(libraries = flagged, "libraries need attention");
        if cli.strict {
            std::process::exit(1);
        }
    }

    Ok(())
}

fn assess_all(
    graph: &RelationGraph,
    config: &config::ReportConfig,
    tree: &LicenseTree,
    quiet: bool,
) -> Result<Vec<LibraryAssessment>> {
    let pb = if !quiet {
        let pb = ProgressBar::new(tree.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut assessments = Vec::with_capacity(tree.len());
    for (name, evidence) in tree.iter() {
        assessments.push(assess_library(graph, config, name, evidence));
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    Ok(assessments)
}

fn read_tree(path: &Path) -> Result<LicenseTree> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read license tree {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse license tree {}", path.display()))
}

fn write_tree(path: &Path, tree: &LicenseTree) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, serde_json::to_string_pretty(tree)?)
        .with_context(|| format!("Failed to write license tree to {}", path.display()))?;
    tracing::info!(path = %path.display(), libraries = tree.len(), "wrote license tree");
    Ok(())
}
