use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::verdict::{LibraryAssessment, Presentation};

/// Render a colored terminal report.
pub fn render(assessments: &[LibraryAssessment], input: &Path, verbose: bool, quiet: bool) {
    let total = assessments.len();
    let unknown = assessments.iter().filter(|a| a.is_unknown()).count();
    let attention = assessments
        .iter()
        .filter(|a| !a.is_unknown() && a.needs_attention())
        .count();
    let clean = total - unknown - attention;

    if quiet {
        println!(
            "Libraries: {}  Clean: {}  Inconsistent: {}  Unknown: {}",
            total,
            clean.to_string().green(),
            attention.to_string().red(),
            unknown.to_string().yellow(),
        );
        return;
    }

    println!(
        "\n {} v{}",
        "license-verdict".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Input: {}\n", input.display());

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Libraries          : {}", total));
    println!(
        " │  {:<48} │",
        format!("{}  Clean           : {:>4}", "✓".green(), clean)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Inconsistent    : {:>4}", "✗".red(), attention)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Unknown         : {:>4}", "?".yellow(), unknown)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if total > 0 {
        render_library_table(assessments);
        println!();
    }

    if verbose {
        for lib in assessments.iter().filter(|a| !a.groups.is_empty()) {
            println!(" {} {}\n", "[FILES]".cyan().bold(), lib.name.bold());
            render_group_table(lib);
            println!();
        }
    }
}

fn render_library_table(assessments: &[LibraryAssessment]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Library").add_attribute(Attribute::Bold),
            Cell::new("Verdict").add_attribute(Attribute::Bold),
            Cell::new("Basis").add_attribute(Attribute::Bold),
            Cell::new("Consistent").add_attribute(Attribute::Bold),
            Cell::new("Inconsistent").add_attribute(Attribute::Bold),
            Cell::new("No license").add_attribute(Attribute::Bold),
        ]);

    for lib in assessments {
        let verdict_color = if lib.is_unknown() {
            Color::DarkGrey
        } else if lib.needs_attention() {
            Color::Red
        } else {
            Color::Green
        };

        table.add_row(vec![
            Cell::new(&lib.name),
            Cell::new(&lib.verdict).fg(verdict_color),
            Cell::new(lib.basis.to_string()),
            count_cell(lib.count(Presentation::Consistent), Color::Cyan),
            count_cell(lib.count(Presentation::Inconsistent), Color::Red),
            count_cell(lib.count(Presentation::Absent), Color::DarkGrey),
        ]);
    }

    println!("{}", table);
}

fn count_cell(count: usize, color: Color) -> Cell {
    let cell = Cell::new(count).set_alignment(CellAlignment::Right);
    if count > 0 {
        cell.fg(color)
    } else {
        cell
    }
}

fn render_group_table(lib: &LibraryAssessment) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("File").add_attribute(Attribute::Bold),
            Cell::new("Score").add_attribute(Attribute::Bold),
        ]);

    for group in &lib.groups {
        let color = match group.presentation {
            Presentation::Consistent => Color::Cyan,
            Presentation::Inconsistent => Color::Red,
            Presentation::Absent => Color::DarkGrey,
        };
        for obs in &group.observations {
            table.add_row(vec![
                Cell::new(&group.license).fg(color),
                Cell::new(format!("{} {}", obs.icon(), obs.path)),
                Cell::new(format!("{}%", obs.score)).set_alignment(CellAlignment::Right),
            ]);
        }
    }

    println!("{}", table);
}
