use bikescore::config::{ModelWeights, ScoringDimension, ScoringModel};
use bikescore::scorer::observer::EventKind;
use bikescore::scorer::{DiagnosticCounts, NormalizedWeights};
use bikescore::summary::{ScoreSummary, COMPOSITE_BANDS};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use strum::IntoEnumIterator;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn print_weights(weights: &ModelWeights) {
    let n = NormalizedWeights::normalize(weights);
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Weight").add_attribute(Attribute::Bold),
        Cell::new("Raw"),
        Cell::new("Share").fg(Color::Cyan),
    ]);
    for (name, raw, share) in [
        ("separation_level", weights.separation_level, n.separation),
        ("speed", weights.speed, n.speed),
        ("busyness (street class)", weights.busyness, n.busyness),
    ] {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{:.2}", raw)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}%", share * 100.0))
                .set_alignment(CellAlignment::Right)
                .fg(Color::Cyan),
        ]);
    }
    println!("\n{}", table);
}

fn print_dimension(name: &str, dim: &ScoringDimension) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new(name).add_attribute(Attribute::Bold),
        Cell::new("Score"),
        Cell::new("Label"),
    ]);
    for (key, entry) in &dim.categories {
        let is_default = dim.default_category.as_deref() == Some(key.as_str());
        let key_cell = if is_default {
            Cell::new(format!("{} (default)", key)).fg(Color::Green)
        } else {
            Cell::new(key)
        };
        table.add_row(vec![
            key_cell,
            Cell::new(format!("{:.1}", entry.score)).set_alignment(CellAlignment::Right),
            Cell::new(entry.display_label.as_deref().unwrap_or("")),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_model(model: &ScoringModel) {
    for (name, dim) in model.dimensions() {
        print_dimension(name, dim);
    }
}

pub fn print_issues(issues: &[String]) {
    if issues.is_empty() {
        println!("\n✅ No configuration issues found.");
        return;
    }
    let mut table = new_table();
    table.set_header(vec![Cell::new("Issue").fg(Color::Yellow)]);
    for issue in issues {
        table.add_row(vec![Cell::new(issue)]);
    }
    println!("\n⚠️  {} configuration issue(s):\n{}", issues.len(), table);
}

pub fn print_summary(summary: &ScoreSummary, counts: &DiagnosticCounts) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Features").add_attribute(Attribute::Bold),
        Cell::new("Mean").fg(Color::Cyan),
        Cell::new("Min"),
        Cell::new("Max"),
    ]);
    table.add_row(vec![
        Cell::new(summary.count),
        Cell::new(format!("{:.2}", summary.mean)).fg(Color::Cyan),
        Cell::new(format!("{:.2}", summary.min)),
        Cell::new(format!("{:.2}", summary.max)),
    ]);
    println!("\n{}", table);

    let mut dist = new_table();
    dist.set_header(vec![Cell::new("Composite"), Cell::new("Features")]);
    for ((label, _), n) in COMPOSITE_BANDS.iter().zip(summary.distribution) {
        dist.add_row(vec![
            Cell::new(label),
            Cell::new(n).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", dist);

    let mut diag = new_table();
    diag.set_header(vec![Cell::new("Diagnostic"), Cell::new("Events")]);
    for kind in EventKind::iter() {
        let n = counts.get(kind);
        let cell = Cell::new(n).set_alignment(CellAlignment::Right);
        diag.add_row(vec![
            Cell::new(kind.to_string()),
            if n > 0 { cell.fg(Color::Yellow) } else { cell },
        ]);
    }
    println!("{}", diag);
}
