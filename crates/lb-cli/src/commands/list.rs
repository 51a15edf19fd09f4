use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use lb_outcome::Partition;

pub fn run(dir: &Path, reserved_prefix: &str) -> Result<(), String> {
    let (engine, report) = super::load_engine(dir, 0, reserved_prefix)?;
    let snapshot = engine.registry().snapshot();

    if snapshot.total() == 0 {
        println!("  No outcomes found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Outcome", "Partition", "Type", "Luck", "Chance", "Delay"]);

    let rows = snapshot
        .random()
        .map(|def| (def, Partition::Random))
        .chain(snapshot.nonrandom().map(|def| (def, Partition::Nonrandom)));
    for (def, partition) in rows {
        let delay = def
            .delay
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        table.add_row(vec![
            def.id.to_string(),
            partition.to_string(),
            def.kind.to_string(),
            def.luck().to_string(),
            def.chance().to_string(),
            delay,
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} outcomes ({} random, {} nonrandom)",
        report.random + report.nonrandom,
        report.random,
        report.nonrandom
    );
    if !report.skipped.is_empty() {
        println!("  {}", format!("{} skipped", report.skipped.len()).yellow());
        for skipped in &report.skipped {
            println!("    {} {}", skipped.id, skipped.error.to_string().dimmed());
        }
    }

    Ok(())
}
