use std::collections::BTreeMap;
use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(dir: &Path, luck: i32, count: usize, seed: u64, reserved_prefix: &str) -> Result<(), String> {
    let (mut engine, _) = super::load_engine(dir, seed, reserved_prefix)?;

    let mut observed = BTreeMap::new();
    for _ in 0..count {
        let def = engine.select_random(luck).map_err(|e| e.to_string())?;
        *observed.entry(def.id.clone()).or_insert(0usize) += 1;
    }

    println!(
        "  {} {}",
        "Draws".bold(),
        format!("({count} draws, luck={luck}, seed={seed})").dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Outcome", "Luck", "Chance", "Expected", "Observed"]);

    let weights = engine.registry().selection_weights(luck);
    let snapshot = engine.registry().snapshot();
    for (def, (_, share)) in snapshot.random().zip(&weights) {
        let hits = observed.get(&def.id).copied().unwrap_or(0);
        let actual = if count == 0 {
            0.0
        } else {
            hits as f64 / count as f64
        };
        table.add_row(vec![
            def.id.to_string(),
            def.luck().to_string(),
            def.chance().to_string(),
            format!("{:.1}%", share * 100.0),
            format!("{:.1}% ({hits})", actual * 100.0),
        ]);
    }

    println!("{table}");
    Ok(())
}
