pub mod draw;
pub mod list;
pub mod resolve;
pub mod run;

use std::path::{Path, PathBuf};

use lb_core::{Actor, BlockPos, Context, Identifier, Vec3};
use lb_outcome::{EngineConfig, LoadReport, OutcomeEngine, RegistryConfig};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

/// Load every `data/<namespace>/outcomes/**/*.json` document under `dir`.
///
/// Files that cannot be read or parsed are logged and skipped. Documents come
/// back sorted by path.
fn load_pack(dir: &Path) -> Result<Vec<(Identifier, Value)>, String> {
    let data = dir.join("data");
    if !data.is_dir() {
        return Err(format!("no data directory in {}", dir.display()));
    }

    let mut documents = Vec::new();
    for namespace_dir in sorted_entries(&data)? {
        let outcomes = namespace_dir.join("outcomes");
        if !outcomes.is_dir() {
            continue;
        }
        let Some(namespace) = namespace_dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let mut files = Vec::new();
        collect_json(&outcomes, &mut files)?;
        for file in files {
            let Some(path) = outcome_path(&outcomes, &file) else {
                continue;
            };
            let id = match Identifier::new(namespace, path) {
                Ok(id) => id,
                Err(e) => {
                    warn!(file = %file.display(), error = %e, "skipping outcome file");
                    continue;
                }
            };
            let parsed = std::fs::read_to_string(&file)
                .map_err(|e| e.to_string())
                .and_then(|text| serde_json::from_str::<Value>(&text).map_err(|e| e.to_string()));
            match parsed {
                Ok(value) => documents.push((id, value)),
                Err(e) => warn!(file = %file.display(), error = %e, "skipping outcome file"),
            }
        }
    }
    Ok(documents)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries =
        std::fs::read_dir(dir).map_err(|e| format!("cannot read {}: {e}", dir.display()))?;
    let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
    paths.sort();
    Ok(paths)
}

fn collect_json(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), String> {
    for path in sorted_entries(dir)? {
        if path.is_dir() {
            collect_json(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            out.push(path);
        }
    }
    Ok(())
}

/// `outcomes/nonrandom/fanfare.json` becomes `nonrandom/fanfare`.
fn outcome_path(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?.with_extension("");
    let parts: Option<Vec<&str>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
    Some(parts?.join("/"))
}

/// Build an engine loaded with the pack in `dir`.
fn load_engine(dir: &Path, seed: u64, reserved_prefix: &str) -> Result<(OutcomeEngine, LoadReport), String> {
    let documents = load_pack(dir)?;
    let config = EngineConfig::default()
        .with_seed(seed)
        .with_registry(RegistryConfig::default().with_reserved_prefix(reserved_prefix));
    let mut engine = OutcomeEngine::new(config);
    let report = engine.load_definitions(documents);
    Ok((engine, report))
}

/// Parse an `x,y,z` flag into the block containing it.
fn parse_block_pos(s: &str) -> Result<BlockPos, String> {
    Vec3::parse(s)
        .map(BlockPos::from_vec)
        .map_err(|e| e.to_string())
}

/// A context at `pos` with an optional player standing at `player_pos`, or
/// at the block centre.
fn build_context(
    pos: &str,
    player: Option<&str>,
    player_pos: Option<&str>,
    seed: u64,
) -> Result<Context, String> {
    let block = parse_block_pos(pos)?;
    let mut ctx = Context::new(block, seed);
    if let Some(name) = player {
        let at = match player_pos {
            Some(p) => Vec3::parse(p).map_err(|e| e.to_string())?,
            None => block.center(),
        };
        ctx = ctx.with_actor(Actor::new(name, Uuid::new_v4(), at));
    }
    Ok(ctx)
}
