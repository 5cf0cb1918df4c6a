// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use anyhow::{Context, Result, bail};
use cargo_factory_common::UniverseSnapshot;
use cargo_factory_common::workspace::{FACTORY_RON, find_workspace_factory_ron};
use cargo_factory_config::{Declaration, DeclarationBuilder};
use std::path::{Path, PathBuf};
use tracing::debug;

///
/// Works out which declaration files feed the pass. Explicit `--config`
/// paths win; otherwise we look for factory.ron in the cargo workspace
/// root, then in the current directory.
///
pub fn resolve_config_paths(explicit: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if !explicit.is_empty() {
        return Ok(explicit.to_vec());
    }

    if let Some(path) = find_workspace_factory_ron() {
        debug!(path = %path.display(), "using workspace declarations");
        return Ok(vec![path]);
    }

    let local = Path::new(FACTORY_RON);
    if local.exists() {
        return Ok(vec![local.to_path_buf()]);
    }

    bail!("Missing {FACTORY_RON} - nothing to do! Pass --config or run `cargo factory generate-config`")
}

/// Reads and concatenates every declaration file, in order
pub fn load_declarations(paths: &[PathBuf]) -> Result<Vec<Declaration>> {
    let builder = DeclarationBuilder::read_from_files(paths).context("Failed to read declarations")?;
    debug!(files = paths.len(), count = builder.declarations.len(), "loaded declarations");
    Ok(builder.declarations)
}

pub fn load_universe(path: &Path) -> Result<UniverseSnapshot> {
    let universe = UniverseSnapshot::load(path)
        .with_context(|| format!("Failed to load type universe from {}", path.display()))?;
    debug!(path = %path.display(), types = universe.len(), "loaded type universe");
    Ok(universe)
}
