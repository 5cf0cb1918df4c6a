// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use cargo_metadata::MetadataCommand;
use std::path::PathBuf;

pub const FACTORY_RON: &str = "factory.ron";

/// Find factory.ron in workspace root using cargo metadata
pub fn find_workspace_factory_ron() -> Option<PathBuf> {
    let metadata = MetadataCommand::new().no_deps().exec().ok()?;
    let factory_ron = metadata.workspace_root.join(FACTORY_RON);
    if factory_ron.exists() {
        Some(factory_ron.into_std_path_buf())
    } else {
        None
    }
}
