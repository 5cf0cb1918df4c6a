// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::type_universe::{TypeKind, TypeShape, TypeUniverse, Visibility};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const FACTORY_DIR: &str = ".factory";
pub const UNIVERSE_FILE_SUFFIX: &str = "_universe.json";

/// On-disk layout of a snapshot
#[derive(Serialize, Deserialize)]
struct SnapshotFile {
    crate_name: String,
    types: Vec<TypeShape>,
}

/// A serializable set of type shapes, discovered for one or more crates.
/// This is the universe the validator runs against from the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "SnapshotFile", into = "SnapshotFile")]
pub struct UniverseSnapshot {
    /// The crate the shapes were discovered in
    pub crate_name: String,
    types: IndexMap<String, TypeShape>,
}

impl From<SnapshotFile> for UniverseSnapshot {
    fn from(file: SnapshotFile) -> Self {
        let mut snapshot = UniverseSnapshot::new();
        snapshot.crate_name = file.crate_name;
        snapshot.extend(file.types);
        snapshot
    }
}

impl From<UniverseSnapshot> for SnapshotFile {
    fn from(snapshot: UniverseSnapshot) -> Self {
        SnapshotFile {
            crate_name: snapshot.crate_name,
            types: snapshot.types.into_values().collect(),
        }
    }
}

impl Default for UniverseSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl UniverseSnapshot {
    pub fn new() -> Self {
        Self {
            crate_name: String::new(),
            types: IndexMap::new(),
        }
    }

    /// Creates a snapshot for `crate_name` holding `types`
    pub fn with_types(crate_name: impl Into<String>, types: Vec<TypeShape>) -> Self {
        let mut snapshot = Self::new();
        snapshot.crate_name = crate_name.into();
        snapshot.extend(types);
        snapshot
    }

    /// Adds a shape. A later shape with the same identity replaces the earlier one.
    pub fn insert(&mut self, shape: TypeShape) {
        self.types.insert(shape.identity.clone(), shape);
    }

    pub fn extend(&mut self, shapes: impl IntoIterator<Item = TypeShape>) {
        for shape in shapes {
            self.insert(shape);
        }
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeShape> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    ///
    /// Public concrete types that conform to `group`, in discovery order.
    /// These are the types a factory for `group` could construct.
    ///
    pub fn implementors_of(&self, group: &str) -> Vec<&TypeShape> {
        self.types
            .values()
            .filter(|shape| shape.kind == TypeKind::Concrete)
            .filter(|shape| shape.visibility == Visibility::Public)
            .filter(|shape| self.is_subtype_of(&shape.identity, group))
            .collect()
    }

    /// Load a single snapshot file
    pub fn load_from_file(path: &Path) -> Result<UniverseSnapshot> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read file: {}", path.display()))?;

        serde_json::from_str(&content)
            .context(format!("Failed to parse JSON from: {}", path.display()))
    }

    /// Load either a single snapshot file, or every snapshot in a directory
    pub fn load(path: &Path) -> Result<UniverseSnapshot> {
        if path.is_dir() {
            let (snapshot, _) = Self::load_all_from_dir(path)?;
            Ok(snapshot)
        } else {
            Self::load_from_file(path)
        }
    }

    /// Load all snapshots from a directory and return the merged result
    /// along with a list of all crate names that were found
    pub fn load_all_from_dir(dir_path: &Path) -> Result<(UniverseSnapshot, Vec<String>)> {
        if !dir_path.exists() {
            return Err(anyhow::anyhow!("Directory not found: {}", dir_path.display()));
        }

        let mut aggregated = UniverseSnapshot::new();
        let mut crate_names = Vec::new();

        let mut paths: Vec<PathBuf> = fs::read_dir(dir_path)
            .context(format!("Failed to read directory: {}", dir_path.display()))?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|f| f.to_str())
                    .is_some_and(|f| f.ends_with(UNIVERSE_FILE_SUFFIX))
            })
            .collect();

        // Directory order is platform dependent; sort so merges are reproducible
        paths.sort();

        if paths.is_empty() {
            return Err(anyhow::anyhow!(
                "No universe snapshot files found in {}",
                dir_path.display()
            ));
        }

        for path in paths {
            let snapshot = Self::load_from_file(&path)?;
            if !crate_names.contains(&snapshot.crate_name) {
                crate_names.push(snapshot.crate_name.clone());
            }
            aggregated.merge(snapshot);
        }

        Ok((aggregated, crate_names))
    }

    fn merge(&mut self, other: UniverseSnapshot) {
        if self.crate_name.is_empty() {
            self.crate_name = other.crate_name;
        }
        self.types.extend(other.types);
    }
}

impl TypeUniverse for UniverseSnapshot {
    fn shape(&self, identity: &str) -> Option<&TypeShape> {
        self.types.get(identity)
    }
}
