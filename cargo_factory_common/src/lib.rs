// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

pub mod type_universe;
pub mod universe_snapshot;
pub mod workspace;

pub use type_universe::{ConstructorShape, TypeKind, TypeShape, TypeUniverse, Visibility, simple_name};
pub use universe_snapshot::UniverseSnapshot;
