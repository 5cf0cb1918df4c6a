// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

pub mod declaration_builder;
mod declaration;

pub use declaration::{Declaration, FactoryGroupExt, FactoryGroupBuilder, derive_id};
pub use declaration_builder::DeclarationBuilder;

use cargo_factory_common::UniverseSnapshot;

/// Types that can propose starter declarations from a discovered universe
pub trait GenerateFromUniverse {
    fn generate_from_universe(universe: &UniverseSnapshot, builder: &mut DeclarationBuilder);
}
