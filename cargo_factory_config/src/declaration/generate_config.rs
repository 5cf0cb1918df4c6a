// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use super::types::Declaration;
use crate::{DeclarationBuilder, GenerateFromUniverse};
use cargo_factory_common::{TypeKind, UniverseSnapshot, simple_name};
use regex::Regex;
use std::collections::HashSet;

impl GenerateFromUniverse for Declaration {
    fn generate_from_universe(universe: &UniverseSnapshot, builder: &mut DeclarationBuilder) {
        let groups = universe
            .types()
            .filter(|shape| matches!(shape.kind, TypeKind::Interface | TypeKind::Abstract));

        for group in groups {
            let mut used_ids = HashSet::new();
            for implementor in universe.implementors_of(&group.identity) {
                let mut id = derive_id(implementor.simple_name(), group.simple_name());
                // Two implementors sharing a simple name would collide; fall back
                // to the fully qualified identity, which is unique.
                if !used_ids.insert(id.clone()) {
                    id = implementor.identity.clone();
                    used_ids.insert(id.clone());
                }
                builder.push(Declaration::new(
                    id,
                    group.identity.clone(),
                    implementor.identity.clone(),
                ));
            }
        }
    }
}

///
/// Derives a factory id from an implementation's name by stripping the
/// group's simple name when it is used as a suffix, e.g. `CalzonePizza`
/// in group `Pizza` becomes `Calzone`. Names without the suffix, or that
/// consist of only the suffix, are kept as they are.
///
pub fn derive_id(implementation: &str, group: &str) -> String {
    let implementation = simple_name(implementation);
    let group = simple_name(group);

    let pattern = format!("^(?P<stem>.+){}$", regex::escape(group));
    match Regex::new(&pattern) {
        Ok(regex) => regex
            .captures(implementation)
            .and_then(|captures| captures.name("stem"))
            .map(|stem| stem.as_str().to_string())
            .unwrap_or_else(|| implementation.to_string()),
        Err(_) => implementation.to_string(),
    }
}
