// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use ansi_term::Colour::{Blue, Green};
use cargo_factory_impl::GroupRegistry;

///
/// Renders every group and its members as a tree, groups and members in
/// registration order:
///
/// ```text
/// crate::pizza::Meal
///   ├─ Calzone -> crate::pizza::CalzonePizza
///   └─ Margherita -> crate::pizza::MargheritaPizza
/// ```
///
pub fn format_groups(registry: &GroupRegistry) -> String {
    let mut output = String::new();

    for group in registry.groups() {
        output.push_str(&format!("{}\n", Blue.bold().paint(group.group_identity())));

        let last = group.len().saturating_sub(1);
        for (index, member) in group.members().enumerate() {
            let branch = if index == last { "└─" } else { "├─" };
            output.push_str(&format!(
                "  {} {} -> {}\n",
                branch,
                Green.paint(member.id()),
                member.qualified_identity()
            ));
        }
    }

    output
}
