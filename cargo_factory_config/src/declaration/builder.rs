// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use super::types::Declaration;
use crate::declaration_builder::DeclarationBuilder;

/// Extension trait that adds grouped declarations to DeclarationBuilder
pub trait FactoryGroupExt {
    /// Start declaring implementations for the factory of `group`
    fn factory_group(&mut self, group: impl Into<String>) -> FactoryGroupBuilder<'_>;
}

impl FactoryGroupExt for DeclarationBuilder {
    fn factory_group(&mut self, group: impl Into<String>) -> FactoryGroupBuilder<'_> {
        FactoryGroupBuilder {
            parent: self,
            group: group.into(),
            declarations: Vec::new(),
        }
    }
}

/// Builder collecting the implementations of one group
pub struct FactoryGroupBuilder<'a> {
    parent: &'a mut DeclarationBuilder,
    group: String,
    declarations: Vec<Declaration>,
}

impl<'a> FactoryGroupBuilder<'a> {
    /// Register `implementation` under `id`
    ///
    /// # Example
    /// ```
    /// use cargo_factory_config::{DeclarationBuilder, FactoryGroupExt};
    /// let mut builder = DeclarationBuilder::new();
    /// builder.factory_group("pizza::Meal")
    ///     .register("Calzone", "pizza::CalzonePizza")
    ///     .register("Margherita", "pizza::MargheritaPizza")
    ///     .build();
    /// assert_eq!(builder.declarations.len(), 2);
    /// ```
    pub fn register(mut self, id: impl Into<String>, implementation: impl Into<String>) -> Self {
        self.declarations
            .push(Declaration::new(id, self.group.clone(), implementation));
        self
    }

    /// Finalize the group and return to the parent builder
    pub fn build(self) -> &'a mut DeclarationBuilder {
        for declaration in self.declarations {
            self.parent.push(declaration);
        }
        self.parent
    }
}
