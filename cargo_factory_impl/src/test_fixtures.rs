// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! A small restaurant, shared by the unit tests.

use crate::emitter::ArtifactRenderer;
use crate::{ArtifactLocation, ArtifactPlan, ConstructorTable, EmissionError};
use cargo_factory_common::{ConstructorShape, TypeShape, UniverseSnapshot, Visibility};
use cargo_factory_config::{Declaration, DeclarationBuilder, FactoryGroupExt};

pub trait Meal {
    fn name(&self) -> &str;
    fn price(&self) -> u32;
    fn add_topping(&mut self, topping: &str);
    fn toppings(&self) -> &[String];
}

#[derive(Default)]
pub struct CalzonePizza {
    toppings: Vec<String>,
}

impl CalzonePizza {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Meal for CalzonePizza {
    fn name(&self) -> &str {
        "Calzone"
    }

    fn price(&self) -> u32 {
        10
    }

    fn add_topping(&mut self, topping: &str) {
        self.toppings.push(topping.to_string());
    }

    fn toppings(&self) -> &[String] {
        &self.toppings
    }
}

#[derive(Default)]
pub struct MargheritaPizza {
    toppings: Vec<String>,
}

impl MargheritaPizza {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Meal for MargheritaPizza {
    fn name(&self) -> &str {
        "Margherita"
    }

    fn price(&self) -> u32 {
        99
    }

    fn add_topping(&mut self, topping: &str) {
        self.toppings.push(topping.to_string());
    }

    fn toppings(&self) -> &[String] {
        &self.toppings
    }
}

pub fn pizza_universe() -> UniverseSnapshot {
    UniverseSnapshot::with_types(
        "pizza",
        vec![
            TypeShape::interface("pizza::Meal"),
            TypeShape::concrete("pizza::CalzonePizza").implementing("pizza::Meal"),
            TypeShape::concrete("pizza::MargheritaPizza").implementing("pizza::Meal"),
            TypeShape::abstract_base("pizza::Pizza").implementing("pizza::Meal"),
            TypeShape::concrete("pizza::StuffedCrustPizza").extending("pizza::Pizza"),
            TypeShape::concrete("pizza::StaffPizza")
                .implementing("pizza::Meal")
                .with_visibility(Visibility::Restricted),
            TypeShape::concrete("pizza::GarlicBread"),
            TypeShape::concrete("pizza::CustomPizza")
                .implementing("pizza::Meal")
                .with_constructors(vec![ConstructorShape {
                    arity: 1,
                    visibility: Visibility::Public,
                }]),
        ],
    )
}

/// The two pizzas from the menu, in menu order
pub fn menu_declarations() -> Vec<Declaration> {
    let mut builder = DeclarationBuilder::new();
    builder
        .factory_group("pizza::Meal")
        .register("Calzone", "pizza::CalzonePizza")
        .register("Margherita", "pizza::MargheritaPizza")
        .build();
    builder.declarations
}

pub fn meal_constructors() -> ConstructorTable<dyn Meal> {
    ConstructorTable::<dyn Meal>::new("pizza::Meal")
        .bind("pizza::CalzonePizza", || Box::new(CalzonePizza::new()))
        .bind("pizza::MargheritaPizza", || Box::new(MargheritaPizza::new()))
}

/// Remembers every plan it is handed, and optionally fails for one group
#[derive(Default)]
pub struct RecordingRenderer {
    pub plans: Vec<ArtifactPlan>,
    pub fail_group: Option<String>,
}

impl ArtifactRenderer for RecordingRenderer {
    fn render(&mut self, plan: &ArtifactPlan) -> Result<ArtifactLocation, EmissionError> {
        if self.fail_group.as_deref() == Some(plan.group_identity.as_str()) {
            return Err(EmissionError::InvalidPath {
                identity: plan.group_identity.clone(),
            });
        }
        self.plans.push(plan.clone());
        Ok(ArtifactLocation::InProcess)
    }
}
