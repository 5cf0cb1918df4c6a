// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

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

/// On the menu, but not a meal; it can't be served by the meal factory
pub struct GarlicBread;

impl GarlicBread {
    pub fn new() -> Self {
        GarlicBread
    }

    pub fn price(&self) -> u32 {
        4
    }
}
