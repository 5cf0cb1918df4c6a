// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! A small restaurant whose meals are built through a generated factory.
//! Regenerate the factory with `cargo factory` from this directory.

mod generated;
mod pizza;

use generated::pizza_meal_factory::{PizzaMealFactory, UnknownId};
use pizza::GarlicBread;

fn main() -> Result<(), UnknownId> {
    for id in PizzaMealFactory::IDS {
        let mut meal = PizzaMealFactory::create(id)?;
        meal.add_topping("basil");
        println!("{}: {} ({})", meal.name(), meal.price(), meal.toppings().join(", "));
    }

    println!("Garlic bread on the side: {}", GarlicBread::new().price());

    if let Err(e) = PizzaMealFactory::create("Hawaiian") {
        println!("{e}");
    }
    Ok(())
}
