pub mod pizza_meal_factory;
