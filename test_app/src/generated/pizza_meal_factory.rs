// @generated by cargo-factory for `crate::pizza::Meal`.
// Do not edit by hand; run `cargo factory generate` instead.

/// Returned by [`PizzaMealFactory::create`] for ids with no registered implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownId(pub String);

impl std::fmt::Display for UnknownId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no Meal registered under id '{}'", self.0)
    }
}

impl std::error::Error for UnknownId {}

/// Builds `crate::pizza::Meal` implementations by id.
pub struct PizzaMealFactory;

impl PizzaMealFactory {
    /// Every id this factory knows, in declaration order.
    pub const IDS: &[&str] = &["Calzone", "Margherita"];

    /// Constructs a new instance of the implementation registered under `id`.
    pub fn create(id: &str) -> Result<Box<dyn crate::pizza::Meal>, UnknownId> {
        match id {
            "Calzone" => Ok(Box::new(crate::pizza::CalzonePizza::new())),
            "Margherita" => Ok(Box::new(crate::pizza::MargheritaPizza::new())),
            _ => Err(UnknownId(id.to_string())),
        }
    }
}
