mod types;
mod builder;
mod generate_config;

pub use types::Declaration;
pub use builder::{FactoryGroupExt, FactoryGroupBuilder};
pub use generate_config::derive_id;
