// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

mod binding;
mod rust_source;

pub use binding::{BindingRenderer, Constructor, ConstructorTable, Factory};
pub use rust_source::RustSourceRenderer;
