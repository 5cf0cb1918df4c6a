// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

mod descriptor;
mod diagnostics;
mod driver;
mod emitter;
mod error;
mod registry;
pub mod renderers;
mod validator;

#[cfg(test)]
mod test_fixtures;

// Re-export our public API
pub use descriptor::ImplementationDescriptor;
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, Severity};
pub use driver::{EmissionFailure, EmissionReport, EmittedArtifact, PassOutcome, ProcessingDriver};
pub use emitter::{ArtifactLocation, ArtifactMember, ArtifactPlan, ArtifactRenderer, FactoryEmitter};
pub use error::{EmissionError, IdConflict, NotInstantiable, PassAborted, Rejection, UnknownId};
pub use registry::{FactoryGroup, GroupRegistry};
pub use renderers::{BindingRenderer, ConstructorTable, Factory, RustSourceRenderer};
pub use validator::StructuralValidator;
