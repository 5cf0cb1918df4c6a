// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::emitter::{ArtifactLocation, ArtifactRenderer, FactoryEmitter};
use crate::error::{EmissionError, PassAborted};
use crate::registry::GroupRegistry;
use crate::validator::StructuralValidator;
use cargo_factory_common::TypeUniverse;
use cargo_factory_config::Declaration;
use tracing::{debug, info, warn};

/// A group whose artifact was produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedArtifact {
    pub group_identity: String,
    pub location: ArtifactLocation,
}

/// A group whose artifact could not be produced
#[derive(Debug)]
pub struct EmissionFailure {
    pub group_identity: String,
    pub error: EmissionError,
}

/// What happened to each group during emission, in registration order
#[derive(Debug, Default)]
pub struct EmissionReport {
    pub emitted: Vec<EmittedArtifact>,
    pub failed: Vec<EmissionFailure>,
}

impl EmissionReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// How a pass ended
#[derive(Debug)]
pub enum PassOutcome {
    /// Every declaration registered; artifacts were attempted for every group
    Done(EmissionReport),
    /// A declaration was refused; nothing was emitted
    Aborted(PassAborted),
}

impl PassOutcome {
    /// Done, and every artifact was produced
    pub fn is_clean(&self) -> bool {
        match self {
            PassOutcome::Done(report) => report.is_clean(),
            PassOutcome::Aborted(_) => false,
        }
    }
}

///
/// Runs a processing pass: validate every declaration, group the valid
/// ones, then emit one artifact per group.
///
/// Any rejected declaration or id conflict aborts the whole pass before
/// a single artifact is written. Emission failures on the other hand
/// only cost the group they happened in.
///
/// Each call to [`ProcessingDriver::register`] or [`ProcessingDriver::run`]
/// starts from an empty registry.
///
pub struct ProcessingDriver<'u> {
    validator: StructuralValidator<'u>,
}

impl<'u> ProcessingDriver<'u> {
    pub fn new(universe: &'u dyn TypeUniverse) -> Self {
        Self {
            validator: StructuralValidator::new(universe),
        }
    }

    /// Validates and groups `declarations`, stopping at the first defect
    pub fn register(
        &self,
        declarations: &[Declaration],
        sink: &mut dyn DiagnosticSink,
    ) -> Result<GroupRegistry, PassAborted> {
        let mut registry = GroupRegistry::new();

        for declaration in declarations {
            debug!(
                id = %declaration.id,
                group = %declaration.group,
                implementation = %declaration.implementation,
                "validating factory candidate"
            );

            let added = self
                .validator
                .validate(declaration)
                .map_err(|rejection| PassAborted::Rejected {
                    implementation: declaration.implementation.clone(),
                    rejection,
                })
                .and_then(|descriptor| registry.add(descriptor).map_err(PassAborted::Conflict));

            if let Err(aborted) = added {
                warn!(implementation = aborted.subject(), "aborting pass: {aborted}");
                sink.report(Diagnostic::error(aborted.to_string(), aborted.subject()));
                return Err(aborted);
            }
        }

        Ok(registry)
    }

    /// Emits one artifact per group. A failing group does not stop the others.
    pub fn emit(
        &self,
        registry: &GroupRegistry,
        renderer: &mut dyn ArtifactRenderer,
        sink: &mut dyn DiagnosticSink,
    ) -> EmissionReport {
        let mut report = EmissionReport::default();

        for group in registry.groups() {
            let group_identity = group.group_identity().to_string();

            match FactoryEmitter::emit(group, renderer) {
                Ok(location) => {
                    info!(group = %group_identity, members = group.len(), ?location, "emitted factory");
                    let message = match &location {
                        ArtifactLocation::File(path) => {
                            format!("generated factory for {group_identity} at {}", path.display())
                        }
                        ArtifactLocation::InProcess => format!("built factory for {group_identity}"),
                    };
                    sink.report(Diagnostic::note(message, group_identity.clone()));
                    report.emitted.push(EmittedArtifact {
                        group_identity,
                        location,
                    });
                }
                Err(error) => {
                    warn!(group = %group_identity, "failed to emit factory: {error}");
                    sink.report(Diagnostic::error(
                        format!("{group_identity}: {error}"),
                        group_identity.clone(),
                    ));
                    report.failed.push(EmissionFailure {
                        group_identity,
                        error,
                    });
                }
            }
        }

        report
    }

    /// A whole pass over `declarations`
    pub fn run(
        &self,
        declarations: &[Declaration],
        renderer: &mut dyn ArtifactRenderer,
        sink: &mut dyn DiagnosticSink,
    ) -> PassOutcome {
        match self.register(declarations, sink) {
            Ok(registry) => PassOutcome::Done(self.emit(&registry, renderer, sink)),
            Err(aborted) => PassOutcome::Aborted(aborted),
        }
    }
}
