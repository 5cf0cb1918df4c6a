// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::descriptor::ImplementationDescriptor;
use std::path::PathBuf;
use thiserror::Error;

/// Why a type cannot be instantiated by a generated factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NotInstantiable {
    #[error("is not public")]
    NotPublic,
    #[error("is abstract")]
    Abstract,
    #[error("is an interface")]
    Interface,
}

/// A structural validation failure for a single declaration. The
/// message is the reason only; the implementation identity is added
/// by whoever reports it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the factory id is empty, that's not allowed")]
    EmptyId,

    #[error("the type could not be found in the type universe")]
    UnresolvedImplementation,

    #[error("the type {0} and cannot be constructed by a factory")]
    NotPublicOrAbstract(NotInstantiable),

    #[error("the factory group {group} could not be found in the type universe")]
    UnresolvedGroup { group: String },

    #[error("the type is declared for factory {group} but does not implement the interface {group}")]
    MustImplementInterface { group: String },

    #[error("the type is declared for factory {group} but does not inherit from {group}")]
    DoesNotInheritGroup { group: String },

    #[error("the type must provide a public constructor taking no arguments")]
    MissingNoArgConstructor,
}

/// Two implementations claimed the same id within one group. The
/// first one registered is kept; `rejected` is the latecomer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "conflict: {} is declared with id '{}' but {} already uses the same id in factory {}",
    .rejected.qualified_identity(),
    .existing.id(),
    .existing.qualified_identity(),
    .existing.group_identity()
)]
pub struct IdConflict {
    pub existing: ImplementationDescriptor,
    pub rejected: ImplementationDescriptor,
}

/// The first fatal defect of a pass. Nothing is emitted once one of these occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PassAborted {
    #[error("{implementation}: {rejection}")]
    Rejected {
        implementation: String,
        rejection: Rejection,
    },

    #[error("{}: {}", .0.rejected.qualified_identity(), .0)]
    Conflict(IdConflict),
}

impl PassAborted {
    /// The implementation the defect should be reported against
    pub fn subject(&self) -> &str {
        match self {
            PassAborted::Rejected { implementation, .. } => implementation,
            PassAborted::Conflict(conflict) => conflict.rejected.qualified_identity(),
        }
    }
}

/// A failure to produce one group's artifact. Sibling groups are unaffected.
#[derive(Debug, Error)]
pub enum EmissionError {
    #[error("failed writing factory for {group} to {}: {source}", .path.display())]
    Io {
        group: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{identity} is not a valid Rust path")]
    InvalidPath { identity: String },

    #[error("factory for {group} would overwrite the one for {existing} at {}", .path.display())]
    PathCollision {
        group: String,
        existing: String,
        path: PathBuf,
    },

    #[error("no constructor is bound for {implementation}")]
    Unbound { implementation: String },

    #[error("factory for {found} cannot be built from constructors bound for {expected}")]
    GroupMismatch { expected: String, found: String },
}

/// Returned by a factory's `create` for ids nobody registered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no implementation registered under id '{id}' in factory {group}")]
pub struct UnknownId {
    pub group: String,
    pub id: String,
}
