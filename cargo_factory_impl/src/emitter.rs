// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::error::EmissionError;
use crate::registry::FactoryGroup;
use std::path::PathBuf;

/// One entry of a generated factory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMember {
    pub id: String,
    pub implementation_identity: String,
}

///
/// Everything a renderer needs to produce one group's factory. Whatever
/// the renderer turns this into must offer a single `create(id)`
/// operation that:
///
/// * for every member id, constructs a new instance of that member's
///   implementation through its no-arg constructor, typed as the group;
/// * for any other id, fails with an unknown-id error, never a default;
/// * caches nothing, so each call yields a fresh instance.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPlan {
    pub group_identity: String,
    /// Members in first-registration order
    pub members: Vec<ArtifactMember>,
}

impl ArtifactPlan {
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.id.as_str())
    }
}

/// Where a rendered artifact ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactLocation {
    File(PathBuf),
    InProcess,
}

/// Turns a group's plan into an actual factory
pub trait ArtifactRenderer {
    fn render(&mut self, plan: &ArtifactPlan) -> Result<ArtifactLocation, EmissionError>;
}

/// Produces exactly one artifact per group
pub struct FactoryEmitter;

impl FactoryEmitter {
    pub fn plan(group: &FactoryGroup) -> ArtifactPlan {
        ArtifactPlan {
            group_identity: group.group_identity().to_string(),
            members: group
                .members()
                .map(|member| ArtifactMember {
                    id: member.id().to_string(),
                    implementation_identity: member.qualified_identity().to_string(),
                })
                .collect(),
        }
    }

    pub fn emit(
        group: &FactoryGroup,
        renderer: &mut dyn ArtifactRenderer,
    ) -> Result<ArtifactLocation, EmissionError> {
        renderer.render(&Self::plan(group))
    }
}
