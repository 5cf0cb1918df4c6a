// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

/// A declaration that has passed structural validation. Only the
/// validator creates these, so holding one means the id is non-empty
/// and the implementation conforms to its group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplementationDescriptor {
    id: String,
    qualified_identity: String,
    group_identity: String,
}

impl ImplementationDescriptor {
    pub(crate) fn new(
        id: impl Into<String>,
        qualified_identity: impl Into<String>,
        group_identity: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            qualified_identity: qualified_identity.into(),
            group_identity: group_identity.into(),
        }
    }

    /// The runtime key the factory selects on
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn qualified_identity(&self) -> &str {
        &self.qualified_identity
    }

    pub fn group_identity(&self) -> &str {
        &self.group_identity
    }
}
