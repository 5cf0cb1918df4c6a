// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use serde::{Deserialize, Serialize};

/// A single factory declaration: "construct `implementation` when asked
/// for `id` from the factory of `group`". This is the raw, unvalidated
/// form; nothing here has been checked against the type universe yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// The runtime key the factory selects on
    pub id: String,
    /// Qualified identity of the shared base type or interface
    pub group: String,
    /// Qualified identity of the implementing type
    pub implementation: String,
}

impl Declaration {
    pub fn new(
        id: impl Into<String>,
        group: impl Into<String>,
        implementation: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            group: group.into(),
            implementation: implementation.into(),
        }
    }
}
