// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::emitter::{ArtifactLocation, ArtifactPlan, ArtifactRenderer};
use crate::error::{EmissionError, UnknownId};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// A no-arg constructor, already upcast to the group type
pub type Constructor<T> = Arc<dyn Fn() -> Box<T> + Send + Sync>;

///
/// Maps implementation identities to the Rust constructors that build
/// them, for one group type `T` (usually `dyn SomeTrait`).
///
pub struct ConstructorTable<T: ?Sized> {
    group_identity: String,
    constructors: HashMap<String, Constructor<T>>,
}

impl<T: ?Sized> ConstructorTable<T> {
    pub fn new(group_identity: impl Into<String>) -> Self {
        Self {
            group_identity: group_identity.into(),
            constructors: HashMap::new(),
        }
    }

    pub fn bind<F>(mut self, implementation: impl Into<String>, constructor: F) -> Self
    where
        F: Fn() -> Box<T> + Send + Sync + 'static,
    {
        self.constructors
            .insert(implementation.into(), Arc::new(constructor));
        self
    }

    pub fn group_identity(&self) -> &str {
        &self.group_identity
    }
}

///
/// An in-process factory artifact: the same contract a generated
/// source file offers, without a compile step in between.
///
pub struct Factory<T: ?Sized> {
    group_identity: String,
    constructors: IndexMap<String, Constructor<T>>,
}

impl<T: ?Sized> Factory<T> {
    /// Builds the factory described by `plan`, binding each member to its constructor
    pub fn from_plan(plan: &ArtifactPlan, table: &ConstructorTable<T>) -> Result<Self, EmissionError> {
        if plan.group_identity != table.group_identity {
            return Err(EmissionError::GroupMismatch {
                expected: table.group_identity.clone(),
                found: plan.group_identity.clone(),
            });
        }

        let mut constructors = IndexMap::new();
        for member in &plan.members {
            let constructor = table
                .constructors
                .get(&member.implementation_identity)
                .ok_or_else(|| EmissionError::Unbound {
                    implementation: member.implementation_identity.clone(),
                })?;
            constructors.insert(member.id.clone(), Arc::clone(constructor));
        }

        Ok(Self {
            group_identity: plan.group_identity.clone(),
            constructors,
        })
    }

    /// Constructs a new instance of whatever is registered under `id`
    pub fn create(&self, id: &str) -> Result<Box<T>, UnknownId> {
        match self.constructors.get(id) {
            Some(constructor) => Ok(constructor()),
            None => Err(UnknownId {
                group: self.group_identity.clone(),
                id: id.to_string(),
            }),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.constructors.contains_key(id)
    }

    /// Known ids in declaration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    pub fn group_identity(&self) -> &str {
        &self.group_identity
    }
}

/// Renders plans for one group into [`Factory`] values
pub struct BindingRenderer<'t, T: ?Sized> {
    table: &'t ConstructorTable<T>,
    factories: Vec<Factory<T>>,
}

impl<'t, T: ?Sized> BindingRenderer<'t, T> {
    pub fn new(table: &'t ConstructorTable<T>) -> Self {
        Self {
            table,
            factories: Vec::new(),
        }
    }

    /// Takes the factory built for the table's group, if one was rendered
    pub fn into_factory(self) -> Option<Factory<T>> {
        self.factories.into_iter().next()
    }
}

impl<T: ?Sized> ArtifactRenderer for BindingRenderer<'_, T> {
    fn render(&mut self, plan: &ArtifactPlan) -> Result<ArtifactLocation, EmissionError> {
        let factory = Factory::from_plan(plan, self.table)?;
        self.factories.push(factory);
        Ok(ArtifactLocation::InProcess)
    }
}
