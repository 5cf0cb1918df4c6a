// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::descriptor::ImplementationDescriptor;
use crate::error::IdConflict;
use indexmap::IndexMap;
use indexmap::map::Entry;

///
/// The implementations sharing one group, keyed by id. Members keep
/// the order they were first registered in, which is the order they
/// appear in the generated factory.
///
#[derive(Debug, Clone)]
pub struct FactoryGroup {
    group_identity: String,
    members_by_id: IndexMap<String, ImplementationDescriptor>,
}

impl FactoryGroup {
    fn new(group_identity: impl Into<String>) -> Self {
        Self {
            group_identity: group_identity.into(),
            members_by_id: IndexMap::new(),
        }
    }

    pub fn group_identity(&self) -> &str {
        &self.group_identity
    }

    pub fn members(&self) -> impl Iterator<Item = &ImplementationDescriptor> {
        self.members_by_id.values()
    }

    pub fn get(&self, id: &str) -> Option<&ImplementationDescriptor> {
        self.members_by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.members_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members_by_id.is_empty()
    }

    // The first registration of an id wins; later ones are refused, never overwritten
    fn add(&mut self, descriptor: ImplementationDescriptor) -> Result<(), IdConflict> {
        debug_assert_eq!(descriptor.group_identity(), self.group_identity);

        match self.members_by_id.entry(descriptor.id().to_string()) {
            Entry::Occupied(existing) => Err(IdConflict {
                existing: existing.get().clone(),
                rejected: descriptor,
            }),
            Entry::Vacant(slot) => {
                slot.insert(descriptor);
                Ok(())
            }
        }
    }
}

///
/// Every group seen during one processing pass. A registry is owned by
/// the pass that fills it and is never shared between passes.
///
#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    groups_by_identity: IndexMap<String, FactoryGroup>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a validated implementation, creating its group on first sight
    pub fn add(&mut self, descriptor: ImplementationDescriptor) -> Result<(), IdConflict> {
        self.groups_by_identity
            .entry(descriptor.group_identity().to_string())
            .or_insert_with_key(|identity| FactoryGroup::new(identity.clone()))
            .add(descriptor)
    }

    /// Groups in the order they were first registered
    pub fn groups(&self) -> impl Iterator<Item = &FactoryGroup> {
        self.groups_by_identity.values()
    }

    pub fn group(&self, group_identity: &str) -> Option<&FactoryGroup> {
        self.groups_by_identity.get(group_identity)
    }

    pub fn len(&self) -> usize {
        self.groups_by_identity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups_by_identity.is_empty()
    }

    pub fn into_groups(self) -> Vec<FactoryGroup> {
        self.groups_by_identity.into_values().collect()
    }
}
