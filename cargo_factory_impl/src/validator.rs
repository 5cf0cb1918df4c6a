// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::descriptor::ImplementationDescriptor;
use crate::error::{NotInstantiable, Rejection};
use cargo_factory_common::{TypeKind, TypeShape, TypeUniverse, Visibility};
use cargo_factory_config::Declaration;

///
/// Checks declarations against the structural rules a factory relies on.
/// The checks run in a fixed order and the first failure wins:
///
/// 1. the id is not empty
/// 2. the implementation exists in the universe
/// 3. the implementation is public and concrete
/// 4. the group exists in the universe
/// 5. an interface group is realized by the implementation
/// 6. a base-type group appears in the implementation's ancestry
/// 7. the implementation has a public no-arg constructor
///
/// Validation is pure; reporting is left to the caller.
///
pub struct StructuralValidator<'u> {
    universe: &'u dyn TypeUniverse,
}

impl<'u> StructuralValidator<'u> {
    pub fn new(universe: &'u dyn TypeUniverse) -> Self {
        Self { universe }
    }

    pub fn validate(&self, declaration: &Declaration) -> Result<ImplementationDescriptor, Rejection> {
        if declaration.id.trim().is_empty() {
            return Err(Rejection::EmptyId);
        }

        let implementation = self
            .universe
            .shape(&declaration.implementation)
            .ok_or(Rejection::UnresolvedImplementation)?;
        check_instantiable(implementation)?;

        let group = self
            .universe
            .shape(&declaration.group)
            .ok_or_else(|| Rejection::UnresolvedGroup {
                group: declaration.group.clone(),
            })?;

        if group.is_interface() {
            self.check_realizes(implementation, group)?;
        } else {
            self.check_inherits(implementation, group)?;
        }

        if !implementation.has_public_no_arg_constructor() {
            return Err(Rejection::MissingNoArgConstructor);
        }

        Ok(ImplementationDescriptor::new(
            declaration.id.clone(),
            declaration.implementation.clone(),
            declaration.group.clone(),
        ))
    }

    fn check_realizes(&self, implementation: &TypeShape, group: &TypeShape) -> Result<(), Rejection> {
        if self
            .universe
            .is_subtype_of(&implementation.identity, &group.identity)
        {
            Ok(())
        } else {
            Err(Rejection::MustImplementInterface {
                group: group.identity.clone(),
            })
        }
    }

    // Walk up from the implementation; running out of ancestors means
    // we reached the root without meeting the group
    fn check_inherits(&self, implementation: &TypeShape, group: &TypeShape) -> Result<(), Rejection> {
        let found = self
            .universe
            .ancestors(&implementation.identity)
            .iter()
            .any(|ancestor| *ancestor == group.identity);

        if found {
            Ok(())
        } else {
            Err(Rejection::DoesNotInheritGroup {
                group: group.identity.clone(),
            })
        }
    }
}

fn check_instantiable(shape: &TypeShape) -> Result<(), Rejection> {
    if shape.visibility != Visibility::Public {
        return Err(Rejection::NotPublicOrAbstract(NotInstantiable::NotPublic));
    }
    match shape.kind {
        TypeKind::Concrete => Ok(()),
        TypeKind::Abstract => Err(Rejection::NotPublicOrAbstract(NotInstantiable::Abstract)),
        TypeKind::Interface => Err(Rejection::NotPublicOrAbstract(NotInstantiable::Interface)),
    }
}
