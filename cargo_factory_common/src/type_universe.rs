// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What sort of type a shape describes
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// A complete type that can be instantiated
    Concrete,
    /// A base type with missing pieces; it can be inherited from but not instantiated
    Abstract,
    /// A pure capability contract (a trait, or an interface)
    Interface,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    /// Anything short of public: crate, module or private visibility
    Restricted,
}

/// A constructor exposed by a type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ConstructorShape {
    /// Number of arguments the constructor takes
    pub arity: usize,
    #[serde(default)]
    pub visibility: Visibility,
}

impl ConstructorShape {
    /// A public constructor taking no arguments
    pub fn no_arg() -> Self {
        Self {
            arity: 0,
            visibility: Visibility::Public,
        }
    }

    pub fn is_public_no_arg(&self) -> bool {
        self.arity == 0 && self.visibility == Visibility::Public
    }
}

/// The structural description of a single type, as far as factory
/// validation cares about it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TypeShape {
    /// Fully qualified identity of the type
    pub identity: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub visibility: Visibility,
    /// The direct base type. `None` means the type hangs directly
    /// off the universal root.
    #[serde(default)]
    pub supertype: Option<String>,
    /// Capability contracts this type realizes directly
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub constructors: Vec<ConstructorShape>,
}

impl TypeShape {
    /// A public concrete type with a public no-arg constructor
    pub fn concrete(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            kind: TypeKind::Concrete,
            visibility: Visibility::Public,
            supertype: None,
            interfaces: Vec::new(),
            constructors: vec![ConstructorShape::no_arg()],
        }
    }

    /// A public abstract base type
    pub fn abstract_base(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            kind: TypeKind::Abstract,
            visibility: Visibility::Public,
            supertype: None,
            interfaces: Vec::new(),
            constructors: Vec::new(),
        }
    }

    /// A public interface
    pub fn interface(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            kind: TypeKind::Interface,
            visibility: Visibility::Public,
            supertype: None,
            interfaces: Vec::new(),
            constructors: Vec::new(),
        }
    }

    pub fn extending(mut self, supertype: impl Into<String>) -> Self {
        self.supertype = Some(supertype.into());
        self
    }

    pub fn implementing(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_constructors(mut self, constructors: Vec<ConstructorShape>) -> Self {
        self.constructors = constructors;
        self
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn has_public_no_arg_constructor(&self) -> bool {
        self.constructors.iter().any(ConstructorShape::is_public_no_arg)
    }

    /// The last segment of the identity, accepting both `::` and `.` separators
    pub fn simple_name(&self) -> &str {
        simple_name(&self.identity)
    }
}

/// Returns the last path segment of a qualified identity
pub fn simple_name(identity: &str) -> &str {
    identity
        .rsplit(|c| c == ':' || c == '.')
        .next()
        .unwrap_or(identity)
}

///
/// The queries the factory validator needs to make against the
/// surrounding set of types. Keeping this behind a trait means the
/// validator can run equally over a loaded snapshot or a synthetic
/// graph built in a test.
///
pub trait TypeUniverse {
    /// Looks up the shape of a type by its qualified identity
    fn shape(&self, identity: &str) -> Option<&TypeShape>;

    ///
    /// Walks the inheritance chain of `identity` upward, starting at its
    /// direct supertype and stopping at the universal root. The walk stops
    /// early if a supertype cannot be resolved or the chain loops back on
    /// itself.
    ///
    fn ancestors(&self, identity: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        seen.insert(identity.to_string());

        let mut current = self.shape(identity).and_then(|s| s.supertype.clone());
        while let Some(next) = current {
            if !seen.insert(next.clone()) {
                break;
            }
            current = self.shape(&next).and_then(|s| s.supertype.clone());
            chain.push(next);
        }
        chain
    }

    ///
    /// Returns true if `candidate` conforms to `group`, either by having it
    /// somewhere in its inheritance chain or by realizing it as a capability
    /// contract (directly, through an ancestor, or through an inherited
    /// interface).
    ///
    fn is_subtype_of(&self, candidate: &str, group: &str) -> bool {
        let mut pending = vec![candidate.to_string()];
        let mut seen = HashSet::new();

        while let Some(identity) = pending.pop() {
            if !seen.insert(identity.clone()) {
                continue;
            }
            let Some(shape) = self.shape(&identity) else {
                continue;
            };
            if let Some(supertype) = &shape.supertype {
                if supertype == group {
                    return true;
                }
                pending.push(supertype.clone());
            }
            for interface in &shape.interfaces {
                if interface == group {
                    return true;
                }
                pending.push(interface.clone());
            }
        }
        false
    }
}
