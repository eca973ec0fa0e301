//! This module defines the declaration surface that the type system
//! consumes from the AST.
//!
//! The type provider never inspects declaration bodies. Nominal types
//! (contracts, structs, enums, modifiers, modules) are keyed on the stable
//! [`DeclarationId`] of their declaration, never on structural unrolling,
//! which is what lets recursive user-defined types terminate: a struct that
//! contains a mapping of itself refers to itself by identity, not by
//! expansion.

use std::{
    fmt::{Display, Formatter},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use crate::ty::{
    function::{StateMutability, Visibility},
    Type,
};

/// A source of new, unique, declaration identities.
///
/// It is guaranteed that no matter how many times you clone the source,
/// they all use the same underlying pool and hence cannot issue duplicate
/// identities.
///
/// # Identity Pools
///
/// Care must be taken not to mix identities from independent pools, as
/// these _could_ produce duplicates and hence conflate unrelated
/// declarations in the provider's caches.
#[derive(Clone, Debug)]
pub struct DeclarationIdSource {
    last_id: Arc<AtomicUsize>,
}

impl DeclarationIdSource {
    /// Creates a new source of unique declaration identities.
    #[must_use]
    pub fn new() -> Self {
        let last_id = Arc::new(AtomicUsize::from(0));
        Self { last_id }
    }

    /// Requests a new unique declaration identity from the source.
    #[must_use]
    pub fn fresh(&mut self) -> DeclarationId {
        let id = self.last_id.fetch_add(1, Ordering::Relaxed);
        DeclarationId { id }
    }

    /// Gets the number of identities that have been issued by this source.
    #[must_use]
    pub fn issued_count(&self) -> usize {
        self.last_id.load(Ordering::Relaxed)
    }
}

impl Default for DeclarationIdSource {
    fn default() -> Self {
        Self::new()
    }
}

/// The stable identity of a declaration, used by the provider as the
/// canonical key for nominal types.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DeclarationId {
    id: usize,
}

impl Display for DeclarationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "D[{}]", &self.id)
    }
}

/// A single typed parameter or return value of a function, event, or
/// modifier.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Parameter {
    /// The declared name of the parameter; empty when the source omits it.
    pub name: String,

    /// The declared type of the parameter.
    pub ty: Type,
}

impl Parameter {
    /// Constructs a named parameter of type `ty`.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        let name = name.into();
        Self { name, ty }
    }

    /// Constructs an unnamed parameter of type `ty`.
    #[must_use]
    pub fn unnamed(ty: Type) -> Self {
        Self::new("", ty)
    }
}

/// A contract declaration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractDefinition {
    id:   DeclarationId,
    name: String,
}

impl ContractDefinition {
    /// Constructs a new contract declaration named `name`.
    #[must_use]
    pub fn new(ids: &mut DeclarationIdSource, name: impl Into<String>) -> Self {
        let id = ids.fresh();
        let name = name.into();
        Self { id, name }
    }

    /// Gets the stable identity of this declaration.
    #[must_use]
    pub fn id(&self) -> DeclarationId {
        self.id
    }

    /// Gets the declared name of the contract.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A struct declaration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StructDefinition {
    id:   DeclarationId,
    name: String,
}

impl StructDefinition {
    /// Constructs a new struct declaration named `name`.
    #[must_use]
    pub fn new(ids: &mut DeclarationIdSource, name: impl Into<String>) -> Self {
        let id = ids.fresh();
        let name = name.into();
        Self { id, name }
    }

    /// Gets the stable identity of this declaration.
    #[must_use]
    pub fn id(&self) -> DeclarationId {
        self.id
    }

    /// Gets the declared name of the struct.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An enum declaration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnumDefinition {
    id:   DeclarationId,
    name: String,
}

impl EnumDefinition {
    /// Constructs a new enum declaration named `name`.
    #[must_use]
    pub fn new(ids: &mut DeclarationIdSource, name: impl Into<String>) -> Self {
        let id = ids.fresh();
        let name = name.into();
        Self { id, name }
    }

    /// Gets the stable identity of this declaration.
    #[must_use]
    pub fn id(&self) -> DeclarationId {
        self.id
    }

    /// Gets the declared name of the enum.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A modifier declaration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModifierDefinition {
    id:   DeclarationId,
    name: String,
}

impl ModifierDefinition {
    /// Constructs a new modifier declaration named `name`.
    #[must_use]
    pub fn new(ids: &mut DeclarationIdSource, name: impl Into<String>) -> Self {
        let id = ids.fresh();
        let name = name.into();
        Self { id, name }
    }

    /// Gets the stable identity of this declaration.
    #[must_use]
    pub fn id(&self) -> DeclarationId {
        self.id
    }

    /// Gets the declared name of the modifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A source unit, the root of one input file; imported modules are typed
/// by reference to it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceUnit {
    id:   DeclarationId,
    name: String,
}

impl SourceUnit {
    /// Constructs a new source unit for the input named `name`.
    #[must_use]
    pub fn new(ids: &mut DeclarationIdSource, name: impl Into<String>) -> Self {
        let id = ids.fresh();
        let name = name.into();
        Self { id, name }
    }

    /// Gets the stable identity of this source unit.
    #[must_use]
    pub fn id(&self) -> DeclarationId {
        self.id
    }

    /// Gets the name of the input this source unit was produced from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A function declaration, carrying the signature components the provider
/// needs to derive its type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FunctionDefinition {
    id:         DeclarationId,
    name:       String,
    parameters: Vec<Parameter>,
    returns:    Vec<Parameter>,
    mutability: StateMutability,
    visibility: Visibility,
}

impl FunctionDefinition {
    /// Constructs a new function declaration from its signature components.
    #[must_use]
    pub fn new(
        ids: &mut DeclarationIdSource,
        name: impl Into<String>,
        parameters: Vec<Parameter>,
        returns: Vec<Parameter>,
        mutability: StateMutability,
        visibility: Visibility,
    ) -> Self {
        let id = ids.fresh();
        let name = name.into();
        Self {
            id,
            name,
            parameters,
            returns,
            mutability,
            visibility,
        }
    }

    /// Gets the stable identity of this declaration.
    #[must_use]
    pub fn id(&self) -> DeclarationId {
        self.id
    }

    /// Gets the declared name of the function.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the ordered, typed parameters of the function.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Gets the ordered, typed return values of the function.
    #[must_use]
    pub fn returns(&self) -> &[Parameter] {
        &self.returns
    }

    /// Gets the declared state mutability of the function.
    #[must_use]
    pub fn mutability(&self) -> StateMutability {
        self.mutability
    }

    /// Gets the declared visibility of the function.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }
}

/// An event declaration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventDefinition {
    id:         DeclarationId,
    name:       String,
    parameters: Vec<Parameter>,
}

impl EventDefinition {
    /// Constructs a new event declaration from its parameters.
    #[must_use]
    pub fn new(
        ids: &mut DeclarationIdSource,
        name: impl Into<String>,
        parameters: Vec<Parameter>,
    ) -> Self {
        let id = ids.fresh();
        let name = name.into();
        Self {
            id,
            name,
            parameters,
        }
    }

    /// Gets the stable identity of this declaration.
    #[must_use]
    pub fn id(&self) -> DeclarationId {
        self.id
    }

    /// Gets the declared name of the event.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the ordered, typed parameters of the event.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}

/// A function type name, the surface syntax for a function-typed value
/// (as opposed to a function declaration).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FunctionTypeName {
    id:         DeclarationId,
    parameters: Vec<Type>,
    returns:    Vec<Type>,
    visibility: Visibility,
    mutability: StateMutability,
}

impl FunctionTypeName {
    /// Constructs a new function type name from its signature components.
    #[must_use]
    pub fn new(
        ids: &mut DeclarationIdSource,
        parameters: Vec<Type>,
        returns: Vec<Type>,
        visibility: Visibility,
        mutability: StateMutability,
    ) -> Self {
        let id = ids.fresh();
        Self {
            id,
            parameters,
            returns,
            visibility,
            mutability,
        }
    }

    /// Gets the stable identity of this node.
    #[must_use]
    pub fn id(&self) -> DeclarationId {
        self.id
    }

    /// Gets the ordered parameter types.
    #[must_use]
    pub fn parameters(&self) -> &[Type] {
        &self.parameters
    }

    /// Gets the ordered return types.
    #[must_use]
    pub fn returns(&self) -> &[Type] {
        &self.returns
    }

    /// Gets the declared visibility; only internal and external are
    /// meaningful for a function type name.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Gets the declared state mutability.
    #[must_use]
    pub fn mutability(&self) -> StateMutability {
        self.mutability
    }
}

/// A state variable declaration, from which the provider derives the type
/// of the variable's public accessor function.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VariableDeclaration {
    id:   DeclarationId,
    name: String,
    ty:   Type,
}

impl VariableDeclaration {
    /// Constructs a new variable declaration of type `ty`.
    #[must_use]
    pub fn new(ids: &mut DeclarationIdSource, name: impl Into<String>, ty: Type) -> Self {
        let id = ids.fresh();
        let name = name.into();
        Self { id, name, ty }
    }

    /// Gets the stable identity of this declaration.
    #[must_use]
    pub fn id(&self) -> DeclarationId {
        self.id
    }

    /// Gets the declared name of the variable.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the declared type of the variable.
    #[must_use]
    pub fn declared_type(&self) -> Type {
        self.ty
    }
}
