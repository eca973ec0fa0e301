//! This module contains the payload of function types: the signature, the
//! closed set of function kinds, and the state-mutability and visibility
//! vocabularies shared with the AST surface.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{ast::DeclarationId, ty::Type};

/// How much of the chain state a function may read or write.
///
/// The variants are ordered from most to least restrictive.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StateMutability {
    /// Reads and writes nothing outside its own frame.
    Pure,

    /// May read, but not write, chain state.
    View,

    /// May write chain state but rejects attached value.
    #[default]
    NonPayable,

    /// May write chain state and accept attached value.
    Payable,
}

impl Display for StateMutability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StateMutability::Pure => "pure",
            StateMutability::View => "view",
            StateMutability::NonPayable => "nonpayable",
            StateMutability::Payable => "payable",
        };
        write!(f, "{name}")
    }
}

/// The declared visibility of a function or function type name.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Callable from anywhere; part of the contract interface.
    Public,

    /// Callable only from the defining contract and its descendants.
    Internal,

    /// Callable only through an external message call.
    External,

    /// Callable only from the defining contract.
    Private,
}

/// The closed set of ways a function value can be invoked.
///
/// Beyond the internal and external calling conventions of user-declared
/// functions, the set enumerates every intrinsic operation of the virtual
/// machine that is surfaced as a built-in function, so that later passes
/// can dispatch on the kind without consulting the declaration.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    /// A direct jump within the current contract.
    #[default]
    Internal,

    /// An external message call.
    External,

    /// An external call reusing the caller's storage.
    CallCode,

    /// An external call reusing the caller's full context.
    DelegateCall,

    /// A bare low-level call with no declared signature.
    BareCall,

    /// Contract creation via `new`.
    Creation,

    /// The `send` member of addresses.
    Send,

    /// The `transfer` member of addresses.
    Transfer,

    /// The `keccak256` hash intrinsic.
    Keccak256,

    /// The `ecrecover` signature-recovery intrinsic.
    EcRecover,

    /// The `sha256` hash intrinsic.
    Sha256,

    /// The `ripemd160` hash intrinsic.
    Ripemd160,

    /// The raw logging intrinsics with zero to four topics.
    Log0,
    Log1,
    Log2,
    Log3,
    Log4,

    /// The `gasleft` intrinsic.
    GasLeft,

    /// The `blockhash` intrinsic.
    BlockHash,

    /// The `addmod` wide-arithmetic intrinsic.
    AddMod,

    /// The `mulmod` wide-arithmetic intrinsic.
    MulMod,

    /// The `assert` internal-invariant guard.
    Assert,

    /// The `require` input-validation guard.
    Require,

    /// The `revert` abort intrinsic.
    Revert,

    /// The `selfdestruct` contract-removal intrinsic.
    Selfdestruct,

    /// The `type(...)` meta-type intrinsic.
    MetaType,

    /// An event invocation.
    Event,
}

/// The payload of a function type.
///
/// # Invariants
///
/// When `parameter_names` (or `return_names`) is non-empty it has exactly
/// one entry per parameter (or return value). Names are part of the stored
/// value but are excluded from the canonical equivalence relation; two
/// signatures differing only in names intern to the same handle, which
/// keeps the names of the first interning call.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct FunctionSignature {
    /// The ordered parameter types.
    pub parameters: Vec<Type>,

    /// The ordered return types.
    pub returns: Vec<Type>,

    /// The declared parameter names; empty when unnamed.
    pub parameter_names: Vec<String>,

    /// The declared return value names; empty when unnamed.
    pub return_names: Vec<String>,

    /// The calling convention or intrinsic operation.
    pub kind: FunctionKind,

    /// How much chain state an invocation may touch.
    pub mutability: StateMutability,

    /// Whether the value carries an explicit gas amount.
    pub gas_set: bool,

    /// Whether the value carries an explicit attached value.
    pub value_set: bool,

    /// Whether the first parameter is bound, as for member-style calls.
    pub bound: bool,

    /// Whether the function accepts any number of arguments of any type.
    pub arbitrary_parameters: bool,

    /// The declaration this type was derived from, when there is one.
    pub declaration: Option<DeclarationId>,
}

impl FunctionSignature {
    /// Constructs a plain signature from the given shapes, with every flag
    /// cleared and no owning declaration.
    #[must_use]
    pub fn new(
        parameters: Vec<Type>,
        returns: Vec<Type>,
        kind: FunctionKind,
        mutability: StateMutability,
    ) -> Self {
        Self {
            parameters,
            returns,
            kind,
            mutability,
            ..Self::default()
        }
    }
}
