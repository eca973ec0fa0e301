//! This module contains the definitions of the type values owned by the
//! [`crate::provider::TypeProvider`], the opaque handles used to refer to
//! them, and the supporting vocabulary types: data locations, array
//! shapes, magic namespaces, and exact rational values.
//!
//! It is intentionally kept separate from the provider to ensure that you
//! cannot mint handles without going through the provider's factory
//! surface.

use std::fmt::{Display, Formatter};

use ethnum::U256;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Serialize};

use crate::ast::DeclarationId;

pub mod function;

pub use function::{FunctionKind, FunctionSignature, StateMutability, Visibility};

/// An opaque, stable handle to a type owned by a
/// [`crate::provider::TypeProvider`].
///
/// Handles are cheap to copy, hash, and compare. Within one provider, two
/// handles are equal if and only if they denote the same canonical type.
///
/// # Lifetimes of Handles
///
/// Handles to atoms remain valid for the lifetime of their provider.
/// Handles to interned types are invalidated by
/// [`crate::provider::TypeProvider::reset`]; accessing one afterwards
/// panics. Handles must never be moved between providers.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Type {
    index:      u32,
    generation: u32,
}

impl Type {
    /// Mints a handle for the arena slot `index` under `generation`.
    ///
    /// This function is not public as the provider must be the only source
    /// of handles for a program.
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Gets the arena slot this handle refers to.
    pub(crate) fn index(self) -> usize {
        self.index as usize
    }

    /// Gets the provider generation this handle was minted under.
    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

/// The storage tier of a reference-typed value.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataLocation {
    /// The contract's persistent storage.
    Storage,

    /// The transient memory of a single call.
    Memory,

    /// The read-only call input data.
    Calldata,
}

impl Display for DataLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DataLocation::Storage => "storage",
            DataLocation::Memory => "memory",
            DataLocation::Calldata => "calldata",
        };
        write!(f, "{name}")
    }
}

/// Whether a fixed-width numeric type is signed.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signedness {
    Signed,
    Unsigned,
}

/// The flavour of an array type.
///
/// The canonical `bytes` and `string` types are dynamic arrays of single
/// bytes, but they are distinct types from `bytes1[]`; the flavour is what
/// keeps them apart in the provider's cache.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ArrayKind {
    /// An ordinary array, `T[]` or `T[n]`.
    Ordinary,

    /// The packed byte array `bytes`.
    Bytes,

    /// The packed character array `string`.
    String,
}

/// The length of an array type.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ArrayLength {
    /// The length is not part of the type; `T[]`, `bytes`, `string`.
    Dynamic,

    /// A fixed length known at compile time; `T[n]`.
    Fixed(U256),
}

/// The payload of an array type.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ArrayData {
    /// The storage tier the array lives in.
    pub location: DataLocation,

    /// The element type.
    pub element: Type,

    /// The length, fixed or dynamic.
    pub length: ArrayLength,

    /// The flavour: ordinary, `bytes`, or `string`.
    pub kind: ArrayKind,

    /// Whether this handle refers to the array rather than owning it;
    /// affects assignment semantics downstream.
    pub is_pointer: bool,
}

impl ArrayData {
    /// Checks whether the array's length is dynamic.
    #[must_use]
    pub fn is_dynamically_sized(&self) -> bool {
        self.length == ArrayLength::Dynamic
    }

    /// Checks whether the array is the `string` type.
    #[must_use]
    pub fn is_string(&self) -> bool {
        self.kind == ArrayKind::String
    }

    /// Checks whether the array is one of the packed byte arrays, `bytes`
    /// or `string`.
    #[must_use]
    pub fn is_byte_array(&self) -> bool {
        matches!(self.kind, ArrayKind::Bytes | ArrayKind::String)
    }
}

/// The magic namespaces, and the meta-type namespace produced by the
/// `type(...)` intrinsic.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MagicKind {
    /// The `block` namespace.
    Block,

    /// The `msg` namespace.
    Message,

    /// The `tx` namespace.
    Transaction,

    /// The `abi` namespace.
    Abi,

    /// The namespace of compile-time information about a type, produced
    /// by the `type(...)` intrinsic.
    MetaType(Type),
}

/// An exact rational value, as carried by number literals before they are
/// assigned a fixed-width type.
///
/// # Invariants
///
/// The value is kept in lowest terms with a strictly positive denominator,
/// so structural equality of two rationals is value equality.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Rational {
    numerator:   BigInt,
    denominator: BigInt,
}

impl Rational {
    /// Constructs the rational `numerator / denominator`, normalizing to
    /// lowest terms with a positive denominator.
    ///
    /// # Panics
    ///
    /// If `denominator` is zero. A zero denominator cannot originate from
    /// a source literal, so this is a programmer error.
    #[must_use]
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Self {
        let mut numerator = numerator.into();
        let mut denominator = denominator.into();
        assert!(
            !denominator.is_zero(),
            "a rational value cannot have a zero denominator"
        );

        if denominator.is_negative() {
            numerator = -numerator;
            denominator = -denominator;
        }

        let divisor = gcd(numerator.abs(), denominator.clone());
        numerator = &numerator / &divisor;
        denominator = &denominator / &divisor;

        Self {
            numerator,
            denominator,
        }
    }

    /// Constructs the rational for the whole number `value`.
    #[must_use]
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        let numerator = value.into();
        let denominator = BigInt::one();
        Self {
            numerator,
            denominator,
        }
    }

    /// Gets the numerator; negative when the value is negative.
    #[must_use]
    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    /// Gets the denominator; always strictly positive.
    #[must_use]
    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    /// Checks whether the value is a whole number.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    /// Checks whether the value is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

/// The greatest common divisor of two non-negative values.
///
/// Both inputs must be non-negative, and at least one must be non-zero.
fn gcd(mut a: BigInt, mut b: BigInt) -> BigInt {
    while !b.is_zero() {
        let remainder = &a % &b;
        a = std::mem::replace(&mut b, remainder);
    }
    a
}

/// The value of a type, one variant per kind.
///
/// # Invariants
///
/// Values are frozen once interned: the provider hands out shared
/// references and never mutates a stored value. Child types are referred
/// to by handle, so a value is a shallow, acyclic description; recursion
/// through user-defined types goes through declaration identities instead.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeData {
    /// The `bool` type.
    Bool,

    /// The `address` type, in its plain and payable variants.
    Address { payable: bool },

    /// A fixed-width integer, `8 <= bits <= 256 && bits % 8 == 0`.
    Integer { bits: u16, signedness: Signedness },

    /// A fixed-size byte array, `1 <= length <= 32`.
    FixedBytes { length: u8 },

    /// A fixed-point number of `total_bits` width with
    /// `fractional_digits` decimal digits after the point.
    FixedPoint {
        total_bits:        u16,
        fractional_digits: u16,
        signedness:        Signedness,
    },

    /// An array, including the canonical `bytes` and `string` types.
    Array(ArrayData),

    /// A mapping from `key` to `value`; only lives in storage.
    Mapping { key: Type, value: Type },

    /// An ordered sequence of component types.
    Tuple { components: Vec<Type> },

    /// A function value; see [`FunctionSignature`] for the payload.
    Function(FunctionSignature),

    /// The type of a string literal, carrying the literal bytes.
    StringLiteral { value: Vec<u8> },

    /// The exact value of a number literal, optionally paired with the
    /// fixed-bytes type a hex literal of matching width converts to.
    RationalNumber {
        value:            Rational,
        compatible_bytes: Option<Type>,
    },

    /// A contract instance type; `is_super` marks the type of `super`.
    Contract {
        declaration: DeclarationId,
        name:        String,
        is_super:    bool,
    },

    /// A struct instance type at a data location.
    Struct {
        declaration: DeclarationId,
        name:        String,
        location:    DataLocation,
    },

    /// An enum instance type; one distinct type per declaration.
    Enum {
        declaration: DeclarationId,
        name:        String,
    },

    /// The type of an imported module.
    Module {
        source_unit: DeclarationId,
        name:        String,
    },

    /// The type of a type: the result of naming `actual` in an
    /// expression.
    TypeOf { actual: Type },

    /// The type of a modifier; not a first-class value.
    Modifier {
        declaration: DeclarationId,
        name:        String,
    },

    /// One of the magic namespaces.
    Magic { kind: MagicKind },

    /// A marker for a dynamically sized value that cannot be accessed
    /// where it occurs.
    InaccessibleDynamic,
}

impl TypeData {
    /// Gets a short, stable name for the kind of this value, for use in
    /// diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeData::Bool => "bool",
            TypeData::Address { .. } => "address",
            TypeData::Integer { .. } => "integer",
            TypeData::FixedBytes { .. } => "fixed bytes",
            TypeData::FixedPoint { .. } => "fixed point",
            TypeData::Array(_) => "array",
            TypeData::Mapping { .. } => "mapping",
            TypeData::Tuple { .. } => "tuple",
            TypeData::Function(_) => "function",
            TypeData::StringLiteral { .. } => "string literal",
            TypeData::RationalNumber { .. } => "rational number",
            TypeData::Contract { .. } => "contract",
            TypeData::Struct { .. } => "struct",
            TypeData::Enum { .. } => "enum",
            TypeData::Module { .. } => "module",
            TypeData::TypeOf { .. } => "type",
            TypeData::Modifier { .. } => "modifier",
            TypeData::Magic { .. } => "magic",
            TypeData::InaccessibleDynamic => "inaccessible dynamic",
        }
    }

    /// Checks whether this value is one of the comparable value types that
    /// fit in a single machine word and may key a mapping.
    #[must_use]
    pub fn is_value_type(&self) -> bool {
        matches!(
            self,
            TypeData::Bool
                | TypeData::Address { .. }
                | TypeData::Integer { .. }
                | TypeData::FixedBytes { .. }
                | TypeData::FixedPoint { .. }
                | TypeData::Contract { .. }
                | TypeData::Enum { .. }
        )
    }

    /// Checks whether this value is a reference type, one whose handle
    /// carries a data location.
    #[must_use]
    pub fn is_reference_type(&self) -> bool {
        matches!(self, TypeData::Array(_) | TypeData::Struct { .. })
    }

    /// Checks whether the size of a value of this type is unknown at
    /// compile time.
    #[must_use]
    pub fn is_dynamically_sized(&self) -> bool {
        match self {
            TypeData::Array(array) => array.is_dynamically_sized(),
            TypeData::InaccessibleDynamic => true,
            _ => false,
        }
    }

    /// Derives the canonical cache key for this value.
    ///
    /// The key is the value itself for every kind except functions, whose
    /// parameter and return names are stored but deliberately excluded
    /// from the equivalence relation.
    pub(crate) fn interning_key(&self) -> TypeData {
        match self {
            TypeData::Function(signature) => {
                let mut key = signature.clone();
                key.parameter_names = Vec::new();
                key.return_names = Vec::new();
                TypeData::Function(key)
            }
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use num_bigint::BigInt;

    use crate::ty::{
        function::{FunctionKind, FunctionSignature, StateMutability},
        DataLocation,
        Rational,
        TypeData,
    };

    #[test]
    fn normalizes_rationals_to_lowest_terms() {
        assert_eq!(Rational::new(2, 4), Rational::new(1, 2));
        assert_eq!(Rational::new(-3, 6), Rational::new(1, -2));
        assert_eq!(Rational::new(-1, -2), Rational::new(1, 2));
        assert_eq!(Rational::new(0, 7), Rational::from_integer(0));
    }

    #[test]
    fn keeps_the_denominator_positive() {
        let value = Rational::new(5, -10);
        assert!(value.is_negative());
        assert_eq!(value.denominator(), &BigInt::from(2));
        assert_eq!(value.to_string(), "-1/2");
    }

    #[test]
    fn recognises_whole_numbers() {
        assert!(Rational::new(4, 2).is_integer());
        assert!(!Rational::new(3, 2).is_integer());
        assert_eq!(Rational::new(4, 2).to_string(), "2");
    }

    #[test]
    #[should_panic(expected = "zero denominator")]
    fn rejects_a_zero_denominator() {
        let _ = Rational::new(1, 0);
    }

    #[test]
    fn excludes_parameter_names_from_the_interning_key() {
        let named = TypeData::Function(FunctionSignature {
            parameter_names: vec!["x".to_owned()],
            return_names: vec!["y".to_owned()],
            kind: FunctionKind::Internal,
            mutability: StateMutability::Pure,
            ..FunctionSignature::default()
        });
        let unnamed = TypeData::Function(FunctionSignature {
            kind: FunctionKind::Internal,
            mutability: StateMutability::Pure,
            ..FunctionSignature::default()
        });
        assert_ne!(named, unnamed);
        assert_eq!(named.interning_key(), unnamed.interning_key());
    }

    #[test]
    fn data_locations_serialize_in_snake_case() {
        assert_eq!(
            serde_json::to_string(&DataLocation::Calldata).unwrap(),
            "\"calldata\""
        );
        let parsed: DataLocation = serde_json::from_str("\"memory\"").unwrap();
        assert_eq!(parsed, DataLocation::Memory);
    }
}
