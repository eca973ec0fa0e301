//! This module contains the [`TypeProvider`], the factory that owns every
//! type value in a compilation and canonicalizes structurally equal
//! descriptors to a single handle.
//!
//! # How it Works
//!
//! The provider keeps all type values in an arena and hands out
//! [`Type`] handles that index into it. A content-keyed cache maps each
//! canonical descriptor to the handle it was first interned under, so a
//! repeated request never allocates and always returns the original
//! handle. Interning is bottom-up: a composite descriptor refers to its
//! children by handle, so cache lookup never recurses and cycles cannot
//! arise (recursive user-defined types refer to each other by declaration
//! identity instead).
//!
//! The atoms are seeded into the arena at construction and survive
//! [`TypeProvider::reset`]; everything else is dropped by it.

use std::collections::HashMap;

use ethnum::U256;
use itertools::Itertools;

use crate::{
    ast::{
        ContractDefinition,
        EnumDefinition,
        EventDefinition,
        FunctionDefinition,
        FunctionTypeName,
        ModifierDefinition,
        SourceUnit,
        StructDefinition,
        VariableDeclaration,
    },
    constant::{
        BYTE_SIZE_BITS,
        FIXED_BYTES_LENGTH_COUNT,
        INTEGER_WIDTH_COUNT,
        MAX_FIXED_BYTES_LENGTH,
        MAX_FRACTIONAL_DIGITS,
        MAX_INTEGER_WIDTH_BITS,
        MIN_INTEGER_WIDTH_BITS,
    },
    error::{Error, Result},
    ty::{
        function::{FunctionKind, FunctionSignature, StateMutability, Visibility},
        ArrayData,
        ArrayKind,
        ArrayLength,
        DataLocation,
        MagicKind,
        Rational,
        Signedness,
        Type,
        TypeData,
    },
};

pub mod elementary;

pub use elementary::ElementaryTypeName;

/// The generation under which atom handles are minted.
///
/// Interned handles are minted under the provider's current generation,
/// which starts above this value and is bumped by every reset, so an atom
/// handle stays live forever while an interned handle goes stale at the
/// next reset.
const ATOM_GENERATION: u32 = 0;

/// The pre-populated, immortal types.
///
/// Every field holds a handle into the owning provider's arena, minted
/// under [`ATOM_GENERATION`]. The struct exists so that the atom factory
/// methods are straight field reads, with the integer and fixed-bytes
/// families indexed by width.
#[derive(Debug)]
struct Atoms {
    bool_type:            Type,
    address:              Type,
    payable_address:      Type,
    inaccessible_dynamic: Type,
    empty_tuple:          Type,
    signed_integers:      [Type; INTEGER_WIDTH_COUNT],
    unsigned_integers:    [Type; INTEGER_WIDTH_COUNT],
    fixed_bytes:          [Type; FIXED_BYTES_LENGTH_COUNT],
    block:                Type,
    message:              Type,
    transaction:          Type,
    abi:                  Type,
    bytes_storage:        Type,
    bytes_memory:         Type,
    string_storage:       Type,
    string_memory:        Type,
}

impl Atoms {
    /// Seeds every atom into `arena` and `interned`, returning the handle
    /// table.
    ///
    /// The canonical `bytes` / `string` arrays and the empty tuple are
    /// registered in the cache under their full descriptors, so a later
    /// factory request for an equal descriptor resolves to the atom.
    fn populate(arena: &mut Vec<TypeData>, interned: &mut HashMap<TypeData, Type>) -> Self {
        let mut seed = |data: TypeData| -> Type {
            let index = u32::try_from(arena.len())
                .expect("the type arena cannot exceed u32::MAX entries");
            let handle = Type::new(index, ATOM_GENERATION);
            interned.insert(data.interning_key(), handle);
            arena.push(data);
            handle
        };

        let bool_type = seed(TypeData::Bool);
        let address = seed(TypeData::Address { payable: false });
        let payable_address = seed(TypeData::Address { payable: true });
        let inaccessible_dynamic = seed(TypeData::InaccessibleDynamic);
        let empty_tuple = seed(TypeData::Tuple {
            components: Vec::new(),
        });

        let signed_integers = core::array::from_fn(|i| {
            seed(TypeData::Integer {
                bits:       integer_width_at(i),
                signedness: Signedness::Signed,
            })
        });
        let unsigned_integers = core::array::from_fn(|i| {
            seed(TypeData::Integer {
                bits:       integer_width_at(i),
                signedness: Signedness::Unsigned,
            })
        });
        let fixed_bytes: [Type; FIXED_BYTES_LENGTH_COUNT] = core::array::from_fn(|i| {
            seed(TypeData::FixedBytes {
                length: fixed_bytes_length_at(i),
            })
        });

        let block = seed(TypeData::Magic {
            kind: MagicKind::Block,
        });
        let message = seed(TypeData::Magic {
            kind: MagicKind::Message,
        });
        let transaction = seed(TypeData::Magic {
            kind: MagicKind::Transaction,
        });
        let abi = seed(TypeData::Magic {
            kind: MagicKind::Abi,
        });

        let byte = fixed_bytes[0];
        let mut packed_array = |location: DataLocation, kind: ArrayKind| {
            seed(TypeData::Array(ArrayData {
                location,
                element: byte,
                length: ArrayLength::Dynamic,
                kind,
                is_pointer: false,
            }))
        };
        let bytes_storage = packed_array(DataLocation::Storage, ArrayKind::Bytes);
        let bytes_memory = packed_array(DataLocation::Memory, ArrayKind::Bytes);
        let string_storage = packed_array(DataLocation::Storage, ArrayKind::String);
        let string_memory = packed_array(DataLocation::Memory, ArrayKind::String);

        Self {
            bool_type,
            address,
            payable_address,
            inaccessible_dynamic,
            empty_tuple,
            signed_integers,
            unsigned_integers,
            fixed_bytes,
            block,
            message,
            transaction,
            abi,
            bytes_storage,
            bytes_memory,
            string_storage,
            string_memory,
        }
    }
}

/// Gets the integer width, in bits, of the atom at `index` in the
/// width-indexed atom arrays.
fn integer_width_at(index: usize) -> u16 {
    u16::try_from((index + 1) * usize::from(BYTE_SIZE_BITS))
        .expect("integer widths are bounded by 256")
}

/// Gets the fixed-bytes length of the atom at `index` in the
/// length-indexed atom array.
fn fixed_bytes_length_at(index: usize) -> u8 {
    u8::try_from(index + 1).expect("fixed bytes lengths are bounded by 32")
}

/// The factory for, and owner of, every type in a compilation.
///
/// All requests for types go through the typed factory methods on this
/// struct. The caller does _not_ own the returned types; it receives
/// [`Type`] handles whose equality is semantic type equality.
///
/// # Concurrency
///
/// The provider is single-writer state: the compiler drives it from one
/// thread at a time, and the factory methods take `&mut self` where they
/// may populate the cache. Hosts compiling multiple units concurrently
/// must give each compilation its own provider.
///
/// # Resets
///
/// [`Self::reset`] is a checkpoint barrier: it drops every interned type
/// while keeping the atoms, and invalidates every handle to an interned
/// type. Accessing a stale handle afterwards panics.
#[derive(Debug)]
pub struct TypeProvider {
    /// The arena owning every type value, atoms first.
    arena: Vec<TypeData>,

    /// The content-keyed cache from canonical descriptors to handles.
    interned: HashMap<TypeData, Type>,

    /// The handle table for the pre-populated atoms.
    atoms: Atoms,

    /// The number of leading arena slots occupied by atoms.
    atom_count: usize,

    /// The current generation; bumped by every reset.
    generation: u32,
}

impl TypeProvider {
    /// Constructs a new provider with every atom pre-populated.
    #[must_use]
    pub fn new() -> Self {
        let mut arena = Vec::new();
        let mut interned = HashMap::new();
        let atoms = Atoms::populate(&mut arena, &mut interned);
        let atom_count = arena.len();
        Self {
            arena,
            interned,
            atoms,
            atom_count,
            generation: ATOM_GENERATION + 1,
        }
    }

    /// Gets the value of the type denoted by `ty`.
    ///
    /// # Panics
    ///
    /// If `ty` is stale (minted before the most recent [`Self::reset`]) or
    /// was minted by a different provider. Both indicate a compiler bug.
    #[must_use]
    pub fn data(&self, ty: Type) -> &TypeData {
        assert!(
            self.is_live(ty),
            "stale or foreign type handle: {ty:?} (current generation {})",
            self.generation
        );
        &self.arena[ty.index()]
    }

    /// Checks whether `ty` is a handle this provider will honour.
    fn is_live(&self, ty: Type) -> bool {
        let generation_live =
            ty.generation() == ATOM_GENERATION || ty.generation() == self.generation;
        generation_live && ty.index() < self.arena.len()
    }

    /// Canonicalizes `data`, returning the handle every equal descriptor
    /// shares.
    fn intern(&mut self, data: TypeData) -> Type {
        let key = data.interning_key();
        if let Some(existing) = self.interned.get(&key) {
            return *existing;
        }

        let index =
            u32::try_from(self.arena.len()).expect("the type arena cannot exceed u32::MAX entries");
        let handle = Type::new(index, self.generation);
        self.arena.push(data);
        self.interned.insert(key, handle);
        handle
    }

    /// Resets the provider to its initial state, wiping every interned
    /// type.
    ///
    /// The atoms survive and their handles remain valid; every other
    /// handle goes stale and must have been discarded by the caller.
    pub fn reset(&mut self) {
        self.arena.truncate(self.atom_count);
        self.interned.clear();
        for (index, data) in self.arena.iter().enumerate() {
            let handle = Type::new(
                u32::try_from(index).expect("atom count is far below u32::MAX"),
                ATOM_GENERATION,
            );
            self.interned.insert(data.interning_key(), handle);
        }
        self.generation += 1;
    }
}

impl Default for TypeProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// The atom accessors.
impl TypeProvider {
    /// Gets the `bool` type.
    #[must_use]
    pub fn bool_type(&self) -> Type {
        self.atoms.bool_type
    }

    /// Gets the plain `address` type.
    #[must_use]
    pub fn address(&self) -> Type {
        self.atoms.address
    }

    /// Gets the `address payable` type.
    #[must_use]
    pub fn payable_address(&self) -> Type {
        self.atoms.payable_address
    }

    /// Gets the empty tuple, the type of a call with no results.
    #[must_use]
    pub fn empty_tuple(&self) -> Type {
        self.atoms.empty_tuple
    }

    /// Gets a suitably simple type for positions where a type is expected
    /// but an error has already been reported.
    #[must_use]
    pub fn error_type(&self) -> Type {
        self.empty_tuple()
    }

    /// Gets the marker type for dynamically sized values that cannot be
    /// accessed where they occur.
    #[must_use]
    pub fn inaccessible_dynamic(&self) -> Type {
        self.atoms.inaccessible_dynamic
    }

    /// Gets the `bytes1` type.
    #[must_use]
    pub fn byte(&self) -> Type {
        self.atoms.fixed_bytes[0]
    }

    /// Gets the canonical `bytes` type in storage.
    #[must_use]
    pub fn bytes_type(&self) -> Type {
        self.atoms.bytes_storage
    }

    /// Gets the canonical `bytes` type in memory.
    #[must_use]
    pub fn bytes_memory(&self) -> Type {
        self.atoms.bytes_memory
    }

    /// Gets the canonical `string` type in storage.
    #[must_use]
    pub fn string_type(&self) -> Type {
        self.atoms.string_storage
    }

    /// Gets the canonical `string` type in memory.
    #[must_use]
    pub fn string_memory(&self) -> Type {
        self.atoms.string_memory
    }

    /// Gets the `uint256` type, the machine word of the target.
    fn uint256(&self) -> Type {
        self.atoms.unsigned_integers[INTEGER_WIDTH_COUNT - 1]
    }
}

/// The factory methods for the fixed-width value families.
impl TypeProvider {
    /// Gets the integer type of the given width and signedness.
    ///
    /// # Errors
    ///
    /// [`Error::BadIntegerWidth`] if `bits` is not a multiple of 8 in
    /// [8, 256].
    pub fn integer(&self, bits: u16, signedness: Signedness) -> Result<Type> {
        if bits % BYTE_SIZE_BITS != 0
            || !(MIN_INTEGER_WIDTH_BITS..=MAX_INTEGER_WIDTH_BITS).contains(&bits)
        {
            return Err(Error::BadIntegerWidth {
                bits: u32::from(bits),
            });
        }

        let index = usize::from(bits / BYTE_SIZE_BITS) - 1;
        let atom = match signedness {
            Signedness::Signed => self.atoms.signed_integers[index],
            Signedness::Unsigned => self.atoms.unsigned_integers[index],
        };
        Ok(atom)
    }

    /// Gets the `bytesN` type of the given length.
    ///
    /// # Errors
    ///
    /// [`Error::BadFixedBytesLength`] if `length` is not in [1, 32].
    pub fn fixed_bytes(&self, length: u8) -> Result<Type> {
        if length == 0 || length > MAX_FIXED_BYTES_LENGTH {
            return Err(Error::BadFixedBytesLength {
                length: u32::from(length),
            });
        }

        Ok(self.atoms.fixed_bytes[usize::from(length) - 1])
    }

    /// Gets the fixed-point type of the given shape, where `total_bits` is
    /// the full width of the value and `fractional_digits` the number of
    /// decimal digits after the point.
    ///
    /// # Errors
    ///
    /// [`Error::BadFixedPointShape`] if `total_bits` is not a multiple of
    /// 8 in [8, 256], or `fractional_digits` exceeds 80.
    pub fn fixed_point(
        &mut self,
        total_bits: u16,
        fractional_digits: u16,
        signedness: Signedness,
    ) -> Result<Type> {
        if total_bits % BYTE_SIZE_BITS != 0
            || !(MIN_INTEGER_WIDTH_BITS..=MAX_INTEGER_WIDTH_BITS).contains(&total_bits)
            || fractional_digits > MAX_FRACTIONAL_DIGITS
        {
            return Err(Error::BadFixedPointShape {
                total_bits:        u32::from(total_bits),
                fractional_digits: u32::from(fractional_digits),
            });
        }

        Ok(self.intern(TypeData::FixedPoint {
            total_bits,
            fractional_digits,
            signedness,
        }))
    }
}

/// The factory methods for reference and composite types.
impl TypeProvider {
    /// Constructs the dynamically sized array type `element[]` at
    /// `location`.
    pub fn dynamic_array(&mut self, location: DataLocation, element: Type) -> Type {
        self.intern(TypeData::Array(ArrayData {
            location,
            element,
            length: ArrayLength::Dynamic,
            kind: ArrayKind::Ordinary,
            is_pointer: false,
        }))
    }

    /// Constructs the fixed-size array type `element[length]` at
    /// `location`.
    pub fn fixed_array(
        &mut self,
        location: DataLocation,
        element: Type,
        length: impl Into<U256>,
    ) -> Type {
        let length = ArrayLength::Fixed(length.into());
        self.intern(TypeData::Array(ArrayData {
            location,
            element,
            length,
            kind: ArrayKind::Ordinary,
            is_pointer: false,
        }))
    }

    /// Constructs the packed byte array type — `string` when `is_string`,
    /// `bytes` otherwise — at `location`.
    ///
    /// For the storage and memory locations this resolves to the
    /// pre-populated canonical atoms.
    pub fn byte_array(&mut self, location: DataLocation, is_string: bool) -> Type {
        let kind = if is_string {
            ArrayKind::String
        } else {
            ArrayKind::Bytes
        };
        let element = self.byte();
        self.intern(TypeData::Array(ArrayData {
            location,
            element,
            length: ArrayLength::Dynamic,
            kind,
            is_pointer: false,
        }))
    }

    /// Re-locates a reference type, returning the variant of `ty` at
    /// `location` with the given pointer flavour. Non-reference types are
    /// returned unchanged.
    ///
    /// # Panics
    ///
    /// If `ty` is a stale handle.
    pub fn with_location(&mut self, ty: Type, location: DataLocation, is_pointer: bool) -> Type {
        match self.data(ty).clone() {
            TypeData::Array(mut array) => {
                array.location = location;
                array.is_pointer = is_pointer;
                self.intern(TypeData::Array(array))
            }
            TypeData::Struct {
                declaration, name, ..
            } => self.intern(TypeData::Struct {
                declaration,
                name,
                location,
            }),
            _ => ty,
        }
    }

    /// Constructs the mapping type from `key` to `value`. Mapping keys are
    /// always read from storage, so the key carries no location of its
    /// own.
    ///
    /// # Errors
    ///
    /// [`Error::BadMappingKey`] if `key` is not a comparable value type;
    /// reference and dynamically sized types cannot key a mapping.
    ///
    /// # Panics
    ///
    /// If `key` is a stale handle.
    pub fn mapping(&mut self, key: Type, value: Type) -> Result<Type> {
        if !self.data(key).is_value_type() {
            return Err(Error::BadMappingKey {
                kind: self.data(key).kind_name(),
            });
        }

        Ok(self.intern(TypeData::Mapping { key, value }))
    }

    /// Constructs the tuple type with the given components. The empty
    /// tuple resolves to the pre-populated atom.
    pub fn tuple(&mut self, components: Vec<Type>) -> Type {
        self.intern(TypeData::Tuple { components })
    }

    /// Constructs the type of a string literal with the given content.
    pub fn string_literal(&mut self, value: impl Into<Vec<u8>>) -> Type {
        let value = value.into();
        self.intern(TypeData::StringLiteral { value })
    }

    /// Constructs the type of a number literal with the given exact value,
    /// optionally paired with the fixed-bytes type a hex literal of
    /// matching width converts to.
    pub fn rational_number(&mut self, value: Rational, compatible_bytes: Option<Type>) -> Type {
        self.intern(TypeData::RationalNumber {
            value,
            compatible_bytes,
        })
    }
}

/// The factory methods for nominal and meta types.
impl TypeProvider {
    /// Gets the type of an instance of `contract`; with `is_super`, the
    /// type of `super` inside it.
    pub fn contract_type(&mut self, contract: &ContractDefinition, is_super: bool) -> Type {
        self.intern(TypeData::Contract {
            declaration: contract.id(),
            name: contract.name().to_owned(),
            is_super,
        })
    }

    /// Gets the type of an instance of `structure` at `location`.
    pub fn struct_type(&mut self, structure: &StructDefinition, location: DataLocation) -> Type {
        self.intern(TypeData::Struct {
            declaration: structure.id(),
            name: structure.name().to_owned(),
            location,
        })
    }

    /// Gets the type of an instance of `enumeration`; there is one
    /// distinct type per enum declaration.
    pub fn enum_type(&mut self, enumeration: &EnumDefinition) -> Type {
        self.intern(TypeData::Enum {
            declaration: enumeration.id(),
            name:        enumeration.name().to_owned(),
        })
    }

    /// Gets the special type of the imported module rooted at
    /// `source_unit`; it mainly gives access to the module's scope via
    /// members.
    pub fn module_type(&mut self, source_unit: &SourceUnit) -> Type {
        self.intern(TypeData::Module {
            source_unit: source_unit.id(),
            name:        source_unit.name().to_owned(),
        })
    }

    /// Gets the type of `modifier` itself.
    pub fn modifier_type(&mut self, modifier: &ModifierDefinition) -> Type {
        self.intern(TypeData::Modifier {
            declaration: modifier.id(),
            name:        modifier.name().to_owned(),
        })
    }

    /// Gets the type of the type `actual`: what an expression naming a
    /// type evaluates to.
    pub fn type_of(&mut self, actual: Type) -> Type {
        self.intern(TypeData::TypeOf { actual })
    }

    /// Gets the magic namespace type for `kind`. The four namespaces are
    /// atoms; meta-type namespaces are interned per underlying type.
    pub fn magic(&mut self, kind: MagicKind) -> Type {
        match kind {
            MagicKind::Block => self.atoms.block,
            MagicKind::Message => self.atoms.message,
            MagicKind::Transaction => self.atoms.transaction,
            MagicKind::Abi => self.atoms.abi,
            MagicKind::MetaType(_) => self.intern(TypeData::Magic { kind }),
        }
    }

    /// Gets the namespace of compile-time information about `actual`, the
    /// result type of the `type(...)` intrinsic.
    pub fn meta_type(&mut self, actual: Type) -> Type {
        self.magic(MagicKind::MetaType(actual))
    }
}

/// The factory methods for function types.
impl TypeProvider {
    /// Constructs a function type from a fully explicit signature. Use
    /// with care: the declaration-derived constructors are the right entry
    /// point for anything that has a declaration.
    pub fn function_type(&mut self, signature: FunctionSignature) -> Type {
        self.intern(TypeData::Function(signature))
    }

    /// Derives the type of a declared function: the internal type when
    /// `internal`, otherwise the type it is called with externally.
    pub fn function_from_definition(
        &mut self,
        function: &FunctionDefinition,
        internal: bool,
    ) -> Type {
        let kind = if internal {
            FunctionKind::Internal
        } else {
            FunctionKind::External
        };
        let signature = FunctionSignature {
            parameters: function.parameters().iter().map(|p| p.ty).collect(),
            returns: function.returns().iter().map(|p| p.ty).collect(),
            parameter_names: function.parameters().iter().map(|p| p.name.clone()).collect(),
            return_names: function.returns().iter().map(|p| p.name.clone()).collect(),
            kind,
            mutability: function.mutability(),
            declaration: Some(function.id()),
            ..FunctionSignature::default()
        };
        self.function_type(signature)
    }

    /// Derives the type of the public accessor function of the state
    /// variable `variable`: every mapping level contributes a key
    /// parameter and every array level an index parameter, and the
    /// remaining base value — memory-located when it is a reference type —
    /// is the return value.
    ///
    /// # Panics
    ///
    /// If the variable's declared type is a stale handle.
    pub fn accessor_function(&mut self, variable: &VariableDeclaration) -> Type {
        let mut parameters = Vec::new();
        let mut current = variable.declared_type();
        loop {
            match self.data(current).clone() {
                TypeData::Mapping { key, value } => {
                    parameters.push(key);
                    current = value;
                }
                TypeData::Array(array) if array.kind == ArrayKind::Ordinary => {
                    parameters.push(self.uint256());
                    current = array.element;
                }
                _ => break,
            }
        }

        let returned = if self.data(current).is_reference_type() {
            self.with_location(current, DataLocation::Memory, true)
        } else {
            current
        };

        let signature = FunctionSignature {
            parameters,
            returns: vec![returned],
            kind: FunctionKind::External,
            mutability: StateMutability::View,
            declaration: Some(variable.id()),
            ..FunctionSignature::default()
        };
        self.function_type(signature)
    }

    /// Derives the function type of the event `event`.
    pub fn function_from_event(&mut self, event: &EventDefinition) -> Type {
        let signature = FunctionSignature {
            parameters: event.parameters().iter().map(|p| p.ty).collect(),
            parameter_names: event.parameters().iter().map(|p| p.name.clone()).collect(),
            kind: FunctionKind::Event,
            mutability: StateMutability::NonPayable,
            declaration: Some(event.id()),
            ..FunctionSignature::default()
        };
        self.function_type(signature)
    }

    /// Derives the type denoted by the function type name `type_name`.
    pub fn function_from_type_name(&mut self, type_name: &FunctionTypeName) -> Type {
        let kind = match type_name.visibility() {
            Visibility::External => FunctionKind::External,
            _ => FunctionKind::Internal,
        };
        let signature = FunctionSignature::new(
            type_name.parameters().to_vec(),
            type_name.returns().to_vec(),
            kind,
            type_name.mutability(),
        );
        self.function_type(signature)
    }

    /// Constructs a function type whose parameter and return types are
    /// given as elementary type names, the form used for the built-in
    /// declarations.
    ///
    /// # Errors
    ///
    /// If any of the names fails to parse as an elementary type name.
    pub fn function_from_names(
        &mut self,
        parameter_types: &[&str],
        return_types: &[&str],
        kind: FunctionKind,
        arbitrary_parameters: bool,
        mutability: StateMutability,
    ) -> Result<Type> {
        let parameters: Vec<Type> = parameter_types
            .iter()
            .map(|name| self.from_elementary_type_name(name))
            .collect::<Result<_>>()?;
        let returns: Vec<Type> = return_types
            .iter()
            .map(|name| self.from_elementary_type_name(name))
            .collect::<Result<_>>()?;

        let signature = FunctionSignature {
            parameters,
            returns,
            kind,
            mutability,
            arbitrary_parameters,
            ..FunctionSignature::default()
        };
        Ok(self.function_type(signature))
    }
}

/// The string-based factory entry points.
impl TypeProvider {
    /// Gets the type for a parsed elementary type name token. `bytes` and
    /// `string` resolve to their storage variants.
    ///
    /// # Errors
    ///
    /// If the token carries an out-of-range width or shape.
    pub fn elementary_type(&mut self, name: ElementaryTypeName) -> Result<Type> {
        match name {
            ElementaryTypeName::Bool => Ok(self.bool_type()),
            ElementaryTypeName::Address { payable } => {
                if payable {
                    Ok(self.payable_address())
                } else {
                    Ok(self.address())
                }
            }
            ElementaryTypeName::Integer { bits, signedness } => self.integer(bits, signedness),
            ElementaryTypeName::FixedBytes { length } => self.fixed_bytes(length),
            ElementaryTypeName::FixedPoint {
                total_bits,
                fractional_digits,
                signedness,
            } => self.fixed_point(total_bits, fractional_digits, signedness),
            ElementaryTypeName::Bytes => Ok(self.bytes_type()),
            ElementaryTypeName::String => Ok(self.string_type()),
        }
    }

    /// Converts an elementary type name with an optional data location
    /// suffix — ` storage`, ` memory` or ` calldata`, defaulting to
    /// ` storage` — to a type. The location applies to the reference
    /// types `bytes` and `string`; on value types it is accepted and
    /// ignored, mirroring [`Self::with_location`].
    ///
    /// # Errors
    ///
    /// If the name is not in the elementary-type-name grammar, carries an
    /// out-of-range width, or has an unrecognized trailing word.
    pub fn from_elementary_type_name(&mut self, name: &str) -> Result<Type> {
        let (atom, location) = elementary::parse(name)?;
        match atom {
            ElementaryTypeName::Bytes => Ok(self.byte_array(location, false)),
            ElementaryTypeName::String => Ok(self.byte_array(location, true)),
            other => self.elementary_type(other),
        }
    }
}

/// Rendering of canonical type names.
impl TypeProvider {
    /// Renders the canonical display name of `ty`.
    ///
    /// Reference types carry their data location as a suffix, with
    /// ` pointer` appended for pointer-flavoured handles, so for every
    /// parseable elementary type name the rendering of the parsed type is
    /// the name itself with the default location made explicit.
    ///
    /// # Panics
    ///
    /// If `ty` is a stale handle.
    #[must_use]
    pub fn render(&self, ty: Type) -> String {
        match self.data(ty) {
            TypeData::Bool => "bool".to_owned(),
            TypeData::Address { payable } => {
                if *payable {
                    "address payable".to_owned()
                } else {
                    "address".to_owned()
                }
            }
            TypeData::Integer { bits, signedness } => match signedness {
                Signedness::Signed => format!("int{bits}"),
                Signedness::Unsigned => format!("uint{bits}"),
            },
            TypeData::FixedBytes { length } => format!("bytes{length}"),
            TypeData::FixedPoint {
                total_bits,
                fractional_digits,
                signedness,
            } => {
                let prefix = match signedness {
                    Signedness::Signed => "",
                    Signedness::Unsigned => "u",
                };
                format!("{prefix}fixed{total_bits}x{fractional_digits}")
            }
            TypeData::Array(array) => {
                let base = match array.kind {
                    ArrayKind::Bytes => "bytes".to_owned(),
                    ArrayKind::String => "string".to_owned(),
                    ArrayKind::Ordinary => match array.length {
                        ArrayLength::Dynamic => format!("{}[]", self.render(array.element)),
                        ArrayLength::Fixed(length) => {
                            format!("{}[{length}]", self.render(array.element))
                        }
                    },
                };
                let mut rendered = format!("{base} {}", array.location);
                if array.is_pointer {
                    rendered.push_str(" pointer");
                }
                rendered
            }
            TypeData::Mapping { key, value } => {
                format!("mapping({} => {})", self.render(*key), self.render(*value))
            }
            TypeData::Tuple { components } => {
                let inner = components.iter().map(|c| self.render(*c)).join(",");
                format!("tuple({inner})")
            }
            TypeData::Function(signature) => {
                let parameters = signature.parameters.iter().map(|p| self.render(*p)).join(",");
                let mut rendered = format!("function ({parameters})");
                if signature.mutability != StateMutability::NonPayable {
                    rendered.push(' ');
                    rendered.push_str(&signature.mutability.to_string());
                }
                if !signature.returns.is_empty() {
                    let returns = signature.returns.iter().map(|r| self.render(*r)).join(",");
                    rendered.push_str(&format!(" returns ({returns})"));
                }
                rendered
            }
            TypeData::StringLiteral { value } => match std::str::from_utf8(value) {
                Ok(text) => format!("literal_string \"{text}\""),
                Err(_) => format!("literal_string hex\"{}\"", hex::encode(value)),
            },
            TypeData::RationalNumber { value, .. } => {
                if value.is_integer() {
                    format!("int_const {value}")
                } else {
                    format!("rational_const {value}")
                }
            }
            TypeData::Contract { name, is_super, .. } => {
                if *is_super {
                    format!("contract super {name}")
                } else {
                    format!("contract {name}")
                }
            }
            TypeData::Struct { name, location, .. } => format!("struct {name} {location}"),
            TypeData::Enum { name, .. } => format!("enum {name}"),
            TypeData::Module { name, .. } => format!("module \"{name}\""),
            TypeData::TypeOf { actual } => format!("type({})", self.render(*actual)),
            TypeData::Modifier { name, .. } => format!("modifier {name}"),
            TypeData::Magic { kind } => match kind {
                MagicKind::Block => "block".to_owned(),
                MagicKind::Message => "msg".to_owned(),
                MagicKind::Transaction => "tx".to_owned(),
                MagicKind::Abi => "abi".to_owned(),
                MagicKind::MetaType(actual) => format!("type({})", self.render(*actual)),
            },
            TypeData::InaccessibleDynamic => "inaccessible dynamic type".to_owned(),
        }
    }
}
