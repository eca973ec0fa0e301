//! This module is an integration test that exercises the canonicity,
//! idempotence, location-override, and reset guarantees of the type
//! provider across the full factory surface.
#![cfg(test)]

use contract_type_provider::{
    ast::{ContractDefinition, DeclarationIdSource, StructDefinition},
    error::Error,
    ty::{DataLocation, Rational, Signedness},
    Type,
    TypeProvider,
};

#[test]
fn canonicalizes_every_integer_width() -> anyhow::Result<()> {
    let types = TypeProvider::new();

    for bits in (8_u16..=256).step_by(8) {
        for signedness in [Signedness::Signed, Signedness::Unsigned] {
            let first = types.integer(bits, signedness)?;
            let second = types.integer(bits, signedness)?;
            assert_eq!(first, second, "integer({bits}) must be canonical");
        }
    }

    Ok(())
}

#[test]
fn canonicalizes_nested_composites() -> anyhow::Result<()> {
    let mut types = TypeProvider::new();
    let uint256 = types.integer(256, Signedness::Unsigned)?;
    let bool_type = types.bool_type();

    // mapping(uint256 => mapping(uint256 => bool[])) built twice from
    // scratch must resolve to one handle at every level.
    let build = |types: &mut TypeProvider| -> anyhow::Result<Type> {
        let array = types.dynamic_array(DataLocation::Storage, bool_type);
        let inner = types.mapping(uint256, array)?;
        Ok(types.mapping(uint256, inner)?)
    };
    let first = build(&mut types)?;
    let second = build(&mut types)?;
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn distinguishes_every_key_component() -> anyhow::Result<()> {
    let mut types = TypeProvider::new();
    let uint256 = types.integer(256, Signedness::Unsigned)?;

    let base = types.dynamic_array(DataLocation::Storage, uint256);
    let relocated = types.with_location(base, DataLocation::Memory, false);
    let pointer = types.with_location(base, DataLocation::Storage, true);
    let fixed = types.fixed_array(DataLocation::Storage, uint256, 8_u128);

    assert_ne!(base, relocated, "location is part of the key");
    assert_ne!(base, pointer, "pointer flavour is part of the key");
    assert_ne!(base, fixed, "length is part of the key");

    Ok(())
}

#[test]
fn location_override_is_absorbing() -> anyhow::Result<()> {
    let mut ids = DeclarationIdSource::new();
    let mut types = TypeProvider::new();
    let uint256 = types.integer(256, Signedness::Unsigned)?;

    let array = types.dynamic_array(DataLocation::Storage, uint256);
    let through_memory = types.with_location(array, DataLocation::Memory, false);
    assert_eq!(
        types.with_location(through_memory, DataLocation::Calldata, false),
        types.with_location(array, DataLocation::Calldata, false),
    );

    let point = StructDefinition::new(&mut ids, "Point");
    let in_storage = types.struct_type(&point, DataLocation::Storage);
    let through_memory = types.with_location(in_storage, DataLocation::Memory, false);
    assert_eq!(
        types.with_location(through_memory, DataLocation::Calldata, false),
        types.with_location(in_storage, DataLocation::Calldata, false),
    );

    Ok(())
}

#[test]
fn tuples_are_canonical_across_calls() -> anyhow::Result<()> {
    let mut types = TypeProvider::new();
    let uint256 = types.integer(256, Signedness::Unsigned)?;
    let bool_type = types.bool_type();

    let first = types.tuple(vec![bool_type, uint256]);
    let second = types.tuple(vec![bool_type, uint256]);
    assert_eq!(first, second);

    let reordered = types.tuple(vec![uint256, bool_type]);
    assert_ne!(first, reordered, "component order is part of the key");

    Ok(())
}

#[test]
fn rejects_invalid_requests_without_interning() -> anyhow::Result<()> {
    let mut types = TypeProvider::new();
    let uint8 = types.integer(8, Signedness::Unsigned)?;

    assert_eq!(
        types.fixed_bytes(33),
        Err(Error::BadFixedBytesLength { length: 33 })
    );

    let string_type = types.string_type();
    assert!(matches!(
        types.mapping(string_type, uint8),
        Err(Error::BadMappingKey { .. })
    ));

    Ok(())
}

#[test]
fn reset_is_a_checkpoint_barrier() -> anyhow::Result<()> {
    let mut ids = DeclarationIdSource::new();
    let mut types = TypeProvider::new();
    let token = ContractDefinition::new(&mut ids, "Token");

    let bool_before = types.bool_type();
    let uint256_before = types.integer(256, Signedness::Unsigned)?;
    let bytes_before = types.bytes_type();

    let uint256 = uint256_before;
    let mapping_before = types.mapping(uint256, bool_before)?;
    let contract_before = types.contract_type(&token, false);
    let literal_before = types.string_literal("hello".as_bytes());
    let rational_before = types.rational_number(Rational::new(1, 3), None);

    types.reset();

    // Atoms compare equal to their pre-reset identity.
    assert_eq!(types.bool_type(), bool_before);
    assert_eq!(types.integer(256, Signedness::Unsigned)?, uint256_before);
    assert_eq!(types.bytes_type(), bytes_before);

    // Equivalent interned descriptors come back as fresh handles.
    assert_ne!(types.mapping(uint256, bool_before)?, mapping_before);
    assert_ne!(types.contract_type(&token, false), contract_before);
    assert_ne!(types.string_literal("hello".as_bytes()), literal_before);
    assert_ne!(
        types.rational_number(Rational::new(1, 3), None),
        rational_before
    );

    Ok(())
}
