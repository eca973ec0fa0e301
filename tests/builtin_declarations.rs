//! This module is an integration test that pins down the built-in
//! declaration table: its order, its duplicate overloads, its aliases,
//! and the exact signatures the declarations are bound to.
#![cfg(test)]

use std::rc::Rc;

use contract_type_provider::{
    ast::{ContractDefinition, DeclarationIdSource},
    GlobalContext,
};

/// Every built-in declaration in construction order, paired with the
/// canonical rendering of its bound type.
const EXPECTED: &[(&str, &str)] = &[
    ("abi", "abi"),
    ("block", "block"),
    ("msg", "msg"),
    ("tx", "tx"),
    ("now", "uint256"),
    (
        "addmod",
        "function (uint256,uint256,uint256) pure returns (uint256)",
    ),
    (
        "mulmod",
        "function (uint256,uint256,uint256) pure returns (uint256)",
    ),
    ("assert", "function (bool) pure"),
    ("require", "function (bool) pure"),
    ("require", "function (bool,string memory) pure"),
    ("revert", "function () pure"),
    ("revert", "function (string memory) pure"),
    ("blockhash", "function (uint256) view returns (bytes32)"),
    ("gasleft", "function () view returns (uint256)"),
    ("keccak256", "function (bytes memory) pure returns (bytes32)"),
    ("sha3", "function (bytes memory) pure returns (bytes32)"),
    ("sha256", "function (bytes memory) pure returns (bytes32)"),
    ("ripemd160", "function (bytes memory) pure returns (bytes20)"),
    (
        "ecrecover",
        "function (bytes32,uint8,bytes32,bytes32) pure returns (address)",
    ),
    ("selfdestruct", "function (address payable)"),
    ("suicide", "function (address payable)"),
    ("log0", "function (bytes32)"),
    ("log1", "function (bytes32,bytes32)"),
    ("log2", "function (bytes32,bytes32,bytes32)"),
    ("log3", "function (bytes32,bytes32,bytes32,bytes32)"),
    ("log4", "function (bytes32,bytes32,bytes32,bytes32,bytes32)"),
    ("type", "function (address) pure"),
];

#[test]
fn publishes_the_builtin_table_in_order() {
    let context = GlobalContext::default();
    let declarations = context.declarations();
    assert_eq!(declarations.len(), EXPECTED.len());

    for (declaration, (name, rendered)) in declarations.iter().zip(EXPECTED) {
        assert_eq!(declaration.name(), *name);
        assert_eq!(
            context.types().render(declaration.typ()),
            *rendered,
            "wrong type bound to `{name}`"
        );
    }
}

#[test]
fn aliases_are_distinct_declarations_over_one_type() {
    let context = GlobalContext::default();
    let find = |name: &str| {
        context
            .declarations()
            .iter()
            .find(|d| d.name() == name)
            .unwrap()
    };

    assert_eq!(find("sha3").typ(), find("keccak256").typ());
    assert!(!Rc::ptr_eq(find("sha3"), find("keccak256")));
    assert_eq!(find("suicide").typ(), find("selfdestruct").typ());
    assert!(!Rc::ptr_eq(find("suicide"), find("selfdestruct")));

    // Matching shapes with different kinds stay distinct types.
    assert_ne!(find("sha256").typ(), find("keccak256").typ());
    assert_ne!(find("addmod").typ(), find("mulmod").typ());
}

#[test]
fn contextual_declarations_follow_the_active_contract() {
    let mut ids = DeclarationIdSource::new();
    let mut context = GlobalContext::default();
    let token = ContractDefinition::new(&mut ids, "Token");

    context.set_current_contract(&token);
    let this_decl = context.current_this();
    let same = context.current_this();
    assert!(Rc::ptr_eq(&this_decl, &same));

    let expected = context.types_mut().contract_type(&token, false);
    assert_eq!(this_decl.typ(), expected);
    assert_eq!(context.types().render(this_decl.typ()), "contract Token");

    let super_decl = context.current_super();
    assert_eq!(
        context.types().render(super_decl.typ()),
        "contract super Token"
    );

    // A reset forgets the memoized declaration and mints a fresh one.
    context.reset();
    context.set_current_contract(&token);
    let fresh = context.current_this();
    assert!(!Rc::ptr_eq(&this_decl, &fresh));
}
