//! This module contains the [`GlobalContext`], the container of the
//! implicit global declarations: the magic namespaces, the built-in
//! functions, and the contextual `this` / `super` declarations of the
//! contract currently being analysed.
//!
//! Name resolution consults the declaration list when an identifier has no
//! user declaration. Two pairs of rows deliberately share a name — the
//! one- and two-argument `require`, and the zero- and one-argument
//! `revert` — and resolution is expected to select among them by argument
//! arity and types, so the duplication must not be collapsed.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{ContractDefinition, DeclarationId},
    provider::TypeProvider,
    ty::{
        function::{FunctionKind, StateMutability},
        MagicKind,
        Signedness,
        Type,
    },
};

/// A built-in or contextual declaration: a name bound to a type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Declaration {
    name: String,
    typ:  Type,
}

impl Declaration {
    /// Constructs a new declaration binding `name` to `typ`.
    #[must_use]
    pub fn new(name: impl Into<String>, typ: Type) -> Self {
        let name = name.into();
        Self { name, typ }
    }

    /// Gets the name this declaration is resolved under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the type of the declared value.
    #[must_use]
    pub fn typ(&self) -> Type {
        self.typ
    }
}

/// The container of the global declarations for one compilation.
///
/// The context owns its [`TypeProvider`]: the built-in declarations hold
/// handles into it, so the provider must not be reset or dropped while
/// the declarations are alive, and ownership makes that ordering
/// impossible to get wrong.
#[derive(Debug)]
pub struct GlobalContext {
    types:              TypeProvider,
    declarations:       Vec<Rc<Declaration>>,
    current_contract:   Option<ContractDefinition>,
    this_declarations:  HashMap<DeclarationId, Rc<Declaration>>,
    super_declarations: HashMap<DeclarationId, Rc<Declaration>>,
}

impl GlobalContext {
    /// Constructs a new global context on top of `types`, building the
    /// built-in declaration list.
    #[must_use]
    pub fn new(mut types: TypeProvider) -> Self {
        let declarations = construct_builtin_declarations(&mut types);
        Self {
            types,
            declarations,
            current_contract: None,
            this_declarations: HashMap::new(),
            super_declarations: HashMap::new(),
        }
    }

    /// Gets the built-in declarations, in construction order.
    ///
    /// The list contains two entries named `require` and two named
    /// `revert`; callers disambiguate by signature.
    #[must_use]
    pub fn declarations(&self) -> &[Rc<Declaration>] {
        &self.declarations
    }

    /// Gets the type provider this context was built on.
    #[must_use]
    pub fn types(&self) -> &TypeProvider {
        &self.types
    }

    /// Gets mutable access to the type provider, for the surrounding
    /// passes to request types through.
    ///
    /// Prefer [`Self::reset`] over resetting the provider through this
    /// accessor: the built-in declarations hold handles that a bare
    /// provider reset would leave dangling.
    pub fn types_mut(&mut self) -> &mut TypeProvider {
        &mut self.types
    }

    /// Makes `contract` the contract currently being analysed, the one
    /// the `this` and `super` declarations refer to.
    pub fn set_current_contract(&mut self, contract: &ContractDefinition) {
        self.current_contract = Some(contract.clone());
    }

    /// Gets the `this` declaration for the active contract, allocating it
    /// on first use and returning the memoized declaration afterwards.
    ///
    /// # Panics
    ///
    /// If no contract is active. Calling this outside contract analysis
    /// is a compiler bug.
    pub fn current_this(&mut self) -> Rc<Declaration> {
        self.contextual_declaration(false)
    }

    /// Gets the `super` declaration for the active contract, allocating
    /// it on first use and returning the memoized declaration afterwards.
    ///
    /// # Panics
    ///
    /// If no contract is active. Calling this outside contract analysis
    /// is a compiler bug.
    pub fn current_super(&mut self) -> Rc<Declaration> {
        self.contextual_declaration(true)
    }

    fn contextual_declaration(&mut self, is_super: bool) -> Rc<Declaration> {
        let contract = self
            .current_contract
            .clone()
            .expect("no contract is active; call set_current_contract first");
        let typ = self.types.contract_type(&contract, is_super);

        let (name, memo) = if is_super {
            ("super", &mut self.super_declarations)
        } else {
            ("this", &mut self.this_declarations)
        };
        memo.entry(contract.id())
            .or_insert_with(|| Rc::new(Declaration::new(name, typ)))
            .clone()
    }

    /// Resets the context and its provider to their initial state.
    ///
    /// The provider drops every interned type, the built-in declaration
    /// list is rebuilt against the fresh caches, and the memoized `this`
    /// / `super` declarations are forgotten. Handles and declarations
    /// obtained before the reset must have been discarded.
    pub fn reset(&mut self) {
        self.this_declarations.clear();
        self.super_declarations.clear();
        self.types.reset();
        self.declarations = construct_builtin_declarations(&mut self.types);
    }
}

impl Default for GlobalContext {
    fn default() -> Self {
        Self::new(TypeProvider::new())
    }
}

/// Builds the built-in declaration list, one row per global identifier.
fn construct_builtin_declarations(types: &mut TypeProvider) -> Vec<Rc<Declaration>> {
    use FunctionKind::{
        AddMod,
        Assert,
        BlockHash,
        EcRecover,
        GasLeft,
        Keccak256,
        Log0,
        Log1,
        Log2,
        Log3,
        Log4,
        MetaType,
        MulMod,
        Require,
        Revert,
        Ripemd160,
        Selfdestruct,
        Sha256,
    };
    use StateMutability::{NonPayable, Pure, View};

    fn builtin(
        types: &mut TypeProvider,
        name: &str,
        parameters: &[&str],
        returns: &[&str],
        kind: FunctionKind,
        mutability: StateMutability,
    ) -> Rc<Declaration> {
        let typ = types
            .function_from_names(parameters, returns, kind, false, mutability)
            .expect("built-in signatures use only well-formed elementary type names");
        Rc::new(Declaration::new(name, typ))
    }

    let uint256 = types
        .integer(256, Signedness::Unsigned)
        .expect("256 is a valid integer width");

    vec![
        Rc::new(Declaration::new("abi", types.magic(MagicKind::Abi))),
        Rc::new(Declaration::new("block", types.magic(MagicKind::Block))),
        Rc::new(Declaration::new("msg", types.magic(MagicKind::Message))),
        Rc::new(Declaration::new("tx", types.magic(MagicKind::Transaction))),
        Rc::new(Declaration::new("now", uint256)),
        builtin(
            types,
            "addmod",
            &["uint256", "uint256", "uint256"],
            &["uint256"],
            AddMod,
            Pure,
        ),
        builtin(
            types,
            "mulmod",
            &["uint256", "uint256", "uint256"],
            &["uint256"],
            MulMod,
            Pure,
        ),
        builtin(types, "assert", &["bool"], &[], Assert, Pure),
        builtin(types, "require", &["bool"], &[], Require, Pure),
        builtin(
            types,
            "require",
            &["bool", "string memory"],
            &[],
            Require,
            Pure,
        ),
        builtin(types, "revert", &[], &[], Revert, Pure),
        builtin(types, "revert", &["string memory"], &[], Revert, Pure),
        builtin(types, "blockhash", &["uint256"], &["bytes32"], BlockHash, View),
        builtin(types, "gasleft", &[], &["uint256"], GasLeft, View),
        builtin(
            types,
            "keccak256",
            &["bytes memory"],
            &["bytes32"],
            Keccak256,
            Pure,
        ),
        // `sha3` is a distinct declaration aliasing the keccak256 type.
        builtin(types, "sha3", &["bytes memory"], &["bytes32"], Keccak256, Pure),
        builtin(types, "sha256", &["bytes memory"], &["bytes32"], Sha256, Pure),
        builtin(
            types,
            "ripemd160",
            &["bytes memory"],
            &["bytes20"],
            Ripemd160,
            Pure,
        ),
        builtin(
            types,
            "ecrecover",
            &["bytes32", "uint8", "bytes32", "bytes32"],
            &["address"],
            EcRecover,
            Pure,
        ),
        builtin(
            types,
            "selfdestruct",
            &["address payable"],
            &[],
            Selfdestruct,
            NonPayable,
        ),
        // `suicide` is a distinct declaration aliasing the selfdestruct
        // type.
        builtin(
            types,
            "suicide",
            &["address payable"],
            &[],
            Selfdestruct,
            NonPayable,
        ),
        builtin(types, "log0", &["bytes32"], &[], Log0, NonPayable),
        builtin(types, "log1", &["bytes32", "bytes32"], &[], Log1, NonPayable),
        builtin(
            types,
            "log2",
            &["bytes32", "bytes32", "bytes32"],
            &[],
            Log2,
            NonPayable,
        ),
        builtin(
            types,
            "log3",
            &["bytes32", "bytes32", "bytes32", "bytes32"],
            &[],
            Log3,
            NonPayable,
        ),
        builtin(
            types,
            "log4",
            &["bytes32", "bytes32", "bytes32", "bytes32", "bytes32"],
            &[],
            Log4,
            NonPayable,
        ),
        // Accepts any contract type and returns a meta-type namespace;
        // both are refined by the type checker at the call site.
        builtin(types, "type", &["address"], &[], MetaType, Pure),
    ]
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use crate::{
        ast::{ContractDefinition, DeclarationIdSource},
        globals::GlobalContext,
        provider::TypeProvider,
        ty::TypeData,
    };

    #[test]
    fn builds_the_builtin_declarations_in_order() {
        let context = GlobalContext::default();
        let names: Vec<&str> = context.declarations().iter().map(|d| d.name()).collect();
        let expected = vec![
            "abi",
            "block",
            "msg",
            "tx",
            "now",
            "addmod",
            "mulmod",
            "assert",
            "require",
            "require",
            "revert",
            "revert",
            "blockhash",
            "gasleft",
            "keccak256",
            "sha3",
            "sha256",
            "ripemd160",
            "ecrecover",
            "selfdestruct",
            "suicide",
            "log0",
            "log1",
            "log2",
            "log3",
            "log4",
            "type",
        ];
        assert_eq!(names, expected);
    }

    #[test]
    fn aliases_share_one_interned_type() {
        let context = GlobalContext::default();
        let find = |name: &str| {
            context
                .declarations()
                .iter()
                .find(|d| d.name() == name)
                .unwrap()
        };

        let keccak256 = find("keccak256");
        let sha3 = find("sha3");
        assert_eq!(keccak256.typ(), sha3.typ());
        assert!(!Rc::ptr_eq(keccak256, sha3));

        let selfdestruct = find("selfdestruct");
        let suicide = find("suicide");
        assert_eq!(selfdestruct.typ(), suicide.typ());
        assert!(!Rc::ptr_eq(selfdestruct, suicide));
    }

    #[test]
    fn preserves_duplicate_overloads() {
        let context = GlobalContext::default();
        let requires: Vec<_> = context
            .declarations()
            .iter()
            .filter(|d| d.name() == "require")
            .collect();
        assert_eq!(requires.len(), 2);
        assert_ne!(requires[0].typ(), requires[1].typ());

        let reverts: Vec<_> = context
            .declarations()
            .iter()
            .filter(|d| d.name() == "revert")
            .collect();
        assert_eq!(reverts.len(), 2);
        assert_ne!(reverts[0].typ(), reverts[1].typ());
    }

    #[test]
    fn binds_now_to_uint256() {
        let context = GlobalContext::default();
        let now = context
            .declarations()
            .iter()
            .find(|d| d.name() == "now")
            .unwrap();
        assert_eq!(context.types().render(now.typ()), "uint256");
    }

    #[test]
    fn types_the_builtin_functions() {
        let context = GlobalContext::default();
        let find = |name: &str| {
            context
                .declarations()
                .iter()
                .find(|d| d.name() == name)
                .unwrap()
        };

        assert_eq!(
            context.types().render(find("keccak256").typ()),
            "function (bytes memory) pure returns (bytes32)"
        );
        assert_eq!(
            context.types().render(find("blockhash").typ()),
            "function (uint256) view returns (bytes32)"
        );
        assert_eq!(
            context.types().render(find("selfdestruct").typ()),
            "function (address payable)"
        );
        assert_eq!(
            context.types().render(find("ecrecover").typ()),
            "function (bytes32,uint8,bytes32,bytes32) pure returns (address)"
        );
    }

    #[test]
    fn memoizes_this_and_super_per_contract() {
        let mut ids = DeclarationIdSource::new();
        let mut context = GlobalContext::default();
        let token = ContractDefinition::new(&mut ids, "Token");
        context.set_current_contract(&token);

        let first = context.current_this();
        let second = context.current_this();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(first.name(), "this");

        let expected = context.types_mut().contract_type(&token, false);
        assert_eq!(first.typ(), expected);

        let super_decl = context.current_super();
        assert_eq!(super_decl.name(), "super");
        let TypeData::Contract { is_super, .. } = context.types().data(super_decl.typ()) else {
            panic!("expected a contract type");
        };
        assert!(*is_super);
    }

    #[test]
    fn separates_contextual_declarations_per_contract() {
        let mut ids = DeclarationIdSource::new();
        let mut context = GlobalContext::default();
        let first = ContractDefinition::new(&mut ids, "First");
        let second = ContractDefinition::new(&mut ids, "Second");

        context.set_current_contract(&first);
        let this_first = context.current_this();
        context.set_current_contract(&second);
        let this_second = context.current_this();
        assert!(!Rc::ptr_eq(&this_first, &this_second));
        assert_ne!(this_first.typ(), this_second.typ());

        // Switching back resolves to the memoized declaration.
        context.set_current_contract(&first);
        assert!(Rc::ptr_eq(&this_first, &context.current_this()));
    }

    #[test]
    fn reset_forgets_contextual_declarations() {
        let mut ids = DeclarationIdSource::new();
        let mut context = GlobalContext::default();
        let token = ContractDefinition::new(&mut ids, "Token");
        context.set_current_contract(&token);
        let before = context.current_this();

        context.reset();
        context.set_current_contract(&token);
        let after = context.current_this();
        assert!(!Rc::ptr_eq(&before, &after));
    }

    #[test]
    fn reset_rebuilds_the_builtin_list() {
        let mut context = GlobalContext::default();
        let names_before: Vec<String> = context
            .declarations()
            .iter()
            .map(|d| d.name().to_owned())
            .collect();

        context.reset();

        let names_after: Vec<String> = context
            .declarations()
            .iter()
            .map(|d| d.name().to_owned())
            .collect();
        assert_eq!(names_before, names_after);

        // The rebuilt declarations hold live handles.
        for declaration in context.declarations() {
            let _ = context.types().data(declaration.typ());
        }
    }

    #[test]
    #[should_panic(expected = "no contract is active")]
    fn panics_without_an_active_contract() {
        let mut context = GlobalContext::new(TypeProvider::new());
        let _ = context.current_this();
    }
}
