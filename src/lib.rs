//! This library implements the type system core of a compiler for a
//! statically typed, contract-oriented language targeting a stack-based
//! virtual machine. It owns the construction and identification of every
//! type in a compilation, and publishes the built-in global declarations
//! that the surrounding analysis passes resolve against.
//!
//! Note that this library does not evaluate expressions, apply conversions,
//! or emit code; it only _constructs and identifies_ types.
//!
//! # How it Works
//!
//! From a very high level, the type system operates as follows:
//!
//! 1. A [`provider::TypeProvider`] is created. At construction it
//!    pre-populates the immortal atoms: `bool`, the two address variants,
//!    all 32 signed and 32 unsigned integer widths, all 32 fixed-bytes
//!    lengths, the four magic namespaces, the empty tuple, the canonical
//!    `bytes` / `string` storage and memory arrays, and the
//!    inaccessible-dynamic marker.
//! 2. Surrounding passes call the typed factory methods on the provider
//!    and receive [`ty::Type`] handles. Equal descriptors always yield the
//!    same handle, so handle equality is semantic type equality and
//!    handles can be hashed and compared directly.
//! 3. A [`globals::GlobalContext`] is built on top of the provider. It
//!    constructs the ordered list of built-in declarations (`block`,
//!    `msg`, `require`, `keccak256`, and so on) and lazily materializes
//!    the contextual `this` / `super` declarations for whichever contract
//!    is currently being analysed.
//! 4. Between compilations, [`provider::TypeProvider::reset`] drops every
//!    interned type while keeping the atoms alive. Handles to interned
//!    types are invalidated by a reset, and accessing one afterwards is a
//!    programmer error.
//!
//! # Basic Usage
//!
//! ```
//! use contract_type_provider::{
//!     ty::Signedness,
//!     GlobalContext,
//!     TypeProvider,
//! };
//!
//! let mut types = TypeProvider::new();
//!
//! let key = types.integer(256, Signedness::Unsigned).unwrap();
//! let value = types.bool_type();
//! let mapping = types.mapping(key, value).unwrap();
//! assert_eq!(types.render(mapping), "mapping(uint256 => bool)");
//!
//! // Equal descriptors produce the same handle.
//! assert_eq!(types.mapping(key, value).unwrap(), mapping);
//!
//! let context = GlobalContext::new(types);
//! assert!(context.declarations().iter().any(|d| d.name() == "keccak256"));
//! ```

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming

pub mod ast;
pub mod constant;
pub mod error;
pub mod globals;
pub mod provider;
pub mod ty;

// Re-exports to provide the library interface.
pub use globals::{Declaration, GlobalContext};
pub use provider::TypeProvider;
pub use ty::Type;
