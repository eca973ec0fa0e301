//! This module contains the interface error type for the library.
//!
//! All of the errors describe a malformed _request_ for a type. They are
//! returned to the caller; the provider never logs and never aborts on user
//! input. Violations of the provider's internal invariants (such as
//! accessing a stale handle) are compiler bugs, not user errors, and panic
//! instead.

use thiserror::Error;

/// The interface result type for the library.
///
/// Any fallible factory method on the provider returns this result type.
pub type Result<T> = std::result::Result<T, Error>;

/// The interface error type for the library, covering every way a request
/// for a type can be invalid.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// The input to the string factory is not an elementary type name.
    #[error("`{name}` is not an elementary type name")]
    UnknownElementaryType { name: String },

    /// An integer width that is not a multiple of eight bits in [8, 256].
    #[error("{bits} is not a valid integer width; widths are multiples of 8 bits in [8, 256]")]
    BadIntegerWidth { bits: u32 },

    /// A fixed-size byte array length outside [1, 32].
    #[error("{length} is not a valid fixed bytes length; lengths lie in [1, 32]")]
    BadFixedBytesLength { length: u32 },

    /// A fixed-point shape whose total width is not a multiple of eight
    /// bits in [8, 256], or whose fractional digit count exceeds 80.
    #[error("fixed{total_bits}x{fractional_digits} is not a valid fixed point shape")]
    BadFixedPointShape { total_bits: u32, fractional_digits: u32 },

    /// A mapping was requested with a key type that is not comparable.
    /// Reference and dynamically sized types are not valid mapping keys.
    #[error("a value of kind {kind} cannot be used as a mapping key")]
    BadMappingKey { kind: &'static str },

    /// A trailing word in an elementary type name that is not one of the
    /// recognised data locations.
    #[error("`{suffix}` is not a data location; expected `storage`, `memory` or `calldata`")]
    InvalidLocationSuffix { suffix: String },
}
