//! This module contains the elementary type name token and the parser for
//! the surface grammar of atoms and fixed-width type families:
//!
//! ```text
//! ElementaryType := Atom Suffix?
//! Atom           := 'bool' | 'address' | 'address payable'
//!                 | 'int'   | 'int'   Digits
//!                 | 'uint'  | 'uint'  Digits
//!                 | 'bytes' | 'bytes' Digits
//!                 | 'fixed' | 'ufixed'
//!                 | 'fixed' Digits 'x' Digits | 'ufixed' Digits 'x' Digits
//!                 | 'string'
//! Suffix         := ' storage' | ' memory' | ' calldata'
//! ```
//!
//! Missing digits default to 256 bits for `int` / `uint` and to a 128x18
//! shape for `fixed` / `ufixed`; a missing suffix defaults to ` storage`.

use crate::{
    constant::{
        DEFAULT_FIXED_POINT_FRACTIONAL_DIGITS,
        DEFAULT_FIXED_POINT_TOTAL_BITS,
        MAX_FIXED_BYTES_LENGTH,
        MAX_FRACTIONAL_DIGITS,
        MAX_INTEGER_WIDTH_BITS,
        MIN_INTEGER_WIDTH_BITS,
    },
    error::{Error, Result},
    ty::{DataLocation, Signedness},
};

/// A parsed elementary type name, the token form consumed by the
/// provider's [`crate::provider::TypeProvider::elementary_type`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ElementaryTypeName {
    /// `bool`.
    Bool,

    /// `address` or `address payable`.
    Address { payable: bool },

    /// `intN` / `uintN`, with the bare forms defaulting to 256 bits.
    Integer { bits: u16, signedness: Signedness },

    /// `bytesN`.
    FixedBytes { length: u8 },

    /// `fixedMxN` / `ufixedMxN`, with the bare forms defaulting to a
    /// 128x18 shape.
    FixedPoint {
        total_bits:        u16,
        fractional_digits: u16,
        signedness:        Signedness,
    },

    /// The dynamic packed byte array `bytes`.
    Bytes,

    /// The dynamic packed character array `string`.
    String,
}

/// Parses an elementary type name with an optional data location suffix,
/// defaulting to storage.
///
/// # Errors
///
/// - [`Error::UnknownElementaryType`] if the name is not in the grammar.
/// - [`Error::InvalidLocationSuffix`] if a valid atom is followed by a
///   word that is not a data location.
/// - The width errors of the corresponding typed factories for
///   out-of-range digits.
pub fn parse(name: &str) -> Result<(ElementaryTypeName, DataLocation)> {
    if let Some((head, tail)) = name.rsplit_once(' ') {
        if let Some(location) = parse_location(tail) {
            return Ok((parse_atom(head)?, location));
        }

        // `address payable` also contains a space; only a trailing word
        // after a well-formed atom is a bad location suffix.
        if parse_atom(name).is_err() && parse_atom(head).is_ok() {
            return Err(Error::InvalidLocationSuffix {
                suffix: tail.to_owned(),
            });
        }
    }

    Ok((parse_atom(name)?, DataLocation::Storage))
}

/// Parses a bare atom, with no location suffix.
///
/// # Errors
///
/// [`Error::UnknownElementaryType`] if the name is not in the grammar;
/// the width errors of the corresponding typed factories for out-of-range
/// digits.
pub fn parse_atom(name: &str) -> Result<ElementaryTypeName> {
    match name {
        "bool" => Ok(ElementaryTypeName::Bool),
        "address" => Ok(ElementaryTypeName::Address { payable: false }),
        "address payable" => Ok(ElementaryTypeName::Address { payable: true }),
        "string" => Ok(ElementaryTypeName::String),
        "bytes" => Ok(ElementaryTypeName::Bytes),
        "int" => Ok(ElementaryTypeName::Integer {
            bits:       MAX_INTEGER_WIDTH_BITS,
            signedness: Signedness::Signed,
        }),
        "uint" => Ok(ElementaryTypeName::Integer {
            bits:       MAX_INTEGER_WIDTH_BITS,
            signedness: Signedness::Unsigned,
        }),
        "fixed" => Ok(ElementaryTypeName::FixedPoint {
            total_bits:        DEFAULT_FIXED_POINT_TOTAL_BITS,
            fractional_digits: DEFAULT_FIXED_POINT_FRACTIONAL_DIGITS,
            signedness:        Signedness::Signed,
        }),
        "ufixed" => Ok(ElementaryTypeName::FixedPoint {
            total_bits:        DEFAULT_FIXED_POINT_TOTAL_BITS,
            fractional_digits: DEFAULT_FIXED_POINT_FRACTIONAL_DIGITS,
            signedness:        Signedness::Unsigned,
        }),
        _ => parse_suffixed_atom(name),
    }
}

/// Parses the atoms that carry explicit digits.
fn parse_suffixed_atom(name: &str) -> Result<ElementaryTypeName> {
    if let Some(digits) = name.strip_prefix("uint") {
        return integer_atom(name, digits, Signedness::Unsigned);
    }
    if let Some(digits) = name.strip_prefix("int") {
        return integer_atom(name, digits, Signedness::Signed);
    }
    if let Some(digits) = name.strip_prefix("bytes") {
        return fixed_bytes_atom(name, digits);
    }
    if let Some(shape) = name.strip_prefix("ufixed") {
        return fixed_point_atom(name, shape, Signedness::Unsigned);
    }
    if let Some(shape) = name.strip_prefix("fixed") {
        return fixed_point_atom(name, shape, Signedness::Signed);
    }

    Err(Error::UnknownElementaryType {
        name: name.to_owned(),
    })
}

fn integer_atom(name: &str, digits: &str, signedness: Signedness) -> Result<ElementaryTypeName> {
    let Some(bits) = parse_number(digits) else {
        return Err(Error::UnknownElementaryType {
            name: name.to_owned(),
        });
    };

    if bits % u32::from(MIN_INTEGER_WIDTH_BITS) != 0
        || bits < u32::from(MIN_INTEGER_WIDTH_BITS)
        || bits > u32::from(MAX_INTEGER_WIDTH_BITS)
    {
        return Err(Error::BadIntegerWidth { bits });
    }

    let bits = u16::try_from(bits).expect("bounded above by the range check");
    Ok(ElementaryTypeName::Integer { bits, signedness })
}

fn fixed_bytes_atom(name: &str, digits: &str) -> Result<ElementaryTypeName> {
    let Some(length) = parse_number(digits) else {
        return Err(Error::UnknownElementaryType {
            name: name.to_owned(),
        });
    };

    if length == 0 || length > u32::from(MAX_FIXED_BYTES_LENGTH) {
        return Err(Error::BadFixedBytesLength { length });
    }

    let length = u8::try_from(length).expect("bounded above by the range check");
    Ok(ElementaryTypeName::FixedBytes { length })
}

fn fixed_point_atom(name: &str, shape: &str, signedness: Signedness) -> Result<ElementaryTypeName> {
    let parsed = shape
        .split_once('x')
        .and_then(|(total, fractional)| Some((parse_number(total)?, parse_number(fractional)?)));
    let Some((total_bits, fractional_digits)) = parsed else {
        return Err(Error::UnknownElementaryType {
            name: name.to_owned(),
        });
    };

    if total_bits % u32::from(MIN_INTEGER_WIDTH_BITS) != 0
        || total_bits < u32::from(MIN_INTEGER_WIDTH_BITS)
        || total_bits > u32::from(MAX_INTEGER_WIDTH_BITS)
        || fractional_digits > u32::from(MAX_FRACTIONAL_DIGITS)
    {
        return Err(Error::BadFixedPointShape {
            total_bits,
            fractional_digits,
        });
    }

    let total_bits = u16::try_from(total_bits).expect("bounded above by the range check");
    let fractional_digits =
        u16::try_from(fractional_digits).expect("bounded above by the range check");
    Ok(ElementaryTypeName::FixedPoint {
        total_bits,
        fractional_digits,
        signedness,
    })
}

/// Parses a decimal digit run. Leading zeros are rejected, matching the
/// lexer's number grammar, so `uint08` is not an elementary type name.
fn parse_number(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}

fn parse_location(word: &str) -> Option<DataLocation> {
    match word {
        "storage" => Some(DataLocation::Storage),
        "memory" => Some(DataLocation::Memory),
        "calldata" => Some(DataLocation::Calldata),
        _ => None,
    }
}
