//! This module contains constants that are needed throughout the codebase.

/// The number of bits in a byte, used when validating bit-denominated type
/// widths.
pub const BYTE_SIZE_BITS: u16 = 8;

/// The smallest valid width for a fixed-width integer type, in bits.
pub const MIN_INTEGER_WIDTH_BITS: u16 = 8;

/// The largest valid width for a fixed-width integer type, in bits.
///
/// This is the width of a word on the target virtual machine.
pub const MAX_INTEGER_WIDTH_BITS: u16 = 256;

/// The number of distinct integer widths per signedness, and hence the
/// number of pre-populated integer atoms of each signedness.
pub const INTEGER_WIDTH_COUNT: usize = 32;

/// The largest valid length for a fixed-size byte array type, in bytes.
pub const MAX_FIXED_BYTES_LENGTH: u8 = 32;

/// The number of distinct fixed-bytes lengths, and hence the number of
/// pre-populated fixed-bytes atoms.
pub const FIXED_BYTES_LENGTH_COUNT: usize = 32;

/// The largest number of fractional digits a fixed-point type may carry.
pub const MAX_FRACTIONAL_DIGITS: u16 = 80;

/// The total bit width of the `fixed` / `ufixed` types when the surface
/// syntax gives no explicit shape.
pub const DEFAULT_FIXED_POINT_TOTAL_BITS: u16 = 128;

/// The number of fractional digits of the `fixed` / `ufixed` types when the
/// surface syntax gives no explicit shape.
pub const DEFAULT_FIXED_POINT_FRACTIONAL_DIGITS: u16 = 18;
