/***************************************************************************************************
 * Copyright (c) 2021-2023 Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice (including the next
 * paragraph) shall be included in all copies or substantial portions of the
 * Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * tps_nanocbor CBOR Error API
 *
 * A fairly comprehensive, memory efficient, deserializer and serializer for CBOR (RFC8949).
 * This implementation is designed for use in constrained systems and requires neither the Rust
 * standard library nor an allocator.
 **************************************************************************************************/
use core::result;

#[cfg(any(feature = "full", test))]
use thiserror::Error;

/// An alias for `Result<T, CBORError>` used throughout this crate.
pub type Result<T> = result::Result<T, CBORError>;

/// `CBORError` enumerates every way a decode or encode call can fail.
///
/// Each variant corresponds one-for-one to a negative error code in the source codec: there is
/// no collapsing of distinct wire errors into a shared variant.
#[cfg_attr(any(feature = "full", test), derive(Copy, Clone, Error, Debug))]
#[cfg_attr(all(not(feature = "full"), not(test)), derive(Copy, Clone, Debug))]
pub enum CBORError {
    /// The encoded argument does not fit in the destination width, a map's item count would
    /// overflow when doubled, or the additional information field is the indefinite marker
    /// (31) where a bounded numeric argument was expected.
    #[cfg_attr(any(feature = "full", test), error("Value overflows the destination width"))]
    Overflow,
    /// The item's major type does not match what the caller asked for, or an indefinite-length
    /// byte/text string was encountered (not supported).
    #[cfg_attr(any(feature = "full", test), error("Item type does not match what was requested"))]
    InvalidType,
    /// The buffer was exhausted before the current item could be fully read or written.
    #[cfg_attr(any(feature = "full", test), error("Buffer exhausted"))]
    EndOfBuffer,
    /// A recursive walk (skip, packed resolution, nested container entry) exceeded
    /// `RECURSION_MAX`.
    #[cfg_attr(any(feature = "full", test), error("Recursion limit exceeded"))]
    Recursion,
    /// The input is structurally malformed in a way not covered by a more specific variant,
    /// including an additional information field in the reserved range (28..=30).
    #[cfg_attr(any(feature = "full", test), error("Malformed CBOR encoding"))]
    Invalid,
    /// A lookup (map key, packed reference) found nothing matching.
    #[cfg_attr(any(feature = "full", test), error("Requested item not found"))]
    NotFound,
    /// A packed-CBOR tag 113 table definition was not a well-formed 2-element array.
    #[cfg(feature = "packed")]
    #[cfg_attr(any(feature = "full", test), error("Malformed packed-CBOR table definition"))]
    PackedFormat,
    /// Installing a new packed-CBOR shared item table would exceed `NESTED_TABLES_MAX`.
    #[cfg(feature = "packed")]
    #[cfg_attr(any(feature = "full", test), error("Packed-CBOR table stack exhausted"))]
    PackedMemory,
    /// A packed-CBOR reference index did not resolve to any entry in any active table.
    #[cfg(feature = "packed")]
    #[cfg_attr(
        any(feature = "full", test),
        error("Packed-CBOR reference does not resolve to any active table entry")
    )]
    PackedUndefinedReference,
}
