/***************************************************************************************************
 * Copyright (c) 2020-2023 Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all copies or
 * substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * tps_nanocbor CBOR wire format constants
 *
 * A fairly comprehensive, memory efficient, deserializer and serializer for CBOR (RFC8949).
 * This implementation is designed for use in constrained systems and requires neither the Rust
 * standard library nor an allocator.
 **************************************************************************************************/

/// Bit offset of the major type field within the initial byte.
pub const TYPE_OFFSET: u8 = 5;
/// Mask selecting the major type field of the initial byte.
pub const TYPE_MASK: u8 = 0xE0;
/// Mask selecting the additional information (`ai`) field of the initial byte.
pub const AI_MASK: u8 = 0x1F;

/// Major type 0: unsigned integer.
pub const TYPE_UINT: u8 = 0x00;
/// Major type 1: negative integer.
pub const TYPE_NINT: u8 = 0x01;
/// Major type 2: byte string.
pub const TYPE_BSTR: u8 = 0x02;
/// Major type 3: text string.
pub const TYPE_TSTR: u8 = 0x03;
/// Major type 4: array.
pub const TYPE_ARR: u8 = 0x04;
/// Major type 5: map.
pub const TYPE_MAP: u8 = 0x05;
/// Major type 6: tag.
pub const TYPE_TAG: u8 = 0x06;
/// Major type 7: floating-point numbers and simple values.
pub const TYPE_FLOAT: u8 = 0x07;

/// Initial byte with major type 0 and `ai` all zero.
pub const MASK_UINT: u8 = TYPE_UINT << TYPE_OFFSET;
/// Initial byte with major type 1 and `ai` all zero.
pub const MASK_NINT: u8 = TYPE_NINT << TYPE_OFFSET;
/// Initial byte with major type 2 and `ai` all zero.
pub const MASK_BSTR: u8 = TYPE_BSTR << TYPE_OFFSET;
/// Initial byte with major type 3 and `ai` all zero.
pub const MASK_TSTR: u8 = TYPE_TSTR << TYPE_OFFSET;
/// Initial byte with major type 4 and `ai` all zero.
pub const MASK_ARR: u8 = TYPE_ARR << TYPE_OFFSET;
/// Initial byte with major type 5 and `ai` all zero.
pub const MASK_MAP: u8 = TYPE_MAP << TYPE_OFFSET;
/// Initial byte with major type 6 and `ai` all zero.
pub const MASK_TAG: u8 = TYPE_TAG << TYPE_OFFSET;
/// Initial byte with major type 7 and `ai` all zero.
pub const MASK_FLOAT: u8 = TYPE_FLOAT << TYPE_OFFSET;

/// Simple value `false`.
pub const SIMPLE_FALSE: u8 = 20;
/// Simple value `true`.
pub const SIMPLE_TRUE: u8 = 21;
/// Simple value `null`.
pub const SIMPLE_NULL: u8 = 22;
/// Simple value `undefined`.
pub const SIMPLE_UNDEF: u8 = 23;

/// `ai` value indicating a 1-byte argument follows.
pub const SIZE_BYTE: u8 = 24;
/// `ai` value indicating a 2-byte argument follows.
pub const SIZE_SHORT: u8 = 25;
/// `ai` value indicating a 4-byte argument follows.
pub const SIZE_WORD: u8 = 26;
/// `ai` value indicating an 8-byte argument follows.
pub const SIZE_LONG: u8 = 27;
/// `ai` value marking an indefinite-length container, or the float-major break marker.
pub const SIZE_INDEFINITE: u8 = 31;

/// Tag 4: decimal fraction `[e, m]`.
pub const TAG_DEC_FRAC: u64 = 4;
/// Tag 113: packed-CBOR shared item table definition `[table, rump]`.
pub const TAG_PACKED_TABLE: u64 = 113;
/// Tag 6: packed-CBOR reference into the active shared item table stack.
pub const TAG_PACKED_REF_SHARED: u64 = 6;

/// Upper bound on nested container/tag/packed-reference recursion depth.
///
/// Every function that may recurse into a skip, a packed resolution, or a
/// nested container carries an explicit counter derived from this constant;
/// there is no implicit stack growth.
pub const RECURSION_MAX: u8 = 8;

/// Upper bound on the number of simultaneously active packed-CBOR shared item tables.
pub const NESTED_TABLES_MAX: usize = 8;

/// Decoder cursor flag: currently positioned inside an entered container.
pub const DECODER_FLAG_CONTAINER: u8 = 0x01;
/// Decoder cursor flag: the entered container is indefinite-length.
pub const DECODER_FLAG_INDEFINITE: u8 = 0x02;
/// Decoder cursor flag: packed-CBOR reference resolution is enabled for this cursor.
pub const DECODER_FLAG_PACKED_SUPPORT: u8 = 0x04;
/// Decoder cursor flag: this cursor was produced by following a packed reference, so
/// `leave_container` must advance the *outer* cursor past the reference rather than
/// past bytes inside the table it points into.
pub const DECODER_FLAG_SHARED: u8 = 0x08;
