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
 * tps_nanocbor CBOR head codec (C1)
 *
 * Decode and encode the 1-9 byte "initial byte + argument" that precedes every CBOR item.
 **************************************************************************************************/
use crate::constants::*;
use crate::error::{CBORError, Result};

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// Split an initial byte into its major type (top 3 bits, shifted down) and its
/// additional information field (low 5 bits).
#[inline]
pub(crate) fn split(ib: u8) -> (u8, u8) {
    (ib >> TYPE_OFFSET, ib & AI_MASK)
}

/// Decode the argument of an item whose initial byte is `buf[0]`, requiring its major type
/// to equal `want_type` and its size class (the `ai` field, when `ai >= 24`) to be no larger
/// than `max_size_class`.
///
/// On success returns `(value, bytes_consumed)` where `bytes_consumed` includes the initial
/// byte itself. `max_size_class` is one of [`SIZE_BYTE`], [`SIZE_SHORT`], [`SIZE_WORD`] or
/// [`SIZE_LONG`], bounding the destination width the caller intends to decode into. The
/// reserved `ai` range 28..=30 is always [`CBORError::Invalid`], regardless of
/// `max_size_class`; an `ai` field larger than `max_size_class` but within the valid numeric
/// size classes (or the indefinite marker 31) is reported as [`CBORError::Overflow`].
pub(crate) fn decode_uint(buf: &[u8], max_size_class: u8, want_type: u8) -> Result<(u64, usize)> {
    let ib = *buf.first().ok_or(CBORError::EndOfBuffer)?;
    let (mtype, ai) = split(ib);
    if mtype != want_type {
        return Err(CBORError::InvalidType);
    }
    if ai < SIZE_BYTE {
        return Ok((ai as u64, 1));
    }
    if ai > SIZE_LONG && ai != SIZE_INDEFINITE {
        // 28..=30 are reserved, not a numeric size class at all: invalid regardless of the
        // caller's destination width, distinct from a well-formed-but-too-wide argument.
        return Err(CBORError::Invalid);
    }
    if ai > max_size_class {
        return Err(CBORError::Overflow);
    }
    let nbytes = 1usize << (ai - SIZE_BYTE);
    if buf.len() < 1 + nbytes {
        return Err(CBORError::EndOfBuffer);
    }
    let mut be = [0u8; 8];
    be[8 - nbytes..].copy_from_slice(&buf[1..1 + nbytes]);
    Ok((u64::from_be_bytes(be), 1 + nbytes))
}

/// Inspect the major type of the item at `buf[0]` without consuming anything.
#[inline]
pub(crate) fn peek_type(buf: &[u8]) -> Result<u8> {
    let ib = *buf.first().ok_or(CBORError::EndOfBuffer)?;
    Ok(ib >> TYPE_OFFSET)
}

/// A head encoded into a small inline buffer, ready to be handed to an encoder sink.
pub(crate) struct EncodedHead {
    pub bytes: [u8; 9],
    pub len: usize,
}

/// Choose the smallest of `{0,1,2,4,8}` extra bytes that holds `value`, and encode the initial
/// byte (`type_mask | size_class`) followed by the big-endian argument.
#[cfg_attr(feature = "trace", trace)]
pub(crate) fn encode_uint(value: u64, type_mask: u8) -> EncodedHead {
    let mut bytes = [0u8; 9];
    if value < SIZE_BYTE as u64 {
        bytes[0] = type_mask | value as u8;
        return EncodedHead { bytes, len: 1 };
    }
    let (size_class, extra): (u8, usize) = if value > u32::MAX as u64 {
        (SIZE_LONG, 8)
    } else if value > u16::MAX as u64 {
        (SIZE_WORD, 4)
    } else if value > u8::MAX as u64 {
        (SIZE_SHORT, 2)
    } else {
        (SIZE_BYTE, 1)
    };
    bytes[0] = type_mask | size_class;
    bytes[1..1 + extra].copy_from_slice(&value.to_be_bytes()[8 - extra..]);
    EncodedHead { bytes, len: 1 + extra }
}

/// Encode a single-byte head with no argument (used for `true`/`false`/`null`/`undefined`
/// and the indefinite-length and break markers).
#[inline]
pub(crate) fn encode_single(byte: u8) -> EncodedHead {
    let mut bytes = [0u8; 9];
    bytes[0] = byte;
    EncodedHead { bytes, len: 1 }
}
