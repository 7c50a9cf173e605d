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
 * tps_nanocbor streaming encoder: sink polymorphism (C6) and typed formatters (C7)
 *
 * Every formatter follows the same shape: account for `n` bytes in `len` unconditionally, ask
 * the sink whether `n` more bytes fit, and hand the bytes over only if they do. This makes a
 * null-sink sizing pass followed by a real-sink encoding pass produce byte-identical output,
 * because `len` never depends on whether the sink actually accepted anything.
 **************************************************************************************************/
use crate::constants::*;
use crate::error::{CBORError, Result};
use crate::head;

#[cfg(feature = "float")]
use crate::float;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// The polymorphism seam between the encoder and whatever ultimately stores its output.
///
/// A sink must be consulted with [`Sink::fits`] before every [`Sink::append`]; the encoder
/// never calls `append` with a length `fits` has not just approved.
pub trait Sink {
    /// Report whether `n` more bytes can currently be accepted.
    fn fits(&mut self, n: usize) -> bool;
    /// Accept `bytes`, whose length was already approved by a preceding call to `fits`.
    fn append(&mut self, bytes: &[u8]);
}

/// A bounded in-memory sink: the built-in [`Sink`] implementation backing [`Encoder::new`].
pub struct MemoryBuffer<'buf> {
    buf: &'buf mut [u8],
    cur: usize,
}

impl<'buf> MemoryBuffer<'buf> {
    /// Wrap `buf` for use as an encoder sink; writes start at offset 0.
    pub fn new(buf: &'buf mut [u8]) -> Self {
        MemoryBuffer { buf, cur: 0 }
    }

    /// Bytes written so far.
    pub fn written(&self) -> usize {
        self.cur
    }

    /// The slice of `buf` written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.cur]
    }
}

impl<'buf> Sink for MemoryBuffer<'buf> {
    #[inline]
    fn fits(&mut self, n: usize) -> bool {
        self.buf.len() - self.cur >= n
    }

    #[inline]
    fn append(&mut self, bytes: &[u8]) {
        let end = self.cur + bytes.len();
        self.buf[self.cur..end].copy_from_slice(bytes);
        self.cur = end;
    }
}

/// A sink that accepts every append without storing anything, so that encoding against it
/// computes only the length the real encoding would need. Pair with [`Encoder::encoded_len`]
/// for the two-pass "size, then allocate, then re-encode" idiom described in the module docs.
pub struct NullSink;

impl Sink for NullSink {
    #[inline]
    fn fits(&mut self, _n: usize) -> bool {
        true
    }

    #[inline]
    fn append(&mut self, _bytes: &[u8]) {}
}

/// A streaming CBOR encoder: a typed formatter surface (C7) over a polymorphic byte sink (C6).
///
/// `len` accumulates the logical encoded length unconditionally, even for bytes the sink
/// rejected, so that a sink reporting "does not fit" still leaves `encoded_len()` accurate.
pub struct Encoder<S: Sink> {
    sink: S,
    len: usize,
}

impl<'buf> Encoder<MemoryBuffer<'buf>> {
    /// Create an encoder writing into the bounded in-memory buffer `buf`.
    pub fn new(buf: &'buf mut [u8]) -> Self {
        Encoder { sink: MemoryBuffer::new(buf), len: 0 }
    }

    /// The slice of the underlying buffer written so far.
    pub fn as_slice(&self) -> &[u8] {
        self.sink.as_slice()
    }
}

impl Encoder<NullSink> {
    /// Create a dry-run encoder: every formatter succeeds and contributes to
    /// [`Encoder::encoded_len`], but no bytes are stored anywhere. Used to size a buffer
    /// before a second, real encoding pass.
    pub fn sizer() -> Self {
        Encoder { sink: NullSink, len: 0 }
    }
}

impl<S: Sink> Encoder<S> {
    /// Wrap a caller-supplied sink (e.g. an `append`/`fits` callback pair).
    pub fn with_sink(sink: S) -> Self {
        Encoder { sink, len: 0 }
    }

    /// Total bytes logically emitted so far, whether or not the sink accepted them all.
    pub fn encoded_len(&self) -> usize {
        self.len
    }

    fn emit(&mut self, bytes: &[u8]) -> Result<usize> {
        self.len += bytes.len();
        if self.sink.fits(bytes.len()) {
            self.sink.append(bytes);
            Ok(bytes.len())
        } else {
            Err(CBORError::EndOfBuffer)
        }
    }

    fn emit_head(&mut self, head: head::EncodedHead) -> Result<usize> {
        self.emit(&head.bytes[..head.len])
    }

    /// Encode a boolean as the `true`/`false` simple value.
    #[cfg_attr(feature = "trace", trace)]
    pub fn fmt_bool(&mut self, content: bool) -> Result<usize> {
        let simple = if content { SIMPLE_TRUE } else { SIMPLE_FALSE };
        self.emit_head(head::encode_single(MASK_FLOAT | simple))
    }

    /// Encode the `null` simple value.
    pub fn fmt_null(&mut self) -> Result<usize> {
        self.emit_head(head::encode_single(MASK_FLOAT | SIMPLE_NULL))
    }

    /// Encode the `undefined` simple value.
    pub fn fmt_undefined(&mut self) -> Result<usize> {
        self.emit_head(head::encode_single(MASK_FLOAT | SIMPLE_UNDEF))
    }

    /// Encode an unsigned integer using the smallest head that holds it.
    pub fn fmt_uint(&mut self, num: u64) -> Result<usize> {
        self.emit_head(head::encode_uint(num, MASK_UINT))
    }

    /// Encode a signed integer, mapping negative values to the `nint` major type as `-1 - n`.
    pub fn fmt_int(&mut self, num: i64) -> Result<usize> {
        if num < 0 {
            self.emit_head(head::encode_uint((-(num + 1)) as u64, MASK_NINT))
        } else {
            self.fmt_uint(num as u64)
        }
    }

    /// Encode a tag head (major type 6); the caller is responsible for following it with
    /// exactly one tagged item.
    pub fn fmt_tag(&mut self, num: u64) -> Result<usize> {
        self.emit_head(head::encode_uint(num, MASK_TAG))
    }

    /// Encode a simple value. Rejects `20..=31`, which are either assigned to `false`/`true`/
    /// `null`/`undefined` or reserved for the indefinite-length marker.
    pub fn fmt_simple(&mut self, value: u8) -> Result<usize> {
        if (SIMPLE_FALSE..=SIZE_INDEFINITE).contains(&value) {
            return Err(CBORError::InvalidType);
        }
        self.emit_head(head::encode_uint(value as u64, MASK_FLOAT))
    }

    /// Encode a byte string head declaring `len` bytes of payload to follow.
    pub fn fmt_bstr(&mut self, len: usize) -> Result<usize> {
        self.emit_head(head::encode_uint(len as u64, MASK_BSTR))
    }

    /// Encode a text string head declaring `len` bytes of payload to follow.
    pub fn fmt_tstr(&mut self, len: usize) -> Result<usize> {
        self.emit_head(head::encode_uint(len as u64, MASK_TSTR))
    }

    /// Encode a byte string head and its payload together.
    pub fn put_bstr(&mut self, data: &[u8]) -> Result<usize> {
        let head_len = self.fmt_bstr(data.len())?;
        let body_len = self.emit(data)?;
        Ok(head_len + body_len)
    }

    /// Encode a text string head and its UTF-8 payload together.
    pub fn put_tstr(&mut self, s: &str) -> Result<usize> {
        let head_len = self.fmt_tstr(s.len())?;
        let body_len = self.emit(s.as_bytes())?;
        Ok(head_len + body_len)
    }

    /// Encode a definite-length array head for exactly `len` elements. The caller must emit
    /// exactly `len` items; no closing call is required.
    pub fn fmt_array(&mut self, len: usize) -> Result<usize> {
        self.emit_head(head::encode_uint(len as u64, MASK_ARR))
    }

    /// Encode a definite-length map head for exactly `len` key/value pairs. The caller must
    /// emit exactly `2 * len` items (alternating key, value); no closing call is required.
    pub fn fmt_map(&mut self, len: usize) -> Result<usize> {
        self.emit_head(head::encode_uint(len as u64, MASK_MAP))
    }

    /// Open an indefinite-length array, to be closed with [`Encoder::fmt_end_indefinite`].
    pub fn fmt_array_indefinite(&mut self) -> Result<usize> {
        self.emit_head(head::encode_single(MASK_ARR | SIZE_INDEFINITE))
    }

    /// Open an indefinite-length map, to be closed with [`Encoder::fmt_end_indefinite`].
    pub fn fmt_map_indefinite(&mut self) -> Result<usize> {
        self.emit_head(head::encode_single(MASK_MAP | SIZE_INDEFINITE))
    }

    /// Emit the `0xff` break marker closing an indefinite array or map.
    pub fn fmt_end_indefinite(&mut self) -> Result<usize> {
        self.emit_head(head::encode_single(MASK_FLOAT | SIZE_INDEFINITE))
    }

    /// Encode tag 4 (decimal fraction) applied to the 2-element array `[e, m]`.
    pub fn fmt_decimal_frac(&mut self, e: i32, m: i32) -> Result<usize> {
        let mut total = self.fmt_tag(TAG_DEC_FRAC)?;
        total += self.fmt_array(2)?;
        total += self.fmt_int(e as i64)?;
        total += self.fmt_int(m as i64)?;
        Ok(total)
    }

    #[cfg(feature = "float")]
    fn fmt_halffloat(&mut self, half: u16) -> Result<usize> {
        let mut bytes = [0u8; 3];
        bytes[0] = MASK_FLOAT | SIZE_SHORT;
        bytes[1..].copy_from_slice(&half.to_be_bytes());
        self.emit(&bytes)
    }

    /// Encode a single-precision float, narrowing losslessly to half precision when possible
    /// (per the rule in [`crate::float::f32_to_half_bits`]).
    #[cfg(feature = "float")]
    pub fn fmt_float(&mut self, num: f32) -> Result<usize> {
        if let Some(half) = float::f32_to_half_bits(num) {
            return self.fmt_halffloat(half);
        }
        let mut bytes = [0u8; 5];
        bytes[0] = MASK_FLOAT | SIZE_WORD;
        bytes[1..].copy_from_slice(&num.to_bits().to_be_bytes());
        self.emit(&bytes)
    }

    /// Encode a double-precision float, narrowing losslessly to single (and, transitively,
    /// half) precision when possible.
    #[cfg(feature = "float")]
    pub fn fmt_double(&mut self, num: f64) -> Result<usize> {
        if let Some(single) = float::f64_to_single(num) {
            return self.fmt_float(single);
        }
        let mut bytes = [0u8; 9];
        bytes[0] = MASK_FLOAT | SIZE_LONG;
        bytes[1..].copy_from_slice(&num.to_bits().to_be_bytes());
        self.emit(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smallest_head_chosen_for_uint() {
        let mut buf = [0u8; 16];
        let mut enc = Encoder::new(&mut buf);
        assert_eq!(enc.fmt_uint(23).unwrap(), 1);
        assert_eq!(enc.fmt_uint(255).unwrap(), 2);
        assert_eq!(enc.fmt_uint(65535).unwrap(), 3);
        assert_eq!(enc.fmt_uint(u32::MAX as u64).unwrap(), 5);
        assert_eq!(enc.fmt_uint(u32::MAX as u64 + 1).unwrap(), 9);
    }

    #[test]
    fn negative_int_maps_to_nint() {
        let mut buf = [0u8; 8];
        let mut enc = Encoder::new(&mut buf);
        enc.fmt_int(-1).unwrap();
        assert_eq!(enc.as_slice(), &[0x20]);
    }

    #[test]
    fn bool_null_undefined() {
        let mut buf = [0u8; 8];
        let mut enc = Encoder::new(&mut buf);
        enc.fmt_bool(true).unwrap();
        enc.fmt_bool(false).unwrap();
        enc.fmt_null().unwrap();
        enc.fmt_undefined().unwrap();
        assert_eq!(enc.as_slice(), &[0xf5, 0xf4, 0xf6, 0xf7]);
    }

    #[test]
    fn simple_rejects_reserved_range() {
        let mut buf = [0u8; 8];
        let mut enc = Encoder::new(&mut buf);
        assert!(matches!(enc.fmt_simple(20), Err(CBORError::InvalidType)));
        assert!(matches!(enc.fmt_simple(31), Err(CBORError::InvalidType)));
        assert!(enc.fmt_simple(32).is_ok());
    }

    #[test]
    fn tstr_and_bstr_round_trip_bytes() {
        let mut buf = [0u8; 16];
        let mut enc = Encoder::new(&mut buf);
        enc.put_tstr("ab").unwrap();
        assert_eq!(enc.as_slice(), &[0x62, b'a', b'b']);
    }

    #[test]
    fn indefinite_array_with_break() {
        let mut buf = [0u8; 8];
        let mut enc = Encoder::new(&mut buf);
        enc.fmt_array_indefinite().unwrap();
        enc.fmt_uint(1).unwrap();
        enc.fmt_end_indefinite().unwrap();
        assert_eq!(enc.as_slice(), &[0x9f, 0x01, 0xff]);
    }

    #[test]
    fn decimal_frac_matches_spec_scenario() {
        // c4 82 21 19 6a b3 == tag(4)[-2, 27315]
        let mut buf = [0u8; 16];
        let mut enc = Encoder::new(&mut buf);
        enc.fmt_decimal_frac(-2, 27315).unwrap();
        assert_eq!(enc.as_slice(), &[0xc4, 0x82, 0x21, 0x19, 0x6a, 0xb3]);
    }

    #[test]
    fn null_sink_sizes_then_real_sink_matches() {
        let mut sizer = Encoder::sizer();
        sizer.fmt_array(3).unwrap();
        sizer.fmt_uint(1).unwrap();
        sizer.fmt_uint(2).unwrap();
        sizer.fmt_uint(u32::MAX as u64 + 1).unwrap();
        let needed = sizer.encoded_len();

        let mut storage = [0u8; 32];
        let mut real = Encoder::new(&mut storage[..needed]);
        real.fmt_array(3).unwrap();
        real.fmt_uint(1).unwrap();
        real.fmt_uint(2).unwrap();
        real.fmt_uint(u32::MAX as u64 + 1).unwrap();
        assert_eq!(real.encoded_len(), needed);
        assert_eq!(real.as_slice().len(), needed);
    }

    #[test]
    fn end_of_buffer_still_accounts_for_len() {
        let mut buf = [0u8; 1];
        let mut enc = Encoder::new(&mut buf);
        assert!(matches!(enc.fmt_uint(u16::MAX as u64).unwrap_err(), CBORError::EndOfBuffer));
        assert_eq!(enc.encoded_len(), 3);
    }
}
