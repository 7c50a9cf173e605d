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
 * tps_nanocbor streaming decoder cursor (C3) and container traversal (C4)
 *
 * The cursor walks an in-place byte buffer without copying. It never allocates and never
 * panics on malformed input; every operation returns a `Result`.
 **************************************************************************************************/
use crate::constants::*;
use crate::error::{CBORError, Result};
use crate::head;

/// Major type codes returned by [`Cursor::get_type`], re-exported for callers that need to
/// dispatch on the raw major type (e.g. a pretty-printer) rather than calling a typed getter.
pub use crate::constants::{
    TYPE_ARR, TYPE_BSTR, TYPE_FLOAT, TYPE_MAP, TYPE_NINT, TYPE_TAG, TYPE_TSTR, TYPE_UINT,
};

#[cfg(feature = "packed")]
use crate::packed;

#[cfg(feature = "float")]
use crate::float;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// One active packed-CBOR shared item table: the verbatim bytes of a CBOR array (its head
/// plus all of its elements), captured when a tag 113 table definition is consumed.
#[derive(Copy, Clone, Debug)]
#[cfg(feature = "packed")]
pub(crate) struct PackedTable<'buf> {
    pub(crate) bytes: &'buf [u8],
}

/// A cursor over a CBOR byte buffer.
///
/// `buf` always represents the window `[cur, end)` of the conceptual C cursor: its start is
/// the current read position and its length reaches the end of the addressable input.
/// Advancing the cursor reslices `buf` from the front; there is no separate `cur`/`end` pair
/// to keep synchronized. Cursors are plain `Copy` values; they borrow the input and never own
/// it, and have no destructor.
#[derive(Copy, Clone)]
pub struct Cursor<'buf> {
    pub(crate) buf: &'buf [u8],
    pub(crate) remaining: u64,
    pub(crate) flags: u8,
    #[cfg(feature = "packed")]
    pub(crate) tables: [Option<PackedTable<'buf>>; NESTED_TABLES_MAX],
}

impl<'buf> Cursor<'buf> {
    /// Create a top-level cursor over `buf`. Packed-CBOR resolution is disabled.
    #[cfg_attr(feature = "trace", trace)]
    pub fn init(buf: &'buf [u8]) -> Cursor<'buf> {
        Cursor {
            buf,
            remaining: 0,
            flags: 0,
            #[cfg(feature = "packed")]
            tables: [None; NESTED_TABLES_MAX],
        }
    }

    /// Create a top-level cursor over `buf` with transparent packed-CBOR reference
    /// resolution enabled and an empty table stack.
    #[cfg(feature = "packed")]
    #[cfg_attr(feature = "trace", trace)]
    pub fn init_packed(buf: &'buf [u8]) -> Cursor<'buf> {
        let mut cursor = Cursor::init(buf);
        cursor.flags = DECODER_FLAG_PACKED_SUPPORT;
        cursor
    }

    /// As [`Cursor::init_packed`], additionally installing one outer shared item table by
    /// interpreting `table_buf` as a CBOR array. Fails with [`CBORError::PackedFormat`] if
    /// `table_buf` is not a well-formed array.
    #[cfg(feature = "packed")]
    #[cfg_attr(feature = "trace", trace)]
    pub fn init_packed_with_table(buf: &'buf [u8], table_buf: &'buf [u8]) -> Result<Cursor<'buf>> {
        let mut cursor = Cursor::init_packed(buf);
        let probe = Cursor::init(table_buf);
        if probe.bare_type()? != TYPE_ARR {
            return Err(CBORError::PackedFormat);
        }
        cursor.tables[0] = Some(PackedTable { bytes: table_buf });
        Ok(cursor)
    }

    /// True if this cursor is currently positioned inside an entered array or map.
    #[inline]
    pub fn in_container(&self) -> bool {
        self.flags & DECODER_FLAG_CONTAINER != 0
    }

    /// True if the container this cursor is positioned in is indefinite-length.
    #[inline]
    pub fn container_indefinite(&self) -> bool {
        self.flags & DECODER_FLAG_INDEFINITE != 0
    }

    /// Number of logical items still expected in the enclosing container; meaningless
    /// outside of one.
    #[inline]
    pub fn container_remaining(&self) -> u64 {
        self.remaining
    }

    /// Remaining array element count: identical to [`Cursor::container_remaining`].
    #[inline]
    pub fn array_items_remaining(&self) -> u64 {
        self.remaining
    }

    /// Remaining map pair count: half of [`Cursor::container_remaining`], since each map
    /// entry consumes one unit of `remaining` for the key and one for the value.
    #[inline]
    pub fn map_items_remaining(&self) -> u64 {
        self.remaining / 2
    }

    #[inline]
    fn over_end(&self) -> bool {
        self.buf.is_empty()
    }

    /// True if no further items can be read from this cursor: the buffer is exhausted, or
    /// an indefinite container's next byte is the break marker, or a definite container has
    /// no items left.
    #[cfg_attr(feature = "trace", trace)]
    pub fn at_end(&self) -> bool {
        if self.over_end() {
            return true;
        }
        if self.container_indefinite() {
            return self.buf[0] == (MASK_FLOAT | SIZE_INDEFINITE);
        }
        self.in_container() && self.remaining == 0
    }

    #[inline]
    fn advance(&mut self, n: usize) {
        self.buf = &self.buf[n..];
        self.remaining = self.remaining.wrapping_sub(1);
    }

    #[inline]
    fn advance_if(&mut self, res: Result<usize>) -> Result<usize> {
        if let Ok(n) = res {
            self.advance(n);
        }
        res
    }

    /// Match the buffer's next byte exactly against `val`, advancing past it on success.
    pub(crate) fn value_match_exact(&mut self, val: u8) -> Result<()> {
        if self.over_end() {
            return Err(CBORError::EndOfBuffer);
        }
        if self.buf[0] == val {
            self.advance(1);
            Ok(())
        } else {
            Err(CBORError::InvalidType)
        }
    }

    /// Major type of the byte at the front of the buffer, without any packed resolution.
    pub(crate) fn bare_type(&self) -> Result<u8> {
        if self.over_end() {
            return Err(CBORError::EndOfBuffer);
        }
        head::peek_type(self.buf)
    }

    /// Decode the argument of the item at the front of the buffer, without packed
    /// resolution, requiring major type `want_type` and a size class no larger than
    /// `max_size_class`. Does not advance the cursor.
    pub(crate) fn decode_uint_bare(&self, max_size_class: u8, want_type: u8) -> Result<(u64, usize)> {
        head::decode_uint(self.buf, max_size_class, want_type)
    }

    /// As [`Cursor::decode_uint_bare`], but accepts either unsigned or negative integers and
    /// maps a negative encoding `NANOCBOR_TYPE_NINT` to `-1 - u`. Does not advance the cursor.
    pub(crate) fn decode_int_bare(&self, max_size_class: u8) -> Result<(i64, usize)> {
        let ctype = self.bare_type()?;
        if ctype != TYPE_NINT && ctype != TYPE_UINT {
            return Err(CBORError::InvalidType);
        }
        let (magnitude, consumed) = self.decode_uint_bare(max_size_class, ctype)?;
        let value = if ctype == TYPE_NINT {
            if magnitude > i64::MAX as u64 {
                return Err(CBORError::Overflow);
            }
            -1 - magnitude as i64
        } else {
            if magnitude > i64::MAX as u64 {
                return Err(CBORError::Overflow);
            }
            magnitude as i64
        };
        Ok((value, consumed))
    }

    /// Return the major type of the current item (after transparent packed-CBOR resolution,
    /// if enabled), or [`CBORError::EndOfBuffer`] if the cursor is exhausted.
    #[cfg_attr(feature = "trace", trace)]
    pub fn get_type(&self) -> Result<u8> {
        if self.at_end() {
            return Err(CBORError::EndOfBuffer);
        }
        #[cfg(feature = "packed")]
        {
            match packed::try_follow(self) {
                Some(Ok(resolved)) => return resolved.bare_type(),
                Some(Err(e)) => return Err(e),
                None => {}
            }
        }
        self.bare_type()
    }

    fn get_and_advance_uint8(&mut self, want_type: u8) -> Result<u8> {
        #[cfg(feature = "packed")]
        {
            match packed::try_follow(self) {
                Some(Ok(resolved)) => {
                    let mut resolved = resolved;
                    let value = resolved.get_and_advance_uint8(want_type)?;
                    self.skip()?;
                    return Ok(value);
                }
                Some(Err(e)) => return Err(e),
                None => {}
            }
        }
        let (value, consumed) = self.decode_uint_bare(SIZE_BYTE, want_type)?;
        self.advance(consumed);
        Ok(value as u8)
    }

    fn get_and_advance_uint16(&mut self, want_type: u8) -> Result<u16> {
        #[cfg(feature = "packed")]
        {
            match packed::try_follow(self) {
                Some(Ok(resolved)) => {
                    let mut resolved = resolved;
                    let value = resolved.get_and_advance_uint16(want_type)?;
                    self.skip()?;
                    return Ok(value);
                }
                Some(Err(e)) => return Err(e),
                None => {}
            }
        }
        let (value, consumed) = self.decode_uint_bare(SIZE_SHORT, want_type)?;
        self.advance(consumed);
        Ok(value as u16)
    }

    fn get_and_advance_uint32(&mut self, want_type: u8) -> Result<u32> {
        #[cfg(feature = "packed")]
        {
            match packed::try_follow(self) {
                Some(Ok(resolved)) => {
                    let mut resolved = resolved;
                    let value = resolved.get_and_advance_uint32(want_type)?;
                    self.skip()?;
                    return Ok(value);
                }
                Some(Err(e)) => return Err(e),
                None => {}
            }
        }
        let (value, consumed) = self.decode_uint_bare(SIZE_WORD, want_type)?;
        self.advance(consumed);
        Ok(value as u32)
    }

    fn get_and_advance_uint64(&mut self, want_type: u8) -> Result<u64> {
        #[cfg(feature = "packed")]
        {
            match packed::try_follow(self) {
                Some(Ok(resolved)) => {
                    let mut resolved = resolved;
                    let value = resolved.get_and_advance_uint64(want_type)?;
                    self.skip()?;
                    return Ok(value);
                }
                Some(Err(e)) => return Err(e),
                None => {}
            }
        }
        let (value, consumed) = self.decode_uint_bare(SIZE_LONG, want_type)?;
        self.advance(consumed);
        Ok(value)
    }

    /// Decode a positive integer no wider than a byte. Fails [`CBORError::InvalidType`] on
    /// the wrong major type, [`CBORError::Overflow`] if the encoded value does not fit.
    pub fn get_uint8(&mut self) -> Result<u8> {
        self.get_and_advance_uint8(TYPE_UINT)
    }

    /// As [`Cursor::get_uint8`], for a 16-bit destination.
    pub fn get_uint16(&mut self) -> Result<u16> {
        self.get_and_advance_uint16(TYPE_UINT)
    }

    /// As [`Cursor::get_uint8`], for a 32-bit destination.
    pub fn get_uint32(&mut self) -> Result<u32> {
        self.get_and_advance_uint32(TYPE_UINT)
    }

    /// As [`Cursor::get_uint8`], for a 64-bit destination.
    pub fn get_uint64(&mut self) -> Result<u64> {
        self.get_and_advance_uint64(TYPE_UINT)
    }

    fn get_and_advance_int64(&mut self, max_size_class: u8, bound: i64) -> Result<i64> {
        #[cfg(feature = "packed")]
        {
            match packed::try_follow(self) {
                Some(Ok(resolved)) => {
                    let mut resolved = resolved;
                    let value = resolved.get_and_advance_int64(max_size_class, bound)?;
                    self.skip()?;
                    return Ok(value);
                }
                Some(Err(e)) => return Err(e),
                None => {}
            }
        }
        let (value, consumed) = self.decode_int_bare(max_size_class)?;
        if value > bound || value < -1 - bound {
            return Err(CBORError::Overflow);
        }
        self.advance(consumed);
        Ok(value)
    }

    /// Decode a signed integer no wider than a byte (`-128..=127`). Negative values are
    /// encoded in CBOR as `-1 - u`.
    pub fn get_int8(&mut self) -> Result<i8> {
        self.get_and_advance_int64(SIZE_BYTE, i8::MAX as i64).map(|v| v as i8)
    }

    /// As [`Cursor::get_int8`], for a 16-bit destination.
    pub fn get_int16(&mut self) -> Result<i16> {
        self.get_and_advance_int64(SIZE_SHORT, i16::MAX as i64).map(|v| v as i16)
    }

    /// As [`Cursor::get_int8`], for a 32-bit destination.
    pub fn get_int32(&mut self) -> Result<i32> {
        self.get_and_advance_int64(SIZE_WORD, i32::MAX as i64).map(|v| v as i32)
    }

    /// As [`Cursor::get_int8`], for a 64-bit destination.
    pub fn get_int64(&mut self) -> Result<i64> {
        self.get_and_advance_int64(SIZE_LONG, i64::MAX)
    }

    /// Decode a tag head (major type 6) without advancing into its content, returning the
    /// tag number truncated to 32 bits.
    pub fn get_tag(&mut self) -> Result<u32> {
        self.get_and_advance_uint32(TYPE_TAG)
    }

    /// As [`Cursor::get_tag`], preserving the full 64-bit tag number.
    pub fn get_tag64(&mut self) -> Result<u64> {
        self.get_and_advance_uint64(TYPE_TAG)
    }

    fn get_str(&mut self, want_type: u8) -> Result<&'buf [u8]> {
        #[cfg(feature = "packed")]
        {
            let mut probe = *self;
            match packed::try_follow(&probe) {
                Some(Ok(resolved)) => {
                    probe = resolved;
                    let value = probe.get_str(want_type)?;
                    self.skip()?;
                    return Ok(value);
                }
                Some(Err(e)) => return Err(e),
                None => {}
            }
        }
        if self.over_end() {
            return Err(CBORError::EndOfBuffer);
        }
        let ib = self.buf[0];
        let (mtype, ai) = head::split(ib);
        if mtype != want_type {
            return Err(CBORError::InvalidType);
        }
        if ai == SIZE_INDEFINITE {
            // Indefinite-length byte/text strings are not supported.
            return Err(CBORError::InvalidType);
        }
        let (len, head_len) = self.decode_uint_bare(SIZE_LONG, want_type)?;
        let len = len as usize;
        if self.buf.len() < head_len + len {
            return Err(CBORError::EndOfBuffer);
        }
        let payload = &self.buf[head_len..head_len + len];
        self.advance(head_len + len);
        Ok(payload)
    }

    /// Return a borrowed slice over the byte string payload and advance past it.
    pub fn get_bstr(&mut self) -> Result<&'buf [u8]> {
        self.get_str(TYPE_BSTR)
    }

    /// Return a borrowed slice over the text string payload and advance past it. The bytes
    /// are not validated as UTF-8; callers needing a `&str` should validate explicitly.
    pub fn get_tstr(&mut self) -> Result<&'buf [u8]> {
        self.get_str(TYPE_TSTR)
    }

    fn get_simple_exact(&mut self, want: u8) -> Result<()> {
        #[cfg(feature = "packed")]
        {
            match packed::try_follow(self) {
                Some(Ok(resolved)) => {
                    let mut resolved = resolved;
                    resolved.get_simple_exact(want)?;
                    self.skip()?;
                    return Ok(());
                }
                Some(Err(e)) => return Err(e),
                None => {}
            }
        }
        self.value_match_exact(MASK_FLOAT | want)
    }

    /// Match and consume the `null` simple value.
    pub fn get_null(&mut self) -> Result<()> {
        self.get_simple_exact(SIMPLE_NULL)
    }

    /// Match and consume the `undefined` simple value.
    pub fn get_undefined(&mut self) -> Result<()> {
        self.get_simple_exact(SIMPLE_UNDEF)
    }

    /// Decode a `true`/`false` simple value.
    pub fn get_bool(&mut self) -> Result<bool> {
        #[cfg(feature = "packed")]
        {
            match packed::try_follow(self) {
                Some(Ok(resolved)) => {
                    let mut resolved = resolved;
                    let value = resolved.get_bool()?;
                    self.skip()?;
                    return Ok(value);
                }
                Some(Err(e)) => return Err(e),
                None => {}
            }
        }
        if self.value_match_exact(MASK_FLOAT | SIMPLE_FALSE).is_ok() {
            return Ok(false);
        }
        self.value_match_exact(MASK_FLOAT | SIMPLE_TRUE)?;
        Ok(true)
    }

    /// Decode a bare simple value (any major type 7 item whose `ai` is not a float size
    /// class): its 1-byte numeric content.
    pub fn get_simple(&mut self) -> Result<u8> {
        match self.get_and_advance_uint8(TYPE_FLOAT) {
            Ok(v) => Ok(v),
            Err(CBORError::Overflow) => Err(CBORError::InvalidType),
            Err(e) => Err(e),
        }
    }

    #[cfg(feature = "float")]
    fn decode_half_float(&mut self) -> Result<f32> {
        let (tmp, consumed) = self.decode_uint_bare(SIZE_SHORT, TYPE_FLOAT)?;
        if consumed == 1 + 2 {
            self.advance(consumed);
            Ok(float::half_bits_to_f32(tmp as u16))
        } else {
            Err(CBORError::InvalidType)
        }
    }

    #[cfg(feature = "float")]
    fn decode_single_float(&mut self) -> Result<f32> {
        let (tmp, consumed) = self.decode_uint_bare(SIZE_WORD, TYPE_FLOAT)?;
        if consumed == 1 + 4 {
            self.advance(consumed);
            Ok(f32::from_bits(tmp as u32))
        } else {
            Err(CBORError::InvalidType)
        }
    }

    #[cfg(feature = "float")]
    fn decode_double_float(&mut self) -> Result<f64> {
        let (tmp, consumed) = self.decode_uint_bare(SIZE_LONG, TYPE_FLOAT)?;
        if consumed == 1 + 8 {
            self.advance(consumed);
            Ok(f64::from_bits(tmp))
        } else {
            Err(CBORError::InvalidType)
        }
    }

    /// Decode a half- or single-precision float, widening a half to `f32`.
    #[cfg(feature = "float")]
    pub fn get_float(&mut self) -> Result<f32> {
        #[cfg(feature = "packed")]
        {
            match packed::try_follow(self) {
                Some(Ok(resolved)) => {
                    let mut resolved = resolved;
                    let value = resolved.get_float()?;
                    self.skip()?;
                    return Ok(value);
                }
                Some(Err(e)) => return Err(e),
                None => {}
            }
        }
        match self.decode_half_float() {
            Ok(v) => Ok(v),
            Err(_) => self.decode_single_float(),
        }
    }

    /// Decode a half-, single- or double-precision float, widening to `f64`.
    #[cfg(feature = "float")]
    pub fn get_double(&mut self) -> Result<f64> {
        #[cfg(feature = "packed")]
        {
            match packed::try_follow(self) {
                Some(Ok(resolved)) => {
                    let mut resolved = resolved;
                    let value = resolved.get_double()?;
                    self.skip()?;
                    return Ok(value);
                }
                Some(Err(e)) => return Err(e),
                None => {}
            }
        }
        if let Ok(v) = self.get_float() {
            return Ok(v as f64);
        }
        self.decode_double_float()
    }

    /// Decode tag 4 (decimal fraction) followed by a 2-element array `[e, m]`.
    pub fn get_decimal_frac(&mut self) -> Result<(i32, i32)> {
        let tag = self.get_tag()?;
        if tag as u64 != TAG_DEC_FRAC {
            return Err(CBORError::InvalidType);
        }
        let mut arr = self.enter_array()?;
        let e = arr.get_int32()?;
        let m = arr.get_int32()?;
        self.leave_container(&arr)?;
        Ok((e, m))
    }

    fn enter_container(&self, want_type: u8) -> Result<Cursor<'buf>> {
        #[cfg(feature = "packed")]
        {
            if self.flags & DECODER_FLAG_PACKED_SUPPORT != 0 {
                match packed::try_follow(self) {
                    Some(Ok(resolved)) => {
                        let mut child = resolved.enter_container(want_type)?;
                        child.flags |= DECODER_FLAG_SHARED;
                        return Ok(child);
                    }
                    Some(Err(e)) => return Err(e),
                    None => {}
                }
            }
        }
        let mut child = Cursor {
            buf: self.buf,
            remaining: 0,
            flags: 0,
            #[cfg(feature = "packed")]
            tables: [None; NESTED_TABLES_MAX],
        };
        #[cfg(feature = "packed")]
        {
            child.flags = self.flags & DECODER_FLAG_PACKED_SUPPORT;
            child.tables = self.tables;
        }

        let indefinite_head = (want_type << TYPE_OFFSET) | SIZE_INDEFINITE;
        if !self.over_end() && self.buf[0] == indefinite_head {
            child.flags |= DECODER_FLAG_INDEFINITE | DECODER_FLAG_CONTAINER;
            child.buf = &self.buf[1..];
            return Ok(child);
        }

        let (count, head_len) = self.decode_uint_bare(SIZE_LONG, want_type)?;
        child.flags |= DECODER_FLAG_CONTAINER;
        child.remaining = count;
        child.buf = &self.buf[head_len..];
        Ok(child)
    }

    /// Enter a definite or indefinite array. The parent is not advanced; advancing happens
    /// in [`Cursor::leave_container`].
    #[cfg_attr(feature = "trace", trace)]
    pub fn enter_array(&self) -> Result<Cursor<'buf>> {
        self.enter_container(TYPE_ARR)
    }

    /// Enter a definite or indefinite map. Each entry counts as two units against
    /// `remaining` (one for the key, one for the value).
    #[cfg_attr(feature = "trace", trace)]
    pub fn enter_map(&self) -> Result<Cursor<'buf>> {
        let mut child = self.enter_container(TYPE_MAP)?;
        if child.remaining > u64::MAX / 2 {
            return Err(CBORError::Overflow);
        }
        child.remaining *= 2;
        Ok(child)
    }

    /// Leave a container previously returned by [`Cursor::enter_array`]/[`Cursor::enter_map`],
    /// advancing `self` past it. Fails [`CBORError::InvalidType`] unless `container` is a
    /// fully-consumed container that is plausible to have been entered from `self`.
    #[cfg_attr(feature = "trace", trace)]
    pub fn leave_container(&mut self, container: &Cursor<'buf>) -> Result<()> {
        if !container.in_container() || !container.at_end() {
            return Err(CBORError::InvalidType);
        }
        #[cfg(feature = "packed")]
        {
            if container.flags & DECODER_FLAG_SHARED != 0 {
                self.skip()?;
                return Ok(());
            }
        }
        let self_addr = self.buf.as_ptr() as usize;
        let container_addr = container.buf.as_ptr() as usize;
        let self_end = self_addr + self.buf.len();
        if container_addr <= self_addr || container_addr > self_end {
            return Err(CBORError::InvalidType);
        }
        if self.in_container() {
            self.remaining = self.remaining.wrapping_sub(1);
        }
        let offset = container_addr - self_addr;
        if container.container_indefinite() {
            self.buf = &self.buf[offset + 1..];
        } else {
            self.buf = &self.buf[offset..];
        }
        Ok(())
    }

    fn skip_simple(&mut self) -> Result<()> {
        let want_type = self.bare_type()?;
        if want_type == TYPE_BSTR || want_type == TYPE_TSTR {
            self.get_str(want_type)?;
            return Ok(());
        }
        let (_, consumed) = self.decode_uint_bare(SIZE_LONG, want_type)?;
        self.advance(consumed);
        Ok(())
    }

    /// Skip exactly one non-container, non-tag item without recursing. Used internally by
    /// the packed-CBOR table walker; exposed because it is a useful cheap primitive on its
    /// own.
    pub fn skip_simple_item(&mut self) -> Result<()> {
        self.skip_simple()
    }

    fn skip_limited(&mut self, limit: u8) -> Result<()> {
        if limit == 0 {
            return Err(CBORError::Recursion);
        }
        // Dispatch on the item's literal wire shape, not its packed-resolved type: a
        // packed-CBOR table definition or reference is itself an ordinary tag or simple
        // value, and skipping its literal encoding (rather than transparently resolving it)
        // is exactly what `get_subcbor` and the getters' post-read bookkeeping need.
        let want_type = self.bare_type()?;
        if want_type == TYPE_ARR || want_type == TYPE_MAP {
            let mut recurse = if want_type == TYPE_MAP {
                self.enter_map()?
            } else {
                self.enter_array()?
            };
            while !recurse.at_end() {
                recurse.skip_limited(limit - 1)?;
            }
            self.leave_container(&recurse)?;
        } else if want_type == TYPE_TAG {
            let (_, consumed) = self.decode_uint_bare(SIZE_WORD, TYPE_TAG)?;
            self.advance(consumed);
            self.skip_limited(limit - 1)?;
        } else {
            self.skip_simple()?;
        }
        Ok(())
    }

    /// Recursively walk and discard exactly one item, bounded by [`RECURSION_MAX`] nested
    /// frames.
    pub fn skip(&mut self) -> Result<()> {
        self.skip_limited(RECURSION_MAX)
    }

    /// Record the verbatim bytes of exactly one item (its head plus payload, including any
    /// nested containers) without interpreting them, by skipping over it and measuring how
    /// far the cursor moved.
    pub fn get_subcbor(&mut self) -> Result<&'buf [u8]> {
        let start = self.buf;
        self.skip()?;
        let len = start.len() - self.buf.len();
        Ok(&start[..len])
    }

    /// Scan a map starting at `self` for a text-string key byte-equal to `key`. On a hit,
    /// returns a cursor positioned at the matching value. Every non-matching key/value pair
    /// is skipped via [`Cursor::skip`].
    pub fn get_key_tstr(&self, key: &str) -> Result<Cursor<'buf>> {
        let mut cursor = *self;
        let key_bytes = key.as_bytes();
        while !cursor.at_end() {
            let found = cursor.get_tstr()?;
            if found == key_bytes {
                return Ok(cursor);
            }
            cursor.skip()?;
        }
        Err(CBORError::NotFound)
    }
}
