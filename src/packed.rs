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
 * tps_nanocbor transparent packed-CBOR (draft-ietf-cbor-packed) reference resolution (C5)
 *
 * A packed-CBOR stream piggy-backs its tables and references on ordinary CBOR constructs: a
 * shared item table definition is tag 113 applied to a 2-element array `[table, rump]`, and a
 * reference is either a simple value 0..15 or tag 6 applied to a signed integer. Resolution
 * never allocates: tables are recorded as borrowed slices of the original input, and table
 * install/lookup draws from a fixed-size, caller-sized stack.
 **************************************************************************************************/
use crate::constants::*;
use crate::decoder::{Cursor, PackedTable};
use crate::error::{CBORError, Result};

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

fn packed_enabled(cvalue: &Cursor) -> bool {
    cvalue.flags & DECODER_FLAG_PACKED_SUPPORT != 0
}

/// Install a tag 113 table definition (`cvalue` positioned at the tag head) into the first
/// free slot of `target`'s table stack, and return a cursor over the table's rump, the item
/// the definition stands in for.
fn consume_table<'buf>(cvalue: &mut Cursor<'buf>, mut target: Cursor<'buf>) -> Result<Cursor<'buf>> {
    // The 2-element array head `[table, rump]` is always exactly one byte (count 2 < 24).
    cvalue.value_match_exact(MASK_ARR | 0x02)?;
    let table_start = cvalue.buf;
    cvalue.skip()?;
    let table_len = table_start.len() - cvalue.buf.len();
    let table_bytes = &table_start[..table_len];
    cvalue.skip()?;

    let slot = target
        .tables
        .iter()
        .position(|t| t.is_none())
        .ok_or(CBORError::PackedMemory)?;
    target.tables[slot] = Some(PackedTable { bytes: table_bytes });
    target.buf = &target.buf[1 + table_len..];
    Ok(target)
}

/// Search the active table stack, most recently installed first, for the entry at `idx`,
/// and return a cursor positioned at it. The returned cursor's own table stack is truncated
/// to the tables defined no later than the one the entry was found in, so an indirection
/// inside a table can only resolve against tables already in scope when that table was
/// installed.
fn follow_reference<'buf>(cvalue: &Cursor<'buf>, mut idx: u64) -> Result<Cursor<'buf>> {
    for i in (0..NESTED_TABLES_MAX).rev() {
        let table = match cvalue.tables[i] {
            Some(t) => t,
            None => continue,
        };
        let mut target = Cursor::init(table.bytes);
        target.flags = DECODER_FLAG_PACKED_SUPPORT | DECODER_FLAG_SHARED;
        target.tables[..=i].copy_from_slice(&cvalue.tables[..=i]);

        let (table_size, head_len) = target.decode_uint_bare(SIZE_LONG, TYPE_ARR)?;
        target.buf = &target.buf[head_len..];

        if idx < table_size {
            for _ in 0..idx {
                target.skip()?;
            }
            return Ok(target);
        }
        idx -= table_size;
    }
    Err(CBORError::PackedUndefinedReference)
}

/// Resolve exactly one level of packed-CBOR indirection at the front of `cvalue`: a tag 113
/// table definition, a tag 6 reference, or a simple value 0..15 reference. Returns `None` if
/// the item at the front of `cvalue` is none of these (so the caller should decode it as an
/// ordinary item), `Some(Err(_))` on a structural or lookup failure.
fn follow_one<'buf>(cvalue: &Cursor<'buf>) -> Option<Result<Cursor<'buf>>> {
    let ctype = cvalue.bare_type().ok()?;
    if ctype == TYPE_TAG {
        let (tag, tag_len) = cvalue.decode_uint_bare(SIZE_WORD, TYPE_TAG).ok()?;
        if tag == TAG_PACKED_TABLE {
            let mut after_tag = *cvalue;
            after_tag.buf = &after_tag.buf[tag_len..];
            let target = after_tag;
            Some(consume_table(&mut after_tag, target))
        } else if tag == TAG_PACKED_REF_SHARED {
            let mut after_tag = *cvalue;
            after_tag.buf = &after_tag.buf[tag_len..];
            let (n, _) = match after_tag.decode_int_bare(SIZE_LONG) {
                Ok(pair) => pair,
                Err(_) => return Some(Err(CBORError::PackedFormat)),
            };
            let idx: u64 = if n >= 0 {
                16 + 2 * (n as u64)
            } else {
                16 + 2 * ((-n) as u64) - 1
            };
            Some(follow_reference(cvalue, idx))
        } else {
            None
        }
    } else if ctype == TYPE_FLOAT {
        let ib = *cvalue.buf.first()?;
        let simple = ib & AI_MASK;
        if simple < 16 {
            Some(follow_reference(cvalue, simple as u64))
        } else {
            None
        }
    } else {
        None
    }
}

/// Chase a full chain of packed-CBOR indirection starting at `cvalue`, bounded by
/// [`RECURSION_MAX`] links. Returns `None` if `cvalue` does not support packed resolution or
/// its first item is not a reference form at all (the caller should proceed as if packed
/// support were absent). Returns `Some(Ok(resolved))` once the chain terminates at a
/// concrete, non-reference item; `Some(Err(CBORError::Recursion))` if the chain is still
/// unresolved after `RECURSION_MAX` links (this also catches self-referential loops).
#[cfg_attr(feature = "trace", trace)]
pub(crate) fn try_follow<'buf>(cvalue: &Cursor<'buf>) -> Option<Result<Cursor<'buf>>> {
    if !packed_enabled(cvalue) {
        return None;
    }
    let mut probe = match follow_one(cvalue) {
        None => return None,
        Some(Err(e)) => return Some(Err(e)),
        Some(Ok(p)) => p,
    };
    let mut budget = RECURSION_MAX;
    loop {
        match follow_one(&probe) {
            None => return Some(Ok(probe)),
            Some(Err(e)) => return Some(Err(e)),
            Some(Ok(next)) => {
                if budget == 0 {
                    return Some(Err(CBORError::Recursion));
                }
                budget -= 1;
                probe = next;
            }
        }
    }
}
