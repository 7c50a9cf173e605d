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
 * tps_nanocbor module definition
 *
 * A minimal, allocation-free, cursor-based CBOR (RFC 8949) decoder and encoder, designed for
 * constrained and embedded environments and for protocols (CoAP, OSCORE, SenML, CORECONF) that
 * rely on predictable, deterministic CBOR shapes.
 **************************************************************************************************/

#![no_std]
#![warn(missing_docs)]

//! # TPS_NANOCBOR
//!
//! `tps_nanocbor` is a minimal, allocation-free CBOR (RFC 8949) codec built around a
//! zero-copy decoder cursor and a sink-polymorphic streaming encoder. It is a Rust port of
//! [NanoCBOR](https://github.com/bergzand/NanoCBOR), aimed at the same constrained targets:
//! the default build is `no_std` with no allocator, and adds nothing on the hot path beyond a
//! handful of `u8`/`u64` fields per cursor.
//!
//! Two cooperating cores are exposed:
//!
//! - [`decoder::Cursor`] walks an in-place byte slice without copying. It supports nested
//!   array/map traversal with a bounded-recursion `skip`, and, when the `packed` feature is
//!   enabled (it is by default), transparently resolves
//!   [packed CBOR](https://www.ietf.org/archive/id/draft-ietf-cbor-packed-11.html) references
//!   against a stack of shared-item tables installed by tag 113.
//! - [`encoder::Encoder`] emits canonical (shortest-head) CBOR into a caller-chosen
//!   [`encoder::Sink`] — a bounded in-memory buffer or a user-supplied type — with a
//!   [`encoder::NullSink`] dry-run mode that only computes the encoded length.
//!
//! ## Example
//!
//! ```
//! use tps_nanocbor::decoder::Cursor;
//! use tps_nanocbor::encoder::Encoder;
//!
//! let mut buf = [0u8; 16];
//! let mut enc = Encoder::new(&mut buf);
//! enc.fmt_array(2).unwrap();
//! enc.fmt_uint(1).unwrap();
//! enc.fmt_uint(2).unwrap();
//! let written = enc.as_slice().len();
//!
//! let mut cur = Cursor::init(&buf[..written]);
//! let mut arr = cur.enter_array().unwrap();
//! assert_eq!(arr.get_uint32().unwrap(), 1);
//! assert_eq!(arr.get_uint32().unwrap(), 2);
//! cur.leave_container(&arr).unwrap();
//! assert!(cur.at_end());
//! ```
//!
//! ## Features
//!
//! - `packed` (default on): transparent packed-CBOR reference resolution in the decoder.
//! - `float` (default off): half/single/double float getters and formatters. Narrowing and
//!   widening are pure bitwise manipulation, so this feature needs no FPU on the encode path
//!   and no dependency on an external half-precision type.
//! - `std` (default off): implements `std::error::Error` for [`error::CBORError`] and enables
//!   the `trace` feature.
//! - `trace` (default off, requires `std`): per-function entry/exit tracing via `func_trace`,
//!   useful when debugging a malformed-input report.
//! - `full`: shorthand enabling `packed` + `std` + `float` together.

// Pull in std when testing or when a caller opts into the `full`/`std` feature so error trait
// impls and the sizing test in `encoder` have an allocator-backed environment to run in.
#[cfg(any(feature = "std", test))]
extern crate std;

#[cfg(all(not(feature = "std"), not(test)))]
extern crate core as std;

pub(crate) mod constants;
pub(crate) mod head;

#[cfg(any(feature = "float", test))]
pub(crate) mod float;

/// The `error` module contains [`error::CBORError`], the single error type returned by every
/// fallible operation in this crate.
pub mod error;

/// The `decoder` module exports [`decoder::Cursor`], the streaming, zero-copy decoder cursor
/// (C3/C4), and, when the `packed` feature is enabled, transparent packed-CBOR resolution
/// (C5).
pub mod decoder;

#[cfg(feature = "packed")]
mod packed;

/// The `encoder` module exports [`encoder::Encoder`], the streaming encoder (C7), and the
/// [`encoder::Sink`] trait plus its two built-in implementors (C6): [`encoder::MemoryBuffer`]
/// and [`encoder::NullSink`].
pub mod encoder;

/// Crate-level configuration constants governing worst-case recursion depth and packed-CBOR
/// table stack capacity.
pub mod config {
    pub use crate::constants::{NESTED_TABLES_MAX, RECURSION_MAX};
}
