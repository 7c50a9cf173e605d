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
 * Float encoding: NaN/infinity reduction and lossless single/double narrowing.
 **************************************************************************************************/
#![cfg(feature = "float")]
extern crate tps_nanocbor;

use tps_nanocbor::encoder::Encoder;

#[test]
fn specials_always_narrow_to_half_precision() {
    let mut buf = [0u8; 64];
    let mut enc = Encoder::new(&mut buf);

    enc.fmt_array_indefinite().unwrap();
    assert_eq!(enc.fmt_float(f32::NAN).unwrap(), 3);
    assert_eq!(enc.fmt_float(-f32::NAN).unwrap(), 3);
    assert_eq!(enc.fmt_float(f32::INFINITY).unwrap(), 3);
    assert_eq!(enc.fmt_float(f32::NEG_INFINITY).unwrap(), 3);

    assert_eq!(enc.fmt_double(f64::NAN).unwrap(), 3);
    assert_eq!(enc.fmt_double(-f64::NAN).unwrap(), 3);
    assert_eq!(enc.fmt_double(f64::INFINITY).unwrap(), 3);
    assert_eq!(enc.fmt_double(f64::NEG_INFINITY).unwrap(), 3);
    enc.fmt_end_indefinite().unwrap();
}

#[test]
fn single_narrows_to_half_only_when_lossless() {
    let mut buf = [0u8; 64];
    let mut enc = Encoder::new(&mut buf);

    enc.fmt_array_indefinite().unwrap();
    assert_eq!(enc.fmt_float(1.75).unwrap(), 3);
    assert_eq!(enc.fmt_float(1.9990234375).unwrap(), 3);
    assert_eq!(enc.fmt_float(1.99951171875).unwrap(), 5);
    assert_eq!(enc.fmt_float(2.0009765625).unwrap(), 5);

    assert_eq!(enc.fmt_float(-1.75).unwrap(), 3);
    assert_eq!(enc.fmt_float(-1.9990234375).unwrap(), 3);
    assert_eq!(enc.fmt_float(-1.99951171875).unwrap(), 5);
    assert_eq!(enc.fmt_float(-2.0009765625).unwrap(), 5);
    enc.fmt_end_indefinite().unwrap();
}

#[test]
fn double_narrows_through_single_down_to_half_when_lossless() {
    let mut buf = [0u8; 128];
    let mut enc = Encoder::new(&mut buf);

    enc.fmt_array_indefinite().unwrap();
    assert_eq!(enc.fmt_double(1.75).unwrap(), 3);
    assert_eq!(enc.fmt_double(1.9990234375).unwrap(), 3);
    assert_eq!(enc.fmt_double(1.99951171875).unwrap(), 5);
    assert_eq!(enc.fmt_double(2.0009765625).unwrap(), 5);

    assert_eq!(enc.fmt_double(-1.75).unwrap(), 3);
    assert_eq!(enc.fmt_double(-1.9990234375).unwrap(), 3);
    assert_eq!(enc.fmt_double(-1.99951171875).unwrap(), 5);
    assert_eq!(enc.fmt_double(-2.0009765625).unwrap(), 5);

    // Representable exactly as f32 but not as half: stops one level up the chain.
    assert_eq!(enc.fmt_double(1.00000011920928955078125).unwrap(), 5);
    assert_eq!(enc.fmt_double(f32::MIN_POSITIVE as f64).unwrap(), 5);
    assert_eq!(enc.fmt_double(f32::MAX as f64).unwrap(), 5);

    // Outside the range or precision f32 can hold: stays double.
    assert_eq!(enc.fmt_double(f64::MIN_POSITIVE).unwrap(), 9);
    assert_eq!(enc.fmt_double(f64::MAX).unwrap(), 9);
    assert_eq!(enc.fmt_double(1e39).unwrap(), 9);
    enc.fmt_end_indefinite().unwrap();
}
