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
 * tps_nanocbor IEEE 754 half/single/double narrowing and widening (C2)
 *
 * All conversions are pure bit manipulation; none require the target to have an FPU capable
 * of half-precision arithmetic.
 **************************************************************************************************/

const FLOAT_EXP_OFFSET: u32 = 127;
const FLOAT_EXP_POS: u32 = 23;
const FLOAT_EXP_MASK: u32 = 0xFF;
const FLOAT_SIGN_POS: u32 = 31;
const FLOAT_FRAC_MASK: u32 = 0x7FFFFF;
const FLOAT_SIGN_MASK: u32 = 1 << FLOAT_SIGN_POS;
const FLOAT_EXP_IS_NAN: u32 = 0xFF;
const FLOAT_HALF_LOSS: u32 = 0x1FFF;

const HALF_EXP_OFFSET: u32 = 15;
const HALF_EXP_POS: u32 = 10;
const HALF_EXP_MASK: u32 = 0x1F;
const HALF_SIGN_POS: u32 = 15;
const HALF_FRAC_MASK: u32 = 0x3FF;
const HALF_SIGN_MASK: u32 = 1 << HALF_SIGN_POS;

const DOUBLE_EXP_OFFSET: u64 = 1023;
const DOUBLE_EXP_POS: u64 = 52;
const DOUBLE_EXP_MASK: u64 = 0x7FF;
const DOUBLE_SIGN_POS: u64 = 63;
const DOUBLE_SIGN_MASK: u64 = 1 << DOUBLE_SIGN_POS;
const DOUBLE_EXP_IS_NAN: u64 = 0x7FF;
const DOUBLE_FLOAT_LOSS: u64 = 0x1FFFFFFF;

/// Widen a half-precision float, stored as its raw 16-bit pattern, into an `f32`.
///
/// Subnormal halves (biased exponent 0) are re-normalized through the well-known magic
/// add-subtract trick rather than through a bit-by-bit renormalizing loop.
pub(crate) fn half_bits_to_f32(bits: u16) -> f32 {
    let bits = bits as u32;
    let sign = (bits & HALF_SIGN_MASK) << (FLOAT_SIGN_POS - HALF_SIGN_POS);
    let significand = bits & HALF_FRAC_MASK;
    let exponent = bits & (HALF_EXP_MASK << HALF_EXP_POS);

    if exponent == 0 {
        let magic_bits = (FLOAT_EXP_OFFSET - 1) << FLOAT_EXP_POS;
        let magic = f32::from_bits(magic_bits);
        let with_frac = f32::from_bits(magic_bits + significand);
        let value = with_frac - magic;
        f32::from_bits(sign | value.to_bits())
    } else {
        let half_float_exp_diff = FLOAT_EXP_OFFSET - HALF_EXP_OFFSET;
        let exponent = if exponent == (HALF_EXP_MASK << HALF_EXP_POS) {
            (FLOAT_EXP_MASK - half_float_exp_diff) << HALF_EXP_POS
        } else {
            exponent
        };
        let half_float_exp_pos_diff = FLOAT_EXP_POS - HALF_EXP_POS;
        let ifloat = sign
            | (((exponent + (half_float_exp_diff << HALF_EXP_POS)) << half_float_exp_pos_diff)
                | (significand << half_float_exp_pos_diff));
        f32::from_bits(ifloat)
    }
}

fn single_is_inf_nan(exp: u32) -> bool {
    exp == FLOAT_EXP_IS_NAN
}

fn single_is_zero(bits: u32) -> bool {
    (bits & !FLOAT_SIGN_MASK) == 0
}

/// True if `bits` (a single-precision float) can be narrowed to half precision without loss:
/// its exponent must fit the half range and the low 13 mantissa bits (lost in narrowing)
/// must already be zero.
fn single_in_range(exp: u32, bits: u32) -> bool {
    exp <= (HALF_EXP_OFFSET + FLOAT_EXP_OFFSET)
        && exp >= (FLOAT_EXP_OFFSET + 1 - HALF_EXP_OFFSET)
        && (bits & FLOAT_HALF_LOSS) == 0
}

/// Narrow an `f32` to a half-precision bit pattern, returning `Some` only when this is
/// lossless (or the value is ±0, ±∞, or NaN).
pub(crate) fn f32_to_half_bits(value: f32) -> Option<u16> {
    let bits = value.to_bits();
    let exp = (bits >> FLOAT_EXP_POS) & FLOAT_EXP_MASK;
    if !(single_is_inf_nan(exp) || single_is_zero(bits) || single_in_range(exp, bits)) {
        return None;
    }
    let mut half = ((bits >> (32 - 16)) & (HALF_SIGN_MASK)) as u16;
    let mut exp = exp;
    if exp != FLOAT_EXP_IS_NAN && exp != 0 {
        exp = (exp as i32 + HALF_EXP_OFFSET as i32 - FLOAT_EXP_OFFSET as i32) as u32;
    }
    half |= (((exp & HALF_EXP_MASK) << HALF_EXP_POS)
        | ((bits >> (FLOAT_EXP_POS - HALF_EXP_POS)) & HALF_FRAC_MASK)) as u16;
    Some(half)
}

fn double_is_inf_nan(exp: u64) -> bool {
    exp == DOUBLE_EXP_IS_NAN
}

fn double_is_zero(bits: u64) -> bool {
    (bits & !DOUBLE_SIGN_MASK) == 0
}

/// True if `bits` (a double-precision float) can be narrowed to single precision without
/// loss: exponent fits the single range and the low 29 mantissa bits are already zero.
fn double_in_range(exp: u64, bits: u64) -> bool {
    exp <= (DOUBLE_EXP_OFFSET + FLOAT_EXP_OFFSET as u64)
        && exp >= (DOUBLE_EXP_OFFSET - FLOAT_EXP_OFFSET as u64 + 1)
        && (bits & DOUBLE_FLOAT_LOSS) == 0
}

/// Narrow an `f64` to an `f32` bit pattern, returning `Some` only when this is lossless (or
/// the value is ±0, ±∞, or NaN). Callers should attempt this before falling back to a full
/// double-precision encoding, and should further attempt [`f32_to_half_bits`] on the result.
pub(crate) fn f64_to_single(value: f64) -> Option<f32> {
    let bits = value.to_bits();
    let exp = (bits >> DOUBLE_EXP_POS) & DOUBLE_EXP_MASK;
    if !(double_is_inf_nan(exp) || double_is_zero(bits) || double_in_range(exp, bits)) {
        return None;
    }
    let mut single = ((bits >> (64 - 32)) & (FLOAT_SIGN_MASK as u64)) as u32;
    let mut exp = exp;
    if exp != DOUBLE_EXP_IS_NAN && exp != 0 {
        exp = (exp as i64 + FLOAT_EXP_OFFSET as i64 - DOUBLE_EXP_OFFSET as i64) as u64;
    }
    single |= (((exp & FLOAT_EXP_MASK as u64) << FLOAT_EXP_POS)
        | ((bits >> (DOUBLE_EXP_POS - FLOAT_EXP_POS as u64)) & FLOAT_FRAC_MASK as u64))
        as u32;
    Some(f32::from_bits(single))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_zero_roundtrip() {
        assert_eq!(half_bits_to_f32(0x0000), 0.0f32);
        assert_eq!(half_bits_to_f32(0x8000), -0.0f32);
    }

    #[test]
    fn half_one_widens_exactly() {
        // 1.0 in half precision: sign 0, exp 15 (biased), frac 0
        let bits: u16 = (15u16) << 10;
        assert_eq!(half_bits_to_f32(bits), 1.0f32);
    }

    #[test]
    fn half_infinity_and_nan_widen() {
        let inf_bits: u16 = 0x7C00;
        assert!(half_bits_to_f32(inf_bits).is_infinite());
        let nan_bits: u16 = 0x7E00;
        assert!(half_bits_to_f32(nan_bits).is_nan());
    }

    #[test]
    fn single_narrows_to_half_when_lossless() {
        assert_eq!(f32_to_half_bits(1.0f32), Some((15u16) << 10));
        assert_eq!(f32_to_half_bits(0.0f32), Some(0));
    }

    #[test]
    fn single_does_not_narrow_when_lossy() {
        // A value whose mantissa has bits set below the half-precision cutoff.
        assert_eq!(f32_to_half_bits(1.0000001f32), None);
    }

    #[test]
    fn double_narrows_to_single_when_lossless() {
        assert_eq!(f64_to_single(1.0f64), Some(1.0f32));
        assert_eq!(f64_to_single(0.0f64), Some(0.0f32));
    }

    #[test]
    fn double_does_not_narrow_pi() {
        // std::f64::consts::PI loses precision when narrowed to f32.
        assert_eq!(f64_to_single(core::f64::consts::PI), None);
    }
}
