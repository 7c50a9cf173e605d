/***************************************************************************************************
 * Copyright (c) 2020-2023 Qualcomm Innovation Center, Inc. All rights reserved.
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
 * Test cases from RFC 8949, Table 6, decoded through the low-level Cursor API.
 **************************************************************************************************/
extern crate tps_nanocbor;

use tps_nanocbor::decoder::Cursor;
use tps_nanocbor::error::CBORError;

#[test]
fn decode_uint_table_6() {
    assert_eq!(Cursor::init(&[0x00]).get_uint8().unwrap(), 0);
    assert_eq!(Cursor::init(&[0x01]).get_uint8().unwrap(), 1);
    assert_eq!(Cursor::init(&[0x0a]).get_uint8().unwrap(), 10);
    assert_eq!(Cursor::init(&[0x17]).get_uint8().unwrap(), 23);
    assert_eq!(Cursor::init(&[0x18, 0x18]).get_uint8().unwrap(), 24);
    assert_eq!(Cursor::init(&[0x18, 0x64]).get_uint8().unwrap(), 100);
    assert_eq!(Cursor::init(&[0x19, 0x03, 0xe8]).get_uint16().unwrap(), 1000);
    assert_eq!(
        Cursor::init(&[0x1a, 0x00, 0x0f, 0x42, 0x40]).get_uint32().unwrap(),
        1_000_000
    );
    assert_eq!(
        Cursor::init(&[0x1b, 0x00, 0x00, 0x00, 0xe8, 0xd4, 0xa5, 0x10, 0x00])
            .get_uint64()
            .unwrap(),
        1_000_000_000_000
    );
}

#[test]
fn decode_nint_table_6() {
    assert_eq!(Cursor::init(&[0x20]).get_int8().unwrap(), -1);
    assert_eq!(Cursor::init(&[0x29]).get_int8().unwrap(), -10);
    assert_eq!(Cursor::init(&[0x38, 0x63]).get_int16().unwrap(), -100);
    assert_eq!(Cursor::init(&[0x39, 0x03, 0xe7]).get_int16().unwrap(), -1000);
}

#[test]
fn decode_simple_values() {
    let mut c = Cursor::init(&[0xf4]);
    assert_eq!(c.get_bool().unwrap(), false);
    let mut c = Cursor::init(&[0xf5]);
    assert_eq!(c.get_bool().unwrap(), true);
    Cursor::init(&[0xf6]).get_null().unwrap();
    Cursor::init(&[0xf7]).get_undefined().unwrap();
}

#[test]
fn decode_bstr_and_tstr() {
    let mut c = Cursor::init(&[0x44, 0x01, 0x02, 0x03, 0x04]);
    assert_eq!(c.get_bstr().unwrap(), &[0x01, 0x02, 0x03, 0x04]);
    assert!(c.at_end());

    let mut c = Cursor::init(&[0x64, b'f', b'u', b'n', b'\'']);
    assert_eq!(c.get_tstr().unwrap(), b"fun'");
}

#[test]
fn decode_indefinite_array_table_6() {
    let mut c = Cursor::init(&[0x9f, 0x01, 0x02, 0x03, 0xff]);
    let mut arr = c.enter_array().unwrap();
    assert!(arr.container_indefinite());
    assert_eq!(arr.get_uint32().unwrap(), 1);
    assert_eq!(arr.get_uint32().unwrap(), 2);
    assert_eq!(arr.get_uint32().unwrap(), 3);
    assert!(arr.at_end());
    assert!(matches!(arr.get_uint32().unwrap_err(), CBORError::EndOfBuffer));
    c.leave_container(&arr).unwrap();
    assert!(c.at_end());
}

#[test]
fn decode_definite_array_and_map() {
    let mut c = Cursor::init(&[0x83, 0x01, 0x02, 0x03]);
    let mut arr = c.enter_array().unwrap();
    assert_eq!(arr.array_items_remaining(), 3);
    assert_eq!(arr.get_uint32().unwrap(), 1);
    assert_eq!(arr.get_uint32().unwrap(), 2);
    assert_eq!(arr.get_uint32().unwrap(), 3);
    c.leave_container(&arr).unwrap();
    assert!(c.at_end());

    let mut c = Cursor::init(&[0xa1, 0x01, 0x02]);
    let mut map = c.enter_map().unwrap();
    assert_eq!(map.map_items_remaining(), 1);
    assert_eq!(map.get_uint32().unwrap(), 1);
    assert_eq!(map.get_uint32().unwrap(), 2);
    c.leave_container(&map).unwrap();
    assert!(c.at_end());
}

#[test]
fn double_tag_and_byte_string_scenario() {
    // d9 d9 f7 da 52 49 4f 54 43 42 4f 52 -- tag 55799 tag 1380536148 bstr "BOR"
    let input: &[u8] = &[
        0xd9, 0xd9, 0xf7, 0xda, 0x52, 0x49, 0x4f, 0x54, 0x43, 0x42, 0x4f, 0x52,
    ];
    let mut c = Cursor::init(input);
    assert_eq!(c.get_tag().unwrap(), 55799);
    assert_eq!(c.get_tag().unwrap(), 1_380_536_148);
    assert_eq!(c.get_bstr().unwrap(), b"BOR");
    assert!(c.at_end());
}

#[test]
fn decimal_fraction_scenario() {
    // c4 82 21 19 6a b3 == tag(4)[-2, 27315]
    let input: &[u8] = &[0xc4, 0x82, 0x21, 0x19, 0x6a, 0xb3];
    let mut c = Cursor::init(input);
    let (e, m) = c.get_decimal_frac().unwrap();
    assert_eq!(e, -2);
    assert_eq!(m, 27315);
    assert!(c.at_end());
}

#[test]
fn get_key_tstr_finds_matching_key() {
    // {"a": 1, "b": 2}
    let input: &[u8] = &[0xa2, 0x61, b'a', 0x01, 0x61, b'b', 0x02];
    let mut c = Cursor::init(input);
    let map = c.enter_map().unwrap();
    let mut value = map.get_key_tstr("b").unwrap();
    assert_eq!(value.get_uint32().unwrap(), 2);
}

#[test]
fn get_key_tstr_reports_not_found() {
    let input: &[u8] = &[0xa1, 0x61, b'a', 0x01];
    let mut c = Cursor::init(input);
    let map = c.enter_map().unwrap();
    assert!(matches!(map.get_key_tstr("z").unwrap_err(), CBORError::NotFound));
}

#[test]
fn get_subcbor_returns_verbatim_bytes() {
    let input: &[u8] = &[0x82, 0x01, 0x02, 0xff];
    let mut c = Cursor::init(input);
    let sub = c.get_subcbor().unwrap();
    assert_eq!(sub, &[0x82, 0x01, 0x02]);
}

#[test]
fn overflow_when_value_too_wide_for_destination() {
    let mut c = Cursor::init(&[0x19, 0x01, 0x00]); // 256, too wide for u8
    assert!(matches!(c.get_uint8().unwrap_err(), CBORError::Overflow));
}

#[test]
fn wrong_major_type_is_invalid_type() {
    let mut c = Cursor::init(&[0x01]);
    assert!(matches!(c.get_bstr().unwrap_err(), CBORError::InvalidType));
}

#[test]
fn indefinite_length_strings_are_rejected() {
    let mut c = Cursor::init(&[0x5f, 0xff]);
    assert!(matches!(c.get_bstr().unwrap_err(), CBORError::InvalidType));
}

#[test]
fn leaving_unfinished_container_is_invalid_type() {
    let mut c = Cursor::init(&[0x82, 0x01, 0x02]);
    let arr = c.enter_array().unwrap();
    // arr still has one element left (`02`); leaving it now must fail.
    assert!(matches!(c.leave_container(&arr).unwrap_err(), CBORError::InvalidType));
}
