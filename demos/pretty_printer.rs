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
 * CBOR diagnostic-notation pretty printer
 *
 * Reads a file (or stdin, with `-f -`) into a fixed 4096-byte buffer, validates it with a full
 * `skip` pass to exercise structural well-formedness, then re-initializes and walks the stream
 * printing diagnostic notation. Nesting deeper than MAX_DEPTH is reported as an error rather than
 * followed. This is an external collaborator of the decoder core, not part of it: it consumes
 * `tps_nanocbor::decoder::Cursor` the way an application would.
 **************************************************************************************************/
extern crate clap;
extern crate tps_nanocbor;

use clap::{App, Arg};
use std::error::Error;
use std::fs::File;
use std::io::{self, Read};

use tps_nanocbor::decoder::Cursor;
use tps_nanocbor::error::CBORError;

const CBOR_READ_BUFFER_BYTES: usize = 4096;
const MAX_DEPTH: u32 = 20;

fn print_type(value: &mut Cursor, indent: u32) -> Result<(), CBORError> {
    if indent > MAX_DEPTH {
        return Err(CBORError::Recursion);
    }
    match value.get_type()? {
        tps_nanocbor::decoder::TYPE_UINT => print!("{}", value.get_uint64()?),
        tps_nanocbor::decoder::TYPE_NINT => print!("{}", value.get_int64()?),
        tps_nanocbor::decoder::TYPE_BSTR => {
            let bytes = value.get_bstr()?;
            print!("h'");
            for b in bytes {
                print!("{:02x}", b);
            }
            print!("'");
        }
        tps_nanocbor::decoder::TYPE_TSTR => {
            let bytes = value.get_tstr()?;
            print!("\"{}\"", String::from_utf8_lossy(bytes));
        }
        tps_nanocbor::decoder::TYPE_ARR => {
            let mut arr = value.enter_array()?;
            print!("[");
            let mut first = true;
            while !arr.at_end() {
                if !first {
                    print!(", ");
                }
                first = false;
                print_type(&mut arr, indent + 1)?;
            }
            value.leave_container(&arr)?;
            print!("]");
        }
        tps_nanocbor::decoder::TYPE_MAP => {
            let mut map = value.enter_map()?;
            print!("{{");
            let mut first = true;
            while !map.at_end() {
                if !first {
                    print!(", ");
                }
                first = false;
                print_type(&mut map, indent + 1)?;
                print!(": ");
                print_type(&mut map, indent + 1)?;
            }
            value.leave_container(&map)?;
            print!("}}");
        }
        tps_nanocbor::decoder::TYPE_TAG => {
            let tag = value.get_tag()?;
            print!("{}(", tag);
            print_type(value, indent)?;
            print!(")");
        }
        tps_nanocbor::decoder::TYPE_FLOAT => {
            if let Ok(b) = value.get_bool() {
                print!("{}", b);
            } else if value.get_null().is_ok() {
                print!("null");
            } else if value.get_undefined().is_ok() {
                print!("\"undefined\"");
            } else if let Ok(s) = value.get_simple() {
                print!("\"simple({})\"", s);
            } else {
                #[cfg(feature = "float")]
                {
                    print!("{:?}", value.get_double()?);
                }
                #[cfg(not(feature = "float"))]
                {
                    return Err(CBORError::InvalidType);
                }
            }
        }
        _ => return Err(CBORError::InvalidType),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cmd_line = App::new("pretty_printer")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print a CBOR file in diagnostic notation")
        .arg(
            Arg::with_name("input")
                .short("f")
                .long("input")
                .required(true)
                .takes_value(true)
                .value_name("FILE")
                .help("Input file, - for stdin"),
        )
        .get_matches();

    let mut buffer = [0u8; CBOR_READ_BUFFER_BYTES];
    let input = cmd_line.value_of("input").unwrap();
    let len = if input == "-" {
        io::stdin().read(&mut buffer)?
    } else {
        File::open(input)?.read(&mut buffer)?
    };

    println!("Start decoding {} bytes:", len);

    let mut validate = Cursor::init(&buffer[..len]);
    while !validate.at_end() {
        if validate.skip().is_err() {
            eprintln!("input is not well-formed CBOR");
            return Ok(());
        }
    }

    let mut it = Cursor::init(&buffer[..len]);
    while !it.at_end() {
        if print_type(&mut it, 0).is_err() {
            eprintln!("Err");
            break;
        }
        if !it.at_end() {
            print!(", ");
        }
    }
    println!();

    Ok(())
}
