// Copyright 2024-2026, NVIDIA CORPORATION & AFFILIATES. All rights reserved.
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions
// are met:
//  * Redistributions of source code must retain the above copyright
//    notice, this list of conditions and the following disclaimer.
//  * Redistributions in binary form must reproduce the above copyright
//    notice, this list of conditions and the following disclaimer in the
//    documentation and/or other materials provided with the distribution.
//  * Neither the name of NVIDIA CORPORATION nor the names of its
//    contributors may be used to endorse or promote products derived
//    from this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS ``AS IS'' AND ANY
// EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR
// PURPOSE ARE DISCLAIMED.  IN NO EVENT SHALL THE COPYRIGHT OWNER OR
// CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL,
// EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO,
// PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR
// PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY
// OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT
// (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

//! Marshalling and unmarshalling of BYTES tensor data.
//!
//! A BYTES tensor is a ragged array of opaque byte strings. Clients may
//! present it four ways: a flat or nested JSON array of strings (UTF-8 or
//! base64 per the `content_type` parameter), a JSON array of numeric byte
//! arrays, or -- on the gRPC side -- a raw blob of length-prefixed frames.
//! Parsing works on the raw token stream and compacts the buffer in place;
//! structural validation is best-effort, with the element count enforced by
//! the caller.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{Error, Result};
use crate::generated::inference::infer_parameter::ParameterChoice;
use crate::params::{ParameterMap, BASE64, CONTENT_TYPE};

/// ASCII whitespace as JSON defines it.
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

fn unescape_char(b: u8) -> Option<u8> {
    match b {
        b'b' => Some(0x08),
        b'f' => Some(0x0c),
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        b'\\' => Some(b'\\'),
        b'/' => Some(b'/'),
        b'"' => Some(b'"'),
        _ => None,
    }
}

fn parse_hex4(hex: [u8; 4]) -> Result<u16> {
    let mut value = 0u16;
    for digit in hex {
        let d = (digit as char).to_digit(16).ok_or(Error::BadEscape)?;
        value = (value << 4) | d as u16;
    }
    Ok(value)
}

/// Decodes the JSON `data` field of a BYTES tensor into its byte strings.
///
/// `data` must hold the raw JSON text of the field and is compacted in
/// place while parsing. The accepted presentations, dispatched on the
/// opening tokens:
///
/// - `["a", "b"]` -- flat array of strings
/// - `[["a"], ["b"]]` -- strings nested to `shape.len()` levels
/// - `[[97], [98]]` -- one numeric byte array per element
/// - `[[[97]], [[98]]]` -- numeric byte arrays nested to `shape.len() + 1`
///   levels (the innermost level is the byte content, not a shape
///   dimension)
///
/// # Errors
///
/// Fails when the nesting does not match the shape, when the token stream
/// is not an array of strings/byte arrays, on invalid string escapes, and
/// on invalid base64 when `b64` is set.
pub(crate) fn unmarshal_bytes_json(
    data: &mut [u8],
    shape: &[i64],
    b64: bool,
) -> Result<Vec<Vec<u8>>> {
    let mut start = None;
    let mut depth = 0usize;
    let mut is_string = false;
    for (i, &b) in data.iter().enumerate() {
        if b == b'[' {
            if start.is_none() {
                start = Some(i);
            }
            depth += 1;
        } else if !is_space(b) {
            is_string = b == b'"';
            break;
        }
    }
    let Some(start) = start else {
        return Err(Error::ShapeMismatch("not a json array"));
    };
    let data = &mut data[start..];
    if is_string {
        if depth != 1 && depth != shape.len() {
            return Err(Error::ShapeMismatch(
                "data array nesting does not match tensor shape",
            ));
        }
        return unmarshal_string_array(data, shape, b64);
    }
    if depth <= 1 {
        return Err(Error::ShapeMismatch("must be an array of byte arrays"));
    }
    if depth == 2 {
        // flat numeric case, e.g.  [[1,2,3],[4,5,6],[7,8,9]]
        return Ok(serde_json::from_slice(data)?);
    }

    // nested numeric case, e.g.  [[[1,2],[3,4]],[[5,6],[7,8]]]
    // the innermost dimension is byte content, not a shape dimension
    if depth - 1 != shape.len() {
        return Err(Error::ShapeMismatch(
            "array nesting does not match tensor shape",
        ));
    }
    unmarshal_nested_numeric(data, depth)
}

/// Strips every bracket above the innermost level in place, leaving a flat
/// two-level array for the JSON parser.
fn unmarshal_nested_numeric(data: &mut [u8], depth: usize) -> Result<Vec<Vec<u8>>> {
    let innermost = depth as i64;
    let mut d: i64 = 0;
    let mut j = 1usize;
    for i in 0..data.len() {
        let b = data[i];
        let include;
        if b == b'[' {
            d += 1;
            if d > innermost {
                return Err(Error::ShapeMismatch(
                    "array nesting does not match tensor shape",
                ));
            }
            include = d == innermost;
        } else if b == b']' {
            include = d == innermost;
            d -= 1;
        } else {
            include = true;
        }
        if include {
            data[j] = b;
            j += 1;
        }
    }
    if d != 0 {
        return Err(Error::ShapeMismatch(
            "array nesting does not match tensor shape",
        ));
    }
    data[j] = b']';
    Ok(serde_json::from_slice(&data[..=j])?)
}

/// Parses a flat or nested JSON array of strings, unescaping each string in
/// place and base64-decoding it when `b64` is set.
fn unmarshal_string_array(data: &mut [u8], shape: &[i64], b64: bool) -> Result<Vec<Vec<u8>>> {
    let elems = crate::datatype::element_count(shape);
    let mut strings: Vec<Vec<u8>> = Vec::with_capacity(elems);

    let mut depth: i64 = 0;
    let mut str_start: Option<usize> = None;
    let mut j = 0usize;
    let l = data.len();
    let mut i = 0usize;
    while i < l {
        let mut b = data[i];
        let Some(start) = str_start else {
            if b == b'[' {
                depth += 1;
            } else if b == b']' {
                depth -= 1;
            } else if b == b'"' {
                if strings.len() >= elems {
                    return Err(Error::ShapeMismatch(
                        "more strings than expected for tensor shape",
                    ));
                }
                str_start = Some(i);
                j = i + 1;
            } else if b != b',' && !is_space(b) {
                return Err(Error::ShapeMismatch(
                    "tensor data must be a flat or nested json array of strings",
                ));
            }
            i += 1;
            continue;
        };
        // here we are mid-string
        if b == b'\\' {
            i += 1;
            if i == l {
                break; // will error with unexpected end
            }
            b = data[i];
            if b == b'u' {
                i += 4;
                if i >= l {
                    break; // will error with unexpected end
                }
                let mut hex = [0u8; 4];
                hex.copy_from_slice(&data[i - 3..=i]);
                // each code unit decodes independently; a lone surrogate
                // half becomes U+FFFD
                let scalar = char::from_u32(u32::from(parse_hex4(hex)?))
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                let mut encoded = [0u8; 4];
                let n = scalar.encode_utf8(&mut encoded).len();
                data[j..j + n].copy_from_slice(&encoded[..n]);
                j += n;
                i += 1;
                continue;
            }
            b = unescape_char(b).ok_or(Error::BadEscape)?;
        } else if b == b'"' {
            // end of string
            let s = &data[start + 1..j];
            strings.push(if b64 { STANDARD.decode(s)? } else { s.to_vec() });
            str_start = None;
        }
        if j != i {
            data[j] = b;
        }
        j += 1;
        i += 1;
    }
    if str_start.is_some() {
        return Err(Error::ShapeMismatch(
            "fewer strings than expected for tensor shape",
        ));
    }
    if depth != 0 {
        return Err(Error::BracketCountMismatch);
    }

    Ok(strings)
}

/// Returns true when a tensor's `content_type` parameter selects base64
/// payloads. Absent or UTF-8 spellings select UTF-8; anything else warns
/// and falls back to UTF-8.
pub(crate) fn is_base64_content(parameters: &ParameterMap) -> bool {
    let ct = match parameters.get(CONTENT_TYPE).map(|p| &p.parameter_choice) {
        Some(Some(ParameterChoice::StringParam(s))) => s.as_str(),
        _ => return false,
    };
    if ct.is_empty() || ct == "utf8" || ct == "str" || ct == "UTF8" {
        return false;
    }
    if ct == BASE64 || ct == "b64" || ct == "BASE64" || ct == "B64" {
        return true;
    }
    if ct != "utf-8" && ct != "UTF-8" {
        tracing::warn!(content_type = %ct, "unrecognized content_type, treating as utf8");
    }
    false
}

/// Splits a raw BYTES blob into its byte strings using the 4-byte
/// little-endian length prefix carried before each element.
///
/// # Errors
///
/// Returns [`Error::RawBytesTruncated`] when a frame runs past the end of
/// the blob and [`Error::RawBytesExcess`] when bytes remain after the last
/// expected frame.
pub(crate) fn split_raw_frames(raw: &[u8], expected: usize) -> Result<Vec<Vec<u8>>> {
    let mut strings = Vec::with_capacity(expected);
    let mut offset = 0usize;
    for _ in 0..expected {
        let prefix = raw
            .get(offset..offset + 4)
            .ok_or(Error::RawBytesTruncated)?;
        let size = u32::from_le_bytes(prefix.try_into().unwrap()) as usize;
        offset += 4;
        let payload = raw
            .get(offset..offset + size)
            .ok_or(Error::RawBytesTruncated)?;
        strings.push(payload.to_vec());
        offset += size;
    }
    if offset < raw.len() {
        return Err(Error::RawBytesExcess);
    }
    Ok(strings)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
