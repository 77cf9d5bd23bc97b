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

//! Marshalling and unmarshalling of numeric tensor data.
//!
//! Request side: a JSON array of arbitrary nesting parses directly into the
//! typed contents bucket selected by the tensor's datatype. Nested arrays
//! are compacted in place -- every bracket except the outermost pair is
//! stripped -- and the flat remainder goes through a single typed
//! `serde_json` parse, so no boxed intermediate value tree is built.
//!
//! Response side: payloads arrive either as typed contents buckets or as
//! packed little-endian blobs; both land in a [`TensorData`] variant that
//! serializes as a flat JSON array. On the raw path the concrete element
//! type matches the datatype exactly (no widening).

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::bytes::{is_space, split_raw_frames};
use crate::datatype::{Bucket, Datatype};
use crate::error::{Error, Result};
use crate::generated::inference::InferTensorContents;

/// The expected total number of `[` (equivalently `]`) in a fully nested
/// encoding of `shape`: one opener per array at every non-innermost level,
/// plus the outer pair.
pub(crate) fn expected_bracket_count(shape: &[i64]) -> usize {
    if shape.len() < 2 {
        return 1;
    }
    let (mut product, mut sum) = (1usize, 1usize);
    for dim in &shape[..shape.len() - 1] {
        product *= (*dim).max(0) as usize;
        sum += product;
    }
    sum
}

/// Parses a flat or nested numeric JSON array into a typed vector.
///
/// For rank 0 or 1 shapes the array parses as-is. Otherwise the buffer is
/// compacted in place: every bracket except the outermost pair is removed,
/// the bracket totals are validated against the shape, and the flattened
/// array is parsed.
fn parse_into<T>(data: &mut [u8], shape: &[i64]) -> Result<Vec<T>>
where
    T: serde::de::DeserializeOwned,
{
    if shape.len() <= 1 {
        return Ok(serde_json::from_slice(data)?); // single-dimension fast-path
    }
    let mut start: Option<usize> = None;
    let mut nested = false;
    for (i, &b) in data.iter().enumerate() {
        if b == b'[' {
            if start.is_some() {
                nested = true;
                break; // here we have nested arrays
            }
            start = Some(i);
        } else if !is_space(b) {
            if start.is_none() {
                return Err(Error::ShapeMismatch("not a json array"));
            }
            // fast-path: flat array
            return Ok(serde_json::from_slice(data)?);
        }
    }
    let Some(start) = start else {
        return Err(Error::ShapeMismatch("not a json array"));
    };
    if !nested {
        return Err(Error::BracketCountMismatch);
    }
    let data = &mut data[start..];

    // strip all the square brackets (compacting the buffer in place)
    let (mut opens, mut closes) = (0usize, 0usize);
    let mut j = 1usize;
    for i in 0..data.len() {
        let b = data[i];
        if b == b'[' {
            opens += 1;
        } else if b == b']' {
            closes += 1;
        } else {
            data[j] = b;
            j += 1;
        }
    }
    if opens != closes || opens != expected_bracket_count(shape) {
        return Err(Error::BracketCountMismatch);
    }
    data[j] = b']';
    Ok(serde_json::from_slice(&data[..=j])?)
}

/// Decodes a numeric JSON `data` field into the bucket matching the
/// tensor's datatype, returning the number of elements parsed.
///
/// The narrow integer types widen on this path: UINT8/16/32 land in the
/// 32-bit unsigned bucket and INT8/16/32 in the 32-bit signed one.
pub(crate) fn unmarshal_numeric_json(
    data: &mut [u8],
    shape: &[i64],
    bucket: Bucket,
    contents: &mut InferTensorContents,
) -> Result<usize> {
    let count = match bucket {
        Bucket::Bool => {
            contents.bool_contents = parse_into(data, shape)?;
            contents.bool_contents.len()
        }
        Bucket::Uint32 => {
            contents.uint_contents = parse_into(data, shape)?;
            contents.uint_contents.len()
        }
        Bucket::Uint64 => {
            contents.uint64_contents = parse_into(data, shape)?;
            contents.uint64_contents.len()
        }
        Bucket::Int32 => {
            contents.int_contents = parse_into(data, shape)?;
            contents.int_contents.len()
        }
        Bucket::Int64 => {
            contents.int64_contents = parse_into(data, shape)?;
            contents.int64_contents.len()
        }
        Bucket::Fp32 => {
            contents.fp32_contents = parse_into(data, shape)?;
            contents.fp32_contents.len()
        }
        Bucket::Fp64 => {
            contents.fp64_contents = parse_into(data, shape)?;
            contents.fp64_contents.len()
        }
        // ragged; handled by the byte-array codec
        Bucket::Bytes => {
            return Err(Error::ShapeMismatch(
                "BYTES tensors use the byte-array codec",
            ));
        }
    };
    Ok(count)
}

// ---------------------------------------------------------------------------
// TensorData
// ---------------------------------------------------------------------------

/// Decoded payload of a single response tensor, concretely typed.
///
/// On the raw-contents path the variant matches the datatype exactly --
/// an INT16 output stays `i16` -- while the typed-contents path reuses the
/// (possibly widened) protobuf buckets. Serializes as a flat JSON array in
/// row-major element order; BYTES elements serialize as base64 strings.
#[derive(Debug, Clone, PartialEq)]
pub enum TensorData {
    /// BOOL elements.
    Bool(Vec<bool>),
    /// UINT8 elements (raw path).
    Uint8(Vec<u8>),
    /// UINT16 elements (raw path).
    Uint16(Vec<u16>),
    /// UINT32 elements, or any widened unsigned typed contents.
    Uint32(Vec<u32>),
    /// UINT64 elements.
    Uint64(Vec<u64>),
    /// INT8 elements (raw path).
    Int8(Vec<i8>),
    /// INT16 elements (raw path).
    Int16(Vec<i16>),
    /// INT32 elements, or any widened signed typed contents.
    Int32(Vec<i32>),
    /// INT64 elements.
    Int64(Vec<i64>),
    /// FP32 elements.
    Fp32(Vec<f32>),
    /// FP64 elements.
    Fp64(Vec<f64>),
    /// BYTES elements; emitted as base64 strings.
    Bytes(Vec<Vec<u8>>),
}

impl Serialize for TensorData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Bool(v) => v.serialize(serializer),
            Self::Uint8(v) => v.serialize(serializer),
            Self::Uint16(v) => v.serialize(serializer),
            Self::Uint32(v) => v.serialize(serializer),
            Self::Uint64(v) => v.serialize(serializer),
            Self::Int8(v) => v.serialize(serializer),
            Self::Int16(v) => v.serialize(serializer),
            Self::Int32(v) => v.serialize(serializer),
            Self::Int64(v) => v.serialize(serializer),
            Self::Fp32(v) => v.serialize(serializer),
            Self::Fp64(v) => v.serialize(serializer),
            Self::Bytes(v) => {
                let mut seq = serializer.serialize_seq(Some(v.len()))?;
                for element in v {
                    seq.serialize_element(&STANDARD.encode(element))?;
                }
                seq.end()
            }
        }
    }
}

fn le_chunks<const N: usize, T>(raw: &[u8], convert: fn([u8; N]) -> T) -> Vec<T> {
    raw.chunks_exact(N)
        .map(|chunk| convert(chunk.try_into().unwrap()))
        .collect()
}

/// Reads a packed little-endian blob into the concrete element type of
/// `datatype`. For BYTES the blob is split by its length-prefixed framing
/// instead.
///
/// # Errors
///
/// Fails when the blob length is not exactly `count` elements, on BYTES
/// framing errors, and always for FP16.
pub(crate) fn read_raw_contents(
    raw: &[u8],
    datatype: Datatype,
    name: &str,
    count: usize,
) -> Result<TensorData> {
    if datatype == Datatype::Bytes {
        return Ok(TensorData::Bytes(split_raw_frames(raw, count)?));
    }
    if datatype == Datatype::Fp16 {
        return Err(Error::Fp16Unsupported(name.to_owned()));
    }
    let size = datatype.element_size();
    if raw.len() != count * size {
        return Err(Error::ElementCountMismatch {
            name: name.to_owned(),
            expected: count,
            actual: raw.len() / size,
        });
    }
    Ok(match datatype {
        Datatype::Bool => TensorData::Bool(raw.iter().map(|&b| b != 0).collect()),
        Datatype::Uint8 => TensorData::Uint8(raw.to_vec()),
        Datatype::Uint16 => TensorData::Uint16(le_chunks(raw, u16::from_le_bytes)),
        Datatype::Uint32 => TensorData::Uint32(le_chunks(raw, u32::from_le_bytes)),
        Datatype::Uint64 => TensorData::Uint64(le_chunks(raw, u64::from_le_bytes)),
        Datatype::Int8 => TensorData::Int8(raw.iter().map(|&b| b as i8).collect()),
        Datatype::Int16 => TensorData::Int16(le_chunks(raw, i16::from_le_bytes)),
        Datatype::Int32 => TensorData::Int32(le_chunks(raw, i32::from_le_bytes)),
        Datatype::Int64 => TensorData::Int64(le_chunks(raw, i64::from_le_bytes)),
        Datatype::Fp32 => TensorData::Fp32(le_chunks(raw, f32::from_le_bytes)),
        Datatype::Fp64 => TensorData::Fp64(le_chunks(raw, f64::from_le_bytes)),
        Datatype::Fp16 | Datatype::Bytes => unreachable!(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str, shape: &[i64], bucket: Bucket) -> Result<InferTensorContents> {
        let mut buf = json.as_bytes().to_vec();
        let mut contents = InferTensorContents::default();
        unmarshal_numeric_json(&mut buf, shape, bucket, &mut contents)?;
        Ok(contents)
    }

    #[test]
    fn flat_fp32_array() {
        let contents = decode("[1.0, 2.5, -3.0, 0.0]", &[4], Bucket::Fp32).unwrap();
        assert_eq!(contents.fp32_contents, vec![1.0, 2.5, -3.0, 0.0]);
    }

    #[test]
    fn same_values_at_every_rank() {
        let flat: Vec<i32> = (0..8).collect();
        let cases: [(&str, &[i64]); 4] = [
            ("[0,1,2,3,4,5,6,7]", &[8]),
            ("[[0,1,2,3],[4,5,6,7]]", &[2, 4]),
            ("[[[0,1],[2,3]],[[4,5],[6,7]]]", &[2, 2, 2]),
            ("[[0,1,2,3,4,5,6,7]]", &[1, 8]),
        ];
        for (json, shape) in cases {
            let contents = decode(json, shape, Bucket::Int32).unwrap();
            assert_eq!(contents.int_contents, flat, "shape {shape:?}");
        }
    }

    #[test]
    fn flat_form_accepted_for_multi_rank_shape() {
        // a rank-2 shape may still send a flat array
        let contents = decode("[1, 2, 3, 4]", &[2, 2], Bucket::Int64).unwrap();
        assert_eq!(contents.int64_contents, vec![1, 2, 3, 4]);
    }

    #[test]
    fn narrow_unsigned_values_widen_without_truncation() {
        let contents = decode("[0, 255, 300]", &[3], Bucket::Uint32).unwrap();
        assert_eq!(contents.uint_contents, vec![0, 255, 300]);
    }

    #[test]
    fn bracket_count_mismatch_rejected() {
        // shape [2,2] expects 3 opens; this has 5
        let err = decode("[[[1,2]],[[3,4]]]", &[2, 2], Bucket::Int32).unwrap_err();
        assert!(matches!(err, Error::BracketCountMismatch));
    }

    #[test]
    fn unbalanced_brackets_rejected() {
        let err = decode("[[1,2],[3,4]", &[2, 2], Bucket::Int32).unwrap_err();
        assert!(matches!(err, Error::BracketCountMismatch));
    }

    #[test]
    fn non_array_rejected() {
        let err = decode("17", &[1, 1], Bucket::Int32).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));
    }

    #[test]
    fn expected_bracket_counts() {
        assert_eq!(expected_bracket_count(&[128]), 1);
        assert_eq!(expected_bracket_count(&[]), 1);
        assert_eq!(expected_bracket_count(&[2, 64]), 3);
        assert_eq!(expected_bracket_count(&[2, 2, 32]), 7);
        assert_eq!(expected_bracket_count(&[2, 2, 2, 16]), 15);
    }

    #[test]
    fn bracket_count_matches_generated_nesting() {
        // Property: a fully nested encoding of shape S carries
        // 1 + sum of partial products of the non-innermost dimensions.
        fn nest(values: &[i64], shape: &[i64]) -> String {
            if shape.len() <= 1 {
                return format!(
                    "[{}]",
                    values.iter().map(i64::to_string).collect::<Vec<_>>().join(",")
                );
            }
            let chunk = values.len() / shape[0] as usize;
            let inner: Vec<String> = values
                .chunks(chunk)
                .map(|c| nest(c, &shape[1..]))
                .collect();
            format!("[{}]", inner.join(","))
        }
        let values: Vec<i64> = (0..24).collect();
        for shape in [&[24][..], &[2, 12][..], &[2, 3, 4][..], &[4, 3, 2][..]] {
            let json = nest(&values, shape);
            let opens = json.bytes().filter(|&b| b == b'[').count();
            assert_eq!(opens, expected_bracket_count(shape), "shape {shape:?}");
            let contents = decode(&json, shape, Bucket::Int64).unwrap();
            assert_eq!(contents.int64_contents, values, "shape {shape:?}");
        }
    }

    #[test]
    fn raw_contents_keep_narrow_types() {
        let raw: Vec<u8> = [1i16, -2, 300]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let data = read_raw_contents(&raw, Datatype::Int16, "t", 3).unwrap();
        assert_eq!(data, TensorData::Int16(vec![1, -2, 300]));
    }

    #[test]
    fn raw_contents_int64() {
        let raw = 7i64.to_le_bytes().to_vec();
        let data = read_raw_contents(&raw, Datatype::Int64, "predict", 1).unwrap();
        assert_eq!(data, TensorData::Int64(vec![7]));
        assert_eq!(serde_json::to_string(&data).unwrap(), "[7]");
    }

    #[test]
    fn raw_contents_bool_and_floats() {
        let data = read_raw_contents(&[1, 0, 2], Datatype::Bool, "t", 3).unwrap();
        assert_eq!(data, TensorData::Bool(vec![true, false, true]));

        let raw: Vec<u8> = [1.5f64, -0.25].iter().flat_map(|v| v.to_le_bytes()).collect();
        let data = read_raw_contents(&raw, Datatype::Fp64, "t", 2).unwrap();
        assert_eq!(data, TensorData::Fp64(vec![1.5, -0.25]));
    }

    #[test]
    fn raw_contents_length_must_match() {
        let raw = vec![0u8; 12];
        let err = read_raw_contents(&raw, Datatype::Fp32, "t", 4).unwrap_err();
        assert!(matches!(err, Error::ElementCountMismatch { .. }));
    }

    #[test]
    fn raw_contents_fp16_always_fails() {
        let err = read_raw_contents(&[0, 0], Datatype::Fp16, "t", 1).unwrap_err();
        assert!(matches!(err, Error::Fp16Unsupported(_)));
    }

    #[test]
    fn bytes_serialize_as_base64_strings() {
        let data = TensorData::Bytes(vec![b"String1".to_vec(), b"String2".to_vec()]);
        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            r#"["U3RyaW5nMQ==","U3RyaW5nMg=="]"#
        );
    }
}
