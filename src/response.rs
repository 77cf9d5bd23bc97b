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

//! Encoding of [`ModelInferResponse`] into the REST v2 response body.
//!
//! Output payloads come from `raw_output_contents` when the backend sent
//! packed blobs (indexed by output position), otherwise from each tensor's
//! typed contents bucket. Every BYTES output is annotated with
//! `content_type: base64` and its elements emit as base64 strings. The
//! `data` arrays are always flat, in row-major element order.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::datatype::{element_count, Bucket, Datatype};
use crate::error::{Error, Result};
use crate::generated::inference::{InferTensorContents, ModelInferResponse};
use crate::params::{encode_parameters, BASE64, CONTENT_TYPE};
use crate::tensor::{read_raw_contents, TensorData};

/// A REST v2 inference response body.
#[derive(Debug, Serialize)]
pub(crate) struct RestResponse {
    #[serde(skip_serializing_if = "String::is_empty")]
    model_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    model_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    id: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    parameters: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    outputs: Vec<RestOutputTensor>,
}

/// A single output tensor of the REST response.
#[derive(Debug, Serialize)]
struct RestOutputTensor {
    #[serde(skip_serializing_if = "String::is_empty")]
    name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    datatype: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    shape: Vec<i64>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    parameters: Map<String, Value>,
    data: TensorData,
}

/// Transforms a gRPC inference reply into its REST body.
///
/// # Errors
///
/// Fails on unsupported datatypes, FP16 outputs, and raw contents whose
/// length does not match the tensor's shape.
pub(crate) fn transform_response(reply: &ModelInferResponse) -> Result<RestResponse> {
    let mut outputs = Vec::with_capacity(reply.outputs.len());
    for (index, output) in reply.outputs.iter().enumerate() {
        let datatype = Datatype::parse(&output.datatype)
            .ok_or_else(|| Error::UnsupportedDatatype(output.datatype.clone()))?;
        if datatype == Datatype::Fp16 {
            return Err(Error::Fp16Unsupported(output.name.clone()));
        }

        let mut parameters = encode_parameters(&output.parameters);
        if datatype == Datatype::Bytes {
            parameters.insert(CONTENT_TYPE.to_owned(), Value::String(BASE64.to_owned()));
        }

        let data = if reply.raw_output_contents.is_empty() {
            typed_contents_data(datatype, output.contents.as_ref())
        } else {
            let raw = reply.raw_output_contents.get(index).ok_or(
                Error::ShapeMismatch("missing raw output contents for tensor"),
            )?;
            read_raw_contents(raw, datatype, &output.name, element_count(&output.shape))?
        };

        outputs.push(RestOutputTensor {
            name: output.name.clone(),
            datatype: output.datatype.clone(),
            shape: output.shape.clone(),
            parameters,
            data,
        });
    }

    Ok(RestResponse {
        model_name: reply.model_name.clone(),
        model_version: reply.model_version.clone(),
        id: reply.id.clone(),
        parameters: encode_parameters(&reply.parameters),
        outputs,
    })
}

/// Emits the contents bucket matching the datatype. Absent contents emit
/// as an empty payload of the right type.
fn typed_contents_data(datatype: Datatype, contents: Option<&InferTensorContents>) -> TensorData {
    let empty;
    let contents = match contents {
        Some(contents) => contents,
        None => {
            empty = InferTensorContents::default();
            &empty
        }
    };
    // FP16 was rejected above, so a bucket always exists.
    match datatype.bucket() {
        Some(Bucket::Bool) => TensorData::Bool(contents.bool_contents.clone()),
        Some(Bucket::Uint32) => TensorData::Uint32(contents.uint_contents.clone()),
        Some(Bucket::Uint64) => TensorData::Uint64(contents.uint64_contents.clone()),
        Some(Bucket::Int32) => TensorData::Int32(contents.int_contents.clone()),
        Some(Bucket::Int64) => TensorData::Int64(contents.int64_contents.clone()),
        Some(Bucket::Fp32) => TensorData::Fp32(contents.fp32_contents.clone()),
        Some(Bucket::Fp64) => TensorData::Fp64(contents.fp64_contents.clone()),
        Some(Bucket::Bytes) | None => TensorData::Bytes(contents.bytes_contents.clone()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generated::inference::model_infer_response::InferOutputTensor;

    fn reply_with_output(output: InferOutputTensor) -> ModelInferResponse {
        ModelInferResponse {
            model_name: "example".into(),
            id: "foo".into(),
            outputs: vec![output],
            ..Default::default()
        }
    }

    #[test]
    fn typed_int64_contents() {
        let reply = reply_with_output(InferOutputTensor {
            name: "predict".into(),
            datatype: "INT64".into(),
            shape: vec![2],
            contents: Some(InferTensorContents {
                int64_contents: vec![8, 8],
                ..Default::default()
            }),
            ..Default::default()
        });
        let body = serde_json::to_string(&transform_response(&reply).unwrap()).unwrap();
        assert_eq!(
            body,
            r#"{"model_name":"example","id":"foo","outputs":[{"name":"predict","datatype":"INT64","shape":[2],"data":[8,8]}]}"#
        );
    }

    #[test]
    fn empty_fields_are_omitted() {
        let reply = ModelInferResponse {
            model_name: "example".into(),
            model_version: "2".into(),
            ..Default::default()
        };
        let body = serde_json::to_string(&transform_response(&reply).unwrap()).unwrap();
        assert_eq!(body, r#"{"model_name":"example","model_version":"2"}"#);
    }

    #[test]
    fn bytes_outputs_are_annotated_base64() {
        let reply = reply_with_output(InferOutputTensor {
            name: "classes".into(),
            datatype: "BYTES".into(),
            shape: vec![2],
            contents: Some(InferTensorContents {
                bytes_contents: vec![b"cat".to_vec(), b"dog".to_vec()],
                ..Default::default()
            }),
            ..Default::default()
        });
        let rest = transform_response(&reply).unwrap();
        let value = serde_json::to_value(&rest).unwrap();
        assert_eq!(value["outputs"][0]["parameters"]["content_type"], "base64");
        assert_eq!(value["outputs"][0]["data"][0], "Y2F0");
        assert_eq!(value["outputs"][0]["data"][1], "ZG9n");
    }

    #[test]
    fn fp16_output_is_rejected() {
        let reply = reply_with_output(InferOutputTensor {
            name: "half".into(),
            datatype: "FP16".into(),
            shape: vec![1],
            ..Default::default()
        });
        assert!(matches!(
            transform_response(&reply),
            Err(Error::Fp16Unsupported(_))
        ));
    }

    #[test]
    fn unknown_datatype_is_rejected() {
        let reply = reply_with_output(InferOutputTensor {
            name: "odd".into(),
            datatype: "COMPLEX64".into(),
            shape: vec![1],
            ..Default::default()
        });
        assert!(matches!(
            transform_response(&reply),
            Err(Error::UnsupportedDatatype(_))
        ));
    }

    #[test]
    fn raw_contents_are_selected_by_position() {
        let mut reply = ModelInferResponse {
            model_name: "example".into(),
            ..Default::default()
        };
        for (i, name) in ["a", "b"].iter().enumerate() {
            reply.outputs.push(InferOutputTensor {
                name: (*name).into(),
                datatype: "INT32".into(),
                shape: vec![1],
                ..Default::default()
            });
            reply
                .raw_output_contents
                .push((i as i32 + 10).to_le_bytes().to_vec());
        }
        let value = serde_json::to_value(&transform_response(&reply).unwrap()).unwrap();
        assert_eq!(value["outputs"][0]["data"][0], 10);
        assert_eq!(value["outputs"][1]["data"][0], 11);
    }
}
