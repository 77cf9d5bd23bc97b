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

//! Decoding of REST inference request bodies into [`ModelInferRequest`].
//!
//! Input tensors decode in two phases. Phase one pulls the metadata --
//! name, datatype, shape, parameters -- while capturing the `data` field as
//! raw JSON text. Phase two, with the destination bucket and BYTES content
//! type known, copies that text into an owned scratch buffer and hands it
//! to the tensor codecs, which compact it in place and parse it straight
//! into a freshly allocated [`InferTensorContents`].

use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::{Map, Value};

use crate::bytes::{is_base64_content, unmarshal_bytes_json};
use crate::datatype::{element_count, Bucket, Datatype};
use crate::error::{Error, Result};
use crate::generated::inference::model_infer_request::{
    InferInputTensor, InferRequestedOutputTensor,
};
use crate::generated::inference::{InferTensorContents, ModelInferRequest};
use crate::params::decode_parameters;
use crate::tensor::unmarshal_numeric_json;

/// A REST v2 inference request body, phase one of the decode.
#[derive(Deserialize)]
struct RestRequest<'a> {
    #[serde(default)]
    id: String,
    #[serde(default)]
    parameters: Option<Map<String, Value>>,
    #[serde(default, borrow)]
    inputs: Vec<RestInputTensor<'a>>,
    #[serde(default)]
    outputs: Vec<RestRequestedOutput>,
}

/// An input tensor with its `data` field still un-parsed.
#[derive(Deserialize)]
struct RestInputTensor<'a> {
    name: String,
    datatype: String,
    shape: Vec<i64>,
    #[serde(default)]
    parameters: Option<Map<String, Value>>,
    #[serde(borrow)]
    data: &'a RawValue,
}

/// A requested output tensor; forwarded to the backend unchanged.
#[derive(Deserialize)]
struct RestRequestedOutput {
    name: String,
    #[serde(default)]
    parameters: Option<Map<String, Value>>,
}

/// Decodes a REST request body into a [`ModelInferRequest`].
///
/// `model_name` and `model_version` are not part of the body; the caller
/// stamps them from the request path.
///
/// # Errors
///
/// Fails on malformed JSON, unsupported datatypes, FP16 tensors, and any
/// tensor whose `data` does not match its declared shape.
pub(crate) fn decode_infer_request(body: &[u8]) -> Result<ModelInferRequest> {
    let rest: RestRequest = serde_json::from_slice(body)?;

    let mut request = ModelInferRequest {
        id: rest.id,
        parameters: rest
            .parameters
            .as_ref()
            .map(decode_parameters)
            .unwrap_or_default(),
        inputs: Vec::with_capacity(rest.inputs.len()),
        ..Default::default()
    };
    for input in rest.inputs {
        request.inputs.push(decode_input_tensor(input)?);
    }
    for output in rest.outputs {
        request.outputs.push(InferRequestedOutputTensor {
            name: output.name,
            parameters: output
                .parameters
                .as_ref()
                .map(decode_parameters)
                .unwrap_or_default(),
        });
    }
    Ok(request)
}

fn decode_input_tensor(tensor: RestInputTensor<'_>) -> Result<InferInputTensor> {
    let datatype = Datatype::parse(&tensor.datatype)
        .ok_or_else(|| Error::UnsupportedDatatype(tensor.datatype.clone()))?;
    let bucket = datatype
        .bucket()
        .ok_or_else(|| Error::Fp16Unsupported(tensor.name.clone()))?;
    let parameters = tensor
        .parameters
        .as_ref()
        .map(decode_parameters)
        .unwrap_or_default();

    // Phase two: the codecs own and mutate this copy of the data text.
    let mut scratch = tensor.data.get().as_bytes().to_vec();
    let mut contents = InferTensorContents::default();
    let count = if bucket == Bucket::Bytes {
        let b64 = is_base64_content(&parameters);
        contents.bytes_contents = unmarshal_bytes_json(&mut scratch, &tensor.shape, b64)?;
        contents.bytes_contents.len()
    } else {
        unmarshal_numeric_json(&mut scratch, &tensor.shape, bucket, &mut contents)?
    };

    let expected = element_count(&tensor.shape);
    if count != expected {
        return Err(Error::ElementCountMismatch {
            name: tensor.name,
            expected,
            actual: count,
        });
    }

    Ok(InferInputTensor {
        name: tensor.name,
        datatype: tensor.datatype,
        shape: tensor.shape,
        parameters,
        contents: Some(contents),
    })
}
