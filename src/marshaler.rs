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

//! The JSON marshaler consumed by the gateway's route handlers.
//!
//! Inference requests and responses go through the tensor-aware codecs of
//! [`crate::request`] and [`crate::response`]; everything else -- health
//! and metadata messages -- takes the stock serde path. This mirrors the
//! split a generic proto-JSON marshaler cannot make: the REST tensor
//! representation has no faithful rendering in plain proto-JSON.
//!
//! # Example
//!
//! ```rust
//! use kserve_gateway::marshaler::JsonMarshaler;
//!
//! let body = br#"{
//!     "inputs": [{"name": "in", "datatype": "INT32", "shape": [2], "data": [1, 2]}]
//! }"#;
//! let request = JsonMarshaler.decode_infer_request(body).unwrap();
//! assert_eq!(request.inputs[0].contents.as_ref().unwrap().int_contents, [1, 2]);
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::generated::inference::{ModelInferRequest, ModelInferResponse};
use crate::{request, response};

/// Stateless JSON codec for the REST surface.
///
/// Cheap to construct and copy; handlers use it by value.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMarshaler;

impl JsonMarshaler {
    /// Decodes one REST inference request body into a [`ModelInferRequest`].
    ///
    /// # Errors
    ///
    /// Returns a decode error for malformed JSON or any tensor that does
    /// not satisfy its declared datatype and shape.
    pub fn decode_infer_request(&self, body: &[u8]) -> Result<ModelInferRequest> {
        request::decode_infer_request(body)
    }

    /// Decodes one JSON value into any deserializable target. Stock path
    /// for non-predict payloads.
    ///
    /// # Errors
    ///
    /// Returns a decode error when the body does not match the target.
    pub fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Encodes an inference reply as the REST response body.
    ///
    /// # Errors
    ///
    /// Fails on unsupported datatypes, FP16 outputs, and malformed raw
    /// contents.
    pub fn marshal_infer_response(&self, reply: &ModelInferResponse) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&response::transform_response(reply)?)?)
    }

    /// Encodes any serializable value as a JSON document. Stock path for
    /// non-predict payloads.
    ///
    /// # Errors
    ///
    /// Fails when the value cannot be represented as JSON.
    pub fn marshal<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(value)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generated::inference::ServerLiveResponse;

    #[test]
    fn stock_paths_handle_non_predict_messages() {
        let body = JsonMarshaler.marshal(&ServerLiveResponse { live: true }).unwrap();
        assert_eq!(body, br#"{"live":true}"#);

        let value: serde_json::Value = JsonMarshaler.decode(&body).unwrap();
        assert_eq!(value["live"], serde_json::Value::Bool(true));
    }

    #[test]
    fn predict_path_is_tensor_aware() {
        let body = br#"{
            "inputs": [{"name": "in", "datatype": "UINT8", "shape": [3], "data": [1, 2, 3]}]
        }"#;
        let request = JsonMarshaler.decode_infer_request(body).unwrap();
        // widened into the 32-bit unsigned bucket
        assert_eq!(
            request.inputs[0].contents.as_ref().unwrap().uint_contents,
            [1, 2, 3]
        );
    }
}
