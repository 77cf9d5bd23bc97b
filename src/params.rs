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

//! Bidirectional conversion between JSON parameter objects and the
//! protobuf [`InferParameter`] map.
//!
//! Parameters are typed scalars: string, int64, boolean, or unset. JSON has
//! no integer type, so numbers convert through int64 -- an exact conversion
//! for integral values, a truncate-and-warn for fractional ones. Arrays and
//! objects are not representable and are dropped with a warning.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::generated::inference::infer_parameter::ParameterChoice;
use crate::generated::inference::InferParameter;

/// A tensor's (or request's) parameter map as carried on the gRPC wire.
pub type ParameterMap = HashMap<String, InferParameter>;

/// Parameter key selecting the on-wire encoding of a BYTES tensor.
pub const CONTENT_TYPE: &str = "content_type";

/// `content_type` value marking base64 payloads.
pub const BASE64: &str = "base64";

/// Parameter with no value set. Shared by every `null` JSON parameter.
pub const NIL_PARAM: InferParameter = InferParameter {
    parameter_choice: None,
};

/// Boolean `true` parameter.
pub const TRUE_PARAM: InferParameter = InferParameter {
    parameter_choice: Some(ParameterChoice::BoolParam(true)),
};

/// Boolean `false` parameter.
pub const FALSE_PARAM: InferParameter = InferParameter {
    parameter_choice: Some(ParameterChoice::BoolParam(false)),
};

/// Converts a decoded JSON object into a wire parameter map.
///
/// Strings, integral numbers, booleans, and nulls convert directly.
/// Fractional numbers truncate toward zero into int64 and log a warning.
/// Arrays and objects are dropped with a warning.
#[must_use]
pub fn decode_parameters(object: &Map<String, Value>) -> ParameterMap {
    let mut params = ParameterMap::with_capacity(object.len());
    for (key, value) in object {
        let param = match value {
            Value::String(s) => InferParameter {
                parameter_choice: Some(ParameterChoice::StringParam(s.clone())),
            },
            Value::Number(n) => {
                let int_val = if let Some(i) = n.as_i64() {
                    i
                } else {
                    // f64 is the only remaining representation; truncation
                    // toward zero matches the `as` cast.
                    let f = n.as_f64().unwrap_or_default();
                    let i = f as i64;
                    if i as f64 != f {
                        tracing::warn!(
                            parameter = %key,
                            value = f,
                            "number parameter lost precision during int conversion"
                        );
                    }
                    i
                };
                InferParameter {
                    parameter_choice: Some(ParameterChoice::Int64Param(int_val)),
                }
            }
            Value::Bool(true) => TRUE_PARAM,
            Value::Bool(false) => FALSE_PARAM,
            Value::Null => NIL_PARAM,
            Value::Array(_) | Value::Object(_) => {
                tracing::warn!(
                    parameter = %key,
                    "could not convert parameter of unsupported type (json array or object)"
                );
                continue;
            }
        };
        params.insert(key.clone(), param);
    }
    params
}

/// Converts a wire parameter map back into a JSON object.
///
/// A parameter with no value set emits JSON `null`. Keys come out in the
/// map's iteration order; `serde_json` sorts them on serialization.
#[must_use]
pub fn encode_parameters(params: &ParameterMap) -> Map<String, Value> {
    let mut object = Map::new();
    for (key, param) in params {
        let value = match &param.parameter_choice {
            Some(ParameterChoice::BoolParam(b)) => Value::Bool(*b),
            Some(ParameterChoice::Int64Param(i)) => Value::Number((*i).into()),
            Some(ParameterChoice::StringParam(s)) => Value::String(s.clone()),
            None => Value::Null,
        };
        object.insert(key.clone(), value);
    }
    object
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
