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

//! REST-to-gRPC gateway for the KServe v2 model inference protocol.
//!
//! This crate accepts JSON inference requests over HTTP, forwards them as
//! [`ModelInferRequest`](generated::inference::ModelInferRequest) messages
//! to a backend gRPC inference service, and translates the replies back
//! into the REST v2 JSON body. The heart of the crate is the tensor codec
//! behind [`marshaler::JsonMarshaler`]: a bidirectional translation between
//! the JSON tensor representation (numeric arrays of arbitrary nesting,
//! UTF-8/base64/byte-array BYTES payloads) and the typed protobuf contents
//! buckets, with no dynamic value tree in between.
//!
//! # Quick Start
//!
//! ```rust
//! use kserve_gateway::generated::inference::ModelInferResponse;
//! use kserve_gateway::marshaler::JsonMarshaler;
//!
//! # fn example() -> kserve_gateway::error::Result<()> {
//! let marshaler = JsonMarshaler;
//!
//! // REST body -> gRPC request
//! let body = br#"{
//!     "id": "req-1",
//!     "inputs": [
//!         {"name": "input0", "datatype": "FP32", "shape": [2, 2],
//!          "data": [[1.0, 2.0], [3.0, 4.0]]}
//!     ]
//! }"#;
//! let request = marshaler.decode_infer_request(body)?;
//! assert_eq!(
//!     request.inputs[0].contents.as_ref().unwrap().fp32_contents,
//!     [1.0, 2.0, 3.0, 4.0]
//! );
//!
//! // gRPC reply -> REST body
//! let reply = ModelInferResponse::default();
//! let json = marshaler.marshal_infer_response(&reply)?;
//! # let _ = json;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Modules
//!
//! - [`gateway`] -- The HTTP surface and the backend gRPC channel.
//! - [`marshaler`] -- The JSON codec the route handlers consume.
//! - [`datatype`] -- The 13-tag datatype table.
//! - [`params`] -- JSON scalar <-> `InferParameter` conversion.
//! - [`config`] -- Environment-variable configuration.
//! - [`error`] -- Error types and the [`Result`](error::Result) alias.
//! - [`generated`] -- Raw protobuf/gRPC types for the v2 protocol.

pub mod config;
pub mod datatype;
pub mod error;
pub mod gateway;
pub mod generated;
pub mod marshaler;
pub mod params;
pub mod tls;

mod bytes;
mod request;
mod response;
mod tensor;

/// Re-export of the gateway entry point for convenience.
pub use gateway::Gateway;
