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

//! Error types for the gateway.
//!
//! This module defines [`Error`] -- the unified error type returned by all
//! fallible operations -- along with the [`Result`] type alias used throughout
//! the crate. Tensor decode errors answer with HTTP 400 on the REST surface,
//! encode errors with HTTP 500; see [`Error::is_decode`].

/// Convenience alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that may occur while translating between the REST and gRPC forms
/// of an inference request or response.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A tensor carried a datatype tag outside the protocol's closed set.
    #[error("unsupported datatype: {0}")]
    UnsupportedDatatype(String),

    /// FP16 tensors have no typed contents representation and are rejected.
    #[error("FP16 tensors not supported (tensor {0})")]
    Fp16Unsupported(String),

    /// The body (or a tensor's `data` field) was not valid JSON.
    #[error("malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// The nesting depth of a tensor's `data` array does not match its
    /// shape.
    #[error("invalid tensor data: {0}")]
    ShapeMismatch(&'static str),

    /// A nested numeric array had the wrong total number of brackets for
    /// the declared shape.
    #[error("invalid tensor data: invalid nested json arrays")]
    BracketCountMismatch,

    /// A tensor held more or fewer elements than its shape allows.
    #[error("tensor data for {name} has {actual} elements, shape requires {expected}")]
    ElementCountMismatch {
        /// Name of the offending tensor.
        name: String,
        /// Elements implied by the shape.
        expected: usize,
        /// Elements actually present.
        actual: usize,
    },

    /// A JSON string contained an invalid escape sequence.
    #[error("invalid escaped char in json string")]
    BadEscape,

    /// A payload flagged as base64 did not decode.
    #[error("error decoding json string as base64: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// A length-prefix scan over raw BYTES contents ran past the end of
    /// the blob.
    #[error("unexpected end of raw tensor bytes")]
    RawBytesTruncated,

    /// A length-prefix scan over raw BYTES contents finished with bytes
    /// left over.
    #[error("more raw tensor bytes than expected")]
    RawBytesExcess,

    /// The backend returned a gRPC status error.
    #[error("gRPC error (code={code}): {message}")]
    Grpc {
        /// The gRPC status code.
        code: tonic::Code,
        /// The error message from the backend.
        message: String,
    },

    /// The gRPC transport layer returned an error.
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// An I/O error from the listener or TLS setup.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The environment held an unusable configuration value.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for errors produced while decoding a client request body.
    ///
    /// The REST surface answers these with HTTP 400; everything else is a
    /// server-side failure and answers with HTTP 500.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedDatatype(_)
                | Self::Fp16Unsupported(_)
                | Self::MalformedJson(_)
                | Self::ShapeMismatch(_)
                | Self::BracketCountMismatch
                | Self::ElementCountMismatch { .. }
                | Self::BadEscape
                | Self::Base64Decode(_)
                | Self::RawBytesTruncated
                | Self::RawBytesExcess
        )
    }
}

impl From<tonic::Status> for Error {
    fn from(status: tonic::Status) -> Self {
        Self::Grpc {
            code: status.code(),
            message: status.message().to_owned(),
        }
    }
}
