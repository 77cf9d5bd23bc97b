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

//! The tensor datatype table.
//!
//! Every tensor on the wire carries one of thirteen datatype tags. Each tag
//! maps to a fixed element width and to the typed contents bucket of
//! [`InferTensorContents`](crate::generated::inference::InferTensorContents)
//! that holds its payload. FP16 is part of the protocol's tag set but has no
//! typed bucket; it parses (so diagnostics can name it) and fails every
//! lookup that would move data.

/// Tensor data types of the KServe v2 protocol.
///
/// These map to the string representations used on the wire
/// (e.g. `"FP32"`, `"INT64"`, `"BYTES"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Datatype {
    /// Boolean values.
    Bool,
    /// Unsigned 8-bit integers.
    Uint8,
    /// Unsigned 16-bit integers.
    Uint16,
    /// Unsigned 32-bit integers.
    Uint32,
    /// Unsigned 64-bit integers.
    Uint64,
    /// Signed 8-bit integers.
    Int8,
    /// Signed 16-bit integers.
    Int16,
    /// Signed 32-bit integers.
    Int32,
    /// Signed 64-bit integers.
    Int64,
    /// IEEE 754 half-precision (16-bit) floating point. Unsupported.
    Fp16,
    /// IEEE 754 single-precision (32-bit) floating point.
    Fp32,
    /// IEEE 754 double-precision (64-bit) floating point.
    Fp64,
    /// Variable-length byte sequences (strings).
    Bytes,
}

/// The typed contents bucket a datatype's payload lives in.
///
/// Narrow integer types widen into the 32-bit buckets, matching the
/// protobuf schema: UINT8/16/32 share [`Bucket::Uint32`] and INT8/16/32
/// share [`Bucket::Int32`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// `bool_contents`.
    Bool,
    /// `uint_contents` (u32, widened).
    Uint32,
    /// `uint64_contents`.
    Uint64,
    /// `int_contents` (i32, widened).
    Int32,
    /// `int64_contents`.
    Int64,
    /// `fp32_contents`.
    Fp32,
    /// `fp64_contents`.
    Fp64,
    /// `bytes_contents` (ragged).
    Bytes,
}

impl Datatype {
    /// Returns the wire string representation of this datatype.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kserve_gateway::datatype::Datatype;
    /// assert_eq!(Datatype::Fp32.as_str(), "FP32");
    /// assert_eq!(Datatype::Int64.as_str(), "INT64");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "BOOL",
            Self::Uint8 => "UINT8",
            Self::Uint16 => "UINT16",
            Self::Uint32 => "UINT32",
            Self::Uint64 => "UINT64",
            Self::Int8 => "INT8",
            Self::Int16 => "INT16",
            Self::Int32 => "INT32",
            Self::Int64 => "INT64",
            Self::Fp16 => "FP16",
            Self::Fp32 => "FP32",
            Self::Fp64 => "FP64",
            Self::Bytes => "BYTES",
        }
    }

    /// Parses a wire datatype string into a [`Datatype`].
    ///
    /// Returns `None` if the string does not correspond to a known tag.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BOOL" => Some(Self::Bool),
            "UINT8" => Some(Self::Uint8),
            "UINT16" => Some(Self::Uint16),
            "UINT32" => Some(Self::Uint32),
            "UINT64" => Some(Self::Uint64),
            "INT8" => Some(Self::Int8),
            "INT16" => Some(Self::Int16),
            "INT32" => Some(Self::Int32),
            "INT64" => Some(Self::Int64),
            "FP16" => Some(Self::Fp16),
            "FP32" => Some(Self::Fp32),
            "FP64" => Some(Self::Fp64),
            "BYTES" => Some(Self::Bytes),
            _ => None,
        }
    }

    /// The width of one element in bytes.
    ///
    /// For BYTES the unit is a single byte of an element's payload; element
    /// boundaries come from the length-prefixed framing instead.
    #[must_use]
    pub const fn element_size(self) -> usize {
        match self {
            Self::Bool | Self::Uint8 | Self::Int8 | Self::Bytes => 1,
            Self::Uint16 | Self::Int16 | Self::Fp16 => 2,
            Self::Uint32 | Self::Int32 | Self::Fp32 => 4,
            Self::Uint64 | Self::Int64 | Self::Fp64 => 8,
        }
    }

    /// The contents bucket this datatype deserializes into.
    ///
    /// Returns `None` for [`Datatype::Fp16`], which has no typed
    /// representation in the protocol.
    #[must_use]
    pub const fn bucket(self) -> Option<Bucket> {
        match self {
            Self::Bool => Some(Bucket::Bool),
            Self::Uint8 | Self::Uint16 | Self::Uint32 => Some(Bucket::Uint32),
            Self::Uint64 => Some(Bucket::Uint64),
            Self::Int8 | Self::Int16 | Self::Int32 => Some(Bucket::Int32),
            Self::Int64 => Some(Bucket::Int64),
            Self::Fp16 => None,
            Self::Fp32 => Some(Bucket::Fp32),
            Self::Fp64 => Some(Bucket::Fp64),
            Self::Bytes => Some(Bucket::Bytes),
        }
    }
}

impl std::fmt::Display for Datatype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Datatype {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Datatype::parse(s).ok_or_else(|| crate::error::Error::UnsupportedDatatype(s.to_owned()))
    }
}

/// The number of elements a shape describes: the product of its dimensions.
///
/// An empty shape describes a single scalar element.
#[must_use]
pub fn element_count(shape: &[i64]) -> usize {
    shape.iter().product::<i64>().max(0) as usize
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
