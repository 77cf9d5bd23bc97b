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

//! Gateway configuration from environment variables.

use std::path::PathBuf;

use crate::error::{Error, Result};

const LISTEN_PORT_VAR: &str = "REST_PROXY_LISTEN_PORT";
const GRPC_PORT_VAR: &str = "REST_PROXY_GRPC_PORT";
const GRPC_MAX_MSG_SIZE_VAR: &str = "REST_PROXY_GRPC_MAX_MSG_SIZE_BYTES";
const USE_TLS_VAR: &str = "REST_PROXY_USE_TLS";
const TLS_CERT_VAR: &str = "MM_TLS_KEY_CERT_PATH";
const TLS_KEY_VAR: &str = "MM_TLS_PRIVATE_KEY_PATH";

const DEFAULT_LISTEN_PORT: u16 = 8008;
const DEFAULT_GRPC_PORT: u16 = 8033;
const DEFAULT_MAX_GRPC_MESSAGE_SIZE: usize = 16_777_216;

/// TLS material for the HTTPS listener.
#[derive(Debug, Clone)]
pub struct RestTls {
    /// PEM certificate chain path.
    pub cert_path: PathBuf,
    /// PEM private key path.
    pub key_path: PathBuf,
}

/// Runtime configuration of the gateway, read from the environment.
///
/// # Example
///
/// ```rust
/// use kserve_gateway::config::GatewayConfig;
///
/// let config = GatewayConfig::default();
/// assert_eq!(config.listen_port, 8008);
/// assert_eq!(config.grpc_port, 8033);
/// ```
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Port the REST listener binds on.
    pub listen_port: u16,
    /// Port of the backend gRPC inference service on localhost.
    pub grpc_port: u16,
    /// Maximum gRPC message size in bytes (both directions).
    pub max_grpc_message_size: usize,
    /// Dial the backend over TLS.
    pub backend_tls: bool,
    /// Serve the REST port over HTTPS when certificate and key are both
    /// configured.
    pub rest_tls: Option<RestTls>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_port: DEFAULT_LISTEN_PORT,
            grpc_port: DEFAULT_GRPC_PORT,
            max_grpc_message_size: DEFAULT_MAX_GRPC_MESSAGE_SIZE,
            backend_tls: false,
            rest_tls: None,
        }
    }
}

impl GatewayConfig {
    /// Reads the configuration from the process environment, falling back
    /// to defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a set variable does not parse.
    pub fn from_env() -> Result<Self> {
        let rest_tls = match (std::env::var(TLS_CERT_VAR), std::env::var(TLS_KEY_VAR)) {
            (Ok(cert), Ok(key)) if !cert.is_empty() && !key.is_empty() => Some(RestTls {
                cert_path: cert.into(),
                key_path: key.into(),
            }),
            _ => None,
        };
        Ok(Self {
            listen_port: integer_env(LISTEN_PORT_VAR, DEFAULT_LISTEN_PORT)?,
            grpc_port: integer_env(GRPC_PORT_VAR, DEFAULT_GRPC_PORT)?,
            max_grpc_message_size: integer_env(
                GRPC_MAX_MSG_SIZE_VAR,
                DEFAULT_MAX_GRPC_MESSAGE_SIZE,
            )?,
            backend_tls: std::env::var(USE_TLS_VAR).as_deref() == Ok("true"),
            rest_tls,
        })
    }
}

fn integer_env<T: std::str::FromStr>(var: &str, default: T) -> Result<T> {
    match std::env::var(var) {
        Ok(value) => value
            .parse()
            .map_err(|_| Error::Config(format!("unable to parse environment variable {var}"))),
        Err(_) => Ok(default),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
