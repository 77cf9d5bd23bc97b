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

//! TLS support for the HTTPS listener.
//!
//! Builds a [`TlsAcceptor`] from the PEM certificate chain and private key
//! configured through the environment (see [`crate::config`]).

use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::ServerConfig;
use tokio_rustls::TlsAcceptor;

use crate::config::RestTls;
use crate::error::{Error, Result};

/// Builds a TLS acceptor for the REST listener.
///
/// # Errors
///
/// Fails when the certificate or key file cannot be read or does not
/// contain usable PEM material.
pub fn build_acceptor(tls: &RestTls) -> Result<TlsAcceptor> {
    let certs = load_certs(tls)?;
    let key = load_key(tls)?;
    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| Error::Config(format!("invalid TLS certificate or key: {e}")))?;
    Ok(TlsAcceptor::from(Arc::new(config)))
}

fn load_certs(tls: &RestTls) -> Result<Vec<CertificateDer<'static>>> {
    let mut reader = BufReader::new(File::open(&tls.cert_path)?);
    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::Config(format!("failed to read certificates: {e}")))?;
    if certs.is_empty() {
        return Err(Error::Config(format!(
            "no certificates found in {}",
            tls.cert_path.display()
        )));
    }
    Ok(certs)
}

fn load_key(tls: &RestTls) -> Result<PrivateKeyDer<'static>> {
    let mut reader = BufReader::new(File::open(&tls.key_path)?);
    rustls_pemfile::private_key(&mut reader)
        .map_err(|e| Error::Config(format!("failed to read private key: {e}")))?
        .ok_or_else(|| {
            Error::Config(format!(
                "no private key found in {}",
                tls.key_path.display()
            ))
        })
}
