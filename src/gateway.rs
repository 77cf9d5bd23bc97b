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

//! The REST surface of the gateway.
//!
//! [`Gateway`] holds a shared channel to the backend gRPC inference
//! service and exposes the KServe v2 REST routes. Inference bodies go
//! through the tensor-aware [`JsonMarshaler`] paths; health and metadata
//! responses take its stock JSON path.

use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::error::{Error, Result};
use crate::generated::inference::grpc_inference_service_client::GrpcInferenceServiceClient;
use crate::generated::inference::{
    ModelMetadataRequest, ModelReadyRequest, ServerLiveRequest, ServerMetadataRequest,
    ServerReadyRequest,
};
use crate::marshaler::JsonMarshaler;
use crate::tls;

/// REST front end over a backend gRPC inference service.
///
/// Cheaply cloneable -- clones share the underlying channel, so one
/// `Gateway` serves every connection.
#[derive(Debug, Clone)]
pub struct Gateway {
    backend: GrpcInferenceServiceClient<Channel>,
    marshaler: JsonMarshaler,
}

impl Gateway {
    /// Sets up the backend channel described by `config`.
    ///
    /// The channel connects lazily; an unreachable backend surfaces as
    /// `Unavailable` on the first proxied request rather than at startup.
    ///
    /// # Errors
    ///
    /// Returns an error for an unusable backend address or TLS setup.
    pub async fn connect(config: &GatewayConfig) -> Result<Self> {
        let scheme = if config.backend_tls { "https" } else { "http" };
        let address = format!("{scheme}://localhost:{}", config.grpc_port);
        tracing::info!(
            address,
            max_message_size = config.max_grpc_message_size,
            "registering gRPC inference service backend"
        );

        let mut endpoint = Endpoint::from_shared(address)
            .map_err(|e| Error::Config(format!("invalid backend address: {e}")))?;
        if config.backend_tls {
            tracing::info!("using TLS for the backend connection");
            endpoint = endpoint.tls_config(ClientTlsConfig::new().with_native_roots())?;
        }
        let channel = endpoint.connect_lazy();

        let backend = GrpcInferenceServiceClient::new(channel)
            .max_decoding_message_size(config.max_grpc_message_size)
            .max_encoding_message_size(config.max_grpc_message_size);

        Ok(Self {
            backend,
            marshaler: JsonMarshaler,
        })
    }

    /// Builds the KServe v2 REST route table.
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .route("/v2", get(server_metadata))
            .route("/v2/health/live", get(server_live))
            .route("/v2/health/ready", get(server_ready))
            .route("/v2/models/:model_name", get(model_metadata))
            .route("/v2/models/:model_name/ready", get(model_ready))
            .route("/v2/models/:model_name/infer", post(infer))
            .route(
                "/v2/models/:model_name/versions/:model_version",
                get(model_metadata_versioned),
            )
            .route(
                "/v2/models/:model_name/versions/:model_version/ready",
                get(model_ready_versioned),
            )
            .route(
                "/v2/models/:model_name/versions/:model_version/infer",
                post(infer_versioned),
            )
            .layer(tower::ServiceBuilder::new().layer(TraceLayer::new_for_http()))
            .with_state(self.clone())
    }

    /// Binds the REST listener and serves until the process exits.
    ///
    /// # Errors
    ///
    /// Returns an error when the listener cannot bind or the TLS material
    /// cannot be loaded.
    pub async fn serve(self, config: &GatewayConfig) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
        let router = self.router();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        let Some(rest_tls) = &config.rest_tls else {
            tracing::info!(port = config.listen_port, "listening");
            axum::serve(listener, router).await?;
            return Ok(());
        };

        let acceptor = tls::build_acceptor(rest_tls)?;
        tracing::info!(port = config.listen_port, "listening with TLS");
        loop {
            let (stream, _peer) = listener.accept().await?;
            let acceptor = acceptor.clone();
            let service = hyper_util::service::TowerToHyperService::new(router.clone());
            tokio::spawn(async move {
                let stream = match acceptor.accept(stream).await {
                    Ok(stream) => stream,
                    Err(e) => {
                        tracing::warn!(error = %e, "TLS handshake failed");
                        return;
                    }
                };
                if let Err(e) = hyper::server::conn::http1::Builder::new()
                    .serve_connection(hyper_util::rt::TokioIo::new(stream), service)
                    .await
                {
                    tracing::debug!(error = %e, "connection error");
                }
            });
        }
    }

    async fn handle_infer(&self, model_name: String, model_version: String, body: Bytes) -> Response {
        let mut request = match self.marshaler.decode_infer_request(&body) {
            Ok(request) => request,
            Err(e) => return error_response(&e),
        };
        tracing::info!(model = %model_name, "received REST inference request");
        request.model_name = model_name;
        request.model_version = model_version;

        let reply = match self.backend.clone().model_infer(request).await {
            Ok(reply) => reply.into_inner(),
            Err(status) => return status_response(&status),
        };

        match self.marshaler.marshal_infer_response(&reply) {
            Ok(body) => json_response(StatusCode::OK, body),
            Err(e) => {
                tracing::error!(error = %e, "failed to marshal inference response");
                json_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_body(&e.to_string()),
                )
            }
        }
    }

    fn marshal_reply<T: serde::Serialize>(&self, reply: &T) -> Response {
        match self.marshaler.marshal(reply) {
            Ok(body) => json_response(StatusCode::OK, body),
            Err(e) => error_response(&e),
        }
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn server_live(State(gateway): State<Gateway>) -> Response {
    match gateway.backend.clone().server_live(ServerLiveRequest {}).await {
        Ok(reply) => gateway.marshal_reply(&reply.into_inner()),
        Err(status) => status_response(&status),
    }
}

async fn server_ready(State(gateway): State<Gateway>) -> Response {
    match gateway.backend.clone().server_ready(ServerReadyRequest {}).await {
        Ok(reply) => gateway.marshal_reply(&reply.into_inner()),
        Err(status) => status_response(&status),
    }
}

async fn server_metadata(State(gateway): State<Gateway>) -> Response {
    match gateway
        .backend
        .clone()
        .server_metadata(ServerMetadataRequest {})
        .await
    {
        Ok(reply) => gateway.marshal_reply(&reply.into_inner()),
        Err(status) => status_response(&status),
    }
}

async fn model_ready(State(gateway): State<Gateway>, Path(model_name): Path<String>) -> Response {
    model_ready_inner(gateway, model_name, String::new()).await
}

async fn model_ready_versioned(
    State(gateway): State<Gateway>,
    Path((model_name, model_version)): Path<(String, String)>,
) -> Response {
    model_ready_inner(gateway, model_name, model_version).await
}

async fn model_ready_inner(gateway: Gateway, name: String, version: String) -> Response {
    match gateway
        .backend
        .clone()
        .model_ready(ModelReadyRequest { name, version })
        .await
    {
        Ok(reply) => gateway.marshal_reply(&reply.into_inner()),
        Err(status) => status_response(&status),
    }
}

async fn model_metadata(State(gateway): State<Gateway>, Path(model_name): Path<String>) -> Response {
    model_metadata_inner(gateway, model_name, String::new()).await
}

async fn model_metadata_versioned(
    State(gateway): State<Gateway>,
    Path((model_name, model_version)): Path<(String, String)>,
) -> Response {
    model_metadata_inner(gateway, model_name, model_version).await
}

async fn model_metadata_inner(gateway: Gateway, name: String, version: String) -> Response {
    match gateway
        .backend
        .clone()
        .model_metadata(ModelMetadataRequest { name, version })
        .await
    {
        Ok(reply) => gateway.marshal_reply(&reply.into_inner()),
        Err(status) => status_response(&status),
    }
}

async fn infer(
    State(gateway): State<Gateway>,
    Path(model_name): Path<String>,
    body: Bytes,
) -> Response {
    gateway.handle_infer(model_name, String::new(), body).await
}

async fn infer_versioned(
    State(gateway): State<Gateway>,
    Path((model_name, model_version)): Path<(String, String)>,
    body: Bytes,
) -> Response {
    gateway.handle_infer(model_name, model_version, body).await
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(body))
        .unwrap_or_default()
}

fn error_body(message: &str) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({ "error": message })).unwrap_or_default()
}

fn error_response(error: &Error) -> Response {
    let status = if error.is_decode() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    json_response(status, error_body(&error.to_string()))
}

fn status_response(status: &tonic::Status) -> Response {
    json_response(http_status(status.code()), error_body(status.message()))
}

/// The standard gRPC to HTTP status code mapping.
fn http_status(code: tonic::Code) -> StatusCode {
    use tonic::Code;
    match code {
        Code::Ok => StatusCode::OK,
        Code::InvalidArgument | Code::FailedPrecondition | Code::OutOfRange => {
            StatusCode::BAD_REQUEST
        }
        Code::NotFound => StatusCode::NOT_FOUND,
        Code::AlreadyExists | Code::Aborted => StatusCode::CONFLICT,
        Code::PermissionDenied => StatusCode::FORBIDDEN,
        Code::Unauthenticated => StatusCode::UNAUTHORIZED,
        Code::ResourceExhausted => StatusCode::TOO_MANY_REQUESTS,
        Code::Unimplemented => StatusCode::NOT_IMPLEMENTED,
        Code::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        Code::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
