// Rust Library for OBS and Amazon S3 Compatible Cloud Storage
// Copyright 2026 the obs-sdk authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! HTTP transport collaborator behind the execution pipeline

use crate::obs::multimap::Multimap;
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{Stream, TryStreamExt};
use http::Method;
use std::pin::Pin;
use thiserror::Error;

/// Stream of body chunks produced by a transport.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// Transport-level failures. Connect-class failures are the only retryable
/// class; everything else terminates the call.
#[derive(Clone, Debug, Error)]
pub enum TransportError {
    #[error("connect failure: {0}")]
    Connect(String),

    #[error("transport failure: {0}")]
    Other(String),
}

impl TransportError {
    pub fn is_connect(&self) -> bool {
        matches!(self, TransportError::Connect(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

/// A fully built HTTP request ready for transmission.
#[derive(Debug)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: Multimap,
    pub body: Option<Bytes>,
}

/// Body of a transport response, either fully buffered or streamed.
pub enum ResponseBody {
    Buffered(Bytes),
    Stream(ByteStream),
}

impl std::fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseBody::Buffered(b) => write!(f, "Buffered({} bytes)", b.len()),
            ResponseBody::Stream(_) => write!(f, "Stream"),
        }
    }
}

/// Raw HTTP response handed back to the execution pipeline.
#[derive(Debug)]
pub struct TransportResponse {
    pub status: u16,
    pub reason: String,
    pub headers: http::HeaderMap,
    pub body: ResponseBody,
}

/// Transport collaborator. The execution pipeline owns retry and redirect
/// handling; a transport performs exactly one HTTP exchange per call.
#[async_trait]
pub trait Transport: std::fmt::Debug + Send + Sync {
    async fn send(
        &self,
        req: TransportRequest,
        stream_response: bool,
    ) -> Result<TransportResponse, TransportError>;
}

/// Production transport backed by [`reqwest`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        // Redirects are re-signed and re-sent by the pipeline, never followed
        // by the HTTP layer.
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        req: TransportRequest,
        stream_response: bool,
    ) -> Result<TransportResponse, TransportError> {
        let mut builder = self.client.request(req.method, &req.url);
        for (key, values) in req.headers.iter_all() {
            for value in values {
                builder = builder.header(key, value);
            }
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let reason = resp
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string();
        let headers = resp.headers().clone();

        let body = if stream_response && status < 300 {
            ResponseBody::Stream(Box::pin(resp.bytes_stream().map_err(TransportError::from)))
        } else {
            ResponseBody::Buffered(resp.bytes().await?)
        };

        Ok(TransportResponse {
            status,
            reason,
            headers,
            body,
        })
    }
}
