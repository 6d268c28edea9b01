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

//! Core types used across this library

use crate::obs::client::{CallOpts, ObsClient};
use crate::obs::error::{Error, ValidationErr};
use crate::obs::schema::{OperationDescriptor, Params, ResultModel};
use async_trait::async_trait;

/// The signature scheme a client signs its requests with. The scheme also
/// decides which vendor header prefix request metadata and common response
/// headers travel under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignatureScheme {
    /// Legacy HMAC-SHA1 signing with `x-obs-` headers.
    #[default]
    Obs,
    /// AWS Signature Version 4 with `x-amz-` headers.
    V4,
}

impl SignatureScheme {
    pub fn header_prefix(self) -> &'static str {
        match self {
            SignatureScheme::Obs => "x-obs-",
            SignatureScheme::V4 => "x-amz-",
        }
    }

    pub fn request_id_header(self) -> &'static str {
        match self {
            SignatureScheme::Obs => "x-obs-request-id",
            SignatureScheme::V4 => "x-amz-request-id",
        }
    }

    pub fn security_token_header(self) -> &'static str {
        match self {
            SignatureScheme::Obs => "x-obs-security-token",
            SignatureScheme::V4 => "x-amz-security-token",
        }
    }
}

/// A fully-described API call: the client to run it on, the operation
/// descriptor driving request marshaling and response unmarshaling, the
/// caller's parameter values, and per-call options.
pub struct ObsCall {
    pub client: ObsClient,
    pub descriptor: &'static OperationDescriptor,
    pub params: Params,
    pub opts: CallOpts,
}

impl ObsCall {
    pub fn new(
        client: ObsClient,
        descriptor: &'static OperationDescriptor,
        params: Params,
    ) -> Self {
        Self {
            client,
            descriptor,
            params,
            opts: CallOpts::default(),
        }
    }
}

/// Convert a request builder into a ready-to-execute [`ObsCall`]. Validation
/// of the builder's arguments happens here, before any I/O.
pub trait ToObsCall: Sized {
    fn to_obs_call(self) -> Result<ObsCall, ValidationErr>;
}

/// Convert the generic result of an executed call into a typed response.
pub trait FromResultModel: Sized {
    fn from_result_model(model: ResultModel) -> Result<Self, Error>;
}

/// The typed entry point of every operation: `send` executes the call on the
/// client's async runtime, `send_blocking` drives the same future to
/// completion on a private current-thread runtime.
#[async_trait]
pub trait ObsApi: ToObsCall + Send + Sync {
    type Response: FromResultModel;

    async fn send(self) -> Result<Self::Response, Error> {
        let call = self.to_obs_call()?;
        let client = call.client.clone();
        let model = client
            .invoke(call.descriptor, call.params, call.opts)
            .await?;
        Self::Response::from_result_model(model)
    }

    fn send_blocking(self) -> Result<Self::Response, Error> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.send())
    }
}
