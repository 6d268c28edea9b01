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

//! Error definitions for object storage operations

use crate::obs::error_response::ErrorResponse;
use crate::obs::transport::TransportError;
use thiserror::Error;

/// Client-side validation failures. These are raised before any network I/O
/// and are never retried.
#[derive(Debug, Error)]
pub enum ValidationErr {
    #[error("{0}")]
    InvalidBucketName(String),

    #[error("{0}")]
    InvalidObjectName(String),

    #[error("{0}")]
    InvalidBaseUrl(String),

    #[error("{0}")]
    UrlBuildError(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] http::uri::InvalidUri),

    #[error("unparsable date value: {0}")]
    TimeParseError(#[from] chrono::ParseError),

    #[error("{0}")]
    InvalidExpiry(String),

    #[error("{0}")]
    PostPolicyError(String),

    #[error("{0}")]
    MissingParameter(String),

    #[error("conflicting parameters: {0}")]
    ConflictingParameters(String),

    #[error("{0}")]
    InvalidSourceFile(String),

    #[error("at most one of save_as_stream and save_as_file may be set")]
    ConflictingSaveOptions,

    #[error("no credential provider is configured")]
    NoProvider,
}

/// Errors returned by all API operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationErr),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("retry limit exceeded after {attempts} attempts: {source}")]
    RetryLimitExceeded {
        attempts: u32,
        source: TransportError,
    },

    #[error(transparent)]
    Service(Box<ErrorResponse>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] xmltree::ParseError),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("invalid UTF-8 in response body: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("incomplete body: expected {expected} bytes, got {got}")]
    IncompleteBody { expected: u64, got: u64 },

    #[error("{0}")]
    InvalidResponse(String),
}

impl From<ErrorResponse> for Error {
    fn from(resp: ErrorResponse) -> Self {
        Error::Service(Box::new(resp))
    }
}
