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

use crate::obs::body::BoundedBodyStream;
use crate::obs::error::Error;
use crate::obs::response::impl_common_response_fields;
use crate::obs::schema::{FieldValue, ResultModel};
use crate::obs::types::FromResultModel;
use crate::obs::utils::{UtcTime, from_http_header_value};
use bytes::Bytes;
use std::collections::HashMap;

/// Response of the GetObject operation
///
/// The body is in [`bytes`](Self::bytes) unless the request asked for a
/// stream or a file save.
#[derive(Debug)]
pub struct GetObjectResponse {
    model: ResultModel,
}

impl GetObjectResponse {
    pub fn etag(&self) -> Option<&str> {
        self.model.get_str("ETag")
    }

    pub fn content_type(&self) -> Option<&str> {
        self.model.get_str("ContentType")
    }

    pub fn content_length(&self) -> Option<i64> {
        self.model.get_int("ContentLength")
    }

    pub fn last_modified(&self) -> Option<UtcTime> {
        self.model
            .get_str("LastModified")
            .and_then(|s| from_http_header_value(s).ok())
    }

    /// User metadata stored with the object, keys without the header prefix.
    pub fn metadata(&self) -> Option<&HashMap<String, String>> {
        self.model.get("Metadata").and_then(|v| v.as_map())
    }

    /// The buffered object content.
    pub fn bytes(&self) -> Option<&Bytes> {
        match self.model.get("Body") {
            Some(FieldValue::Bytes(b)) => Some(b),
            _ => None,
        }
    }

    /// The body stream when the request was made with `save_as_stream`. Can
    /// be taken once.
    pub fn take_stream(&mut self) -> Option<BoundedBodyStream> {
        self.model.take_stream()
    }
}

impl_common_response_fields!(GetObjectResponse);

impl FromResultModel for GetObjectResponse {
    fn from_result_model(model: ResultModel) -> Result<Self, Error> {
        Ok(Self { model })
    }
}
