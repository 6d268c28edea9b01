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

use crate::obs::error::Error;
use crate::obs::response::impl_common_response_fields;
use crate::obs::schema::ResultModel;
use crate::obs::types::FromResultModel;
use crate::obs::utils::{UtcTime, from_http_header_value};
use std::collections::HashMap;

/// Response of the PutObject operation
#[derive(Debug)]
pub struct PutObjectResponse {
    model: ResultModel,
}

impl PutObjectResponse {
    pub fn etag(&self) -> Option<&str> {
        self.model.get_str("ETag")
    }

    /// Version created by the upload on a versioned bucket.
    pub fn version_id(&self) -> Option<&str> {
        self.model.get_str("VersionId")
    }
}

/// Response of the StatObject operation
#[derive(Debug)]
pub struct StatObjectResponse {
    model: ResultModel,
}

impl StatObjectResponse {
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
}

/// Response of the DeleteObject operation
#[derive(Debug)]
pub struct DeleteObjectResponse {
    model: ResultModel,
}

impl DeleteObjectResponse {
    /// Whether the delete created a delete marker instead of removing data.
    pub fn delete_marker(&self) -> bool {
        self.model.get_bool("DeleteMarker").unwrap_or(false)
    }

    pub fn version_id(&self) -> Option<&str> {
        self.model.get_str("VersionId")
    }
}

impl_common_response_fields!(PutObjectResponse, StatObjectResponse, DeleteObjectResponse);

impl FromResultModel for PutObjectResponse {
    fn from_result_model(model: ResultModel) -> Result<Self, Error> {
        Ok(Self { model })
    }
}

impl FromResultModel for StatObjectResponse {
    fn from_result_model(model: ResultModel) -> Result<Self, Error> {
        Ok(Self { model })
    }
}

impl FromResultModel for DeleteObjectResponse {
    fn from_result_model(model: ResultModel) -> Result<Self, Error> {
        Ok(Self { model })
    }
}
