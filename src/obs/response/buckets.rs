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

/// Response of the CreateBucket operation
#[derive(Debug)]
pub struct CreateBucketResponse {
    model: ResultModel,
}

impl CreateBucketResponse {
    /// Location of the created bucket as reported by the service.
    pub fn location(&self) -> Option<&str> {
        self.model.get_str("Location")
    }
}

/// Response of the DeleteBucket operation
#[derive(Debug)]
pub struct DeleteBucketResponse {
    model: ResultModel,
}

impl_common_response_fields!(CreateBucketResponse, DeleteBucketResponse);

impl FromResultModel for CreateBucketResponse {
    fn from_result_model(model: ResultModel) -> Result<Self, Error> {
        Ok(Self { model })
    }
}

impl FromResultModel for DeleteBucketResponse {
    fn from_result_model(model: ResultModel) -> Result<Self, Error> {
        Ok(Self { model })
    }
}
