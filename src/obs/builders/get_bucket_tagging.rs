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

use crate::obs::client::ObsClient;
use crate::obs::error::ValidationErr;
use crate::obs::operations::GET_BUCKET_TAGGING;
use crate::obs::response::GetBucketTaggingResponse;
use crate::obs::schema::Params;
use crate::obs::types::{ObsApi, ObsCall, ToObsCall};
use typed_builder::TypedBuilder;

/// Argument builder for the GetBucketTagging operation
#[derive(Clone, Debug, TypedBuilder)]
pub struct GetBucketTagging {
    #[builder(!default)]
    client: ObsClient,
    #[builder(!default, setter(into))]
    bucket: String,
}

impl ObsApi for GetBucketTagging {
    type Response = GetBucketTaggingResponse;
}

/// Builder type for GetBucketTagging
pub type GetBucketTaggingBldr = GetBucketTaggingBuilder<((ObsClient,), (String,))>;

impl ToObsCall for GetBucketTagging {
    fn to_obs_call(self) -> Result<ObsCall, ValidationErr> {
        let mut params = Params::new();
        params.set_str("Bucket", self.bucket);
        Ok(ObsCall::new(self.client, &GET_BUCKET_TAGGING, params))
    }
}
