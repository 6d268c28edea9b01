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
use crate::obs::operations::DELETE_BUCKET;
use crate::obs::response::DeleteBucketResponse;
use crate::obs::schema::Params;
use crate::obs::types::{ObsApi, ObsCall, ToObsCall};
use typed_builder::TypedBuilder;

/// Argument builder for the DeleteBucket operation
///
/// The bucket must be empty.
#[derive(Clone, Debug, TypedBuilder)]
pub struct DeleteBucket {
    #[builder(!default)]
    client: ObsClient,
    #[builder(!default, setter(into))]
    bucket: String,
}

impl ObsApi for DeleteBucket {
    type Response = DeleteBucketResponse;
}

/// Builder type for DeleteBucket
pub type DeleteBucketBldr = DeleteBucketBuilder<((ObsClient,), (String,))>;

impl ToObsCall for DeleteBucket {
    fn to_obs_call(self) -> Result<ObsCall, ValidationErr> {
        let mut params = Params::new();
        params.set_str("Bucket", self.bucket);
        Ok(ObsCall::new(self.client, &DELETE_BUCKET, params))
    }
}
