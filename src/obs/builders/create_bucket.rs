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
use crate::obs::operations::CREATE_BUCKET;
use crate::obs::response::CreateBucketResponse;
use crate::obs::schema::Params;
use crate::obs::types::{ObsApi, ObsCall, ToObsCall};
use typed_builder::TypedBuilder;

/// Argument builder for the CreateBucket operation
#[derive(Clone, Debug, TypedBuilder)]
pub struct CreateBucket {
    #[builder(!default)]
    client: ObsClient,
    #[builder(!default, setter(into))]
    bucket: String,
    /// Canned ACL applied at creation, e.g. `private` or `public-read`.
    #[builder(default, setter(into, strip_option))]
    acl: Option<String>,
    #[builder(default, setter(into, strip_option))]
    storage_class: Option<String>,
}

impl ObsApi for CreateBucket {
    type Response = CreateBucketResponse;
}

/// Builder type for CreateBucket
pub type CreateBucketBldr = CreateBucketBuilder<((ObsClient,), (String,), (), ())>;

impl ToObsCall for CreateBucket {
    fn to_obs_call(self) -> Result<ObsCall, ValidationErr> {
        let mut params = Params::new();
        params.set_str("Bucket", self.bucket);
        if let Some(v) = self.acl {
            params.set_str("Acl", v);
        }
        if let Some(v) = self.storage_class {
            params.set_str("StorageClass", v);
        }
        Ok(ObsCall::new(self.client, &CREATE_BUCKET, params))
    }
}
