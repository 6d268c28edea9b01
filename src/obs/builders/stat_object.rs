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
use crate::obs::operations::STAT_OBJECT;
use crate::obs::response::StatObjectResponse;
use crate::obs::schema::Params;
use crate::obs::types::{ObsApi, ObsCall, ToObsCall};
use typed_builder::TypedBuilder;

/// Argument builder for the StatObject operation
///
/// Retrieves an object's metadata without downloading its body.
#[derive(Clone, Debug, TypedBuilder)]
pub struct StatObject {
    #[builder(!default)]
    client: ObsClient,
    #[builder(!default, setter(into))]
    bucket: String,
    #[builder(!default, setter(into))]
    object: String,
    #[builder(default, setter(into, strip_option))]
    version_id: Option<String>,
}

impl ObsApi for StatObject {
    type Response = StatObjectResponse;
}

/// Builder type for StatObject
pub type StatObjectBldr = StatObjectBuilder<((ObsClient,), (String,), (String,), ())>;

impl ToObsCall for StatObject {
    fn to_obs_call(self) -> Result<ObsCall, ValidationErr> {
        let mut params = Params::new();
        params.set_str("Bucket", self.bucket);
        params.set_str("Key", self.object);
        if let Some(v) = self.version_id {
            params.set_str("VersionId", v);
        }
        Ok(ObsCall::new(self.client, &STAT_OBJECT, params))
    }
}
