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
use crate::obs::operations::LIST_OBJECTS;
use crate::obs::response::ListObjectsResponse;
use crate::obs::schema::{FieldValue, Params};
use crate::obs::types::{ObsApi, ObsCall, ToObsCall};
use typed_builder::TypedBuilder;

/// Argument builder for the ListObjects operation
///
/// Lists the objects of a bucket one page at a time. Pass the previous
/// response's `next_marker` as `marker` to fetch the next page.
///
/// # Example
///
/// ```no_run
/// use obs_sdk::obs::ObsClient;
/// use obs_sdk::obs::types::ObsApi;
///
/// # async fn example(client: ObsClient) -> Result<(), Box<dyn std::error::Error>> {
/// let response = client
///     .list_objects("my-bucket")
///     .prefix("photos/")
///     .delimiter("/")
///     .build()
///     .send()
///     .await?;
/// for entry in response.contents() {
///     println!("{} ({} bytes)", entry.key, entry.size);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, TypedBuilder)]
pub struct ListObjects {
    #[builder(!default)]
    client: ObsClient,
    #[builder(!default, setter(into))]
    bucket: String,
    #[builder(default, setter(into, strip_option))]
    prefix: Option<String>,
    #[builder(default, setter(into, strip_option))]
    marker: Option<String>,
    #[builder(default, setter(strip_option))]
    max_keys: Option<u16>,
    #[builder(default, setter(into, strip_option))]
    delimiter: Option<String>,
}

impl ObsApi for ListObjects {
    type Response = ListObjectsResponse;
}

/// Builder type for ListObjects
pub type ListObjectsBldr = ListObjectsBuilder<((ObsClient,), (String,), (), (), (), ())>;

impl ToObsCall for ListObjects {
    fn to_obs_call(self) -> Result<ObsCall, ValidationErr> {
        let mut params = Params::new();
        params.set_str("Bucket", self.bucket);
        if let Some(v) = self.prefix {
            params.set_str("Prefix", v);
        }
        if let Some(v) = self.marker {
            params.set_str("Marker", v);
        }
        if let Some(v) = self.max_keys {
            params.set("MaxKeys", FieldValue::Int(v as i64));
        }
        if let Some(v) = self.delimiter {
            params.set_str("Delimiter", v);
        }
        Ok(ObsCall::new(self.client, &LIST_OBJECTS, params))
    }
}
