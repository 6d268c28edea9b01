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

use crate::obs::client::{CallOpts, ObsClient};
use crate::obs::error::ValidationErr;
use crate::obs::operations::GET_OBJECT;
use crate::obs::response::GetObjectResponse;
use crate::obs::schema::Params;
use crate::obs::types::{ObsApi, ObsCall, ToObsCall};
use crate::obs::utils::{UtcTime, to_http_header_value};
use std::path::PathBuf;
use typed_builder::TypedBuilder;

/// Argument builder for the GetObject operation
///
/// Downloads an object. The body is buffered into the response by default;
/// `save_as_stream` hands it back as a chunked stream and `save_as_file`
/// writes it to a local path instead. At most one of the two may be set.
///
/// # Example
///
/// ```no_run
/// use obs_sdk::obs::ObsClient;
/// use obs_sdk::obs::types::ObsApi;
///
/// # async fn example(client: ObsClient) -> Result<(), Box<dyn std::error::Error>> {
/// let response = client
///     .get_object("my-bucket", "report.pdf")
///     .save_as_file("/tmp/report.pdf")
///     .build()
///     .send()
///     .await?;
/// println!("content length: {:?}", response.content_length());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, TypedBuilder)]
pub struct GetObject {
    #[builder(!default)]
    client: ObsClient,
    #[builder(!default, setter(into))]
    bucket: String,
    #[builder(!default, setter(into))]
    object: String,
    #[builder(default, setter(into, strip_option))]
    version_id: Option<String>,
    /// Byte offset to start reading from.
    #[builder(default, setter(strip_option))]
    offset: Option<u64>,
    /// Number of bytes to read, from the offset or from the start.
    #[builder(default, setter(strip_option))]
    length: Option<u64>,
    #[builder(default, setter(into, strip_option))]
    match_etag: Option<String>,
    #[builder(default, setter(strip_option))]
    modified_since: Option<UtcTime>,
    #[builder(default)]
    save_as_stream: bool,
    #[builder(default, setter(into, strip_option))]
    save_as_file: Option<PathBuf>,
}

impl ObsApi for GetObject {
    type Response = GetObjectResponse;
}

/// Builder type for GetObject
pub type GetObjectBldr = GetObjectBuilder<(
    (ObsClient,),
    (String,),
    (String,),
    (),
    (),
    (),
    (),
    (),
    (),
    (),
)>;

impl GetObject {
    fn range_header_value(&self) -> Option<String> {
        let (offset, length) = match self.length {
            Some(_) => (Some(self.offset.unwrap_or(0)), self.length),
            None => (self.offset, None),
        };
        let offset = offset?;
        let mut range = format!("bytes={offset}-");
        if let Some(length) = length {
            range.push_str(&(offset + length - 1).to_string());
        }
        Some(range)
    }
}

impl ToObsCall for GetObject {
    fn to_obs_call(self) -> Result<ObsCall, ValidationErr> {
        let mut params = Params::new();
        params.set_str("Bucket", self.bucket.clone());
        params.set_str("Key", self.object.clone());
        if let Some(v) = &self.version_id {
            params.set_str("VersionId", v.clone());
        }
        if let Some(v) = self.range_header_value() {
            params.set_str("Range", v);
        }
        if let Some(v) = &self.match_etag {
            params.set_str("IfMatch", v.clone());
        }
        if let Some(v) = self.modified_since {
            params.set_str("IfModifiedSince", to_http_header_value(v));
        }

        let mut call = ObsCall::new(self.client, &GET_OBJECT, params);
        call.opts = CallOpts {
            save_as_stream: self.save_as_stream,
            save_as_file: self.save_as_file,
        };
        Ok(call)
    }
}
