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
use crate::obs::operations::PUT_OBJECT;
use crate::obs::response::PutObjectResponse;
use crate::obs::schema::{FieldValue, Params};
use crate::obs::types::{ObsApi, ObsCall, ToObsCall};
use crate::obs::utils::md5sum_hash;
use bytes::Bytes;
use std::collections::HashMap;
use std::path::PathBuf;
use typed_builder::TypedBuilder;

/// Argument builder for the PutObject operation
///
/// Uploads an object from in-memory bytes or from a local file. When no
/// content type is given, one is inferred from the key or the source file
/// extension.
///
/// # Example
///
/// ```no_run
/// use obs_sdk::obs::ObsClient;
/// use obs_sdk::obs::creds::StaticProvider;
/// use obs_sdk::obs::types::ObsApi;
///
/// # async fn example(client: ObsClient) -> Result<(), Box<dyn std::error::Error>> {
/// let response = client
///     .put_object("my-bucket", "report.pdf")
///     .data(bytes::Bytes::from_static(b"hello"))
///     .build()
///     .send()
///     .await?;
/// println!("etag: {:?}", response.etag());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, TypedBuilder)]
pub struct PutObject {
    #[builder(!default)]
    client: ObsClient,
    #[builder(!default, setter(into))]
    bucket: String,
    #[builder(!default, setter(into))]
    object: String,
    /// Object content. Mutually exclusive with `source_file`.
    #[builder(default, setter(strip_option))]
    data: Option<Bytes>,
    /// Local file to read the content from.
    #[builder(default, setter(into, strip_option))]
    source_file: Option<PathBuf>,
    #[builder(default, setter(into, strip_option))]
    content_type: Option<String>,
    /// When enabled, a `Content-MD5` header is computed over the content.
    #[builder(default)]
    send_content_md5: bool,
    #[builder(default, setter(into, strip_option))]
    storage_class: Option<String>,
    #[builder(default, setter(strip_option))]
    metadata: Option<HashMap<String, String>>,
}

impl ObsApi for PutObject {
    type Response = PutObjectResponse;
}

/// Builder type for PutObject
pub type PutObjectBldr =
    PutObjectBuilder<((ObsClient,), (String,), (String,), (), (), (), (), (), ())>;

impl ToObsCall for PutObject {
    fn to_obs_call(self) -> Result<ObsCall, ValidationErr> {
        let data = match (self.data, &self.source_file) {
            (Some(_), Some(_)) => {
                return Err(ValidationErr::ConflictingParameters(
                    "data and source_file are mutually exclusive".into(),
                ));
            }
            (Some(data), None) => data,
            (None, Some(path)) => Bytes::from(std::fs::read(path).map_err(|e| {
                ValidationErr::InvalidSourceFile(format!(
                    "cannot read source file {}: {}",
                    path.display(),
                    e
                ))
            })?),
            (None, None) => Bytes::new(),
        };

        let mut params = Params::new();
        params.set_str("Bucket", self.bucket);
        params.set_str("Key", self.object);
        if let Some(v) = self.content_type {
            params.set_str("ContentType", v);
        }
        if self.send_content_md5 {
            params.set_str("ContentMD5", md5sum_hash(&data));
        }
        if let Some(v) = self.storage_class {
            params.set_str("StorageClass", v);
        }
        if let Some(v) = self.metadata {
            params.set("Metadata", FieldValue::Map(v));
        }
        if let Some(path) = &self.source_file {
            params.set_str("SourceFile", path.display().to_string());
        }
        params.set("Body", FieldValue::Bytes(data));

        Ok(ObsCall::new(self.client, &PUT_OBJECT, params))
    }
}
