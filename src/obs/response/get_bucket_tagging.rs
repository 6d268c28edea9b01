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
use crate::obs::schema::{FieldValue, ResultModel};
use crate::obs::types::FromResultModel;

/// A single bucket tag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// Response of the GetBucketTagging operation
#[derive(Debug)]
pub struct GetBucketTaggingResponse {
    model: ResultModel,
    tag_set: Vec<Tag>,
}

impl GetBucketTaggingResponse {
    pub fn tag_set(&self) -> &[Tag] {
        &self.tag_set
    }
}

impl_common_response_fields!(GetBucketTaggingResponse);

impl FromResultModel for GetBucketTaggingResponse {
    fn from_result_model(model: ResultModel) -> Result<Self, Error> {
        let tag_set = model
            .get("TagSet")
            .and_then(FieldValue::as_list)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| match v {
                        FieldValue::Object(fields) => {
                            let get = |name: &str| {
                                fields
                                    .iter()
                                    .find(|(n, _)| n == name)
                                    .and_then(|(_, v)| v.as_str())
                                    .unwrap_or_default()
                                    .to_string()
                            };
                            Some(Tag {
                                key: get("Key"),
                                value: get("Value"),
                            })
                        }
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self { model, tag_set })
    }
}
