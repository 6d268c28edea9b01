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
use crate::obs::utils::{UtcTime, from_iso8601utc};

/// Owner of a listed object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Owner {
    pub id: String,
    pub display_name: String,
}

/// One object of a listing page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectEntry {
    pub key: String,
    pub last_modified: Option<UtcTime>,
    pub etag: String,
    pub size: i64,
    pub storage_class: String,
    pub owner: Option<Owner>,
}

fn object_field<'a>(fields: &'a [(String, FieldValue)], name: &str) -> Option<&'a FieldValue> {
    fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
}

fn str_field(fields: &[(String, FieldValue)], name: &str) -> String {
    object_field(fields, name)
        .and_then(FieldValue::as_str)
        .unwrap_or_default()
        .to_string()
}

impl ObjectEntry {
    fn from_value(value: &FieldValue) -> Option<Self> {
        let FieldValue::Object(fields) = value else {
            return None;
        };
        let owner = match object_field(fields, "Owner") {
            Some(FieldValue::Object(owner)) => Some(Owner {
                id: str_field(owner, "ID"),
                display_name: str_field(owner, "DisplayName"),
            }),
            _ => None,
        };
        Some(Self {
            key: str_field(fields, "Key"),
            last_modified: object_field(fields, "LastModified")
                .and_then(FieldValue::as_str)
                .and_then(|s| from_iso8601utc(s).ok()),
            etag: str_field(fields, "ETag"),
            size: object_field(fields, "Size")
                .and_then(FieldValue::as_int)
                .unwrap_or(0),
            storage_class: str_field(fields, "StorageClass"),
            owner,
        })
    }
}

/// Response of the ListObjects operation
#[derive(Debug)]
pub struct ListObjectsResponse {
    model: ResultModel,
    contents: Vec<ObjectEntry>,
    common_prefixes: Vec<String>,
}

impl ListObjectsResponse {
    pub fn name(&self) -> Option<&str> {
        self.model.get_str("Name")
    }

    pub fn prefix(&self) -> Option<&str> {
        self.model.get_str("Prefix")
    }

    pub fn max_keys(&self) -> Option<i64> {
        self.model.get_int("MaxKeys")
    }

    pub fn delimiter(&self) -> Option<&str> {
        self.model.get_str("Delimiter")
    }

    /// Whether more pages follow this one.
    pub fn is_truncated(&self) -> bool {
        self.model.get_bool("IsTruncated").unwrap_or(false)
    }

    /// Marker to pass to the next page's request when the listing is
    /// truncated.
    pub fn next_marker(&self) -> Option<&str> {
        self.model.get_str("NextMarker")
    }

    pub fn contents(&self) -> &[ObjectEntry] {
        &self.contents
    }

    /// Key prefixes rolled up by the delimiter.
    pub fn common_prefixes(&self) -> &[String] {
        &self.common_prefixes
    }
}

impl_common_response_fields!(ListObjectsResponse);

impl FromResultModel for ListObjectsResponse {
    fn from_result_model(model: ResultModel) -> Result<Self, Error> {
        let contents = model
            .get("Contents")
            .and_then(FieldValue::as_list)
            .map(|items| items.iter().filter_map(ObjectEntry::from_value).collect())
            .unwrap_or_default();
        let common_prefixes = model
            .get("CommonPrefixes")
            .and_then(FieldValue::as_list)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| match v {
                        FieldValue::Object(fields) => Some(str_field(fields, "Prefix")),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self {
            model,
            contents,
            common_prefixes,
        })
    }
}
