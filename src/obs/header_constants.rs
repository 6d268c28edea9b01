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

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_LENGTH: &str = "Content-Length";
pub const CONTENT_MD5: &str = "Content-MD5";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const DATE: &str = "Date";
pub const ETAG: &str = "ETag";
pub const HOST: &str = "Host";
pub const LAST_MODIFIED: &str = "Last-Modified";
pub const LOCATION: &str = "Location";
pub const RANGE: &str = "Range";
pub const USER_AGENT: &str = "User-Agent";

pub const X_OBS_DATE: &str = "x-obs-date";
pub const X_OBS_REQUEST_ID: &str = "x-obs-request-id";
pub const X_OBS_ID_2: &str = "x-obs-id-2";
pub const X_OBS_VERSION_ID: &str = "x-obs-version-id";
pub const X_OBS_DELETE_MARKER: &str = "x-obs-delete-marker";
pub const X_OBS_STORAGE_CLASS: &str = "x-obs-storage-class";
pub const X_OBS_SECURITY_TOKEN: &str = "x-obs-security-token";
pub const X_OBS_META_PREFIX: &str = "x-obs-meta-";

pub const X_AMZ_CONTENT_SHA256: &str = "x-amz-content-sha256";
pub const X_AMZ_DATE: &str = "x-amz-date";
pub const X_AMZ_REQUEST_ID: &str = "x-amz-request-id";
pub const X_AMZ_ID_2: &str = "x-amz-id-2";
pub const X_AMZ_VERSION_ID: &str = "x-amz-version-id";
pub const X_AMZ_DELETE_MARKER: &str = "x-amz-delete-marker";
pub const X_AMZ_STORAGE_CLASS: &str = "x-amz-storage-class";
pub const X_AMZ_SECURITY_TOKEN: &str = "x-amz-security-token";
pub const X_AMZ_META_PREFIX: &str = "x-amz-meta-";

/// Value of the `x-amz-content-sha256` header when the payload is not signed.
pub const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";
