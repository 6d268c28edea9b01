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

//! Typed responses of all supported operations

mod buckets;
mod get_bucket_tagging;
mod get_object;
mod list_objects;
mod object_ops;

pub use buckets::*;
pub use get_bucket_tagging::*;
pub use get_object::*;
pub use list_objects::*;
pub use object_ops::*;

/// Accessors shared by every response: the HTTP status line, the scheme's
/// common headers and, when service errors are not raised, the error fields.
macro_rules! impl_common_response_fields {
    ($($t:ty),+ $(,)?) => { $(
        impl $t {
            /// HTTP status of the exchange, `-1` when no response was received.
            pub fn http_status_code(&self) -> i64 {
                self.model.http_status_code()
            }

            pub fn reason(&self) -> Option<&str> {
                self.model.reason()
            }

            pub fn request_id(&self) -> Option<&str> {
                self.model.get_str("RequestId")
            }

            pub fn host_id(&self) -> Option<&str> {
                self.model.get_str("HostId")
            }

            /// Service error code when the call failed and the client was
            /// built with `raise_service_errors(false)`.
            pub fn error_code(&self) -> Option<&str> {
                self.model.get_str("Code")
            }

            pub fn error_message(&self) -> Option<&str> {
                self.model.get_str("Message")
            }

            /// The raw result model backing this response.
            pub fn model(&self) -> &crate::obs::schema::ResultModel {
                &self.model
            }
        }
    )+ };
}

pub(crate) use impl_common_response_fields;
