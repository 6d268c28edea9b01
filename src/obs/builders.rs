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

//! Argument builders for all supported operations

mod create_bucket;
mod delete_bucket;
mod delete_object;
mod get_bucket_tagging;
mod get_object;
mod get_presigned_object_url;
mod get_presigned_post_form_data;
mod list_objects;
mod put_object;
mod stat_object;

pub use create_bucket::*;
pub use delete_bucket::*;
pub use delete_object::*;
pub use get_bucket_tagging::*;
pub use get_object::*;
pub use get_presigned_object_url::*;
pub use get_presigned_post_form_data::*;
pub use list_objects::*;
pub use put_object::*;
pub use stat_object::*;
