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

//! Implementation of the OBS / S3-compatible object storage client

pub mod body;
pub mod builders;
pub mod client;
pub mod creds;
pub mod error;
pub mod error_response;
pub mod header_constants;
pub mod http;
pub mod marshal;
pub mod mime;
pub mod multimap;
pub mod operations;
pub mod response;
pub mod schema;
pub mod signer;
pub mod transport;
pub mod types;
pub mod unmarshal;
pub mod utils;

#[cfg(test)]
mod signer_tests;

pub use client::{ObsClient, ObsClientBuilder};
pub use types::SignatureScheme;
