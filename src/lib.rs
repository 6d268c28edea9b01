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

//! # OBS Rust SDK (`obs-sdk`)
//!
//! This crate provides a strongly-typed, async-first client for OBS and Amazon
//! S3-compatible object storage APIs. It supports both the legacy HMAC-SHA1
//! authentication scheme and AWS Signature Version 4, selected per client.
//!
//! Each supported operation has a corresponding request builder (e.g.
//! [`obs::builders::PutObject`], [`obs::builders::GetObject`]), which allows
//! users to configure request parameters using a fluent builder pattern.
//!
//! All request builders implement the [`obs::types::ObsApi`] trait, which
//! provides the async [`send`](crate::obs::types::ObsApi::send) method to
//! execute the request and return a typed response, along with a
//! [`send_blocking`](crate::obs::types::ObsApi::send_blocking) variant for
//! synchronous callers.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use obs_sdk::obs::ObsClient;
//! use obs_sdk::obs::creds::StaticProvider;
//! use obs_sdk::obs::types::ObsApi;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = ObsClient::builder("https://obs.example.com".parse().unwrap())
//!         .provider(StaticProvider::new("access-key", "secret-key", None))
//!         .build()
//!         .unwrap();
//!
//!     let resp = client
//!         .get_object("my-bucket", "my-object")
//!         .build()
//!         .send()
//!         .await
//!         .expect("request failed");
//!
//!     println!("etag: {:?}", resp.etag());
//! }
//! ```
//!
//! ## Design
//! - Each API method on [`obs::client::ObsClient`] returns a builder struct
//! - Builders implement [`obs::types::ToObsCall`] for request conversion and
//!   [`obs::types::ObsApi`] for execution
//! - Responses implement [`obs::types::FromResultModel`] for consistent
//!   deserialization from the schema-driven result model

#![allow(clippy::result_large_err)]
#![allow(clippy::too_many_arguments)]
pub mod obs;

#[cfg(test)]
#[macro_use]
extern crate quickcheck;
