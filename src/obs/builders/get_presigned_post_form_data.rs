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
use crate::obs::error::{Error, ValidationErr};
use crate::obs::multimap::Multimap;
use crate::obs::signer::{post_presign_legacy, post_presign_v4};
use crate::obs::types::SignatureScheme;
use crate::obs::utils::{
    UtcTime, b64encode, check_bucket_name, to_amz_date, to_iso8601utc, to_signer_date, utc_now,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use typed_builder::TypedBuilder;

/// Form fields for a browser-based POST upload, plus the URL to post them to.
#[derive(Clone, Debug)]
pub struct PostFormData {
    pub url: String,
    pub fields: HashMap<String, String>,
}

/// Upload conditions for a browser-based POST upload.
///
/// The policy pins the bucket and any added conditions; everything else is up
/// to the form submitter until the expiration passes. When no `key` condition
/// is present, the signed policy carries a `starts-with` wildcard so the
/// submitter may pick any key. Non-standard condition elements are rewritten
/// under the scheme's metadata prefix at signing time.
#[derive(Clone, Debug)]
pub struct PostPolicy {
    bucket: String,
    expiration: UtcTime,
    eq_conditions: HashMap<String, String>,
    starts_with_conditions: HashMap<String, String>,
    lower_limit: Option<usize>,
    upper_limit: Option<usize>,
}

// Elements that keep their name in the policy document; anything else is
// rewritten under the scheme's metadata prefix.
const CONDITION_ALLOW_KEYS: &[&str] = &[
    "acl",
    "bucket",
    "key",
    "success_action_redirect",
    "redirect",
    "success_action_status",
];

const ALLOWED_HEADER_NAMES: &[&str] = &[
    "content-type",
    "content-md5",
    "content-length",
    "content-language",
    "content-disposition",
    "content-encoding",
    "content-range",
    "cache-control",
    "expires",
    "origin",
    "access-control-request-method",
    "access-control-request-headers",
    "x-default-storage-class",
    "location",
    "date",
    "etag",
    "host",
    "last-modified",
    "range",
    "if-modified-since",
    "if-unmodified-since",
    "if-match",
    "if-none-match",
    "website-redirect-location",
];

impl PostPolicy {
    const EQ: &'static str = "eq";
    const STARTS_WITH: &'static str = "starts-with";
    const ALGORITHM: &'static str = "AWS4-HMAC-SHA256";

    /// Returns a post policy with given bucket name and expiration.
    pub fn new(bucket: impl Into<String>, expiration: UtcTime) -> Result<Self, ValidationErr> {
        let bucket = bucket.into();
        check_bucket_name(&bucket)?;
        Ok(Self {
            bucket,
            expiration,
            eq_conditions: Default::default(),
            starts_with_conditions: Default::default(),
            lower_limit: None,
            upper_limit: None,
        })
    }

    fn trim_dollar(value: &str) -> String {
        let mut s = value.to_string();
        if s.starts_with('$') {
            s.remove(0);
        }
        s
    }

    // Elements the signing step fills in itself.
    fn is_reserved_element(element: &str) -> bool {
        element.eq_ignore_ascii_case("bucket")
            || element.eq_ignore_ascii_case("policy")
            || element.eq_ignore_ascii_case("x-amz-algorithm")
            || element.eq_ignore_ascii_case("x-amz-credential")
            || element.eq_ignore_ascii_case("x-amz-date")
            || element.eq_ignore_ascii_case("x-amz-signature")
            || element.eq_ignore_ascii_case("AccessKeyId")
            || element.eq_ignore_ascii_case("Signature")
    }

    /// Adds an equals condition for given element and value.
    pub fn add_equals_condition(
        &mut self,
        element: &str,
        value: &str,
    ) -> Result<(), ValidationErr> {
        if element.is_empty() {
            return Err(ValidationErr::PostPolicyError(
                "condition element cannot be empty".into(),
            ));
        }

        let v = PostPolicy::trim_dollar(element);
        if v.eq_ignore_ascii_case("success_action_redirect")
            || v.eq_ignore_ascii_case("redirect")
            || v.eq_ignore_ascii_case("content-length-range")
        {
            return Err(ValidationErr::PostPolicyError(format!(
                "{element} is unsupported for equals condition",
            )));
        }

        if PostPolicy::is_reserved_element(v.as_str()) {
            return Err(ValidationErr::PostPolicyError(format!(
                "{element} cannot be set"
            )));
        }

        self.eq_conditions.insert(v, value.to_string());
        Ok(())
    }

    /// Removes the equals condition for given element.
    pub fn remove_equals_condition(&mut self, element: &str) {
        self.eq_conditions.remove(element);
    }

    /// Adds a starts-with condition for given element and value.
    pub fn add_starts_with_condition(
        &mut self,
        element: &str,
        value: &str,
    ) -> Result<(), ValidationErr> {
        if element.is_empty() {
            return Err(ValidationErr::PostPolicyError(
                "condition element cannot be empty".into(),
            ));
        }

        let v = PostPolicy::trim_dollar(element);
        if v.eq_ignore_ascii_case("success_action_status")
            || v.eq_ignore_ascii_case("content-length-range")
        {
            return Err(ValidationErr::PostPolicyError(format!(
                "{element} is unsupported for starts-with condition",
            )));
        }

        if PostPolicy::is_reserved_element(v.as_str()) {
            return Err(ValidationErr::PostPolicyError(format!(
                "{element} cannot be set"
            )));
        }

        self.starts_with_conditions.insert(v, value.to_string());
        Ok(())
    }

    /// Removes the starts-with condition for given element.
    pub fn remove_starts_with_condition(&mut self, element: &str) {
        self.starts_with_conditions.remove(element);
    }

    /// Adds a content-length range condition with given lower and upper limits.
    pub fn add_content_length_range_condition(
        &mut self,
        lower_limit: usize,
        upper_limit: usize,
    ) -> Result<(), ValidationErr> {
        if lower_limit > upper_limit {
            return Err(ValidationErr::PostPolicyError(
                "lower limit cannot be greater than upper limit".into(),
            ));
        }

        self.lower_limit = Some(lower_limit);
        self.upper_limit = Some(upper_limit);
        Ok(())
    }

    /// Removes the content-length range condition.
    pub fn remove_content_length_range_condition(&mut self) {
        self.lower_limit = None;
        self.upper_limit = None;
    }

    // Resolved policy element name: standard elements and already-prefixed
    // headers pass through, everything else moves under the metadata prefix.
    fn policy_element(element: &str, scheme: SignatureScheme) -> String {
        let element = element.to_lowercase();
        if CONDITION_ALLOW_KEYS.contains(&element.as_str())
            || ALLOWED_HEADER_NAMES.contains(&element.as_str())
            || element.starts_with(scheme.header_prefix())
        {
            element
        } else {
            format!("{}meta-{}", scheme.header_prefix(), element)
        }
    }

    fn base_conditions(&self, scheme: SignatureScheme) -> Vec<Value> {
        let mut conditions: Vec<Value> = Vec::new();
        conditions.push(json!([PostPolicy::EQ, "$bucket", self.bucket]));

        let mut key_pinned = false;
        for (key, value) in &self.eq_conditions {
            let element = PostPolicy::policy_element(key, scheme);
            key_pinned |= element == "key";
            conditions.push(json!([PostPolicy::EQ, format!("${element}"), value]));
        }
        for (key, value) in &self.starts_with_conditions {
            let element = PostPolicy::policy_element(key, scheme);
            key_pinned |= element == "key";
            conditions.push(json!([
                PostPolicy::STARTS_WITH,
                format!("${element}"),
                value
            ]));
        }
        if !key_pinned {
            conditions.push(json!([PostPolicy::STARTS_WITH, "$key", ""]));
        }

        if let (Some(lower), Some(upper)) = (self.lower_limit, self.upper_limit) {
            conditions.push(json!(["content-length-range", lower, upper]));
        }
        conditions
    }

    fn policy_document(&self, conditions: Vec<Value>) -> String {
        json!({
            "expiration": to_iso8601utc(self.expiration),
            "conditions": conditions,
        })
        .to_string()
    }
}

/// Argument builder for the GetPresignedPostFormData operation
///
/// Signs a [`PostPolicy`] with the client's credentials and scheme. The
/// legacy scheme produces `AccessKeyId`/`policy`/`Signature` fields; V4
/// produces the `x-amz-*` field set. No network I/O is involved.
#[derive(Clone, Debug, TypedBuilder)]
pub struct GetPresignedPostFormData {
    #[builder(!default)]
    client: ObsClient,
    #[builder(!default)]
    policy: PostPolicy,
    /// Signing time override, mainly for reproducible tests.
    #[builder(default, setter(strip_option))]
    request_time: Option<UtcTime>,
}

/// Builder type for GetPresignedPostFormData
pub type GetPresignedPostFormDataBldr =
    GetPresignedPostFormDataBuilder<((ObsClient,), (PostPolicy,), ())>;

impl GetPresignedPostFormData {
    pub fn form_data(self) -> Result<PostFormData, Error> {
        let inner = self.client.inner();
        let provider = inner.provider.as_ref().ok_or(ValidationErr::NoProvider)?;
        let creds = provider.fetch();
        let date = self.request_time.unwrap_or_else(utc_now);

        let url = inner
            .base_url
            .build_url(&Multimap::new(), Some(&self.policy.bucket), None)?
            .to_string();

        let mut conditions = self.policy.base_conditions(inner.scheme);
        let mut fields: HashMap<String, String> = HashMap::new();

        match inner.scheme {
            SignatureScheme::Obs => {
                if let Some(token) = &creds.session_token {
                    conditions.push(json!([
                        PostPolicy::EQ,
                        "$x-obs-security-token",
                        token
                    ]));
                    fields.insert("x-obs-security-token".into(), token.clone());
                }
                let encoded_policy = b64encode(self.policy.policy_document(conditions));
                let signature = post_presign_legacy(&encoded_policy, &creds.secret_key);
                fields.insert("AccessKeyId".into(), creds.access_key);
                fields.insert("policy".into(), encoded_policy);
                fields.insert("Signature".into(), signature);
            }
            SignatureScheme::V4 => {
                let credential = format!(
                    "{}/{}/{}/s3/aws4_request",
                    creds.access_key,
                    to_signer_date(date),
                    inner.base_url.region
                );
                let amz_date = to_amz_date(date);
                conditions.push(json!([
                    PostPolicy::EQ,
                    "$x-amz-algorithm",
                    PostPolicy::ALGORITHM
                ]));
                conditions.push(json!([PostPolicy::EQ, "$x-amz-credential", credential]));
                if let Some(token) = &creds.session_token {
                    conditions.push(json!([PostPolicy::EQ, "$x-amz-security-token", token]));
                    fields.insert("x-amz-security-token".into(), token.clone());
                }
                conditions.push(json!([PostPolicy::EQ, "$x-amz-date", amz_date]));

                let encoded_policy = b64encode(self.policy.policy_document(conditions));
                let signature = post_presign_v4(
                    &encoded_policy,
                    &creds.secret_key,
                    date,
                    &inner.base_url.region,
                );
                fields.insert("x-amz-algorithm".into(), PostPolicy::ALGORITHM.to_string());
                fields.insert("x-amz-credential".into(), credential);
                fields.insert("x-amz-date".into(), amz_date);
                fields.insert("policy".into(), encoded_policy);
                fields.insert("x-amz-signature".into(), signature);
            }
        }

        Ok(PostFormData { url, fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obs::creds::StaticProvider;
    use base64::engine::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use chrono::{TimeZone, Utc};

    fn expiration() -> UtcTime {
        Utc.with_ymd_and_hms(2022, 8, 15, 16, 50, 12).unwrap()
    }

    fn test_client() -> ObsClient {
        ObsClient::builder("https://obs.example.com".parse().unwrap())
            .provider(StaticProvider::new("access", "secret", None))
            .build()
            .unwrap()
    }

    #[test]
    fn unpinned_key_gets_starts_with_wildcard() {
        let policy = PostPolicy::new("bucket", expiration()).unwrap();
        let conditions = policy.base_conditions(SignatureScheme::Obs);
        assert!(conditions.contains(&json!(["starts-with", "$key", ""])));
    }

    #[test]
    fn pinned_key_suppresses_wildcard() {
        let mut policy = PostPolicy::new("bucket", expiration()).unwrap();
        policy.add_equals_condition("key", "uploads/a.txt").unwrap();
        let conditions = policy.base_conditions(SignatureScheme::Obs);
        assert!(conditions.contains(&json!(["eq", "$key", "uploads/a.txt"])));
        assert!(!conditions.contains(&json!(["starts-with", "$key", ""])));
    }

    #[test]
    fn non_standard_elements_move_under_metadata_prefix() {
        let mut policy = PostPolicy::new("bucket", expiration()).unwrap();
        policy.add_equals_condition("project", "apollo").unwrap();

        let obs = policy.base_conditions(SignatureScheme::Obs);
        assert!(obs.contains(&json!(["eq", "$x-obs-meta-project", "apollo"])));

        let v4 = policy.base_conditions(SignatureScheme::V4);
        assert!(v4.contains(&json!(["eq", "$x-amz-meta-project", "apollo"])));
    }

    #[test]
    fn standard_elements_keep_their_name() {
        let mut policy = PostPolicy::new("bucket", expiration()).unwrap();
        policy
            .add_equals_condition("Content-Type", "text/plain")
            .unwrap();
        policy.add_starts_with_condition("acl", "public").unwrap();

        let conditions = policy.base_conditions(SignatureScheme::Obs);
        assert!(conditions.contains(&json!(["eq", "$content-type", "text/plain"])));
        assert!(conditions.contains(&json!(["starts-with", "$acl", "public"])));
    }

    #[test]
    fn form_data_signs_a_wildcard_policy_when_key_is_unpinned() {
        let policy = PostPolicy::new("bucket", expiration()).unwrap();
        let form_data = test_client()
            .get_presigned_post_form_data(policy)
            .build()
            .form_data()
            .unwrap();

        assert!(form_data.fields.contains_key("AccessKeyId"));
        assert!(form_data.fields.contains_key("Signature"));
        let decoded = BASE64.decode(&form_data.fields["policy"]).unwrap();
        let document: Value = serde_json::from_slice(&decoded).unwrap();
        assert!(
            document["conditions"]
                .as_array()
                .unwrap()
                .contains(&json!(["starts-with", "$key", ""]))
        );
    }
}
