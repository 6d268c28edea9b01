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
use crate::obs::multimap::{Multimap, MultimapExt};
use crate::obs::signer::{presign_legacy, presign_v4};
use crate::obs::types::SignatureScheme;
use crate::obs::utils::{UtcTime, check_bucket_name, utc_now};
use http::Method;
use typed_builder::TypedBuilder;

/// Default expiry of pre-signed URLs, one week.
pub const DEFAULT_EXPIRY_SECONDS: u32 = 604_800;

/// A pre-signed request URL.
///
/// `signed_headers` holds the headers that were folded into the signature;
/// the eventual request must carry them unchanged or the service rejects it.
#[derive(Clone, Debug)]
pub struct SignedUrl {
    pub method: Method,
    pub url: String,
    pub signed_headers: Multimap,
}

/// Argument builder for the GetPresignedObjectUrl operation
///
/// Produces a URL carrying its authorization in query parameters, so a holder
/// can perform the request without credentials until the expiry passes. No
/// network I/O is involved.
///
/// # Example
///
/// ```no_run
/// use obs_sdk::obs::ObsClient;
/// use http::Method;
///
/// # fn example(client: ObsClient) -> Result<(), Box<dyn std::error::Error>> {
/// let signed = client
///     .get_presigned_object_url(Method::GET, "my-bucket", "report.pdf")
///     .expiry_seconds(3600)
///     .build()
///     .sign()?;
/// println!("{}", signed.url);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, TypedBuilder)]
pub struct GetPresignedObjectUrl {
    #[builder(!default)]
    client: ObsClient,
    #[builder(!default)]
    method: Method,
    #[builder(!default, setter(into))]
    bucket: String,
    #[builder(!default, setter(into))]
    object: String,
    #[builder(default, setter(into, strip_option))]
    version_id: Option<String>,
    /// Subresource appended to the query string with no value, e.g. `acl`.
    #[builder(default, setter(into, strip_option))]
    special_param: Option<String>,
    /// Extra headers to fold into the signature; the holder of the URL must
    /// send them verbatim. Only honored by the legacy scheme.
    #[builder(default, setter(strip_option))]
    headers: Option<Multimap>,
    #[builder(default = DEFAULT_EXPIRY_SECONDS)]
    expiry_seconds: u32,
    /// Signature scheme override for this URL only.
    #[builder(default, setter(strip_option))]
    scheme: Option<SignatureScheme>,
    /// Signing time override, mainly for reproducible tests.
    #[builder(default, setter(strip_option))]
    request_time: Option<UtcTime>,
}

/// Builder type for GetPresignedObjectUrl
pub type GetPresignedObjectUrlBldr = GetPresignedObjectUrlBuilder<(
    (ObsClient,),
    (Method,),
    (String,),
    (String,),
    (),
    (),
    (),
    (),
    (),
    (),
)>;

impl GetPresignedObjectUrl {
    pub fn sign(self) -> Result<SignedUrl, Error> {
        check_bucket_name(&self.bucket)?;
        if self.object.is_empty() {
            return Err(ValidationErr::InvalidObjectName("object key cannot be empty".into()).into());
        }
        if self.expiry_seconds == 0 || self.expiry_seconds > DEFAULT_EXPIRY_SECONDS {
            return Err(ValidationErr::InvalidExpiry(format!(
                "expiry must be between 1 and {DEFAULT_EXPIRY_SECONDS} seconds"
            ))
            .into());
        }

        let inner = self.client.inner();
        let provider = inner.provider.as_ref().ok_or(ValidationErr::NoProvider)?;
        let creds = provider.fetch();
        let scheme = self.scheme.unwrap_or(inner.scheme);
        let date = self.request_time.unwrap_or_else(utc_now);

        let mut query = Multimap::new();
        if let Some(v) = &self.version_id {
            query.add("versionId", v.clone());
        }
        if let Some(v) = &self.special_param {
            query.add(v.clone(), "");
        }

        let mut url = inner
            .base_url
            .build_url(&query, Some(&self.bucket), Some(&self.object))?;

        let extra_headers = self.headers.unwrap_or_default();
        let mut signed_headers = Multimap::new();
        signed_headers.add("Host", url.host_header_value());

        match scheme {
            SignatureScheme::Obs => {
                if let Some(token) = &creds.session_token {
                    url.query.add(scheme.security_token_header(), token.clone());
                }
                let expires_at = date.timestamp() + i64::from(self.expiry_seconds);
                presign_legacy(
                    &self.method,
                    &extra_headers,
                    &mut url.query,
                    Some(&self.bucket),
                    Some(&self.object),
                    &creds.access_key,
                    &creds.secret_key,
                    expires_at,
                );
                for (k, values) in extra_headers.iter_all() {
                    for v in values {
                        signed_headers.add(k.clone(), v.clone());
                    }
                }
            }
            SignatureScheme::V4 => {
                if let Some(token) = &creds.session_token {
                    url.query.add("X-Amz-Security-Token", token.clone());
                }
                let host = url.host_header_value();
                let path = url.path.clone();
                presign_v4(
                    &self.method,
                    &host,
                    &path,
                    &inner.base_url.region,
                    &mut url.query,
                    &creds.access_key,
                    &creds.secret_key,
                    date,
                    self.expiry_seconds,
                );
            }
        }

        Ok(SignedUrl {
            method: self.method,
            url: url.to_string(),
            signed_headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obs::creds::StaticProvider;
    use crate::obs::error::{Error, ValidationErr};
    use chrono::{TimeZone, Utc};

    fn test_client() -> ObsClient {
        ObsClient::builder("https://obs.example.com".parse().unwrap())
            .provider(StaticProvider::new("access", "secret", None))
            .build()
            .unwrap()
    }

    fn test_date() -> UtcTime {
        Utc.with_ymd_and_hms(2022, 8, 15, 16, 50, 12).unwrap()
    }

    #[test]
    fn legacy_url_carries_query_credentials() {
        let signed = test_client()
            .get_presigned_object_url(Method::GET, "bucket", "object.txt")
            .expiry_seconds(3600)
            .request_time(test_date())
            .build()
            .sign()
            .unwrap();

        assert!(signed.url.starts_with("https://obs.example.com/bucket/object.txt?"));
        assert!(signed.url.contains("AccessKeyId=access"));
        let expires_at = test_date().timestamp() + 3600;
        assert!(signed.url.contains(&format!("Expires={expires_at}")));
        assert!(signed.url.contains("Signature="));
        let last_param = signed.url.rsplit('&').next().unwrap_or_default();
        assert!(last_param.starts_with("Signature="));
        assert_eq!(signed.method, Method::GET);
        assert_eq!(
            signed.signed_headers.get("Host").map(String::as_str),
            Some("obs.example.com")
        );
    }

    #[test]
    fn legacy_extra_headers_are_reported_as_signed() {
        let mut headers = Multimap::new();
        headers.add("x-obs-acl", "public-read");

        let signed = test_client()
            .get_presigned_object_url(Method::PUT, "bucket", "object.txt")
            .headers(headers)
            .request_time(test_date())
            .build()
            .sign()
            .unwrap();

        assert_eq!(
            signed.signed_headers.get("x-obs-acl").map(String::as_str),
            Some("public-read")
        );
    }

    #[test]
    fn scheme_override_produces_v4_query() {
        let signed = test_client()
            .get_presigned_object_url(Method::GET, "bucket", "object.txt")
            .scheme(SignatureScheme::V4)
            .request_time(test_date())
            .build()
            .sign()
            .unwrap();

        assert!(signed.url.contains("X-Amz-Algorithm=AWS4-HMAC-SHA256"));
        assert!(signed.url.contains("X-Amz-Credential="));
        assert!(signed.url.contains("X-Amz-Signature="));
        assert!(!signed.url.contains("AccessKeyId="));
    }

    #[test]
    fn special_param_lands_in_query() {
        let signed = test_client()
            .get_presigned_object_url(Method::GET, "bucket", "object.txt")
            .special_param("acl")
            .request_time(test_date())
            .build()
            .sign()
            .unwrap();

        assert!(signed.url.contains("acl"));
    }

    #[test]
    fn out_of_range_expiry_is_rejected() {
        let result = test_client()
            .get_presigned_object_url(Method::GET, "bucket", "object.txt")
            .expiry_seconds(0)
            .build()
            .sign();

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationErr::InvalidExpiry(_)))
        ));
    }
}
