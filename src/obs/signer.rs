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

//! Request signing: the legacy HMAC-SHA1 scheme and AWS Signature V4
//!
//! All functions here are pure in their time handling: the signing instant is
//! always passed in, never read from a clock.

use crate::obs::header_constants::{AUTHORIZATION, DATE};
use crate::obs::multimap::{Multimap, MultimapExt};
use crate::obs::utils::{
    UtcTime, b64encode, sha256_hash, to_amz_date, to_http_header_value, to_signer_date,
    urlencode_object_key,
};
use hex::encode as hexencode;
use hmac::{Hmac, Mac};
use http::Method;
use sha1::Sha1;
use sha2::Sha256;

/// Subresources that participate in the legacy canonical resource string.
/// Matching is case-sensitive.
pub const SUBRESOURCES: &[&str] = &[
    "CDNNotifyConfiguration",
    "acl",
    "append",
    "attname",
    "backtosource",
    "cors",
    "customdomain",
    "delete",
    "deletebucket",
    "directcoldaccess",
    "encryption",
    "inventory",
    "length",
    "lifecycle",
    "location",
    "logging",
    "metadata",
    "modify",
    "name",
    "notification",
    "partNumber",
    "policy",
    "position",
    "quota",
    "rename",
    "replication",
    "response-cache-control",
    "response-content-disposition",
    "response-content-encoding",
    "response-content-language",
    "response-content-type",
    "response-expires",
    "restore",
    "storageClass",
    "storagePolicy",
    "storageinfo",
    "tagging",
    "torrent",
    "truncate",
    "uploadId",
    "uploads",
    "versionId",
    "versioning",
    "versions",
    "website",
    "x-image-process",
    "x-image-save-bucket",
    "x-image-save-object",
    "x-obs-security-token",
];

/// Returns HMAC-SHA256 hash for given key and data
pub fn hmac_hash(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut hasher = Hmac::<Sha256>::new_from_slice(key).expect("HMAC can take key of any size");
    hasher.update(data);
    hasher.finalize().into_bytes().to_vec()
}

/// Returns hex encoded HMAC-SHA256 hash for given key and data
pub fn hmac_hash_hex(key: &[u8], data: &[u8]) -> String {
    hexencode(hmac_hash(key, data))
}

/// Returns HMAC-SHA1 hash for given key and data
pub fn hmac_sha1(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut hasher = Hmac::<Sha1>::new_from_slice(key).expect("HMAC can take key of any size");
    hasher.update(data);
    hasher.finalize().into_bytes().to_vec()
}

fn header_value_lowercase(headers: &Multimap, name: &str) -> String {
    for (k, v) in headers.iter() {
        if k.eq_ignore_ascii_case(name) {
            return v.clone();
        }
    }
    String::new()
}

/// Returns the canonical resource string of the legacy scheme:
/// `/bucket[/key][?subresources]` with only recognized subresources kept,
/// sorted by name.
pub fn get_legacy_resource(
    bucket: Option<&str>,
    object: Option<&str>,
    query: &Multimap,
) -> String {
    let mut resource = String::from("/");
    if let Some(bucket) = bucket {
        resource.push_str(bucket);
        match object {
            Some(object) => {
                if !object.starts_with('/') {
                    resource.push('/');
                }
                resource.push_str(&urlencode_object_key(object));
            }
            None => resource.push('/'),
        }
    }

    let mut params: Vec<(String, String)> = Vec::new();
    for (key, values) in query.iter_all() {
        if !SUBRESOURCES.contains(&key.as_str()) {
            continue;
        }
        for value in values {
            params.push((key.clone(), value.clone()));
        }
    }
    params.sort();

    let mut delim = '?';
    for (key, value) in params {
        resource.push(delim);
        resource.push_str(&key);
        if !value.is_empty() {
            resource.push('=');
            resource.push_str(&value);
        }
        delim = '&';
    }

    resource
}

/// Returns the legacy string-to-sign for given request pieces. `date_value`
/// fills the Date slot; it is left empty when an `x-obs-date` header is
/// present, which then participates through the canonicalized headers.
pub fn get_legacy_string_to_sign(
    method: &Method,
    headers: &Multimap,
    date_value: &str,
    resource: &str,
) -> String {
    let content_md5 = header_value_lowercase(headers, "content-md5");
    let content_type = header_value_lowercase(headers, "content-type");

    let has_obs_date = headers
        .iter()
        .any(|(k, _)| k.eq_ignore_ascii_case("x-obs-date"));
    let date_slot = if has_obs_date { "" } else { date_value };

    let mut s = format!("{method}\n{content_md5}\n{content_type}\n{date_slot}\n");
    for (key, value) in headers.get_prefixed_headers("x-obs-") {
        s.push_str(&key);
        s.push(':');
        s.push_str(&value);
        s.push('\n');
    }
    s.push_str(resource);
    s
}

/// Returns the base64 HMAC-SHA1 signature of the legacy string-to-sign
pub fn get_legacy_signature(secret_key: &str, string_to_sign: &str) -> String {
    b64encode(hmac_sha1(secret_key.as_bytes(), string_to_sign.as_bytes()))
}

/// Signs request headers with the legacy scheme. Inserts the `Date` header
/// and an `Authorization` header of the form `OBS access:signature`.
pub fn sign_legacy(
    method: &Method,
    headers: &mut Multimap,
    query: &Multimap,
    bucket: Option<&str>,
    object: Option<&str>,
    access_key: &str,
    secret_key: &str,
    date: UtcTime,
) {
    let date_value = to_http_header_value(date);
    if !headers.iter().any(|(k, _)| k.eq_ignore_ascii_case("date")) {
        headers.add(DATE, date_value.clone());
    }
    let date_value = header_value_lowercase(headers, "date");

    let resource = get_legacy_resource(bucket, object, query);
    let string_to_sign = get_legacy_string_to_sign(method, headers, &date_value, &resource);
    let signature = get_legacy_signature(secret_key, &string_to_sign);

    headers.add(AUTHORIZATION, format!("OBS {access_key}:{signature}"));
}

/// Computes a legacy pre-signed query string. The expiry is an absolute unix
/// timestamp filling the Date slot of the string-to-sign; `Signature` is
/// inserted last.
pub fn presign_legacy(
    method: &Method,
    headers: &Multimap,
    query_params: &mut Multimap,
    bucket: Option<&str>,
    object: Option<&str>,
    access_key: &str,
    secret_key: &str,
    expires_at: i64,
) {
    query_params.add("AccessKeyId", access_key);
    query_params.add("Expires", expires_at.to_string());

    let resource = get_legacy_resource(bucket, object, query_params);
    let string_to_sign =
        get_legacy_string_to_sign(method, headers, &expires_at.to_string(), &resource);
    let signature = get_legacy_signature(secret_key, &string_to_sign);

    query_params.add("Signature", signature);
}

/// Signs a base64-encoded POST policy with the legacy scheme
pub fn post_presign_legacy(policy_b64: &str, secret_key: &str) -> String {
    b64encode(hmac_sha1(secret_key.as_bytes(), policy_b64.as_bytes()))
}

/// Returns scope value of given date and region
pub fn get_scope(date: UtcTime, region: &str) -> String {
    format!("{}/{}/s3/aws4_request", to_signer_date(date), region)
}

/// Returns hex encoded SHA256 hash of canonical request
pub fn get_canonical_request_hash(
    method: &Method,
    uri: &str,
    query_string: &str,
    headers: &str,
    signed_headers: &str,
    content_sha256: &str,
) -> String {
    // CanonicalRequest =
    //   HTTPRequestMethod + '\n' +
    //   CanonicalURI + '\n' +
    //   CanonicalQueryString + '\n' +
    //   CanonicalHeaders + '\n\n' +
    //   SignedHeaders + '\n' +
    //   HexEncode(Hash(RequestPayload))
    let canonical_request = format!(
        "{}\n{}\n{}\n{}\n\n{}\n{}",
        method, uri, query_string, headers, signed_headers, content_sha256
    );
    sha256_hash(canonical_request.as_bytes())
}

/// Returns string-to-sign value of given date, scope and canonical request hash
pub fn get_string_to_sign(date: UtcTime, scope: &str, canonical_request_hash: &str) -> String {
    format!(
        "AWS4-HMAC-SHA256\n{}\n{}\n{}",
        to_amz_date(date),
        scope,
        canonical_request_hash
    )
}

/// Returns signing key of given secret key, date and region
pub fn get_signing_key(secret_key: &str, date: UtcTime, region: &str) -> Vec<u8> {
    let mut key: Vec<u8> = b"AWS4".to_vec();
    key.extend(secret_key.as_bytes());

    let date_key = hmac_hash(key.as_slice(), to_signer_date(date).as_bytes());
    let date_region_key = hmac_hash(date_key.as_slice(), region.as_bytes());
    let date_region_service_key = hmac_hash(date_region_key.as_slice(), b"s3");
    hmac_hash(date_region_service_key.as_slice(), b"aws4_request")
}

/// Returns signature value for given signing key and string-to-sign
pub fn get_signature(signing_key: &[u8], string_to_sign: &[u8]) -> String {
    hmac_hash_hex(signing_key, string_to_sign)
}

/// Returns authorization value for given access key, scope, signed headers and signature
pub fn get_authorization(
    access_key: &str,
    scope: &str,
    signed_headers: &str,
    signature: &str,
) -> String {
    format!(
        "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
        access_key, scope, signed_headers, signature
    )
}

/// Signs and updates headers for given parameters
pub fn sign_v4(
    method: &Method,
    uri: &str,
    region: &str,
    headers: &mut Multimap,
    query_params: &Multimap,
    access_key: &str,
    secret_key: &str,
    content_sha256: &str,
    date: UtcTime,
) {
    let scope = get_scope(date, region);
    let (signed_headers, canonical_headers) = headers.get_canonical_headers();
    let canonical_query_string = query_params.get_canonical_query_string();
    let canonical_request_hash = get_canonical_request_hash(
        method,
        uri,
        &canonical_query_string,
        &canonical_headers,
        &signed_headers,
        content_sha256,
    );
    let string_to_sign = get_string_to_sign(date, &scope, &canonical_request_hash);
    let signing_key = get_signing_key(secret_key, date, region);
    let signature = get_signature(signing_key.as_slice(), string_to_sign.as_bytes());
    let authorization = get_authorization(access_key, &scope, &signed_headers, &signature);

    headers.add(AUTHORIZATION, authorization);
}

/// Signs and updates query parameters for a pre-signed V4 request
pub fn presign_v4(
    method: &Method,
    host: &str,
    uri: &str,
    region: &str,
    query_params: &mut Multimap,
    access_key: &str,
    secret_key: &str,
    date: UtcTime,
    expires: u32,
) {
    let scope = get_scope(date, region);
    let canonical_headers = "host:".to_string() + host;
    let signed_headers = "host";

    query_params.add("X-Amz-Algorithm", "AWS4-HMAC-SHA256");
    query_params.add("X-Amz-Credential", access_key.to_string() + "/" + &scope);
    query_params.add("X-Amz-Date", to_amz_date(date));
    query_params.add("X-Amz-Expires", expires.to_string());
    query_params.add("X-Amz-SignedHeaders", signed_headers);

    let canonical_query_string = query_params.get_canonical_query_string();
    let canonical_request_hash = get_canonical_request_hash(
        method,
        uri,
        &canonical_query_string,
        &canonical_headers,
        signed_headers,
        "UNSIGNED-PAYLOAD",
    );
    let string_to_sign = get_string_to_sign(date, &scope, &canonical_request_hash);
    let signing_key = get_signing_key(secret_key, date, region);
    let signature = get_signature(signing_key.as_slice(), string_to_sign.as_bytes());

    query_params.add("X-Amz-Signature", signature);
}

/// Signs a base64-encoded POST policy with the V4 scheme
pub fn post_presign_v4(string_to_sign: &str, secret_key: &str, date: UtcTime, region: &str) -> String {
    let signing_key = get_signing_key(secret_key, date, region);
    get_signature(signing_key.as_slice(), string_to_sign.as_bytes())
}
