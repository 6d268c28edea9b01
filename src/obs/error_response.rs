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

//! Translation of non-2xx responses and transport failures into a structured
//! error value

use crate::obs::transport::TransportError;
use crate::obs::utils::get_text_default;
use bytes::Buf;
use http::{HeaderMap, Method};
use serde::Deserialize;
use xmltree::Element;

/// `client` covers [400, 500) and missing responses; everything else is
/// `server`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClassification {
    Client,
    Server,
}

/// The typed error returned for failed API operations. Carries enough request
/// and response context to diagnose the failure without re-issuing the call.
#[derive(Clone, Debug)]
pub struct ErrorResponse {
    pub method: Method,
    pub url: String,
    /// HTTP status of the response, `None` for a pure transport failure.
    pub status: Option<u16>,
    pub classification: ErrorClassification,
    pub code: String,
    pub message: String,
    pub request_id: String,
    pub host_id: String,
    pub resource: String,
    pub headers: HeaderMap,
}

#[derive(Debug, Default, Deserialize)]
struct JsonErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    request_id: String,
}

fn classify(status: Option<u16>) -> ErrorClassification {
    match status {
        Some(s) if (400..500).contains(&s) => ErrorClassification::Client,
        Some(_) => ErrorClassification::Server,
        None => ErrorClassification::Client,
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

impl ErrorResponse {
    /// Builds an error from a non-2xx HTTP response. JSON bodies are parsed
    /// for `code`/`message`/`request_id`; anything else is treated as the XML
    /// error document. A body that fails to parse degrades to empty fields,
    /// and a request id missing from the body falls back to the scheme's
    /// request-id response header.
    pub fn from_response(
        method: Method,
        url: String,
        status: u16,
        reason: &str,
        headers: HeaderMap,
        body: &[u8],
        request_id_header: &str,
    ) -> Self {
        let mut code = String::new();
        let mut message = String::new();
        let mut request_id = String::new();
        let mut host_id = String::new();
        let mut resource = String::new();

        let is_json = header_str(&headers, "content-type")
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false);

        if is_json {
            if let Ok(parsed) = serde_json::from_slice::<JsonErrorBody>(body) {
                code = parsed.code;
                message = parsed.message;
                request_id = parsed.request_id;
            }
        } else if !body.is_empty() {
            if let Ok(root) = Element::parse(bytes::Bytes::copy_from_slice(body).reader()) {
                code = get_text_default(&root, "Code");
                message = get_text_default(&root, "Message");
                request_id = get_text_default(&root, "RequestId");
                host_id = get_text_default(&root, "HostId");
                resource = get_text_default(&root, "Resource");
            }
        }

        if request_id.is_empty() {
            if let Some(v) = header_str(&headers, request_id_header) {
                request_id = v.to_string();
            }
        }
        if message.is_empty() {
            message = reason.to_string();
        }

        Self {
            method,
            url,
            status: Some(status),
            classification: classify(Some(status)),
            code,
            message,
            request_id,
            host_id,
            resource,
            headers,
        }
    }

    /// Builds an error from a transport failure where no response exists.
    pub fn from_transport(method: Method, url: String, err: &TransportError) -> Self {
        Self {
            method,
            url,
            status: None,
            classification: ErrorClassification::Client,
            code: String::new(),
            message: err.to_string(),
            request_id: String::new(),
            host_id: String::new(),
            resource: String::new(),
            headers: HeaderMap::new(),
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "operation failed: {} {}\n\tstatus: {:?}\n\tclassification: {:?}\n\tcode: {}\n\tmessage: {}\n\trequest_id: {}\n\thost_id: {}\n\tresource: {}",
            self.method,
            self.url,
            self.status,
            self.classification,
            self.code,
            self.message,
            self.request_id,
            self.host_id,
            self.resource,
        )
    }
}

impl std::error::Error for ErrorResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_xml_error_body() {
        let body = b"<Error><Code>NoSuchKey</Code><RequestId>abc</RequestId></Error>";
        let err = ErrorResponse::from_response(
            Method::GET,
            "https://obs.example.com/bucket/key".to_string(),
            404,
            "Not Found",
            HeaderMap::new(),
            body,
            "x-obs-request-id",
        );
        assert_eq!(err.classification, ErrorClassification::Client);
        assert_eq!(err.code, "NoSuchKey");
        assert_eq!(err.request_id, "abc");
        // message falls back to the reason phrase
        assert_eq!(err.message, "Not Found");
    }

    #[test]
    fn json_error_body() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/json".parse().unwrap());
        let body = br#"{"code":"AccessDeniedException","message":"denied","request_id":"req-1"}"#;
        let err = ErrorResponse::from_response(
            Method::POST,
            "https://obs.example.com/bucket".to_string(),
            403,
            "Forbidden",
            headers,
            body,
            "x-obs-request-id",
        );
        assert_eq!(err.code, "AccessDeniedException");
        assert_eq!(err.message, "denied");
        assert_eq!(err.request_id, "req-1");
    }

    #[test]
    fn request_id_falls_back_to_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-amz-request-id", "hdr-id".parse().unwrap());
        let err = ErrorResponse::from_response(
            Method::GET,
            "https://obs.example.com/b/k".to_string(),
            500,
            "Internal Server Error",
            headers,
            b"not really xml",
            "x-amz-request-id",
        );
        assert_eq!(err.classification, ErrorClassification::Server);
        assert_eq!(err.request_id, "hdr-id");
        assert!(err.code.is_empty());
    }

    #[test]
    fn transport_failure_is_client_classified() {
        let err = ErrorResponse::from_transport(
            Method::GET,
            "https://obs.example.com/b/k".to_string(),
            &TransportError::Connect("connection refused".to_string()),
        );
        assert_eq!(err.status, None);
        assert_eq!(err.classification, ErrorClassification::Client);
        assert!(err.message.contains("connection refused"));
    }
}
