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

//! The client and its execution pipeline

use crate::obs::body::BoundedBodyStream;
use crate::obs::builders::{
    CreateBucket, CreateBucketBldr, DeleteBucket, DeleteBucketBldr, DeleteObject,
    DeleteObjectBldr, GetBucketTagging, GetBucketTaggingBldr, GetObject, GetObjectBldr,
    GetPresignedObjectUrl, GetPresignedObjectUrlBldr, GetPresignedPostFormData,
    GetPresignedPostFormDataBldr, ListObjects, ListObjectsBldr, PostPolicy, PutObject,
    PutObjectBldr, StatObject, StatObjectBldr,
};
use crate::obs::creds::Provider;
use crate::obs::error::{Error, ValidationErr};
use crate::obs::error_response::ErrorResponse;
use crate::obs::header_constants::{
    CONTENT_LENGTH, HOST, LOCATION, USER_AGENT, X_AMZ_CONTENT_SHA256, X_AMZ_DATE,
};
use crate::obs::http::BaseUrl;
use crate::obs::marshal::marshal;
use crate::obs::mime::{ExtensionMimeLookup, MimeLookup};
use crate::obs::multimap::MultimapExt;
use crate::obs::schema::{
    FieldValue, HTTP_STATUS_CODE, OperationDescriptor, Params, REASON, ResultModel, WireLocation,
};
use crate::obs::signer::{sign_legacy, sign_v4};
use crate::obs::transport::{
    ReqwestTransport, ResponseBody, Transport, TransportRequest, TransportResponse,
};
use crate::obs::types::SignatureScheme;
use crate::obs::unmarshal::{
    populate_common_fields, unmarshal_headers, unmarshal_json, unmarshal_xml,
};
use crate::obs::utils::{from_http_header_value, sha256_hash, to_amz_date, utc_now};
use bytes::{Buf, Bytes};
use http::Method;
use std::path::PathBuf;
use std::sync::Arc;
use xmltree::Element;

/// Default number of retries after the initial attempt.
pub const DEFAULT_MAX_RETRY_COUNT: u32 = 3;

/// Per-call delivery options for streamed response bodies. At most one save
/// option may be set.
#[derive(Clone, Debug, Default)]
pub struct CallOpts {
    /// Hand the response body to the caller as a stream instead of buffering.
    pub save_as_stream: bool,
    /// Write the response body to this path instead of buffering.
    pub save_as_file: Option<PathBuf>,
}

impl CallOpts {
    fn validate(&self) -> Result<(), ValidationErr> {
        if self.save_as_stream && self.save_as_file.is_some() {
            return Err(ValidationErr::ConflictingSaveOptions);
        }
        Ok(())
    }
}

#[derive(Debug)]
pub(crate) struct ClientInner {
    pub(crate) base_url: BaseUrl,
    pub(crate) provider: Option<Arc<dyn Provider>>,
    pub(crate) scheme: SignatureScheme,
    pub(crate) raise_service_errors: bool,
    pub(crate) max_retry_count: u32,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) mime: Arc<dyn MimeLookup>,
    pub(crate) user_agent: String,
}

/// The client for OBS and Amazon S3 compatible object storage. It is cheap to
/// clone and safe to share across tasks.
#[derive(Clone, Debug)]
pub struct ObsClient {
    shared: Arc<ClientInner>,
}

/// Builds an [`ObsClient`] from a base URL plus optional collaborators.
pub struct ObsClientBuilder {
    base_url: BaseUrl,
    provider: Option<Arc<dyn Provider>>,
    scheme: SignatureScheme,
    raise_service_errors: bool,
    max_retry_count: u32,
    transport: Option<Arc<dyn Transport>>,
    mime: Option<Arc<dyn MimeLookup>>,
    app_info: Option<(String, String)>,
}

impl ObsClientBuilder {
    pub fn new(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            provider: None,
            scheme: SignatureScheme::default(),
            raise_service_errors: true,
            max_retry_count: DEFAULT_MAX_RETRY_COUNT,
            transport: None,
            mime: None,
            app_info: None,
        }
    }

    /// Set the credential provider. Without one, requests go out unsigned.
    pub fn provider<P: Provider + 'static>(mut self, provider: P) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    pub fn signature_scheme(mut self, scheme: SignatureScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// When disabled, service errors are reported through the response model
    /// instead of being returned as `Err`.
    pub fn raise_service_errors(mut self, raise: bool) -> Self {
        self.raise_service_errors = raise;
        self
    }

    /// Number of retries after the initial attempt, shared between connection
    /// retries and redirect follows.
    pub fn max_retry_count(mut self, count: u32) -> Self {
        self.max_retry_count = count;
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn mime_lookup(mut self, mime: Arc<dyn MimeLookup>) -> Self {
        self.mime = Some(mime);
        self
    }

    /// Set the app info as an application name and version to the user agent.
    pub fn app_info(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.app_info = Some((name.into(), version.into()));
        self
    }

    pub fn build(self) -> Result<ObsClient, Error> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::new()?),
        };
        let mut user_agent = format!("obs-sdk/{}", env!("CARGO_PKG_VERSION"));
        if let Some((name, version)) = self.app_info {
            user_agent.push_str(&format!(" {name}/{version}"));
        }

        Ok(ObsClient {
            shared: Arc::new(ClientInner {
                base_url: self.base_url,
                provider: self.provider,
                scheme: self.scheme,
                raise_service_errors: self.raise_service_errors,
                max_retry_count: self.max_retry_count,
                transport,
                mime: self.mime.unwrap_or_else(|| Arc::new(ExtensionMimeLookup)),
                user_agent,
            }),
        })
    }
}

impl ObsClient {
    pub fn builder(base_url: BaseUrl) -> ObsClientBuilder {
        ObsClientBuilder::new(base_url)
    }

    pub fn signature_scheme(&self) -> SignatureScheme {
        self.shared.scheme
    }

    pub fn is_secure(&self) -> bool {
        self.shared.base_url.https
    }

    pub(crate) fn inner(&self) -> &ClientInner {
        &self.shared
    }

    /// Uploads an object.
    pub fn put_object(&self, bucket: impl Into<String>, object: impl Into<String>) -> PutObjectBldr {
        PutObject::builder()
            .client(self.clone())
            .bucket(bucket)
            .object(object)
    }

    /// Downloads an object.
    pub fn get_object(&self, bucket: impl Into<String>, object: impl Into<String>) -> GetObjectBldr {
        GetObject::builder()
            .client(self.clone())
            .bucket(bucket)
            .object(object)
    }

    /// Retrieves an object's metadata without its body.
    pub fn stat_object(
        &self,
        bucket: impl Into<String>,
        object: impl Into<String>,
    ) -> StatObjectBldr {
        StatObject::builder()
            .client(self.clone())
            .bucket(bucket)
            .object(object)
    }

    /// Removes an object or one of its versions.
    pub fn delete_object(
        &self,
        bucket: impl Into<String>,
        object: impl Into<String>,
    ) -> DeleteObjectBldr {
        DeleteObject::builder()
            .client(self.clone())
            .bucket(bucket)
            .object(object)
    }

    /// Creates a bucket.
    pub fn create_bucket(&self, bucket: impl Into<String>) -> CreateBucketBldr {
        CreateBucket::builder().client(self.clone()).bucket(bucket)
    }

    /// Removes an empty bucket.
    pub fn delete_bucket(&self, bucket: impl Into<String>) -> DeleteBucketBldr {
        DeleteBucket::builder().client(self.clone()).bucket(bucket)
    }

    /// Lists objects of a bucket.
    pub fn list_objects(&self, bucket: impl Into<String>) -> ListObjectsBldr {
        ListObjects::builder().client(self.clone()).bucket(bucket)
    }

    /// Retrieves a bucket's tag set.
    pub fn get_bucket_tagging(&self, bucket: impl Into<String>) -> GetBucketTaggingBldr {
        GetBucketTagging::builder()
            .client(self.clone())
            .bucket(bucket)
    }

    /// Produces a pre-signed URL for the given method, bucket and object.
    pub fn get_presigned_object_url(
        &self,
        method: Method,
        bucket: impl Into<String>,
        object: impl Into<String>,
    ) -> GetPresignedObjectUrlBldr {
        GetPresignedObjectUrl::builder()
            .client(self.clone())
            .method(method)
            .bucket(bucket)
            .object(object)
    }

    /// Produces browser-upload form fields for a POST policy.
    pub fn get_presigned_post_form_data(&self, policy: PostPolicy) -> GetPresignedPostFormDataBldr {
        GetPresignedPostFormData::builder()
            .client(self.clone())
            .policy(policy)
    }

    fn sign_request(
        &self,
        method: &Method,
        path: &str,
        headers: &mut crate::obs::multimap::Multimap,
        query: &crate::obs::multimap::Multimap,
        bucket: Option<&str>,
        object: Option<&str>,
        body: Option<&Bytes>,
    ) {
        let Some(provider) = &self.shared.provider else {
            return;
        };
        let creds = provider.fetch();
        // An explicit Date header wins over the clock, for both schemes.
        let date = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("date"))
            .and_then(|(_, v)| from_http_header_value(v).ok())
            .unwrap_or_else(utc_now);

        match self.shared.scheme {
            SignatureScheme::Obs => {
                if let Some(token) = &creds.session_token {
                    headers.add(self.shared.scheme.security_token_header(), token.clone());
                }
                sign_legacy(
                    method,
                    headers,
                    query,
                    bucket,
                    object,
                    &creds.access_key,
                    &creds.secret_key,
                    date,
                );
            }
            SignatureScheme::V4 => {
                if let Some(token) = &creds.session_token {
                    headers.add(self.shared.scheme.security_token_header(), token.clone());
                }
                let content_sha256 = match body {
                    Some(b) => sha256_hash(b),
                    None => sha256_hash(b""),
                };
                headers.add(X_AMZ_CONTENT_SHA256, content_sha256.clone());
                headers.add(X_AMZ_DATE, to_amz_date(date));
                sign_v4(
                    method,
                    path,
                    &self.shared.base_url.region,
                    headers,
                    query,
                    &creds.access_key,
                    &creds.secret_key,
                    &content_sha256,
                    date,
                );
            }
        }
    }

    /// Executes one operation: marshal, address, sign, send, retry or follow
    /// redirects within the shared attempt budget, translate failures, then
    /// unmarshal the response.
    pub(crate) async fn invoke(
        &self,
        desc: &'static OperationDescriptor,
        params: Params,
        opts: CallOpts,
    ) -> Result<ResultModel, Error> {
        opts.validate()?;
        let raise = self.shared.raise_service_errors;
        let scheme = self.shared.scheme;

        let parts = marshal(desc, &params, scheme, self.shared.mime.as_ref())?;

        let mut base = self.shared.base_url.clone();
        let max_attempts = self.shared.max_retry_count + 1;
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;

            let url = base.build_url(
                &parts.query,
                parts.bucket.as_deref(),
                parts.object.as_deref(),
            )?;
            let mut headers = parts.headers.clone();
            headers.add(HOST, url.host_header_value());
            headers.add(USER_AGENT, self.shared.user_agent.clone());
            self.sign_request(
                &parts.method,
                &url.path,
                &mut headers,
                &parts.query,
                parts.bucket.as_deref(),
                parts.object.as_deref(),
                parts.body.as_ref(),
            );

            let url_string = url.to_string();
            log::debug!(
                "{}: {} {} (attempt {}/{})",
                desc.name,
                parts.method,
                url_string,
                attempts,
                max_attempts
            );

            let req = TransportRequest {
                method: parts.method.clone(),
                url: url_string.clone(),
                headers,
                body: parts.body.clone(),
            };

            let started = std::time::Instant::now();
            let resp = match self.shared.transport.send(req, desc.stream).await {
                Ok(resp) => resp,
                Err(e) if e.is_connect() && attempts < max_attempts => {
                    log::debug!("{}: connection failure, retrying: {}", desc.name, e);
                    continue;
                }
                Err(e) => {
                    if raise {
                        return if e.is_connect() {
                            Err(Error::RetryLimitExceeded {
                                attempts,
                                source: e,
                            })
                        } else {
                            Err(Error::Transport(e))
                        };
                    }
                    let err =
                        ErrorResponse::from_transport(parts.method.clone(), url_string, &e);
                    return Ok(error_model(&err, &err.message.clone()));
                }
            };
            log::debug!(
                "{}: HTTP {} in {:?}",
                desc.name,
                resp.status,
                started.elapsed()
            );

            if (300..400).contains(&resp.status) && resp.status != 304 && attempts < max_attempts
            {
                if let Some(location) = resp
                    .headers
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
                {
                    log::debug!("{}: following redirect to {}", desc.name, location);
                    base = base.resolve_location(&location)?;
                    continue;
                }
            }

            if resp.status >= 300 {
                return self.translate_error(desc, url_string, resp, raise);
            }

            return self.unmarshal_response(desc, resp, &opts).await;
        }
    }

    fn translate_error(
        &self,
        desc: &'static OperationDescriptor,
        url: String,
        resp: TransportResponse,
        raise: bool,
    ) -> Result<ResultModel, Error> {
        let body = match resp.body {
            ResponseBody::Buffered(b) => b,
            ResponseBody::Stream(_) => Bytes::new(),
        };
        let err = ErrorResponse::from_response(
            desc.method.clone(),
            url,
            resp.status,
            &resp.reason,
            resp.headers,
            &body,
            self.shared.scheme.request_id_header(),
        );
        if raise {
            return Err(err.into());
        }
        Ok(error_model(&err, &resp.reason))
    }

    async fn unmarshal_response(
        &self,
        desc: &'static OperationDescriptor,
        resp: TransportResponse,
        opts: &CallOpts,
    ) -> Result<ResultModel, Error> {
        let mut model = ResultModel::new();
        populate_common_fields(
            &mut model,
            resp.status,
            &resp.reason,
            &resp.headers,
            self.shared.scheme,
        );
        unmarshal_headers(
            &mut model,
            desc.response_fields,
            &resp.headers,
            self.shared.scheme,
        );

        if desc.stream {
            let expected = resp
                .headers
                .get(CONTENT_LENGTH)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            let stream = BoundedBodyStream::new(resp.body, expected);
            if let Some(path) = &opts.save_as_file {
                stream.save_to_file(path).await?;
            } else if opts.save_as_stream {
                model.set_stream(stream);
            } else {
                let data = stream.read_all().await?;
                model.set("Body", FieldValue::Bytes(data));
            }
            return Ok(model);
        }

        let body = match resp.body {
            ResponseBody::Buffered(b) => b,
            ResponseBody::Stream(s) => BoundedBodyStream::new(ResponseBody::Stream(s), None)
                .read_all()
                .await?,
        };
        if !body.is_empty() {
            if desc
                .response_fields
                .iter()
                .any(|f| f.location == WireLocation::Xml)
            {
                let root = Element::parse(body.clone().reader())?;
                unmarshal_xml(&mut model, desc.response_fields, &root);
            }
            if desc
                .response_fields
                .iter()
                .any(|f| f.location == WireLocation::Json)
            {
                unmarshal_json(&mut model, desc.response_fields, &body);
            }
        }
        Ok(model)
    }
}

/// Response model for a failed call when service errors are not raised.
fn error_model(err: &ErrorResponse, reason: &str) -> ResultModel {
    let mut model = ResultModel::new();
    model.set(
        HTTP_STATUS_CODE,
        FieldValue::Int(err.status.map_or(-1, i64::from)),
    );
    model.set(REASON, FieldValue::Str(reason.to_string()));
    model.set("Code", FieldValue::Str(err.code.clone()));
    model.set("Message", FieldValue::Str(err.message.clone()));
    model.set("RequestId", FieldValue::Str(err.request_id.clone()));
    model.set("HostId", FieldValue::Str(err.host_id.clone()));
    model.set("Resource", FieldValue::Str(err.resource.clone()));
    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obs::creds::StaticProvider;
    use crate::obs::error::Error;
    use crate::obs::multimap::Multimap;
    use crate::obs::transport::TransportError;
    use crate::obs::types::ObsApi;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use http::HeaderMap;
    use http::header::HeaderName;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Debug)]
    enum Step {
        Fail(TransportError),
        Respond {
            status: u16,
            headers: Vec<(&'static str, &'static str)>,
            body: &'static str,
        },
    }

    #[derive(Debug)]
    struct RecordedCall {
        url: String,
        headers: Multimap,
    }

    #[derive(Debug, Default)]
    struct MockTransport {
        script: Mutex<VecDeque<Step>>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl MockTransport {
        fn scripted(steps: Vec<Step>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(steps.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn call_url(&self, index: usize) -> String {
            self.calls.lock().unwrap()[index].url.clone()
        }

        fn call_header(&self, index: usize, name: &str) -> Option<String> {
            self.calls.lock().unwrap()[index]
                .headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.clone())
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(
            &self,
            req: TransportRequest,
            _stream_response: bool,
        ) -> Result<TransportResponse, TransportError> {
            self.calls.lock().unwrap().push(RecordedCall {
                url: req.url,
                headers: req.headers,
            });
            let step = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .expect("transport script exhausted");
            match step {
                Step::Fail(e) => Err(e),
                Step::Respond {
                    status,
                    headers,
                    body,
                } => {
                    let mut header_map = HeaderMap::new();
                    for (k, v) in headers {
                        header_map.insert(
                            HeaderName::from_bytes(k.as_bytes()).unwrap(),
                            v.parse().unwrap(),
                        );
                    }
                    let reason = http::StatusCode::from_u16(status)
                        .ok()
                        .and_then(|s| s.canonical_reason())
                        .unwrap_or_default()
                        .to_string();
                    Ok(TransportResponse {
                        status,
                        reason,
                        headers: header_map,
                        body: ResponseBody::Buffered(Bytes::from_static(body.as_bytes())),
                    })
                }
            }
        }
    }

    fn test_client(transport: Arc<MockTransport>) -> ObsClient {
        let _ = env_logger::builder().is_test(true).try_init();
        ObsClient::builder("http://obs.example.com".parse().unwrap())
            .provider(StaticProvider::new("access", "secret", None))
            .transport(transport)
            .build()
            .unwrap()
    }

    fn connect_err() -> Step {
        Step::Fail(TransportError::Connect("connection refused".into()))
    }

    fn ok_response() -> Step {
        Step::Respond {
            status: 200,
            headers: vec![("x-obs-request-id", "req-ok")],
            body: "",
        }
    }

    #[tokio::test]
    async fn connect_failures_exhaust_retry_budget() {
        let transport = MockTransport::scripted(vec![
            connect_err(),
            connect_err(),
            connect_err(),
            connect_err(),
        ]);
        let client = test_client(transport.clone());

        let result = client.stat_object("bucket", "key").build().send().await;
        match result {
            Err(Error::RetryLimitExceeded { attempts, .. }) => assert_eq!(attempts, 4),
            other => panic!("expected retry limit error, got {other:?}"),
        }
        assert_eq!(transport.call_count(), 4);
    }

    #[tokio::test]
    async fn connect_failure_retries_then_succeeds() {
        let transport = MockTransport::scripted(vec![connect_err(), ok_response()]);
        let client = test_client(transport.clone());

        let resp = client
            .stat_object("bucket", "key")
            .build()
            .send()
            .await
            .unwrap();
        assert_eq!(resp.http_status_code(), 200);
        assert_eq!(resp.request_id(), Some("req-ok"));
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn non_connect_failure_is_not_retried() {
        let transport = MockTransport::scripted(vec![Step::Fail(TransportError::Other(
            "tls handshake failed".into(),
        ))]);
        let client = test_client(transport.clone());

        let result = client.stat_object("bucket", "key").build().send().await;
        assert!(matches!(result, Err(Error::Transport(_))));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn redirect_is_followed_and_resigned() {
        let transport = MockTransport::scripted(vec![
            Step::Respond {
                status: 301,
                headers: vec![("Location", "http://other.example.com")],
                body: "",
            },
            ok_response(),
        ]);
        let client = test_client(transport.clone());

        let resp = client
            .stat_object("bucket", "key")
            .build()
            .send()
            .await
            .unwrap();
        assert_eq!(resp.http_status_code(), 200);
        assert_eq!(transport.call_count(), 2);
        assert!(transport.call_url(0).starts_with("http://obs.example.com"));
        assert!(transport.call_url(1).starts_with("http://other.example.com"));

        // each attempt carries its own signature for its own host
        let auth0 = transport.call_header(0, "Authorization").unwrap();
        let auth1 = transport.call_header(1, "Authorization").unwrap();
        assert!(auth0.starts_with("OBS access:"));
        assert!(auth1.starts_with("OBS access:"));
        assert_eq!(
            transport.call_header(1, "Host").unwrap(),
            "other.example.com"
        );
    }

    #[tokio::test]
    async fn redirects_share_the_retry_budget() {
        let transport = MockTransport::scripted(vec![
            Step::Respond {
                status: 307,
                headers: vec![("Location", "http://other.example.com")],
                body: "",
            },
            Step::Respond {
                status: 307,
                headers: vec![("Location", "http://third.example.com")],
                body: "",
            },
        ]);
        let client = ObsClient::builder("http://obs.example.com".parse().unwrap())
            .provider(StaticProvider::new("access", "secret", None))
            .transport(transport.clone())
            .max_retry_count(1)
            .build()
            .unwrap();

        // two attempts in total: the second redirect is out of budget and is
        // reported as the final outcome
        let result = client.stat_object("bucket", "key").build().send().await;
        assert!(matches!(result, Err(Error::Service(_))));
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn not_modified_is_not_followed() {
        let transport = MockTransport::scripted(vec![Step::Respond {
            status: 304,
            headers: vec![("Location", "http://other.example.com")],
            body: "",
        }]);
        let client = test_client(transport.clone());

        let result = client.stat_object("bucket", "key").build().send().await;
        assert!(matches!(result, Err(Error::Service(_))));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn conflicting_save_options_fail_before_any_io() {
        let transport = MockTransport::scripted(vec![]);
        let client = test_client(transport.clone());

        let result = client
            .get_object("bucket", "key")
            .save_as_stream(true)
            .save_as_file("/tmp/out")
            .build()
            .send()
            .await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationErr::ConflictingSaveOptions))
        ));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn service_error_fields_populate_model_when_not_raised() {
        let transport = MockTransport::scripted(vec![Step::Respond {
            status: 404,
            headers: vec![("x-obs-request-id", "req-404")],
            body: "<Error><Code>NoSuchKey</Code><Message>The specified key does not exist.</Message><RequestId>req-404</RequestId></Error>",
        }]);
        let client = ObsClient::builder("http://obs.example.com".parse().unwrap())
            .provider(StaticProvider::new("access", "secret", None))
            .transport(transport.clone())
            .raise_service_errors(false)
            .build()
            .unwrap();

        let resp = client
            .stat_object("bucket", "missing")
            .build()
            .send()
            .await
            .unwrap();
        assert_eq!(resp.http_status_code(), 404);
        assert_eq!(resp.error_code(), Some("NoSuchKey"));
        assert_eq!(
            resp.error_message(),
            Some("The specified key does not exist.")
        );
        assert_eq!(resp.request_id(), Some("req-404"));
    }

    #[tokio::test]
    async fn exhausted_transport_reports_minus_one_when_not_raised() {
        let transport = MockTransport::scripted(vec![
            connect_err(),
            connect_err(),
            connect_err(),
            connect_err(),
        ]);
        let client = ObsClient::builder("http://obs.example.com".parse().unwrap())
            .provider(StaticProvider::new("access", "secret", None))
            .transport(transport.clone())
            .raise_service_errors(false)
            .build()
            .unwrap();

        let resp = client
            .stat_object("bucket", "key")
            .build()
            .send()
            .await
            .unwrap();
        assert_eq!(resp.http_status_code(), -1);
        assert!(resp.error_message().unwrap().contains("connection refused"));
        assert_eq!(transport.call_count(), 4);
    }

    #[tokio::test]
    async fn put_object_send_and_response() {
        let transport = MockTransport::scripted(vec![Step::Respond {
            status: 200,
            headers: vec![("ETag", "\"d41d8cd9\""), ("x-obs-version-id", "v7")],
            body: "",
        }]);
        let client = test_client(transport.clone());

        let resp = client
            .put_object("bucket", "report.pdf")
            .data(Bytes::from_static(b"content"))
            .build()
            .send()
            .await
            .unwrap();
        assert_eq!(resp.etag(), Some("\"d41d8cd9\""));
        assert_eq!(resp.version_id(), Some("v7"));

        // inferred from the key extension
        assert_eq!(
            transport.call_header(0, "Content-Type").unwrap(),
            "application/pdf"
        );
    }

    #[tokio::test]
    async fn list_objects_parses_xml_page() {
        let transport = MockTransport::scripted(vec![Step::Respond {
            status: 200,
            headers: vec![("x-obs-request-id", "req-list")],
            body: "<ListBucketResult><Name>bucket</Name><IsTruncated>true</IsTruncated>\
                   <NextMarker>b.txt</NextMarker>\
                   <Contents><Key>a.txt</Key><Size>11</Size><ETag>\"e1\"</ETag>\
                   <LastModified>2022-08-15T16:50:12.000Z</LastModified></Contents>\
                   <Contents><Key>b.txt</Key><Size>22</Size><ETag>\"e2\"</ETag></Contents>\
                   </ListBucketResult>",
        }]);
        let client = test_client(transport.clone());

        let resp = client
            .list_objects("bucket")
            .prefix("a")
            .build()
            .send()
            .await
            .unwrap();
        assert!(resp.is_truncated());
        assert_eq!(resp.next_marker(), Some("b.txt"));
        assert_eq!(resp.contents().len(), 2);
        assert_eq!(resp.contents()[0].key, "a.txt");
        assert_eq!(
            resp.contents()[0].last_modified,
            Some(Utc.with_ymd_and_hms(2022, 8, 15, 16, 50, 12).unwrap())
        );
        assert_eq!(resp.contents()[1].size, 22);
        assert!(transport.call_url(0).contains("prefix=a"));
    }

    #[tokio::test]
    async fn stat_object_parses_last_modified_header() {
        let transport = MockTransport::scripted(vec![Step::Respond {
            status: 200,
            headers: vec![
                ("x-obs-request-id", "req-stat"),
                ("Last-Modified", "Mon, 15 Aug 2022 16:50:12 GMT"),
                ("ETag", "\"abc\""),
            ],
            body: "",
        }]);
        let client = test_client(transport.clone());

        let resp = client
            .stat_object("bucket", "key")
            .build()
            .send()
            .await
            .unwrap();
        assert_eq!(
            resp.last_modified(),
            Some(Utc.with_ymd_and_hms(2022, 8, 15, 16, 50, 12).unwrap())
        );
    }

    #[test]
    fn explicit_date_header_drives_the_legacy_signature() {
        let transport = MockTransport::scripted(vec![]);
        let client = ObsClient::builder("http://obs.example.com".parse().unwrap())
            .provider(StaticProvider::new("access_key", "123456", None))
            .transport(transport)
            .build()
            .unwrap();

        let mut headers = Multimap::new();
        headers.add("Date", "Mon, 15 Aug 2022 16:50:12 GMT");
        headers.add("Content-MD5", "abc");
        headers.add("Content-Type", "text/plain");
        client.sign_request(
            &Method::GET,
            "/bucket/object.txt",
            &mut headers,
            &Multimap::new(),
            Some("bucket"),
            Some("object.txt"),
            None,
        );

        assert_eq!(headers.get("Date").unwrap(), "Mon, 15 Aug 2022 16:50:12 GMT");
        assert_eq!(
            headers.get("Authorization").unwrap(),
            "OBS access_key:9gUZ4ol2W19LyYcc92Bu3U0V09E="
        );
    }

    #[test]
    fn explicit_date_header_drives_the_v4_signature() {
        let transport = MockTransport::scripted(vec![]);
        let client = ObsClient::builder("http://obs.example.com".parse().unwrap())
            .provider(StaticProvider::new("access", "secret", None))
            .signature_scheme(SignatureScheme::V4)
            .transport(transport)
            .build()
            .unwrap();

        let mut headers = Multimap::new();
        headers.add("Date", "Mon, 15 Aug 2022 16:50:12 GMT");
        headers.add("Host", "obs.example.com");
        client.sign_request(
            &Method::GET,
            "/bucket/object.txt",
            &mut headers,
            &Multimap::new(),
            Some("bucket"),
            Some("object.txt"),
            None,
        );

        assert_eq!(headers.get("x-amz-date").unwrap(), "20220815T165012Z");
    }

    #[tokio::test]
    async fn send_blocking_runs_without_ambient_runtime() {
        let transport = MockTransport::scripted(vec![ok_response()]);
        let client = test_client(transport.clone());

        let handle = std::thread::spawn(move || {
            client.stat_object("bucket", "key").build().send_blocking()
        });
        let resp = handle.join().unwrap().unwrap();
        assert_eq!(resp.http_status_code(), 200);
        assert_eq!(transport.call_count(), 1);
    }
}
