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

//! Request marshaling: operation parameters to request pieces

use crate::obs::error::ValidationErr;
use crate::obs::header_constants::CONTENT_TYPE;
use crate::obs::mime::{DEFAULT_CONTENT_TYPE, MimeLookup};
use crate::obs::multimap::{Multimap, MultimapExt};
use crate::obs::schema::{
    FieldSchema, FieldSpec, FieldValue, OperationDescriptor, Params, WireLocation,
};
use crate::obs::types::SignatureScheme;
use crate::obs::utils::{check_bucket_name, urlencode};
use bytes::Bytes;
use http::Method;

/// The request skeleton produced by [`marshal`], before addressing and
/// signing.
#[derive(Debug)]
pub struct RequestParts {
    pub method: Method,
    pub bucket: Option<String>,
    pub object: Option<String>,
    pub headers: Multimap,
    pub query: Multimap,
    pub body: Option<Bytes>,
}

fn effective_wire_name(spec: &FieldSpec, scheme: SignatureScheme) -> String {
    if spec.scheme_prefixed {
        format!("{}{}", scheme.header_prefix(), spec.wire_name)
    } else {
        spec.wire_name.to_string()
    }
}

/// Maps logical parameters onto their declared wire locations. Constructs
/// headers, query parameters and the request body; bucket and object are
/// returned separately for the addressing layer.
pub fn marshal(
    desc: &'static OperationDescriptor,
    params: &Params,
    scheme: SignatureScheme,
    mime: &dyn MimeLookup,
) -> Result<RequestParts, ValidationErr> {
    let mut parts = RequestParts {
        method: desc.method.clone(),
        bucket: None,
        object: None,
        headers: Multimap::new(),
        query: Multimap::new(),
        body: None,
    };

    let mut json_fields: Vec<(&'static str, FieldValue)> = Vec::new();

    for spec in desc.request_fields {
        let Some(value) = params.get(spec.name) else {
            if spec.required {
                return Err(ValidationErr::MissingParameter(format!(
                    "required parameter {} is missing",
                    spec.name
                )));
            }
            continue;
        };

        match spec.location {
            WireLocation::Uri => match spec.name {
                "Bucket" => {
                    let bucket = value.as_str().ok_or_else(|| {
                        ValidationErr::InvalidBucketName("bucket name must be a string".into())
                    })?;
                    check_bucket_name(bucket)?;
                    parts.bucket = Some(bucket.to_string());
                }
                _ => {
                    let key = value.as_str().ok_or_else(|| {
                        ValidationErr::InvalidObjectName("object key must be a string".into())
                    })?;
                    if key.is_empty() {
                        return Err(ValidationErr::InvalidObjectName(
                            "object key cannot be empty".into(),
                        ));
                    }
                    parts.object = Some(key.to_string());
                }
            },
            WireLocation::Header => match (&spec.schema, value) {
                (FieldSchema::Map, FieldValue::Map(map)) => {
                    let prefix = effective_wire_name(spec, scheme);
                    for (k, v) in map {
                        parts
                            .headers
                            .add(format!("{}{}", prefix, urlencode(k)), urlencode(v).to_string());
                    }
                }
                _ => {
                    if let Some(v) = value.to_wire_string() {
                        parts.headers.add(effective_wire_name(spec, scheme), v);
                    }
                }
            },
            WireLocation::Query => {
                if let Some(v) = value.to_wire_string() {
                    parts.query.add(spec.wire_name, v);
                }
            }
            WireLocation::Json => {
                json_fields.push((spec.wire_name, value.clone()));
            }
            WireLocation::Stream => {
                if let FieldValue::Bytes(bytes) = value {
                    parts.body = Some(bytes.clone());
                }
            }
            WireLocation::Xml => {
                // Request bodies are raw bytes or JSON; XML only appears on
                // the response side of the supported operations.
            }
        }
    }

    if let Some(sub) = desc.subresource {
        parts.query.add(sub, "");
    }

    if !json_fields.is_empty() {
        let mut map = serde_json::Map::new();
        for (name, value) in json_fields {
            map.insert(name.to_string(), field_to_json(&value));
        }
        let body = serde_json::Value::Object(map).to_string();
        parts.headers.add(CONTENT_TYPE, "application/json");
        parts.body = Some(Bytes::from(body));
    }

    // Upload operations without an explicit content type get one inferred
    // from the key or source file extension.
    if parts.body.is_some() && !parts.headers.contains_key(CONTENT_TYPE) {
        let guess = params
            .get("Key")
            .and_then(FieldValue::as_str)
            .and_then(|k| mime.lookup(k))
            .or_else(|| {
                params
                    .get("SourceFile")
                    .and_then(FieldValue::as_str)
                    .and_then(|f| mime.lookup(f))
            })
            .unwrap_or(DEFAULT_CONTENT_TYPE);
        parts.headers.add(CONTENT_TYPE, guess);
    }

    Ok(parts)
}

fn field_to_json(value: &FieldValue) -> serde_json::Value {
    match value {
        FieldValue::Str(s) => serde_json::Value::String(s.clone()),
        FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
        FieldValue::Float(v) => serde_json::Number::from_f64(*v)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        FieldValue::Bool(b) => serde_json::Value::Bool(*b),
        FieldValue::Map(m) => serde_json::Value::Object(
            m.iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect(),
        ),
        FieldValue::List(items) => {
            serde_json::Value::Array(items.iter().map(field_to_json).collect())
        }
        FieldValue::Object(fields) => serde_json::Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), field_to_json(v)))
                .collect(),
        ),
        FieldValue::Bytes(_) => serde_json::Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obs::mime::ExtensionMimeLookup;
    use crate::obs::operations::{GET_OBJECT, LIST_OBJECTS, PUT_OBJECT};
    use std::collections::HashMap;

    fn params_for_put(key: &str) -> Params {
        let mut p = Params::new();
        p.set_str("Bucket", "bucket");
        p.set_str("Key", key);
        p.set("Body", FieldValue::Bytes(Bytes::from_static(b"data")));
        p
    }

    #[test]
    fn required_parameter_enforced() {
        let p = Params::new();
        let err = marshal(&PUT_OBJECT, &p, SignatureScheme::Obs, &ExtensionMimeLookup);
        assert!(matches!(err, Err(ValidationErr::MissingParameter(_))));
    }

    #[test]
    fn metadata_expands_to_prefixed_headers() {
        let mut p = params_for_put("key.txt");
        p.set(
            "Metadata",
            FieldValue::Map(HashMap::from([("author".to_string(), "a b".to_string())])),
        );
        let parts = marshal(&PUT_OBJECT, &p, SignatureScheme::Obs, &ExtensionMimeLookup).unwrap();
        assert_eq!(parts.headers.get("x-obs-meta-author").unwrap(), "a%20b");

        let parts = marshal(&PUT_OBJECT, &p, SignatureScheme::V4, &ExtensionMimeLookup).unwrap();
        assert_eq!(parts.headers.get("x-amz-meta-author").unwrap(), "a%20b");
    }

    #[test]
    fn metadata_survives_a_header_round_trip() {
        use crate::obs::schema::ResultModel;
        use crate::obs::unmarshal::unmarshal_headers;

        let original = HashMap::from([
            ("author".to_string(), "a b".to_string()),
            ("topic".to_string(), "r&d".to_string()),
            ("title".to_string(), "caf\u{e9} \u{2603}".to_string()),
        ]);
        let mut p = params_for_put("key.txt");
        p.set("Metadata", FieldValue::Map(original.clone()));
        let parts = marshal(&PUT_OBJECT, &p, SignatureScheme::Obs, &ExtensionMimeLookup).unwrap();

        let mut headers = http::HeaderMap::new();
        for (k, values) in parts.headers.iter_all() {
            for v in values {
                headers.append(
                    http::header::HeaderName::from_bytes(k.as_bytes()).unwrap(),
                    v.parse().unwrap(),
                );
            }
        }

        let mut model = ResultModel::new();
        unmarshal_headers(
            &mut model,
            GET_OBJECT.response_fields,
            &headers,
            SignatureScheme::Obs,
        );
        assert_eq!(
            model.get("Metadata").and_then(FieldValue::as_map),
            Some(&original)
        );
    }

    #[test]
    fn content_type_inferred_from_key() {
        let p = params_for_put("report.pdf");
        let parts = marshal(&PUT_OBJECT, &p, SignatureScheme::Obs, &ExtensionMimeLookup).unwrap();
        assert_eq!(parts.headers.get(CONTENT_TYPE).unwrap(), "application/pdf");
    }

    #[test]
    fn content_type_falls_back_to_binary() {
        let p = params_for_put("blob");
        let parts = marshal(&PUT_OBJECT, &p, SignatureScheme::Obs, &ExtensionMimeLookup).unwrap();
        assert_eq!(parts.headers.get(CONTENT_TYPE).unwrap(), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn explicit_content_type_wins() {
        let mut p = params_for_put("report.pdf");
        p.set_str("ContentType", "text/csv");
        let parts = marshal(&PUT_OBJECT, &p, SignatureScheme::Obs, &ExtensionMimeLookup).unwrap();
        assert_eq!(parts.headers.get_vec(CONTENT_TYPE).unwrap().len(), 1);
        assert_eq!(parts.headers.get(CONTENT_TYPE).unwrap(), "text/csv");
    }

    #[test]
    fn query_fields_formatted_locale_independent() {
        let mut p = Params::new();
        p.set_str("Bucket", "bucket");
        p.set("MaxKeys", FieldValue::Int(1000));
        p.set_str("Prefix", "photos/");
        let parts = marshal(&LIST_OBJECTS, &p, SignatureScheme::Obs, &ExtensionMimeLookup).unwrap();
        assert_eq!(parts.query.get("max-keys").unwrap(), "1000");
        assert_eq!(parts.query.get("prefix").unwrap(), "photos/");
        assert!(parts.body.is_none());
    }

    #[test]
    fn get_object_carries_no_content_type() {
        let mut p = Params::new();
        p.set_str("Bucket", "bucket");
        p.set_str("Key", "key.txt");
        let parts = marshal(&GET_OBJECT, &p, SignatureScheme::Obs, &ExtensionMimeLookup).unwrap();
        assert!(!parts.headers.contains_key(CONTENT_TYPE));
        assert_eq!(parts.object.as_deref(), Some("key.txt"));
    }
}
