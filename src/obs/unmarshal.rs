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

//! Response unmarshaling: response pieces to result fields
//!
//! Parse failures inside field extraction degrade to absent or empty fields;
//! they never abort the call.

use crate::obs::multimap::urldecode;
use crate::obs::schema::{
    FieldSchema, FieldSpec, FieldValue, HTTP_STATUS_CODE, REASON, ResultModel, ScalarType,
    WireLocation,
};
use crate::obs::types::SignatureScheme;
use http::HeaderMap;
use std::collections::HashMap;
use xmltree::Element;

/// Common response headers recorded on every result, keyed per scheme:
/// (result field name, header suffix under the scheme prefix).
const COMMON_HEADERS: &[(&str, &str)] = &[
    ("RequestId", "request-id"),
    ("HostId", "id-2"),
    ("VersionId", "version-id"),
    ("DeleteMarker", "delete-marker"),
    ("StorageClass", "storage-class"),
];

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Records the HTTP status line plus the scheme's common headers on the model.
pub fn populate_common_fields(
    model: &mut ResultModel,
    status: u16,
    reason: &str,
    headers: &HeaderMap,
    scheme: SignatureScheme,
) {
    model.set(HTTP_STATUS_CODE, FieldValue::Int(status as i64));
    model.set(REASON, FieldValue::Str(reason.to_string()));
    for (field, suffix) in COMMON_HEADERS {
        let name = format!("{}{}", scheme.header_prefix(), suffix);
        if let Some(v) = header_str(headers, &name) {
            model.set(*field, FieldValue::Str(v.to_string()));
        }
    }
}

fn coerce_scalar(ty: ScalarType, raw: Option<&str>) -> Option<FieldValue> {
    match ty {
        ScalarType::String => Some(FieldValue::Str(raw.unwrap_or_default().to_string())),
        ScalarType::Int => raw.and_then(|s| s.trim().parse::<i64>().ok()).map(FieldValue::Int),
        ScalarType::Float => raw
            .and_then(|s| s.trim().parse::<f64>().ok())
            .map(FieldValue::Float),
        // absent or literally "false" is false; any other present value is true
        ScalarType::Bool => Some(FieldValue::Bool(matches!(raw, Some(s) if s != "false"))),
    }
}

/// Extracts header-located response fields into the model.
pub fn unmarshal_headers(
    model: &mut ResultModel,
    fields: &'static [FieldSpec],
    headers: &HeaderMap,
    scheme: SignatureScheme,
) {
    for spec in fields {
        if spec.location != WireLocation::Header {
            continue;
        }
        match spec.schema {
            FieldSchema::Map => {
                let prefix = format!("{}{}", scheme.header_prefix(), spec.wire_name);
                let mut map = HashMap::new();
                for (name, value) in headers.iter() {
                    let name = name.as_str();
                    if !name.to_lowercase().starts_with(&prefix) {
                        continue;
                    }
                    let Ok(value) = value.to_str() else { continue };
                    let key = &name[prefix.len()..];
                    let key = urldecode(key).map_or_else(|_| key.to_string(), |v| v.to_string());
                    let value =
                        urldecode(value).map_or_else(|_| value.to_string(), |v| v.to_string());
                    map.insert(key, value);
                }
                if !map.is_empty() {
                    model.set(spec.name, FieldValue::Map(map));
                }
            }
            FieldSchema::Scalar(ty) => {
                let name = if spec.scheme_prefixed {
                    format!("{}{}", scheme.header_prefix(), spec.wire_name)
                } else {
                    spec.wire_name.to_string()
                };
                let raw = header_str(headers, &name);
                // headers only materialize when present, except booleans
                if raw.is_none() && !matches!(ty, ScalarType::Bool) {
                    continue;
                }
                if let Some(v) = coerce_scalar(ty, raw) {
                    model.set(spec.name, v);
                }
            }
            _ => {}
        }
    }
}

fn extract_xml_scalar(element: &Element, wire_name: &str, ty: ScalarType) -> Option<FieldValue> {
    let raw = element
        .get_child(wire_name)
        .map(|c| c.get_text().unwrap_or_default().to_string());
    match ty {
        // string absent -> empty string, numeric absent -> unset
        ScalarType::String | ScalarType::Bool => coerce_scalar(ty, raw.as_deref()),
        _ => raw.as_deref().and_then(|s| coerce_scalar(ty, Some(s))),
    }
}

fn extract_object(element: &Element, fields: &'static [FieldSpec]) -> FieldValue {
    let mut out: Vec<(String, FieldValue)> = Vec::new();
    for spec in fields {
        if let Some(v) = extract_xml_field(element, spec) {
            out.push((spec.name.to_string(), v));
        }
    }
    FieldValue::Object(out)
}

fn extract_items(element: &Element, wire_name: &str, items: &FieldSchema) -> Vec<FieldValue> {
    let mut out = Vec::new();
    for child in element.children.iter().filter_map(|c| c.as_element()) {
        if child.name != wire_name {
            continue;
        }
        match items {
            FieldSchema::Object(fields) => out.push(extract_object(child, fields)),
            FieldSchema::Scalar(ty) => {
                let raw = child.get_text().map(|t| t.to_string());
                if let Some(v) = coerce_scalar(*ty, raw.as_deref()) {
                    out.push(v);
                }
            }
            _ => {}
        }
    }
    out
}

fn extract_xml_field(element: &Element, spec: &FieldSpec) -> Option<FieldValue> {
    match &spec.schema {
        FieldSchema::Scalar(ty) => extract_xml_scalar(element, spec.wire_name, *ty),
        FieldSchema::Object(fields) => element
            .get_child(spec.wire_name)
            .map(|child| extract_object(child, fields)),
        FieldSchema::Array {
            items,
            wrapper,
            flattened,
        } => {
            let scope: &Element = if *flattened {
                element
            } else {
                match wrapper.and_then(|w| element.get_child(w)) {
                    Some(e) => e,
                    None => return Some(FieldValue::List(Vec::new())),
                }
            };
            Some(FieldValue::List(extract_items(scope, spec.wire_name, items)))
        }
        _ => None,
    }
}

/// Extracts XML-located response fields from the parsed document root.
pub fn unmarshal_xml(model: &mut ResultModel, fields: &'static [FieldSpec], root: &Element) {
    for spec in fields {
        if spec.location != WireLocation::Xml {
            continue;
        }
        if let Some(v) = extract_xml_field(root, spec) {
            model.set(spec.name, v);
        }
    }
}

fn json_to_field(value: &serde_json::Value) -> Option<FieldValue> {
    match value {
        serde_json::Value::String(s) => Some(FieldValue::Str(s.clone())),
        serde_json::Value::Bool(b) => Some(FieldValue::Bool(*b)),
        serde_json::Value::Number(n) => n
            .as_i64()
            .map(FieldValue::Int)
            .or_else(|| n.as_f64().map(FieldValue::Float)),
        serde_json::Value::Array(items) => Some(FieldValue::List(
            items.iter().filter_map(json_to_field).collect(),
        )),
        serde_json::Value::Object(map) => Some(FieldValue::Object(
            map.iter()
                .filter_map(|(k, v)| json_to_field(v).map(|v| (k.clone(), v)))
                .collect(),
        )),
        serde_json::Value::Null => None,
    }
}

/// Extracts JSON-located response fields. The body is parsed once; absent
/// fields are left unset.
pub fn unmarshal_json(model: &mut ResultModel, fields: &'static [FieldSpec], body: &[u8]) {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
        return;
    };
    for spec in fields {
        if spec.location != WireLocation::Json {
            continue;
        }
        if let Some(v) = value.get(spec.wire_name).and_then(json_to_field) {
            model.set(spec.name, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obs::operations::{GET_BUCKET_TAGGING, GET_OBJECT, LIST_OBJECTS};

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn common_fields_always_present() {
        let mut model = ResultModel::new();
        let mut headers = HeaderMap::new();
        headers.insert("x-obs-request-id", "req-1".parse().unwrap());
        headers.insert("x-obs-version-id", "v1".parse().unwrap());
        populate_common_fields(&mut model, 200, "OK", &headers, SignatureScheme::Obs);
        assert_eq!(model.http_status_code(), 200);
        assert_eq!(model.reason(), Some("OK"));
        assert_eq!(model.get_str("RequestId"), Some("req-1"));
        assert_eq!(model.get_str("VersionId"), Some("v1"));
        assert_eq!(model.get_str("HostId"), None);
    }

    #[test]
    fn amz_scheme_reads_amz_headers() {
        let mut model = ResultModel::new();
        let mut headers = HeaderMap::new();
        headers.insert("x-amz-request-id", "req-2".parse().unwrap());
        // headers of the other scheme are ignored
        headers.insert("x-obs-request-id", "req-wrong".parse().unwrap());
        populate_common_fields(&mut model, 200, "OK", &headers, SignatureScheme::V4);
        assert_eq!(model.get_str("RequestId"), Some("req-2"));
    }

    #[test]
    fn metadata_prefix_scan_decodes_entries() {
        let mut model = ResultModel::new();
        let mut headers = HeaderMap::new();
        headers.insert("x-obs-meta-author", "a%20b".parse().unwrap());
        headers.insert("X-Obs-Meta-Topic", "r%26d".parse().unwrap());
        headers.insert("content-type", "text/plain".parse().unwrap());
        unmarshal_headers(
            &mut model,
            GET_OBJECT.response_fields,
            &headers,
            SignatureScheme::Obs,
        );
        let map = model.get("Metadata").unwrap().as_map().unwrap();
        assert_eq!(map.get("author").map(String::as_str), Some("a b"));
        assert_eq!(map.get("topic").map(String::as_str), Some("r&d"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn header_int_coercion() {
        let mut model = ResultModel::new();
        let mut headers = HeaderMap::new();
        headers.insert("Content-Length", "1234".parse().unwrap());
        headers.insert("ETag", "\"abc\"".parse().unwrap());
        unmarshal_headers(
            &mut model,
            GET_OBJECT.response_fields,
            &headers,
            SignatureScheme::Obs,
        );
        assert_eq!(model.get_int("ContentLength"), Some(1234));
        assert_eq!(model.get_str("ETag"), Some("\"abc\""));
        // absent string headers stay unset
        assert!(model.get("ContentType").is_none());
    }

    #[test]
    fn list_objects_xml() {
        let xml = r#"
            <ListBucketResult>
              <Name>bucket</Name>
              <MaxKeys>1000</MaxKeys>
              <IsTruncated>false</IsTruncated>
              <Contents>
                <Key>a.txt</Key>
                <Size>12</Size>
                <ETag>"e1"</ETag>
                <Owner><ID>owner-1</ID><DisplayName>alice</DisplayName></Owner>
              </Contents>
              <Contents>
                <Key>b.txt</Key>
                <Size>34</Size>
                <ETag>"e2"</ETag>
              </Contents>
              <CommonPrefixes><Prefix>photos/</Prefix></CommonPrefixes>
            </ListBucketResult>"#;
        let mut model = ResultModel::new();
        unmarshal_xml(&mut model, LIST_OBJECTS.response_fields, &parse(xml));

        assert_eq!(model.get_str("Name"), Some("bucket"));
        assert_eq!(model.get_int("MaxKeys"), Some(1000));
        assert_eq!(model.get_bool("IsTruncated"), Some(false));

        let contents = model.get("Contents").unwrap().as_list().unwrap();
        assert_eq!(contents.len(), 2);
        let FieldValue::Object(first) = &contents[0] else {
            panic!("expected object");
        };
        let get = |name: &str| {
            first
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone())
        };
        assert_eq!(get("Key"), Some(FieldValue::Str("a.txt".into())));
        assert_eq!(get("Size"), Some(FieldValue::Int(12)));
        let Some(FieldValue::Object(owner)) = get("Owner") else {
            panic!("expected owner object");
        };
        assert!(owner.contains(&("ID".to_string(), FieldValue::Str("owner-1".into()))));

        let prefixes = model.get("CommonPrefixes").unwrap().as_list().unwrap();
        assert_eq!(prefixes.len(), 1);
    }

    #[test]
    fn boolean_coercion_rule() {
        // present but not "false" is true, even for unusual literals
        let xml = "<ListBucketResult><IsTruncated>FALSE</IsTruncated></ListBucketResult>";
        let mut model = ResultModel::new();
        unmarshal_xml(&mut model, LIST_OBJECTS.response_fields, &parse(xml));
        assert_eq!(model.get_bool("IsTruncated"), Some(true));

        // absent is false
        let xml = "<ListBucketResult></ListBucketResult>";
        let mut model = ResultModel::new();
        unmarshal_xml(&mut model, LIST_OBJECTS.response_fields, &parse(xml));
        assert_eq!(model.get_bool("IsTruncated"), Some(false));
    }

    #[test]
    fn wrapper_array_extraction() {
        let xml = r#"
            <Tagging>
              <TagSet>
                <Tag><Key>env</Key><Value>prod</Value></Tag>
                <Tag><Key>team</Key><Value>storage</Value></Tag>
              </TagSet>
            </Tagging>"#;
        let mut model = ResultModel::new();
        unmarshal_xml(&mut model, GET_BUCKET_TAGGING.response_fields, &parse(xml));
        let tags = model.get("TagSet").unwrap().as_list().unwrap();
        assert_eq!(tags.len(), 2);

        // missing wrapper yields an empty list
        let mut model = ResultModel::new();
        unmarshal_xml(
            &mut model,
            GET_BUCKET_TAGGING.response_fields,
            &parse("<Tagging></Tagging>"),
        );
        assert_eq!(
            model.get("TagSet").unwrap().as_list().unwrap().len(),
            0
        );
    }
}
