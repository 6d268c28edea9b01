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

//! Declarative operation schema consumed by the codec
//!
//! Each operation is described by a static [`OperationDescriptor`] mapping
//! logical field names onto wire locations. The marshaler and unmarshaler walk
//! the same schema tree in opposite directions.

use crate::obs::body::BoundedBodyStream;
use bytes::Bytes;
use http::Method;
use std::collections::HashMap;

/// Name of the result field carrying the HTTP status code. Always present.
pub const HTTP_STATUS_CODE: &str = "HttpStatusCode";
/// Name of the result field carrying the HTTP reason phrase. Always present.
pub const REASON: &str = "Reason";

/// Where a field lives on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireLocation {
    /// HTTP request or response header.
    Header,
    /// URL query parameter.
    Query,
    /// Bucket or object component of the request URI.
    Uri,
    /// Element of an XML body.
    Xml,
    /// Member of a JSON body.
    Json,
    /// The raw body stream itself.
    Stream,
}

/// Scalar leaf types the codec coerces to and from wire strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarType {
    String,
    Int,
    Float,
    Bool,
}

/// The schema of one field value.
#[derive(Clone, Copy, Debug)]
pub enum FieldSchema {
    Scalar(ScalarType),
    /// A string-to-string map. On the header location this expands to one
    /// physical header per entry, prefixed with the field's wire name.
    Map,
    /// A nested field set (XML child elements).
    Object(&'static [FieldSpec]),
    /// A repeated element. `wrapper` names an enclosing element spliced into
    /// the path; `flattened` arrays repeat as direct siblings instead.
    Array {
        items: &'static FieldSchema,
        wrapper: Option<&'static str>,
        flattened: bool,
    },
    /// The response body as a stream.
    Stream,
}

/// One field of an operation schema.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub wire_name: &'static str,
    pub location: WireLocation,
    pub schema: FieldSchema,
    pub required: bool,
    /// When set, the effective wire name is the signature scheme's header
    /// prefix followed by `wire_name` (e.g. `x-obs-` + `storage-class`).
    pub scheme_prefixed: bool,
}

impl FieldSpec {
    /// Shorthand for a plain optional field.
    pub const fn new(
        name: &'static str,
        wire_name: &'static str,
        location: WireLocation,
        schema: FieldSchema,
    ) -> Self {
        Self {
            name,
            wire_name,
            location,
            schema,
            required: false,
            scheme_prefixed: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn scheme_prefixed(mut self) -> Self {
        self.scheme_prefixed = true;
        self
    }
}

/// Static description of one API operation.
#[derive(Debug)]
pub struct OperationDescriptor {
    pub name: &'static str,
    pub method: Method,
    /// Subresource appended to the query string with no value (e.g. `tagging`).
    pub subresource: Option<&'static str>,
    /// Whether the response body is handed to the caller as a stream.
    pub stream: bool,
    pub request_fields: &'static [FieldSpec],
    pub response_fields: &'static [FieldSpec],
}

/// A typed field value flowing through the codec.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Map(HashMap<String, String>),
    List(Vec<FieldValue>),
    Object(Vec<(String, FieldValue)>),
    Bytes(Bytes),
}

impl FieldValue {
    /// Coerces the value to its wire string form. Booleans render as
    /// `true`/`false`; numbers use locale-independent formatting.
    pub fn to_wire_string(&self) -> Option<String> {
        match self {
            FieldValue::Str(s) => Some(s.clone()),
            FieldValue::Int(i) => Some(i.to_string()),
            FieldValue::Float(v) => Some(v.to_string()),
            FieldValue::Bool(b) => Some(if *b { "true" } else { "false" }.to_string()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, String>> {
        match self {
            FieldValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(v) => Some(v),
            _ => None,
        }
    }
}

/// Caller-supplied parameters for one operation call.
#[derive(Clone, Debug, Default)]
pub struct Params {
    values: HashMap<String, FieldValue>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<K: Into<String>>(&mut self, name: K, value: FieldValue) {
        self.values.insert(name.into(), value);
    }

    pub fn set_str<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        self.set(name, FieldValue::Str(value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

/// Result of one operation call: an insertion-ordered field list plus the
/// optional body stream. Created fresh per call and owned by that call.
#[derive(Debug, Default)]
pub struct ResultModel {
    fields: Vec<(String, FieldValue)>,
    stream: Option<BoundedBodyStream>,
}

impl ResultModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing an existing value while keeping its position.
    pub fn set<K: Into<String>>(&mut self, name: K, value: FieldValue) {
        let name = name.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_int)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_bool)
    }

    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    pub fn set_stream(&mut self, stream: BoundedBodyStream) {
        self.stream = Some(stream);
    }

    /// Takes the body stream out of the model. The stream is consumed at most
    /// once; a second call returns `None`.
    pub fn take_stream(&mut self) -> Option<BoundedBodyStream> {
        self.stream.take()
    }

    /// HTTP status code of the exchange, `-1` when no response was received.
    pub fn http_status_code(&self) -> i64 {
        self.get_int(HTTP_STATUS_CODE).unwrap_or(-1)
    }

    pub fn reason(&self) -> Option<&str> {
        self.get_str(REASON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_string_coercion() {
        assert_eq!(FieldValue::Bool(true).to_wire_string().unwrap(), "true");
        assert_eq!(FieldValue::Bool(false).to_wire_string().unwrap(), "false");
        assert_eq!(FieldValue::Int(-7).to_wire_string().unwrap(), "-7");
        assert_eq!(
            FieldValue::Str("x".into()).to_wire_string().unwrap(),
            "x"
        );
        assert!(FieldValue::Map(HashMap::new()).to_wire_string().is_none());
    }

    #[test]
    fn result_model_keeps_insertion_order() {
        let mut model = ResultModel::new();
        model.set("B", FieldValue::Int(2));
        model.set("A", FieldValue::Int(1));
        model.set("B", FieldValue::Int(3));
        let names: Vec<&str> = model.fields().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(model.get_int("B"), Some(3));
    }
}
