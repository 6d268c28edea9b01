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

//! Static operation registry
//!
//! Operations are described declaratively; the codec walks these schemas in
//! both directions. Builders reference descriptors directly, so lookup is a
//! compile-time binding rather than string dispatch.

use crate::obs::schema::{FieldSchema, FieldSpec, OperationDescriptor, ScalarType, WireLocation};
use http::Method;

const BUCKET: FieldSpec = FieldSpec::new(
    "Bucket",
    "Bucket",
    WireLocation::Uri,
    FieldSchema::Scalar(ScalarType::String),
)
.required();

const KEY: FieldSpec = FieldSpec::new(
    "Key",
    "Key",
    WireLocation::Uri,
    FieldSchema::Scalar(ScalarType::String),
)
.required();

const VERSION_ID_QUERY: FieldSpec = FieldSpec::new(
    "VersionId",
    "versionId",
    WireLocation::Query,
    FieldSchema::Scalar(ScalarType::String),
);

const METADATA: FieldSpec = FieldSpec::new(
    "Metadata",
    "meta-",
    WireLocation::Header,
    FieldSchema::Map,
)
.scheme_prefixed();

const OWNER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "ID",
        "ID",
        WireLocation::Xml,
        FieldSchema::Scalar(ScalarType::String),
    ),
    FieldSpec::new(
        "DisplayName",
        "DisplayName",
        WireLocation::Xml,
        FieldSchema::Scalar(ScalarType::String),
    ),
];

const CONTENTS_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "Key",
        "Key",
        WireLocation::Xml,
        FieldSchema::Scalar(ScalarType::String),
    ),
    FieldSpec::new(
        "LastModified",
        "LastModified",
        WireLocation::Xml,
        FieldSchema::Scalar(ScalarType::String),
    ),
    FieldSpec::new(
        "ETag",
        "ETag",
        WireLocation::Xml,
        FieldSchema::Scalar(ScalarType::String),
    ),
    FieldSpec::new(
        "Size",
        "Size",
        WireLocation::Xml,
        FieldSchema::Scalar(ScalarType::Int),
    ),
    FieldSpec::new(
        "StorageClass",
        "StorageClass",
        WireLocation::Xml,
        FieldSchema::Scalar(ScalarType::String),
    ),
    FieldSpec::new(
        "Owner",
        "Owner",
        WireLocation::Xml,
        FieldSchema::Object(OWNER_FIELDS),
    ),
];

const COMMON_PREFIX_FIELDS: &[FieldSpec] = &[FieldSpec::new(
    "Prefix",
    "Prefix",
    WireLocation::Xml,
    FieldSchema::Scalar(ScalarType::String),
)];

const TAG_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "Key",
        "Key",
        WireLocation::Xml,
        FieldSchema::Scalar(ScalarType::String),
    ),
    FieldSpec::new(
        "Value",
        "Value",
        WireLocation::Xml,
        FieldSchema::Scalar(ScalarType::String),
    ),
];

pub static PUT_OBJECT: OperationDescriptor = OperationDescriptor {
    name: "PutObject",
    method: Method::PUT,
    subresource: None,
    stream: false,
    request_fields: &[
        BUCKET,
        KEY,
        FieldSpec::new(
            "ContentType",
            "Content-Type",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::String),
        ),
        FieldSpec::new(
            "ContentMD5",
            "Content-MD5",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::String),
        ),
        FieldSpec::new(
            "StorageClass",
            "storage-class",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::String),
        )
        .scheme_prefixed(),
        METADATA,
        FieldSpec::new("Body", "Body", WireLocation::Stream, FieldSchema::Stream),
    ],
    response_fields: &[
        FieldSpec::new(
            "ETag",
            "ETag",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::String),
        ),
        FieldSpec::new(
            "VersionId",
            "version-id",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::String),
        )
        .scheme_prefixed(),
    ],
};

pub static GET_OBJECT: OperationDescriptor = OperationDescriptor {
    name: "GetObject",
    method: Method::GET,
    subresource: None,
    stream: true,
    request_fields: &[
        BUCKET,
        KEY,
        VERSION_ID_QUERY,
        FieldSpec::new(
            "Range",
            "Range",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::String),
        ),
        FieldSpec::new(
            "IfMatch",
            "If-Match",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::String),
        ),
        FieldSpec::new(
            "IfModifiedSince",
            "If-Modified-Since",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::String),
        ),
    ],
    response_fields: &[
        FieldSpec::new(
            "ContentType",
            "Content-Type",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::String),
        ),
        FieldSpec::new(
            "ContentLength",
            "Content-Length",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::Int),
        ),
        FieldSpec::new(
            "ETag",
            "ETag",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::String),
        ),
        FieldSpec::new(
            "LastModified",
            "Last-Modified",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::String),
        ),
        METADATA,
        FieldSpec::new("Body", "Body", WireLocation::Stream, FieldSchema::Stream),
    ],
};

pub static STAT_OBJECT: OperationDescriptor = OperationDescriptor {
    name: "StatObject",
    method: Method::HEAD,
    subresource: None,
    stream: false,
    request_fields: &[BUCKET, KEY, VERSION_ID_QUERY],
    response_fields: &[
        FieldSpec::new(
            "ContentType",
            "Content-Type",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::String),
        ),
        FieldSpec::new(
            "ContentLength",
            "Content-Length",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::Int),
        ),
        FieldSpec::new(
            "ETag",
            "ETag",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::String),
        ),
        FieldSpec::new(
            "LastModified",
            "Last-Modified",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::String),
        ),
        METADATA,
    ],
};

pub static DELETE_OBJECT: OperationDescriptor = OperationDescriptor {
    name: "DeleteObject",
    method: Method::DELETE,
    subresource: None,
    stream: false,
    request_fields: &[BUCKET, KEY, VERSION_ID_QUERY],
    response_fields: &[
        FieldSpec::new(
            "DeleteMarker",
            "delete-marker",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::Bool),
        )
        .scheme_prefixed(),
        FieldSpec::new(
            "VersionId",
            "version-id",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::String),
        )
        .scheme_prefixed(),
    ],
};

pub static CREATE_BUCKET: OperationDescriptor = OperationDescriptor {
    name: "CreateBucket",
    method: Method::PUT,
    subresource: None,
    stream: false,
    request_fields: &[
        BUCKET,
        FieldSpec::new(
            "Acl",
            "acl",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::String),
        )
        .scheme_prefixed(),
        FieldSpec::new(
            "StorageClass",
            "storage-class",
            WireLocation::Header,
            FieldSchema::Scalar(ScalarType::String),
        )
        .scheme_prefixed(),
    ],
    response_fields: &[FieldSpec::new(
        "Location",
        "Location",
        WireLocation::Header,
        FieldSchema::Scalar(ScalarType::String),
    )],
};

pub static DELETE_BUCKET: OperationDescriptor = OperationDescriptor {
    name: "DeleteBucket",
    method: Method::DELETE,
    subresource: None,
    stream: false,
    request_fields: &[BUCKET],
    response_fields: &[],
};

pub static LIST_OBJECTS: OperationDescriptor = OperationDescriptor {
    name: "ListObjects",
    method: Method::GET,
    subresource: None,
    stream: false,
    request_fields: &[
        BUCKET,
        FieldSpec::new(
            "Prefix",
            "prefix",
            WireLocation::Query,
            FieldSchema::Scalar(ScalarType::String),
        ),
        FieldSpec::new(
            "Marker",
            "marker",
            WireLocation::Query,
            FieldSchema::Scalar(ScalarType::String),
        ),
        FieldSpec::new(
            "MaxKeys",
            "max-keys",
            WireLocation::Query,
            FieldSchema::Scalar(ScalarType::Int),
        ),
        FieldSpec::new(
            "Delimiter",
            "delimiter",
            WireLocation::Query,
            FieldSchema::Scalar(ScalarType::String),
        ),
    ],
    response_fields: &[
        FieldSpec::new(
            "Name",
            "Name",
            WireLocation::Xml,
            FieldSchema::Scalar(ScalarType::String),
        ),
        FieldSpec::new(
            "Prefix",
            "Prefix",
            WireLocation::Xml,
            FieldSchema::Scalar(ScalarType::String),
        ),
        FieldSpec::new(
            "Marker",
            "Marker",
            WireLocation::Xml,
            FieldSchema::Scalar(ScalarType::String),
        ),
        FieldSpec::new(
            "NextMarker",
            "NextMarker",
            WireLocation::Xml,
            FieldSchema::Scalar(ScalarType::String),
        ),
        FieldSpec::new(
            "MaxKeys",
            "MaxKeys",
            WireLocation::Xml,
            FieldSchema::Scalar(ScalarType::Int),
        ),
        FieldSpec::new(
            "Delimiter",
            "Delimiter",
            WireLocation::Xml,
            FieldSchema::Scalar(ScalarType::String),
        ),
        FieldSpec::new(
            "IsTruncated",
            "IsTruncated",
            WireLocation::Xml,
            FieldSchema::Scalar(ScalarType::Bool),
        ),
        FieldSpec::new(
            "Contents",
            "Contents",
            WireLocation::Xml,
            FieldSchema::Array {
                items: &FieldSchema::Object(CONTENTS_FIELDS),
                wrapper: None,
                flattened: true,
            },
        ),
        FieldSpec::new(
            "CommonPrefixes",
            "CommonPrefixes",
            WireLocation::Xml,
            FieldSchema::Array {
                items: &FieldSchema::Object(COMMON_PREFIX_FIELDS),
                wrapper: None,
                flattened: true,
            },
        ),
    ],
};

pub static GET_BUCKET_TAGGING: OperationDescriptor = OperationDescriptor {
    name: "GetBucketTagging",
    method: Method::GET,
    subresource: Some("tagging"),
    stream: false,
    request_fields: &[BUCKET],
    response_fields: &[FieldSpec::new(
        "TagSet",
        "Tag",
        WireLocation::Xml,
        FieldSchema::Array {
            items: &FieldSchema::Object(TAG_FIELDS),
            wrapper: Some("TagSet"),
            flattened: false,
        },
    )],
};
