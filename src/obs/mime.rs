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

//! Content-type inference for uploads

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Fallback content type when the extension is unknown.
pub const DEFAULT_CONTENT_TYPE: &str = "binary/octet-stream";

/// Collaborator that maps a file name to a content type.
pub trait MimeLookup: std::fmt::Debug + Send + Sync {
    fn lookup(&self, filename: &str) -> Option<&'static str>;
}

static EXTENSION_TABLE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("7z", "application/x-7z-compressed"),
        ("avi", "video/x-msvideo"),
        ("bmp", "image/bmp"),
        ("bz2", "application/x-bzip2"),
        ("css", "text/css"),
        ("csv", "text/csv"),
        ("doc", "application/msword"),
        ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        ("gif", "image/gif"),
        ("gz", "application/gzip"),
        ("htm", "text/html"),
        ("html", "text/html"),
        ("ico", "image/x-icon"),
        ("jpeg", "image/jpeg"),
        ("jpg", "image/jpeg"),
        ("js", "application/javascript"),
        ("json", "application/json"),
        ("md", "text/markdown"),
        ("mov", "video/quicktime"),
        ("mp3", "audio/mpeg"),
        ("mp4", "video/mp4"),
        ("mpeg", "video/mpeg"),
        ("ogg", "audio/ogg"),
        ("pdf", "application/pdf"),
        ("png", "image/png"),
        ("ppt", "application/vnd.ms-powerpoint"),
        ("pptx", "application/vnd.openxmlformats-officedocument.presentationml.presentation"),
        ("rar", "application/x-rar-compressed"),
        ("svg", "image/svg+xml"),
        ("tar", "application/x-tar"),
        ("tif", "image/tiff"),
        ("tiff", "image/tiff"),
        ("txt", "text/plain"),
        ("wav", "audio/x-wav"),
        ("webm", "video/webm"),
        ("webp", "image/webp"),
        ("xls", "application/vnd.ms-excel"),
        ("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        ("xml", "application/xml"),
        ("zip", "application/zip"),
    ])
});

/// Default lookup backed by a static extension table.
#[derive(Clone, Debug, Default)]
pub struct ExtensionMimeLookup;

impl MimeLookup for ExtensionMimeLookup {
    fn lookup(&self, filename: &str) -> Option<&'static str> {
        let ext = filename.rsplit_once('.')?.1.to_lowercase();
        EXTENSION_TABLE.get(ext.as_str()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_extension() {
        let m = ExtensionMimeLookup;
        assert_eq!(m.lookup("photo.JPG"), Some("image/jpeg"));
        assert_eq!(m.lookup("nested/path/data.json"), Some("application/json"));
        assert_eq!(m.lookup("noextension"), None);
        assert_eq!(m.lookup("weird.xyz"), None);
    }
}
