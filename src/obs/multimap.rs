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

use crate::obs::utils::urlencode;
use lazy_static::lazy_static;
use multimap::MultiMap;
use regex::Regex;
use std::collections::BTreeMap;
pub use urlencoding::decode as urldecode;

/// Multimap for string key and string value
pub type Multimap = MultiMap<String, String>;

fn is_signature_param(key: &str) -> bool {
    key == "Signature" || key == "X-Amz-Signature"
}

pub trait MultimapExt {
    /// Adds a key-value pair to the multimap
    fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V);

    /// Adds a multimap to the current multimap
    fn add_multimap(&mut self, other: Multimap);

    /// Converts multimap to HTTP query string
    fn to_query_string(&self) -> String;

    /// Converts multimap to canonical query string
    fn get_canonical_query_string(&self) -> String;

    /// Converts multimap to signed headers and canonical headers
    fn get_canonical_headers(&self) -> (String, String);

    /// Returns lower-cased headers matching the given prefix, sorted by name.
    /// Values of repeated headers are joined with a comma.
    fn get_prefixed_headers(&self, prefix: &str) -> Vec<(String, String)>;
}

impl MultimapExt for Multimap {
    fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.insert(key.into(), value.into());
    }

    fn add_multimap(&mut self, other: Multimap) {
        for (key, values) in other.into_iter() {
            for value in values {
                self.insert(key.clone(), value);
            }
        }
    }

    fn to_query_string(&self) -> String {
        // Sorted for a deterministic serialization; signature parameters go
        // last so pre-signed URLs end with the signature.
        let mut keys: Vec<&String> = self.keys().collect();
        keys.sort_by(|a, b| {
            let a_sig = is_signature_param(a);
            let b_sig = is_signature_param(b);
            a_sig.cmp(&b_sig).then_with(|| a.cmp(b))
        });

        let mut query = String::new();
        for key in keys {
            if let Some(values) = self.get_vec(key.as_str()) {
                for value in values {
                    if !query.is_empty() {
                        query.push('&');
                    }
                    query.push_str(&urlencode(key));
                    query.push('=');
                    query.push_str(&urlencode(value));
                }
            }
        }
        query
    }

    fn get_canonical_query_string(&self) -> String {
        let mut keys: Vec<String> = Vec::new();
        for (key, _) in self.iter() {
            keys.push(key.to_string());
        }
        keys.sort();

        let mut query = String::new();
        for key in keys {
            if let Some(values) = self.get_vec(key.as_str()) {
                for value in values {
                    if !query.is_empty() {
                        query.push('&');
                    }
                    query.push_str(&urlencode(key.as_str()));
                    query.push('=');
                    query.push_str(&urlencode(value));
                }
            }
        }

        query
    }

    fn get_canonical_headers(&self) -> (String, String) {
        lazy_static! {
            static ref MULTI_SPACE_REGEX: Regex = Regex::new("( +)").unwrap();
        }
        let mut btmap: BTreeMap<String, String> = BTreeMap::new();

        for (k, values) in self.iter_all() {
            let key = k.to_lowercase();
            if "authorization" == key || "user-agent" == key {
                continue;
            }

            let mut vs = values.clone();
            vs.sort();

            let mut value = String::new();
            for v in vs {
                if !value.is_empty() {
                    value.push(',');
                }
                let s: String = MULTI_SPACE_REGEX.replace_all(&v, " ").trim().to_string();
                value.push_str(&s);
            }
            btmap.insert(key.clone(), value.clone());
        }

        let mut signed_headers = String::new();
        let mut canonical_headers = String::new();
        let mut add_delim = false;
        for (key, value) in &btmap {
            if add_delim {
                signed_headers.push(';');
                canonical_headers.push('\n');
            }

            signed_headers.push_str(key);

            canonical_headers.push_str(key);
            canonical_headers.push(':');
            canonical_headers.push_str(value);

            add_delim = true;
        }

        (signed_headers, canonical_headers)
    }

    fn get_prefixed_headers(&self, prefix: &str) -> Vec<(String, String)> {
        let mut btmap: BTreeMap<String, String> = BTreeMap::new();
        for (k, values) in self.iter_all() {
            let key = k.to_lowercase();
            if !key.starts_with(prefix) {
                continue;
            }
            let mut value = String::new();
            for v in values {
                if !value.is_empty() {
                    value.push(',');
                }
                value.push_str(v.trim());
            }
            btmap.insert(key, value);
        }
        btmap.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_is_sorted_with_signature_last() {
        let mut m = Multimap::new();
        m.add("Signature", "sig==");
        m.add("Expires", "1660582212");
        m.add("AccessKeyId", "access");
        assert_eq!(
            m.to_query_string(),
            "AccessKeyId=access&Expires=1660582212&Signature=sig%3D%3D"
        );
    }

    #[test]
    fn v4_signature_param_is_serialized_last() {
        let mut m = Multimap::new();
        m.add("X-Amz-Signature", "abc");
        m.add("X-Amz-Credential", "cred");
        m.add("X-Amz-Date", "20220815T165012Z");
        assert!(m.to_query_string().ends_with("&X-Amz-Signature=abc"));
    }

    #[test]
    fn canonical_query_string_sorts_by_key() {
        let mut m = Multimap::new();
        m.add("prefix", "photos/");
        m.add("delimiter", "/");
        m.add("max-keys", "100");
        assert_eq!(
            m.get_canonical_query_string(),
            "delimiter=%2F&max-keys=100&prefix=photos%2F"
        );
    }

    #[test]
    fn canonical_headers_skip_authorization_and_user_agent() {
        let mut m = Multimap::new();
        m.add("Host", "example.com");
        m.add("Authorization", "secret");
        m.add("User-Agent", "test");
        m.add("X-Obs-Date", "20220815T165012Z");
        let (signed, canonical) = m.get_canonical_headers();
        assert_eq!(signed, "host;x-obs-date");
        assert_eq!(canonical, "host:example.com\nx-obs-date:20220815T165012Z");
    }

    #[test]
    fn prefixed_headers_sorted_and_lowercased() {
        let mut m = Multimap::new();
        m.add("x-obs-meta-Zebra", "z");
        m.add("X-Obs-Meta-alpha", "a");
        m.add("Content-Type", "text/plain");
        let headers = m.get_prefixed_headers("x-obs-");
        assert_eq!(
            headers,
            vec![
                ("x-obs-meta-alpha".to_string(), "a".to_string()),
                ("x-obs-meta-zebra".to_string(), "z".to_string()),
            ]
        );
    }

    quickcheck! {
        fn canonical_headers_order_independent(pairs: Vec<(String, String)>) -> bool {
            let mut forward = Multimap::new();
            for (k, v) in pairs.iter() {
                if k.is_empty() {
                    continue;
                }
                forward.add(k.clone(), v.clone());
            }
            let mut reverse = Multimap::new();
            for (k, v) in pairs.iter().rev() {
                if k.is_empty() {
                    continue;
                }
                reverse.add(k.clone(), v.clone());
            }
            forward.get_canonical_headers() == reverse.get_canonical_headers()
        }
    }
}
