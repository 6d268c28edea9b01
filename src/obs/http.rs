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

use crate::obs::error::ValidationErr;
use crate::obs::multimap::{Multimap, MultimapExt};
use crate::obs::utils::urlencode_object_key;
use http::Uri;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug)]
/// Represents HTTP URL
pub struct Url {
    pub https: bool,
    pub host: String,
    pub port: u16,
    pub path: String,
    pub query: Multimap,
}

impl Url {
    pub fn host_header_value(&self) -> String {
        if self.port > 0 {
            return format!("{}:{}", self.host, self.port);
        }
        self.host.clone()
    }
}

impl Default for Url {
    fn default() -> Self {
        Self {
            https: true,
            host: String::default(),
            port: u16::default(),
            path: String::default(),
            query: Multimap::default(),
        }
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.host.is_empty() {
            return Err(std::fmt::Error);
        }

        if self.https {
            f.write_str("https://")?;
        } else {
            f.write_str("http://")?;
        }

        if self.port > 0 {
            f.write_str(&format!("{}:{}", self.host, self.port))?;
        } else {
            f.write_str(&self.host)?;
        }

        if !self.path.starts_with('/') {
            f.write_str("/")?;
        }
        f.write_str(&self.path)?;

        if !self.query.is_empty() {
            f.write_str("?")?;
            f.write_str(&self.query.to_query_string())?;
        }

        Ok(())
    }
}

#[derive(Clone, Debug)]
/// Represents base URL of the storage endpoint
pub struct BaseUrl {
    pub https: bool,
    host: String,
    port: u16,
    pub region: String,
    pub virtual_style: bool,
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self {
            https: true,
            host: "127.0.0.1".to_string(),
            port: 9000,
            region: String::new(),
            virtual_style: false,
        }
    }
}

impl FromStr for BaseUrl {
    type Err = ValidationErr;

    /// Convert a string to a BaseUrl.
    ///
    /// Enables use of [`str::parse`] method to create a [`BaseUrl`].
    ///
    /// # Examples
    ///
    /// ```
    /// use obs_sdk::obs::http::BaseUrl;
    /// use std::str::FromStr;
    ///
    /// // Get base URL from host name
    /// let base_url = "obs.eu-west-1.example.com".parse::<BaseUrl>().unwrap();
    /// // Get base URL from host:port
    /// let base_url: BaseUrl = "storage.example.com:9000".parse().unwrap();
    /// // Get base URL from IPv4 address
    /// let base_url: BaseUrl = "http://192.168.124.63:9000".parse().unwrap();
    /// ```
    fn from_str(s: &str) -> Result<Self, ValidationErr> {
        let url = s.parse::<Uri>()?;

        let https = match url.scheme() {
            None => true,
            Some(scheme) => match scheme.as_str() {
                "http" => false,
                "https" => true,
                _ => {
                    return Err(ValidationErr::InvalidBaseUrl(
                        "scheme must be http or https".into(),
                    ));
                }
            },
        };

        let mut host = match url.host() {
            Some(h) => h,
            _ => {
                return Err(ValidationErr::InvalidBaseUrl(
                    "valid host must be provided".into(),
                ));
            }
        };

        let ipv6host = "[".to_string() + host + "]";
        if host.parse::<std::net::Ipv6Addr>().is_ok() {
            host = &ipv6host;
        }

        let mut port = match url.port() {
            Some(p) => p.as_u16(),
            _ => 0u16,
        };

        if (https && port == 443) || (!https && port == 80) {
            port = 0u16;
        }

        if url.path() != "/" && !url.path().is_empty() {
            return Err(ValidationErr::InvalidBaseUrl(
                "path must be empty for base URL".into(),
            ));
        }

        if url.query().is_some() {
            return Err(ValidationErr::InvalidBaseUrl(
                "query must be none for base URL".into(),
            ));
        }

        Ok(BaseUrl {
            https,
            host: host.to_string(),
            port,
            region: String::new(),
            virtual_style: false,
        })
    }
}

impl BaseUrl {
    /// Resolves a redirect `Location` value against this base URL. An absolute
    /// location replaces host and scheme; a scheme-relative or host-only value
    /// keeps the original scheme.
    pub fn resolve_location(&self, location: &str) -> Result<BaseUrl, ValidationErr> {
        let trimmed = location.trim();
        if trimmed.is_empty() {
            return Err(ValidationErr::InvalidBaseUrl(
                "empty Location header".into(),
            ));
        }

        let candidate = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            let scheme = if self.https { "https" } else { "http" };
            format!("{}://{}", scheme, trimmed.trim_start_matches("//"))
        };

        let url = candidate.parse::<Uri>()?;
        let host = url
            .host()
            .ok_or_else(|| ValidationErr::InvalidBaseUrl("Location has no host".into()))?;

        let https = match url.scheme() {
            Some(s) => s.as_str() == "https",
            None => self.https,
        };
        let mut port = url.port().map_or(0u16, |p| p.as_u16());
        if (https && port == 443) || (!https && port == 80) {
            port = 0u16;
        }

        Ok(BaseUrl {
            https,
            host: host.to_string(),
            port,
            region: self.region.clone(),
            virtual_style: self.virtual_style,
        })
    }

    /// Builds the request URL for given bucket and object
    pub fn build_url(
        &self,
        query: &Multimap,
        bucket_name: Option<&str>,
        object_name: Option<&str>,
    ) -> Result<Url, ValidationErr> {
        let mut url = Url {
            https: self.https,
            host: self.host.clone(),
            port: self.port,
            path: String::from("/"),
            query: query.clone(),
        };

        let bucket: &str = match bucket_name {
            None => return Ok(url),
            Some(v) => v,
        };

        if object_name.is_none() && bucket.is_empty() {
            return Err(ValidationErr::UrlBuildError(
                "empty bucket name provided".into(),
            ));
        }

        // A bucket name containing '.' breaks TLS certificate validation when
        // used as a subdomain, so fall back to path style.
        let enforce_path_style = bucket.contains('.') && self.https;

        let mut host = self.host.clone();
        let mut path = String::new();

        if enforce_path_style || !self.virtual_style {
            path.push('/');
            path.push_str(bucket);
        } else {
            host = format!("{}.{}", bucket, self.host);
        }

        if let Some(v) = object_name {
            if !v.starts_with('/') {
                path.push('/');
            }
            path.push_str(&urlencode_object_key(v));
        }

        url.host = host;
        url.path = path;

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_parsing() {
        let b: BaseUrl = "https://obs.example.com".parse().unwrap();
        assert!(b.https);
        assert_eq!(b.port, 0);

        let b: BaseUrl = "http://192.168.1.1:9000".parse().unwrap();
        assert!(!b.https);
        assert_eq!(b.port, 9000);

        // default ports are elided
        let b: BaseUrl = "https://obs.example.com:443".parse().unwrap();
        assert_eq!(b.port, 0);

        assert!("https://obs.example.com/path".parse::<BaseUrl>().is_err());
        assert!("https://obs.example.com?x=1".parse::<BaseUrl>().is_err());
        assert!("ftp://obs.example.com".parse::<BaseUrl>().is_err());
    }

    #[test]
    fn path_style_url() {
        let b: BaseUrl = "https://obs.example.com".parse().unwrap();
        let url = b
            .build_url(&Multimap::new(), Some("bucket"), Some("a b.txt"))
            .unwrap();
        assert_eq!(url.to_string(), "https://obs.example.com/bucket/a%20b.txt");
    }

    #[test]
    fn virtual_style_url() {
        let mut b: BaseUrl = "https://obs.example.com".parse().unwrap();
        b.virtual_style = true;
        let url = b
            .build_url(&Multimap::new(), Some("bucket"), Some("key"))
            .unwrap();
        assert_eq!(url.to_string(), "https://bucket.obs.example.com/key");

        // dotted bucket forces path style under https
        let url = b
            .build_url(&Multimap::new(), Some("my.bucket"), Some("key"))
            .unwrap();
        assert_eq!(url.to_string(), "https://obs.example.com/my.bucket/key");
    }

    #[test]
    fn location_resolution() {
        let b: BaseUrl = "https://obs.example.com".parse().unwrap();

        let r = b.resolve_location("http://other.example.com:8080").unwrap();
        assert!(!r.https);
        assert_eq!(r.port, 8080);

        // host-only location keeps the original scheme
        let r = b.resolve_location("other.example.com").unwrap();
        assert!(r.https);

        assert!(b.resolve_location("").is_err());
    }
}
