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

//! Response body handling with a declared-length bound

use crate::obs::error::Error;
use crate::obs::transport::{ByteStream, ResponseBody};
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Chunk size used when draining a body into a file.
const CHUNK_SIZE: usize = 65536;

/// Response body reader that knows its declared length. It is consumed
/// exactly once: into memory, into a file, or chunk by chunk by the caller.
pub struct BoundedBodyStream {
    inner: ByteStream,
    expected: Option<u64>,
    read: u64,
}

impl std::fmt::Debug for BoundedBodyStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedBodyStream")
            .field("expected", &self.expected)
            .field("read", &self.read)
            .finish()
    }
}

impl BoundedBodyStream {
    pub fn new(body: ResponseBody, expected: Option<u64>) -> Self {
        let inner: ByteStream = match body {
            ResponseBody::Buffered(bytes) => Box::pin(futures_util::stream::iter(
                if bytes.is_empty() {
                    Vec::new()
                } else {
                    vec![Ok(bytes)]
                },
            )),
            ResponseBody::Stream(s) => s,
        };
        Self {
            inner,
            expected,
            read: 0,
        }
    }

    /// Declared content length, if the server sent one.
    pub fn expected(&self) -> Option<u64> {
        self.expected
    }

    /// Bytes read so far.
    pub fn bytes_read(&self) -> u64 {
        self.read
    }

    /// Reads the next chunk from the body.
    pub async fn next_chunk(&mut self) -> Option<Result<Bytes, Error>> {
        match self.inner.next().await {
            Some(Ok(bytes)) => {
                self.read += bytes.len() as u64;
                Some(Ok(bytes))
            }
            Some(Err(e)) => Some(Err(e.into())),
            None => None,
        }
    }

    /// Drains the whole body into memory, verifying the declared length.
    pub async fn read_all(mut self) -> Result<Bytes, Error> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.next_chunk().await {
            buf.extend_from_slice(&chunk?);
        }
        if let Some(expected) = self.expected {
            if self.read != expected {
                return Err(Error::IncompleteBody {
                    expected,
                    got: self.read,
                });
            }
        }
        Ok(buf.freeze())
    }

    /// Writes the body to a file in fixed-size chunks, returning the number of
    /// bytes written. The content is first written to a temporary file in the
    /// same directory and then renamed into place. Parent directories are
    /// created as needed; an open failure is reported before any write.
    pub async fn save_to_file(mut self, file_path: &Path) -> Result<u64, Error> {
        if file_path.is_dir() {
            return Err(Error::Io(std::io::Error::other("path is a directory")));
        }
        let parent_dir = file_path.parent().ok_or(Error::Io(std::io::Error::other(
            format!("path {file_path:?} does not have a parent directory"),
        )))?;
        if !parent_dir.as_os_str().is_empty() && !parent_dir.is_dir() {
            fs::create_dir_all(parent_dir).await?;
        }
        let file_name = file_path.file_name().ok_or(Error::Io(
            std::io::Error::other("could not get filename-component of path"),
        ))?;
        let mut tmp_file_name = file_name.to_os_string();
        tmp_file_name.push(format!("_{}", Uuid::new_v4().to_string().replace('-', "_")));
        let tmp_file_path = parent_dir.join(tmp_file_name);

        let mut fp = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_file_path)
            .await?;

        let mut total: u64 = 0;
        let mut pending = BytesMut::new();
        while let Some(chunk) = self.next_chunk().await {
            pending.extend_from_slice(&chunk?);
            while pending.len() >= CHUNK_SIZE {
                let out = pending.split_to(CHUNK_SIZE);
                fp.write_all(&out).await?;
                total += out.len() as u64;
            }
        }
        if !pending.is_empty() {
            total += pending.len() as u64;
            fp.write_all(&pending).await?;
        }
        fp.flush().await?;
        drop(fp);

        if let Some(expected) = self.expected {
            if total != expected {
                let _ = fs::remove_file(&tmp_file_path).await;
                return Err(Error::IncompleteBody {
                    expected,
                    got: total,
                });
            }
        }

        fs::rename(&tmp_file_path, file_path).await?;
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream_of(chunks: Vec<&'static [u8]>) -> BoundedBodyStream {
        let total: u64 = chunks.iter().map(|c| c.len() as u64).sum();
        let items: Vec<_> = chunks
            .into_iter()
            .map(|c| Ok(Bytes::from_static(c)))
            .collect();
        BoundedBodyStream::new(
            ResponseBody::Stream(Box::pin(futures_util::stream::iter(items))),
            Some(total),
        )
    }

    #[tokio::test]
    async fn read_all_concatenates_chunks() {
        let body = stream_of(vec![b"hello ", b"world"]);
        let bytes = body.read_all().await.unwrap();
        assert_eq!(&bytes[..], b"hello world");
    }

    #[tokio::test]
    async fn read_all_detects_short_body() {
        let body = BoundedBodyStream::new(
            ResponseBody::Buffered(Bytes::from_static(b"abc")),
            Some(10),
        );
        match body.read_all().await {
            Err(Error::IncompleteBody { expected, got }) => {
                assert_eq!(expected, 10);
                assert_eq!(got, 3);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn save_to_file_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("obs-sdk-test-{}", Uuid::new_v4()));
        let path = dir.join("nested").join("object.bin");
        let body = stream_of(vec![b"stored ", b"content"]);
        let written = body.save_to_file(&path).await.unwrap();
        assert_eq!(written, 14);
        let content = std::fs::read(&path).unwrap();
        assert_eq!(content, b"stored content");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
