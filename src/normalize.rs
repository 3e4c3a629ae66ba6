//! Union resolution: turn an arbitrary value into a [`CanonicalFile`].
//!
//! Alternatives are tried in a fixed order and the first structural match
//! wins:
//!
//! 1. **Single file**: a record with a string `type`, reinterpreted as-is.
//! 2. **File list**: a record with an `item` accessor; only the first
//!    element is kept and reinterpreted like rule 1.
//! 3. **Stream record**: `{ stream, name, type }`; the stream is drained
//!    into memory in emission order.
//!
//! Anything else fails with [`FileError::ShapeMismatch`]. Only rule 3
//! suspends; rules 1 and 2 complete without awaiting.

use bytes::{Bytes, BytesMut};
use chrono::Utc;
use futures::StreamExt;

use crate::config::NormalizeOptions;
use crate::detection::sniff_content_type;
use crate::error::{FileError, Result};
use crate::file::CanonicalFile;
use crate::shape::{first_list_item, is_single_file_like, is_stream_record, StreamRecord};
use crate::source::FileSource;
use crate::value::{ByteStream, Value};

/// Normalizes file-like values. Holds no per-call state, so one instance
/// can serve concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct FileNormalizer {
    options: NormalizeOptions,
}

impl FileNormalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize `value` into a canonical file.
    ///
    /// Errors raised by a stream while it is drained are returned as-is,
    /// never converted to [`FileError::ShapeMismatch`].
    pub async fn normalize(&self, value: Value) -> Result<CanonicalFile> {
        let stream_shaped = is_stream_record(&value);

        if is_single_file_like(&value) && !stream_shaped {
            tracing::debug!("Value matched the single-file shape");
            return self.reinterpret(value, FileSource::SingleFile);
        }

        if let Some(first) = first_list_item(&value) {
            tracing::debug!("Value matched the file-list shape, keeping the first item");
            return self.reinterpret(first, FileSource::FileList);
        }

        if stream_shaped {
            tracing::debug!("Value matched the stream-record shape");
            let record = StreamRecord::from_value(value)?;
            return self.drain(record).await;
        }

        tracing::debug!("Value matched no file shape");
        Err(FileError::ShapeMismatch)
    }

    fn reinterpret(&self, value: Value, source: FileSource) -> Result<CanonicalFile> {
        let Value::Record(record) = value else {
            return Err(FileError::ShapeMismatch);
        };
        let file = self.finish(CanonicalFile::from_record(record, source));
        tracing::info!(?file, "Canonical file created from {}", source);
        Ok(file)
    }

    async fn drain(&self, record: StreamRecord) -> Result<CanonicalFile> {
        let StreamRecord {
            stream,
            name,
            content_type,
        } = record;

        let data = read_all(stream, self.options.max_bytes).await?;
        let file = self.finish(CanonicalFile::new(
            FileSource::Stream,
            data,
            name,
            content_type,
            Utc::now(),
        ));
        tracing::info!(?file, "Canonical file created from stream");
        Ok(file)
    }

    fn finish(&self, mut file: CanonicalFile) -> CanonicalFile {
        if self.options.sniff_content_type && file.content_type().is_empty() {
            let name = Some(file.name()).filter(|n| !n.is_empty());
            if let Some(sniffed) = sniff_content_type(file.bytes(), name) {
                file.set_content_type(sniffed);
            }
        }
        file
    }
}

/// Normalize `value` with default options.
pub async fn normalize(value: Value) -> Result<CanonicalFile> {
    FileNormalizer::default().normalize(value).await
}

/// Drain `stream` sequentially, concatenating chunks in emission order.
async fn read_all(mut stream: ByteStream, max_bytes: Option<u64>) -> Result<Bytes> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if let Some(limit) = max_bytes {
            if (buf.len() + chunk.len()) as u64 > limit {
                tracing::warn!(limit, "Stream exceeded the configured byte limit");
                return Err(FileError::TooLarge { limit });
            }
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}
