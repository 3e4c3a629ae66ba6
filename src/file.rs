//! The canonical file produced by normalization.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::detection::{extension_from_filename, extension_from_mime};
use crate::shape::{BYTES_FIELD, LAST_MODIFIED_FIELD, NAME_FIELD, TYPE_FIELD};
use crate::source::FileSource;
use crate::value::{Record, Value};

/// A normalized file: payload, name and content type.
///
/// Only [`crate::FileNormalizer`] builds these. Once returned, the value is
/// owned by the caller and holds no external resources.
///
/// # Examples
///
/// ```
/// # use smooai_file_normalize::{normalize, Value};
/// # use bytes::Bytes;
/// # async fn example() -> smooai_file_normalize::error::Result<()> {
/// let value = Value::file("a.txt", "text/plain", Bytes::from("hello"));
/// let file = normalize(value).await?;
/// assert_eq!(file.read_text(), "hello");
/// assert_eq!(file.extension().as_deref(), Some("txt"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CanonicalFile {
    source: FileSource,
    bytes: Bytes,
    name: String,
    content_type: String,
    last_modified: DateTime<Utc>,
}

impl CanonicalFile {
    pub(crate) fn new(
        source: FileSource,
        bytes: Bytes,
        name: String,
        content_type: String,
        last_modified: DateTime<Utc>,
    ) -> Self {
        Self {
            source,
            bytes,
            name,
            content_type,
            last_modified,
        }
    }

    /// Reinterpret a single-file record.
    ///
    /// `type` becomes the content type. `name` and `bytes` are taken when
    /// present and otherwise default to empty; no further validation is done.
    pub(crate) fn from_record(mut record: Record, source: FileSource) -> Self {
        let content_type = match record.take_field(TYPE_FIELD) {
            Some(Value::String(s)) => s,
            _ => String::new(),
        };
        let name = match record.take_field(NAME_FIELD) {
            Some(Value::String(s)) => s,
            _ => String::new(),
        };
        let bytes = match record.take_field(BYTES_FIELD) {
            Some(Value::Bytes(b)) => b,
            Some(Value::String(s)) => Bytes::from(s),
            _ => Bytes::new(),
        };
        let last_modified = match record.field(LAST_MODIFIED_FIELD) {
            Some(Value::Number(millis)) => {
                DateTime::from_timestamp_millis(*millis as i64).unwrap_or_else(Utc::now)
            }
            _ => Utc::now(),
        };

        Self::new(source, bytes, name, content_type, last_modified)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Returns which input shape produced this file.
    pub fn source(&self) -> FileSource {
        self.source
    }

    /// Returns the payload.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the payload length in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Returns the extension from the name, else the one registered for
    /// the content type.
    pub fn extension(&self) -> Option<String> {
        extension_from_filename(&self.name).or_else(|| extension_from_mime(&self.content_type))
    }

    /// Read the payload as a UTF-8 string, replacing invalid sequences.
    pub fn read_text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).to_string()
    }

    /// Calculate the SHA-256 checksum of the payload.
    pub fn checksum(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        hex::encode(hasher.finalize())
    }

    /// Splits the file into payload, name and content type.
    pub fn into_parts(self) -> (Bytes, String, String) {
        (self.bytes, self.name, self.content_type)
    }

    pub(crate) fn set_content_type(&mut self, content_type: String) {
        self.content_type = content_type;
    }

    /// Returns a JSON summary of the file, without its payload.
    pub fn to_string_pretty(&self) -> String {
        #[derive(Serialize)]
        struct FileRepr<'a> {
            source: FileSource,
            name: &'a str,
            content_type: &'a str,
            size: u64,
            #[serde(skip_serializing_if = "Option::is_none")]
            extension: Option<String>,
            last_modified: DateTime<Utc>,
        }
        let repr = FileRepr {
            source: self.source,
            name: &self.name,
            content_type: &self.content_type,
            size: self.size(),
            extension: self.extension(),
            last_modified: self.last_modified,
        };
        serde_json::to_string(&repr).unwrap_or_default()
    }
}

impl std::fmt::Display for CanonicalFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_pretty())
    }
}

impl std::fmt::Debug for CanonicalFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanonicalFile")
            .field("source", &self.source)
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("data_len", &self.bytes.len())
            .finish()
    }
}

/// A canonical file converts back into a single-file record, so it can be
/// normalized again.
impl From<CanonicalFile> for Value {
    fn from(file: CanonicalFile) -> Self {
        Value::Record(
            Record::new()
                .with_field(NAME_FIELD, file.name)
                .with_field(TYPE_FIELD, file.content_type)
                .with_field(BYTES_FIELD, file.bytes)
                .with_field(LAST_MODIFIED_FIELD, file.last_modified.timestamp_millis()),
        )
    }
}
