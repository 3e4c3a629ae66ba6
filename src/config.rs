//! Normalizer configuration.

use serde::{Deserialize, Serialize};

/// Options controlling how a [`crate::FileNormalizer`] builds canonical files.
///
/// Every field has a default, so hosts can load a partial JSON object:
///
/// ```
/// # use smooai_file_normalize::NormalizeOptions;
/// let options: NormalizeOptions = serde_json::from_str(r#"{"max_bytes": 1048576}"#).unwrap();
/// assert_eq!(options.max_bytes, Some(1_048_576));
/// assert!(!options.sniff_content_type);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Upper bound on the bytes drained from a stream. `None` buffers
    /// the whole stream, however large.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bytes: Option<u64>,

    /// Fill an empty content type from magic bytes, then the file name.
    pub sniff_content_type: bool,
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the number of bytes drained from a stream.
    pub fn with_max_bytes(mut self, limit: u64) -> Self {
        self.max_bytes = Some(limit);
        self
    }

    /// Enable content-type sniffing for files with an empty type.
    pub fn with_sniff_content_type(mut self, enabled: bool) -> Self {
        self.sniff_content_type = enabled;
        self
    }
}
