//! Which input shape a canonical file was produced from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The normalization branch that produced a canonical file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileSource {
    /// A single-file record, reinterpreted as-is.
    SingleFile,
    /// The first element of a file list.
    FileList,
    /// A named byte stream, drained into memory.
    Stream,
}

impl fmt::Display for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSource::SingleFile => write!(f, "SingleFile"),
            FileSource::FileList => write!(f, "FileList"),
            FileSource::Stream => write!(f, "Stream"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(FileSource::SingleFile.to_string(), "SingleFile");
        assert_eq!(FileSource::FileList.to_string(), "FileList");
        assert_eq!(FileSource::Stream.to_string(), "Stream");
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&FileSource::FileList).unwrap();
        assert_eq!(json, "\"FileList\"");
        let source: FileSource = serde_json::from_str("\"Stream\"").unwrap();
        assert_eq!(source, FileSource::Stream);
    }
}
