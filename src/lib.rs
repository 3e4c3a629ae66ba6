//! SmooAI file normalization for Rust.
//!
//! Upload handlers receive files in whatever shape the calling environment
//! produces. This crate turns one such value into a single
//! [`CanonicalFile`] (payload, name and content type).
//!
//! # Overview
//!
//! A [`Value`] is classified against three shapes, in this order:
//!
//! - **Single file**: a record with a string `type` field
//! - **File list**: a record with an `item` accessor (first element only)
//! - **Stream record**: `{ stream, name, type }` where `stream` exposes an
//!   `on` event subscription; the stream is drained into memory
//!
//! Anything else fails with [`FileError::ShapeMismatch`].
//!
//! # Examples
//!
//! ```no_run
//! # use smooai_file_normalize::{normalize, Record, Value};
//! # use bytes::Bytes;
//! # async fn example() -> smooai_file_normalize::error::Result<()> {
//! let chunks: Vec<std::io::Result<Bytes>> =
//!     vec![Ok(Bytes::from("hello ")), Ok(Bytes::from("world"))];
//! let value = Value::Record(
//!     Record::new()
//!         .with_field("stream", Value::stream(futures::stream::iter(chunks)))
//!         .with_field("name", "hello.txt")
//!         .with_field("type", "text/plain"),
//! );
//! let file = normalize(value).await?;
//! assert_eq!(file.read_text(), "hello world");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod detection;
pub mod error;
pub mod file;
pub mod normalize;
pub mod shape;
pub mod source;
pub mod value;

// Re-export primary types at the crate root for convenience.
pub use crate::config::NormalizeOptions;
pub use crate::error::FileError;
pub use crate::file::CanonicalFile;
pub use crate::normalize::{normalize, FileNormalizer};
pub use crate::shape::{classify, Shape};
pub use crate::source::FileSource;
pub use crate::value::{ByteStream, ItemSource, Member, Record, Value};

/// The crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
