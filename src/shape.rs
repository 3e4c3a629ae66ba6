//! Shape predicates for file-like values.
//!
//! Each predicate is a capability probe over a [`Value`]: it checks that
//! the value is record-like and exposes a member of the expected kind under
//! the expected name. Predicates are total; anything that does not fit
//! (including `Null`, scalars, payloads and sequences) yields `false`.

use crate::error::{FileError, Result};
use crate::value::{ByteStream, Member, Record, Value};

/// Callable member that marks a value as stream-bearing.
pub const ON_MEMBER: &str = "on";
/// Callable member that marks a value as a file list.
pub const ITEM_MEMBER: &str = "item";
/// Stream field of a stream record.
pub const STREAM_FIELD: &str = "stream";
pub const NAME_FIELD: &str = "name";
pub const TYPE_FIELD: &str = "type";
pub const BYTES_FIELD: &str = "bytes";
/// Modification time in epoch milliseconds.
pub const LAST_MODIFIED_FIELD: &str = "lastModified";

/// Only the element at this index of a file list is ever considered.
/// Every later element is discarded without being requested.
pub const FIRST_ITEM_INDEX: usize = 0;

/// The recognized input shapes, in union order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    SingleFile,
    FileList,
    StreamRecord,
    Unrecognized,
}

/// True iff the value is a record: not null, not a scalar, not a sequence.
pub fn is_object_like(value: &Value) -> bool {
    matches!(value, Value::Record(_))
}

/// True iff the value is a record exposing an `on` event subscription.
///
/// Metadata fields are not inspected here; see [`is_stream_record`].
pub fn is_stream_bearing(value: &Value) -> bool {
    matches!(
        value,
        Value::Record(record) if matches!(record.get(ON_MEMBER), Some(Member::Events(_)))
    )
}

/// True iff the value is a record with a string `type` field.
///
/// This is a heuristic, not a type check: any record carrying a string
/// `type` is accepted as a file.
pub fn is_single_file_like(value: &Value) -> bool {
    matches!(value, Value::Record(record) if record.str_field(TYPE_FIELD).is_some())
}

/// True iff the value is a record with an `item` accessor whose first
/// element is truthy.
pub fn is_file_list_like(value: &Value) -> bool {
    first_list_item(value).is_some()
}

/// Probes a file list and returns its first element.
///
/// The accessor is invoked exactly once, with [`FIRST_ITEM_INDEX`]. A
/// missing or falsy first element rejects the value; no other emptiness
/// check is made.
pub fn first_list_item(value: &Value) -> Option<Value> {
    let Value::Record(record) = value else {
        return None;
    };
    let Some(Member::Items(items)) = record.get(ITEM_MEMBER) else {
        return None;
    };
    items
        .item(FIRST_ITEM_INDEX)
        .filter(|first| first.is_truthy())
}

/// Validates the exact stream-record shape: a stream-bearing `stream`
/// field plus string `name` and `type` fields.
pub fn is_stream_record(value: &Value) -> bool {
    match value {
        Value::Record(record) => stream_record_parts(record).is_some(),
        _ => false,
    }
}

fn stream_record_parts(record: &Record) -> Option<(&str, &str)> {
    let stream = record.field(STREAM_FIELD)?;
    if !is_stream_bearing(stream) {
        return None;
    }
    Some((record.str_field(NAME_FIELD)?, record.str_field(TYPE_FIELD)?))
}

/// Classifies a value following union order.
///
/// A stream record also carries a string `type`, so it is checked before
/// the single-file heuristic would claim it.
pub fn classify(value: &Value) -> Shape {
    if is_single_file_like(value) && !is_stream_record(value) {
        Shape::SingleFile
    } else if is_file_list_like(value) {
        Shape::FileList
    } else if is_stream_record(value) {
        Shape::StreamRecord
    } else {
        Shape::Unrecognized
    }
}

/// A validated stream record, owning its stream.
pub struct StreamRecord {
    pub stream: ByteStream,
    pub name: String,
    pub content_type: String,
}

impl StreamRecord {
    /// Takes apart a value that satisfies [`is_stream_record`].
    ///
    /// Fails with [`FileError::ShapeMismatch`] for anything else.
    pub fn from_value(value: Value) -> Result<Self> {
        if !is_stream_record(&value) {
            return Err(FileError::ShapeMismatch);
        }
        let Value::Record(mut record) = value else {
            return Err(FileError::ShapeMismatch);
        };
        let name = take_string(&mut record, NAME_FIELD)?;
        let content_type = take_string(&mut record, TYPE_FIELD)?;
        let Some(Value::Record(mut carrier)) = record.take_field(STREAM_FIELD) else {
            return Err(FileError::ShapeMismatch);
        };
        let Some(Member::Events(stream)) = carrier.remove(ON_MEMBER) else {
            return Err(FileError::ShapeMismatch);
        };
        Ok(Self {
            stream,
            name,
            content_type,
        })
    }
}

impl std::fmt::Debug for StreamRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamRecord")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

fn take_string(record: &mut Record, name: &str) -> Result<String> {
    match record.take_field(name) {
        Some(Value::String(s)) => Ok(s),
        _ => Err(FileError::ShapeMismatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn empty_stream() -> Value {
        Value::stream(futures::stream::empty::<std::io::Result<Bytes>>())
    }

    fn stream_record() -> Value {
        Value::Record(
            Record::new()
                .with_field(STREAM_FIELD, empty_stream())
                .with_field(NAME_FIELD, "f.bin")
                .with_field(TYPE_FIELD, "application/octet-stream"),
        )
    }

    fn non_records() -> Vec<Value> {
        vec![
            Value::Null,
            Value::Bool(true),
            Value::Number(1.0),
            Value::from("image/png"),
            Value::Bytes(Bytes::from_static(b"data")),
            Value::Sequence(vec![Value::from("a")]),
        ]
    }

    #[test]
    fn test_non_records_match_nothing() {
        for value in non_records() {
            assert!(!is_object_like(&value));
            assert!(!is_stream_bearing(&value));
            assert!(!is_single_file_like(&value));
            assert!(!is_file_list_like(&value));
            assert!(!is_stream_record(&value));
            assert_eq!(classify(&value), Shape::Unrecognized);
        }
    }

    #[test]
    fn test_stream_bearing_requires_events_member() {
        assert!(is_stream_bearing(&empty_stream()));

        let plain_on = Value::Record(Record::new().with_field(ON_MEMBER, "not callable"));
        assert!(is_object_like(&plain_on));
        assert!(!is_stream_bearing(&plain_on));
    }

    #[test]
    fn test_single_file_heuristic_is_permissive() {
        let anything_typed = Value::Record(Record::new().with_field(TYPE_FIELD, "whatever"));
        assert!(is_single_file_like(&anything_typed));

        let numeric_type = Value::Record(Record::new().with_field(TYPE_FIELD, 3_i64));
        assert!(!is_single_file_like(&numeric_type));
    }

    #[test]
    fn test_file_list_probe_calls_first_index_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let list = Value::file_list(move |index: usize| {
            seen.fetch_add(1, Ordering::SeqCst);
            assert_eq!(index, FIRST_ITEM_INDEX);
            Some(Value::Record(Record::new().with_field(TYPE_FIELD, "text/plain")))
        });

        let first = first_list_item(&list).unwrap();
        assert!(is_single_file_like(&first));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_file_list_rejects_falsy_first_item() {
        let empty = Value::file_list(|_: usize| -> Option<Value> { None });
        assert!(!is_file_list_like(&empty));

        let null_first = Value::file_list(|_: usize| Some(Value::Null));
        assert!(!is_file_list_like(&null_first));

        let item_field = Value::Record(Record::new().with_field(ITEM_MEMBER, "a"));
        assert!(!is_file_list_like(&item_field));
    }

    #[test]
    fn test_stream_record_validator() {
        assert!(is_stream_record(&stream_record()));

        let missing_name = Value::Record(
            Record::new()
                .with_field(STREAM_FIELD, empty_stream())
                .with_field(TYPE_FIELD, "text/plain"),
        );
        assert!(!is_stream_record(&missing_name));

        let plain_stream_field = Value::Record(
            Record::new()
                .with_field(STREAM_FIELD, "bytes")
                .with_field(NAME_FIELD, "f.bin")
                .with_field(TYPE_FIELD, "text/plain"),
        );
        assert!(!is_stream_record(&plain_stream_field));
    }

    #[test]
    fn test_classify_order() {
        let single = Value::file("a.png", "image/png", Bytes::new());
        assert_eq!(classify(&single), Shape::SingleFile);

        let list = Value::file_list(|_: usize| Some(Value::file("a.txt", "text/plain", Bytes::new())));
        assert_eq!(classify(&list), Shape::FileList);

        assert_eq!(classify(&stream_record()), Shape::StreamRecord);
        assert_eq!(classify(&Value::Record(Record::new())), Shape::Unrecognized);
    }

    #[test]
    fn test_stream_record_from_value() {
        let record = StreamRecord::from_value(stream_record()).unwrap();
        assert_eq!(record.name, "f.bin");
        assert_eq!(record.content_type, "application/octet-stream");

        let err = StreamRecord::from_value(Value::Null).unwrap_err();
        assert!(err.is_shape_mismatch());
    }
}
