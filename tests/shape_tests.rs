//! Integration tests for shape classification.

use bytes::Bytes;
use serde_json::json;
use smooai_file_normalize::shape::{
    is_file_list_like, is_object_like, is_single_file_like, is_stream_bearing, is_stream_record,
    StreamRecord,
};
use smooai_file_normalize::{classify, Record, Shape, Value};

#[test]
fn test_json_values_classify() {
    assert_eq!(classify(&Value::from(json!(null))), Shape::Unrecognized);
    assert_eq!(classify(&Value::from(json!(12))), Shape::Unrecognized);
    assert_eq!(classify(&Value::from(json!("text/plain"))), Shape::Unrecognized);
    assert_eq!(classify(&Value::from(json!([1, 2]))), Shape::Unrecognized);
    assert_eq!(classify(&Value::from(json!({"name": "a.txt"}))), Shape::Unrecognized);
    assert_eq!(
        classify(&Value::from(json!({"type": "text/plain"}))),
        Shape::SingleFile
    );
}

#[test]
fn test_json_cannot_express_capabilities() {
    // Decoded JSON only carries plain fields, so `on` and `item` never probe as callable.
    let value = Value::from(json!({"on": "data", "item": [{"type": "text/plain"}]}));
    assert!(is_object_like(&value));
    assert!(!is_stream_bearing(&value));
    assert!(!is_file_list_like(&value));
}

#[test]
fn test_file_list_with_untyped_first_item_still_matches() {
    let list = Value::file_list(|_: usize| Some(Value::from(json!({"name": "a.txt"}))));
    assert!(is_file_list_like(&list));
    assert!(!is_single_file_like(&list));
    assert_eq!(classify(&list), Shape::FileList);
}

#[test]
fn test_stream_record_round_trip_through_validator() {
    let value = Value::Record(
        Record::new()
            .with_field(
                "stream",
                Value::stream(futures::stream::iter(vec![Ok::<_, std::io::Error>(
                    Bytes::from("x"),
                )])),
            )
            .with_field("name", "x.bin")
            .with_field("type", "application/octet-stream"),
    );
    assert!(is_stream_record(&value));
    assert!(is_single_file_like(&value));
    assert_eq!(classify(&value), Shape::StreamRecord);

    let record = StreamRecord::from_value(value).unwrap();
    assert_eq!(record.name, "x.bin");
    assert_eq!(record.content_type, "application/octet-stream");
}

#[test]
fn test_stream_record_rejects_non_string_name() {
    let value = Value::Record(
        Record::new()
            .with_field(
                "stream",
                Value::stream(futures::stream::empty::<std::io::Result<Bytes>>()),
            )
            .with_field("name", 7_i64)
            .with_field("type", "text/plain"),
    );
    assert!(!is_stream_record(&value));
    assert_eq!(classify(&value), Shape::SingleFile);
    assert!(StreamRecord::from_value(value).unwrap_err().is_shape_mismatch());
}
