//! Dynamic values handed over by a host application.
//!
//! A host (an RPC input layer, a form handler) does not know ahead of time
//! whether an upload arrives as a single file, a file list, or a named byte
//! stream. It hands the normalizer a [`Value`], and the shape predicates in
//! [`crate::shape`] probe that value for the members each shape requires.
//!
//! Records distinguish plain fields from the two callable capabilities a
//! file-like value can expose: an event subscription (`on`, backed by a
//! [`ByteStream`]) and an indexed accessor (`item`, backed by an
//! [`ItemSource`]).

use std::collections::BTreeMap;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use futures::Stream;

use crate::shape::{BYTES_FIELD, ITEM_MEMBER, NAME_FIELD, ON_MEMBER, TYPE_FIELD};

/// An asynchronous, ordered source of binary chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send>>;

/// Indexed access to the elements of a file list.
pub trait ItemSource: Send + Sync {
    /// Returns the element at `index`, or `None` past the end of the list.
    fn item(&self, index: usize) -> Option<Value>;
}

impl<F> ItemSource for F
where
    F: Fn(usize) -> Option<Value> + Send + Sync,
{
    fn item(&self, index: usize) -> Option<Value> {
        self(index)
    }
}

/// A single member of a [`Record`].
pub enum Member {
    /// A plain data field.
    Field(Value),
    /// A callable event subscription yielding byte chunks.
    Events(ByteStream),
    /// A callable indexed accessor.
    Items(Arc<dyn ItemSource>),
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Field(value) => f.debug_tuple("Field").field(value).finish(),
            Member::Events(_) => f.write_str("Events(..)"),
            Member::Items(_) => f.write_str("Items(..)"),
        }
    }
}

/// A record-like value: named members, each a field or a capability.
#[derive(Debug, Default)]
pub struct Record {
    members: BTreeMap<String, Member>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plain field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, Member::Field(value.into()));
        self
    }

    /// Adds an `on` event subscription backed by `stream`.
    pub fn with_events<S>(mut self, stream: S) -> Self
    where
        S: Stream<Item = std::io::Result<Bytes>> + Send + 'static,
    {
        self.insert(ON_MEMBER, Member::Events(Box::pin(stream)));
        self
    }

    /// Adds an `item` accessor backed by `items`.
    pub fn with_items<I>(mut self, items: I) -> Self
    where
        I: ItemSource + 'static,
    {
        self.insert(ITEM_MEMBER, Member::Items(Arc::new(items)));
        self
    }

    /// Inserts a member, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, member: Member) -> Option<Member> {
        self.members.insert(name.into(), member)
    }

    /// Returns the member stored under `name`.
    pub fn get(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    /// Removes and returns the member stored under `name`.
    pub fn remove(&mut self, name: &str) -> Option<Member> {
        self.members.remove(name)
    }

    /// Returns the plain field stored under `name`, if that member is a field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self.members.get(name) {
            Some(Member::Field(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the field stored under `name` if it is a string.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    /// Removes the field stored under `name`. Non-field members are left in place.
    pub fn take_field(&mut self, name: &str) -> Option<Value> {
        match self.members.get(name) {
            Some(Member::Field(_)) => match self.members.remove(name) {
                Some(Member::Field(value)) => Some(value),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// An arbitrary value of unknown shape.
#[derive(Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// An opaque binary payload. Not record-like.
    Bytes(Bytes),
    Sequence(Vec<Value>),
    Record(Record),
}

impl Value {
    /// A stream-bearing value: a record whose only member is `on`.
    pub fn stream<S>(stream: S) -> Self
    where
        S: Stream<Item = std::io::Result<Bytes>> + Send + 'static,
    {
        Value::Record(Record::new().with_events(stream))
    }

    /// A file-list value: a record whose only member is `item`.
    pub fn file_list<I>(items: I) -> Self
    where
        I: ItemSource + 'static,
    {
        Value::Record(Record::new().with_items(items))
    }

    /// A single-file record carrying `name`, `type` and `bytes` fields.
    pub fn file(name: impl Into<String>, content_type: impl Into<String>, bytes: Bytes) -> Self {
        let name: String = name.into();
        let content_type: String = content_type.into();
        Value::Record(
            Record::new()
                .with_field(NAME_FIELD, name)
                .with_field(TYPE_FIELD, content_type)
                .with_field(BYTES_FIELD, bytes),
        )
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value counts as present when returned from an accessor.
    ///
    /// `Null`, `false`, zero, NaN and the empty string are not; every
    /// payload, sequence and record is.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Bytes(_) | Value::Sequence(_) | Value::Record(_) => true,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Bytes> for Value {
    fn from(bytes: Bytes) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(bytes))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                let mut record = Record::new();
                for (name, value) in map {
                    record.insert(name, Member::Field(Value::from(value)));
                }
                Value::Record(record)
            }
        }
    }
}
