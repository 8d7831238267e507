//! JSON shape variants.
//!
//! A decoded JSON document has one of three shapes: a keyed object, an
//! ordered array, or a bare primitive. Converting everything into one keyed
//! container would erase that distinction, so the builder's JSON entry point
//! produces a [`JsonData`] whose shape tag is fixed at build time.

use std::ops::{Deref, Index};

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::data_object::{DataContainer, DataObject};
use crate::error::{DataObjectError, Result};
use crate::value::Value;

/// A JSON-shaped value: keyed object, ordered array, or primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonData {
    Kvp(KvpData),
    Array(ArrayData),
    Primitive(PrimitiveData),
}

impl JsonData {
    /// The keyed-object variant, or `None`.
    pub fn as_kvp(&self) -> Option<&KvpData> {
        match self {
            JsonData::Kvp(kvp) => Some(kvp),
            _ => None,
        }
    }

    /// The ordered-array variant, or `None`.
    pub fn as_array(&self) -> Option<&ArrayData> {
        match self {
            JsonData::Array(array) => Some(array),
            _ => None,
        }
    }

    /// The primitive variant, or `None`.
    pub fn as_primitive(&self) -> Option<&PrimitiveData> {
        match self {
            JsonData::Primitive(primitive) => Some(primitive),
            _ => None,
        }
    }
}

impl Serialize for JsonData {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            JsonData::Kvp(kvp) => kvp.serialize(serializer),
            JsonData::Array(array) => array.serialize(serializer),
            JsonData::Primitive(primitive) => primitive.serialize(serializer),
        }
    }
}

/// The keyed-object shape: a [`DataObject`] that remembers it came from a
/// JSON object rather than an associative map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KvpData {
    data: DataObject,
}

impl KvpData {
    /// Borrow the underlying container.
    pub fn data_object(&self) -> &DataObject {
        &self.data
    }

    /// Unwrap into the underlying container.
    pub fn into_data_object(self) -> DataObject {
        self.data
    }
}

impl Deref for KvpData {
    type Target = DataObject;

    fn deref(&self) -> &DataObject {
        &self.data
    }
}

impl From<DataObject> for KvpData {
    fn from(data: DataObject) -> Self {
        Self { data }
    }
}

impl DataContainer for KvpData {
    fn with_value(self, key: String, value: Value) -> Self {
        Self {
            data: self.data.with_value(key, value),
        }
    }
}

impl Serialize for KvpData {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.data.serialize(serializer)
    }
}

/// The ordered-array shape.
///
/// Structurally immutable, not merely copy-on-write: there is no mutating
/// access, and the compatibility write surface ([`set`](Self::set),
/// [`unset`](Self::unset)) always fails with
/// [`DataObjectError::ImmutableWrite`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayData {
    items: Vec<Value>,
}

impl ArrayData {
    /// Wrap a sequence of already-converted values.
    pub fn new(items: Vec<Value>) -> Self {
        Self { items }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The element at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Rejected: the array is read-only.
    pub fn set(&self, _index: usize, _value: Value) -> Result<()> {
        Err(DataObjectError::ImmutableWrite)
    }

    /// Rejected: the array is read-only.
    pub fn unset(&self, _index: usize) -> Result<()> {
        Err(DataObjectError::ImmutableWrite)
    }
}

impl Index<usize> for ArrayData {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a ArrayData {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for ArrayData {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for item in &self.items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

/// The primitive shape: exactly one scalar value and its discovered kind.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveData {
    value: Value,
}

impl PrimitiveData {
    // Only the builder and the From impls construct primitives, so the
    // invariant that `value` is scalar holds by construction.
    pub(crate) fn new(value: Value) -> Self {
        debug_assert!(value.is_scalar());
        Self { value }
    }

    /// The wrapped scalar.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The discovered primitive kind.
    pub fn kind(&self) -> PrimitiveKind {
        match &self.value {
            Value::Null => PrimitiveKind::Null,
            Value::Bool(_) => PrimitiveKind::Boolean,
            Value::Int(_) => PrimitiveKind::Integer,
            Value::Float(_) => PrimitiveKind::Double,
            // new() only admits scalars.
            _ => PrimitiveKind::String,
        }
    }
}

impl From<bool> for PrimitiveData {
    fn from(value: bool) -> Self {
        Self::new(Value::Bool(value))
    }
}

impl From<i64> for PrimitiveData {
    fn from(value: i64) -> Self {
        Self::new(Value::Int(value))
    }
}

impl From<f64> for PrimitiveData {
    fn from(value: f64) -> Self {
        Self::new(Value::Float(value))
    }
}

impl From<&str> for PrimitiveData {
    fn from(value: &str) -> Self {
        Self::new(Value::String(value.to_string()))
    }
}

impl Serialize for PrimitiveData {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value.serialize(serializer)
    }
}

/// The kind of scalar a [`PrimitiveData`] wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Null,
    Boolean,
    Integer,
    Double,
    String,
}

impl PrimitiveKind {
    /// The kind's display name.
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveKind::Null => "null",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Double => "double",
            PrimitiveKind::String => "string",
        }
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
