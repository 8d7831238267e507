//! The immutable keyed container and its typed accessors.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::coerce;
use crate::error::{DataObjectError, Result};
use crate::node::Node;
use crate::value::Value;

/// An immutable, ordered mapping from string keys to [`Value`]s.
///
/// Every mutating operation derives a new container and leaves the receiver
/// untouched, so a `DataObject` can be shared freely. Insertion order is
/// preserved but has no meaning for lookup.
///
/// # Example
///
/// ```
/// use dataobject::DataObject;
///
/// let data = DataObject::new()
///     .with("name", "Margaret")
///     .with("age", 77);
///
/// assert_eq!(data.get_string("name").as_deref(), Some("Margaret"));
/// assert_eq!(data.get_int("age"), Some(77));
/// assert_eq!(data.get_float("age"), Some(77.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataObject {
    data: IndexMap<String, Value>,
}

/// A keyed container the builder can accumulate into.
///
/// Implemented by [`DataObject`] and any specialized container that should be
/// producible from the same recursive conversion, such as
/// [`KvpData`](crate::json::KvpData).
pub trait DataContainer: Default {
    /// Consume the container and return one with `key` set to `value`.
    fn with_value(self, key: String, value: Value) -> Self;
}

impl DataContainer for DataObject {
    fn with_value(mut self, key: String, value: Value) -> Self {
        self.data.insert(key, value);
        self
    }
}

impl DataObject {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a new container with `key` set to `value`.
    #[must_use]
    pub fn with(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut derived = self.clone();
        derived.data.insert(key.into(), value.into());
        derived
    }

    /// Derive a new container with `key` absent. A plain clone when the key
    /// was already absent.
    #[must_use]
    pub fn without(&self, key: &str) -> Self {
        let mut derived = self.clone();
        derived.data.shift_remove(key);
        derived
    }

    /// The raw stored value, or `None` when the key is absent.
    ///
    /// A stored null comes back as `Some(&Value::Null)`; callers that only
    /// need existence should use [`contains`](Self::contains).
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// True when the key is present, including when its value is null.
    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Normalized type tag of the value at `key`, or `None` when absent.
    pub fn type_of(&self, key: &str) -> Option<&'static str> {
        self.data.get(key).map(Value::type_name)
    }

    /// Number of keys in the container.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the container holds no keys.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Iterate over key/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// The value at `key` coerced to a string; `None` when absent or null.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get_present(key).map(coerce::to_string)
    }

    /// The value at `key` coerced to an integer; `None` when absent or null.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get_present(key).map(coerce::to_int)
    }

    /// The value at `key` coerced to a float; `None` when absent or null.
    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get_present(key).map(coerce::to_float)
    }

    /// The value at `key` coerced to a boolean; `None` when absent or null.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get_present(key).map(coerce::to_bool)
    }

    /// The value at `key` coerced to a UTC date-time.
    ///
    /// `Ok(None)` when the key is absent or null. A stored date-time is
    /// returned unchanged; anything else must coerce or the call fails, so an
    /// unparsable value is distinguishable from an absent one.
    pub fn get_date_time(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        match self.get_present(key) {
            None => Ok(None),
            Some(value) => coerce::to_date_time(value).map(Some),
        }
    }

    /// The nested container at `key`, or `None` when the stored value is not
    /// a container. No coercion is attempted.
    pub fn get_object(&self, key: &str) -> Option<&DataObject> {
        match self.get(key) {
            Some(Value::Object(object)) => Some(object),
            _ => None,
        }
    }

    /// The stored sequence at `key`, or `None` when absent or not a sequence.
    pub fn get_array(&self, key: &str) -> Option<&[Value]> {
        match self.get(key) {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        }
    }

    /// The stored sequence at `key` with every element checked or coerced
    /// against `type_name`.
    ///
    /// The type name is resolved before any element is inspected; an unknown
    /// name fails with [`DataObjectError::InvalidTypeName`]. Contract types
    /// (`DataObject`, `DateTime`, `array`) must already hold for every
    /// element, while primitive types are coerced on read. The first
    /// non-conforming element aborts with
    /// [`DataObjectError::ArrayElementType`] naming its index.
    pub fn get_typed_array(&self, key: &str, type_name: &str) -> Result<Option<Vec<Value>>> {
        let element_type = ElementType::parse(type_name)?;

        let Some(Value::Array(items)) = self.get(key) else {
            return Ok(None);
        };

        let mut out = Vec::with_capacity(items.len());
        for (index, element) in items.iter().enumerate() {
            match element_type.apply(element) {
                Some(value) => out.push(value),
                None => {
                    return Err(DataObjectError::ArrayElementType {
                        index,
                        expected: type_name.to_string(),
                        actual: element.type_name().to_string(),
                    });
                }
            }
        }

        Ok(Some(out))
    }

    /// Recursively flatten into a plain associative tree.
    ///
    /// Every nested container becomes an associative map node; no
    /// `DataObject` remains in the result. This is also the container's
    /// serialized form.
    pub fn as_array(&self) -> IndexMap<String, Node> {
        self.data
            .iter()
            .map(|(key, value)| (key.clone(), value_to_node(value, MapShape::Assoc)))
            .collect()
    }

    /// Recursively flatten into a plain object-shaped tree.
    ///
    /// Same traversal as [`as_array`](Self::as_array) but nested containers
    /// become object-shaped nodes, for consumers that distinguish the two
    /// representations.
    pub fn as_object(&self) -> Node {
        Node::Object(
            self.data
                .iter()
                .map(|(key, value)| (key.clone(), value_to_node(value, MapShape::Object)))
                .collect(),
        )
    }

    fn get_present(&self, key: &str) -> Option<&Value> {
        match self.data.get(key) {
            None | Some(Value::Null) => None,
            present => present,
        }
    }
}

/// Serializes exactly as [`DataObject::as_array`] would; this is the form a
/// JSON encoder consumes.
impl Serialize for DataObject {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.data.len()))?;
        for (key, value) in &self.data {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Clone, Copy)]
enum MapShape {
    Assoc,
    Object,
}

fn value_to_node(value: &Value, shape: MapShape) -> Node {
    match value {
        Value::Null => Node::Null,
        Value::Bool(b) => Node::Bool(*b),
        Value::Int(i) => Node::Int(*i),
        Value::Float(f) => Node::Float(*f),
        Value::String(s) => Node::String(s.clone()),
        Value::DateTime(dt) => Node::String(crate::value::format_date_time(dt)),
        Value::Array(items) => Node::List(
            items
                .iter()
                .map(|item| value_to_node(item, shape))
                .collect(),
        ),
        Value::Object(object) => match shape {
            MapShape::Assoc => Node::Assoc(object.as_array()),
            MapShape::Object => object.as_object(),
        },
    }
}

/// A target type for [`DataObject::get_typed_array`], resolved from its text
/// name before any element is inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Int,
    Float,
    Bool,
    String,
    Array,
    DateTime,
    Object,
}

impl ElementType {
    /// Resolve a type name, case-insensitively. `"integer"`, `"double"` and
    /// `"boolean"` are accepted aliases; `"dataobject"` and `"object"` both
    /// name the container type.
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "int" | "integer" => Ok(ElementType::Int),
            "float" | "double" => Ok(ElementType::Float),
            "bool" | "boolean" => Ok(ElementType::Bool),
            "string" => Ok(ElementType::String),
            "array" => Ok(ElementType::Array),
            "datetime" => Ok(ElementType::DateTime),
            "object" | "dataobject" => Ok(ElementType::Object),
            _ => Err(DataObjectError::InvalidTypeName(name.to_string())),
        }
    }

    /// Check or coerce a single element, returning `None` on a type
    /// violation.
    ///
    /// Contract types must already match. Primitive targets coerce scalars
    /// via the coercion engine, with one exception: narrowing a float with a
    /// fractional part to an int would change its value, so it is rejected
    /// rather than silently truncated.
    fn apply(self, element: &Value) -> Option<Value> {
        match self {
            ElementType::Int => match element {
                Value::Float(f) if f.fract() != 0.0 => None,
                value if value.is_scalar() => Some(Value::Int(coerce::to_int(value))),
                _ => None,
            },
            ElementType::Float => match element {
                value if value.is_scalar() => Some(Value::Float(coerce::to_float(value))),
                _ => None,
            },
            ElementType::Bool => match element {
                value if value.is_scalar() => Some(Value::Bool(coerce::to_bool(value))),
                _ => None,
            },
            ElementType::String => match element {
                value if value.is_scalar() => Some(Value::String(coerce::to_string(value))),
                _ => None,
            },
            ElementType::Array => match element {
                Value::Array(_) => Some(element.clone()),
                _ => None,
            },
            ElementType::DateTime => match element {
                Value::DateTime(_) => Some(element.clone()),
                _ => None,
            },
            ElementType::Object => match element {
                Value::Object(_) => Some(element.clone()),
                _ => None,
            },
        }
    }
}
