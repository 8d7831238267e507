//! Recursive conversion from decoded input trees to container trees.

use crate::data_object::{DataContainer, DataObject};
use crate::error::{DataObjectError, Result};
use crate::json::{ArrayData, JsonData, KvpData, PrimitiveData};
use crate::node::Node;
use crate::value::Value;

/// Converts decoded input trees into [`DataObject`] trees, bottom-up.
///
/// The two strict entry points correspond to the two decode modes: an
/// object-preserving decode feeds [`from_object`](Self::from_object), an
/// associative decode feeds [`from_assoc`](Self::from_assoc). The origin
/// representation determines which conversion rules apply, so finding the
/// other shape nested anywhere in the input is a hard error rather than a
/// silent conversion.
///
/// The JSON entry point [`from_json`](Self::from_json) instead preserves all
/// three JSON shapes and cannot fail: JSON itself mixes arrays and objects
/// freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataObjectBuilder;

impl DataObjectBuilder {
    /// Create a builder.
    pub fn new() -> Self {
        Self
    }

    /// Build a container from an object-shaped tree.
    ///
    /// Object-shaped fields recurse into nested containers; lists are walked
    /// with object-shaped elements recursing and everything else kept as-is.
    /// An associative map anywhere in the tree fails with
    /// [`DataObjectError::AssociativeWithinObject`].
    pub fn from_object(&self, input: &Node) -> Result<DataObject> {
        self.from_object_as(input)
    }

    /// Same traversal as [`from_object`](Self::from_object), producing a
    /// caller-supplied container type at the root. Nested containers are
    /// plain [`DataObject`]s.
    pub fn from_object_as<C: DataContainer>(&self, input: &Node) -> Result<C> {
        let Node::Object(fields) = input else {
            return Err(DataObjectError::UnsupportedRoot {
                expected: "an object",
                actual: input.shape_name(),
            });
        };

        let mut container = C::default();
        for (key, node) in fields {
            let value = self.object_value(key, node)?;
            container = container.with_value(key.clone(), value);
        }
        Ok(container)
    }

    /// Build a container from an associative tree.
    ///
    /// The mirror image of [`from_object`](Self::from_object): associative
    /// values recurse into nested containers, and an object-shaped value
    /// anywhere in the tree fails with
    /// [`DataObjectError::ObjectWithinAssociative`].
    pub fn from_assoc(&self, input: &Node) -> Result<DataObject> {
        let Node::Assoc(fields) = input else {
            return Err(DataObjectError::UnsupportedRoot {
                expected: "an associative map",
                actual: input.shape_name(),
            });
        };

        let mut container = DataObject::new();
        for (key, node) in fields {
            let value = self.assoc_value(key, node)?;
            container = container.with_value(key.clone(), value);
        }
        Ok(container)
    }

    /// Build a shape-preserving [`JsonData`] from a decoded JSON tree.
    ///
    /// Top-level dispatch: object ⇒ keyed container, array ⇒ read-only
    /// array, anything else ⇒ primitive. Below the top level, objects become
    /// nested containers wherever they appear.
    pub fn from_json(&self, input: &serde_json::Value) -> JsonData {
        match input {
            serde_json::Value::Object(map) => {
                let mut kvp = KvpData::default();
                for (key, value) in map {
                    kvp = kvp.with_value(key.clone(), json_value(value));
                }
                JsonData::Kvp(kvp)
            }
            serde_json::Value::Array(items) => {
                JsonData::Array(ArrayData::new(items.iter().map(json_value).collect()))
            }
            scalar => JsonData::Primitive(PrimitiveData::new(json_value(scalar))),
        }
    }

    /// Decode a JSON string and build a shape-preserving [`JsonData`].
    pub fn from_json_str(&self, text: &str) -> Result<JsonData> {
        let decoded: serde_json::Value = serde_json::from_str(text)?;
        Ok(self.from_json(&decoded))
    }

    fn object_value(&self, key: &str, node: &Node) -> Result<Value> {
        match node {
            Node::Object(_) => Ok(Value::Object(self.from_object(node)?)),
            Node::Assoc(_) => Err(DataObjectError::AssociativeWithinObject {
                key: key.to_string(),
            }),
            Node::List(items) => items
                .iter()
                .map(|element| self.object_value(key, element))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            scalar => Ok(scalar_value(scalar)),
        }
    }

    fn assoc_value(&self, key: &str, node: &Node) -> Result<Value> {
        match node {
            Node::Assoc(_) => Ok(Value::Object(self.from_assoc(node)?)),
            Node::Object(_) => Err(DataObjectError::ObjectWithinAssociative {
                key: key.to_string(),
            }),
            Node::List(items) => items
                .iter()
                .map(|element| self.assoc_value(key, element))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            scalar => Ok(scalar_value(scalar)),
        }
    }
}

fn scalar_value(node: &Node) -> Value {
    match node {
        Node::Null => Value::Null,
        Node::Bool(b) => Value::Bool(*b),
        Node::Int(i) => Value::Int(*i),
        Node::Float(f) => Value::Float(*f),
        Node::String(s) => Value::String(s.clone()),
        // Map and list nodes are routed by the callers before reaching here.
        Node::List(_) | Node::Assoc(_) | Node::Object(_) => {
            unreachable!("composite nodes are handled by the shape walks")
        }
    }
}

fn json_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(0.0)),
        },
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => Value::Array(items.iter().map(json_value).collect()),
        serde_json::Value::Object(map) => {
            let mut object = DataObject::new();
            for (key, value) in map {
                object = object.with_value(key.clone(), json_value(value));
            }
            Value::Object(object)
        }
    }
}
