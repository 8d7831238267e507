//! Shape-tagged input trees.
//!
//! A [`Node`] records whether each map in a decoded tree is keyed-object
//! shaped or associative-map shaped. The tag is assigned once at ingestion
//! time and never re-inferred, so the builder can enforce its shape rules by
//! matching instead of guessing from runtime structure.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A node in a decoded input tree.
///
/// `Object` and `Assoc` hold identical data; the distinction is which decode
/// mode produced them. A JSON decode that preserves objects yields `Object`
/// maps, an associative decode yields `Assoc` maps, and the builder refuses
/// to mix the two.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// An ordered, index-keyed sequence.
    List(Vec<Node>),
    /// A string-keyed map produced by an associative decode.
    Assoc(IndexMap<String, Node>),
    /// A string-keyed map produced by an object-preserving decode.
    Object(IndexMap<String, Node>),
}

impl Node {
    /// Convert a decoded JSON tree, tagging every JSON object as
    /// object-shaped.
    pub fn from_json_value(json: &serde_json::Value) -> Node {
        Self::from_json_with(json, Node::Object)
    }

    /// Convert a decoded JSON tree, tagging every JSON object as an
    /// associative map.
    pub fn from_json_value_assoc(json: &serde_json::Value) -> Node {
        Self::from_json_with(json, Node::Assoc)
    }

    fn from_json_with(
        json: &serde_json::Value,
        make_map: fn(IndexMap<String, Node>) -> Node,
    ) -> Node {
        match json {
            serde_json::Value::Null => Node::Null,
            serde_json::Value::Bool(b) => Node::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Node::Int(i),
                // u64 beyond i64::MAX and non-integers both widen to float.
                None => Node::Float(n.as_f64().unwrap_or(0.0)),
            },
            serde_json::Value::String(s) => Node::String(s.clone()),
            serde_json::Value::Array(items) => Node::List(
                items
                    .iter()
                    .map(|item| Self::from_json_with(item, make_map))
                    .collect(),
            ),
            serde_json::Value::Object(map) => make_map(
                map.iter()
                    .map(|(key, value)| (key.clone(), Self::from_json_with(value, make_map)))
                    .collect(),
            ),
        }
    }

    /// Build an object-shaped map node from key/node pairs.
    pub fn object<K, V, I>(pairs: I) -> Node
    where
        K: Into<String>,
        V: Into<Node>,
        I: IntoIterator<Item = (K, V)>,
    {
        Node::Object(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Build an associative map node from key/node pairs.
    pub fn assoc<K, V, I>(pairs: I) -> Node
    where
        K: Into<String>,
        V: Into<Node>,
        I: IntoIterator<Item = (K, V)>,
    {
        Node::Assoc(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Build a list node.
    pub fn list<V, I>(items: I) -> Node
    where
        V: Into<Node>,
        I: IntoIterator<Item = V>,
    {
        Node::List(items.into_iter().map(Into::into).collect())
    }

    /// Shape tag for diagnostics.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "bool",
            Node::Int(_) => "int",
            Node::Float(_) => "float",
            Node::String(_) => "string",
            Node::List(_) => "a list",
            Node::Assoc(_) => "an associative map",
            Node::Object(_) => "an object",
        }
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Int(i) => serializer.serialize_i64(*i),
            Node::Float(f) => serializer.serialize_f64(*f),
            Node::String(s) => serializer.serialize_str(s),
            Node::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            // Both map shapes serialize identically; the tag only matters to
            // the builder.
            Node::Assoc(map) | Node::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Int(i64::from(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Int(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Float(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::List(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_preserving_decode_tags_objects() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"a": 1, "b": {"c": [1, 2]}}"#).unwrap();
        let node = Node::from_json_value(&json);

        let Node::Object(fields) = &node else {
            panic!("expected object root");
        };
        assert_eq!(fields["a"], Node::Int(1));
        assert!(matches!(fields["b"], Node::Object(_)));
    }

    #[test]
    fn test_associative_decode_tags_maps() {
        let json: serde_json::Value = serde_json::from_str(r#"{"a": {"b": 2}}"#).unwrap();
        let node = Node::from_json_value_assoc(&json);

        let Node::Assoc(fields) = &node else {
            panic!("expected associative root");
        };
        assert!(matches!(fields["a"], Node::Assoc(_)));
    }

    #[test]
    fn test_number_widening() {
        let json: serde_json::Value = serde_json::from_str("[1, 1.5, 9223372036854775807]").unwrap();
        let node = Node::from_json_value(&json);
        assert_eq!(
            node,
            Node::List(vec![
                Node::Int(1),
                Node::Float(1.5),
                Node::Int(i64::MAX),
            ])
        );
    }

    #[test]
    fn test_serializes_like_plain_json() {
        let node = Node::object([
            ("a", Node::from(1)),
            ("b", Node::list([Node::from("x"), Node::from(true)])),
        ]);
        assert_eq!(
            serde_json::to_string(&node).unwrap(),
            r#"{"a":1,"b":["x",true]}"#
        );
    }
}
