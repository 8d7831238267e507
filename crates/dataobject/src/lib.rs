//! dataobject: immutable, type-safe data containers built from decoded JSON
//! trees.
//!
//! A [`DataObject`] is an ordered, string-keyed bag of values that is
//! immutable after construction: [`with`](DataObject::with) and
//! [`without`](DataObject::without) derive new containers instead of
//! mutating. Typed getters coerce stored scalars on read, so a `"3.14159"`
//! read as an int is `3` and a stored `true` read as a string is `"1"`.
//!
//! A [`DataObjectBuilder`] converts decoded trees into container trees. The
//! strict entry points enforce that object-shaped and associative-map-shaped
//! input is never intermixed; the JSON entry point preserves JSON's three
//! shapes as a [`JsonData`] instead of collapsing them.
//!
//! # Example
//!
//! ```
//! use dataobject::{DataObjectBuilder, Node};
//!
//! let decoded: serde_json::Value =
//!     serde_json::from_str(r#"{"id": 123, "name": "Example"}"#)?;
//!
//! let builder = DataObjectBuilder::new();
//! let data = builder.from_object(&Node::from_json_value(&decoded))?;
//!
//! assert_eq!(data.get_int("id"), Some(123));
//! assert_eq!(data.get_string("id").as_deref(), Some("123"));
//! # Ok::<(), dataobject::DataObjectError>(())
//! ```

pub mod builder;
pub mod data_object;
pub mod error;
pub mod json;
pub mod node;
pub mod value;

mod coerce;

pub use builder::DataObjectBuilder;
pub use data_object::{DataContainer, DataObject, ElementType};
pub use error::{DataObjectError, Result};
pub use json::{ArrayData, JsonData, KvpData, PrimitiveData, PrimitiveKind};
pub use node::Node;
pub use value::Value;
