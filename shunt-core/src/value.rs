//! Message body values.

use crate::types::TypeTag;
use std::fmt;

/// A dynamically typed message body.
///
/// The runtime source type used for converter lookup is [`Value::type_tag`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// Plain text.
    Text(String),
    /// Signed integer.
    Int(i64),
    /// Boolean.
    Bool(bool),
    /// A list-like body.
    List(List),
    /// A record with named fields.
    Record(Record),
}

impl Value {
    /// Text value.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// A list of the given concrete list type.
    pub fn list(tag: TypeTag, items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(List {
            tag,
            items: items.into_iter().collect(),
        })
    }

    /// A general-purpose [`TypeTag::ARRAY_LIST`].
    pub fn array_list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::list(TypeTag::ARRAY_LIST, items)
    }

    /// A framework [`TypeTag::CONTENTS_LIST`] container.
    pub fn contents_list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::list(TypeTag::CONTENTS_LIST, items)
    }

    /// The runtime type of this value.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::NULL,
            Value::Text(_) => TypeTag::TEXT,
            Value::Int(_) => TypeTag::INT,
            Value::Bool(_) => TypeTag::BOOL,
            Value::List(list) => list.tag,
            Value::Record(record) => record.tag,
        }
    }

    /// Whether this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The integer, if this is an integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The boolean, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The list, if this is a list value.
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// The textual representation used by the display fallback.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Text(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::List(list) => list.fmt(f),
            Value::Record(record) => record.fmt(f),
        }
    }
}

/// A list body tagged with its concrete list type.
#[derive(Clone, Debug, PartialEq)]
pub struct List {
    tag: TypeTag,
    items: Vec<Value>,
}

impl List {
    /// Concrete list type.
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// The elements.
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// First element, if any.
    pub fn first(&self) -> Option<&Value> {
        self.items.first()
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}

/// A record with ordered, named fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    tag: TypeTag,
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record of type `tag`.
    pub fn new(tag: TypeTag) -> Self {
        Self {
            tag,
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Record type.
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.tag)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str("]")
    }
}
