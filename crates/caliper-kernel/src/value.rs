//! Property values held by a container.

use crate::container::PropertyContainer;
use crate::duration::IsoDuration;
use chrono::{DateTime, Utc};

/// Free-form string-keyed JSON data (`extensions`, `messageParameters`).
pub type Extensions = serde_json::Map<String, serde_json::Value>;

/// A candidate or stored property value.
///
/// Candidates may be loosely shaped (`Text` for a timestamp, `Integer` for a
/// float); once stored they are normalized by the validator.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Duration(IsoDuration),
    Node(Box<PropertyContainer>),
    List(Vec<Value>),
    Map(Extensions),
}

impl Value {
    /// Short label of the value's shape, used in mismatch errors.
    pub fn type_label(&self) -> String {
        match self {
            Self::Text(_) => "string".to_string(),
            Self::Integer(_) => "integer".to_string(),
            Self::Float(_) => "float".to_string(),
            Self::Boolean(_) => "boolean".to_string(),
            Self::DateTime(_) => "date-time".to_string(),
            Self::Duration(_) => "duration".to_string(),
            Self::Node(node) => node.kind().to_string(),
            Self::List(_) => "list".to_string(),
            Self::Map(_) => "map".to_string(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&PropertyContainer> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

impl From<IsoDuration> for Value {
    fn from(value: IsoDuration) -> Self {
        Self::Duration(value)
    }
}

impl From<PropertyContainer> for Value {
    fn from(value: PropertyContainer) -> Self {
        Self::Node(Box::new(value))
    }
}

impl From<Extensions> for Value {
    fn from(value: Extensions) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}
