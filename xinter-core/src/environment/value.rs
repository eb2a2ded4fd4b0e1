use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer {
        value: i64
    },
    Boolean {
        value: bool
    },
    Text {
        value: String,
    },
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer { value } => write!(f, "{value}"),
            Value::Boolean { value } => write!(f, "{value}"),
            Value::Text { value } => write!(f, "{value}"),
        }
    }
}

impl Value {
    pub fn _type(&self) -> ValueType {
        match self {
            Self::Integer { .. } => ValueType::Integer,
            Self::Boolean { .. } => ValueType::Boolean,
            Self::Text { .. } => ValueType::Text,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer { value }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean { value }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text { value: value.to_string() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    Boolean,
    Text,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Integer => write!(f, "Integer"),
            ValueType::Boolean => write!(f, "Boolean"),
            ValueType::Text => write!(f, "Text"),
        }
    }
}
