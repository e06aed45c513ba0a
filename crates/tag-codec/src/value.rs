//! [`TagValue`]: one element of the value list bound into a tag.

use std::fmt;

/// A value that can be bound into a tag.
///
/// Every variant has a fixed text rendering, which is what gets packed and
/// what [`decode`](crate::decode) hands back:
///
/// | variant   | rendering                         |
/// |-----------|-----------------------------------|
/// | `Str`     | the string itself                 |
/// | `Int`     | decimal, e.g. `-42`               |
/// | `Decimal` | Rust `f64` display, e.g. `12.5`   |
/// | `Bool`    | `true` / `false`                  |
/// | `Null`    | the literal text `null`           |
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Str(String),
    Int(i128),
    Decimal(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Str(s) => f.write_str(s),
            TagValue::Int(i) => write!(f, "{i}"),
            TagValue::Decimal(d) => write!(f, "{d}"),
            TagValue::Bool(b) => write!(f, "{b}"),
            TagValue::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for TagValue {
    fn from(s: &str) -> Self {
        TagValue::Str(s.to_owned())
    }
}

impl From<String> for TagValue {
    fn from(s: String) -> Self {
        TagValue::Str(s)
    }
}

impl From<&String> for TagValue {
    fn from(s: &String) -> Self {
        TagValue::Str(s.clone())
    }
}

macro_rules! int_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for TagValue {
                fn from(i: $t) -> Self {
                    TagValue::Int(i128::from(i))
                }
            }
        )*
    };
}

int_from!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<f64> for TagValue {
    fn from(d: f64) -> Self {
        TagValue::Decimal(d)
    }
}

impl From<bool> for TagValue {
    fn from(b: bool) -> Self {
        TagValue::Bool(b)
    }
}

impl<T: Into<TagValue>> From<Option<T>> for TagValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(TagValue::Null, Into::into)
    }
}
