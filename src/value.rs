use std::fmt;

use serde_json::Value as JsonValue;

use crate::{Error, Result};

/// A single option value.
///
/// Comparison is strict: two scalars are equal only when both the variant and
/// the payload match, so `Str("0")` never equals `Int(0)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::String(value) => Some(Self::Str(value.clone())),
            JsonValue::Bool(value) => Some(Self::Bool(*value)),
            JsonValue::Number(number) => number
                .as_i64()
                .map(Self::Int)
                .or_else(|| number.as_f64().map(Self::Float)),
            JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
        }
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Self::Str(String::new())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

macro_rules! scalar_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

scalar_from_int!(i8, i16, i32, i64, u8, u16, u32);

// Wider integers keep `Int` when they fit and fall back to `Float` otherwise,
// the same way JSON numbers are read.
macro_rules! scalar_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    i64::try_from(value)
                        .map(Self::Int)
                        .unwrap_or(Self::Float(value as f64))
                }
            }
        )*
    };
}

scalar_from_wide_int!(u64, usize, isize);

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

/// The value a select control is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    /// No value at all; nothing can be selected.
    Null,
    Single(Scalar),
    List(Vec<Scalar>),
}

impl Default for BoundValue {
    fn default() -> Self {
        Self::Single(Scalar::default())
    }
}

impl BoundValue {
    /// Builds a bound value from JSON form state.
    ///
    /// Objects and nested arrays are rejected; only scalars, `null` and flat
    /// arrays of scalars describe something a select can hold.
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        match value {
            JsonValue::Null => Ok(Self::Null),
            JsonValue::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    Scalar::from_json(item).ok_or_else(|| {
                        log::debug!("rejected bound value element {index}: {item}");
                        Error::InvalidArgument(format!(
                            "select value element {index} is not a scalar: {item}"
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::List),
            JsonValue::Object(_) => {
                log::debug!("rejected object as bound value: {value}");
                Err(Error::InvalidArgument(format!(
                    "select value must be a scalar or a list of scalars, got object: {value}"
                )))
            }
            scalar => Scalar::from_json(scalar).map(Self::Single).ok_or_else(|| {
                Error::InvalidArgument(format!("unsupported select value: {scalar}"))
            }),
        }
    }

    /// Wraps the value into a sequence and, for single-valued controls,
    /// keeps at most its first element.
    pub fn effective(&self, multiple: bool) -> ValueSet {
        let mut values = match self {
            Self::Null => Vec::new(),
            Self::Single(value) => vec![value.clone()],
            Self::List(values) => values.clone(),
        };
        if !multiple {
            values.truncate(1);
        }
        ValueSet { values }
    }
}

impl TryFrom<JsonValue> for BoundValue {
    type Error = Error;

    fn try_from(value: JsonValue) -> Result<Self> {
        Self::from_json(&value)
    }
}

impl TryFrom<&JsonValue> for BoundValue {
    type Error = Error;

    fn try_from(value: &JsonValue) -> Result<Self> {
        Self::from_json(value)
    }
}

impl From<Scalar> for BoundValue {
    fn from(value: Scalar) -> Self {
        Self::Single(value)
    }
}

impl From<&str> for BoundValue {
    fn from(value: &str) -> Self {
        Self::Single(value.into())
    }
}

impl From<String> for BoundValue {
    fn from(value: String) -> Self {
        Self::Single(value.into())
    }
}

impl From<bool> for BoundValue {
    fn from(value: bool) -> Self {
        Self::Single(value.into())
    }
}

impl From<f64> for BoundValue {
    fn from(value: f64) -> Self {
        Self::Single(value.into())
    }
}

macro_rules! bound_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for BoundValue {
                fn from(value: $ty) -> Self {
                    Self::Single(value.into())
                }
            }
        )*
    };
}

bound_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32);

impl<T: Into<Scalar>> From<Vec<T>> for BoundValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar>, const N: usize> From<[T; N]> for BoundValue {
    fn from(values: [T; N]) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<BoundValue>> From<Option<T>> for BoundValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

/// The values actually matched against option values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueSet {
    values: Vec<Scalar>,
}

impl ValueSet {
    pub fn contains_strict(&self, value: &Scalar) -> bool {
        self.values.iter().any(|candidate| candidate == value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scalar> {
        self.values.iter()
    }
}
