//! Decoded request data, flattened to key/value form.
//!
//! Every encoding decodes into a [`Source`]; fields then look their key up in
//! it and convert the [`RawValue`] they find with [`FromRawValue`].

use serde_json::{Map, Value};

/// Type mismatch reason reported by every built-in conversion.
pub const INVALID_TYPE: &str = "invalid type";

#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A decoded JSON object
    Json(Map<String, Value>),
    /// Untyped text pairs from a form, a query string or XML elements, in arrival order
    Text(Vec<(String, String)>),
}

impl Source {
    /// Looks `key` up with a case-sensitive exact match.
    ///
    /// For text sources the first occurrence wins. JSON `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<RawValue<'_>> {
        match self {
            Source::Json(map) => map.get(key).filter(|value| !value.is_null()).map(RawValue::Json),
            Source::Text(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| RawValue::Text(v.as_str())),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Source::Json(map) => map.len(),
            Source::Text(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single value as it arrived, before conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    Text(&'a str),
    Json(&'a Value),
}

impl RawValue<'_> {
    /// Converts this value and stores it into `slot`.
    pub fn assign<T: FromRawValue>(self, slot: &mut T) -> Result<(), &'static str> {
        *slot = T::from_raw(self)?;
        Ok(())
    }
}

/// Conversion from a [`RawValue`] into a field's semantic type.
///
/// Text is parsed; JSON must already carry the matching JSON type.
pub trait FromRawValue: Sized {
    fn from_raw(raw: RawValue<'_>) -> Result<Self, &'static str>;
}

impl FromRawValue for String {
    fn from_raw(raw: RawValue<'_>) -> Result<Self, &'static str> {
        match raw {
            RawValue::Text(text) => Ok(text.to_owned()),
            RawValue::Json(Value::String(s)) => Ok(s.clone()),
            RawValue::Json(_) => Err(INVALID_TYPE),
        }
    }
}

macro_rules! impl_from_raw_for_int {
    ($($int:ty)*) => {
        $(
        impl FromRawValue for $int {
            fn from_raw(raw: RawValue<'_>) -> Result<Self, &'static str> {
                match raw {
                    // empty text binds as zero
                    RawValue::Text("") => Ok(0),
                    RawValue::Text(text) => text.parse().map_err(|_| INVALID_TYPE),
                    RawValue::Json(Value::Number(n)) => n
                        .as_i64()
                        .and_then(|i| <$int>::try_from(i).ok())
                        .or_else(|| n.as_u64().and_then(|u| <$int>::try_from(u).ok()))
                        .ok_or(INVALID_TYPE),
                    RawValue::Json(_) => Err(INVALID_TYPE),
                }
            }
        }
        )*
    };
}

impl_from_raw_for_int! { i8 i16 i32 i64 u8 u16 u32 u64 usize }

impl FromRawValue for f64 {
    fn from_raw(raw: RawValue<'_>) -> Result<Self, &'static str> {
        match raw {
            RawValue::Text("") => Ok(0.0),
            RawValue::Text(text) => text.parse().map_err(|_| INVALID_TYPE),
            RawValue::Json(Value::Number(n)) => n.as_f64().ok_or(INVALID_TYPE),
            RawValue::Json(_) => Err(INVALID_TYPE),
        }
    }
}

impl FromRawValue for bool {
    fn from_raw(raw: RawValue<'_>) -> Result<Self, &'static str> {
        match raw {
            RawValue::Text("" | "0" | "f" | "F" | "false" | "FALSE" | "False") => Ok(false),
            RawValue::Text("1" | "t" | "T" | "true" | "TRUE" | "True") => Ok(true),
            RawValue::Json(Value::Bool(b)) => Ok(*b),
            RawValue::Text(_) | RawValue::Json(_) => Err(INVALID_TYPE),
        }
    }
}

/// Present values bind as `Some`, so `Some("")` stays distinguishable from an absent field.
impl<T: FromRawValue> FromRawValue for Option<T> {
    fn from_raw(raw: RawValue<'_>) -> Result<Self, &'static str> {
        T::from_raw(raw).map(Some)
    }
}
