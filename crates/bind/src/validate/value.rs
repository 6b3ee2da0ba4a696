use std::fmt;

/// A borrowed view of one field, as the rules see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// An optional field left `None`
    Absent,
    /// The empty string of a plain field
    Blank,
    /// The `0` of a plain numeric field
    Zero,
    Str(&'a str),
    Int(i64),
}

impl FieldValue<'_> {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Whether the field was left unset; a plain field's zero value counts as unset.
    pub fn is_unset(&self) -> bool {
        matches!(self, FieldValue::Absent | FieldValue::Blank | FieldValue::Zero)
    }

    /// The number rules compare against, zero included.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Zero => Some(0),
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The text rules look at, empty included.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Blank => Some(""),
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Absent | FieldValue::Blank => Ok(()),
            FieldValue::Zero => f.write_str("0"),
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Int(n) => write!(f, "{n}"),
        }
    }
}

/// Exposes a field to the validator.
///
/// Plain values report their zero value as [`FieldValue::Blank`] or
/// [`FieldValue::Zero`]: unset for `required`, but still checked by every other
/// rule. `Option` values are absent only when `None`, so `Some("")` and `Some(0)`
/// count as supplied.
pub trait AsFieldValue {
    fn field_value(&self) -> FieldValue<'_>;
}

impl AsFieldValue for String {
    fn field_value(&self) -> FieldValue<'_> {
        if self.is_empty() { FieldValue::Blank } else { FieldValue::Str(self) }
    }
}

impl AsFieldValue for &str {
    fn field_value(&self) -> FieldValue<'_> {
        if self.is_empty() { FieldValue::Blank } else { FieldValue::Str(self) }
    }
}

macro_rules! impl_as_field_value_for_int {
    ($($int:ty)*) => {
        $(
        impl AsFieldValue for $int {
            fn field_value(&self) -> FieldValue<'_> {
                match i64::try_from(*self) {
                    Ok(0) => FieldValue::Zero,
                    Ok(n) => FieldValue::Int(n),
                    Err(_) => FieldValue::Int(i64::MAX),
                }
            }
        }

        impl AsFieldValue for Option<$int> {
            fn field_value(&self) -> FieldValue<'_> {
                match self.map(i64::try_from) {
                    None => FieldValue::Absent,
                    Some(Ok(n)) => FieldValue::Int(n),
                    Some(Err(_)) => FieldValue::Int(i64::MAX),
                }
            }
        }
        )*
    };
}

impl_as_field_value_for_int! { i8 i16 i32 i64 u8 u16 u32 u64 usize }

impl AsFieldValue for Option<String> {
    fn field_value(&self) -> FieldValue<'_> {
        match self {
            Some(s) => FieldValue::Str(s),
            None => FieldValue::Absent,
        }
    }
}
