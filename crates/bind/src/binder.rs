//! Typed binding of decoded request data.
//!
//! A record type implements [`Bind`] by handing out a static [`Fields`] table:
//! one [`Field`] per struct field, each carrying its key for every encoding and
//! a setter. [`bind`] detects the encoding, decodes once, then walks the table
//! in declaration order.
//!
//! # Example
//! ```
//! use micro_bind::{bind, Bind, Field, Fields, RawRequest};
//! use once_cell::sync::Lazy;
//!
//! #[derive(Debug, Default)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! impl Bind for User {
//!     fn fields() -> &'static Fields<Self> {
//!         static FIELDS: Lazy<Fields<User>> = Lazy::new(|| {
//!             Fields::new()
//!                 .field(Field::new("name", |u: &mut User, raw| raw.assign(&mut u.name)).xml("Name"))
//!                 .field(Field::new("age", |u: &mut User, raw| raw.assign(&mut u.age)).xml("Age"))
//!         });
//!         &FIELDS
//!     }
//! }
//!
//! let method = http::Method::GET;
//! let user: User = bind(&RawRequest::new(&method, None, Some("name=sam&age=19"), b"")).unwrap();
//! assert_eq!(user.age, 19);
//! ```

use crate::encoding::Encoding;
use crate::error::BindError;
use crate::request::RawRequest;
use crate::source::{RawValue, Source};
use tracing::debug;

/// Stores a converted raw value into its field; the error is the conversion reason.
pub type Setter<T> = fn(&mut T, RawValue<'_>) -> Result<(), &'static str>;

/// A record that can be bound from any supported encoding.
pub trait Bind: Default + Sized + 'static {
    fn fields() -> &'static Fields<Self>;
}

/// The source key of one field in every encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keys {
    pub json: &'static str,
    pub xml: &'static str,
    pub form: &'static str,
    pub query: &'static str,
}

impl Keys {
    /// Uses the same key in every encoding.
    pub const fn all(key: &'static str) -> Self {
        Self { json: key, xml: key, form: key, query: key }
    }

    pub fn get(&self, encoding: Encoding) -> &'static str {
        match encoding {
            Encoding::Json => self.json,
            Encoding::Xml => self.xml,
            Encoding::Form => self.form,
            Encoding::Query => self.query,
        }
    }
}

pub struct Field<T> {
    name: &'static str,
    keys: Keys,
    setter: Setter<T>,
}

impl<T> Field<T> {
    /// Creates a field whose key defaults to `name` for every encoding.
    pub fn new(name: &'static str, setter: Setter<T>) -> Self {
        Self { name, keys: Keys::all(name), setter }
    }

    #[must_use]
    pub fn json(mut self, key: &'static str) -> Self {
        self.keys.json = key;
        self
    }

    #[must_use]
    pub fn xml(mut self, key: &'static str) -> Self {
        self.keys.xml = key;
        self
    }

    #[must_use]
    pub fn form(mut self, key: &'static str) -> Self {
        self.keys.form = key;
        self
    }

    #[must_use]
    pub fn query(mut self, key: &'static str) -> Self {
        self.keys.query = key;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    fn apply(&self, record: &mut T, source: &Source, encoding: Encoding) -> Result<(), BindError> {
        match source.get(self.keys.get(encoding)) {
            Some(raw) => (self.setter)(record, raw).map_err(|reason| BindError::invalid_field(self.name, reason)),
            None => Ok(()),
        }
    }
}

impl<T> std::fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field").field("name", &self.name).field("keys", &self.keys).finish_non_exhaustive()
    }
}

/// The ordered field table of a record type
#[derive(Debug)]
pub struct Fields<T> {
    fields: Vec<Field<T>>,
}

impl<T> Fields<T> {
    pub fn new() -> Self {
        Self { fields: vec![] }
    }

    #[must_use]
    pub fn field(mut self, field: Field<T>) -> Self {
        self.fields.push(field);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field<T>> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T> Default for Fields<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Bind> Fields<T> {
    /// Builds a record from an already decoded source.
    ///
    /// Fields absent from `source` keep their default value.
    pub fn populate(&self, source: &Source, encoding: Encoding) -> Result<T, BindError> {
        let mut record = T::default();
        for field in &self.fields {
            field.apply(&mut record, source, encoding)?;
        }
        Ok(record)
    }
}

/// Detects the request's encoding and binds it into a fresh `T`.
pub fn bind<T: Bind>(req: &RawRequest<'_>) -> Result<T, BindError> {
    let encoding = Encoding::detect(req)?;
    bind_with(req, encoding)
}

/// Binds `req` with an encoding chosen by the caller.
pub fn bind_with<T: Bind>(req: &RawRequest<'_>, encoding: Encoding) -> Result<T, BindError> {
    let source = encoding.decode(req)?;
    T::fields().populate(&source, encoding).inspect_err(|e| {
        debug!(%encoding, cause = %e, "bind failed");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use once_cell::sync::Lazy;

    static GET: Method = Method::GET;

    #[derive(Debug, Default, PartialEq)]
    struct Point {
        x: i32,
        label: Option<String>,
    }

    impl Bind for Point {
        fn fields() -> &'static Fields<Self> {
            static FIELDS: Lazy<Fields<Point>> = Lazy::new(|| {
                Fields::new()
                    .field(Field::new("x", |p: &mut Point, raw| raw.assign(&mut p.x)).xml("X").query("px"))
                    .field(Field::new("label", |p: &mut Point, raw| raw.assign(&mut p.label)))
            });
            &FIELDS
        }
    }

    #[test]
    fn keys_follow_encoding() {
        let field = &Point::fields().iter().next().unwrap();
        assert_eq!(field.keys().get(Encoding::Json), "x");
        assert_eq!(field.keys().get(Encoding::Xml), "X");
        assert_eq!(field.keys().get(Encoding::Form), "x");
        assert_eq!(field.keys().get(Encoding::Query), "px");
    }

    #[test]
    fn missing_fields_keep_defaults() {
        let point: Point = bind(&RawRequest::new(&GET, None, Some("px=3"), b"")).unwrap();
        assert_eq!(point, Point { x: 3, label: None });
    }

    #[test]
    fn query_uses_query_key_only() {
        let point: Point = bind(&RawRequest::new(&GET, None, Some("x=3"), b"")).unwrap();
        assert_eq!(point.x, 0);
    }

    #[test]
    fn conversion_failure_names_field() {
        let err = bind::<Point>(&RawRequest::new(&GET, None, Some("px=three"), b"")).unwrap_err();
        assert_eq!(err, BindError::invalid_field("x", "invalid type"));
        assert_eq!(err.field(), Some("x"));
    }

    #[test]
    fn bind_with_forced_encoding() {
        let req = RawRequest::new(&GET, None, Some("px=1"), br#"{"x": 9}"#);
        let point: Point = bind_with(&req, Encoding::Json).unwrap();
        assert_eq!(point.x, 9);
    }
}
