//! Handler arguments built from the request.
//!
//! Every handler argument implements [`FromRequest`]. Besides the plain request parts
//! (`Method`, `Uri`, `HeaderMap`, `Bytes`, `String`) this module provides the typed
//! extractors below.

mod extract_bind;
mod extract_body;
mod extract_header;
mod extract_tuple;
mod extract_url;
mod from_request;

pub use extract_tuple::*;
pub use from_request::FromRequest;

use std::net::SocketAddr;

/// A record bound from the request, whatever its encoding, without validation.
///
/// # Example
/// ```no_run
/// # use micro_bind::{Bind as Bindable, Field, Fields};
/// # use micro_bind_web::extract::Bind;
/// # use micro_bind_web::Json;
/// # use once_cell::sync::Lazy;
/// #[derive(Debug, Default, serde::Serialize)]
/// struct Student {
///     id: String,
/// }
///
/// impl Bindable for Student {
///     fn fields() -> &'static Fields<Self> {
///         static FIELDS: Lazy<Fields<Student>> =
///             Lazy::new(|| Fields::new().field(Field::new("id", |s: &mut Student, raw| raw.assign(&mut s.id))));
///         &FIELDS
///     }
/// }
///
/// pub async fn echo(Bind(student): Bind<Student>) -> Json<Student> {
///     Json(student)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bind<T>(pub T);

/// A bound record that also passed its validation rules.
///
/// Extraction fails with [`AppError::Validation`](crate::AppError::Validation) when any rule is violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Valid<T>(pub T);

/// Represented as url query data, deserialized with `serde_qs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query<T>(pub T);

/// The matched route's path parameters, owned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathVars {
    vars: Vec<(String, String)>,
}

impl PathVars {
    fn new(vars: Vec<(String, String)>) -> Self {
        Self { vars }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.iter().find(|(n, _)| n == name).map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// The peer address, when the server knows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteAddr(pub Option<SocketAddr>);
