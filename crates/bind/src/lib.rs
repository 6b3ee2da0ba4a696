//! Content-negotiated request binding and declarative validation.
//!
//! The pipeline is: [`Encoding::detect`] picks exactly one decode strategy from
//! the request's method, content type and body; [`bind`] decodes and fills a
//! typed record through its static [`Fields`] table; [`validate::Validate`]
//! evaluates the record's static constraint table and reports violations.
//!
//! Nothing here touches the network or keeps state between calls.

mod binder;
mod encoding;
mod error;
mod request;
mod source;

pub mod validate;

pub use binder::{bind, bind_with, Bind, Field, Fields, Keys, Setter};
pub use encoding::Encoding;
pub use error::{BindError, RuleParseError};
pub use request::RawRequest;
pub use source::{FromRawValue, RawValue, Source, INVALID_TYPE};
pub use validate::{Rule, Validate, ValidationFailed, Violation};
