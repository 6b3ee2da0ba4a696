//! URL query string and path parameter extraction
//!
//! # Example
//! ```no_run
//! # use serde::Deserialize;
//! # use micro_bind_web::extract::{PathVars, Query};
//!
//! #[derive(Deserialize)]
//! struct Params {
//!     name: String,
//! }
//!
//! async fn handler(Query(params): Query<Params>, vars: PathVars) -> String {
//!     format!("hello {} from {:?}", params.name, vars.get("city"))
//! }
//! ```

use crate::error::AppError;
use crate::extract::{FromRequest, PathVars, Query};
use crate::request::RequestContext;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::convert::Infallible;

/// Deserializes the query string with `serde_qs`; a missing query string reads as empty.
#[async_trait]
impl<T> FromRequest for Query<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Error = AppError;

    async fn from_request(req: &RequestContext<'_, '_>) -> Result<Self, Self::Error> {
        let query = req.uri().query().unwrap_or_default();
        serde_qs::from_str::<T>(query).map(Query).map_err(AppError::bad_request)
    }
}

#[async_trait]
impl FromRequest for PathVars {
    type Error = Infallible;

    async fn from_request(req: &RequestContext<'_, '_>) -> Result<Self, Self::Error> {
        Ok(PathVars::new(req.path_params().iter().map(|(name, value)| (name.to_owned(), value.to_owned())).collect()))
    }
}
