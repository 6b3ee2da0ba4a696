//! Typed records bound from whichever encoding the request uses.

use crate::error::AppError;
use crate::extract::{Bind, FromRequest, Valid};
use crate::request::RequestContext;
use async_trait::async_trait;
use micro_bind::Validate;

#[async_trait]
impl<T> FromRequest for Bind<T>
where
    T: micro_bind::Bind + Send,
{
    type Error = AppError;

    async fn from_request(req: &RequestContext<'_, '_>) -> Result<Self, Self::Error> {
        Ok(Bind(micro_bind::bind(&req.raw())?))
    }
}

#[async_trait]
impl<T> FromRequest for Valid<T>
where
    T: micro_bind::Bind + Validate + Send,
{
    type Error = AppError;

    async fn from_request(req: &RequestContext<'_, '_>) -> Result<Self, Self::Error> {
        let record: T = micro_bind::bind(&req.raw())?;
        record.check()?;
        Ok(Valid(record))
    }
}
