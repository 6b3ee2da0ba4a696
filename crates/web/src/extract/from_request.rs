use crate::error::AppError;
use crate::request::RequestContext;
use crate::responder::Responder;
use async_trait::async_trait;
use std::convert::Infallible;

/// Builds a handler argument from the request.
///
/// A failed extraction short-circuits the handler; the error is answered through [`Responder`].
#[async_trait]
pub trait FromRequest: Sized + Send + 'static {
    type Error: Responder + Send;

    async fn from_request(req: &RequestContext<'_, '_>) -> Result<Self, Self::Error>;
}

/// Never fails; `None` when `T` could not be extracted.
#[async_trait]
impl<T> FromRequest for Option<T>
where
    T: FromRequest,
{
    type Error = Infallible;

    async fn from_request(req: &RequestContext<'_, '_>) -> Result<Self, Self::Error> {
        Ok(T::from_request(req).await.ok())
    }
}

/// Hands the extraction error to the handler instead of answering it.
#[async_trait]
impl<T> FromRequest for Result<T, AppError>
where
    T: FromRequest<Error = AppError>,
{
    type Error = Infallible;

    async fn from_request(req: &RequestContext<'_, '_>) -> Result<Self, Self::Error> {
        Ok(T::from_request(req).await)
    }
}

#[async_trait]
impl FromRequest for () {
    type Error = Infallible;

    async fn from_request(_req: &RequestContext<'_, '_>) -> Result<Self, Self::Error> {
        Ok(())
    }
}
