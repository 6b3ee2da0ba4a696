use crate::extract::{FromRequest, RemoteAddr};
use crate::request::RequestContext;
use async_trait::async_trait;
use http::{HeaderMap, Method, Uri};
use std::convert::Infallible;

#[async_trait]
impl FromRequest for Method {
    type Error = Infallible;

    async fn from_request(req: &RequestContext<'_, '_>) -> Result<Self, Self::Error> {
        Ok(req.method().clone())
    }
}

#[async_trait]
impl FromRequest for Uri {
    type Error = Infallible;

    async fn from_request(req: &RequestContext<'_, '_>) -> Result<Self, Self::Error> {
        Ok(req.uri().clone())
    }
}

#[async_trait]
impl FromRequest for HeaderMap {
    type Error = Infallible;

    async fn from_request(req: &RequestContext<'_, '_>) -> Result<Self, Self::Error> {
        Ok(req.headers().clone())
    }
}

#[async_trait]
impl FromRequest for RemoteAddr {
    type Error = Infallible;

    async fn from_request(req: &RequestContext<'_, '_>) -> Result<Self, Self::Error> {
        Ok(RemoteAddr(req.remote_addr()))
    }
}
