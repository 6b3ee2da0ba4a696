//! Response handling module that converts handler results into HTTP responses.
//!
//! The [`Responder`] trait defines how a handler's return value becomes a response.
//! Besides the plain types (strings, unit, `Result`, `Option`, prebuilt responses) it
//! covers the representations handlers usually pick between: [`Json`], [`Html`], a
//! rendered [`View`], [`Negotiated`] (view or JSON depending on `Accept`) and [`Redirect`].
//! Failures go through the [`ErrorReporter`].

use crate::body::ResponseBody;
use crate::error::{AppError, ErrorReporter};
use crate::negotiate;
use crate::request::RequestContext;
use http::header::{CONTENT_TYPE, LOCATION};
use http::{HeaderValue, Response, StatusCode};
use serde::Serialize;
use std::borrow::Cow;
use std::convert::Infallible;

/// A trait for types that can be converted into HTTP responses.
///
/// Types implementing this trait can be returned directly from request handlers.
pub trait Responder {
    fn response_to(self, req: &RequestContext<'_, '_>) -> Response<ResponseBody>;
}

fn with_content_type(body: ResponseBody, content_type: &'static str) -> Response<ResponseBody> {
    let mut response = Response::new(body);
    response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

/// The Ok and Err variants must both implement Responder.
impl<T: Responder, E: Responder> Responder for Result<T, E> {
    fn response_to(self, req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        match self {
            Ok(t) => t.response_to(req),
            Err(e) => e.response_to(req),
        }
    }
}

/// None returns an empty response.
impl<T: Responder> Responder for Option<T> {
    fn response_to(self, req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        match self {
            Some(t) => t.response_to(req),
            None => Response::new(ResponseBody::empty()),
        }
    }
}

/// Passes through pre-built responses.
impl<B> Responder for Response<B>
where
    B: Into<ResponseBody>,
{
    fn response_to(self, _req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        self.map(Into::into)
    }
}

impl<T: Responder> Responder for (StatusCode, T) {
    fn response_to(self, req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        let (status, responder) = self;
        let mut response = responder.response_to(req);
        *response.status_mut() = status;
        response
    }
}

impl<T: Responder> Responder for (T, StatusCode) {
    fn response_to(self, req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        let (responder, status) = self;
        (status, responder).response_to(req)
    }
}

impl<T: Responder> Responder for Box<T> {
    fn response_to(self, req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        (*self).response_to(req)
    }
}

impl Responder for () {
    fn response_to(self, _req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        Response::new(ResponseBody::empty())
    }
}

impl Responder for &'static str {
    fn response_to(self, _req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        with_content_type(ResponseBody::from(self), "text/plain; charset=utf-8")
    }
}

impl Responder for String {
    fn response_to(self, _req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        with_content_type(ResponseBody::from(self), "text/plain; charset=utf-8")
    }
}

impl Responder for Infallible {
    fn response_to(self, _req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        match self {}
    }
}

impl Responder for AppError {
    fn response_to(self, req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        ErrorReporter::report(&self, req)
    }
}

/// Serializes `T` as an `application/json` body.
///
/// # Example
/// ```
/// # use micro_bind_web::Json;
/// # use std::collections::BTreeMap;
/// pub async fn articles() -> Json<BTreeMap<u32, &'static str>> {
///     Json(BTreeMap::from([(1, "Learn Java"), (2, "Learn Rust")]))
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: Serialize> Responder for Json<T> {
    fn response_to(self, req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        match serde_json::to_vec(&self.0) {
            Ok(bytes) => with_content_type(ResponseBody::from(bytes), "application/json"),
            Err(e) => AppError::internal(e).response_to(req),
        }
    }
}

/// An already rendered `text/html` body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Html<T>(pub T);

impl<T: Into<ResponseBody>> Responder for Html<T> {
    fn response_to(self, _req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        with_content_type(self.0.into(), "text/html; charset=utf-8")
    }
}

/// A named template rendered with `data` from the app's template store.
///
/// `data` must serialize to a map; its keys become the template's variables.
#[derive(Debug, Clone)]
pub struct View<T> {
    name: Cow<'static, str>,
    data: T,
}

impl<T: Serialize> View<T> {
    pub fn new(name: impl Into<Cow<'static, str>>, data: T) -> Self {
        Self { name: name.into(), data }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: Serialize> Responder for View<T> {
    fn response_to(self, req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        let mut buf = Vec::with_capacity(1024);
        match req.templates().render(&self.name, &self.data, &mut buf) {
            Ok(()) => Html(buf).response_to(req),
            Err(e) => AppError::from(e).response_to(req),
        }
    }
}

/// Renders the view for clients that prefer `text/html`, serializes the data as JSON otherwise.
#[derive(Debug, Clone)]
pub struct Negotiated<T> {
    view: View<T>,
}

impl<T: Serialize> Negotiated<T> {
    pub fn new(template: impl Into<Cow<'static, str>>, data: T) -> Self {
        Self { view: View::new(template, data) }
    }
}

impl<T: Serialize> Responder for Negotiated<T> {
    fn response_to(self, req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        if negotiate::prefers_html(req.headers()) {
            self.view.response_to(req)
        } else {
            Json(self.view.data).response_to(req)
        }
    }
}

/// Redirects the client to `location`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    status: StatusCode,
    location: Cow<'static, str>,
}

impl Redirect {
    /// 307, the method and body are kept
    pub fn temporary(location: impl Into<Cow<'static, str>>) -> Self {
        Self { status: StatusCode::TEMPORARY_REDIRECT, location: location.into() }
    }

    /// 308, the method and body are kept
    pub fn permanent(location: impl Into<Cow<'static, str>>) -> Self {
        Self { status: StatusCode::PERMANENT_REDIRECT, location: location.into() }
    }

    /// 303, the client follows up with GET
    pub fn see_other(location: impl Into<Cow<'static, str>>) -> Self {
        Self { status: StatusCode::SEE_OTHER, location: location.into() }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl Responder for Redirect {
    fn response_to(self, req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        let location = match HeaderValue::try_from(self.location.as_ref()) {
            Ok(location) => location,
            Err(e) => return AppError::internal(e).response_to(req),
        };

        let mut response = Response::new(ResponseBody::empty());
        *response.status_mut() = self.status;
        response.headers_mut().insert(LOCATION, location);
        response
    }
}
