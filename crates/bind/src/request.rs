//! The raw request view the binder works on.
//!
//! A [`RawRequest`] borrows the few pieces of an HTTP request that decoding
//! needs: the method, the declared `Content-Type`, the query string and the
//! body bytes. It is built from any `http::Request` whose body can be seen
//! as a byte slice, so the binder never depends on a particular server.

use http::{Method, Request};

#[derive(Debug, Clone, Copy)]
pub struct RawRequest<'a> {
    method: &'a Method,
    content_type: Option<&'a str>,
    query: Option<&'a str>,
    body: &'a [u8],
}

impl<'a> RawRequest<'a> {
    pub fn new(method: &'a Method, content_type: Option<&'a str>, query: Option<&'a str>, body: &'a [u8]) -> Self {
        Self { method, content_type, query, body }
    }

    /// Borrows the binding-relevant parts of `request`.
    ///
    /// A `Content-Type` that is not visible ASCII is kept out; the detector
    /// then treats a non-empty body as an unsupported encoding.
    pub fn from_http<B: AsRef<[u8]>>(request: &'a Request<B>) -> Self {
        let content_type = request.headers().get(http::header::CONTENT_TYPE).and_then(|value| value.to_str().ok());
        Self::new(request.method(), content_type, request.uri().query(), request.body().as_ref())
    }

    pub fn method(&self) -> &'a Method {
        self.method
    }

    pub fn content_type(&self) -> Option<&'a str> {
        self.content_type
    }

    pub fn query(&self) -> Option<&'a str> {
        self.query
    }

    pub fn body(&self) -> &'a [u8] {
        self.body
    }

    /// Determines if this request carries a body worth decoding.
    ///
    /// Methods that typically don't have bodies never do, whatever bytes were sent:
    /// - GET
    /// - HEAD
    /// - DELETE
    /// - OPTIONS
    /// - CONNECT
    pub fn has_body(&self) -> bool {
        let body_method =
            !matches!(*self.method, Method::GET | Method::HEAD | Method::DELETE | Method::OPTIONS | Method::CONNECT);
        body_method && !self.body.is_empty()
    }
}
