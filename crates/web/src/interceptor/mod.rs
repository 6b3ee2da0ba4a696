//! Hooks around every handler invocation.

mod request_logger;

pub use request_logger::RequestLogger;

use crate::body::ResponseBody;
use crate::request::RequestContext;
use async_trait::async_trait;
use http::Response;

#[async_trait]
pub trait Interceptor: Send + Sync {
    async fn on_request(&self, _req: &RequestContext<'_, '_>) {}

    async fn on_response(&self, _req: &RequestContext<'_, '_>, _resp: &mut Response<ResponseBody>) {}
}

/// Runs its interceptors in order
pub struct Interceptors {
    inner: Vec<Box<dyn Interceptor>>,
}

#[async_trait]
impl Interceptor for Interceptors {
    async fn on_request(&self, req: &RequestContext<'_, '_>) {
        for interceptor in &self.inner {
            interceptor.on_request(req).await;
        }
    }

    async fn on_response(&self, req: &RequestContext<'_, '_>, resp: &mut Response<ResponseBody>) {
        for interceptor in &self.inner {
            interceptor.on_response(req, resp).await;
        }
    }
}

impl Interceptors {
    pub fn builder() -> InterceptorsBuilder {
        InterceptorsBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl std::fmt::Debug for Interceptors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interceptors").field("len", &self.inner.len()).finish()
    }
}

pub struct InterceptorsBuilder {
    inner: Vec<Box<dyn Interceptor>>,
}

impl InterceptorsBuilder {
    fn new() -> Self {
        Self { inner: vec![] }
    }

    #[must_use]
    pub fn add_last<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.inner.push(Box::new(interceptor));
        self
    }

    #[must_use]
    pub fn add_first<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.inner.insert(0, Box::new(interceptor));
        self
    }

    pub fn build(self) -> Interceptors {
        Interceptors { inner: self.inner }
    }
}
