//! The request entry point a server hands every request to.

use crate::body::ResponseBody;
use crate::error::AppError;
use crate::handler::{RequestHandler, handler_fn};
use crate::interceptor::{Interceptor, Interceptors, InterceptorsBuilder};
use crate::request::RequestContext;
use crate::router::{Router, RouterItem};
use crate::template::TemplateStore;
use bytes::Bytes;
use http::{Request, Response};
use std::net::SocketAddr;
use thiserror::Error;

pub struct AppBuilder {
    router: Option<Router>,
    default_handler: Option<Box<dyn RequestHandler>>,
    interceptors: InterceptorsBuilder,
    templates: Option<TemplateStore>,
}

impl AppBuilder {
    fn new() -> Self {
        Self { router: None, default_handler: None, interceptors: Interceptors::builder(), templates: None }
    }

    #[must_use]
    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    /// Serves requests no route matched; answers 404 when unset
    #[must_use]
    pub fn default_handler(mut self, request_handler: impl RequestHandler + 'static) -> Self {
        self.default_handler = Some(Box::new(request_handler));
        self
    }

    /// Appends to the interceptor chain
    #[must_use]
    pub fn interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors = self.interceptors.add_last(interceptor);
        self
    }

    #[must_use]
    pub fn templates(mut self, templates: TemplateStore) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn build(self) -> Result<App, AppBuildError> {
        let router = self.router.ok_or(AppBuildError::MissingRouter)?;
        let default_handler = self.default_handler.unwrap_or_else(|| Box::new(handler_fn(not_found)));
        Ok(App {
            router,
            default_handler,
            interceptors: self.interceptors.build(),
            templates: self.templates.unwrap_or_else(TemplateStore::empty),
        })
    }
}

async fn not_found() -> AppError {
    AppError::not_found()
}

#[derive(Error, Debug)]
pub enum AppBuildError {
    #[error("router must be set")]
    MissingRouter,
}

/// Routes, intercepts and invokes handlers; holds no per-request state.
pub struct App {
    router: Router,
    default_handler: Box<dyn RequestHandler>,
    interceptors: Interceptors,
    templates: TemplateStore,
}

impl App {
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    /// Serves one request.
    ///
    /// The first route item on the matched path whose filter accepts the request handles it,
    /// the default handler otherwise. Failures come back as error responses, never as `Err`.
    pub async fn call(&self, request: Request<Bytes>, remote_addr: Option<SocketAddr>) -> Response<ResponseBody> {
        let route_result = self.router.at(request.uri().path());
        let req = RequestContext::new(&request, route_result.params(), remote_addr, &self.templates);

        let handler = route_result
            .router_items()
            .iter()
            .find(|item| item.filter().matches(&req))
            .map_or(self.default_handler.as_ref(), RouterItem::handler);

        self.interceptors.on_request(&req).await;
        let mut response = handler.invoke(&req).await;
        self.interceptors.on_response(&req, &mut response).await;
        response
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("router", &self.router)
            .field("interceptors", &self.interceptors)
            .field("templates", &self.templates)
            .finish_non_exhaustive()
    }
}
