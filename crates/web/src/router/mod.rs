pub mod filter;

use crate::handler::RequestHandler;
use crate::request::PathParams;

use filter::{AllFilter, Filter};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

type RouterFilter = dyn Filter + Send + Sync + 'static;
type InnerRouter<T> = matchit::Router<T>;

/// Maps request paths to the handlers registered on them
pub struct Router {
    inner_router: InnerRouter<Vec<RouterItem>>,
}

/// A router item containing a filter and handler
pub struct RouterItem {
    filter: Box<RouterFilter>,
    handler: Box<dyn RequestHandler>,
}

/// Result of matching a route, containing matched items and path parameters
pub struct RouteResult<'router, 'req> {
    router_items: &'router [RouterItem],
    params: PathParams<'router, 'req>,
}

#[derive(Error, Debug)]
pub enum RouterBuildError {
    #[error("invalid route '{route}': {source}")]
    InvalidRoute { route: String, source: matchit::InsertError },
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Matches a path against the router's routes; an unknown path yields an empty result.
    pub fn at<'router, 'req>(&'router self, path: &'req str) -> RouteResult<'router, 'req> {
        match self.inner_router.at(path) {
            Ok(matched) => RouteResult { router_items: matched.value.as_slice(), params: matched.params.into() },
            Err(e) => {
                debug!(path, cause = %e, "no route matched");
                RouteResult::empty()
            }
        }
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl RouterItem {
    pub fn filter(&self) -> &RouterFilter {
        self.filter.as_ref()
    }

    pub fn handler(&self) -> &dyn RequestHandler {
        self.handler.as_ref()
    }
}

impl<'router, 'req> RouteResult<'router, 'req> {
    fn empty() -> Self {
        Self { router_items: &[], params: PathParams::empty() }
    }

    /// Returns true if no routes were matched
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.router_items.is_empty()
    }

    pub fn params(&self) -> &PathParams<'router, 'req> {
        &self.params
    }

    pub fn router_items(&self) -> &'router [RouterItem] {
        self.router_items
    }
}

/// Collects routes; several items may share a path and are tried in registration order.
pub struct RouterBuilder {
    data: HashMap<String, Vec<RouterItemBuilder>>,
}

impl RouterBuilder {
    fn new() -> Self {
        Self { data: HashMap::new() }
    }

    #[must_use]
    pub fn route(mut self, route: impl Into<String>, item_builder: RouterItemBuilder) -> Self {
        let vec = self.data.entry(route.into()).or_default();
        vec.push(item_builder);
        self
    }

    pub fn build(self) -> Result<Router, RouterBuildError> {
        let mut inner_router = InnerRouter::new();

        for (path, items) in self.data {
            let router_items = items.into_iter().map(RouterItemBuilder::build).collect::<Vec<_>>();
            inner_router
                .insert(path.clone(), router_items)
                .map_err(|source| RouterBuildError::InvalidRoute { route: path, source })?;
        }

        Ok(Router { inner_router })
    }
}

macro_rules! method_router_filter {
    ($method:ident, $method_name:ident) => {
        #[doc = concat!("Routes ", stringify!($method), " requests to `handler`.")]
        pub fn $method<H: RequestHandler + 'static>(handler: H) -> RouterItemBuilder {
            let mut filters = filter::all_filter();
            filters.and(filter::$method_name());
            RouterItemBuilder { filters, handler: Box::new(handler) }
        }
    };
}

method_router_filter!(get, get_method);
method_router_filter!(post, post_method);
method_router_filter!(put, put_method);
method_router_filter!(delete, delete_method);
method_router_filter!(head, head_method);
method_router_filter!(options, options_method);
method_router_filter!(connect, connect_method);
method_router_filter!(patch, patch_method);
method_router_filter!(trace, trace_method);

/// Routes requests of every method to `handler`.
pub fn any<H: RequestHandler + 'static>(handler: H) -> RouterItemBuilder {
    RouterItemBuilder { filters: filter::all_filter(), handler: Box::new(handler) }
}

pub struct RouterItemBuilder {
    filters: AllFilter,
    handler: Box<dyn RequestHandler>,
}

impl RouterItemBuilder {
    #[must_use]
    pub fn with<F: Filter + Send + Sync + 'static>(mut self, filter: F) -> Self {
        self.filters.and(filter);
        self
    }

    fn build(self) -> RouterItem {
        RouterItem { filter: Box::new(self.filters), handler: self.handler }
    }
}
