//! Request filtering module that provides composable request filters.
//!
//! Several routes may share one path; their filters decide which one serves a request.
//! Filters look at the HTTP method, headers or the declared content type, and compose
//! with AND/OR logic.
//!
//! # Examples
//!
//! ```
//! use micro_bind_web::router::filter::{all_filter, content_type, post_method};
//!
//! // POSTed JSON only
//! let mut json_posts = all_filter();
//! json_posts.and(post_method()).and(content_type(mime::APPLICATION_JSON));
//! ```

use crate::request::RequestContext;
use http::header::CONTENT_TYPE;
use http::{HeaderName, HeaderValue, Method};
use mime::Mime;

/// Core trait for request filtering.
///
/// Filters can be composed using [`AllFilter`] and [`AnyFilter`].
pub trait Filter: Send + Sync {
    /// Returns `true` if the request should be allowed, `false` otherwise.
    fn matches(&self, req: &RequestContext<'_, '_>) -> bool;
}

struct FnFilter<F: Fn(&RequestContext<'_, '_>) -> bool>(F);

impl<F: Fn(&RequestContext<'_, '_>) -> bool + Send + Sync> Filter for FnFilter<F> {
    fn matches(&self, req: &RequestContext<'_, '_>) -> bool {
        (self.0)(req)
    }
}

/// Creates a new filter from a closure.
///
/// # Example
/// ```
/// use micro_bind_web::router::filter::fn_filter;
///
/// let custom_filter = fn_filter(|req| req.uri().path().starts_with("/api"));
/// ```
pub fn fn_filter<F>(f: F) -> impl Filter
where
    F: Fn(&RequestContext<'_, '_>) -> bool + Send + Sync,
{
    FnFilter(f)
}

pub fn true_filter() -> TrueFilter {
    TrueFilter
}

pub fn false_filter() -> FalseFilter {
    FalseFilter
}

#[derive(Debug, Clone, Copy)]
pub struct TrueFilter;
impl Filter for TrueFilter {
    #[inline]
    fn matches(&self, _req: &RequestContext<'_, '_>) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FalseFilter;
impl Filter for FalseFilter {
    #[inline]
    fn matches(&self, _req: &RequestContext<'_, '_>) -> bool {
        false
    }
}

/// Creates a new OR-composed filter chain.
pub fn any_filter() -> AnyFilter {
    AnyFilter::new()
}

/// Compose filters with OR logic.
///
/// An empty filter chain returns true.
pub struct AnyFilter {
    filters: Vec<Box<dyn Filter>>,
}

impl AnyFilter {
    fn new() -> Self {
        Self { filters: vec![] }
    }

    pub fn or<F: Filter + 'static>(&mut self, filter: F) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl Filter for AnyFilter {
    fn matches(&self, req: &RequestContext<'_, '_>) -> bool {
        self.filters.is_empty() || self.filters.iter().any(|filter| filter.matches(req))
    }
}

/// Creates a new AND-composed filter chain.
pub fn all_filter() -> AllFilter {
    AllFilter::new()
}

/// Compose filters with AND logic.
///
/// An empty filter chain returns true.
pub struct AllFilter {
    filters: Vec<Box<dyn Filter>>,
}

impl AllFilter {
    fn new() -> Self {
        Self { filters: vec![] }
    }

    pub fn and<F: Filter + 'static>(&mut self, filter: F) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl Filter for AllFilter {
    fn matches(&self, req: &RequestContext<'_, '_>) -> bool {
        self.filters.iter().all(|filter| filter.matches(req))
    }
}

/// A filter that matches one HTTP method.
#[derive(Debug, Clone)]
pub struct MethodFilter(Method);

impl Filter for MethodFilter {
    fn matches(&self, req: &RequestContext<'_, '_>) -> bool {
        self.0.eq(req.method())
    }
}

macro_rules! method_filter {
    ($method:ident, $upper_case_method:ident) => {
        #[doc = concat!("Creates a filter that matches HTTP ", stringify!($upper_case_method), " requests.")]
        #[inline]
        pub fn $method() -> MethodFilter {
            MethodFilter(Method::$upper_case_method)
        }
    };
}

method_filter!(get_method, GET);
method_filter!(post_method, POST);
method_filter!(put_method, PUT);
method_filter!(delete_method, DELETE);
method_filter!(head_method, HEAD);
method_filter!(options_method, OPTIONS);
method_filter!(connect_method, CONNECT);
method_filter!(patch_method, PATCH);
method_filter!(trace_method, TRACE);

/// Creates a filter that matches a specific header name and value.
#[inline]
pub fn header(header_name: HeaderName, header_value: HeaderValue) -> HeaderFilter {
    HeaderFilter(header_name, header_value)
}

/// A filter that matches one header value exactly.
#[derive(Debug, Clone)]
pub struct HeaderFilter(HeaderName, HeaderValue);

impl Filter for HeaderFilter {
    fn matches(&self, req: &RequestContext<'_, '_>) -> bool {
        req.headers().get(&self.0).is_some_and(|value| self.1.eq(value))
    }
}

/// Creates a filter on the essence of the declared `Content-Type`, parameters such as charset are ignored.
#[inline]
pub fn content_type(mime: Mime) -> ContentTypeFilter {
    ContentTypeFilter(mime)
}

#[derive(Debug, Clone)]
pub struct ContentTypeFilter(Mime);

impl Filter for ContentTypeFilter {
    fn matches(&self, req: &RequestContext<'_, '_>) -> bool {
        req.headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<Mime>().ok())
            .is_some_and(|declared| declared.essence_str() == self.0.essence_str())
    }
}
