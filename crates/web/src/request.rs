//! Request handling module that provides access to HTTP request information and path parameters.
//!
//! - `RequestContext`: the request, its path parameters, the peer address and the app's templates
//! - `PathParams`: URL path parameters extracted from request paths

use crate::template::TemplateStore;
use bytes::Bytes;
use http::{HeaderMap, Method, Request, Uri};
use matchit::Params;
use micro_bind::RawRequest;
use std::net::SocketAddr;

/// Everything a handler may look at while serving one request.
///
/// The lifetime parameters ensure that the request context does not outlive the app
/// or the request data it references.
#[derive(Debug)]
pub struct RequestContext<'server: 'req, 'req> {
    request: &'req Request<Bytes>,
    path_params: &'req PathParams<'server, 'req>,
    remote_addr: Option<SocketAddr>,
    templates: &'server TemplateStore,
}

impl<'server, 'req> RequestContext<'server, 'req> {
    pub fn new(
        request: &'req Request<Bytes>,
        path_params: &'req PathParams<'server, 'req>,
        remote_addr: Option<SocketAddr>,
        templates: &'server TemplateStore,
    ) -> Self {
        Self { request, path_params, remote_addr, templates }
    }

    pub fn request(&self) -> &'req Request<Bytes> {
        self.request
    }

    pub fn method(&self) -> &'req Method {
        self.request.method()
    }

    pub fn uri(&self) -> &'req Uri {
        self.request.uri()
    }

    pub fn headers(&self) -> &'req HeaderMap {
        self.request.headers()
    }

    /// The raw, undecoded body
    pub fn body(&self) -> &'req Bytes {
        self.request.body()
    }

    /// The view of this request the binder decodes from
    pub fn raw(&self) -> RawRequest<'req> {
        RawRequest::from_http(self.request)
    }

    pub fn path_params(&self) -> &'req PathParams<'server, 'req> {
        self.path_params
    }

    /// The peer address, when the server knows it
    pub fn remote_addr(&self) -> Option<SocketAddr> {
        self.remote_addr
    }

    pub fn templates(&self) -> &'server TemplateStore {
        self.templates
    }
}

/// Represents path parameters extracted from the URL path of an HTTP request.
///
/// In the path "/users/{id}", "id" is a path parameter; in "/files/{*path}" the
/// catch-all "path" takes the rest of the URL.
#[derive(Debug, Clone)]
pub struct PathParams<'server, 'req> {
    kind: PathParamsKind<'server, 'req>,
}

#[derive(Debug, Clone)]
enum PathParamsKind<'server, 'req> {
    None,
    Params(Params<'server, 'req>),
}

impl<'server, 'req> PathParams<'server, 'req> {
    #[inline]
    fn new(params: Params<'server, 'req>) -> Self {
        if params.is_empty() { Self::empty() } else { Self { kind: PathParamsKind::Params(params) } }
    }

    #[inline]
    pub fn empty() -> Self {
        Self { kind: PathParamsKind::None }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        match &self.kind {
            PathParamsKind::None => true,
            PathParamsKind::Params(params) => params.is_empty(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        match &self.kind {
            PathParamsKind::None => 0,
            PathParamsKind::Params(params) => params.len(),
        }
    }

    /// Gets the value of a path parameter by its name
    #[inline]
    pub fn get(&self, key: impl AsRef<str>) -> Option<&'req str> {
        match &self.kind {
            PathParamsKind::Params(params) => params.get(key),
            PathParamsKind::None => None,
        }
    }

    /// Name and value pairs, in route order
    pub fn iter(&self) -> impl Iterator<Item = (&'server str, &'req str)> + '_ {
        let params = match &self.kind {
            PathParamsKind::Params(params) => Some(params.iter()),
            PathParamsKind::None => None,
        };
        params.into_iter().flatten()
    }
}

impl<'server, 'req> From<Params<'server, 'req>> for PathParams<'server, 'req> {
    fn from(params: Params<'server, 'req>) -> Self {
        PathParams::new(params)
    }
}

#[cfg(test)]
mod tests {
    use super::PathParams;

    #[test]
    fn params_from_route() {
        let mut router = matchit::Router::new();
        router.insert("/page3/{name}/{*message}", ()).unwrap();

        let matched = router.at("/page3/tim/welcome/home").unwrap();
        let params = PathParams::from(matched.params);

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("name"), Some("tim"));
        assert_eq!(params.get("message"), Some("welcome/home"));
        assert_eq!(params.iter().collect::<Vec<_>>(), vec![("name", "tim"), ("message", "welcome/home")]);
    }

    #[test]
    fn empty_params() {
        let params = PathParams::empty();
        assert!(params.is_empty());
        assert_eq!(params.get("name"), None);
        assert_eq!(params.iter().count(), 0);
    }
}
