use crate::date;
use crate::interceptor::Interceptor;
use crate::request::RequestContext;
use async_trait::async_trait;
use tracing::info;

/// Logs every request before it reaches its handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLogger;

#[async_trait]
impl Interceptor for RequestLogger {
    async fn on_request(&self, req: &RequestContext<'_, '_>) {
        let remote = req.remote_addr().map_or_else(|| "-".to_owned(), |addr| addr.to_string());
        info!(at = %date::now(), method = %req.method(), uri = %req.uri(), remote = %remote, "incoming request");
    }
}
