use crate::body::ResponseBody;
use crate::extract::FromRequest;
use crate::fn_trait::FnTrait;
use crate::request::RequestContext;
use crate::responder::Responder;
use async_trait::async_trait;
use http::Response;
use std::marker::PhantomData;

/// Serves one request; failures are already turned into responses.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn invoke(&self, req: &RequestContext<'_, '_>) -> Response<ResponseBody>;
}

#[async_trait]
impl<H: RequestHandler + ?Sized> RequestHandler for Box<H> {
    async fn invoke(&self, req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        (**self).invoke(req).await
    }
}

/// a `FnTrait` holder which represents any async Fn
pub struct FnHandler<F, Args> {
    f: F,
    _phantom: PhantomData<fn(Args)>,
}

impl<F, Args> FnHandler<F, Args>
where
    F: FnTrait<Args>,
{
    fn new(f: F) -> Self {
        Self { f, _phantom: PhantomData }
    }
}

impl<F, Args> std::fmt::Debug for FnHandler<F, Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHandler").field("f", &std::any::type_name::<F>()).finish()
    }
}

/// Turns an async fn whose arguments are all [`FromRequest`] and whose output is a [`Responder`] into a handler.
pub fn handler_fn<F, Args>(f: F) -> FnHandler<F, Args>
where
    F: FnTrait<Args>,
{
    FnHandler::new(f)
}

#[async_trait]
impl<F, Args> RequestHandler for FnHandler<F, Args>
where
    F: FnTrait<Args>,
    F::Output: Responder,
    Args: FromRequest,
{
    async fn invoke(&self, req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        let args = match Args::from_request(req).await {
            Ok(args) => args,
            Err(e) => return e.response_to(req),
        };
        self.f.call(args).await.response_to(req)
    }
}
