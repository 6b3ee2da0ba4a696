use crate::body::ResponseBody;
use crate::extract::from_request::FromRequest;
use crate::request::RequestContext;
use crate::responder::Responder;
use async_trait::async_trait;
use http::Response;

macro_rules! impl_from_request_for_tuple {
    ($either:ident, $($param:ident)*) => {
        #[async_trait]
        impl<$($param,)*> FromRequest for ($($param,)*)
        where
            $($param: FromRequest,)*
        {
            type Error = $either<$($param::Error,)*>;

            async fn from_request(req: &RequestContext<'_, '_>) -> Result<Self, Self::Error> {
                Ok(($($param::from_request(req).await.map_err($either::$param)?,)*))
            }
        }

        /// The first failed extraction of a tuple
        #[derive(Debug)]
        pub enum $either<$($param,)*> {
            $(
            $param($param),
            )*
        }

        impl<$($param,)*> Responder for $either<$($param,)*>
        where
            $(
            $param: Responder,
            )*
        {
            #[allow(non_snake_case)]
            fn response_to(self, req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
                match self {
                    $(
                        $either::$param($param) => $param.response_to(req),
                    )*
                }
            }
        }
    }
}

impl_from_request_for_tuple! { EitherA, A }
impl_from_request_for_tuple! { EitherAB, A B }
impl_from_request_for_tuple! { EitherABC, A B C }
impl_from_request_for_tuple! { EitherABCD, A B C D }
impl_from_request_for_tuple! { EitherABCDE, A B C D E }
impl_from_request_for_tuple! { EitherABCDEF, A B C D E F }
impl_from_request_for_tuple! { EitherABCDEFG, A B C D E F G }
impl_from_request_for_tuple! { EitherABCDEFGH, A B C D E F G H }

#[cfg(test)]
mod tests {
    use crate::extract::{FromRequest, RemoteAddr};
    use crate::request::{PathParams, RequestContext};
    use crate::template::TemplateStore;
    use bytes::Bytes;
    use http::{Method, Request, Uri};

    #[tokio::test]
    async fn extracts_every_element() {
        let request = Request::builder().method(Method::PUT).uri("/a?b=c").body(Bytes::from_static(b"body")).unwrap();
        let params = PathParams::empty();
        let templates = TemplateStore::empty();
        let req = RequestContext::new(&request, &params, Some("127.0.0.1:9000".parse().unwrap()), &templates);

        let (method, uri, body, remote) = <(Method, Uri, String, RemoteAddr)>::from_request(&req).await.unwrap();

        assert_eq!(method, Method::PUT);
        assert_eq!(uri.path(), "/a");
        assert_eq!(body, "body");
        assert_eq!(remote.0.unwrap().port(), 9000);
    }
}
