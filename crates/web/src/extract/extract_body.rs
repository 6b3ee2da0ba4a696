use crate::error::AppError;
use crate::extract::FromRequest;
use crate::request::RequestContext;
use async_trait::async_trait;
use bytes::Bytes;
use std::convert::Infallible;

#[async_trait]
impl FromRequest for Bytes {
    type Error = Infallible;

    async fn from_request(req: &RequestContext<'_, '_>) -> Result<Self, Self::Error> {
        Ok(req.body().clone())
    }
}

#[async_trait]
impl FromRequest for String {
    type Error = AppError;

    async fn from_request(req: &RequestContext<'_, '_>) -> Result<Self, Self::Error> {
        // TODO: honor the charset parameter of Content-Type instead of assuming utf-8
        String::from_utf8(req.body().to_vec()).map_err(|e| AppError::bad_request(format!("request body is not utf8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::extract::FromRequest;
    use crate::request::{PathParams, RequestContext};
    use crate::template::TemplateStore;
    use bytes::Bytes;
    use http::{Method, Request, StatusCode};

    async fn extract<T: FromRequest>(body: &'static [u8]) -> Result<T, T::Error> {
        let request = Request::builder().method(Method::POST).body(Bytes::from_static(body)).unwrap();
        let params = PathParams::empty();
        let templates = TemplateStore::empty();
        let req = RequestContext::new(&request, &params, None, &templates);
        T::from_request(&req).await
    }

    #[tokio::test]
    async fn body_as_string() {
        assert_eq!(extract::<String>(b"hello").await.unwrap(), "hello");
        assert_eq!(extract::<Bytes>(b"hello").await.unwrap(), Bytes::from_static(b"hello"));
    }

    #[tokio::test]
    async fn invalid_utf8() {
        let Err(e) = extract::<String>(&[0xff, 0xfe]).await else {
            panic!("expected error");
        };
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(e, AppError::Http { .. }));
    }
}
