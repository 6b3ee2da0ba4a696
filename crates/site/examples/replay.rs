//! Replays the site's sample requests in-process and prints each response.
//!
//! ```sh
//! cargo run -p micro-bind-site --example replay
//! ```

use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{Method, Request};
use micro_bind_site::{TEMPLATES, app};
use micro_bind_web::{TemplateConfig, logging};
use std::net::SocketAddr;
use tracing::Level;

fn request(method: Method, uri: &str, content_type: Option<&str>, body: &'static str) -> Request<Bytes> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    builder.body(Bytes::from_static(body.as_bytes())).expect("valid request")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(Level::INFO)?;

    let site = app(TemplateConfig::new(TEMPLATES).live_reload(true))?;
    let remote: SocketAddr = "127.0.0.1:9000".parse()?;

    let mut browser_error = request(Method::POST, "/student", Some("text/plain"), "id=1");
    browser_error.headers_mut().insert(ACCEPT, "text/html".parse()?);

    let requests = vec![
        request(Method::GET, "/", None, ""),
        request(Method::GET, "/index", None, ""),
        request(Method::GET, "/articles", None, ""),
        request(Method::GET, "/page1?name=sammidev", None, ""),
        request(Method::GET, "/page2/sammidev", None, ""),
        request(Method::GET, "/page3/tim/werlcome/blablabla", None, ""),
        request(Method::POST, "/page4", Some("application/x-www-form-urlencoded"), "name=sammidev&dream=wellcome"),
        request(
            Method::POST,
            "/page4",
            Some("multipart/form-data; boundary=X"),
            "--X\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nsammidev\r\n\
             --X\r\nContent-Disposition: form-data; name=\"dream\"\r\n\r\n/wellcome\r\n--X--\r\n",
        ),
        request(Method::GET, "/about", None, ""),
        request(Method::POST, "/student", Some("application/json"), r#"{"id":"12435","name":"Sammidev","age":19}"#),
        request(
            Method::POST,
            "/student",
            Some("application/xml"),
            r#"<?xml version="1.0"?><Data><Id>12345</Id><Name>Sam</Name><Age>19</Age></Data>"#,
        ),
        request(Method::POST, "/student", Some("application/x-www-form-urlencoded"), "id=12345&name=sam&age=19"),
        request(Method::GET, "/student?id=12345&name=Sam&age=19", None, ""),
        request(Method::POST, "/student", Some("text/plain"), "id=1"),
        request(Method::POST, "/employee", Some("application/json"), r#"{"no":"1","name":"sam@example.com","age":19}"#),
        request(Method::POST, "/employee", Some("application/json"), r#"{"no":"1","name":"sam","age":200}"#),
        request(Method::GET, "/testest", None, ""),
        request(Method::GET, "/missing", None, ""),
        browser_error,
    ];

    for req in requests {
        let line = format!("{} {}", req.method(), req.uri());
        let response = site.call(req, Some(remote)).await;
        let status = response.status();
        let body = response.into_body().into_bytes();
        println!("{line} -> {status}\n{}\n", String::from_utf8_lossy(&body));
    }

    Ok(())
}
