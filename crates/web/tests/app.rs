use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{Method, Request, Response, StatusCode};
use micro_bind_web::extract::{PathVars, Query};
use micro_bind_web::interceptor::RequestLogger;
use micro_bind_web::router::{get, post};
use micro_bind_web::{App, AppError, Json, ResponseBody, Router, TemplateConfig, TemplateStore, View, handler_fn};
use serde::Deserialize;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[derive(Deserialize)]
struct Name {
    name: String,
}

async fn hello(Query(query): Query<Name>) -> String {
    format!("hello {}", query.name)
}

async fn greet(vars: PathVars) -> String {
    format!("hello {}", vars.get("name").unwrap_or_default())
}

async fn page() -> View<serde_json::Value> {
    View::new("index.html", json!({"message": "Hello World!"}))
}

async fn missing_page() -> View<serde_json::Value> {
    View::new("missing.html", json!({}))
}

async fn fail() -> Result<Json<bool>, AppError> {
    Err(AppError::internal(std::io::Error::other("storage offline")))
}

fn app(dir: &TempDir) -> App {
    fs::write(dir.path().join("index.html"), "<h1>{{ message }}</h1>").unwrap();
    let templates = TemplateStore::new(TemplateConfig::new(format!("{}/*.html", dir.path().display()))).unwrap();

    let router = Router::builder()
        .route("/page1", get(handler_fn(hello)))
        .route("/page2/{name}", get(handler_fn(greet)))
        .route("/view", get(handler_fn(page)))
        .route("/missing", get(handler_fn(missing_page)))
        .route("/fail", post(handler_fn(fail)))
        .build()
        .unwrap();

    App::builder().router(router).templates(templates).interceptor(RequestLogger).build().unwrap()
}

fn get_request(uri: &str) -> Request<Bytes> {
    Request::builder().method(Method::GET).uri(uri).body(Bytes::new()).unwrap()
}

fn body(response: Response<ResponseBody>) -> String {
    String::from_utf8(response.into_body().into_bytes().to_vec()).unwrap()
}

#[tokio::test]
async fn query_and_path_handlers() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    let response = app.call(get_request("/page1?name=sammidev"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body(response), "hello sammidev");

    let response = app.call(get_request("/page2/sammidev"), Some("127.0.0.1:40000".parse().unwrap())).await;
    assert_eq!(body(response), "hello sammidev");
}

#[tokio::test]
async fn template_view() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    let response = app.call(get_request("/view"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "text/html; charset=utf-8");
    assert_eq!(body(response), "<h1>Hello World!</h1>");
}

#[tokio::test]
async fn unknown_template_is_404() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    let response = app.call(get_request("/missing"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let report: serde_json::Value = serde_json::from_str(&body(response)).unwrap();
    assert_eq!(report["status"], 404);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    let response = app.call(get_request("/nowhere"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body(response), r#"{"status":404,"message":"not found"}"#);
}

#[tokio::test]
async fn method_mismatch_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    let response = app.call(get_request("/fail"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn internal_error_for_browser() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/fail")
        .header(ACCEPT, "text/html,application/xhtml+xml,*/*;q=0.8")
        .body(Bytes::new())
        .unwrap();
    let response = app.call(request, None).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "text/html; charset=utf-8");
    let html = body(response);
    assert!(html.contains("500 Internal Server Error"));
    assert!(html.contains("storage offline"));
}

#[test]
fn router_is_required() {
    assert!(App::builder().build().is_err());
}
