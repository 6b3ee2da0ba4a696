//! The demo site: the routes of a small web app on top of the binding pipeline.
//!
//! | route                          | behavior                                 |
//! |--------------------------------|------------------------------------------|
//! | `GET /`                        | plain text                               |
//! | `GET /index`                   | 307 to `/`                               |
//! | `GET /articles`                | JSON map                                 |
//! | `GET /page1?name=`             | greets the query parameter               |
//! | `GET /page2/{name}`            | greets the path parameter                |
//! | `GET /page3/{name}/{*message}` | greets with the rest of the path         |
//! | `POST /page4`                  | form or multipart `name` and `dream`     |
//! | `GET /about`                   | plain text                               |
//! | `ANY /student`                 | binds any encoding and echoes it as JSON |
//! | `POST /employee`               | binds, validates, answers `true`         |
//! | `GET /testest`                 | renders `index.html`                     |

pub mod handlers;
pub mod model;

use micro_bind_web::interceptor::RequestLogger;
use micro_bind_web::router::{RouterBuildError, any, get, post};
use micro_bind_web::{App, AppBuildError, Router, TemplateConfig, TemplateError, TemplateStore, handler_fn};
use thiserror::Error;
use tracing::info;

/// The templates shipped with this crate
pub const TEMPLATES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/*.html");

#[derive(Error, Debug)]
pub enum SiteError {
    #[error(transparent)]
    Router(#[from] RouterBuildError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    App(#[from] AppBuildError),
}

pub fn router() -> Result<Router, RouterBuildError> {
    Router::builder()
        .route("/", get(handler_fn(handlers::root)))
        .route("/index", get(handler_fn(handlers::index)))
        .route("/articles", get(handler_fn(handlers::articles)))
        .route("/page1", get(handler_fn(handlers::page1)))
        .route("/page2/{name}", get(handler_fn(handlers::page2)))
        .route("/page3/{name}/{*message}", get(handler_fn(handlers::page3)))
        .route("/page4", post(handler_fn(handlers::page4)))
        .route("/about", get(handler_fn(handlers::about)))
        .route("/student", any(handler_fn(handlers::student)))
        .route("/employee", post(handler_fn(handlers::employee)))
        .route("/testest", get(handler_fn(handlers::testest)))
        .build()
}

/// Builds the site with templates from `templates`, logging every request.
pub fn app(templates: TemplateConfig) -> Result<App, SiteError> {
    let templates = TemplateStore::new(templates)?;
    info!(templates = ?templates.snapshot().names(), "site templates ready");

    Ok(App::builder().router(router()?).templates(templates).interceptor(RequestLogger).build()?)
}
