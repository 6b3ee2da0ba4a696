//! The request pipeline around `micro-bind`: routing, extractors, responders,
//! hot-reloadable templates and a single error reporter.
//!
//! A server hands each request to [`App::call`] together with the peer address
//! and sends back the response it returns. Nothing here listens on a socket.

mod app;
mod body;
mod config;
mod date;
mod error;
mod fn_trait;
mod handler;
mod negotiate;
mod request;
mod responder;
mod template;

pub mod extract;
pub mod interceptor;
pub mod logging;
pub mod router;

pub use app::{App, AppBuildError, AppBuilder};
pub use body::ResponseBody;
pub use config::TemplateConfig;
pub use error::{AppError, ErrorReport, ErrorReporter};
pub use fn_trait::FnTrait;
pub use handler::{FnHandler, RequestHandler, handler_fn};
pub use negotiate::{prefers_html, quality};
pub use request::{PathParams, RequestContext};
pub use responder::{Html, Json, Negotiated, Redirect, Responder, View};
pub use router::Router;
pub use template::{TemplateError, TemplateSet, TemplateStore};
