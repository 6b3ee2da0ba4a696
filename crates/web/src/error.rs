//! Failure taxonomy and the reporter every failure leaves the app through.
//!
//! Any failure becomes an [`AppError`]. The [`ErrorReporter`] classifies it into an
//! [`ErrorReport`], logs one event carrying the request context and renders the report
//! as JSON, or as an HTML page for clients that prefer `text/html`.

use crate::body::ResponseBody;
use crate::date;
use crate::negotiate;
use crate::request::RequestContext;
use crate::template::TemplateError;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Response, StatusCode};
use micro_bind::{BindError, ValidationFailed, Violation};
use serde::Serialize;
use std::error::Error;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Bind(#[from] BindError),

    #[error(transparent)]
    Validation(#[from] ValidationFailed),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("{message}")]
    Http { status: StatusCode, message: String },

    #[error("{0}")]
    Internal(#[source] Box<dyn Error + Send + Sync>),
}

impl AppError {
    pub fn http<S: ToString>(status: StatusCode, message: S) -> Self {
        Self::Http { status, message: message.to_string() }
    }

    pub fn not_found() -> Self {
        Self::http(StatusCode::NOT_FOUND, "not found")
    }

    pub fn bad_request<S: ToString>(message: S) -> Self {
        Self::http(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal<E: Into<Box<dyn Error + Send + Sync>>>(e: E) -> Self {
        Self::Internal(e.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Bind(BindError::UnsupportedEncoding { .. }) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Bind(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Template(TemplateError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Template(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Http { status, .. } => *status,
        }
    }

    pub fn violations(&self) -> Option<&[Violation]> {
        match self {
            AppError::Validation(failed) => Some(failed.violations()),
            _ => None,
        }
    }
}

/// The uniform shape of every failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
    pub message: String,
    #[serde(skip)]
    pub cause: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<Violation>>,
}

fn serialize_status<S: serde::Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

impl From<&AppError> for ErrorReport {
    fn from(e: &AppError) -> Self {
        Self {
            status: e.status(),
            message: e.to_string(),
            cause: e.source().map(ToString::to_string),
            violations: e.violations().map(<[Violation]>::to_vec),
        }
    }
}

impl ErrorReport {
    fn to_json(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_else(|_| self.message.clone().into_bytes())
    }

    fn to_html(&self) -> String {
        let title = format!("{} {}", self.status.as_u16(), self.status.canonical_reason().unwrap_or("Error"));
        let mut html = format!(
            "<!DOCTYPE html>\n<html>\n<head><title>{title}</title></head>\n<body>\n<h1>{title}</h1>\n<p>{}</p>\n",
            tera::escape_html(&self.message)
        );
        if let Some(violations) = &self.violations {
            html.push_str("<ul>\n");
            for violation in violations {
                html.push_str(&format!("<li>{}</li>\n", tera::escape_html(&violation.to_string())));
            }
            html.push_str("</ul>\n");
        }
        html.push_str("</body>\n</html>\n");
        html
    }
}

/// Turns failures into responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorReporter;

impl ErrorReporter {
    /// Classifies `e`, logs it once with the request context and renders the report.
    pub fn report(e: &AppError, req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        let report = ErrorReport::from(e);
        Self::log(&report, req);
        Self::render(&report, req)
    }

    fn log(report: &ErrorReport, req: &RequestContext<'_, '_>) {
        let at = date::now();
        let remote = req.remote_addr().map_or_else(|| "-".to_owned(), |addr| addr.to_string());
        let status = report.status.as_u16();
        let cause = report.cause.as_deref().unwrap_or("-");

        if report.status.is_server_error() {
            error!(at = %at, method = %req.method(), uri = %req.uri(), remote = %remote, status, cause = %cause, "{}", report.message);
        } else {
            warn!(at = %at, method = %req.method(), uri = %req.uri(), remote = %remote, status, cause = %cause, "{}", report.message);
        }
    }

    fn render(report: &ErrorReport, req: &RequestContext<'_, '_>) -> Response<ResponseBody> {
        let (content_type, body) = if negotiate::prefers_html(req.headers()) {
            ("text/html; charset=utf-8", ResponseBody::from(report.to_html()))
        } else {
            ("application/json", ResponseBody::from(report.to_json()))
        };

        let mut response = Response::new(body);
        *response.status_mut() = report.status;
        response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, ErrorReport};
    use crate::template::TemplateError;
    use http::StatusCode;
    use micro_bind::{BindError, Encoding, Rule, ValidationFailed, Violation};

    fn violation() -> Violation {
        Violation { field: "age", rule: Rule::Lte(80), reason: "out of range", value: "200".into() }
    }

    #[test]
    fn classification() {
        assert_eq!(AppError::from(BindError::unsupported_encoding("text/plain")).status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(AppError::from(BindError::malformed_body(Encoding::Json, "eof")).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::from(BindError::invalid_field("age", "invalid type")).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::from(ValidationFailed::new(vec![violation()])).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::from(TemplateError::not_found("x.html")).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::not_found().status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::http(StatusCode::CONFLICT, "busy").status(), StatusCode::CONFLICT);
        assert_eq!(AppError::internal("boom").status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_report_as_json() {
        let e = AppError::from(ValidationFailed::new(vec![violation()]));
        let json: serde_json::Value = serde_json::from_slice(&ErrorReport::from(&e).to_json()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "status": 400,
                "message": "validation failed: field 'age' failed 'lte=80': out of range",
                "violations": [{"field": "age", "rule": "lte=80", "reason": "out of range", "value": "200"}]
            })
        );
    }

    #[test]
    fn internal_report_keeps_top_level_message() {
        let e = AppError::internal(std::io::Error::other("disk on fire"));
        let report = ErrorReport::from(&e);

        assert_eq!(report.message, "disk on fire");
        assert_eq!(report.violations, None);
        let json: serde_json::Value = serde_json::from_slice(&report.to_json()).unwrap();
        assert_eq!(json, serde_json::json!({"status": 500, "message": "disk on fire"}));
    }

    #[test]
    fn html_report_is_escaped() {
        let e = AppError::bad_request("<script>");
        let html = ErrorReport::from(&e).to_html();

        assert!(html.contains("<h1>400 Bad Request</h1>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn html_report_lists_violations() {
        let e = AppError::from(ValidationFailed::new(vec![violation()]));
        let html = ErrorReport::from(&e).to_html();

        assert!(html.contains("<ul>\n<li>field &#x27;age&#x27; failed &#x27;lte=80&#x27;: out of range</li>\n</ul>\n"));
    }
}
