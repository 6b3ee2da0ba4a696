//! Encoding detection and per-encoding decoding.
//!
//! [`Encoding`] is a closed set: every request maps to exactly one variant, and
//! each variant knows how to turn the request into a flat [`Source`].

use crate::error::BindError;
use crate::request::RawRequest;
use crate::source::Source;
use futures::executor::block_on;
use futures::stream;
use mime::Mime;
use multer::Multipart;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;
use std::convert::Infallible;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Json,
    Xml,
    Form,
    Query,
}

impl Encoding {
    /// Chooses the decode strategy for `req`.
    ///
    /// A request with a body is decoded by its declared content type; anything
    /// else falls back to the query string. A body whose content type is missing
    /// or not understood is rejected rather than guessed.
    pub fn detect(req: &RawRequest<'_>) -> Result<Encoding, BindError> {
        if !req.has_body() {
            return Ok(Encoding::Query);
        }

        let content_type = req.content_type().ok_or_else(|| BindError::unsupported_encoding("<none>"))?;
        let mime = content_type.parse::<Mime>().map_err(|_| BindError::unsupported_encoding(content_type))?;

        Self::from_mime(&mime).ok_or_else(|| BindError::unsupported_encoding(content_type))
    }

    fn from_mime(mime: &Mime) -> Option<Encoding> {
        let (type_, subtype, suffix) = (mime.type_(), mime.subtype(), mime.suffix());

        if (type_ == mime::APPLICATION && subtype == mime::JSON) || suffix == Some(mime::JSON) {
            Some(Encoding::Json)
        } else if ((type_ == mime::APPLICATION || type_ == mime::TEXT) && subtype == mime::XML)
            || suffix == Some(mime::XML)
        {
            Some(Encoding::Xml)
        } else if (type_ == mime::APPLICATION && subtype == mime::WWW_FORM_URLENCODED)
            || (type_ == mime::MULTIPART && subtype == mime::FORM_DATA)
        {
            Some(Encoding::Form)
        } else {
            None
        }
    }

    /// Decodes the part of `req` this encoding reads.
    pub fn decode(self, req: &RawRequest<'_>) -> Result<Source, BindError> {
        match self {
            Encoding::Json => decode_json(req.body()),
            Encoding::Xml => decode_xml(req.body()),
            Encoding::Form => match req.content_type().filter(|content_type| is_multipart(content_type)) {
                Some(content_type) => decode_multipart(content_type, req.body()),
                None => decode_pairs(self, req.body()),
            },
            Encoding::Query => decode_pairs(self, req.query().unwrap_or_default().as_bytes()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Json => "json",
            Encoding::Xml => "xml",
            Encoding::Form => "form",
            Encoding::Query => "query",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn decode_json(body: &[u8]) -> Result<Source, BindError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(Source::Json(map)),
        Ok(_) => Err(BindError::malformed_body(Encoding::Json, "expected a json object")),
        Err(e) => Err(BindError::malformed_body(Encoding::Json, e)),
    }
}

fn is_multipart(content_type: &str) -> bool {
    content_type
        .parse::<Mime>()
        .is_ok_and(|parsed| parsed.type_() == mime::MULTIPART && parsed.subtype() == mime::FORM_DATA)
}

/// Reads every named part of a `multipart/form-data` body as text, in arrival order.
fn decode_multipart(content_type: &str, body: &[u8]) -> Result<Source, BindError> {
    let boundary = multer::parse_boundary(content_type).map_err(|e| BindError::malformed_body(Encoding::Form, e))?;
    let chunk = body.to_vec();
    let mut multipart = Multipart::new(stream::once(async move { Ok::<_, Infallible>(chunk) }), boundary);

    // the body is already in memory, so the parse never waits
    block_on(async move {
        let mut pairs = vec![];
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            pairs.push((name, field.text().await?));
        }
        Ok::<_, multer::Error>(Source::Text(pairs))
    })
    .map_err(|e| BindError::malformed_body(Encoding::Form, e))
}

/// Reads the children of the root element as `name -> text`; the root's own name is ignored.
fn decode_xml(body: &[u8]) -> Result<Source, BindError> {
    let text = std::str::from_utf8(body).map_err(|e| BindError::malformed_body(Encoding::Xml, e))?;
    let XmlChildren(children) =
        quick_xml::de::from_str(text).map_err(|e| BindError::malformed_body(Encoding::Xml, e))?;
    Ok(Source::Text(children))
}

/// Child elements in document order, repeats included.
struct XmlChildren(Vec<(String, String)>);

impl<'de> Deserialize<'de> for XmlChildren {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ChildrenVisitor;

        impl<'de> Visitor<'de> for ChildrenVisitor {
            type Value = XmlChildren;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an element whose children hold text")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut children = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(child) = map.next_entry::<String, String>()? {
                    children.push(child);
                }
                Ok(XmlChildren(children))
            }
        }

        deserializer.deserialize_map(ChildrenVisitor)
    }
}

/// Form bodies and query strings share this decoder, so the same pairs always bind the same way.
fn decode_pairs(encoding: Encoding, input: &[u8]) -> Result<Source, BindError> {
    serde_urlencoded::from_bytes::<Vec<(String, String)>>(input)
        .map(Source::Text)
        .map_err(|e| BindError::malformed_body(encoding, e))
}
