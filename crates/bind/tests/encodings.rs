use bytes::Bytes;
use http::{Method, Request};
use micro_bind::validate::{AsFieldValue, Constraints};
use micro_bind::{bind, Bind, BindError, Encoding, Field, Fields, RawRequest, Rule, Validate};
use once_cell::sync::Lazy;

#[derive(Debug, Default, Clone, PartialEq)]
struct Student {
    id: String,
    name: String,
    age: i64,
}

impl Bind for Student {
    fn fields() -> &'static Fields<Self> {
        static FIELDS: Lazy<Fields<Student>> = Lazy::new(|| {
            Fields::new()
                .field(Field::new("id", |s: &mut Student, raw| raw.assign(&mut s.id)).xml("Id"))
                .field(Field::new("name", |s: &mut Student, raw| raw.assign(&mut s.name)).xml("Name"))
                .field(Field::new("age", |s: &mut Student, raw| raw.assign(&mut s.age)).xml("Age"))
        });
        &FIELDS
    }
}

impl Validate for Student {
    fn constraints() -> &'static Constraints<Self> {
        static CONSTRAINTS: Lazy<Constraints<Student>> = Lazy::new(|| {
            Constraints::new()
                .field("id", |s: &Student| s.id.field_value(), [Rule::Required])
                .field("name", |s: &Student| s.name.field_value(), [Rule::Required])
                .field("age", |s: &Student| s.age.field_value(), [Rule::Gte(17), Rule::Lte(80)])
        });
        &CONSTRAINTS
    }
}

fn request(method: Method, uri: &str, content_type: Option<&str>, body: &'static str) -> Request<Bytes> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(http::header::CONTENT_TYPE, content_type);
    }
    builder.body(Bytes::from_static(body.as_bytes())).unwrap()
}

fn bind_request(req: &Request<Bytes>) -> Result<Student, BindError> {
    bind(&RawRequest::from_http(req))
}

fn expected() -> Student {
    Student { id: "12345".into(), name: "Sam".into(), age: 19 }
}

#[test]
fn all_encodings_bind_the_same_record() {
    let requests = [
        (Encoding::Json, request(Method::POST, "/student", Some("application/json"), r#"{"id":"12345","name":"Sam","age":19}"#)),
        (
            Encoding::Xml,
            request(
                Method::POST,
                "/student",
                Some("application/xml"),
                r#"<?xml version="1.0"?><Data><Id>12345</Id><Name>Sam</Name><Age>19</Age></Data>"#,
            ),
        ),
        (Encoding::Form, request(Method::POST, "/student", Some("application/x-www-form-urlencoded"), "id=12345&name=Sam&age=19")),
        (Encoding::Query, request(Method::GET, "/student?id=12345&name=Sam&age=19", None, "")),
    ];

    for (encoding, req) in &requests {
        assert_eq!(Encoding::detect(&RawRequest::from_http(req)), Ok(*encoding));
        assert_eq!(bind_request(req).unwrap(), expected(), "encoding {encoding}");
    }
}

#[test]
fn form_and_query_bind_identically() {
    let pairs = "name=Sam&id=12345&age=19&id=ignored&extra=1";
    let form = request(Method::POST, "/", Some("application/x-www-form-urlencoded"), pairs);
    let query = request(Method::GET, &format!("/?{pairs}"), None, "");

    assert_eq!(bind_request(&form).unwrap(), bind_request(&query).unwrap());
    assert_eq!(bind_request(&form).unwrap(), expected());
}

#[test]
fn json_scenario_is_valid() {
    let req = request(Method::POST, "/student", Some("application/json"), r#"{"id":"12435","name":"Sammidev","age":19}"#);
    let student = bind_request(&req).unwrap();

    assert_eq!(student, Student { id: "12435".into(), name: "Sammidev".into(), age: 19 });
    assert!(student.validate().is_empty());
}

#[test]
fn query_age_out_of_range() {
    let req = request(Method::GET, "/student?id=1&name=Sam&age=200", None, "");
    let violations = bind_request(&req).unwrap().validate();

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].field, "age");
    assert_eq!(violations[0].reason, "out of range");
    assert_eq!(violations[0].value, "200");
}

#[test]
fn removing_required_field() {
    let req = request(Method::GET, "/student?id=1&age=20", None, "");
    let violations = bind_request(&req).unwrap().validate();

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].field, "name");
    assert_eq!(violations[0].rule, Rule::Required);
}

#[test]
fn non_numeric_age() {
    let form = request(Method::POST, "/", Some("application/x-www-form-urlencoded"), "id=1&age=old");
    assert_eq!(bind_request(&form), Err(BindError::invalid_field("age", "invalid type")));

    let json = request(Method::POST, "/", Some("application/json"), r#"{"age":"19"}"#);
    assert_eq!(bind_request(&json), Err(BindError::invalid_field("age", "invalid type")));
}

#[test]
fn unsupported_body_is_not_bound() {
    let req = request(Method::POST, "/student?id=1", Some("text/plain"), "id=2");
    assert_eq!(bind_request(&req), Err(BindError::unsupported_encoding("text/plain")));
}

#[test]
fn json_keys_are_case_sensitive() {
    let req = request(Method::POST, "/", Some("application/json"), r#"{"ID":"1","Name":"Sam","age":19}"#);
    assert_eq!(bind_request(&req).unwrap(), Student { age: 19, ..Student::default() });
}

#[test]
fn repeated_xml_element_binds_first() {
    let req = request(
        Method::POST,
        "/student",
        Some("application/xml"),
        "<Data><Id>1</Id><Id>2</Id><Name>Sam</Name></Data>",
    );
    assert_eq!(bind_request(&req).unwrap(), Student { id: "1".into(), name: "Sam".into(), age: 0 });
}
