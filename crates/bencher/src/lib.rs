use http::Method;
use micro_bind::{Bind, Field, Fields};
use once_cell::sync::Lazy;

/// The record every binding benchmark decodes into.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub age: i64,
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

#[derive(Debug, Clone)]
pub struct TestCase {
    name: &'static str,
    method: Method,
    content_type: Option<&'static str>,
    in_query: bool,
    file: TestFile,
}

impl TestCase {
    /// A request carrying `file` as its body.
    pub fn body(name: &'static str, content_type: &'static str, file: TestFile) -> Self {
        Self { name, method: Method::POST, content_type: Some(content_type), in_query: false, file }
    }

    /// A bodiless GET whose query string is `file`.
    pub fn query(name: &'static str, file: TestFile) -> Self {
        Self { name, method: Method::GET, content_type: None, in_query: true, file }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn content_type(&self) -> Option<&'static str> {
        self.content_type
    }

    pub fn file(&self) -> &TestFile {
        &self.file
    }

    pub fn query_string(&self) -> Option<&'static str> {
        self.in_query.then_some(self.file.content)
    }

    pub fn body_bytes(&self) -> &'static [u8] {
        if self.in_query { b"" } else { self.file.content.as_bytes() }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct TestFile {
    file_name: &'static str,
    content: &'static str,
}

impl TestFile {
    pub const fn new(file_name: &'static str, content: &'static str) -> Self {
        Self { file_name, content }
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }
}
