//! One handler per site route.

use crate::model::{Dream, Employee, Student};
use micro_bind_web::extract::{Bind, PathVars, Query, Valid};
use micro_bind_web::{Json, Redirect, View};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;

pub async fn root() -> &'static str {
    "FROM ROOT"
}

pub async fn index() -> Redirect {
    Redirect::temporary("/")
}

pub async fn articles() -> Json<BTreeMap<u32, &'static str>> {
    Json(BTreeMap::from([(1, "Learn Java"), (2, "Learn Golang"), (3, "Learn Microservice")]))
}

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    #[serde(default)]
    name: String,
}

pub async fn page1(Query(query): Query<NameQuery>) -> String {
    format!("hello {}", query.name)
}

pub async fn page2(vars: PathVars) -> String {
    format!("hello {}", vars.get("name").unwrap_or_default())
}

pub async fn page3(vars: PathVars) -> String {
    format!(
        "Hello {}, I have message for you: {}",
        vars.get("name").unwrap_or_default(),
        vars.get("message").unwrap_or_default()
    )
}

pub async fn page4(Bind(form): Bind<Dream>) -> String {
    format!("Hello {}, I have message for you: {}", form.name, form.dream.replacen('/', "", 1))
}

pub async fn about() -> &'static str {
    "about page"
}

pub async fn student(Bind(student): Bind<Student>) -> Json<Student> {
    Json(student)
}

pub async fn employee(Valid(_employee): Valid<Employee>) -> Json<bool> {
    Json(true)
}

pub async fn testest() -> View<Value> {
    View::new("index.html", json!({"message": "Hello World!"}))
}
