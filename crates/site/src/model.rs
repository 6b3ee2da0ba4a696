//! Records the site binds requests into.

use micro_bind::validate::{AsFieldValue, Constraints};
use micro_bind::{Bind, Field, Fields, Rule, Validate};
use once_cell::sync::Lazy;
use serde::Serialize;

/// Echoed back by `/student`; XML payloads use capitalized element names.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
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

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub no: Option<String>,
    pub name: Option<String>,
    pub age: i64,
}

impl Bind for Employee {
    fn fields() -> &'static Fields<Self> {
        static FIELDS: Lazy<Fields<Employee>> = Lazy::new(|| {
            Fields::new()
                .field(Field::new("no", |e: &mut Employee, raw| raw.assign(&mut e.no)).xml("No"))
                .field(Field::new("name", |e: &mut Employee, raw| raw.assign(&mut e.name)).xml("Name"))
                .field(Field::new("age", |e: &mut Employee, raw| raw.assign(&mut e.age)).xml("Age"))
        });
        &FIELDS
    }
}

impl Validate for Employee {
    fn constraints() -> &'static Constraints<Self> {
        static CONSTRAINTS: Lazy<Constraints<Employee>> = Lazy::new(|| {
            Constraints::new()
                .field("no", |e: &Employee| e.no.field_value(), [Rule::Required])
                .field("name", |e: &Employee| e.name.field_value(), [Rule::Required, Rule::Email])
                .field("age", |e: &Employee| e.age.field_value(), [Rule::Gte(17), Rule::Lte(80)])
        });
        &CONSTRAINTS
    }
}

/// The `/page4` form
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Dream {
    pub name: String,
    pub dream: String,
}

impl Bind for Dream {
    fn fields() -> &'static Fields<Self> {
        static FIELDS: Lazy<Fields<Dream>> = Lazy::new(|| {
            Fields::new()
                .field(Field::new("name", |d: &mut Dream, raw| raw.assign(&mut d.name)))
                .field(Field::new("dream", |d: &mut Dream, raw| raw.assign(&mut d.dream)))
        });
        &FIELDS
    }
}
