//! Declarative, reflection-free validation.
//!
//! A record type implements [`Validate`] by returning a static [`Constraints`]
//! table, built once. The table lists fields in declaration order; each entry
//! pairs a field accessor with its rules. Validation evaluates every rule of
//! every field and reports, it never stops early. The one exception is an unset
//! field that carries `required`: it reports that rule alone.
//!
//! # Example
//! ```
//! use micro_bind::validate::{AsFieldValue, Constraints, Rule, Validate};
//! use once_cell::sync::Lazy;
//!
//! struct Employee {
//!     name: String,
//!     age: i64,
//! }
//!
//! impl Validate for Employee {
//!     fn constraints() -> &'static Constraints<Self> {
//!         static CONSTRAINTS: Lazy<Constraints<Employee>> = Lazy::new(|| {
//!             Constraints::new()
//!                 .field("name", |e: &Employee| e.name.field_value(), [Rule::Required, Rule::Email])
//!                 .field("age", |e: &Employee| e.age.field_value(), [Rule::Gte(17), Rule::Lte(80)])
//!         });
//!         &CONSTRAINTS
//!     }
//! }
//!
//! let employee = Employee { name: "sam@example.com".into(), age: 200 };
//! let violations = employee.validate();
//! assert_eq!(violations.len(), 1);
//! assert_eq!(violations[0].field, "age");
//! assert_eq!(violations[0].reason, "out of range");
//! ```

mod rule;
mod value;

pub use rule::Rule;
pub use value::{AsFieldValue, FieldValue};

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Reads one field of `T` for validation.
pub type Accessor<T> = for<'a> fn(&'a T) -> FieldValue<'a>;

/// A record with statically declared constraints.
pub trait Validate: Sized + 'static {
    fn constraints() -> &'static Constraints<Self>;

    /// Every violation, in field then rule declaration order; empty when valid.
    fn validate(&self) -> Vec<Violation> {
        Self::constraints().evaluate(self)
    }

    /// Like [`validate`](Validate::validate), failing when anything was violated.
    fn check(&self) -> Result<(), ValidationFailed> {
        let violations = self.validate();
        if violations.is_empty() { Ok(()) } else { Err(ValidationFailed::new(violations)) }
    }
}

/// One broken rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub rule: Rule,
    pub reason: &'static str,
    pub value: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}' failed '{}': {}", self.field, self.rule, self.reason)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation failed: {}", summary(.violations))]
pub struct ValidationFailed {
    violations: Vec<Violation>,
}

fn summary(violations: &[Violation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

impl ValidationFailed {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

struct FieldConstraint<T> {
    field: &'static str,
    accessor: Accessor<T>,
    rules: Vec<Rule>,
}

/// The ordered constraint table of a record type
pub struct Constraints<T> {
    fields: Vec<FieldConstraint<T>>,
}

impl<T> Constraints<T> {
    pub fn new() -> Self {
        Self { fields: vec![] }
    }

    /// Declares the rules of one field, in evaluation order.
    #[must_use]
    pub fn field(mut self, field: &'static str, accessor: Accessor<T>, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.push(FieldConstraint { field, accessor, rules: rules.into_iter().collect() });
        self
    }

    /// The rules declared for `field`, if it is declared at all.
    pub fn rules_of(&self, field: &str) -> Option<&[Rule]> {
        self.fields.iter().find(|c| c.field == field).map(|c| c.rules.as_slice())
    }

    pub fn evaluate(&self, record: &T) -> Vec<Violation> {
        let mut violations = vec![];
        for constraint in &self.fields {
            let value = (constraint.accessor)(record);
            // an unset required field reports only `required`
            let rules = if value.is_unset() && constraint.rules.contains(&Rule::Required) {
                &[Rule::Required][..]
            } else {
                constraint.rules.as_slice()
            };
            for rule in rules {
                if !rule.check(&value) {
                    violations.push(Violation {
                        field: constraint.field,
                        rule: *rule,
                        reason: rule.reason(),
                        value: value.to_string(),
                    });
                }
            }
        }
        violations
    }
}

impl<T> Default for Constraints<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Constraints<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields.iter().map(|c| (c.field, &c.rules))).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    #[derive(Clone)]
    struct Signup {
        login: Option<String>,
        email: String,
        age: i64,
    }

    impl Validate for Signup {
        fn constraints() -> &'static Constraints<Self> {
            static CONSTRAINTS: Lazy<Constraints<Signup>> = Lazy::new(|| {
                Constraints::new()
                    .field("login", |s: &Signup| s.login.field_value(), [Rule::Required, Rule::MinLen(3)])
                    .field("email", |s: &Signup| s.email.field_value(), [Rule::Required, Rule::Email])
                    .field("age", |s: &Signup| s.age.field_value(), [Rule::Gte(17), Rule::Lte(80)])
            });
            &CONSTRAINTS
        }
    }

    fn valid() -> Signup {
        Signup { login: Some("sammidev".into()), email: "sam@example.com".into(), age: 19 }
    }

    #[test]
    fn valid_record_has_no_violations() {
        assert!(valid().validate().is_empty());
        assert!(valid().check().is_ok());
    }

    #[test]
    fn missing_required_is_one_violation() {
        let signup = Signup { email: String::new(), ..valid() };
        let violations = signup.validate();

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "email");
        assert_eq!(violations[0].rule, Rule::Required);
    }

    #[test]
    fn present_but_empty_option_satisfies_required() {
        let signup = Signup { login: Some(String::new()), ..valid() };
        let violations = signup.validate();

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, Rule::MinLen(3));
    }

    #[test]
    fn out_of_range_reports_value() {
        let signup = Signup { age: 200, ..valid() };
        let violations = signup.validate();

        assert_eq!(violations, vec![Violation { field: "age", rule: Rule::Lte(80), reason: "out of range", value: "200".into() }]);
    }

    #[test]
    fn zero_age_is_out_of_range() {
        let violations = Signup { age: 0, ..valid() }.validate();
        assert_eq!(violations, vec![Violation { field: "age", rule: Rule::Gte(17), reason: "out of range", value: "0".into() }]);
    }

    #[test]
    fn blank_text_without_required_is_checked() {
        #[derive(Default)]
        struct Contact {
            email: String,
        }

        impl Validate for Contact {
            fn constraints() -> &'static Constraints<Self> {
                static CONSTRAINTS: Lazy<Constraints<Contact>> = Lazy::new(|| {
                    Constraints::new().field("email", |c: &Contact| c.email.field_value(), [Rule::Email])
                });
                &CONSTRAINTS
            }
        }

        let violations = Contact::default().validate();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, Rule::Email);
    }

    #[test]
    fn order_follows_declaration() {
        let signup = Signup { login: None, email: "nope".into(), age: 5 };

        for _ in 0..3 {
            let order: Vec<_> = signup.validate().iter().map(|v| (v.field, v.rule)).collect();
            assert_eq!(order, vec![("login", Rule::Required), ("email", Rule::Email), ("age", Rule::Gte(17))]);
        }
    }

    #[test]
    fn check_wraps_violations() {
        let err = Signup { age: 81, ..valid() }.check().unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.to_string(), "validation failed: field 'age' failed 'lte=80': out of range");
    }

    #[test]
    fn rules_lookup() {
        assert_eq!(Signup::constraints().rules_of("age"), Some([Rule::Gte(17), Rule::Lte(80)].as_slice()));
        assert_eq!(Signup::constraints().rules_of("zip"), None);
    }
}
