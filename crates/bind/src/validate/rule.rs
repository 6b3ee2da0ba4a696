use crate::error::RuleParseError;
use crate::validate::value::FieldValue;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
        .expect("email pattern is valid")
});

/// A single field constraint, written and displayed in validator tag form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `required`: the field was supplied
    Required,
    /// `gte=N`: number is at least N
    Gte(i64),
    /// `lte=N`: number is at most N
    Lte(i64),
    /// `min=N`: text has at least N characters
    MinLen(usize),
    /// `max=N`: text has at most N characters
    MaxLen(usize),
    /// `email`: text is an email address
    Email,
}

impl Rule {
    /// Parses a comma separated tag list such as `required,gte=17,lte=80`.
    pub fn parse_tags(tags: &str) -> Result<Vec<Rule>, RuleParseError> {
        tags.split(',').map(str::trim).filter(|tag| !tag.is_empty()).map(str::parse).collect()
    }

    /// Human readable failure reason.
    pub fn reason(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Gte(_) | Rule::Lte(_) => "out of range",
            Rule::MinLen(_) => "too short",
            Rule::MaxLen(_) => "too long",
            Rule::Email => "must be a valid email",
        }
    }

    /// Whether `value` satisfies this rule.
    ///
    /// `required` fails on unset values. Every other rule passes a `None` and
    /// checks anything else, a plain field's zero value included.
    /// A rule applied to a value of the wrong kind fails.
    pub fn check(&self, value: &FieldValue<'_>) -> bool {
        match self {
            Rule::Required => !value.is_unset(),
            _ if value.is_absent() => true,
            Rule::Gte(min) => value.as_int().is_some_and(|n| n >= *min),
            Rule::Lte(max) => value.as_int().is_some_and(|n| n <= *max),
            Rule::MinLen(min) => value.as_str().is_some_and(|s| s.chars().count() >= *min),
            Rule::MaxLen(max) => value.as_str().is_some_and(|s| s.chars().count() <= *max),
            Rule::Email => value.as_str().is_some_and(|s| EMAIL.is_match(s)),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => f.write_str("required"),
            Rule::Gte(n) => write!(f, "gte={n}"),
            Rule::Lte(n) => write!(f, "lte={n}"),
            Rule::MinLen(n) => write!(f, "min={n}"),
            Rule::MaxLen(n) => write!(f, "max={n}"),
            Rule::Email => f.write_str("email"),
        }
    }
}

impl FromStr for Rule {
    type Err = RuleParseError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match tag.split_once('=') {
            Some((name, arg)) => (name.trim(), Some(arg.trim())),
            None => (tag.trim(), None),
        };

        match (name, arg) {
            ("required", None) => Ok(Rule::Required),
            ("email", None) => Ok(Rule::Email),
            ("gte", Some(arg)) => parse_arg(name, arg).map(Rule::Gte),
            ("lte", Some(arg)) => parse_arg(name, arg).map(Rule::Lte),
            ("min", Some(arg)) => parse_arg(name, arg).map(Rule::MinLen),
            ("max", Some(arg)) => parse_arg(name, arg).map(Rule::MaxLen),
            ("gte" | "lte" | "min" | "max", None) => Err(RuleParseError::MissingArgument(name.to_owned())),
            _ => Err(RuleParseError::UnknownRule(tag.to_owned())),
        }
    }
}

fn parse_arg<N: FromStr>(rule: &str, arg: &str) -> Result<N, RuleParseError> {
    arg.parse().map_err(|_| RuleParseError::InvalidArgument { rule: rule.to_owned(), arg: arg.to_owned() })
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::Rule;
    use crate::error::RuleParseError;
    use crate::validate::value::FieldValue;

    #[test]
    fn parse_tag_list() {
        assert_eq!(Rule::parse_tags("gte=17,lte=80").unwrap(), vec![Rule::Gte(17), Rule::Lte(80)]);
        assert_eq!(Rule::parse_tags("required, email").unwrap(), vec![Rule::Required, Rule::Email]);
        assert_eq!(Rule::parse_tags("").unwrap(), vec![]);
    }

    #[test]
    fn parse_errors() {
        assert_eq!("between=1".parse::<Rule>(), Err(RuleParseError::UnknownRule("between=1".into())));
        assert_eq!("gte".parse::<Rule>(), Err(RuleParseError::MissingArgument("gte".into())));
        assert_eq!(
            "lte=eighty".parse::<Rule>(),
            Err(RuleParseError::InvalidArgument { rule: "lte".into(), arg: "eighty".into() })
        );
    }

    #[test]
    fn display_round_trips_tag() {
        for tag in ["required", "gte=17", "lte=80", "min=2", "max=10", "email"] {
            assert_eq!(tag.parse::<Rule>().unwrap().to_string(), tag);
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(Rule::Gte(17).check(&FieldValue::Int(17)));
        assert!(!Rule::Gte(17).check(&FieldValue::Int(16)));
        assert!(Rule::Lte(80).check(&FieldValue::Int(80)));
        assert!(!Rule::Lte(80).check(&FieldValue::Int(81)));
    }

    #[test]
    fn email_format() {
        assert!(Rule::Email.check(&FieldValue::Str("sam@example.com")));
        assert!(!Rule::Email.check(&FieldValue::Str("sammidev")));
        assert!(!Rule::Email.check(&FieldValue::Str("sam@")));
    }

    #[test]
    fn absent_only_fails_required() {
        assert!(!Rule::Required.check(&FieldValue::Absent));
        assert!(Rule::Email.check(&FieldValue::Absent));
        assert!(Rule::Gte(1).check(&FieldValue::Absent));
    }

    #[test]
    fn plain_zero_is_checked_by_value() {
        assert!(!Rule::Required.check(&FieldValue::Zero));
        assert!(!Rule::Gte(17).check(&FieldValue::Zero));
        assert!(Rule::Lte(80).check(&FieldValue::Zero));
        assert!(!Rule::Required.check(&FieldValue::Blank));
        assert!(!Rule::MinLen(1).check(&FieldValue::Blank));
        assert!(Rule::MaxLen(3).check(&FieldValue::Blank));
        assert!(!Rule::Email.check(&FieldValue::Blank));
    }

    #[test]
    fn wrong_kind_fails() {
        assert!(!Rule::Gte(1).check(&FieldValue::Str("5")));
        assert!(!Rule::Email.check(&FieldValue::Int(5)));
    }
}
