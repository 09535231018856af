//! Checks evaluate predicates against resource descriptors.
//!
//! A predicate is a named `(accessor, comparator, expected)` triple; every
//! resource gets an `exists` check first, followed by its predicates in
//! declaration order. Predicates of a missing resource are reported as skipped.

pub mod cluster;
pub mod network;
pub mod node_pool;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde_derive::Serialize;
use std::fmt::{Display, Formatter};

pub const EXISTS_CHECK_NAME: &str = "exists";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum CheckValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

impl Display for CheckValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckValue::Text(v) => write!(f, "\"{v}\""),
            CheckValue::Integer(v) => write!(f, "{v}"),
            CheckValue::Boolean(v) => write!(f, "{v}"),
            CheckValue::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

impl From<&str> for CheckValue {
    fn from(value: &str) -> Self {
        CheckValue::Text(value.to_string())
    }
}

impl From<String> for CheckValue {
    fn from(value: String) -> Self {
        CheckValue::Text(value)
    }
}

impl From<i64> for CheckValue {
    fn from(value: i64) -> Self {
        CheckValue::Integer(value)
    }
}

impl From<bool> for CheckValue {
    fn from(value: bool) -> Self {
        CheckValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for CheckValue {
    fn from(value: DateTime<Utc>) -> Self {
        CheckValue::Timestamp(value)
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    #[strum(serialize = "==")]
    Equals,
    /// Regex search, the expected value being the pattern.
    #[strum(serialize = "=~")]
    Matches,
    #[strum(serialize = "<")]
    LessThan,
    #[strum(serialize = ">")]
    GreaterThan,
}

impl Comparator {
    /// Values of different kinds never satisfy a comparator.
    pub fn compare(&self, actual: &CheckValue, expected: &CheckValue) -> bool {
        match self {
            Comparator::Equals => actual == expected,
            Comparator::Matches => match (actual, expected) {
                (CheckValue::Text(actual), CheckValue::Text(pattern)) => match Regex::new(pattern) {
                    Ok(re) => re.is_match(actual),
                    Err(_) => false,
                },
                _ => false,
            },
            Comparator::LessThan => match (actual, expected) {
                (CheckValue::Integer(a), CheckValue::Integer(e)) => a < e,
                (CheckValue::Timestamp(a), CheckValue::Timestamp(e)) => a < e,
                _ => false,
            },
            Comparator::GreaterThan => match (actual, expected) {
                (CheckValue::Integer(a), CheckValue::Integer(e)) => a > e,
                (CheckValue::Timestamp(a), CheckValue::Timestamp(e)) => a > e,
                _ => false,
            },
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    #[strum(serialize = "PASS")]
    Passed,
    #[strum(serialize = "FAIL")]
    Failed,
    #[strum(serialize = "SKIP")]
    Skipped,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub resource: String,
    pub name: String,
    pub outcome: CheckOutcome,
    pub comparator: Comparator,
    pub expected: CheckValue,
    pub actual: Option<CheckValue>,
}

impl CheckResult {
    pub fn existence(resource: &str, found: bool) -> Self {
        CheckResult {
            resource: resource.to_string(),
            name: EXISTS_CHECK_NAME.to_string(),
            outcome: match found {
                true => CheckOutcome::Passed,
                false => CheckOutcome::Failed,
            },
            comparator: Comparator::Equals,
            expected: CheckValue::Boolean(true),
            actual: Some(CheckValue::Boolean(found)),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.outcome == CheckOutcome::Failed
    }
}

impl Display for CheckResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} {}: expected {} {}, got {}",
            self.outcome,
            self.resource,
            self.name,
            self.comparator,
            self.expected,
            match &self.actual {
                Some(actual) => actual.to_string(),
                None => "<none>".to_string(),
            }
        )
    }
}

pub struct Predicate<D> {
    name: &'static str,
    accessor: fn(&D) -> Option<CheckValue>,
    comparator: Comparator,
    expected: CheckValue,
}

impl<D> Predicate<D> {
    pub fn new(
        name: &'static str,
        accessor: fn(&D) -> Option<CheckValue>,
        comparator: Comparator,
        expected: impl Into<CheckValue>,
    ) -> Self {
        Predicate {
            name,
            accessor,
            comparator,
            expected: expected.into(),
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn evaluate(&self, resource: &str, descriptor: &D) -> CheckResult {
        let actual = (self.accessor)(descriptor);
        let passed = match &actual {
            Some(actual) => self.comparator.compare(actual, &self.expected),
            None => false,
        };

        CheckResult {
            resource: resource.to_string(),
            name: self.name.to_string(),
            outcome: match passed {
                true => CheckOutcome::Passed,
                false => CheckOutcome::Failed,
            },
            comparator: self.comparator,
            expected: self.expected.clone(),
            actual,
        }
    }

    pub fn skip(&self, resource: &str) -> CheckResult {
        CheckResult {
            resource: resource.to_string(),
            name: self.name.to_string(),
            outcome: CheckOutcome::Skipped,
            comparator: self.comparator,
            expected: self.expected.clone(),
            actual: None,
        }
    }
}

/// `exists` followed by every predicate, skipped when `descriptor` is `None`.
pub fn evaluate_resource<D>(resource: &str, descriptor: Option<&D>, predicates: &[Predicate<D>]) -> Vec<CheckResult> {
    let mut results = Vec::with_capacity(predicates.len() + 1);
    results.push(CheckResult::existence(resource, descriptor.is_some()));

    for predicate in predicates {
        results.push(match descriptor {
            Some(descriptor) => predicate.evaluate(resource, descriptor),
            None => predicate.skip(resource),
        });
    }

    results
}
