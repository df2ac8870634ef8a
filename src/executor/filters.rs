//! Predicate filtering for the in-memory store
//!
//! Predicate values arrive as strings. They are compared against a record
//! field according to the field's JSON type: numbers compare numerically,
//! booleans parse `true`/`false`, strings compare lexically. A null or
//! missing field satisfies nothing except `IS null` / `IS NOT <value>`,
//! as in SQL.

use std::cmp::Ordering;

use serde_json::Value;

use crate::query::{FilterOperator, FilterPredicate, FilterValue};

/// Evaluates predicates against JSON records
pub struct PredicateFilter;

impl PredicateFilter {
    /// Checks if a record matches all predicates (AND semantics)
    pub fn matches(record: &Value, predicates: &[FilterPredicate]) -> bool {
        predicates
            .iter()
            .all(|pred| Self::matches_predicate(record, pred))
    }

    /// Checks if a record matches a single predicate
    pub fn matches_predicate(record: &Value, predicate: &FilterPredicate) -> bool {
        let field_value = record.get(predicate.field()).unwrap_or(&Value::Null);

        match (predicate.operator(), predicate.value()) {
            (FilterOperator::In, FilterValue::List(items)) => items
                .iter()
                .any(|item| Self::compare(field_value, item) == Some(Ordering::Equal)),
            (FilterOperator::In, FilterValue::Scalar(item)) => {
                Self::compare(field_value, item) == Some(Ordering::Equal)
            }
            (op, FilterValue::Scalar(raw)) => Self::matches_scalar(field_value, op, raw),
            // Lists are only built for `in`
            (_, FilterValue::List(_)) => false,
        }
    }

    fn matches_scalar(field_value: &Value, op: FilterOperator, raw: &str) -> bool {
        let ordering = Self::compare(field_value, raw);

        match op {
            FilterOperator::Eq => ordering == Some(Ordering::Equal),
            FilterOperator::Ne => matches!(ordering, Some(o) if o != Ordering::Equal),
            FilterOperator::Gt => ordering == Some(Ordering::Greater),
            FilterOperator::Gte => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            FilterOperator::Lt => ordering == Some(Ordering::Less),
            FilterOperator::Lte => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
            FilterOperator::Like => {
                Self::text(field_value).is_some_and(|text| like_match(&text, raw))
            }
            FilterOperator::NotLike => {
                Self::text(field_value).is_some_and(|text| !like_match(&text, raw))
            }
            FilterOperator::Is => Self::is_match(field_value, raw),
            FilterOperator::IsNot => !Self::is_match(field_value, raw),
            FilterOperator::In => ordering == Some(Ordering::Equal),
        }
    }

    /// `IS null` tests for null; any other operand is an equality test.
    fn is_match(field_value: &Value, raw: &str) -> bool {
        if raw.eq_ignore_ascii_case("null") {
            return field_value.is_null();
        }
        Self::compare(field_value, raw) == Some(Ordering::Equal)
    }

    /// Orders a record field against a raw predicate value.
    ///
    /// `None` when the two cannot be compared.
    fn compare(field_value: &Value, raw: &str) -> Option<Ordering> {
        match field_value {
            Value::Number(n) => {
                let actual = n.as_f64()?;
                let expected = raw.trim().parse::<f64>().ok()?;
                actual.partial_cmp(&expected)
            }
            Value::String(s) => Some(s.as_str().cmp(raw)),
            Value::Bool(b) => {
                let expected = raw.trim().to_ascii_lowercase().parse::<bool>().ok()?;
                Some(b.cmp(&expected))
            }
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Text form used by LIKE
    fn text(field_value: &Value) -> Option<String> {
        match field_value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// SQL LIKE matching: `%` matches any sequence, `_` exactly one character.
pub fn like_match(value: &str, pattern: &str) -> bool {
    let value: Vec<char> = value.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    let (mut v, mut p) = (0, 0);
    // Position of the last `%` and the value index it was tried against
    let mut backtrack: Option<(usize, usize)> = None;

    while v < value.len() {
        match pattern.get(p) {
            Some('%') => {
                backtrack = Some((p, v));
                p += 1;
            }
            Some('_') => {
                v += 1;
                p += 1;
            }
            Some(c) if *c == value[v] => {
                v += 1;
                p += 1;
            }
            _ => match backtrack {
                Some((star, matched)) => {
                    p = star + 1;
                    v = matched + 1;
                    backtrack = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|c| *c == '%')
}
