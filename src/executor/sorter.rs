//! Result sorting for the in-memory store
//!
//! Multi-key, stable sort. The first directive is the primary key.

use std::borrow::Borrow;
use std::cmp::Ordering;

use serde_json::Value;

use crate::query::{SortDirection, SortDirective};

/// Sorts JSON records
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts records (owned or borrowed) by `directives`, primary key first.
    ///
    /// Sort is stable: ties keep insertion order.
    pub fn sort<R: Borrow<Value>>(records: &mut [R], directives: &[SortDirective]) {
        if directives.is_empty() {
            return;
        }

        records.sort_by(|a, b| {
            let (a, b) = (a.borrow(), b.borrow());
            for directive in directives {
                let ordering =
                    Self::compare_values(a.get(directive.field()), b.get(directive.field()));

                let ordering = match directive.direction() {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                };

                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });
    }

    /// Compares two JSON values for sorting.
    ///
    /// Ordering rules:
    /// - missing < null < bool < number < string
    /// - For same types, natural ordering
    fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a_val), Some(b_val)) => {
                let type_order = |v: &Value| -> u8 {
                    match v {
                        Value::Null => 0,
                        Value::Bool(_) => 1,
                        Value::Number(_) => 2,
                        Value::String(_) => 3,
                        Value::Array(_) => 4,
                        Value::Object(_) => 5,
                    }
                };

                let a_type = type_order(a_val);
                let b_type = type_order(b_val);
                if a_type != b_type {
                    return a_type.cmp(&b_type);
                }

                match (a_val, b_val) {
                    (Value::Bool(a_b), Value::Bool(b_b)) => a_b.cmp(b_b),
                    (Value::Number(a_n), Value::Number(b_n)) => {
                        let a_f = a_n.as_f64().unwrap_or(0.0);
                        let b_f = b_n.as_f64().unwrap_or(0.0);
                        a_f.partial_cmp(&b_f).unwrap_or(Ordering::Equal)
                    }
                    (Value::String(a_s), Value::String(b_s)) => a_s.cmp(b_s),
                    // Nulls, arrays and objects compare equal among themselves
                    _ => Ordering::Equal,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parse_order_by;
    use crate::schema::FieldSet;
    use serde_json::json;

    fn directives(raw: &str) -> Vec<SortDirective> {
        let allowed: FieldSet = ["name", "age"].into_iter().collect();
        parse_order_by(raw, &allowed)
    }

    fn ids(records: &[Value]) -> Vec<&str> {
        records.iter().map(|r| r["id"].as_str().unwrap()).collect()
    }

    fn people() -> Vec<Value> {
        vec![
            json!({"id": "c", "name": "Carol", "age": 30}),
            json!({"id": "a", "name": "Alice", "age": 20}),
            json!({"id": "b", "name": "Bob", "age": 30}),
        ]
    }

    #[test]
    fn test_sort_ascending() {
        let mut records = people();
        ResultSorter::sort(&mut records, &directives("age"));
        assert_eq!(ids(&records), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_sort_descending() {
        let mut records = people();
        ResultSorter::sort(&mut records, &directives("-name"));
        assert_eq!(ids(&records), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_secondary_key_breaks_ties() {
        let mut records = people();
        ResultSorter::sort(&mut records, &directives("age desc,name"));
        assert_eq!(ids(&records), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_no_directives_keeps_order() {
        let mut records = people();
        ResultSorter::sort(&mut records, &[]);
        assert_eq!(ids(&records), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_sort_borrowed_records() {
        let records = people();
        let mut refs: Vec<&Value> = records.iter().collect();
        ResultSorter::sort(&mut refs, &directives("-age,name"));

        let sorted: Vec<&str> = refs.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(sorted, vec!["b", "c", "a"]);
        assert_eq!(ids(&records), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_missing_sorts_first() {
        let mut records = vec![json!({"id": "x", "age": 1}), json!({"id": "y"})];
        ResultSorter::sort(&mut records, &directives("age"));
        assert_eq!(ids(&records), vec!["y", "x"]);
    }
}
