//! List and dict marshalling examples
//!
//! Printing operations take any `std::io::Write` so the host decides where
//! the text goes (stdout for the CLI, `sys.stdout` for Python).

use std::io::Write;

use crate::error::{BridgeError, Result};
use crate::value::HostValue;

/// Runtime type name of every element, in order
pub fn type_names<V: HostValue>(items: &[V]) -> Result<Vec<String>> {
    items.iter().map(HostValue::type_name).collect()
}

/// Print `Object type: <name>` for each element.
pub fn check_types<V: HostValue, W: Write>(items: &[V], out: &mut W) -> Result<()> {
    for name in type_names(items)? {
        writeln!(out, "Object type: {}", name)?;
    }
    tracing::debug!(len = items.len(), "check_types");
    Ok(())
}

/// Keep the elements that convert to an integer, in order.
pub fn get_int_list<V: HostValue>(items: &[V]) -> Vec<i64> {
    let ints: Vec<i64> = items.iter().filter_map(HostValue::to_int).collect();
    tracing::debug!(kept = ints.len(), dropped = items.len() - ints.len(), "get_int_list");
    ints
}

/// Read a dict as `(key, value)` string pairs.
///
/// # Errors
///
/// Returns `InvalidInput` if any key or value is not a string.
pub fn string_entries<V: HostValue>(entries: &[(V, V)]) -> Result<Vec<(String, String)>> {
    entries
        .iter()
        .map(|(key, value)| {
            let k = key.to_text().ok_or_else(|| {
                BridgeError::invalid(format!("dict key must be str, got {}", describe(key)))
            })?;
            let v = value.to_text().ok_or_else(|| {
                BridgeError::invalid(format!(
                    "value for key '{}' must be str, got {}",
                    k,
                    describe(value)
                ))
            })?;
            Ok((k, v))
        })
        .collect()
}

/// Print `key: value` for each entry, in iteration order.
///
/// Nothing is written when an entry is not a string pair.
pub fn iterate_dict<V: HostValue, W: Write>(entries: &[(V, V)], out: &mut W) -> Result<()> {
    for (key, value) in string_entries(entries)? {
        writeln!(out, "{}: {}", key, value)?;
    }
    Ok(())
}

/// Flatten a list of lists by one level, keeping the element objects.
///
/// # Errors
///
/// Returns `InvalidInput` naming the first element that is not a list.
pub fn flatten_2d_list<V: HostValue>(items: &[V]) -> Result<Vec<V>> {
    let mut flattened = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let inner = item.to_list().ok_or_else(|| {
            BridgeError::invalid(format!(
                "element {} must be a list, got {}",
                index,
                describe(item)
            ))
        })?;
        flattened.extend(inner);
    }
    tracing::debug!(rows = items.len(), len = flattened.len(), "flatten_2d_list");
    Ok(flattened)
}

fn describe<V: HostValue>(value: &V) -> String {
    value
        .type_name()
        .unwrap_or_else(|_| "<unknown>".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_get_int_list_filters_and_keeps_order() {
        let items = vec![
            Value::Int(1),
            Value::from("a"),
            Value::Int(2),
            Value::Float(3.5),
            Value::Int(3),
        ];
        assert_eq!(get_int_list(&items), vec![1, 2, 3]);
    }

    #[test]
    fn test_check_types_output() {
        let items = vec![Value::from("aa"), Value::Int(1), Value::complex(1.0, 4.0)];
        let mut out = Vec::new();
        check_types(&items, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Object type: str\nObject type: int\nObject type: complex\n"
        );
    }

    #[test]
    fn test_flatten_one_level() {
        let nested = vec![
            Value::list(vec![Value::Int(1), Value::Int(2)]),
            Value::list(vec![Value::Int(3)]),
            Value::list(vec![Value::Int(4), Value::list(vec![Value::Int(5)])]),
        ];
        let flat = flatten_2d_list(&nested).unwrap();
        assert_eq!(
            flat,
            vec![
                Value::Int(1),
                Value::Int(2),
                Value::Int(3),
                Value::Int(4),
                Value::list(vec![Value::Int(5)]),
            ]
        );
    }

    #[test]
    fn test_flatten_rejects_non_list() {
        let nested = vec![Value::list(vec![Value::Int(1)]), Value::Int(2)];
        let err = flatten_2d_list(&nested).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("element 1"));
    }

    #[test]
    fn test_iterate_dict_prints_in_order() {
        let dict = Value::dict([("cat", "meow"), ("dog", "woof"), ("cow", "moo")]);
        let mut out = Vec::new();
        iterate_dict(dict.as_dict().unwrap(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "cat: meow\ndog: woof\ncow: moo\n");
    }

    #[test]
    fn test_iterate_dict_rejects_non_string_value() {
        let dict = Value::dict([("cat", Value::Int(1))]);
        let mut out = Vec::new();
        let err = iterate_dict(dict.as_dict().unwrap(), &mut out).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(out.is_empty());
    }
}
