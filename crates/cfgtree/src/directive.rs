//! directive decoding
//!
//! A directive is a single `set`/`unset` statement. The caller (the section
//! parser) hands us the line with its indentation already stripped, plus the
//! section path it was found under - the path is what decides the
//! scalar-vs-list question via [crate::policy].

use crate::{policy, ParseError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::SerializeSeq;
use serde::Serializer;

/// Decoded value of one directive
///
/// `Unset` serializes as the string `"unset"` so cleared fields stay visible
/// in exported trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
    Unset,
}

static QUOTED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]+)""#).unwrap());

/// Decode one `set`/`unset` line found under `path`.
///
/// Returns the field name and its value. Lines that do not match the
/// grammar (`set <field> <value...>` / `unset <field>`) are a
/// [ParseError::MalformedDirective]; whether that aborts anything is the
/// caller's call.
pub fn decode(line: &str, path: &[String]) -> Result<(String, Value), ParseError> {
    if let Some(rest) = line.strip_prefix("unset ") {
        let field = rest.trim();
        if field.is_empty() || field.contains(char::is_whitespace) {
            return Err(ParseError::MalformedDirective(line.to_string()));
        }
        return Ok((field.to_string(), Value::Unset));
    }

    let Some(rest) = line.strip_prefix("set ") else {
        return Err(ParseError::MalformedDirective(line.to_string()));
    };
    let Some((field, value)) = rest.split_once(' ') else {
        return Err(ParseError::MalformedDirective(line.to_string()));
    };
    let value = value.trim();
    if field.is_empty() || value.is_empty() {
        return Err(ParseError::MalformedDirective(line.to_string()));
    }
    let field = field.replace('"', "");

    if policy::is_list(path, &field) {
        let items = QUOTED_ITEM
            .captures_iter(value)
            .map(|captures| captures[1].to_string())
            .collect();
        Ok((field, Value::List(items)))
    } else {
        Ok((field, Value::Scalar(strip_surrounding_quotes(value).to_string())))
    }
}

/// Strip one surrounding quote pair, and only that.
///
/// `"A" "B"` stays verbatim - stripping its outer quotes would mangle what
/// the schema says is a scalar. Only a value that is a single quoted token
/// (no interior quotes) loses its quotes.
fn strip_surrounding_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .filter(|inner| !inner.contains('"'))
        .unwrap_or(value)
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Scalar(value) => serializer.serialize_str(value),
            Value::List(items) => {
                let mut ser = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    ser.serialize_element(item)?;
                }
                ser.end()
            }
            Value::Unset => serializer.serialize_str("unset"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn scalar_loses_its_surrounding_quotes() {
        let (field, value) = decode("set hostname \"fw1\"", &[]).unwrap();
        assert_eq!(field, "hostname");
        assert_eq!(value, Value::Scalar("fw1".to_string()));
    }

    #[test]
    fn unquoted_scalar_is_verbatim() {
        let (_, value) = decode("set primary 10.254.1.1", &[]).unwrap();
        assert_eq!(value, Value::Scalar("10.254.1.1".to_string()));
    }

    #[test]
    fn scalar_with_embedded_quotes_is_never_reinterpreted() {
        // same tokens as a list directive, but the path resolves to scalar
        let (_, value) = decode("set srcaddr \"A\" \"B\"", &path(&["system", "global"])).unwrap();
        assert_eq!(value, Value::Scalar("\"A\" \"B\"".to_string()));
    }

    #[test]
    fn list_field_collects_quoted_items() {
        let (_, value) = decode(
            "set srcaddr \"A\" \"B\"",
            &path(&["firewall", "policy", "1"]),
        )
        .unwrap();
        assert_eq!(
            value,
            Value::List(vec!["A".to_string(), "B".to_string()])
        );
    }

    #[test]
    fn list_field_without_quoted_items_is_empty() {
        let (_, value) = decode("set srcaddr all", &path(&["firewall", "policy", "1"])).unwrap();
        assert_eq!(value, Value::List(vec![]));
    }

    #[test]
    fn unset_marks_the_field() {
        let (field, value) = decode("unset allowaccess", &[]).unwrap();
        assert_eq!(field, "allowaccess");
        assert_eq!(value, Value::Unset);
    }

    #[test]
    fn malformed_lines_are_rejected() {
        for line in ["set hostname", "set  ", "unset a b", "sett x y", "config x"] {
            assert_eq!(
                decode(line, &[]).unwrap_err(),
                ParseError::MalformedDirective(line.to_string()),
                "line {line:?} must not decode",
            );
        }
    }
}
