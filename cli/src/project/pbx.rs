//! # Property-List Value Quoting
//!
//! File: cli/src/project/pbx.rs
//!
//! Scalar values in a project document are written bare when they only use
//! `[A-Za-z0-9_$/:.]` and contain neither `//` nor `___`. A value shaped
//! like an object identifier is always quoted, so a bare 24-digit hex word
//! in the document is a reference. Anything else is wrapped in double quotes with `\`, `"`, newline and tab escaped. The
//! `pbx` Tera filter applies this rule inside the document template.
//!
use crate::project::ident::is_identifier;
use std::borrow::Cow;
use std::collections::HashMap;
use tera::Value;

/// Quotes `value` for use as a property-list scalar.
pub fn quote(value: &str) -> Cow<'_, str> {
    if !needs_quotes(value) {
        return Cow::Borrowed(value);
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.contains("//")
        || value.contains("___")
        || is_identifier(value)
        || !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '/' | ':' | '.'))
}

/// Tera filter: `{{ value | pbx }}`.
pub fn pbx_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = match value {
        Value::String(s) => quote(s).into_owned(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "YES".to_string(),
        Value::Bool(false) => "NO".to_string(),
        other => {
            return Err(tera::Error::msg(format!(
                "Filter `pbx` expects a scalar, got {}",
                other
            )))
        }
    };
    Ok(Value::String(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bare_values() {
        for bare in [
            "16.0",
            "gnu17",
            "YES_AGGRESSIVE",
            "wrapper.application",
            "BUILT_PRODUCTS_DIR",
            "Core/AppState.swift",
            "com.finora.Finora",
            "0",
        ] {
            assert_eq!(quote(bare), bare);
        }
    }

    #[test]
    fn test_quoted_values() {
        assert_eq!(quote(""), "\"\"");
        assert_eq!(quote("gnu++20"), "\"gnu++20\"");
        assert_eq!(quote("-Onone"), "\"-Onone\"");
        assert_eq!(quote("dwarf-with-dsym"), "\"dwarf-with-dsym\"");
        assert_eq!(quote("<group>"), "\"<group>\"");
        assert_eq!(quote("$(inherited)"), "\"$(inherited)\"");
        assert_eq!(quote("DEBUG $(inherited)"), "\"DEBUG $(inherited)\"");
        assert_eq!(quote("Xcode 14.0"), "\"Xcode 14.0\"");
        assert_eq!(quote("a//b"), "\"a//b\"");
        assert_eq!(quote("a___b"), "\"a___b\"");
        assert_eq!(
            quote("ABCDEF0123456789ABCDEF01"),
            "\"ABCDEF0123456789ABCDEF01\""
        );
    }

    #[test]
    fn test_escapes() {
        assert_eq!(quote("say \"hi\"\\\n\t"), "\"say \\\"hi\\\"\\\\\\n\\t\"");
    }

    #[test]
    fn test_filter_scalars() {
        let args = HashMap::new();
        assert_eq!(
            pbx_filter(&Value::String("<group>".into()), &args).unwrap(),
            Value::String("\"<group>\"".into())
        );
        assert_eq!(
            pbx_filter(&Value::Bool(false), &args).unwrap(),
            Value::String("NO".into())
        );
        assert_eq!(
            pbx_filter(&Value::from(2147483647_u64), &args).unwrap(),
            Value::String("2147483647".into())
        );
        assert!(pbx_filter(&Value::Array(vec![]), &args).is_err());
    }

    proptest! {
        #[test]
        fn prop_quoted_output_has_no_raw_specials(s in ".*") {
            let out = quote(&s);
            if out.starts_with('"') {
                let inner = &out[1..out.len() - 1];
                prop_assert!(!inner.contains('\n'));
                prop_assert!(!inner.contains('\t'));
                // Every quote inside is escaped.
                let unescaped = inner.replace("\\\\", "").replace("\\\"", "");
                prop_assert!(!unescaped.contains('"'));
            } else {
                prop_assert_eq!(out.as_ref(), s.as_str());
                prop_assert!(!s.is_empty());
            }
        }
    }
}
