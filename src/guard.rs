//! Argument guards for string inputs.
//!
//! Each check either hands the value back or returns a [`GuardError`] naming
//! the offending parameter. Guards never recover internally; callers
//! propagate the error with `?`.
//!
//! ```
//! use nested_partials::guard;
//!
//! assert!(guard::not_blank("name", "Widget").is_ok());
//! assert!(guard::not_blank("name", "   ").is_err());
//! assert!(guard::len_in_range("suffix", "g", 1, 32).is_ok());
//! ```

use thiserror::Error;

/// Result type for guard checks.
pub type GuardResult<T> = Result<T, GuardError>;

/// A violated precondition on a named parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    #[error("parameter '{parameter}' must not be empty")]
    Empty { parameter: String },

    #[error("parameter '{parameter}' must not be empty or whitespace-only")]
    Blank { parameter: String },

    #[error("parameter '{parameter}' must be none or empty, got '{value}'")]
    NotEmpty { parameter: String, value: String },

    #[error("parameter '{parameter}' must have length >= {min}, got {len}")]
    TooShort {
        parameter: String,
        len: usize,
        min: usize,
    },

    #[error("parameter '{parameter}' must have length <= {max}, got {len}")]
    TooLong {
        parameter: String,
        len: usize,
        max: usize,
    },

    #[error("parameter '{parameter}' must have length in [{min}, {max}], got {len}")]
    OutOfRange {
        parameter: String,
        len: usize,
        min: usize,
        max: usize,
    },

    #[error("parameter '{parameter}' value '{value}' is not a valid identifier: {reason}")]
    NotIdentifier {
        parameter: String,
        value: String,
        reason: String,
    },
}

/// Fails if `value` has no characters.
pub fn not_empty<'a>(parameter: &str, value: &'a str) -> GuardResult<&'a str> {
    if value.is_empty() {
        return Err(GuardError::Empty {
            parameter: parameter.to_string(),
        });
    }
    Ok(value)
}

/// Fails if `value` is empty or whitespace-only.
pub fn not_blank<'a>(parameter: &str, value: &'a str) -> GuardResult<&'a str> {
    if value.trim().is_empty() {
        return Err(GuardError::Blank {
            parameter: parameter.to_string(),
        });
    }
    Ok(value)
}

/// Fails if `value` is present and has characters.
pub fn none_or_empty(parameter: &str, value: Option<&str>) -> GuardResult<()> {
    match value {
        None | Some("") => Ok(()),
        Some(other) => Err(GuardError::NotEmpty {
            parameter: parameter.to_string(),
            value: other.to_string(),
        }),
    }
}

/// Fails if `value` has fewer than `min` characters.
pub fn min_len<'a>(parameter: &str, value: &'a str, min: usize) -> GuardResult<&'a str> {
    let len = value.chars().count();
    if len < min {
        return Err(GuardError::TooShort {
            parameter: parameter.to_string(),
            len,
            min,
        });
    }
    Ok(value)
}

/// Fails if `value` has more than `max` characters.
pub fn max_len<'a>(parameter: &str, value: &'a str, max: usize) -> GuardResult<&'a str> {
    let len = value.chars().count();
    if len > max {
        return Err(GuardError::TooLong {
            parameter: parameter.to_string(),
            len,
            max,
        });
    }
    Ok(value)
}

/// Fails unless `min <= len(value) <= max` (inclusive, in characters).
pub fn len_in_range<'a>(
    parameter: &str,
    value: &'a str,
    min: usize,
    max: usize,
) -> GuardResult<&'a str> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(GuardError::OutOfRange {
            parameter: parameter.to_string(),
            len,
            min,
            max,
        });
    }
    Ok(value)
}

/// Fails unless `value` is a single identifier.
///
/// Accepts an optional leading `@` (verbatim identifier), then a letter or
/// underscore, then letters, digits, or underscores.
pub fn identifier<'a>(parameter: &str, value: &'a str) -> GuardResult<&'a str> {
    let reject = |reason: String| GuardError::NotIdentifier {
        parameter: parameter.to_string(),
        value: value.to_string(),
        reason,
    };

    let body = value.strip_prefix('@').unwrap_or(value);
    let mut chars = body.chars();
    match chars.next() {
        None => return Err(reject("identifier has no characters".into())),
        Some(first) if !first.is_alphabetic() && first != '_' => {
            return Err(reject(format!(
                "must start with a letter or underscore, found '{first}'"
            )));
        }
        Some(_) => {}
    }
    if let Some(bad) = chars.find(|c| !c.is_alphanumeric() && *c != '_') {
        return Err(reject(format!("contains invalid character '{bad}'")));
    }
    Ok(value)
}

/// Reserved keywords; usable as names only with a leading `@`.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Fails if `value` is a bare reserved keyword. `@`-prefixed forms pass.
pub fn not_keyword<'a>(parameter: &str, value: &'a str) -> GuardResult<&'a str> {
    if RESERVED_KEYWORDS.contains(&value) {
        return Err(GuardError::NotIdentifier {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: format!("'{value}' is a reserved keyword, write '@{value}' to use it as a name"),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_are_distinct() {
        assert!(not_empty("p", " ").is_ok());
        assert_eq!(
            not_empty("p", ""),
            Err(GuardError::Empty {
                parameter: "p".into()
            })
        );
        assert!(not_blank("p", " \t ").is_err());
        assert_eq!(not_blank("p", " x "), Ok(" x "));
    }

    #[test]
    fn none_or_empty_accepts_absent_values() {
        assert!(none_or_empty("p", None).is_ok());
        assert!(none_or_empty("p", Some("")).is_ok());
        let err = none_or_empty("p", Some("x")).unwrap_err();
        assert!(err.to_string().contains("must be none or empty"));
    }

    #[test]
    fn size_checks_count_characters() {
        assert!(min_len("p", "ab", 2).is_ok());
        assert!(min_len("p", "a", 2).is_err());
        assert!(max_len("p", "äöü", 3).is_ok());
        assert!(max_len("p", "äöüß", 3).is_err());
    }

    #[test]
    fn len_in_range_is_inclusive() {
        assert!(len_in_range("p", "a", 1, 3).is_ok());
        assert!(len_in_range("p", "abc", 1, 3).is_ok());
        assert!(len_in_range("p", "", 1, 3).is_err());
        let err = len_in_range("suffix", "abcd", 1, 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "parameter 'suffix' must have length in [1, 3], got 4"
        );
    }

    #[test]
    fn identifier_rules() {
        for ok in ["Widget", "_private", "Item2", "@class", "Ünïcode"] {
            assert!(identifier("name", ok).is_ok(), "should accept {ok}");
        }
        for bad in ["", "@", "1Item", "Item-2", "A.B", "A B", "List<T>"] {
            assert!(identifier("name", bad).is_err(), "should reject {bad}");
        }
    }

    #[test]
    fn keywords_need_verbatim_prefix() {
        for kw in ["class", "int", "namespace", "void"] {
            assert!(not_keyword("name", kw).is_err(), "should reject {kw}");
            assert!(not_keyword("name", &format!("@{kw}")).is_ok());
        }
        // Contextual keywords and other casings are ordinary names.
        for ok in ["record", "var", "Class", "value"] {
            assert!(not_keyword("name", ok).is_ok(), "should accept {ok}");
        }
        let msg = not_keyword("hierarchy[0].name", "int").unwrap_err().to_string();
        assert!(msg.contains("hierarchy[0].name"));
        assert!(msg.contains("'@int'"));
    }

    #[test]
    fn errors_name_the_parameter() {
        let err = identifier("hierarchy[0].name", "1A").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("hierarchy[0].name"));
        assert!(msg.contains("'1'"));
    }
}
