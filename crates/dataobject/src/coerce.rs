//! Scalar coercion engine.
//!
//! Pure functions mapping a stored value and a requested target type to a
//! coerced value. Scalar coercions are total and never fail; information may
//! be lost (a float truncates to an int) but the conversion itself cannot
//! error. Date-time coercion is the one fallible path.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::{DataObjectError, Result};
use crate::value::{Value, format_date_time};

/// Naive date-time formats tried when coercing a string, after RFC 3339.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Date-only formats, resolved to midnight UTC.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Coerce a stored value to an integer, truncating toward zero.
pub(crate) fn to_int(value: &Value) -> i64 {
    match value {
        Value::Null => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Int(i) => *i,
        Value::Float(f) => *f as i64,
        Value::String(s) => numeric_prefix(s) as i64,
        Value::DateTime(dt) => dt.timestamp(),
        Value::Array(_) | Value::Object(_) => 0,
    }
}

/// Coerce a stored value to a float.
pub(crate) fn to_float(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Int(i) => *i as f64,
        Value::Float(f) => *f,
        Value::String(s) => numeric_prefix(s),
        Value::DateTime(dt) => dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_micros()) / 1e6,
        Value::Array(_) | Value::Object(_) => 0.0,
    }
}

/// Coerce a stored value to its string form.
///
/// Booleans follow the original convention: true becomes `"1"` and false the
/// empty string. Floats render as their shortest round-trip decimal text.
pub(crate) fn to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => {
            if *b {
                "1".to_string()
            } else {
                String::new()
            }
        }
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::String(s) => s.clone(),
        Value::DateTime(dt) => format_date_time(dt),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Coerce a stored value to a boolean.
///
/// Only the empty string is false; any other string, including `"0"`, is
/// true. Numbers are false exactly at zero.
pub(crate) fn to_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Int(i) => *i != 0,
        Value::Float(f) => *f != 0.0,
        Value::String(s) => !s.is_empty(),
        Value::DateTime(_) | Value::Object(_) => true,
        Value::Array(items) => !items.is_empty(),
    }
}

/// Coerce a stored value to a UTC date-time.
///
/// Integers are Unix epoch seconds, floats add microsecond precision
/// (rounded), and strings are tried against RFC 3339 and the fixed format
/// lists above. Everything else fails.
pub(crate) fn to_date_time(value: &Value) -> Result<DateTime<Utc>> {
    match value {
        Value::DateTime(dt) => Ok(*dt),
        Value::Int(secs) => DateTime::from_timestamp(*secs, 0)
            .ok_or_else(|| DataObjectError::DateTimeCoercion(format!("epoch seconds {secs}"))),
        Value::Float(secs) => {
            let micros = (secs * 1e6).round();
            if !micros.is_finite() || micros < i64::MIN as f64 || micros > i64::MAX as f64 {
                return Err(DataObjectError::DateTimeCoercion(format!(
                    "epoch seconds {secs}"
                )));
            }
            DateTime::from_timestamp_micros(micros as i64)
                .ok_or_else(|| DataObjectError::DateTimeCoercion(format!("epoch seconds {secs}")))
        }
        Value::String(text) => parse_date_time_str(text)
            .ok_or_else(|| DataObjectError::DateTimeCoercion(format!("string '{text}'"))),
        other => Err(DataObjectError::DateTimeCoercion(
            other.type_name().to_string(),
        )),
    }
}

fn parse_date_time_str(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date.and_time(NaiveTime::MIN).and_utc());
        }
    }

    None
}

/// Parse the leading numeric prefix of a string, returning 0.0 when the
/// string does not start with a number.
///
/// Accepts an optional sign, decimal digits, an optional fractional part and
/// an optional exponent. Trailing non-numeric text is ignored.
fn numeric_prefix(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut saw_digit = end > int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || saw_digit {
            end = frac_end;
            saw_digit = saw_digit || frac_end > frac_start;
        }
    }

    if saw_digit && end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    if !saw_digit {
        return 0.0;
    }

    trimmed[..end].parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_prefix() {
        assert_eq!(numeric_prefix("3.14159"), 3.14159);
        assert_eq!(numeric_prefix("12abc"), 12.0);
        assert_eq!(numeric_prefix("-3.9kg"), -3.9);
        assert_eq!(numeric_prefix("  42"), 42.0);
        assert_eq!(numeric_prefix("1e3"), 1000.0);
        assert_eq!(numeric_prefix(".5"), 0.5);
        assert_eq!(numeric_prefix("abc"), 0.0);
        assert_eq!(numeric_prefix(""), 0.0);
        assert_eq!(numeric_prefix("-"), 0.0);
    }

    #[test]
    fn test_to_int() {
        assert_eq!(to_int(&Value::String("3.14159".into())), 3);
        assert_eq!(to_int(&Value::Float(3.99)), 3);
        assert_eq!(to_int(&Value::Float(-3.99)), -3);
        assert_eq!(to_int(&Value::Bool(true)), 1);
        assert_eq!(to_int(&Value::Bool(false)), 0);
        assert_eq!(to_int(&Value::String("nonsense".into())), 0);
    }

    #[test]
    fn test_to_float() {
        assert_eq!(to_float(&Value::Int(1)), 1.0);
        assert_eq!(to_float(&Value::String("3.14159".into())), 3.14159);
        assert_eq!(to_float(&Value::Bool(true)), 1.0);
        assert_eq!(to_float(&Value::Bool(false)), 0.0);
    }

    #[test]
    fn test_to_string() {
        assert_eq!(to_string(&Value::Bool(true)), "1");
        assert_eq!(to_string(&Value::Bool(false)), "");
        assert_eq!(to_string(&Value::Int(42)), "42");
        assert_eq!(to_string(&Value::Float(3.14159)), "3.14159");
        assert_eq!(to_string(&Value::Float(1.0)), "1");
    }

    #[test]
    fn test_to_bool() {
        assert!(!to_bool(&Value::String(String::new())));
        assert!(to_bool(&Value::String("something".into())));
        assert!(!to_bool(&Value::Int(0)));
        assert!(to_bool(&Value::Int(2)));
        assert!(!to_bool(&Value::Float(0.0)));
        assert!(to_bool(&Value::Float(3.14159)));
        assert!(!to_bool(&Value::Null));
    }

    #[test]
    fn test_to_date_time_from_int() {
        let dt = to_date_time(&Value::Int(0)).unwrap();
        assert_eq!(dt.timestamp(), 0);

        let dt = to_date_time(&Value::Int(576_264_065)).unwrap();
        assert_eq!(dt.to_rfc3339(), "1988-04-05T17:21:05+00:00");
    }

    #[test]
    fn test_to_date_time_from_float_keeps_microseconds() {
        let dt = to_date_time(&Value::Float(576_264_065.000_105)).unwrap();
        assert_eq!(dt.timestamp(), 576_264_065);
        assert_eq!(dt.timestamp_subsec_micros(), 105);
    }

    #[test]
    fn test_to_date_time_from_string() {
        let dt = to_date_time(&Value::String("1988-04-05T17:21:05Z".into())).unwrap();
        assert_eq!(dt.timestamp(), 576_264_065);

        let dt = to_date_time(&Value::String("1988-04-05".into())).unwrap();
        assert_eq!(dt.to_rfc3339(), "1988-04-05T00:00:00+00:00");
    }

    #[test]
    fn test_to_date_time_failures() {
        assert!(to_date_time(&Value::String("not a date".into())).is_err());
        assert!(to_date_time(&Value::Bool(true)).is_err());
        assert!(to_date_time(&Value::Null).is_err());
    }
}
