use super::Value;

/// Parse a scalar literal from a string-only format into a typed value
///
/// Recognizes booleans (`true`/`false`, any case), integers, floats and
/// quoted strings. Anything else stays a plain string.
pub fn parse_scalar(raw: &str) -> Value {
    let s = raw.trim();

    if let Some(unquoted) = strip_quotes(s) {
        return Value::String(unquoted.to_string());
    }

    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    if looks_numeric(s) {
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return Value::Float(f);
        }
    }

    Value::String(s.to_string())
}

fn strip_quotes(s: &str) -> Option<&str> {
    if s.len() < 2 {
        return None;
    }
    let (first, last) = (s.as_bytes()[0], s.as_bytes()[s.len() - 1]);
    if first == last && (first == b'"' || first == b'\'') {
        Some(&s[1..s.len() - 1])
    } else {
        None
    }
}

// f64::from_str accepts "inf" and "NaN", which must stay strings here
fn looks_numeric(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    digits.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && digits.chars().any(|c| c.is_ascii_digit())
}
