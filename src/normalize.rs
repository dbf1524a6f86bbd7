/// Canonical form of a fighter name: trimmed, internal whitespace collapsed
/// to single spaces, title-cased. Returns `None` for missing/blank input so
/// the caller can drop the row instead of keying on an empty name.
pub fn canonicalize_name(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    Some(title_case(&collapsed))
}

// Mirrors str.title() semantics: a letter is uppercased when the previous
// character is not a letter, so "o'malley" becomes "O'Malley".
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Lenient numeric coercion: missing, blank or unparseable input is `None`,
/// never an error.
pub fn coerce_numeric(raw: Option<&str>) -> Option<f64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Parses a round duration of the exact shape "M:SS" into whole seconds.
///
/// The source feed only ever carries single-digit minutes; anything that does
/// not match one digit, a colon and two digits (including a hypothetical
/// two-digit minute value) is classified malformed and yields `None` rather
/// than a mis-parsed count.
pub fn parse_round_duration(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    let bytes = raw.as_bytes();
    if bytes.len() != 4 || bytes[1] != b':' {
        return None;
    }
    if !bytes[0].is_ascii_digit() || !bytes[2].is_ascii_digit() || !bytes[3].is_ascii_digit() {
        return None;
    }
    let minutes = i64::from(bytes[0] - b'0');
    let seconds = i64::from(bytes[2] - b'0') * 10 + i64::from(bytes[3] - b'0');
    Some(minutes * 60 + seconds)
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_collapses_and_title_cases() {
        assert_eq!(
            canonicalize_name(Some(" pat   Miocic ")),
            Some("Pat Miocic".to_string())
        );
        assert_eq!(
            canonicalize_name(Some("Pat Miocic")),
            Some("Pat Miocic".to_string())
        );
        assert_eq!(
            canonicalize_name(Some("sean o'malley")),
            Some("Sean O'Malley".to_string())
        );
        assert_eq!(canonicalize_name(Some("   ")), None);
        assert_eq!(canonicalize_name(None), None);
    }

    #[test]
    fn coerce_numeric_is_null_on_garbage() {
        assert_eq!(coerce_numeric(Some("182.88")), Some(182.88));
        assert_eq!(coerce_numeric(Some(" -140 ")), Some(-140.0));
        assert_eq!(coerce_numeric(Some("")), None);
        assert_eq!(coerce_numeric(Some("n/a")), None);
        assert_eq!(coerce_numeric(None), None);
    }

    #[test]
    fn round_duration_exact_shape_only() {
        assert_eq!(parse_round_duration(Some("3:45")), Some(225));
        assert_eq!(parse_round_duration(Some("0:07")), Some(7));
        assert_eq!(parse_round_duration(Some("5:00")), Some(300));
        assert_eq!(parse_round_duration(None), None);
        // Malformed shapes are absorbed as null, not mis-parsed.
        assert_eq!(parse_round_duration(Some("12:34")), None);
        assert_eq!(parse_round_duration(Some("3:5")), None);
        assert_eq!(parse_round_duration(Some("345")), None);
        assert_eq!(parse_round_duration(Some("x:yz")), None);
    }
}
