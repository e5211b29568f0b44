use shared::error::EditorError;

/// Display form of a step value: one decimal place.
pub fn format_value(value: f32) -> String {
    format!("{value:.1}")
}

/// Parses user input as a step value. `.` is the only decimal separator.
pub fn parse_value(raw: &str) -> Result<f32, EditorError> {
    match raw.trim().parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(EditorError::Parse {
            raw: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_one_decimal() {
        assert_eq!(format_value(10.0), "10.0");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(-1.26), "-1.3");
    }

    #[test]
    fn parses_trimmed_decimal_input() {
        assert_eq!(parse_value(" 45.0 "), Ok(45.0));
        assert_eq!(parse_value("-3"), Ok(-3.0));
        assert_eq!(parse_value("1e2"), Ok(100.0));
    }

    #[test]
    fn rejects_non_numeric_and_non_finite_input() {
        for raw in ["not-a-number", "", "4,5", "NaN", "inf", "1.0.0"] {
            assert!(
                matches!(parse_value(raw), Err(EditorError::Parse { .. })),
                "{raw:?} should be rejected"
            );
        }
    }
}
