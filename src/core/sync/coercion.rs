//! Value coercion before load
//!
//! Sink columns are matched against the configured pattern table by name.
//! The first rule whose pattern appears in the column name (ignoring case)
//! decides; unmatched columns pass through.

use crate::adapters::database::SqlValue;
use crate::config::{Coercion, CoercionRule};

/// Coercion for `column` under `rules`
///
/// # Examples
///
/// ```
/// use ouvidoria_sync::config::schema::default_coercion_rules;
/// use ouvidoria_sync::config::Coercion;
/// use ouvidoria_sync::core::sync::coercion::coercion_for;
///
/// let rules = default_coercion_rules();
/// assert_eq!(coercion_for("SLA_NUM", &rules), Coercion::Numeric);
/// assert_eq!(coercion_for("DATA_NUM_X", &rules), Coercion::Passthrough);
/// assert_eq!(coercion_for("STATUS", &rules), Coercion::Passthrough);
/// ```
pub fn coercion_for(column: &str, rules: &[CoercionRule]) -> Coercion {
    let column = column.to_uppercase();
    rules
        .iter()
        .find(|rule| column.contains(&rule.pattern.to_uppercase()))
        .map(|rule| rule.rule)
        .unwrap_or(Coercion::Passthrough)
}

/// Coerce one report value
///
/// Missing and empty values load as NULL. Numeric coercion turns anything
/// that does not parse as a finite number into NULL.
pub fn coerce_value(value: Option<&str>, coercion: Coercion) -> SqlValue {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return SqlValue::Null;
    };

    match coercion {
        Coercion::Passthrough => SqlValue::Text(value.to_string()),
        Coercion::Numeric => value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(SqlValue::Number)
            .unwrap_or(SqlValue::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::default_coercion_rules;
    use test_case::test_case;

    #[test_case("DATA_CRIACAO", Coercion::Passthrough ; "date column")]
    #[test_case("NUM_DIAS", Coercion::Numeric ; "numeric column")]
    #[test_case("num_dias", Coercion::Numeric ; "lowercase numeric column")]
    #[test_case("DATA_NUM", Coercion::Passthrough ; "first matching rule wins")]
    #[test_case("FILTRO", Coercion::Passthrough ; "unmatched column")]
    fn test_coercion_for(column: &str, expected: Coercion) {
        assert_eq!(coercion_for(column, &default_coercion_rules()), expected);
    }

    #[test]
    fn test_coercion_for_custom_order() {
        let rules = vec![
            CoercionRule::new("num", Coercion::Numeric),
            CoercionRule::new("DATA", Coercion::Passthrough),
        ];
        assert_eq!(coercion_for("DATA_NUM", &rules), Coercion::Numeric);
    }

    #[test_case(Some("5"), Coercion::Numeric, SqlValue::Number(5.0) ; "integer text")]
    #[test_case(Some(" 2.5 "), Coercion::Numeric, SqlValue::Number(2.5) ; "padded decimal")]
    #[test_case(Some("cinco"), Coercion::Numeric, SqlValue::Null ; "invalid number")]
    #[test_case(Some("NaN"), Coercion::Numeric, SqlValue::Null ; "nan")]
    #[test_case(Some(""), Coercion::Numeric, SqlValue::Null ; "empty numeric")]
    #[test_case(Some(""), Coercion::Passthrough, SqlValue::Null ; "empty text")]
    #[test_case(None, Coercion::Passthrough, SqlValue::Null ; "missing")]
    #[test_case(Some("29/01/2024"), Coercion::Passthrough, SqlValue::Text("29/01/2024".to_string()) ; "text")]
    fn test_coerce_value(value: Option<&str>, coercion: Coercion, expected: SqlValue) {
        assert_eq!(coerce_value(value, coercion), expected);
    }
}
