use crate::palette::Effect;
use crate::text::Alignment;
use crate::value::{Ternary, Value, format_datetime, format_float};

/// How one value prints: text, style class and alignment hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldContents {
    pub text: String,
    pub effect: Effect,
    pub align: Alignment,
}

impl FieldContents {
    fn new(text: String, effect: Effect, align: Alignment) -> Self {
        Self { text, effect, align }
    }

    fn absent() -> Self {
        Self::new(String::new(), Effect::NoEffect, Alignment::NotAligned)
    }

    /// True for the empty "no content" rendering of NULL and UNKNOWN
    /// outside text tables.
    pub fn is_absent(&self) -> bool {
        self.effect == Effect::NoEffect && self.text.is_empty()
    }
}

/// Single source of truth for how a value prints, shared by every encoder.
///
/// NULL and UNKNOWN print visibly (`NULL`, `UNKNOWN`) only inside a
/// rendered text table; every other format receives an empty field.
pub fn convert_field_contents(value: &Value, for_text_table: bool) -> FieldContents {
    match value {
        Value::String(s) => FieldContents::new(s.clone(), Effect::String, Alignment::NotAligned),
        Value::Integer(i) => FieldContents::new(i.to_string(), Effect::Number, Alignment::Right),
        Value::Float(f) => FieldContents::new(format_float(*f), Effect::Number, Alignment::Right),
        Value::Boolean(b) => FieldContents::new(b.to_string(), Effect::Boolean, Alignment::Centering),
        Value::Ternary(t) => {
            if for_text_table {
                FieldContents::new(t.to_string(), Effect::Ternary, Alignment::Centering)
            } else {
                match t.to_bool() {
                    Some(b) => FieldContents::new(b.to_string(), Effect::Boolean, Alignment::Centering),
                    None => FieldContents::absent(),
                }
            }
        }
        Value::Datetime(dt) => {
            FieldContents::new(format_datetime(dt), Effect::Datetime, Alignment::NotAligned)
        }
        Value::Null => {
            if for_text_table {
                FieldContents::new("NULL".to_string(), Effect::Null, Alignment::Centering)
            } else {
                FieldContents::absent()
            }
        }
    }
}

/// Whether a value renders as "no content" outside text tables.
pub fn is_absent_value(value: &Value) -> bool {
    value.is_null() || matches!(value, Value::Ternary(Ternary::Unknown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn contents(v: Value, table: bool) -> (String, Effect, Alignment) {
        let c = convert_field_contents(&v, table);
        (c.text, c.effect, c.align)
    }

    #[test]
    fn scalar_rules() {
        assert_eq!(
            contents(Value::string("abc"), false),
            ("abc".to_string(), Effect::String, Alignment::NotAligned)
        );
        assert_eq!(
            contents(Value::Integer(-7), false),
            ("-7".to_string(), Effect::Number, Alignment::Right)
        );
        assert_eq!(
            contents(Value::Float(2.5), true),
            ("2.5".to_string(), Effect::Number, Alignment::Right)
        );
        assert_eq!(
            contents(Value::Boolean(false), false),
            ("false".to_string(), Effect::Boolean, Alignment::Centering)
        );

        let dt = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2020, 5, 6, 7, 8, 9).unwrap();
        assert_eq!(
            contents(Value::Datetime(dt), false),
            ("2020-05-06T07:08:09Z".to_string(), Effect::Datetime, Alignment::NotAligned)
        );
    }

    #[test]
    fn ternary_outside_table_collapses_to_boolean() {
        assert_eq!(
            contents(Value::Ternary(Ternary::True), false),
            ("true".to_string(), Effect::Boolean, Alignment::Centering)
        );
        assert_eq!(
            contents(Value::Ternary(Ternary::False), true),
            ("FALSE".to_string(), Effect::Ternary, Alignment::Centering)
        );
    }

    #[test]
    fn unknown_and_null_are_absent_outside_table() {
        for v in [Value::Ternary(Ternary::Unknown), Value::Null] {
            let c = convert_field_contents(&v, false);
            assert!(c.is_absent());
            assert_eq!(c.align, Alignment::NotAligned);
            assert!(is_absent_value(&v));
        }

        assert_eq!(
            contents(Value::Ternary(Ternary::Unknown), true),
            ("UNKNOWN".to_string(), Effect::Ternary, Alignment::Centering)
        );
        assert_eq!(
            contents(Value::Null, true),
            ("NULL".to_string(), Effect::Null, Alignment::Centering)
        );
    }

    #[test]
    fn empty_string_is_not_absent() {
        assert!(!convert_field_contents(&Value::string(""), false).is_absent());
        assert!(!is_absent_value(&Value::string("")));
    }
}
