use crate::geometry::DEFAULT_CURVATURE;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, StrumDisplay)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AttributeName {
    Value,
    Curvature,
    Disabled,
    Infinite,
}

/// A host attribute change, already parsed into its typed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attribute {
    Value(i64),
    Curvature(f64),
    Disabled(bool),
    Infinite(bool),
}

impl Attribute {
    /// Parses a raw attribute the way markup attributes behave: numbers fall
    /// back to their default when missing or malformed, flags are set when
    /// present and not `"false"`.
    pub fn parse(name: AttributeName, raw: Option<&str>) -> Self {
        match name {
            AttributeName::Value => Self::Value(number(raw, 0.0).round() as i64),
            AttributeName::Curvature => Self::Curvature(number(raw, DEFAULT_CURVATURE)),
            AttributeName::Disabled => Self::Disabled(flag(raw)),
            AttributeName::Infinite => Self::Infinite(flag(raw)),
        }
    }

    pub fn name(&self) -> AttributeName {
        match self {
            Self::Value(_) => AttributeName::Value,
            Self::Curvature(_) => AttributeName::Curvature,
            Self::Disabled(_) => AttributeName::Disabled,
            Self::Infinite(_) => AttributeName::Infinite,
        }
    }
}

fn number(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

fn flag(raw: Option<&str>) -> bool {
    raw.is_some_and(|s| s != "false")
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_name_parsing() {
        let cases = vec![
            ("value", AttributeName::Value),
            ("Curvature", AttributeName::Curvature),
            ("DISABLED", AttributeName::Disabled),
            ("infinite", AttributeName::Infinite),
        ];

        for (raw, expected) in cases {
            assert_eq!(raw.parse::<AttributeName>().unwrap(), expected);
        }
        assert!("color".parse::<AttributeName>().is_err());
    }

    #[test]
    fn test_names_round_trip_through_display() {
        for name in AttributeName::iter() {
            assert_eq!(name.to_string().parse::<AttributeName>().unwrap(), name);
        }
    }

    #[test]
    fn test_numbers_fall_back_to_defaults() {
        assert_eq!(Attribute::parse(AttributeName::Value, Some("3")), Attribute::Value(3));
        assert_eq!(Attribute::parse(AttributeName::Value, Some("abc")), Attribute::Value(0));
        assert_eq!(Attribute::parse(AttributeName::Value, None), Attribute::Value(0));
        assert_eq!(
            Attribute::parse(AttributeName::Curvature, Some("NaN")),
            Attribute::Curvature(DEFAULT_CURVATURE)
        );
        assert_eq!(
            Attribute::parse(AttributeName::Curvature, Some(" 12.5 ")),
            Attribute::Curvature(12.5)
        );
    }

    #[test]
    fn test_flags_are_presence_based() {
        assert_eq!(Attribute::parse(AttributeName::Infinite, Some("")), Attribute::Infinite(true));
        assert_eq!(
            Attribute::parse(AttributeName::Infinite, Some("false")),
            Attribute::Infinite(false)
        );
        assert_eq!(Attribute::parse(AttributeName::Disabled, None), Attribute::Disabled(false));
        assert_eq!(Attribute::parse(AttributeName::Disabled, Some("yes")).name(), AttributeName::Disabled);
    }
}
