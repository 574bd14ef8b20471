use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CoordinateField, ProcessingError, Result};
use crate::utils::constants::{MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
use crate::utils::glyphs::normalize_glyphs;

/// Pattern over glyph-normalized text: degrees, minutes, seconds, optional hemisphere.
///
/// The hemisphere letter must stand alone; the first letter of a trailing
/// word such as `szer.` or `wsch.` is not a hemisphere.
static DMS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([+-]?[0-9]+)[°\s]+([0-9]+)['\s]+([0-9]+(?:[.,][0-9]+)?)["\s]*(?:([NSEWnsew])\b)?"#)
        .expect("DMS pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    pub fn is_negative(self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }

    pub fn letter(self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
            Hemisphere::East => 'E',
            Hemisphere::West => 'W',
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The pieces recognised in a DMS string, before any arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DmsComponents {
    /// Degree component carried a leading minus sign
    pub negative: bool,
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
    pub hemisphere: Option<Hemisphere>,
}

impl DmsComponents {
    /// Combine the components into signed decimal degrees.
    ///
    /// A hemisphere letter decides the sign when present; otherwise the
    /// literal sign of the degree component is kept.
    pub fn to_decimal(&self) -> f64 {
        let magnitude = self.degrees.abs() + self.minutes / 60.0 + self.seconds / 3600.0;

        let negative = match self.hemisphere {
            Some(hemisphere) => hemisphere.is_negative(),
            None => self.negative,
        };

        if negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

/// Match a DMS coordinate string and return its components.
pub fn parse_components(text: &str) -> Result<DmsComponents> {
    let normalized = normalize_glyphs(text.trim());

    let caps = DMS_PATTERN
        .captures(&normalized)
        .ok_or_else(|| ProcessingError::invalid_format(text))?;

    let degree_text = &caps[1];
    let number = |raw: &str| -> Result<f64> {
        raw.replace(',', ".")
            .parse::<f64>()
            .map_err(|_| ProcessingError::invalid_format(text))
    };

    Ok(DmsComponents {
        negative: degree_text.starts_with('-'),
        degrees: number(degree_text)?,
        minutes: number(&caps[2])?,
        seconds: number(&caps[3])?,
        hemisphere: caps
            .get(4)
            .and_then(|m| m.as_str().chars().next())
            .and_then(Hemisphere::from_letter),
    })
}

/// Convert a DMS string such as `52°14′30″N` to signed decimal degrees
///
/// # Examples
/// ```
/// use release_points::utils::dms_to_decimal;
///
/// let decimal = dms_to_decimal("10°20′30.5″S").unwrap();
/// assert!((decimal + 10.341805).abs() < 0.000001);
/// ```
pub fn dms_to_decimal(text: &str) -> Result<f64> {
    parse_components(text).map(|components| components.to_decimal())
}

/// Format decimal degrees as `D°M′S.ss″H` for the given axis.
pub fn decimal_to_dms(decimal: f64, axis: CoordinateField) -> String {
    let hemisphere = match (axis, decimal < 0.0) {
        (CoordinateField::Latitude, false) => Hemisphere::North,
        (CoordinateField::Latitude, true) => Hemisphere::South,
        (CoordinateField::Longitude, false) => Hemisphere::East,
        (CoordinateField::Longitude, true) => Hemisphere::West,
    };

    // Work in hundredths of a second so rounding carries into minutes and degrees
    let hundredths = (decimal.abs() * 360_000.0).round() as u64;
    let degrees = hundredths / 360_000;
    let minutes = (hundredths % 360_000) / 6_000;
    let seconds = (hundredths % 6_000) as f64 / 100.0;

    format!("{}°{}′{:05.2}″{}", degrees, minutes, seconds, hemisphere)
}

/// Check a decimal value against the bounds of its axis
pub fn validate_coordinate_range(value: f64, axis: CoordinateField) -> Result<()> {
    let (min, max) = match axis {
        CoordinateField::Latitude => (MIN_LAT, MAX_LAT),
        CoordinateField::Longitude => (MIN_LON, MAX_LON),
    };

    if !(min..=max).contains(&value) {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "{} {} is outside [{}, {}]",
            axis, value, min, max
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn expected(d: f64, m: f64, s: f64) -> f64 {
        d + m / 60.0 + s / 3600.0
    }

    #[test]
    fn test_dms_to_decimal() {
        let north = dms_to_decimal("10°20′30.5″N").unwrap();
        assert!((north - expected(10.0, 20.0, 30.5)).abs() < TOLERANCE);
        assert!((north - 10.341805).abs() < 0.000001);

        let south = dms_to_decimal("10°20′30.5″S").unwrap();
        assert!((south + expected(10.0, 20.0, 30.5)).abs() < TOLERANCE);
    }

    #[test]
    fn test_glyph_variants_agree() {
        let reference = dms_to_decimal("52°14′30″N").unwrap();

        for variant in [
            "52° 14' 30\" N",
            "52º14'30\"N",
            "52º 14’ 30” N",
            "52 14 30 N",
            "  52°14′30″N  ",
            "52°\u{00A0}14′\u{00A0}30″\u{00A0}N",
        ] {
            let value = dms_to_decimal(variant).unwrap();
            assert_eq!(value.to_bits(), reference.to_bits(), "variant {:?}", variant);
        }
    }

    #[test]
    fn test_hemisphere_sign() {
        assert!(dms_to_decimal("21°0′30″E").unwrap() > 0.0);
        assert!(dms_to_decimal("21°0′30″W").unwrap() < 0.0);
        assert!(dms_to_decimal("52°14′30″n").unwrap() > 0.0);
        assert!(dms_to_decimal("52°14′30″s").unwrap() < 0.0);
        assert!(dms_to_decimal("0°7′39″w").unwrap() < 0.0);
    }

    #[test]
    fn test_hemisphere_overrides_literal_sign() {
        let north = dms_to_decimal("-52°14′30″N").unwrap();
        assert!((north - expected(52.0, 14.0, 30.0)).abs() < TOLERANCE);

        let east = dms_to_decimal("-21°0′30″E").unwrap();
        assert!(east > 0.0);

        // South on an already negative degree stays negative, not double-negated
        let south = dms_to_decimal("-52°14′30″S").unwrap();
        assert!((south + expected(52.0, 14.0, 30.0)).abs() < TOLERANCE);
    }

    #[test]
    fn test_literal_sign_without_hemisphere() {
        let result = dms_to_decimal("-0°07′39″").unwrap();
        assert!((result + 0.1275).abs() < TOLERANCE);

        assert!(dms_to_decimal("+52°14′30″").unwrap() > 0.0);
        assert!(dms_to_decimal("52°14′30″").unwrap() > 0.0);
    }

    #[test]
    fn test_missing_components() {
        for bad in ["52° N", "52°14′N", "52°", "", "   ", "Warszawa", "N 52"] {
            let err = dms_to_decimal(bad).unwrap_err();
            assert!(err.is_invalid_format(), "expected InvalidFormat for {:?}", bad);
        }
    }

    #[test]
    fn test_error_carries_input_text() {
        match dms_to_decimal("52°14′N") {
            Err(ProcessingError::InvalidFormat { text, context }) => {
                assert_eq!(text, "52°14′N");
                assert!(context.is_none());
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_minutes_and_seconds_not_bounded() {
        let value = dms_to_decimal("10°61′75″N").unwrap();
        assert!((value - expected(10.0, 61.0, 75.0)).abs() < TOLERANCE);
    }

    #[test]
    fn test_decimal_comma_seconds() {
        let comma = dms_to_decimal("10°20′30,5″S").unwrap();
        let point = dms_to_decimal("10°20′30.5″S").unwrap();
        assert_eq!(comma.to_bits(), point.to_bits());
    }

    #[test]
    fn test_idempotent() {
        let first = dms_to_decimal("50°3′41.27″N").unwrap();
        let second = dms_to_decimal("50°3′41.27″N").unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_parse_components() {
        let components = parse_components("-52º 14' 30.25\" s").unwrap();
        assert!(components.negative);
        assert_eq!(components.degrees, -52.0);
        assert_eq!(components.minutes, 14.0);
        assert_eq!(components.seconds, 30.25);
        assert_eq!(components.hemisphere, Some(Hemisphere::South));
    }

    #[test]
    fn test_surrounding_text_tolerated() {
        let value = dms_to_decimal("ok. 52°14′30″N (przybliżone)").unwrap();
        assert!((value - expected(52.0, 14.0, 30.0)).abs() < TOLERANCE);
    }

    #[test]
    fn test_trailing_words_are_not_hemispheres() {
        for text in [
            "52°14′30″ szer. płn.",
            "52°14′30″ Szerokość",
            "21°0′30″ wsch.",
            "21°0′30″ Wschód",
        ] {
            let components = parse_components(text).unwrap();
            assert_eq!(components.hemisphere, None, "text {:?}", text);
            assert!(dms_to_decimal(text).unwrap() > 0.0, "text {:?}", text);
        }

        // A standalone letter followed by punctuation or a remark still counts
        assert!(dms_to_decimal("52°14′30″ S.").unwrap() < 0.0);
        assert!(dms_to_decimal("21°0′30″W (wsch. granica)").unwrap() < 0.0);
    }

    #[test]
    fn test_decimal_to_dms() {
        assert_eq!(
            decimal_to_dms(expected(52.0, 14.0, 30.0), CoordinateField::Latitude),
            "52°14′30.00″N"
        );
        assert_eq!(
            decimal_to_dms(-0.1275, CoordinateField::Longitude),
            "0°7′39.00″W"
        );
        // 59.999 seconds rounds up into the next minute
        assert_eq!(
            decimal_to_dms(expected(10.0, 0.0, 59.999), CoordinateField::Latitude),
            "10°1′00.00″N"
        );
    }

    #[test]
    fn test_coordinate_range_validation() {
        assert!(validate_coordinate_range(52.24, CoordinateField::Latitude).is_ok());
        assert!(validate_coordinate_range(-90.0, CoordinateField::Latitude).is_ok());
        assert!(validate_coordinate_range(180.0, CoordinateField::Longitude).is_ok());
        assert!(validate_coordinate_range(90.5, CoordinateField::Latitude).is_err());
        assert!(validate_coordinate_range(120.0, CoordinateField::Latitude).is_err());
        assert!(validate_coordinate_range(-181.0, CoordinateField::Longitude).is_err());
    }
}
