//! Query string front end.
//!
//! Parses strings like `?width=1280&height=720&gravity=0.5,0` into a
//! matcher query. Problems are reported as [`ParseWarning`]s and never abort
//! the parse.
//!
//! # Example
//!
//! ```
//! use zenaspect::{Catalog, query};
//!
//! let result = query::parse("?w=1920&h=1080");
//! assert!(result.warnings.is_empty());
//!
//! let m = result.closest(&Catalog::standard()).unwrap();
//! assert_eq!(m.label, "16:9");
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::catalog::Catalog;
use crate::crop::Gravity;
use crate::matcher::{Match, MatchError};

/// Width and height of the image being matched.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// Result of parsing a query string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// Present only when both width and height parsed.
    pub dimensions: Option<Dimensions>,
    /// Crop gravity, if given.
    pub gravity: Option<Gravity>,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
    // Last value seen per side, accepted or rejected, for error reporting.
    width: Option<f64>,
    height: Option<f64>,
}

impl ParseResult {
    /// Match the parsed dimensions against `catalog`.
    ///
    /// A side that was rejected (e.g. `h=0`) is reported with its numeric
    /// value in [`MatchError::InvalidDimensions`]. A side that was missing or
    /// not a number is reported as NaN.
    pub fn closest(&self, catalog: &Catalog) -> Result<Match, MatchError> {
        match self.dimensions {
            Some(d) => catalog.closest(d.width, d.height),
            None => Err(MatchError::InvalidDimensions {
                width: self.width.unwrap_or(f64::NAN),
                height: self.height.unwrap_or(f64::NAN),
            }),
        }
    }
}

/// Non-fatal warning from query string parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// A key was not recognized.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value could not be parsed.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Parse a query string (with or without leading `?`).
pub fn parse(query: &str) -> ParseResult {
    let mut fields = Fields::default();
    let mut warnings = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key).to_ascii_lowercase();
        let value = percent_decode(raw_value);
        dispatch_key(&key, &value, &mut fields, &mut warnings);
    }

    let dimensions = match (fields.width, fields.height) {
        (Some(width), Some(height)) => Some(Dimensions { width, height }),
        _ => None,
    };
    ParseResult {
        dimensions,
        gravity: fields.gravity,
        warnings,
        width: fields.width.or(fields.rejected_width),
        height: fields.height.or(fields.rejected_height),
    }
}

#[derive(Default)]
struct Fields {
    width: Option<f64>,
    height: Option<f64>,
    gravity: Option<Gravity>,
    rejected_width: Option<f64>,
    rejected_height: Option<f64>,
}

fn dispatch_key(key: &str, value: &str, fields: &mut Fields, warnings: &mut Vec<ParseWarning>) {
    match key {
        "w" | "width" => {
            let parsed = parse_side(value);
            if parsed.is_none() {
                fields.rejected_width = parse_number(value);
            }
            set_or_warn(
                &mut fields.width,
                parsed,
                "width",
                value,
                "expected a positive number",
                warnings,
            );
        }
        "h" | "height" => {
            let parsed = parse_side(value);
            if parsed.is_none() {
                fields.rejected_height = parse_number(value);
            }
            set_or_warn(
                &mut fields.height,
                parsed,
                "height",
                value,
                "expected a positive number",
                warnings,
            );
        }
        "gravity" => set_or_warn(
            &mut fields.gravity,
            parse_gravity(value),
            "gravity",
            value,
            "expected 'x,y' fractions",
            warnings,
        ),
        _ => warnings.push(ParseWarning::KeyNotRecognized {
            key: String::from(key),
            value: String::from(value),
        }),
    }
}

fn set_or_warn<T>(
    slot: &mut Option<T>,
    parsed: Option<T>,
    key: &'static str,
    value: &str,
    reason: &'static str,
    warnings: &mut Vec<ParseWarning>,
) {
    match parsed {
        Some(v) => {
            if slot.is_some() {
                warnings.push(ParseWarning::DuplicateKey {
                    key: String::from(key),
                    value: String::from(value),
                });
            }
            *slot = Some(v);
        }
        None => warnings.push(ParseWarning::ValueInvalid {
            key,
            value: String::from(value),
            reason,
        }),
    }
}

/// Positive finite real. Accepts a trailing `px`.
fn parse_side(s: &str) -> Option<f64> {
    parse_number(s).filter(|v| v.is_finite() && *v > 0.0)
}

/// Any real, with an optional trailing `px`.
fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix("px").unwrap_or(s);
    s.parse().ok()
}

fn parse_gravity(s: &str) -> Option<Gravity> {
    let (x, y) = s.split_once(',')?;
    let x: f32 = x.trim().parse().ok()?;
    let y: f32 = y.trim().parse().ok()?;
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(Gravity::Percentage(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)))
}

fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Percent-decode a URL component. Also handles '+' as space.
///
/// Invalid escapes are kept literally; invalid UTF-8 becomes U+FFFD.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_dimensions() {
        let r = parse("width=1280&height=720");
        assert_eq!(
            r.dimensions,
            Some(Dimensions {
                width: 1280.0,
                height: 720.0
            })
        );
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn aliases_and_case() {
        let r = parse("?W=4&H=3");
        assert_eq!(
            r.dimensions,
            Some(Dimensions {
                width: 4.0,
                height: 3.0
            })
        );
    }

    #[test]
    fn px_suffix_and_fractions() {
        let r = parse("w=1.6&h=0.9px");
        assert_eq!(
            r.dimensions,
            Some(Dimensions {
                width: 1.6,
                height: 0.9
            })
        );
    }

    #[test]
    fn percent_decoding() {
        assert_eq!(percent_decode("a%20b+c"), "a b c");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("%C3%A9"), "é");
        let r = parse("%77=10&h%65ight=20");
        assert_eq!(
            r.dimensions,
            Some(Dimensions {
                width: 10.0,
                height: 20.0
            })
        );
    }

    #[test]
    fn missing_side_gives_none() {
        let r = parse("w=100");
        assert_eq!(r.dimensions, None);
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn invalid_value_warns() {
        let r = parse("w=0&h=abc");
        assert_eq!(r.dimensions, None);
        assert_eq!(
            r.warnings,
            [
                ParseWarning::ValueInvalid {
                    key: "width",
                    value: "0".into(),
                    reason: "expected a positive number",
                },
                ParseWarning::ValueInvalid {
                    key: "height",
                    value: "abc".into(),
                    reason: "expected a positive number",
                },
            ]
        );
    }

    #[test]
    fn non_finite_rejected() {
        assert_eq!(parse_side("inf"), None);
        assert_eq!(parse_side("NaN"), None);
        assert_eq!(parse_side("-5"), None);
        assert_eq!(parse_side("12px"), Some(12.0));
    }

    #[test]
    fn duplicate_last_wins() {
        let r = parse("w=10&h=10&width=20");
        assert_eq!(r.dimensions.map(|d| d.width), Some(20.0));
        assert_eq!(
            r.warnings,
            [ParseWarning::DuplicateKey {
                key: "width".into(),
                value: "20".into()
            }]
        );
    }

    #[test]
    fn unknown_key_warns() {
        let r = parse("w=1&h=1&format=webp&flag");
        assert_eq!(
            r.warnings,
            [
                ParseWarning::KeyNotRecognized {
                    key: "format".into(),
                    value: "webp".into()
                },
                ParseWarning::KeyNotRecognized {
                    key: "flag".into(),
                    value: String::new()
                },
            ]
        );
    }

    #[test]
    fn gravity_parses_and_clamps() {
        assert_eq!(
            parse("gravity=0.25,1").gravity,
            Some(Gravity::Percentage(0.25, 1.0))
        );
        assert_eq!(
            parse("gravity=2,-1").gravity,
            Some(Gravity::Percentage(1.0, 0.0))
        );
        let r = parse("gravity=center");
        assert_eq!(r.gravity, None);
        assert_eq!(r.warnings.len(), 1);
    }

    #[test]
    fn empty_query() {
        let r = parse("");
        assert_eq!(r.dimensions, None);
        assert!(r.warnings.is_empty());
        let r = parse("?&&");
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn closest_reports_rejected_side_value() {
        let r = parse("w=100&h=0");
        assert_eq!(
            r.closest(&Catalog::standard()),
            Err(MatchError::InvalidDimensions {
                width: 100.0,
                height: 0.0
            })
        );

        let r = parse("w=-4px&h=3");
        assert_eq!(
            r.closest(&Catalog::standard()),
            Err(MatchError::InvalidDimensions {
                width: -4.0,
                height: 3.0
            })
        );
    }

    #[test]
    fn closest_reports_non_numeric_side_as_nan() {
        let err = parse("w=abc&h=3").closest(&Catalog::standard()).unwrap_err();
        match err {
            MatchError::InvalidDimensions { width, height } => {
                assert!(width.is_nan());
                assert_eq!(height, 3.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn closest_without_dimensions_errors() {
        let err = parse("w=100").closest(&Catalog::standard()).unwrap_err();
        match err {
            MatchError::InvalidDimensions { width, height } => {
                assert_eq!(width, 100.0);
                assert!(height.is_nan());
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
