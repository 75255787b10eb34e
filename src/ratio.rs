//! Structured aspect ratios and pixel sizes.
//!
//! A catalog label like `"16:9"` is a stringly-typed tuple. [`AspectRatio`]
//! is the validated form: two positive integers, parsed once when the
//! catalog is built.

use core::fmt;
use core::num::NonZeroU32;
use core::str::FromStr;

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either side is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Shape of a ratio relative to a square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Wider than tall.
    Landscape,
    /// Taller than wide.
    Portrait,
    /// Equal sides.
    Square,
}

/// Why a ratio label could not be parsed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RatioParseError {
    /// No `:` between the components.
    MissingDelimiter,
    /// More than one `:`.
    ExtraDelimiter,
    /// A component is empty or contains something other than ASCII digits.
    NotANumber,
    /// A component is zero.
    ZeroComponent,
    /// A component does not fit in `u32`.
    Overflow,
}

impl RatioParseError {
    /// Short human-readable reason.
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::MissingDelimiter => "missing ':' delimiter",
            Self::ExtraDelimiter => "more than one ':' delimiter",
            Self::NotANumber => "component is not a positive integer",
            Self::ZeroComponent => "component is zero",
            Self::Overflow => "component is too large",
        }
    }
}

impl fmt::Display for RatioParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

impl core::error::Error for RatioParseError {}

/// An aspect ratio `width:height` with both components positive.
///
/// Equality is structural: `2:1` and `4:2` are different ratios with the same
/// [`value()`](Self::value). Use [`reduced()`](Self::reduced) to compare
/// numerically.
///
/// ```
/// use zenaspect::AspectRatio;
///
/// let r: AspectRatio = "16:9".parse().unwrap();
/// assert_eq!(r.width(), 16);
/// assert!((r.value() - 16.0 / 9.0).abs() < 1e-12);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AspectRatio {
    width: NonZeroU32,
    height: NonZeroU32,
}

impl AspectRatio {
    /// Create a ratio. Returns `None` if either component is zero.
    pub const fn new(width: u32, height: u32) -> Option<Self> {
        match (NonZeroU32::new(width), NonZeroU32::new(height)) {
            (Some(width), Some(height)) => Some(Self { width, height }),
            _ => None,
        }
    }

    /// Width units.
    pub const fn width(&self) -> u32 {
        self.width.get()
    }

    /// Height units.
    pub const fn height(&self) -> u32 {
        self.height.get()
    }

    /// `width / height` as a float.
    pub fn value(&self) -> f64 {
        self.width.get() as f64 / self.height.get() as f64
    }

    /// Lowest-terms form: `1920:1080` → `16:9`.
    pub fn reduced(&self) -> Self {
        let d = gcd(self.width.get(), self.height.get());
        // d divides both and is at least 1, so neither quotient is zero.
        Self {
            width: NonZeroU32::new(self.width.get() / d).unwrap_or(self.width),
            height: NonZeroU32::new(self.height.get() / d).unwrap_or(self.height),
        }
    }

    /// Landscape, portrait, or square.
    pub fn orientation(&self) -> Orientation {
        match self.width.cmp(&self.height) {
            core::cmp::Ordering::Greater => Orientation::Landscape,
            core::cmp::Ordering::Less => Orientation::Portrait,
            core::cmp::Ordering::Equal => Orientation::Square,
        }
    }

    /// Whether `w × h` pixels has exactly this ratio.
    ///
    /// Uses cross-multiplication, so there is no float comparison.
    pub fn is_exact(&self, w: u32, h: u32) -> bool {
        w as u64 * self.height.get() as u64 == h as u64 * self.width.get() as u64
    }

    /// Swap width and height: `16:9` → `9:16`.
    pub const fn transposed(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

impl FromStr for AspectRatio {
    type Err = RatioParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (w, h) = s.split_once(':').ok_or(RatioParseError::MissingDelimiter)?;
        if h.contains(':') {
            return Err(RatioParseError::ExtraDelimiter);
        }
        let width = parse_component(w)?;
        let height = parse_component(h)?;
        Ok(Self { width, height })
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

/// Strict unsigned decimal: no sign, no fraction, no inner whitespace.
fn parse_component(s: &str) -> Result<NonZeroU32, RatioParseError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RatioParseError::NotANumber);
    }
    let v: u32 = s.parse().map_err(|_| RatioParseError::Overflow)?;
    NonZeroU32::new(v).ok_or(RatioParseError::ZeroComponent)
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(s: &str) -> AspectRatio {
        s.parse().unwrap()
    }

    #[test]
    fn parse_basic() {
        let r = ratio("16:9");
        assert_eq!((r.width(), r.height()), (16, 9));
        assert_eq!(r, AspectRatio::new(16, 9).unwrap());
    }

    #[test]
    fn parse_trims_outer_whitespace() {
        assert_eq!(ratio("  4:3 "), AspectRatio::new(4, 3).unwrap());
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!("16-9".parse::<AspectRatio>(), Err(RatioParseError::MissingDelimiter));
        assert_eq!("1:2:3".parse::<AspectRatio>(), Err(RatioParseError::ExtraDelimiter));
        assert_eq!("a:b".parse::<AspectRatio>(), Err(RatioParseError::NotANumber));
        assert_eq!(":9".parse::<AspectRatio>(), Err(RatioParseError::NotANumber));
        assert_eq!("-1:9".parse::<AspectRatio>(), Err(RatioParseError::NotANumber));
        assert_eq!("1.5:1".parse::<AspectRatio>(), Err(RatioParseError::NotANumber));
        assert_eq!("16 :9".parse::<AspectRatio>(), Err(RatioParseError::NotANumber));
        assert_eq!("0:1".parse::<AspectRatio>(), Err(RatioParseError::ZeroComponent));
        assert_eq!("".parse::<AspectRatio>(), Err(RatioParseError::MissingDelimiter));
        assert_eq!(
            "99999999999:1".parse::<AspectRatio>(),
            Err(RatioParseError::Overflow)
        );
    }

    #[test]
    fn new_rejects_zero() {
        assert!(AspectRatio::new(0, 1).is_none());
        assert!(AspectRatio::new(1, 0).is_none());
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(alloc::format!("{}", ratio("3:2")), "3:2");
        assert_eq!(alloc::format!("{}", Size::new(800, 600)), "800x600");
    }

    #[test]
    fn reduced_to_lowest_terms() {
        assert_eq!(ratio("1920:1080").reduced(), ratio("16:9"));
        assert_eq!(ratio("7:3").reduced(), ratio("7:3"));
        assert_eq!(ratio("5:5").reduced(), ratio("1:1"));
    }

    #[test]
    fn orientation() {
        assert_eq!(ratio("16:9").orientation(), Orientation::Landscape);
        assert_eq!(ratio("9:16").orientation(), Orientation::Portrait);
        assert_eq!(ratio("1:1").orientation(), Orientation::Square);
        assert_eq!(ratio("16:9").transposed(), ratio("9:16"));
    }

    #[test]
    fn exact_uses_cross_multiplication() {
        let r = ratio("16:9");
        assert!(r.is_exact(1920, 1080));
        assert!(r.is_exact(1280, 720));
        assert!(!r.is_exact(1280, 721));
        // u32::MAX sides don't overflow the u64 products.
        assert!(ratio("1:1").is_exact(u32::MAX, u32::MAX));
    }
}
