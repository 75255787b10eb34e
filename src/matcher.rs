//! Closest-ratio lookup.
//!
//! The query ratio `width / height` is compared with each entry's ratio in
//! declaration order. The smallest absolute difference wins. The comparison
//! is strict, so on a tie the entry declared first is kept.

use alloc::string::String;
use core::fmt;

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::catalog::{Catalog, CatalogEntry};
use crate::ratio::{AspectRatio, Size};

/// The catalog entry closest to a query, copied out of the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Match {
    /// Label of the winning entry.
    pub label: String,
    /// Parsed ratio of the winning entry.
    pub ratio: AspectRatio,
    /// Target size of the winning entry, verbatim.
    pub target: Size,
    /// `|query ratio - entry ratio|`. Zero for an exact match.
    pub difference: f64,
}

impl Match {
    /// Whether the query ratio equalled the entry's ratio exactly.
    pub fn is_exact(&self) -> bool {
        self.difference == 0.0
    }
}

/// Matching error.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MatchError {
    /// Width or height is zero, negative, NaN, or infinite.
    InvalidDimensions { width: f64, height: f64 },
    /// There were no entries to choose from.
    EmptyCatalog,
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => write!(
                f,
                "invalid dimensions {width}x{height}: both sides must be positive and finite"
            ),
            Self::EmptyCatalog => f.write_str("no catalog entries to match against"),
        }
    }
}

impl core::error::Error for MatchError {}

/// Find the entry of `catalog` whose ratio is closest to `width / height`.
///
/// ```
/// use zenaspect::{Catalog, closest_ratio};
///
/// let catalog = Catalog::standard();
/// let m = closest_ratio(3000.0, 2000.0, &catalog).unwrap();
/// assert_eq!(m.label, "3:2");
/// ```
pub fn closest_ratio(width: f64, height: f64, catalog: &Catalog) -> Result<Match, MatchError> {
    closest_in(catalog.entries(), width, height)
}

/// Slice form of [`closest_ratio`]. Fails with
/// [`MatchError::EmptyCatalog`] when `entries` is empty.
pub fn closest_in(entries: &[CatalogEntry], width: f64, height: f64) -> Result<Match, MatchError> {
    if !is_valid_side(width) || !is_valid_side(height) {
        return Err(MatchError::InvalidDimensions { width, height });
    }
    let target = width / height;

    let mut best: Option<(&CatalogEntry, f64)> = None;
    for entry in entries {
        let diff = (target - entry.ratio.value()).abs();
        match best {
            Some((_, min)) if diff >= min => {}
            _ => best = Some((entry, diff)),
        }
    }

    let (entry, difference) = best.ok_or(MatchError::EmptyCatalog)?;
    Ok(Match {
        label: entry.label.clone(),
        ratio: entry.ratio,
        target: entry.target,
        difference,
    })
}

fn is_valid_side(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

impl Catalog {
    /// Closest entry to a `width × height` query. See [`closest_ratio`].
    pub fn closest(&self, width: f64, height: f64) -> Result<Match, MatchError> {
        closest_ratio(width, height, self)
    }

    /// Closest entry to an integer pixel size.
    pub fn closest_to_size(&self, size: Size) -> Result<Match, MatchError> {
        self.closest(size.width as f64, size.height as f64)
    }
}
