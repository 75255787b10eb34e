//! Cropping a source image to a matched ratio.
//!
//! After matching, the form crops the upload to the chosen ratio and then
//! scales it to the entry's target size. [`Match::conform`] computes both.
//!
//! ```
//! use zenaspect::{Catalog, Gravity, Rect, Size};
//!
//! let catalog = Catalog::builder().entry("1:1", 512, 512).build().unwrap();
//! let m = catalog.closest(1000.0, 500.0).unwrap();
//! let plan = m.conform(Size::new(1000, 500), Gravity::Center).unwrap();
//!
//! assert_eq!(plan.crop, Some(Rect::new(250, 0, 500, 500)));
//! assert_eq!(plan.resize_to, Size::new(512, 512));
//! ```

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::matcher::{Match, MatchError};
use crate::ratio::{AspectRatio, Size};

/// Where to keep the image when trimming the long axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Gravity {
    /// Center on both axes.
    #[default]
    Center,
    /// Position by fraction. `(0.0, 0.0)` = top-left, `(1.0, 1.0)` = bottom-right.
    Percentage(f32, f32),
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect covering a whole `size`.
    pub const fn full(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Dimensions of the rect.
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether this rect covers the full source (no actual crop).
    pub fn is_full(&self, source: Size) -> bool {
        self.x == 0 && self.y == 0 && self.width == source.width && self.height == source.height
    }
}

/// Crop and resize that conform a source image to a catalog entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Conform {
    /// Region of the source to keep. `None` when the source already has the ratio.
    pub crop: Option<Rect>,
    /// Final dimensions, the entry's target.
    pub resize_to: Size,
}

impl Match {
    /// Plan the crop to this match's ratio and the resize to its target.
    pub fn conform(&self, source: Size, gravity: Gravity) -> Result<Conform, MatchError> {
        if source.is_empty() {
            return Err(MatchError::InvalidDimensions {
                width: source.width as f64,
                height: source.height as f64,
            });
        }
        let rect = crop_to_ratio(source, self.ratio, gravity);
        Ok(Conform {
            crop: (!rect.is_full(source)).then_some(rect),
            resize_to: self.target,
        })
    }
}

/// Largest region of `source` with `ratio`, positioned by `gravity`.
///
/// Exact matches (checked by cross-multiplication) return the full source.
/// A zero-sized source returns an empty rect.
pub fn crop_to_ratio(source: Size, ratio: AspectRatio, gravity: Gravity) -> Rect {
    let (sw, sh) = (source.width, source.height);
    if source.is_empty() || ratio.is_exact(sw, sh) {
        return Rect::full(source);
    }

    // Source wider than ratio ⇔ sw * rh > sh * rw.
    let wider = sw as u64 * ratio.height() as u64 > sh as u64 * ratio.width() as u64;
    if wider {
        // Keep full height; width = sh * rw / rh.
        let new_w = scaled(sh, ratio.width(), ratio.height()).min(sw);
        let x = gravity_offset_1d(sw - new_w, &gravity, true);
        Rect::new(x, 0, new_w, sh)
    } else {
        // Keep full width; height = sw * rh / rw.
        let new_h = scaled(sw, ratio.height(), ratio.width()).min(sh);
        let y = gravity_offset_1d(sh - new_h, &gravity, false);
        Rect::new(0, y, sw, new_h)
    }
}

/// `round(basis * num / den)`, at least 1.
fn scaled(basis: u32, num: u32, den: u32) -> u32 {
    let v = (basis as f64 * num as f64 / den as f64).round();
    if v < 1.0 { 1 } else { v.min(u32::MAX as f64) as u32 }
}

fn gravity_offset_1d(space: u32, gravity: &Gravity, horizontal: bool) -> u32 {
    if space == 0 {
        return 0;
    }
    match gravity {
        Gravity::Center => space / 2,
        Gravity::Percentage(x, y) => {
            let pct = if horizontal { *x } else { *y };
            // NaN clamps to NaN; treat it as the near edge.
            let pct = if pct.is_nan() { 0.0 } else { pct.clamp(0.0, 1.0) };
            (space as f64 * pct as f64).round() as u32
        }
    }
}
