//! Closest aspect-ratio matching against a validated catalog of target dimensions.
//!
//! Pure geometry — no pixel operations, no global state, `no_std` + `alloc` compatible.
//!
//! # Modules
//!
//! - [`ratio`] — Structured `w:h` aspect ratios and pixel sizes
//! - [`catalog`] — Validated, ordered catalog of named ratios and their target sizes
//! - [`matcher`] — Closest-ratio lookup with declaration-order tie-break
//! - [`crop`] — Cropping a source to a matched ratio, conform plans
//! - `query` — Query string front end (feature `query`)
//!
//! # Example
//!
//! ```
//! use zenaspect::{Catalog, Size};
//!
//! let catalog = Catalog::builder()
//!     .entry("1:1", 100, 100)
//!     .entry("16:9", 1920, 1080)
//!     .entry("4:3", 800, 600)
//!     .build()
//!     .unwrap();
//!
//! let m = catalog.closest(1280.0, 720.0).unwrap();
//! assert_eq!(m.label, "16:9");
//! assert_eq!(m.target, Size::new(1920, 1080));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod catalog;
pub mod crop;
pub mod matcher;
#[cfg(feature = "query")]
pub mod query;
pub mod ratio;

pub use catalog::{Catalog, CatalogBuilder, CatalogEntry, CatalogError};
pub use crop::{Conform, Gravity, Rect, crop_to_ratio};
pub use matcher::{Match, MatchError, closest_in, closest_ratio};
pub use ratio::{AspectRatio, Orientation, Size};
