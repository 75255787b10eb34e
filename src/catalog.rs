//! Validated, ordered catalog of named aspect ratios and their target sizes.
//!
//! A catalog is built once and never mutated. Declaration order is kept:
//! the matcher breaks ties in favor of the entry declared first.
//!
//! # Config format
//!
//! [`Catalog::parse`] reads one entry per line:
//!
//! ```text
//! # label = target size
//! 1:1  = 1024x1024
//! 16:9 = 1344x756
//! ```
//!
//! Blank lines and `#` comments are ignored. [`Catalog`]'s `Display` impl
//! writes the same format.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::ratio::{AspectRatio, RatioParseError, Size};

/// One catalog entry: a label, its parsed ratio, and the target size.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CatalogEntry {
    /// Label as declared, e.g. `"16:9"`.
    pub label: String,
    /// Parsed form of [`label`](Self::label).
    pub ratio: AspectRatio,
    /// Dimensions associated with this ratio.
    pub target: Size,
}

impl CatalogEntry {
    /// Validate a label and target into an entry.
    ///
    /// Outer whitespace is trimmed, so `" 16:9"` is stored as `"16:9"`.
    pub fn new(label: &str, target: Size) -> Result<Self, CatalogError> {
        let label = label.trim();
        let ratio = label
            .parse::<AspectRatio>()
            .map_err(|e| CatalogError::malformed(label, e))?;
        if target.is_empty() {
            return Err(CatalogError::ZeroTargetDimension {
                label: String::from(label),
            });
        }
        Ok(Self {
            label: String::from(label),
            ratio,
            target,
        })
    }
}

/// Catalog construction error.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogError {
    /// A label did not parse as `<w>:<h>` with two positive integers.
    MalformedCatalogEntry { label: String, reason: &'static str },
    /// A target width or height is zero.
    ZeroTargetDimension { label: String },
    /// The same label was declared twice.
    DuplicateLabel { label: String },
    /// No entries were declared.
    EmptyCatalog,
    /// A config line could not be split into `label = WxH`.
    Syntax { line: usize, reason: &'static str },
}

impl CatalogError {
    fn malformed(label: &str, e: RatioParseError) -> Self {
        Self::MalformedCatalogEntry {
            label: String::from(label),
            reason: e.reason(),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedCatalogEntry { label, reason } => {
                write!(f, "malformed catalog entry {label:?}: {reason}")
            }
            Self::ZeroTargetDimension { label } => {
                write!(f, "catalog entry {label:?} has a zero target dimension")
            }
            Self::DuplicateLabel { label } => write!(f, "duplicate catalog label {label:?}"),
            Self::EmptyCatalog => f.write_str("catalog has no entries"),
            Self::Syntax { line, reason } => write!(f, "catalog line {line}: {reason}"),
        }
    }
}

impl core::error::Error for CatalogError {}

/// Accumulates entries for a [`Catalog`]. Validation happens in [`build()`](Self::build).
#[derive(Clone, Debug, Default)]
pub struct CatalogBuilder {
    pending: Vec<(String, Size)>,
}

impl CatalogBuilder {
    /// Start an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Order of calls is declaration order.
    pub fn entry(mut self, label: &str, width: u32, height: u32) -> Self {
        self.pending.push((String::from(label), Size::new(width, height)));
        self
    }

    /// Validate all entries in order. The first failure is returned.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let mut entries: Vec<CatalogEntry> = Vec::with_capacity(self.pending.len());
        for (label, target) in &self.pending {
            let entry = CatalogEntry::new(label, *target)?;
            if entries.iter().any(|e| e.label == entry.label) {
                return Err(CatalogError::DuplicateLabel {
                    label: entry.label,
                });
            }
            entries.push(entry);
        }
        if entries.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        Ok(Catalog { entries })
    }
}

/// An ordered, non-empty, immutable set of named aspect ratios.
///
/// ```
/// use zenaspect::Catalog;
///
/// let catalog = Catalog::parse("1:1 = 100x100\n4:3 = 800x600\n").unwrap();
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.get("4:3").unwrap().target.width, 800);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Start building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Build from `(label, target)` pairs in declaration order.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (&'a str, Size)>,
    {
        pairs
            .into_iter()
            .fold(CatalogBuilder::new(), |b, (label, size)| {
                b.entry(label, size.width, size.height)
            })
            .build()
    }

    /// Built-in preset of common photo and video ratios.
    ///
    /// Labels are the ratios' `Display` form, so each label always parses
    /// back to its ratio.
    pub fn standard() -> Self {
        let entries = STANDARD
            .iter()
            .map(|&(ratio, target)| CatalogEntry {
                label: ratio.to_string(),
                ratio,
                target,
            })
            .collect();
        Self { entries }
    }

    /// Parse the line-oriented config format (see module docs).
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let mut builder = CatalogBuilder::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = strip_comment(raw).trim();
            if line.is_empty() {
                continue;
            }
            let (label, size) = parse_line(line).map_err(|reason| CatalogError::Syntax {
                line: idx + 1,
                reason,
            })?;
            builder = builder.entry(label, size.width, size.height);
        }
        builder.build()
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> core::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    /// Number of entries (always at least one).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a built catalog has at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its exact label.
    pub fn get(&self, label: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    /// Declaration index of a label.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.label == label)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = core::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in &self.entries {
            writeln!(f, "{} = {}", e.label, e.target)?;
        }
        Ok(())
    }
}

/// Evaluated at compile time; a zero component fails the build.
const fn preset(w: u32, h: u32, target_w: u32, target_h: u32) -> (AspectRatio, Size) {
    match AspectRatio::new(w, h) {
        Some(ratio) => (ratio, Size::new(target_w, target_h)),
        None => panic!("preset ratio components must be non-zero"),
    }
}

/// Ratio and target size, in preference order.
const STANDARD: &[(AspectRatio, Size)] = &[
    preset(1, 1, 1024, 1024),
    preset(16, 9, 1344, 756),
    preset(9, 16, 756, 1344),
    preset(4, 3, 1152, 864),
    preset(3, 4, 864, 1152),
    preset(3, 2, 1152, 768),
    preset(2, 3, 768, 1152),
];

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Split `label = WxH`. Label validation is left to [`CatalogEntry::new`].
fn parse_line(line: &str) -> Result<(&str, Size), &'static str> {
    let (label, size) = line.split_once('=').ok_or("expected 'label = WxH'")?;
    let label = label.trim();
    if label.is_empty() {
        return Err("missing label before '='");
    }
    let size = size.trim();
    let (w, h) = size
        .split_once(['x', 'X'])
        .ok_or("target size must be written as WxH")?;
    let w = parse_u32(w.trim()).ok_or("target width is not an integer")?;
    let h = parse_u32(h.trim()).ok_or("target height is not an integer")?;
    Ok((label, Size::new(w, h)))
}

fn parse_u32(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
