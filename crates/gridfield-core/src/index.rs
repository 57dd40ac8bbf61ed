//! Per-axis index model used by field indexing.
//!
//! [`FieldIndex`] mirrors basic array indexing: integers, slices with
//! Python semantics, an ellipsis, and the new-axis marker (which fields
//! reject). [`expand_index`] turns a caller's index into exactly one entry
//! per stored axis.

use crate::error::FieldError;
use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

/// A `start:stop:step` slice. Missing bounds default like Python slices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliceSpec {
    /// First index (may be negative).
    pub start: Option<isize>,
    /// One past the last index (may be negative).
    pub stop: Option<isize>,
    /// Stride; must be non-zero, negative walks backwards.
    pub step: isize,
}

/// A slice resolved against an axis length.
///
/// Elements are taken from `[start, end)`; a negative `step` walks from
/// `end - 1` downwards. This is the convention of `ndarray::Slice`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedSlice {
    /// Inclusive lower bound.
    pub start: isize,
    /// Exclusive upper bound.
    pub end: isize,
    /// Stride and direction.
    pub step: isize,
    /// Number of selected elements.
    pub len: usize,
}

impl SliceSpec {
    /// The full slice `:`.
    pub const FULL: SliceSpec = SliceSpec {
        start: None,
        stop: None,
        step: 1,
    };

    /// A slice with explicit bounds and unit step.
    pub fn new(start: Option<isize>, stop: Option<isize>) -> Self {
        Self {
            start,
            stop,
            step: 1,
        }
    }

    /// The same slice with a different step.
    pub fn with_step(self, step: isize) -> Self {
        Self { step, ..self }
    }

    /// Resolve against an axis of length `len`, clamping out-of-range
    /// bounds the way Python does.
    pub fn resolve(&self, len: usize) -> Result<ResolvedSlice, FieldError> {
        if self.step == 0 {
            return Err(FieldError::UnsupportedIndexing {
                reason: "slice step cannot be zero".to_string(),
            });
        }
        let n = len as isize;
        let step = self.step;
        let (lower, upper) = if step > 0 { (0, n) } else { (-1, n - 1) };
        let clamp = |v: isize| {
            if v < 0 {
                (v + n).max(lower)
            } else {
                v.min(upper)
            }
        };
        let start = self
            .start
            .map(clamp)
            .unwrap_or(if step > 0 { lower } else { upper });
        let stop = self
            .stop
            .map(clamp)
            .unwrap_or(if step > 0 { upper } else { lower });

        if step > 0 {
            let count = if stop > start {
                ((stop - start + step - 1) / step) as usize
            } else {
                0
            };
            if count == 0 {
                return Ok(ResolvedSlice::EMPTY);
            }
            Ok(ResolvedSlice {
                start,
                end: stop,
                step,
                len: count,
            })
        } else {
            let stride = -step;
            let count = if start > stop {
                ((start - stop + stride - 1) / stride) as usize
            } else {
                0
            };
            if count == 0 {
                return Ok(ResolvedSlice::EMPTY);
            }
            let last = start - (count as isize - 1) * stride;
            Ok(ResolvedSlice {
                start: last,
                end: start + 1,
                step,
                len: count,
            })
        }
    }
}

impl ResolvedSlice {
    const EMPTY: ResolvedSlice = ResolvedSlice {
        start: 0,
        end: 0,
        step: 1,
        len: 0,
    };
}

/// One entry of a field index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldIndex {
    /// Select a single position and drop the axis.
    Index(isize),
    /// Keep the axis, restricted to a slice.
    Slice(SliceSpec),
    /// Stands for as many full slices as needed.
    Ellipsis,
    /// Insert a new length-1 axis. Always rejected by fields.
    NewAxis,
}

impl From<isize> for FieldIndex {
    fn from(i: isize) -> Self {
        Self::Index(i)
    }
}

impl From<SliceSpec> for FieldIndex {
    fn from(s: SliceSpec) -> Self {
        Self::Slice(s)
    }
}

impl From<RangeFull> for FieldIndex {
    fn from(_: RangeFull) -> Self {
        Self::Slice(SliceSpec::FULL)
    }
}

impl From<Range<isize>> for FieldIndex {
    fn from(r: Range<isize>) -> Self {
        Self::Slice(SliceSpec::new(Some(r.start), Some(r.end)))
    }
}

impl From<RangeFrom<isize>> for FieldIndex {
    fn from(r: RangeFrom<isize>) -> Self {
        Self::Slice(SliceSpec::new(Some(r.start), None))
    }
}

impl From<RangeTo<isize>> for FieldIndex {
    fn from(r: RangeTo<isize>) -> Self {
        Self::Slice(SliceSpec::new(None, Some(r.end)))
    }
}

impl From<RangeInclusive<isize>> for FieldIndex {
    fn from(r: RangeInclusive<isize>) -> Self {
        let end = *r.end();
        // `..=-1` means "through the last element".
        let stop = if end == -1 { None } else { Some(end + 1) };
        Self::Slice(SliceSpec::new(Some(*r.start()), stop))
    }
}

impl From<RangeToInclusive<isize>> for FieldIndex {
    fn from(r: RangeToInclusive<isize>) -> Self {
        let stop = if r.end == -1 { None } else { Some(r.end + 1) };
        Self::Slice(SliceSpec::new(None, stop))
    }
}

/// Build a `[FieldIndex; N]` from integers, ranges, and `FieldIndex` values.
///
/// ```
/// use gridfield_core::{idx, FieldIndex};
///
/// let index = idx![1, .., 0..2, FieldIndex::Ellipsis];
/// assert_eq!(index.len(), 4);
/// assert_eq!(index[0], FieldIndex::Index(1));
/// ```
#[macro_export]
macro_rules! idx {
    ($($e:expr),* $(,)?) => {
        [$($crate::FieldIndex::from($e)),*]
    };
}

/// Expand a caller's index into exactly `ndim` entries without ellipses.
///
/// A missing trailing ellipsis is implied when fewer than `ndim` entries
/// are given. New axes, repeated ellipses, and too many entries fail with
/// [`FieldError::UnsupportedIndexing`].
pub fn expand_index(index: &[FieldIndex], ndim: usize) -> Result<Vec<FieldIndex>, FieldError> {
    if index.contains(&FieldIndex::NewAxis) {
        return Err(FieldError::UnsupportedIndexing {
            reason: "new axes have no scale; build a new field from a reshaped array instead"
                .to_string(),
        });
    }
    let ellipses = index
        .iter()
        .filter(|i| matches!(i, FieldIndex::Ellipsis))
        .count();
    if ellipses > 1 {
        return Err(FieldError::UnsupportedIndexing {
            reason: "an index can only have a single ellipsis".to_string(),
        });
    }
    let explicit = index.len() - ellipses;
    if explicit > ndim {
        return Err(FieldError::UnsupportedIndexing {
            reason: format!("too many indices: {explicit} given for {ndim} axes"),
        });
    }

    let fill = ndim - explicit;
    let mut expanded = Vec::with_capacity(ndim);
    for entry in index {
        match entry {
            FieldIndex::Ellipsis => {
                expanded.extend(std::iter::repeat_n(FieldIndex::Slice(SliceSpec::FULL), fill))
            }
            other => expanded.push(*other),
        }
    }
    if ellipses == 0 {
        expanded.extend(std::iter::repeat_n(FieldIndex::Slice(SliceSpec::FULL), fill));
    }
    Ok(expanded)
}
