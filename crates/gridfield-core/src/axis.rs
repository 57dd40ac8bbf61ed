//! Axis arguments for reductions, flips, and similar per-axis operations.

use crate::error::FieldError;
use indexmap::IndexSet;
use smallvec::SmallVec;

/// Normalized, duplicate-free list of non-negative axes in caller order.
pub type AxisList = SmallVec<[usize; 4]>;

/// Which axes a reduction runs over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AxisArg {
    /// Every spatial axis. The component axis of a vector field is kept.
    All,
    /// Explicit axes; negative values count from the end of the raw shape,
    /// so `-1` is the component axis of a vector field.
    Axes(SmallVec<[isize; 4]>),
}

impl AxisArg {
    /// A single explicit axis.
    pub fn single(axis: isize) -> Self {
        Self::Axes(SmallVec::from_slice(&[axis]))
    }
}

impl From<isize> for AxisArg {
    fn from(axis: isize) -> Self {
        Self::single(axis)
    }
}

impl From<&[isize]> for AxisArg {
    fn from(axes: &[isize]) -> Self {
        Self::Axes(SmallVec::from_slice(axes))
    }
}

impl From<Vec<isize>> for AxisArg {
    fn from(axes: Vec<isize>) -> Self {
        Self::Axes(SmallVec::from_vec(axes))
    }
}

impl<const N: usize> From<[isize; N]> for AxisArg {
    fn from(axes: [isize; N]) -> Self {
        Self::Axes(axes.into_iter().collect())
    }
}

/// Map a possibly negative axis into `[0, ndim)`.
pub fn normalize_axis(axis: isize, ndim: usize) -> Result<usize, FieldError> {
    let n = ndim as isize;
    let resolved = if axis < 0 { axis + n } else { axis };
    if resolved < 0 || resolved >= n {
        return Err(FieldError::AxisOutOfRange { axis, ndim });
    }
    Ok(resolved as usize)
}

/// Normalize every axis and reject duplicates. Caller order is preserved.
pub fn normalize_axis_tuple(axes: &[isize], ndim: usize) -> Result<AxisList, FieldError> {
    let mut seen: IndexSet<usize> = IndexSet::with_capacity(axes.len());
    for &axis in axes {
        let resolved = normalize_axis(axis, ndim)?;
        if !seen.insert(resolved) {
            return Err(FieldError::DuplicateAxis { axis: resolved });
        }
    }
    Ok(seen.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn negative_axes_count_from_the_end() {
        assert_eq!(normalize_axis(-1, 4).unwrap(), 3);
        assert_eq!(normalize_axis(-4, 4).unwrap(), 0);
        assert!(matches!(
            normalize_axis(-5, 4),
            Err(FieldError::AxisOutOfRange { axis: -5, ndim: 4 })
        ));
        assert!(normalize_axis(4, 4).is_err());
    }

    #[test]
    fn tuple_preserves_caller_order() {
        let axes = normalize_axis_tuple(&[2, -4, 1], 4).unwrap();
        assert_eq!(axes.as_slice(), &[2, 0, 1]);
    }

    #[test]
    fn tuple_rejects_duplicates_after_normalization() {
        assert!(matches!(
            normalize_axis_tuple(&[0, -3], 3),
            Err(FieldError::DuplicateAxis { axis: 0 })
        ));
    }

    proptest! {
        #[test]
        fn normalized_axes_are_in_range(ndim in 1usize..8, axis in -8isize..8) {
            match normalize_axis(axis, ndim) {
                Ok(a) => prop_assert!(a < ndim),
                Err(_) => prop_assert!(axis >= ndim as isize || axis < -(ndim as isize)),
            }
        }
    }
}
