//! Spatial shape vs. component axis bookkeeping.
//!
//! A field's raw array shape is `dim` for scalar fields and `dim + [ncomp]`
//! for vector fields. [`Components`] is the single place that knows which
//! trailing axis, if any, is the component axis.

use crate::error::FieldError;

/// Whether a field is scalar or a 2-/3-component vector field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Components {
    /// No component axis; every axis is spatial.
    #[default]
    Scalar,
    /// Trailing axis of length 2 (x, y).
    Two,
    /// Trailing axis of length 3 (x, y, z).
    Three,
}

impl Components {
    /// Classify a raw shape given the caller's `vector` flag.
    ///
    /// Fails with [`FieldError::InvariantViolation`] if `vector` is set and
    /// the last axis is missing or its length is not 2 or 3.
    pub fn from_shape(shape: &[usize], vector: bool) -> Result<Self, FieldError> {
        if !vector {
            return Ok(Self::Scalar);
        }
        match shape.last() {
            Some(2) => Ok(Self::Two),
            Some(3) => Ok(Self::Three),
            Some(n) => Err(FieldError::invariant(format!(
                "only 2- or 3-component vector fields are supported, last axis has length {n}"
            ))),
            None => Err(FieldError::invariant(
                "a vector field needs a component axis, data is 0-dimensional",
            )),
        }
    }

    /// Classify from a component count (`0` means scalar).
    pub fn from_ncomp(ncomp: usize) -> Result<Self, FieldError> {
        match ncomp {
            0 => Ok(Self::Scalar),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            n => Err(FieldError::invariant(format!(
                "only 2- or 3-component vector fields are supported, got {n}"
            ))),
        }
    }

    /// `true` for vector fields.
    pub fn is_vector(self) -> bool {
        !matches!(self, Self::Scalar)
    }

    /// Number of components; `0` for scalar fields.
    pub fn ncomp(self) -> usize {
        match self {
            Self::Scalar => 0,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Number of trailing non-spatial axes (0 or 1).
    pub fn extra_axes(self) -> usize {
        usize::from(self.is_vector())
    }

    /// The spatial part of a raw shape.
    pub fn spatial<'a>(self, shape: &'a [usize]) -> &'a [usize] {
        &shape[..shape.len() - self.extra_axes()]
    }

    /// Position of the component axis in a raw array with `ndim` axes.
    pub fn component_axis(self, ndim: usize) -> Option<usize> {
        self.is_vector().then(|| ndim - 1)
    }
}
