//! Physical grid spacing per spatial axis.
//!
//! Callers pass a [`ScaleSpec`] (one number for every axis, or one number
//! per axis). It is resolved into a fixed-length [`Scale`] as soon as the
//! number of spatial axes is known, and only [`Scale`] travels further.

use crate::error::FieldError;
use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

/// Scale as accepted at the API boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleSpec {
    /// The same spacing on every spatial axis.
    Uniform(f64),
    /// One spacing per spatial axis, in storage order.
    PerAxis(Vec<f64>),
}

impl ScaleSpec {
    /// Resolve into a [`Scale`] for `ndim` spatial axes.
    ///
    /// Fails with [`FieldError::InvariantViolation`] if a per-axis spec has
    /// the wrong length or any entry is not finite and positive.
    pub fn resolve(&self, ndim: usize) -> Result<Scale, FieldError> {
        let values: SmallVec<[f64; 4]> = match self {
            Self::Uniform(s) => SmallVec::from_elem(*s, ndim),
            Self::PerAxis(v) => {
                if v.len() != ndim {
                    return Err(FieldError::invariant(format!(
                        "each of the {ndim} spatial dimensions needs a scale, but {v:?} was given"
                    )));
                }
                SmallVec::from_slice(v)
            }
        };
        if let Some(bad) = values.iter().find(|s| !s.is_finite() || **s <= 0.0) {
            return Err(FieldError::invariant(format!(
                "scale entries must be finite and positive, got {bad}"
            )));
        }
        Ok(Scale(values))
    }
}

impl Default for ScaleSpec {
    fn default() -> Self {
        Self::Uniform(1.0)
    }
}

impl From<f64> for ScaleSpec {
    fn from(s: f64) -> Self {
        Self::Uniform(s)
    }
}

impl From<Vec<f64>> for ScaleSpec {
    fn from(v: Vec<f64>) -> Self {
        Self::PerAxis(v)
    }
}

impl From<&[f64]> for ScaleSpec {
    fn from(v: &[f64]) -> Self {
        Self::PerAxis(v.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for ScaleSpec {
    fn from(v: [f64; N]) -> Self {
        Self::PerAxis(v.to_vec())
    }
}

impl From<Scale> for ScaleSpec {
    fn from(s: Scale) -> Self {
        Self::PerAxis(s.to_vec())
    }
}

impl From<&Scale> for ScaleSpec {
    fn from(s: &Scale) -> Self {
        Self::PerAxis(s.to_vec())
    }
}

/// Resolved per-axis spacing. `scale[i]` belongs to spatial axis `i`.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Scale(SmallVec<[f64; 4]>);

impl Scale {
    /// Number of spatial axes this scale covers.
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// A new scale without the entries whose axis index is in `dropped`.
    pub fn without_axes(&self, dropped: &[usize]) -> Scale {
        Scale(
            self.0
                .iter()
                .enumerate()
                .filter(|(i, _)| !dropped.contains(i))
                .map(|(_, s)| *s)
                .collect(),
        )
    }

    /// A new scale keeping only the entries for which `keep` is true.
    pub fn select(&self, keep: impl Fn(usize) -> bool) -> Scale {
        Scale(
            self.0
                .iter()
                .enumerate()
                .filter(|(i, _)| keep(*i))
                .map(|(_, s)| *s)
                .collect(),
        )
    }

    /// Elementwise `self[i] * factors[i]`.
    pub fn scaled_by(&self, factors: &[f64]) -> Scale {
        Scale(self.0.iter().zip(factors).map(|(s, f)| s * f).collect())
    }

    /// The underlying entries as a vector, storage order.
    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }
}

impl Deref for Scale {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl FromIterator<f64> for Scale {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Scale(iter.into_iter().collect())
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, s) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{s}")?;
        }
        if self.0.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}
