//! Error taxonomy for field construction and field operations.
//!
//! Every variant is fail-fast: the operation that produced it returned no
//! partial result, and previously constructed fields are unaffected.

use std::error::Error;
use std::fmt;

/// Errors returned by field construction, dispatch, indexing, transforms,
/// and reductions.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldError {
    /// Construction-time mismatch between `scale` and the spatial
    /// dimensions, or a vector component count outside `{2, 3}`.
    InvariantViolation {
        /// What went wrong.
        reason: String,
    },
    /// More than one field operand was passed to a multi-operand ufunc
    /// and their scales differ.
    ScaleMismatch {
        /// The scales of all field operands, in operand order.
        scales: Vec<Vec<f64>>,
    },
    /// More than one vector operand was passed to a multi-operand ufunc
    /// and their component counts differ.
    ComponentCountMismatch {
        /// The component counts of all vector operands, in operand order.
        ncomps: Vec<usize>,
    },
    /// Indexing that cannot keep the scale bookkeeping consistent
    /// (new axes, repeated ellipses, too many indices, zero steps).
    UnsupportedIndexing {
        /// What went wrong.
        reason: String,
    },
    /// A rotation was requested in a plane whose two scales differ.
    AnisotropicScale {
        /// The two in-plane axes.
        axes: (usize, usize),
        /// The scales of those axes.
        scales: (f64, f64),
    },
    /// The operation cannot handle the field's dimensionality or
    /// scalar/vector kind.
    InvalidDimensionality {
        /// What went wrong.
        reason: String,
    },
    /// `curl` was called on a dimension/component combination it does
    /// not define.
    UnsupportedCurlConfiguration {
        /// Number of spatial dimensions after squeezing.
        ndim: usize,
        /// Number of components (0 for scalar fields).
        ncomp: usize,
    },
    /// An axis argument lies outside `[-ndim, ndim)`.
    AxisOutOfRange {
        /// The axis as given by the caller.
        axis: isize,
        /// Number of axes it was checked against.
        ndim: usize,
    },
    /// The same axis appeared twice in an axis argument.
    DuplicateAxis {
        /// The normalized (non-negative) axis.
        axis: usize,
    },
    /// Operand shapes cannot be broadcast against each other.
    BroadcastMismatch {
        /// The offending shapes, in operand order.
        shapes: Vec<Vec<usize>>,
    },
    /// An integer index lies outside its axis.
    IndexOutOfBounds {
        /// The index as given by the caller.
        index: isize,
        /// The axis position.
        axis: usize,
        /// Length of that axis.
        len: usize,
    },
    /// The ufunc has no reduction, or a reduction hit an empty lane
    /// without an identity.
    UnsupportedReduction {
        /// Name of the ufunc.
        ufunc: &'static str,
    },
    /// An argument failed validation (factors, widths, vector lengths,
    /// operand counts, option builders).
    InvalidArgument {
        /// What went wrong.
        reason: String,
    },
}

impl FieldError {
    /// Shorthand for [`FieldError::InvariantViolation`].
    pub fn invariant(reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`FieldError::InvalidArgument`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvariantViolation { reason } => write!(f, "invariant violation: {reason}"),
            Self::ScaleMismatch { scales } => {
                write!(f, "scales of all field operands must match, got {scales:?}")
            }
            Self::ComponentCountMismatch { ncomps } => write!(
                f,
                "component counts of all vector operands must match, got {ncomps:?}"
            ),
            Self::UnsupportedIndexing { reason } => write!(f, "unsupported indexing: {reason}"),
            Self::AnisotropicScale { axes, scales } => write!(
                f,
                "rotation plane axes {} and {} need equal scales, got {} and {}",
                axes.0, axes.1, scales.0, scales.1
            ),
            Self::InvalidDimensionality { reason } => {
                write!(f, "invalid dimensionality: {reason}")
            }
            Self::UnsupportedCurlConfiguration { ndim, ncomp } => write!(
                f,
                "curl is not defined for {ndim} spatial dimensions with {ncomp} components"
            ),
            Self::AxisOutOfRange { axis, ndim } => {
                write!(f, "axis {axis} is out of range for {ndim} axes")
            }
            Self::DuplicateAxis { axis } => write!(f, "axis {axis} given more than once"),
            Self::BroadcastMismatch { shapes } => {
                write!(f, "shapes {shapes:?} cannot be broadcast together")
            }
            Self::IndexOutOfBounds { index, axis, len } => write!(
                f,
                "index {index} is out of bounds for axis {axis} with length {len}"
            ),
            Self::UnsupportedReduction { ufunc } => {
                write!(f, "ufunc '{ufunc}' cannot reduce this input")
            }
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
        }
    }
}

impl Error for FieldError {}
