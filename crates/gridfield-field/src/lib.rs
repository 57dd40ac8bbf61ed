//! The [`Field`] container: an N-dimensional scalar or vector field on a
//! regular grid with a physical spacing per spatial axis.
//!
//! A field is `(data, scale, vector)`. For vector fields the last axis of
//! `data` holds 2 or 3 components ordered `(x, y, z)`; storage order of the
//! spatial axes is the reverse, `(z, y, x)`. Every operation keeps
//! `scale` aligned with the spatial axes and keeps vector components
//! consistent with the grid:
//!
//! - [`Field::array_ufunc`] is the single entry point for elementwise
//!   operations and reductions; the arithmetic operators and named methods
//!   such as [`Field::sum`] call into it
//! - [`Field::get`] indexes with Python-style slices, dropping scale
//!   entries for integer-indexed axes
//! - [`Field::rotate`], [`Field::rot90`], [`Field::zoom`], [`Field::flip`],
//!   [`Field::bin`], and [`Field::pad`] transform the grid
//! - [`Field::gradient`], [`Field::curl`], and [`Field::clip`] derive new
//!   fields
//!
//! ```
//! use gridfield_field::Field;
//! use ndarray::{ArrayD, IxDyn};
//!
//! let s = Field::new(ArrayD::<f64>::zeros(IxDyn(&[2, 3])), [1.0, 2.0], false).unwrap();
//! let v = Field::new(ArrayD::<f64>::ones(IxDyn(&[2, 3, 2])), [1.0, 2.0], true).unwrap();
//! let sum = (&s + &v).unwrap();
//! assert!(sum.vector());
//! assert_eq!(sum.shape(), &[2, 3, 2]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod calculus;
pub mod clip;
pub mod dispatch;
pub mod field;
pub mod indexing;
pub mod labeled;
mod ops;
pub mod rotation;
pub mod transform;

pub use clip::{ClipConfig, ClipConfigBuilder};
pub use dispatch::{BinaryOp, CompareOp, Dispatched, Kwargs, Method, Operand, UnaryOp, Ufunc};
pub use field::Field;
pub use indexing::Indexed;
pub use labeled::{AxisInfo, LabeledTensor, COMPONENT_AXIS_NAME};
pub use rotation::RotationAxis;
pub use transform::{BinFactor, PadWidth, ZoomFactor};

pub use gridfield_core::{idx, AxisArg, FieldError, FieldIndex, Scale, ScaleSpec, SliceSpec};
pub use gridfield_ndimage::{BoundaryMode, InterpConfig, InterpConfigBuilder, PadMode};
