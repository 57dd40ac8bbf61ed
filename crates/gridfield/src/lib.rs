//! Gridfield: scalar and vector fields on regular grids that keep their
//! physical scale and vector components consistent under every operation.
//!
//! This is the facade crate that re-exports the public API of the
//! gridfield sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use gridfield::prelude::*;
//! use ndarray::{ArrayD, IxDyn};
//!
//! // A 3-D vector field with 3 components, 2 nm spacing along z.
//! let data = ArrayD::<f64>::ones(IxDyn(&[4, 8, 8, 3]));
//! let field = Field::new(data, [2.0, 1.0, 1.0], true).unwrap();
//!
//! // Slicing a plane drops the z scale; the components stay.
//! let plane = field.get(&idx![0]).unwrap().into_field().unwrap();
//! assert_eq!(&**plane.scale(), &[1.0, 1.0]);
//!
//! // Quarter turn about z: the grid and the arrows turn together.
//! let turned = field.rot90(1, RotationAxis::Z).unwrap();
//! assert_eq!(turned.data()[[0, 0, 0, 0]], -1.0);
//!
//! // Binning doubles the spacing.
//! let coarse = field.bin(2usize).unwrap();
//! assert_eq!(&**coarse.scale(), &[4.0, 2.0, 2.0]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gridfield-core` | Errors, scales, component layout, axis and index models |
//! | [`ndimage`] | `gridfield-ndimage` | Raw-array interpolation, rotation, padding, binning, differences |
//! | [`field`] | `gridfield-field` | The `Field` container, dispatch, transforms, derived fields |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core bookkeeping types (`gridfield-core`).
///
/// [`types::FieldError`] is the single error type of the workspace.
pub use gridfield_core as types;

/// Raw-array kernels (`gridfield-ndimage`).
///
/// Useful on their own for `ndarray` data that has no scale attached.
pub use gridfield_ndimage as ndimage;

/// The field container and its operations (`gridfield-field`).
pub use gridfield_field as field;

/// Common imports for typical gridfield usage.
///
/// ```rust
/// use gridfield::prelude::*;
/// ```
pub mod prelude {
    // Container
    pub use gridfield_field::{Field, Indexed};

    // Dispatch
    pub use gridfield_field::{
        BinaryOp, CompareOp, Dispatched, Kwargs, Method, Operand, Ufunc, UnaryOp,
    };

    // Transforms and options
    pub use gridfield_field::{
        BinFactor, BoundaryMode, ClipConfig, InterpConfig, PadMode, PadWidth, RotationAxis,
        ZoomFactor,
    };

    // Indexing and axes
    pub use gridfield_core::{idx, AxisArg, FieldIndex, SliceSpec};

    // Scale and errors
    pub use gridfield_core::{FieldError, Scale, ScaleSpec};

    // Labeled-tensor bridge
    pub use gridfield_field::{AxisInfo, LabeledTensor};
}
