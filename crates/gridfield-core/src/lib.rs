//! Core types for the gridfield workspace.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! bookkeeping every field operation relies on: the error taxonomy,
//! physical scales, the scalar/vector component layout, axis arguments,
//! and the index model.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod axis;
pub mod components;
pub mod error;
pub mod index;
pub mod scale;

pub use axis::{normalize_axis, normalize_axis_tuple, AxisArg, AxisList};
pub use components::Components;
pub use error::FieldError;
pub use index::{expand_index, FieldIndex, ResolvedSlice, SliceSpec};
pub use scale::{Scale, ScaleSpec};
