//! Raw-array image kernels for the gridfield workspace.
//!
//! Everything here works on plain [`ndarray::ArrayD`] data and knows
//! nothing about scales or component axes; the field layer decides which
//! axes a kernel touches and fixes up the bookkeeping afterwards.
//!
//! - [`rotate_planes`] and [`zoom`]: spline resampling (orders 0 to 3)
//!   configured by [`InterpConfig`] and [`BoundaryMode`]
//! - [`rot90`] and [`flip_axes`]: exact index permutations
//! - [`pad`] and [`block_mean`]: border extension and binning
//! - [`gradient_along`]: first-order finite differences

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod boundary;
pub mod discrete;
pub mod gradient;
pub mod interp;
pub mod pad;
pub mod rotate;
pub mod spline;
pub mod zoom;

pub use block::block_mean;
pub use boundary::{BoundaryMode, PadMode};
pub use discrete::{flip_axes, rot90};
pub use gradient::gradient_along;
pub use interp::{InterpConfig, InterpConfigBuilder};
pub use pad::pad;
pub use rotate::{cos_sin_deg, rotate_planes};
pub use spline::{prefilter_axis, MAX_ORDER};
pub use zoom::{zoom, zoomed_len};
