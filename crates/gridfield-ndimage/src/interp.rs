//! Interpolation options and tap resolution shared by rotate and zoom.

use crate::boundary::BoundaryMode;
use crate::spline::{self, MAX_ORDER};
use ndarray::ArrayD;
use smallvec::SmallVec;

/// Options for spline resampling (`rotate`, `zoom`).
///
/// The default is a prefiltered cubic spline with zero fill outside the
/// grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterpConfig {
    order: usize,
    mode: BoundaryMode,
    prefilter: bool,
}

impl Default for InterpConfig {
    fn default() -> Self {
        Self {
            order: 3,
            mode: BoundaryMode::default(),
            prefilter: true,
        }
    }
}

/// Builder for [`InterpConfig`].
pub struct InterpConfigBuilder {
    order: usize,
    mode: BoundaryMode,
    prefilter: bool,
}

impl InterpConfig {
    /// Create a builder starting from the defaults.
    pub fn builder() -> InterpConfigBuilder {
        let d = Self::default();
        InterpConfigBuilder {
            order: d.order,
            mode: d.mode,
            prefilter: d.prefilter,
        }
    }

    /// Spline order.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Boundary handling.
    pub fn mode(&self) -> BoundaryMode {
        self.mode
    }

    /// Whether samples are converted to spline coefficients first.
    pub fn prefilter(&self) -> bool {
        self.prefilter
    }

    /// Prefilter `data` along each of `axes` if this configuration needs it.
    pub(crate) fn coefficients(&self, mut data: ArrayD<f64>, axes: &[usize]) -> ArrayD<f64> {
        if self.prefilter && self.order > 1 {
            for &axis in axes {
                spline::prefilter_axis(&mut data, axis, self.order);
            }
        }
        data
    }

    /// Resolve the coefficient taps for coordinate `x` on an axis of `len`.
    ///
    /// Returns `None` if the coordinate falls outside the grid under a
    /// constant boundary.
    pub(crate) fn taps(&self, x: f64, len: usize) -> Option<Taps> {
        let x = self.mode.fold_coordinate(x, len)?;
        let (first, weights) = spline::weights(self.order, x);
        let index = (0..weights.len())
            .map(|k| spline::mirror_index(first + k as isize, len))
            .collect();
        Some(Taps { index, weights })
    }
}

impl InterpConfigBuilder {
    /// Spline order, 0 to 3 (default: 3).
    pub fn order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Boundary handling (default: `Constant(0.0)`).
    pub fn mode(mut self, mode: BoundaryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Whether to prefilter samples into spline coefficients (default: true).
    pub fn prefilter(mut self, prefilter: bool) -> Self {
        self.prefilter = prefilter;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `order` exceeds 3 or a constant fill value is not finite.
    pub fn build(self) -> Result<InterpConfig, String> {
        if self.order > MAX_ORDER {
            return Err(format!(
                "spline order must be between 0 and {MAX_ORDER}, got {}",
                self.order
            ));
        }
        if let BoundaryMode::Constant(v) = self.mode {
            if !v.is_finite() {
                return Err(format!("constant fill value must be finite, got {v}"));
            }
        }
        Ok(InterpConfig {
            order: self.order,
            mode: self.mode,
            prefilter: self.prefilter,
        })
    }
}

/// Resolved coefficient indices and weights for one coordinate.
#[derive(Clone, Debug)]
pub(crate) struct Taps {
    pub(crate) index: SmallVec<[usize; 4]>,
    pub(crate) weights: SmallVec<[f64; 4]>,
}

impl Taps {
    /// Weighted sum over a 1-D coefficient accessor.
    pub(crate) fn apply(&self, coeff: impl Fn(usize) -> f64) -> f64 {
        self.index
            .iter()
            .zip(&self.weights)
            .map(|(&i, w)| w * coeff(i))
            .sum()
    }
}
