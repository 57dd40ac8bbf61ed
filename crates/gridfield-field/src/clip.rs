//! Value clipping that keeps vector directions.

use crate::field::Field;
use gridfield_core::FieldError;
use ndarray::{ArrayD, Axis, Zip};

/// Bounds for [`Field::clip`].
///
/// Unset bounds are searched in the region selected by `mask` and
/// `sigma`. Vector fields only use `vmax`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClipConfig {
    vmin: Option<f64>,
    vmax: Option<f64>,
    sigma: Option<f64>,
    mask: Option<ArrayD<bool>>,
}

/// Builder for [`ClipConfig`].
#[derive(Default)]
pub struct ClipConfigBuilder {
    vmin: Option<f64>,
    vmax: Option<f64>,
    sigma: Option<f64>,
    mask: Option<ArrayD<bool>>,
}

impl ClipConfig {
    /// Create a builder with every option unset.
    pub fn builder() -> ClipConfigBuilder {
        ClipConfigBuilder::default()
    }

    /// Explicit lower bound.
    pub fn vmin(&self) -> Option<f64> {
        self.vmin
    }

    /// Explicit upper bound.
    pub fn vmax(&self) -> Option<f64> {
        self.vmax
    }

    /// Outlier cutoff in standard deviations above the mean.
    pub fn sigma(&self) -> Option<f64> {
        self.sigma
    }

    /// Region to search for unset bounds.
    pub fn mask(&self) -> Option<&ArrayD<bool>> {
        self.mask.as_ref()
    }
}

impl ClipConfigBuilder {
    /// Lower bound; overrides any bound found through `mask` or `sigma`.
    pub fn vmin(mut self, vmin: f64) -> Self {
        self.vmin = Some(vmin);
        self
    }

    /// Upper bound; overrides any bound found through `mask` or `sigma`.
    pub fn vmax(mut self, vmax: f64) -> Self {
        self.vmax = Some(vmax);
        self
    }

    /// Exclude points more than `sigma` standard deviations above the mean
    /// from the bound search. Combined with `mask` when both are set.
    pub fn sigma(mut self, sigma: f64) -> Self {
        self.sigma = Some(sigma);
        self
    }

    /// Only search for bounds where `mask` is set. Its shape must match
    /// the field's spatial shape.
    pub fn mask(mut self, mask: ArrayD<bool>) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a bound is NaN, if `vmin > vmax`, or if `sigma` is
    /// not finite and positive.
    pub fn build(self) -> Result<ClipConfig, String> {
        if self.vmin.is_some_and(f64::is_nan) || self.vmax.is_some_and(f64::is_nan) {
            return Err("clip bounds must not be NaN".to_string());
        }
        if let (Some(lo), Some(hi)) = (self.vmin, self.vmax) {
            if lo > hi {
                return Err(format!("vmin ({lo}) must not exceed vmax ({hi})"));
            }
        }
        if let Some(sigma) = self.sigma {
            if !sigma.is_finite() || sigma <= 0.0 {
                return Err(format!("sigma must be finite and positive, got {sigma}"));
            }
        }
        Ok(ClipConfig {
            vmin: self.vmin,
            vmax: self.vmax,
            sigma: self.sigma,
            mask: self.mask,
        })
    }
}

impl Field {
    /// Clip to `[vmin, vmax]`.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidArgument`] if `vmin > vmax` or either is NaN.
    pub fn clip_range(&self, vmin: f64, vmax: f64) -> Result<Field, FieldError> {
        let cfg = ClipConfig::builder()
            .vmin(vmin)
            .vmax(vmax)
            .build()
            .map_err(FieldError::invalid)?;
        self.clip(&cfg)
    }

    /// Limit values. Scalar fields are clamped to `[vmin, vmax]`. Vector
    /// fields are judged by amplitude: points above `vmax` are scaled down
    /// onto it, keeping their direction.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidArgument`] if the mask shape is not `dim`, or
    /// if a bound has to be searched but the search region holds no
    /// values.
    pub fn clip(&self, cfg: &ClipConfig) -> Result<Field, FieldError> {
        log::debug!("Calling clip");
        let indicator = if self.vector() {
            self.amp().data().clone()
        } else {
            self.data().clone()
        };
        let mut region = match cfg.mask() {
            Some(m) if m.shape() != self.dim() => {
                return Err(FieldError::invalid(format!(
                    "clip mask shape {:?} does not match field dimensions {:?}",
                    m.shape(),
                    self.dim()
                )))
            }
            Some(m) => m.clone(),
            None => ArrayD::from_elem(indicator.raw_dim(), true),
        };
        if let Some(sigma) = cfg.sigma() {
            let (mean, std) = mean_std(&indicator);
            Zip::from(&mut region)
                .and(&indicator)
                .for_each(|keep, &v| *keep = *keep && (v - mean) < sigma * std);
        }
        let searched = || {
            indicator
                .iter()
                .zip(region.iter())
                .filter(|(v, keep)| **keep && !v.is_nan())
                .map(|(v, _)| *v)
        };
        let vmax = match cfg.vmax() {
            Some(v) => v,
            None => searched().reduce(f64::max).ok_or_else(empty_region)?,
        };

        let data = if let Some(axis) = self.components().component_axis(self.shape().len()) {
            let mut data = self.data().clone();
            Zip::from(data.lanes_mut(Axis(axis)))
                .and(&indicator)
                .for_each(|mut lane, &amp| {
                    if amp > vmax || amp.is_nan() {
                        lane.mapv_inplace(|c| vmax * c / amp);
                    }
                });
            data
        } else {
            let vmin = match cfg.vmin() {
                Some(v) => v,
                None => searched().reduce(f64::min).ok_or_else(empty_region)?,
            };
            self.data().mapv(|v| v.max(vmin).min(vmax))
        };
        Field::new(data, self.scale(), self.vector())
    }
}

fn empty_region() -> FieldError {
    FieldError::invalid("no values left to search for clip bounds")
}

/// Mean and population standard deviation.
fn mean_std(values: &ArrayD<f64>) -> (f64, f64) {
    let n = values.len().max(1) as f64;
    let mean = values.sum() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}
