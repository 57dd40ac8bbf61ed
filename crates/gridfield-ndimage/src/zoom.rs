//! Separable spline resampling by per-axis zoom factors.

use crate::interp::{InterpConfig, Taps};
use gridfield_core::FieldError;
use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn, Zip};

/// Output length of an axis of `len` samples zoomed by `factor`.
pub fn zoomed_len(len: usize, factor: f64) -> usize {
    (len as f64 * factor).round() as usize
}

/// Resample `input` so that axis `i` has `round(len_i * factors[i])` samples.
///
/// Output sample `o` on an axis maps to input coordinate
/// `o * (len_in - 1) / (len_out - 1)`, so both edge samples stay aligned.
/// Axes with a factor of exactly `1.0` are copied unchanged.
pub fn zoom(
    input: ArrayViewD<'_, f64>,
    factors: &[f64],
    cfg: &InterpConfig,
) -> Result<ArrayD<f64>, FieldError> {
    if factors.len() != input.ndim() {
        return Err(FieldError::invalid(format!(
            "zoom needs one factor per axis ({}), got {}",
            input.ndim(),
            factors.len()
        )));
    }
    if let Some(bad) = factors.iter().find(|z| !z.is_finite() || **z <= 0.0) {
        return Err(FieldError::invalid(format!(
            "zoom factors must be finite and positive, got {bad}"
        )));
    }
    let mut data = input.to_owned();
    for (axis, &factor) in factors.iter().enumerate() {
        if factor == 1.0 {
            continue;
        }
        let len = data.len_of(Axis(axis));
        let out_len = zoomed_len(len, factor);
        if out_len == 0 {
            return Err(FieldError::invalid(format!(
                "zooming axis {axis} of length {len} by {factor} leaves no samples"
            )));
        }
        data = resample_axis(data, axis, out_len, cfg);
    }
    Ok(data)
}

fn resample_axis(data: ArrayD<f64>, axis: usize, out_len: usize, cfg: &InterpConfig) -> ArrayD<f64> {
    let len = data.len_of(Axis(axis));
    let coeffs = cfg.coefficients(data, &[axis]);
    let ratio = if out_len > 1 {
        (len as f64 - 1.0) / (out_len as f64 - 1.0)
    } else {
        0.0
    };
    let taps: Vec<Option<Taps>> = (0..out_len)
        .map(|o| cfg.taps(o as f64 * ratio, len))
        .collect();
    let cval = cfg.mode().cval();

    let mut shape = coeffs.shape().to_vec();
    shape[axis] = out_len;
    let mut out = ArrayD::<f64>::zeros(IxDyn(&shape));
    Zip::from(out.lanes_mut(Axis(axis)))
        .and(coeffs.lanes(Axis(axis)))
        .for_each(|mut dst, src| {
            for (k, tap) in taps.iter().enumerate() {
                dst[k] = tap.as_ref().map_or(cval, |t| t.apply(|i| src[i]));
            }
        });
    out
}
