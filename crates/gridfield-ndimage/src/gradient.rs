//! First-order finite differences along one axis.

use gridfield_core::FieldError;
use ndarray::{ArrayD, ArrayViewD, Axis, Zip};

/// Derivative of `input` along `axis` for samples `spacing` apart.
///
/// Interior points use central differences, the two edge points one-sided
/// first-order differences. The axis needs at least two samples.
pub fn gradient_along(
    input: ArrayViewD<'_, f64>,
    axis: usize,
    spacing: f64,
) -> Result<ArrayD<f64>, FieldError> {
    if axis >= input.ndim() {
        return Err(FieldError::AxisOutOfRange {
            axis: axis as isize,
            ndim: input.ndim(),
        });
    }
    let n = input.len_of(Axis(axis));
    if n < 2 {
        return Err(FieldError::InvalidDimensionality {
            reason: format!("gradient needs at least 2 samples along axis {axis}, got {n}"),
        });
    }
    let mut out = ArrayD::<f64>::zeros(input.raw_dim());
    Zip::from(out.lanes_mut(Axis(axis)))
        .and(input.lanes(Axis(axis)))
        .for_each(|mut d, f| {
            d[0] = (f[1] - f[0]) / spacing;
            d[n - 1] = (f[n - 1] - f[n - 2]) / spacing;
            for i in 1..n - 1 {
                d[i] = (f[i + 1] - f[i - 1]) / (2.0 * spacing);
            }
        });
    Ok(out)
}
