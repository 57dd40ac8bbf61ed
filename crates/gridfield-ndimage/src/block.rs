//! Block averaging (binning).

use crate::boundary::PadMode;
use crate::pad::pad;
use gridfield_core::FieldError;
use ndarray::{ArrayD, ArrayViewD, IxDyn, Zip};

/// Average non-overlapping blocks of `factors[i]` samples along each axis.
///
/// Axes whose length is not a multiple of their factor are first padded at
/// the end by repeating the edge sample. A factor of 1 leaves the axis
/// unchanged.
pub fn block_mean(input: ArrayViewD<'_, f64>, factors: &[usize]) -> Result<ArrayD<f64>, FieldError> {
    if factors.len() != input.ndim() {
        return Err(FieldError::invalid(format!(
            "binning needs one factor per axis ({}), got {}",
            input.ndim(),
            factors.len()
        )));
    }
    if factors.contains(&0) {
        return Err(FieldError::invalid("bin factors must be positive"));
    }
    let widths: Vec<(usize, usize)> = input
        .shape()
        .iter()
        .zip(factors)
        .map(|(&len, &n)| (0, (n - len % n) % n))
        .collect();
    let padded = if widths.iter().all(|&(_, a)| a == 0) {
        input.to_owned()
    } else {
        pad(input, &widths, PadMode::Edge)?
    };

    let out_shape: Vec<usize> = padded.shape().iter().zip(factors).map(|(&len, &n)| len / n).collect();
    let count = factors.iter().product::<usize>() as f64;
    let mut out = ArrayD::<f64>::zeros(IxDyn(&out_shape));
    Zip::from(&mut out)
        .and(padded.exact_chunks(IxDyn(factors)))
        .for_each(|o, block| *o = block.sum() / count);
    Ok(out)
}
