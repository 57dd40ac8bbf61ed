//! Border padding with numpy-compatible fill modes.

use crate::boundary::PadMode;
use gridfield_core::FieldError;
use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn};
use smallvec::SmallVec;

/// Pad `input` by `(before, after)` samples on each axis.
///
/// Fails if `widths` does not have one entry per axis, or if a
/// non-constant mode would need to sample an empty axis.
pub fn pad(
    input: ArrayViewD<'_, f64>,
    widths: &[(usize, usize)],
    mode: PadMode,
) -> Result<ArrayD<f64>, FieldError> {
    if widths.len() != input.ndim() {
        return Err(FieldError::invalid(format!(
            "pad needs one width pair per axis ({}), got {}",
            input.ndim(),
            widths.len()
        )));
    }
    if !matches!(mode, PadMode::Constant(_)) {
        if let Some(axis) = widths
            .iter()
            .zip(input.shape())
            .position(|(&(b, a), &len)| len == 0 && b + a > 0)
        {
            return Err(FieldError::invalid(format!(
                "cannot extend empty axis {axis} with {mode:?} padding"
            )));
        }
    }
    let fill = match mode {
        PadMode::Constant(v) => v,
        _ => 0.0,
    };
    let shape: Vec<usize> = widths
        .iter()
        .zip(input.shape())
        .map(|(&(b, a), &len)| b + len + a)
        .collect();

    Ok(ArrayD::from_shape_fn(IxDyn(&shape), |idx| {
        let mut src: SmallVec<[usize; 4]> = SmallVec::with_capacity(shape.len());
        for (axis, &(before, _)) in widths.iter().enumerate() {
            let shifted = idx[axis] as isize - before as isize;
            match mode.resolve_index(shifted, input.len_of(Axis(axis))) {
                Some(i) => src.push(i),
                None => return fill,
            }
        }
        input[src.as_slice()]
    }))
}
