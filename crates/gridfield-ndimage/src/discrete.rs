//! Exact index permutations: quarter-turn rotations and flips.

use gridfield_core::FieldError;
use ndarray::{ArrayD, ArrayViewD, Axis};

/// Rotate `input` by `k` quarter turns in the plane of `axes`.
///
/// Direction follows the axis order: one turn moves entries from the
/// second axis towards the first. `k` may be negative or larger than 3.
pub fn rot90<A: Clone>(
    input: ArrayViewD<'_, A>,
    k: isize,
    axes: (usize, usize),
) -> Result<ArrayD<A>, FieldError> {
    let ndim = input.ndim();
    let (a0, a1) = axes;
    if a0 == a1 || a0 >= ndim || a1 >= ndim {
        return Err(FieldError::invalid(format!(
            "rot90 needs two distinct axes below {ndim}, got {axes:?}"
        )));
    }
    let mut view = input;
    match k.rem_euclid(4) {
        1 => {
            view.invert_axis(Axis(a1));
            view.swap_axes(a0, a1);
        }
        2 => {
            view.invert_axis(Axis(a0));
            view.invert_axis(Axis(a1));
        }
        3 => {
            view.swap_axes(a0, a1);
            view.invert_axis(Axis(a1));
        }
        _ => {}
    }
    Ok(view.as_standard_layout().into_owned())
}

/// Reverse the entries of `input` along every axis in `axes`.
pub fn flip_axes<A: Clone>(input: ArrayViewD<'_, A>, axes: &[usize]) -> ArrayD<A> {
    let mut view = input;
    for &axis in axes {
        view.invert_axis(Axis(axis));
    }
    view.as_standard_layout().into_owned()
}
