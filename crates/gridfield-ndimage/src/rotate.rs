//! Spline rotation within a plane of two axes.

use crate::interp::{InterpConfig, Taps};
use gridfield_core::FieldError;
use ndarray::{Array3, ArrayD, ArrayViewD, Axis, Ix3, IxDyn};

/// Cosine and sine of an angle in degrees, exact at multiples of 90°.
pub fn cos_sin_deg(angle: f64) -> (f64, f64) {
    let r = angle.rem_euclid(360.0);
    if r == 0.0 {
        (1.0, 0.0)
    } else if r == 90.0 {
        (0.0, 1.0)
    } else if r == 180.0 {
        (-1.0, 0.0)
    } else if r == 270.0 {
        (0.0, -1.0)
    } else {
        let rad = angle.to_radians();
        (rad.cos(), rad.sin())
    }
}

/// Rotate `input` by `angle` degrees in the plane of `axes`, keeping its shape.
///
/// The axes are sorted first. Output point `p` (relative to the plane
/// centre `c`) samples the input at `M (p - c) + c` with
/// `M = [[cos, sin], [-sin, cos]]`, so a positive angle turns the
/// content from the higher axis towards the lower one. Axes outside the
/// plane are carried along untouched.
pub fn rotate_planes(
    input: ArrayViewD<'_, f64>,
    angle: f64,
    axes: (usize, usize),
    cfg: &InterpConfig,
) -> Result<ArrayD<f64>, FieldError> {
    let ndim = input.ndim();
    let (a0, a1) = if axes.0 <= axes.1 { axes } else { (axes.1, axes.0) };
    if a0 == a1 || a1 >= ndim {
        return Err(FieldError::invalid(format!(
            "rotation needs two distinct axes below {ndim}, got {axes:?}"
        )));
    }
    log::trace!("rotating plane ({a0}, {a1}) by {angle} degrees");

    let mut perm: Vec<usize> = (0..ndim).filter(|&a| a != a0 && a != a1).collect();
    perm.extend([a0, a1]);
    let permuted = input.clone().permuted_axes(perm.as_slice());
    let permuted_shape = permuted.shape().to_vec();
    let (n0, n1) = (input.len_of(Axis(a0)), input.len_of(Axis(a1)));
    let batch = permuted_shape[..ndim - 2].iter().product::<usize>();

    let stacked = Array3::from_shape_vec((batch, n0, n1), permuted.iter().copied().collect())
        .map_err(|e| FieldError::invariant(format!("plane stacking failed: {e}")))?;
    let coeffs = cfg
        .coefficients(stacked.into_dyn(), &[1, 2])
        .into_dimensionality::<Ix3>()
        .map_err(|e| FieldError::invariant(format!("plane stacking failed: {e}")))?;

    let (cos, sin) = cos_sin_deg(angle);
    let (c0, c1) = ((n0 as f64 - 1.0) / 2.0, (n1 as f64 - 1.0) / 2.0);
    let plane_taps: Vec<Option<(Taps, Taps)>> = (0..n0 * n1)
        .map(|flat| {
            let d0 = (flat / n1) as f64 - c0;
            let d1 = (flat % n1) as f64 - c1;
            let x0 = cos * d0 + sin * d1 + c0;
            let x1 = -sin * d0 + cos * d1 + c1;
            Some((cfg.taps(x0, n0)?, cfg.taps(x1, n1)?))
        })
        .collect();

    let cval = cfg.mode().cval();
    let rotated = Array3::from_shape_fn((batch, n0, n1), |(b, i, j)| {
        match &plane_taps[i * n1 + j] {
            Some((t0, t1)) => t0.apply(|p| t1.apply(|q| coeffs[[b, p, q]])),
            None => cval,
        }
    });

    let mut inverse = vec![0; ndim];
    for (pos, &axis) in perm.iter().enumerate() {
        inverse[axis] = pos;
    }
    let restored = rotated
        .into_shape_with_order(IxDyn(&permuted_shape))
        .map_err(|e| FieldError::invariant(format!("plane unstacking failed: {e}")))?
        .permuted_axes(inverse.as_slice());
    Ok(restored.as_standard_layout().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, Array2};

    fn linear() -> InterpConfig {
        InterpConfig::builder().order(1).build().unwrap()
    }

    #[test]
    fn exact_quarter_turns() {
        assert_eq!(cos_sin_deg(90.0), (0.0, 1.0));
        assert_eq!(cos_sin_deg(-90.0), (0.0, -1.0));
        assert_eq!(cos_sin_deg(540.0), (-1.0, 0.0));
    }

    #[test]
    fn quarter_turn_matches_counter_clockwise_index_map() {
        let a = Array::from_shape_fn((3, 4), |(i, j)| (10 * i + j) as f64);
        let square = Array2::from_shape_fn((4, 4), |(i, j)| (10 * i + j) as f64).into_dyn();
        let out = rotate_planes(square.view(), 90.0, (0, 1), &linear()).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert!((out[[i, j]] - square[[j, 3 - i]]).abs() < 1e-12);
            }
        }
        // Non-square planes keep their shape; corners fall outside the grid.
        let out = rotate_planes(a.into_dyn().view(), 90.0, (0, 1), &linear()).unwrap();
        assert_eq!(out.shape(), &[3, 4]);
    }

    #[test]
    fn zero_angle_is_identity_for_cubic() {
        let a = Array::from_shape_fn((2, 5, 6), |(k, i, j)| ((k + 1) * (i * 7 + j)) as f64).into_dyn();
        let out = rotate_planes(a.view(), 0.0, (2, 1), &InterpConfig::default()).unwrap();
        assert_eq!(out.shape(), a.shape());
        for (x, y) in out.iter().zip(a.iter()) {
            assert!((x - y).abs() < 1e-9, "{x} vs {y}");
        }
    }

    #[test]
    fn batch_axes_rotate_independently() {
        let a = Array::from_shape_fn((3, 2, 3), |(i, k, j)| (i * 3 + j) as f64 * (k as f64 + 1.0)).into_dyn();
        let out = rotate_planes(a.view(), 180.0, (0, 2), &linear()).unwrap();
        for i in 0..3 {
            for k in 0..2 {
                for j in 0..3 {
                    assert!((out[[i, k, j]] - a[[2 - i, k, 2 - j]]).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn rejects_degenerate_axes() {
        let a = Array2::<f64>::zeros((3, 3)).into_dyn();
        assert!(rotate_planes(a.view(), 10.0, (1, 1), &linear()).is_err());
        assert!(rotate_planes(a.view(), 10.0, (0, 2), &linear()).is_err());
    }
}
