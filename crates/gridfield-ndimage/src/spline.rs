//! B-spline basis weights and the recursive coefficient prefilter.
//!
//! Orders 0 (nearest), 1 (linear), 2 (quadratic), and 3 (cubic) are
//! supported. Interpolating splines of order 2 and 3 need the samples
//! converted to spline coefficients first; [`prefilter_axis`] does that
//! with the causal/anti-causal recursion and whole-sample mirror
//! boundaries.

use ndarray::{ArrayD, ArrayViewMut1, Axis};
use smallvec::SmallVec;

/// Tap weights for one coordinate: the first tap index and one weight per tap.
pub(crate) type Weights = (isize, SmallVec<[f64; 4]>);

/// Highest supported spline order.
pub const MAX_ORDER: usize = 3;

/// The prefilter pole for `order`, if the order needs prefiltering.
fn pole(order: usize) -> Option<f64> {
    match order {
        2 => Some(8f64.sqrt() - 3.0),
        3 => Some(3f64.sqrt() - 2.0),
        _ => None,
    }
}

/// Map any integer tap index into `[0, len)` by whole-sample mirroring.
pub(crate) fn mirror_index(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let n = len as isize;
    let period = 2 * (n - 1);
    let j = i.rem_euclid(period);
    (if j >= n { period - j } else { j }) as usize
}

/// Basis weights of the taps around coordinate `x`.
pub(crate) fn weights(order: usize, x: f64) -> Weights {
    match order {
        0 => ((x + 0.5).floor() as isize, SmallVec::from_slice(&[1.0])),
        1 => {
            let i0 = x.floor();
            let t = x - i0;
            (i0 as isize, SmallVec::from_slice(&[1.0 - t, t]))
        }
        2 => {
            let centre = (x + 0.5).floor();
            let t = x - centre;
            let w0 = 0.5 * (0.5 - t) * (0.5 - t);
            let w2 = 0.5 * (0.5 + t) * (0.5 + t);
            (
                centre as isize - 1,
                SmallVec::from_slice(&[w0, 0.75 - t * t, w2]),
            )
        }
        _ => {
            let i0 = x.floor();
            let t = x - i0;
            let t2 = t * t;
            let t3 = t2 * t;
            let u = 1.0 - t;
            (
                i0 as isize - 1,
                SmallVec::from_slice(&[
                    u * u * u / 6.0,
                    (3.0 * t3 - 6.0 * t2 + 4.0) / 6.0,
                    (-3.0 * t3 + 3.0 * t2 + 3.0 * t + 1.0) / 6.0,
                    t3 / 6.0,
                ]),
            )
        }
    }
}

/// Convert one lane of samples into spline coefficients in place.
fn prefilter_lane(mut lane: ArrayViewMut1<'_, f64>, z: f64) {
    let n = lane.len();
    if n < 2 {
        return;
    }
    let gain = (1.0 - z) * (1.0 - 1.0 / z);
    lane.mapv_inplace(|v| v * gain);

    // Causal initialisation over a mirrored horizon long enough for z^k to vanish.
    let horizon = ((1e-12f64).ln() / z.abs().ln()).ceil() as usize;
    let mut zk = 1.0;
    let mut init = 0.0;
    for k in 0..=horizon {
        init += zk * lane[mirror_index(k as isize, n)];
        zk *= z;
    }
    lane[0] = init;
    for k in 1..n {
        let prev = lane[k - 1];
        lane[k] += z * prev;
    }

    lane[n - 1] = (z / (z * z - 1.0)) * (lane[n - 1] + z * lane[n - 2]);
    for k in (0..n - 1).rev() {
        let next = lane[k + 1];
        lane[k] = z * (next - lane[k]);
    }
}

/// Prefilter `data` along `axis` for the given spline order.
///
/// Orders 0 and 1 interpolate the samples directly and are left untouched.
pub fn prefilter_axis(data: &mut ArrayD<f64>, axis: usize, order: usize) {
    if let Some(z) = pole(order) {
        for lane in data.lanes_mut(Axis(axis)) {
            prefilter_lane(lane, z);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, ArrayD, IxDyn};

    fn eval_1d(coeffs: &[f64], order: usize, x: f64) -> f64 {
        let (first, w) = weights(order, x);
        w.iter()
            .enumerate()
            .map(|(k, wk)| wk * coeffs[mirror_index(first + k as isize, coeffs.len())])
            .sum()
    }

    #[test]
    fn weights_partition_unity() {
        for order in 0..=MAX_ORDER {
            for x in [0.0, 0.25, 0.5, 1.7, 3.99] {
                let (_, w) = weights(order, x);
                let sum: f64 = w.iter().sum();
                assert!((sum - 1.0).abs() < 1e-12, "order {order} at {x}: {sum}");
            }
        }
    }

    #[test]
    fn mirror_index_reflects_without_repeating_edge() {
        assert_eq!(mirror_index(-1, 4), 1);
        assert_eq!(mirror_index(4, 4), 2);
        assert_eq!(mirror_index(7, 4), 1);
        assert_eq!(mirror_index(-3, 1), 0);
    }

    #[test]
    fn prefiltered_spline_interpolates_samples() {
        let samples = [1.0, 4.0, -2.0, 0.5, 3.0, 3.0, -1.0];
        for order in [2, 3] {
            let mut data = ArrayD::from_shape_vec(IxDyn(&[samples.len()]), samples.to_vec()).unwrap();
            prefilter_axis(&mut data, 0, order);
            let coeffs: Vec<f64> = data.iter().copied().collect();
            for (i, s) in samples.iter().enumerate() {
                let v = eval_1d(&coeffs, order, i as f64);
                assert!((v - s).abs() < 1e-9, "order {order} sample {i}: {v} vs {s}");
            }
        }
    }

    #[test]
    fn linear_interpolates_between_samples() {
        let coeffs = Array1::from(vec![0.0, 2.0, 4.0]);
        let v = eval_1d(coeffs.as_slice().unwrap(), 1, 1.5);
        assert!((v - 3.0).abs() < 1e-12);
    }

    #[test]
    fn cubic_reproduces_linear_ramps_away_from_edges() {
        let ramp: Vec<f64> = (0..64).map(|i| 2.0 * i as f64 + 1.0).collect();
        let mut data = ArrayD::from_shape_vec(IxDyn(&[ramp.len()]), ramp).unwrap();
        prefilter_axis(&mut data, 0, 3);
        let coeffs: Vec<f64> = data.iter().copied().collect();
        let v = eval_1d(&coeffs, 3, 31.25);
        assert!((v - 63.5).abs() < 1e-9, "{v}");
    }
}
