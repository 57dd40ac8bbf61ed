//! Seeded field generators.
//!
//! All generators take a seed and use ChaCha8 so a failing test can be
//! reproduced exactly.

use gridfield_field::Field;
use ndarray::{ArrayD, IxDyn};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// A field with samples uniform in `[-1, 1)` and a scale of `1.0`.
///
/// `ncomp` of 0 gives a scalar field, 2 or 3 a vector field.
pub fn random_field(dim: &[usize], ncomp: usize, seed: u64) -> Field {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut shape = dim.to_vec();
    if ncomp > 0 {
        shape.push(ncomp);
    }
    let data = ArrayD::from_shape_simple_fn(IxDyn(&shape), || rng.random_range(-1.0..1.0));
    match Field::new(data, 1.0, ncomp > 0) {
        Ok(f) => f,
        Err(e) => panic!("random_field({dim:?}, {ncomp}): {e}"),
    }
}

/// A random scalar field.
pub fn random_scalar_field(dim: &[usize], seed: u64) -> Field {
    random_field(dim, 0, seed)
}

/// A random three-component vector field.
pub fn random_vector_field(dim: &[usize], seed: u64) -> Field {
    random_field(dim, 3, seed)
}

/// A scalar field holding `0, 1, 2, ...` in storage order.
pub fn ramp_field(dim: &[usize], scale: &[f64]) -> Field {
    let n: usize = dim.iter().product();
    let data = ArrayD::from_shape_vec(IxDyn(dim), (0..n).map(|v| v as f64).collect());
    match data.map_err(|e| e.to_string()).and_then(|d| Field::new(d, scale, false).map_err(|e| e.to_string())) {
        Ok(f) => f,
        Err(e) => panic!("ramp_field({dim:?}): {e}"),
    }
}
