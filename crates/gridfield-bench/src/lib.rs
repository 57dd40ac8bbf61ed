//! Benchmark profiles for the gridfield workspace.
//!
//! - [`reference_vector_field`]: 32x64x64 magnetisation-like vector field
//! - [`reference_scalar_field`]: the same grid as a scalar field
//! - [`stress_vector_field`]: 64x128x128 vector field

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use gridfield_field::Field;
use ndarray::{Array4, ArrayD};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Reference profile: a 32x64x64 grid with unit vectors of random
/// direction, spacing `(2, 1, 1)`.
pub fn reference_vector_field(seed: u64) -> Field {
    unit_vector_field([32, 64, 64], seed)
}

/// Reference profile grid as a scalar field with samples in `[0, 1)`.
pub fn reference_scalar_field(seed: u64) -> Field {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let data = ArrayD::from_shape_simple_fn(vec![32, 64, 64], || rng.random::<f64>());
    Field::new(data, [2.0, 1.0, 1.0], false).unwrap()
}

/// Stress profile: 64x128x128 grid (about a million points).
pub fn stress_vector_field(seed: u64) -> Field {
    unit_vector_field([64, 128, 128], seed)
}

fn unit_vector_field(dim: [usize; 3], seed: u64) -> Field {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Array4::<f64>::zeros((dim[0], dim[1], dim[2], 3));
    for mut v in data.lanes_mut(ndarray::Axis(3)) {
        let z: f64 = rng.random_range(-1.0..1.0);
        let phi: f64 = rng.random_range(0.0..std::f64::consts::TAU);
        let r = (1.0 - z * z).sqrt();
        v[0] = r * phi.cos();
        v[1] = r * phi.sin();
        v[2] = z;
    }
    Field::new(data.into_dyn(), [2.0, 1.0, 1.0], true).unwrap()
}
