//! Test fixtures and assertion helpers for gridfield development.
//!
//! [`random_field`] and friends build seeded fields; the `assert_*`
//! helpers check the structural invariants every operation must keep and
//! compare floating-point fields with a tolerance.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{ramp_field, random_field, random_scalar_field, random_vector_field};

use gridfield_field::Field;

/// Panic unless `field` keeps the scale/shape/component invariants.
pub fn assert_field_invariants<A: Clone>(field: &Field<A>) {
    assert_eq!(
        field.scale().len(),
        field.dim().len(),
        "scale {} does not cover dim {:?}",
        field.scale(),
        field.dim()
    );
    if field.vector() {
        let last = field.shape().last().copied();
        assert!(
            matches!(last, Some(2 | 3)),
            "vector field with component axis {last:?}"
        );
        assert_eq!(field.shape().len(), field.dim().len() + 1);
    } else {
        assert_eq!(field.shape(), field.dim());
    }
    assert!(field.scale().iter().all(|s| s.is_finite() && *s > 0.0));
}

/// Panic unless both fields have the same layout and their samples agree
/// within `tol` (absolute).
pub fn assert_fields_close(actual: &Field, expected: &Field, tol: f64) {
    assert_eq!(actual.shape(), expected.shape(), "shapes differ");
    assert_eq!(actual.vector(), expected.vector(), "vector flags differ");
    for (a, b) in actual.scale().iter().zip(expected.scale().iter()) {
        assert!((a - b).abs() <= tol, "scales differ: {} vs {}", actual.scale(), expected.scale());
    }
    for ((idx, a), b) in actual.data().indexed_iter().zip(expected.data().iter()) {
        assert!(
            (a - b).abs() <= tol || (a.is_nan() && b.is_nan()),
            "samples differ at {idx:?}: {a} vs {b}"
        );
    }
}
