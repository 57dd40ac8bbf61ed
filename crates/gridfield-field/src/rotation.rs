//! Rotation axes and the matrices that turn vector components.

use gridfield_ndimage::cos_sin_deg;
use ndarray::{ArrayD, Axis};

/// Physical axis a rotation turns about.
///
/// Storage order is `(z, y, x)` for 3-D fields and `(y, x)` for 2-D
/// fields; components are ordered `(x, y, z)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RotationAxis {
    /// Rotate in the y-z plane.
    X,
    /// Rotate in the z-x plane.
    Y,
    /// Rotate in the x-y plane.
    #[default]
    Z,
}

/// Storage axes of one rotation plane and the direction conventions
/// that tie grid rotation to component rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Plane {
    /// Sorted storage axes of the plane.
    pub(crate) axes: (usize, usize),
    /// `-1` when a positive physical angle turns the sorted axes the
    /// other way round.
    pub(crate) sense: i8,
}

impl RotationAxis {
    /// The rotation plane for a field with `ndim` spatial axes (2 or 3).
    pub(crate) fn plane(self, ndim: usize) -> Plane {
        if ndim == 2 {
            return Plane {
                axes: (0, 1),
                sense: -1,
            };
        }
        match self {
            Self::X => Plane {
                axes: (0, 1),
                sense: -1,
            },
            Self::Y => Plane {
                axes: (0, 2),
                sense: 1,
            },
            Self::Z => Plane {
                axes: (1, 2),
                sense: -1,
            },
        }
    }

    /// Right-handed rotation matrix by `angle` degrees, acting on
    /// `(x, y, z)` components.
    pub(crate) fn matrix(self, angle: f64) -> [[f64; 3]; 3] {
        let (c, s) = cos_sin_deg(angle);
        match self {
            Self::X => [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]],
            Self::Y => [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]],
            Self::Z => [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]],
        }
    }
}

/// Apply `m` to the component vector at every point of `data`, whose last
/// axis holds `ncomp` (2 or 3) components. Two-component data uses the
/// upper-left block.
pub(crate) fn rotate_components(data: &mut ArrayD<f64>, m: &[[f64; 3]; 3]) {
    let last = Axis(data.ndim() - 1);
    for mut lane in data.lanes_mut(last) {
        let n = lane.len();
        let mut v = [0.0; 3];
        for (slot, value) in v.iter_mut().zip(lane.iter()) {
            *slot = *value;
        }
        for (i, row) in m.iter().enumerate().take(n) {
            lane[i] = row.iter().zip(&v).take(n).map(|(a, b)| a * b).sum();
        }
    }
}
