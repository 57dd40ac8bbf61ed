//! Finite-difference derivatives: gradient and curl.

use crate::field::Field;
use gridfield_core::FieldError;
use gridfield_ndimage::gradient_along;
use ndarray::{stack, ArrayViewD, Axis};

impl Field {
    /// Derivative along every spatial axis, using the scale as spacing.
    ///
    /// Unit axes are squeezed away first. A single remaining axis gives a
    /// scalar field; two or three give a vector field ordered `(x, y, z)`,
    /// the reverse of storage order.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidDimensionality`] for vector fields, and when
    /// the squeezed field has no axes or more than three.
    pub fn gradient(&self) -> Result<Field, FieldError> {
        log::debug!("Calling gradient");
        if self.vector() {
            return Err(FieldError::InvalidDimensionality {
                reason: "gradient can only be computed from scalar fields".to_string(),
            });
        }
        let squeezed = self.squeeze()?;
        let ndim = squeezed.ndim();
        if !(1..=3).contains(&ndim) {
            return Err(FieldError::InvalidDimensionality {
                reason: format!("gradient needs 1 to 3 non-trivial axes, got {ndim}"),
            });
        }
        let mut parts = (0..ndim)
            .map(|axis| gradient_along(squeezed.data().view(), axis, squeezed.scale()[axis]))
            .collect::<Result<Vec<_>, _>>()?;
        if ndim == 1 {
            let only = parts.pop().ok_or_else(|| FieldError::invariant("missing derivative"))?;
            return Field::new(only, squeezed.scale(), false);
        }
        parts.reverse();
        let views: Vec<ArrayViewD<'_, f64>> = parts.iter().map(|p| p.view()).collect();
        let data = stack(Axis(ndim), &views).map_err(|e| FieldError::invariant(e.to_string()))?;
        Field::new(data, squeezed.scale(), true)
    }

    /// Curl after squeezing unit axes.
    ///
    /// - 3-D with three components: the full curl vector.
    /// - 2-D with two components: the out-of-plane component, as a scalar
    ///   field.
    /// - 2-D scalar: the in-plane rotated gradient `(∂f/∂y, -∂f/∂x)`.
    ///
    /// # Errors
    ///
    /// [`FieldError::UnsupportedCurlConfiguration`] for every other
    /// combination.
    pub fn curl(&self) -> Result<Field, FieldError> {
        log::debug!("Calling curl");
        let squeezed = self.squeeze()?;
        match (squeezed.ndim(), squeezed.ncomp()) {
            (3, 3) => {
                log::debug!("input: 3 dimensions, 3 components");
                let [fx, fy, fz] = components::<3>(&squeezed)?;
                let [_, dy_fx, dz_fx] = components::<3>(&fx.gradient()?)?;
                let [dx_fy, _, dz_fy] = components::<3>(&fy.gradient()?)?;
                let [dx_fz, dy_fz, _] = components::<3>(&fz.gradient()?)?;
                Field::from_scalar_fields(&[
                    (&dy_fz - &dz_fy)?,
                    (&dz_fx - &dx_fz)?,
                    (&dx_fy - &dy_fx)?,
                ])
            }
            (2, 2) => {
                log::debug!("input: 2 dimensions, 2 components");
                let [fx, fy] = components::<2>(&squeezed)?;
                let [_, dy_fx] = components::<2>(&fx.gradient()?)?;
                let [dx_fy, _] = components::<2>(&fy.gradient()?)?;
                &dx_fy - &dy_fx
            }
            (2, 0) => {
                log::debug!("input: 2 dimensions, scalar field");
                let [dx, dy] = components::<2>(&squeezed.gradient()?)?;
                Field::from_scalar_fields(&[dy, (-&dx)?])
            }
            (ndim, ncomp) => Err(FieldError::UnsupportedCurlConfiguration { ndim, ncomp }),
        }
    }
}

fn components<const N: usize>(field: &Field) -> Result<[Field; N], FieldError> {
    let found = field.ncomp();
    field
        .comp()
        .try_into()
        .map_err(|_| FieldError::ComponentCountMismatch {
            ncomps: vec![found, N],
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, ArrayD, IxDyn};

    fn assert_all(field: &Field, expected: f64) {
        for v in field.data() {
            assert!((v - expected).abs() < 1e-12, "{v} != {expected}");
        }
    }

    #[test]
    fn gradient_orders_components_x_first() {
        // f = 2x + 3y with x spacing 0.5 along storage axis 1
        let data = Array::from_shape_fn((4, 5), |(i, j)| 2.0 * (j as f64 * 0.5) + 3.0 * i as f64);
        let f = Field::new(data.into_dyn(), [1.0, 0.5], false).unwrap();
        let g = f.gradient().unwrap();
        assert!(g.vector());
        assert_eq!(g.shape(), &[4, 5, 2]);
        let [gx, gy] = components::<2>(&g).unwrap();
        assert_all(&gx, 2.0);
        assert_all(&gy, 3.0);
    }

    #[test]
    fn gradient_of_a_line_is_scalar() {
        let data = Array::from_shape_fn((1, 6), |(_, j)| (j * j) as f64);
        let f = Field::new(data.into_dyn(), 1.0, false).unwrap();
        let g = f.gradient().unwrap();
        assert!(!g.vector());
        assert_eq!(g.shape(), &[6]);
        assert_eq!(g.data()[[2]], 4.0);
        assert_eq!(&**g.scale(), &[1.0]);
    }

    #[test]
    fn gradient_rejects_vectors() {
        let f = Field::new(ArrayD::<f64>::zeros(IxDyn(&[3, 3, 2])), 1.0, true).unwrap();
        assert!(matches!(f.gradient(), Err(FieldError::InvalidDimensionality { .. })));
    }

    #[test]
    fn curl_of_a_vortex() {
        // v = (-y, x, 0) has curl (0, 0, 2)
        let data = Array::from_shape_fn((3, 4, 5, 3), |(_, y, x, c)| match c {
            0 => -(y as f64),
            1 => x as f64,
            _ => 0.0,
        });
        let v = Field::new(data.into_dyn(), 1.0, true).unwrap();
        let [cx, cy, cz] = components::<3>(&v.curl().unwrap()).unwrap();
        assert_all(&cx, 0.0);
        assert_all(&cy, 0.0);
        assert_all(&cz, 2.0);
    }

    #[test]
    fn planar_curls() {
        let data = Array::from_shape_fn((4, 4, 2), |(y, x, c)| if c == 0 { -(y as f64) } else { x as f64 });
        let v = Field::new(data.into_dyn(), 1.0, true).unwrap();
        let out = v.curl().unwrap();
        assert!(!out.vector());
        assert_all(&out, 2.0);

        let s = Field::new(Array::from_shape_fn((1, 4, 4), |(_, _, x)| x as f64).into_dyn(), 1.0, false).unwrap();
        let [cx, cy] = components::<2>(&s.curl().unwrap()).unwrap();
        assert_all(&cx, 0.0);
        assert_all(&cy, -1.0);
    }

    #[test]
    fn unsupported_curl_shapes() {
        let s = Field::new(ArrayD::<f64>::zeros(IxDyn(&[3, 3, 3])), 1.0, false).unwrap();
        assert_eq!(
            s.curl().unwrap_err(),
            FieldError::UnsupportedCurlConfiguration { ndim: 3, ncomp: 0 }
        );
        let v = Field::new(ArrayD::<f64>::zeros(IxDyn(&[3, 3, 3, 2])), 1.0, true).unwrap();
        assert_eq!(
            v.curl().unwrap_err(),
            FieldError::UnsupportedCurlConfiguration { ndim: 3, ncomp: 2 }
        );
    }
}
