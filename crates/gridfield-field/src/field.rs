//! The [`Field`] container: construction, properties, and component views.

use gridfield_core::{Components, FieldError, Scale, ScaleSpec};
use ndarray::{ArrayD, ArrayViewD, Axis};
use std::fmt;

/// A scalar or vector field sampled on a regular grid.
///
/// `data` holds the samples. For vector fields its last axis is the
/// component axis (length 2 or 3, ordered x, y, z); every other axis is a
/// spatial axis with one `scale` entry each, in storage order.
///
/// Every method except [`Field::set_vector`] leaves `self` untouched and
/// returns freshly allocated data.
///
/// # Examples
///
/// ```
/// use gridfield_field::Field;
/// use ndarray::ArrayD;
///
/// let data = ArrayD::<f64>::zeros(ndarray::IxDyn(&[4, 5, 3]));
/// let field = Field::new(data, [2.0, 1.0], true).unwrap();
/// assert_eq!(field.dim(), &[4, 5]);
/// assert_eq!(field.ncomp(), 3);
/// ```
#[derive(Clone, PartialEq)]
pub struct Field<A = f64> {
    data: ArrayD<A>,
    scale: Scale,
    components: Components,
}

impl<A: Clone> Field<A> {
    /// Wrap `data` with a scale and a scalar/vector classification.
    ///
    /// `scale` is either one spacing for every spatial axis or one entry
    /// per spatial axis.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvariantViolation`] if `vector` is set and the last
    /// axis is not of length 2 or 3, or if the scale does not fit the
    /// spatial dimensions.
    pub fn new(
        data: ArrayD<A>,
        scale: impl Into<ScaleSpec>,
        vector: bool,
    ) -> Result<Self, FieldError> {
        let components = Components::from_shape(data.shape(), vector)?;
        let scale = scale
            .into()
            .resolve(components.spatial(data.shape()).len())?;
        Ok(Self {
            data,
            scale,
            components,
        })
    }

    /// Build a vector field from two or three scalar fields (x, y, z).
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidArgument`] for the wrong number of fields, a
    /// vector input, or mismatched shapes; [`FieldError::ScaleMismatch`]
    /// if the scales differ.
    pub fn from_scalar_fields(fields: &[Field<A>]) -> Result<Self, FieldError> {
        log::debug!("Calling from_scalar_fields");
        if !(2..=3).contains(&fields.len()) {
            return Err(FieldError::invalid(format!(
                "a vector field needs 2 or 3 scalar components, got {}",
                fields.len()
            )));
        }
        if fields.iter().any(Field::vector) {
            return Err(FieldError::invalid("all components must be scalar fields"));
        }
        let first = &fields[0];
        if fields.iter().any(|f| f.scale != first.scale) {
            return Err(FieldError::ScaleMismatch {
                scales: fields.iter().map(|f| f.scale.to_vec()).collect(),
            });
        }
        let views: Vec<ArrayViewD<'_, A>> = fields.iter().map(|f| f.data.view()).collect();
        let stacked = ndarray::stack(Axis(first.data.ndim()), &views).map_err(|_| {
            FieldError::invalid(format!(
                "component shapes differ: {:?}",
                fields.iter().map(|f| f.data.shape().to_vec()).collect::<Vec<_>>()
            ))
        })?;
        Field::new(stacked, &first.scale, true)
    }

    /// The raw samples, without copying.
    pub fn data(&self) -> &ArrayD<A> {
        &self.data
    }

    /// Mutable access for shape-preserving writes.
    pub(crate) fn data_mut(&mut self) -> &mut ArrayD<A> {
        &mut self.data
    }

    /// Per-spatial-axis grid spacing.
    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    /// `true` for vector fields.
    pub fn vector(&self) -> bool {
        self.components.is_vector()
    }

    /// Scalar/vector classification.
    pub fn components(&self) -> Components {
        self.components
    }

    /// Shape of the raw array, including a component axis.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Spatial shape (the raw shape without a component axis).
    pub fn dim(&self) -> &[usize] {
        self.components.spatial(self.data.shape())
    }

    /// Number of spatial axes.
    pub fn ndim(&self) -> usize {
        self.dim().len()
    }

    /// Number of vector components; 0 for scalar fields.
    pub fn ncomp(&self) -> usize {
        self.components.ncomp()
    }

    /// One scalar field per component, sharing this field's scale.
    ///
    /// Empty for scalar fields.
    pub fn comp(&self) -> Vec<Field<A>> {
        log::debug!("Calling comp");
        let Some(axis) = self.components.component_axis(self.data.ndim()) else {
            return Vec::new();
        };
        self.data
            .axis_iter(Axis(axis))
            .map(|c| Field {
                data: c.to_owned(),
                scale: self.scale.clone(),
                components: Components::Scalar,
            })
            .collect()
    }

    /// A deep copy.
    pub fn copy(&self) -> Self {
        log::debug!("Calling copy");
        self.clone()
    }

    /// Split into `(data, scale, vector)` for serializers and other
    /// collaborators.
    pub fn into_raw_parts(self) -> (ArrayD<A>, Scale, bool) {
        let vector = self.vector();
        (self.data, self.scale, vector)
    }
}

impl Field<f64> {
    /// Per-point magnitude: Euclidean norm over components for vector
    /// fields, absolute value for scalar fields.
    pub fn amp(&self) -> Field<f64> {
        log::debug!("Calling amp");
        let data = match self.components.component_axis(self.data.ndim()) {
            Some(axis) => self
                .data
                .map_axis(Axis(axis), |v| v.iter().map(|c| c * c).sum::<f64>().sqrt()),
            None => self.data.mapv(f64::abs),
        };
        Field {
            data,
            scale: self.scale.clone(),
            components: Components::Scalar,
        }
    }

    /// `true` wherever the amplitude is positive.
    pub fn mask(&self) -> Field<bool> {
        log::debug!("Calling mask");
        let amp = self.amp();
        Field {
            data: amp.data.mapv(|a| a > 0.0),
            scale: amp.scale,
            components: Components::Scalar,
        }
    }
}

fn write_tuple(f: &mut fmt::Formatter<'_>, items: &[usize]) -> fmt::Result {
    write!(f, "(")?;
    for (i, n) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{n}")?;
    }
    if items.len() == 1 {
        write!(f, ",")?;
    }
    write!(f, ")")
}

impl<A: Clone> fmt::Display for Field<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field(dim=")?;
        write_tuple(f, self.dim())?;
        write!(f, ", scale={}, vector={}", self.scale, self.vector())?;
        if self.vector() {
            write!(f, ", ncomp={}", self.ncomp())?;
        }
        write!(f, ")")
    }
}

impl<A: fmt::Debug> fmt::Debug for Field<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("data", &self.data)
            .field("scale", &self.scale)
            .field("vector", &self.components.is_vector())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array, IxDyn};

    fn zeros(shape: &[usize]) -> ArrayD<f64> {
        ArrayD::zeros(IxDyn(shape))
    }

    #[test]
    fn uniform_scale_covers_spatial_axes_only() {
        let f = Field::new(zeros(&[4, 4, 4, 3]), 1.5, true).unwrap();
        assert_eq!(&**f.scale(), &[1.5, 1.5, 1.5]);
        assert_eq!(f.dim(), &[4, 4, 4]);
        assert_eq!(f.shape(), &[4, 4, 4, 3]);
        assert_eq!(f.ncomp(), 3);
    }

    #[test]
    fn rejects_four_components() {
        let err = Field::new(zeros(&[5, 5, 4]), 1.0, true).unwrap_err();
        assert!(matches!(err, FieldError::InvariantViolation { .. }));
    }

    #[test]
    fn rejects_scale_of_wrong_length() {
        let err = Field::new(zeros(&[2, 3, 2]), [1.0, 1.0, 1.0], true).unwrap_err();
        assert!(matches!(err, FieldError::InvariantViolation { .. }));
        assert!(Field::new(zeros(&[2, 3, 2]), [1.0, 1.0, 1.0], false).is_ok());
    }

    #[test]
    fn comp_splits_components() {
        let data = Array::from_shape_fn((2, 3, 2), |(i, j, c)| (i * 10 + j) as f64 * if c == 0 { 1.0 } else { -1.0 });
        let f = Field::new(data.into_dyn(), [1.0, 2.0], true).unwrap();
        let comps = f.comp();
        assert_eq!(comps.len(), 2);
        assert!(comps.iter().all(|c| !c.vector() && c.scale() == f.scale()));
        assert_eq!(comps[1].data()[[1, 2]], -12.0);
        assert!(Field::new(zeros(&[3]), 1.0, false).unwrap().comp().is_empty());
    }

    #[test]
    fn amp_and_mask() {
        let data = array![[[3.0, 4.0], [0.0, 0.0]]].into_dyn();
        let f = Field::new(data, 1.0, true).unwrap();
        let amp = f.amp();
        assert!(!amp.vector());
        assert_eq!(amp.data(), &array![[5.0, 0.0]].into_dyn());
        assert_eq!(f.mask().data(), &array![[true, false]].into_dyn());

        let s = Field::new(array![-2.0, 0.0].into_dyn(), 1.0, false).unwrap();
        assert_eq!(s.amp().data(), &array![2.0, 0.0].into_dyn());
    }

    #[test]
    fn from_scalar_fields_stacks_last() {
        let x = Field::new(array![[1.0, 2.0]].into_dyn(), [1.0, 3.0], false).unwrap();
        let y = Field::new(array![[3.0, 4.0]].into_dyn(), [1.0, 3.0], false).unwrap();
        let v = Field::from_scalar_fields(&[x.clone(), y.clone()]).unwrap();
        assert_eq!(v.shape(), &[1, 2, 2]);
        assert_eq!(v.comp(), vec![x.clone(), y]);

        let other = Field::new(array![[3.0, 4.0]].into_dyn(), 2.0, false).unwrap();
        assert!(matches!(
            Field::from_scalar_fields(&[x.clone(), other]),
            Err(FieldError::ScaleMismatch { .. })
        ));
        assert!(Field::from_scalar_fields(&[x]).is_err());
    }

    #[test]
    fn display_summarizes() {
        let f = Field::new(zeros(&[4, 5, 3]), [1.0, 2.5], true).unwrap();
        assert_eq!(f.to_string(), "Field(dim=(4, 5), scale=(1, 2.5), vector=true, ncomp=3)");
        let s = Field::new(zeros(&[7]), 1.0, false).unwrap();
        assert_eq!(s.to_string(), "Field(dim=(7,), scale=(1,), vector=false)");
    }

    #[test]
    fn raw_parts_round_trip() {
        let f = Field::new(zeros(&[2, 2]), [1.0, 2.0], false).unwrap();
        let (data, scale, vector) = f.clone().into_raw_parts();
        assert_eq!(Field::new(data, scale, vector).unwrap(), f);
    }
}
