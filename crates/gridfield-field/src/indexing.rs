//! Scale-aware indexing.
//!
//! Slicing a spatial axis keeps its scale entry, an integer index drops
//! it. Integer-indexing the component axis turns a vector field scalar.
//! When no spatial axis survives there is nothing left to scale, and the
//! result is a bare value or, for vector fields, the component values.

use crate::field::Field;
use gridfield_core::{expand_index, FieldError, FieldIndex, Scale};
use ndarray::{Axis, Slice};

/// Result of [`Field::get`].
#[derive(Clone, Debug, PartialEq)]
pub enum Indexed<A = f64> {
    /// At least one spatial axis survived.
    Field(Field<A>),
    /// A single sample of a scalar field (or one component of a vector).
    Scalar(A),
    /// The selected components at a single point of a vector field.
    Vector(Vec<A>),
}

impl<A> Indexed<A> {
    /// The field result, if any.
    pub fn into_field(self) -> Option<Field<A>> {
        match self {
            Self::Field(f) => Some(f),
            _ => None,
        }
    }
}

impl<A: Clone> Field<A> {
    /// Index like an array while keeping the scale consistent.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridfield_core::idx;
    /// use gridfield_field::{Field, Indexed};
    /// use ndarray::{ArrayD, IxDyn};
    ///
    /// let field = Field::new(ArrayD::<f64>::zeros(IxDyn(&[4, 4, 4, 3])), 1.0, true).unwrap();
    /// let plane = field.get(&idx![1]).unwrap().into_field().unwrap();
    /// assert_eq!(plane.shape(), &[4, 4, 3]);
    /// assert_eq!(field.get(&idx![1, 2, 3]).unwrap(), Indexed::Vector(vec![0.0; 3]));
    /// ```
    ///
    /// # Errors
    ///
    /// [`FieldError::UnsupportedIndexing`] for new axes, repeated
    /// ellipses, too many entries, or a zero step;
    /// [`FieldError::IndexOutOfBounds`] for integer indices outside their
    /// axis.
    pub fn get(&self, index: &[FieldIndex]) -> Result<Indexed<A>, FieldError> {
        log::debug!("Calling get");
        let expanded = expand_index(index, self.shape().len())?;
        let scale: Scale = self.scale().select(|axis| {
            matches!(expanded[axis], FieldIndex::Slice(_))
        });
        let vector = self.vector() && matches!(expanded.last(), Some(FieldIndex::Slice(_)));

        let mut view = self.data().view();
        for (axis, entry) in expanded.iter().enumerate().rev() {
            let len = view.len_of(Axis(axis));
            match *entry {
                FieldIndex::Index(i) => {
                    let resolved = if i < 0 { i + len as isize } else { i };
                    if resolved < 0 || resolved >= len as isize {
                        return Err(FieldError::IndexOutOfBounds { index: i, axis, len });
                    }
                    view = view.index_axis_move(Axis(axis), resolved as usize);
                }
                FieldIndex::Slice(spec) => {
                    let r = spec.resolve(len)?;
                    view.slice_axis_inplace(Axis(axis), Slice::new(r.start, Some(r.end), r.step));
                }
                FieldIndex::Ellipsis | FieldIndex::NewAxis => {
                    return Err(FieldError::UnsupportedIndexing {
                        reason: "index was not expanded".to_string(),
                    });
                }
            }
        }

        if scale.ndim() > 0 {
            return Ok(Indexed::Field(Field::new(view.to_owned(), scale, vector)?));
        }
        if view.ndim() == 0 {
            return view
                .first()
                .cloned()
                .map(Indexed::Scalar)
                .ok_or_else(|| FieldError::invariant("zero-dimensional selection is empty"));
        }
        Ok(Indexed::Vector(view.iter().cloned().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridfield_core::{idx, SliceSpec};
    use ndarray::{Array, ArrayD, IxDyn};

    fn cube() -> Field {
        let data = Array::from_shape_fn((4, 4, 4, 3), |(z, y, x, c)| (z * 1000 + y * 100 + x * 10 + c) as f64);
        Field::new(data.into_dyn(), [1.0, 2.0, 3.0], true).unwrap()
    }

    #[test]
    fn integer_index_drops_leading_scale() {
        let f = Field::new(ArrayD::<f64>::zeros(IxDyn(&[3, 4, 5])), [1.0, 2.0, 3.0], false).unwrap();
        let out = f.get(&idx![0]).unwrap().into_field().unwrap();
        assert_eq!(out.shape(), &[4, 5]);
        assert_eq!(&**out.scale(), &[2.0, 3.0]);
    }

    #[test]
    fn vector_plane_and_point() {
        let f = cube();
        let plane = f.get(&idx![1]).unwrap().into_field().unwrap();
        assert_eq!(plane.shape(), &[4, 4, 3]);
        assert!(plane.vector());
        assert_eq!(&**plane.scale(), &[2.0, 3.0]);

        let point = f.get(&idx![1, 2, 3]).unwrap();
        assert_eq!(point, Indexed::Vector(vec![1230.0, 1231.0, 1232.0]));
    }

    #[test]
    fn component_index_makes_scalar() {
        let f = cube();
        let comp = f.get(&idx![.., .., .., 2]).unwrap().into_field().unwrap();
        assert!(!comp.vector());
        assert_eq!(comp.shape(), &[4, 4, 4]);
        assert_eq!(f.get(&idx![3, 2, 1, 0]).unwrap(), Indexed::Scalar(3210.0));
        let ellipsis = f.get(&idx![FieldIndex::Ellipsis, 1]).unwrap().into_field().unwrap();
        assert_eq!(ellipsis.data()[[0, 0, 0]], 1.0);
        assert!(!ellipsis.vector());
    }

    #[test]
    fn slices_keep_scale_and_follow_python_semantics() {
        let f = cube();
        let s = f
            .get(&[FieldIndex::Slice(SliceSpec::new(None, None).with_step(-2)), FieldIndex::from(1..3)])
            .unwrap()
            .into_field()
            .unwrap();
        assert_eq!(s.shape(), &[2, 2, 4, 3]);
        assert_eq!(&**s.scale(), &[1.0, 2.0, 3.0]);
        assert_eq!(s.data()[[0, 0, 0, 0]], 3100.0);
        assert_eq!(s.data()[[1, 1, 0, 0]], 1200.0);
    }

    #[test]
    fn component_slice_at_a_point_is_a_vector() {
        let f = cube();
        let out = f.get(&idx![0, 0, 1, 1..]).unwrap();
        assert_eq!(out, Indexed::Vector(vec![11.0, 12.0]));
    }

    #[test]
    fn rejects_new_axis_and_out_of_bounds() {
        let f = cube();
        assert!(matches!(
            f.get(&[FieldIndex::NewAxis]),
            Err(FieldError::UnsupportedIndexing { .. })
        ));
        assert_eq!(
            f.get(&idx![4]).unwrap_err(),
            FieldError::IndexOutOfBounds { index: 4, axis: 0, len: 4 }
        );
        assert_eq!(f.get(&idx![-1]).unwrap().into_field().unwrap().data()[[0, 0, 0]], 3000.0);
        assert!(matches!(
            f.get(&idx![0, 0, 0, 0, 0]),
            Err(FieldError::UnsupportedIndexing { .. })
        ));
    }
}
