//! Bridge to labeled-axis tensors used by external analysis tools.

use crate::field::Field;
use gridfield_core::{normalize_axis, FieldError, ScaleSpec};
use ndarray::ArrayD;

/// Name given to the component axis of a vector field.
pub const COMPONENT_AXIS_NAME: &str = "vector components";

/// Metadata for one axis of a [`LabeledTensor`].
#[derive(Clone, Debug, PartialEq)]
pub struct AxisInfo {
    /// Display name, e.g. `"axis x"`.
    pub name: String,
    /// Spacing between samples.
    pub scale: f64,
    /// Physical unit of `scale`.
    pub units: String,
}

/// An array whose axes carry names, spacings, and units.
///
/// `axes[k]` describes axis `k` of `data`.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledTensor<A = f64> {
    /// The samples.
    pub data: ArrayD<A>,
    /// One entry per axis of `data`.
    pub axes: Vec<AxisInfo>,
    /// Free-form title.
    pub title: String,
}

fn spatial_axis_name(axis: usize, ndim: usize) -> String {
    if ndim <= 3 {
        let names = ["x", "y", "z"];
        format!("axis {}", names[ndim - 1 - axis])
    } else {
        format!("axis {axis}")
    }
}

impl<A: Clone> Field<A> {
    /// Describe this field as a labeled tensor. Spatial axes are named
    /// `"axis x"`, `"axis y"`, `"axis z"` with x on the last spatial axis,
    /// and measured in nm.
    pub fn to_labeled(&self) -> LabeledTensor<A> {
        log::debug!("Calling to_labeled");
        let ndim = self.ndim();
        let mut axes: Vec<AxisInfo> = self
            .scale()
            .iter()
            .enumerate()
            .map(|(axis, &scale)| AxisInfo {
                name: spatial_axis_name(axis, ndim),
                scale,
                units: "nm".to_string(),
            })
            .collect();
        if self.vector() {
            axes.push(AxisInfo {
                name: COMPONENT_AXIS_NAME.to_string(),
                scale: 1.0,
                units: String::new(),
            });
        }
        let kind = if self.vector() { "vector" } else { "scalar" };
        LabeledTensor {
            data: self.data().clone(),
            axes,
            title: format!("{kind} field"),
        }
    }

    /// Build a field from a labeled tensor.
    ///
    /// `comp_pos` is the position of the component axis in `tensor.data`;
    /// it is moved to the end. When `vector` is `None`, the tensor is a
    /// vector field if the axis at `comp_pos` is named
    /// [`COMPONENT_AXIS_NAME`]. When `scale` is `None`, it is read from the
    /// spatial axes' metadata.
    ///
    /// # Errors
    ///
    /// [`FieldError::AxisOutOfRange`] for a bad `comp_pos`;
    /// [`FieldError::InvalidArgument`] if `axes` does not describe every
    /// axis of `data` when the scale is read from it; anything
    /// [`Field::new`] rejects.
    pub fn from_labeled(
        tensor: LabeledTensor<A>,
        scale: Option<ScaleSpec>,
        vector: Option<bool>,
        comp_pos: isize,
    ) -> Result<Self, FieldError> {
        log::debug!("Calling from_labeled");
        let LabeledTensor { data, mut axes, .. } = tensor;
        let ndim = data.ndim();
        let comp_axis = normalize_axis(comp_pos, ndim)?;
        let vector = vector.unwrap_or_else(|| {
            axes.get(comp_axis)
                .is_some_and(|a| a.name == COMPONENT_AXIS_NAME)
        });
        let data = if vector && comp_axis + 1 != ndim {
            let mut order: Vec<usize> = (0..ndim).filter(|&a| a != comp_axis).collect();
            order.push(comp_axis);
            if axes.len() == ndim {
                let info = axes.remove(comp_axis);
                axes.push(info);
            }
            data.permuted_axes(order).as_standard_layout().into_owned()
        } else {
            data
        };
        let scale = match scale {
            Some(s) => s,
            None => {
                if axes.len() != ndim {
                    return Err(FieldError::invalid(format!(
                        "{} axis descriptions for a {ndim}-dimensional tensor",
                        axes.len()
                    )));
                }
                let spatial = ndim - usize::from(vector);
                ScaleSpec::PerAxis(axes.iter().take(spatial).map(|a| a.scale).collect())
            }
        };
        Field::new(data, scale, vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, IxDyn};

    #[test]
    fn labels_follow_storage_order() {
        let f = Field::new(ArrayD::<f64>::zeros(IxDyn(&[2, 3, 4, 3])), [1.0, 2.0, 3.0], true).unwrap();
        let t = f.to_labeled();
        let names: Vec<&str> = t.axes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["axis z", "axis y", "axis x", COMPONENT_AXIS_NAME]);
        assert_eq!(t.axes[2].scale, 3.0);
        assert_eq!(t.axes[0].units, "nm");
        assert_eq!(t.title, "vector field");
        assert_eq!(Field::from_labeled(t, None, None, -1).unwrap(), f);
    }

    #[test]
    fn leading_component_axis_is_moved_last() {
        let data = Array::from_shape_fn((2, 3, 4), |(c, y, x)| (c * 100 + y * 10 + x) as f64).into_dyn();
        let axes = vec![
            AxisInfo {
                name: COMPONENT_AXIS_NAME.to_string(),
                scale: 1.0,
                units: String::new(),
            },
            AxisInfo {
                name: "axis y".to_string(),
                scale: 0.5,
                units: "nm".to_string(),
            },
            AxisInfo {
                name: "axis x".to_string(),
                scale: 0.25,
                units: "nm".to_string(),
            },
        ];
        let t = LabeledTensor {
            data,
            axes,
            title: String::new(),
        };
        let f = Field::from_labeled(t, None, None, 0).unwrap();
        assert!(f.vector());
        assert_eq!(f.shape(), &[3, 4, 2]);
        assert_eq!(&**f.scale(), &[0.5, 0.25]);
        assert_eq!(f.data()[[2, 1, 1]], 121.0);
    }

    #[test]
    fn explicit_scale_and_scalar() {
        let t = LabeledTensor {
            data: ArrayD::<f64>::zeros(IxDyn(&[2, 2])),
            axes: Vec::new(),
            title: String::new(),
        };
        let f = Field::from_labeled(t.clone(), Some(ScaleSpec::Uniform(2.0)), None, -1).unwrap();
        assert!(!f.vector());
        assert_eq!(&**f.scale(), &[2.0, 2.0]);
        assert!(Field::from_labeled(t, None, None, -1).is_err());
    }
}
