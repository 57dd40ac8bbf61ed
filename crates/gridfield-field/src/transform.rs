//! Geometric transforms that keep the grid, the scale, and the vector
//! components consistent.

use crate::field::Field;
use crate::rotation::{rotate_components, RotationAxis};
use gridfield_core::{normalize_axis_tuple, FieldError};
use gridfield_ndimage::{block_mean, flip_axes, pad, rot90, rotate_planes, zoom, InterpConfig, PadMode};
use ndarray::{ArrayD, ArrayViewD, Axis};

/// Samples per bin along each spatial axis.
#[derive(Clone, Debug, PartialEq)]
pub enum BinFactor {
    /// The same factor for every spatial axis.
    Uniform(usize),
    /// One factor per spatial axis.
    PerAxis(Vec<usize>),
}

impl From<usize> for BinFactor {
    fn from(n: usize) -> Self {
        Self::Uniform(n)
    }
}

impl From<Vec<usize>> for BinFactor {
    fn from(n: Vec<usize>) -> Self {
        Self::PerAxis(n)
    }
}

impl<const N: usize> From<[usize; N]> for BinFactor {
    fn from(n: [usize; N]) -> Self {
        Self::PerAxis(n.to_vec())
    }
}

impl BinFactor {
    fn resolve(&self, ndim: usize) -> Result<Vec<usize>, FieldError> {
        let factors = match self {
            Self::Uniform(n) => vec![*n; ndim],
            Self::PerAxis(v) if v.len() == ndim => v.clone(),
            Self::PerAxis(v) => {
                return Err(FieldError::invalid(format!(
                    "bin needs one factor per spatial axis ({ndim}), got {}",
                    v.len()
                )))
            }
        };
        if factors.contains(&0) {
            return Err(FieldError::invalid(format!(
                "bin factors must be positive, got {factors:?}"
            )));
        }
        Ok(factors)
    }
}

/// Resampling factor along each spatial axis.
#[derive(Clone, Debug, PartialEq)]
pub enum ZoomFactor {
    /// The same factor for every spatial axis.
    Uniform(f64),
    /// One factor per spatial axis.
    PerAxis(Vec<f64>),
}

impl From<f64> for ZoomFactor {
    fn from(z: f64) -> Self {
        Self::Uniform(z)
    }
}

impl From<Vec<f64>> for ZoomFactor {
    fn from(z: Vec<f64>) -> Self {
        Self::PerAxis(z)
    }
}

impl<const N: usize> From<[f64; N]> for ZoomFactor {
    fn from(z: [f64; N]) -> Self {
        Self::PerAxis(z.to_vec())
    }
}

impl ZoomFactor {
    fn resolve(&self, ndim: usize) -> Result<Vec<f64>, FieldError> {
        let factors = match self {
            Self::Uniform(z) => vec![*z; ndim],
            Self::PerAxis(v) if v.len() == ndim => v.clone(),
            Self::PerAxis(v) => {
                return Err(FieldError::invalid(format!(
                    "zoom needs one factor per spatial axis ({ndim}), got {}",
                    v.len()
                )))
            }
        };
        if factors.iter().any(|z| !z.is_finite() || *z <= 0.0) {
            return Err(FieldError::invalid(format!(
                "zoom factors must be finite and positive, got {factors:?}"
            )));
        }
        Ok(factors)
    }
}

/// Padding widths along the spatial axes.
#[derive(Clone, Debug, PartialEq)]
pub enum PadWidth {
    /// The same width on both sides of every spatial axis.
    Uniform(usize),
    /// `(before, after)` for each spatial axis.
    PerAxis(Vec<(usize, usize)>),
}

impl From<usize> for PadWidth {
    fn from(w: usize) -> Self {
        Self::Uniform(w)
    }
}

impl From<Vec<usize>> for PadWidth {
    fn from(w: Vec<usize>) -> Self {
        Self::PerAxis(w.into_iter().map(|p| (p, p)).collect())
    }
}

impl From<Vec<(usize, usize)>> for PadWidth {
    fn from(w: Vec<(usize, usize)>) -> Self {
        Self::PerAxis(w)
    }
}

impl<const N: usize> From<[(usize, usize); N]> for PadWidth {
    fn from(w: [(usize, usize); N]) -> Self {
        Self::PerAxis(w.to_vec())
    }
}

impl PadWidth {
    fn resolve(&self, ndim: usize) -> Result<Vec<(usize, usize)>, FieldError> {
        match self {
            Self::Uniform(w) => Ok(vec![(*w, *w); ndim]),
            Self::PerAxis(v) if v.len() == ndim => Ok(v.clone()),
            Self::PerAxis(v) => Err(FieldError::invalid(format!(
                "pad needs one width per spatial axis ({ndim}), got {}",
                v.len()
            ))),
        }
    }
}

impl<A: Clone> Field<A> {
    /// Drop spatial axes of length 1 and their scale entries.
    ///
    /// The component axis is never touched.
    pub fn squeeze(&self) -> Result<Field<A>, FieldError> {
        log::debug!("Calling squeeze");
        let dropped: Vec<usize> = self
            .dim()
            .iter()
            .enumerate()
            .filter(|(_, len)| **len == 1)
            .map(|(axis, _)| axis)
            .collect();
        if dropped.is_empty() {
            return Ok(self.clone());
        }
        log::info!("The following indices were squeezed: {dropped:?}");
        let mut view = self.data().view();
        for &axis in dropped.iter().rev() {
            view = view.index_axis_move(Axis(axis), 0);
        }
        Field::new(view.to_owned(), self.scale().without_axes(&dropped), self.vector())
    }

    /// Flat copy of the samples selected by `mask` (every point when
    /// `None`), in storage order. Vector fields list all x values, then all
    /// y values, then all z values.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidArgument`] if the mask shape is not `dim`.
    pub fn get_vector(&self, mask: Option<&ArrayD<bool>>) -> Result<Vec<A>, FieldError> {
        log::debug!("Calling get_vector");
        self.check_mask(mask)?;
        let mut out = Vec::new();
        for comp in self.component_views() {
            match mask {
                Some(m) => out.extend(
                    comp.iter()
                        .zip(m.iter())
                        .filter(|(_, keep)| **keep)
                        .map(|(v, _)| v.clone()),
                ),
                None => out.extend(comp.iter().cloned()),
            }
        }
        Ok(out)
    }

    /// Overwrite the samples selected by `mask` with `values`, laid out as
    /// [`Field::get_vector`] returns them.
    ///
    /// This is the one method that mutates a field in place.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidArgument`] if the mask shape is not `dim`, if
    /// the length of `values` is not a multiple of the component count, or
    /// if it does not match the number of selected points.
    pub fn set_vector(&mut self, values: &[A], mask: Option<&ArrayD<bool>>) -> Result<(), FieldError> {
        log::debug!("Calling set_vector");
        self.check_mask(mask)?;
        let ncomp = self.ncomp().max(1);
        if values.len() % ncomp != 0 {
            return Err(FieldError::invalid(format!(
                "{} values do not cover all {ncomp} components of every point",
                values.len()
            )));
        }
        let count = values.len() / ncomp;
        let selected = mask.map_or_else(|| self.dim().iter().product(), |m| m.iter().filter(|&&k| k).count());
        if count != selected {
            return Err(FieldError::invalid(format!(
                "{count} values per component given for {selected} selected points"
            )));
        }
        let component_axis = self.components().component_axis(self.shape().len());
        let data = self.data_mut();
        for (c, chunk) in values.chunks(count.max(1)).enumerate().take(ncomp) {
            let mut comp = match component_axis {
                Some(axis) => data.index_axis_mut(Axis(axis), c),
                None => data.view_mut(),
            };
            let mut source = chunk.iter();
            for (slot, keep) in comp.iter_mut().zip(mask_iter(mask)) {
                if keep {
                    if let Some(v) = source.next() {
                        *slot = v.clone();
                    }
                }
            }
        }
        Ok(())
    }

    fn check_mask(&self, mask: Option<&ArrayD<bool>>) -> Result<(), FieldError> {
        match mask {
            Some(m) if m.shape() != self.dim() => Err(FieldError::invalid(format!(
                "mask shape {:?} does not match field dimensions {:?}",
                m.shape(),
                self.dim()
            ))),
            _ => Ok(()),
        }
    }

    fn component_views(&self) -> Vec<ArrayViewD<'_, A>> {
        match self.components().component_axis(self.shape().len()) {
            Some(axis) => self.data().axis_iter(Axis(axis)).collect(),
            None => vec![self.data().view()],
        }
    }
}

fn mask_iter(mask: Option<&ArrayD<bool>>) -> Box<dyn Iterator<Item = bool> + '_> {
    match mask {
        Some(m) => Box::new(m.iter().copied()),
        None => Box::new(std::iter::repeat(true)),
    }
}

impl Field {
    /// Rotate by `angle` degrees about `axis` with a cubic spline.
    ///
    /// See [`Field::rotate_with`].
    pub fn rotate(&self, angle: f64, axis: RotationAxis) -> Result<Field, FieldError> {
        self.rotate_with(angle, axis, &InterpConfig::default())
    }

    /// Rotate the grid by `angle` degrees (right-handed) about `axis` and
    /// turn the vectors by the same rotation. The shape is kept; points
    /// rotated in from outside the grid follow `cfg`'s boundary mode.
    ///
    /// 2-D fields always rotate about [`RotationAxis::Z`].
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidDimensionality`] unless the field is 2-D or
    /// 3-D, or for a two-component field rotated out of the x-y plane;
    /// [`FieldError::AnisotropicScale`] if the in-plane scales differ.
    pub fn rotate_with(&self, angle: f64, axis: RotationAxis, cfg: &InterpConfig) -> Result<Field, FieldError> {
        log::debug!("Calling rotate");
        let axis = self.checked_rotation_axis(axis, "rotate")?;
        let plane = axis.plane(self.ndim());
        let mut data = rotate_planes(self.data().view(), f64::from(plane.sense) * angle, plane.axes, cfg)?;
        if self.vector() {
            rotate_components(&mut data, &axis.matrix(angle));
        }
        Field::new(data, self.scale(), self.vector())
    }

    /// Rotate by `k` quarter turns (right-handed) about `axis` without
    /// interpolation. Any integer `k` is accepted.
    ///
    /// # Errors
    ///
    /// As for [`Field::rotate_with`].
    pub fn rot90(&self, k: isize, axis: RotationAxis) -> Result<Field, FieldError> {
        log::debug!("Calling rot90");
        let axis = self.checked_rotation_axis(axis, "rot90")?;
        let plane = axis.plane(self.ndim());
        let mut data = rot90(self.data().view(), isize::from(plane.sense) * k, plane.axes)?;
        if self.vector() {
            let quarter = k.rem_euclid(4) as f64 * 90.0;
            rotate_components(&mut data, &axis.matrix(quarter));
        }
        Field::new(data, self.scale(), self.vector())
    }

    fn checked_rotation_axis(&self, axis: RotationAxis, op: &str) -> Result<RotationAxis, FieldError> {
        let ndim = self.ndim();
        if !(2..=3).contains(&ndim) {
            return Err(FieldError::InvalidDimensionality {
                reason: format!("{op} is only defined for 2-D and 3-D fields, got {ndim}-D"),
            });
        }
        let axis = if ndim == 2 { RotationAxis::Z } else { axis };
        if self.ncomp() == 2 && axis != RotationAxis::Z {
            return Err(FieldError::InvalidDimensionality {
                reason: format!("{op} of a two-component field must stay in the x-y plane"),
            });
        }
        let (a0, a1) = axis.plane(ndim).axes;
        let (s0, s1) = (self.scale()[a0], self.scale()[a1]);
        if s0 != s1 {
            return Err(FieldError::AnisotropicScale {
                axes: (a0, a1),
                scales: (s0, s1),
            });
        }
        Ok(axis)
    }

    /// Resample with a cubic spline; see [`Field::zoom_with`].
    pub fn zoom(&self, factor: impl Into<ZoomFactor>) -> Result<Field, FieldError> {
        self.zoom_with(factor, &InterpConfig::default())
    }

    /// Resample each spatial axis by its zoom factor. The new scale is
    /// the old scale divided by the factor; components are resampled
    /// independently.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidArgument`] for non-positive factors, a factor
    /// list of the wrong length, or an axis that would shrink to nothing.
    pub fn zoom_with(&self, factor: impl Into<ZoomFactor>, cfg: &InterpConfig) -> Result<Field, FieldError> {
        log::debug!("Calling zoom");
        let spatial = factor.into().resolve(self.ndim())?;
        let mut factors = spatial.clone();
        factors.extend(std::iter::repeat_n(1.0, self.components().extra_axes()));
        let data = zoom(self.data().view(), &factors, cfg)?;
        let inverse: Vec<f64> = spatial.iter().map(|z| 1.0 / z).collect();
        Field::new(data, self.scale().scaled_by(&inverse), self.vector())
    }

    /// Reverse the field along spatial `axes` (every spatial axis when
    /// `None`). Vector components aligned with a flipped axis change sign.
    ///
    /// # Errors
    ///
    /// Axis errors for out-of-range or repeated axes;
    /// [`FieldError::InvalidArgument`] when asked to flip the component
    /// axis.
    pub fn flip(&self, axes: Option<&[isize]>) -> Result<Field, FieldError> {
        log::debug!("Calling flip");
        let ndim = self.ndim();
        let axes: Vec<usize> = match axes {
            None => (0..ndim).collect(),
            Some(list) => normalize_axis_tuple(list, self.shape().len())?.to_vec(),
        };
        if axes.iter().any(|&a| a >= ndim) {
            return Err(FieldError::invalid("flip only reverses spatial axes"));
        }
        let mut data = flip_axes(self.data().view(), &axes);
        if let Some(axis) = self.components().component_axis(data.ndim()) {
            for (c, mut comp) in data.axis_iter_mut(Axis(axis)).enumerate() {
                let aligned = ndim.checked_sub(c + 1);
                if aligned.is_some_and(|a| axes.contains(&a)) {
                    comp.mapv_inplace(|v| -v);
                }
            }
        }
        Field::new(data, self.scale(), self.vector())
    }

    /// Grow the spatial axes by `width` samples filled according to `mode`.
    /// The scale is unchanged.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidArgument`] for a width list of the wrong
    /// length or a non-constant mode on an empty axis.
    pub fn pad(&self, width: impl Into<PadWidth>, mode: PadMode) -> Result<Field, FieldError> {
        log::debug!("Calling pad");
        let mut widths = width.into().resolve(self.ndim())?;
        widths.extend(std::iter::repeat_n((0, 0), self.components().extra_axes()));
        let data = pad(self.data().view(), &widths, mode)?;
        Field::new(data, self.scale(), self.vector())
    }

    /// Average blocks of `n` samples per spatial axis. Axes are first
    /// padded with their edge values up to a multiple of `n`; the new
    /// scale is the old scale times `n`.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidArgument`] for zero factors or a factor list
    /// of the wrong length.
    pub fn bin(&self, n: impl Into<BinFactor>) -> Result<Field, FieldError> {
        log::debug!("Calling bin");
        let spatial = n.into().resolve(self.ndim())?;
        let mut factors = spatial.clone();
        factors.extend(std::iter::repeat_n(1, self.components().extra_axes()));
        let data = block_mean(self.data().view(), &factors)?;
        let multipliers: Vec<f64> = spatial.iter().map(|&f| f as f64).collect();
        Field::new(data, self.scale().scaled_by(&multipliers), self.vector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array, Dimension, IxDyn};

    fn masked(shape: &[usize], keep: impl Fn(&[usize]) -> bool) -> ArrayD<bool> {
        ArrayD::from_shape_fn(IxDyn(shape), |idx| keep(idx.slice()))
    }

    fn ramp(shape: &[usize], vector: bool) -> Field {
        let n: usize = shape.iter().product();
        let data = Array::from_shape_vec(IxDyn(shape), (0..n).map(|v| v as f64).collect()).unwrap();
        Field::new(data, 1.0, vector).unwrap()
    }

    #[test]
    fn squeeze_drops_unit_axes_and_scales() {
        let f = Field::new(ArrayD::<f64>::zeros(IxDyn(&[1, 4, 1, 3])), [1.0, 2.0, 3.0], true).unwrap();
        let s = f.squeeze().unwrap();
        assert_eq!(s.shape(), &[4, 3]);
        assert_eq!(&**s.scale(), &[2.0]);
        assert!(s.vector());
    }

    #[test]
    fn get_and_set_vector_round_trip() {
        let mut f = ramp(&[2, 2, 2], true);
        let mask = masked(&[2, 2], |i| i[0] == i[1]);
        let values = f.get_vector(Some(&mask)).unwrap();
        assert_eq!(values, vec![0.0, 6.0, 1.0, 7.0]);
        f.set_vector(&[10.0, 20.0, 30.0, 40.0], Some(&mask)).unwrap();
        assert_eq!(f.data()[[1, 1, 0]], 20.0);
        assert_eq!(f.data()[[1, 1, 1]], 40.0);
        assert_eq!(f.data()[[0, 1, 0]], 2.0);
        assert!(f.set_vector(&[1.0, 2.0, 3.0], Some(&mask)).is_err());
        assert!(f.set_vector(&[1.0, 2.0], None).is_err());
    }

    #[test]
    fn scalar_set_vector_without_mask() {
        let mut f = ramp(&[3], false);
        f.set_vector(&[7.0, 8.0, 9.0], None).unwrap();
        assert_eq!(f.data(), &array![7.0, 8.0, 9.0].into_dyn());
        assert_eq!(f.get_vector(None).unwrap(), vec![7.0, 8.0, 9.0]);
    }

    #[test]
    fn flip_negates_aligned_components() {
        let f = ramp(&[2, 3, 2], true);
        let flipped = f.flip(Some(&[1][..])).unwrap();
        // axis 1 is x, so only the x component changes sign
        assert_eq!(flipped.data()[[0, 0, 0]], -f.data()[[0, 2, 0]]);
        assert_eq!(flipped.data()[[0, 0, 1]], f.data()[[0, 2, 1]]);
        assert!(f.flip(Some(&[-1][..])).is_err());
        assert_eq!(f.flip(None).unwrap().flip(None).unwrap(), f);
    }

    #[test]
    fn pad_leaves_components_alone() {
        let f = ramp(&[2, 2, 3], true);
        let p = f.pad(1usize, PadMode::Edge).unwrap();
        assert_eq!(p.shape(), &[4, 4, 3]);
        assert_eq!(p.data()[[0, 0, 2]], f.data()[[0, 0, 2]]);
        let p = f.pad(vec![(0usize, 2usize), (1, 0)], PadMode::Constant(0.0)).unwrap();
        assert_eq!(p.shape(), &[4, 3, 3]);
        assert!(f.pad(vec![(1usize, 1usize)], PadMode::Edge).is_err());
    }

    #[test]
    fn bin_scales_up() {
        let f = Field::new(
            Array::from_shape_fn((4, 3), |(i, j)| (i + j) as f64).into_dyn(),
            [1.0, 0.5],
            false,
        )
        .unwrap();
        let b = f.bin(2usize).unwrap();
        assert_eq!(b.shape(), &[2, 2]);
        assert_eq!(&**b.scale(), &[2.0, 1.0]);
        // block [[0,1],[1,2]]
        assert_eq!(b.data()[[0, 0]], 1.0);
        assert!(f.bin(0usize).is_err());
    }

    #[test]
    fn zoom_divides_scale() {
        let f = ramp(&[4, 4, 2], true);
        let z = f.zoom(2.0).unwrap();
        assert_eq!(z.shape(), &[8, 8, 2]);
        assert_eq!(&**z.scale(), &[0.5, 0.5]);
        assert!(f.zoom(0.0).is_err());
        assert!(f.zoom(vec![1.0]).is_err());
    }

    #[test]
    fn rot90_turns_grid_and_vectors_together() {
        // A 2-D field with one arrow pointing +x right of centre.
        let mut data = ArrayD::<f64>::zeros(IxDyn(&[3, 3, 2]));
        data[[1, 2, 0]] = 1.0;
        let f = Field::new(data, 1.0, true).unwrap();
        let r = f.rot90(1, RotationAxis::Z).unwrap();
        // After a quarter turn about +z it sits above the centre pointing +y.
        assert_eq!(r.data()[[2, 1, 1]], 1.0);
        assert_eq!(r.data().iter().filter(|v| **v != 0.0).count(), 1);
    }

    #[test]
    fn rotate_by_quarter_matches_rot90() {
        let data = Array::from_shape_fn((3, 3, 3, 3), |(z, y, x, c)| (z * 27 + y * 9 + x * 3 + c) as f64 - 40.0);
        let f = Field::new(data.into_dyn(), 1.0, true).unwrap();
        let linear = InterpConfig::builder().order(1).build().unwrap();
        for axis in [RotationAxis::X, RotationAxis::Y, RotationAxis::Z] {
            let a = f.rot90(1, axis).unwrap();
            let b = f.rotate_with(90.0, axis, &linear).unwrap();
            for (x, y) in a.data().iter().zip(b.data().iter()) {
                assert!((x - y).abs() < 1e-9, "{axis:?}: {x} vs {y}");
            }
        }
    }

    #[test]
    fn rotation_checks() {
        let f = Field::new(ArrayD::<f64>::zeros(IxDyn(&[2, 3, 4])), [1.0, 2.0, 2.0], false).unwrap();
        assert!(f.rot90(1, RotationAxis::Z).is_ok());
        assert_eq!(
            f.rot90(1, RotationAxis::X).unwrap_err(),
            FieldError::AnisotropicScale {
                axes: (0, 1),
                scales: (1.0, 2.0)
            }
        );
        let line = ramp(&[4], false);
        assert!(matches!(
            line.rotate(10.0, RotationAxis::Z),
            Err(FieldError::InvalidDimensionality { .. })
        ));
        let planar = ramp(&[2, 2, 2, 2], true);
        assert!(matches!(
            planar.rot90(1, RotationAxis::X),
            Err(FieldError::InvalidDimensionality { .. })
        ));
    }
}
