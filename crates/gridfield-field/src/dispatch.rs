//! Elementwise dispatch: one entry point for every ufunc-style operation.
//!
//! Arithmetic operators, comparisons, and reductions on [`Field`] all go
//! through [`Field::array_ufunc`]. It unwraps field operands to raw arrays,
//! runs the [`Ufunc`] strategy with numpy broadcasting, and derives the
//! result's scale and vector flag:
//!
//! - calls with several operands require equal scales across field
//!   operands and equal component counts across vector operands; scalar
//!   operands with the vector operand's spatial rank get a trailing
//!   length-1 axis so they broadcast against every component
//! - reductions drop the scale entries of the reduced axes, turn the
//!   result scalar when the component axis is reduced, and return a raw
//!   array once no spatial axis is left

use crate::field::Field;
use gridfield_core::{normalize_axis_tuple, AxisArg, AxisList, FieldError, Scale};
use ndarray::{Array2, ArrayD, ArrayView1, ArrayViewD, Axis, IxDyn};
use smallvec::SmallVec;
use std::fmt;

/// An elementwise operation with an optional reduction.
pub trait Ufunc {
    /// Element type of the result.
    type Output: Clone;

    /// Name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Number of operands a call takes.
    fn nin(&self) -> usize;

    /// Apply to one tuple of operand values (`args.len() == nin()`).
    fn call(&self, args: &[f64]) -> Self::Output;

    /// Reduce one lane, or `None` if this ufunc cannot reduce it.
    fn reduce(&self, lane: ArrayView1<'_, f64>) -> Option<Self::Output> {
        let _ = lane;
        None
    }
}

/// Single-operand ufuncs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-x`
    Negative,
    /// `|x|`
    Absolute,
    /// Square root.
    Sqrt,
    /// `x * x`
    Square,
    /// Natural exponential.
    Exp,
    /// Natural logarithm.
    Log,
    /// Sine (radians).
    Sin,
    /// Cosine (radians).
    Cos,
    /// Tangent (radians).
    Tan,
    /// Inverse tangent.
    Arctan,
    /// -1, 0, or 1 by sign (NaN stays NaN).
    Sign,
    /// `1 / x`
    Reciprocal,
    /// Round down.
    Floor,
    /// Round up.
    Ceil,
    /// Round half to even.
    Rint,
}

impl Ufunc for UnaryOp {
    type Output = f64;

    fn name(&self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Absolute => "absolute",
            Self::Sqrt => "sqrt",
            Self::Square => "square",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Arctan => "arctan",
            Self::Sign => "sign",
            Self::Reciprocal => "reciprocal",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Rint => "rint",
        }
    }

    fn nin(&self) -> usize {
        1
    }

    fn call(&self, args: &[f64]) -> f64 {
        let x = args[0];
        match self {
            Self::Negative => -x,
            Self::Absolute => x.abs(),
            Self::Sqrt => x.sqrt(),
            Self::Square => x * x,
            Self::Exp => x.exp(),
            Self::Log => x.ln(),
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Arctan => x.atan(),
            Self::Sign => {
                if x > 0.0 {
                    1.0
                } else if x < 0.0 {
                    -1.0
                } else {
                    x
                }
            }
            Self::Reciprocal => 1.0 / x,
            Self::Floor => x.floor(),
            Self::Ceil => x.ceil(),
            Self::Rint => x.round_ties_even(),
        }
    }
}

/// Two-operand arithmetic ufuncs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `a + b`; reduces to a sum.
    Add,
    /// `a - b`
    Subtract,
    /// `a * b`; reduces to a product.
    Multiply,
    /// `a / b`
    Divide,
    /// `a` raised to `b`.
    Power,
    /// Larger of the two (NaN propagates).
    Maximum,
    /// Smaller of the two (NaN propagates).
    Minimum,
    /// `sqrt(a² + b²)`
    Hypot,
    /// Quadrant-aware `atan(a / b)`.
    Arctan2,
    /// Remainder with the sign of the divisor.
    Remainder,
}

impl BinaryOp {
    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => a / b,
            Self::Power => a.powf(b),
            Self::Maximum => {
                if a.is_nan() || b.is_nan() {
                    f64::NAN
                } else {
                    a.max(b)
                }
            }
            Self::Minimum => {
                if a.is_nan() || b.is_nan() {
                    f64::NAN
                } else {
                    a.min(b)
                }
            }
            Self::Hypot => a.hypot(b),
            Self::Arctan2 => a.atan2(b),
            Self::Remainder => {
                let r = a % b;
                if r != 0.0 && (r < 0.0) != (b < 0.0) {
                    r + b
                } else {
                    r
                }
            }
        }
    }
}

impl Ufunc for BinaryOp {
    type Output = f64;

    fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Power => "power",
            Self::Maximum => "maximum",
            Self::Minimum => "minimum",
            Self::Hypot => "hypot",
            Self::Arctan2 => "arctan2",
            Self::Remainder => "remainder",
        }
    }

    fn nin(&self) -> usize {
        2
    }

    fn call(&self, args: &[f64]) -> f64 {
        self.apply(args[0], args[1])
    }

    fn reduce(&self, lane: ArrayView1<'_, f64>) -> Option<f64> {
        match self {
            Self::Add => Some(lane.sum()),
            Self::Multiply => Some(lane.product()),
            _ => {
                let mut values = lane.iter().copied();
                let first = values.next()?;
                Some(values.fold(first, |acc, v| self.apply(acc, v)))
            }
        }
    }
}

/// Elementwise comparisons producing booleans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `a < b`
    Less,
    /// `a <= b`
    LessEqual,
    /// `a > b`
    Greater,
    /// `a >= b`
    GreaterEqual,
    /// `a == b`
    Equal,
    /// `a != b`
    NotEqual,
}

impl Ufunc for CompareOp {
    type Output = bool;

    fn name(&self) -> &'static str {
        match self {
            Self::Less => "less",
            Self::LessEqual => "less_equal",
            Self::Greater => "greater",
            Self::GreaterEqual => "greater_equal",
            Self::Equal => "equal",
            Self::NotEqual => "not_equal",
        }
    }

    fn nin(&self) -> usize {
        2
    }

    fn call(&self, args: &[f64]) -> bool {
        let (a, b) = (args[0], args[1]);
        match self {
            Self::Less => a < b,
            Self::LessEqual => a <= b,
            Self::Greater => a > b,
            Self::GreaterEqual => a >= b,
            Self::Equal => a == b,
            Self::NotEqual => a != b,
        }
    }
}

/// How a ufunc is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// Elementwise over broadcast operands.
    Call,
    /// Fold along axes of a single operand.
    Reduce,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "__call__"),
            Self::Reduce => write!(f, "reduce"),
        }
    }
}

/// One operand of a dispatched call.
#[derive(Clone, Debug)]
pub enum Operand<'a> {
    /// A field; contributes its scale and vector flag.
    Field(&'a Field),
    /// A plain array.
    Array(ArrayViewD<'a, f64>),
    /// A number.
    Scalar(f64),
}

impl<'a> From<&'a Field> for Operand<'a> {
    fn from(field: &'a Field) -> Self {
        Self::Field(field)
    }
}

impl<'a> From<&'a ArrayD<f64>> for Operand<'a> {
    fn from(array: &'a ArrayD<f64>) -> Self {
        Self::Array(array.view())
    }
}

impl<'a> From<ArrayViewD<'a, f64>> for Operand<'a> {
    fn from(array: ArrayViewD<'a, f64>) -> Self {
        Self::Array(array)
    }
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl Operand<'_> {
    fn shape(&self) -> Option<&[usize]> {
        match self {
            Self::Field(f) => Some(f.shape()),
            Self::Array(a) => Some(a.shape()),
            Self::Scalar(_) => None,
        }
    }
}

/// Keyword arguments of a dispatched call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Kwargs {
    /// Reduction axes. `None` reduces axis 0; [`AxisArg::All`] reduces
    /// every spatial axis and keeps the component axis.
    pub axis: Option<AxisArg>,
}

impl Kwargs {
    /// Keyword arguments with the given reduction axes.
    pub fn axis(axis: impl Into<AxisArg>) -> Self {
        Self {
            axis: Some(axis.into()),
        }
    }
}

impl From<Option<AxisArg>> for Kwargs {
    fn from(axis: Option<AxisArg>) -> Self {
        Self { axis }
    }
}

/// Result of a dispatched call.
#[derive(Clone, Debug, PartialEq)]
pub enum Dispatched<T = f64> {
    /// The result still has spatial axes and carries a scale.
    Field(Field<T>),
    /// A full reduction: no spatial axis is left to scale.
    Raw(ArrayD<T>),
}

impl<T: Clone> Dispatched<T> {
    /// The field result, if any.
    pub fn into_field(self) -> Option<Field<T>> {
        match self {
            Self::Field(f) => Some(f),
            Self::Raw(_) => None,
        }
    }

    /// The raw array, whether or not it was wrapped in a field.
    pub fn into_array(self) -> ArrayD<T> {
        match self {
            Self::Field(f) => f.into_raw_parts().0,
            Self::Raw(a) => a,
        }
    }

    /// The single value of a zero-dimensional raw result.
    pub fn scalar(&self) -> Option<T> {
        match self {
            Self::Raw(a) if a.ndim() == 0 => a.first().cloned(),
            _ => None,
        }
    }
}

impl Dispatched<f64> {
    pub(crate) fn map_values(self, f: impl Fn(f64) -> f64) -> Result<Self, FieldError> {
        Ok(match self {
            Self::Field(field) => {
                let (data, scale, vector) = field.into_raw_parts();
                Self::Field(Field::new(data.mapv(f), scale, vector)?)
            }
            Self::Raw(a) => Self::Raw(a.mapv(f)),
        })
    }
}

impl Field {
    /// Run `ufunc` on `inputs` and wrap the result with a consistent
    /// scale and vector flag.
    ///
    /// At least one operand must be a field. [`Method::Call`] takes
    /// `ufunc.nin()` operands; [`Method::Reduce`] takes exactly one field.
    ///
    /// # Errors
    ///
    /// [`FieldError::ScaleMismatch`], [`FieldError::ComponentCountMismatch`],
    /// [`FieldError::BroadcastMismatch`] for incompatible operands; axis
    /// errors and [`FieldError::UnsupportedReduction`] for reductions;
    /// [`FieldError::InvalidArgument`] for wrong operand counts.
    pub fn array_ufunc<U: Ufunc>(
        ufunc: &U,
        method: Method,
        inputs: &[Operand<'_>],
        kwargs: &Kwargs,
    ) -> Result<Dispatched<U::Output>, FieldError> {
        log::debug!(
            "ufunc: {}, method: {}, operands: {}",
            ufunc.name(),
            method,
            inputs.len()
        );
        match method {
            Method::Call => {
                if kwargs.axis.is_some() {
                    return Err(FieldError::invalid(format!(
                        "'{}' does not take an axis when called elementwise",
                        ufunc.name()
                    )));
                }
                if inputs.len() != ufunc.nin() {
                    return Err(FieldError::invalid(format!(
                        "'{}' takes {} operands, got {}",
                        ufunc.name(),
                        ufunc.nin(),
                        inputs.len()
                    )));
                }
                call(ufunc, inputs).map(Dispatched::Field)
            }
            Method::Reduce => match inputs {
                [Operand::Field(field)] => reduce(ufunc, field, kwargs),
                _ => Err(FieldError::invalid(format!(
                    "reduce takes exactly one field operand, got {} operands",
                    inputs.len()
                ))),
            },
        }
    }
}

/// numpy broadcast of `shapes` (right-aligned, length-1 stretch).
fn broadcast_shape(shapes: &[&[usize]]) -> Option<Vec<usize>> {
    let ndim = shapes.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut out = vec![1; ndim];
    for shape in shapes {
        let offset = ndim - shape.len();
        for (i, &len) in shape.iter().enumerate() {
            let slot = &mut out[offset + i];
            if *slot == 1 {
                *slot = len;
            } else if len != 1 && len != *slot {
                return None;
            }
        }
    }
    Some(out)
}

enum Prepared<'a> {
    Array(ArrayViewD<'a, f64>),
    Scalar(f64),
}

fn call<U: Ufunc>(ufunc: &U, inputs: &[Operand<'_>]) -> Result<Field<U::Output>, FieldError> {
    let fields: Vec<&Field> = inputs
        .iter()
        .filter_map(|op| match op {
            Operand::Field(f) => Some(*f),
            _ => None,
        })
        .collect();
    let Some(first) = fields.first() else {
        return Err(FieldError::invalid(format!(
            "'{}' needs at least one field operand",
            ufunc.name()
        )));
    };
    if fields.iter().any(|f| f.scale() != first.scale()) {
        return Err(FieldError::ScaleMismatch {
            scales: fields.iter().map(|f| f.scale().to_vec()).collect(),
        });
    }
    let scale = first.scale().clone();

    let ncomps: Vec<usize> = fields.iter().filter(|f| f.vector()).map(|f| f.ncomp()).collect();
    if ncomps.iter().any(|&n| n != ncomps[0]) {
        return Err(FieldError::ComponentCountMismatch { ncomps });
    }
    let vector = !ncomps.is_empty();

    let prepared: Vec<Prepared<'_>> = inputs
        .iter()
        .map(|op| {
            let view = match op {
                Operand::Scalar(v) => return Prepared::Scalar(*v),
                Operand::Field(f) if f.vector() => return Prepared::Array(f.data().view()),
                Operand::Field(f) => f.data().view(),
                Operand::Array(a) => a.view(),
            };
            if vector && view.ndim() == scale.ndim() {
                let axis = Axis(view.ndim());
                Prepared::Array(view.insert_axis(axis))
            } else {
                Prepared::Array(view)
            }
        })
        .collect();

    let shapes: Vec<&[usize]> = prepared
        .iter()
        .filter_map(|p| match p {
            Prepared::Array(a) => Some(a.shape()),
            Prepared::Scalar(_) => None,
        })
        .collect();
    let out_shape = broadcast_shape(&shapes).ok_or_else(|| FieldError::BroadcastMismatch {
        shapes: inputs.iter().filter_map(|op| op.shape().map(<[usize]>::to_vec)).collect(),
    })?;
    let target = IxDyn(&out_shape);
    let mut broadcast: Vec<Prepared<'_>> = Vec::with_capacity(prepared.len());
    for p in &prepared {
        broadcast.push(match p {
            Prepared::Scalar(v) => Prepared::Scalar(*v),
            Prepared::Array(a) => Prepared::Array(a.broadcast(target.clone()).ok_or_else(|| {
                FieldError::BroadcastMismatch {
                    shapes: shapes.iter().map(|s| s.to_vec()).collect(),
                }
            })?),
        });
    }

    let mut args: SmallVec<[f64; 4]> = SmallVec::from_elem(0.0, broadcast.len());
    let data = ArrayD::from_shape_fn(target, |idx| {
        for (slot, p) in args.iter_mut().zip(&broadcast) {
            *slot = match p {
                Prepared::Scalar(v) => *v,
                Prepared::Array(a) => a[&idx],
            };
        }
        ufunc.call(&args)
    });
    Field::new(data, scale, vector)
}

fn reduce<U: Ufunc>(
    ufunc: &U,
    field: &Field,
    kwargs: &Kwargs,
) -> Result<Dispatched<U::Output>, FieldError> {
    let raw_ndim = field.shape().len();
    let spatial = field.ndim();
    let axes: AxisList = match &kwargs.axis {
        None => normalize_axis_tuple(&[0], raw_ndim)?,
        Some(AxisArg::All) => (0..spatial).collect(),
        Some(AxisArg::Axes(list)) => normalize_axis_tuple(list, raw_ndim)?,
    };
    let reduces_components = field.vector() && axes.contains(&spatial);
    let scale: Scale = field.scale().without_axes(&axes);
    let vector = field.vector() && !reduces_components;

    let data = reduce_axes(ufunc, field.data().view(), &axes)?;
    if scale.ndim() == 0 {
        return Ok(Dispatched::Raw(data));
    }
    Ok(Dispatched::Field(Field::new(data, scale, vector)?))
}

/// Reduce `data` over `axes` by moving them to the back and folding each
/// contiguous lane.
fn reduce_axes<U: Ufunc>(
    ufunc: &U,
    data: ArrayViewD<'_, f64>,
    axes: &[usize],
) -> Result<ArrayD<U::Output>, FieldError> {
    let keep: Vec<usize> = (0..data.ndim()).filter(|a| !axes.contains(a)).collect();
    let out_shape: Vec<usize> = keep.iter().map(|&a| data.len_of(Axis(a))).collect();
    let inner: usize = axes.iter().map(|&a| data.len_of(Axis(a))).product();
    let outer: usize = out_shape.iter().product();

    let order: Vec<usize> = keep.iter().chain(axes).copied().collect();
    let moved = data.permuted_axes(order.as_slice());
    let flat = Array2::from_shape_vec((outer, inner), moved.iter().copied().collect())
        .map_err(|e| FieldError::invariant(format!("reduction reshape failed: {e}")))?;
    let values = flat
        .rows()
        .into_iter()
        .map(|lane| ufunc.reduce(lane))
        .collect::<Option<Vec<_>>>()
        .ok_or(FieldError::UnsupportedReduction {
            ufunc: ufunc.name(),
        })?;
    ArrayD::from_shape_vec(IxDyn(&out_shape), values)
        .map_err(|e| FieldError::invariant(format!("reduction reshape failed: {e}")))
}
