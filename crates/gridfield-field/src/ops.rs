//! Operators and named ufunc methods, all thin callers into
//! [`Field::array_ufunc`].

use crate::dispatch::{BinaryOp, CompareOp, Dispatched, Kwargs, Method, Operand, UnaryOp, Ufunc};
use crate::field::Field;
use gridfield_core::{normalize_axis_tuple, AxisArg, FieldError};
use ndarray::ArrayD;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

fn call_field<U: Ufunc>(ufunc: &U, inputs: &[Operand<'_>]) -> Result<Field<U::Output>, FieldError> {
    match Field::array_ufunc(ufunc, Method::Call, inputs, &Kwargs::default())? {
        Dispatched::Field(f) => Ok(f),
        Dispatched::Raw(_) => Err(FieldError::invariant(format!(
            "elementwise '{}' lost its scale",
            ufunc.name()
        ))),
    }
}

fn full_by_default(axis: Option<AxisArg>) -> AxisArg {
    axis.unwrap_or(AxisArg::All)
}

impl Field {
    /// Apply a single-operand ufunc.
    pub fn unary(&self, op: UnaryOp) -> Result<Field, FieldError> {
        call_field(&op, &[self.into()])
    }

    /// Apply a two-operand ufunc with `self` on the left.
    pub fn binary<'a>(&'a self, op: BinaryOp, rhs: impl Into<Operand<'a>>) -> Result<Field, FieldError> {
        call_field(&op, &[self.into(), rhs.into()])
    }

    /// Compare elementwise with `self` on the left.
    pub fn compare<'a>(
        &'a self,
        op: CompareOp,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Field<bool>, FieldError> {
        call_field(&op, &[self.into(), rhs.into()])
    }

    /// Elementwise square root.
    pub fn sqrt(&self) -> Result<Field, FieldError> {
        self.unary(UnaryOp::Sqrt)
    }

    /// Elementwise absolute value (components are not combined; see
    /// [`Field::amp`]).
    pub fn abs(&self) -> Result<Field, FieldError> {
        self.unary(UnaryOp::Absolute)
    }

    /// Elementwise square.
    pub fn square(&self) -> Result<Field, FieldError> {
        self.unary(UnaryOp::Square)
    }

    /// Raise every element to `exponent`.
    pub fn powf(&self, exponent: f64) -> Result<Field, FieldError> {
        self.binary(BinaryOp::Power, exponent)
    }

    /// Reduce with `op` over `axis` (`None`: axis 0).
    pub fn reduce(&self, op: BinaryOp, axis: Option<AxisArg>) -> Result<Dispatched, FieldError> {
        Field::array_ufunc(&op, Method::Reduce, &[self.into()], &Kwargs::from(axis))
    }

    /// Sum over `axis`.
    ///
    /// `None` and `Some(AxisArg::All)` sum every spatial axis and return a
    /// raw array (the per-component sums for vector fields).
    pub fn sum(&self, axis: Option<AxisArg>) -> Result<Dispatched, FieldError> {
        log::debug!("Calling sum");
        self.reduce(BinaryOp::Add, Some(full_by_default(axis)))
    }

    /// Product over `axis` (`None`: every spatial axis).
    pub fn prod(&self, axis: Option<AxisArg>) -> Result<Dispatched, FieldError> {
        log::debug!("Calling prod");
        self.reduce(BinaryOp::Multiply, Some(full_by_default(axis)))
    }

    /// Maximum over `axis` (`None`: every spatial axis). Fails on empty
    /// lanes.
    pub fn max(&self, axis: Option<AxisArg>) -> Result<Dispatched, FieldError> {
        log::debug!("Calling max");
        self.reduce(BinaryOp::Maximum, Some(full_by_default(axis)))
    }

    /// Minimum over `axis` (`None`: every spatial axis). Fails on empty
    /// lanes.
    pub fn min(&self, axis: Option<AxisArg>) -> Result<Dispatched, FieldError> {
        log::debug!("Calling min");
        self.reduce(BinaryOp::Minimum, Some(full_by_default(axis)))
    }

    /// Arithmetic mean over `axis`, with the same scale rules as
    /// [`Field::sum`].
    pub fn mean(&self, axis: Option<AxisArg>) -> Result<Dispatched, FieldError> {
        log::debug!("Calling mean");
        let axis = full_by_default(axis);
        let count: usize = match &axis {
            AxisArg::All => self.dim().iter().product(),
            AxisArg::Axes(list) => normalize_axis_tuple(list, self.shape().len())?
                .iter()
                .map(|&a| self.shape()[a])
                .product(),
        };
        let count = count as f64;
        self.sum(Some(axis))?.map_values(|v| v / count)
    }
}

macro_rules! impl_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        impl $trait<&Field> for &Field {
            type Output = Result<Field, FieldError>;

            fn $method(self, rhs: &Field) -> Self::Output {
                self.binary($op, rhs)
            }
        }

        impl $trait<Field> for &Field {
            type Output = Result<Field, FieldError>;

            fn $method(self, rhs: Field) -> Self::Output {
                self.binary($op, &rhs)
            }
        }

        impl $trait<&Field> for Field {
            type Output = Result<Field, FieldError>;

            fn $method(self, rhs: &Field) -> Self::Output {
                (&self).binary($op, rhs)
            }
        }

        impl $trait<Field> for Field {
            type Output = Result<Field, FieldError>;

            fn $method(self, rhs: Field) -> Self::Output {
                (&self).binary($op, &rhs)
            }
        }

        impl $trait<f64> for &Field {
            type Output = Result<Field, FieldError>;

            fn $method(self, rhs: f64) -> Self::Output {
                self.binary($op, rhs)
            }
        }

        impl $trait<f64> for Field {
            type Output = Result<Field, FieldError>;

            fn $method(self, rhs: f64) -> Self::Output {
                (&self).binary($op, rhs)
            }
        }

        impl $trait<&ArrayD<f64>> for &Field {
            type Output = Result<Field, FieldError>;

            fn $method(self, rhs: &ArrayD<f64>) -> Self::Output {
                self.binary($op, rhs)
            }
        }

        impl $trait<&Field> for f64 {
            type Output = Result<Field, FieldError>;

            fn $method(self, rhs: &Field) -> Self::Output {
                call_field(&$op, &[Operand::Scalar(self), rhs.into()])
            }
        }

        impl $trait<&Field> for &ArrayD<f64> {
            type Output = Result<Field, FieldError>;

            fn $method(self, rhs: &Field) -> Self::Output {
                call_field(&$op, &[self.into(), rhs.into()])
            }
        }
    };
}

impl_operator!(Add, add, BinaryOp::Add);
impl_operator!(Sub, sub, BinaryOp::Subtract);
impl_operator!(Mul, mul, BinaryOp::Multiply);
impl_operator!(Div, div, BinaryOp::Divide);
impl_operator!(Rem, rem, BinaryOp::Remainder);

impl Neg for &Field {
    type Output = Result<Field, FieldError>;

    fn neg(self) -> Self::Output {
        self.unary(UnaryOp::Negative)
    }
}

impl Neg for Field {
    type Output = Result<Field, FieldError>;

    fn neg(self) -> Self::Output {
        (&self).unary(UnaryOp::Negative)
    }
}
