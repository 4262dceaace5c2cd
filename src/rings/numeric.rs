use crate::error::{MatrixError, Result};
use crate::rings::fraction::Fraction;
use num_traits::{NumCast, One, Zero};
use std::any::type_name;
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// How a scalar type behaves under elimination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// Fixed-width integers. Elimination runs in `Fraction` and the result
    /// is narrowed back, so intermediate products cannot overflow.
    Integer,
    /// Binary floating point. Lines are rescaled by powers of two.
    Float,
    /// Arbitrary precision rationals. Lines are reduced to coprime integers.
    Exact,
}

/// Conversions between the supported scalar types.
///
/// `Fraction` is the exact hub: widening into it never loses information,
/// narrowing out of it rounds (integers) or takes the nearest value (floats).
/// The `double` conversions are the direct path used by the floating-point
/// phase of inversion and solving.
pub trait ScalarCast: Sized {
    const KIND: ScalarKind;

    fn to_exact(&self) -> Option<Fraction>;
    fn from_exact(value: &Fraction) -> Option<Self>;
    fn to_double(&self) -> Option<f64>;
    fn from_double(value: f64) -> Option<Self>;

    /// Reciprocal computed without rounding, for types that have one.
    fn exact_reciprocal(&self) -> Option<Self> {
        None
    }

    /// Replace `line` by a nonzero multiple of itself with bounded entries.
    fn rescale_line(_line: &mut [Self]) {}
}

macro_rules! impl_scalar_cast_int {
    ($($t:ty),*) => {
        $(
            impl ScalarCast for $t {
                const KIND: ScalarKind = ScalarKind::Integer;

                fn to_exact(&self) -> Option<Fraction> {
                    Some(Fraction::from_integer(*self))
                }

                fn from_exact(value: &Fraction) -> Option<$t> {
                    <$t as NumCast>::from(value.round())
                }

                fn to_double(&self) -> Option<f64> {
                    Some(*self as f64)
                }

                fn from_double(value: f64) -> Option<$t> {
                    if !value.is_finite() {
                        return None;
                    }
                    <$t as NumCast>::from(value.round())
                }
            }
        )*
    };
}

macro_rules! impl_scalar_cast_float {
    ($($t:ty),*) => {
        $(
            impl ScalarCast for $t {
                const KIND: ScalarKind = ScalarKind::Float;

                fn to_exact(&self) -> Option<Fraction> {
                    Fraction::from_f64(*self as f64)
                }

                fn from_exact(value: &Fraction) -> Option<$t> {
                    Some(value.to_f64() as $t)
                }

                fn to_double(&self) -> Option<f64> {
                    Some(*self as f64)
                }

                fn from_double(value: f64) -> Option<$t> {
                    Some(value as $t)
                }

                // powers of two scale without rounding
                fn rescale_line(line: &mut [$t]) {
                    let largest = line.iter().fold(0.0, |acc: $t, value| acc.max(value.abs()));
                    if largest == 0.0 || !largest.is_finite() {
                        return;
                    }
                    let factor = (2.0 as $t).powi(-(largest.log2().floor() as i32));
                    if factor == 0.0 || !factor.is_finite() {
                        return;
                    }
                    for value in line.iter_mut() {
                        *value *= factor;
                    }
                }
            }
        )*
    };
}

impl_scalar_cast_int!(i32, i64);
impl_scalar_cast_float!(f32, f64);

impl ScalarCast for Fraction {
    const KIND: ScalarKind = ScalarKind::Exact;

    fn to_exact(&self) -> Option<Fraction> {
        Some(self.clone())
    }

    fn from_exact(value: &Fraction) -> Option<Fraction> {
        Some(value.clone())
    }

    fn to_double(&self) -> Option<f64> {
        Some(self.to_f64())
    }

    fn from_double(value: f64) -> Option<Fraction> {
        Fraction::from_f64(value)
    }

    fn exact_reciprocal(&self) -> Option<Fraction> {
        self.recip()
    }

    fn rescale_line(line: &mut [Fraction]) {
        if let Some(factor) = Fraction::primitive_factor(line) {
            for value in line.iter_mut() {
                *value = value.clone() * factor.clone();
            }
        }
    }
}

/// Scalar types a matrix can hold: `i32`, `i64`, `f32`, `f64` and `Fraction`.
pub trait Numeric:  // Avoid repeating all the traits
    Clone
    + PartialEq
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + ScalarCast
    + fmt::Display
    + fmt::Debug
    + Send
    + Sync
{
}

impl<T> Numeric for T where
    T: Clone
        + PartialEq
        + Zero
        + One
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + ScalarCast
        + fmt::Display
        + fmt::Debug
        + Send
        + Sync
{
}

#[inline(always)]
pub fn add<T: Numeric>(a: &T, b: &T) -> T {
    a.clone() + b.clone()
}

#[inline(always)]
pub fn sub<T: Numeric>(a: &T, b: &T) -> T {
    a.clone() - b.clone()
}

#[inline(always)]
pub fn mul<T: Numeric>(a: &T, b: &T) -> T {
    a.clone() * b.clone()
}

#[inline(always)]
pub fn neg<T: Numeric>(a: &T) -> T {
    T::zero() - a.clone()
}

fn conversion_error<S: fmt::Display, U>(value: &S) -> MatrixError {
    MatrixError::ConversionFailed {
        value: value.to_string(),
        target: type_name::<U>(),
    }
}

/// Multiply `value` by a scalar of any supported type.
///
/// The product is formed exactly and then narrowed to `T`, so an `i32`
/// scalar times a `Fraction` and a `Fraction` scalar times an `i64` both work.
pub fn multiply<S: Numeric, T: Numeric>(scalar: &S, value: &T) -> Result<T> {
    let scalar_exact = scalar.to_exact().ok_or_else(|| conversion_error::<S, Fraction>(scalar))?;
    let value_exact = value.to_exact().ok_or_else(|| conversion_error::<T, Fraction>(value))?;
    let product = scalar_exact * value_exact;
    T::from_exact(&product).ok_or_else(|| conversion_error::<Fraction, T>(&product))
}

pub fn convert<S: Numeric, U: Numeric>(value: &S) -> Result<U> {
    value
        .to_exact()
        .and_then(|exact| U::from_exact(&exact))
        .ok_or_else(|| conversion_error::<S, U>(value))
}

pub fn to_double<T: Numeric>(value: &T) -> Result<f64> {
    value
        .to_double()
        .ok_or_else(|| conversion_error::<T, f64>(value))
}

pub fn from_double<T: Numeric>(value: f64) -> Result<T> {
    T::from_double(value).ok_or_else(|| conversion_error::<f64, T>(&value))
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn fr(s: &str) -> Fraction {
        s.parse().unwrap()
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(add(&3, &4), 7);
        assert_eq!(sub(&fr("1/2"), &fr("1/3")), fr("1/6"));
        assert_eq!(mul(&2.5f64, &4.0), 10.0);
        assert_eq!(neg(&7i64), -7);
    }

    #[test]
    fn test_multiply_mixed_types() {
        assert_eq!(multiply(&3i32, &fr("1/2")).unwrap(), fr("3/2"));
        assert_eq!(multiply(&fr("1/2"), &6i64).unwrap(), 3);
        assert_eq!(multiply(&2i64, &0.25f64).unwrap(), 0.5);
        assert_eq!(multiply(&0.5f32, &5i32).unwrap(), 3);
        assert!(matches!(
            multiply(&f64::NAN, &1i32),
            Err(MatrixError::ConversionFailed { .. })
        ));
        assert!(matches!(
            multiply(&1e300f64, &1i32),
            Err(MatrixError::ConversionFailed { .. })
        ));
    }

    #[test]
    fn test_convert() {
        assert_eq!(convert::<i32, f64>(&-4).unwrap(), -4.0);
        assert_eq!(convert::<f64, Fraction>(&0.75).unwrap(), fr("3/4"));
        assert_eq!(convert::<Fraction, i32>(&fr("7/2")).unwrap(), 4);
        assert_eq!(convert::<f64, i32>(&-2.5).unwrap(), -3);
        assert_eq!(convert::<i64, i32>(&(i64::MAX)).ok(), None);
        assert_eq!(convert::<f64, f32>(&0.5).unwrap(), 0.5f32);

        assert_eq!(to_double(&fr("1/8")).unwrap(), 0.125);
        assert_eq!(from_double::<i64>(2.6).unwrap(), 3);
        assert!(from_double::<i32>(f64::INFINITY).is_err());
        assert_eq!(from_double::<Fraction>(-0.5).unwrap(), fr("-1/2"));

        assert_eq!(fr("2/3").exact_reciprocal(), Some(fr("3/2")));
        assert_eq!(2.0f64.exact_reciprocal(), None);
    }

    #[test]
    fn test_rescale_line() {
        let mut floats = [1e200, -3e199, 0.0];
        f64::rescale_line(&mut floats);
        assert!(floats[0] >= 1.0 && floats[0] < 2.0);
        // ratios are kept bit for bit
        assert_eq!(floats[1] / floats[0], -3e199 / 1e200);
        assert_eq!(floats[2], 0.0);

        let mut zeros = [0.0f32, 0.0];
        f32::rescale_line(&mut zeros);
        assert_eq!(zeros, [0.0, 0.0]);

        let mut exact = [fr("2/3"), fr("-4/9"), fr("0")];
        Fraction::rescale_line(&mut exact);
        assert_eq!(exact, [fr("3"), fr("-2"), fr("0")]);

        let mut negative = [fr("-10"), fr("15")];
        Fraction::rescale_line(&mut negative);
        assert_eq!(negative, [fr("-2"), fr("3")]);

        let mut ints = [6i32, 9];
        i32::rescale_line(&mut ints);
        assert_eq!(ints, [6, 9]);
        assert_eq!(i64::KIND, ScalarKind::Integer);
        assert_eq!(f32::KIND, ScalarKind::Float);
        assert_eq!(Fraction::KIND, ScalarKind::Exact);
    }
}
