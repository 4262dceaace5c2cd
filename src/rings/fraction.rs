use crate::error::{MatrixError, Result};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::float::FloatCore;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::ops;
use std::str::FromStr;

/// Exact rational number, always stored reduced with a positive denominator.
///
/// This is the exact decimal scalar of the crate: every integer, every
/// finite float and every decimal literal converts to it without loss.
#[derive(Debug, Clone)]
pub struct Fraction {
    num: BigInt,
    den: BigInt,
}

impl Fraction {
    pub fn new(num: BigInt, den: BigInt) -> Result<Self> {
        if den.is_zero() {
            return Err(MatrixError::DivisionByZero);
        }
        Ok(Self::reduced(num, den))
    }

    // `den` must be nonzero
    fn reduced(num: BigInt, den: BigInt) -> Self {
        let g = &num.gcd(&den);
        let num = num / g;
        let den = den / g;

        if den.is_negative() {
            return Self {
                num: -num,
                den: -den,
            };
        }
        Self { num, den }
    }

    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self {
            num: value.into(),
            den: BigInt::one(),
        }
    }

    /// Exact value of a finite float, `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let (mantissa, exponent, sign) = FloatCore::integer_decode(value);
        let num = BigInt::from(mantissa) * BigInt::from(sign);
        if exponent >= 0 {
            Some(Self::reduced(num << exponent as usize, BigInt::one()))
        } else {
            Some(Self::reduced(num, BigInt::one() << (-exponent) as usize))
        }
    }

    /// Nearest double; huge operands are shifted down before dividing.
    pub fn to_f64(&self) -> f64 {
        let bits = self.num.bits().max(self.den.bits());
        let shift = bits.saturating_sub(1000) as usize;
        let num = (&self.num >> shift).to_f64().unwrap_or(f64::NAN);
        let den = (&self.den >> shift).to_f64().unwrap_or(f64::NAN);
        num / den
    }

    pub fn numer(&self) -> &BigInt {
        &self.num
    }

    pub fn denom(&self) -> &BigInt {
        &self.den
    }

    pub fn is_integer(&self) -> bool {
        self.den.is_one()
    }

    pub fn recip(&self) -> Option<Self> {
        if self.num.is_zero() {
            return None;
        }
        Some(Self::reduced(self.den.clone(), self.num.clone()))
    }

    pub fn checked_div(&self, rhs: &Fraction) -> Option<Self> {
        rhs.recip().map(|r| self.clone() * r)
    }

    /// Nearest integer, ties away from zero.
    pub fn round(&self) -> BigInt {
        let two = BigInt::from(2);
        let doubled_den = &self.den * &two;
        if self.num.is_negative() {
            -((-&self.num * &two + &self.den).div_floor(&doubled_den))
        } else {
            (&self.num * &two + &self.den).div_floor(&doubled_den)
        }
    }

    /// Positive factor that turns `values` into coprime integers, or `None`
    /// when every value is zero.
    pub fn primitive_factor(values: &[Fraction]) -> Option<Fraction> {
        let mut denominators = BigInt::one();
        let mut numerators = BigInt::zero();
        for value in values.iter().filter(|value| !value.is_zero()) {
            denominators = denominators.lcm(&value.den);
            numerators = numerators.gcd(&value.num);
        }
        if numerators.is_zero() {
            return None;
        }
        Some(Self::reduced(denominators, numerators))
    }
}

// Accepts "3", "-1.25", "7/3" and "1.5/0.25".
fn parse_decimal(s: &str) -> Option<Fraction> {
    let (int, frac) = s.split_once('.').unwrap_or((s, ""));
    if !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let digits = format!("{int}{frac}");
    let num = BigInt::parse_bytes(digits.as_bytes(), 10)?;
    let den = num_traits::pow(BigInt::from(10), frac.len());
    Some(Fraction::reduced(num, den))
}

impl FromStr for Fraction {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || MatrixError::ConversionFailed {
            value: s.to_string(),
            target: "Fraction",
        };
        let mut parts = s.split('/');
        let num = parts.next().ok_or_else(invalid)?;
        let den = parts.next().unwrap_or("1");
        if parts.next().is_some() {
            return Err(invalid());
        }

        let num = parse_decimal(num.trim()).ok_or_else(invalid)?;
        let den = parse_decimal(den.trim()).ok_or_else(invalid)?;
        num.checked_div(&den).ok_or(MatrixError::DivisionByZero)
    }
}

impl From<i32> for Fraction {
    fn from(value: i32) -> Self {
        Fraction::from_integer(value)
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Fraction::from_integer(value)
    }
}

impl ops::Add for Fraction {
    type Output = Fraction;

    fn add(self, rhs: Fraction) -> Fraction {
        if self.den == rhs.den {
            return Fraction::reduced(self.num + rhs.num, self.den);
        }

        Fraction::reduced(
            &self.num * &rhs.den + &rhs.num * &self.den,
            &self.den * &rhs.den,
        )
    }
}

impl ops::Sub for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Fraction) -> Fraction {
        self + -rhs
    }
}

impl ops::Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction {
            num: -self.num,
            den: self.den,
        }
    }
}

impl ops::Mul for Fraction {
    type Output = Fraction;

    fn mul(self, rhs: Fraction) -> Fraction {
        Fraction::reduced(self.num * rhs.num, self.den * rhs.den)
    }
}

impl One for Fraction {
    fn one() -> Fraction {
        Fraction::from_integer(1)
    }
}

impl Zero for Fraction {
    fn zero() -> Fraction {
        Fraction::from_integer(0)
    }

    fn is_zero(&self) -> bool {
        self.num.is_zero()
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.is_one() {
            return write!(f, "{}", self.num);
        }
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl PartialEq<Fraction> for Fraction {
    fn eq(&self, rhs: &Fraction) -> bool {
        &self.num * &rhs.den == &rhs.num * &self.den
    }
}

impl PartialEq<i64> for Fraction {
    fn eq(&self, rhs: &i64) -> bool {
        self.num == &self.den * rhs
    }
}

impl PartialOrd<Fraction> for Fraction {
    fn partial_cmp(&self, rhs: &Fraction) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

impl Eq for Fraction {}
impl Ord for Fraction {
    fn cmp(&self, rhs: &Fraction) -> Ordering {
        (&self.num * &rhs.den).cmp(&(&rhs.num * &self.den))
    }
}

impl std::iter::Sum<Fraction> for Fraction {
    fn sum<I: Iterator<Item = Fraction>>(iter: I) -> Fraction {
        iter.fold(Fraction::zero(), |acc, f| acc + f)
    }
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
    fn test_fraction_parse() {
        assert_eq!(fr("6/4"), fr("3/2"));
        assert_eq!(fr("-1.25"), fr("-5/4"));
        assert_eq!(fr("1.5/0.25"), 6);
        assert_eq!(fr("-.5"), fr("-1/2"));
        assert_eq!(fr("7/-14").to_string(), "-1/2");
        assert!("1/0".parse::<Fraction>().is_err());
        assert!("1/2/3".parse::<Fraction>().is_err());
        assert!("1.2.3".parse::<Fraction>().is_err());
        assert!("abc".parse::<Fraction>().is_err());
        assert_eq!(
            Fraction::new(BigInt::from(1), BigInt::zero()),
            Err(MatrixError::DivisionByZero)
        );
    }

    #[test]
    fn test_fraction_arithmetic() {
        assert_eq!(fr("1/3") + fr("1/6"), fr("1/2"));
        assert_eq!(fr("1/3") - fr("1/2"), fr("-1/6"));
        assert_eq!(fr("2/3") * fr("9/4"), fr("3/2"));
        assert_eq!(fr("2/3").checked_div(&fr("4/9")), Some(fr("3/2")));
        assert_eq!(fr("2/3").checked_div(&Fraction::zero()), None);
        assert_eq!(fr("-2/3").recip(), Some(fr("-3/2")));
        assert!(fr("1/3") < fr("1/2"));
        assert_eq!(
            vec![fr("1/2"), fr("1/3"), fr("1/6")]
                .into_iter()
                .sum::<Fraction>(),
            1
        );
    }

    #[test]
    fn test_fraction_float_conversion() {
        assert_eq!(Fraction::from_f64(0.5), Some(fr("1/2")));
        assert_eq!(Fraction::from_f64(-3.0), Some(fr("-3")));
        assert_eq!(Fraction::from_f64(0.0), Some(Fraction::zero()));
        assert_eq!(
            Fraction::from_f64(0.1),
            Some(fr("3602879701896397/36028797018963968"))
        );
        assert_eq!(Fraction::from_f64(f64::NAN), None);
        assert_eq!(Fraction::from_f64(f64::INFINITY), None);

        assert_eq!(fr("1/4").to_f64(), 0.25);
        assert_eq!(fr("-7/2").to_f64(), -3.5);

        let huge = Fraction::from_integer(BigInt::one() << 2000usize);
        let tiny = huge.recip().unwrap();
        assert_eq!((huge.clone() * fr("3")).checked_div(&huge).unwrap().to_f64(), 3.0);
        assert_eq!(tiny.to_f64(), 0.0);
    }

    #[test]
    fn test_fraction_round() {
        assert_eq!(fr("5/2").round(), BigInt::from(3));
        assert_eq!(fr("-5/2").round(), BigInt::from(-3));
        assert_eq!(fr("1/3").round(), BigInt::from(0));
        assert_eq!(fr("-2/3").round(), BigInt::from(-1));
        assert_eq!(fr("7").round(), BigInt::from(7));
        assert!(fr("14/7").is_integer());
        assert!(!fr("1/7").is_integer());
    }

    #[test]
    fn test_fraction_primitive_factor() {
        assert_eq!(
            Fraction::primitive_factor(&[fr("1/2"), fr("-3/4"), fr("0")]),
            Some(fr("4"))
        );
        assert_eq!(Fraction::primitive_factor(&[fr("-12"), fr("18")]), Some(fr("1/6")));
        assert_eq!(Fraction::primitive_factor(&[fr("0"), fr("0")]), None);
        assert_eq!(Fraction::primitive_factor(&[]), None);
    }
}
