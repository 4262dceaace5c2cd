use crate::error::Result;
use crate::matrix::matrix::Matrix;
use crate::rings::fraction::Fraction;
use crate::rings::numeric::{self, Numeric, ScalarKind};

impl<T: Numeric> Matrix<T> {
    /// Determinant by cofactor expansion along the first line.
    ///
    /// Runs in O(n!) but stays exact, so integer and `Fraction` matrices get
    /// exact determinants. Integer matrices are expanded as `Fraction`s and
    /// the result narrowed back (`ConversionFailed` when it does not fit).
    /// Intended for small matrices.
    pub fn determinant(&self) -> Result<T> {
        self.check_square()?;
        if T::KIND == ScalarKind::Integer {
            let exact = self.cast::<Fraction>()?.cofactor_expansion()?;
            return numeric::convert(&exact);
        }
        self.cofactor_expansion()
    }

    fn cofactor_expansion(&self) -> Result<T> {
        let n = self.lines();
        match n {
            1 => Ok(self[(0, 0)].clone()),
            2 => Ok(numeric::sub(
                &numeric::mul(&self[(0, 0)], &self[(1, 1)]),
                &numeric::mul(&self[(0, 1)], &self[(1, 0)]),
            )),
            _ => (0..n).try_fold(T::zero(), |acc, column| {
                let entry = &self[(0, column)];
                if entry.is_zero() {
                    return Ok(acc);
                }
                let term = numeric::mul(entry, &self.minor(0, column)?.cofactor_expansion()?);
                if column % 2 == 0 {
                    Ok(numeric::add(&acc, &term))
                } else {
                    Ok(numeric::sub(&acc, &term))
                }
            }),
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
