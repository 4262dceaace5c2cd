use crate::error::Result;
use crate::matrix::matrix::Matrix;
use crate::matrix::matrix_config::EliminationConfig;
use crate::rings::fraction::Fraction;
use crate::rings::numeric::{self, Numeric, ScalarKind};
use approx::abs_diff_eq;

impl<T: Numeric> Matrix<T> {
    /// Multiplicative inverse, or `None` when the matrix is singular.
    pub fn inverse(&self) -> Result<Option<Matrix<T>>> {
        self.inverse_with(&EliminationConfig::default())
    }

    /// Gauss-Jordan inversion of `[self | I]`.
    ///
    /// Integer matrices are inverted as `Fraction` matrices and the result is
    /// rounded back. Otherwise both elimination sweeps stay exact in `T`.
    /// Only the final scaling of each line by its pivot leaves `T`: types
    /// with exact reciprocals (`Fraction`) are scaled and checked exactly,
    /// all others are scaled in `f64` and the left block is compared to the
    /// identity within `config.tolerance` before converting the result back.
    pub fn inverse_with(&self, config: &EliminationConfig) -> Result<Option<Matrix<T>>> {
        let n = self.check_square()?;
        if T::KIND == ScalarKind::Integer {
            return match self.cast::<Fraction>()?.inverse_with(config)? {
                Some(inverse) => inverse.cast().map(Some),
                None => Ok(None),
            };
        }
        let mut work = (self | &Matrix::identity(n)?)?;

        let pivots = work.eliminate_lower(n)?;
        if pivots.len() < n || work[(n - 1, n - 1)].is_zero() {
            log::debug!("no inverse: rank {} < {}", pivots.len(), n);
            return Ok(None);
        }

        work.eliminate_upper(n)?;

        let reciprocals: Option<Vec<T>> = (0..n).map(|i| work[(i, i)].exact_reciprocal()).collect();
        match reciprocals {
            Some(reciprocals) => work.normalize_exact(reciprocals),
            None => work.normalize_floating(n, config),
        }
    }

    fn normalize_exact(mut self, reciprocals: Vec<T>) -> Result<Option<Matrix<T>>> {
        let n = reciprocals.len();
        for (line, reciprocal) in reciprocals.into_iter().enumerate() {
            self.run_command(line, &[(line, reciprocal)])?;
        }

        if self.left()? != Matrix::identity(n)? {
            log::warn!("exact normalization did not reach the identity");
            return Ok(None);
        }
        Ok(Some(self.right()?))
    }

    fn normalize_floating(&self, n: usize, config: &EliminationConfig) -> Result<Option<Matrix<T>>> {
        let mut work = self.to_f64()?;
        for line in 0..n {
            let pivot = work[(line, line)];
            work.run_command(line, &[(line, 1.0 / pivot)])?;
        }

        let identity = Matrix::<f64>::identity(n)?;
        let verified = work
            .left()?
            .cells()
            .iter()
            .zip(identity.cells())
            .all(|(a, b)| abs_diff_eq!(*a, *b, epsilon = config.tolerance));
        if !verified {
            log::warn!("floating normalization failed the identity check");
            return Ok(None);
        }

        work.right()?
            .try_map(|value| numeric::from_double::<T>(*value))
            .map(Some)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
