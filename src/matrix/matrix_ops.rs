use crate::error::{MatrixError, Result};
use crate::matrix::matrix::{Matrix, MAX_AUGMENTED_COLUMNS};
use crate::rings::fraction::Fraction;
use crate::rings::numeric::{self, Numeric, ScalarKind};
use rayon::prelude::*;
use std::ops;

fn mismatch<T>(left: &Matrix<T>, right: &Matrix<T>) -> MatrixError {
    MatrixError::DimensionMismatch {
        left: (left.lines(), left.columns()),
        right: (right.lines(), right.columns()),
    }
}

impl<T: Numeric> Matrix<T> {
    fn zip_cells(&self, rhs: &Matrix<T>, op: fn(&T, &T) -> T) -> Result<Matrix<T>> {
        if self.columns() != rhs.columns() || self.lines() != rhs.lines() {
            return Err(mismatch(self, rhs));
        }

        Ok(Matrix::from_parts(
            self.lines(),
            self.columns(),
            self.cells()
                .iter()
                .zip(rhs.cells().iter())
                .map(|(a, b)| op(a, b))
                .collect(),
        ))
    }

    /// Every cell multiplied by `k`, which may be of another scalar type.
    ///
    /// Floating matrices multiply by `k` converted to `T`. Other matrices form
    /// each product exactly and narrow it back.
    pub fn scale<S: Numeric>(&self, k: S) -> Result<Matrix<T>> {
        if T::KIND == ScalarKind::Float {
            let factor: T = numeric::from_double(numeric::to_double(&k)?)?;
            return self.try_map(|cell| Ok(numeric::mul(cell, &factor)));
        }
        let factor: Fraction = numeric::convert(&k)?;
        self.scale_exact(&factor)
    }

    /// Every cell divided by `k`; the inverse of [`Matrix::scale`].
    pub fn divide<S: Numeric>(&self, k: S) -> Result<Matrix<T>> {
        if k.is_zero() {
            return Err(MatrixError::DivisionByZero);
        }
        if T::KIND == ScalarKind::Float {
            let factor: T = numeric::from_double(1.0 / numeric::to_double(&k)?)?;
            return self.try_map(|cell| Ok(numeric::mul(cell, &factor)));
        }
        let factor: Fraction = numeric::convert(&k)?;
        let reciprocal = factor.recip().ok_or(MatrixError::DivisionByZero)?;
        self.scale_exact(&reciprocal)
    }

    fn scale_exact(&self, factor: &Fraction) -> Result<Matrix<T>> {
        self.try_map(|cell| numeric::multiply(factor, cell))
    }

    /// Columns before the augmentation boundary.
    pub fn left(&self) -> Result<Matrix<T>> {
        let at = self.augment_at.ok_or(MatrixError::NotAugmented)?;
        Ok(self.columns_slice(0..at))
    }

    /// Columns from the augmentation boundary on.
    pub fn right(&self) -> Result<Matrix<T>> {
        let at = self.augment_at.ok_or(MatrixError::NotAugmented)?;
        Ok(self.columns_slice(at..self.columns()))
    }
}

impl<T: Numeric> ops::Add<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn add(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        self.zip_cells(rhs, numeric::add)
    }
}

impl<T: Numeric> ops::Sub<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn sub(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        self.zip_cells(rhs, numeric::sub)
    }
}

// Not commutative: `&a * &b` and `&b * &a` differ in general.
impl<T: Numeric> ops::Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn mul(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        if self.columns() != rhs.lines() {
            return Err(mismatch(self, rhs));
        }

        let mut cells = vec![T::zero(); self.lines() * rhs.columns()];
        cells
            .par_chunks_mut(rhs.columns())
            .enumerate()
            .for_each(|(i, row)| {
                for (j, cell) in row.iter_mut().enumerate() {
                    *cell = (0..self.columns()).fold(T::zero(), |acc, k| {
                        numeric::add(&acc, &numeric::mul(&self[(i, k)], &rhs[(k, j)]))
                    });
                }
            });

        Ok(Matrix::from_parts(self.lines(), rhs.columns(), cells))
    }
}

/// Augmentation: `[self | rhs]` with the boundary at `self.columns()`.
impl<T: Numeric> ops::BitOr<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn bitor(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        if self.lines() != rhs.lines() {
            return Err(mismatch(self, rhs));
        }
        let columns = self.columns() + rhs.columns();
        if columns > MAX_AUGMENTED_COLUMNS {
            return Err(MatrixError::DimensionError {
                lines: self.lines(),
                columns,
            });
        }

        let cells = (0..self.lines())
            .flat_map(|line| {
                self.body
                    .row(line)
                    .iter()
                    .chain(rhs.body.row(line).iter())
                    .cloned()
            })
            .collect();

        let mut result = Matrix::from_parts(self.lines(), columns, cells);
        result.augment_at = Some(self.columns());
        Ok(result)
    }
}

/// Inversion, see [`Matrix::inverse`].
impl<T: Numeric> ops::Not for &Matrix<T> {
    type Output = Result<Option<Matrix<T>>>;

    fn not(self) -> Result<Option<Matrix<T>>> {
        self.inverse()
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
