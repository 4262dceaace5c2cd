use crate::error::{MatrixError, Result};
use crate::matrix::matrix::Matrix;
use crate::rings::numeric::{self, Numeric, ScalarKind};

impl<T: Numeric> Matrix<T> {
    pub fn swap_lines(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_line(a)?;
        self.check_line(b)?;
        if a == b {
            return Ok(());
        }

        let columns = self.columns();
        for k in 0..columns {
            self.body.cells.swap(a * columns + k, b * columns + k);
        }
        Ok(())
    }

    /// Replace line `destination` with `Σ coefficient · line` over the listed
    /// `(line, coefficient)` pairs. Lines not listed do not contribute, and
    /// the destination may itself be listed.
    pub fn run_command(&mut self, destination: usize, coefficients: &[(usize, T)]) -> Result<()> {
        self.check_line(destination)?;
        if coefficients.len() > self.lines() {
            return Err(MatrixError::ArgumentCountMismatch {
                lines: self.lines(),
                got: coefficients.len(),
            });
        }
        for (i, (line, _)) in coefficients.iter().enumerate() {
            self.check_line(*line)?;
            if coefficients[..i].iter().any(|(other, _)| other == line) {
                return Err(MatrixError::ArgumentCountMismatch {
                    lines: self.lines(),
                    got: coefficients.len(),
                });
            }
        }

        log::trace!("L{} <- {:?}", destination, coefficients);

        let combined: Vec<T> = (0..self.columns())
            .map(|column| {
                coefficients.iter().fold(T::zero(), |acc, (line, k)| {
                    numeric::add(&acc, &numeric::mul(k, &self[(*line, column)]))
                })
            })
            .collect();

        for (cell, value) in self.body.row_mut(destination).iter_mut().zip(combined) {
            *cell = value;
        }
        Ok(())
    }

    /// [`Matrix::run_command`] with one optional coefficient per line.
    pub fn run_command_dense(&mut self, destination: usize, coefficients: &[Option<T>]) -> Result<()> {
        if coefficients.len() != self.lines() {
            return Err(MatrixError::ArgumentCountMismatch {
                lines: self.lines(),
                got: coefficients.len(),
            });
        }
        let sparse: Vec<(usize, T)> = coefficients
            .iter()
            .enumerate()
            .filter_map(|(line, k)| k.clone().map(|k| (line, k)))
            .collect();
        self.run_command(destination, &sparse)
    }

    /// Zero every entry below the pivots of the first `columns` columns.
    ///
    /// Each line below a pivot is replaced by `pivot · line − entry · pivot_line`,
    /// which keeps the arithmetic exact in `T`, then rescaled with
    /// [`rescale_line`](crate::rings::numeric::ScalarCast::rescale_line).
    /// The pivot line is chosen by `pivot_candidate` and swapped up;
    /// a column with no nonzero entry left is skipped. Returns the pivot
    /// column of each pivot line, so its length is the rank of the
    /// coefficient block.
    pub(crate) fn eliminate_lower(&mut self, columns: usize) -> Result<Vec<usize>> {
        let mut pivots = Vec::new();
        let mut pivot_line = 0;

        for column in 0..columns {
            if pivot_line >= self.lines() {
                break;
            }
            let Some(found) = self.pivot_candidate(pivot_line, column) else {
                continue;
            };
            self.swap_lines(pivot_line, found)?;

            let pivot = self[(pivot_line, column)].clone();
            for line in pivot_line + 1..self.lines() {
                let entry = self[(line, column)].clone();
                if entry.is_zero() {
                    continue;
                }
                self.run_command(
                    line,
                    &[(line, pivot.clone()), (pivot_line, numeric::neg(&entry))],
                )?;
                T::rescale_line(self.body.row_mut(line));
            }

            pivots.push(column);
            pivot_line += 1;
        }
        Ok(pivots)
    }

    /// Line from `start` on holding the pivot of `column`. Floating types take
    /// the largest magnitude, the others the first nonzero entry.
    fn pivot_candidate(&self, start: usize, column: usize) -> Option<usize> {
        let mut candidates = (start..self.lines()).filter(|&line| !self[(line, column)].is_zero());
        if T::KIND != ScalarKind::Float {
            return candidates.next();
        }

        let magnitude = |line: usize| self[(line, column)].to_double().map_or(0.0, f64::abs);
        let first = candidates.next()?;
        Some(candidates.fold(first, |best, line| {
            if magnitude(line) > magnitude(best) {
                line
            } else {
                best
            }
        }))
    }

    /// Zero every entry above the diagonal of the leading `size × size` block,
    /// which must already be upper triangular with a nonzero diagonal.
    pub(crate) fn eliminate_upper(&mut self, size: usize) -> Result<()> {
        for column in (1..size).rev() {
            let pivot = self[(column, column)].clone();
            for line in 0..column {
                let entry = self[(line, column)].clone();
                if entry.is_zero() {
                    continue;
                }
                self.run_command(
                    line,
                    &[(line, pivot.clone()), (column, numeric::neg(&entry))],
                )?;
                T::rescale_line(self.body.row_mut(line));
            }
        }
        Ok(())
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
