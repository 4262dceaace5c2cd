use crate::error::{MatrixError, Result};
use crate::rings::numeric::{self, Numeric};
use itertools::Itertools;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Largest number of lines or columns a matrix can be built with.
pub const MAX_DIMENSION: usize = 255;

/// Augmentation may hold two full blocks side by side.
pub const MAX_AUGMENTED_COLUMNS: usize = 2 * MAX_DIMENSION;

/// Dense row-major storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    pub(crate) lines: usize,
    pub(crate) columns: usize,
    pub(crate) cells: Vec<T>,
}

impl<T> Grid<T> {
    #[inline(always)]
    pub(crate) fn offset(&self, line: usize, column: usize) -> usize {
        line * self.columns + column
    }

    pub(crate) fn row(&self, line: usize) -> &[T] {
        &self.cells[line * self.columns..(line + 1) * self.columns]
    }

    pub(crate) fn row_mut(&mut self, line: usize) -> &mut [T] {
        let columns = self.columns;
        &mut self.cells[line * columns..(line + 1) * columns]
    }
}

/// Fixed-shape matrix, optionally split into a coefficient block and an
/// appended block starting at column `augment_at`.
///
/// The boundary can only be set by augmentation or through
/// [`Matrix::set_augment_at`], both of which keep it inside `1..columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    pub(crate) body: Grid<T>,
    pub(crate) augment_at: Option<usize>,
}

fn check_shape(lines: usize, columns: usize, max_columns: usize) -> Result<()> {
    if lines == 0 || columns == 0 || lines > MAX_DIMENSION || columns > max_columns {
        return Err(MatrixError::DimensionError { lines, columns });
    }
    Ok(())
}

impl<T> Matrix<T> {
    // Shape must already be validated.
    pub(crate) fn from_parts(lines: usize, columns: usize, cells: Vec<T>) -> Self {
        debug_assert_eq!(cells.len(), lines * columns);
        Matrix {
            body: Grid {
                lines,
                columns,
                cells,
            },
            augment_at: None,
        }
    }

    pub fn lines(&self) -> usize {
        self.body.lines
    }

    pub fn columns(&self) -> usize {
        self.body.columns
    }

    pub fn augment_at(&self) -> Option<usize> {
        self.augment_at
    }

    pub fn is_square(&self) -> bool {
        self.body.lines == self.body.columns
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[T] {
        &self.body.cells
    }

    pub fn set_augment_at(&mut self, augment_at: Option<usize>) -> Result<()> {
        if let Some(at) = augment_at {
            if at == 0 || at >= self.body.columns {
                return Err(MatrixError::IndexOutOfRange {
                    index: at,
                    limit: self.body.columns,
                });
            }
        }
        self.augment_at = augment_at;
        Ok(())
    }

    pub(crate) fn check_line(&self, line: usize) -> Result<()> {
        if line >= self.body.lines {
            return Err(MatrixError::IndexOutOfRange {
                index: line,
                limit: self.body.lines,
            });
        }
        Ok(())
    }

    pub(crate) fn check_column(&self, column: usize) -> Result<()> {
        if column >= self.body.columns {
            return Err(MatrixError::IndexOutOfRange {
                index: column,
                limit: self.body.columns,
            });
        }
        Ok(())
    }

    /// Size of the matrix when it is square.
    pub(crate) fn check_square(&self) -> Result<usize> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                lines: self.body.lines,
                columns: self.body.columns,
            });
        }
        Ok(self.body.lines)
    }

    pub fn get(&self, line: usize, column: usize) -> Result<&T> {
        self.check_line(line)?;
        self.check_column(column)?;
        Ok(&self.body.cells[self.body.offset(line, column)])
    }

    pub fn set(&mut self, line: usize, column: usize, value: T) -> Result<()> {
        self.check_line(line)?;
        self.check_column(column)?;
        let offset = self.body.offset(line, column);
        self.body.cells[offset] = value;
        Ok(())
    }

    /// Apply `f` to every cell, keeping shape and boundary.
    pub(crate) fn try_map<U>(&self, f: impl FnMut(&T) -> Result<U>) -> Result<Matrix<U>> {
        let cells = self.body.cells.iter().map(f).collect::<Result<Vec<U>>>()?;
        Ok(Matrix {
            body: Grid {
                lines: self.body.lines,
                columns: self.body.columns,
                cells,
            },
            augment_at: self.augment_at,
        })
    }

    /// Copy of the columns in `range`, without boundary.
    pub(crate) fn columns_slice(&self, range: std::ops::Range<usize>) -> Self
    where
        T: Clone,
    {
        let columns = range.len();
        let cells = (0..self.body.lines)
            .flat_map(|line| self.body.row(line)[range.clone()].iter().cloned())
            .collect();
        Matrix::from_parts(self.body.lines, columns, cells)
    }
}

impl<T: Numeric> Matrix<T> {
    /// Zero-filled matrix.
    pub fn new(lines: usize, columns: usize) -> Result<Self> {
        check_shape(lines, columns, MAX_DIMENSION)?;
        Ok(Matrix::from_parts(
            lines,
            columns,
            vec![T::zero(); lines * columns],
        ))
    }

    /// Matrix filled from a row-major list of exactly `lines * columns` values.
    pub fn from_values(lines: usize, columns: usize, values: Vec<T>) -> Result<Self> {
        check_shape(lines, columns, MAX_DIMENSION)?;
        if values.len() != lines * columns {
            return Err(MatrixError::ValueCountMismatch {
                expected: lines * columns,
                got: values.len(),
            });
        }
        Ok(Matrix::from_parts(lines, columns, values))
    }

    pub fn from_list(lines: Vec<Vec<T>>) -> Result<Self> {
        let rows = lines.len();
        let columns = lines.first().map(|l| l.len()).unwrap_or(0);
        check_shape(rows, columns, MAX_DIMENSION)?;
        if let Some(line) = lines.iter().find(|l| l.len() != columns) {
            return Err(MatrixError::ValueCountMismatch {
                expected: columns,
                got: line.len(),
            });
        }
        Ok(Matrix::from_parts(
            rows,
            columns,
            lines.into_iter().flatten().collect(),
        ))
    }

    pub fn to_list(&self) -> Vec<Vec<T>> {
        self.body
            .cells
            .chunks(self.body.columns)
            .map(|line| line.into())
            .collect()
    }

    pub fn identity(size: usize) -> Result<Self> {
        check_shape(size, size, MAX_DIMENSION)?;
        Ok(Matrix::from_parts(
            size,
            size,
            (0..size)
                .flat_map(|i| (0..size).map(move |j| if i == j { T::one() } else { T::zero() }))
                .collect(),
        ))
    }

    /// Checkerboard of cofactor signs: `+1` where `i + j` is even, `-1` elsewhere.
    pub fn signature(size: usize) -> Result<Self> {
        check_shape(size, size, MAX_DIMENSION)?;
        Ok(Matrix::from_parts(
            size,
            size,
            (0..size)
                .flat_map(|i| {
                    (0..size).map(move |j| {
                        if (i + j) % 2 == 0 {
                            T::one()
                        } else {
                            numeric::neg(&T::one())
                        }
                    })
                })
                .collect(),
        ))
    }

    /// Elementwise conversion to another scalar type through the exact hub.
    pub fn cast<U: Numeric>(&self) -> Result<Matrix<U>> {
        self.try_map(numeric::convert::<T, U>)
    }

    /// Elementwise conversion to double precision.
    pub fn to_f64(&self) -> Result<Matrix<f64>> {
        self.try_map(numeric::to_double)
    }

    /// First cell equal to `value`, scanning line by line.
    pub fn find(&self, value: &T) -> Option<(usize, usize)> {
        self.body
            .cells
            .iter()
            .position(|cell| cell == value)
            .map(|offset| (offset / self.body.columns, offset % self.body.columns))
    }

    /// The matrix without `line` and `column`.
    pub fn minor(&self, line: usize, column: usize) -> Result<Self> {
        self.check_line(line)?;
        self.check_column(column)?;
        let lines = self.body.lines - 1;
        let columns = self.body.columns - 1;
        check_shape(lines, columns, MAX_AUGMENTED_COLUMNS)?;

        let cells = (0..self.body.lines)
            .filter(|&l| l != line)
            .flat_map(|l| {
                self.body
                    .row(l)
                    .iter()
                    .enumerate()
                    .filter(|&(c, _)| c != column)
                    .map(|(_, cell)| cell.clone())
            })
            .collect();
        Ok(Matrix::from_parts(lines, columns, cells))
    }

    pub fn transpose(&self) -> Self {
        Matrix::from_parts(
            self.body.columns,
            self.body.lines,
            (0..self.body.columns)
                .flat_map(|c| (0..self.body.lines).map(move |l| self[(l, c)].clone()))
                .collect(),
        )
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, (line, column): (usize, usize)) -> &T {
        assert!(column < self.body.columns, "column {column} out of range");
        &self.body.cells[self.body.offset(line, column)]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline(always)]
    fn index_mut(&mut self, (line, column): (usize, usize)) -> &mut T {
        assert!(column < self.body.columns, "column {column} out of range");
        let offset = self.body.offset(line, column);
        &mut self.body.cells[offset]
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.body.cells.iter().map(|c| c.to_string()).collect();
        let width = rendered.iter().map(|s| s.len()).max().unwrap_or(0);

        for line in rendered.chunks(self.body.columns) {
            let text = line
                .iter()
                .enumerate()
                .map(|(column, cell)| {
                    if Some(column) == self.augment_at {
                        format!("| {cell:>width$}")
                    } else {
                        format!("{cell:>width$}")
                    }
                })
                .join(" ");
            writeln!(f, "[{}]", text)?;
        }
        Ok(())
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
