use crate::error::{MatrixError, Result};
use crate::matrix::matrix::Matrix;
use crate::matrix::matrix_config::EliminationConfig;
use crate::rings::fraction::Fraction;
use crate::rings::numeric::{self, Numeric, ScalarKind};

/// Values of a uniquely solved system, in the order the names were given.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    values: Vec<(String, f64)>,
}

impl Solution {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn into_vec(self) -> Vec<(String, f64)> {
        self.values
    }
}

impl<T: Numeric> Matrix<T> {
    /// Solve `self · x = constants` for the variables named in `names`.
    ///
    /// Returns `Ok(Some(_))` for a unique solution, `Ok(None)` when the
    /// system is inconsistent, and `Err(InfiniteSolutions)` when it is
    /// under-determined. Integer systems are solved as `Fraction` systems.
    pub fn solve<S: AsRef<str>>(
        &self,
        constants: &Matrix<T>,
        names: &[S],
    ) -> Result<Option<Solution>> {
        self.solve_with(constants, names, &EliminationConfig::default())
    }

    pub fn solve_with<S: AsRef<str>>(
        &self,
        constants: &Matrix<T>,
        names: &[S],
        config: &EliminationConfig,
    ) -> Result<Option<Solution>> {
        if names.len() != self.columns() {
            return Err(MatrixError::MissingVariableNames {
                expected: self.columns(),
                got: names.len(),
            });
        }
        if constants.lines() != self.lines() || constants.columns() != 1 {
            return Err(MatrixError::DimensionMismatch {
                left: (self.lines(), self.columns()),
                right: (constants.lines(), constants.columns()),
            });
        }

        if T::KIND == ScalarKind::Integer {
            let constants = constants.cast::<Fraction>()?;
            return self.cast::<Fraction>()?.solve_with(&constants, names, config);
        }

        let values = match self.solve_cramer(constants)? {
            Some(values) => values,
            None => match self.solve_diagonal(constants)? {
                Some(values) => values,
                None => return Ok(None),
            },
        };

        Ok(Some(Solution {
            values: names
                .iter()
                .zip(values)
                .map(|(name, value)| (name.as_ref().to_string(), config.round(value)))
                .collect(),
        }))
    }

    /// Cramer's rule; `None` when the system is not square or the
    /// determinant is zero.
    fn solve_cramer(&self, constants: &Matrix<T>) -> Result<Option<Vec<f64>>> {
        if !self.is_square() {
            return Ok(None);
        }
        let determinant = self.determinant()?;
        if determinant.is_zero() {
            log::debug!("determinant is zero, solving by elimination");
            return Ok(None);
        }
        let determinant = numeric::to_double(&determinant)?;

        (0..self.columns())
            .map(|k| {
                let replaced = self.with_column(k, constants)?.determinant()?;
                Ok(numeric::to_double(&replaced)? / determinant)
            })
            .collect::<Result<Vec<f64>>>()
            .map(Some)
    }

    /// Gaussian elimination of `[self | constants]` and back-substitution.
    fn solve_diagonal(&self, constants: &Matrix<T>) -> Result<Option<Vec<f64>>> {
        let variables = self.columns();
        let mut work = (self | constants)?;
        let rank = work.eliminate_lower(variables)?.len();

        // lines from `rank` on have only zero coefficients left
        if (rank..work.lines()).any(|line| !work[(line, variables)].is_zero()) {
            log::debug!("inconsistent system, no solution");
            return Ok(None);
        }
        if rank < variables {
            return Err(MatrixError::InfiniteSolutions);
        }

        let work = work.to_f64()?;
        let mut values = vec![0.0; variables];
        for line in (0..variables).rev() {
            let solved: f64 = (line + 1..variables)
                .map(|column| work[(line, column)] * values[column])
                .sum();
            values[line] = (work[(line, variables)] - solved) / work[(line, line)];
        }
        Ok(Some(values))
    }

    /// Copy with column `column` replaced by the single column of `values`.
    fn with_column(&self, column: usize, values: &Matrix<T>) -> Result<Matrix<T>> {
        self.check_column(column)?;
        let mut result = self.clone();
        result.augment_at = None;
        for line in 0..self.lines() {
            result[(line, column)] = values.get(line, 0)?.clone();
        }
        Ok(result)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn column<T: Numeric>(values: Vec<T>) -> Matrix<T> {
        Matrix::from_values(values.len(), 1, values).unwrap()
    }

    #[test]
    fn test_solve_cramer() {
        let a = Matrix::from_list(vec![vec![2, 1], vec![1, -1]]).unwrap();
        let solution = a.solve(&column(vec![5, 1]), &["x", "y"]).unwrap().unwrap();
        assert_eq!(solution.get("x"), Some(2.0));
        assert_eq!(solution.get("y"), Some(1.0));
        assert_eq!(solution.get("z"), None);
        assert_eq!(
            solution.into_vec(),
            vec![("x".to_string(), 2.0), ("y".to_string(), 1.0)]
        );
    }

    #[test]
    fn test_solve_keeps_name_order() {
        let a = Matrix::from_list(vec![
            vec![1.0, 1.0, 1.0],
            vec![0.0, 2.0, 5.0],
            vec![2.0, 5.0, -1.0],
        ])
        .unwrap();
        let solution = a
            .solve(&column(vec![6.0, -4.0, 27.0]), &["c", "a", "b"])
            .unwrap()
            .unwrap();
        let names: Vec<&str> = solution.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_relative_eq!(solution.get("c").unwrap(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(solution.get("a").unwrap(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(solution.get("b").unwrap(), -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_infinite_and_none() {
        let a = Matrix::from_list(vec![vec![1, 1], vec![2, 2]]).unwrap();
        assert_eq!(
            a.solve(&column(vec![2, 4]), &["x", "y"]),
            Err(MatrixError::InfiniteSolutions)
        );
        assert_eq!(a.solve(&column(vec![2, 5]), &["x", "y"]), Ok(None));
    }

    #[test]
    fn test_solve_overdetermined() {
        let a = Matrix::from_list(vec![vec![1, 1], vec![1, -1], vec![2, 0]]).unwrap();
        let solution = a
            .solve(&column(vec![3, 1, 4]), &["x", "y"])
            .unwrap()
            .unwrap();
        assert_eq!(solution.get("x"), Some(2.0));
        assert_eq!(solution.get("y"), Some(1.0));

        assert_eq!(a.solve(&column(vec![3, 1, 5]), &["x", "y"]), Ok(None));
    }

    #[test]
    fn test_solve_underdetermined() {
        let a = Matrix::from_list(vec![vec![1, 2, 3]]).unwrap();
        assert_eq!(
            a.solve(&column(vec![6]), &["x", "y", "z"]),
            Err(MatrixError::InfiniteSolutions)
        );

        let inconsistent = Matrix::from_list(vec![vec![1, 2, 3], vec![2, 4, 6]]).unwrap();
        assert_eq!(
            inconsistent.solve(&column(vec![1, 3]), &["x", "y", "z"]),
            Ok(None)
        );
    }

    #[test]
    fn test_solve_integer_no_overflow() {
        let a = Matrix::from_list(vec![
            vec![7, 3, -5, 9, 2],
            vec![4, -8, 6, 1, 9],
            vec![-3, 5, 8, -7, 6],
            vec![9, 2, -4, 6, -8],
            vec![1, 9, 7, -2, 5],
        ])
        .unwrap();
        let x = [1, -2, 3, 0, 4];
        let b: Vec<i32> = (0..5)
            .map(|i| (0..5).map(|j| a[(i, j)] * x[j]).sum())
            .collect();
        let names = ["a", "b", "c", "d", "e"];
        let solution = a.solve(&column(b.clone()), &names).unwrap().unwrap();
        for (name, expected) in names.iter().zip(x) {
            assert_relative_eq!(solution.get(name).unwrap(), expected as f64, epsilon = 1e-9);
        }

        // rank 4: the last line is the sum of the first two
        let mut deficient = a.cast::<i64>().unwrap();
        for k in 0..5 {
            deficient[(4, k)] = deficient[(0, k)] + deficient[(1, k)];
        }
        let b: Vec<i64> = (0..5)
            .map(|i| (0..5).map(|j| deficient[(i, j)] * x[j] as i64).sum())
            .collect();
        assert_eq!(
            deficient.solve(&column(b), &names),
            Err(MatrixError::InfiniteSolutions)
        );
    }

    #[test]
    fn test_solve_fraction() {
        let fr = |s: &str| s.parse::<Fraction>().unwrap();
        let a = Matrix::from_list(vec![vec![fr("1/2"), fr("1/3")], vec![fr("1/4"), fr("-1")]])
            .unwrap();
        let solution = a
            .solve(&column(vec![fr("1"), fr("0")]), &["p", "q"])
            .unwrap()
            .unwrap();
        assert_relative_eq!(solution.get("p").unwrap(), 12.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(solution.get("q").unwrap(), 3.0 / 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_with_rounding() {
        let a = Matrix::from_list(vec![vec![3.0, 0.0], vec![0.0, 7.0]]).unwrap();
        let config = EliminationConfig::new().with_decimals(2);
        let solution = a
            .solve_with(&column(vec![1.0, 1.0]), &["x", "y"], &config)
            .unwrap()
            .unwrap();
        assert_eq!(solution.get("x"), Some(0.33));
        assert_eq!(solution.get("y"), Some(0.14));
    }

    #[test]
    fn test_solve_errors() {
        let a = Matrix::from_list(vec![vec![2, 1], vec![1, -1]]).unwrap();
        assert_eq!(
            a.solve(&column(vec![5, 1]), &["x"]),
            Err(MatrixError::MissingVariableNames {
                expected: 2,
                got: 1
            })
        );
        assert!(matches!(
            a.solve(&column(vec![5, 1, 0]), &["x", "y"]),
            Err(MatrixError::DimensionMismatch { .. })
        ));
        let wide = Matrix::from_list(vec![vec![5, 1], vec![1, 1]]).unwrap();
        assert!(matches!(
            a.solve(&wide, &["x", "y"]),
            Err(MatrixError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_solve_zero_determinant_elimination_path() {
        // zero determinant: decided by elimination
        let a = Matrix::from_list(vec![vec![0, 1], vec![0, 2]]).unwrap();
        assert_eq!(
            a.solve(&column(vec![1, 2]), &["x", "y"]),
            Err(MatrixError::InfiniteSolutions)
        );
        assert_eq!(a.solve(&column(vec![1, 3]), &["x", "y"]), Ok(None));
    }
}
