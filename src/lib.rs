#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod error;
pub mod matrix {
    pub mod matrix;
    pub mod matrix_config;
    pub mod matrix_det;
    pub mod matrix_inverse;
    pub mod matrix_ops;
    #[cfg(feature = "python")]
    pub mod matrix_py;
    pub mod matrix_rows;
    pub mod matrix_solve;
}
pub mod rings {
    pub mod fraction;
    pub mod numeric;
}

pub mod utils;

pub use error::{MatrixError, Result};
pub use matrix::matrix::Matrix;
pub use matrix::matrix_config::EliminationConfig;
pub use matrix::matrix_solve::Solution;
pub use rings::fraction::Fraction;
pub use rings::numeric::Numeric;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn sci_matrix(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<matrix::matrix_py::PyMatrix>()?;
    Ok(())
}
