use crate::error::MatrixError;
use crate::matrix::matrix::Matrix;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyType;

impl From<MatrixError> for PyErr {
    fn from(error: MatrixError) -> PyErr {
        PyValueError::new_err(error.to_string())
    }
}

/// Double-precision matrix exposed to Python as `Matrix`.
#[derive(Debug, Clone)]
#[pyclass(frozen, name = "Matrix")]
pub struct PyMatrix {
    inner: Matrix<f64>,
}

impl From<Matrix<f64>> for PyMatrix {
    fn from(inner: Matrix<f64>) -> Self {
        PyMatrix { inner }
    }
}

#[pymethods]
impl PyMatrix {
    #[classmethod]
    pub fn from_list(_cls: &Bound<PyType>, lines: Vec<Vec<f64>>) -> PyResult<Self> {
        Ok(Matrix::from_list(lines)?.into())
    }

    #[classmethod]
    pub fn identity(_cls: &Bound<PyType>, size: usize) -> PyResult<Self> {
        Ok(Matrix::identity(size)?.into())
    }

    pub fn to_list(&self) -> Vec<Vec<f64>> {
        self.inner.to_list()
    }

    pub fn __add__(&self, rhs: &PyMatrix) -> PyResult<PyMatrix> {
        Ok((&self.inner + &rhs.inner)?.into())
    }

    pub fn __sub__(&self, rhs: &PyMatrix) -> PyResult<PyMatrix> {
        Ok((&self.inner - &rhs.inner)?.into())
    }

    pub fn __mul__(&self, rhs: &PyMatrix) -> PyResult<PyMatrix> {
        Ok((&self.inner * &rhs.inner)?.into())
    }

    pub fn __or__(&self, rhs: &PyMatrix) -> PyResult<PyMatrix> {
        Ok((&self.inner | &rhs.inner)?.into())
    }

    pub fn __invert__(&self) -> PyResult<Option<PyMatrix>> {
        Ok(self.inner.inverse()?.map(PyMatrix::from))
    }

    pub fn __eq__(&self, rhs: &PyMatrix) -> bool {
        self.inner == rhs.inner
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    pub fn scale(&self, k: f64) -> PyResult<PyMatrix> {
        Ok(self.inner.scale(k)?.into())
    }

    pub fn determinant(&self) -> PyResult<f64> {
        Ok(self.inner.determinant()?)
    }

    pub fn find(&self, value: f64) -> Option<(usize, usize)> {
        self.inner.find(&value)
    }

    pub fn solve(
        &self,
        constants: Vec<f64>,
        names: Vec<String>,
    ) -> PyResult<Option<Vec<(String, f64)>>> {
        let constants = Matrix::from_values(constants.len(), 1, constants)?;
        Ok(self
            .inner
            .solve(&constants, &names)?
            .map(|solution| solution.into_vec()))
    }

    #[getter]
    #[allow(non_snake_case)]
    pub fn T(&self) -> PyMatrix {
        self.inner.transpose().into()
    }

    #[getter]
    pub fn rows(&self) -> usize {
        self.inner.lines()
    }

    #[getter]
    pub fn cols(&self) -> usize {
        self.inner.columns()
    }
}
