//! Dense matrices with entries in an abstract ring.

use std::fmt::{self, Display};
use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};
use std::slice::Chunks;

use crate::domains::Ring;
use crate::printer::MatrixPrinter;

/// A matrix with entries that are elements of a ring `F`, stored row-major.
#[derive(Clone, Hash, PartialEq, Eq, Debug)]
pub struct Matrix<F: Ring> {
    pub(crate) data: Vec<F::Element>,
    pub(crate) nrows: u32,
    pub(crate) ncols: u32,
    pub(crate) field: F,
}

/// Errors that can occur when constructing or combining matrices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// The supplied data does not match the requested dimensions.
    ShapeMismatch,
    /// The rows of a nested vector have unequal lengths.
    NotRectangular,
    /// A component coordinate lies outside the matrix.
    OutOfRange { row: u32, col: u32 },
    /// Two components share the same coordinate.
    DuplicateEntry { row: u32, col: u32 },
}

impl Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::ShapeMismatch => {
                write!(f, "Data length does not match the matrix dimensions")
            }
            MatrixError::NotRectangular => write!(f, "The matrix is not rectangular"),
            MatrixError::OutOfRange { row, col } => {
                write!(f, "Component ({},{}) lies outside the matrix", row, col)
            }
            MatrixError::DuplicateEntry { row, col } => {
                write!(f, "Duplicate component at ({},{})", row, col)
            }
        }
    }
}

impl std::error::Error for MatrixError {}

impl<F: Ring> Matrix<F> {
    /// Create a new zeroed matrix with `nrows` rows and `ncols` columns.
    pub fn new(nrows: u32, ncols: u32, field: F) -> Matrix<F> {
        Matrix {
            data: (0..nrows as usize * ncols as usize)
                .map(|_| field.zero())
                .collect(),
            nrows,
            ncols,
            field,
        }
    }

    /// Create a new square matrix with ones on the main diagonal and zeroes
    /// elsewhere.
    pub fn identity(nrows: u32, field: F) -> Matrix<F> {
        Matrix {
            data: (0..nrows as usize * nrows as usize)
                .map(|i| {
                    if i % nrows as usize == i / nrows as usize {
                        field.one()
                    } else {
                        field.zero()
                    }
                })
                .collect(),
            nrows,
            ncols: nrows,
            field,
        }
    }

    /// Create a new matrix with the scalars `diag` on the main diagonal and
    /// zeroes elsewhere.
    pub fn eye(diag: &[F::Element], field: F) -> Matrix<F> {
        let mut m = Matrix::new(diag.len() as u32, diag.len() as u32, field);
        for (i, e) in diag.iter().enumerate() {
            m[(i as u32, i as u32)] = e.clone();
        }
        m
    }

    /// Convert a linear representation of a matrix to a `Matrix`.
    pub fn from_linear(
        data: Vec<F::Element>,
        nrows: u32,
        ncols: u32,
        field: F,
    ) -> Result<Matrix<F>, MatrixError> {
        if data.len() == nrows as usize * ncols as usize {
            Ok(Matrix {
                data,
                nrows,
                ncols,
                field,
            })
        } else {
            Err(MatrixError::ShapeMismatch)
        }
    }

    /// Create a new matrix from a 2-dimensional vector of scalars.
    pub fn from_nested_vec(matrix: Vec<Vec<F::Element>>, field: F) -> Result<Matrix<F>, MatrixError> {
        let mut data = vec![];

        let cols = matrix.first().map(|r| r.len()).unwrap_or(0);

        for d in matrix {
            if d.len() != cols {
                return Err(MatrixError::NotRectangular);
            }

            data.extend(d);
        }

        Ok(Matrix {
            nrows: if cols == 0 { 0 } else { (data.len() / cols) as u32 },
            ncols: cols as u32,
            data,
            field,
        })
    }

    /// Create a matrix from sparse `(row, column, value)` components; absent
    /// coordinates are zero. Duplicate or out-of-range coordinates are
    /// rejected.
    pub fn from_components(
        nrows: u32,
        ncols: u32,
        components: impl IntoIterator<Item = (u32, u32, F::Element)>,
        field: F,
    ) -> Result<Matrix<F>, MatrixError> {
        let mut m = Matrix::new(nrows, ncols, field);
        let mut seen = vec![false; nrows as usize * ncols as usize];

        for (r, c, v) in components {
            if r >= nrows || c >= ncols {
                return Err(MatrixError::OutOfRange { row: r, col: c });
            }
            let idx = r as usize * ncols as usize + c as usize;
            if seen[idx] {
                return Err(MatrixError::DuplicateEntry { row: r, col: c });
            }
            seen[idx] = true;
            m.data[idx] = v;
        }

        Ok(m)
    }

    /// Return the nonzero entries as `(row, column, value)` components in
    /// row-major order.
    pub fn components(&self) -> Vec<(u32, u32, F::Element)> {
        let mut comps = vec![];
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                let e = &self[(i, j)];
                if !F::is_zero(e) {
                    comps.push((i, j, e.clone()));
                }
            }
        }
        comps
    }

    /// Return the number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows as usize
    }

    /// Return the number of columns.
    pub fn ncols(&self) -> usize {
        self.ncols as usize
    }

    /// Return the field of the matrix entries.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Return an iterator over the rows of the matrix.
    pub fn row_iter(&self) -> Chunks<'_, F::Element> {
        self.data.chunks(self.ncols.max(1) as usize)
    }

    /// Return true iff every entry in the matrix is zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|e| F::is_zero(e))
    }

    /// Return true iff every entry off the main diagonal is zero.
    pub fn is_diagonal(&self) -> bool {
        if self.ncols == 0 {
            return true;
        }
        self.data
            .iter()
            .enumerate()
            .all(|(i, e)| i as u32 % self.ncols == i as u32 / self.ncols || F::is_zero(e))
    }

    /// Transpose the matrix.
    pub fn transpose(&self) -> Matrix<F> {
        let mut m = Matrix::new(self.ncols, self.nrows, self.field.clone());
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                m[(j, i)] = self[(i, j)].clone();
            }
        }
        m
    }

    /// Transpose the matrix in-place where possible.
    pub fn into_transposed(mut self) -> Matrix<F> {
        if self.nrows == self.ncols {
            for i in 0..self.nrows {
                for j in 0..i {
                    self.data
                        .swap((i * self.ncols + j) as usize, (j * self.ncols + i) as usize);
                }
            }

            (self.nrows, self.ncols) = (self.ncols, self.nrows);
            self
        } else {
            self.transpose()
        }
    }

    /// Multiply the scalar `e` to each entry of the matrix.
    pub fn mul_scalar(&self, e: &F::Element) -> Matrix<F> {
        Matrix {
            data: self.data.iter().map(|ee| self.field.mul(ee, e)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
            field: self.field.clone(),
        }
    }

    /// Apply a function `f` to each entry of the matrix.
    pub fn map<G: Ring>(&self, f: impl Fn(&F::Element) -> G::Element, field: G) -> Matrix<G> {
        Matrix {
            data: self.data.iter().map(f).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
            field,
        }
    }
}

impl<F: Ring> Index<(u32, u32)> for Matrix<F> {
    type Output = F::Element;

    /// Get the `i`th row and `j`th column entry of the matrix.
    #[inline]
    fn index(&self, (i, j): (u32, u32)) -> &F::Element {
        &self.data[(i * self.ncols + j) as usize]
    }
}

impl<F: Ring> IndexMut<(u32, u32)> for Matrix<F> {
    #[inline]
    fn index_mut(&mut self, (i, j): (u32, u32)) -> &mut F::Element {
        &mut self.data[(i * self.ncols + j) as usize]
    }
}

impl<F: Ring> Display for Matrix<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        MatrixPrinter::new(self).fmt(f)
    }
}

impl<'a, F: Ring> Add<&'a Matrix<F>> for &'a Matrix<F> {
    type Output = Matrix<F>;

    /// Add two matrices.
    fn add(self, rhs: &Matrix<F>) -> Matrix<F> {
        if self.nrows != rhs.nrows || self.ncols != rhs.ncols {
            panic!(
                "Cannot add matrices of shape ({},{}) and ({},{})",
                self.nrows, self.ncols, rhs.nrows, rhs.ncols
            );
        }

        let mut m = Matrix::new(self.nrows, self.ncols, self.field.clone());
        for (c, (a, b)) in m.data.iter_mut().zip(self.data.iter().zip(rhs.data.iter())) {
            *c = self.field.add(a, b);
        }

        m
    }
}

impl<'a, F: Ring> Sub<&'a Matrix<F>> for &'a Matrix<F> {
    type Output = Matrix<F>;

    /// Subtract two matrices.
    fn sub(self, rhs: &Matrix<F>) -> Matrix<F> {
        if self.nrows != rhs.nrows || self.ncols != rhs.ncols {
            panic!(
                "Cannot subtract matrices of shape ({},{}) and ({},{})",
                self.nrows, self.ncols, rhs.nrows, rhs.ncols
            );
        }

        let mut m = Matrix::new(self.nrows, self.ncols, self.field.clone());
        for (c, (a, b)) in m.data.iter_mut().zip(self.data.iter().zip(rhs.data.iter())) {
            *c = self.field.sub(a, b);
        }

        m
    }
}

impl<F: Ring> Neg for Matrix<F> {
    type Output = Matrix<F>;

    /// Negate each entry of the matrix.
    fn neg(mut self) -> Matrix<F> {
        for e in &mut self.data {
            *e = self.field.neg(e);
        }

        self
    }
}

impl<'a, F: Ring> Mul<&'a Matrix<F>> for &'a Matrix<F> {
    type Output = Matrix<F>;

    /// Multiply two matrices.
    fn mul(self, rhs: &Matrix<F>) -> Matrix<F> {
        if self.ncols != rhs.nrows {
            panic!(
                "Cannot multiply matrices of shape ({},{}) and ({},{})",
                self.nrows, self.ncols, rhs.nrows, rhs.ncols
            );
        }

        let mut m = Matrix::new(self.nrows, rhs.ncols, self.field.clone());

        for i in 0..self.nrows {
            for j in 0..rhs.ncols {
                let sum = &mut m.data[(i * rhs.ncols + j) as usize];
                for k in 0..self.ncols {
                    self.field.add_mul_assign(sum, &self[(i, k)], &rhs[(k, j)]);
                }
            }
        }

        m
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::domains::integer::{Integer, Z};

    fn m(rows: Vec<Vec<i64>>) -> Matrix<Z> {
        Matrix::from_nested_vec(
            rows.into_iter()
                .map(|r| r.into_iter().map(Integer::from).collect())
                .collect(),
            Z,
        )
        .unwrap()
    }

    #[test]
    fn construct_and_index() {
        let a = m(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(a[(1, 0)], Integer::from(3));
        assert_eq!(a.nrows(), 2);
        assert_eq!(a.ncols(), 2);
    }

    #[test]
    fn from_components_rejects_duplicates() {
        let comps = vec![(0, 0, Integer::from(1)), (0, 0, Integer::from(2))];
        assert_eq!(
            Matrix::from_components(2, 2, comps, Z),
            Err(MatrixError::DuplicateEntry { row: 0, col: 0 })
        );
    }

    #[test]
    fn from_components_rejects_out_of_range() {
        let comps = vec![(5, 0, Integer::from(1))];
        assert_eq!(
            Matrix::from_components(2, 2, comps, Z),
            Err(MatrixError::OutOfRange { row: 5, col: 0 })
        );
    }

    #[test]
    fn components_round_trip() {
        let a = m(vec![vec![1, 0, -2], vec![0, 0, 3]]);
        let b = Matrix::from_components(2, 3, a.components(), Z).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn multiply() {
        let a = m(vec![vec![1, 2], vec![3, 4]]);
        let b = m(vec![vec![0, 1], vec![1, 0]]);
        assert_eq!(&a * &b, m(vec![vec![2, 1], vec![4, 3]]));
    }

    #[test]
    fn transpose() {
        let a = m(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        let t = a.transpose();
        assert_eq!(t, m(vec![vec![1, 4], vec![2, 5], vec![3, 6]]));
        assert_eq!(t.into_transposed(), a);
    }

    #[test]
    fn display() {
        let a = m(vec![vec![1, -2], vec![0, 3]]);
        assert_eq!(a.to_string(), "[[1, -2], [0, 3]]");
    }
}
