//! Elementary row and column operations.
//!
//! Every operation carries enough information to compute its algebraic
//! inverse and its determinant contribution, so a recorded sequence of
//! operations can be replayed forwards, replayed backwards, and multiplied
//! out into the unimodular transformation matrices of an elimination.

use crate::domains::Ring;
use crate::matrix::Matrix;

/// An elementary row or column operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementaryOp<R: Ring> {
    /// `row[to] += factor * row[from]`
    AddRow { from: u32, to: u32, factor: R::Element },
    /// `row[row] *= factor`; `factor` must be a unit for the operation to be
    /// invertible.
    MulRow { row: u32, factor: R::Element },
    SwapRows(u32, u32),
    /// `col[to] += factor * col[from]`
    AddCol { from: u32, to: u32, factor: R::Element },
    /// `col[col] *= factor`
    MulCol { col: u32, factor: R::Element },
    SwapCols(u32, u32),
}

impl<R: Ring> ElementaryOp<R> {
    /// Whether the operation acts on the row space.
    pub fn is_row_op(&self) -> bool {
        matches!(
            self,
            ElementaryOp::AddRow { .. } | ElementaryOp::MulRow { .. } | ElementaryOp::SwapRows(_, _)
        )
    }

    /// Whether applying the operation leaves any matrix unchanged.
    pub fn is_identity(&self, ring: &R) -> bool {
        match self {
            ElementaryOp::AddRow { factor, .. } | ElementaryOp::AddCol { factor, .. } => {
                R::is_zero(factor)
            }
            ElementaryOp::MulRow { factor, .. } | ElementaryOp::MulCol { factor, .. } => {
                ring.is_one(factor)
            }
            ElementaryOp::SwapRows(i, j) | ElementaryOp::SwapCols(i, j) => i == j,
        }
    }

    /// The operation with rows and columns interchanged.
    pub fn transposed(self) -> ElementaryOp<R> {
        match self {
            ElementaryOp::AddRow { from, to, factor } => ElementaryOp::AddCol { from, to, factor },
            ElementaryOp::MulRow { row, factor } => ElementaryOp::MulCol { col: row, factor },
            ElementaryOp::SwapRows(i, j) => ElementaryOp::SwapCols(i, j),
            ElementaryOp::AddCol { from, to, factor } => ElementaryOp::AddRow { from, to, factor },
            ElementaryOp::MulCol { col, factor } => ElementaryOp::MulRow { row: col, factor },
            ElementaryOp::SwapCols(i, j) => ElementaryOp::SwapRows(i, j),
        }
    }

    /// The inverse operation.
    ///
    /// Panics when a multiplication factor is not a unit: the eliminator only
    /// ever multiplies by units, so a failure here means the ring contract is
    /// broken.
    pub fn inverse(&self, ring: &R) -> ElementaryOp<R> {
        let unit_inv = |factor: &R::Element| {
            ring.try_div(&ring.one(), factor).unwrap_or_else(|| {
                panic!("ring contract violation: {:?} is not a unit", factor)
            })
        };

        match self {
            ElementaryOp::AddRow { from, to, factor } => ElementaryOp::AddRow {
                from: *from,
                to: *to,
                factor: ring.neg(factor),
            },
            ElementaryOp::AddCol { from, to, factor } => ElementaryOp::AddCol {
                from: *from,
                to: *to,
                factor: ring.neg(factor),
            },
            ElementaryOp::MulRow { row, factor } => ElementaryOp::MulRow {
                row: *row,
                factor: unit_inv(factor),
            },
            ElementaryOp::MulCol { col, factor } => ElementaryOp::MulCol {
                col: *col,
                factor: unit_inv(factor),
            },
            ElementaryOp::SwapRows(_, _) | ElementaryOp::SwapCols(_, _) => self.clone(),
        }
    }

    /// The determinant contribution of the operation: one for additions, the
    /// factor for multiplications, minus one for swaps of distinct indices.
    pub fn determinant(&self, ring: &R) -> R::Element {
        match self {
            ElementaryOp::AddRow { .. } | ElementaryOp::AddCol { .. } => ring.one(),
            ElementaryOp::MulRow { factor, .. } | ElementaryOp::MulCol { factor, .. } => {
                factor.clone()
            }
            ElementaryOp::SwapRows(i, j) | ElementaryOp::SwapCols(i, j) => {
                if i == j {
                    ring.one()
                } else {
                    ring.neg(&ring.one())
                }
            }
        }
    }

    /// Apply the operation to a dense matrix.
    pub fn apply_to(&self, m: &mut Matrix<R>) {
        let ring = m.field().clone();
        match self {
            ElementaryOp::AddRow { from, to, factor } => {
                for j in 0..m.ncols() as u32 {
                    let v = m[(*from, j)].clone();
                    ring.add_mul_assign(&mut m[(*to, j)], factor, &v);
                }
            }
            ElementaryOp::AddCol { from, to, factor } => {
                for i in 0..m.nrows() as u32 {
                    let v = m[(i, *from)].clone();
                    ring.add_mul_assign(&mut m[(i, *to)], factor, &v);
                }
            }
            ElementaryOp::MulRow { row, factor } => {
                for j in 0..m.ncols() as u32 {
                    ring.mul_assign(&mut m[(*row, j)], factor);
                }
            }
            ElementaryOp::MulCol { col, factor } => {
                for i in 0..m.nrows() as u32 {
                    ring.mul_assign(&mut m[(i, *col)], factor);
                }
            }
            ElementaryOp::SwapRows(i, j) => {
                if i != j {
                    for col in 0..m.ncols() as u32 {
                        let a = m[(*i, col)].clone();
                        let b = std::mem::replace(&mut m[(*j, col)], a);
                        m[(*i, col)] = b;
                    }
                }
            }
            ElementaryOp::SwapCols(i, j) => {
                if i != j {
                    for row in 0..m.nrows() as u32 {
                        let a = m[(row, *i)].clone();
                        let b = std::mem::replace(&mut m[(row, *j)], a);
                        m[(row, *i)] = b;
                    }
                }
            }
        }
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
    fn inverse_undoes() {
        let ops: Vec<ElementaryOp<Z>> = vec![
            ElementaryOp::AddRow {
                from: 0,
                to: 1,
                factor: Integer::from(-3),
            },
            ElementaryOp::MulRow {
                row: 0,
                factor: Integer::from(-1),
            },
            ElementaryOp::SwapRows(0, 1),
            ElementaryOp::AddCol {
                from: 1,
                to: 0,
                factor: Integer::from(2),
            },
        ];

        let original = m(vec![vec![1, 2], vec![3, 4]]);
        let mut a = original.clone();
        for op in &ops {
            op.apply_to(&mut a);
        }
        for op in ops.iter().rev() {
            op.inverse(&Z).apply_to(&mut a);
        }
        assert_eq!(a, original);
    }

    #[test]
    fn transpose_duality() {
        let op: ElementaryOp<Z> = ElementaryOp::AddRow {
            from: 0,
            to: 1,
            factor: Integer::from(5),
        };
        // applying a transposed op to the transpose matches the original
        let mut a = m(vec![vec![1, 2], vec![3, 4]]);
        let mut t = a.transpose();
        op.apply_to(&mut a);
        op.clone().transposed().apply_to(&mut t);
        assert_eq!(t, a.transpose());
    }

    #[test]
    fn determinant_contributions() {
        let add: ElementaryOp<Z> = ElementaryOp::AddRow {
            from: 0,
            to: 1,
            factor: Integer::from(7),
        };
        assert_eq!(add.determinant(&Z), Integer::from(1));

        let mul: ElementaryOp<Z> = ElementaryOp::MulRow {
            row: 0,
            factor: Integer::from(-1),
        };
        assert_eq!(mul.determinant(&Z), Integer::from(-1));

        let swap: ElementaryOp<Z> = ElementaryOp::SwapRows(0, 1);
        assert_eq!(swap.determinant(&Z), Integer::from(-1));
        let self_swap: ElementaryOp<Z> = ElementaryOp::SwapRows(1, 1);
        assert_eq!(self_swap.determinant(&Z), Integer::from(1));
    }
}
