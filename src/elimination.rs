//! Matrix elimination over Euclidean rings.
//!
//! [eliminate] reduces a matrix to one of five canonical [Form]s (row or
//! column echelon, row or column Hermite normal form, or Smith normal form)
//! and, when requested, reconstructs the unimodular transformation matrices
//! from the recorded elementary operations, so that
//! `result == left * original * right`.
//!
//! The reduction runs on a sparse row store (one pivot selection and a
//! handful of sparse row merges per step), so the cost tracks the nonzero
//! structure of the input rather than its dense size.

pub mod ops;

mod driver;
mod echelon;
mod hermite;
mod smith;
mod worker;

use std::fmt::{self, Display};

use crate::domains::{EuclideanDomain, Ring};
use crate::matrix::Matrix;

pub use ops::ElementaryOp;

/// The canonical forms the eliminator can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Form {
    RowEchelon,
    ColEchelon,
    RowHermite,
    ColHermite,
    Smith,
}

/// Options for one elimination run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EliminationOptions {
    /// Reconstruct the transformation matrices (and their inverses) from the
    /// operation log.
    pub track_transforms: bool,
    /// Replay every logged operation onto a dense copy of the matrix and
    /// assert it matches the live sparse state. Expensive; meant for
    /// verifying the engine itself, not for production use.
    pub debug: bool,
}

impl EliminationOptions {
    pub fn new() -> EliminationOptions {
        EliminationOptions::default()
    }

    /// Options with transformation tracking enabled.
    pub fn tracking() -> EliminationOptions {
        EliminationOptions {
            track_transforms: true,
            debug: false,
        }
    }

    pub fn with_debug(mut self) -> EliminationOptions {
        self.debug = true;
        self
    }
}

/// Errors for malformed elimination input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElimError {
    /// A component coordinate lies outside the stated dimensions.
    OutOfRange { row: u32, col: u32 },
    /// Two components share the same coordinate.
    DuplicateEntry { row: u32, col: u32 },
}

impl Display for ElimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElimError::OutOfRange { row, col } => {
                write!(f, "Component ({},{}) lies outside the matrix", row, col)
            }
            ElimError::DuplicateEntry { row, col } => {
                write!(f, "Duplicate component at ({},{})", row, col)
            }
        }
    }
}

impl std::error::Error for ElimError {}

/// The outcome of an elimination.
///
/// The transformation matrices are present only when
/// [EliminationOptions::track_transforms] was set; when they are,
/// `result == left * original * right` and the inverses undo the
/// transformations exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EliminationResult<R: Ring> {
    /// The matrix in the requested canonical form.
    pub result: Matrix<R>,
    /// The rank of the original matrix.
    pub rank: usize,
    /// The elementary operations that were applied, in order. Replaying them
    /// against the original matrix reproduces `result`; replaying their
    /// inverses in reverse order reproduces the original.
    pub ops: Vec<ElementaryOp<R>>,
    pub left: Option<Matrix<R>>,
    pub right: Option<Matrix<R>>,
    pub left_inverse: Option<Matrix<R>>,
    pub right_inverse: Option<Matrix<R>>,
}

impl<R: Ring> EliminationResult<R> {
    /// `det(left) * det(right)`: the product of the determinant
    /// contributions of the logged operations. Always a unit.
    pub fn transformation_determinant(&self) -> R::Element {
        let ring = self.result.field();
        let mut det = ring.one();
        for op in &self.ops {
            ring.mul_assign(&mut det, &op.determinant(ring));
        }
        det
    }

    /// The determinant of the *original* matrix, recovered from the
    /// canonical form and the operation log. `None` when the matrix is not
    /// square.
    pub fn determinant(&self) -> Option<R::Element> {
        if self.result.nrows() != self.result.ncols() {
            return None;
        }
        let ring = self.result.field();
        if self.rank < self.result.nrows() {
            return Some(ring.zero());
        }

        // full-rank canonical forms are triangular with the pivots on the
        // main diagonal
        let mut prod = ring.one();
        for i in 0..self.result.nrows() as u32 {
            ring.mul_assign(&mut prod, &self.result[(i, i)]);
        }

        let t = self.transformation_determinant();
        let det = ring.try_div(&prod, &t).unwrap_or_else(|| {
            panic!(
                "ring contract violation: transformation determinant {:?} is not a unit",
                t
            )
        });
        Some(det)
    }
}

/// Reduce `matrix` to the requested canonical form.
pub fn eliminate<R: EuclideanDomain>(
    matrix: &Matrix<R>,
    form: Form,
    options: EliminationOptions,
) -> Result<EliminationResult<R>, ElimError> {
    eliminate_components(
        matrix.field().clone(),
        matrix.nrows() as u32,
        matrix.ncols() as u32,
        matrix.components(),
        form,
        options,
    )
}

/// Reduce a sparse matrix, given as `(row, column, value)` components, to
/// the requested canonical form. Duplicate or out-of-range coordinates are
/// rejected.
pub fn eliminate_components<R: EuclideanDomain>(
    ring: R,
    nrows: u32,
    ncols: u32,
    components: Vec<(u32, u32, R::Element)>,
    form: Form,
    options: EliminationOptions,
) -> Result<EliminationResult<R>, ElimError> {
    let mut e = driver::Eliminator::new(ring, nrows, ncols, components, options)?;
    match form {
        Form::RowEchelon => e.run(&mut echelon::RowEchelon::new()),
        Form::ColEchelon => e.run(&mut echelon::ColEchelon),
        Form::RowHermite => e.run(&mut hermite::RowHermite::new()),
        Form::ColHermite => e.run(&mut hermite::ColHermite),
        Form::Smith => e.run(&mut smith::Smith::new()),
    }
    Ok(e.finalize())
}

impl<R: EuclideanDomain> Matrix<R> {
    /// Reduce the matrix to a canonical form. See [eliminate].
    pub fn eliminate(
        &self,
        form: Form,
        options: EliminationOptions,
    ) -> Result<EliminationResult<R>, ElimError> {
        eliminate(self, form, options)
    }
}
