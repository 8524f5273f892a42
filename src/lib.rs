//! Smithy is a library for exact linear algebra over Euclidean rings.
//!
//! All arithmetic is exact: matrices are generic over a [Ring](domains::Ring)
//! implementation (integers, rationals, Gaussian integers, univariate
//! polynomials, or your own), and the elimination engine reduces them to row
//! or column echelon form, Hermite normal form, or Smith normal form while
//! recording the elementary operations needed to reconstruct the unimodular
//! transformation matrices. The engine operates on a sparse row store, so
//! large boundary matrices coming from simplicial or cellular complexes are
//! reduced in time proportional to their nonzero structure.
//!
//! For example, the Smith normal form of an integer matrix:
//!
//! ```
//! use smithy::domains::integer::Z;
//! use smithy::elimination::{eliminate, EliminationOptions, Form};
//! use smithy::matrix::Matrix;
//!
//! let a = Matrix::from_nested_vec(
//!     vec![
//!         vec![1.into(), 1.into(), 1.into()],
//!         vec![1.into(), 3.into(), 3.into()],
//!         vec![1.into(), 3.into(), 15.into()],
//!     ],
//!     Z,
//! )
//! .unwrap();
//!
//! let e = eliminate(&a, Form::Smith, EliminationOptions::tracking()).unwrap();
//! assert_eq!(e.rank, 3);
//! // e.result is diag(1, 2, 12), and e.result == left * a * right.
//! ```

pub mod domains;
pub mod elimination;
pub mod matrix;
pub mod printer;
