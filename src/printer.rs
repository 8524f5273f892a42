//! Display plumbing for ring elements and matrices.
//!
//! Ring elements do not know how to print themselves in general (the ring
//! holds the context), so formatting is routed through [Ring::format] and the
//! printer adapters defined here, which are suitable as arguments to
//! [format!].

use std::fmt::{self, Display, Formatter};

use crate::domains::Ring;
use crate::matrix::Matrix;

/// Surrounding context of the element being printed, used to decide when a
/// composite element (a negative number, a sum of terms) must be wrapped in
/// parentheses or can drop a leading `+`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrintState {
    /// The element appears as a term of a surrounding sum.
    pub in_sum: bool,
    /// The element appears as a factor of a surrounding product.
    pub in_product: bool,
}

impl PrintState {
    pub const fn new() -> PrintState {
        PrintState {
            in_sum: false,
            in_product: false,
        }
    }

    pub const fn in_sum() -> PrintState {
        PrintState {
            in_sum: true,
            in_product: false,
        }
    }

    pub const fn in_product() -> PrintState {
        PrintState {
            in_sum: false,
            in_product: true,
        }
    }
}

/// Provides an interface for printing a ring element, suitable as an argument
/// to [format!]. Internally, it will call [Ring::format].
pub struct RingPrinter<'a, R: Ring> {
    pub ring: &'a R,
    pub element: &'a R::Element,
    pub state: PrintState,
}

impl<'a, R: Ring> RingPrinter<'a, R> {
    pub fn new(ring: &'a R, element: &'a R::Element) -> RingPrinter<'a, R> {
        RingPrinter {
            ring,
            element,
            state: PrintState::new(),
        }
    }
}

impl<'a, R: Ring> Display for RingPrinter<'a, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.ring.format(self.element, self.state, f)
    }
}

/// Prints a matrix as nested rows, e.g. `[[1, 0], [-2, 3]]`.
pub struct MatrixPrinter<'a, F: Ring> {
    pub matrix: &'a Matrix<F>,
}

impl<'a, F: Ring> MatrixPrinter<'a, F> {
    pub fn new(matrix: &'a Matrix<F>) -> MatrixPrinter<'a, F> {
        MatrixPrinter { matrix }
    }
}

impl<'a, F: Ring> Display for MatrixPrinter<'a, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, row) in self.matrix.row_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str("[")?;
            for (j, e) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                self.matrix.field().format(e, PrintState::new(), f)?;
            }
            f.write_str("]")?;
        }
        f.write_str("]")
    }
}
