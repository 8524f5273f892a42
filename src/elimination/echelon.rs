//! Row and column echelon elimination.

use smallvec::SmallVec;

use super::driver::{Eliminator, Strategy};
use super::ops::ElementaryOp;
use crate::domains::EuclideanDomain;

/// Reduces the working rows to row echelon form: pivot rows are finished in
/// order, with strictly increasing head columns and everything below each
/// pivot eliminated.
pub(crate) struct RowEchelon {
    row: u32,
    col: u32,
}

impl RowEchelon {
    pub(crate) fn new() -> RowEchelon {
        RowEchelon { row: 0, col: 0 }
    }
}

impl<R: EuclideanDomain> Strategy<R> for RowEchelon {
    fn step(&mut self, e: &mut Eliminator<R>) {
        if self.col >= e.ncols || self.row >= e.nrows || e.worker.is_complete() {
            e.exit();
            return;
        }

        let candidates: SmallVec<[u32; 8]> = e.worker.rows_with_head_at(self.col);
        if candidates.is_empty() {
            self.col += 1;
            return;
        }

        let pivot = select_pivot(e, &candidates);
        let a0 = e.worker.head(pivot).unwrap().1.clone();

        if candidates.len() == 1 {
            // the pivot stands alone in this column: normalize it and move
            // it into cursor position
            let u = e.ring.normalizing_unit(&a0);
            e.apply(ElementaryOp::MulRow {
                row: pivot,
                factor: u,
            });
            e.apply(ElementaryOp::SwapRows(self.row, pivot));
            e.worker.finish(self.row);

            log::debug!("echelon pivot at ({}, {})", self.row, self.col);
            self.row += 1;
            self.col += 1;
        } else {
            // reduce every other head in this column modulo the pivot; the
            // loop revisits the column until a single head remains
            for &i in &candidates {
                if i == pivot {
                    continue;
                }
                let a = e.worker.head(i).unwrap().1.clone();
                let (q, _) = e.ring.quot_rem(&a, &a0);
                e.apply(ElementaryOp::AddRow {
                    from: pivot,
                    to: i,
                    factor: e.ring.neg(&q),
                });
            }
        }
    }
}

/// The pivot among `candidates` (all with heads in the same column): least
/// head degree, then least row weight, then lowest row index. The tie-break
/// chain is total, so the choice is deterministic.
fn select_pivot<R: EuclideanDomain>(e: &Eliminator<R>, candidates: &[u32]) -> u32 {
    candidates
        .iter()
        .copied()
        .min_by_key(|&i| {
            let (_, v) = e.worker.head(i).unwrap();
            (e.ring.degree(v), e.worker.weight(i), i)
        })
        .unwrap()
}

/// Column echelon form, realized by running [RowEchelon] on the transpose.
pub(crate) struct ColEchelon;

impl<R: EuclideanDomain> Strategy<R> for ColEchelon {
    fn prepare(&mut self, e: &mut Eliminator<R>) {
        e.subrun_transposed(RowEchelon::new());
        e.exit();
    }

    fn step(&mut self, _e: &mut Eliminator<R>) {
        unreachable!("column echelon is realized entirely by a transposed subrun");
    }
}
