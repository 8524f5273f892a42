//! Hermite normal form elimination.

use super::driver::{Eliminator, Strategy};
use super::echelon::RowEchelon;
use super::ops::ElementaryOp;
use crate::domains::EuclideanDomain;

/// Row Hermite normal form: row echelon form with every entry above a pivot
/// reduced modulo that pivot, making the form unique up to the ring's unit
/// normalization.
pub(crate) struct RowHermite {
    row: u32,
}

impl RowHermite {
    pub(crate) fn new() -> RowHermite {
        RowHermite { row: 0 }
    }
}

impl<R: EuclideanDomain> Strategy<R> for RowHermite {
    fn prepare(&mut self, e: &mut Eliminator<R>) {
        e.subrun(RowEchelon::new());
        e.worker.restart_pass();
    }

    fn should_iterate(&self, e: &Eliminator<R>) -> bool {
        self.row < e.nrows
    }

    fn step(&mut self, e: &mut Eliminator<R>) {
        // rows are in echelon order, so the first empty row ends the pass
        let Some((j0, a0)) = e.worker.head(self.row).map(|(c, v)| (c, v.clone())) else {
            e.exit();
            return;
        };

        for i in 0..self.row {
            let Some(a) = e.worker.entry(i, j0).cloned() else {
                continue;
            };
            let (q, _) = e.ring.quot_rem(&a, &a0);
            e.apply(ElementaryOp::AddRow {
                from: self.row,
                to: i,
                factor: e.ring.neg(&q),
            });
        }

        self.row += 1;
    }
}

/// Column Hermite normal form, realized by running [RowHermite] on the
/// transpose.
pub(crate) struct ColHermite;

impl<R: EuclideanDomain> Strategy<R> for ColHermite {
    fn prepare(&mut self, e: &mut Eliminator<R>) {
        e.subrun_transposed(RowHermite::new());
        e.exit();
    }

    fn step(&mut self, _e: &mut Eliminator<R>) {
        unreachable!("column hermite is realized entirely by a transposed subrun");
    }
}
