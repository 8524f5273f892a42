//! Smith normal form elimination.

use super::driver::{Eliminator, Strategy};
use super::echelon::RowEchelon;
use super::ops::ElementaryOp;
use crate::domains::EuclideanDomain;
use crate::matrix::Matrix;

/// Drives the matrix to a strict diagonal: entry `k` sits at `(k, k)`, with
/// nothing else nonzero. Works by alternating row and column echelon passes;
/// each pass either finishes the job or strictly reduces pivot degrees, so
/// the alternation terminates.
pub(crate) struct Diagonalize;

impl<R: EuclideanDomain> Strategy<R> for Diagonalize {
    fn prepare(&mut self, e: &mut Eliminator<R>) {
        e.subrun(RowEchelon::new());
    }

    fn step(&mut self, e: &mut Eliminator<R>) {
        if is_strict_diagonal(e) {
            e.exit();
            return;
        }
        e.subrun_transposed(RowEchelon::new());
        if is_strict_diagonal(e) {
            e.exit();
            return;
        }
        e.subrun(RowEchelon::new());
    }
}

/// Whether the snapshot is exactly `{(k, k, d_k)}`: both row and column
/// compaction must have happened, which is what the Smith pivot loop relies
/// on when it emits paired row/column operations with equal indices.
fn is_strict_diagonal<R: EuclideanDomain>(e: &Eliminator<R>) -> bool {
    e.worker
        .snapshot()
        .iter()
        .enumerate()
        .all(|(k, (r, c, _))| *r == k as u32 && *c == k as u32)
}

/// Smith normal form: after diagonalization, repeatedly select the remaining
/// diagonal entry of least degree, fix up divisibility against every other
/// remaining entry with the diagonal gcd step, and swap the pivot into its
/// sorted position, so that `d_1 | d_2 | ... | d_k`.
///
/// The diagonal is maintained in a materialized vector; operations are
/// recorded in the log without touching the row store, and the store is
/// rebuilt from the vector when the run finishes.
pub(crate) struct Smith<R: EuclideanDomain> {
    index: usize,
    entries: Vec<R::Element>,
}

impl<R: EuclideanDomain> Smith<R> {
    pub(crate) fn new() -> Smith<R> {
        Smith {
            index: 0,
            entries: vec![],
        }
    }

    /// Replace the diagonal pair `(a, b) = (entries[i], entries[j])` with
    /// `(gcd(a, b), lcm(a, b))` (up to sign) through a fixed five-operation
    /// sequence, keeping the matrix diagonal.
    fn diagonal_gcd(&mut self, e: &mut Eliminator<R>, i: usize, j: usize) {
        let a = self.entries[i].clone();
        let b = self.entries[j].clone();
        let ring = e.ring.clone();

        // d = gcd(a, b) = p*a + q*b,  m = -a*b/d = lcm(a, b) up to sign
        let (d, p, q) = ring.extended_gcd(&a, &b);
        let m = ring.neg(&exact_div(&ring, &ring.mul(&a, &b), &d));
        let aq = exact_div(&ring, &a, &d);
        let bq = exact_div(&ring, &b, &d);

        self.entries[i] = d;
        self.entries[j] = m;

        let (i, j) = (i as u32, j as u32);
        e.record(ElementaryOp::AddRow { from: i, to: j, factor: p }); // [a, 0; pa, b]
        e.record(ElementaryOp::AddCol { from: j, to: i, factor: q }); // [a, 0;  d, b]
        e.record(ElementaryOp::AddRow {
            from: j,
            to: i,
            factor: ring.neg(&aq),
        }); // [0, m;  d, b]
        e.record(ElementaryOp::AddCol {
            from: i,
            to: j,
            factor: ring.neg(&bq),
        }); // [0, m;  d, 0]
        e.record(ElementaryOp::SwapRows(i, j)); // [d, 0;  0, m]

        if e.debug() {
            e.expect_shadow(&diag_matrix(&ring, e.nrows, e.ncols, &self.entries));
        }
        log::debug!("diagonal gcd at ({0}, {0}), ({1}, {1})", i, j);
    }
}

impl<R: EuclideanDomain> Strategy<R> for Smith<R> {
    fn prepare(&mut self, e: &mut Eliminator<R>) {
        e.subrun(Diagonalize);

        let comps = e.worker.snapshot();
        for (k, (r, c, _)) in comps.iter().enumerate() {
            if *r != k as u32 || *c != k as u32 {
                panic!("diagonalization left an entry at ({}, {})", r, c);
            }
        }
        self.entries = comps.into_iter().map(|(_, _, v)| v).collect();
    }

    fn should_iterate(&self, _e: &Eliminator<R>) -> bool {
        self.index < self.entries.len()
    }

    fn step(&mut self, e: &mut Eliminator<R>) {
        let k = (self.index..self.entries.len())
            .min_by_key(|&k| (e.ring.degree(&self.entries[k]), k))
            .unwrap();

        let mut a0 = self.entries[k].clone();
        let u = e.ring.normalizing_unit(&a0);
        if !e.ring.is_one(&u) {
            a0 = e.ring.mul(&a0, &u);
            self.entries[k] = a0.clone();
            e.record(ElementaryOp::MulRow {
                row: k as u32,
                factor: u,
            });
            if e.debug() {
                e.expect_shadow(&diag_matrix(&e.ring, e.nrows, e.ncols, &self.entries));
            }
        }

        if !e.ring.is_one(&a0) {
            let mut again = false;
            for j in self.index..self.entries.len() {
                if j == k {
                    continue;
                }
                // the pivot entry may shrink as gcd steps fire, so reread it
                let pivot = self.entries[k].clone();
                if R::is_zero(&e.ring.rem(&self.entries[j], &pivot)) {
                    continue;
                }
                self.diagonal_gcd(e, k, j);
                again = true;
            }
            if again {
                // divisibility changed the diagonal; reselect the pivot
                return;
            }
        }

        if k != self.index {
            self.entries.swap(k, self.index);
            e.record(ElementaryOp::SwapRows(k as u32, self.index as u32));
            e.record(ElementaryOp::SwapCols(k as u32, self.index as u32));
            if e.debug() {
                e.expect_shadow(&diag_matrix(&e.ring, e.nrows, e.ncols, &self.entries));
            }
            log::debug!("swap diagonal ({0}, {0}) and ({1}, {1})", k, self.index);
        }

        self.index += 1;
    }

    fn finish(&mut self, e: &mut Eliminator<R>) {
        let components = self
            .entries
            .iter()
            .enumerate()
            .map(|(k, v)| (k as u32, k as u32, v.clone()))
            .collect();
        e.worker = super::worker::RowWorker::new_internal(
            e.ring.clone(),
            e.nrows,
            e.ncols,
            components,
            true,
        );
    }
}

fn exact_div<R: EuclideanDomain>(ring: &R, a: &R::Element, b: &R::Element) -> R::Element {
    ring.try_div(a, b).unwrap_or_else(|| {
        panic!(
            "ring contract violation: {:?} does not divide {:?}",
            b, a
        )
    })
}

fn diag_matrix<R: EuclideanDomain>(
    ring: &R,
    nrows: u32,
    ncols: u32,
    entries: &[R::Element],
) -> Matrix<R> {
    let mut m = Matrix::new(nrows, ncols, ring.clone());
    for (k, v) in entries.iter().enumerate() {
        m[(k as u32, k as u32)] = v.clone();
    }
    m
}
