//! The sparse row store driving an elimination.
//!
//! Each row is an owned sequence of `(column, value)` cells, strictly
//! increasing in column and free of zero values. Rows live in one of two
//! generations: `working` rows are still being eliminated, `finished` rows
//! have reached their final state for the current pass and are never touched
//! again. Adding one row to another is a linear-time merge of the two sorted
//! cell sequences, so the cost of an elimination step is proportional to the
//! number of nonzeros involved instead of the full matrix width.
//!
//! An optional head-position index maps a column to the set of working rows
//! whose leading nonzero currently sits in that column, turning the pivot
//! search "which rows start at column j" into a set lookup. The index is kept
//! consistent on every mutation.

use ahash::{HashSet, HashSetExt};
use smallvec::SmallVec;

use super::ops::ElementaryOp;
use super::ElimError;
use crate::domains::integer::Integer;
use crate::domains::{EuclideanDomain, Ring};
use crate::matrix::Matrix;

type Cell<E> = (u32, E);
type Row<E> = Vec<Cell<E>>;

pub(crate) struct RowWorker<R: Ring> {
    ring: R,
    nrows: u32,
    ncols: u32,
    /// Rows still being eliminated; `None` means the row has no nonzero
    /// cells or has moved to `finished`.
    working: Vec<Option<Row<R::Element>>>,
    /// Rows finalized for this pass.
    finished: Vec<Option<Row<R::Element>>>,
    /// For each column, the working rows whose head sits there.
    heads: Option<Vec<HashSet<u32>>>,
}

impl<R: Ring> RowWorker<R> {
    /// Build a worker from sparse components, validating coordinates.
    pub(crate) fn from_components(
        ring: R,
        nrows: u32,
        ncols: u32,
        components: Vec<(u32, u32, R::Element)>,
        track_heads: bool,
    ) -> Result<RowWorker<R>, ElimError> {
        for &(r, c, _) in &components {
            if r >= nrows || c >= ncols {
                return Err(ElimError::OutOfRange { row: r, col: c });
            }
        }

        let mut worker = Self::new_internal(ring, nrows, ncols, components, track_heads);

        for (i, row) in worker.working.iter().enumerate() {
            if let Some(row) = row {
                for w in row.windows(2) {
                    if w[0].0 == w[1].0 {
                        return Err(ElimError::DuplicateEntry {
                            row: i as u32,
                            col: w[0].0,
                        });
                    }
                }
            }
        }

        Ok(worker)
    }

    /// Build a worker from components that are already known to be in range
    /// and duplicate-free.
    pub(crate) fn new_internal(
        ring: R,
        nrows: u32,
        ncols: u32,
        components: Vec<(u32, u32, R::Element)>,
        track_heads: bool,
    ) -> RowWorker<R> {
        let mut working: Vec<Option<Row<R::Element>>> = vec![None; nrows as usize];
        for (r, c, v) in components {
            if R::is_zero(&v) {
                continue;
            }
            working[r as usize].get_or_insert_with(Vec::new).push((c, v));
        }
        for row in working.iter_mut().flatten() {
            row.sort_unstable_by_key(|&(c, _)| c);
        }

        let mut worker = RowWorker {
            ring,
            nrows,
            ncols,
            working,
            finished: vec![None; nrows as usize],
            heads: None,
        };
        if track_heads {
            worker.rebuild_heads();
        }
        worker
    }

    /// The identity worker, used to accumulate transformation matrices.
    pub(crate) fn identity(ring: R, n: u32) -> RowWorker<R> {
        let one = ring.one();
        let components = (0..n).map(|i| (i, i, one.clone())).collect();
        Self::new_internal(ring, n, n, components, false)
    }

    /// The leading cell of a working row.
    pub(crate) fn head(&self, row: u32) -> Option<(u32, &R::Element)> {
        self.working[row as usize]
            .as_ref()
            .map(|r| (r[0].0, &r[0].1))
    }

    /// The value of a working row at a column, if nonzero.
    pub(crate) fn entry(&self, row: u32, col: u32) -> Option<&R::Element> {
        let row = self.working[row as usize].as_ref()?;
        row.binary_search_by_key(&col, |&(c, _)| c)
            .ok()
            .map(|idx| &row[idx].1)
    }

    /// The working rows whose head sits at `col`, in increasing row order.
    /// Requires head tracking.
    pub(crate) fn rows_with_head_at(&self, col: u32) -> SmallVec<[u32; 8]> {
        let heads = self.heads.as_ref().expect("head tracking is not enabled");
        let mut rows: SmallVec<[u32; 8]> = heads[col as usize].iter().copied().collect();
        rows.sort_unstable();
        rows
    }

    /// Apply an elementary row operation. Column operations are outside the
    /// worker's domain and indicate a broken eliminator invariant.
    pub(crate) fn apply_op(&mut self, op: &ElementaryOp<R>) {
        match op {
            ElementaryOp::AddRow { from, to, factor } => self.add_row(*from, *to, factor),
            ElementaryOp::MulRow { row, factor } => self.mul_row(*row, factor),
            ElementaryOp::SwapRows(i, j) => self.swap_rows(*i, *j),
            _ => panic!("column operation applied to a row worker: {:?}", op),
        }
    }

    /// `row[to] += factor * row[from]` as a sorted sparse merge.
    pub(crate) fn add_row(&mut self, from: u32, to: u32, factor: &R::Element) {
        assert_ne!(from, to, "attempt to add row {} to itself", from);

        if self.working[from as usize].is_none() {
            panic!("attempt to add from empty row {}", from);
        }
        self.remove_head(to);
        let target = self.working[to as usize]
            .take()
            .unwrap_or_else(|| panic!("attempt to add into empty row {}", to));
        let source = self.working[from as usize].as_ref().unwrap();

        let merged = Self::merge_rows(&self.ring, source, target, factor);
        if !merged.is_empty() {
            self.working[to as usize] = Some(merged);
        }
        self.insert_head(to);
    }

    fn merge_rows(
        ring: &R,
        source: &[Cell<R::Element>],
        target: Row<R::Element>,
        factor: &R::Element,
    ) -> Row<R::Element> {
        let mut out = Vec::with_capacity(source.len() + target.len());
        let mut t = target.into_iter();
        let mut pending = t.next();

        for (sc, sv) in source {
            // flush target cells left of the source cell
            while let Some((tc, tv)) = pending.take() {
                if tc < *sc {
                    out.push((tc, tv));
                    pending = t.next();
                } else {
                    pending = Some((tc, tv));
                    break;
                }
            }

            match pending.take() {
                Some((tc, mut tv)) if tc == *sc => {
                    ring.add_mul_assign(&mut tv, factor, sv);
                    if !R::is_zero(&tv) {
                        out.push((tc, tv));
                    }
                    pending = t.next();
                }
                other => {
                    pending = other;
                    let v = ring.mul(factor, sv);
                    if !R::is_zero(&v) {
                        out.push((*sc, v));
                    }
                }
            }
        }

        if let Some(cell) = pending {
            out.push(cell);
        }
        out.extend(t);
        out
    }

    /// Multiply every cell of a row by a nonzero scalar. Clearing a row via a
    /// zero multiplier would silently lose its structure, so that is a fatal
    /// misuse.
    pub(crate) fn mul_row(&mut self, row: u32, factor: &R::Element) {
        if R::is_zero(factor) {
            panic!("attempt to multiply row {} by zero", row);
        }
        if let Some(cells) = &mut self.working[row as usize] {
            for (_, v) in cells {
                self.ring.mul_assign(v, factor);
            }
        }
    }

    /// Exchange two rows in O(1).
    pub(crate) fn swap_rows(&mut self, i: u32, j: u32) {
        if i == j {
            return;
        }
        self.remove_head(i);
        self.remove_head(j);
        self.working.swap(i as usize, j as usize);
        self.insert_head(i);
        self.insert_head(j);
    }

    /// Move a row to the finished generation; it will not be mutated again
    /// this pass.
    pub(crate) fn finish(&mut self, row: u32) {
        self.remove_head(row);
        debug_assert!(self.finished[row as usize].is_none());
        self.finished[row as usize] = self.working[row as usize].take();
    }

    /// Whether every row has been finished or eliminated.
    pub(crate) fn is_complete(&self) -> bool {
        self.working.iter().all(Option::is_none)
    }

    /// Move all finished rows back into the working generation, enabling a
    /// follow-up pass without rebuilding the sparse structure.
    pub(crate) fn restart_pass(&mut self) {
        for (w, f) in self.working.iter_mut().zip(&mut self.finished) {
            debug_assert!(w.is_none() || f.is_none());
            if w.is_none() {
                *w = f.take();
            }
        }
        if self.heads.is_some() {
            self.rebuild_heads();
        }
    }

    /// Flatten both generations into `(row, column, value)` components in
    /// row-major order.
    pub(crate) fn snapshot(&self) -> Vec<(u32, u32, R::Element)> {
        let mut comps = vec![];
        for i in 0..self.nrows as usize {
            debug_assert!(self.working[i].is_none() || self.finished[i].is_none());
            let row = self.finished[i].as_ref().or(self.working[i].as_ref());
            if let Some(row) = row {
                comps.extend(row.iter().map(|(c, v)| (i as u32, *c, v.clone())));
            }
        }
        comps
    }

    /// Materialize the current state as a dense matrix.
    pub(crate) fn to_matrix(&self) -> Matrix<R> {
        let mut m = Matrix::new(self.nrows, self.ncols, self.ring.clone());
        for (r, c, v) in self.snapshot() {
            m[(r, c)] = v;
        }
        m
    }

    fn rebuild_heads(&mut self) {
        let mut heads = vec![HashSet::new(); self.ncols as usize];
        for (i, row) in self.working.iter().enumerate() {
            if let Some(row) = row {
                heads[row[0].0 as usize].insert(i as u32);
            }
        }
        self.heads = Some(heads);
    }

    fn remove_head(&mut self, row: u32) {
        if let Some(heads) = &mut self.heads {
            if let Some(cells) = &self.working[row as usize] {
                heads[cells[0].0 as usize].remove(&row);
            }
        }
    }

    fn insert_head(&mut self, row: u32) {
        if let Some(heads) = &mut self.heads {
            if let Some(cells) = &self.working[row as usize] {
                heads[cells[0].0 as usize].insert(row);
            }
        }
    }
}

impl<R: EuclideanDomain> RowWorker<R> {
    /// The summed degree of a working row's values, used as a sparsity
    /// heuristic when breaking pivot ties.
    pub(crate) fn weight(&self, row: u32) -> Integer {
        let mut total = Integer::zero();
        if let Some(cells) = &self.working[row as usize] {
            for (_, v) in cells {
                total = &total + &self.ring.degree(v);
            }
        }
        total
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::domains::integer::{Integer, Z};

    fn worker(comps: Vec<(u32, u32, i64)>, track: bool) -> RowWorker<Z> {
        RowWorker::from_components(
            Z,
            3,
            3,
            comps
                .into_iter()
                .map(|(r, c, v)| (r, c, Integer::from(v)))
                .collect(),
            track,
        )
        .unwrap()
    }

    #[test]
    fn duplicate_components_are_rejected() {
        let r = RowWorker::from_components(
            Z,
            2,
            2,
            vec![(0, 1, Integer::from(1)), (0, 1, Integer::from(2))],
            false,
        );
        assert_eq!(r.err(), Some(ElimError::DuplicateEntry { row: 0, col: 1 }));
    }

    #[test]
    fn out_of_range_components_are_rejected() {
        let r = RowWorker::from_components(Z, 2, 2, vec![(0, 7, Integer::from(1))], false);
        assert_eq!(r.err(), Some(ElimError::OutOfRange { row: 0, col: 7 }));
    }

    #[test]
    fn add_row_merges_and_cancels() {
        let mut w = worker(vec![(0, 0, 1), (0, 2, 3), (1, 0, -2), (1, 1, 5)], true);
        // row 1 += 2 * row 0: (0, -2+2), (1, 5), (2, 6)
        w.add_row(0, 1, &Integer::from(2));
        assert_eq!(w.head(1), Some((1, &Integer::from(5))));
        assert_eq!(w.entry(1, 2), Some(&Integer::from(6)));
        assert_eq!(w.entry(1, 0), None);
        // the head index moved from column 0 to column 1
        assert_eq!(w.rows_with_head_at(0).as_slice(), &[0]);
        assert_eq!(w.rows_with_head_at(1).as_slice(), &[1]);
    }

    #[test]
    fn add_row_can_empty_a_row() {
        let mut w = worker(vec![(0, 1, 4), (1, 1, 4)], true);
        w.add_row(0, 1, &Integer::from(-1));
        assert_eq!(w.head(1), None);
        assert!(w.rows_with_head_at(1).as_slice() == &[0]);
    }

    #[test]
    #[should_panic(expected = "add from empty row")]
    fn add_from_empty_row_is_fatal() {
        let mut w = worker(vec![(1, 0, 1)], false);
        w.add_row(0, 1, &Integer::from(1));
    }

    #[test]
    #[should_panic(expected = "multiply row 0 by zero")]
    fn mul_by_zero_is_fatal() {
        let mut w = worker(vec![(0, 0, 1)], false);
        w.mul_row(0, &Integer::from(0));
    }

    #[test]
    fn self_swap_is_a_no_op() {
        let mut w = worker(vec![(0, 0, 1), (1, 1, 2)], true);
        w.swap_rows(1, 1);
        assert_eq!(w.head(1), Some((1, &Integer::from(2))));
        assert_eq!(w.rows_with_head_at(1).as_slice(), &[1]);
    }

    #[test]
    fn swap_keeps_head_index_consistent() {
        let mut w = worker(vec![(0, 0, 1), (2, 1, 2)], true);
        w.swap_rows(0, 2);
        assert_eq!(w.rows_with_head_at(0).as_slice(), &[2]);
        assert_eq!(w.rows_with_head_at(1).as_slice(), &[0]);
    }

    #[test]
    fn finish_and_restart() {
        let mut w = worker(vec![(0, 0, 1), (1, 1, 2)], true);
        w.finish(0);
        assert!(!w.is_complete());
        assert!(w.head(0).is_none());
        assert!(w.rows_with_head_at(0).is_empty());
        w.finish(1);
        assert!(w.is_complete());

        // both rows survive in the snapshot
        assert_eq!(w.snapshot().len(), 2);

        w.restart_pass();
        assert_eq!(w.head(0), Some((0, &Integer::from(1))));
        assert_eq!(w.rows_with_head_at(1).as_slice(), &[1]);
    }

    #[test]
    fn weight_sums_degrees() {
        let w = worker(vec![(0, 0, -3), (0, 1, 2), (1, 2, 7)], false);
        assert_eq!(w.weight(0), Integer::from(5));
        assert_eq!(w.weight(1), Integer::from(7));
        assert_eq!(w.weight(2), Integer::from(0));
    }
}
