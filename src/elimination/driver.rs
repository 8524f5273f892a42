//! The elimination state machine.
//!
//! An [Eliminator] owns the sparse row store and the operation log for the
//! duration of one elimination run. The per-form logic is supplied by a
//! [Strategy]: the driver loops the strategy's `step` until it signals exit,
//! and offers prerequisite sub-runs against the same store, including
//! transposed sub-runs, which realize every column-space algorithm through
//! its row-space implementation.

use ahash::{HashSet, HashSetExt};

use super::ops::ElementaryOp;
use super::worker::RowWorker;
use super::{ElimError, EliminationOptions, EliminationResult};
use crate::domains::EuclideanDomain;
use crate::matrix::Matrix;

/// The per-form logic plugged into an [Eliminator].
pub(crate) trait Strategy<R: EuclideanDomain> {
    /// Run prerequisite stages (for example echelon before Hermite).
    fn prepare(&mut self, _e: &mut Eliminator<R>) {}

    /// Whether the iteration loop should keep going; checked before every
    /// step in addition to the exit flag.
    fn should_iterate(&self, _e: &Eliminator<R>) -> bool {
        true
    }

    /// Perform one pivot selection and the operations it implies.
    fn step(&mut self, e: &mut Eliminator<R>);

    /// Flush any state held by the strategy back into the row store.
    fn finish(&mut self, _e: &mut Eliminator<R>) {}
}

/// One elimination run: the row store, the operation log, and the run
/// options, exclusively owned until the canonical form is reached.
pub(crate) struct Eliminator<R: EuclideanDomain> {
    pub(crate) ring: R,
    pub(crate) nrows: u32,
    pub(crate) ncols: u32,
    pub(crate) worker: RowWorker<R>,
    pub(crate) ops: Vec<ElementaryOp<R>>,
    track: bool,
    /// In debug mode, a dense copy of the matrix that every logged operation
    /// is replayed onto, asserted against the live sparse state.
    shadow: Option<Matrix<R>>,
    exited: bool,
}

impl<R: EuclideanDomain> Eliminator<R> {
    pub(crate) fn new(
        ring: R,
        nrows: u32,
        ncols: u32,
        components: Vec<(u32, u32, R::Element)>,
        options: EliminationOptions,
    ) -> Result<Eliminator<R>, ElimError> {
        let worker = RowWorker::from_components(ring.clone(), nrows, ncols, components, true)?;
        let shadow = options.debug.then(|| worker.to_matrix());
        Ok(Eliminator {
            ring,
            nrows,
            ncols,
            worker,
            ops: vec![],
            track: options.track_transforms,
            shadow,
            exited: false,
        })
    }

    fn from_validated(
        ring: R,
        nrows: u32,
        ncols: u32,
        components: Vec<(u32, u32, R::Element)>,
        debug: bool,
    ) -> Eliminator<R> {
        let worker = RowWorker::new_internal(ring.clone(), nrows, ncols, components, true);
        let shadow = debug.then(|| worker.to_matrix());
        Eliminator {
            ring,
            nrows,
            ncols,
            worker,
            ops: vec![],
            track: false,
            shadow,
            exited: false,
        }
    }

    /// Signal that the current (sub-)run has reached its form.
    pub(crate) fn exit(&mut self) {
        self.exited = true;
    }

    /// Whether debug replay is active.
    pub(crate) fn debug(&self) -> bool {
        self.shadow.is_some()
    }

    pub(crate) fn run<S: Strategy<R>>(&mut self, strategy: &mut S) {
        strategy.prepare(self);
        while !self.exited && strategy.should_iterate(self) {
            strategy.step(self);
        }
        strategy.finish(self);
        self.exited = false;
    }

    /// Run a prerequisite strategy against the same row store.
    pub(crate) fn subrun<S: Strategy<R>>(&mut self, mut strategy: S) {
        self.run(&mut strategy);
    }

    /// Run a row strategy against the transposed matrix, then transpose the
    /// produced operations back into this run's log.
    pub(crate) fn subrun_transposed<S: Strategy<R>>(&mut self, mut strategy: S) {
        let transposed = self
            .worker
            .snapshot()
            .into_iter()
            .map(|(r, c, v)| (c, r, v))
            .collect();
        let mut sub = Eliminator::from_validated(
            self.ring.clone(),
            self.ncols,
            self.nrows,
            transposed,
            self.shadow.is_some(),
        );
        sub.run(&mut strategy);

        let back = sub
            .worker
            .snapshot()
            .into_iter()
            .map(|(r, c, v)| (c, r, v))
            .collect();
        self.worker = RowWorker::new_internal(self.ring.clone(), self.nrows, self.ncols, back, true);

        for op in sub.ops {
            let op = op.transposed();
            if let Some(shadow) = &mut self.shadow {
                op.apply_to(shadow);
            }
            self.ops.push(op);
        }
        self.expect_shadow_matches_worker();
    }

    /// Apply an operation through the row store and log it. Identity
    /// operations (zero-factor additions, unit-one multiplications,
    /// self-swaps) are dropped entirely.
    pub(crate) fn apply(&mut self, op: ElementaryOp<R>) {
        if op.is_identity(&self.ring) {
            return;
        }
        log::trace!("apply {:?}", op);
        self.worker.apply_op(&op);
        if let Some(shadow) = &mut self.shadow {
            op.apply_to(shadow);
        }
        self.expect_shadow_matches_worker();
        self.ops.push(op);
    }

    /// Log an operation without routing it through the row store, for
    /// strategies that maintain their own materialized state (the Smith
    /// diagonal). In debug mode the operation is still replayed onto the
    /// shadow matrix; the strategy asserts consistency at its own
    /// checkpoints via [Eliminator::expect_shadow].
    pub(crate) fn record(&mut self, op: ElementaryOp<R>) {
        if op.is_identity(&self.ring) {
            return;
        }
        log::trace!("record {:?}", op);
        if let Some(shadow) = &mut self.shadow {
            op.apply_to(shadow);
        }
        self.ops.push(op);
    }

    /// In debug mode, assert that the replayed shadow matrix equals the
    /// expected state.
    pub(crate) fn expect_shadow(&self, expected: &Matrix<R>) {
        if let Some(shadow) = &self.shadow {
            if shadow != expected {
                panic!(
                    "debug replay diverged from live state after {} operations",
                    self.ops.len()
                );
            }
        }
    }

    fn expect_shadow_matches_worker(&self) {
        if self.shadow.is_some() {
            let live = self.worker.to_matrix();
            self.expect_shadow(&live);
        }
    }

    /// Materialize the final state, count the rank, and reconstruct the
    /// transformation matrices from the operation log if requested.
    pub(crate) fn finalize(self) -> EliminationResult<R> {
        let result = self.worker.to_matrix();

        // every canonical form has exactly `rank` nonzero rows or exactly
        // `rank` nonzero columns, whichever space it reduced; the other count
        // can only be larger
        let mut rows = HashSet::new();
        let mut cols = HashSet::new();
        for (r, c, _) in self.worker.snapshot() {
            rows.insert(r);
            cols.insert(c);
        }
        let rank = rows.len().min(cols.len());

        let (left, right, left_inverse, right_inverse) = if self.track {
            let ring = &self.ring;
            let row_ops: Vec<&ElementaryOp<R>> =
                self.ops.iter().filter(|o| o.is_row_op()).collect();
            let col_ops: Vec<&ElementaryOp<R>> =
                self.ops.iter().filter(|o| !o.is_row_op()).collect();

            // applying the row ops in log order to the identity accumulates
            // the left transformation; the right transformation is built the
            // same way on the transpose
            let left = Self::replay(ring, self.nrows, row_ops.iter().map(|o| (*o).clone()));
            let left_inverse = Self::replay(
                ring,
                self.nrows,
                row_ops.iter().rev().map(|o| o.inverse(ring)),
            );
            let right = Self::replay(
                ring,
                self.ncols,
                col_ops.iter().map(|o| (*o).clone().transposed()),
            )
            .into_transposed();
            let right_inverse = Self::replay(
                ring,
                self.ncols,
                col_ops.iter().rev().map(|o| o.inverse(ring).transposed()),
            )
            .into_transposed();

            (Some(left), Some(right), Some(left_inverse), Some(right_inverse))
        } else {
            (None, None, None, None)
        };

        EliminationResult {
            result,
            rank,
            ops: self.ops,
            left,
            right,
            left_inverse,
            right_inverse,
        }
    }

    fn replay(ring: &R, n: u32, ops: impl Iterator<Item = ElementaryOp<R>>) -> Matrix<R> {
        let mut w = RowWorker::identity(ring.clone(), n);
        for op in ops {
            w.apply_op(&op);
        }
        w.to_matrix()
    }
}
