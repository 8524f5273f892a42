use rand::rngs::StdRng;
use rand::SeedableRng;

use smithy::domains::gaussian::{GaussianInteger, ZI};
use smithy::domains::integer::{Integer, Z};
use smithy::domains::rational::{Rational, Q};
use smithy::domains::univariate::UnivariatePolynomialRing;
use smithy::domains::{EuclideanDomain, Ring};
use smithy::elimination::{
    eliminate, eliminate_components, ElimError, EliminationOptions, EliminationResult, Form,
};
use smithy::matrix::Matrix;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn m(rows: Vec<Vec<i64>>) -> Matrix<Z> {
    Matrix::from_nested_vec(
        rows.into_iter()
            .map(|r| r.into_iter().map(Integer::from).collect())
            .collect(),
        Z,
    )
    .unwrap()
}

fn assert_transforms<R: Ring>(original: &Matrix<R>, e: &EliminationResult<R>) {
    let left = e.left.as_ref().unwrap();
    let right = e.right.as_ref().unwrap();
    assert_eq!(&(&(left * original) * right), &e.result);

    // the inverses undo the transformations
    let left_inverse = e.left_inverse.as_ref().unwrap();
    let right_inverse = e.right_inverse.as_ref().unwrap();
    let n = left.nrows() as u32;
    let k = right.nrows() as u32;
    assert_eq!(
        &(left_inverse * left),
        &Matrix::identity(n, original.field().clone())
    );
    assert_eq!(
        &(right * right_inverse),
        &Matrix::identity(k, original.field().clone())
    );
}

fn diagonal_of<R: Ring>(m: &Matrix<R>) -> Vec<R::Element> {
    (0..m.nrows().min(m.ncols()) as u32)
        .map(|i| m[(i, i)].clone())
        .filter(|v| !R::is_zero(v))
        .collect()
}

#[test]
fn smith_diag_1_2_12() {
    init_logging();
    // built as L * diag(1, 2, 12) * U with unimodular triangular L, U
    let a = m(vec![vec![1, 1, 1], vec![1, 3, 3], vec![1, 3, 15]]);
    let e = eliminate(&a, Form::Smith, EliminationOptions::tracking()).unwrap();

    assert_eq!(e.rank, 3);
    assert_eq!(
        diagonal_of(&e.result),
        vec![Integer::from(1), Integer::from(2), Integer::from(12)]
    );
    assert_transforms(&a, &e);

    // the transformations are unimodular over Z
    assert_eq!(e.transformation_determinant().abs(), Integer::from(1));
    assert_eq!(e.determinant(), Some(Integer::from(24)));
}

#[test]
fn smith_of_rank_deficient_matrix() {
    init_logging();
    let a = m(vec![vec![1, -2, -6], vec![2, 4, 12], vec![1, -4, -12]]);
    let e = eliminate(&a, Form::Smith, EliminationOptions::tracking()).unwrap();

    // rows 2 and 3 are dependent: rank 2, invariant factors 1, 2
    assert_eq!(e.rank, 2);
    assert_eq!(
        diagonal_of(&e.result),
        vec![Integer::from(1), Integer::from(2)]
    );
    assert!(e.result.is_diagonal());
    assert_transforms(&a, &e);
    assert_eq!(e.determinant(), Some(Integer::from(0)));
}

#[test]
fn smith_divisibility_chain() {
    init_logging();
    let a = m(vec![
        vec![6, 0, 0, 0],
        vec![0, 10, 0, 0],
        vec![0, 0, 15, 0],
        vec![0, 0, 0, 7],
    ]);
    let e = eliminate(&a, Form::Smith, EliminationOptions::new()).unwrap();

    let d = diagonal_of(&e.result);
    assert_eq!(d.len(), 4);
    for w in d.windows(2) {
        assert!(
            Z.try_div(&w[1], &w[0]).is_some(),
            "{} does not divide {}",
            w[0],
            w[1]
        );
    }
    // the product of invariant factors is |det| = 6*10*15*7
    let prod = d.iter().fold(Integer::from(1), |acc, v| &acc * v);
    assert_eq!(prod, Integer::from(6 * 10 * 15 * 7));
}

#[test]
fn row_echelon_shape_and_rank() {
    init_logging();
    let a = m(vec![
        vec![0, 2, 4, 2],
        vec![1, 1, 1, 1],
        vec![1, 3, 5, 3],
        vec![2, 2, 2, 2],
    ]);
    let e = eliminate(&a, Form::RowEchelon, EliminationOptions::tracking()).unwrap();

    assert_eq!(e.rank, 2);
    assert_transforms(&a, &e);

    // nonzero rows come first with strictly increasing leading columns
    let mut last_col = None;
    for i in 0..e.result.nrows() as u32 {
        let lead = (0..e.result.ncols() as u32)
            .find(|&j| !e.result[(i, j)].is_zero());
        match (lead, i as usize) {
            (Some(c), k) => {
                assert!(k < e.rank, "nonzero row after a zero row");
                assert!(last_col.is_none() || last_col.unwrap() < c);
                last_col = Some(c);
            }
            (None, k) => assert!(k >= e.rank),
        }
    }
}

#[test]
fn rank_agrees_across_forms() {
    init_logging();
    let a = m(vec![
        vec![2, 4, -2, 0],
        vec![1, 2, -1, 3],
        vec![0, 0, 0, 6],
    ]);
    let mut ranks = vec![];
    for form in [
        Form::RowEchelon,
        Form::ColEchelon,
        Form::RowHermite,
        Form::ColHermite,
        Form::Smith,
    ] {
        let e = eliminate(&a, form, EliminationOptions::new()).unwrap();
        ranks.push(e.rank);
    }
    assert_eq!(ranks, vec![2; 5]);
}

#[test]
fn hermite_reduces_above_pivots() {
    init_logging();
    let a = m(vec![vec![2, 4], vec![3, 5]]);
    let e = eliminate(&a, Form::RowHermite, EliminationOptions::tracking()).unwrap();

    assert_eq!(e.result, m(vec![vec![1, 1], vec![0, 2]]));
    assert_transforms(&a, &e);
}

#[test]
fn col_hermite_is_transposed_row_hermite() {
    init_logging();
    let a = m(vec![vec![2, 3], vec![4, 5]]);
    let col = eliminate(&a, Form::ColHermite, EliminationOptions::tracking()).unwrap();
    let row = eliminate(&a.transpose(), Form::RowHermite, EliminationOptions::new()).unwrap();

    assert_eq!(col.result, row.result.transpose());
    assert_transforms(&a, &col);
}

#[test]
fn idempotence_with_empty_log() {
    init_logging();
    let canonical = m(vec![vec![1, 0, 0], vec![0, 2, 0], vec![0, 0, 12]]);

    for form in [Form::RowEchelon, Form::RowHermite, Form::Smith] {
        let e = eliminate(&canonical, form, EliminationOptions::new()).unwrap();
        assert_eq!(e.result, canonical, "{:?} changed a canonical matrix", form);
        assert!(e.ops.is_empty(), "{:?} logged {:?}", form, e.ops);
    }
}

#[test]
fn operation_log_round_trips() {
    init_logging();
    let a = m(vec![vec![2, 4, 4], vec![-6, 6, 12], vec![10, -4, -16]]);
    let e = eliminate(&a, Form::Smith, EliminationOptions::tracking()).unwrap();

    // forward replay reproduces the canonical form
    let mut forward = a.clone();
    for op in &e.ops {
        op.apply_to(&mut forward);
    }
    assert_eq!(forward, e.result);

    // inverse replay in reverse order reproduces the original
    let mut backward = e.result.clone();
    for op in e.ops.iter().rev() {
        op.inverse(&Z).apply_to(&mut backward);
    }
    assert_eq!(backward, a);
}

#[test]
fn log_contains_no_identity_operations() {
    init_logging();
    let a = m(vec![vec![0, 3, 1], vec![2, 0, 0], vec![2, 3, 1]]);
    for form in [Form::RowEchelon, Form::RowHermite, Form::Smith] {
        let e = eliminate(&a, form, EliminationOptions::new()).unwrap();
        assert!(e.ops.iter().all(|op| !op.is_identity(&Z)));
    }
}

#[test]
fn zero_factor_add_is_identity() {
    init_logging();
    let op = smithy::elimination::ElementaryOp::AddRow {
        from: 0,
        to: 1,
        factor: Integer::from(0),
    };
    assert!(op.is_identity(&Z));

    let a = m(vec![vec![1, 2], vec![3, 4]]);
    let mut b = a.clone();
    op.apply_to(&mut b);
    assert_eq!(a, b);
}

#[test]
fn self_swap_is_identity() {
    init_logging();
    let op: smithy::elimination::ElementaryOp<Z> = smithy::elimination::ElementaryOp::SwapRows(1, 1);
    assert!(op.is_identity(&Z));

    let a = m(vec![vec![1, 2], vec![3, 4]]);
    let mut b = a.clone();
    op.apply_to(&mut b);
    assert_eq!(a, b);
}

#[test]
fn debug_replay_matches_plain_run() {
    init_logging();
    let a = m(vec![vec![2, 4, 4], vec![-6, 6, 12], vec![10, -4, -16]]);
    for form in [
        Form::RowEchelon,
        Form::ColEchelon,
        Form::RowHermite,
        Form::ColHermite,
        Form::Smith,
    ] {
        let plain = eliminate(&a, form, EliminationOptions::tracking()).unwrap();
        let debugged =
            eliminate(&a, form, EliminationOptions::tracking().with_debug()).unwrap();
        assert_eq!(plain.result, debugged.result);
        assert_eq!(plain.ops, debugged.ops);
    }
}

#[test]
fn sparse_components_entry_point() {
    init_logging();
    let comps = vec![
        (0, 0, Integer::from(2)),
        (1, 1, Integer::from(6)),
        (2, 0, Integer::from(4)),
    ];
    let e = eliminate_components(Z, 3, 2, comps, Form::Smith, EliminationOptions::tracking())
        .unwrap();
    assert_eq!(e.rank, 2);
    assert_eq!(
        diagonal_of(&e.result),
        vec![Integer::from(2), Integer::from(6)]
    );
}

#[test]
fn duplicate_components_are_rejected() {
    let comps = vec![(0, 0, Integer::from(1)), (0, 0, Integer::from(2))];
    let err = eliminate_components(Z, 2, 2, comps, Form::Smith, EliminationOptions::new())
        .unwrap_err();
    assert_eq!(err, ElimError::DuplicateEntry { row: 0, col: 0 });
}

#[test]
fn out_of_range_components_are_rejected() {
    let comps = vec![(9, 0, Integer::from(1))];
    let err = eliminate_components(Z, 2, 2, comps, Form::RowEchelon, EliminationOptions::new())
        .unwrap_err();
    assert_eq!(err, ElimError::OutOfRange { row: 9, col: 0 });
}

#[test]
fn empty_and_zero_matrices() {
    init_logging();
    let zero = Matrix::new(3, 2, Z);
    for form in [Form::RowEchelon, Form::Smith] {
        let e = eliminate(&zero, form, EliminationOptions::tracking()).unwrap();
        assert_eq!(e.rank, 0);
        assert!(e.result.is_zero());
        assert!(e.ops.is_empty());
        assert_transforms(&zero, &e);
    }

    let empty = Matrix::new(0, 0, Z);
    let e = eliminate(&empty, Form::Smith, EliminationOptions::tracking()).unwrap();
    assert_eq!(e.rank, 0);
}

#[test]
fn rational_matrices_reduce_to_unit_pivots() {
    init_logging();
    let a = Matrix::from_nested_vec(
        vec![
            vec![Rational::from((1, 2)), Rational::from((1, 3))],
            vec![Rational::from(2), Rational::from((4, 3))],
        ],
        Q,
    )
    .unwrap();

    let e = eliminate(&a, Form::Smith, EliminationOptions::tracking()).unwrap();
    // the rows are dependent: rank 1, and the field pivot normalizes to 1
    assert_eq!(e.rank, 1);
    assert_eq!(diagonal_of(&e.result), vec![Rational::from(1)]);
    assert_transforms(&a, &e);
}

#[test]
fn gaussian_integer_smith() {
    init_logging();
    let a = Matrix::from_nested_vec(
        vec![
            vec![GaussianInteger::from((1, 1)), GaussianInteger::from(0)],
            vec![GaussianInteger::from(0), GaussianInteger::from(2)],
        ],
        ZI,
    )
    .unwrap();

    let e = eliminate(&a, Form::Smith, EliminationOptions::tracking()).unwrap();
    assert_eq!(e.rank, 2);
    let d = diagonal_of(&e.result);
    // 1+i divides 2 = -i * (1+i)^2, so the diagonal stays (1+i, 2) up to units
    assert_eq!(ZI.degree(&d[0]), Integer::from(2));
    assert_eq!(ZI.degree(&d[1]), Integer::from(4));
    assert!(ZI.try_div(&d[1], &d[0]).is_some());
    assert!(ZI.is_normalized(&d[0]));
    assert_transforms(&a, &e);
}

#[test]
fn polynomial_smith() {
    init_logging();
    let ring = UnivariatePolynomialRing::new(Q);
    let x = ring.monomial(Rational::from(1), 1);
    let x_minus_1 = ring.polynomial(vec![Rational::from(-1), Rational::from(1)]);

    let a = Matrix::from_nested_vec(
        vec![
            vec![x.clone(), ring.zero()],
            vec![ring.zero(), x_minus_1.clone()],
        ],
        ring.clone(),
    )
    .unwrap();

    let e = eliminate(&a, Form::Smith, EliminationOptions::tracking()).unwrap();
    assert_eq!(e.rank, 2);
    let d = diagonal_of(&e.result);
    // gcd(x, x-1) = 1, so the invariant factors are 1 and x(x-1), monic
    assert!(ring.is_one(&d[0]));
    assert_eq!(d[1], ring.mul(&x, &x_minus_1));
    assert_transforms(&a, &e);
}

#[test]
fn randomized_transform_identity() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(7);

    for case in 0..20 {
        let (nrows, ncols): (u32, u32) = [(3, 3), (3, 5), (5, 3), (4, 4)][case % 4];
        let mut a = Matrix::new(nrows, ncols, Z);
        for i in 0..nrows {
            for j in 0..ncols {
                a[(i, j)] = Z.sample(&mut rng, (-9, 9));
            }
        }

        for form in [
            Form::RowEchelon,
            Form::ColEchelon,
            Form::RowHermite,
            Form::ColHermite,
            Form::Smith,
        ] {
            let e = eliminate(&a, form, EliminationOptions::tracking()).unwrap();
            assert_transforms(&a, &e);
            assert_eq!(e.transformation_determinant().abs(), Integer::from(1));

            let mut forward = a.clone();
            for op in &e.ops {
                op.apply_to(&mut forward);
            }
            assert_eq!(forward, e.result, "forward replay diverged for {:?}", form);
        }
    }
}

#[test]
fn randomized_smith_divisibility() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..10 {
        let mut a = Matrix::new(4, 4, Z);
        for i in 0..4 {
            for j in 0..4 {
                a[(i, j)] = Z.sample(&mut rng, (-6, 6));
            }
        }

        let e = eliminate(&a, Form::Smith, EliminationOptions::new()).unwrap();
        assert!(e.result.is_diagonal());
        let d = diagonal_of(&e.result);
        assert_eq!(d.len(), e.rank);
        for w in d.windows(2) {
            assert!(
                Z.try_div(&w[1], &w[0]).is_some(),
                "{} does not divide {}",
                w[0],
                w[1]
            );
        }
    }
}
