use float_eq::assert_float_eq;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256StarStar;
use proxsplit::prelude::*;
use proxsplit::operator::*;
use proxsplit::prox::*;
use proxsplit::*;
use proxsplit_core::{ProxL1, ProxL2Sq, ProxBox, ProxScale, ProxShift, ProxOrth, ProxSemiOrth, ProxFn};

type La = FloatGeneric<f64>;

type AMatBuild = MatBuild<La>;

fn dist(a: &[f64], b: &[f64]) -> f64
{
    a.iter().zip(b).map(|(a, b)| (a - b) * (a - b)).sum::<f64>().sqrt()
}

//

#[test]
fn test_l1_nonexpansive()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rng = Xoshiro256StarStar::seed_from_u64(10);
    let mut p = ProxL1::<La>::new();

    for _ in 0.. 20 {
        let u: Vec<f64> = (0.. 6).map(|_| rng.gen_range(-2.0..2.0)).collect();
        let v: Vec<f64> = (0.. 6).map(|_| rng.gen_range(-2.0..2.0)).collect();
        let lambda = rng.gen_range(0.0..1.5);

        let mut pu = u.clone();
        let mut pv = v.clone();
        p.prox(lambda, &mut pu).unwrap();
        p.prox(lambda, &mut pv).unwrap();

        assert!(dist(&pu, &pv) <= dist(&u, &v) + 1e-12);
    }
}

#[test]
fn test_box_within_bounds()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rng = Xoshiro256StarStar::seed_from_u64(11);
    let lo = [-1., 0., 0.5, -3.];
    let hi = [1., 0., 2., -2.];
    let mut p = ProxBox::<La>::new(BoxBounds::Array(&lo, &hi)).unwrap();

    for _ in 0.. 20 {
        let mut x: Vec<f64> = (0.. 4).map(|_| rng.gen_range(-5.0..5.0)).collect();
        p.prox(1., &mut x).unwrap();

        for ((x, lo), hi) in x.iter().zip(&lo).zip(&hi) {
            assert!(lo <= x && x <= hi);
        }
    }

    assert_eq!(ProxBox::<La>::new(BoxBounds::Scalar(1., 0.)).err(), Some(SolverError::InvalidBounds));
    assert_eq!(ProxBox::<La>::new(BoxBounds::Array(&lo, &hi[..3])).err(), Some(SolverError::InvalidBounds));
}

#[test]
fn test_l2sq_zero_step()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let mut p = ProxL2Sq::<La>::new();

    let x = &mut[1., -2., 3.];
    p.prox(0., x).unwrap();
    assert_float_eq!(x.as_ref(), [1., -2., 3.].as_ref(), abs_all <= 1e-15);

    p.prox(3., x).unwrap();
    assert_float_eq!(x.as_ref(), [0.25, -0.5, 0.75].as_ref(), abs_all <= 1e-15);
}

#[test]
fn test_transport_permutation()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // (x0, x1, x2) -> (x1, x2, x0)
    let perm = AMatBuild::new((3, 3)).iter_rowmaj(&[
        0., 1., 0.,
        0., 0., 1.,
        1., 0., 0.,
    ]);

    // h = 2 |.|_1 on the first element only after permutation, that is on x1
    let weights = [2., 0., 0.];
    let weighted_l1 = ProxFn::<La, _>::new(|lambda, x: &mut[f64]| {
        for (x, w) in x.iter_mut().zip(&weights) {
            *x = x.signum() * (x.abs() - lambda * w).max(0.);
        }
        Ok(())
    });

    let mut work = vec![0.; ProxOrth::<La, MatOp<La>, ProxL1<La>>::query_worklen(perm.size())];
    let mut p = ProxOrth::new(perm.as_op(), weighted_l1, &mut work).unwrap();

    let x = &mut[3., 3., 3.];
    p.prox(0.5, x).unwrap();
    assert_float_eq!(x.as_ref(), [3., 2., 3.].as_ref(), abs_all <= 1e-12);

    let non_square = AMatBuild::new((2, 3));
    let r = ProxOrth::new(non_square.as_op(), ProxL1::new(), &mut work);
    assert_eq!(r.err().map(|_| ()), Some(()));
}

#[test]
fn test_transport_semi_orth()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let op = even_grad::<La>(3).unwrap();
    let mut work = vec![0.; ProxSemiOrth::<La, OpSplitGrad<La>, ProxL1<La>>::query_worklen(op.size())];
    let mut p = ProxSemiOrth::new(op, ProxL1::new(), &mut work).unwrap();

    // prox of l |(x1 - x0) / 2^{1/2}|_1, x2 untouched
    let s = 0.5_f64.sqrt();
    let x = &mut[0., 2., 5.];
    p.prox(0.5, x).unwrap();
    assert_float_eq!(x.as_ref(), [0.5 * s, 2. - 0.5 * s, 5.].as_ref(), abs_all <= 1e-12);
}

#[test]
fn test_least_sq_closed_form()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let a = AMatBuild::new((3, 2)).iter_rowmaj(&[
        1., 2.,
        0., 1.,
        1., 0.,
    ]);
    let b = [1., 2., 3.];

    // (A^T A + I / l)^{-1} (A^T b + v / l)
    let mut p = ProxLeastSq::new(a.as_op(), &b).unwrap();
    let x = &mut[0.5, -1.];
    p.prox(0.7, x).unwrap();
    assert_float_eq!(x.as_ref(), [1.3947963800904977, -0.03393665158371047].as_ref(), abs_all <= 1e-8);

    assert_eq!(ProxLeastSq::new(a.as_op(), &b[..2]).err().map(|_| ()), Some(()));
}

#[test]
fn test_concat_shift()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // 1/2 |x0 - 1|^2 + 3 |x1 - 1|_1 + 3 |x2 - 1|_1
    let blocks: Vec<(usize, Box<dyn Prox<La>>)> = vec![
        (1, Box::new(ProxL2Sq::new())),
        (2, Box::new(ProxScale::new(3., ProxL1::new()))),
    ];
    let offset = [1.; 3];
    let mut p = ProxShift::<La, _>::new(&offset, ProxConcat::new(3, blocks).unwrap());

    let x = &mut[3., 3., -1.];
    p.prox(0.5, x).unwrap();
    assert_float_eq!(x.as_ref(), [1. + 2. / 1.5, 1.5, 0.5].as_ref(), abs_all <= 1e-12);

    let blocks: Vec<(usize, Box<dyn Prox<La>>)> = vec![(2, Box::new(ProxL1::new()))];
    assert_eq!(ProxConcat::new(3, blocks).err().map(|_| ()), Some(()));
}

#[test]
fn test_least_sq_smooth()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let mut f = LeastSq::new(OpGrad::<La>::new(3).unwrap(), &[1., 1.]).unwrap();

    // A x - b = (0, 2)
    let x = [0., 1., 4.];
    assert_float_eq!(f.value(&x), 2., abs <= 1e-12);

    let g = &mut[0.; 3];
    f.grad(&x, g).unwrap();
    assert_float_eq!(g.as_ref(), [0., -2., 2.].as_ref(), abs_all <= 1e-12);
}
