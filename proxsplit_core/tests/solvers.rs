use float_eq::assert_float_eq;
use proxsplit_core::solver::*;
use proxsplit_core::*;

type La = FloatGeneric<f64>;

type AMatOp<'a> = MatOp<'a, La>;

// A = diag(2, 1, 1/2), column-major
const DIAG: [f64; 9] = [
    2., 0., 0.,
    0., 1., 0.,
    0., 0., 0.5,
];
const B: [f64; 3] = [1., -2., 0.5];

//

#[test]
fn test_pdhg_diag()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // f = 0, g = 1/2 |. - b|^2
    let op_a = AMatOp::new((3, 3), &DIAG);
    let prox_g = ProxShift::<La, _>::new(&B, ProxL2Sq::new());

    let sigma = 0.45;
    let x = &mut[0.; 3];
    let y = &mut[0.; 3];
    let mut work = vec![0.; Pdhg::<La>::query_worklen(op_a.size())];

    let s = Pdhg::<La>::new().par(|p| {
        p.max_iter = 1500;
        p.sigma = sigma;
        p.tau = sigma;
    });
    s.solve((op_a, ProxZero::new(), prox_g, x, y, &mut work)).unwrap();

    // minimizer of g(sigma A x), that is A^{-1} b / sigma
    let ans = [0.5 / sigma, -2. / sigma, 1. / sigma];
    assert_float_eq!(x.as_ref(), ans.as_ref(), abs_all <= 1e-6);
    assert_float_eq!(y.as_ref(), [0.; 3].as_ref(), abs_all <= 1e-6);
}

#[test]
fn test_pdhg_one_step()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let op_a = AMatOp::new((1, 1), &[1.]);

    let x = &mut[1.];
    let y = &mut[0.];
    let mut work = vec![0.; Pdhg::<La>::query_worklen(op_a.size())];

    let s = Pdhg::<La>::new().par(|p| {
        p.max_iter = 1;
        p.sigma = 0.5;
        p.tau = 0.5;
    });
    s.solve((op_a, ProxZero::new(), ProxL2Sq::new(), x, y, &mut work)).unwrap();

    // v = 0.5, y = v - v / 1.5, x = 1 - 0.5 y
    assert_float_eq!(y[0], 1. / 6., abs <= 1e-12);
    assert_float_eq!(x[0], 11. / 12., abs <= 1e-12);
}

#[test]
fn test_lin_admm_diag()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let op_a = AMatOp::new((3, 3), &DIAG);
    let prox_g = ProxShift::<La, _>::new(&B, ProxL2Sq::new());

    let x = &mut[0.; 3];
    let z = &mut[0.; 3];
    let u = &mut[0.; 3];
    let mut work = vec![0.; LinAdmm::<La>::query_worklen(op_a.size())];

    // step_f <= step_g / |A|^2
    let s = LinAdmm::<La>::new().par(|p| {
        p.max_iter = 500;
        p.step_f = 0.2;
        p.step_g = 1.;
    });
    s.solve((op_a, ProxZero::new(), prox_g, x, z, u, &mut work)).unwrap();

    assert_float_eq!(x.as_ref(), [0.5, -2., 1.].as_ref(), abs_all <= 1e-6);
    // z tracks A x
    assert_float_eq!(z.as_ref(), B.as_ref(), abs_all <= 1e-6);
}

#[test]
fn test_lin_admm_one_step()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let op_a = AMatOp::new((1, 1), &[1.]);

    let x = &mut[1.];
    let z = &mut[0.];
    let u = &mut[0.];
    let mut work = vec![0.; LinAdmm::<La>::query_worklen(op_a.size())];

    let s = LinAdmm::<La>::new().par(|p| {
        p.max_iter = 1;
        p.step_f = 0.5;
        p.step_g = 0.5;
    });
    s.solve((op_a, ProxZero::new(), ProxL2Sq::new(), x, z, u, &mut work)).unwrap();

    // z and u use A x of the initial x = 1
    assert_float_eq!(x[0], 0., abs <= 1e-12);
    assert_float_eq!(z[0], 2. / 3., abs <= 1e-12);
    assert_float_eq!(u[0], 1. / 3., abs <= 1e-12);
}

#[test]
fn test_pdhg_size_mismatch()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let op_a = AMatOp::new((3, 3), &DIAG);

    let x = &mut[0.; 2];
    let y = &mut[0.; 3];
    let mut work = vec![0.; Pdhg::<La>::query_worklen(op_a.size())];

    let r = Pdhg::<La>::new().solve((op_a, ProxZero::new(), ProxZero::new(), x, y, &mut work));
    assert_eq!(r, Err(SolverError::InvalidOp));
}

#[test]
fn test_lin_admm_work_shortage()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let op_a = AMatOp::new((3, 3), &DIAG);

    let x = &mut[0.; 3];
    let z = &mut[0.; 3];
    let u = &mut[0.; 3];
    let work = &mut[0.; 2];

    let r = LinAdmm::<La>::new().solve((op_a, ProxZero::new(), ProxZero::new(), x, z, u, work));
    assert_eq!(r, Err(SolverError::WorkShortage));
}

//

// separable problem 1/2 |x - b|^2 + a |x|_1 over [-2, 2]: clip(soft(b, a))
const B4: [f64; 4] = [3., -0.5, 0.05, -4.];
const ANS4: [f64; 4] = [2., -0.4, 0., -2.];

#[test]
fn test_gfb_l1_box()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let eye = AMatOp::new((4, 4), &[
        1., 0., 0., 0.,
        0., 1., 0., 0.,
        0., 0., 1., 0.,
        0., 0., 0., 1.,
    ]);
    let mut lsq_w = vec![0.; SmoothLeastSq::<La, AMatOp>::query_worklen(eye.size())];
    let smooth_f = SmoothLeastSq::<La, _>::new(eye, &B4, &mut lsq_w).unwrap();

    let mut l1 = ProxScale::new(0.1, ProxL1::<La>::new());
    let mut bx = ProxBox::<La>::new(BoxBounds::Scalar(-2., 2.)).unwrap();
    let mut proxes: Vec<&mut dyn Prox<La>> = vec![&mut l1, &mut bx];

    let x = &mut[0.; 4];
    let mut work = vec![0.; Gfb::<La>::query_worklen(4, proxes.len())];

    let s = Gfb::<La>::new().par(|p| {
        p.max_iter = 200;
    });
    s.solve((smooth_f, &mut proxes, x, &mut work)).unwrap();

    assert_float_eq!(x.as_ref(), ANS4.as_ref(), abs_all <= 1e-6);
}

#[test]
fn test_proj_gfb_l1()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let smooth_f = SmoothFn::<La, _>::new(|x: &[f64], g: &mut[f64]| {
        for ((g, x), b) in g.iter_mut().zip(x).zip(&B4) {
            *g = x - b;
        }
        Ok(())
    });

    let mut l1 = ProxScale::new(0.1, ProxL1::<La>::new());
    let mut proxes: Vec<&mut dyn Prox<La>> = vec![&mut l1];

    let x = &mut[0.; 4];
    let mut work = vec![0.; ProjGfb::<La>::query_worklen(4, proxes.len())];

    let mut out_of_box = 0;
    let s = ProjGfb::<La>::new().par(|p| {
        p.max_iter = 200;
    });
    s.solve_observed((smooth_f, &mut proxes, BoxBounds::Scalar(-2., 2.), x, &mut work), |_, x| {
        if x.iter().any(|v| v.abs() > 2.) {
            out_of_box += 1;
        }
    }).unwrap();

    assert_eq!(out_of_box, 0);
    assert_float_eq!(x.as_ref(), ANS4.as_ref(), abs_all <= 1e-6);
}

#[test]
fn test_gfb_invalid()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let mut x = [0.; 4];
    let mut work = vec![0.; Gfb::<La>::query_worklen(4, 1)];

    let mut proxes: Vec<&mut dyn Prox<La>> = Vec::new();
    let r = Gfb::<La>::new().solve((SmoothZero, &mut proxes, &mut x, &mut work));
    assert_eq!(r, Err(SolverError::InvalidOp));

    let mut l1 = ProxL1::<La>::new();
    let mut proxes: Vec<&mut dyn Prox<La>> = vec![&mut l1];
    let lo = &[0.; 3];
    let hi = &[1.; 3];
    let r = ProjGfb::<La>::new().solve((SmoothZero, &mut proxes, BoxBounds::Array(lo, hi), &mut x, &mut work));
    assert_eq!(r, Err(SolverError::InvalidBounds));

    let r = Gfb::<La>::new().solve((SmoothZero, &mut proxes, &mut x, &mut work[1..]));
    assert_eq!(r, Err(SolverError::WorkShortage));
}

#[test]
fn test_prox_failure()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let x = &mut[1., 2.];
    let work = &mut[0.; 2];

    let failing = ProxFn::<La, _>::new(|_, _: &mut[f64]| Err(()));
    let r = ProxGrad::<La>::new().solve((SmoothZero, failing, x, work));
    assert_eq!(r, Err(SolverError::ProxFailure));
}
