use float_eq::assert_float_eq;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256StarStar;
use proxsplit::prelude::*;
use proxsplit::operator::*;
use proxsplit::*;

type La = FloatGeneric<f64>;

type AMatBuild = MatBuild<La>;

//

fn rand_vec<R: Rng>(rng: &mut R, n: usize) -> Vec<f64>
{
    (0.. n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

fn dot(a: &[f64], b: &[f64]) -> f64
{
    a.iter().zip(b).map(|(a, b)| a * b).sum()
}

// <A x, y> = <x, A^T y>
fn check_adjoint<O: Operator<La>>(op: &O, rng: &mut Xoshiro256StarStar)
{
    let (m, n) = op.size();

    for _ in 0.. 3 {
        let x = rand_vec(rng, n);
        let y = rand_vec(rng, m);

        let ax = op.apply(&x).unwrap();
        let aty = op.apply_adjoint(&y).unwrap();
        assert_eq!(ax.len(), m);
        assert_eq!(aty.len(), n);

        assert_float_eq!(dot(&ax, &y), dot(&x, &aty), abs <= 1e-10);
    }
}

// A A^T = I
fn check_semi_orth<O: Operator<La>>(op: &O, rng: &mut Xoshiro256StarStar)
{
    let (m, _) = op.size();

    let y = rand_vec(rng, m);
    let aaty = op.apply(&op.apply_adjoint(&y).unwrap()).unwrap();

    assert_float_eq!(aaty, y, abs_all <= 1e-12);
}

//

#[test]
fn test_adjoint_combinators()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rng = Xoshiro256StarStar::seed_from_u64(0);

    check_adjoint(&OpIdentity::<La>::new(5), &mut rng);
    check_adjoint(&OpScale::new(-2.5, OpGrad::<La>::new(6).unwrap()), &mut rng);
    check_adjoint(&OpRestrict::<La>::new(6, vec![0, 2, 5]).unwrap(), &mut rng);
    check_adjoint(&OpCompose::new(OpRestrict::new(5, vec![1, 4]).unwrap(), OpGrad::<La>::new(6).unwrap()).unwrap(), &mut rng);

    let ops: Vec<Box<dyn Operator<La>>> = vec![
        Box::new(OpGrad::new(6).unwrap()),
        Box::new(OpIdentity::new(6)),
        Box::new(OpScale::new(3., OpSquareIntegral::new(6).unwrap())),
    ];
    let stack = OpStack::new(ops).unwrap();
    assert_eq!(stack.len(), 3);
    assert_eq!(stack.size(), (5 + 6 + 6, 6));
    check_adjoint(&stack, &mut rng);

    check_adjoint(&OpKron::new(OpGrad::<La>::new(3).unwrap(), OpSquareGrad::new(4).unwrap()), &mut rng);

    let mat = AMatBuild::new((3, 4)).by_fn(|r, c| (r * 4 + c) as f64 - 5.);
    check_adjoint(&mat.as_op(), &mut rng);
}

#[test]
fn test_adjoint_gradients()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rng = Xoshiro256StarStar::seed_from_u64(1);

    check_adjoint(&OpGrad::<La>::new(7).unwrap(), &mut rng);
    check_adjoint(&OpSquareGrad::<La>::new(7).unwrap(), &mut rng);
    check_adjoint(&OpSquareIntegral::<La>::new(7).unwrap(), &mut rng);

    check_adjoint(&grad_x::<La>(2, 3, 4).unwrap(), &mut rng);
    check_adjoint(&grad_y::<La>(2, 3, 4).unwrap(), &mut rng);
    check_adjoint(&grad_z::<La>(2, 3, 4).unwrap(), &mut rng);

    check_adjoint(&even_grad::<La>(7).unwrap(), &mut rng);
    check_adjoint(&odd_grad::<La>(8).unwrap(), &mut rng);
    check_adjoint(&even_grad_x::<La>(5).unwrap(), &mut rng);
    check_adjoint(&odd_grad_x::<La>(5).unwrap(), &mut rng);
    check_adjoint(&even_grad_y::<La>(4).unwrap(), &mut rng);
    check_adjoint(&odd_grad_y::<La>(4).unwrap(), &mut rng);
}

#[test]
fn test_semi_orth_splits()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rng = Xoshiro256StarStar::seed_from_u64(2);

    for n in [2, 3, 6, 7] {
        check_semi_orth(&even_grad::<La>(n).unwrap(), &mut rng);
        check_semi_orth(&odd_grad::<La>(n).unwrap(), &mut rng);
    }
    check_semi_orth(&even_grad_x::<La>(5).unwrap(), &mut rng);
    check_semi_orth(&odd_grad_x::<La>(5).unwrap(), &mut rng);
    check_semi_orth(&even_grad_y::<La>(6).unwrap(), &mut rng);
    check_semi_orth(&odd_grad_y::<La>(6).unwrap(), &mut rng);

    // A^T A is a projection, not the identity
    let a = even_grad::<La>(6).unwrap();
    let x = [1., 0., 0., 0., 0., 0.];
    let atax = a.apply_adjoint(&a.apply(&x).unwrap()).unwrap();
    assert_float_eq!(atax, vec![0.5, -0.5, 0., 0., 0., 0.], abs_all <= 1e-12);
}

#[test]
fn test_split_rows()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let s = 0.5_f64.sqrt();
    let x = [0., 1., 3., 6., 10.];

    let even = even_grad::<La>(5).unwrap();
    assert_eq!(even.size(), (2, 5));
    assert_float_eq!(even.apply(&x).unwrap(), vec![s, 3. * s], abs_all <= 1e-12);

    let odd = odd_grad::<La>(5).unwrap();
    assert_eq!(odd.size(), (2, 5));
    assert_float_eq!(odd.apply(&x).unwrap(), vec![2. * s, 4. * s], abs_all <= 1e-12);

    // a single difference has no odd row
    let odd = odd_grad::<La>(2).unwrap();
    assert_eq!(odd.size(), (0, 2));
}

#[test]
fn test_volume_axes()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // v[i, j, k] = 100 i + 10 j + k, row-major 2 x 2 x 2
    let mut v = Vec::new();
    for i in 0.. 2 {
        for j in 0.. 2 {
            for k in 0.. 2 {
                v.push((100 * i + 10 * j + k) as f64);
            }
        }
    }

    let gy = grad_y::<La>(2, 2, 2).unwrap();
    let gx = grad_x::<La>(2, 2, 2).unwrap();
    let gz = grad_z::<La>(2, 2, 2).unwrap();
    assert_float_eq!(gy.apply(&v).unwrap(), vec![100.; 4], abs_all <= 1e-12);
    assert_float_eq!(gx.apply(&v).unwrap(), vec![10.; 4], abs_all <= 1e-12);
    assert_float_eq!(gz.apply(&v).unwrap(), vec![1.; 4], abs_all <= 1e-12);

    // 2-D splits act on rows (x) and columns (y) of a row-major image
    let img = [
        0., 1., 3.,
        0., 2., 6.,
        0., 3., 9.,
    ];
    let s = 0.5_f64.sqrt();
    let ex = even_grad_x::<La>(3).unwrap();
    assert_float_eq!(ex.apply(&img).unwrap(), vec![s, 2. * s, 3. * s], abs_all <= 1e-12);
    let ey = even_grad_y::<La>(3).unwrap();
    assert_float_eq!(ey.apply(&img).unwrap(), vec![0., s, 3. * s], abs_all <= 1e-12);
}

#[test]
fn test_kron_convention()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let a = AMatBuild::new((2, 2)).iter_rowmaj(&[
        1., 2.,
        3., 4.,
    ]);
    let b = AMatBuild::new((2, 2)).iter_rowmaj(&[
        0., 1.,
        1., 0.,
    ]);
    let k = OpKron::new(a.as_op(), b.as_op());

    // A X B^T for X = [1 2; 3 4]
    let y = k.apply(&[1., 2., 3., 4.]).unwrap();
    assert_float_eq!(y, vec![10., 7., 22., 15.], abs_all <= 1e-12);
}

#[test]
fn test_beta_zero_ignores_nan()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let ops: Vec<Box<dyn Operator<La>>> = vec![
        Box::new(OpIdentity::new(4)),
        Box::new(OpGrad::new(4).unwrap()),
        Box::new(OpRestrict::new(4, vec![1, 3]).unwrap()),
        Box::new(OpKron::new(OpGrad::new(2).unwrap(), OpIdentity::new(2))),
    ];

    for op in ops.iter() {
        let (m, n) = op.size();
        let mut y = vec![f64::NAN; m];
        op.op(1., &vec![1.; n], 0., &mut y);
        assert!(y.iter().all(|v| v.is_finite()));

        let mut x = vec![f64::NAN; n];
        op.trans_op(1., &vec![1.; m], 0., &mut x);
        assert!(x.iter().all(|v| v.is_finite()));
    }
}

#[test]
fn test_op_errors()
{
    let _ = env_logger::builder().is_test(true).try_init();

    assert_eq!(OpRestrict::<La>::new(3, vec![0, 3]).err(), Some(SolverError::InvalidIndex));
    assert_eq!(OpRestrict::<La>::new(3, vec![1, 1]).err(), Some(SolverError::InvalidIndex));
    assert_eq!(OpRestrict::<La>::new(3, vec![2, 0]).err(), Some(SolverError::InvalidIndex));

    assert_eq!(OpGrad::<La>::new(0).err(), Some(SolverError::InvalidOp));
    assert_eq!(even_grad::<La>(0).err(), Some(SolverError::InvalidOp));

    let r = OpCompose::new(OpGrad::<La>::new(4).unwrap(), OpGrad::<La>::new(4).unwrap());
    assert_eq!(r.err(), Some(SolverError::InvalidOp));

    let ops: Vec<Box<dyn Operator<La>>> = vec![
        Box::new(OpGrad::new(4).unwrap()),
        Box::new(OpIdentity::new(5)),
    ];
    let r = OpStack::new(ops);
    assert_eq!(r.err(), Some(SolverError::InvalidOp));
    assert_eq!(OpStack::<La>::new(Vec::new()).err(), Some(SolverError::InvalidOp));

    let g = OpGrad::<La>::new(4).unwrap();
    assert_eq!(g.apply(&[1., 2.]), Err(SolverError::InvalidOp));
    assert_eq!(g.apply_adjoint(&[1., 2.]), Err(SolverError::InvalidOp));
}

#[test]
fn test_op_norm()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rng = Xoshiro256StarStar::seed_from_u64(3);

    let diag = AMatBuild::new((3, 3)).by_fn(|r, c| if r == c {3. - r as f64} else {0.});
    let norm = op_norm_with_rng(&diag.as_op(), 50, &mut rng);
    assert_float_eq!(norm, 3., abs <= 1e-9);

    let norm = op_norm_with_rng(&even_grad::<La>(8).unwrap(), 5, &mut rng);
    assert_float_eq!(norm, 1., abs <= 1e-9);

    // |G|_2 < 2 and approaches it from below
    let norm = op_norm(&OpGrad::<La>::new(16).unwrap(), 200);
    assert!(norm > 1.9 && norm < 2.);
}
