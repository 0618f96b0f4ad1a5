use float_eq::assert_float_eq;
use proxsplit::prelude::*;
use proxsplit::operator::*;
use proxsplit::*;

type La = FloatGeneric<f64>;

fn denoise_f(b: &[f64]) -> LeastSq<La, OpIdentity<La>>
{
    LeastSq::new(OpIdentity::new(b.len()), b).unwrap()
}

//

const STEP: [f64; 5] = [1., 1., 3., 3., 3.];

#[test]
fn test_tv1d_gfb()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let par = TvMinParam {
        weight: 0.1,
        max_iter: 200,
        ..Default::default()
    };

    // each plateau moves toward the other by a / (its length)
    let ans = [1.05, 1.05, 2.9666667, 2.9666667, 2.9666667];

    let mut x = [0.; 5];
    tv_min_1d_gfb::<La, _>(denoise_f(&STEP), &par, &mut x).unwrap();
    assert_float_eq!(x.as_ref(), ans.as_ref(), abs_all <= 1e-4);

    // no bounds falls back to plain GFB
    let mut x = [0.; 5];
    tv_min_1d_proj_gfb::<La, _>(denoise_f(&STEP), &par, &mut x).unwrap();
    assert_float_eq!(x.as_ref(), ans.as_ref(), abs_all <= 1e-4);
}

#[test]
fn test_tv1d_bounded_cross_check()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let ans = [1.05, 1.05, 2.5, 2.5, 2.5];

    // box as an extra regularizer
    let par = TvMinParam {
        weight: 0.1,
        bounds: Some((0., 2.5)),
        max_iter: 3000,
        log_period: 500,
        ..Default::default()
    };
    let mut x_gfb = [0.; 5];
    tv_min_1d_gfb::<La, _>(denoise_f(&STEP), &par, &mut x_gfb).unwrap();

    // box by projection
    let par = TvMinParam {
        max_iter: 500,
        ..par
    };
    let mut x_proj = [0.; 5];
    tv_min_1d_proj_gfb::<La, _>(denoise_f(&STEP), &par, &mut x_proj).unwrap();

    assert_float_eq!(x_gfb.as_ref(), ans.as_ref(), abs_all <= 1e-4);
    assert_float_eq!(x_proj.as_ref(), ans.as_ref(), abs_all <= 1e-4);
    assert_float_eq!(x_gfb.as_ref(), x_proj.as_ref(), abs_all <= 1e-4);
}

//

// 4 x 4 image, left half 0 and right half 1
const EDGE: [f64; 16] = [
    0., 0., 1., 1.,
    0., 0., 1., 1.,
    0., 0., 1., 1.,
    0., 0., 1., 1.,
];

#[test]
fn test_tv2d_gfb()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let par = TvMinParam {
        weight: 0.2,
        max_iter: 200,
        ..Default::default()
    };

    let mut x = [0.; 16];
    tv_min_2d_gfb::<La, _>(denoise_f(&EDGE), &par, &mut x, 4).unwrap();
    for row in x.chunks(4) {
        assert_float_eq!(row, [0.1, 0.1, 0.9, 0.9].as_ref(), abs_all <= 1e-4);
    }

    let par = TvMinParam {
        bounds: Some((0.2, 1.)),
        max_iter: 1000,
        ..par
    };

    let mut x = [0.; 16];
    tv_min_2d_gfb::<La, _>(denoise_f(&EDGE), &par, &mut x, 4).unwrap();
    for row in x.chunks(4) {
        assert_float_eq!(row, [0.2, 0.2, 0.9, 0.9].as_ref(), abs_all <= 1e-4);
    }

    let mut x = [0.; 16];
    tv_min_2d_proj_gfb::<La, _>(denoise_f(&EDGE), &par, &mut x, 4).unwrap();
    assert!(x.iter().all(|&v| (0.2..=1.).contains(&v)));
}

#[test]
fn test_tv_invalid()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let par = TvMinParam::default();
    let mut x = [0.; 15];
    let r = tv_min_2d_gfb::<La, _>(denoise_f(&[0.; 15]), &par, &mut x, 4);
    assert_eq!(r, Err(SolverError::InvalidOp));

    let par = TvMinParam {
        bounds: Some((1., 0.)),
        ..Default::default()
    };
    let mut x = [0.; 5];
    assert_eq!(tv_min_1d_gfb::<La, _>(denoise_f(&STEP), &par, &mut x), Err(SolverError::InvalidBounds));
    assert_eq!(tv_min_1d_proj_gfb::<La, _>(denoise_f(&STEP), &par, &mut x), Err(SolverError::InvalidBounds));
}

//

const PLATEAU: [f64; 8] = [1., 1., 1., 5., 5., 5., 5., 5.];
const NOISE: [f64; 8] = [0.02, -0.01, -0.01, 0.015, -0.02, 0.01, -0.015, 0.01];

fn noisy_plateau() -> Vec<f64>
{
    PLATEAU.iter().zip(&NOISE).map(|(x, e)| x + e).collect()
}

#[test]
fn test_tv_prox_grad_denoise()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let b = noisy_plateau();

    let par = TvMinParam {
        weight: 0.05,
        step_grad: 1.,
        max_iter: 200,
        inner_iter: 300,
        log_period: 50,
        ..Default::default()
    };

    let mut x = b.clone();
    tv_prox_grad_1d::<La, _>(denoise_f(&b), &par, &mut x).unwrap();

    let ans = [1.0166667, 1.0166667, 1.0166667, 4.99, 4.99, 4.99, 4.99, 4.99];
    assert_float_eq!(x.as_slice(), ans.as_ref(), abs_all <= 1e-3);
    assert_float_eq!(x.as_slice(), PLATEAU.as_ref(), abs_all <= 0.05);
}

#[test]
fn test_pdhg_tv_denoise()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let p = noisy_plateau();

    let par = PdhgTvParam {
        weight: 0.05,
        max_iter: 300,
        seed: Some(7),
        log_period: 50,
        ..Default::default()
    };

    // W = I reduces to TV denoising of p
    let x = pdhg_tv::<La, _, _>(OpIdentity::<La>::new(8), &p, OpGrad::new(8).unwrap(), &par).unwrap();

    let ans = [1.0166667, 1.0166667, 1.0166667, 4.99, 4.99, 4.99, 4.99, 4.99];
    assert_float_eq!(x.as_slice(), ans.as_ref(), abs_all <= 1e-3);

    let r = pdhg_tv::<La, _, _>(OpIdentity::<La>::new(8), &p[..7], OpGrad::new(8).unwrap(), &par);
    assert_eq!(r, Err(SolverError::InvalidOp));
}
