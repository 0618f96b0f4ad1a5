use num_traits::Num;
use rand::prelude::*;
use rand_distr::Normal;
use rand_xoshiro::Xoshiro256StarStar;
use proxsplit::prelude::*;
use proxsplit::operator::{OpApply, OpIdentity, OpKron, OpStack, grad_x, grad_y};
use proxsplit::*;

type La = FloatGeneric<f64>;

fn num_by_env<N: Num + std::fmt::Display>(e: &str) -> Option<N>
{
    if let Some(v) = std::env::var(e).ok()
                     .and_then(|s| {N::from_str_radix(&s, 10).ok()}) {
        log::info!("{}: {}", e, v);
        Some(v)
    }
    else {
        None
    }
}

fn rmse(a: &[f64], b: &[f64]) -> f64
{
    let sq: f64 = a.iter().zip(b).map(|(a, b)| (a - b) * (a - b)).sum();
    (sq / a.len() as f64).sqrt()
}

fn add_noise<R: Rng>(rng: &mut R, x: &[f64], sd: f64) -> anyhow::Result<Vec<f64>>
{
    let normal = Normal::new(0., sd)?;
    Ok(x.iter().map(|v| v + normal.sample(rng)).collect())
}

/// 1-D step signal denoised by three TV-minimization variants
fn denoise_1d(rng: &mut Xoshiro256StarStar) -> anyhow::Result<()>
{
    let truth: Vec<f64> = (0.. 64).map(|i| match i {
        0..=19 => 0.,
        20..=43 => 2.,
        _ => 1.,
    }).collect();
    let b = add_noise(rng, &truth, 0.2)?;
    log::info!("1-D observed rmse {:.4}", rmse(&b, &truth));

    let mut par = TvMinParam {
        weight: 0.5,
        max_iter: 300,
        log_period: 50,
        ..Default::default()
    };
    par.max_iter = num_by_env("PROXSPLIT_MAX_ITER").unwrap_or(par.max_iter);
    par.log_period = num_by_env("PROXSPLIT_LOG_PERIOD").unwrap_or(par.log_period);

    let mut x = vec![0.; b.len()];
    tv_min_1d_gfb::<La, _>(LeastSq::<La, _>::new(OpIdentity::new(b.len()), &b)?, &par, &mut x)?;
    log::info!("1-D GFB rmse {:.4}", rmse(&x, &truth));

    let mut x = b.clone();
    tv_prox_grad_1d::<La, _>(LeastSq::<La, _>::new(OpIdentity::new(b.len()), &b)?, &par, &mut x)?;
    log::info!("1-D proximal gradient rmse {:.4}", rmse(&x, &truth));

    let par = TvMinParam {
        bounds: Some((0., 2.)),
        ..par
    };
    let mut x = vec![0.; b.len()];
    tv_min_1d_proj_gfb::<La, _>(LeastSq::<La, _>::new(OpIdentity::new(b.len()), &b)?, &par, &mut x)?;
    log::info!("1-D bounded GFB rmse {:.4}", rmse(&x, &truth));

    Ok(())
}

/// square blurred by a separable 3-tap kernel, then reconstructed by PDHG
fn deblur_2d(rng: &mut Xoshiro256StarStar) -> anyhow::Result<()>
{
    let n = 16;

    let truth: Vec<f64> = (0.. n * n).map(|i| {
        let (r, c) = (i / n, i % n);
        if (4..12).contains(&r) && (4..12).contains(&c) {1.} else {0.}
    }).collect();

    let blur = MatBuild::<La>::new((n, n)).by_fn(|r, c| {
        match r.abs_diff(c) {
            0 => 0.5,
            1 => 0.25,
            _ => 0.,
        }
    });
    let op_w = OpKron::new(blur.as_op(), blur.as_op());

    let p = add_noise(rng, &op_w.apply(&truth)?, 0.02)?;
    log::info!("2-D observed rmse {:.4}", rmse(&p, &truth));

    let grads: Vec<Box<dyn Operator<La>>> = vec![
        Box::new(grad_x::<La>(n, n, 1)?),
        Box::new(grad_y::<La>(n, n, 1)?),
    ];
    let op_d = OpStack::new(grads)?;

    let mut par = PdhgTvParam {
        weight: 0.01,
        max_iter: 500,
        seed: Some(0),
        log_period: 100,
        ..Default::default()
    };
    par.max_iter = num_by_env("PROXSPLIT_MAX_ITER").unwrap_or(par.max_iter);
    par.log_period = num_by_env("PROXSPLIT_LOG_PERIOD").unwrap_or(par.log_period);

    let x = pdhg_tv::<La, _, _>(op_w, &p, op_d, &par)?;
    log::info!("2-D PDHG rmse {:.4}", rmse(&x, &truth));

    for row in x.chunks(n) {
        let line: String = row.iter().map(|v| if *v > 0.5 {'#'} else {'.'}).collect();
        log::info!("{}", line);
    }

    Ok(())
}

fn main() -> anyhow::Result<()>
{
    env_logger::init();

    let mut rng = Xoshiro256StarStar::seed_from_u64(num_by_env("PROXSPLIT_SEED").unwrap_or(0));

    denoise_1d(&mut rng)?;
    deblur_2d(&mut rng)?;

    Ok(())
}
