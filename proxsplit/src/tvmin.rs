//! Total-variation minimization

use num_traits::{Float, Zero, One};
use core::marker::PhantomData;
use core::fmt::{Debug, LowerExp};
use proxsplit_core::solver::{LinAlg, Operator, SliceLike, Prox, Smooth, SolverError};
use proxsplit_core::solver::{Gfb, ProjGfb, GfbParam, ProxGrad};
use proxsplit_core::{ProxSemiOrth, ProxScale, ProxL1, ProxBox, BoxBounds, SmoothFn};
use crate::operator::{even_grad, odd_grad, even_grad_x, odd_grad_x, even_grad_y, odd_grad_y};

//

/// Parameters of the TV-minimization wrappers.
#[derive(Debug, Clone, PartialEq)]
pub struct TvMinParam<F: Float>
{
    /// TV weight \\(a\\).
    pub weight: F,
    /// GFB relaxation \\(l\\).
    pub step_relax: F,
    /// Gradient step size \\(m\\) (also the step of [`tv_prox_grad_1d`]).
    pub step_grad: F,
    /// Optional scalar box bounds `(lo, hi)` on every element.
    pub bounds: Option<(F, F)>,
    /// Number of iterations.
    pub max_iter: usize,
    /// Number of inner iterations of [`ProxTv1d`] used by [`tv_prox_grad_1d`].
    pub inner_iter: usize,
    /// Period of iterations to output progress log (for debug/trace level).
    pub log_period: usize,
}

impl<F: Float> Default for TvMinParam<F>
{
    fn default() -> Self
    {
        let f1 = F::one();

        TvMinParam {
            weight: F::from(0.1).unwrap(),
            step_relax: f1,
            step_grad: f1,
            bounds: None,
            max_iter: 50,
            inner_iter: 100,
            log_period: 10,
        }
    }
}

//

type TvPiece<'a, L, O> = ProxSemiOrth<'a, L, O, ProxScale<L, ProxL1<L>>>;

// prox of weight * |A x|_1 for a semi-orthogonal A, work sized here
fn tv_piece<'a, L, O>(op: O, weight: L::F, work: &'a mut Vec<L::F>) -> Result<TvPiece<'a, L, O>, SolverError>
where L: LinAlg, O: Operator<L>
{
    work.resize(TvPiece::<L, O>::query_worklen(op.size()), L::F::zero());

    ProxSemiOrth::new(op, ProxScale::new(weight, ProxL1::new()), work)
}

// a raw first difference is 2^{1/2} times its semi-orthogonal piece
fn piece_weight<F: Float>(weight: F) -> F
{
    let f1 = F::one();

    weight * (f1 + f1).sqrt()
}

fn check_len(len: usize, n: usize) -> Result<(), SolverError>
{
    if len != n {
        log::error!("Length of x {} must be {}", len, n);
        return Err(SolverError::InvalidOp);
    }

    Ok(())
}

fn box_prox<'a, L: LinAlg>(par: &TvMinParam<L::F>, projected: bool) -> Result<Option<ProxBox<'a, L>>, SolverError>
{
    match par.bounds {
        Some((lo, hi)) if !projected => Ok(Some(ProxBox::new(BoxBounds::Scalar(lo, hi))?)),
        _ => Ok(None),
    }
}

fn run_gfb<L, S>(
    smooth_f: S, par: &TvMinParam<L::F>, proxes: &mut[&mut dyn Prox<L>], x: &mut[L::F], projected: bool
) -> Result<(), SolverError>
where L: LinAlg, L::F: Float + Debug + LowerExp, S: Smooth<L>
{
    let set_par = |p: &mut GfbParam<L::F>| {
        p.max_iter = par.max_iter;
        p.relax = par.step_relax;
        p.step = par.step_grad;
        p.log_period = par.log_period;
    };

    let mut work = vec![L::F::zero(); Gfb::<L>::query_worklen(x.len(), proxes.len())];

    match (projected, par.bounds) {
        (true, Some((lo, hi))) => {
            ProjGfb::<L>::new().par(set_par)
                .solve((smooth_f, proxes, BoxBounds::Scalar(lo, hi), x, &mut work))
        },
        _ => {
            Gfb::<L>::new().par(set_par)
                .solve((smooth_f, proxes, x, &mut work))
        },
    }
}

fn tv_min_2d<L, S>(smooth_f: S, par: &TvMinParam<L::F>, x: &mut[L::F], n: usize, projected: bool) -> Result<(), SolverError>
where L: LinAlg, L::F: Float + Debug + LowerExp, S: Smooth<L>
{
    check_len(x.len(), n * n)?;

    let aw = piece_weight(par.weight);
    let (mut w0, mut w1, mut w2, mut w3) = (Vec::new(), Vec::new(), Vec::new(), Vec::new());
    let mut p0 = tv_piece(even_grad_x::<L>(n)?, aw, &mut w0)?;
    let mut p1 = tv_piece(even_grad_y::<L>(n)?, aw, &mut w1)?;
    let mut p2 = tv_piece(odd_grad_x::<L>(n)?, aw, &mut w2)?;
    let mut p3 = tv_piece(odd_grad_y::<L>(n)?, aw, &mut w3)?;
    let mut pbox = box_prox::<L>(par, projected)?;

    let mut proxes: Vec<&mut dyn Prox<L>> = vec![&mut p0, &mut p1, &mut p2, &mut p3];
    proxes.extend(pbox.as_mut().map(|b| b as &mut dyn Prox<L>));

    run_gfb(smooth_f, par, &mut proxes, x, projected)
}

fn tv_min_1d<L, S>(smooth_f: S, par: &TvMinParam<L::F>, x: &mut[L::F], projected: bool) -> Result<(), SolverError>
where L: LinAlg, L::F: Float + Debug + LowerExp, S: Smooth<L>
{
    let n = x.len();
    let aw = piece_weight(par.weight);
    let (mut w0, mut w1) = (Vec::new(), Vec::new());
    let mut p0 = tv_piece(even_grad::<L>(n)?, aw, &mut w0)?;
    let mut p1 = tv_piece(odd_grad::<L>(n)?, aw, &mut w1)?;
    let mut pbox = box_prox::<L>(par, projected)?;

    let mut proxes: Vec<&mut dyn Prox<L>> = vec![&mut p0, &mut p1];
    proxes.extend(pbox.as_mut().map(|b| b as &mut dyn Prox<L>));

    run_gfb(smooth_f, par, &mut proxes, x, projected)
}

//

/// Minimizes \\(f(x) + a\\,{\rm TV}(x)\\) over a row-major `n` x `n` image by [`Gfb`].
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// The anisotropic TV is split into the even and odd rows of the horizontal and vertical
/// forward differences, four semi-orthogonal pieces whose proximal operators are exact.
/// With `par.bounds`, a box indicator is added as a fifth regularizer.
///
/// Returns `Ok`, or `Err` with [`SolverError`] type.
/// * `smooth_f` is \\(f\\) expressed by [`Smooth`].
/// * `par` holds the weight and the GFB parameters.
/// * `x` is an initial image before entry, the result on exit. Its length shall be `n * n`.
/// * `n` is the image side.
pub fn tv_min_2d_gfb<L, S>(smooth_f: S, par: &TvMinParam<L::F>, x: &mut[L::F], n: usize) -> Result<(), SolverError>
where L: LinAlg, L::F: Float + Debug + LowerExp, S: Smooth<L>
{
    tv_min_2d(smooth_f, par, x, n, false)
}

/// Same as [`tv_min_2d_gfb`], but keeps the bounds by [`ProjGfb`] instead of an extra regularizer.
///
/// Without `par.bounds`, this is the same as [`tv_min_2d_gfb`].
pub fn tv_min_2d_proj_gfb<L, S>(smooth_f: S, par: &TvMinParam<L::F>, x: &mut[L::F], n: usize) -> Result<(), SolverError>
where L: LinAlg, L::F: Float + Debug + LowerExp, S: Smooth<L>
{
    tv_min_2d(smooth_f, par, x, n, true)
}

/// 1-D version of [`tv_min_2d_gfb`], splitting the forward difference into its even and odd rows.
///
/// `x` shall have two elements at least.
pub fn tv_min_1d_gfb<L, S>(smooth_f: S, par: &TvMinParam<L::F>, x: &mut[L::F]) -> Result<(), SolverError>
where L: LinAlg, L::F: Float + Debug + LowerExp, S: Smooth<L>
{
    tv_min_1d(smooth_f, par, x, false)
}

/// 1-D version of [`tv_min_2d_proj_gfb`].
pub fn tv_min_1d_proj_gfb<L, S>(smooth_f: S, par: &TvMinParam<L::F>, x: &mut[L::F]) -> Result<(), SolverError>
where L: LinAlg, L::F: Float + Debug + LowerExp, S: Smooth<L>
{
    tv_min_1d(smooth_f, par, x, true)
}

//

/// Proximal operator of the 1-D total variation
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// \\({\rm prox}\_{\lambda a {\rm TV}}(v)\\) has no closed form,
/// so it is approximated by an inner [`Gfb`] run on
/// \\(\frac12 \\|x - v\\|_2^2 + \lambda a {\rm TV}(x)\\) starting from \\(v\\).
pub struct ProxTv1d<L: LinAlg>
{
    ph_l: PhantomData<L>,
    weight: L::F,
    /// Number of inner iterations.
    pub inner_iter: usize,
}

impl<L: LinAlg> ProxTv1d<L>
{
    /// Creates an instance.
    ///
    /// Returns [`ProxTv1d`] instance.
    /// * `weight` is \\(a\\).
    pub fn new(weight: L::F) -> Self
    {
        ProxTv1d {
            ph_l: PhantomData,
            weight,
            inner_iter: 100,
        }
    }
}

impl<L: LinAlg> Prox<L> for ProxTv1d<L>
where L::F: Float + Debug + LowerExp
{
    fn prox(&mut self, lambda: L::F, x: &mut L::Sl) -> Result<(), ()>
    {
        let n = x.len();
        if n < 2 {
            return Ok(());
        }

        let f1 = L::F::one();
        let aw = piece_weight(lambda * self.weight);
        let v = x.get_ref().to_vec();

        let (mut w0, mut w1) = (Vec::new(), Vec::new());
        let mut p0 = tv_piece(even_grad::<L>(n).or(Err(()))?, aw, &mut w0).or(Err(()))?;
        let mut p1 = tv_piece(odd_grad::<L>(n).or(Err(()))?, aw, &mut w1).or(Err(()))?;
        let mut proxes: Vec<&mut dyn Prox<L>> = vec![&mut p0, &mut p1];

        let smooth_f = SmoothFn::<L, _>::new(|z: &L::Sl, g: &mut L::Sl| {
            L::copy(z, g);
            L::add(-f1, &L::Sl::new_ref(&v), g);
            Ok(())
        });

        let mut work = vec![L::F::zero(); Gfb::<L>::query_worklen(n, proxes.len())];

        Gfb::<L>::new().par(|p| {
            p.max_iter = self.inner_iter;
            p.log_period = 0;
        }).solve((smooth_f, &mut proxes, x.get_mut(), &mut work)).or(Err(()))
    }
}

/// Minimizes \\(f(x) + a\\,{\rm TV}(x)\\) over a 1-D signal by [`ProxGrad`] with [`ProxTv1d`].
///
/// `par.step_grad` is the proximal-gradient step, `par.inner_iter` is passed to [`ProxTv1d`],
/// and `par.step_relax` and `par.bounds` are not used.
///
/// Returns `Ok`, or `Err` with [`SolverError`] type.
/// * `smooth_f` is \\(f\\) expressed by [`Smooth`], typically
///   [`crate::LeastSq`] of \\(\frac12 \\|A x - b\\|_2^2\\).
/// * `x` is an initial signal before entry, the result on exit.
pub fn tv_prox_grad_1d<L, S>(smooth_f: S, par: &TvMinParam<L::F>, x: &mut[L::F]) -> Result<(), SolverError>
where L: LinAlg, L::F: Float + Debug + LowerExp, S: Smooth<L>
{
    let mut prox_g = ProxTv1d::<L>::new(par.weight);
    prox_g.inner_iter = par.inner_iter;

    let mut work = vec![L::F::zero(); ProxGrad::<L>::query_worklen(x.len())];

    ProxGrad::<L>::new().par(|p| {
        p.max_iter = par.max_iter;
        p.step = par.step_grad;
        p.log_period = par.log_period;
    }).solve((smooth_f, prox_g, x, &mut work))
}

//

#[test]
fn test_prox_tv1d_step()
{
    use float_eq::assert_float_eq;
    use proxsplit_core::FloatGeneric;

    type L = FloatGeneric<f64>;

    let _ = env_logger::builder().is_test(true).try_init();

    // a step of height 2 shrinks by a/3 and a/2 on each side
    let mut p = ProxTv1d::<L>::new(0.3);
    p.inner_iter = 300;

    let x = &mut[1., 1., 1., 3., 3.];
    p.prox(1., x).unwrap();
    assert_float_eq!(x.as_ref(), [1.1, 1.1, 1.1, 2.85, 2.85].as_ref(), abs_all <= 1e-3);

    let x = &mut[2.];
    p.prox(1., x).unwrap();
    assert_eq!(x, &[2.]);
}
