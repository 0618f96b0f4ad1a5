//! Proximal gradient method

use num_traits::Float;
use core::marker::PhantomData;
use core::fmt::{Debug, LowerExp};
use super::{LinAlg, SliceLike, Smooth, Prox, SolverError, log_trig};
use crate::splitm_mut;

//

/// Proximal gradient parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxGradParam<F: Float>
{
    /// Number of iterations to run.
    pub max_iter: usize,
    /// Step size \\(l\\).
    pub step: F,
    /// Period of iterations to output progress log (for debug/trace level).
    pub log_period: usize,
}

impl<F: Float> Default for ProxGradParam<F>
{
    fn default() -> Self
    {
        ProxGradParam {
            max_iter: 50,
            step: F::one(),
            log_period: 10,
        }
    }
}

//

/// Proximal gradient solver struct.
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// Minimizes \\(f(x) + g(x)\\), where \\(f\\) is smooth and \\(g\\) has a cheap proximal operator,
/// by iterating
/// \\[
/// x \leftarrow {\rm prox}\_{l g}(x - l \nabla f(x)).
/// \\]
/// Converges when \\(0 < l < 2 / L\\) with \\(L\\) the Lipschitz constant of \\(\nabla f\\);
/// this is not checked.
pub struct ProxGrad<L: LinAlg>
{
    /// solver parameters.
    pub par: ProxGradParam<L::F>,

    ph_l: PhantomData<L>,
}

impl<L: LinAlg> ProxGrad<L>
{
    /// Query of a length of work slice.
    /// 
    /// Returns a length of work slice that [`ProxGrad::solve`] requires.
    /// * `n` is a length of \\(x\\).
    pub fn query_worklen(n: usize) -> usize
    {
        n // gradient
    }

    /// Creates an instance.
    /// 
    /// Returns [`ProxGrad`] instance.
    pub fn new() -> Self
    {
        ProxGrad {
            par: ProxGradParam::default(),
            ph_l: PhantomData,
        }
    }

    /// Changes solver parameters.
    /// 
    /// Returns [`ProxGrad`] with its parameters changed.
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<P>(mut self, f: P) -> Self
    where P: FnOnce(&mut ProxGradParam<L::F>)
    {
        f(&mut self.par);
        self
    }
}

impl<L: LinAlg> ProxGrad<L>
where L::F: Float + Debug + LowerExp
{
    /// Runs the proximal gradient method.
    /// 
    /// Returns `Ok`, or `Err` with [`SolverError`] type.
    /// * `smooth_f` is \\(f\\) expressed by [`Smooth`].
    /// * `prox_g` is \\(g\\) expressed by [`Prox`].
    /// * `x` is an initial iterate before entry, the last iterate on exit.
    /// * `work` slice is used for temporal variables.
    pub fn solve<S, P>(self,
        (smooth_f, prox_g, x, work): (S, P, &mut[L::F], &mut[L::F])
    ) -> Result<(), SolverError>
    where S: Smooth<L>, P: Prox<L>
    {
        self.solve_observed((smooth_f, prox_g, x, work), |_, _| {})
    }

    /// Same as [`ProxGrad::solve`], but calls `observer` with the iteration index and the current iterate
    /// after each iteration.
    pub fn solve_observed<S, P, B>(self,
        (mut smooth_f, mut prox_g, x, work): (S, P, &mut[L::F], &mut[L::F]),
        mut observer: B
    ) -> Result<(), SolverError>
    where S: Smooth<L>, P: Prox<L>, B: FnMut(usize, &L::Sl)
    {
        let n = x.len();

        if Self::query_worklen(n) > work.len() {
            log::error!("Work memory length {} must be >= {}", work.len(), Self::query_worklen(n));
            return Err(SolverError::WorkShortage);
        }

        log::debug!("{:?}", self.par);

        let mut x = L::Sl::new_mut(x);
        let mut work = L::Sl::new_mut(work);
        splitm_mut!(work, (g; n));

        let step = self.par.step;

        log::info!("----- Started");
        for i in 0.. self.par.max_iter {
            smooth_f.grad(&x, &mut g).or(Err(SolverError::SmoothFailure))?;
            L::add(-step, &g, &mut x);
            prox_g.prox(step, &mut x).or(Err(SolverError::ProxFailure))?;

            if log_trig(self.par.log_period, i, self.par.max_iter) {
                log::debug!("{}: grad {:.2e}", i, L::norm(&g));
            }
            else {
                log::trace!("{}: grad {:.2e}", i, L::norm(&g));
            }

            observer(i, &x);
        }
        log::info!("----- Finished");

        Ok(())
    }
}

//

#[test]
fn test_prox_grad1()
{
    use float_eq::assert_float_eq;
    use crate::{FloatGeneric, ProxFn, SmoothZero};

    type L = FloatGeneric<f64>;

    let _ = env_logger::builder().is_test(true).try_init();

    // f = 0, g = 1/2 |x - b|^2
    let b = [1., -2., 0.5];
    let prox_g = ProxFn::<L, _>::new(|lambda: f64, x: &mut[f64]| {
        for (u, v) in x.iter_mut().zip(&b) {
            *u = (*u + lambda * v) / (1. + lambda);
        }
        Ok(())
    });

    let x = &mut[0.; 3];
    let work = &mut[0.; 3];

    let s = ProxGrad::<L>::new().par(|p| {
        p.max_iter = 60;
        p.step = 1.5;
    });
    s.solve((SmoothZero, prox_g, x, work)).unwrap();

    assert_float_eq!(x.as_ref(), b.as_ref(), abs_all <= 1e-9);
}
