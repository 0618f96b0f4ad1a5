//! Generalized forward-backward splitting

use num_traits::{Float, Zero, One, NumCast};
use core::marker::PhantomData;
use core::fmt::{Debug, LowerExp};
use super::{LinAlg, SliceLike, Smooth, Prox, SolverError, log_trig};
use crate::{BoxBounds, splitm_mut};

//

/// GFB parameters, shared by [`Gfb`] and [`ProjGfb`].
#[derive(Debug, Clone, PartialEq)]
pub struct GfbParam<F: Float>
{
    /// Number of iterations to run.
    pub max_iter: usize,
    /// Relaxation \\(l \in (0, 2)\\).
    pub relax: F,
    /// Gradient step size \\(m\\).
    pub step: F,
    /// Period of iterations to output progress log (for debug/trace level).
    pub log_period: usize,
}

impl<F: Float> Default for GfbParam<F>
{
    fn default() -> Self
    {
        GfbParam {
            max_iter: 50,
            relax: F::one(),
            step: F::one(),
            log_period: 10,
        }
    }
}

//

/// Generalized forward-backward solver struct.
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// Minimizes \\(f(x) + \sum_{j=1}^r g_j(x)\\), where \\(f\\) is smooth,
/// keeping an auxiliary copy \\(z_j\\) per regularizer:
/// \\[
/// \begin{array}{l}
/// z_j \leftarrow z_j + l \left( {\rm prox}\_{m r g_j}(2 x - z_j - m \nabla f(x)) - x \right)
/// \quad (j = 1, \ldots, r) \\\\
/// x \leftarrow \frac{1}{r} \sum_j z_j.
/// \end{array}
/// \\]
/// Every \\(z_j\\) starts from the initial \\(x\\).
pub struct Gfb<L: LinAlg>
{
    /// solver parameters.
    pub par: GfbParam<L::F>,

    ph_l: PhantomData<L>,
}

impl<L: LinAlg> Gfb<L>
{
    /// Query of a length of work slice.
    /// 
    /// Returns a length of work slice that [`Gfb::solve`] and [`ProjGfb::solve`] require.
    /// * `n` is a length of \\(x\\).
    /// * `n_regs` is a number of regularizers \\(r\\).
    pub fn query_worklen(n: usize, n_regs: usize) -> usize
    {
        n * n_regs + // z_j
        n +          // gradient
        n            // prox argument
    }

    /// Creates an instance.
    /// 
    /// Returns [`Gfb`] instance.
    pub fn new() -> Self
    {
        Gfb {
            par: GfbParam::default(),
            ph_l: PhantomData,
        }
    }

    /// Changes solver parameters.
    /// 
    /// Returns [`Gfb`] with its parameters changed.
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<P>(mut self, f: P) -> Self
    where P: FnOnce(&mut GfbParam<L::F>)
    {
        f(&mut self.par);
        self
    }
}

impl<L: LinAlg> Gfb<L>
where L::F: Float + Debug + LowerExp
{
    /// Runs GFB.
    /// 
    /// Returns `Ok`, or `Err` with [`SolverError`] type.
    /// * `smooth_f` is \\(f\\) expressed by [`Smooth`].
    /// * `proxes` are \\(g_1, \ldots, g_r\\) expressed by [`Prox`]. It shall not be empty.
    /// * `x` is an initial iterate before entry, the last iterate on exit.
    /// * `work` slice is used for temporal variables.
    pub fn solve<S>(self,
        (smooth_f, proxes, x, work): (S, &mut[&mut dyn Prox<L>], &mut[L::F], &mut[L::F])
    ) -> Result<(), SolverError>
    where S: Smooth<L>
    {
        self.solve_observed((smooth_f, proxes, x, work), |_, _| {})
    }

    /// Same as [`Gfb::solve`], but calls `observer` with the iteration index and the current iterate
    /// after each iteration.
    pub fn solve_observed<S, B>(self,
        (smooth_f, proxes, x, work): (S, &mut[&mut dyn Prox<L>], &mut[L::F], &mut[L::F]),
        observer: B
    ) -> Result<(), SolverError>
    where S: Smooth<L>, B: FnMut(usize, &L::Sl)
    {
        GfbCore {
            par: self.par,
            ph_l: PhantomData,
        }.solve(smooth_f, proxes, None, x, work, observer)
    }
}

//

/// Projected GFB solver struct.
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// Same iteration as [`Gfb`], except that every \\(z_j\\) is clamped into box bounds
/// \\(\lbrack lo, hi \rbrack\\) before \\(x\\) is recomputed as their average,
/// so that \\(x\\) always stays in the box.
pub struct ProjGfb<L: LinAlg>
{
    /// solver parameters.
    pub par: GfbParam<L::F>,

    ph_l: PhantomData<L>,
}

impl<L: LinAlg> ProjGfb<L>
{
    /// Query of a length of work slice.
    /// 
    /// Same as [`Gfb::query_worklen`].
    pub fn query_worklen(n: usize, n_regs: usize) -> usize
    {
        Gfb::<L>::query_worklen(n, n_regs)
    }

    /// Creates an instance.
    /// 
    /// Returns [`ProjGfb`] instance.
    pub fn new() -> Self
    {
        ProjGfb {
            par: GfbParam::default(),
            ph_l: PhantomData,
        }
    }

    /// Changes solver parameters.
    /// 
    /// Returns [`ProjGfb`] with its parameters changed.
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<P>(mut self, f: P) -> Self
    where P: FnOnce(&mut GfbParam<L::F>)
    {
        f(&mut self.par);
        self
    }
}

impl<L: LinAlg> ProjGfb<L>
where L::F: Float + Debug + LowerExp
{
    /// Runs projected GFB.
    /// 
    /// Returns `Ok`, or `Err` with [`SolverError`] type.
    /// * `smooth_f` is \\(f\\) expressed by [`Smooth`].
    /// * `proxes` are \\(g_1, \ldots, g_r\\) expressed by [`Prox`]. It shall not be empty.
    /// * `bounds` are the box bounds.
    /// * `x` is an initial iterate before entry, the last iterate on exit.
    /// * `work` slice is used for temporal variables.
    pub fn solve<S>(self,
        (smooth_f, proxes, bounds, x, work): (S, &mut[&mut dyn Prox<L>], BoxBounds<'_, L::F>, &mut[L::F], &mut[L::F])
    ) -> Result<(), SolverError>
    where S: Smooth<L>
    {
        self.solve_observed((smooth_f, proxes, bounds, x, work), |_, _| {})
    }

    /// Same as [`ProjGfb::solve`], but calls `observer` with the iteration index and the current iterate
    /// after each iteration.
    pub fn solve_observed<S, B>(self,
        (smooth_f, proxes, bounds, x, work): (S, &mut[&mut dyn Prox<L>], BoxBounds<'_, L::F>, &mut[L::F], &mut[L::F]),
        observer: B
    ) -> Result<(), SolverError>
    where S: Smooth<L>, B: FnMut(usize, &L::Sl)
    {
        if let Err(e) = bounds.check(x.len()) {
            log::error!("Invalid bounds for x of length {}", x.len());
            return Err(e);
        }

        GfbCore {
            par: self.par,
            ph_l: PhantomData,
        }.solve(smooth_f, proxes, Some(bounds), x, work, observer)
    }
}

//

struct GfbCore<L: LinAlg>
{
    par: GfbParam<L::F>,

    ph_l: PhantomData<L>,
}

impl<L: LinAlg> GfbCore<L>
where L::F: Float + Debug + LowerExp
{
    fn solve<S, B>(self,
        mut smooth_f: S, proxes: &mut[&mut dyn Prox<L>], bounds: Option<BoxBounds<'_, L::F>>,
        x: &mut[L::F], work: &mut[L::F],
        mut observer: B
    ) -> Result<(), SolverError>
    where S: Smooth<L>, B: FnMut(usize, &L::Sl)
    {
        let n = x.len();
        let n_regs = proxes.len();

        if n_regs == 0 {
            log::error!("No regularizer is given");
            return Err(SolverError::InvalidOp);
        }

        if Gfb::<L>::query_worklen(n, n_regs) > work.len() {
            log::error!("Work memory length {} must be >= {}", work.len(), Gfb::<L>::query_worklen(n, n_regs));
            return Err(SolverError::WorkShortage);
        }

        log::debug!("{:?}, n_regs {}", self.par, n_regs);

        let f1 = L::F::one();
        let f0 = L::F::zero();
        let f2 = f1 + f1;
        let relax = self.par.relax;
        let step = self.par.step;
        let regs = <L::F as NumCast>::from(n_regs).ok_or(SolverError::InvalidOp)?;
        let step_prox = step * regs;

        let mut x = L::Sl::new_mut(x);
        let mut work = L::Sl::new_mut(work);
        splitm_mut!(work, (zs; n * n_regs), (grad; n), (p; n));

        for j in 0.. n_regs {
            splitm_mut!(zs, (_z_prev; j * n), (z; n));
            L::copy(&x, &mut z);
        }

        log::info!("----- Started");
        for i in 0.. self.par.max_iter {
            smooth_f.grad(&x, &mut grad).or(Err(SolverError::SmoothFailure))?;

            for (j, prox) in proxes.iter_mut().enumerate() {
                splitm_mut!(zs, (_z_prev; j * n), (z; n));

                // p <- prox(2x - z - m grad)
                L::copy(&x, &mut p);
                L::scale(f2, &mut p);
                L::add(-f1, &z, &mut p);
                L::add(-step, &grad, &mut p);
                prox.prox(step_prox, &mut p).or(Err(SolverError::ProxFailure))?;

                // z <- z + l (p - x)
                L::add(relax, &p, &mut z);
                L::add(-relax, &x, &mut z);

                if let Some(b) = &bounds {
                    b.clamp(z.get_mut());
                }
            }

            L::copy(&x, &mut p);
            L::scale(f0, &mut x);
            for j in 0.. n_regs {
                splitm_mut!(zs, (_z_prev; j * n), (z; n));
                L::add(regs.recip(), &z, &mut x);
            }

            L::add(-f1, &x, &mut p);
            if log_trig(self.par.log_period, i, self.par.max_iter) {
                log::debug!("{}: dx {:.2e}", i, L::norm(&p));
            }
            else {
                log::trace!("{}: dx {:.2e}", i, L::norm(&p));
            }

            observer(i, &x);
        }
        log::info!("----- Finished");

        Ok(())
    }
}
