//! Primal-dual hybrid gradient method

use num_traits::{Float, One};
use core::marker::PhantomData;
use core::fmt::{Debug, LowerExp};
use super::{LinAlg, SliceLike, Operator, Prox, SolverError, log_trig};
use crate::splitm_mut;

//

/// PDHG parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PdhgParam<F: Float>
{
    /// Number of iterations to run.
    pub max_iter: usize,
    /// Dual step size \\(\sigma\\).
    pub sigma: F,
    /// Primal step size \\(\tau\\).
    pub tau: F,
    /// Relaxation \\(\theta\\).
    pub theta: F,
    /// Period of iterations to output progress log (for debug/trace level).
    pub log_period: usize,
}

impl<F: Float> Default for PdhgParam<F>
{
    fn default() -> Self
    {
        let half = (F::one() + F::one()).recip();

        PdhgParam {
            max_iter: 50,
            sigma: half,
            tau: half,
            theta: F::one(),
            log_period: 10,
        }
    }
}

//

/// PDHG solver struct.
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// Iterates
/// \\[
/// \begin{array}{l}
/// v \leftarrow y + \sigma A \bar{x} \\\\
/// y \leftarrow v - {\rm prox}\_{\sigma g}(v) \\\\
/// x^+ \leftarrow {\rm prox}\_{\tau f}(x - \tau A^T y) \\\\
/// \bar{x} \leftarrow x^+ + \theta (x^+ - x).
/// \end{array}
/// \\]
/// The \\(y\\)-update is \\({\rm prox}\_{(\sigma g)^\*}(v)\\) by the Moreau decomposition,
/// and the iteration converges to a minimizer of \\(f(x) + g(\sigma A x)\\).
/// When \\(f = 0\\), \\(\sigma x\\) minimizes \\(g(A x)\\).
/// Converges when \\(\sigma \tau \\|A\\|_2^2 < 1\\) and \\(\theta = 1\\); this is not checked.
pub struct Pdhg<L: LinAlg>
{
    /// solver parameters.
    pub par: PdhgParam<L::F>,

    ph_l: PhantomData<L>,
}

impl<L: LinAlg> Pdhg<L>
{
    /// Query of a length of work slice.
    /// 
    /// Returns a length of work slice that [`Pdhg::solve`] requires.
    /// * `op_a_size` is a number of rows and columns of \\(A\\).
    pub fn query_worklen(op_a_size: (usize, usize)) -> usize
    {
        let (m, n) = op_a_size;

        n +  // x_bar
        n +  // x_prev
        m    // v
    }

    /// Creates an instance.
    /// 
    /// Returns [`Pdhg`] instance.
    pub fn new() -> Self
    {
        Pdhg {
            par: PdhgParam::default(),
            ph_l: PhantomData,
        }
    }

    /// Changes solver parameters.
    /// 
    /// Returns [`Pdhg`] with its parameters changed.
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<P>(mut self, f: P) -> Self
    where P: FnOnce(&mut PdhgParam<L::F>)
    {
        f(&mut self.par);
        self
    }
}

impl<L: LinAlg> Pdhg<L>
where L::F: Float + Debug + LowerExp
{
    /// Runs PDHG.
    /// 
    /// Returns `Ok`, or `Err` with [`SolverError`] type.
    /// * `op_a` is \\(A\\) as a linear [`Operator`].
    /// * `prox_f` is \\(f\\) expressed by [`Prox`].
    /// * `prox_g` is \\(g\\) expressed by [`Prox`].
    /// * `x` and `y` are initial primal and dual iterates before entry, the last iterates on exit.
    ///   Their lengths shall be \\(n\\) and \\(m\\) respectively.
    /// * `work` slice is used for temporal variables.
    pub fn solve<O, PF, PG>(self,
        (op_a, prox_f, prox_g, x, y, work): (O, PF, PG, &mut[L::F], &mut[L::F], &mut[L::F])
    ) -> Result<(), SolverError>
    where O: Operator<L>, PF: Prox<L>, PG: Prox<L>
    {
        self.solve_observed((op_a, prox_f, prox_g, x, y, work), |_, _| {})
    }

    /// Same as [`Pdhg::solve`], but calls `observer` with the iteration index and the current \\(x\\)
    /// after each iteration.
    pub fn solve_observed<O, PF, PG, B>(self,
        (op_a, mut prox_f, mut prox_g, x, y, work): (O, PF, PG, &mut[L::F], &mut[L::F], &mut[L::F]),
        mut observer: B
    ) -> Result<(), SolverError>
    where O: Operator<L>, PF: Prox<L>, PG: Prox<L>, B: FnMut(usize, &L::Sl)
    {
        let (m, n) = op_a.size();

        if x.len() != n || y.len() != m {
            log::error!("Size mismatch: op_a{:?}, x {}, y {}", op_a.size(), x.len(), y.len());
            return Err(SolverError::InvalidOp);
        }

        if Self::query_worklen((m, n)) > work.len() {
            log::error!("Work memory length {} must be >= {}", work.len(), Self::query_worklen((m, n)));
            return Err(SolverError::WorkShortage);
        }

        log::debug!("{:?}", self.par);

        let f1 = L::F::one();
        let sigma = self.par.sigma;
        let tau = self.par.tau;
        let theta = self.par.theta;

        let mut x = L::Sl::new_mut(x);
        let mut y = L::Sl::new_mut(y);
        let mut work = L::Sl::new_mut(work);
        splitm_mut!(work, (x_bar; n), (x_prev; n), (v; m));

        L::copy(&x, &mut x_bar);

        log::info!("----- Started");
        for i in 0.. self.par.max_iter {
            // dual
            L::copy(&y, &mut v);
            op_a.op(sigma, &x_bar, f1, &mut v);
            L::copy(&v, &mut y);
            prox_g.prox(sigma, &mut y).or(Err(SolverError::ProxFailure))?;
            L::scale(-f1, &mut y);
            L::add(f1, &v, &mut y);

            // primal
            L::copy(&x, &mut x_prev);
            op_a.trans_op(-tau, &y, f1, &mut x);
            prox_f.prox(tau, &mut x).or(Err(SolverError::ProxFailure))?;

            // relaxation
            L::copy(&x, &mut x_bar);
            L::scale(f1 + theta, &mut x_bar);
            L::add(-theta, &x_prev, &mut x_bar);

            if log_trig(self.par.log_period, i, self.par.max_iter) || log::log_enabled!(log::Level::Trace) {
                L::add(-f1, &x, &mut x_prev);
                let dx = L::norm(&x_prev) / tau;
                if log_trig(self.par.log_period, i, self.par.max_iter) {
                    log::debug!("{}: dx {:.2e}", i, dx);
                }
                else {
                    log::trace!("{}: dx {:.2e}", i, dx);
                }
            }

            observer(i, &x);
        }
        log::info!("----- Finished");

        Ok(())
    }
}
