//! Linearized ADMM

use num_traits::{Float, Zero, One};
use core::marker::PhantomData;
use core::fmt::{Debug, LowerExp};
use super::{LinAlg, SliceLike, Operator, Prox, SolverError, log_trig};
use crate::splitm_mut;

//

/// Linearized ADMM parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LinAdmmParam<F: Float>
{
    /// Number of iterations to run.
    pub max_iter: usize,
    /// Step size \\(l_f\\) of the \\(f\\)-update.
    pub step_f: F,
    /// Step size \\(l_g\\) of the \\(g\\)-update.
    pub step_g: F,
    /// Period of iterations to output progress log (for debug/trace level).
    pub log_period: usize,
}

impl<F: Float> Default for LinAdmmParam<F>
{
    fn default() -> Self
    {
        LinAdmmParam {
            max_iter: 50,
            step_f: F::one(),
            step_g: F::one(),
            log_period: 10,
        }
    }
}

//

/// Linearized ADMM solver struct.
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// Minimizes \\(f(x) + g(A x)\\) by iterating
/// \\[
/// \begin{array}{l}
/// w \leftarrow A x \\\\
/// x \leftarrow {\rm prox}\_{l_f f}\left(x - \frac{l_f}{l_g} A^T (w - z + u)\right) \\\\
/// z \leftarrow {\rm prox}\_{l_g g}(w + u) \\\\
/// u \leftarrow u + w - z,
/// \end{array}
/// \\]
/// where \\(w\\) is taken before the \\(x\\)-update.
/// Converges when \\(0 < l_f \le l_g / \\|A\\|_2^2\\); this is not checked.
pub struct LinAdmm<L: LinAlg>
{
    /// solver parameters.
    pub par: LinAdmmParam<L::F>,

    ph_l: PhantomData<L>,
}

impl<L: LinAlg> LinAdmm<L>
{
    /// Query of a length of work slice.
    /// 
    /// Returns a length of work slice that [`LinAdmm::solve`] requires.
    /// * `op_a_size` is a number of rows and columns of \\(A\\).
    pub fn query_worklen(op_a_size: (usize, usize)) -> usize
    {
        let (m, _) = op_a_size;

        m +  // A x
        m    // A x - z + u
    }

    /// Creates an instance.
    /// 
    /// Returns [`LinAdmm`] instance.
    pub fn new() -> Self
    {
        LinAdmm {
            par: LinAdmmParam::default(),
            ph_l: PhantomData,
        }
    }

    /// Changes solver parameters.
    /// 
    /// Returns [`LinAdmm`] with its parameters changed.
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<P>(mut self, f: P) -> Self
    where P: FnOnce(&mut LinAdmmParam<L::F>)
    {
        f(&mut self.par);
        self
    }
}

impl<L: LinAlg> LinAdmm<L>
where L::F: Float + Debug + LowerExp
{
    /// Runs linearized ADMM.
    /// 
    /// Returns `Ok`, or `Err` with [`SolverError`] type.
    /// * `op_a` is \\(A\\) as a linear [`Operator`].
    /// * `prox_f` is \\(f\\) expressed by [`Prox`].
    /// * `prox_g` is \\(g\\) expressed by [`Prox`].
    /// * `x`, `z` and `u` are initial iterates before entry, the last iterates on exit.
    ///   Their lengths shall be \\(n\\), \\(m\\) and \\(m\\) respectively.
    /// * `work` slice is used for temporal variables.
    pub fn solve<O, PF, PG>(self,
        (op_a, prox_f, prox_g, x, z, u, work): (O, PF, PG, &mut[L::F], &mut[L::F], &mut[L::F], &mut[L::F])
    ) -> Result<(), SolverError>
    where O: Operator<L>, PF: Prox<L>, PG: Prox<L>
    {
        self.solve_observed((op_a, prox_f, prox_g, x, z, u, work), |_, _| {})
    }

    /// Same as [`LinAdmm::solve`], but calls `observer` with the iteration index and the current \\(x\\)
    /// after each iteration.
    pub fn solve_observed<O, PF, PG, B>(self,
        (op_a, mut prox_f, mut prox_g, x, z, u, work): (O, PF, PG, &mut[L::F], &mut[L::F], &mut[L::F], &mut[L::F]),
        mut observer: B
    ) -> Result<(), SolverError>
    where O: Operator<L>, PF: Prox<L>, PG: Prox<L>, B: FnMut(usize, &L::Sl)
    {
        let (m, n) = op_a.size();

        if x.len() != n || z.len() != m || u.len() != m {
            log::error!("Size mismatch: op_a{:?}, x {}, z {}, u {}", op_a.size(), x.len(), z.len(), u.len());
            return Err(SolverError::InvalidOp);
        }

        if Self::query_worklen((m, n)) > work.len() {
            log::error!("Work memory length {} must be >= {}", work.len(), Self::query_worklen((m, n)));
            return Err(SolverError::WorkShortage);
        }

        log::debug!("{:?}", self.par);

        let f1 = L::F::one();
        let step_f = self.par.step_f;
        let step_g = self.par.step_g;

        let mut x = L::Sl::new_mut(x);
        let mut z = L::Sl::new_mut(z);
        let mut u = L::Sl::new_mut(u);
        let mut work = L::Sl::new_mut(work);
        splitm_mut!(work, (ax; m), (r; m));

        log::info!("----- Started");
        for i in 0.. self.par.max_iter {
            // x <- prox_f(x - lf/lg * A^T (A x - z + u))
            op_a.op(f1, &x, L::F::zero(), &mut ax);
            L::copy(&ax, &mut r);
            L::add(-f1, &z, &mut r);
            L::add(f1, &u, &mut r);
            op_a.trans_op(-step_f / step_g, &r, f1, &mut x);
            prox_f.prox(step_f, &mut x).or(Err(SolverError::ProxFailure))?;

            // z <- prox_g(A x + u), A x of the previous x
            L::copy(&ax, &mut z);
            L::add(f1, &u, &mut z);
            prox_g.prox(step_g, &mut z).or(Err(SolverError::ProxFailure))?;

            // u <- u + A x - z
            L::add(-f1, &z, &mut ax);
            L::add(f1, &ax, &mut u);

            if log_trig(self.par.log_period, i, self.par.max_iter) {
                log::debug!("{}: pri {:.2e}", i, L::norm(&ax));
            }
            else {
                log::trace!("{}: pri {:.2e}", i, L::norm(&ax));
            }

            observer(i, &x);
        }
        log::info!("----- Finished");

        Ok(())
    }
}
