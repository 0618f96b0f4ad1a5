use std::marker::PhantomData;
use num_traits::{Float, Zero, One, ToPrimitive};
use proxsplit_core::solver::{LinAlg, Operator, Prox, SliceLike, SolverError};
use proxsplit_core::splitm_mut;

/// Proximal operator of least squares
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// For \\(h(x) = \frac12 \\|A x - b\\|_2^2\\), \\({\rm prox}\_{\lambda h}(v)\\) is the solution of
/// \\[
/// {\rm minimize} \ \frac12 \left\\|
/// \left\lbrack \begin{array}{c} A \\\\ \lambda^{-\frac12} I \end{array} \right\rbrack x -
/// \left\lbrack \begin{array}{c} b \\\\ \lambda^{-\frac12} v \end{array} \right\rbrack
/// \right\\|_2^2,
/// \\]
/// which is approximated by a fixed number of LSQR iterations starting from zero.
/// The augmented operator is never formed.
pub struct ProxLeastSq<L: LinAlg, O: Operator<L>>
{
    ph_l: PhantomData<L>,
    op: O,
    b: Vec<L::F>,
    work: Vec<L::F>,
    /// Number of LSQR iterations, 30 by default.
    pub max_iter: usize,
}

impl<L: LinAlg, O: Operator<L>> ProxLeastSq<L, O>
{
    /// Creates an instance.
    /// 
    /// Returns [`ProxLeastSq`] instance, or `Err` with [`SolverError::InvalidOp`]
    /// if the length of `b` differs from the number of rows of `op`.
    /// * `op` is \\(A\\) as a linear [`Operator`].
    /// * `b` is \\(b\\).
    pub fn new(op: O, b: &[L::F]) -> Result<Self, SolverError>
    {
        let (m, n) = op.size();

        if b.len() != m {
            log::error!("Size mismatch: op{:?}, b {}", op.size(), b.len());
            return Err(SolverError::InvalidOp);
        }

        Ok(ProxLeastSq {
            ph_l: PhantomData,
            op,
            b: b.to_vec(),
            work: vec![L::F::zero(); m + n * 4],
            max_iter: 30,
        })
    }
}

impl<L: LinAlg, O: Operator<L>> Prox<L> for ProxLeastSq<L, O>
{
    fn prox(&mut self, lambda: L::F, x: &mut L::Sl) -> Result<(), ()>
    {
        let (m, n) = self.op.size();
        let f0 = L::F::zero();
        let f1 = L::F::one();

        if x.len() != n || !(lambda > f0) {
            log::error!("Size mismatch or non-positive step: op{:?}, x {}", self.op.size(), x.len());
            return Err(());
        }

        let s = lambda.sqrt().recip();

        let mut work = L::Sl::new_mut(&mut self.work);
        splitm_mut!(work, (u_m; m), (u_n; n), (v; n), (w; n), (sol; n));

        // beta u = [b; s x]
        L::copy(&L::Sl::new_ref(&self.b), &mut u_m);
        L::copy(x, &mut u_n);
        L::scale(s, &mut u_n);
        L::scale(f0, &mut sol);

        let mut beta = L::norm(&u_m).hypot(L::norm(&u_n));
        if beta == f0 {
            L::copy(&sol, x);
            return Ok(());
        }
        L::scale(beta.recip(), &mut u_m);
        L::scale(beta.recip(), &mut u_n);

        // alpha v = M^T u
        self.op.trans_op(f1, &u_m, f0, &mut v);
        L::add(s, &u_n, &mut v);
        let mut alpha = L::norm(&v);
        if alpha == f0 {
            L::copy(&sol, x);
            return Ok(());
        }
        L::scale(alpha.recip(), &mut v);

        L::copy(&v, &mut w);
        let mut phi_bar = beta;
        let mut rho_bar = alpha;

        for i in 0.. self.max_iter {
            // beta u = M v - alpha u
            self.op.op(f1, &v, -alpha, &mut u_m);
            L::scale(-alpha, &mut u_n);
            L::add(s, &v, &mut u_n);
            beta = L::norm(&u_m).hypot(L::norm(&u_n));

            if beta > f0 {
                L::scale(beta.recip(), &mut u_m);
                L::scale(beta.recip(), &mut u_n);

                // alpha v = M^T u - beta v
                self.op.trans_op(f1, &u_m, -beta, &mut v);
                L::add(s, &u_n, &mut v);
                alpha = L::norm(&v);
                if alpha > f0 {
                    L::scale(alpha.recip(), &mut v);
                }
            }

            // plane rotation
            let rho = rho_bar.hypot(beta);
            let c = rho_bar / rho;
            let sn = beta / rho;
            let theta = sn * alpha;
            rho_bar = -c * alpha;
            let phi = c * phi_bar;
            phi_bar = sn * phi_bar;

            L::add(phi / rho, &w, &mut sol);
            L::scale(-theta / rho, &mut w);
            L::add(f1, &v, &mut w);

            log::trace!("{}: lsqr residual {:.2e}", i, phi_bar.abs().to_f64().unwrap_or(f64::NAN));

            if beta == f0 || alpha == f0 {
                break;
            }
        }

        L::copy(&sol, x);

        Ok(())
    }
}
