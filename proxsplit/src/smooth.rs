//! Smooth functions relying on dynamic heap allocation

use std::marker::PhantomData;
use num_traits::{Zero, One};
use proxsplit_core::solver::{LinAlg, Operator, Smooth, SliceLike, SolverError};

/// Least squares as [`Smooth`]
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// \\(f(x) = \frac12 \\|A x - b\\|_2^2\\) with \\(\nabla f(x) = A^T (A x - b)\\).
/// Owns its data, unlike [`proxsplit_core::SmoothLeastSq`].
pub struct LeastSq<L: LinAlg, O: Operator<L>>
{
    ph_l: PhantomData<L>,
    op: O,
    b: Vec<L::F>,
    r: Vec<L::F>,
}

impl<L: LinAlg, O: Operator<L>> LeastSq<L, O>
{
    /// Creates an instance.
    /// 
    /// Returns [`LeastSq`] instance, or `Err` with [`SolverError::InvalidOp`]
    /// if the length of `b` differs from the number of rows of `op`.
    pub fn new(op: O, b: &[L::F]) -> Result<Self, SolverError>
    {
        let (m, _) = op.size();

        if b.len() != m {
            log::error!("Size mismatch: op{:?}, b {}", op.size(), b.len());
            return Err(SolverError::InvalidOp);
        }

        Ok(LeastSq {
            ph_l: PhantomData,
            op,
            b: b.to_vec(),
            r: vec![L::F::zero(); m],
        })
    }

    /// Evaluates \\(f(x)\\).
    pub fn value(&mut self, x: &[L::F]) -> L::F
    {
        let f1 = L::F::one();
        let mut r = L::Sl::new_mut(&mut self.r);

        L::copy(&L::Sl::new_ref(&self.b), &mut r);
        self.op.op(f1, &L::Sl::new_ref(x), -f1, &mut r);

        let norm = L::norm(&r);
        norm * norm / (f1 + f1)
    }
}

impl<L: LinAlg, O: Operator<L>> Smooth<L> for LeastSq<L, O>
{
    fn grad(&mut self, x: &L::Sl, g: &mut L::Sl) -> Result<(), ()>
    {
        let (_, n) = self.op.size();
        if x.len() != n || g.len() != n {
            log::error!("Size mismatch: op{:?}, x {}, g {}", self.op.size(), x.len(), g.len());
            return Err(());
        }

        let f0 = L::F::zero();
        let f1 = L::F::one();
        let mut r = L::Sl::new_mut(&mut self.r);

        L::copy(&L::Sl::new_ref(&self.b), &mut r);
        self.op.op(f1, x, -f1, &mut r);
        self.op.trans_op(f1, &r, f0, g);

        Ok(())
    }
}
