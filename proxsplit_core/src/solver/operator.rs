//! Linear operator

use crate::solver::LinAlg;

/// Linear operator trait
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// Expresses a linear operator \\(A: \mathbb{R}^n \to \mathbb{R}^m\\) (or a matrix \\(A \in \mathbb{R}^{m \times n}\\))
/// by its forward and adjoint action only.
/// 
/// [`Operator::trans_op`] shall be the exact adjoint of [`Operator::op`]
/// with respect to the standard inner product, that is
/// \\(\langle A x, y \rangle = \langle x, A^T y \rangle\\) for any \\(x, y\\).
/// The solvers do not check it, but their convergence relies on it.
pub trait Operator<L: LinAlg>
{
    /// Size of \\(A\\).
    /// 
    /// Returns a tuple of \\(m\\) and \\(n\\).
    fn size(&self) -> (usize, usize);

    /// Calculate \\(\alpha A x + \beta y\\).
    /// 
    /// * `alpha` is a scalar \\(\alpha\\).
    /// * `x` is a vector \\(x\\).
    ///   The length of `x` shall be \\(n\\).
    /// * `beta` is a scalar \\(\beta\\).
    /// * `y` is a vector \\(y\\) before entry,
    ///   \\(\alpha A x + \beta y\\) on exit.
    ///   The length of `y` shall be \\(m\\).
    fn op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl);

    /// Calculate \\(\alpha A^T x + \beta y\\).
    /// 
    /// * `alpha` is a scalar \\(\alpha\\).
    /// * `x` is a vector \\(x\\).
    ///   The length of `x` shall be \\(m\\).
    /// * `beta` is a scalar \\(\beta\\).
    /// * `y` is a vector \\(y\\) before entry,
    ///   \\(\alpha A^T x + \beta y\\) on exit.
    ///   The length of `y` shall be \\(n\\).
    fn trans_op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl);
}

impl<L: LinAlg, O: Operator<L> + ?Sized> Operator<L> for &O
{
    fn size(&self) -> (usize, usize)
    {
        (**self).size()
    }

    fn op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        (**self).op(alpha, x, beta, y)
    }

    fn trans_op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        (**self).trans_op(alpha, x, beta, y)
    }
}
