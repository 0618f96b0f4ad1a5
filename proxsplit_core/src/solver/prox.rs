//! Proximal operator

use crate::solver::LinAlg;

/// Proximal operator trait
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// Expresses a closed convex function \\(h\\) by its proximal operator
/// \\[
/// {\rm prox}\_{\lambda h}(v) = \arg\min_x \ h(x) + \frac{1}{2\lambda} \\|x - v\\|_2^2.
/// \\]
pub trait Prox<L: LinAlg>
{
    /// Calculates \\({\rm prox}\_{\lambda h}(v)\\).
    /// 
    /// Returns `Ok`, or `Err` if something fails.
    /// * `lambda` is a step size \\(\lambda > 0\\).
    /// * `x` is \\(v\\) before entry, and shall be replaced with \\({\rm prox}\_{\lambda h}(v)\\) on exit.
    fn prox(&mut self, lambda: L::F, x: &mut L::Sl) -> Result<(), ()>;
}

impl<L: LinAlg, P: Prox<L> + ?Sized> Prox<L> for &mut P
{
    fn prox(&mut self, lambda: L::F, x: &mut L::Sl) -> Result<(), ()>
    {
        (**self).prox(lambda, x)
    }
}
