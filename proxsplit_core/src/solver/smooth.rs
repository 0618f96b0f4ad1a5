//! Smooth function

use crate::solver::LinAlg;

/// Smooth convex function trait
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// Expresses a differentiable convex function \\(f\\) by its gradient \\(\nabla f\\).
pub trait Smooth<L: LinAlg>
{
    /// Calculates \\(\nabla f(x)\\).
    /// 
    /// Returns `Ok`, or `Err` if something fails.
    /// * `x` is a point \\(x\\).
    /// * `g` shall be replaced with \\(\nabla f(x)\\) on exit.
    ///   `x` and `g` have the same length.
    fn grad(&mut self, x: &L::Sl, g: &mut L::Sl) -> Result<(), ()>;
}

impl<L: LinAlg, S: Smooth<L> + ?Sized> Smooth<L> for &mut S
{
    fn grad(&mut self, x: &L::Sl, g: &mut L::Sl) -> Result<(), ()>
    {
        (**self).grad(x, g)
    }
}
