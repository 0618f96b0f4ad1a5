use num_traits::{Float, One};
use core::marker::PhantomData;
use crate::solver::{Prox, LinAlg};

//

/// Proximal operator of the squared L2 norm
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// For \\(h(x) = \frac12 \\|x\\|_2^2\\),
/// \\[
/// {\rm prox}\_{\lambda h}(v) = \frac{v}{1 + \lambda}.
/// \\]
pub struct ProxL2Sq<L: LinAlg>
{
    ph_l: PhantomData<L>,
}

impl<L: LinAlg> ProxL2Sq<L>
{
    /// Creates an instance.
    /// 
    /// Returns [`ProxL2Sq`] instance.
    pub fn new() -> Self
    {
        ProxL2Sq {
            ph_l: PhantomData,
        }
    }
}

impl<L: LinAlg> Prox<L> for ProxL2Sq<L>
{
    fn prox(&mut self, lambda: L::F, x: &mut L::Sl) -> Result<(), ()>
    {
        L::scale((L::F::one() + lambda).recip(), x);

        Ok(())
    }
}
