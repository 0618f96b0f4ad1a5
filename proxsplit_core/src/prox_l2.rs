use num_traits::{Zero, One};
use core::marker::PhantomData;
use crate::solver::{Prox, LinAlg};

//

/// Proximal operator of the L2 norm
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// Block soft thresholding:
/// \\[
/// {\rm prox}\_{\lambda \\|\cdot\\|_2}(v) = \max\left(1 - \frac{\lambda}{\\|v\\|_2}, 0\right) v.
/// \\]
pub struct ProxL2<L: LinAlg>
{
    ph_l: PhantomData<L>,
}

impl<L: LinAlg> ProxL2<L>
{
    /// Creates an instance.
    /// 
    /// Returns [`ProxL2`] instance.
    pub fn new() -> Self
    {
        ProxL2 {
            ph_l: PhantomData,
        }
    }
}

impl<L: LinAlg> Prox<L> for ProxL2<L>
{
    fn prox(&mut self, lambda: L::F, x: &mut L::Sl) -> Result<(), ()>
    {
        let f0 = L::F::zero();
        let f1 = L::F::one();

        let norm = L::norm(x);

        if norm <= lambda {
            L::scale(f0, x);
        }
        else {
            L::scale(f1 - lambda / norm, x);
        }

        Ok(())
    }
}

//

#[test]
fn test_prox_l2()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let mut p = ProxL2::<L>::new();

    let x = &mut[3., 4.];
    p.prox(1., x).unwrap();
    assert_float_eq!(x.as_ref(), [2.4, 3.2].as_ref(), abs_all <= 1e-12);

    let x = &mut[0.3, -0.4];
    p.prox(1., x).unwrap();
    assert_float_eq!(x.as_ref(), [0., 0.].as_ref(), abs_all <= 1e-12);
}
