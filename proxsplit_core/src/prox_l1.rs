use num_traits::{Float, Zero};
use core::marker::PhantomData;
use crate::solver::{Prox, LinAlg, SliceLike};

//

/// Proximal operator of the L1 norm
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// Elementwise soft thresholding:
/// \\[
/// {\rm prox}\_{\lambda \\|\cdot\\|_1}(v)_i = {\rm sign}(v_i) \max(|v_i| - \lambda, 0).
/// \\]
pub struct ProxL1<L: LinAlg>
{
    ph_l: PhantomData<L>,
}

impl<L: LinAlg> ProxL1<L>
{
    /// Creates an instance.
    /// 
    /// Returns [`ProxL1`] instance.
    pub fn new() -> Self
    {
        ProxL1 {
            ph_l: PhantomData,
        }
    }
}

impl<L: LinAlg> Prox<L> for ProxL1<L>
{
    fn prox(&mut self, lambda: L::F, x: &mut L::Sl) -> Result<(), ()>
    {
        let f0 = L::F::zero();

        for u in x.get_mut() {
            *u = (*u - lambda).max(f0) + (*u + lambda).min(f0);
        }

        Ok(())
    }
}

//

#[test]
fn test_prox_l1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let mut p = ProxL1::<L>::new();

    let x = &mut[-3., -0.5, 0., 0.2, 2.];
    p.prox(1., x).unwrap();
    assert_float_eq!(x.as_ref(), [-2., 0., 0., 0., 1.].as_ref(), abs_all <= 1e-12);

    let v = [-3., -0.5, 0., 0.2, 2.];
    let x = &mut v.clone();
    p.prox(0., x).unwrap();
    assert_float_eq!(x.as_ref(), v.as_ref(), abs_all <= 1e-12);
}
