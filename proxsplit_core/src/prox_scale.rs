use num_traits::One;
use core::marker::PhantomData;
use crate::solver::{Prox, LinAlg, SliceLike, SliceRef};

//

/// Proximal operator of a weighted function
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// For \\(a \ge 0\\), \\({\rm prox}\_{\lambda (a h)}(v) = {\rm prox}\_{(a \lambda) h}(v)\\).
pub struct ProxScale<L: LinAlg, P: Prox<L>>
{
    ph_l: PhantomData<L>,
    weight: L::F,
    prox: P,
}

impl<L: LinAlg, P: Prox<L>> ProxScale<L, P>
{
    /// Creates an instance.
    /// 
    /// Returns [`ProxScale`] instance.
    /// * `weight` is \\(a\\).
    /// * `prox` is \\(h\\) expressed by [`Prox`].
    pub fn new(weight: L::F, prox: P) -> Self
    {
        ProxScale {
            ph_l: PhantomData,
            weight,
            prox,
        }
    }
}

impl<L: LinAlg, P: Prox<L>> Prox<L> for ProxScale<L, P>
{
    fn prox(&mut self, lambda: L::F, x: &mut L::Sl) -> Result<(), ()>
    {
        self.prox.prox(self.weight * lambda, x)
    }
}

//

/// Proximal operator of a shifted function
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// For \\(h(x - b)\\), the proximal operator is \\(b + {\rm prox}\_{\lambda h}(v - b)\\).
pub struct ProxShift<'a, L: LinAlg, P: Prox<L>>
{
    offset: SliceRef<'a, L::Sl>,
    prox: P,
}

impl<'a, L: LinAlg, P: Prox<L>> ProxShift<'a, L, P>
{
    /// Creates an instance.
    /// 
    /// Returns [`ProxShift`] instance.
    /// * `offset` is \\(b\\).
    /// * `prox` is \\(h\\) expressed by [`Prox`].
    pub fn new(offset: &'a[L::F], prox: P) -> Self
    {
        ProxShift {
            offset: L::Sl::new_ref(offset),
            prox,
        }
    }
}

impl<'a, L: LinAlg, P: Prox<L>> Prox<L> for ProxShift<'a, L, P>
{
    fn prox(&mut self, lambda: L::F, x: &mut L::Sl) -> Result<(), ()>
    {
        if self.offset.len() != x.len() {
            log::error!("Offset length {} differs from {}", self.offset.len(), x.len());
            return Err(());
        }

        let f1 = L::F::one();

        L::add(-f1, &self.offset, x);
        self.prox.prox(lambda, x)?;
        L::add(f1, &self.offset, x);

        Ok(())
    }
}

//

#[test]
fn test_prox_scale_shift()
{
    use float_eq::assert_float_eq;
    use crate::{FloatGeneric, ProxL1};

    type L = FloatGeneric<f64>;

    // 2|x - b|_1
    let b = &[1., -1.];
    let mut p = ProxShift::<L, _>::new(b, ProxScale::new(2., ProxL1::new()));

    let x = &mut[4., -1.5];
    p.prox(0.5, x).unwrap();
    assert_float_eq!(x.as_ref(), [3., -1.].as_ref(), abs_all <= 1e-12);
}
