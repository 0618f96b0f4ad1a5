use num_traits::Float;
use core::marker::PhantomData;
use crate::solver::{Prox, LinAlg, SliceLike, SolverError};

//

/// Box bounds \\(\lbrack lo, hi \rbrack\\).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxBounds<'a, F: Float>
{
    /// The same lower and upper bounds for all elements.
    Scalar(F, F),
    /// Elementwise lower and upper bounds.
    Array(&'a[F], &'a[F]),
}

impl<'a, F: Float> BoxBounds<'a, F>
{
    /// Checks consistency of the bounds.
    /// 
    /// Returns `Ok`, or `Err` with [`SolverError::InvalidBounds`]
    /// if some lower bound exceeds its upper bound (or either is NaN),
    /// or if array bounds do not have length `n`.
    pub fn check(&self, n: usize) -> Result<(), SolverError>
    {
        match self {
            BoxBounds::Scalar(lo, hi) => {
                if !(lo <= hi) {
                    return Err(SolverError::InvalidBounds);
                }
            },
            BoxBounds::Array(lo, hi) => {
                if lo.len() != n || hi.len() != n {
                    return Err(SolverError::InvalidBounds);
                }
                if lo.iter().zip(hi.iter()).any(|(l, h)| !(l <= h)) {
                    return Err(SolverError::InvalidBounds);
                }
            },
        }

        Ok(())
    }

    /// Clamps `x` into the bounds elementwise.
    /// 
    /// Array bounds shall have the same length as `x`.
    pub fn clamp(&self, x: &mut[F])
    {
        match self {
            BoxBounds::Scalar(lo, hi) => {
                for u in x {
                    *u = (*u).max(*lo).min(*hi);
                }
            },
            BoxBounds::Array(lo, hi) => {
                assert_eq!(lo.len(), x.len());
                assert_eq!(hi.len(), x.len());

                for ((u, l), h) in x.iter_mut().zip(lo.iter()).zip(hi.iter()) {
                    *u = (*u).max(*l).min(*h);
                }
            },
        }
    }

    fn len(&self) -> Option<usize>
    {
        match self {
            BoxBounds::Scalar(_, _) => None,
            BoxBounds::Array(lo, _) => Some(lo.len()),
        }
    }
}

//

/// Proximal operator of the indicator function of a box
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// \\[
/// {\rm prox}\_{\lambda I_{\lbrack lo, hi \rbrack}}(v) = \min(\max(v, lo), hi),
/// \\]
/// which does not depend on \\(\lambda\\).
pub struct ProxBox<'a, L: LinAlg>
{
    ph_l: PhantomData<L>,
    bounds: BoxBounds<'a, L::F>,
}

impl<'a, L: LinAlg> ProxBox<'a, L>
{
    /// Creates an instance.
    /// 
    /// Returns [`ProxBox`] instance, or `Err` with [`SolverError::InvalidBounds`] if the bounds are inconsistent.
    /// * `bounds` are the box bounds.
    pub fn new(bounds: BoxBounds<'a, L::F>) -> Result<Self, SolverError>
    {
        let n = bounds.len().unwrap_or(0);
        if let Err(e) = bounds.check(n) {
            log::error!("Lower bound exceeds upper bound, or their lengths differ");
            return Err(e);
        }

        Ok(ProxBox {
            ph_l: PhantomData,
            bounds,
        })
    }

    /// The box bounds.
    pub fn bounds(&self) -> BoxBounds<'a, L::F>
    {
        self.bounds
    }
}

impl<'a, L: LinAlg> Prox<L> for ProxBox<'a, L>
{
    fn prox(&mut self, _lambda: L::F, x: &mut L::Sl) -> Result<(), ()>
    {
        if let Some(n) = self.bounds.len() {
            if n != x.len() {
                log::error!("Bounds length {} differs from {}", n, x.len());
                return Err(());
            }
        }

        self.bounds.clamp(x.get_mut());

        Ok(())
    }
}

//

#[test]
fn test_prox_box1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let x = &mut[-2., 0.5, 3.];
    let mut p = ProxBox::<L>::new(BoxBounds::Scalar(0., 1.)).unwrap();
    p.prox(10., x).unwrap();
    assert_float_eq!(x.as_ref(), [0., 0.5, 1.].as_ref(), abs_all <= 1e-12);

    let lo = &[-1., -1., 2.];
    let hi = &[1., 0., 2.];
    let x = &mut[-2., 0.5, 3.];
    let mut p = ProxBox::<L>::new(BoxBounds::Array(lo, hi)).unwrap();
    p.prox(0.1, x).unwrap();
    assert_float_eq!(x.as_ref(), [-1., 0., 2.].as_ref(), abs_all <= 1e-12);

    let x = &mut[0.; 2];
    assert!(p.prox(1., x).is_err());
}

#[test]
fn test_prox_box_invalid()
{
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    assert_eq!(ProxBox::<L>::new(BoxBounds::Scalar(1., 0.)).err(), Some(SolverError::InvalidBounds));
    assert_eq!(ProxBox::<L>::new(BoxBounds::Scalar(f64::NAN, 0.)).err(), Some(SolverError::InvalidBounds));
    assert_eq!(ProxBox::<L>::new(BoxBounds::Array(&[0., 0.], &[1.])).err(), Some(SolverError::InvalidBounds));
    assert_eq!(ProxBox::<L>::new(BoxBounds::Array(&[0., 2.], &[1., 1.])).err(), Some(SolverError::InvalidBounds));
}
