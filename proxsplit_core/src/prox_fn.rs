use num_traits::Zero;
use core::marker::PhantomData;
use crate::solver::{Prox, Smooth, LinAlg};

//

/// Closure adapter of [`Prox`]
/// 
/// The closure takes a step size and a vector to be replaced with its proximal point.
pub struct ProxFn<L, C>
where L: LinAlg, C: FnMut(L::F, &mut L::Sl) -> Result<(), ()>
{
    ph_l: PhantomData<L>,
    c: C,
}

impl<L, C> ProxFn<L, C>
where L: LinAlg, C: FnMut(L::F, &mut L::Sl) -> Result<(), ()>
{
    /// Creates an instance.
    /// 
    /// Returns [`ProxFn`] instance.
    pub fn new(c: C) -> Self
    {
        ProxFn {
            ph_l: PhantomData,
            c,
        }
    }
}

impl<L, C> Prox<L> for ProxFn<L, C>
where L: LinAlg, C: FnMut(L::F, &mut L::Sl) -> Result<(), ()>
{
    fn prox(&mut self, lambda: L::F, x: &mut L::Sl) -> Result<(), ()>
    {
        (self.c)(lambda, x)
    }
}

//

/// Closure adapter of [`Smooth`]
/// 
/// The closure takes a point and a vector to be replaced with the gradient there.
pub struct SmoothFn<L, C>
where L: LinAlg, C: FnMut(&L::Sl, &mut L::Sl) -> Result<(), ()>
{
    ph_l: PhantomData<L>,
    c: C,
}

impl<L, C> SmoothFn<L, C>
where L: LinAlg, C: FnMut(&L::Sl, &mut L::Sl) -> Result<(), ()>
{
    /// Creates an instance.
    /// 
    /// Returns [`SmoothFn`] instance.
    pub fn new(c: C) -> Self
    {
        SmoothFn {
            ph_l: PhantomData,
            c,
        }
    }
}

impl<L, C> Smooth<L> for SmoothFn<L, C>
where L: LinAlg, C: FnMut(&L::Sl, &mut L::Sl) -> Result<(), ()>
{
    fn grad(&mut self, x: &L::Sl, g: &mut L::Sl) -> Result<(), ()>
    {
        (self.c)(x, g)
    }
}

//

/// Zero function as [`Smooth`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SmoothZero;

impl<L: LinAlg> Smooth<L> for SmoothZero
{
    fn grad(&mut self, _x: &L::Sl, g: &mut L::Sl) -> Result<(), ()>
    {
        L::scale(L::F::zero(), g);

        Ok(())
    }
}
