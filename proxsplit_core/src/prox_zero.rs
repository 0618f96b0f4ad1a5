use core::marker::PhantomData;
use crate::solver::{Prox, LinAlg};

//

/// Proximal operator of the zero function, that is the identity map
pub struct ProxZero<L: LinAlg>
{
    ph_l: PhantomData<L>,
}

impl<L: LinAlg> ProxZero<L>
{
    /// Creates an instance.
    /// 
    /// Returns [`ProxZero`] instance.
    pub fn new() -> Self
    {
        ProxZero {
            ph_l: PhantomData,
        }
    }
}

impl<L: LinAlg> Prox<L> for ProxZero<L>
{
    fn prox(&mut self, _lambda: L::F, _x: &mut L::Sl) -> Result<(), ()>
    {
        Ok(())
    }
}
