use std::marker::PhantomData;
use proxsplit_core::solver::{LinAlg, Operator};

/// Identity operator \\(I_n\\)
#[derive(Debug, Clone)]
pub struct OpIdentity<L: LinAlg>
{
    ph_l: PhantomData<L>,
    n: usize,
}

impl<L: LinAlg> OpIdentity<L>
{
    /// Creates an instance of size `n` x `n`.
    pub fn new(n: usize) -> Self
    {
        OpIdentity {
            ph_l: PhantomData,
            n,
        }
    }
}

impl<L: LinAlg> Operator<L> for OpIdentity<L>
{
    fn size(&self) -> (usize, usize)
    {
        (self.n, self.n)
    }

    fn op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        L::scale(beta, y);
        L::add(alpha, x, y);
    }

    fn trans_op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        self.op(alpha, x, beta, y);
    }
}
