use std::marker::PhantomData;
use proxsplit_core::solver::{LinAlg, Operator};

/// Scaled operator \\(s A\\)
#[derive(Debug, Clone)]
pub struct OpScale<L: LinAlg, O: Operator<L>>
{
    ph_l: PhantomData<L>,
    s: L::F,
    op: O,
}

impl<L: LinAlg, O: Operator<L>> OpScale<L, O>
{
    /// Creates an instance.
    /// 
    /// * `s` is a scalar \\(s\\).
    /// * `op` is \\(A\\).
    pub fn new(s: L::F, op: O) -> Self
    {
        OpScale {
            ph_l: PhantomData,
            s,
            op,
        }
    }
}

impl<L: LinAlg, O: Operator<L>> Operator<L> for OpScale<L, O>
{
    fn size(&self) -> (usize, usize)
    {
        self.op.size()
    }

    fn op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        self.op.op(alpha * self.s, x, beta, y);
    }

    fn trans_op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        self.op.trans_op(alpha * self.s, x, beta, y);
    }
}
