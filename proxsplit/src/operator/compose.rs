use std::marker::PhantomData;
use num_traits::{Zero, One};
use proxsplit_core::solver::{LinAlg, Operator, SliceLike, SolverError};

/// Composed operator \\(A B\\)
/// 
/// Applies \\(B\\) first, then \\(A\\). The intermediate vector is allocated on each call.
#[derive(Debug, Clone)]
pub struct OpCompose<L: LinAlg, OA: Operator<L>, OB: Operator<L>>
{
    ph_l: PhantomData<L>,
    a: OA,
    b: OB,
}

impl<L: LinAlg, OA: Operator<L>, OB: Operator<L>> OpCompose<L, OA, OB>
{
    /// Creates an instance.
    /// 
    /// Returns [`OpCompose`] instance, or `Err` with [`SolverError::InvalidOp`]
    /// if the number of columns of `a` differs from the number of rows of `b`.
    pub fn new(a: OA, b: OB) -> Result<Self, SolverError>
    {
        if a.size().1 != b.size().0 {
            log::error!("Size mismatch: a{:?}, b{:?}", a.size(), b.size());
            return Err(SolverError::InvalidOp);
        }

        Ok(OpCompose {
            ph_l: PhantomData,
            a,
            b,
        })
    }
}

impl<L: LinAlg, OA: Operator<L>, OB: Operator<L>> Operator<L> for OpCompose<L, OA, OB>
{
    fn size(&self) -> (usize, usize)
    {
        (self.a.size().0, self.b.size().1)
    }

    fn op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        let mut t = vec![L::F::zero(); self.b.size().0];
        let mut t = L::Sl::new_mut(&mut t);

        self.b.op(L::F::one(), x, L::F::zero(), &mut t);
        self.a.op(alpha, &t, beta, y);
    }

    fn trans_op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        let mut t = vec![L::F::zero(); self.a.size().1];
        let mut t = L::Sl::new_mut(&mut t);

        self.a.trans_op(L::F::one(), x, L::F::zero(), &mut t);
        self.b.trans_op(alpha, &t, beta, y);
    }
}
