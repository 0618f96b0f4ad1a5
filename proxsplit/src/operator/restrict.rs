use std::marker::PhantomData;
use proxsplit_core::solver::{LinAlg, Operator, SliceLike, SolverError};
use super::axpby;

/// Restriction operator
/// 
/// Gathers the elements at fixed indices from a vector of length \\(n\\).
/// The adjoint scatters them back into a zero vector.
#[derive(Debug, Clone)]
pub struct OpRestrict<L: LinAlg>
{
    ph_l: PhantomData<L>,
    n: usize,
    indices: Vec<usize>,
}

impl<L: LinAlg> OpRestrict<L>
{
    /// Creates an instance.
    /// 
    /// Returns [`OpRestrict`] instance, or `Err` with [`SolverError::InvalidIndex`]
    /// if `indices` are not strictly increasing or some is out of `0..n`.
    /// * `n` is the input length.
    /// * `indices` are the positions to pick up.
    pub fn new(n: usize, indices: Vec<usize>) -> Result<Self, SolverError>
    {
        let increasing = indices.windows(2).all(|w| w[0] < w[1]);
        let in_range = indices.last().map_or(true, |&i| i < n);

        if !increasing || !in_range {
            log::error!("Indices must be strictly increasing and less than {}", n);
            return Err(SolverError::InvalidIndex);
        }

        Ok(OpRestrict {
            ph_l: PhantomData,
            n,
            indices,
        })
    }

    /// Selected positions.
    pub fn indices(&self) -> &[usize]
    {
        &self.indices
    }
}

impl<L: LinAlg> Operator<L> for OpRestrict<L>
{
    fn size(&self) -> (usize, usize)
    {
        (self.indices.len(), self.n)
    }

    fn op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        let x = x.get_ref();

        for (v, &i) in y.get_mut().iter_mut().zip(&self.indices) {
            axpby(alpha, x[i], beta, v);
        }
    }

    fn trans_op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        L::scale(beta, y);

        let y = y.get_mut();
        for (u, &i) in x.get_ref().iter().zip(&self.indices) {
            y[i] = y[i] + alpha * *u;
        }
    }
}
