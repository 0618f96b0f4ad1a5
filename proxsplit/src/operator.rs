//! Operator combinators and finite-difference operators

use num_traits::{Float, Zero, One};
use proxsplit_core::solver::{LinAlg, Operator, SliceLike, SolverError};

mod identity;
mod scale;
mod compose;
mod restrict;
mod stack;
mod kron;
mod grad;

pub use identity::*;
pub use scale::*;
pub use compose::*;
pub use restrict::*;
pub use stack::*;
pub use kron::*;
pub use grad::*;

//

/// Allocating application of [`Operator`]
/// 
/// Every [`Operator`] gets these methods, which check the vector length
/// and return a newly allocated result.
pub trait OpApply<L: LinAlg>: Operator<L>
{
    /// Calculates \\(A x\\).
    /// 
    /// Returns the result, or `Err` with [`SolverError::InvalidOp`] if `x` does not match the number of columns.
    fn apply(&self, x: &[L::F]) -> Result<Vec<L::F>, SolverError>;

    /// Calculates \\(A^T y\\).
    /// 
    /// Returns the result, or `Err` with [`SolverError::InvalidOp`] if `y` does not match the number of rows.
    fn apply_adjoint(&self, y: &[L::F]) -> Result<Vec<L::F>, SolverError>;
}

impl<L: LinAlg, O: Operator<L> + ?Sized> OpApply<L> for O
{
    fn apply(&self, x: &[L::F]) -> Result<Vec<L::F>, SolverError>
    {
        let (m, n) = self.size();
        if x.len() != n {
            log::error!("Size mismatch: op{:?}, x {}", self.size(), x.len());
            return Err(SolverError::InvalidOp);
        }

        let mut y = vec![L::F::zero(); m];
        self.op(L::F::one(), &L::Sl::new_ref(x), L::F::zero(), &mut L::Sl::new_mut(&mut y));
        Ok(y)
    }

    fn apply_adjoint(&self, y: &[L::F]) -> Result<Vec<L::F>, SolverError>
    {
        let (m, n) = self.size();
        if y.len() != m {
            log::error!("Size mismatch: op{:?}, y {}", self.size(), y.len());
            return Err(SolverError::InvalidOp);
        }

        let mut x = vec![L::F::zero(); n];
        self.trans_op(L::F::one(), &L::Sl::new_ref(y), L::F::zero(), &mut L::Sl::new_mut(&mut x));
        Ok(x)
    }
}

// y <- alpha * v + beta * y, where y is not read if beta is zero
fn axpby<F: Float>(alpha: F, v: F, beta: F, y: &mut F)
{
    *y = if beta == F::zero() {
        alpha * v
    }
    else {
        alpha * v + beta * *y
    };
}
