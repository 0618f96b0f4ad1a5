use num_traits::{Zero, One};
use core::marker::PhantomData;
use crate::solver::{Smooth, Operator, LinAlg, SliceLike, SliceRef, SliceMut, SolverError};
use crate::splitm_mut;

//

/// Least squares as [`Smooth`]
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// \\(f(x) = \frac12 \\|A x - b\\|_2^2\\) with \\(\nabla f(x) = A^T (A x - b)\\).
pub struct SmoothLeastSq<'a, L: LinAlg, O: Operator<L>>
{
    ph_l: PhantomData<L>,
    op: O,
    b: SliceRef<'a, L::Sl>,
    work: SliceMut<'a, L::Sl>,
}

impl<'a, L: LinAlg, O: Operator<L>> SmoothLeastSq<'a, L, O>
{
    /// Query of a length of work slice.
    /// 
    /// Returns a length of work slice that [`SmoothLeastSq::new`] requires.
    /// * `op_size` is a number of rows and columns of \\(A\\).
    pub fn query_worklen(op_size: (usize, usize)) -> usize
    {
        op_size.0
    }

    /// Creates an instance.
    /// 
    /// Returns [`SmoothLeastSq`] instance, or `Err` with [`SolverError`] type.
    /// * `op` is \\(A\\) as a linear [`Operator`].
    /// * `b` is \\(b\\), whose length shall be the number of rows of \\(A\\).
    /// * `work` slice is used for temporal variables.
    pub fn new(op: O, b: &'a[L::F], work: &'a mut[L::F]) -> Result<Self, SolverError>
    {
        let (m, _) = op.size();

        if b.len() != m {
            log::error!("Size mismatch: op{:?}, b {}", op.size(), b.len());
            return Err(SolverError::InvalidOp);
        }

        if Self::query_worklen(op.size()) > work.len() {
            log::error!("Work memory length {} must be >= {}", work.len(), Self::query_worklen(op.size()));
            return Err(SolverError::WorkShortage);
        }

        Ok(SmoothLeastSq {
            ph_l: PhantomData,
            op,
            b: L::Sl::new_ref(b),
            work: L::Sl::new_mut(work),
        })
    }
}

impl<'a, L: LinAlg, O: Operator<L>> Smooth<L> for SmoothLeastSq<'a, L, O>
{
    fn grad(&mut self, x: &L::Sl, g: &mut L::Sl) -> Result<(), ()>
    {
        let (m, n) = self.op.size();
        if x.len() != n || g.len() != n {
            log::error!("Size mismatch: op{:?}, x {}, g {}", self.op.size(), x.len(), g.len());
            return Err(());
        }

        let f0 = L::F::zero();
        let f1 = L::F::one();

        splitm_mut!(self.work, (r; m));

        L::copy(&self.b, &mut r);
        self.op.op(f1, x, -f1, &mut r);
        self.op.trans_op(f1, &r, f0, g);

        Ok(())
    }
}

//

#[test]
fn test_smooth_lsq()
{
    use float_eq::assert_float_eq;
    use crate::{FloatGeneric, MatOp};

    type L = FloatGeneric<f64>;

    let array = &[ // column-major
        1., 0., 1.,
        0., 2., 1.,
    ];
    let b = &[1., 2., 3.];
    let work = &mut[0.; 3];
    let mut f = SmoothLeastSq::new(MatOp::<L>::new((3, 2), array), b, work).unwrap();

    let x = &[1., 1.];
    let g = &mut[0.; 2];
    f.grad(x, g).unwrap();
    // A x - b = (0, 0, -1)
    assert_float_eq!(g.as_ref(), [-1., -1.].as_ref(), abs_all <= 1e-12);
}
