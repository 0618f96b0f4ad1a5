use num_traits::{Zero, One};
use core::marker::PhantomData;
use crate::solver::{Prox, Operator, LinAlg, SliceLike, SliceMut, SolverError};
use crate::splitm_mut;

//

/// Proximal operator transported through an orthogonal operator
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// For \\(A\\) with \\(A^T A = A A^T = I\\),
/// \\[
/// {\rm prox}\_{\lambda h(A \cdot)}(v) = A^T {\rm prox}\_{\lambda h}(A v).
/// \\]
pub struct ProxOrth<'a, L: LinAlg, O: Operator<L>, P: Prox<L>>
{
    ph_l: PhantomData<L>,
    op: O,
    prox: P,
    work: SliceMut<'a, L::Sl>,
}

impl<'a, L: LinAlg, O: Operator<L>, P: Prox<L>> ProxOrth<'a, L, O, P>
{
    /// Query of a length of work slice.
    /// 
    /// Returns a length of work slice that [`ProxOrth::new`] requires.
    /// * `op_size` is a number of rows and columns of \\(A\\).
    pub fn query_worklen(op_size: (usize, usize)) -> usize
    {
        op_size.0
    }

    /// Creates an instance.
    /// 
    /// Returns [`ProxOrth`] instance, or `Err` with [`SolverError`] type.
    /// * `op` is \\(A\\) as a linear [`Operator`]. It shall be square.
    /// * `prox` is \\(h\\) expressed by [`Prox`].
    /// * `work` slice is used for temporal variables.
    pub fn new(op: O, prox: P, work: &'a mut[L::F]) -> Result<Self, SolverError>
    {
        let (m, n) = op.size();

        if m != n {
            log::error!("Orthogonal operator must be square: {:?}", op.size());
            return Err(SolverError::InvalidOp);
        }

        if Self::query_worklen((m, n)) > work.len() {
            log::error!("Work memory length {} must be >= {}", work.len(), Self::query_worklen((m, n)));
            return Err(SolverError::WorkShortage);
        }

        Ok(ProxOrth {
            ph_l: PhantomData,
            op,
            prox,
            work: L::Sl::new_mut(work),
        })
    }
}

impl<'a, L: LinAlg, O: Operator<L>, P: Prox<L>> Prox<L> for ProxOrth<'a, L, O, P>
{
    fn prox(&mut self, lambda: L::F, x: &mut L::Sl) -> Result<(), ()>
    {
        let (m, n) = self.op.size();
        if x.len() != n {
            log::error!("Size mismatch: op{:?}, x {}", self.op.size(), x.len());
            return Err(());
        }

        let f0 = L::F::zero();
        let f1 = L::F::one();

        splitm_mut!(self.work, (t; m));

        self.op.op(f1, x, f0, &mut t);
        self.prox.prox(lambda, &mut t)?;
        self.op.trans_op(f1, &t, f0, x);

        Ok(())
    }
}

//

/// Proximal operator transported through a semi-orthogonal operator
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// For \\(A\\) with \\(A A^T = I\\) (typically having fewer rows than columns),
/// \\[
/// {\rm prox}\_{\lambda h(A \cdot)}(v) = v + A^T \left( {\rm prox}\_{\lambda h}(A v) - A v \right).
/// \\]
/// The component of \\(v\\) in the null space of \\(A\\) is kept as it is.
pub struct ProxSemiOrth<'a, L: LinAlg, O: Operator<L>, P: Prox<L>>
{
    ph_l: PhantomData<L>,
    op: O,
    prox: P,
    work: SliceMut<'a, L::Sl>,
}

impl<'a, L: LinAlg, O: Operator<L>, P: Prox<L>> ProxSemiOrth<'a, L, O, P>
{
    /// Query of a length of work slice.
    /// 
    /// Returns a length of work slice that [`ProxSemiOrth::new`] requires.
    /// * `op_size` is a number of rows and columns of \\(A\\).
    pub fn query_worklen(op_size: (usize, usize)) -> usize
    {
        op_size.0 * 2
    }

    /// Creates an instance.
    /// 
    /// Returns [`ProxSemiOrth`] instance, or `Err` with [`SolverError`] type.
    /// * `op` is \\(A\\) as a linear [`Operator`].
    /// * `prox` is \\(h\\) expressed by [`Prox`].
    /// * `work` slice is used for temporal variables.
    pub fn new(op: O, prox: P, work: &'a mut[L::F]) -> Result<Self, SolverError>
    {
        if Self::query_worklen(op.size()) > work.len() {
            log::error!("Work memory length {} must be >= {}", work.len(), Self::query_worklen(op.size()));
            return Err(SolverError::WorkShortage);
        }

        Ok(ProxSemiOrth {
            ph_l: PhantomData,
            op,
            prox,
            work: L::Sl::new_mut(work),
        })
    }
}

impl<'a, L: LinAlg, O: Operator<L>, P: Prox<L>> Prox<L> for ProxSemiOrth<'a, L, O, P>
{
    fn prox(&mut self, lambda: L::F, x: &mut L::Sl) -> Result<(), ()>
    {
        let (m, n) = self.op.size();
        if x.len() != n {
            log::error!("Size mismatch: op{:?}, x {}", self.op.size(), x.len());
            return Err(());
        }

        let f0 = L::F::zero();
        let f1 = L::F::one();

        splitm_mut!(self.work, (ax; m), (t; m));

        self.op.op(f1, x, f0, &mut ax);
        L::copy(&ax, &mut t);
        self.prox.prox(lambda, &mut t)?;
        L::add(-f1, &ax, &mut t);
        self.op.trans_op(f1, &t, f1, x);

        Ok(())
    }
}

//

#[test]
fn test_prox_orth_perm()
{
    use float_eq::assert_float_eq;
    use crate::{FloatGeneric, MatOp, ProxBox, BoxBounds};

    type L = FloatGeneric<f64>;

    // permutation (x0, x1, x2) -> (x2, x0, x1)
    let array = &[ // column-major
        0., 1., 0.,
        0., 0., 1.,
        1., 0., 0.,
    ];
    let op = MatOp::<L>::new((3, 3), array);

    // h is the indicator of [0,1] x [0,1] x [-1,0], so h(A x) puts x2 and x0 into [0,1], x1 into [-1,0]
    let lo = &[0., 0., -1.];
    let hi = &[1., 1., 0.];
    let work = &mut[0.; 3];
    let mut p = ProxOrth::new(op, ProxBox::new(BoxBounds::Array(lo, hi)).unwrap(), work).unwrap();

    let x = &mut[0.5, 2., -3.];
    p.prox(1., x).unwrap();
    assert_float_eq!(x.as_ref(), [0.5, 0., 0.].as_ref(), abs_all <= 1e-12);
}
