use num_traits::One;
use proxsplit_core::solver::{LinAlg, Operator, SliceLike, SolverError};
use proxsplit_core::{splitm, splitm_mut};

/// Vertically stacked operator
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// \\[
/// \left\lbrack \begin{array}{c} A_1 \\\\ \vdots \\\\ A_k \end{array} \right\rbrack
/// \\]
/// The forward action concatenates the outputs of \\(A_i\\) in order,
/// and the adjoint sums \\(A_i^T\\) applied to the corresponding slices.
pub struct OpStack<'a, L: LinAlg>
{
    ops: Vec<Box<dyn Operator<L> + 'a>>,
    n: usize,
}

impl<'a, L: LinAlg> OpStack<'a, L>
{
    /// Creates an instance.
    /// 
    /// Returns [`OpStack`] instance, or `Err` with [`SolverError::InvalidOp`]
    /// if `ops` is empty or its operators differ in the number of columns.
    pub fn new(ops: Vec<Box<dyn Operator<L> + 'a>>) -> Result<Self, SolverError>
    {
        let n = match ops.first() {
            Some(op) => op.size().1,
            None => {
                log::error!("No operator to stack");
                return Err(SolverError::InvalidOp);
            },
        };

        for op in ops.iter() {
            if op.size().1 != n {
                log::error!("Size mismatch: {:?} in stack of {} columns", op.size(), n);
                return Err(SolverError::InvalidOp);
            }
        }

        Ok(OpStack {
            ops,
            n,
        })
    }

    /// Number of stacked operators.
    pub fn len(&self) -> usize
    {
        self.ops.len()
    }
}

impl<'a, L: LinAlg> Operator<L> for OpStack<'a, L>
{
    fn size(&self) -> (usize, usize)
    {
        let m = self.ops.iter().map(|op| op.size().0).sum();

        (m, self.n)
    }

    fn op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        let mut off = 0;
        for op in self.ops.iter() {
            let m = op.size().0;
            splitm_mut!(y, (_y_done; off), (y_op; m));
            op.op(alpha, x, beta, &mut y_op);
            off += m;
        }
    }

    fn trans_op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        L::scale(beta, y);

        let mut off = 0;
        for op in self.ops.iter() {
            let m = op.size().0;
            splitm!(x, (_x_done; off), (x_op; m));
            op.trans_op(alpha, &x_op, L::F::one(), y);
            off += m;
        }
    }
}
