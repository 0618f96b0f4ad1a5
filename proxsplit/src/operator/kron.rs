use std::marker::PhantomData;
use num_traits::{Zero, One};
use proxsplit_core::solver::{LinAlg, Operator, SliceLike};
use super::axpby;

/// Kronecker product operator \\(A \otimes B\\)
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// The input is regarded as a row-major \\(n_A \times n_B\\) matrix \\(X\\),
/// and the output is the row-major \\(m_A \times m_B\\) matrix \\(A X B^T\\).
/// Neither factor is expanded; \\(B\\) is applied to each row and then \\(A\\) to each column,
/// through temporaries of the factors' sizes.
#[derive(Debug, Clone)]
pub struct OpKron<L: LinAlg, OA: Operator<L>, OB: Operator<L>>
{
    ph_l: PhantomData<L>,
    a: OA,
    b: OB,
}

impl<L: LinAlg, OA: Operator<L>, OB: Operator<L>> OpKron<L, OA, OB>
{
    /// Creates an instance.
    /// 
    /// * `a` is \\(A\\).
    /// * `b` is \\(B\\).
    pub fn new(a: OA, b: OB) -> Self
    {
        OpKron {
            ph_l: PhantomData,
            a,
            b,
        }
    }

    fn kron_impl(&self, transpose: bool, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        let (ma, na) = if !transpose {self.a.size()} else {(self.a.size().1, self.a.size().0)};
        let (mb, nb) = if !transpose {self.b.size()} else {(self.b.size().1, self.b.size().0)};

        assert_eq!(x.len(), na * nb);
        assert_eq!(y.len(), ma * mb);

        let f0 = L::F::zero();
        let f1 = L::F::one();

        // X B^T (na x mb)
        let mut xb = vec![f0; na * mb];
        let x = x.get_ref();
        for r in 0.. na {
            let x_r = L::Sl::new_ref(&x[r * nb.. (r + 1) * nb]);
            let mut xb_r = L::Sl::new_mut(&mut xb[r * mb.. (r + 1) * mb]);
            if !transpose {
                self.b.op(f1, &x_r, f0, &mut xb_r);
            }
            else {
                self.b.trans_op(f1, &x_r, f0, &mut xb_r);
            }
        }

        // (X B^T)^T (mb x na)
        let mut xbt = vec![f0; mb * na];
        for r in 0.. na {
            for c in 0.. mb {
                xbt[c * na + r] = xb[r * mb + c];
            }
        }

        // (A X B^T)^T (mb x ma)
        let mut axbt = vec![f0; mb * ma];
        for c in 0.. mb {
            let xbt_c = L::Sl::new_ref(&xbt[c * na.. (c + 1) * na]);
            let mut axbt_c = L::Sl::new_mut(&mut axbt[c * ma.. (c + 1) * ma]);
            if !transpose {
                self.a.op(f1, &xbt_c, f0, &mut axbt_c);
            }
            else {
                self.a.trans_op(f1, &xbt_c, f0, &mut axbt_c);
            }
        }

        let y = y.get_mut();
        for r in 0.. ma {
            for c in 0.. mb {
                axpby(alpha, axbt[c * ma + r], beta, &mut y[r * mb + c]);
            }
        }
    }
}

impl<L: LinAlg, OA: Operator<L>, OB: Operator<L>> Operator<L> for OpKron<L, OA, OB>
{
    fn size(&self) -> (usize, usize)
    {
        let (ma, na) = self.a.size();
        let (mb, nb) = self.b.size();

        (ma * mb, na * nb)
    }

    fn op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        self.kron_impl(false, alpha, x, beta, y);
    }

    fn trans_op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        self.kron_impl(true, alpha, x, beta, y);
    }
}
