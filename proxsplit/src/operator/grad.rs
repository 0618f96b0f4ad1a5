use std::marker::PhantomData;
use num_traits::{Float, Zero, One};
use proxsplit_core::solver::{LinAlg, Operator, SliceLike, SolverError};
use super::{axpby, OpIdentity, OpScale, OpCompose, OpRestrict, OpKron};

//

/// Forward difference operator
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// \\((G x)_i = x_{i+1} - x_i\\) for \\(i = 0, \ldots, n-2\\), an \\((n-1) \times n\\) operator.
/// The adjoint is the negative divergence
/// \\((G^T y)_0 = -y_0\\), \\((G^T y)_i = y_{i-1} - y_i\\), \\((G^T y)_{n-1} = y_{n-2}\\).
#[derive(Debug, Clone)]
pub struct OpGrad<L: LinAlg>
{
    ph_l: PhantomData<L>,
    n: usize,
}

impl<L: LinAlg> OpGrad<L>
{
    /// Creates an instance.
    /// 
    /// Returns [`OpGrad`] instance, or `Err` with [`SolverError::InvalidOp`] if `n` is zero.
    pub fn new(n: usize) -> Result<Self, SolverError>
    {
        if n == 0 {
            log::error!("Gradient of an empty vector");
            return Err(SolverError::InvalidOp);
        }

        Ok(OpGrad {
            ph_l: PhantomData,
            n,
        })
    }
}

impl<L: LinAlg> Operator<L> for OpGrad<L>
{
    fn size(&self) -> (usize, usize)
    {
        (self.n - 1, self.n)
    }

    fn op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        let x = x.get_ref();

        for (i, v) in y.get_mut().iter_mut().enumerate() {
            axpby(alpha, x[i + 1] - x[i], beta, v);
        }
    }

    fn trans_op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        let f0 = L::F::zero();
        let n = self.n;
        let x = x.get_ref();

        for (i, v) in y.get_mut().iter_mut().enumerate() {
            let prev = if i > 0 {x[i - 1]} else {f0};
            let cur = if i + 1 < n {x[i]} else {f0};
            axpby(alpha, prev - cur, beta, v);
        }
    }
}

//

/// Square forward difference operator
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// \\((D x)_0 = x_0\\) and \\((D x)_i = x_i - x_{i-1}\\), an \\(n \times n\\) operator
/// whose adjoint is \\((D^T y)_i = y_i - y_{i+1}\\), \\((D^T y)_{n-1} = y_{n-1}\\).
/// It is the inverse of [`OpSquareIntegral`].
#[derive(Debug, Clone)]
pub struct OpSquareGrad<L: LinAlg>
{
    ph_l: PhantomData<L>,
    n: usize,
}

impl<L: LinAlg> OpSquareGrad<L>
{
    /// Creates an instance.
    /// 
    /// Returns [`OpSquareGrad`] instance, or `Err` with [`SolverError::InvalidOp`] if `n` is zero.
    pub fn new(n: usize) -> Result<Self, SolverError>
    {
        if n == 0 {
            log::error!("Gradient of an empty vector");
            return Err(SolverError::InvalidOp);
        }

        Ok(OpSquareGrad {
            ph_l: PhantomData,
            n,
        })
    }
}

impl<L: LinAlg> Operator<L> for OpSquareGrad<L>
{
    fn size(&self) -> (usize, usize)
    {
        (self.n, self.n)
    }

    fn op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        let f0 = L::F::zero();
        let x = x.get_ref();

        for (i, v) in y.get_mut().iter_mut().enumerate() {
            let prev = if i > 0 {x[i - 1]} else {f0};
            axpby(alpha, x[i] - prev, beta, v);
        }
    }

    fn trans_op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        let f0 = L::F::zero();
        let n = self.n;
        let x = x.get_ref();

        for (i, v) in y.get_mut().iter_mut().enumerate() {
            let next = if i + 1 < n {x[i + 1]} else {f0};
            axpby(alpha, x[i] - next, beta, v);
        }
    }
}

//

/// Cumulative sum operator
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// \\((S x)_i = \sum_{k \le i} x_k\\); the adjoint is the reverse cumulative sum
/// \\((S^T y)_i = \sum_{k \ge i} y_k\\).
#[derive(Debug, Clone)]
pub struct OpSquareIntegral<L: LinAlg>
{
    ph_l: PhantomData<L>,
    n: usize,
}

impl<L: LinAlg> OpSquareIntegral<L>
{
    /// Creates an instance.
    /// 
    /// Returns [`OpSquareIntegral`] instance, or `Err` with [`SolverError::InvalidOp`] if `n` is zero.
    pub fn new(n: usize) -> Result<Self, SolverError>
    {
        if n == 0 {
            log::error!("Integral of an empty vector");
            return Err(SolverError::InvalidOp);
        }

        Ok(OpSquareIntegral {
            ph_l: PhantomData,
            n,
        })
    }
}

impl<L: LinAlg> Operator<L> for OpSquareIntegral<L>
{
    fn size(&self) -> (usize, usize)
    {
        (self.n, self.n)
    }

    fn op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        let mut sum = L::F::zero();

        for (u, v) in x.get_ref().iter().zip(y.get_mut().iter_mut()) {
            sum = sum + *u;
            axpby(alpha, sum, beta, v);
        }
    }

    fn trans_op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        let mut sum = L::F::zero();

        for (u, v) in x.get_ref().iter().zip(y.get_mut().iter_mut()).rev() {
            sum = sum + *u;
            axpby(alpha, sum, beta, v);
        }
    }
}

//

/// Even or odd rows of [`OpGrad`], scaled by \\(2^{-1/2}\\) so that \\(A A^T = I\\).
pub type OpSplitGrad<L> = OpScale<L, OpCompose<L, OpRestrict<L>, OpGrad<L>>>;

/// [`OpGrad`] along one axis of a row-major volume.
pub type OpGradAxis<L> = OpKron<L, OpKron<L, OpIdentity<L>, OpGrad<L>>, OpIdentity<L>>;

/// Kronecker product of the identity and a split gradient, for a row-major square image.
pub type OpSplitGrad2<L> = OpKron<L, OpIdentity<L>, OpSplitGrad<L>>;

/// Kronecker product of a split gradient and the identity, for a row-major square image.
pub type OpSplitGrad2T<L> = OpKron<L, OpSplitGrad<L>, OpIdentity<L>>;

fn split_grad<L: LinAlg>(n: usize, first: usize) -> Result<OpSplitGrad<L>, SolverError>
{
    let f1 = L::F::one();

    let grad = OpGrad::new(n)?;
    let restrict = OpRestrict::new(n - 1, (first.. n - 1).step_by(2).collect())?;
    let s = (f1 + f1).sqrt().recip();

    Ok(OpScale::new(s, OpCompose::new(restrict, grad)?))
}

/// Even rows \\(0, 2, 4, \ldots\\) of [`OpGrad`] of size `n`, scaled by \\(2^{-1/2}\\).
/// 
/// Distinct even rows of the forward difference do not overlap,
/// so the result is semi-orthogonal: \\(A A^T = I\\).
pub fn even_grad<L: LinAlg>(n: usize) -> Result<OpSplitGrad<L>, SolverError>
{
    split_grad(n, 0)
}

/// Odd rows \\(1, 3, 5, \ldots\\) of [`OpGrad`] of size `n`, scaled by \\(2^{-1/2}\\).
/// 
/// Semi-orthogonal as well as [`even_grad`].
pub fn odd_grad<L: LinAlg>(n: usize) -> Result<OpSplitGrad<L>, SolverError>
{
    split_grad(n, 1)
}

/// Forward difference along the second axis of a row-major `a` x `b` x `c` volume.
pub fn grad_x<L: LinAlg>(a: usize, b: usize, c: usize) -> Result<OpGradAxis<L>, SolverError>
{
    Ok(OpKron::new(OpKron::new(OpIdentity::new(a), OpGrad::new(b)?), OpIdentity::new(c)))
}

/// Forward difference along the first axis of a row-major `a` x `b` x `c` volume.
pub fn grad_y<L: LinAlg>(a: usize, b: usize, c: usize) -> Result<OpKron<L, OpKron<L, OpGrad<L>, OpIdentity<L>>, OpIdentity<L>>, SolverError>
{
    Ok(OpKron::new(OpKron::new(OpGrad::new(a)?, OpIdentity::new(b)), OpIdentity::new(c)))
}

/// Forward difference along the third axis of a row-major `a` x `b` x `c` volume.
pub fn grad_z<L: LinAlg>(a: usize, b: usize, c: usize) -> Result<OpKron<L, OpIdentity<L>, OpGrad<L>>, SolverError>
{
    Ok(OpKron::new(OpIdentity::new(a * b), OpGrad::new(c)?))
}

/// [`even_grad`] applied to each row of a row-major `n` x `n` image.
pub fn even_grad_x<L: LinAlg>(n: usize) -> Result<OpSplitGrad2<L>, SolverError>
{
    Ok(OpKron::new(OpIdentity::new(n), even_grad(n)?))
}

/// [`odd_grad`] applied to each row of a row-major `n` x `n` image.
pub fn odd_grad_x<L: LinAlg>(n: usize) -> Result<OpSplitGrad2<L>, SolverError>
{
    Ok(OpKron::new(OpIdentity::new(n), odd_grad(n)?))
}

/// [`even_grad`] applied to each column of a row-major `n` x `n` image.
pub fn even_grad_y<L: LinAlg>(n: usize) -> Result<OpSplitGrad2T<L>, SolverError>
{
    Ok(OpKron::new(even_grad(n)?, OpIdentity::new(n)))
}

/// [`odd_grad`] applied to each column of a row-major `n` x `n` image.
pub fn odd_grad_y<L: LinAlg>(n: usize) -> Result<OpSplitGrad2T<L>, SolverError>
{
    Ok(OpKron::new(odd_grad(n)?, OpIdentity::new(n)))
}

//

#[test]
fn test_grad1()
{
    use float_eq::assert_float_eq;
    use proxsplit_core::FloatGeneric;
    use crate::operator::OpApply;

    type L = FloatGeneric<f64>;

    let g = OpGrad::<L>::new(4).unwrap();
    let y = g.apply(&[1., 3., 2., 2.]).unwrap();
    assert_float_eq!(y.as_slice(), [2., -1., 0.].as_ref(), abs_all <= 1e-12);

    let x = g.apply_adjoint(&[1., 2., 3.]).unwrap();
    assert_float_eq!(x.as_slice(), [-1., -1., -1., 3.].as_ref(), abs_all <= 1e-12);

    let g = OpGrad::<L>::new(1).unwrap();
    assert_eq!(Operator::<L>::size(&g), (0, 1));
    assert_float_eq!(g.apply_adjoint(&[]).unwrap().as_slice(), [0.].as_ref(), abs_all <= 1e-12);

    assert_eq!(OpGrad::<L>::new(0).err(), Some(SolverError::InvalidOp));
}

#[test]
fn test_square_grad_integral()
{
    use float_eq::assert_float_eq;
    use proxsplit_core::FloatGeneric;
    use crate::operator::OpApply;

    type L = FloatGeneric<f64>;

    let d = OpSquareGrad::<L>::new(4).unwrap();
    let s = OpSquareIntegral::<L>::new(4).unwrap();

    let x = [1., 3., 2., 2.];
    let y = s.apply(&d.apply(&x).unwrap()).unwrap();
    assert_float_eq!(y.as_slice(), x.as_ref(), abs_all <= 1e-12);

    let y = s.apply_adjoint(&[1., 2., 3., 4.]).unwrap();
    assert_float_eq!(y.as_slice(), [10., 9., 7., 4.].as_ref(), abs_all <= 1e-12);

    let y = d.apply_adjoint(&[1., 2., 3., 4.]).unwrap();
    assert_float_eq!(y.as_slice(), [-1., -1., -1., 4.].as_ref(), abs_all <= 1e-12);
}
