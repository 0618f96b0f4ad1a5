use num_traits::Float;
use core::marker::PhantomData;
use core::ops::Index;
use crate::solver::LinAlg;
use crate::LinAlgEx;

/// `num::Float`-generic [`LinAlgEx`] implementation
/// 
/// All numeric operations are written in pure Rust.
#[derive(Debug, Clone)]
pub struct FloatGeneric<F>
{
    ph_f: PhantomData<F>,
}

impl<F: Float> LinAlg for FloatGeneric<F>
{
    type F = F;
    type Sl = [F];

    fn norm(x: &[F]) -> F
    {
        // scaled to avoid overflow of the squared sum
        let mut amax = F::zero();
        for u in x {
            amax = amax.max(u.abs());
        }
        if amax == F::zero() || !amax.is_finite() {
            return amax;
        }

        let mut sum = F::zero();
        for u in x {
            let s = *u / amax;
            sum = sum + s * s;
        }
        amax * sum.sqrt()
    }

    fn inner(x: &[F], y: &[F]) -> F
    {
        assert_eq!(x.len(), y.len());

        let mut sum = F::zero();
        for (u, v) in x.iter().zip(y) {
            sum = sum + *u * *v;
        }
        sum
    }

    fn copy(x: &[F], y: &mut[F])
    {
        assert_eq!(x.len(), y.len());

        y.copy_from_slice(x);
    }

    fn scale(alpha: F, x: &mut[F])
    {
        if alpha == F::zero() {
            // clears NaN and inf as well
            for u in x {
                *u = F::zero();
            }
        }
        else {
            for u in x {
                *u = alpha * *u;
            }
        }
    }

    fn add(alpha: F, x: &[F], y: &mut[F])
    {
        assert_eq!(x.len(), y.len());

        for (u, v) in x.iter().zip(y) {
            *v = *v + alpha * *u;
        }
    }
}

//

struct MatIdx<'a, F: Float>
{
    n_row: usize,
    n_col: usize,
    mat: &'a[F],
    transpose: bool,
}

impl<'a, F: Float> MatIdx<'a, F>
{
    fn idx(&self, (r, c): (usize, usize)) -> usize
    {
        let (r, c) = if !self.transpose {(r, c)} else {(c, r)};

        assert!(r < self.n_row);
        assert!(c < self.n_col);

        c * self.n_row + r
    }
}

impl<'a, F: Float> Index<(usize, usize)> for MatIdx<'a, F>
{
    type Output = F;

    fn index(&self, index: (usize, usize)) -> &Self::Output
    {
        &self.mat[self.idx(index)]
    }
}

//

impl<F: Float> LinAlgEx for FloatGeneric<F>
{
    // y = a*mat*x + b*y
    fn transform_ge(transpose: bool, n_row: usize, n_col: usize, alpha: F, mat: &[F], x: &[F], beta: F, y: &mut[F])
    {
        assert_eq!(mat.len(), n_row * n_col);
        if transpose {
            assert_eq!(x.len(), n_row);
            assert_eq!(y.len(), n_col);
        } else {
            assert_eq!(x.len(), n_col);
            assert_eq!(y.len(), n_row);
        };

        let mat = MatIdx {
            n_row, n_col, mat, transpose,
        };

        for r in 0.. y.len() {
            let mut mat_x = F::zero();
            for c in 0.. x.len() {
                mat_x = mat_x + mat[(r, c)] * x[c];
            }
            y[r] = if beta == F::zero() {
                alpha * mat_x
            }
            else {
                alpha * mat_x + beta * y[r]
            };
        }
    }
}

//

#[test]
fn test_norm_scaled()
{
    use float_eq::assert_float_eq;

    type L = FloatGeneric<f64>;

    let x = &[3e200, -4e200];
    assert_float_eq!(L::norm(x), 5e200, r2nd <= 1e-12);

    let x = &[3., 4., 0.];
    assert_float_eq!(L::norm(x), 5., abs <= 1e-12);

    let x: &[f64] = &[];
    assert_eq!(L::norm(x), 0.);
}
