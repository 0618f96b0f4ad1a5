//! Operator norm estimation

use num_traits::{Float, Zero, One, NumCast};
use rand::Rng;
use rand_distr::StandardNormal;
use proxsplit_core::solver::{LinAlg, Operator, SliceLike};

/// Estimates the spectral norm \\(\\|A\\|_2\\) by power iteration.
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// Starting from a standard normal random unit vector \\(b\\),
/// `max_iter` times repeats \\(b \leftarrow A^T A b / \\|A^T A b\\|_2\\),
/// and returns \\(\sqrt{\\|A^T A b\\|_2 / \\|b\\|_2}\\).
/// There is no convergence test. The estimate approaches the largest singular value from below,
/// so step sizes derived from it should include a safety factor.
/// 
/// Returns zero if \\(A\\) has no column or the iterate vanishes.
/// * `op` is \\(A\\) as a linear [`Operator`].
/// * `max_iter` is the number of iterations.
/// * `rng` is a random number generator for the initial vector.
pub fn op_norm_with_rng<L, O, R>(op: &O, max_iter: usize, rng: &mut R) -> L::F
where L: LinAlg, O: Operator<L> + ?Sized, R: Rng
{
    let (m, n) = op.size();
    let f0 = L::F::zero();
    let f1 = L::F::one();

    if n == 0 {
        return f0;
    }

    let mut b = Vec::with_capacity(n);
    for _ in 0.. n {
        let r: f64 = rng.sample(StandardNormal);
        b.push(<L::F as NumCast>::from(r).unwrap_or(f0));
    }
    let mut t = vec![f0; m];
    let mut bb = vec![f0; n];

    let mut b = L::Sl::new_mut(&mut b);
    let mut t = L::Sl::new_mut(&mut t);
    let mut bb = L::Sl::new_mut(&mut bb);

    let norm_b = L::norm(&b);
    if norm_b == f0 {
        return f0;
    }
    L::scale(norm_b.recip(), &mut b);

    for i in 0.. max_iter {
        op.op(f1, &b, f0, &mut t);
        op.trans_op(f1, &t, f0, &mut bb);

        let norm_bb = L::norm(&bb);
        if norm_bb == f0 {
            log::warn!("{}: iterate vanished", i);
            return f0;
        }
        L::copy(&bb, &mut b);
        L::scale(norm_bb.recip(), &mut b);
    }

    op.op(f1, &b, f0, &mut t);
    op.trans_op(f1, &t, f0, &mut bb);

    (L::norm(&bb) / L::norm(&b)).sqrt()
}

/// Same as [`op_norm_with_rng`] with [`rand::thread_rng`].
pub fn op_norm<L, O>(op: &O, max_iter: usize) -> L::F
where L: LinAlg, O: Operator<L> + ?Sized
{
    op_norm_with_rng(op, max_iter, &mut rand::thread_rng())
}

//

#[test]
fn test_op_norm_zero()
{
    use proxsplit_core::FloatGeneric;
    use crate::MatBuild;

    type L = FloatGeneric<f64>;

    let m = MatBuild::<L>::new((3, 2));
    assert_eq!(op_norm(&m.as_op(), 10), 0.);

    let m = MatBuild::<L>::new((3, 0));
    assert_eq!(op_norm(&m.as_op(), 10), 0.);
}
