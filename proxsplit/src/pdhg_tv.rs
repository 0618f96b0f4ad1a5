//! TV-regularized reconstruction by PDHG

use num_traits::{Float, Zero, One, NumCast};
use core::fmt::{Debug, LowerExp};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use proxsplit_core::solver::{LinAlg, Operator, Prox, SolverError, Pdhg};
use proxsplit_core::{ProxZero, ProxShift, ProxScale, ProxL1, ProxL2Sq};
use crate::operator::OpStack;
use crate::prox::ProxConcat;
use crate::norm::{op_norm, op_norm_with_rng};

//

/// Parameters of [`pdhg_tv`].
#[derive(Debug, Clone, PartialEq)]
pub struct PdhgTvParam<F: Float>
{
    /// Regularization weight \\(a\\).
    pub weight: F,
    /// Number of PDHG iterations.
    pub max_iter: usize,
    /// Number of power iterations estimating \\(\\|A\\|_2\\).
    pub norm_iter: usize,
    /// Factor multiplied to the estimated norm, which is approached from below.
    pub norm_margin: F,
    /// Relaxation \\(\theta\\).
    pub theta: F,
    /// Seed of the initial vector of the power iteration; `None` uses [`rand::thread_rng`].
    pub seed: Option<u64>,
    /// Period of iterations to output progress log (for debug/trace level).
    pub log_period: usize,
}

impl<F: Float> Default for PdhgTvParam<F>
{
    fn default() -> Self
    {
        PdhgTvParam {
            weight: F::from(0.0025).unwrap(),
            max_iter: 200,
            norm_iter: 20,
            norm_margin: F::from(1.1).unwrap(),
            theta: F::one(),
            seed: None,
            log_period: 10,
        }
    }
}

/// Reconstructs \\(x\\) from data \\(p\\) by minimizing
/// \\(\frac12 \\|W x - p\\|_2^2 + a \\|D x\\|_1\\) with [`Pdhg`].
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// The problem is posed as \\(f(x) + g(A x)\\) with \\(f = 0\\),
/// \\(A = \lbrack W; D \rbrack\\) and
/// \\(g(w, d) = \frac12 \\|w - p\\|_2^2 + a \\|d\\|_1\\).
/// Step sizes are \\(\sigma = \tau = 0.9^{1/2} / (c \\|A\\|_2)\\),
/// where \\(\\|A\\|_2\\) is estimated by power iteration and \\(c\\) is `par.norm_margin`.
/// [`Pdhg`] then converges to a minimizer of \\(g(\sigma A x)\\),
/// so the last iterate is multiplied by \\(\sigma\\) before returning.
///
/// Returns the reconstruction starting from zero, or `Err` with [`SolverError`] type.
/// * `op_w` is the forward model \\(W\\).
/// * `p` is the data. Its length shall be the number of rows of \\(W\\).
/// * `op_d` is the regularizing operator \\(D\\), typically a stack of gradients.
///   Its number of columns shall equal that of \\(W\\).
pub fn pdhg_tv<L, W, D>(op_w: W, p: &[L::F], op_d: D, par: &PdhgTvParam<L::F>) -> Result<Vec<L::F>, SolverError>
where L: LinAlg, L::F: Float + Debug + LowerExp, W: Operator<L>, D: Operator<L>
{
    let (m_w, n) = op_w.size();
    let (m_d, _) = op_d.size();

    if p.len() != m_w {
        log::error!("Length of p {} must be {}", p.len(), m_w);
        return Err(SolverError::InvalidOp);
    }

    let ops: Vec<Box<dyn Operator<L> + '_>> = vec![Box::new(op_w), Box::new(op_d)];
    let op_a = OpStack::new(ops)?;
    let m = m_w + m_d;

    let norm = match par.seed {
        Some(seed) => op_norm_with_rng::<L, _, _>(&op_a, par.norm_iter, &mut Xoshiro256StarStar::seed_from_u64(seed)),
        None => op_norm::<L, _>(&op_a, par.norm_iter),
    };
    if norm == L::F::zero() {
        log::error!("Operator norm vanished");
        return Err(SolverError::InvalidOp);
    }
    log::debug!("estimated norm {:.3e}", norm);

    let step = <L::F as NumCast>::from(0.9).unwrap_or(L::F::one()).sqrt() / (par.norm_margin * norm);

    let mut p0 = p.to_vec();
    p0.resize(m, L::F::zero());

    let blocks: Vec<(usize, Box<dyn Prox<L> + '_>)> = vec![
        (m_w, Box::new(ProxL2Sq::<L>::new())),
        (m_d, Box::new(ProxScale::new(par.weight, ProxL1::<L>::new()))),
    ];
    let prox_g = ProxShift::new(&p0, ProxConcat::new(m, blocks)?);

    let mut x = vec![L::F::zero(); n];
    let mut y = vec![L::F::zero(); m];
    let mut work = vec![L::F::zero(); Pdhg::<L>::query_worklen((m, n))];

    Pdhg::<L>::new().par(|pp| {
        pp.max_iter = par.max_iter;
        pp.sigma = step;
        pp.tau = step;
        pp.theta = par.theta;
        pp.log_period = par.log_period;
    }).solve((op_a, ProxZero::new(), prox_g, &mut x, &mut y, &mut work))?;

    for v in x.iter_mut() {
        *v = *v * step;
    }

    Ok(x)
}
