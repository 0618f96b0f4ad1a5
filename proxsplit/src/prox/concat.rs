use proxsplit_core::solver::{LinAlg, Prox, SliceLike, SolverError};
use proxsplit_core::splitm_mut;

/// Proximal operator of a separable sum
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// For \\(h(x) = \sum_i h_i(x_i)\\) over consecutive blocks \\(x = (x_1, \ldots, x_k)\\),
/// each block is mapped by its own proximal operator.
pub struct ProxConcat<'a, L: LinAlg>
{
    blocks: Vec<(usize, Box<dyn Prox<L> + 'a>)>,
    n: usize,
}

impl<'a, L: LinAlg> ProxConcat<'a, L>
{
    /// Creates an instance.
    /// 
    /// Returns [`ProxConcat`] instance, or `Err` with [`SolverError::InvalidOp`]
    /// if the block lengths do not add up to `n`.
    /// * `n` is the whole length.
    /// * `blocks` are pairs of a block length and its proximal operator, in order.
    pub fn new(n: usize, blocks: Vec<(usize, Box<dyn Prox<L> + 'a>)>) -> Result<Self, SolverError>
    {
        let sum: usize = blocks.iter().map(|(len, _)| len).sum();

        if sum != n {
            log::error!("Block lengths add up to {}, not {}", sum, n);
            return Err(SolverError::InvalidOp);
        }

        Ok(ProxConcat {
            blocks,
            n,
        })
    }
}

impl<'a, L: LinAlg> Prox<L> for ProxConcat<'a, L>
{
    fn prox(&mut self, lambda: L::F, x: &mut L::Sl) -> Result<(), ()>
    {
        if x.len() != self.n {
            log::error!("Length {} differs from {}", x.len(), self.n);
            return Err(());
        }

        let mut off = 0;
        for (len, prox) in self.blocks.iter_mut() {
            splitm_mut!(x, (_x_done; off), (x_block; *len));
            prox.prox(lambda, &mut x_block)?;
            off += *len;
        }

        Ok(())
    }
}
